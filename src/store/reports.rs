//
//  github-explorer
//  store/reports.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Typed access to the reports persisted for one organisation.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use super::{ChunkedStore, DocumentStore, StoreError, WriteOutcome};
use crate::models::{Repository, Team, User};
use crate::reports::{MembersTeams, ReportData, ReportName};

/// Collections are named `<prefix>-<organisation>`.
pub const COLLECTION_PREFIX: &str = "github-explorer";

/// Collection holding an organisation's reports.
pub fn collection_name(organisation: &str) -> String {
    format!("{COLLECTION_PREFIX}-{organisation}")
}

/// Persisted reports of one organisation.
///
/// Reads of a report that was never persisted return an empty collection.
#[derive(Debug)]
pub struct ReportStore<S> {
    store: ChunkedStore<S>,
    organisation: String,
    collection: String,
}

impl<S: DocumentStore> ReportStore<S> {
    pub fn new(store: ChunkedStore<S>, organisation: impl Into<String>) -> Self {
        let organisation = organisation.into();
        Self {
            collection: collection_name(&organisation),
            store,
            organisation,
        }
    }

    pub fn organisation(&self) -> &str {
        &self.organisation
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Persists a report result under its document name.
    pub async fn save(&self, report: ReportName, data: &ReportData) -> Result<WriteOutcome, StoreError> {
        let value = data.to_value().map_err(|source| StoreError::Encode {
            name: report.as_str().to_string(),
            source,
        })?;

        let outcome = self.store.write(&self.collection, report.as_str(), &value).await?;

        tracing::info!(
            collection = %self.collection,
            report = %report,
            records = outcome.records,
            chunks = outcome.chunks,
            "Persisted report"
        );
        Ok(outcome)
    }

    /// When the report was last persisted.
    pub async fn updated(&self, report: ReportName) -> Result<Option<DateTime<Utc>>, StoreError> {
        self.store.updated(&self.collection, report.as_str()).await
    }

    async fn load<T: DeserializeOwned + Default>(&self, report: ReportName) -> Result<T, StoreError> {
        let Some(value) = self.store.read(&self.collection, report.as_str()).await? else {
            return Ok(T::default());
        };

        serde_json::from_value(value).map_err(|source| StoreError::Decode {
            collection: self.collection.clone(),
            name: report.as_str().to_string(),
            source,
        })
    }

    // -------------------------------------------------------------------------
    // Members
    // -------------------------------------------------------------------------

    pub async fn all_members(&self) -> Result<Vec<User>, StoreError> {
        self.load(ReportName::AllMembers).await
    }

    /// Enterprise members that belong to this organisation.
    pub async fn all_organisation_members(&self) -> Result<Vec<User>, StoreError> {
        let members = self.all_members().await?;
        Ok(members
            .into_iter()
            .filter(|u| u.belongs_to(&self.organisation))
            .collect())
    }

    pub async fn all_owners(&self) -> Result<Vec<User>, StoreError> {
        self.load(ReportName::AllOwners).await
    }

    pub async fn is_owner(&self, login: &str) -> Result<bool, StoreError> {
        let owners = self.all_owners().await?;
        Ok(owners.iter().any(|u| u.login.eq_ignore_ascii_case(login)))
    }

    pub async fn teamless_members(&self) -> Result<Vec<User>, StoreError> {
        self.load(ReportName::TeamlessMembers).await
    }

    // -------------------------------------------------------------------------
    // Repositories
    // -------------------------------------------------------------------------

    pub async fn all_repositories(&self) -> Result<Vec<Repository>, StoreError> {
        self.load(ReportName::AllRepositories).await
    }

    pub async fn archived_repositories(&self) -> Result<Vec<Repository>, StoreError> {
        self.repositories_where(|r| r.is_archived).await
    }

    pub async fn private_repositories(&self) -> Result<Vec<Repository>, StoreError> {
        self.repositories_where(|r| r.is_private).await
    }

    /// Repositories that are neither archived, private nor templates.
    pub async fn public_repositories(&self) -> Result<Vec<Repository>, StoreError> {
        self.repositories_where(Repository::is_public).await
    }

    pub async fn template_repositories(&self) -> Result<Vec<Repository>, StoreError> {
        self.repositories_where(|r| r.is_template).await
    }

    /// `(archived, template)` repository counts.
    pub async fn archived_template_counts(&self) -> Result<(usize, usize), StoreError> {
        let repositories = self.all_repositories().await?;
        let archived = repositories.iter().filter(|r| r.is_archived).count();
        let template = repositories.iter().filter(|r| r.is_template).count();
        Ok((archived, template))
    }

    async fn repositories_where(
        &self,
        predicate: impl Fn(&Repository) -> bool,
    ) -> Result<Vec<Repository>, StoreError> {
        let repositories = self.all_repositories().await?;
        Ok(repositories.into_iter().filter(|r| predicate(r)).collect())
    }

    // -------------------------------------------------------------------------
    // Security
    // -------------------------------------------------------------------------

    pub async fn all_two_factor_disabled(&self) -> Result<Vec<String>, StoreError> {
        self.load(ReportName::AllTwoFactorDisabled).await
    }

    pub async fn is_two_factor_disabled(&self, login: &str) -> Result<bool, StoreError> {
        let logins = self.all_two_factor_disabled().await?;
        Ok(logins.iter().any(|l| l.eq_ignore_ascii_case(login)))
    }

    // -------------------------------------------------------------------------
    // Activity
    // -------------------------------------------------------------------------

    pub async fn all_users_contributions(&self) -> Result<Vec<User>, StoreError> {
        self.load(ReportName::AllUsersContributions).await
    }

    /// Contribution records for one login. A login can appear once per
    /// pass, so this may hold a member and a collaborator record.
    pub async fn user_contributions(&self, login: &str) -> Result<Vec<User>, StoreError> {
        let users = self.all_users_contributions().await?;
        Ok(users
            .into_iter()
            .filter(|u| u.login.eq_ignore_ascii_case(login))
            .collect())
    }

    pub async fn all_inactive_users(&self) -> Result<Vec<User>, StoreError> {
        self.load(ReportName::AllInactiveUsers).await
    }

    // -------------------------------------------------------------------------
    // Teams
    // -------------------------------------------------------------------------

    pub async fn all_teams(&self) -> Result<Vec<Team>, StoreError> {
        self.load(ReportName::AllTeams).await
    }

    pub async fn all_members_teams(&self) -> Result<MembersTeams, StoreError> {
        self.load(ReportName::AllMembersTeams).await
    }

    /// Teams of one login, matched case-insensitively; empty when the login
    /// is teamless.
    pub async fn teams_for(&self, login: &str) -> Result<Vec<Team>, StoreError> {
        let members_teams = self.all_members_teams().await?;
        Ok(members_teams
            .into_iter()
            .find(|(member, _)| member.eq_ignore_ascii_case(login))
            .map(|(_, teams)| teams)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::models::TeamPrivacy;
    use crate::store::MemoryStore;

    fn store() -> (Arc<MemoryStore>, ReportStore<Arc<MemoryStore>>) {
        let backend = Arc::new(MemoryStore::new());
        let reports = ReportStore::new(ChunkedStore::new(backend.clone()), "acme");
        (backend, reports)
    }

    fn repository(name: &str, archived: bool, private: bool, template: bool) -> Repository {
        Repository {
            name: name.to_string(),
            is_archived: archived,
            is_private: private,
            is_template: template,
            ..Repository::default()
        }
    }

    #[test]
    fn test_collection_name() {
        assert_eq!(collection_name("acme"), "github-explorer-acme");
    }

    #[tokio::test]
    async fn test_missing_reports_are_empty() {
        let (_, reports) = store();
        assert!(reports.all_members().await.unwrap().is_empty());
        assert!(reports.all_members_teams().await.unwrap().is_empty());
        assert!(reports.teams_for("octocat").await.unwrap().is_empty());
        assert!(!reports.is_owner("octocat").await.unwrap());
        assert_eq!(reports.archived_template_counts().await.unwrap(), (0, 0));
        assert!(reports.updated(ReportName::AllMembers).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_writes_into_organisation_collection() {
        let (backend, reports) = store();
        let data = ReportData::Logins(vec!["abe".to_string()]);

        let outcome = reports.save(ReportName::AllTwoFactorDisabled, &data).await.unwrap();
        assert_eq!(outcome.records, 1);
        assert_eq!(
            backend.read("github-explorer-acme", "all_two_factor_disabled").await.unwrap(),
            Some(json!(["abe"]))
        );
        assert!(reports.is_two_factor_disabled("ABE").await.unwrap());
        assert!(!reports.is_two_factor_disabled("zoe").await.unwrap());
        assert!(reports.updated(ReportName::AllTwoFactorDisabled).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_repository_filters() {
        let (_, reports) = store();
        let data = ReportData::Repositories(vec![
            repository("api", false, false, false),
            repository("old", true, false, false),
            repository("secret", false, true, false),
            repository("starter", false, false, true),
            repository("old-starter", true, false, true),
        ]);
        reports.save(ReportName::AllRepositories, &data).await.unwrap();

        let names = |repos: Vec<Repository>| repos.into_iter().map(|r| r.name).collect::<Vec<_>>();
        assert_eq!(names(reports.public_repositories().await.unwrap()), ["api"]);
        assert_eq!(names(reports.archived_repositories().await.unwrap()), ["old", "old-starter"]);
        assert_eq!(names(reports.private_repositories().await.unwrap()), ["secret"]);
        assert_eq!(names(reports.template_repositories().await.unwrap()), ["starter", "old-starter"]);
        assert_eq!(reports.archived_template_counts().await.unwrap(), (2, 2));
    }

    #[tokio::test]
    async fn test_chunked_report_reads_back() {
        let backend = Arc::new(MemoryStore::new());
        let writer = ReportStore::new(ChunkedStore::new(backend.clone()).with_chunk_size(2), "acme");
        let data = ReportData::Repositories(
            (0..5).map(|i| repository(&format!("r{i}"), false, false, false)).collect(),
        );
        let outcome = writer.save(ReportName::AllRepositories, &data).await.unwrap();
        assert_eq!(outcome.chunks, 3);

        let reader = ReportStore::new(ChunkedStore::new(backend), "acme");
        let read = reader.all_repositories().await.unwrap();
        assert_eq!(read.len(), 5);
        assert_eq!(read[4].name, "r4");
    }

    #[tokio::test]
    async fn test_members_and_owners() {
        let (_, reports) = store();
        let ann = User {
            organisations: Some(vec!["acme".to_string()]),
            ..User::new("ann", None)
        };
        let bob = User {
            organisations: Some(vec!["globex".to_string()]),
            ..User::new("bob", None)
        };
        reports
            .save(ReportName::AllMembers, &ReportData::Users(vec![ann.clone(), bob]))
            .await
            .unwrap();
        reports
            .save(ReportName::AllOwners, &ReportData::Users(vec![ann]))
            .await
            .unwrap();

        let org_members = reports.all_organisation_members().await.unwrap();
        assert_eq!(org_members.len(), 1);
        assert_eq!(org_members[0].login, "ann");
        assert!(reports.is_owner("Ann").await.unwrap());
        assert!(!reports.is_owner("bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_user_contributions_by_login() {
        let (_, reports) = store();
        let member = User {
            member: Some(true),
            commit_contributions: Some(4),
            ..User::new("ann", None)
        };
        let collaborator = User {
            member: Some(false),
            ..User::new("ann", None)
        };
        reports
            .save(
                ReportName::AllUsersContributions,
                &ReportData::Users(vec![member, collaborator, User::new("bob", None)]),
            )
            .await
            .unwrap();

        let records = reports.user_contributions("ann").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].total_contributions(), 4);
    }

    #[tokio::test]
    async fn test_teams_for() {
        let (_, reports) = store();
        let mut map = MembersTeams::new();
        map.insert(
            "ann".to_string(),
            vec![
                Team::summary("Web", Some(TeamPrivacy::Visible), "web"),
                Team::summary("Ops", Some(TeamPrivacy::Secret), "ops"),
            ],
        );
        reports
            .save(ReportName::AllMembersTeams, &ReportData::MembersTeams(map))
            .await
            .unwrap();

        let teams = reports.teams_for("ann").await.unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[1].slug, "ops");
        assert_eq!(reports.teams_for("ANN").await.unwrap().len(), 2);
        assert!(reports.teams_for("dan").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_decode_error() {
        let (backend, reports) = store();
        backend
            .write("github-explorer-acme", "all_teams", &json!({ "not": "a list" }))
            .await
            .unwrap();

        let err = reports.all_teams().await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }
}
