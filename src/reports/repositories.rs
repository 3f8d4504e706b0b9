//
//  github-explorer
//  reports/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository listing, repository detail and repository access.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::nodes::{read_at, Connection, Count, Named, RawUser};
use super::GitHubExplorer;
use crate::api::common::{ApiError, NOT_FOUND_TYPE};
use crate::api::queries::QueryName;
use crate::models::{
    AccessEntry, AccessGrant, BranchProtectionRule, Language, Permission, PermissionSource,
    Repository,
};

// =============================================================================
// API Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRepository {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_archived: bool,
    #[serde(default)]
    is_private: bool,
    #[serde(default)]
    is_template: bool,
    #[serde(default)]
    is_empty: Option<bool>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    fork_count: Option<u64>,
    #[serde(default)]
    stargazer_count: Option<u64>,
    #[serde(default)]
    collaborators: Option<Count>,
    #[serde(default)]
    vulnerability_alerts: Option<Count>,
    #[serde(default)]
    primary_language: Option<Named>,
    #[serde(default)]
    default_branch_ref: Option<Named>,
    #[serde(default)]
    license_info: Option<Named>,
    #[serde(default)]
    repository_topics: Option<Connection<RawTopicNode>>,
    #[serde(default)]
    languages: Option<RawLanguages>,
    #[serde(default)]
    branch_protection_rules: Option<RawProtectionRules>,
}

#[derive(Debug, Deserialize)]
struct RawTopicNode {
    topic: Named,
}

#[derive(Debug, Deserialize)]
struct RawLanguages {
    #[serde(default)]
    edges: Vec<Option<RawLanguageEdge>>,
}

#[derive(Debug, Deserialize)]
struct RawLanguageEdge {
    size: u64,
    node: RawLanguage,
}

#[derive(Debug, Deserialize)]
struct RawLanguage {
    name: String,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProtectionRules {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    nodes: Option<Vec<Option<BranchProtectionRule>>>,
}

impl RawRepository {
    fn into_repository(self) -> Repository {
        let mut languages: Vec<Language> = self
            .languages
            .map(|l| l.edges)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .map(|edge| Language {
                name: edge.node.name,
                color: edge.node.color,
                size: edge.size,
            })
            .collect();
        languages.sort_by(|a, b| b.size.cmp(&a.size));

        let (rule_count, rules) = match self.branch_protection_rules {
            Some(rules) => (
                Some(rules.total_count),
                rules.nodes.unwrap_or_default().into_iter().flatten().collect(),
            ),
            None => (None, Vec::new()),
        };

        Repository {
            name: self.name,
            description: self.description,
            is_archived: self.is_archived,
            is_private: self.is_private,
            is_template: self.is_template,
            is_empty: self.is_empty,
            url: self.url,
            created_at: self.created_at,
            updated_at: self.updated_at,
            pushed_at: self.pushed_at,
            fork_count: self.fork_count,
            stargazer_count: self.stargazer_count,
            collaborator_count: self.collaborators.map(|c| c.total_count),
            vulnerability_alert_count: self.vulnerability_alerts.map(|c| c.total_count),
            primary_language: self.primary_language.and_then(|l| l.name),
            default_branch: self.default_branch_ref.and_then(|b| b.name),
            license: self.license_info.and_then(|l| l.name),
            topics: self
                .repository_topics
                .unwrap_or_default()
                .into_items()
                .filter_map(|node| node.topic.name)
                .collect(),
            languages,
            branch_protection_rule_count: rule_count,
            branch_protection_rules: rules,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollaboratorEdge {
    #[serde(default)]
    node: Option<RawUser>,
    #[serde(default)]
    permission_sources: Vec<RawPermissionSource>,
}

#[derive(Debug, Deserialize)]
struct RawPermissionSource {
    permission: Permission,
    source: RawSource,
}

/// The `source` union, discriminated by `__typename`. Field aliases in the
/// query keep the three `name` fields apart.
#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
enum RawSource {
    Organization {
        #[serde(default, rename = "organisationName")]
        name: Option<String>,
    },
    Repository {
        #[serde(default, rename = "repositoryName")]
        name: Option<String>,
    },
    Team {
        slug: String,
        #[serde(rename = "teamName")]
        name: String,
        #[serde(default, rename = "parentTeam")]
        parent: Option<Named>,
    },
}

impl From<RawPermissionSource> for AccessGrant {
    fn from(raw: RawPermissionSource) -> Self {
        let source = match raw.source {
            RawSource::Organization { name } => PermissionSource::Organization { name },
            RawSource::Repository { name } => PermissionSource::Repository { name },
            RawSource::Team { slug, name, parent } => PermissionSource::Team {
                slug,
                name,
                // A parent without a readable name still marks a child team.
                parent: parent.map(|p| p.name.unwrap_or_default()),
            },
        };
        AccessGrant {
            permission: raw.permission,
            source,
        }
    }
}

impl GitHubExplorer {
    /// Every repository of the organisation, ordered by name.
    pub async fn all_repositories(&self) -> Result<Vec<Repository>, ApiError> {
        let repositories: Vec<RawRepository> = self
            .paginator
            .paginate(QueryName::Repositories, json!({ "login": self.organisation }))
            .await?;

        Ok(repositories
            .into_iter()
            .map(RawRepository::into_repository)
            .collect())
    }

    /// One repository with full detail.
    ///
    /// A repository that does not exist is `Ok(None)`, whether GitHub
    /// reports it as a null node or as a `NOT_FOUND` error. Every other
    /// failure is returned as an error.
    pub async fn repository(&self, name: &str) -> Result<Option<Repository>, ApiError> {
        let result = self
            .paginator
            .execute(
                QueryName::Repository,
                json!({ "login": self.organisation, "name": name }),
            )
            .await;

        let data = match result {
            Ok(data) => data,
            Err(ApiError::GraphQl(ref normalized))
                if normalized.error_type.as_deref() == Some(NOT_FOUND_TYPE) =>
            {
                tracing::debug!(repository = %name, "Repository not found");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let raw: Option<RawRepository> = read_at(&data, &["organization", "repository"])?;
        Ok(raw.map(RawRepository::into_repository))
    }

    /// Who can access a repository and through which grants, sorted by
    /// login. Grants inherited through child teams are left out, and a
    /// collaborator left without grants is dropped. `None` when the
    /// repository does not exist.
    pub async fn repository_access(&self, name: &str) -> Result<Option<Vec<AccessEntry>>, ApiError> {
        let paginated = self
            .paginator
            .paginate_optional::<CollaboratorEdge>(
                QueryName::RepositoryAccess,
                json!({ "login": self.organisation, "name": name }),
            )
            .await?;

        let Some(paginated) = paginated else {
            return Ok(None);
        };

        let organisation_name: Option<String> =
            read_at(&paginated.first_page, &["organization", "name"])?;

        let mut entries: Vec<AccessEntry> = paginated
            .nodes
            .into_iter()
            .filter_map(|edge| {
                let user = edge.node?;
                let member = organisation_name
                    .as_deref()
                    .map(|org| user.in_organisation_named(org))
                    .unwrap_or(false);
                AccessEntry::new(
                    user.login,
                    user.name,
                    member,
                    name,
                    edge.permission_sources.into_iter().map(AccessGrant::from),
                )
            })
            .collect();
        entries.sort_by(|a, b| a.login.cmp(&b.login));

        Ok(Some(entries))
    }
}
