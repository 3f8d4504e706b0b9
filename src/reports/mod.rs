//
//  github-explorer
//  reports/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Reports
//!
//! A report runs one or more catalog queries through the
//! [`Paginator`](crate::api::common::Paginator) and assembles the raw nodes
//! into domain records.
//!
//! ## Persisted reports
//!
//! | Report | Result | Queries |
//! |--------|--------|---------|
//! | `all_members` | users with organisations | members |
//! | `all_teams` | root teams with child teams | teams |
//! | `all_repositories` | repositories | repositories |
//! | `all_owners` | users with role `ADMIN` | members with role |
//! | `all_two_factor_disabled` | sorted logins | two-factor disabled |
//! | `all_users_contributions` | members + collaborators with counters | two passes |
//! | `all_inactive_users` | members + collaborators without contributions | two passes |
//! | `all_members_teams` | login to teams map | team names, then members per team |
//! | `teamless_members` | members absent from the map | members + members teams |
//!
//! Every report either completes, with every page of every pass fetched, or
//! fails with the first error; nothing partial is returned.
//!
//! ## Live lookups
//!
//! [`GitHubExplorer`] also answers single-entity questions for the reporting
//! side: [`member`](GitHubExplorer::member),
//! [`outside_collaborator`](GitHubExplorer::outside_collaborator),
//! [`repository`](GitHubExplorer::repository),
//! [`repository_access`](GitHubExplorer::repository_access),
//! [`team`](GitHubExplorer::team) and
//! [`two_factor_disabled_users`](GitHubExplorer::two_factor_disabled_users).
//! "Not found" is `Ok(None)` rather than an error.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::api::common::{ApiError, Paginator};
use crate::models::{Repository, Team, User};

mod members;
mod nodes;
mod repositories;
mod teams;
mod two_factor;

/// Login to the teams the user belongs to.
pub type MembersTeams = BTreeMap<String, Vec<Team>>;

/// The reports the agent can run and persist.
///
/// Each name is also the document name the result is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportName {
    AllMembers,
    AllTeams,
    AllRepositories,
    AllOwners,
    AllTwoFactorDisabled,
    AllUsersContributions,
    AllInactiveUsers,
    AllMembersTeams,
    TeamlessMembers,
}

impl ReportName {
    /// Every report, in the order they are listed to users.
    pub const ALL: [ReportName; 9] = [
        ReportName::AllMembers,
        ReportName::AllTeams,
        ReportName::AllRepositories,
        ReportName::AllOwners,
        ReportName::AllTwoFactorDisabled,
        ReportName::AllUsersContributions,
        ReportName::AllInactiveUsers,
        ReportName::AllMembersTeams,
        ReportName::TeamlessMembers,
    ];

    /// The report's document name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllMembers => "all_members",
            Self::AllTeams => "all_teams",
            Self::AllRepositories => "all_repositories",
            Self::AllOwners => "all_owners",
            Self::AllTwoFactorDisabled => "all_two_factor_disabled",
            Self::AllUsersContributions => "all_users_contributions",
            Self::AllInactiveUsers => "all_inactive_users",
            Self::AllMembersTeams => "all_members_teams",
            Self::TeamlessMembers => "teamless_members",
        }
    }

    /// Comma-separated list of every report name.
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ReportName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A report name that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown report '{name}'. Available reports: {available}")]
pub struct UnknownReportError {
    pub name: String,
    pub available: String,
}

impl FromStr for ReportName {
    type Err = UnknownReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| UnknownReportError {
                name: s.to_string(),
                available: Self::available(),
            })
    }
}

/// The assembled result of one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportData {
    Users(Vec<User>),
    Teams(Vec<Team>),
    Repositories(Vec<Repository>),
    Logins(Vec<String>),
    MembersTeams(MembersTeams),
}

impl ReportData {
    /// Number of top-level records (entries, for the members-teams map).
    pub fn len(&self) -> usize {
        match self {
            Self::Users(v) => v.len(),
            Self::Teams(v) => v.len(),
            Self::Repositories(v) => v.len(),
            Self::Logins(v) => v.len(),
            Self::MembersTeams(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The JSON document persisted for this result.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Runs reports and lookups for one organisation of an enterprise.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use github_explorer::api::{GraphQlClient, Paginator, QueryCatalog};
/// use github_explorer::reports::{GitHubExplorer, ReportName};
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = GraphQlClient::new("https://api.github.com", "token")?;
/// let paginator = Paginator::new(Arc::new(client), Arc::new(QueryCatalog::new()));
/// let explorer = GitHubExplorer::new(paginator, "acme-enterprise", "acme");
///
/// let owners = explorer.run(ReportName::AllOwners).await?;
/// println!("{} owners", owners.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubExplorer {
    paginator: Paginator,
    enterprise: String,
    organisation: String,
}

impl GitHubExplorer {
    pub fn new(
        paginator: Paginator,
        enterprise: impl Into<String>,
        organisation: impl Into<String>,
    ) -> Self {
        Self {
            paginator,
            enterprise: enterprise.into(),
            organisation: organisation.into(),
        }
    }

    /// The enterprise slug.
    pub fn enterprise(&self) -> &str {
        &self.enterprise
    }

    /// The organisation login.
    pub fn organisation(&self) -> &str {
        &self.organisation
    }

    /// Runs a persisted report.
    pub async fn run(&self, report: ReportName) -> Result<ReportData, ApiError> {
        tracing::info!(
            report = %report,
            organisation = %self.organisation,
            "Running report"
        );

        let data = match report {
            ReportName::AllMembers => ReportData::Users(self.all_members().await?),
            ReportName::AllTeams => ReportData::Teams(self.all_teams(None).await?),
            ReportName::AllRepositories => ReportData::Repositories(self.all_repositories().await?),
            ReportName::AllOwners => ReportData::Users(self.all_owners().await?),
            ReportName::AllTwoFactorDisabled => ReportData::Logins(self.all_two_factor_disabled().await?),
            ReportName::AllUsersContributions => {
                ReportData::Users(self.all_users_contributions().await?)
            }
            ReportName::AllInactiveUsers => ReportData::Users(self.all_inactive_users().await?),
            ReportName::AllMembersTeams => ReportData::MembersTeams(self.all_members_teams().await?),
            ReportName::TeamlessMembers => ReportData::Users(self.teamless_members().await?),
        };

        tracing::info!(
            report = %report,
            organisation = %self.organisation,
            records = data.len(),
            "Report assembled"
        );
        Ok(data)
    }
}
