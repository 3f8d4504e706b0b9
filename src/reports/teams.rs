//
//  github-explorer
//  reports/teams.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Team listings, team detail and the members-to-teams map.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::nodes::{read_at, Connection, Count};
use super::{GitHubExplorer, MembersTeams};
use crate::api::common::ApiError;
use crate::api::queries::QueryName;
use crate::models::{sort_by_login, Team, TeamPrivacy, TeamRole, User};

// =============================================================================
// API Response Types
// =============================================================================

/// A team node. Nested `childTeams` and `ancestors` use the same shape with
/// fewer fields selected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTeam {
    slug: String,
    name: String,
    #[serde(default)]
    privacy: Option<TeamPrivacy>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    /// Only `totalCount` is read here; team detail pages members through
    /// the connection itself.
    #[serde(default)]
    members: Option<Count>,
    #[serde(default)]
    ancestors: Option<Connection<RawTeam>>,
    #[serde(default)]
    child_teams: Option<Connection<RawTeam>>,
}

impl RawTeam {
    fn into_team(self) -> Team {
        Team {
            slug: self.slug,
            name: self.name,
            privacy: self.privacy,
            description: self.description,
            avatar_url: self.avatar_url,
            url: self.url,
            created_at: self.created_at,
            updated_at: self.updated_at,
            member_count: self.members.map(|c| c.total_count),
            members: Vec::new(),
            ancestors: teams_of(self.ancestors),
            child_teams: teams_of(self.child_teams),
        }
    }
}

fn teams_of(connection: Option<Connection<RawTeam>>) -> Vec<Team> {
    connection
        .unwrap_or_default()
        .into_items()
        .map(RawTeam::into_team)
        .collect()
}

/// Header fields of the team detail query; members come from the paginated
/// connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTeamDetail {
    slug: String,
    name: String,
    #[serde(default)]
    privacy: Option<TeamPrivacy>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    ancestors: Option<Connection<RawTeam>>,
    #[serde(default)]
    child_teams: Option<Connection<RawTeam>>,
}

#[derive(Debug, Deserialize)]
struct TeamMemberEdge {
    #[serde(default)]
    role: Option<TeamRole>,
    #[serde(default)]
    node: Option<TeamMemberNode>,
}

#[derive(Debug, Deserialize)]
struct TeamMemberNode {
    login: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamName {
    slug: String,
    name: String,
    #[serde(default)]
    privacy: Option<TeamPrivacy>,
}

#[derive(Debug, Deserialize)]
struct LoginNode {
    login: String,
}

impl GitHubExplorer {
    /// Root teams of the organisation, each with up to two levels of child
    /// teams, ordered by name. `privacy` narrows the listing to secret or
    /// visible teams.
    pub async fn all_teams(&self, privacy: Option<TeamPrivacy>) -> Result<Vec<Team>, ApiError> {
        let teams: Vec<RawTeam> = self
            .paginator
            .paginate(
                QueryName::Teams,
                json!({
                    "login": self.organisation,
                    "privacy": privacy.map(TeamPrivacy::as_str),
                }),
            )
            .await?;

        Ok(teams.into_iter().map(RawTeam::into_team).collect())
    }

    /// Maps each login to the teams it belongs to.
    ///
    /// Team names are paginated first; then the complete membership of each
    /// team is paginated separately, since a team can have more members than
    /// fit on one embedded page. Logins in no team are absent from the map.
    pub async fn all_members_teams(&self) -> Result<MembersTeams, ApiError> {
        let teams: Vec<TeamName> = self
            .paginator
            .paginate(QueryName::TeamNames, json!({ "login": self.organisation }))
            .await?;

        let mut members_teams = MembersTeams::new();
        for (index, team) in teams.into_iter().enumerate() {
            if index > 0 {
                self.paginator.pace().await;
            }

            let logins: Vec<LoginNode> = self
                .paginator
                .paginate(
                    QueryName::TeamMembers,
                    json!({ "login": self.organisation, "slug": team.slug }),
                )
                .await?;

            tracing::debug!(team = %team.slug, members = logins.len(), "Team membership");

            let summary = Team::summary(team.name, team.privacy, team.slug);
            for node in logins {
                members_teams
                    .entry(node.login)
                    .or_default()
                    .push(summary.clone());
            }
        }

        Ok(members_teams)
    }

    /// One team with its immediate members sorted by login, its ancestors
    /// and its child teams. `None` when the organisation has no such team.
    pub async fn team(&self, slug: &str) -> Result<Option<Team>, ApiError> {
        let paginated = self
            .paginator
            .paginate_optional::<TeamMemberEdge>(
                QueryName::Team,
                json!({ "login": self.organisation, "slug": slug }),
            )
            .await?;

        let Some(paginated) = paginated else {
            return Ok(None);
        };

        let detail: RawTeamDetail = read_at(&paginated.first_page, &["organization", "team"])?
            .ok_or_else(|| ApiError::malformed("organization.team", "team missing from first page"))?;

        let mut members: Vec<User> = paginated
            .nodes
            .into_iter()
            .filter_map(|edge| {
                let role = edge.role;
                edge.node.map(|node| User {
                    email: node.email,
                    role,
                    ..User::new(node.login, node.name)
                })
            })
            .collect();
        sort_by_login(&mut members);

        Ok(Some(Team {
            slug: detail.slug,
            name: detail.name,
            privacy: detail.privacy,
            description: detail.description,
            avatar_url: detail.avatar_url,
            url: detail.url,
            created_at: detail.created_at,
            updated_at: detail.updated_at,
            member_count: Some(members.len() as u64),
            members,
            ancestors: teams_of(detail.ancestors),
            child_teams: teams_of(detail.child_teams),
        }))
    }
}
