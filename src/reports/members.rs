//
//  github-explorer
//  reports/members.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Member, owner, contribution and inactivity reports.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::nodes::{read_at, Edge, MemberNode, RawUser};
use super::GitHubExplorer;
use crate::api::common::ApiError;
use crate::api::queries::QueryName;
use crate::models::{merge_by_login, sort_by_login, User};
use crate::util::{format_timestamp, inactive_cutoff, INACTIVE_MONTHS};

// =============================================================================
// API Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct RoleEdge {
    #[serde(default)]
    node: Option<RoleNode>,
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RoleNode {
    login: String,
    #[serde(default)]
    name: Option<String>,
}

/// Organisation role of an owner in `membersWithRole`.
const OWNER_ROLE: &str = "ADMIN";

impl GitHubExplorer {
    /// Every enterprise member, with verified domain emails and the
    /// organisations they belong to.
    pub async fn all_members(&self) -> Result<Vec<User>, ApiError> {
        let nodes: Vec<MemberNode> = self
            .paginator
            .paginate(
                QueryName::Members,
                json!({ "login": self.organisation, "slug": self.enterprise }),
            )
            .await?;

        Ok(nodes
            .into_iter()
            .filter_map(|node| node.user)
            .map(|raw| User {
                domain_emails: raw.organization_verified_domain_emails.clone(),
                organisations: Some(raw.organisation_logins()),
                ..raw.profile()
            })
            .collect())
    }

    /// Organisation members whose role is `ADMIN`, sorted by login.
    pub async fn all_owners(&self) -> Result<Vec<User>, ApiError> {
        let edges: Vec<RoleEdge> = self
            .paginator
            .paginate(QueryName::MembersWithRole, json!({ "login": self.organisation }))
            .await?;

        let mut owners: Vec<User> = edges
            .into_iter()
            .filter(|edge| edge.role.as_deref() == Some(OWNER_ROLE))
            .filter_map(|edge| edge.node)
            .map(|node| User::new(node.login, node.name))
            .collect();
        sort_by_login(&mut owners);
        Ok(owners)
    }

    /// Contribution counters for members and outside collaborators, merged
    /// and sorted by login.
    pub async fn all_users_contributions(&self) -> Result<Vec<User>, ApiError> {
        let variables = json!({ "slug": self.enterprise });

        let members: Vec<MemberNode> = self
            .paginator
            .paginate(QueryName::MembersContributions, variables.clone())
            .await?;
        let members = members
            .into_iter()
            .filter_map(|node| node.user)
            .map(|raw| {
                Ok::<_, ApiError>(User {
                    member: Some(true),
                    ..raw.with_contributions()?
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let collaborators: Vec<RawUser> = self
            .paginator
            .paginate(QueryName::OutsideCollaboratorsContributions, variables)
            .await?;
        let collaborators = collaborators
            .into_iter()
            .map(|raw| {
                Ok::<_, ApiError>(User {
                    member: Some(false),
                    ..raw.with_contributions()?
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(merge_by_login(members, collaborators))
    }

    /// Members and outside collaborators without any contribution in the
    /// last six months, sorted by login.
    pub async fn all_inactive_users(&self) -> Result<Vec<User>, ApiError> {
        self.all_inactive_users_since(inactive_cutoff(Utc::now(), INACTIVE_MONTHS))
            .await
    }

    /// Members and outside collaborators without any contribution since
    /// `cutoff`, sorted by login.
    ///
    /// Each pass applies the filter on its own before the two are merged.
    pub async fn all_inactive_users_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<User>, ApiError> {
        let from = format_timestamp(cutoff);
        tracing::debug!(from = %from, "Inactivity cutoff");

        let members: Vec<MemberNode> = self
            .paginator
            .paginate(
                QueryName::InactiveMembers,
                json!({ "login": self.organisation, "slug": self.enterprise, "from": from }),
            )
            .await?;
        let mut inactive_members = Vec::new();
        for raw in members.into_iter().filter_map(|node| node.user) {
            if !raw.has_contributions()? {
                inactive_members.push(User {
                    domain_emails: raw.organization_verified_domain_emails.clone(),
                    member: Some(true),
                    ..raw.profile()
                });
            }
        }

        let collaborators: Vec<RawUser> = self
            .paginator
            .paginate(
                QueryName::InactiveOutsideCollaborators,
                json!({ "slug": self.enterprise, "from": from }),
            )
            .await?;
        let mut inactive_collaborators = Vec::new();
        for raw in collaborators {
            if !raw.has_contributions()? {
                inactive_collaborators.push(User {
                    member: Some(false),
                    ..raw.profile()
                });
            }
        }

        Ok(merge_by_login(inactive_members, inactive_collaborators))
    }

    /// Members that belong to no team of the organisation.
    pub async fn teamless_members(&self) -> Result<Vec<User>, ApiError> {
        let members = self.all_members().await?;
        let members_teams = self.all_members_teams().await?;

        Ok(members
            .into_iter()
            .filter(|member| !members_teams.contains_key(&member.login))
            .map(|member| User {
                organisations: None,
                ..member
            })
            .collect())
    }

    /// Every outside collaborator of the enterprise, in response order.
    pub async fn all_outside_collaborators(&self) -> Result<Vec<User>, ApiError> {
        let edges: Vec<Edge<RawUser>> = self
            .paginator
            .paginate(QueryName::OutsideCollaborators, json!({ "slug": self.enterprise }))
            .await?;

        Ok(edges
            .into_iter()
            .filter_map(|edge| edge.node)
            .map(|raw| User {
                member: Some(false),
                ..raw.profile()
            })
            .collect())
    }

    /// Looks up one enterprise member by login.
    ///
    /// The upstream search is fuzzy; only an exact (case-insensitive) login
    /// match counts.
    pub async fn member(&self, login: &str) -> Result<Option<User>, ApiError> {
        let data = self
            .paginator
            .execute(
                QueryName::Member,
                json!({ "slug": self.enterprise, "login": self.organisation, "userLogin": login }),
            )
            .await?;

        let nodes: Vec<Option<MemberNode>> =
            read_at(&data, &["enterprise", "members", "nodes"])?.unwrap_or_default();

        nodes
            .into_iter()
            .flatten()
            .filter_map(|node| node.user)
            .find(|raw| raw.login.eq_ignore_ascii_case(login))
            .map(|raw| {
                Ok::<_, ApiError>(User {
                    domain_emails: raw.organization_verified_domain_emails.clone(),
                    organisations: Some(raw.organisation_logins()),
                    has_contributions: Some(raw.has_contributions()?),
                    member: Some(true),
                    ..raw.profile()
                })
            })
            .transpose()
    }

    /// Looks up one outside collaborator by login.
    pub async fn outside_collaborator(&self, login: &str) -> Result<Option<User>, ApiError> {
        let data = self
            .paginator
            .execute(
                QueryName::OutsideCollaborator,
                json!({ "slug": self.enterprise, "login": login }),
            )
            .await?;

        let edges: Vec<Option<Edge<RawUser>>> = read_at(
            &data,
            &["enterprise", "ownerInfo", "outsideCollaborators", "edges"],
        )?
        .unwrap_or_default();

        edges
            .into_iter()
            .flatten()
            .filter_map(|edge| edge.node)
            .find(|raw| raw.login.eq_ignore_ascii_case(login))
            .map(|raw| {
                Ok::<_, ApiError>(User {
                    has_contributions: Some(raw.has_contributions()?),
                    member: Some(false),
                    ..raw.profile()
                })
            })
            .transpose()
    }
}
