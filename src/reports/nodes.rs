//
//  github-explorer
//  reports/nodes.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Raw response shapes shared by several queries.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::api::common::ApiError;
use crate::models::User;

// =============================================================================
// API Response Types
// =============================================================================

/// A nested connection read through its `nodes` list.
#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

impl<T> Connection<T> {
    pub fn into_items(self) -> impl Iterator<Item = T> {
        self.nodes.into_iter().flatten()
    }
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// A connection queried only for its size.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Count {
    #[serde(default)]
    pub total_count: u64,
}

/// `{ name }` objects: languages, licenses, organisations, parent teams.
#[derive(Debug, Deserialize)]
pub(crate) struct Named {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawOrganization {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub resource_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawContributions {
    #[serde(default)]
    pub has_any_contributions: bool,
    #[serde(default)]
    pub restricted_contributions_count: Option<u64>,
    #[serde(default)]
    pub total_commit_contributions: Option<u64>,
    #[serde(default)]
    pub total_issue_contributions: Option<u64>,
    #[serde(default)]
    pub total_pull_request_contributions: Option<u64>,
}

/// A user as returned by member, collaborator and two-factor queries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub organization_verified_domain_emails: Option<Vec<String>>,
    #[serde(default)]
    pub organizations: Option<Connection<RawOrganization>>,
    #[serde(default)]
    pub contributions_collection: Option<RawContributions>,
}

impl RawUser {
    /// Profile fields only: login, name, avatar, timestamps and email.
    pub fn profile(&self) -> User {
        User {
            avatar_url: self.avatar_url.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            email: self.email.clone(),
            ..User::new(self.login.clone(), self.name.clone())
        }
    }

    /// Whether the user has contributed within the queried window.
    ///
    /// Only valid for queries that select `contributionsCollection`; a user
    /// without one is a malformed response.
    pub fn has_contributions(&self) -> Result<bool, ApiError> {
        self.contributions().map(|c| c.has_any_contributions)
    }

    fn contributions(&self) -> Result<&RawContributions, ApiError> {
        self.contributions_collection.as_ref().ok_or_else(|| {
            ApiError::malformed(
                "contributionsCollection",
                format!("missing for user '{}'", self.login),
            )
        })
    }

    /// Organisation logins taken from each `resourcePath` (`/acme` -> `acme`).
    pub fn organisation_logins(&self) -> Vec<String> {
        self.organization_nodes()
            .filter_map(|org| org.resource_path.as_deref())
            .map(|path| path.trim_start_matches('/').to_lowercase())
            .collect()
    }

    /// Whether one of the user's organisations has the given display name.
    pub fn in_organisation_named(&self, name: &str) -> bool {
        self.organization_nodes()
            .any(|org| org.name.as_deref() == Some(name))
    }

    fn organization_nodes(&self) -> impl Iterator<Item = &RawOrganization> {
        self.organizations
            .iter()
            .flat_map(|c| c.nodes.iter())
            .flatten()
    }

    /// Profile plus contribution counters.
    pub fn with_contributions(&self) -> Result<User, ApiError> {
        let contributions = self.contributions()?;
        Ok(User {
            has_contributions: Some(contributions.has_any_contributions),
            restricted_contributions: contributions.restricted_contributions_count,
            commit_contributions: contributions.total_commit_contributions,
            issue_contributions: contributions.total_issue_contributions,
            pull_request_contributions: contributions.total_pull_request_contributions,
            ..self.profile()
        })
    }
}

/// An enterprise member node. Only `EnterpriseUserAccount` nodes with a
/// linked user carry data; other node types deserialize to `None`.
#[derive(Debug, Deserialize)]
pub(crate) struct MemberNode {
    #[serde(default)]
    pub user: Option<RawUser>,
}

/// An edge whose only payload is its node.
#[derive(Debug, Deserialize)]
pub(crate) struct Edge<T> {
    pub node: Option<T>,
}

/// Reads a typed value at `path` inside a response `data` object.
///
/// A missing or null value yields `None`; a value of the wrong shape is a
/// malformed response.
pub(crate) fn read_at<T: serde::de::DeserializeOwned>(
    data: &Value,
    path: &[&str],
) -> Result<Option<T>, ApiError> {
    let mut current = data;
    for key in path {
        match current.get(*key) {
            Some(Value::Null) | None => return Ok(None),
            Some(next) => current = next,
        }
    }
    T::deserialize(current)
        .map(Some)
        .map_err(|e| ApiError::malformed(path.join("."), e))
}
