//
//  github-explorer
//  models/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's role within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamRole {
    Maintainer,
    Member,
}

/// A GitHub user: an enterprise member or an outside collaborator.
///
/// Only `login` is always present. The remaining fields are filled in by
/// whichever report produced the record:
///
/// | Report | Fields |
/// |--------|--------|
/// | members | profile, `domainEmails`, `organisations` |
/// | contributions | profile, counters, `member` |
/// | inactive users | profile, `member` |
/// | owners | `login`, `name` |
/// | team detail | `login`, `name`, `email`, `role` |
///
/// # Example
///
/// ```rust
/// use github_explorer::models::User;
///
/// let user = User::new("octocat", Some("The Octocat".to_string()));
/// let json = serde_json::to_value(&user).unwrap();
/// assert_eq!(json, serde_json::json!({ "login": "octocat", "name": "The Octocat" }));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, stable login.
    pub login: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Public email; GitHub returns an empty string when it is hidden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Emails on the organisation's verified domains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_emails: Option<Vec<String>>,

    /// `true` for enterprise/organisation members, `false` for outside
    /// collaborators, absent when the report does not distinguish them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<bool>,

    /// Lowercased logins of the organisations the user belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisations: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_contributions: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restricted_contributions: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_contributions: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_contributions: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request_contributions: Option<u64>,

    /// Role within a team, for team membership listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<TeamRole>,
}

impl User {
    /// Creates a user with only a login and name.
    pub fn new(login: impl Into<String>, name: Option<String>) -> Self {
        Self {
            login: login.into(),
            name,
            ..Default::default()
        }
    }

    /// Whether the user is known to be a member.
    pub fn is_member(&self) -> bool {
        self.member.unwrap_or(false)
    }

    /// Whether the user belongs to the given organisation (case-insensitive).
    pub fn belongs_to(&self, organisation: &str) -> bool {
        self.organisations
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|o| o.eq_ignore_ascii_case(organisation))
    }

    /// Sum of commit, issue and pull request contributions.
    pub fn total_contributions(&self) -> u64 {
        self.commit_contributions.unwrap_or(0)
            + self.issue_contributions.unwrap_or(0)
            + self.pull_request_contributions.unwrap_or(0)
    }
}

/// Sorts users by login, keeping the relative order of equal logins.
pub fn sort_by_login(users: &mut [User]) {
    users.sort_by(|a, b| a.login.cmp(&b.login));
}

/// Merges a members pass and an outside-collaborators pass into one
/// collection sorted by login.
///
/// Both passes are kept whole: a login present in both appears twice,
/// member record first.
pub fn merge_by_login(members: Vec<User>, collaborators: Vec<User>) -> Vec<User> {
    let mut merged = members;
    merged.extend(collaborators);
    sort_by_login(&mut merged);
    merged
}
