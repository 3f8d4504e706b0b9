//
//  github-explorer
//  models/access.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository access entries.
//!
//! GitHub reports every way a collaborator holds access to a repository as a
//! *permission source*: organisation base permission, a direct repository
//! grant, or membership of a team. An [`AccessEntry`] keeps the sources that
//! matter for review. Grants inherited through a child team are dropped;
//! the same access is visible through the root team it descends from.

use serde::{Deserialize, Serialize};

/// Repository permission levels, ordered from least to most privileged.
///
/// `None` only appears as an organisation base permission that grants
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Permission {
    None,
    Read,
    Triage,
    Write,
    Maintain,
    Admin,
}

/// Where a grant comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PermissionSource {
    /// The organisation's base permission.
    Organization {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// A direct grant on the repository.
    Repository {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Membership of a team; `parent` is set for child teams.
    Team {
        slug: String,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent: Option<String>,
    },
}

impl PermissionSource {
    /// Whether the source is a team with a parent team.
    pub fn is_child_team(&self) -> bool {
        matches!(self, Self::Team { parent: Some(_), .. })
    }
}

/// One permission held through one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub permission: Permission,
    pub source: PermissionSource,
}

/// A collaborator's access to one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessEntry {
    pub login: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the collaborator is a member of the repository's organisation.
    pub member: bool,

    pub repository: String,

    /// Organisation, direct and root-team grants.
    pub grants: Vec<AccessGrant>,
}

impl AccessEntry {
    /// Builds an entry, discarding grants inherited through child teams and
    /// grants of [`Permission::None`].
    ///
    /// Returns `None` when no grant remains.
    pub fn new(
        login: impl Into<String>,
        name: Option<String>,
        member: bool,
        repository: impl Into<String>,
        grants: impl IntoIterator<Item = AccessGrant>,
    ) -> Option<Self> {
        let grants: Vec<AccessGrant> = grants
            .into_iter()
            .filter(|grant| grant.permission != Permission::None && !grant.source.is_child_team())
            .collect();

        if grants.is_empty() {
            return None;
        }

        Some(Self {
            login: login.into(),
            name,
            member,
            repository: repository.into(),
            grants,
        })
    }

    /// Permission granted by the organisation's base permission.
    pub fn organisation_permission(&self) -> Option<Permission> {
        self.grants
            .iter()
            .find(|g| matches!(g.source, PermissionSource::Organization { .. }))
            .map(|g| g.permission)
    }

    /// Permission granted directly on the repository.
    pub fn repository_permission(&self) -> Option<Permission> {
        self.grants
            .iter()
            .find(|g| matches!(g.source, PermissionSource::Repository { .. }))
            .map(|g| g.permission)
    }

    /// Team grants as `(slug, name, permission)`.
    pub fn team_grants(&self) -> impl Iterator<Item = (&str, &str, Permission)> + '_ {
        self.grants.iter().filter_map(|g| match &g.source {
            PermissionSource::Team { slug, name, .. } => Some((slug.as_str(), name.as_str(), g.permission)),
            _ => None,
        })
    }

    /// The most privileged permission across all grants.
    pub fn highest_permission(&self) -> Option<Permission> {
        self.grants.iter().map(|g| g.permission).max()
    }
}

/// Keeps only entries for collaborators outside the organisation.
pub fn outside_collaborators_only(entries: Vec<AccessEntry>) -> Vec<AccessEntry> {
    entries.into_iter().filter(|e| !e.member).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn team(slug: &str, parent: Option<&str>, permission: Permission) -> AccessGrant {
        AccessGrant {
            permission,
            source: PermissionSource::Team {
                slug: slug.to_string(),
                name: slug.to_uppercase(),
                parent: parent.map(str::to_string),
            },
        }
    }

    #[test]
    fn test_child_team_grants_are_excluded() {
        let entry = AccessEntry::new(
            "octocat",
            None,
            true,
            "api",
            vec![
                AccessGrant {
                    permission: Permission::Read,
                    source: PermissionSource::Organization { name: None },
                },
                team("platform", None, Permission::Write),
                team("platform-oncall", Some("Platform"), Permission::Admin),
            ],
        )
        .unwrap();

        assert_eq!(entry.grants.len(), 2);
        assert_eq!(entry.organisation_permission(), Some(Permission::Read));
        assert_eq!(entry.repository_permission(), None);
        let teams: Vec<_> = entry.team_grants().collect();
        assert_eq!(teams, vec![("platform", "PLATFORM", Permission::Write)]);
        assert_eq!(entry.highest_permission(), Some(Permission::Write));
    }

    #[test]
    fn test_entry_with_only_child_team_grants_is_dropped() {
        let entry = AccessEntry::new(
            "octocat",
            None,
            true,
            "api",
            vec![team("oncall", Some("Platform"), Permission::Admin)],
        );
        assert!(entry.is_none());
    }

    #[test]
    fn test_none_permission_is_not_a_grant() {
        let base = || AccessGrant {
            permission: Permission::None,
            source: PermissionSource::Organization { name: None },
        };

        assert!(AccessEntry::new("octocat", None, true, "api", vec![base()]).is_none());

        let entry = AccessEntry::new(
            "octocat",
            None,
            true,
            "api",
            vec![base(), team("platform", None, Permission::Read)],
        )
        .unwrap();
        assert_eq!(entry.organisation_permission(), None);
        assert_eq!(entry.highest_permission(), Some(Permission::Read));
        assert!(Permission::None < Permission::Read);
    }

    #[test]
    fn test_permission_source_serialization() {
        let grant = AccessGrant {
            permission: Permission::Maintain,
            source: PermissionSource::Repository {
                name: Some("api".to_string()),
            },
        };
        assert_eq!(
            serde_json::to_value(&grant).unwrap(),
            json!({ "permission": "MAINTAIN", "source": { "kind": "repository", "name": "api" } })
        );
    }

    #[test]
    fn test_outside_collaborators_only() {
        let grant = || AccessGrant {
            permission: Permission::Read,
            source: PermissionSource::Repository { name: None },
        };
        let entries = vec![
            AccessEntry::new("member", None, true, "api", vec![grant()]).unwrap(),
            AccessEntry::new("guest", None, false, "api", vec![grant()]).unwrap(),
        ];
        let outside = outside_collaborators_only(entries);
        assert_eq!(outside.len(), 1);
        assert_eq!(outside[0].login, "guest");
    }
}
