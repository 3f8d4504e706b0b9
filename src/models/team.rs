//
//  github-explorer
//  models/team.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// Visibility of a team within its organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamPrivacy {
    /// Visible only to team members and organisation owners.
    Secret,
    /// Visible to every organisation member.
    Visible,
}

impl TeamPrivacy {
    /// GraphQL enum value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Secret => "SECRET",
            Self::Visible => "VISIBLE",
        }
    }
}

/// A team within an organisation.
///
/// `ancestors` and `child_teams` are snapshots nested as deep as the query
/// that produced them asked for; they are values, not links, so a team
/// never refers back to itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Unique within the organisation.
    pub slug: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<TeamPrivacy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Number of immediate members, when the query counted them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u64>,

    /// Immediate members sorted by login.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<User>,

    /// Parent chain, root first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<Team>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_teams: Vec<Team>,
}

impl Team {
    /// The short `{name, privacy, slug}` form used in membership maps.
    pub fn summary(name: impl Into<String>, privacy: Option<TeamPrivacy>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            privacy,
            slug: slug.into(),
            ..Default::default()
        }
    }

    /// Whether the team has no parent, according to its ancestors.
    pub fn is_root(&self) -> bool {
        self.ancestors.is_empty()
    }

    /// Whether the team is secret.
    pub fn is_secret(&self) -> bool {
        self.privacy == Some(TeamPrivacy::Secret)
    }

    /// Number of teams nested below this one, at any depth.
    pub fn descendant_count(&self) -> usize {
        self.child_teams
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_serialization() {
        let team = Team::summary("Platform", Some(TeamPrivacy::Visible), "platform");
        assert_eq!(
            serde_json::to_value(&team).unwrap(),
            json!({ "slug": "platform", "name": "Platform", "privacy": "VISIBLE" })
        );
    }

    #[test]
    fn test_nested_teams_round_trip() {
        let json = json!({
            "slug": "eng",
            "name": "Engineering",
            "privacy": "SECRET",
            "childTeams": [
                { "slug": "web", "name": "Web", "childTeams": [{ "slug": "css", "name": "CSS" }] },
                { "slug": "api", "name": "API" }
            ]
        });
        let team: Team = serde_json::from_value(json).unwrap();
        assert!(team.is_secret());
        assert!(team.is_root());
        assert_eq!(team.descendant_count(), 3);
        assert_eq!(team.child_teams[0].child_teams[0].slug, "css");
    }
}
