//
//  github-explorer
//  models/repository.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository within an organisation.
///
/// The organisation-wide listing fills in flags, timestamps and counts; the
/// single-repository lookup adds protection rules, languages, topics and the
/// remaining detail fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Unique within the organisation.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub is_archived: bool,

    #[serde(default)]
    pub is_private: bool,

    #[serde(default)]
    pub is_template: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushed_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fork_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stargazer_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborator_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerability_alert_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,

    /// Languages with their size in bytes, largest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<Language>,

    /// Total number of protection rules, which may exceed the rules listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_protection_rule_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branch_protection_rules: Vec<BranchProtectionRule>,
}

impl Repository {
    /// Public: neither archived, private nor a template.
    pub fn is_public(&self) -> bool {
        !self.is_archived && !self.is_private && !self.is_template
    }

    /// Whether any branch protection rule exists.
    pub fn is_protected(&self) -> bool {
        self.branch_protection_rule_count.unwrap_or(0) > 0 || !self.branch_protection_rules.is_empty()
    }
}

/// A language used in a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Bytes of code in this language.
    pub size: u64,
}

/// A branch protection rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BranchProtectionRule {
    pub pattern: String,
    pub allows_deletions: bool,
    pub allows_force_pushes: bool,
    pub dismisses_stale_reviews: bool,
    pub is_admin_enforced: bool,
    pub required_approving_review_count: Option<u32>,
    pub requires_code_owner_reviews: bool,
    pub requires_commit_signatures: bool,
    pub requires_linear_history: bool,
    pub requires_status_checks: bool,
    pub requires_strict_status_checks: bool,
    pub restricts_pushes: bool,
    pub restricts_review_dismissals: bool,
}
