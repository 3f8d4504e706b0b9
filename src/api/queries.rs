//
//  github-explorer
//  api/queries.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The fixed catalog of GraphQL queries.
//!
//! Every query the explorer issues is registered here under a [`QueryName`].
//! A [`QueryTemplate`] carries the query document, the variables a caller
//! must supply, and for paginated queries where the connection lives in the
//! response and which list (`nodes` or `edges`) holds its items.
//!
//! The catalog is built once at startup and handed to the
//! [`Paginator`](crate::api::common::Paginator); nothing here is global
//! mutable state.
//!
//! # Page sizes
//!
//! | Weight | Default | Used for |
//! |--------|---------|----------|
//! | Light | 100 | flat lists (logins, repositories, teams) |
//! | Heavy | 10 | per-node contribution lookups |
//!
//! Heavy queries ask GitHub to compute a contributions collection for every
//! node, which is costly against the GraphQL rate-limit budget; smaller pages
//! keep each request well inside it.

use serde_json::{Map, Value};

use super::common::ApiError;

/// Default page size for light queries.
pub const LIGHT_PAGE_SIZE: u32 = 100;

/// Default page size for queries that compute contributions per node.
pub const HEAVY_PAGE_SIZE: u32 = 10;

const MEMBERS_QUERY: &str = r#"
query ($login: String!, $slug: String!, $first: Int!, $after: String) {
  enterprise(slug: $slug) {
    members(first: $first, after: $after) {
      pageInfo {
        endCursor
        hasNextPage
      }
      nodes {
        ... on EnterpriseUserAccount {
          user {
            avatarUrl
            createdAt
            email
            login
            name
            organizationVerifiedDomainEmails(login: $login)
            updatedAt
            organizations(first: 10) {
              nodes {
                resourcePath
              }
            }
          }
        }
      }
    }
  }
}
"#;

const INACTIVE_MEMBERS_QUERY: &str = r#"
query ($login: String!, $slug: String!, $first: Int!, $from: DateTime!, $after: String) {
  enterprise(slug: $slug) {
    members(first: $first, after: $after) {
      pageInfo {
        endCursor
        hasNextPage
      }
      nodes {
        ... on EnterpriseUserAccount {
          user {
            avatarUrl
            createdAt
            email
            login
            name
            organizationVerifiedDomainEmails(login: $login)
            updatedAt
            contributionsCollection(from: $from) {
              hasAnyContributions
            }
          }
        }
      }
    }
  }
}
"#;

const INACTIVE_OUTSIDE_COLLABORATORS_QUERY: &str = r#"
query ($slug: String!, $first: Int!, $from: DateTime!, $after: String) {
  enterprise(slug: $slug) {
    ownerInfo {
      outsideCollaborators(first: $first, after: $after) {
        pageInfo {
          endCursor
          hasNextPage
        }
        nodes {
          avatarUrl
          createdAt
          email
          login
          name
          updatedAt
          contributionsCollection(from: $from) {
            hasAnyContributions
          }
        }
      }
    }
  }
}
"#;

const MEMBERS_CONTRIBUTIONS_QUERY: &str = r#"
query ($slug: String!, $first: Int!, $after: String) {
  enterprise(slug: $slug) {
    members(first: $first, after: $after) {
      pageInfo {
        endCursor
        hasNextPage
      }
      nodes {
        ... on EnterpriseUserAccount {
          user {
            avatarUrl
            createdAt
            login
            name
            updatedAt
            contributionsCollection {
              hasAnyContributions
              restrictedContributionsCount
              totalCommitContributions
              totalIssueContributions
              totalPullRequestContributions
            }
          }
        }
      }
    }
  }
}
"#;

const OUTSIDE_COLLABORATORS_CONTRIBUTIONS_QUERY: &str = r#"
query ($slug: String!, $first: Int!, $after: String) {
  enterprise(slug: $slug) {
    ownerInfo {
      outsideCollaborators(first: $first, after: $after) {
        pageInfo {
          endCursor
          hasNextPage
        }
        nodes {
          avatarUrl
          createdAt
          login
          name
          updatedAt
          contributionsCollection {
            hasAnyContributions
            restrictedContributionsCount
            totalCommitContributions
            totalIssueContributions
            totalPullRequestContributions
          }
        }
      }
    }
  }
}
"#;

const OUTSIDE_COLLABORATORS_QUERY: &str = r#"
query ($slug: String!, $first: Int!, $after: String) {
  enterprise(slug: $slug) {
    ownerInfo {
      outsideCollaborators(first: $first, after: $after) {
        pageInfo {
          endCursor
          hasNextPage
        }
        edges {
          node {
            avatarUrl
            createdAt
            email
            login
            name
            updatedAt
          }
        }
      }
    }
  }
}
"#;

const MEMBERS_WITH_ROLE_QUERY: &str = r#"
query ($login: String!, $first: Int!, $after: String) {
  organization(login: $login) {
    membersWithRole(first: $first, after: $after) {
      pageInfo {
        endCursor
        hasNextPage
      }
      edges {
        node {
          login
          name
        }
        role
      }
    }
  }
}
"#;

const TEAMS_QUERY: &str = r#"
query ($login: String!, $first: Int!, $after: String, $privacy: TeamPrivacy) {
  organization(login: $login) {
    teams(first: $first, after: $after, privacy: $privacy, rootTeamsOnly: true, orderBy: {field: NAME, direction: ASC}) {
      pageInfo {
        endCursor
        hasNextPage
      }
      nodes {
        avatarUrl
        createdAt
        description
        name
        privacy
        slug
        updatedAt
        members(first: 1, membership: IMMEDIATE) {
          totalCount
        }
        childTeams(first: 5, orderBy: {field: NAME, direction: ASC}) {
          nodes {
            avatarUrl
            createdAt
            description
            name
            privacy
            slug
            updatedAt
            members(first: 1, membership: IMMEDIATE) {
              totalCount
            }
            childTeams(first: 5, orderBy: {field: NAME, direction: ASC}) {
              nodes {
                avatarUrl
                createdAt
                description
                name
                privacy
                slug
                updatedAt
                members(first: 1, membership: IMMEDIATE) {
                  totalCount
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

const TEAM_NAMES_QUERY: &str = r#"
query ($login: String!, $first: Int!, $after: String) {
  organization(login: $login) {
    teams(first: $first, after: $after) {
      pageInfo {
        endCursor
        hasNextPage
      }
      nodes {
        name
        privacy
        slug
      }
    }
  }
}
"#;

const TEAM_MEMBERS_QUERY: &str = r#"
query ($login: String!, $slug: String!, $first: Int!, $after: String) {
  organization(login: $login) {
    team(slug: $slug) {
      members(first: $first, after: $after) {
        pageInfo {
          endCursor
          hasNextPage
        }
        nodes {
          login
        }
      }
    }
  }
}
"#;

const TEAM_QUERY: &str = r#"
query ($login: String!, $slug: String!, $first: Int!, $after: String) {
  organization(login: $login) {
    team(slug: $slug) {
      avatarUrl
      createdAt
      description
      name
      privacy
      slug
      updatedAt
      url
      members(first: $first, after: $after, membership: IMMEDIATE) {
        pageInfo {
          endCursor
          hasNextPage
        }
        edges {
          role
          node {
            email
            login
            name
          }
        }
      }
      ancestors(first: 10) {
        nodes {
          name
          privacy
          slug
        }
      }
      childTeams(first: 10, orderBy: {field: NAME, direction: ASC}) {
        nodes {
          name
          slug
          childTeams(first: 10, orderBy: {field: NAME, direction: ASC}) {
            nodes {
              name
              slug
              childTeams(first: 10, orderBy: {field: NAME, direction: ASC}) {
                nodes {
                  name
                  slug
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

const REPOSITORIES_QUERY: &str = r#"
query ($login: String!, $first: Int!, $after: String) {
  organization(login: $login) {
    repositories(first: $first, after: $after, orderBy: {field: NAME, direction: ASC}) {
      pageInfo {
        endCursor
        hasNextPage
      }
      nodes {
        createdAt
        description
        isArchived
        isPrivate
        isTemplate
        name
        pushedAt
        updatedAt
        branchProtectionRules(first: 1) {
          totalCount
        }
        collaborators(first: 1) {
          totalCount
        }
        primaryLanguage {
          name
        }
        vulnerabilityAlerts(first: 1) {
          totalCount
        }
      }
    }
  }
}
"#;

const REPOSITORY_QUERY: &str = r#"
query ($login: String!, $name: String!) {
  organization(login: $login) {
    repository(name: $name) {
      createdAt
      description
      forkCount
      isArchived
      isEmpty
      isPrivate
      isTemplate
      name
      pushedAt
      stargazerCount
      updatedAt
      url
      branchProtectionRules(first: 10) {
        totalCount
        nodes {
          allowsDeletions
          allowsForcePushes
          dismissesStaleReviews
          isAdminEnforced
          pattern
          requiredApprovingReviewCount
          requiresCodeOwnerReviews
          requiresCommitSignatures
          requiresLinearHistory
          requiresStatusChecks
          requiresStrictStatusChecks
          restrictsPushes
          restrictsReviewDismissals
        }
      }
      defaultBranchRef {
        name
      }
      languages(first: 10) {
        edges {
          size
          node {
            color
            name
          }
        }
      }
      licenseInfo {
        name
      }
      primaryLanguage {
        name
      }
      repositoryTopics(first: 20) {
        nodes {
          topic {
            name
          }
        }
      }
      vulnerabilityAlerts(first: 1) {
        totalCount
      }
    }
  }
}
"#;

const REPOSITORY_ACCESS_QUERY: &str = r#"
query ($login: String!, $name: String!, $first: Int!, $after: String) {
  organization(login: $login) {
    name
    repository(name: $name) {
      collaborators(first: $first, after: $after) {
        pageInfo {
          endCursor
          hasNextPage
        }
        edges {
          node {
            login
            name
            organizations(first: 5) {
              nodes {
                name
              }
            }
          }
          permissionSources {
            permission
            source {
              __typename
              ... on Organization {
                organisationName: name
              }
              ... on Repository {
                repositoryName: name
              }
              ... on Team {
                slug
                teamName: name
                parentTeam {
                  name
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

const TWO_FACTOR_DISABLED_QUERY: &str = r#"
query ($slug: String!, $first: Int!, $after: String) {
  enterprise(slug: $slug) {
    ownerInfo {
      affiliatedUsersWithTwoFactorDisabled(first: $first, after: $after) {
        pageInfo {
          endCursor
          hasNextPage
        }
        nodes {
          login
        }
      }
    }
  }
}
"#;

const TWO_FACTOR_DISABLED_USERS_QUERY: &str = r#"
query ($login: String!, $slug: String!, $first: Int!, $after: String) {
  enterprise(slug: $slug) {
    ownerInfo {
      affiliatedUsersWithTwoFactorDisabled(first: $first, after: $after) {
        pageInfo {
          endCursor
          hasNextPage
        }
        nodes {
          avatarUrl
          createdAt
          email
          login
          name
          updatedAt
          organizations(first: 5) {
            nodes {
              name
            }
          }
        }
      }
    }
  }
  organization(login: $login) {
    name
  }
}
"#;

const MEMBER_QUERY: &str = r#"
query ($slug: String!, $login: String!, $userLogin: String!) {
  enterprise(slug: $slug) {
    members(first: 1, query: $userLogin) {
      nodes {
        ... on EnterpriseUserAccount {
          user {
            avatarUrl
            createdAt
            email
            login
            name
            organizationVerifiedDomainEmails(login: $login)
            updatedAt
            contributionsCollection {
              hasAnyContributions
            }
            organizations(first: 10) {
              nodes {
                resourcePath
              }
            }
          }
        }
      }
    }
  }
}
"#;

const OUTSIDE_COLLABORATOR_QUERY: &str = r#"
query ($slug: String!, $login: String!) {
  enterprise(slug: $slug) {
    ownerInfo {
      outsideCollaborators(first: 1, query: $login) {
        edges {
          node {
            avatarUrl
            createdAt
            email
            login
            name
            updatedAt
            contributionsCollection {
              hasAnyContributions
            }
          }
        }
      }
    }
  }
}
"#;

/// Names of every query in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryName {
    Members,
    InactiveMembers,
    InactiveOutsideCollaborators,
    MembersContributions,
    OutsideCollaboratorsContributions,
    OutsideCollaborators,
    MembersWithRole,
    Teams,
    TeamNames,
    TeamMembers,
    Team,
    Repositories,
    Repository,
    RepositoryAccess,
    TwoFactorDisabled,
    TwoFactorDisabledUsers,
    Member,
    OutsideCollaborator,
}

impl QueryName {
    /// Every query name, in catalog order.
    pub const ALL: [QueryName; 18] = [
        QueryName::Members,
        QueryName::InactiveMembers,
        QueryName::InactiveOutsideCollaborators,
        QueryName::MembersContributions,
        QueryName::OutsideCollaboratorsContributions,
        QueryName::OutsideCollaborators,
        QueryName::MembersWithRole,
        QueryName::Teams,
        QueryName::TeamNames,
        QueryName::TeamMembers,
        QueryName::Team,
        QueryName::Repositories,
        QueryName::Repository,
        QueryName::RepositoryAccess,
        QueryName::TwoFactorDisabled,
        QueryName::TwoFactorDisabledUsers,
        QueryName::Member,
        QueryName::OutsideCollaborator,
    ];

    /// Stable identifier used in logs and errors.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Members => "members",
            Self::InactiveMembers => "inactive_members",
            Self::InactiveOutsideCollaborators => "inactive_outside_collaborators",
            Self::MembersContributions => "members_contributions",
            Self::OutsideCollaboratorsContributions => "outside_collaborators_contributions",
            Self::OutsideCollaborators => "outside_collaborators",
            Self::MembersWithRole => "members_with_role",
            Self::Teams => "teams",
            Self::TeamNames => "team_names",
            Self::TeamMembers => "team_members",
            Self::Team => "team",
            Self::Repositories => "repositories",
            Self::Repository => "repository",
            Self::RepositoryAccess => "repository_access",
            Self::TwoFactorDisabled => "two_factor_disabled",
            Self::TwoFactorDisabledUsers => "two_factor_disabled_users",
            Self::Member => "member",
            Self::OutsideCollaborator => "outside_collaborator",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for QueryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which list of a connection holds its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeList {
    /// `nodes { ... }`
    Nodes,
    /// `edges { node { ... } ... }`, used when the edge carries data such
    /// as a role or permission sources.
    Edges,
}

impl NodeList {
    /// The JSON key of the list inside the connection object.
    pub fn key(self) -> &'static str {
        match self {
            Self::Nodes => "nodes",
            Self::Edges => "edges",
        }
    }
}

/// Relative cost of a paginated query, which selects its page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageWeight {
    Light,
    Heavy,
}

/// Where a paginated query's connection lives and how big its pages are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Path from `data` to the connection object, e.g.
    /// `["enterprise", "members"]`.
    pub connection_path: &'static [&'static str],
    /// The list holding the connection's items.
    pub list: NodeList,
    /// Value sent as the `first` variable.
    pub page_size: u32,
}

/// A named, parameterized GraphQL query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    pub name: QueryName,
    pub document: &'static str,
    /// Variables the caller must supply. `first` and `after` are managed
    /// by the paginator and never listed here.
    pub required_variables: &'static [&'static str],
    /// `None` for single-shot queries.
    pub pagination: Option<Pagination>,
}

impl QueryTemplate {
    /// Checks that every required variable is present and not null.
    pub fn check_variables(&self, variables: &Map<String, Value>) -> Result<(), ApiError> {
        for variable in self.required_variables {
            match variables.get(*variable) {
                Some(value) if !value.is_null() => {}
                _ => {
                    return Err(ApiError::MissingVariable {
                        query: self.name.as_str(),
                        variable,
                    })
                }
            }
        }
        Ok(())
    }

    /// Whether the template is walked page by page.
    pub fn is_paginated(&self) -> bool {
        self.pagination.is_some()
    }
}

/// The immutable registry of query templates.
#[derive(Debug, Clone)]
pub struct QueryCatalog {
    templates: Vec<QueryTemplate>,
}

impl QueryCatalog {
    /// Builds the catalog with the default page sizes.
    pub fn new() -> Self {
        Self::with_page_sizes(LIGHT_PAGE_SIZE, HEAVY_PAGE_SIZE)
    }

    /// Builds the catalog with custom light and heavy page sizes.
    ///
    /// Sizes are clamped to GitHub's accepted range of 1..=100.
    pub fn with_page_sizes(light: u32, heavy: u32) -> Self {
        let light = light.clamp(1, 100);
        let heavy = heavy.clamp(1, 100);
        let templates = QueryName::ALL
            .iter()
            .map(|name| define(*name, light, heavy))
            .collect();
        Self { templates }
    }

    /// Looks up a template by name.
    pub fn get(&self, name: QueryName) -> &QueryTemplate {
        &self.templates[name.index()]
    }

    /// Iterates over every template in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &QueryTemplate> {
        self.templates.iter()
    }
}

impl Default for QueryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn define(name: QueryName, light: u32, heavy: u32) -> QueryTemplate {
    let paged = |path: &'static [&'static str], list: NodeList, weight: PageWeight| {
        Some(Pagination {
            connection_path: path,
            list,
            page_size: match weight {
                PageWeight::Light => light,
                PageWeight::Heavy => heavy,
            },
        })
    };

    let (document, required_variables, pagination): (&'static str, &'static [&'static str], _) =
        match name {
            QueryName::Members => (
                MEMBERS_QUERY,
                &["login", "slug"],
                paged(&["enterprise", "members"], NodeList::Nodes, PageWeight::Light),
            ),
            QueryName::InactiveMembers => (
                INACTIVE_MEMBERS_QUERY,
                &["login", "slug", "from"],
                paged(&["enterprise", "members"], NodeList::Nodes, PageWeight::Heavy),
            ),
            QueryName::InactiveOutsideCollaborators => (
                INACTIVE_OUTSIDE_COLLABORATORS_QUERY,
                &["slug", "from"],
                paged(
                    &["enterprise", "ownerInfo", "outsideCollaborators"],
                    NodeList::Nodes,
                    PageWeight::Heavy,
                ),
            ),
            QueryName::MembersContributions => (
                MEMBERS_CONTRIBUTIONS_QUERY,
                &["slug"],
                paged(&["enterprise", "members"], NodeList::Nodes, PageWeight::Heavy),
            ),
            QueryName::OutsideCollaboratorsContributions => (
                OUTSIDE_COLLABORATORS_CONTRIBUTIONS_QUERY,
                &["slug"],
                paged(
                    &["enterprise", "ownerInfo", "outsideCollaborators"],
                    NodeList::Nodes,
                    PageWeight::Heavy,
                ),
            ),
            QueryName::OutsideCollaborators => (
                OUTSIDE_COLLABORATORS_QUERY,
                &["slug"],
                paged(
                    &["enterprise", "ownerInfo", "outsideCollaborators"],
                    NodeList::Edges,
                    PageWeight::Light,
                ),
            ),
            QueryName::MembersWithRole => (
                MEMBERS_WITH_ROLE_QUERY,
                &["login"],
                paged(
                    &["organization", "membersWithRole"],
                    NodeList::Edges,
                    PageWeight::Light,
                ),
            ),
            QueryName::Teams => (
                TEAMS_QUERY,
                &["login"],
                paged(&["organization", "teams"], NodeList::Nodes, PageWeight::Light),
            ),
            QueryName::TeamNames => (
                TEAM_NAMES_QUERY,
                &["login"],
                paged(&["organization", "teams"], NodeList::Nodes, PageWeight::Light),
            ),
            QueryName::TeamMembers => (
                TEAM_MEMBERS_QUERY,
                &["login", "slug"],
                paged(
                    &["organization", "team", "members"],
                    NodeList::Nodes,
                    PageWeight::Light,
                ),
            ),
            QueryName::Team => (
                TEAM_QUERY,
                &["login", "slug"],
                paged(
                    &["organization", "team", "members"],
                    NodeList::Edges,
                    PageWeight::Light,
                ),
            ),
            QueryName::Repositories => (
                REPOSITORIES_QUERY,
                &["login"],
                paged(
                    &["organization", "repositories"],
                    NodeList::Nodes,
                    PageWeight::Light,
                ),
            ),
            QueryName::Repository => (REPOSITORY_QUERY, &["login", "name"], None),
            QueryName::RepositoryAccess => (
                REPOSITORY_ACCESS_QUERY,
                &["login", "name"],
                paged(
                    &["organization", "repository", "collaborators"],
                    NodeList::Edges,
                    PageWeight::Light,
                ),
            ),
            QueryName::TwoFactorDisabled => (
                TWO_FACTOR_DISABLED_QUERY,
                &["slug"],
                paged(
                    &["enterprise", "ownerInfo", "affiliatedUsersWithTwoFactorDisabled"],
                    NodeList::Nodes,
                    PageWeight::Light,
                ),
            ),
            QueryName::TwoFactorDisabledUsers => (
                TWO_FACTOR_DISABLED_USERS_QUERY,
                &["login", "slug"],
                paged(
                    &["enterprise", "ownerInfo", "affiliatedUsersWithTwoFactorDisabled"],
                    NodeList::Nodes,
                    PageWeight::Light,
                ),
            ),
            QueryName::Member => (MEMBER_QUERY, &["slug", "login", "userLogin"], None),
            QueryName::OutsideCollaborator => {
                (OUTSIDE_COLLABORATOR_QUERY, &["slug", "login"], None)
            }
        };

    QueryTemplate {
        name,
        document,
        required_variables,
        pagination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_lookup_matches_name() {
        let catalog = QueryCatalog::new();
        for name in QueryName::ALL {
            assert_eq!(catalog.get(name).name, name);
        }
        assert_eq!(catalog.iter().count(), QueryName::ALL.len());
    }

    #[test]
    fn test_page_sizes() {
        let catalog = QueryCatalog::new();
        let page_size = |name| catalog.get(name).pagination.as_ref().unwrap().page_size;
        assert_eq!(page_size(QueryName::Repositories), 100);
        assert_eq!(page_size(QueryName::InactiveMembers), 10);
        assert_eq!(page_size(QueryName::MembersContributions), 10);

        let tuned = QueryCatalog::with_page_sizes(500, 0);
        assert_eq!(
            tuned.get(QueryName::Members).pagination.as_ref().unwrap().page_size,
            100
        );
        assert_eq!(
            tuned
                .get(QueryName::InactiveMembers)
                .pagination
                .as_ref()
                .unwrap()
                .page_size,
            1
        );
    }

    #[test]
    fn test_paginated_documents_declare_cursor_variables() {
        let catalog = QueryCatalog::new();
        for template in catalog.iter().filter(|t| t.is_paginated()) {
            assert!(template.document.contains("$first: Int!"), "{}", template.name);
            assert!(template.document.contains("$after: String"), "{}", template.name);
            assert!(template.document.contains("pageInfo"), "{}", template.name);
            for variable in template.required_variables {
                assert!(
                    template.document.contains(&format!("${}:", variable)),
                    "{} missing ${}",
                    template.name,
                    variable
                );
            }
        }
    }

    #[test]
    fn test_single_queries_are_not_paginated() {
        let catalog = QueryCatalog::new();
        assert!(!catalog.get(QueryName::Repository).is_paginated());
        assert!(!catalog.get(QueryName::Member).is_paginated());
        assert!(!catalog.get(QueryName::OutsideCollaborator).is_paginated());
    }

    #[test]
    fn test_check_variables() {
        let catalog = QueryCatalog::new();
        let template = catalog.get(QueryName::TeamMembers);

        let ok = json!({"login": "acme", "slug": "platform"});
        assert!(template.check_variables(ok.as_object().unwrap()).is_ok());

        let null_slug = json!({"login": "acme", "slug": null});
        let err = template
            .check_variables(null_slug.as_object().unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::MissingVariable {
                variable: "slug",
                ..
            }
        ));
    }
}
