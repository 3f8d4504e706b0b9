//
//  github-explorer
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cursor pagination over GitHub GraphQL connections.
//!
//! GitHub exposes lists as *connections*: each page carries a `pageInfo`
//! object with an opaque `endCursor` and a `hasNextPage` flag, plus the items
//! in either `nodes` or `edges`. The [`Paginator`] drives a catalog query
//! page by page until `hasNextPage` is false, flattening the items of every
//! page in response order.
//!
//! # Overview
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`PageInfo`] | The cursor state of one page |
//! | [`GraphQlResponse`] | Envelope of one GraphQL answer (`data` + `errors`) |
//! | [`Paginated`] | Items of every page plus the raw first page |
//! | [`Paginator`] | Runs catalog queries against a transport |
//!
//! # Failure semantics
//!
//! A page whose response carries a non-empty `errors` array aborts the walk
//! with [`ApiError::GraphQl`]. Items gathered from earlier pages are dropped
//! with it; a caller never sees a partial collection.
//!
//! # Pacing
//!
//! The paginator sleeps for a fixed pause between consecutive pages. It is
//! cooperative pacing against the upstream rate-limit budget, not a rate
//! limiter: there is no pause before the first page or after the last.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::{ApiError, GraphQlErrorEntry};
use crate::api::client::GraphQlTransport;
use crate::api::queries::{Pagination, QueryCatalog, QueryName, QueryTemplate};

/// Default pause between consecutive pages.
pub const DEFAULT_PAGE_PAUSE: Duration = Duration::from_millis(500);

/// Cursor state of a single connection page.
///
/// `end_cursor` is only meaningful while `has_next_page` is true; a missing
/// cursor is valid on the first request and on the last page only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

/// The envelope of one GraphQL response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlErrorEntry>>,
}

impl GraphQlResponse {
    /// Parses a response body already decoded as JSON.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        serde_json::from_value(value).map_err(|e| ApiError::malformed("$", e))
    }

    /// Returns `data`, or the normalized error when `errors` is non-empty.
    ///
    /// GitHub can answer with both `data` and `errors` (for example a
    /// partially resolved query); any error wins.
    pub fn into_data(self) -> Result<Value, ApiError> {
        if let Some(errors) = self.errors.as_deref().filter(|e| !e.is_empty()) {
            return Err(ApiError::graphql(errors));
        }
        Ok(self.data.unwrap_or(Value::Null))
    }
}

/// Items of every page of a connection.
#[derive(Debug, Clone)]
pub struct Paginated<N> {
    /// Items in response order across pages.
    pub nodes: Vec<N>,
    /// The `data` object of the first page, for fields that live outside
    /// the connection (a team's name, an organisation's display name).
    pub first_page: Value,
    /// Number of pages fetched.
    pub pages: usize,
}

/// Outcome of walking a connection path within one page.
enum Located<'a> {
    Connection(&'a Value),
    /// A parent object on the path resolved to null.
    Absent,
}

/// Runs catalog queries and walks their connections.
///
/// The paginator is cheap to clone; the transport and catalog are shared.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use serde_json::{json, Value};
/// use github_explorer::api::{GraphQlClient, QueryCatalog, QueryName};
/// use github_explorer::api::common::Paginator;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = GraphQlClient::new("https://api.github.com", "token")?;
/// let paginator = Paginator::new(Arc::new(client), Arc::new(QueryCatalog::new()));
///
/// let repositories: Vec<Value> = paginator
///     .paginate(QueryName::Repositories, json!({ "login": "acme" }))
///     .await?;
/// println!("{} repositories", repositories.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Paginator {
    transport: Arc<dyn GraphQlTransport>,
    catalog: Arc<QueryCatalog>,
    pause: Duration,
}

impl std::fmt::Debug for Paginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("pause", &self.pause)
            .finish_non_exhaustive()
    }
}

impl Paginator {
    /// Creates a paginator with the default inter-page pause.
    pub fn new(transport: Arc<dyn GraphQlTransport>, catalog: Arc<QueryCatalog>) -> Self {
        Self {
            transport,
            catalog,
            pause: DEFAULT_PAGE_PAUSE,
        }
    }

    /// Sets the pause between consecutive pages. `Duration::ZERO` disables it.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// The pause applied between pages.
    pub fn pause(&self) -> Duration {
        self.pause
    }

    /// The catalog queries are resolved against.
    pub fn catalog(&self) -> &QueryCatalog {
        &self.catalog
    }

    /// Sleeps for the configured pause.
    ///
    /// Also used by callers that chain several paginated queries back to
    /// back, such as one membership query per team.
    pub async fn pace(&self) {
        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }
    }

    /// Sends one request and parses the GraphQL envelope.
    async fn send(&self, template: &QueryTemplate, variables: &Value) -> Result<GraphQlResponse, ApiError> {
        let body = self
            .transport
            .execute(template.document, variables)
            .await?;
        GraphQlResponse::from_value(body)
    }

    /// Runs a single-shot query and returns its `data` object.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingVariable`] before any request is made
    /// - [`ApiError::GraphQl`] if the response carries errors
    /// - [`ApiError::Transport`] / [`ApiError::Unstructured`] on transport failure
    pub async fn execute(&self, name: QueryName, variables: Value) -> Result<Value, ApiError> {
        let template = self.catalog.get(name);
        let variables = into_object(variables);
        template.check_variables(&variables)?;

        tracing::debug!(query = %name, "Executing query");
        self.send(template, &Value::Object(variables))
            .await?
            .into_data()
    }

    /// Walks every page of a paginated query and returns its items.
    pub async fn paginate<N: DeserializeOwned>(
        &self,
        name: QueryName,
        variables: Value,
    ) -> Result<Vec<N>, ApiError> {
        Ok(self.paginate_pages(name, variables).await?.nodes)
    }

    /// Like [`paginate`](Self::paginate), also returning the first page and
    /// the page count.
    ///
    /// A parent object on the connection path that resolves to null is a
    /// malformed response here; use
    /// [`paginate_optional`](Self::paginate_optional) when null is expected.
    pub async fn paginate_pages<N: DeserializeOwned>(
        &self,
        name: QueryName,
        variables: Value,
    ) -> Result<Paginated<N>, ApiError> {
        let template = self.catalog.get(name);
        match self.walk(template, variables).await? {
            Some(paginated) => Ok(paginated),
            None => Err(ApiError::malformed(
                connection_path_string(paginated_spec(template)?),
                "connection parent is null",
            )),
        }
    }

    /// Walks a paginated query whose connection parent may legitimately be
    /// null, such as a repository or team looked up by name.
    ///
    /// Returns `None` when the first page resolves a parent on the
    /// connection path to null.
    pub async fn paginate_optional<N: DeserializeOwned>(
        &self,
        name: QueryName,
        variables: Value,
    ) -> Result<Option<Paginated<N>>, ApiError> {
        let template = self.catalog.get(name);
        self.walk(template, variables).await
    }

    async fn walk<N: DeserializeOwned>(
        &self,
        template: &QueryTemplate,
        variables: Value,
    ) -> Result<Option<Paginated<N>>, ApiError> {
        let spec = paginated_spec(template)?;
        let mut variables = into_object(variables);
        template.check_variables(&variables)?;
        variables.insert("first".to_string(), Value::from(spec.page_size));

        let mut nodes = Vec::new();
        let mut first_page = None;
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            if pages > 0 {
                self.pace().await;
            }

            variables.insert(
                "after".to_string(),
                cursor.clone().map(Value::String).unwrap_or(Value::Null),
            );

            let data = self
                .send(template, &Value::Object(variables.clone()))
                .await?
                .into_data()?;

            let connection = match locate(&data, spec)? {
                Located::Connection(connection) => connection,
                Located::Absent if pages == 0 => return Ok(None),
                Located::Absent => {
                    return Err(ApiError::malformed(
                        connection_path_string(spec),
                        "connection parent became null after the first page",
                    ))
                }
            };

            let page_info = read_page_info(connection, spec)?;
            let before = nodes.len();
            collect_items(connection, spec, &mut nodes)?;
            pages += 1;

            tracing::debug!(
                query = %template.name,
                page = pages,
                items = nodes.len() - before,
                has_next_page = page_info.has_next_page,
                "Fetched page"
            );

            if first_page.is_none() {
                first_page = Some(data);
            }

            if !page_info.has_next_page {
                break;
            }

            match page_info.end_cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => {
                    return Err(ApiError::malformed(
                        format!("{}.pageInfo.endCursor", connection_path_string(spec)),
                        "hasNextPage is true but endCursor is missing",
                    ))
                }
            }
        }

        Ok(Some(Paginated {
            nodes,
            first_page: first_page.unwrap_or(Value::Null),
            pages,
        }))
    }
}

fn into_object(variables: Value) -> Map<String, Value> {
    match variables {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn paginated_spec(template: &QueryTemplate) -> Result<&Pagination, ApiError> {
    template.pagination.as_ref().ok_or_else(|| {
        ApiError::malformed(
            template.name.as_str(),
            "query is not paginated; use execute instead",
        )
    })
}

fn connection_path_string(spec: &Pagination) -> String {
    spec.connection_path.join(".")
}

fn locate<'a>(data: &'a Value, spec: &Pagination) -> Result<Located<'a>, ApiError> {
    let mut current = data;
    for (depth, key) in spec.connection_path.iter().enumerate() {
        let object = current.as_object().ok_or_else(|| {
            ApiError::malformed(
                spec.connection_path[..depth].join("."),
                "expected an object",
            )
        })?;
        match object.get(*key) {
            Some(Value::Null) => return Ok(Located::Absent),
            Some(next) => current = next,
            None => {
                return Err(ApiError::malformed(
                    spec.connection_path[..=depth].join("."),
                    "field missing from response",
                ))
            }
        }
    }
    Ok(Located::Connection(current))
}

fn read_page_info(connection: &Value, spec: &Pagination) -> Result<PageInfo, ApiError> {
    let path = format!("{}.pageInfo", connection_path_string(spec));
    let raw = connection
        .get("pageInfo")
        .cloned()
        .ok_or_else(|| ApiError::malformed(path.clone(), "field missing from response"))?;
    serde_json::from_value(raw).map_err(|e| ApiError::malformed(path, e))
}

fn collect_items<N: DeserializeOwned>(
    connection: &Value,
    spec: &Pagination,
    into: &mut Vec<N>,
) -> Result<(), ApiError> {
    let key = spec.list.key();
    let path = format!("{}.{}", connection_path_string(spec), key);
    let items = match connection.get(key) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) => return Ok(()),
        Some(_) => return Err(ApiError::malformed(path, "expected an array")),
        None => return Err(ApiError::malformed(path, "field missing from response")),
    };

    for (index, item) in items.iter().enumerate() {
        if item.is_null() {
            continue;
        }
        let node = N::deserialize(item)
            .map_err(|e| ApiError::malformed(format!("{}[{}]", path, index), e))?;
        into.push(node);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{page, ScriptedTransport};
    use serde_json::json;

    fn repository_page(start: usize, count: usize, next: Option<&str>) -> Value {
        let nodes: Vec<Value> = (start..start + count)
            .map(|i| json!({ "name": format!("repo-{:03}", i) }))
            .collect();
        page(&["organization", "repositories"], "nodes", nodes, next)
    }

    fn paginator(transport: &Arc<ScriptedTransport>) -> Paginator {
        Paginator::new(transport.clone(), Arc::new(QueryCatalog::new())).with_pause(Duration::ZERO)
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[tokio::test]
    async fn test_paginate_concatenates_pages_in_order() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            repository_page(0, 100, Some("c1")),
            repository_page(100, 100, Some("c2")),
            repository_page(200, 37, None),
        ]));

        let repos: Vec<Named> = paginator(&transport)
            .paginate(QueryName::Repositories, json!({ "login": "acme" }))
            .await
            .unwrap();

        assert_eq!(repos.len(), 237);
        for (i, repo) in repos.iter().enumerate() {
            assert_eq!(repo.name, format!("repo-{:03}", i));
        }

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0]["after"], Value::Null);
        assert_eq!(requests[0]["first"], 100);
        assert_eq!(requests[0]["login"], "acme");
        assert_eq!(requests[1]["after"], "c1");
        assert_eq!(requests[2]["after"], "c2");
    }

    #[tokio::test]
    async fn test_graphql_error_discards_accumulated_pages() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            repository_page(0, 100, Some("c1")),
            json!({
                "data": null,
                "errors": [{ "message": "Something went wrong", "type": "INTERNAL" }]
            }),
        ]));

        let err = paginator(&transport)
            .paginate::<Named>(QueryName::Repositories, json!({ "login": "acme" }))
            .await
            .unwrap_err();

        match err {
            ApiError::GraphQl(normalized) => {
                assert_eq!(normalized.message, "Something went wrong");
                assert_eq!(normalized.error_type.as_deref(), Some("INTERNAL"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_variable_fails_before_request() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let err = paginator(&transport)
            .paginate::<Value>(QueryName::TeamMembers, json!({ "login": "acme" }))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::MissingVariable {
                query: "team_members",
                variable: "slug"
            }
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_has_next_page_without_cursor_is_malformed() {
        let mut bad = repository_page(0, 2, None);
        bad["data"]["organization"]["repositories"]["pageInfo"]["hasNextPage"] = json!(true);
        let transport = Arc::new(ScriptedTransport::new(vec![bad]));

        let err = paginator(&transport)
            .paginate::<Named>(QueryName::Repositories, json!({ "login": "acme" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_missing_connection_field_is_malformed() {
        let transport = Arc::new(ScriptedTransport::new(vec![json!({
            "data": { "organization": {} }
        })]));

        let err = paginator(&transport)
            .paginate::<Named>(QueryName::Repositories, json!({ "login": "acme" }))
            .await
            .unwrap_err();
        match err {
            ApiError::MalformedResponse { path, .. } => {
                assert_eq!(path, "organization.repositories")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_paginate_optional_null_parent() {
        let transport = Arc::new(ScriptedTransport::new(vec![json!({
            "data": { "organization": { "name": "Acme", "repository": null } }
        })]));

        let result = paginator(&transport)
            .paginate_optional::<Value>(
                QueryName::RepositoryAccess,
                json!({ "login": "acme", "name": "ghost" }),
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_null_items_are_skipped() {
        let transport = Arc::new(ScriptedTransport::new(vec![page(
            &["organization", "repositories"],
            "nodes",
            vec![json!({"name": "a"}), Value::Null, json!({"name": "b"})],
            None,
        )]));

        let repos: Vec<Named> = paginator(&transport)
            .paginate(QueryName::Repositories, json!({ "login": "acme" }))
            .await
            .unwrap();
        assert_eq!(repos.len(), 2);
    }

    #[tokio::test]
    async fn test_execute_rejects_errors() {
        let transport = Arc::new(ScriptedTransport::new(vec![json!({
            "data": { "organization": { "repository": null } },
            "errors": [{ "message": "Could not resolve to a Repository", "type": "NOT_FOUND" }]
        })]));

        let err = paginator(&transport)
            .execute(QueryName::Repository, json!({ "login": "acme", "name": "ghost" }))
            .await
            .unwrap_err();
        assert_eq!(
            err.normalized().and_then(|n| n.error_type.as_deref()),
            Some("NOT_FOUND")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_applies_between_pages_only() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            repository_page(0, 1, Some("c1")),
            repository_page(1, 1, None),
        ]));
        let paginator = Paginator::new(transport.clone(), Arc::new(QueryCatalog::new()))
            .with_pause(Duration::from_millis(500));

        let started = tokio::time::Instant::now();
        let repos: Vec<Named> = paginator
            .paginate(QueryName::Repositories, json!({ "login": "acme" }))
            .await
            .unwrap();

        assert_eq!(repos.len(), 2);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed < Duration::from_millis(1000));
    }
}
