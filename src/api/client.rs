//
//  github-explorer
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport for the GitHub GraphQL API
//!
//! This module provides the single-request transport used by the
//! [`Paginator`](crate::api::common::Paginator): one HTTPS `POST` per
//! GraphQL call with a JSON body of `{query, variables}`.
//!
//! ## Features
//!
//! - Bearer token authentication
//! - Custom User-Agent header
//! - Request timeout (20 seconds by default)
//! - Raw failure shapes kept intact for normalization: non-2xx statuses keep
//!   their body and headers, unparsable bodies keep their text
//!
//! The transport does not look inside the GraphQL envelope; a `200` response
//! carrying an `errors` array is a success at this layer.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::common::TransportFailure;
use crate::config::Config;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Executes one GraphQL request.
///
/// Implementations return the decoded JSON body of the response, whatever
/// its GraphQL content. Anything that prevents getting there is a
/// [`TransportFailure`].
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn execute(&self, query: &str, variables: &Value) -> Result<Value, TransportFailure>;
}

/// The HTTP client for a GitHub (Enterprise) GraphQL endpoint.
///
/// # Example
///
/// ```rust,no_run
/// use serde_json::json;
/// use github_explorer::api::{GraphQlClient, GraphQlTransport};
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = GraphQlClient::new("https://api.github.com", "ghp_example")?;
/// assert_eq!(client.endpoint(), "https://api.github.com/graphql");
///
/// let body = client
///     .execute("query { viewer { login } }", &json!({}))
///     .await?;
/// println!("{}", body["data"]["viewer"]["login"]);
/// # Ok(())
/// # }
/// ```
pub struct GraphQlClient {
    /// The underlying HTTP client
    http: Client,
    /// Full GraphQL endpoint URL
    endpoint: String,
    /// API token sent as a bearer credential
    token: String,
}

impl std::fmt::Debug for GraphQlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQlClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl GraphQlClient {
    /// Creates a client for `<base_uri>/graphql` with the default timeout.
    pub fn new(base_uri: &str, token: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_uri, token, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(base_uri: &str, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: graphql_endpoint(base_uri),
            token: token.into(),
        })
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base_uri.as_str(), config.token.clone())
    }

    /// The GraphQL endpoint requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GraphQlTransport for GraphQlClient {
    async fn execute(&self, query: &str, variables: &Value) -> Result<Value, TransportFailure> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(TransportFailure::from_reqwest)?;

        let status = response.status();
        let headers = collect_headers(response.headers());
        let body = response
            .text()
            .await
            .map_err(TransportFailure::from_reqwest)?;

        if !status.is_success() {
            return Err(TransportFailure::Status {
                status: status.as_u16(),
                body,
                headers,
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportFailure::MalformedBody {
            status: status.as_u16(),
            body,
            reason: e.to_string(),
        })
    }
}

fn graphql_endpoint(base_uri: &str) -> String {
    format!("{}/graphql", base_uri.trim_end_matches('/'))
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::{normalize, ApiError};
    use mockito::Matcher;

    #[test]
    fn test_graphql_endpoint() {
        assert_eq!(
            graphql_endpoint("https://api.github.com"),
            "https://api.github.com/graphql"
        );
        assert_eq!(
            graphql_endpoint("https://ghe.example.com/api/"),
            "https://ghe.example.com/api/graphql"
        );
    }

    #[tokio::test]
    async fn test_execute_posts_query_with_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_header("authorization", "Bearer secret")
            .match_body(Matcher::PartialJson(json!({
                "query": "query { viewer { login } }",
                "variables": { "login": "acme" }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"viewer": {"login": "octocat"}}}"#)
            .create_async()
            .await;

        let client = GraphQlClient::new(&server.url(), "secret").unwrap();
        let body = client
            .execute("query { viewer { login } }", &json!({ "login": "acme" }))
            .await
            .unwrap();

        assert_eq!(body["data"]["viewer"]["login"], "octocat");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_graphql_errors_are_not_transport_failures() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(r#"{"data": null, "errors": [{"message": "boom"}]}"#)
            .create_async()
            .await;

        let client = GraphQlClient::new(&server.url(), "secret").unwrap();
        let body = client.execute("query { x }", &json!({})).await.unwrap();
        assert_eq!(body["errors"][0]["message"], "boom");
    }

    #[tokio::test]
    async fn test_non_success_status_keeps_body_and_headers() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .with_status(503)
            .with_header("Retry-After", "30")
            .with_body("service unavailable")
            .create_async()
            .await;

        let client = GraphQlClient::new(&server.url(), "secret").unwrap();
        let failure = client.execute("query { x }", &json!({})).await.unwrap_err();

        let normalized = normalize(failure).unwrap();
        assert_eq!(normalized.status_code, Some(503));
        assert_eq!(normalized.response_body.as_deref(), Some("service unavailable"));
        assert_eq!(
            normalized.response_headers.unwrap().get("retry-after").map(String::as_str),
            Some("30")
        );
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = GraphQlClient::new(&server.url(), "secret").unwrap();
        let failure = client.execute("query { x }", &json!({})).await.unwrap_err();
        assert!(matches!(failure, TransportFailure::MalformedBody { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_unstructured() {
        // Nothing listens on port 9 (discard) in the test environment.
        let client = GraphQlClient::with_timeout(
            "http://127.0.0.1:9",
            "secret",
            Duration::from_secs(2),
        )
        .unwrap();
        let failure = client.execute("query { x }", &json!({})).await.unwrap_err();
        assert!(matches!(
            ApiError::from(failure),
            ApiError::Unstructured(TransportFailure::Request { status: None, .. })
        ));
    }
}
