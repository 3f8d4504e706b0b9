//
//  github-explorer
//  api/common/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Error taxonomy and normalization for GraphQL calls.
//!
//! Failures reach callers from two places:
//!
//! - **GraphQL errors**: the endpoint accepted the request and answered with a
//!   non-empty `errors` array. These carry a message and an upstream error
//!   type, but no transport metadata.
//! - **Transport failures**: connection problems, timeouts, non-2xx statuses
//!   and bodies that are not JSON. These carry whatever the HTTP layer could
//!   recover: status code, body and headers.
//!
//! Both are folded into a single [`NormalizedError`] so the agent and the web
//! side can present the same diagnostics. A transport failure that exposes no
//! structured data at all is never dressed up as a normalized error; it is
//! handed back unchanged through [`ApiError::Unstructured`].
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use github_explorer::api::common::{normalize, TransportFailure};
//!
//! let failure = TransportFailure::Status {
//!     status: 503,
//!     body: "service unavailable".to_string(),
//!     headers: BTreeMap::new(),
//! };
//!
//! let normalized = normalize(failure).unwrap();
//! assert_eq!(normalized.status_code, Some(503));
//! assert_eq!(normalized.response_body.as_deref(), Some("service unavailable"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Matches an embedded JSON object inside a free-form error message.
static JSON_FRAGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?s)\{\s*".*\}"#).unwrap());

/// GraphQL error type GitHub reports for unresolvable nodes.
pub const NOT_FOUND_TYPE: &str = "NOT_FOUND";

/// GraphQL error type GitHub reports when the query budget is exhausted.
pub const RATE_LIMITED_TYPE: &str = "RATE_LIMITED";

/// A raw transport-level failure, before normalization.
///
/// The variants mirror the shapes the HTTP layer can produce: a complete
/// response with a failing status, a successful status whose body could not
/// be parsed, or a request that never produced a usable response.
#[derive(Debug, Error)]
pub enum TransportFailure {
    /// The endpoint answered with a non-2xx status.
    #[error("GraphQL endpoint returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body (may be empty).
        body: String,
        /// Response headers, lowercased names.
        headers: BTreeMap<String, String>,
    },

    /// The endpoint answered 2xx but the body was not a JSON document.
    #[error("Malformed GraphQL response body: {reason}")]
    MalformedBody {
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body.
        body: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The request failed before a response could be read (DNS, connect,
    /// TLS, timeout, body read).
    #[error("{message}")]
    Request {
        /// Human-readable description of the failure.
        message: String,
        /// Status attached to the failure, when the HTTP layer had one.
        status: Option<u16>,
        /// Whether the failure was a timeout.
        timeout: bool,
        /// The underlying client error, if any.
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl TransportFailure {
    /// Wraps a `reqwest` error, keeping its message, status and timeout flag.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        Self::Request {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
            timeout: err.is_timeout(),
            source: Some(err),
        }
    }

    /// Builds a request failure from a bare message.
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
            status: None,
            timeout: false,
            source: None,
        }
    }

    /// Returns `true` if the failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request { timeout: true, .. })
    }
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlErrorEntry {
    /// Error message.
    #[serde(default)]
    pub message: String,

    /// Upstream classification, e.g. `NOT_FOUND` or `FORBIDDEN`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,

    /// Response path the error refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,

    /// Source locations within the query document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Value>,
}

/// A failure normalized into one shape with every piece of diagnostic
/// context that could be recovered.
///
/// `message` is always populated. `full_details` is a JSON object holding
/// the message plus whichever of the other fields are present (and, for
/// GraphQL failures, the complete `graphql_errors` array).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedError {
    pub message: String,
    pub error_type: Option<String>,
    pub status_code: Option<u16>,
    pub response_body: Option<String>,
    pub response_headers: Option<BTreeMap<String, String>>,
    pub full_details: Value,
}

impl NormalizedError {
    /// Normalizes a non-empty GraphQL `errors` array.
    ///
    /// The first entry supplies the message and type; transport fields stay
    /// empty on this path.
    pub fn from_graphql(errors: &[GraphQlErrorEntry]) -> Self {
        let first = errors.first();
        let message = first
            .map(|e| e.message.trim())
            .filter(|m| !m.is_empty())
            .unwrap_or("GraphQL request returned errors")
            .to_string();
        let error_type = first.and_then(|e| e.error_type.clone());

        let mut details = base_details(&message, error_type.as_deref(), None, None, None);
        details.insert(
            "graphql_errors".to_string(),
            serde_json::to_value(errors).unwrap_or(Value::Null),
        );

        Self {
            message,
            error_type,
            status_code: None,
            response_body: None,
            response_headers: None,
            full_details: Value::Object(details),
        }
    }

    fn from_transport(
        message: String,
        status_code: Option<u16>,
        response_body: Option<String>,
        response_headers: Option<BTreeMap<String, String>>,
    ) -> Self {
        let details = base_details(
            &message,
            None,
            status_code,
            response_body.as_deref(),
            response_headers.as_ref(),
        );

        Self {
            message,
            error_type: None,
            status_code,
            response_body,
            response_headers,
            full_details: Value::Object(details),
        }
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error_type, self.status_code) {
            (Some(kind), _) => write!(f, "{} ({})", self.message, kind),
            (None, Some(status)) => write!(f, "{} (HTTP {})", self.message, status),
            (None, None) => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for NormalizedError {}

fn base_details(
    message: &str,
    error_type: Option<&str>,
    status_code: Option<u16>,
    response_body: Option<&str>,
    response_headers: Option<&BTreeMap<String, String>>,
) -> Map<String, Value> {
    let mut details = Map::new();
    details.insert("message".to_string(), Value::from(message));
    if let Some(kind) = error_type {
        details.insert("type".to_string(), Value::from(kind));
    }
    if let Some(status) = status_code {
        details.insert("status_code".to_string(), Value::from(status));
    }
    if let Some(body) = response_body {
        details.insert("response_body".to_string(), Value::from(body));
    }
    if let Some(headers) = response_headers {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
            .collect::<Map<_, _>>();
        details.insert("response_headers".to_string(), Value::Object(headers));
    }
    details
}

/// Extracts a human-readable message from an error response body.
///
/// Understands the shapes GitHub uses: `{"message": "..."}`,
/// `{"errors": [{"message": "..."}]}` and `{"error": {"message": "..."}}`.
/// Returns `None` when the body is not JSON or carries no message.
pub fn extract_body_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<Value>(body).ok()?;

    if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }

    if let Some(message) = json
        .get("errors")
        .and_then(|e| e.as_array())
        .and_then(|arr| arr.first())
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }

    json.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

/// Finds a JSON-looking object embedded in an error message.
pub fn find_json_fragment(message: &str) -> Option<&str> {
    JSON_FRAGMENT.find(message).map(|m| m.as_str())
}

fn status_message(status: u16, body: &str) -> String {
    let detail = extract_body_message(body)
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .or_else(|| {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "request failed".to_string());

    format!("HTTP {}: {}", status, detail)
}

/// Normalizes a transport failure.
///
/// Structured data is recovered in order of preference:
///
/// 1. the response attached to the failure (status, body, headers);
/// 2. a body carried directly by the failure;
/// 3. a JSON-looking fragment embedded in the failure's message.
///
/// A status code attached to an otherwise opaque request failure also counts
/// as structured data. When nothing can be recovered the original failure is
/// returned in `Err` so the caller can propagate it unchanged.
pub fn normalize(failure: TransportFailure) -> Result<NormalizedError, TransportFailure> {
    match failure {
        TransportFailure::Status {
            status,
            body,
            headers,
        } => {
            let message = status_message(status, &body);
            let headers = (!headers.is_empty()).then_some(headers);
            Ok(NormalizedError::from_transport(
                message,
                Some(status),
                Some(body),
                headers,
            ))
        }
        TransportFailure::MalformedBody {
            status,
            body,
            reason,
        } => Ok(NormalizedError::from_transport(
            format!("Malformed response body: {}", reason),
            Some(status),
            Some(body),
            None,
        )),
        TransportFailure::Request {
            message,
            status: Some(status),
            ..
        } => Ok(NormalizedError::from_transport(
            message,
            Some(status),
            None,
            None,
        )),
        TransportFailure::Request {
            message,
            status: None,
            timeout,
            source,
        } => match find_json_fragment(&message).map(str::to_string) {
            Some(body) => {
                let message = extract_body_message(&body).unwrap_or(message);
                Ok(NormalizedError::from_transport(message, None, Some(body), None))
            }
            None => Err(TransportFailure::Request {
                message,
                status: None,
                timeout,
                source,
            }),
        },
    }
}

/// Errors returned by the GraphQL layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint returned a non-empty `errors` array.
    #[error("GitHub GraphQL API error: {0}")]
    GraphQl(NormalizedError),

    /// A transport failure with recoverable diagnostics.
    #[error("GitHub API transport error: {0}")]
    Transport(NormalizedError),

    /// A transport failure with nothing structured to recover, propagated
    /// as it was raised.
    #[error(transparent)]
    Unstructured(TransportFailure),

    /// The response did not have the shape the query declares.
    #[error("Malformed response at '{path}': {reason}")]
    MalformedResponse { path: String, reason: String },

    /// A required query variable was not supplied.
    #[error("Query '{query}' requires the '{variable}' variable")]
    MissingVariable {
        query: &'static str,
        variable: &'static str,
    },
}

impl From<TransportFailure> for ApiError {
    fn from(failure: TransportFailure) -> Self {
        match normalize(failure) {
            Ok(normalized) => Self::Transport(normalized),
            Err(original) => Self::Unstructured(original),
        }
    }
}

impl ApiError {
    /// Builds a GraphQL error from a non-empty `errors` array.
    pub fn graphql(errors: &[GraphQlErrorEntry]) -> Self {
        Self::GraphQl(NormalizedError::from_graphql(errors))
    }

    /// Builds a malformed-response error for the given response path.
    pub fn malformed(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::MalformedResponse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// The normalized diagnostics, for GraphQL and structured transport
    /// failures.
    pub fn normalized(&self) -> Option<&NormalizedError> {
        match self {
            Self::GraphQl(n) | Self::Transport(n) => Some(n),
            _ => None,
        }
    }

    /// Short machine-readable category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::GraphQl(_) => "graphql",
            Self::Transport(_) | Self::Unstructured(_) => "transport",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::MissingVariable { .. } => "missing_variable",
        }
    }

    /// Whether a caller could reasonably retry later.
    ///
    /// Advisory only: nothing in this crate retries automatically.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::GraphQl(n) => n.error_type.as_deref() == Some(RATE_LIMITED_TYPE),
            Self::Transport(n) => n
                .status_code
                .map(|s| s == 429 || s >= 500)
                .unwrap_or(false),
            Self::Unstructured(failure) => failure.is_timeout(),
            Self::MalformedResponse { .. } | Self::MissingVariable { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str, kind: Option<&str>) -> GraphQlErrorEntry {
        GraphQlErrorEntry {
            message: message.to_string(),
            error_type: kind.map(str::to_string),
            path: None,
            locations: None,
        }
    }

    #[test]
    fn test_normalize_status_with_body() {
        let failure = TransportFailure::Status {
            status: 503,
            body: "service unavailable".to_string(),
            headers: BTreeMap::new(),
        };

        let normalized = normalize(failure).unwrap();
        assert_eq!(normalized.status_code, Some(503));
        assert_eq!(normalized.response_body.as_deref(), Some("service unavailable"));
        assert_eq!(normalized.response_headers, None);
        assert_eq!(normalized.error_type, None);
        assert_eq!(normalized.full_details["status_code"], 503);
        assert_eq!(normalized.full_details["response_body"], "service unavailable");
        assert!(normalized.full_details.get("response_headers").is_none());
    }

    #[test]
    fn test_normalize_status_prefers_json_message() {
        let mut headers = BTreeMap::new();
        headers.insert("x-ratelimit-remaining".to_string(), "0".to_string());
        let failure = TransportFailure::Status {
            status: 403,
            body: r#"{"message": "API rate limit exceeded", "documentation_url": "https://docs"}"#
                .to_string(),
            headers,
        };

        let normalized = normalize(failure).unwrap();
        assert_eq!(normalized.message, "HTTP 403: API rate limit exceeded");
        assert_eq!(
            normalized.response_headers.unwrap()["x-ratelimit-remaining"],
            "0"
        );
        assert_eq!(
            normalized.full_details["response_headers"]["x-ratelimit-remaining"],
            "0"
        );
    }

    #[test]
    fn test_normalize_status_with_empty_body_uses_reason() {
        let failure = TransportFailure::Status {
            status: 502,
            body: String::new(),
            headers: BTreeMap::new(),
        };
        let normalized = normalize(failure).unwrap();
        assert_eq!(normalized.message, "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_normalize_malformed_body() {
        let failure = TransportFailure::MalformedBody {
            status: 200,
            body: "<html>oops</html>".to_string(),
            reason: "expected value at line 1 column 1".to_string(),
        };
        let normalized = normalize(failure).unwrap();
        assert_eq!(normalized.status_code, Some(200));
        assert_eq!(normalized.response_body.as_deref(), Some("<html>oops</html>"));
    }

    #[test]
    fn test_normalize_request_with_status() {
        let failure = TransportFailure::Request {
            message: "HTTP status client error (401 Unauthorized)".to_string(),
            status: Some(401),
            timeout: false,
            source: None,
        };
        let normalized = normalize(failure).unwrap();
        assert_eq!(normalized.status_code, Some(401));
        assert_eq!(normalized.response_body, None);
    }

    #[test]
    fn test_normalize_request_with_embedded_json() {
        let failure = TransportFailure::request(
            r#"upstream rejected request: {"message": "Bad credentials"} (retry later)"#,
        );
        let normalized = normalize(failure).unwrap();
        assert_eq!(normalized.message, "Bad credentials");
        assert_eq!(
            normalized.response_body.as_deref(),
            Some(r#"{"message": "Bad credentials"}"#)
        );
        assert_eq!(normalized.status_code, None);
    }

    #[test]
    fn test_normalize_opaque_failure_is_returned_unchanged() {
        let failure = TransportFailure::request("connection refused");
        let original = normalize(failure).unwrap_err();
        assert_eq!(original.to_string(), "connection refused");
        assert!(matches!(original, TransportFailure::Request { status: None, .. }));
    }

    #[test]
    fn test_opaque_failure_converts_to_unstructured() {
        let err = ApiError::from(TransportFailure::request("dns error: no such host"));
        assert!(matches!(err, ApiError::Unstructured(_)));
        assert_eq!(err.to_string(), "dns error: no such host");
        assert!(err.normalized().is_none());
    }

    #[test]
    fn test_graphql_errors_use_first_entry() {
        let errors = vec![
            entry("Could not resolve to an Organization", Some("NOT_FOUND")),
            entry("second", Some("FORBIDDEN")),
        ];
        let normalized = NormalizedError::from_graphql(&errors);
        assert_eq!(normalized.message, "Could not resolve to an Organization");
        assert_eq!(normalized.error_type.as_deref(), Some("NOT_FOUND"));
        assert_eq!(normalized.status_code, None);
        assert_eq!(normalized.response_body, None);
        assert_eq!(normalized.response_headers, None);
        assert_eq!(
            normalized.full_details["graphql_errors"]
                .as_array()
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_graphql_error_without_message_still_has_one() {
        let normalized = NormalizedError::from_graphql(&[entry("  ", None)]);
        assert_eq!(normalized.message, "GraphQL request returned errors");
    }

    #[test]
    fn test_is_retryable() {
        let unavailable = ApiError::from(TransportFailure::Status {
            status: 503,
            body: String::new(),
            headers: BTreeMap::new(),
        });
        assert!(unavailable.is_retryable());

        let unauthorized = ApiError::from(TransportFailure::Status {
            status: 401,
            body: String::new(),
            headers: BTreeMap::new(),
        });
        assert!(!unauthorized.is_retryable());

        let rate_limited = ApiError::graphql(&[entry("slow down", Some(RATE_LIMITED_TYPE))]);
        assert!(rate_limited.is_retryable());
        assert_eq!(rate_limited.category(), "graphql");
    }
}
