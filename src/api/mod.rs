//
//  github-explorer
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module talks to the GitHub GraphQL API of an enterprise and its
//! organisations.
//!
//! ## Architecture
//!
//! - [`client`]: HTTP transport with authentication and raw failure capture
//! - [`queries`]: The fixed catalog of named GraphQL queries
//! - [`common`]: Shared types (pagination, errors, normalization)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use github_explorer::api::{GraphQlClient, Paginator, QueryCatalog};
//!
//! let client = GraphQlClient::new("https://api.github.com", "your-token")
//!     .expect("Failed to create client");
//! let paginator = Paginator::new(Arc::new(client), Arc::new(QueryCatalog::new()));
//! ```
//!
//! ## Error Handling
//!
//! API errors are returned as [`ApiError`] variants:
//!
//! - `GraphQl`: the response carried an `errors` array
//! - `Transport`: HTTP failure with status, body and headers where available
//! - `Unstructured`: a transport failure with nothing recoverable
//! - `MalformedResponse`: the response did not have the expected shape
//! - `MissingVariable`: a query was called without a required variable

/// HTTP transport for the GraphQL endpoint.
pub mod client;

/// Common types: errors, normalization and pagination.
pub mod common;

/// Named GraphQL query templates.
pub mod queries;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{GraphQlClient, GraphQlTransport};
pub use common::{ApiError, NormalizedError, Paginator};
pub use queries::{QueryCatalog, QueryName};
