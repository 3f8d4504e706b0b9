//
//  github-explorer
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # GitHub Explorer Library
//!
//! Harvests organisation data from a GitHub Enterprise through the GraphQL
//! API and persists it as JSON documents for reporting.
//!
//! ## Overview
//!
//! The `explorer-agent` binary runs one named report (members, teams,
//! repositories, owners, contributions, inactive users, two-factor status,
//! team membership) for every configured organisation, walking every page
//! of every query, and writes the assembled result to a document store.
//! The same library answers live single-entity lookups and typed reads of
//! persisted reports.
//!
//! ## Features
//!
//! - **Cursor pagination**: follows `pageInfo.endCursor` until
//!   `hasNextPage` is false, with a fixed pause between pages
//! - **Error normalization**: GraphQL errors and transport failures carry
//!   message, type, status code, body and headers when they exist
//! - **Chunked persistence**: collections over 500 records are split into
//!   numbered chunk documents and reassembled transparently on read
//! - **All-or-nothing runs**: a report persists only when every page of every
//!   organisation succeeded
//!
//! ## Module Structure
//!
//! - [`api`]: GraphQL transport, query catalog, paginator and errors
//! - [`models`]: User, Team, Repository and access records
//! - [`reports`]: Report assembly and live lookups
//! - [`store`]: Document stores, chunking and persisted-report reads
//! - [`config`]: Environment configuration
//! - [`cli`]: Agent command line
//! - [`output`]: Table and JSON output
//! - [`util`]: Time and string helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use github_explorer::api::{GraphQlClient, Paginator, QueryCatalog};
//! use github_explorer::reports::GitHubExplorer;
//! use github_explorer::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let client = GraphQlClient::from_config(&config)?;
//! let paginator = Paginator::new(Arc::new(client), Arc::new(QueryCatalog::new()));
//! let explorer = GitHubExplorer::new(paginator, &config.enterprise, &config.organisations[0]);
//!
//! if let Some(repository) = explorer.repository("api").await? {
//!     println!("{} has {} stars", repository.name, repository.stargazer_count.unwrap_or(0));
//! }
//! # Ok(())
//! # }
//! ```

/// Agent command line.
///
/// Parses the report name and flags with clap, loads configuration and
/// drives the run across organisations.
pub mod cli;

/// GitHub GraphQL API access.
///
/// The transport posts one query per call, the catalog holds the fixed set
/// of query templates, and the paginator walks cursor-paginated
/// connections. Failures surface as [`api::ApiError`].
pub mod api;

/// Environment configuration, validated at startup.
pub mod config;

/// Domain records assembled from API responses.
pub mod models;

/// Output formatting (Table, JSON).
pub mod output;

/// Report assembly and live lookups.
pub mod reports;

/// Document persistence.
///
/// A raw [`store::DocumentStore`] capability with memory and file backends,
/// the [`store::ChunkedStore`] adapter and typed [`store::ReportStore`]
/// reads.
pub mod store;

/// Utility functions.
pub mod util;

pub use cli::Cli;
pub use config::Config;
pub use reports::{GitHubExplorer, ReportName};

/// Application name, used in the user agent and data directory.
pub const APP_NAME: &str = "github-explorer";

/// Current version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process exit codes.
pub mod exit_codes {
    /// The report ran and was persisted.
    pub const SUCCESS: i32 = 0;

    /// Configuration, API, store or unknown-report failure.
    pub const ERROR: i32 = 1;

    /// Invalid command-line usage (clap's own code).
    pub const USAGE: i32 = 2;
}
