//
//  github-explorer
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the GitHub GraphQL layer
//!
//! This module holds what every query shares: the error taxonomy with its
//! normalizer, and the cursor paginator that drives catalog queries.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all GraphQL operations
//! - [`NormalizedError`] - Diagnostics recovered from a failure
//! - [`TransportFailure`] - Raw failure shapes from the HTTP layer
//! - [`Paginator`] - Cursor pagination over connections
//!
//! # Example
//!
//! ```rust
//! use github_explorer::api::common::ApiError;
//!
//! fn describe(err: &ApiError) -> String {
//!     match err.normalized() {
//!         Some(n) => format!("{} [{}]", n.message, err.category()),
//!         None => err.to_string(),
//!     }
//! }
//! ```

mod error;
mod pagination;

pub use error::*;
pub use pagination::*;
