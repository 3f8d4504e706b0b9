//
//  github-explorer
//  models/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Domain records assembled from GraphQL responses.
//!
//! These are the shapes persisted to the document store and read back by
//! the reporting side. They serialize with camelCase keys and omit fields
//! that were not part of the query that produced them, so a `User` from the
//! owners report carries only `login` and `name` while one from the
//! contributions report carries its counters.
//!
//! # Overview
//!
//! | Type | Identity |
//! |------|----------|
//! | [`User`] | `login` |
//! | [`Team`] | `slug` within an organisation |
//! | [`Repository`] | `name` within an organisation |
//! | [`AccessEntry`] | `(login, repository)` |
//!
//! Records are built once per response and never mutated afterwards.

mod access;
mod repository;
mod team;
mod user;

pub use access::*;
pub use repository::*;
pub use team::*;
pub use user::*;
