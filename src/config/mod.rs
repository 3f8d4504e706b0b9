//
//  github-explorer
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! The agent is configured entirely through environment variables, validated
//! once at startup before any network activity.
//!
//! ## Variables
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `GITHUB_API_BASE_URI` | yes | |
//! | `GITHUB_ENTERPRISE_NAME` | yes | |
//! | `GITHUB_ORGANISATIONS` | yes, or `GITHUB_ORGANISATION_NAME` | |
//! | `GITHUB_TOKEN` | yes | |
//! | `EXPLORER_STORE_DIR` | no | platform data directory |
//! | `EXPLORER_PAGE_PAUSE_MS` | no | `500` |
//! | `EXPLORER_CHUNK_SIZE` | no | `500` |
//! | `EXPLORER_LIGHT_PAGE_SIZE` | no | `100` |
//! | `EXPLORER_HEAVY_PAGE_SIZE` | no | `10` |
//!
//! `GITHUB_ORGANISATIONS` is a comma-separated list; blank entries are
//! ignored.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use github_explorer::config::Config;
//!
//! let config = Config::from_env()?;
//! for organisation in &config.organisations {
//!     println!("Exploring {organisation}");
//! }
//! # Ok::<(), github_explorer::config::ConfigError>(())
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use thiserror::Error;
use url::Url;

use crate::api::common::DEFAULT_PAGE_PAUSE;
use crate::api::queries::{HEAVY_PAGE_SIZE, LIGHT_PAGE_SIZE};
use crate::store::CHUNK_SIZE;

pub const API_BASE_URI_VAR: &str = "GITHUB_API_BASE_URI";
pub const ENTERPRISE_VAR: &str = "GITHUB_ENTERPRISE_NAME";
pub const ORGANISATIONS_VAR: &str = "GITHUB_ORGANISATIONS";
pub const ORGANISATION_VAR: &str = "GITHUB_ORGANISATION_NAME";
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const STORE_DIR_VAR: &str = "EXPLORER_STORE_DIR";
pub const PAGE_PAUSE_VAR: &str = "EXPLORER_PAGE_PAUSE_MS";
pub const CHUNK_SIZE_VAR: &str = "EXPLORER_CHUNK_SIZE";
pub const LIGHT_PAGE_SIZE_VAR: &str = "EXPLORER_LIGHT_PAGE_SIZE";
pub const HEAVY_PAGE_SIZE_VAR: &str = "EXPLORER_HEAVY_PAGE_SIZE";

/// A required variable is absent or a value cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {variable}")]
    Missing { variable: String },

    #[error("Invalid value for {variable}: {reason}")]
    Invalid { variable: String, reason: String },
}

impl ConfigError {
    fn missing(variable: &str) -> Self {
        Self::Missing {
            variable: variable.to_string(),
        }
    }

    fn invalid(variable: &str, reason: impl fmt::Display) -> Self {
        Self::Invalid {
            variable: variable.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Validated agent configuration.
#[derive(Clone)]
pub struct Config {
    /// API base URI; the GraphQL endpoint is `<base>/graphql`.
    pub api_base_uri: Url,

    /// Enterprise slug.
    pub enterprise: String,

    /// Organisation logins, at least one, in configured order.
    pub organisations: Vec<String>,

    pub token: String,

    /// Root of the file document store, `None` for the platform default.
    pub store_dir: Option<PathBuf>,

    /// Pause between pages of one query.
    pub page_pause: Duration,

    /// Collections longer than this are chunked when persisted.
    pub chunk_size: usize,

    pub light_page_size: u32,
    pub heavy_page_size: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_base_uri", &self.api_base_uri.as_str())
            .field("enterprise", &self.enterprise)
            .field("organisations", &self.organisations)
            .field("token", &"<redacted>")
            .field("store_dir", &self.store_dir)
            .field("page_pause", &self.page_pause)
            .field("chunk_size", &self.chunk_size)
            .field("light_page_size", &self.light_page_size)
            .field("heavy_page_size", &self.heavy_page_size)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which returns a variable's
    /// value or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |name: &str| get(name).ok_or_else(|| ConfigError::missing(name));

        let raw_uri = require(API_BASE_URI_VAR)?;
        let api_base_uri =
            Url::parse(&raw_uri).map_err(|e| ConfigError::invalid(API_BASE_URI_VAR, e))?;
        if !matches!(api_base_uri.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                API_BASE_URI_VAR,
                format!("unsupported scheme '{}'", api_base_uri.scheme()),
            ));
        }

        let enterprise = require(ENTERPRISE_VAR)?;

        let organisations = match get(ORGANISATIONS_VAR) {
            Some(list) => parse_organisations(&list),
            None => get(ORGANISATION_VAR).into_iter().collect(),
        };
        if organisations.is_empty() {
            return Err(ConfigError::missing(ORGANISATIONS_VAR));
        }

        let token = require(TOKEN_VAR)?;

        let page_pause_ms: u64 = parse_or(get(PAGE_PAUSE_VAR), PAGE_PAUSE_VAR, DEFAULT_PAGE_PAUSE.as_millis() as u64)?;
        let chunk_size: usize = parse_or(get(CHUNK_SIZE_VAR), CHUNK_SIZE_VAR, CHUNK_SIZE)?;
        let light_page_size: u32 = parse_or(get(LIGHT_PAGE_SIZE_VAR), LIGHT_PAGE_SIZE_VAR, LIGHT_PAGE_SIZE)?;
        let heavy_page_size: u32 = parse_or(get(HEAVY_PAGE_SIZE_VAR), HEAVY_PAGE_SIZE_VAR, HEAVY_PAGE_SIZE)?;

        if chunk_size == 0 {
            return Err(ConfigError::invalid(CHUNK_SIZE_VAR, "must be at least 1"));
        }
        for (variable, size) in [
            (LIGHT_PAGE_SIZE_VAR, light_page_size),
            (HEAVY_PAGE_SIZE_VAR, heavy_page_size),
        ] {
            if !(1..=100).contains(&size) {
                return Err(ConfigError::invalid(variable, "must be between 1 and 100"));
            }
        }

        Ok(Self {
            api_base_uri,
            enterprise,
            organisations,
            token,
            store_dir: get(STORE_DIR_VAR).map(PathBuf::from),
            page_pause: Duration::from_millis(page_pause_ms),
            chunk_size,
            light_page_size,
            heavy_page_size,
        })
    }

    /// Root directory of the document store.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.store_dir {
            Some(dir) => Ok(dir.clone()),
            None => crate::store::default_root(),
        }
    }
}

/// Splits a comma-separated organisation list, dropping blank entries.
pub fn parse_organisations(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<T>(value: Option<String>, variable: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match value {
        Some(raw) => raw.parse().map_err(|e| ConfigError::invalid(variable, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            (API_BASE_URI_VAR, "https://api.github.com"),
            (ENTERPRISE_VAR, "acme-enterprise"),
            (ORGANISATIONS_VAR, "acme, globex,,"),
            (TOKEN_VAR, "ghp_secret"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&required())).unwrap();

        assert_eq!(config.api_base_uri.as_str(), "https://api.github.com/");
        assert_eq!(config.enterprise, "acme-enterprise");
        assert_eq!(config.organisations, ["acme", "globex"]);
        assert_eq!(config.page_pause, Duration::from_millis(500));
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.light_page_size, 100);
        assert_eq!(config.heavy_page_size, 10);
        assert!(config.store_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let mut vars = required();
        vars.extend([
            (STORE_DIR_VAR, "/var/lib/explorer"),
            (PAGE_PAUSE_VAR, "0"),
            (CHUNK_SIZE_VAR, "250"),
            (HEAVY_PAGE_SIZE_VAR, "5"),
        ]);
        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.page_pause, Duration::ZERO);
        assert_eq!(config.chunk_size, 250);
        assert_eq!(config.heavy_page_size, 5);
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/var/lib/explorer"));
    }

    #[test]
    fn test_single_organisation_fallback() {
        let mut vars: Vec<_> = required()
            .into_iter()
            .filter(|(k, _)| *k != ORGANISATIONS_VAR)
            .collect();
        vars.push((ORGANISATION_VAR, "acme"));

        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.organisations, ["acme"]);
    }

    #[test]
    fn test_missing_required() {
        for variable in [API_BASE_URI_VAR, ENTERPRISE_VAR, ORGANISATIONS_VAR, TOKEN_VAR] {
            let vars: Vec<_> = required().into_iter().filter(|(k, _)| *k != variable).collect();
            let err = Config::from_lookup(lookup(&vars)).unwrap_err();
            assert_eq!(err, ConfigError::missing(variable), "{variable}");
        }
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let mut vars = required();
        vars.push((TOKEN_VAR, "   "));
        // Later entries win in the lookup map.
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert_eq!(err, ConfigError::missing(TOKEN_VAR));

        let mut vars = required();
        vars.push((ORGANISATIONS_VAR, " , "));
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert_eq!(err, ConfigError::missing(ORGANISATIONS_VAR));
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            (API_BASE_URI_VAR, "not a url"),
            (API_BASE_URI_VAR, "ftp://example.com"),
            (PAGE_PAUSE_VAR, "soon"),
            (CHUNK_SIZE_VAR, "0"),
            (LIGHT_PAGE_SIZE_VAR, "101"),
        ];
        for (variable, value) in cases {
            let mut vars = required();
            vars.push((variable, value));
            let err = Config::from_lookup(lookup(&vars)).unwrap_err();
            assert!(
                matches!(&err, ConfigError::Invalid { variable: v, .. } if v == variable),
                "{variable}={value}: {err}"
            );
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::from_lookup(lookup(&required())).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
