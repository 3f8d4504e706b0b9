//
//  github-explorer
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers shared by the reports and the agent command line.
//!
//! ## Categories
//!
//! - **Time Utilities**: [`inactive_cutoff`], [`format_timestamp`], [`format_duration`]
//! - **String Utilities**: [`truncate`]
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use github_explorer::util::{format_timestamp, inactive_cutoff, INACTIVE_MONTHS};
//!
//! let now = Utc.with_ymd_and_hms(2026, 8, 31, 12, 0, 0).unwrap();
//! let cutoff = inactive_cutoff(now, INACTIVE_MONTHS);
//! assert_eq!(format_timestamp(cutoff), "2026-02-28T12:00:00Z");
//! ```

use std::time::Duration;

use chrono::{DateTime, Months, SecondsFormat, Utc};

/// Months without contributions after which a user counts as inactive.
pub const INACTIVE_MONTHS: u32 = 6;

/// Start of the inactivity window: `now` minus `months` calendar months.
///
/// When the target month is shorter, the day is clamped to its last day
/// (31 August minus six months is 28 February). Dates that cannot be
/// represented fall back to the earliest representable instant.
pub fn inactive_cutoff(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Formats an instant as RFC 3339 with second precision and a `Z` suffix,
/// the form GitHub's `DateTime` scalar accepts.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Formats a duration as a short human-readable string.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use github_explorer::util::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(450)), "450ms");
/// assert_eq!(format_duration(Duration::from_secs(45)), "45s");
/// assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
/// assert_eq!(format_duration(Duration::from_secs(3665)), "1h 1m");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs == 0 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Truncates a string to at most `max_chars` characters, ending with `...`
/// when shortened.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return s.chars().take(max_chars).collect();
    }
    let kept: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}
