//
//  github-explorer
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Rendering of agent results on the terminal.
//!
//! - **Table format**: a human-readable summary of each organisation's run
//! - **JSON format**: the assembled report data, for piping into other tools
//!
//! Diagnostics (errors, warnings) always go to stderr so that stdout carries
//! only the requested output.
//!
//! ## Example
//!
//! ```rust,ignore
//! use github_explorer::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&summary)?;
//! writer.write_warning("Dry run: nothing persisted");
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use serde::Serialize;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Summary tables for terminal use.
    #[default]
    Table,
    /// Pretty-printed JSON for scripts.
    Json,
}

impl OutputFormat {
    /// `Json` when `json` is set, `Table` otherwise.
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Writes values in the selected format and styled status lines.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled_stderr(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes `value` as JSON or as its table rendering.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Table => value.print_table(console::colors_enabled()),
        }
        Ok(())
    }

    pub fn write_warning(&self, msg: &str) {
        use console::style;

        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Success line on stderr, so `--json` output stays parseable.
    pub fn write_success(&self, msg: &str) {
        use console::style;

        if self.color {
            eprintln!("{} {}", style("✓").green().bold(), msg);
        } else {
            eprintln!("✓ {}", msg);
        }
    }
}

/// Types with a table rendering.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// Prints a bold header with an underline.
pub fn print_header(text: &str) {
    use console::style;

    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `key: value` line with a dimmed key.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;

    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
