//
//  github-explorer
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Table rendering built on `comfy_table`.

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

/// A table with the standard preset and dynamic column widths.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Builder for summary tables.
///
/// ```rust
/// use github_explorer::output::TableBuilder;
///
/// let table = TableBuilder::new()
///     .color(false)
///     .headers(["Organisation", "Records"])
///     .numeric_columns([1])
///     .row(["acme", "42"])
///     .build();
/// assert!(table.to_string().contains("acme"));
/// ```
pub struct TableBuilder {
    table: Table,
    color: bool,
    numeric: Vec<usize>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
            numeric: Vec::new(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let color = self.color;
        let cells: Vec<Cell> = headers
            .into_iter()
            .map(|h| {
                let cell = Cell::new(h.into());
                if color {
                    cell.fg(Color::Cyan)
                } else {
                    cell
                }
            })
            .collect();
        self.table.set_header(cells);
        self
    }

    /// Right-aligns the given column indices.
    pub fn numeric_columns<I: IntoIterator<Item = usize>>(mut self, columns: I) -> Self {
        self.numeric = columns.into_iter().collect();
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let numeric = &self.numeric;
        let row: Vec<Cell> = cells
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                let cell = Cell::new(s.into());
                if numeric.contains(&i) {
                    cell.set_alignment(CellAlignment::Right)
                } else {
                    cell
                }
            })
            .collect();
        self.table.add_row(row);
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Styles a run status: `persisted` green and `dry run` yellow.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;

    match status {
        "persisted" => style(status).green().to_string(),
        "dry run" => style(status).yellow().to_string(),
        _ => status.to_string(),
    }
}
