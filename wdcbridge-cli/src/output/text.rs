//! Text output formatting.

use serde_json::Value;
use wdcbridge_core::{ColumnDescriptor, ReportItem, Row};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the "please sign in" hint.
    pub fn format_sign_in(&self, authorize_url: &str) -> String {
        [
            self.bold("Not signed in."),
            format!("Open {} in a browser,", self.cyan(authorize_url)),
            "then run `wdcbridge login --callback-url <redirected URL>`.".to_string(),
        ]
        .join("\n")
    }

    /// Formats the report selector contents.
    pub fn format_reports(&self, profile_id: Option<&str>, reports: &[ReportItem]) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.bold("Profile:"),
            profile_id.unwrap_or("-")
        )];

        if reports.is_empty() {
            lines.push(self.dim("No reports available"));
            return lines.join("\n");
        }

        let width = reports.iter().map(|r| r.id.len()).max().unwrap_or(0);
        lines.push(String::new());
        for report in reports {
            lines.push(format!("  {:<width$}  {}", report.id, report.name));
        }
        lines.join("\n")
    }

    /// Formats column descriptors, one per line, in schema order.
    pub fn format_headers(&self, headers: &[ColumnDescriptor]) -> String {
        let width = headers.iter().map(|h| h.name.len()).max().unwrap_or(0);
        headers
            .iter()
            .map(|h| {
                let line = format!("{:<width$}  {}", h.name, h.column_type.as_str());
                if h.is_incremental() {
                    format!("{line}  {}", self.dim("(incremental)"))
                } else {
                    line
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats rows as a tab-separated table.
    ///
    /// Columns follow first appearance across rows; missing and null cells
    /// print empty.
    pub fn format_rows(&self, rows: &[Row]) -> String {
        let columns = Self::row_columns(rows);
        if columns.is_empty() {
            return self.dim(&format!("{} rows", rows.len()));
        }

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(self.bold(&columns.join("\t")));
        for row in rows {
            let cells: Vec<String> = columns
                .iter()
                .map(|c| row.get(c.as_str()).map(Self::cell).unwrap_or_default())
                .collect();
            lines.push(cells.join("\t"));
        }
        lines.join("\n")
    }

    fn row_columns(rows: &[Row]) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for key in rows.iter().flat_map(|row| row.keys()) {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
        columns
    }

    fn cell(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    // ------------------------------------------------------------------------
    // Color helpers
    // ------------------------------------------------------------------------

    fn bold(&self, s: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    fn dim(&self, s: &str) -> String {
        if self.use_colors {
            format!("{DIM}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    fn cyan(&self, s: &str) -> String {
        if self.use_colors {
            format!("{CYAN}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}
