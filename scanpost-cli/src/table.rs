//! Severity summary table
//!
//! Turns a [`SeveritySummary`] into a fixed-width table: one row per target,
//! one column per severity observed anywhere in the report, a totals footer
//! and a caption with the grand total.
//!
//! ```text
//! +----------------+------+-----+
//! | TARGET         | HIGH | LOW |
//! +----------------+------+-----+
//! | app            |    2 |   1 |
//! +----------------+------+-----+
//! | TOTAL SEVERITY |    2 |   1 |
//! +----------------+------+-----+
//! Total severity: 3
//! ```
//!
//! Widths are measured in terminal columns, and control characters in
//! labels are printed escaped (`\n`) so every row stays on one line.

use std::io::Write;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use scanpost_core::summary::SeveritySummary;

use crate::output::Render;

/// Header of the first column.
pub const TARGET_HEADER: &str = "TARGET";

/// Label of the footer row.
pub const TOTAL_LABEL: &str = "TOTAL SEVERITY";

/// Display-ready severity counts.
///
/// `rows[i].counts[j]` and `totals[j]` are aligned with `severities[j]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityTable {
    pub severities: Vec<String>,
    pub rows: Vec<TargetRow>,
    pub totals: Vec<usize>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetRow {
    pub target: String,
    pub counts: Vec<usize>,
}

impl SeverityTable {
    /// Builds the table; missing counts become 0.
    pub fn from_summary(summary: &SeveritySummary) -> Self {
        let severities = summary.severities();

        let rows = summary
            .targets()
            .map(|target| TargetRow {
                target: target.to_owned(),
                counts: severities
                    .iter()
                    .map(|severity| summary.count(target, severity))
                    .collect(),
            })
            .collect();

        let totals = severities.iter().map(|s| summary.total(s)).collect();

        Self {
            severities,
            rows,
            totals,
            total: summary.grand_total(),
        }
    }

    /// Column widths in terminal columns, target column first.
    fn column_widths(&self) -> Vec<usize> {
        let target_width = self
            .rows
            .iter()
            .map(|r| display_width(&r.target))
            .chain([TARGET_HEADER.len(), TOTAL_LABEL.len()])
            .max()
            .unwrap_or(TOTAL_LABEL.len());

        let mut widths = vec![target_width];
        for (j, severity) in self.severities.iter().enumerate() {
            let cells = self
                .rows
                .iter()
                .map(|r| r.counts[j])
                .chain([self.totals[j]])
                .map(digits);
            let width = cells.chain([display_width(severity)]).max().unwrap_or(1);
            widths.push(width);
        }
        widths
    }
}

impl Render for SeverityTable {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let widths = self.column_widths();
        let border = border_line(&widths);

        let mut header = format!("| {} |", pad(TARGET_HEADER, widths[0]));
        for (severity, &width) in self.severities.iter().zip(&widths[1..]) {
            header.push_str(&format!(" {} |", pad(severity, width)));
        }

        writeln!(w, "{border}")?;
        writeln!(w, "{}", header.bold())?;
        writeln!(w, "{border}")?;

        for row in &self.rows {
            writeln!(w, "{}", count_line(&row.target, &row.counts, &widths))?;
        }
        if !self.rows.is_empty() {
            writeln!(w, "{border}")?;
        }

        writeln!(
            w,
            "{}",
            count_line(TOTAL_LABEL, &self.totals, &widths).bold()
        )?;
        writeln!(w, "{border}")?;

        let caption = format!("Total severity: {}", self.total);
        if self.total > 0 {
            writeln!(w, "{}", caption.red().bold())?;
        } else {
            writeln!(w, "{}", caption.green().bold())?;
        }

        Ok(())
    }
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn count_line(label: &str, counts: &[usize], widths: &[usize]) -> String {
    let mut line = format!("| {} |", pad(label, widths[0]));
    for (count, &width) in counts.iter().zip(&widths[1..]) {
        line.push_str(&format!(" {count:>width$} |"));
    }
    line
}

fn digits(n: usize) -> usize {
    n.to_string().len()
}

/// Label as printed: control characters escaped.
fn printable(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

fn display_width(label: &str) -> usize {
    printable(label).width()
}

/// Left-aligns `label` to `width` terminal columns.
fn pad(label: &str, width: usize) -> String {
    let label = printable(label);
    let fill = width.saturating_sub(label.width());
    format!("{label}{}", " ".repeat(fill))
}
