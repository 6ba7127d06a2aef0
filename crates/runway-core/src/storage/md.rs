//! Markdown export functionality

use crate::document::Document;
use std::fmt::Write as _;
use std::path::Path;

/// Write the projection table to a markdown file
pub fn write_markdown(path: &Path, doc: &Document) -> std::io::Result<()> {
    std::fs::write(path, write_markdown_content(doc))
}

/// Render the projection as markdown: one table, a section row per row type.
pub fn write_markdown_content(doc: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", doc.model.name);
    let _ = writeln!(out);

    if let Some(desc) = &doc.model.description {
        let _ = writeln!(out, "{}", escape_markdown(desc));
        let _ = writeln!(out);
    }

    let groups = doc.grouped_rows();
    if groups.is_empty() || doc.model.num_periods == 0 {
        let _ = writeln!(out, "*Empty projection*");
        return out;
    }

    let labels = doc.period_labels();

    out.push_str("| Category |");
    for label in &labels {
        let _ = write!(out, " {} |", label);
    }
    out.push('\n');

    out.push_str("|---|");
    for _ in &labels {
        out.push_str("---:|");
    }
    out.push('\n');

    for group in groups {
        let _ = write!(out, "| **{}** |", group.title);
        for _ in &labels {
            out.push_str(" |");
        }
        out.push('\n');

        for row in group.rows {
            let _ = write!(out, "| {} |", escape_markdown(&row.label));
            for period in 0..labels.len() {
                let _ = write!(out, " {} |", escape_markdown(&doc.display_value(row, period)));
            }
            out.push('\n');
        }
    }

    if let Some(report) = &doc.last_report
        && !report.converged()
    {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Note: periods {:?} hit the pass limit before settling.",
            report.exhausted_periods()
        );
    }

    out
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}
