//! Plain-text rendering of a projection for the terminal.

use runway_core::Document;

/// Render the document as aligned columns, one section per row type.
pub fn render_table(doc: &Document) -> String {
    let labels = doc.period_labels();
    let groups = doc.grouped_rows();

    let mut lines: Vec<Vec<String>> = Vec::new();
    let mut header = vec![String::new()];
    header.extend(labels.iter().cloned());
    lines.push(header);

    for group in &groups {
        lines.push(vec![format!("[{}]", group.title)]);
        for row in &group.rows {
            let mut line = vec![format!("  {}", row.label)];
            line.extend((0..labels.len()).map(|p| doc.display_value(row, p)));
            lines.push(line);
        }
    }

    let columns = labels.len() + 1;
    let mut widths = vec![0usize; columns];
    for line in &lines {
        // Section headings span the row and do not size the value columns.
        if line.len() == 1 {
            continue;
        }
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&doc.model.name);
    out.push('\n');
    for line in &lines {
        if line.len() == 1 {
            out.push_str(&line[0]);
            out.push('\n');
            continue;
        }
        let mut text = String::new();
        for (i, cell) in line.iter().enumerate() {
            if i == 0 {
                text.push_str(&format!("{:<width$}", cell, width = widths[0]));
            } else {
                text.push_str(&format!("  {:>width$}", cell, width = widths[i]));
            }
        }
        out.push_str(text.trim_end());
        out.push('\n');
    }
    out
}
