//! Presentation helpers: grouping, column headings and cell text.

use runway_engine::engine::{Row, RowType, ValueType, format_cell, period_label};

use super::Document;

/// Section order and headings of the projection table.
const SECTIONS: [(RowType, &str); 5] = [
    (RowType::Income, "Income"),
    (RowType::Expense, "Expenses"),
    (RowType::Debt, "Debt"),
    (RowType::Investment, "Investments"),
    (RowType::Calculation, "Net Calculations"),
];

/// Rows of one type, in display order.
#[derive(Debug)]
pub struct RowGroup<'a> {
    pub row_type: RowType,
    pub title: &'static str,
    pub rows: Vec<&'a Row>,
}

impl Document {
    /// Non-empty sections in presentation order.
    pub fn grouped_rows(&self) -> Vec<RowGroup<'_>> {
        SECTIONS
            .iter()
            .filter_map(|&(row_type, title)| {
                let mut rows: Vec<&Row> = self
                    .grid
                    .rows()
                    .iter()
                    .filter(|r| r.row_type == row_type)
                    .collect();
                if rows.is_empty() {
                    return None;
                }
                rows.sort_by_key(|r| r.display_order);
                Some(RowGroup {
                    row_type,
                    title,
                    rows,
                })
            })
            .collect()
    }

    pub fn period_label(&self, period: usize) -> String {
        period_label(period, self.model.view_mode)
    }

    /// Column headings for every period.
    pub fn period_labels(&self) -> Vec<String> {
        (0..self.model.num_periods)
            .map(|p| self.period_label(p))
            .collect()
    }

    /// Cell text for the current view; `-` when the row has no value there.
    pub fn display_value(&self, row: &Row, period: usize) -> String {
        match row.cell(period) {
            Some(cell) => format_cell(cell, self.model.view_mode, self.model.period_basis),
            None => "-".to_string(),
        }
    }

    /// Whether the cell accepts direct edits.
    pub fn is_cell_editable(&self, row: &Row, period: usize) -> bool {
        row.is_editable
            && row
                .cell(period)
                .is_some_and(|c| c.value_type == ValueType::Input)
    }
}
