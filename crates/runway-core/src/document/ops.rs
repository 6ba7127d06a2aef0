//! Edits to a loaded document.

use runway_engine::engine::{Cell, DisplayFormat, Row, RowType, ValueType};

use super::Document;
use crate::error::{Result, RunwayError};

impl Document {
    /// Set an input cell. Both the input and the calculated value are written
    /// so the new figure is visible before the next calculation.
    pub fn set_input(&mut self, category: &str, period: usize, value: f64) -> Result<()> {
        let row = self
            .grid
            .row_by_category(category)
            .ok_or_else(|| RunwayError::RowNotFound(category.to_string()))?;
        if !row.is_editable {
            return Err(RunwayError::NotEditable(category.to_string()));
        }

        let cell = self
            .grid
            .cell_mut(category, period)
            .ok_or_else(|| RunwayError::CellNotFound {
                category: category.to_string(),
                period,
            })?;
        if cell.value_type != ValueType::Input {
            return Err(RunwayError::NotAnInput {
                category: category.to_string(),
                period,
            });
        }

        cell.input_value = Some(value);
        cell.calculated_value = Some(value);
        self.modified = true;
        self.model.touch();
        Ok(())
    }

    /// Append a row evaluating `formula` in every period. Returns the new row id.
    pub fn add_formula_row(
        &mut self,
        category: &str,
        label: &str,
        row_type: RowType,
        formula: &str,
        display_format: DisplayFormat,
    ) -> Result<String> {
        if self.grid.row_by_category(category).is_some() {
            return Err(RunwayError::CategoryExists(category.to_string()));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let cells = (0..self.model.num_periods)
            .map(|period| {
                Cell::new_formula(period, formula, display_format)
                    .with_id(uuid::Uuid::new_v4().to_string())
            })
            .collect();

        let mut row = Row::new(&id, category, row_type, label).with_cells(cells);
        row.display_order = self
            .grid
            .rows()
            .iter()
            .map(|r| r.display_order)
            .max()
            .unwrap_or(0)
            + 1;

        self.grid.push_row(row);
        self.modified = true;
        self.model.touch();
        tracing::debug!(category, formula, "added formula row");
        Ok(id)
    }

    /// Flip between yearly and monthly display.
    pub fn toggle_view(&mut self) {
        self.model.view_mode = self.model.view_mode.toggled();
        self.modified = true;
    }
}
