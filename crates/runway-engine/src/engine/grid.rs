//! In-memory grid of rows crossed with periods.
//!
//! Rows are kept in registration order, which is also the order the
//! scheduler visits them in. Categories are indexed last-write-wins: when two
//! rows share a category, lookups resolve to the one registered later.

use std::collections::HashMap;
use thiserror::Error;

use super::cell::{Cell, Row};

/// Errors raised by [`Grid::new_strict`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Duplicate category `{category}` on rows {first} and {second}")]
    DuplicateCategory {
        category: String,
        first: String,
        second: String,
    },
}

/// Rows plus the lookup tables formulas resolve through.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    pub(crate) rows: Vec<Row>,
    by_id: HashMap<String, usize>,
    by_category: HashMap<String, usize>,
    duplicates: Vec<String>,
}

impl Grid {
    /// Build a grid without validating anything.
    pub fn new(rows: Vec<Row>) -> Grid {
        let mut grid = Grid::default();
        for row in rows {
            grid.push_row(row);
        }
        grid
    }

    /// Build a grid, rejecting rows that reuse a category.
    pub fn new_strict(rows: Vec<Row>) -> Result<Grid, GridError> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for row in &rows {
            if let Some(first) = seen.insert(&row.category, &row.id) {
                return Err(GridError::DuplicateCategory {
                    category: row.category.clone(),
                    first: first.to_string(),
                    second: row.id.clone(),
                });
            }
        }
        Ok(Grid::new(rows))
    }

    /// Append a row. It shadows any earlier row with the same category.
    pub fn push_row(&mut self, row: Row) {
        let idx = self.rows.len();
        self.by_id.insert(row.id.clone(), idx);
        if self.by_category.insert(row.category.clone(), idx).is_some() {
            tracing::warn!(
                category = %row.category,
                row = %row.id,
                "duplicate category; lookups now resolve to the later row"
            );
            if !self.duplicates.contains(&row.category) {
                self.duplicates.push(row.category.clone());
            }
        }
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn row(&self, id: &str) -> Option<&Row> {
        self.by_id.get(id).map(|&idx| &self.rows[idx])
    }

    /// The row formulas reach through `category`.
    pub fn row_by_category(&self, category: &str) -> Option<&Row> {
        self.by_category.get(category).map(|&idx| &self.rows[idx])
    }

    /// Categories that more than one row registered, in first-seen order.
    pub fn duplicate_categories(&self) -> &[String] {
        &self.duplicates
    }

    /// Mutable access to one cell of the row registered under `category`.
    pub fn cell_mut(&mut self, category: &str, period: usize) -> Option<&mut Cell> {
        let idx = *self.by_category.get(category)?;
        self.rows[idx].cell_mut(period)
    }

    /// Value of `category` at `period`; `None` if the row, cell, or value is missing.
    pub fn value_at(&self, category: &str, period: usize) -> Option<f64> {
        self.row_by_category(category)?.value_at(period)
    }

    /// Sum over every row whose type key equals `row_type`. Missing values count as 0.
    pub fn sum_by_type(&self, row_type: &str, period: usize) -> f64 {
        self.rows
            .iter()
            .filter(|row| row.row_type.as_str() == row_type)
            .map(|row| row.value_at(period).unwrap_or(0.0))
            .sum()
    }
}
