//! Document construction, calculation and snapshot hand-off.

use runway_engine::engine::{CalcOptions, CalcReport, Grid, calculate_all_with, find_cycles};

use crate::error::Result;
use crate::model::{Model, ModelSnapshot};

/// A model loaded for editing and calculation.
pub struct Document {
    pub model: Model,
    /// Rows in display order
    pub grid: Grid,
    pub options: CalcOptions,
    /// Report from the most recent [`Document::calculate`]
    pub last_report: Option<CalcReport>,
    /// Whether inputs or rows changed since the document was loaded
    pub modified: bool,
}

impl Document {
    /// Build a document from a stored snapshot.
    pub fn from_snapshot(mut snapshot: ModelSnapshot) -> Document {
        snapshot.sort();
        Document {
            model: snapshot.model,
            grid: Grid::new(snapshot.rows),
            options: CalcOptions::default(),
            last_report: None,
            modified: false,
        }
    }

    /// Like [`Document::from_snapshot`], but refuses rows that share a category.
    pub fn from_snapshot_strict(mut snapshot: ModelSnapshot) -> Result<Document> {
        snapshot.sort();
        let grid = Grid::new_strict(snapshot.rows)?;
        Ok(Document {
            model: snapshot.model,
            grid,
            options: CalcOptions::default(),
            last_report: None,
            modified: false,
        })
    }

    pub fn with_options(mut self, options: CalcOptions) -> Document {
        self.options = options;
        self
    }

    /// Recompute every period.
    pub fn calculate(&mut self) -> &CalcReport {
        let report = calculate_all_with(&mut self.grid, self.model.num_periods, &self.options);
        tracing::debug!(
            model = %self.model.id,
            passes = report.total_passes(),
            failures = report.failures.len(),
            "calculated"
        );
        self.last_report.insert(report)
    }

    /// Same-period dependency cycles, each as a list of categories.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        find_cycles(&self.grid)
    }

    pub fn to_snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            model: self.model.clone(),
            rows: self.grid.rows().to_vec(),
        }
    }

    pub fn into_snapshot(self) -> ModelSnapshot {
        ModelSnapshot {
            model: self.model,
            rows: self.grid.into_rows(),
        }
    }
}
