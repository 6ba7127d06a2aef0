//! Model metadata and the snapshot handed between storage and the engine.

use chrono::{DateTime, Utc};
use runway_engine::engine::{Row, ViewMode};
use serde::{Deserialize, Serialize};

/// A projection: metadata for a grid of rows over `num_periods` periods.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Granularity the table is shown in.
    #[serde(default)]
    pub view_mode: ViewMode,
    /// Granularity the stored figures represent.
    #[serde(default)]
    pub period_basis: ViewMode,
    pub num_periods: usize,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub public_share_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    pub fn new(name: &str, num_periods: usize) -> Model {
        let now = Utc::now();
        Model {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: None,
            view_mode: ViewMode::Yearly,
            period_basis: ViewMode::Yearly,
            num_periods,
            is_public: false,
            public_share_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A model together with its rows and their cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub model: Model,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl ModelSnapshot {
    /// Apply retrieval ordering: rows by `display_order`, cells by period.
    pub fn sort(&mut self) {
        self.rows.sort_by_key(|r| r.display_order);
        for row in self.rows.iter_mut() {
            row.sort_cells();
        }
    }

    pub fn find_cell_mut(&mut self, cell_id: &str) -> Option<&mut runway_engine::engine::Cell> {
        self.rows
            .iter_mut()
            .flat_map(|r| r.cells.iter_mut())
            .find(|c| c.id == cell_id)
    }
}
