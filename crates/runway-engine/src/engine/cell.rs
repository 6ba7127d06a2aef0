//! Row and cell data structures for the projection grid.
//!
//! - [`RowType`] - Classification used by `SUM(row_type)` aggregation
//! - [`ValueType`] - Whether a cell holds an input, a formula, or a percentage hint
//! - [`DisplayFormat`] - How the formatter renders a cell
//! - [`Cell`] - One period of one row
//! - [`Row`] - A named line item owning its per-period cells

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a row, used for type-level aggregation.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowType {
    Income,
    Expense,
    Debt,
    Investment,
    Calculation,
}

impl RowType {
    /// Every row type, in presentation order.
    pub const ALL: [RowType; 5] = [
        RowType::Income,
        RowType::Expense,
        RowType::Debt,
        RowType::Investment,
        RowType::Calculation,
    ];

    /// The lowercase key used in formulas and the data layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            RowType::Income => "income",
            RowType::Expense => "expense",
            RowType::Debt => "debt",
            RowType::Investment => "investment",
            RowType::Calculation => "calculation",
        }
    }
}

impl FromStr for RowType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RowType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Invalid row type: {}", s))
    }
}

impl fmt::Display for RowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a cell's content means to the scheduler.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Input,
    Formula,
    /// Display hint only; evaluated like an input.
    Percentage,
}

/// How a cell is rendered for display.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    #[default]
    Currency,
    Percentage,
    Number,
}

impl FromStr for DisplayFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "currency" => Ok(DisplayFormat::Currency),
            "percentage" => Ok(DisplayFormat::Percentage),
            "number" => Ok(DisplayFormat::Number),
            _ => Err(format!("Invalid display format: {}", s)),
        }
    }
}

/// One period of one row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub id: String,
    pub period_index: usize,
    pub value_type: ValueType,
    #[serde(default)]
    pub input_value: Option<f64>,
    #[serde(default)]
    pub formula: Option<String>,
    /// Engine output. Mirrors `input_value` for input cells.
    #[serde(default)]
    pub calculated_value: Option<f64>,
    #[serde(default)]
    pub display_format: DisplayFormat,
}

impl Cell {
    pub fn new_input(period_index: usize, value: f64, display_format: DisplayFormat) -> Cell {
        Cell {
            id: String::new(),
            period_index,
            value_type: ValueType::Input,
            input_value: Some(value),
            formula: None,
            calculated_value: Some(value),
            display_format,
        }
    }

    /// Create a formula cell. Its value is unknown until the next calculation.
    pub fn new_formula(period_index: usize, formula: &str, display_format: DisplayFormat) -> Cell {
        Cell {
            id: String::new(),
            period_index,
            value_type: ValueType::Formula,
            input_value: None,
            formula: Some(formula.to_string()),
            calculated_value: None,
            display_format,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Cell {
        self.id = id.into();
        self
    }

    /// The value other formulas see: calculated, else input, else absent.
    pub fn value(&self) -> Option<f64> {
        self.calculated_value.or(self.input_value)
    }
}

/// A line item in the projection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    pub category: String,
    pub row_type: RowType,
    pub label: String,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default)]
    pub is_editable: bool,
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(id: &str, category: &str, row_type: RowType, label: &str) -> Row {
        Row {
            id: id.to_string(),
            category: category.to_string(),
            row_type,
            label: label.to_string(),
            display_order: 0,
            is_editable: false,
            cells: Vec::new(),
        }
    }

    pub fn with_cells(mut self, cells: Vec<Cell>) -> Row {
        self.cells = cells;
        self
    }

    /// The first cell registered for `period`, if any.
    pub fn cell(&self, period: usize) -> Option<&Cell> {
        self.cells.iter().find(|c| c.period_index == period)
    }

    pub fn cell_mut(&mut self, period: usize) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|c| c.period_index == period)
    }

    /// Value at `period`; a missing cell is an absent value.
    pub fn value_at(&self, period: usize) -> Option<f64> {
        self.cell(period).and_then(Cell::value)
    }

    /// Sort cells by period index (stable for duplicates).
    pub fn sort_cells(&mut self) {
        self.cells.sort_by_key(|c| c.period_index);
    }
}
