//! Projection engine API.
//!
//! This module provides the computation engine for a projection grid:
//!
//! - [`Cell`], [`Row`], [`RowType`], [`ValueType`], [`DisplayFormat`] - Grid data
//! - [`Grid`] - Row storage with lookup by id and by category
//! - [`Reference`] - `ROW(..)` / `PREV(..)` / `SUM(..)` references
//! - [`extract_references`] - List the references in a formula
//! - [`resolve_references`] - Substitute references with numeric literals
//! - [`evaluate_expression`] - Evaluate plain arithmetic
//! - [`calculate_all`] - Settle every period to a fixed point
//! - [`detect_cycle`] - Same-period dependency cycle diagnostics
//! - [`format_cell`] - Format values for display

mod cell;
mod cycle;
mod deps;
mod eval;
mod expr;
mod format;
mod grid;
mod preprocess;
mod reference;
mod schedule;

pub use cell::{Cell, DisplayFormat, Row, RowType, ValueType};
pub use cycle::{detect_cycle, find_cycles};
pub use deps::{extract_references, same_period_dependencies};
pub use eval::{eval_formula, eval_formula_or_zero};
pub use expr::{BinaryOp, EvalError, Expr, evaluate_expression, parse_expression};
pub use format::{
    ViewMode, format_cell, format_currency, format_currency_for_view, format_number,
    format_percentage, period_label,
};
pub use grid::{Grid, GridError};
pub use preprocess::{resolve_reference, resolve_references};
pub use reference::{Reference, reference_re};
pub use schedule::{
    CalcOptions, CalcReport, DEFAULT_MAX_PASSES, FormulaFailure, PeriodReport, calculate_all,
    calculate_all_with, calculate_period,
};
