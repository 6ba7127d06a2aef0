//! Formula evaluation against a grid.
//!
//! References are substituted first (see [`resolve_references`]), then the
//! remaining arithmetic is handed to the expression evaluator.

use super::expr::{EvalError, evaluate_expression};
use super::grid::Grid;
use super::preprocess::resolve_references;

/// Evaluate `formula` at `period`, reporting failures as a typed error.
pub fn eval_formula(formula: &str, grid: &Grid, period: usize) -> Result<f64, EvalError> {
    let resolved = resolve_references(formula, grid, period);
    evaluate_expression(&resolved)
}

/// Evaluate `formula` at `period`. Failures are logged and yield 0.
pub fn eval_formula_or_zero(formula: &str, grid: &Grid, period: usize) -> f64 {
    match eval_formula(formula, grid, period) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(formula, period, error = %err, "formula evaluation failed");
            0.0
        }
    }
}
