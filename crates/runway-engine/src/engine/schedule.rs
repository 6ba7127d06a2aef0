//! Fixed-point recalculation across periods.
//!
//! Periods are computed in increasing order so `PREV` always reads a finished
//! period. Within a period the whole grid is re-evaluated until no formula
//! cell changes or the pass cap is reached. Writes are visible immediately:
//! a row later in the pass sees values written earlier in the same pass.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::cell::ValueType;
use super::eval::eval_formula;
use super::grid::Grid;

/// Default maximum number of passes per period.
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Tunables for a calculation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcOptions {
    /// Passes attempted per period before the current values are accepted.
    /// Values below 1 are treated as 1.
    pub max_passes: usize,
}

impl Default for CalcOptions {
    fn default() -> Self {
        CalcOptions {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl CalcOptions {
    pub fn with_max_passes(max_passes: usize) -> CalcOptions {
        CalcOptions { max_passes }
    }

    fn pass_cap(&self) -> usize {
        self.max_passes.max(1)
    }
}

/// Outcome of settling one period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub period: usize,
    pub passes: usize,
    /// False when the pass cap was reached while values were still changing.
    pub converged: bool,
}

/// A formula cell that failed to evaluate during the run.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FormulaFailure {
    pub row_id: String,
    pub period: usize,
    pub message: String,
}

/// Diagnostics for a whole calculation run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcReport {
    pub periods: Vec<PeriodReport>,
    pub failures: Vec<FormulaFailure>,
}

impl CalcReport {
    /// True when every period reached a fixed point.
    pub fn converged(&self) -> bool {
        self.periods.iter().all(|p| p.converged)
    }

    /// Periods that exhausted the pass cap.
    pub fn exhausted_periods(&self) -> Vec<usize> {
        self.periods
            .iter()
            .filter(|p| !p.converged)
            .map(|p| p.period)
            .collect()
    }

    pub fn total_passes(&self) -> usize {
        self.periods.iter().map(|p| p.passes).sum()
    }
}

/// Compute every cell for periods `0..num_periods` with default options.
pub fn calculate_all(grid: &mut Grid, num_periods: usize) -> CalcReport {
    calculate_all_with(grid, num_periods, &CalcOptions::default())
}

/// Compute every cell for periods `0..num_periods`.
pub fn calculate_all_with(grid: &mut Grid, num_periods: usize, options: &CalcOptions) -> CalcReport {
    let mut report = CalcReport::default();
    let mut failures = BTreeSet::new();

    for period in 0..num_periods {
        report
            .periods
            .push(settle_period(grid, period, options, &mut failures));
    }

    report.failures = failures.into_iter().collect();
    if !report.converged() {
        tracing::warn!(
            periods = ?report.exhausted_periods(),
            "pass cap reached before some periods settled"
        );
    }
    report
}

/// Compute one period in isolation. Earlier periods must already be final.
pub fn calculate_period(grid: &mut Grid, period: usize, options: &CalcOptions) -> PeriodReport {
    settle_period(grid, period, options, &mut BTreeSet::new())
}

fn settle_period(
    grid: &mut Grid,
    period: usize,
    options: &CalcOptions,
    failures: &mut BTreeSet<FormulaFailure>,
) -> PeriodReport {
    let cap = options.pass_cap();
    let mut passes = 0usize;
    let mut changed = true;

    while changed && passes < cap {
        changed = false;
        passes += 1;

        for idx in 0..grid.rows.len() {
            if run_cell(grid, idx, period, failures) {
                changed = true;
            }
        }
    }

    tracing::debug!(period, passes, converged = !changed, "period settled");
    PeriodReport {
        period,
        passes,
        converged: !changed,
    }
}

/// Recompute one row's cell at `period`. Returns true if a formula result changed.
fn run_cell(
    grid: &mut Grid,
    idx: usize,
    period: usize,
    failures: &mut BTreeSet<FormulaFailure>,
) -> bool {
    let Some(cell) = grid.rows[idx].cell(period) else {
        return false;
    };

    let value = match cell.value_type {
        ValueType::Input | ValueType::Percentage => {
            let input = cell.input_value;
            if let Some(cell) = grid.rows[idx].cell_mut(period) {
                cell.calculated_value = input;
            }
            return false;
        }
        ValueType::Formula => match cell.formula.as_deref().map(str::trim) {
            None | Some("") => 0.0,
            Some(formula) => match eval_formula(formula, grid, period) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(
                        row = %grid.rows[idx].id,
                        formula,
                        period,
                        error = %err,
                        "formula evaluation failed"
                    );
                    failures.insert(FormulaFailure {
                        row_id: grid.rows[idx].id.clone(),
                        period,
                        message: err.to_string(),
                    });
                    0.0
                }
            },
        },
    };

    match grid.rows[idx].cell_mut(period) {
        Some(cell) if cell.calculated_value != Some(value) => {
            cell.calculated_value = Some(value);
            true
        }
        _ => false,
    }
}
