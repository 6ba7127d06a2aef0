//! Reference substitution: formulas become plain arithmetic before evaluation.

use super::grid::Grid;
use super::reference::{Reference, reference_re};

/// Replace `ROW(..)`, `PREV(..)` and `SUM(..)` references with numeric literals.
///
/// The raw formula is scanned once, so substituted text is never rewritten
/// again. Values are read from the grid as it stands, including writes made
/// earlier in the current pass. Absent values become `0`, as does `PREV` in
/// period 0.
pub fn resolve_references(formula: &str, grid: &Grid, period: usize) -> String {
    reference_re()
        .replace_all(formula, |caps: &regex::Captures| {
            let Some(reference) = Reference::from_parts(&caps[1], &caps[2]) else {
                return caps[0].to_string();
            };
            literal(resolve_reference(&reference, grid, period))
        })
        .to_string()
}

/// Numeric value of a single reference at `period`.
pub fn resolve_reference(reference: &Reference, grid: &Grid, period: usize) -> f64 {
    match reference {
        Reference::Row(category) => grid.value_at(category, period).unwrap_or(0.0),
        Reference::Prev(category) => match period.checked_sub(1) {
            Some(prev) => grid.value_at(category, prev).unwrap_or(0.0),
            None => 0.0,
        },
        Reference::Sum(row_type) => grid.sum_by_type(row_type, period),
    }
}

/// Render a value as an expression literal. Negatives are parenthesized so a
/// leading operator in the formula stays well-formed.
fn literal(value: f64) -> String {
    if value < 0.0 {
        format!("({})", value)
    } else {
        // `{}` on -0.0 prints "-0".
        format!("{}", value.abs())
    }
}
