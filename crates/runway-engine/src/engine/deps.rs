//! Dependency extraction from formula text.

use super::grid::Grid;
use super::reference::{Reference, reference_re};

/// Extract every reference in a formula, in order of appearance.
/// Duplicates are kept.
pub fn extract_references(formula: &str) -> Vec<Reference> {
    reference_re()
        .captures_iter(formula)
        .filter_map(|caps| Reference::from_parts(&caps[1], &caps[2]))
        .collect()
}

/// Categories the row registered under `category` reads in the period being
/// computed, across all of its formula cells.
///
/// `SUM(t)` expands to every row of type `t`; `PREV` is skipped since it only
/// reads finalized periods.
pub fn same_period_dependencies(grid: &Grid, category: &str) -> Vec<String> {
    let Some(row) = grid.row_by_category(category) else {
        return Vec::new();
    };

    let mut deps: Vec<String> = Vec::new();
    let mut push = |c: &str| {
        if !deps.iter().any(|d| d == c) {
            deps.push(c.to_string());
        }
    };

    for formula in row.cells.iter().filter_map(|c| c.formula.as_deref()) {
        for reference in extract_references(formula) {
            match reference {
                Reference::Row(c) => push(&c),
                Reference::Sum(t) => {
                    for r in grid.rows().iter().filter(|r| r.row_type.as_str() == t) {
                        push(&r.category);
                    }
                }
                Reference::Prev(_) => {}
            }
        }
    }

    deps
}
