//! Circular dependency detection between rows.
//!
//! Only same-period edges count: `ROW` targets and every row a `SUM` covers.
//! `PREV` reads a finished period and can never close a loop.

use std::collections::HashSet;

use super::Grid;
use super::deps::same_period_dependencies;

/// Detect a same-period dependency cycle reachable from `start`.
/// Returns Some(cycle_path) if a cycle is found, None otherwise.
///
/// Diagnostic only: the scheduler bounds cyclic grids with its pass cap.
pub fn detect_cycle(grid: &Grid, start: &str) -> Option<Vec<String>> {
    let mut visiting = HashSet::new();
    let mut done = HashSet::new();
    let mut path = Vec::new();

    if detect_cycle_dfs(start, grid, &mut visiting, &mut done, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn detect_cycle_dfs(
    current: &str,
    grid: &Grid,
    visiting: &mut HashSet<String>,
    done: &mut HashSet<String>,
    path: &mut Vec<String>,
) -> bool {
    if visiting.contains(current) {
        path.push(current.to_string());
        return true;
    }
    if done.contains(current) || grid.row_by_category(current).is_none() {
        return false;
    }

    let deps = same_period_dependencies(grid, current);

    visiting.insert(current.to_string());
    path.push(current.to_string());

    for dep in &deps {
        if detect_cycle_dfs(dep, grid, visiting, done, path) {
            return true;
        }
    }

    path.pop();
    visiting.remove(current);
    done.insert(current.to_string());
    false
}

/// Every distinct cycle reachable from any row, each reported once.
pub fn find_cycles(grid: &Grid) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = Vec::new();
    let mut covered: HashSet<String> = HashSet::new();

    for row in grid.rows() {
        if covered.contains(&row.category) {
            continue;
        }
        if let Some(path) = detect_cycle(grid, &row.category) {
            // Trim the lead-in so the path starts where the loop closes.
            let closing = path.last().cloned().unwrap_or_default();
            let start = path.iter().position(|c| *c == closing).unwrap_or(0);
            let cycle = path[start..].to_vec();
            if cycle.iter().any(|c| covered.contains(c)) {
                continue;
            }
            covered.extend(cycle.iter().cloned());
            cycles.push(cycle);
        }
    }

    cycles
}
