//! runway_engine - Projection grid evaluation engine.

pub mod engine;

pub use engine::{CalcOptions, CalcReport, EvalError, Grid, GridError, calculate_all};

#[cfg(test)]
mod tests {
    use crate::engine::*;

    fn input_row(category: &str, row_type: RowType, values: &[f64]) -> Row {
        let cells = values
            .iter()
            .enumerate()
            .map(|(i, v)| Cell::new_input(i, *v, DisplayFormat::Currency))
            .collect();
        Row::new(&format!("id-{}", category), category, row_type, category).with_cells(cells)
    }

    fn formula_row(category: &str, formula: &str, periods: usize) -> Row {
        let cells = (0..periods)
            .map(|i| Cell::new_formula(i, formula, DisplayFormat::Currency))
            .collect();
        Row::new(
            &format!("id-{}", category),
            category,
            RowType::Calculation,
            category,
        )
        .with_cells(cells)
    }

    fn values(grid: &Grid, category: &str, periods: usize) -> Vec<Option<f64>> {
        (0..periods).map(|p| grid.value_at(category, p)).collect()
    }

    #[test]
    fn test_tax_on_salary() {
        let mut grid = Grid::new(vec![
            input_row("salary", RowType::Income, &[1000.0, 1000.0, 1000.0]),
            formula_row("tax", "ROW(salary)*0.2", 3),
        ]);
        calculate_all(&mut grid, 3);
        assert_eq!(values(&grid, "tax", 3), vec![Some(200.0); 3]);
    }

    #[test]
    fn test_cumulative_recurrence() {
        let mut grid = Grid::new(vec![
            input_row("salary", RowType::Income, &[1000.0, 1000.0, 1000.0]),
            formula_row("cumulative", "PREV(cumulative)+ROW(salary)", 3),
        ]);
        calculate_all(&mut grid, 3);
        assert_eq!(
            values(&grid, "cumulative", 3),
            vec![Some(1000.0), Some(2000.0), Some(3000.0)]
        );
    }

    #[test]
    fn test_sum_income() {
        let mut grid = Grid::new(vec![
            input_row("salary", RowType::Income, &[1000.0]),
            input_row("side", RowType::Income, &[500.0]),
            formula_row("total_income", "SUM(income)", 1),
        ]);
        calculate_all(&mut grid, 1);
        assert_eq!(grid.value_at("total_income", 0), Some(1500.0));
    }

    #[test]
    fn test_net_worth_projection() {
        let mut grid = Grid::new(vec![
            input_row("salary", RowType::Income, &[50_000.0, 52_000.0, 54_000.0]),
            input_row("rent", RowType::Expense, &[18_000.0, 18_000.0, 19_000.0]),
            input_row("food", RowType::Expense, &[6_000.0, 6_000.0, 6_000.0]),
            formula_row("net", "SUM(income) - SUM(expense)", 3),
            formula_row("savings", "PREV(savings) * 1.05 + ROW(net)", 3),
        ]);
        let report = calculate_all(&mut grid, 3);
        assert!(report.converged());
        assert_eq!(
            values(&grid, "net", 3),
            vec![Some(26_000.0), Some(28_000.0), Some(29_000.0)]
        );
        let savings = values(&grid, "savings", 3);
        assert_eq!(savings[0], Some(26_000.0));
        assert_eq!(savings[1], Some(26_000.0 * 1.05 + 28_000.0));
        assert_eq!(savings[2], Some((26_000.0 * 1.05 + 28_000.0) * 1.05 + 29_000.0));
    }

    #[test]
    fn test_cyclic_pair_terminates() {
        let build = || {
            Grid::new(vec![
                formula_row("a", "ROW(b) + 1", 2),
                formula_row("b", "ROW(a) * 2", 2),
            ])
        };
        let mut first = build();
        let mut second = build();
        let r1 = calculate_all(&mut first, 2);
        let r2 = calculate_all(&mut second, 2);

        assert_eq!(r1, r2);
        assert_eq!(r1.exhausted_periods(), vec![0, 1]);
        assert_eq!(r1.total_passes(), 2 * DEFAULT_MAX_PASSES);
        for p in 0..2 {
            let a = first.value_at("a", p).unwrap();
            assert!(a.is_finite());
            assert_eq!(Some(a), second.value_at("a", p));
        }
        assert_eq!(
            find_cycles(&first),
            vec![vec!["a".to_string(), "b".to_string(), "a".to_string()]]
        );
    }

    #[test]
    fn test_malformed_formula_yields_zero() {
        let mut grid = Grid::new(vec![
            input_row("x", RowType::Income, &[3.0]),
            formula_row("bad", "ROW(x) ** 2", 1),
            formula_row("word", "hello", 1),
            formula_row("div", "ROW(x) / 0", 1),
        ]);
        let report = calculate_all(&mut grid, 1);
        assert_eq!(grid.value_at("bad", 0), Some(0.0));
        assert_eq!(grid.value_at("word", 0), Some(0.0));
        assert_eq!(grid.value_at("div", 0), Some(0.0));
        assert_eq!(report.failures.len(), 3);
    }

    #[test]
    fn test_recalculation_overwrites_stale_values() {
        let mut grid = Grid::new(vec![
            input_row("salary", RowType::Income, &[1000.0]),
            formula_row("tax", "ROW(salary)*0.2", 1),
        ]);
        calculate_all(&mut grid, 1);
        let cell = grid.cell_mut("salary", 0).unwrap();
        cell.input_value = Some(2000.0);
        calculate_all(&mut grid, 1);
        assert_eq!(grid.value_at("salary", 0), Some(2000.0));
        assert_eq!(grid.value_at("tax", 0), Some(400.0));
    }

    #[test]
    fn test_duplicate_category_formula_reads_last_row() {
        let mut grid = Grid::new(vec![
            input_row("bonus", RowType::Income, &[10.0]),
            input_row("bonus", RowType::Income, &[20.0]),
            formula_row("double", "ROW(bonus) * 2", 1),
        ]);
        calculate_all(&mut grid, 1);
        assert_eq!(grid.value_at("double", 0), Some(40.0));
    }

    #[test]
    fn test_extract_references() {
        assert_eq!(
            extract_references("PREV(cash) + ROW(salary) - SUM(expense) + ROW(salary)"),
            vec![
                Reference::Prev("cash".to_string()),
                Reference::Row("salary".to_string()),
                Reference::Sum("expense".to_string()),
                Reference::Row("salary".to_string()),
            ]
        );
        assert!(extract_references("1 + 2").is_empty());
    }

    #[test]
    fn test_reference_from_str() {
        assert_eq!(
            "ROW(salary)".parse::<Reference>(),
            Ok(Reference::Row("salary".to_string()))
        );
        assert_eq!(Reference::Sum("income".to_string()).to_string(), "SUM(income)");
        assert!("ROW(salary) + 1".parse::<Reference>().is_err());
        assert!("MAX(a)".parse::<Reference>().is_err());
        assert!(!Reference::Prev("x".to_string()).is_same_period());
    }

    #[test]
    fn test_prev_self_reference_is_not_a_cycle() {
        let grid = Grid::new(vec![
            input_row("salary", RowType::Income, &[1.0]),
            formula_row("cumulative", "PREV(cumulative)+ROW(salary)", 1),
        ]);
        assert!(detect_cycle(&grid, "cumulative").is_none());
        assert!(find_cycles(&grid).is_empty());
    }

    #[test]
    fn test_sum_over_own_type_is_a_cycle() {
        let mut total = input_row("total", RowType::Income, &[]);
        total.cells = vec![Cell::new_formula(0, "SUM(income)", DisplayFormat::Currency)];
        let grid = Grid::new(vec![input_row("salary", RowType::Income, &[1.0]), total]);
        let cycle = detect_cycle(&grid, "total").unwrap();
        assert_eq!(cycle, vec!["total".to_string(), "total".to_string()]);
    }

    #[test]
    fn test_eval_formula_direct() {
        let grid = Grid::new(vec![input_row("a", RowType::Income, &[4.0, 6.0])]);
        assert_eq!(eval_formula("ROW(a) + PREV(a)", &grid, 1), Ok(10.0));
        assert_eq!(eval_formula_or_zero("ROW(a) +", &grid, 1), 0.0);
        assert!(eval_formula("", &grid, 0).is_err());
    }

    #[test]
    fn test_long_reference_chain_calculates() {
        let formula = vec!["ROW(salary)"; 20_000].join(" + ");
        let mut grid = Grid::new(vec![
            input_row("salary", RowType::Income, &[2.0]),
            formula_row("big", &formula, 1),
        ]);
        let report = calculate_all(&mut grid, 1);
        assert!(report.failures.is_empty());
        assert_eq!(grid.value_at("big", 0), Some(40_000.0));
    }
}
