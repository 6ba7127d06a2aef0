//! Initial model from the onboarding questionnaire.
//!
//! The questionnaire collects salary, age, retirement age and expected salary
//! growth. From those it seeds a yearly model with one period per working
//! year and four input rows.

use runway_engine::engine::{Cell, DisplayFormat, Row, RowType};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RunwayError};
use crate::model::{Model, ModelSnapshot};

/// Upper bound (exclusive) for ages.
const MAX_AGE: u32 = 150;

/// Answers gathered before a model is created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub annual_salary: f64,
    pub age: u32,
    pub target_retirement_age: u32,
    /// Annual growth in percent (5.0 means 5%).
    pub salary_growth_rate: f64,
}

impl Questionnaire {
    /// Check the answers the way the onboarding form does.
    pub fn validate(&self) -> Result<()> {
        if !(self.annual_salary.is_finite() && self.annual_salary > 0.0) {
            return Err(RunwayError::Validation(
                "annual salary must be greater than 0".to_string(),
            ));
        }
        if self.age == 0 || self.age >= MAX_AGE {
            return Err(RunwayError::Validation(format!(
                "age must be between 1 and {}",
                MAX_AGE - 1
            )));
        }
        if self.target_retirement_age <= self.age || self.target_retirement_age >= MAX_AGE {
            return Err(RunwayError::Validation(format!(
                "target retirement age must be after current age and below {}",
                MAX_AGE
            )));
        }
        if !(self.salary_growth_rate.is_finite() && self.salary_growth_rate >= 0.0) {
            return Err(RunwayError::Validation(
                "salary growth rate must be 0 or more".to_string(),
            ));
        }
        Ok(())
    }

    /// Years between now and retirement; 0 if retirement is not in the future.
    pub fn working_years(&self) -> usize {
        self.target_retirement_age.saturating_sub(self.age) as usize
    }

    /// Monthly rate, in percent, that compounds to the annual growth rate.
    pub fn monthly_growth_rate(&self) -> f64 {
        ((1.0 + self.salary_growth_rate / 100.0).powf(1.0 / 12.0) - 1.0) * 100.0
    }

    /// Salary in year `i` under compound growth.
    pub fn salary_for_year(&self, i: usize) -> f64 {
        self.annual_salary * (1.0 + self.salary_growth_rate / 100.0).powi(i as i32)
    }

    /// Build the initial snapshot.
    pub fn build_snapshot(&self) -> Result<ModelSnapshot> {
        self.validate()?;
        let years = self.working_years();

        let mut model = Model::new("My Financial Plan", years);
        model.description = Some(format!("Planning for {} working years", years));

        let specs = [
            ("current_age", RowType::Calculation, "Current Age", false),
            (
                "periods_until_retirement",
                RowType::Calculation,
                "Periods Until Retirement",
                false,
            ),
            ("annual_salary", RowType::Income, "Annual Salary", true),
            ("salary_increase", RowType::Income, "Salary Increase", false),
        ];

        let mut rows: Vec<Row> = specs
            .iter()
            .enumerate()
            .map(|(i, (category, row_type, label, editable))| {
                let mut row = Row::new(&new_id(), category, *row_type, label);
                row.display_order = i as i64 + 1;
                row.is_editable = *editable;
                row
            })
            .collect();

        for i in 0..years {
            let salary = self.salary_for_year(i);
            let increase = if i > 0 {
                salary - self.salary_for_year(i - 1)
            } else {
                0.0
            };
            let values = [
                ((self.age as usize + i) as f64, DisplayFormat::Number),
                ((years - i) as f64, DisplayFormat::Number),
                (salary, DisplayFormat::Currency),
                (increase, DisplayFormat::Currency),
            ];
            for (row, (value, format)) in rows.iter_mut().zip(values) {
                row.cells
                    .push(Cell::new_input(i, value, format).with_id(new_id()));
            }
        }

        tracing::debug!(model = %model.id, years, "built model from questionnaire");
        Ok(ModelSnapshot { model, rows })
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
