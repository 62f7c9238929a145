use super::aggregate::{median, numeric_values};
use super::columns::{EMPLOYEES, REVENUE_CAGR, TOTAL_FUNDING};
use super::model::Table;
use crate::error::{DashboardError, Result};

/// Number of rows.
pub fn total_rows(table: &Table) -> usize {
    table.len()
}

/// Sum of the non-null values of a column; 0 for an empty column.
pub fn sum_of(table: &Table, column: &str) -> Result<f64> {
    Ok(numeric_values(column, table.column_values(column)?)?
        .iter()
        .sum())
}

/// Median of the non-null values of a column.
pub fn median_of(table: &Table, column: &str) -> Result<f64> {
    let values = numeric_values(column, table.column_values(column)?)?;
    median(&values).ok_or_else(|| DashboardError::EmptyInput {
        column: column.to_string(),
    })
}

/// Headline figures shown above the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecards {
    pub total_startups: usize,
    pub total_employees: f64,
    pub total_funding: f64,
    /// `None` when no row has a growth figure.
    pub median_revenue_growth: Option<f64>,
}

impl Scorecards {
    pub fn compute(table: &Table) -> Result<Self> {
        let median_revenue_growth = match median_of(table, REVENUE_CAGR) {
            Ok(m) => Some(m),
            Err(DashboardError::EmptyInput { .. }) => None,
            Err(e) => return Err(e),
        };
        Ok(Scorecards {
            total_startups: total_rows(table),
            total_employees: sum_of(table, EMPLOYEES)?,
            total_funding: sum_of(table, TOTAL_FUNDING)?,
            median_revenue_growth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns::{COMPANY, LOCATION};
    use crate::data::filter::{filter, ConstraintSet, Selection};
    use crate::data::model::tests::table;
    use crate::data::model::Value;

    fn growth(values: &[f64]) -> Table {
        table(
            &[REVENUE_CAGR],
            values.iter().map(|v| vec![Value::Float(*v)]).collect(),
        )
    }

    fn startups() -> Table {
        table(
            &[COMPANY, LOCATION, EMPLOYEES, TOTAL_FUNDING, REVENUE_CAGR],
            vec![
                vec!["A".into(), "Berlin".into(), Value::Integer(10), Value::Float(1.5), Value::Float(300.0)],
                vec!["B".into(), "Munich".into(), Value::Integer(20), Value::Null, Value::Float(100.0)],
                vec!["C".into(), "Berlin".into(), Value::Null, Value::Float(2.5), Value::Null],
            ],
        )
    }

    #[test]
    fn median_of_even_and_odd_columns() {
        assert_eq!(median_of(&growth(&[10.0, 20.0, 30.0, 40.0]), REVENUE_CAGR).unwrap(), 25.0);
        assert_eq!(median_of(&growth(&[10.0, 20.0, 30.0]), REVENUE_CAGR).unwrap(), 20.0);
    }

    #[test]
    fn nulls_are_excluded() {
        let t = startups();
        assert_eq!(total_rows(&t), 3);
        assert_eq!(sum_of(&t, EMPLOYEES).unwrap(), 30.0);
        assert_eq!(sum_of(&t, TOTAL_FUNDING).unwrap(), 4.0);
        assert_eq!(median_of(&t, REVENUE_CAGR).unwrap(), 200.0);
    }

    #[test]
    fn empty_filter_result_has_zero_rows_and_sum_but_no_median() {
        let t = startups();
        let mut c = ConstraintSet::new();
        c.insert(LOCATION.to_string(), Selection::Only("Nonexistent".into()));
        let empty = filter(&t, &c).unwrap();

        assert_eq!(total_rows(&empty), 0);
        assert_eq!(sum_of(&empty, EMPLOYEES).unwrap(), 0.0);
        assert!(matches!(
            median_of(&empty, REVENUE_CAGR),
            Err(DashboardError::EmptyInput { column }) if column == REVENUE_CAGR
        ));
    }

    #[test]
    fn unknown_and_text_columns_are_errors() {
        let t = startups();
        assert!(matches!(sum_of(&t, "Valuation"), Err(DashboardError::InvalidColumn { .. })));
        assert!(matches!(median_of(&t, COMPANY), Err(DashboardError::NonNumeric { .. })));
    }

    #[test]
    fn scorecards_roll_up_the_headline_columns() {
        let cards = Scorecards::compute(&startups()).unwrap();
        assert_eq!(
            cards,
            Scorecards {
                total_startups: 3,
                total_employees: 30.0,
                total_funding: 4.0,
                median_revenue_growth: Some(200.0),
            }
        );

        let cards = Scorecards::compute(&startups().select_rows(&[])).unwrap();
        assert_eq!(cards.total_startups, 0);
        assert_eq!(cards.median_revenue_growth, None);
    }
}
