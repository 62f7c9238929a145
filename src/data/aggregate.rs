use std::collections::BTreeMap;
use std::fmt;

use super::model::{Table, Value};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Aggregation functions and results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggFn {
    Count,
    Sum,
    Median,
}

impl fmt::Display for AggFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggFn::Count => write!(f, "count"),
            AggFn::Sum => write!(f, "sum"),
            AggFn::Median => write!(f, "median"),
        }
    }
}

/// Result of one aggregate: counts stay integral, sums and medians are floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggValue {
    Count(u64),
    Number(f64),
}

impl AggValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            AggValue::Count(n) => *n as f64,
            AggValue::Number(v) => *v,
        }
    }
}

impl fmt::Display for AggValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggValue::Count(n) => write!(f, "{n}"),
            AggValue::Number(v) if v.fract() == 0.0 => write!(f, "{v:.0}"),
            AggValue::Number(v) => write!(f, "{v:.1}"),
        }
    }
}

/// One bar of a chart: the group, its row count and its aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAggregate {
    pub group: Value,
    pub rows: usize,
    pub value: AggValue,
}

/// (group-by column, value column, function).
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationSpec {
    pub group_by: String,
    pub value_column: String,
    pub func: AggFn,
}

impl AggregationSpec {
    pub fn new(group_by: &str, value_column: &str, func: AggFn) -> Self {
        AggregationSpec {
            group_by: group_by.to_string(),
            value_column: value_column.to_string(),
            func,
        }
    }

    pub fn apply(&self, table: &Table) -> Result<Vec<GroupAggregate>> {
        aggregate(table, &self.group_by, &self.value_column, self.func)
    }

    /// [`aggregate_present`] with this triple.
    pub fn apply_present(&self, table: &Table) -> Result<Vec<GroupAggregate>> {
        aggregate_present(table, &self.group_by, &self.value_column, self.func)
    }
}

// ---------------------------------------------------------------------------
// Numeric helpers
// ---------------------------------------------------------------------------

/// Non-null numbers of a value sequence. Any other non-null value is an error.
pub(crate) fn numeric_values<'a>(
    column: &str,
    values: impl Iterator<Item = &'a Value>,
) -> Result<Vec<f64>> {
    values
        .filter(|v| !v.is_null())
        .map(|v| {
            v.as_f64().ok_or_else(|| DashboardError::NonNumeric {
                column: column.to_string(),
                value: v.clone(),
            })
        })
        .collect()
}

/// Median of the values; `None` when empty.
pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

// ---------------------------------------------------------------------------
// Group-by
// ---------------------------------------------------------------------------

/// Aggregate `value_column` per distinct value of `group_by`.
///
/// Groups are ranked by descending row count whatever `func` is, so every
/// chart over the same table lists categories in the same order. Equal counts
/// fall back to ascending group value.
pub fn aggregate(
    table: &Table,
    group_by: &str,
    value_column: &str,
    func: AggFn,
) -> Result<Vec<GroupAggregate>> {
    group_and_aggregate(table, group_by, value_column, func, EmptyGroups::Fail)
}

/// Like [`aggregate`], but a group with no values to take a median of is left
/// out instead of failing. The remaining groups keep their row-count rank.
pub fn aggregate_present(
    table: &Table,
    group_by: &str,
    value_column: &str,
    func: AggFn,
) -> Result<Vec<GroupAggregate>> {
    group_and_aggregate(table, group_by, value_column, func, EmptyGroups::Skip)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum EmptyGroups {
    Fail,
    Skip,
}

fn group_and_aggregate(
    table: &Table,
    group_by: &str,
    value_column: &str,
    func: AggFn,
    empty: EmptyGroups,
) -> Result<Vec<GroupAggregate>> {
    let group_idx = table.column_index(group_by)?;
    let value_idx = table.column_index(value_column)?;

    let mut groups: BTreeMap<&Value, Vec<&Value>> = BTreeMap::new();
    for rec in &table.rows {
        groups
            .entry(rec.get(group_idx))
            .or_default()
            .push(rec.get(value_idx));
    }

    let mut out = Vec::with_capacity(groups.len());
    for (group, values) in groups {
        let value = match func {
            AggFn::Count => AggValue::Count(values.len() as u64),
            AggFn::Sum => AggValue::Number(
                numeric_values(value_column, values.iter().copied())?
                    .iter()
                    .sum(),
            ),
            AggFn::Median => {
                let nums = numeric_values(value_column, values.iter().copied())?;
                match (median(&nums), empty) {
                    (Some(m), _) => AggValue::Number(m),
                    (None, EmptyGroups::Skip) => continue,
                    (None, EmptyGroups::Fail) => {
                        return Err(DashboardError::EmptyGroup {
                            group: group.clone(),
                            column: value_column.to_string(),
                        })
                    }
                }
            }
        };
        out.push(GroupAggregate {
            group: group.clone(),
            rows: values.len(),
            value,
        });
    }

    // Stable sort keeps the ascending group order among equal counts.
    out.sort_by(|a, b| b.rows.cmp(&a.rows));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::columns::{COMPANY, EMPLOYEES, LOCATION, REVENUE_CAGR, TOTAL_FUNDING};
    use crate::data::model::tests::table;

    fn pairs(out: &[GroupAggregate]) -> Vec<(String, f64)> {
        out.iter()
            .map(|g| (g.group.to_string(), g.value.as_f64()))
            .collect()
    }

    fn startups() -> Table {
        table(
            &[COMPANY, LOCATION, EMPLOYEES, TOTAL_FUNDING, REVENUE_CAGR],
            vec![
                vec!["A".into(), "Munich".into(), Value::Integer(5), Value::Float(900.0), Value::Float(50.0)],
                vec!["B".into(), "Berlin".into(), Value::Integer(10), Value::Float(10.0), Value::Float(100.0)],
                vec!["C".into(), "Hamburg".into(), Value::Integer(7), Value::Null, Value::Null],
                vec!["D".into(), "Berlin".into(), Value::Integer(20), Value::Null, Value::Float(300.0)],
                vec!["E".into(), "Hamburg".into(), Value::Integer(1), Value::Float(2.5), Value::Float(80.0)],
                vec!["F".into(), "Berlin".into(), Value::Null, Value::Float(5.0), Value::Float(200.0)],
            ],
        )
    }

    #[test]
    fn sums_per_group_ranked_by_row_count() {
        let t = table(
            &[LOCATION, EMPLOYEES],
            vec![
                vec!["Berlin".into(), Value::Integer(10)],
                vec!["Berlin".into(), Value::Integer(20)],
                vec!["Munich".into(), Value::Integer(5)],
            ],
        );
        let out = aggregate(&t, LOCATION, EMPLOYEES, AggFn::Sum).unwrap();
        assert_eq!(
            pairs(&out),
            vec![("Berlin".to_string(), 30.0), ("Munich".to_string(), 5.0)]
        );
    }

    #[test]
    fn order_follows_row_count_not_the_displayed_metric() {
        let t = startups();
        let by_count = aggregate(&t, LOCATION, COMPANY, AggFn::Count).unwrap();
        let by_funding = aggregate(&t, LOCATION, TOTAL_FUNDING, AggFn::Sum).unwrap();
        let by_growth = aggregate(&t, LOCATION, REVENUE_CAGR, AggFn::Median);

        let groups = |out: &[GroupAggregate]| out.iter().map(|g| g.group.clone()).collect::<Vec<_>>();
        // Munich has by far the largest funding but only one row.
        assert_eq!(
            groups(&by_count),
            vec!["Berlin".into(), "Hamburg".into(), "Munich".into()]
        );
        assert_eq!(groups(&by_funding), groups(&by_count));
        assert_eq!(groups(&by_growth.unwrap()), groups(&by_count));
    }

    #[test]
    fn nulls_are_skipped_by_sum_and_median_but_counted() {
        let t = startups();
        let counts = aggregate(&t, LOCATION, TOTAL_FUNDING, AggFn::Count).unwrap();
        assert_eq!(counts[0].value, AggValue::Count(3));

        let sums = aggregate(&t, LOCATION, TOTAL_FUNDING, AggFn::Sum).unwrap();
        assert_eq!(
            pairs(&sums),
            vec![
                ("Berlin".to_string(), 15.0),
                ("Hamburg".to_string(), 2.5),
                ("Munich".to_string(), 900.0),
            ]
        );

        let medians = aggregate(&t, LOCATION, REVENUE_CAGR, AggFn::Median).unwrap();
        assert_eq!(medians[0].value, AggValue::Number(200.0));
        assert_eq!(medians[1].value, AggValue::Number(80.0));
    }

    #[test]
    fn median_of_an_all_null_group_is_an_error() {
        let t = table(
            &[LOCATION, REVENUE_CAGR],
            vec![
                vec!["Berlin".into(), Value::Float(10.0)],
                vec!["Kiel".into(), Value::Null],
            ],
        );
        let err = aggregate(&t, LOCATION, REVENUE_CAGR, AggFn::Median).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyGroup { group, .. } if group == "Kiel".into()));

        // Sums of the same group are simply zero.
        let sums = aggregate(&t, LOCATION, REVENUE_CAGR, AggFn::Sum).unwrap();
        assert_eq!(sums[1].value, AggValue::Number(0.0));
    }

    #[test]
    fn groups_without_a_median_can_be_left_out() {
        let t = table(
            &[LOCATION, REVENUE_CAGR],
            vec![
                vec!["Kiel".into(), Value::Null],
                vec!["Kiel".into(), Value::Null],
                vec!["Berlin".into(), Value::Float(10.0)],
                vec!["Munich".into(), Value::Float(30.0)],
                vec!["Munich".into(), Value::Float(50.0)],
            ],
        );
        let out = aggregate_present(&t, LOCATION, REVENUE_CAGR, AggFn::Median).unwrap();
        assert_eq!(
            pairs(&out),
            vec![("Munich".to_string(), 40.0), ("Berlin".to_string(), 10.0)]
        );
        assert!(matches!(
            aggregate_present(&t, LOCATION, "Valuation", AggFn::Median),
            Err(DashboardError::InvalidColumn { .. })
        ));
    }

    #[test]
    fn count_still_validates_the_value_column() {
        let t = startups();
        assert!(matches!(
            aggregate(&t, LOCATION, "Valuation", AggFn::Count),
            Err(DashboardError::InvalidColumn { name }) if name == "Valuation"
        ));
        assert!(matches!(
            aggregate(&t, "City", COMPANY, AggFn::Count),
            Err(DashboardError::InvalidColumn { .. })
        ));
    }

    #[test]
    fn summing_text_is_rejected() {
        let t = startups();
        assert!(matches!(
            aggregate(&t, LOCATION, COMPANY, AggFn::Sum),
            Err(DashboardError::NonNumeric { .. })
        ));
    }

    #[test]
    fn empty_table_has_no_groups() {
        let t = table(&[LOCATION, EMPLOYEES], vec![]);
        assert!(aggregate(&t, LOCATION, EMPLOYEES, AggFn::Median).unwrap().is_empty());
    }

    #[test]
    fn median_of_even_and_odd_lengths() {
        assert_eq!(median(&[40.0, 10.0, 30.0, 20.0]), Some(25.0));
        assert_eq!(median(&[30.0, 10.0, 20.0]), Some(20.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn spec_applies_its_triple() {
        let t = startups();
        let spec = AggregationSpec::new(LOCATION, EMPLOYEES, AggFn::Sum);
        assert_eq!(spec.apply(&t).unwrap(), aggregate(&t, LOCATION, EMPLOYEES, AggFn::Sum).unwrap());
        assert_eq!(spec.func.to_string(), "sum");
    }

    proptest! {
        /// Groups partition the table and sums match the non-null entries.
        #[test]
        fn prop_groups_partition_the_table(
            rows in prop::collection::vec((0..4usize, prop::option::of(0i64..1000)), 0..50)
        ) {
            let cities = ["Berlin", "Munich", "Hamburg", "Cologne"];
            let t = table(
                &[LOCATION, EMPLOYEES],
                rows.iter()
                    .map(|(c, e)| vec![cities[*c].into(), e.map(Value::Integer).unwrap_or(Value::Null)])
                    .collect(),
            );

            let counts = aggregate(&t, LOCATION, EMPLOYEES, AggFn::Count).unwrap();
            let sums = aggregate(&t, LOCATION, EMPLOYEES, AggFn::Sum).unwrap();

            prop_assert_eq!(counts.iter().map(|g| g.rows).sum::<usize>(), t.len());
            let mut seen: Vec<&Value> = counts.iter().map(|g| &g.group).collect();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), counts.len());

            for (count, sum) in counts.iter().zip(&sums) {
                prop_assert_eq!(&count.group, &sum.group);
                let expected_rows = rows.iter().filter(|(c, _)| Value::from(cities[*c]) == count.group).count();
                let expected_sum: i64 = rows
                    .iter()
                    .filter(|(c, _)| Value::from(cities[*c]) == count.group)
                    .filter_map(|(_, e)| *e)
                    .sum();
                prop_assert_eq!(count.value, AggValue::Count(expected_rows as u64));
                prop_assert_eq!(sum.value, AggValue::Number(expected_sum as f64));
            }
        }
    }
}
