use crate::data::aggregate::{AggFn, AggregationSpec, GroupAggregate};
use crate::data::columns::{COMPANY, EMPLOYEES, INDUSTRY, LOCATION, REVENUE_CAGR, TOTAL_FUNDING};
use crate::data::filter::{filter, ConstraintSet, Selection};
use crate::data::model::Table;
use crate::data::summary::Scorecards;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Chart layout
// ---------------------------------------------------------------------------

/// One bar chart: a title and the aggregation it plots.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub aggregation: AggregationSpec,
}

/// The four charts shown for one grouping column, left to right.
pub fn chart_row(group_by: &str) -> Vec<ChartSpec> {
    vec![
        ChartSpec {
            title: "Number of Startups in Top 50",
            aggregation: AggregationSpec::new(group_by, COMPANY, AggFn::Count),
        },
        ChartSpec {
            title: "Number of Employees",
            aggregation: AggregationSpec::new(group_by, EMPLOYEES, AggFn::Sum),
        },
        ChartSpec {
            title: "Total Funding (€M)",
            aggregation: AggregationSpec::new(group_by, TOTAL_FUNDING, AggFn::Sum),
        },
        ChartSpec {
            title: "Median Revenue Grow (2-yr CAGR %)",
            aggregation: AggregationSpec::new(group_by, REVENUE_CAGR, AggFn::Median),
        },
    ]
}

/// A computed chart, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub spec: ChartSpec,
    pub bars: Vec<GroupAggregate>,
}

/// Charts sharing one grouping column.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub group_by: &'static str,
    pub charts: Vec<ChartSeries>,
}

impl ChartRow {
    /// Groups with nothing to take a median of get no bar in the median chart;
    /// every other chart still lists them.
    fn compute(table: &Table, group_by: &'static str) -> Result<Self> {
        let charts = chart_row(group_by)
            .into_iter()
            .map(|spec| {
                let bars = spec.aggregation.apply_present(table)?;
                Ok(ChartSeries { spec, bars })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ChartRow { group_by, charts })
    }
}

// ---------------------------------------------------------------------------
// Dashboard view
// ---------------------------------------------------------------------------

/// Everything the page shows for one pair of selections.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Headline figures over the whole table, independent of the selections.
    pub scorecards: Scorecards,
    pub rows: Vec<ChartRow>,
    pub filtered: Table,
}

impl DashboardView {
    /// Filter `base` by city and industry, then build scorecards and both chart rows.
    pub fn compute(base: &Table, location: &Selection, industry: &Selection) -> Result<Self> {
        let mut constraints = ConstraintSet::new();
        constraints.insert(LOCATION.to_string(), location.clone());
        constraints.insert(INDUSTRY.to_string(), industry.clone());

        let filtered = filter(base, &constraints)?;
        log::debug!(
            "Recomputing dashboard: {} of {} rows for city={location}, industry={industry}",
            filtered.len(),
            base.len()
        );

        Ok(DashboardView {
            scorecards: Scorecards::compute(base)?,
            rows: vec![
                ChartRow::compute(&filtered, LOCATION)?,
                ChartRow::compute(&filtered, INDUSTRY)?,
            ],
            filtered,
        })
    }
}
