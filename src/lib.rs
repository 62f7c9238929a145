//! Startup growth dashboard: load a ranking table, filter it by city and
//! industry, and chart per-category counts, sums and medians.

pub mod app;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use data::aggregate::{aggregate, AggFn, AggValue, AggregationSpec, GroupAggregate};
pub use data::cache::TableCache;
pub use data::filter::{filter, ConstraintSet, Selection};
pub use data::loader::load_file;
pub use data::model::{Record, Table, Value};
pub use data::summary::{median_of, sum_of, total_rows, Scorecards};
pub use error::{DashboardError, Result};
