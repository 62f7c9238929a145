use std::path::PathBuf;

use crate::data::model::Value;

/// Result type alias for the data layer.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors raised while loading, filtering or summarising a table.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The source file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The source file exists but could not be parsed.
    #[error("malformed input in {}: {message}", path.display())]
    MalformedInput { path: PathBuf, message: String },

    /// A request named a column the table does not have.
    #[error("unknown column '{name}'")]
    InvalidColumn { name: String },

    /// A group had no values eligible for the requested aggregate.
    #[error("group '{group}' has no values in column '{column}'")]
    EmptyGroup { group: Value, column: String },

    /// A summary was requested over zero eligible values.
    #[error("column '{column}' has no values to summarise")]
    EmptyInput { column: String },

    /// A numeric aggregate hit a value that is not a number.
    #[error("column '{column}' holds non-numeric value '{value}'")]
    NonNumeric { column: String, value: Value },
}

impl DashboardError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        DashboardError::MalformedInput {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
