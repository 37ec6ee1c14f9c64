use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::Column;

/// Errors surfaced by the data layer.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The source file is missing, unreadable, or malformed.
    #[error("employee data unavailable at {}: {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// A numeric aggregation was requested over a text column.
    #[error("column {0} is not numeric")]
    NonNumericColumn(Column),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
