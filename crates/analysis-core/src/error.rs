use thiserror::Error;

use crate::Metric;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// A ratio operand broke its precondition (non-positive denominator or non-finite value).
    #[error("Invalid precondition for {metric}: {operand} must be {requirement} (got {value})")]
    InvalidPrecondition {
        metric: Metric,
        operand: &'static str,
        requirement: &'static str,
        value: f64,
    },

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Invalid company code: {0}")]
    InvalidCompanyCode(String),

    #[error("Data source error: {0}")]
    DataSource(String),
}

impl AnalysisError {
    pub fn is_invalid_precondition(&self) -> bool {
        matches!(self, AnalysisError::InvalidPrecondition { .. })
    }
}
