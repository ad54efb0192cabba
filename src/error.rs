//! Error types for the dashboard pipeline.

use thiserror::Error;

/// Whole-load failures. Any of these aborts the pipeline before aggregation.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Transport failure or a non-success HTTP status.
    #[error("{0}")]
    Fetch(String),

    /// The payload did not carry the expected envelope.
    #[error("{0}")]
    Format(String),

    /// The source answered with an explicit error status.
    #[error("Sheet error: {detail}")]
    Upstream { detail: String },

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A single cell that could not be decoded. Recovered inside the parser.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CellParseError {
    #[error("cell '{0}' does not match Date(year,month,day)")]
    DatePattern(String),

    #[error("date component out of range in '{0}'")]
    DateRange(String),
}
