//! Trait and types for a tabular data source with named sheets.

use crate::error::DashboardError;
use crate::parser::Row;

/// Names of the four sheets the dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetNames {
    pub accounts: String,
    pub account_metrics: String,
    pub campaign_metrics: String,
    pub last_run: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            accounts: "Accounts".to_string(),
            account_metrics: "Account Metrics".to_string(),
            campaign_metrics: "Campaign Metrics".to_string(),
            last_run: "Last Run".to_string(),
        }
    }
}

/// Abstraction over a spreadsheet-like provider (e.g., a published Google Sheet).
#[async_trait::async_trait]
pub trait TableSource: Send + Sync {
    /// Returns every row of `sheet`, in sheet order.
    async fn fetch_table(&self, sheet: &str) -> Result<Vec<Row>, DashboardError>;
}
