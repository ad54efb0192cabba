//! Runtime configuration resolved from the environment.
//!
//! The binary calls `dotenvy::dotenv()` first, so a `.env` file works too.

use std::time::Duration;

use crate::error::DashboardError;
use crate::services::table_source::SheetNames;

pub const DEFAULT_BASE_URL: &str = "https://docs.google.com";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub spreadsheet_id: String,
    pub base_url: String,
    pub sheets: SheetNames,
    pub access_token: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] if `SHEETS_SPREADSHEET_ID` is unset
    /// or a timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self, DashboardError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading keys through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DashboardError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = SheetNames::default();

        let spreadsheet_id = get("SHEETS_SPREADSHEET_ID")
            .ok_or_else(|| DashboardError::Config("SHEETS_SPREADSHEET_ID must be set".to_string()))?;

        let seconds = |key: &str, default: u64| -> Result<Duration, DashboardError> {
            match get(key) {
                None => Ok(Duration::from_secs(default)),
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| DashboardError::Config(format!("{key}='{raw}': {e}"))),
            }
        };

        Ok(Self {
            spreadsheet_id,
            base_url: get("SHEETS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            sheets: SheetNames {
                accounts: get("SHEET_ACCOUNTS").unwrap_or(defaults.accounts),
                account_metrics: get("SHEET_ACCOUNT_METRICS").unwrap_or(defaults.account_metrics),
                campaign_metrics: get("SHEET_CAMPAIGN_METRICS").unwrap_or(defaults.campaign_metrics),
                last_run: get("SHEET_LAST_RUN").unwrap_or(defaults.last_run),
            },
            access_token: get("SHEETS_ACCESS_TOKEN"),
            timeout: seconds("HTTP_TIMEOUT_SECS", 30)?,
            connect_timeout: seconds("HTTP_CONNECT_TIMEOUT_SECS", 10)?,
        })
    }
}
