//! Typed records built from parsed sheet rows.
//!
//! Every column is defaulted here: a missing or malformed counter is 0, a
//! missing text column is empty. Nothing downstream sees an untyped row.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::parser::{FieldValue, Row};

fn text(row: &Row, key: &str) -> String {
    row.get(key).map(FieldValue::as_text).unwrap_or_default()
}

fn optional_text(row: &Row, key: &str) -> Option<String> {
    let value = text(row, key);
    if value.trim().is_empty() { None } else { Some(value) }
}

fn number(row: &Row, key: &str) -> f64 {
    row.get(key).map_or(0.0, FieldValue::as_number)
}

/// An advertising account from the `Accounts` sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountRecord {
    pub account_id: String,
    pub account_name: String,
    pub active: bool,
}

impl AccountRecord {
    pub fn from_row(row: &Row) -> Self {
        let active = match row.get("active") {
            Some(FieldValue::Bool(b)) => *b,
            Some(other) => other.as_text().eq_ignore_ascii_case("true"),
            None => false,
        };

        Self {
            account_id: text(row, "account_id"),
            account_name: text(row, "account_name"),
            active,
        }
    }
}

/// One collected metrics row, either account-level or campaign-level.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricRecord {
    pub account_id: String,
    pub account_name: String,
    pub campaign_id: Option<String>,
    pub campaign_name: Option<String>,
    pub date_collected: String,

    // raw counters
    pub spend: f64,
    pub impressions: f64,
    pub reach: f64,
    pub clicks: f64,
    pub conversions: f64,

    // derived, as reported by the collector for this row only
    pub ctr: f64,
    pub cpc: f64,
    pub cpm: f64,
    pub cpa: f64,
    pub frequency: f64,
}

impl MetricRecord {
    pub fn from_row(row: &Row) -> Self {
        Self {
            account_id: text(row, "account_id"),
            account_name: text(row, "account_name"),
            campaign_id: optional_text(row, "campaign_id"),
            campaign_name: optional_text(row, "campaign_name"),
            date_collected: text(row, "date_collected"),
            spend: number(row, "spend"),
            impressions: number(row, "impressions"),
            reach: number(row, "reach"),
            clicks: number(row, "clicks"),
            conversions: number(row, "conversions"),
            ctr: number(row, "ctr"),
            cpc: number(row, "cpc"),
            cpm: number(row, "cpm"),
            cpa: number(row, "cpa"),
            frequency: number(row, "frequency"),
        }
    }
}

/// The collector's last-run marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastRun {
    pub last_run_timestamp: String,
}

/// A last-run marker resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LastRunAt {
    Parsed(NaiveDateTime),
    Raw(String),
}

impl LastRun {
    pub fn from_row(row: &Row) -> Self {
        Self {
            last_run_timestamp: text(row, "last_run_timestamp"),
        }
    }

    /// Interprets the timestamp, keeping the raw text when it is not a
    /// recognizable date-time. `None` when the marker is blank.
    pub fn resolve(&self) -> Option<LastRunAt> {
        let raw = self.last_run_timestamp.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(LastRunAt::Parsed(dt.with_timezone(&Utc).naive_utc()));
        }

        ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(LastRunAt::Parsed)
            .or_else(|| Some(LastRunAt::Raw(raw.to_string())))
    }
}
