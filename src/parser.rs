//! Parser for Google Visualization (gviz) table payloads.
//!
//! A published sheet answers `tqx=out:json` queries with a JSONP-style body:
//! `google.visualization.Query.setResponse({...});`. This module strips the
//! wrapper, checks the status and flattens the table into string-keyed rows.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{CellParseError, DashboardError};

static ENVELOPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)google\.visualization\.Query\.setResponse\((.+)\);?\s*$")
        .expect("valid envelope regex")
});

static DATE_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Date\((\d+),(\d+),(\d+)\)").expect("valid date cell regex")
});

/// A normalized cell value. Empty and null cells become `Text("")`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FieldValue {
    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    /// Lenient numeric view: anything that is not a finite number is 0.
    pub fn as_number(&self) -> f64 {
        let n = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            FieldValue::Bool(b) => f64::from(u8::from(*b)),
        };
        if n.is_finite() { n } else { 0.0 }
    }

    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Bool(b) => b.to_string(),
        }
    }
}

/// One parsed sheet row keyed by column label.
pub type Row = HashMap<String, FieldValue>;

#[derive(Debug, Deserialize)]
struct GvizResponse {
    status: Option<String>,
    #[serde(default)]
    errors: Vec<GvizError>,
    table: Option<GvizTable>,
}

#[derive(Debug, Deserialize)]
struct GvizError {
    message: Option<String>,
    detailed_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    #[serde(default)]
    cols: Vec<GvizColumn>,
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizColumn {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Value,
    #[serde(default)]
    f: Option<String>,
}

/// Parses a raw gviz response body into rows, one per table row, in order.
///
/// # Errors
///
/// Returns [`DashboardError::Format`] when the wrapper or JSON body is
/// malformed, and [`DashboardError::Upstream`] when the payload reports
/// `"status": "error"`.
pub fn parse_table(sheet: &str, body: &str) -> Result<Vec<Row>, DashboardError> {
    let json = ENVELOPE
        .captures(body)
        .and_then(|c| c.get(1))
        .ok_or_else(|| {
            DashboardError::Format(format!("Invalid response format from sheet \"{sheet}\""))
        })?
        .as_str();

    let response: GvizResponse = serde_json::from_str(json).map_err(|e| {
        DashboardError::Format(format!("Invalid JSON payload from sheet \"{sheet}\": {e}"))
    })?;

    if response.status.as_deref() == Some("error") {
        let detail = response
            .errors
            .into_iter()
            .next()
            .and_then(|e| e.detailed_message.or(e.message))
            .unwrap_or_else(|| "Unknown".to_string());
        return Err(DashboardError::Upstream { detail });
    }

    let table = response.table.ok_or_else(|| {
        DashboardError::Format(format!("Response from sheet \"{sheet}\" has no table"))
    })?;

    let headers: Vec<Option<String>> = table
        .cols
        .iter()
        .map(|col| {
            [col.label.as_deref(), col.id.as_deref()]
                .into_iter()
                .flatten()
                .find(|s| !s.is_empty())
                .map(str::to_string)
        })
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            row.c
                .iter()
                .zip(&headers)
                .filter_map(|(cell, header)| {
                    let header = header.as_ref()?;
                    Some((header.clone(), cell_value(cell.as_ref())))
                })
                .collect::<Row>()
        })
        .collect::<Vec<_>>();

    debug!(sheet, columns = headers.len(), rows = rows.len(), "Parsed gviz table");
    Ok(rows)
}

fn cell_value(cell: Option<&GvizCell>) -> FieldValue {
    let Some(cell) = cell else {
        return FieldValue::empty();
    };

    match &cell.v {
        Value::Null => FieldValue::empty(),
        Value::String(s) if s.starts_with("Date(") => match parse_date_cell(s) {
            Ok(iso) => FieldValue::Text(iso),
            Err(e) => {
                debug!(error = %e, "Falling back to formatted cell value");
                match cell.f.as_deref() {
                    Some(f) if !f.is_empty() => FieldValue::Text(f.to_string()),
                    _ => FieldValue::Text(s.clone()),
                }
            }
        },
        Value::String(s) => FieldValue::Text(s.clone()),
        Value::Number(n) => FieldValue::Number(n.as_f64().unwrap_or(0.0)),
        Value::Bool(b) => FieldValue::Bool(*b),
        other => FieldValue::Text(other.to_string()),
    }
}

/// Converts a gviz `Date(year,zeroBasedMonth,day)` cell into `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns a [`CellParseError`] if the pattern does not match or a component
/// does not fit in an integer.
pub fn parse_date_cell(raw: &str) -> Result<String, CellParseError> {
    let caps = DATE_CELL
        .captures(raw)
        .ok_or_else(|| CellParseError::DatePattern(raw.to_string()))?;

    let component = |i: usize| -> Result<u32, CellParseError> {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .ok_or_else(|| CellParseError::DateRange(raw.to_string()))
    };

    let year = caps.get(1).map_or("", |m| m.as_str());
    let month = component(2)?
        .checked_add(1)
        .ok_or_else(|| CellParseError::DateRange(raw.to_string()))?;
    let day = component(3)?;

    Ok(format!("{year}-{month:02}-{day:02}"))
}
