use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info};

use crate::error::DashboardError;
use crate::fetch::{HttpClient, fetch_text};
use crate::parser::{Row, parse_table};
use crate::services::table_source::TableSource;

/// Reads sheets of a published Google Spreadsheet through the gviz query
/// endpoint.
pub struct GvizClient<C> {
    http: C,
    base_url: String,
    spreadsheet_id: String,
}

impl<C: HttpClient> GvizClient<C> {
    pub fn new(http: C, base_url: impl Into<String>, spreadsheet_id: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            spreadsheet_id: spreadsheet_id.into(),
        }
    }

    /// `{base}/spreadsheets/d/{id}/gviz/tq?tqx=out:json&sheet={name}`
    pub fn sheet_url(&self, sheet: &str) -> Result<Url, DashboardError> {
        let raw = format!(
            "{}/spreadsheets/d/{}/gviz/tq",
            self.base_url.trim_end_matches('/'),
            self.spreadsheet_id
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| DashboardError::Config(format!("invalid sheets base URL '{raw}': {e}")))?;
        url.query_pairs_mut()
            .append_pair("tqx", "out:json")
            .append_pair("sheet", sheet);
        Ok(url)
    }
}

#[async_trait]
impl<C: HttpClient> TableSource for GvizClient<C> {
    #[tracing::instrument(skip(self))]
    async fn fetch_table(&self, sheet: &str) -> Result<Vec<Row>, DashboardError> {
        let url = self.sheet_url(sheet)?;
        debug!(%url, "Requesting sheet");

        let body = fetch_text(&self.http, url.as_str(), &format!("sheet \"{sheet}\"")).await?;
        let rows = parse_table(sheet, &body)?;

        info!(rows = rows.len(), "Sheet loaded");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;

    #[test]
    fn test_sheet_url_encodes_name() {
        let client = GvizClient::new(BasicClient::new().unwrap(), "https://docs.google.com/", "abc123");
        let url = client.sheet_url("Account Metrics").unwrap();

        assert_eq!(url.path(), "/spreadsheets/d/abc123/gviz/tq");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("tqx".to_string(), "out:json".to_string()),
                ("sheet".to_string(), "Account Metrics".to_string()),
            ]
        );
    }

    #[test]
    fn test_sheet_url_rejects_bad_base() {
        let client = GvizClient::new(BasicClient::new().unwrap(), "not a url", "abc");
        assert!(matches!(client.sheet_url("x"), Err(DashboardError::Config(_))));
    }
}
