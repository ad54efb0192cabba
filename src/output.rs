//! Output formatting and persistence for dashboard views.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::records::MetricRecord;
use csv::WriterBuilder;
use std::fs::File;

/// Logs a view using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl std::fmt::Debug) {
    debug!("{:#?}", value);
}

/// Renders a view as pretty-printed JSON.
pub fn to_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Flat CSV shape of a campaign row.
#[derive(Debug, Serialize)]
struct CampaignCsvRow<'a> {
    date_collected: &'a str,
    account_id: &'a str,
    account_name: &'a str,
    campaign_id: &'a str,
    campaign_name: &'a str,
    spend: f64,
    impressions: f64,
    clicks: f64,
    ctr: f64,
    cpa: f64,
    conversions: f64,
}

impl<'a> From<&'a MetricRecord> for CampaignCsvRow<'a> {
    fn from(r: &'a MetricRecord) -> Self {
        Self {
            date_collected: &r.date_collected,
            account_id: &r.account_id,
            account_name: &r.account_name,
            campaign_id: r.campaign_id.as_deref().unwrap_or_default(),
            campaign_name: r.campaign_name.as_deref().unwrap_or_default(),
            spend: r.spend,
            impressions: r.impressions,
            clicks: r.clicks,
            ctr: r.ctr,
            cpa: r.cpa,
            conversions: r.conversions,
        }
    }
}

/// Writes ranked campaigns to `path`, replacing any existing file.
pub fn write_campaigns_csv(path: &str, campaigns: &[MetricRecord]) -> Result<()> {
    debug!(path, rows = campaigns.len(), "Writing campaign CSV");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for campaign in campaigns {
        writer.serialize(CampaignCsvRow::from(campaign))?;
    }
    writer.flush()?;

    info!(path, rows = campaigns.len(), "Campaign CSV written");
    Ok(())
}
