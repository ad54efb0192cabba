//! Ranked views over the latest snapshot: account overview, account spend,
//! campaign tables, and the spend/clicks trend.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use clap::ValueEnum;
use serde::Serialize;

use crate::analyzers::snapshot::{collection_dates, select_latest};
use crate::analyzers::types::{AccountOverviewRow, TrendPoint};
use crate::analyzers::utility::stable_sum;
use crate::records::{AccountRecord, MetricRecord};

/// Campaigns shown in the bar-chart view.
pub const TOP_CAMPAIGNS: usize = 10;

fn by_spend_desc(a: &MetricRecord, b: &MetricRecord) -> Ordering {
    b.spend.total_cmp(&a.spend)
}

/// Active accounts joined with their latest-snapshot row, highest spend
/// first. Accounts without a row are zero-filled.
pub fn account_overview(account_metrics: &[MetricRecord], accounts: &[AccountRecord]) -> Vec<AccountOverviewRow> {
    let latest = select_latest(account_metrics);
    let by_account: HashMap<&str, &MetricRecord> =
        latest.iter().map(|r| (r.account_id.as_str(), r)).collect();

    let mut rows: Vec<AccountOverviewRow> = accounts
        .iter()
        .filter(|a| a.active)
        .map(|acc| {
            let m = by_account.get(acc.account_id.as_str());
            let field = |f: fn(&MetricRecord) -> f64| m.map_or(0.0, |r| f(*r));
            AccountOverviewRow {
                account_id: acc.account_id.clone(),
                account_name: acc.account_name.clone(),
                spend: field(|r| r.spend),
                impressions: field(|r| r.impressions),
                clicks: field(|r| r.clicks),
                ctr: field(|r| r.ctr),
                conversions: field(|r| r.conversions),
                cpa: field(|r| r.cpa),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.spend.total_cmp(&a.spend));
    rows
}

/// Latest-snapshot account rows with non-zero spend, highest first.
pub fn account_spend(account_metrics: &[MetricRecord]) -> Vec<MetricRecord> {
    let mut rows: Vec<MetricRecord> = select_latest(account_metrics)
        .into_iter()
        .filter(|r| r.spend > 0.0)
        .collect();
    rows.sort_by(by_spend_desc);
    rows
}

/// Latest-snapshot campaigns by spend, highest first, optionally capped.
pub fn top_campaigns(campaign_metrics: &[MetricRecord], limit: Option<usize>) -> Vec<MetricRecord> {
    let mut rows = select_latest(campaign_metrics);
    rows.sort_by(by_spend_desc);
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

/// Sortable columns of the campaign table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CampaignColumn {
    CampaignName,
    AccountName,
    Spend,
    Impressions,
    Clicks,
    Ctr,
    Cpa,
    Conversions,
}

enum SortKey {
    Text(String),
    Number(f64),
}

impl CampaignColumn {
    fn key(self, r: &MetricRecord) -> SortKey {
        match self {
            CampaignColumn::CampaignName => {
                SortKey::Text(r.campaign_name.as_deref().unwrap_or_default().to_lowercase())
            }
            CampaignColumn::AccountName => SortKey::Text(r.account_name.to_lowercase()),
            CampaignColumn::Spend => SortKey::Number(r.spend),
            CampaignColumn::Impressions => SortKey::Number(r.impressions),
            CampaignColumn::Clicks => SortKey::Number(r.clicks),
            CampaignColumn::Ctr => SortKey::Number(r.ctr),
            CampaignColumn::Cpa => SortKey::Number(r.cpa),
            CampaignColumn::Conversions => SortKey::Number(r.conversions),
        }
    }
}

/// Sort state of the campaign table. Owned by whoever presents the table and
/// passed into [`SortState::apply`] on every redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub column: CampaignColumn,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: CampaignColumn::Spend,
            ascending: false,
        }
    }
}

impl SortState {
    /// Clicking the active column flips direction; a new column starts
    /// descending.
    pub fn toggle(self, column: CampaignColumn) -> Self {
        if self.column == column {
            Self {
                column,
                ascending: !self.ascending,
            }
        } else {
            Self {
                column,
                ascending: false,
            }
        }
    }

    /// Stable sort of `rows` by the current column and direction.
    pub fn apply(&self, rows: &[MetricRecord]) -> Vec<MetricRecord> {
        let mut sorted = rows.to_vec();
        sorted.sort_by(|a, b| {
            let ord = match (self.column.key(a), self.column.key(b)) {
                (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
                (SortKey::Text(x), SortKey::Text(y)) => x.cmp(&y),
                _ => Ordering::Equal,
            };
            if self.ascending { ord } else { ord.reverse() }
        });
        sorted
    }
}

/// Summed spend and clicks per collection date, oldest first.
pub fn trend(account_metrics: &[MetricRecord]) -> Vec<TrendPoint> {
    let mut by_date: BTreeMap<&str, Vec<&MetricRecord>> = BTreeMap::new();
    for r in account_metrics {
        by_date.entry(r.date_collected.as_str()).or_default().push(r);
    }

    collection_dates(account_metrics)
        .into_iter()
        .map(|date| {
            let rows = by_date.get(date.as_str()).map(Vec::as_slice).unwrap_or_default();
            TrendPoint {
                spend: stable_sum(rows.iter().map(|r| r.spend)),
                clicks: stable_sum(rows.iter().map(|r| r.clicks)),
                date,
            }
        })
        .collect()
}
