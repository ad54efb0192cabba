//! Loading the four source sheets and deriving the dashboard views.
//!
//! `load_dashboard` is the only async step: it fans out one request per
//! sheet and waits for all of them. Every view after that is a synchronous
//! recomputation over the loaded records.

use serde::Serialize;
use tracing::info;

use crate::analyzers::filter::{ALL_ACCOUNTS, filter_by_account};
use crate::analyzers::kpi::kpi_board;
use crate::analyzers::ranking::{self, SortState};
use crate::analyzers::snapshot::{SnapshotScope, select_latest, select_snapshots};
use crate::analyzers::types::{AccountOverviewRow, Kpi, TrendPoint};
use crate::error::DashboardError;
use crate::records::{AccountRecord, LastRun, LastRunAt, MetricRecord};
use crate::services::table_source::{SheetNames, TableSource};

/// Everything read from the source in one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardData {
    pub accounts: Vec<AccountRecord>,
    pub account_metrics: Vec<MetricRecord>,
    pub campaign_metrics: Vec<MetricRecord>,
    pub last_run: Vec<LastRun>,
}

/// Fetches all four sheets concurrently. Any single failure fails the load.
///
/// # Errors
///
/// Returns the first [`DashboardError`] raised by any sheet.
#[tracing::instrument(skip(source))]
pub async fn load_dashboard<S: TableSource + ?Sized>(
    source: &S,
    sheets: &SheetNames,
) -> Result<DashboardData, DashboardError> {
    let (accounts, account_metrics, campaign_metrics, last_run) = tokio::try_join!(
        source.fetch_table(&sheets.accounts),
        source.fetch_table(&sheets.account_metrics),
        source.fetch_table(&sheets.campaign_metrics),
        source.fetch_table(&sheets.last_run),
    )?;

    let data = DashboardData {
        accounts: accounts.iter().map(AccountRecord::from_row).collect(),
        account_metrics: account_metrics.iter().map(MetricRecord::from_row).collect(),
        campaign_metrics: campaign_metrics.iter().map(MetricRecord::from_row).collect(),
        last_run: last_run.iter().map(LastRun::from_row).collect(),
    };

    info!(
        accounts = data.accounts.len(),
        account_metrics = data.account_metrics.len(),
        campaign_metrics = data.campaign_metrics.len(),
        "Dashboard data loaded"
    );
    Ok(data)
}

impl DashboardData {
    pub fn active_accounts(&self) -> impl Iterator<Item = &AccountRecord> {
        self.accounts.iter().filter(|a| a.active)
    }

    /// First active account, or the all-accounts sentinel when none is active.
    pub fn default_account(&self) -> &str {
        self.active_accounts()
            .next()
            .map_or(ALL_ACCOUNTS, |a| a.account_id.as_str())
    }

    /// The most recent collector run, from the last row of the marker sheet.
    pub fn last_run_at(&self) -> Option<LastRunAt> {
        self.last_run.last().and_then(LastRun::resolve)
    }

    pub fn kpis(&self, account_id: &str, scope: SnapshotScope) -> Vec<Kpi> {
        kpi_board(&select_snapshots(&self.account_metrics, account_id, scope))
    }

    /// Only meaningful for the all-accounts view.
    pub fn account_overview(&self) -> Vec<AccountOverviewRow> {
        ranking::account_overview(&self.account_metrics, &self.accounts)
    }

    pub fn account_spend(&self) -> Vec<MetricRecord> {
        ranking::account_spend(&self.account_metrics)
    }

    /// Latest-snapshot campaigns of `account_id` ordered by `sort`.
    pub fn campaigns(&self, account_id: &str, sort: SortState, limit: Option<usize>) -> Vec<MetricRecord> {
        let scoped = filter_by_account(&self.campaign_metrics, account_id);
        let mut rows = sort.apply(&select_latest(&scoped));
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        rows
    }

    /// The bar-chart view: highest-spend latest campaigns of `account_id`.
    pub fn top_campaigns(&self, account_id: &str) -> Vec<MetricRecord> {
        let scoped = filter_by_account(&self.campaign_metrics, account_id);
        ranking::top_campaigns(&scoped, Some(ranking::TOP_CAMPAIGNS))
    }

    pub fn trend(&self, account_id: &str) -> Vec<TrendPoint> {
        ranking::trend(&filter_by_account(&self.account_metrics, account_id))
    }
}
