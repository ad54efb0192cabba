//! Value types produced by the analyzers.

use serde::Serialize;

/// Totals over a cohort of metric records, with ratios re-derived from the
/// totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateMetrics {
    pub spend: f64,
    pub impressions: f64,
    pub reach: f64,
    pub clicks: f64,
    pub conversions: f64,

    pub ctr: f64,
    pub cpc: f64,
    pub cpm: f64,
    pub cpa: f64,
    pub frequency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

/// Period-over-period change of a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Delta {
    pub relative_change_percent: f64,
    pub direction: Direction,
    pub is_favorable: bool,
}

/// The metrics shown on the KPI board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiKind {
    Spend,
    Impressions,
    Clicks,
    Ctr,
    Cpc,
    Cpm,
    Conversions,
    Cpa,
}

impl KpiKind {
    pub const ALL: [KpiKind; 8] = [
        KpiKind::Spend,
        KpiKind::Impressions,
        KpiKind::Clicks,
        KpiKind::Ctr,
        KpiKind::Cpc,
        KpiKind::Cpm,
        KpiKind::Conversions,
        KpiKind::Cpa,
    ];

    /// Cost metrics, where a decrease is the good outcome.
    pub fn inverse_polarity(self) -> bool {
        matches!(self, KpiKind::Cpc | KpiKind::Cpm | KpiKind::Cpa)
    }

    pub fn value(self, m: &AggregateMetrics) -> f64 {
        match self {
            KpiKind::Spend => m.spend,
            KpiKind::Impressions => m.impressions,
            KpiKind::Clicks => m.clicks,
            KpiKind::Ctr => m.ctr,
            KpiKind::Cpc => m.cpc,
            KpiKind::Cpm => m.cpm,
            KpiKind::Conversions => m.conversions,
            KpiKind::Cpa => m.cpa,
        }
    }
}

/// Whether a KPI gets a delta badge, and why not when it doesn't.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DeltaState {
    /// No previous snapshot exists, so no delta can be computed.
    NoPrior,
    /// Both periods are zero.
    Flat,
    /// The metric itself is not meaningful this period (cpa with no conversions).
    Unavailable,
    Shown(Delta),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpi {
    pub kind: KpiKind,
    pub value: f64,
    pub delta: DeltaState,
}

/// A row of the all-accounts overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountOverviewRow {
    pub account_id: String,
    pub account_name: String,
    pub spend: f64,
    pub impressions: f64,
    pub clicks: f64,
    pub ctr: f64,
    pub conversions: f64,
    pub cpa: f64,
}

/// Summed spend and clicks for one collection date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub spend: f64,
    pub clicks: f64,
}
