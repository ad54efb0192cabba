use crate::analyzers::types::AggregateMetrics;
use crate::analyzers::utility::{ratio, stable_sum};
use crate::records::MetricRecord;

/// Sums the raw counters of `records` and re-derives every ratio from those
/// sums.
///
/// The per-row `ctr`/`cpc`/`cpm`/`cpa`/`frequency` values are never read:
/// the ratio of sums is not the mean of ratios.
pub fn aggregate(records: &[MetricRecord]) -> AggregateMetrics {
    if records.is_empty() {
        return AggregateMetrics::default();
    }

    let spend = stable_sum(records.iter().map(|r| r.spend));
    let impressions = stable_sum(records.iter().map(|r| r.impressions));
    let reach = stable_sum(records.iter().map(|r| r.reach));
    let clicks = stable_sum(records.iter().map(|r| r.clicks));
    let conversions = stable_sum(records.iter().map(|r| r.conversions));

    AggregateMetrics {
        spend,
        impressions,
        reach,
        clicks,
        conversions,
        ctr: ratio(clicks, impressions, 100.0),
        cpc: ratio(spend, clicks, 1.0),
        cpm: ratio(spend, impressions, 1000.0),
        cpa: ratio(spend, conversions, 1.0),
        frequency: ratio(impressions, reach, 1.0),
    }
}
