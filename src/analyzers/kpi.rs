//! KPI board: current totals plus a delta badge per metric.

use crate::analyzers::aggregate::aggregate;
use crate::analyzers::delta::compute_delta;
use crate::analyzers::snapshot::SnapshotPair;
use crate::analyzers::types::{DeltaState, Direction, Kpi, KpiKind};

/// Builds the eight KPIs for a latest/previous cohort pair.
///
/// A missing previous cohort and a both-zero comparison both hide the badge,
/// but are reported as different states.
pub fn kpi_board(snapshots: &SnapshotPair) -> Vec<Kpi> {
    let current = aggregate(&snapshots.latest);
    let previous = aggregate(&snapshots.previous);
    let has_previous = !snapshots.previous.is_empty();

    KpiKind::ALL
        .iter()
        .map(|&kind| {
            let value = kind.value(&current);

            let delta = if !has_previous {
                DeltaState::NoPrior
            } else if kind == KpiKind::Cpa && value <= 0.0 {
                DeltaState::Unavailable
            } else {
                let delta = compute_delta(value, kind.value(&previous), kind.inverse_polarity());
                if delta.direction == Direction::Flat {
                    DeltaState::Flat
                } else {
                    DeltaState::Shown(delta)
                }
            };

            Kpi { kind, value, delta }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::MetricRecord;

    fn rec(date: &str, spend: f64, impressions: f64, clicks: f64, conversions: f64) -> MetricRecord {
        MetricRecord {
            account_id: "a".into(),
            date_collected: date.into(),
            spend,
            impressions,
            clicks,
            conversions,
            ..Default::default()
        }
    }

    fn find(board: &[Kpi], kind: KpiKind) -> Kpi {
        *board.iter().find(|k| k.kind == kind).unwrap()
    }

    #[test]
    fn test_no_previous_hides_all_deltas() {
        let pair = SnapshotPair {
            latest: vec![rec("2024-01-15", 10.0, 100.0, 5.0, 1.0)],
            previous: vec![],
        };
        let board = kpi_board(&pair);
        assert_eq!(board.len(), 8);
        assert!(board.iter().all(|k| k.delta == DeltaState::NoPrior));
        assert_eq!(find(&board, KpiKind::Spend).value, 10.0);
    }

    #[test]
    fn test_deltas_and_polarity() {
        let pair = SnapshotPair {
            latest: vec![rec("2024-01-15", 150.0, 1000.0, 10.0, 0.0)],
            previous: vec![rec("2024-01-08", 100.0, 1000.0, 20.0, 0.0)],
        };
        let board = kpi_board(&pair);

        match find(&board, KpiKind::Spend).delta {
            DeltaState::Shown(d) => {
                assert_eq!(d.relative_change_percent, 50.0);
                assert!(d.is_favorable);
            }
            other => panic!("unexpected {other:?}"),
        }

        // cpc went from 5 to 15: up, and bad.
        match find(&board, KpiKind::Cpc).delta {
            DeltaState::Shown(d) => {
                assert_eq!(d.direction, Direction::Up);
                assert!(!d.is_favorable);
            }
            other => panic!("unexpected {other:?}"),
        }

        // No conversions in either period.
        assert_eq!(find(&board, KpiKind::Conversions).delta, DeltaState::Flat);
        assert_eq!(find(&board, KpiKind::Cpa).delta, DeltaState::Unavailable);
    }
}
