//! Snapshot selection by collection date.
//!
//! `date_collected` is an ISO `YYYY-MM-DD` string, so lexicographic order is
//! chronological order.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::analyzers::filter::filter_by_account;
use crate::records::MetricRecord;

/// Distinct collection dates, ascending.
pub fn collection_dates(records: &[MetricRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.date_collected.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn cohort(records: &[MetricRecord], date: Option<&String>) -> Vec<MetricRecord> {
    match date {
        Some(date) => records
            .iter()
            .filter(|r| &r.date_collected == date)
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

/// Records from the most recent collection date.
pub fn select_latest(records: &[MetricRecord]) -> Vec<MetricRecord> {
    let dates = collection_dates(records);
    cohort(records, dates.last())
}

/// Records from the second most recent collection date; empty when fewer
/// than two dates exist.
pub fn select_previous(records: &[MetricRecord]) -> Vec<MetricRecord> {
    let dates = collection_dates(records);
    let previous = dates.len().checked_sub(2).and_then(|i| dates.get(i));
    cohort(records, previous)
}

/// Which record set decides the "latest" and "previous" dates when an
/// account is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotScope {
    /// Dates come from the account's own rows. An account that skipped a
    /// collection compares against its own last collection.
    #[default]
    Filtered,
    /// Dates come from all accounts. An account missing from a global
    /// collection gets an empty cohort for that date.
    Global,
}

/// The current and previous cohorts of one account (or all accounts).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotPair {
    pub latest: Vec<MetricRecord>,
    pub previous: Vec<MetricRecord>,
}

/// Scopes `records` to `account_id` and picks its latest/previous cohorts
/// according to `scope`.
pub fn select_snapshots(records: &[MetricRecord], account_id: &str, scope: SnapshotScope) -> SnapshotPair {
    match scope {
        SnapshotScope::Filtered => {
            let scoped = filter_by_account(records, account_id);
            SnapshotPair {
                latest: select_latest(&scoped),
                previous: select_previous(&scoped),
            }
        }
        SnapshotScope::Global => SnapshotPair {
            latest: filter_by_account(&select_latest(records), account_id),
            previous: filter_by_account(&select_previous(records), account_id),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(account: &str, date: &str, spend: f64) -> MetricRecord {
        MetricRecord {
            account_id: account.into(),
            date_collected: date.into(),
            spend,
            ..Default::default()
        }
    }

    fn three_weeks() -> Vec<MetricRecord> {
        vec![
            rec("a", "2024-01-08", 2.0),
            rec("a", "2024-01-15", 3.0),
            rec("a", "2024-01-01", 1.0),
            rec("b", "2024-01-15", 30.0),
            rec("b", "2024-01-08", 20.0),
        ]
    }

    fn dates_of(records: &[MetricRecord]) -> Vec<&str> {
        records.iter().map(|r| r.date_collected.as_str()).collect()
    }

    #[test]
    fn test_select_latest_and_previous() {
        let records = three_weeks();

        let latest = select_latest(&records);
        assert_eq!(dates_of(&latest), vec!["2024-01-15", "2024-01-15"]);
        assert_eq!(latest[0].spend, 3.0);
        assert_eq!(latest[1].spend, 30.0);

        let previous = select_previous(&records);
        assert_eq!(dates_of(&previous), vec!["2024-01-08", "2024-01-08"]);
    }

    #[test]
    fn test_single_date_has_no_previous() {
        let records = vec![rec("a", "2024-01-15", 1.0), rec("b", "2024-01-15", 2.0)];
        assert_eq!(select_latest(&records).len(), 2);
        assert!(select_previous(&records).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(select_latest(&[]).is_empty());
        assert!(select_previous(&[]).is_empty());
        assert!(collection_dates(&[]).is_empty());
    }

    #[test]
    fn test_collection_dates_sorted_distinct() {
        assert_eq!(
            collection_dates(&three_weeks()),
            vec!["2024-01-01", "2024-01-08", "2024-01-15"]
        );
    }

    #[test]
    fn test_scope_differs_for_misaligned_accounts() {
        // Account "c" missed the 2024-01-15 collection.
        let mut records = three_weeks();
        records.push(rec("c", "2024-01-01", 5.0));
        records.push(rec("c", "2024-01-08", 6.0));

        let filtered = select_snapshots(&records, "c", SnapshotScope::Filtered);
        assert_eq!(dates_of(&filtered.latest), vec!["2024-01-08"]);
        assert_eq!(dates_of(&filtered.previous), vec!["2024-01-01"]);

        let global = select_snapshots(&records, "c", SnapshotScope::Global);
        assert!(global.latest.is_empty());
        assert_eq!(dates_of(&global.previous), vec!["2024-01-08"]);
    }

    #[test]
    fn test_scope_agrees_for_aligned_accounts() {
        let records = three_weeks();
        assert_eq!(
            select_snapshots(&records, "b", SnapshotScope::Filtered),
            select_snapshots(&records, "b", SnapshotScope::Global)
        );
    }
}
