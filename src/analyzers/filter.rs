use crate::records::MetricRecord;

/// Account selector value meaning "no account scoping".
pub const ALL_ACCOUNTS: &str = "all";

/// Keeps the records of one account, in their original order. The
/// [`ALL_ACCOUNTS`] sentinel passes everything through.
pub fn filter_by_account(records: &[MetricRecord], account_id: &str) -> Vec<MetricRecord> {
    if account_id == ALL_ACCOUNTS {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| r.account_id == account_id)
        .cloned()
        .collect()
}
