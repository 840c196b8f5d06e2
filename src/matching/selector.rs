//! Candidate selection: cheap filters that bound the scoring work
//!
//! Pure reads only. The selector never raises domain errors; an empty
//! result simply means the transaction has nothing plausible to match.

use chrono::Duration;
use std::collections::HashSet;

use crate::matching::scorer::relative_amount_diff;
use crate::matching::MatchConfig;
use crate::types::{ImportedTransaction, LedgerEntry};

/// Inclusive due-date window for a transaction's candidates
///
/// Bank settlement commonly lags the due date, so the window is
/// asymmetric: due dates well before the transaction are plausible, due
/// dates after it much less so.
pub(crate) fn due_window(
    tx: &ImportedTransaction,
    config: &MatchConfig,
) -> (chrono::NaiveDate, chrono::NaiveDate) {
    let earliest_due = tx.transaction_date - Duration::days(config.settlement_lag_days as i64);
    let latest_due = tx.transaction_date + Duration::days(config.early_settlement_days as i64);
    (earliest_due, latest_due)
}

/// Select plausible ledger entries for a transaction, bounded by the
/// configured cap
///
/// Filters are applied cheapest first and short-circuit on an empty
/// intermediate result:
///
/// 1. direction must match exactly (hard filter, never relaxed)
/// 2. the entry must not be in `claimed` (already held by an active link)
/// 3. due date within the settlement window of the transaction date
/// 4. coarse relative amount band
///
/// Survivors are ordered by absolute date distance, then amount
/// closeness, then entry id, and truncated to `config.candidate_cap`.
pub fn select_candidates(
    tx: &ImportedTransaction,
    entries: &[LedgerEntry],
    claimed: &HashSet<i64>,
    config: &MatchConfig,
) -> Vec<LedgerEntry> {
    let mut survivors: Vec<&LedgerEntry> = entries
        .iter()
        .filter(|entry| entry.direction == tx.direction)
        .collect();
    if survivors.is_empty() {
        return Vec::new();
    }

    survivors.retain(|entry| !claimed.contains(&entry.id));
    if survivors.is_empty() {
        return Vec::new();
    }

    let (earliest_due, latest_due) = due_window(tx, config);
    survivors.retain(|entry| entry.due_date >= earliest_due && entry.due_date <= latest_due);
    if survivors.is_empty() {
        return Vec::new();
    }

    survivors.retain(|entry| {
        relative_amount_diff(&entry.amount, &tx.amount) <= config.amount_band
    });

    survivors.sort_by(|a, b| {
        let date_a = (a.due_date - tx.transaction_date).num_days().abs();
        let date_b = (b.due_date - tx.transaction_date).num_days().abs();
        let amount_a = (&a.amount - &tx.amount).abs();
        let amount_b = (&b.amount - &tx.amount).abs();
        date_a
            .cmp(&date_b)
            .then(amount_a.cmp(&amount_b))
            .then(a.id.cmp(&b.id))
    });

    survivors
        .into_iter()
        .take(config.candidate_cap)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::str::FromStr;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn amount(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn tx(direction: Direction, value: &str, day: u32) -> ImportedTransaction {
        ImportedTransaction::new(
            1,
            10,
            amount(value),
            direction,
            date(2024, 3, day),
            "PAGAMENTO HONORARIOS".to_string(),
            Uuid::nil(),
        )
    }

    fn entry(id: i64, direction: Direction, value: &str, day: u32) -> LedgerEntry {
        LedgerEntry::new(
            id,
            amount(value),
            direction,
            date(2024, 3, day),
            "Honorários".to_string(),
        )
    }

    #[test]
    fn test_direction_is_a_hard_filter() {
        let tx = tx(Direction::Credit, "1500.00", 10);
        let entries = vec![entry(1, Direction::Debit, "1500.00", 10)];

        let result = select_candidates(&tx, &entries, &HashSet::new(), &MatchConfig::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_claimed_entries_are_excluded() {
        let tx = tx(Direction::Credit, "1500.00", 10);
        let entries = vec![
            entry(1, Direction::Credit, "1500.00", 10),
            entry(2, Direction::Credit, "1500.00", 10),
        ];
        let claimed: HashSet<i64> = [1].into_iter().collect();

        let result = select_candidates(&tx, &entries, &claimed, &MatchConfig::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);
    }

    #[test]
    fn test_settlement_window_is_asymmetric() {
        let tx = tx(Direction::Credit, "1500.00", 20);
        let entries = vec![
            // due 10 days before the settlement: inside the lag window
            entry(1, Direction::Credit, "1500.00", 10),
            // due 8 days after the settlement: outside the early window
            entry(2, Direction::Credit, "1500.00", 28),
        ];

        let result = select_candidates(&tx, &entries, &HashSet::new(), &MatchConfig::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_amount_band_excludes_gross_outliers() {
        let tx = tx(Direction::Credit, "1000.00", 10);
        let entries = vec![
            entry(1, Direction::Credit, "1150.00", 10), // 15% off, inside
            entry(2, Direction::Credit, "1500.00", 10), // 50% off, outside
        ];

        let result = select_candidates(&tx, &entries, &HashSet::new(), &MatchConfig::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_ordering_by_date_then_amount_then_id() {
        let tx = tx(Direction::Credit, "1000.00", 15);
        let entries = vec![
            entry(3, Direction::Credit, "1000.00", 10), // 5 days away
            entry(2, Direction::Credit, "1050.00", 14), // 1 day away, worse amount
            entry(1, Direction::Credit, "1000.00", 14), // 1 day away, exact amount
        ];

        let result = select_candidates(&tx, &entries, &HashSet::new(), &MatchConfig::default());
        let ids: Vec<i64> = result.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_result_is_truncated_to_cap() {
        let tx = tx(Direction::Credit, "1000.00", 15);
        let entries: Vec<LedgerEntry> = (1..=30)
            .map(|id| entry(id, Direction::Credit, "1000.00", 15))
            .collect();

        let config = MatchConfig {
            candidate_cap: 5,
            ..MatchConfig::default()
        };
        let result = select_candidates(&tx, &entries, &HashSet::new(), &config);
        assert_eq!(result.len(), 5);
        // deterministic: lowest ids win the tie
        assert_eq!(result[0].id, 1);
        assert_eq!(result[4].id, 5);
    }
}
