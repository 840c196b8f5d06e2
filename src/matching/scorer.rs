//! Confidence scoring for (transaction, candidate entry) pairs
//!
//! The scorer is a total, pure function: it never raises and has no side
//! effects, since it runs over every pending transaction times every
//! candidate in batch mode. Four signals are each normalized to 0-100 and
//! combined by fixed weights; the amount carries half the weight because
//! money is the one signal fuzzy text similarity must never outvote.

use bigdecimal::{BigDecimal, One, ToPrimitive};

use crate::matching::MatchConfig;
use crate::types::{ImportedTransaction, LedgerEntry, MatchCandidate, MismatchReason};
use crate::utils::text::{normalize_document_ref, token_overlap_ratio};

const WEIGHT_AMOUNT: f64 = 0.50;
const WEIGHT_DATE: f64 = 0.20;
const WEIGHT_DESCRIPTION: f64 = 0.20;
const WEIGHT_DOCUMENT: f64 = 0.10;

/// Neutral signal value when a comparison cannot be made (e.g. a missing
/// document reference)
const NEUTRAL_SIGNAL: f64 = 50.0;

/// Relative amount difference `|entry - tx| / max(|tx|, 1)`
///
/// Shared with the candidate selector's coarse band filter.
pub(crate) fn relative_amount_diff(entry_amount: &BigDecimal, tx_amount: &BigDecimal) -> f64 {
    let diff = (entry_amount - tx_amount).abs();
    let denominator = tx_amount.abs().max(BigDecimal::one());
    (diff / denominator).to_f64().unwrap_or(f64::INFINITY)
}

/// Score one candidate entry against a transaction
pub fn score(
    tx: &ImportedTransaction,
    entry: &LedgerEntry,
    config: &MatchConfig,
) -> MatchCandidate {
    let mut mismatches = Vec::new();

    // Amount exactness: exact after rounding to the minor unit scores
    // 100; anything else decays linearly to 0 at the selector's band
    // boundary and records a mismatch.
    let amount_signal = if tx.amount.round(2) == entry.amount.round(2) {
        100.0
    } else {
        mismatches.push(MismatchReason::Amount);
        let relative = relative_amount_diff(&entry.amount, &tx.amount);
        (100.0 * (1.0 - relative / config.amount_band)).max(0.0)
    };

    // Date proximity: full marks at zero distance, zero at the
    // settlement-lag boundary.
    let date_distance_days = (entry.due_date - tx.transaction_date)
        .num_days()
        .unsigned_abs()
        .min(u32::MAX as u64) as u32;
    let date_signal =
        (100.0 * (1.0 - date_distance_days as f64 / config.settlement_lag_days as f64)).max(0.0);
    if date_distance_days > config.date_mismatch_days {
        mismatches.push(MismatchReason::Date);
    }

    let overlap = token_overlap_ratio(&tx.description, &entry.description);
    let description_signal = 100.0 * overlap;
    if overlap < config.description_floor {
        mismatches.push(MismatchReason::Description);
    }

    // Document reference: exact match when both sides carry one, neutral
    // when either is absent.
    let document_signal = match (
        tx.document_ref.as_deref().map(normalize_document_ref),
        entry.document_ref.as_deref().map(normalize_document_ref),
    ) {
        (Some(tx_ref), Some(entry_ref)) if !tx_ref.is_empty() && !entry_ref.is_empty() => {
            if tx_ref == entry_ref {
                100.0
            } else {
                mismatches.push(MismatchReason::DocumentRef);
                0.0
            }
        }
        _ => NEUTRAL_SIGNAL,
    };

    let weighted = amount_signal * WEIGHT_AMOUNT
        + date_signal * WEIGHT_DATE
        + description_signal * WEIGHT_DESCRIPTION
        + document_signal * WEIGHT_DOCUMENT;
    let score = weighted.round().clamp(0.0, 100.0) as u8;

    MatchCandidate {
        entry_id: entry.id,
        score,
        mismatches,
        date_distance_days,
    }
}
