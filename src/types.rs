//! Core types and data structures for the reconciliation engine

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a monetary movement, from the account holder's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Money coming in (receipts, fee payments received)
    Credit,
    /// Money going out (expenses, disbursements)
    Debit,
}

/// Lifecycle status of an imported bank transaction
///
/// Every imported transaction starts as `Pending`. The other three states
/// are terminal until an explicit undo returns the record to `Pending`
/// (undo is only legal from `Reconciled` or `Divergent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationStatus {
    /// Awaiting reconciliation; no ledger entry linked
    Pending,
    /// Linked to a ledger entry with matching amount
    Reconciled,
    /// Linked to a ledger entry whose amount differs (partial payment,
    /// rounding); requires human confirmation
    Divergent,
    /// Explicitly marked as not relevant for reconciliation
    Ignored,
}

impl ReconciliationStatus {
    /// Whether this status holds an exclusive claim on a ledger entry
    pub fn holds_claim(&self) -> bool {
        matches!(
            self,
            ReconciliationStatus::Reconciled | ReconciliationStatus::Divergent
        )
    }
}

/// How a confirmed link was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationKind {
    /// Linked by the batch auto-reconciler
    Automatic,
    /// Linked (or ignored) by a user
    Manual,
}

/// Internal financial-ledger entry the engine matches against
///
/// Entries are produced by the ledger/obligation modules (including the
/// installment schedule calculator) and are immutable from this engine's
/// perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier
    pub id: i64,
    /// Signed amount, cents precision
    pub amount: BigDecimal,
    /// Expected direction of the settling bank movement
    pub direction: Direction,
    /// Date the obligation falls due
    pub due_date: NaiveDate,
    /// Human-entered description
    pub description: String,
    /// Optional external reference (invoice number, FITID, etc.)
    pub document_ref: Option<String>,
    /// Optional link to the installment/obligation that generated this entry
    pub obligation_id: Option<i64>,
}

impl LedgerEntry {
    /// Create a new ledger entry
    pub fn new(
        id: i64,
        amount: BigDecimal,
        direction: Direction,
        due_date: NaiveDate,
        description: String,
    ) -> Self {
        Self {
            id,
            amount,
            direction,
            due_date,
            description,
            document_ref: None,
            obligation_id: None,
        }
    }

    /// Set the external document reference
    pub fn with_document_ref(mut self, document_ref: String) -> Self {
        self.document_ref = Some(document_ref);
        self
    }

    /// Set the originating obligation
    pub fn with_obligation(mut self, obligation_id: i64) -> Self {
        self.obligation_id = Some(obligation_id);
        self
    }
}

/// Bank-statement transaction produced by statement ingestion
///
/// Created by the import step with status `Pending`; mutated only through
/// the engine's state transitions and never deleted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedTransaction {
    /// Unique identifier
    pub id: i64,
    /// Bank account the statement belongs to
    pub account_id: i64,
    /// Signed amount as reported by the bank
    pub amount: BigDecimal,
    /// Credit or debit, as reported by the bank
    pub direction: Direction,
    /// Settlement date on the statement
    pub transaction_date: NaiveDate,
    /// Free-text description from the bank
    pub description: String,
    /// Optional bank reference (FITID or statement document number)
    pub document_ref: Option<String>,
    /// Identifier of the import batch that produced this record
    pub import_batch: Uuid,
    /// Current reconciliation status
    pub status: ReconciliationStatus,
    /// Ledger entry this transaction settles, once linked
    pub linked_entry_id: Option<i64>,
    /// Confidence score recorded when the link was made
    pub match_score: Option<u8>,
    /// Whether the link was automatic or manual
    pub reconciliation_kind: Option<ReconciliationKind>,
    /// When the transaction was reconciled or ignored
    pub reconciled_at: Option<NaiveDateTime>,
    /// Acting user for manual actions; `None` for system-automatic links
    pub reconciled_by: Option<String>,
}

impl ImportedTransaction {
    /// Create a new pending transaction, as statement ingestion does
    pub fn new(
        id: i64,
        account_id: i64,
        amount: BigDecimal,
        direction: Direction,
        transaction_date: NaiveDate,
        description: String,
        import_batch: Uuid,
    ) -> Self {
        Self {
            id,
            account_id,
            amount,
            direction,
            transaction_date,
            description,
            document_ref: None,
            import_batch,
            status: ReconciliationStatus::Pending,
            linked_entry_id: None,
            match_score: None,
            reconciliation_kind: None,
            reconciled_at: None,
            reconciled_by: None,
        }
    }

    /// Set the bank document reference
    pub fn with_document_ref(mut self, document_ref: String) -> Self {
        self.document_ref = Some(document_ref);
        self
    }

    /// Whether the transaction is still awaiting reconciliation
    pub fn is_pending(&self) -> bool {
        self.status == ReconciliationStatus::Pending
    }

    /// Whether the transaction currently claims a ledger entry
    pub fn holds_claim(&self) -> bool {
        self.status.holds_claim()
    }
}

/// Why a scored pair is not a perfect match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchReason {
    /// Amounts differ after rounding to the minor unit
    Amount,
    /// Due date and transaction date are more than two days apart
    Date,
    /// Description token overlap below the similarity floor
    Description,
    /// Both document references present but unequal
    DocumentRef,
}

/// Scored pairing of a transaction with one candidate ledger entry
///
/// Ephemeral: computed on demand by the scorer and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Candidate ledger entry
    pub entry_id: i64,
    /// Aggregate confidence, 0-100
    pub score: u8,
    /// Signals that disagreed
    pub mismatches: Vec<MismatchReason>,
    /// Absolute distance in days between due date and transaction date,
    /// kept for deterministic tie-breaking
    pub date_distance_days: u32,
}

impl MatchCandidate {
    /// Whether the amount signal disagreed for this pairing
    pub fn has_amount_mismatch(&self) -> bool {
        self.mismatches.contains(&MismatchReason::Amount)
    }
}

/// Outcome of the decision policy for one transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision")]
pub enum Decision {
    /// Link automatically: high confidence and the amounts agree
    AutoLink { entry_id: i64 },
    /// High confidence on identity signals but the amount differs;
    /// link for human confirmation
    FlagDivergent { entry_id: i64 },
    /// No candidate qualified; leave for manual reconciliation
    LeavePending,
}

/// Manual reconciliation action, as a discriminated operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "entry_id")]
pub enum ManualAction {
    /// Link the transaction to the given ledger entry
    Link(i64),
    /// Mark the transaction as not relevant for reconciliation
    Ignore,
}

/// Optional narrowing of a batch auto-reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFilter {
    /// Restrict to one bank account
    pub account_id: Option<i64>,
    /// Earliest transaction date, inclusive
    pub date_from: Option<NaiveDate>,
    /// Latest transaction date, inclusive
    pub date_to: Option<NaiveDate>,
}

impl BatchFilter {
    /// Whether a transaction falls within this filter
    pub fn matches(&self, tx: &ImportedTransaction) -> bool {
        if let Some(account_id) = self.account_id {
            if tx.account_id != account_id {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if tx.transaction_date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if tx.transaction_date > to {
                return false;
            }
        }
        true
    }
}

/// Failure recorded against a single transaction during a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchError {
    /// Transaction whose transition failed
    pub transaction_id: i64,
    /// What went wrong
    pub message: String,
}

/// Summary of one batch auto-reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Pending transactions examined
    pub processed: usize,
    /// Transactions auto-linked
    pub linked: usize,
    /// Transactions flagged divergent
    pub flagged_divergent: usize,
    /// Transactions left pending for manual review
    pub left_pending: usize,
    /// Per-transaction failures; the run continues past these
    pub errors: Vec<BatchError>,
}

impl BatchResult {
    /// Whether every examined transaction transitioned or was left pending
    /// without error
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Errors that can occur in the reconciliation engine
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Ledger entry {entry_id} is already linked to transaction {held_by}")]
    Conflict { entry_id: i64, held_by: i64 },
    #[error("Invalid state transition: {0}")]
    InvalidState(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(i64),
    #[error("Ledger entry not found: {0}")]
    EntryNotFound(i64),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_claim_semantics() {
        assert!(!ReconciliationStatus::Pending.holds_claim());
        assert!(ReconciliationStatus::Reconciled.holds_claim());
        assert!(ReconciliationStatus::Divergent.holds_claim());
        assert!(!ReconciliationStatus::Ignored.holds_claim());
    }

    #[test]
    fn test_new_transaction_starts_pending() {
        let tx = ImportedTransaction::new(
            1,
            10,
            BigDecimal::from_str("100.00").unwrap(),
            Direction::Credit,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            "PAGAMENTO".to_string(),
            Uuid::nil(),
        );
        assert!(tx.is_pending());
        assert_eq!(tx.linked_entry_id, None);
        assert_eq!(tx.match_score, None);
        assert_eq!(tx.reconciled_by, None);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ReconciliationStatus::Divergent).unwrap();
        assert_eq!(json, "\"divergent\"");

        let status: ReconciliationStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, ReconciliationStatus::Pending);
    }

    #[test]
    fn test_decision_serializes_with_tag() {
        let json = serde_json::to_string(&Decision::AutoLink { entry_id: 7 }).unwrap();
        assert_eq!(json, "{\"decision\":\"auto_link\",\"entry_id\":7}");
    }

    #[test]
    fn test_batch_filter_matching() {
        let tx = ImportedTransaction::new(
            1,
            10,
            BigDecimal::from_str("100.00").unwrap(),
            Direction::Credit,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            "PAGAMENTO".to_string(),
            Uuid::nil(),
        );

        assert!(BatchFilter::default().matches(&tx));
        assert!(!BatchFilter {
            account_id: Some(99),
            ..BatchFilter::default()
        }
        .matches(&tx));
        assert!(!BatchFilter {
            date_to: Some(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()),
            ..BatchFilter::default()
        }
        .matches(&tx));
    }
}
