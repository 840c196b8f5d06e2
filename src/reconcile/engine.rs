//! Engine facade coordinating the batch and manual reconciliation paths

use crate::matching::MatchConfig;
use crate::reconcile::batch::BatchReconciler;
use crate::reconcile::decision::DecisionPolicy;
use crate::reconcile::manual::ManualReconciler;
use crate::traits::{EntryStore, TransactionStore};
use crate::types::*;

/// Bank reconciliation engine over a ledger-entry store and an
/// imported-transaction store
///
/// Exposes the four logical operations of the reconciliation contract:
/// batch auto-reconciliation, suggestions, manual reconcile/ignore, and
/// undo. Transport (REST, RPC) is a consumer concern.
pub struct ReconciliationEngine<E: EntryStore, T: TransactionStore> {
    batch: BatchReconciler<E, T>,
    manual: ManualReconciler<E, T>,
}

impl<E: EntryStore + Clone, T: TransactionStore + Clone> ReconciliationEngine<E, T> {
    /// Create an engine with the default matching configuration
    pub fn new(entries: E, transactions: T) -> Self {
        Self::with_config(entries, transactions, MatchConfig::default())
    }

    /// Create an engine with an explicit matching configuration
    pub fn with_config(entries: E, transactions: T, config: MatchConfig) -> Self {
        Self {
            batch: BatchReconciler::new(entries.clone(), transactions.clone(), config.clone()),
            manual: ManualReconciler::new(entries, transactions, config),
        }
    }

    /// Create an engine with a custom decision policy for the batch path
    pub fn with_policy(
        entries: E,
        transactions: T,
        config: MatchConfig,
        policy: Box<dyn DecisionPolicy>,
    ) -> Self {
        Self {
            batch: BatchReconciler::with_policy(
                entries.clone(),
                transactions.clone(),
                config.clone(),
                policy,
            ),
            manual: ManualReconciler::new(entries, transactions, config),
        }
    }

    /// Run automatic reconciliation over all pending transactions
    /// matching the filter
    pub async fn run_auto_reconciliation(
        &mut self,
        filter: &BatchFilter,
    ) -> ReconcileResult<BatchResult> {
        self.batch.run(filter).await
    }

    /// Top-N scored suggestions for one transaction, best first
    pub async fn suggest(&self, tx_id: i64) -> ReconcileResult<Vec<MatchCandidate>> {
        self.manual.suggest(tx_id).await
    }

    /// Commit a user's link or ignore decision for one transaction
    pub async fn reconcile_manual(
        &mut self,
        tx_id: i64,
        action: ManualAction,
        user_id: &str,
    ) -> ReconcileResult<ImportedTransaction> {
        self.manual.reconcile_manual(tx_id, action, user_id).await
    }

    /// Undo a confirmed link, returning the transaction to Pending
    pub async fn unreconcile(&mut self, tx_id: i64) -> ReconcileResult<ImportedTransaction> {
        self.manual.unreconcile(tx_id).await
    }

    /// Look up a transaction
    pub async fn get_transaction(
        &self,
        tx_id: i64,
    ) -> ReconcileResult<Option<ImportedTransaction>> {
        self.manual.get_transaction(tx_id).await
    }
}
