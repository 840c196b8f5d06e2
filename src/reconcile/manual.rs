//! Manual reconciliation: suggestions, user-chosen links, ignore, undo

use chrono::Utc;

use crate::matching::{score, select_candidates, selector::due_window, MatchConfig};
use crate::reconcile::decision::compare_candidates;
use crate::traits::{EntryStore, TransactionStore};
use crate::types::*;
use crate::utils::validation::validate_user_id;

/// Human-assisted reconciliation over the same selector and scorer as
/// the batch path, so manual suggestions and automatic decisions never
/// disagree about the candidate list
pub struct ManualReconciler<E: EntryStore, T: TransactionStore> {
    entries: E,
    transactions: T,
    config: MatchConfig,
}

impl<E: EntryStore, T: TransactionStore> ManualReconciler<E, T> {
    /// Create a manual reconciler
    pub fn new(entries: E, transactions: T, config: MatchConfig) -> Self {
        Self {
            entries,
            transactions,
            config,
        }
    }

    /// Top-N scored suggestions for a transaction, best first
    ///
    /// Read-only; never mutates state.
    pub async fn suggest(&self, tx_id: i64) -> ReconcileResult<Vec<MatchCandidate>> {
        self.config.validate()?;

        let tx = self
            .transactions
            .get_transaction(tx_id)
            .await?
            .ok_or(ReconcileError::TransactionNotFound(tx_id))?;

        let claimed = self.transactions.claimed_entry_ids().await?;
        let (due_from, due_to) = due_window(&tx, &self.config);
        let entries = self
            .entries
            .list_entries(tx.direction, due_from, due_to)
            .await?;

        let candidates = select_candidates(&tx, &entries, &claimed, &self.config);
        let mut scored: Vec<MatchCandidate> = candidates
            .iter()
            .map(|entry| score(&tx, entry, &self.config))
            .collect();
        scored.sort_by(compare_candidates);
        scored.truncate(self.config.suggestion_limit);

        Ok(scored)
    }

    /// Commit a user's reconciliation choice
    ///
    /// A link always wins regardless of score (human override), is
    /// recorded with the acting user, and fails with `Conflict` if the
    /// entry is already claimed by another active link. `Ignore` marks
    /// the transaction as not relevant for reconciliation. Errors leave
    /// the transaction unchanged.
    pub async fn reconcile_manual(
        &mut self,
        tx_id: i64,
        action: ManualAction,
        user_id: &str,
    ) -> ReconcileResult<ImportedTransaction> {
        validate_user_id(user_id)?;

        match action {
            ManualAction::Link(entry_id) => {
                self.entries
                    .get_entry(entry_id)
                    .await?
                    .ok_or(ReconcileError::EntryNotFound(entry_id))?;

                if let Some(held_by) = self.transactions.find_link_holder(entry_id).await? {
                    if held_by != tx_id {
                        return Err(ReconcileError::Conflict { entry_id, held_by });
                    }
                }

                self.transactions
                    .mark_reconciled(
                        tx_id,
                        entry_id,
                        None,
                        ReconciliationKind::Manual,
                        Some(user_id.to_string()),
                        Utc::now().naive_utc(),
                    )
                    .await
            }
            ManualAction::Ignore => {
                self.transactions
                    .mark_ignored(tx_id, user_id.to_string(), Utc::now().naive_utc())
                    .await
            }
        }
    }

    /// Undo a confirmed link, returning the transaction to Pending
    ///
    /// Only legal from Reconciled or Divergent; releases the claim and
    /// clears all audit fields.
    pub async fn unreconcile(&mut self, tx_id: i64) -> ReconcileResult<ImportedTransaction> {
        self.transactions.unreconcile(tx_id).await
    }

    /// Look up a transaction
    pub async fn get_transaction(
        &self,
        tx_id: i64,
    ) -> ReconcileResult<Option<ImportedTransaction>> {
        self.transactions.get_transaction(tx_id).await
    }
}
