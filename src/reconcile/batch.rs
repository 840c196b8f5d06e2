//! Batch auto-reconciliation over all pending transactions

use chrono::Utc;

use crate::matching::{score, select_candidates, selector::due_window, MatchConfig};
use crate::reconcile::decision::{DecisionPolicy, ThresholdPolicy};
use crate::traits::{EntryStore, TransactionStore};
use crate::types::*;
use crate::utils::validation::validate_batch_filter;

/// Batch runner: selector -> scorer -> decision -> conditional persist,
/// per pending transaction
pub struct BatchReconciler<E: EntryStore, T: TransactionStore> {
    entries: E,
    transactions: T,
    config: MatchConfig,
    policy: Box<dyn DecisionPolicy>,
}

impl<E: EntryStore, T: TransactionStore> BatchReconciler<E, T> {
    /// Create a batch reconciler with the default threshold policy
    pub fn new(entries: E, transactions: T, config: MatchConfig) -> Self {
        let policy = Box::new(ThresholdPolicy::from_config(&config));
        Self {
            entries,
            transactions,
            config,
            policy,
        }
    }

    /// Create a batch reconciler with a custom decision policy
    pub fn with_policy(
        entries: E,
        transactions: T,
        config: MatchConfig,
        policy: Box<dyn DecisionPolicy>,
    ) -> Self {
        Self {
            entries,
            transactions,
            config,
            policy,
        }
    }

    /// Run auto-reconciliation over all pending transactions matching the
    /// filter
    ///
    /// Transactions are processed in transaction-date order so that,
    /// within a run, earlier settlements claim contested ledger entries
    /// first; an entry claimed earlier in the run is re-filtered out of
    /// later candidate sets. Each transaction's transition is an
    /// independent unit: a persistence failure is recorded in
    /// `BatchResult::errors` and the run continues.
    pub async fn run(&mut self, filter: &BatchFilter) -> ReconcileResult<BatchResult> {
        validate_batch_filter(filter)?;
        self.config.validate()?;

        let mut pending = self.transactions.list_pending(filter).await?;
        pending.sort_by(|a, b| {
            a.transaction_date
                .cmp(&b.transaction_date)
                .then(a.id.cmp(&b.id))
        });

        let mut claimed = self.transactions.claimed_entry_ids().await?;
        let mut result = BatchResult::default();

        for tx in pending {
            result.processed += 1;

            let (due_from, due_to) = due_window(&tx, &self.config);
            let entries = match self.entries.list_entries(tx.direction, due_from, due_to).await {
                Ok(entries) => entries,
                Err(err) => {
                    result.errors.push(BatchError {
                        transaction_id: tx.id,
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            let candidates = select_candidates(&tx, &entries, &claimed, &self.config);
            let scored: Vec<MatchCandidate> = candidates
                .iter()
                .map(|entry| score(&tx, entry, &self.config))
                .collect();

            match self.policy.decide(&scored) {
                Decision::AutoLink { entry_id } => {
                    let best_score = scored
                        .iter()
                        .find(|c| c.entry_id == entry_id)
                        .map(|c| c.score);
                    let outcome = self
                        .transactions
                        .mark_reconciled(
                            tx.id,
                            entry_id,
                            best_score,
                            ReconciliationKind::Automatic,
                            None,
                            Utc::now().naive_utc(),
                        )
                        .await;
                    match outcome {
                        Ok(_) => {
                            claimed.insert(entry_id);
                            result.linked += 1;
                        }
                        Err(err) => result.errors.push(BatchError {
                            transaction_id: tx.id,
                            message: err.to_string(),
                        }),
                    }
                }
                Decision::FlagDivergent { entry_id } => {
                    let best_score = scored
                        .iter()
                        .find(|c| c.entry_id == entry_id)
                        .map(|c| c.score)
                        .unwrap_or(0);
                    let outcome = self
                        .transactions
                        .mark_divergent(tx.id, entry_id, best_score, Utc::now().naive_utc())
                        .await;
                    match outcome {
                        Ok(_) => {
                            claimed.insert(entry_id);
                            result.flagged_divergent += 1;
                        }
                        Err(err) => result.errors.push(BatchError {
                            transaction_id: tx.id,
                            message: err.to_string(),
                        }),
                    }
                }
                Decision::LeavePending => result.left_pending += 1,
            }
        }

        Ok(result)
    }
}
