//! # Reconciliation Core
//!
//! A bank reconciliation matching engine: imports of bank-statement
//! transactions are matched against internal financial-ledger entries,
//! either automatically (confidence-scored) or through human-assisted
//! manual matching.
//!
//! ## Features
//!
//! - **Candidate selection**: cheap, ordered filters (direction, claim
//!   status, settlement window, coarse amount band) that bound scoring cost
//! - **Confidence scoring**: four weighted signals (amount, date,
//!   description, document reference) combined into a 0-100 score with
//!   explicit mismatch reasons
//! - **Decision policy**: auto-link at high confidence, flag divergent
//!   when the amount disagrees, never silently override money
//! - **Batch auto-reconciliation**: idempotent, partial-failure tolerant
//!   runs over all pending transactions
//! - **Manual reconciliation**: scored suggestions, human-override links,
//!   ignore, and undo, over the same matching pipeline as the batch path
//! - **Installment schedules**: equal-split settlement plans whose last
//!   installment absorbs the rounding remainder
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   stores and conditional transition writes
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::utils::MemoryStorage;
//! use reconciliation_core::{BatchFilter, ReconciliationEngine};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = MemoryStorage::new();
//! // seed storage via insert_entry / insert_transaction ...
//! let mut engine = ReconciliationEngine::new(storage.clone(), storage);
//! let summary = engine.run_auto_reconciliation(&BatchFilter::default()).await?;
//! println!("linked {} of {}", summary.linked, summary.processed);
//! # Ok(())
//! # }
//! ```

pub mod matching;
pub mod reconcile;
pub mod schedule;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use matching::*;
pub use reconcile::*;
pub use schedule::*;
pub use traits::*;
pub use types::*;
