//! Validation utilities

use crate::types::{BatchFilter, ReconcileError, ReconcileResult};

/// Validate a batch filter before a run
pub fn validate_batch_filter(filter: &BatchFilter) -> ReconcileResult<()> {
    if let (Some(from), Some(to)) = (filter.date_from, filter.date_to) {
        if from > to {
            return Err(ReconcileError::Validation(format!(
                "Batch date range is inverted: {} > {}",
                from, to
            )));
        }
    }

    if let Some(account_id) = filter.account_id {
        if account_id <= 0 {
            return Err(ReconcileError::Validation(format!(
                "Account id must be positive, got {}",
                account_id
            )));
        }
    }

    Ok(())
}

/// Validate the acting user identifier supplied for a manual action
pub fn validate_user_id(user_id: &str) -> ReconcileResult<()> {
    if user_id.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "Acting user id cannot be empty".to_string(),
        ));
    }

    Ok(())
}
