//! Candidate selection and confidence scoring

pub mod scorer;
pub mod selector;

pub use scorer::*;
pub use selector::*;

use serde::{Deserialize, Serialize};

use crate::types::{ReconcileError, ReconcileResult};

/// Tunable matching policy
///
/// The defaults are product-observed values carried over from the source
/// system (auto-link at score 90, a -5/+30 day settlement window, a 20%
/// coarse amount band). They are policy, not invariants: adjust per
/// deployment and call [`validate`](Self::validate) before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Maximum candidates passed to the scorer per transaction
    pub candidate_cap: usize,
    /// Maximum suggestions surfaced to a user per transaction
    pub suggestion_limit: usize,
    /// How many days after its due date a settlement may still arrive
    pub settlement_lag_days: u32,
    /// How many days before its due date an entry may settle early
    pub early_settlement_days: u32,
    /// Coarse relative amount band for candidate selection, e.g. 0.20
    pub amount_band: f64,
    /// Minimum score for the batch path to link or flag automatically
    pub auto_link_threshold: u8,
    /// Date distance in days beyond which a date mismatch is recorded
    pub date_mismatch_days: u32,
    /// Token overlap ratio below which a description mismatch is recorded
    pub description_floor: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            candidate_cap: 20,
            suggestion_limit: 10,
            settlement_lag_days: 30,
            early_settlement_days: 5,
            amount_band: 0.20,
            auto_link_threshold: 90,
            date_mismatch_days: 2,
            description_floor: 0.3,
        }
    }
}

impl MatchConfig {
    /// Validate that the configuration is internally consistent
    pub fn validate(&self) -> ReconcileResult<()> {
        if self.candidate_cap == 0 {
            return Err(ReconcileError::Validation(
                "Candidate cap must be at least 1".to_string(),
            ));
        }

        if self.suggestion_limit == 0 {
            return Err(ReconcileError::Validation(
                "Suggestion limit must be at least 1".to_string(),
            ));
        }

        if self.settlement_lag_days == 0 {
            return Err(ReconcileError::Validation(
                "Settlement lag window must be at least 1 day".to_string(),
            ));
        }

        if !(self.amount_band > 0.0 && self.amount_band <= 1.0) {
            return Err(ReconcileError::Validation(format!(
                "Amount band must be within (0, 1], got {}",
                self.amount_band
            )));
        }

        if self.auto_link_threshold > 100 {
            return Err(ReconcileError::Validation(format!(
                "Auto-link threshold must be within 0-100, got {}",
                self.auto_link_threshold
            )));
        }

        if !(0.0..=1.0).contains(&self.description_floor) {
            return Err(ReconcileError::Validation(format!(
                "Description floor must be within [0, 1], got {}",
                self.description_floor
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MatchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_candidate_cap() {
        let config = MatchConfig {
            candidate_cap: 0,
            ..MatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ReconcileError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_amount_band() {
        let config = MatchConfig {
            amount_band: 0.0,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MatchConfig {
            amount_band: 1.5,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_threshold_above_100() {
        let config = MatchConfig {
            auto_link_threshold: 101,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
