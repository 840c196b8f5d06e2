//! Decision policy for the automatic reconciliation path

use std::cmp::Ordering;

use crate::matching::MatchConfig;
use crate::types::{Decision, MatchCandidate};

/// Deterministic candidate ordering: score descending, then date
/// distance ascending, then entry id ascending
///
/// Used both to pick the winner on the automatic path and to rank
/// suggestions on the manual path, so batch reruns and user-facing lists
/// always agree.
pub(crate) fn compare_candidates(a: &MatchCandidate, b: &MatchCandidate) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(a.date_distance_days.cmp(&b.date_distance_days))
        .then(a.entry_id.cmp(&b.entry_id))
}

/// Policy that turns a scored candidate list into a reconciliation
/// decision for one transaction
pub trait DecisionPolicy: Send + Sync {
    /// Decide what to do with a transaction given its scored candidates
    fn decide(&self, candidates: &[MatchCandidate]) -> Decision;
}

/// Default policy: link at or above a confidence threshold, with the
/// safety rule that an amount mismatch never auto-confirms
///
/// A high aggregate score with a disagreeing amount usually means a
/// partial payment or a rounding difference on the right obligation, so
/// the pair is flagged divergent for human confirmation instead of
/// silently linked.
#[derive(Debug, Clone)]
pub struct ThresholdPolicy {
    auto_link_threshold: u8,
}

impl ThresholdPolicy {
    /// Create a policy with an explicit threshold
    pub fn new(auto_link_threshold: u8) -> Self {
        Self {
            auto_link_threshold,
        }
    }

    /// Create a policy from the matching configuration
    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(config.auto_link_threshold)
    }
}

impl DecisionPolicy for ThresholdPolicy {
    fn decide(&self, candidates: &[MatchCandidate]) -> Decision {
        let best = match candidates.iter().min_by(|a, b| compare_candidates(a, b)) {
            Some(best) => best,
            None => return Decision::LeavePending,
        };

        if best.score < self.auto_link_threshold {
            return Decision::LeavePending;
        }

        if best.has_amount_mismatch() {
            Decision::FlagDivergent {
                entry_id: best.entry_id,
            }
        } else {
            Decision::AutoLink {
                entry_id: best.entry_id,
            }
        }
    }
}
