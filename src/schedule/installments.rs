//! Installment schedule calculator
//!
//! Splits an obligation's total into equal installments due at a fixed
//! interval. Every installment is the total divided by the count, rounded
//! to the minor unit, except the last one, which absorbs the rounding
//! remainder so the installments always sum to the exact total. The
//! resulting ledger entries are what the reconciliation engine later
//! matches bank transactions against.

use bigdecimal::{BigDecimal, Zero};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default spacing between consecutive due dates
pub const DEFAULT_INTERVAL_DAYS: u32 = 30;

/// A single installment of an obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position within the plan
    pub number: u32,
    /// Amount due, minor-unit precision
    pub amount: BigDecimal,
    /// Date the installment falls due
    pub due_date: NaiveDate,
}

/// Equal-split installment plan for an obligation total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    /// Total obligation amount to distribute
    pub total: BigDecimal,
    /// Number of installments, at least 1
    pub installments: u32,
    /// Due date of the first installment
    pub first_due_date: NaiveDate,
    /// Days between consecutive due dates
    pub interval_days: u32,
}

impl InstallmentPlan {
    /// Create a plan with the default 30-day interval
    pub fn new(total: BigDecimal, installments: u32, first_due_date: NaiveDate) -> Self {
        Self {
            total,
            installments,
            first_due_date,
            interval_days: DEFAULT_INTERVAL_DAYS,
        }
    }

    /// Set a custom interval between due dates
    pub fn with_interval_days(mut self, interval_days: u32) -> Self {
        self.interval_days = interval_days;
        self
    }

    /// Validate the plan parameters
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.installments == 0 {
            return Err(ScheduleError::InvalidPlan(
                "Plan must have at least one installment".to_string(),
            ));
        }

        if self.total <= BigDecimal::zero() {
            return Err(ScheduleError::InvalidPlan(format!(
                "Plan total must be positive, got {}",
                self.total
            )));
        }

        if self.interval_days == 0 {
            return Err(ScheduleError::InvalidPlan(
                "Interval between due dates must be at least one day".to_string(),
            ));
        }

        Ok(())
    }

    /// Generate the installments
    ///
    /// All installments carry `round(total / n, 2)`; the final one
    /// carries `total - amount * (n - 1)` so the sum is exact.
    pub fn generate(&self) -> Result<Vec<Installment>, ScheduleError> {
        self.validate()?;

        let count = BigDecimal::from(self.installments);
        let base_amount = (&self.total / &count).round(2);
        let last_amount = &self.total - &base_amount * BigDecimal::from(self.installments - 1);

        let installments = (0..self.installments)
            .map(|index| {
                let amount = if index + 1 == self.installments {
                    last_amount.clone()
                } else {
                    base_amount.clone()
                };
                Installment {
                    number: index + 1,
                    amount,
                    due_date: self.first_due_date
                        + Duration::days(index as i64 * self.interval_days as i64),
                }
            })
            .collect();

        Ok(installments)
    }
}

/// Schedule calculation errors
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid installment plan: {0}")]
    InvalidPlan(String),
}
