//! Savings goals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub name: String,
    pub target_amount: Money,
    /// Not guaranteed to stay within `0..=target_amount` for server data.
    pub current_savings: Money,
    pub deadline: Option<NaiveDate>,
}

impl SavingsGoal {
    /// Percentage of the target already saved, clamped to `0.0..=100.0`.
    ///
    /// A non-positive target is an upstream data anomaly: it reports `0.0`
    /// instead of dividing by zero. That is a fallback, not a success.
    pub fn progress(&self) -> f64 {
        if !self.target_amount.is_positive() {
            return 0.0;
        }
        let ratio = self.current_savings.cents() as f64 / self.target_amount.cents() as f64;
        (ratio * 100.0).clamp(0.0, 100.0)
    }

    /// Amount still missing to reach the target, never negative.
    pub fn remaining(&self) -> Money {
        let remaining = self.target_amount - self.current_savings;
        if remaining.is_negative() {
            Money::ZERO
        } else {
            remaining
        }
    }

    pub fn is_reached(&self) -> bool {
        self.target_amount.is_positive() && self.current_savings >= self.target_amount
    }
}

/// The user-editable fields of a goal, used for create and update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalDraft {
    pub name: String,
    pub target_amount: Money,
    pub current_savings: Money,
    pub deadline: Option<NaiveDate>,
}

impl GoalDraft {
    pub fn validate(&self) -> ResultEngine<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::InvalidDraft("goal name is required".to_string()));
        }
        if !self.target_amount.is_positive() {
            return Err(EngineError::InvalidDraft(
                "target amount must be greater than zero".to_string(),
            ));
        }
        if self.current_savings.is_negative() {
            return Err(EngineError::InvalidDraft(
                "current savings cannot be negative".to_string(),
            ));
        }
        if self.current_savings > self.target_amount {
            return Err(EngineError::InvalidDraft(
                "current savings cannot exceed the target amount".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: i64, current: i64) -> SavingsGoal {
        SavingsGoal {
            id: 1,
            name: "Holiday".to_string(),
            target_amount: Money::new(target),
            current_savings: Money::new(current),
            deadline: None,
        }
    }

    #[test]
    fn progress_is_a_percentage() {
        assert_eq!(goal(100_000, 25_000).progress(), 25.0);
        assert_eq!(goal(100_000, 0).progress(), 0.0);
        assert_eq!(goal(100_000, 100_000).progress(), 100.0);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(goal(100_000, 250_000).progress(), 100.0);
        assert_eq!(goal(100_000, -5_000).progress(), 0.0);
    }

    #[test]
    fn zero_or_negative_target_reports_no_progress() {
        let zero = goal(0, 5_000).progress();
        assert_eq!(zero, 0.0);
        assert!(zero.is_finite());
        assert_eq!(goal(-100, 5_000).progress(), 0.0);
        assert!(!goal(0, 5_000).is_reached());
    }

    #[test]
    fn remaining_never_negative() {
        assert_eq!(goal(100_000, 40_000).remaining(), Money::new(60_000));
        assert_eq!(goal(100_000, 140_000).remaining(), Money::ZERO);
    }

    #[test]
    fn draft_rules() {
        let mut draft = GoalDraft {
            name: "Car".to_string(),
            target_amount: Money::new(500_000),
            current_savings: Money::new(10_000),
            deadline: NaiveDate::from_ymd_opt(2026, 1, 1),
        };
        assert!(draft.validate().is_ok());

        draft.current_savings = Money::new(600_000);
        assert!(draft.validate().is_err());

        draft.current_savings = Money::ZERO;
        draft.target_amount = Money::ZERO;
        assert!(draft.validate().is_err());
    }
}
