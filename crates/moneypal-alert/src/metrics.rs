use chrono::NaiveDate;
use moneypal_common::types::{BudgetUsage, DueGoal};

/// Derived spending metrics for one budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetMetrics {
    pub spent: f64,
    pub limit: f64,
    /// `spent / limit`; only constructed when `limit > 0`.
    pub ratio: f64,
}

impl BudgetMetrics {
    /// Computes the spent-to-limit ratio for a budget.
    ///
    /// Returns `None` when the limit is zero or negative: the ratio is
    /// undefined there and the budget is simply not evaluable.
    pub fn from_usage(usage: &BudgetUsage) -> Option<Self> {
        if usage.amount_limit <= 0.0 {
            return None;
        }
        Some(Self {
            spent: usage.spent,
            limit: usage.amount_limit,
            ratio: usage.spent / usage.amount_limit,
        })
    }

    /// Usage as a percentage, e.g. 85.0 for ratio 0.85.
    pub fn percent_used(&self) -> f64 {
        self.ratio * 100.0
    }
}

/// Derived deadline metrics for one savings goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalMetrics {
    /// `target - saved`; zero or negative once the goal is fully funded.
    pub remaining: f64,
    /// Whole days from `today` to the deadline; negative when already past.
    pub days_left: i64,
}

impl GoalMetrics {
    pub fn compute(goal: &DueGoal, today: NaiveDate) -> Self {
        Self {
            remaining: goal.target_amount - goal.current_saved,
            days_left: (goal.deadline - today).num_days(),
        }
    }
}
