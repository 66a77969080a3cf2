use chrono::NaiveDate;
use moneypal_common::types::{BudgetUsage, DueGoal};
use serde::Serialize;

use crate::metrics::{BudgetMetrics, GoalMetrics};
use crate::NEAR_LIMIT_THRESHOLD;

/// Why an entity was passed over in a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The entity cannot be evaluated at all (e.g. non-positive limit).
    NotEvaluable,
    /// No expense spending recorded for the budget's scope this month.
    NoSpending,
    /// Spending is below the near-limit threshold.
    BelowThreshold,
    /// The goal has already reached its target.
    FullyFunded,
    /// The goal's deadline is already behind the evaluation date.
    DeadlinePassed,
    /// An identical alert was already recorded today.
    AlreadySentToday,
}

/// Explicit per-entity result of applying the alert policy.
///
/// The pipeline collects these into a pass summary instead of steering
/// control flow through errors; a single odd row can never abort a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome<M> {
    Send(M),
    Skip(SkipReason),
}

impl<M> Outcome<M> {
    pub fn is_send(&self) -> bool {
        matches!(self, Outcome::Send(_))
    }
}

/// Applies the near-limit policy to one budget.
///
/// Fires only when the limit is positive, some spending exists, and the
/// spent-to-limit ratio has reached [`NEAR_LIMIT_THRESHOLD`].
pub fn evaluate_budget(usage: &BudgetUsage) -> Outcome<BudgetMetrics> {
    let Some(metrics) = BudgetMetrics::from_usage(usage) else {
        return Outcome::Skip(SkipReason::NotEvaluable);
    };
    if metrics.spent <= 0.0 {
        return Outcome::Skip(SkipReason::NoSpending);
    }
    if metrics.ratio < NEAR_LIMIT_THRESHOLD {
        return Outcome::Skip(SkipReason::BelowThreshold);
    }
    Outcome::Send(metrics)
}

/// Applies the deadline-reminder policy to one goal.
///
/// The storage query already restricts candidates to deadlines within the
/// reminder window; this guards the remainder and the (clock-race) case of
/// a deadline that slipped into the past between query and evaluation.
pub fn evaluate_goal(goal: &DueGoal, today: NaiveDate) -> Outcome<GoalMetrics> {
    let metrics = GoalMetrics::compute(goal, today);
    if metrics.remaining <= 0.0 {
        return Outcome::Skip(SkipReason::FullyFunded);
    }
    if metrics.days_left < 0 {
        return Outcome::Skip(SkipReason::DeadlinePassed);
    }
    Outcome::Send(metrics)
}
