//! Dedup signatures.
//!
//! A signature is a deterministic string naming "this alert for this
//! entity". It is stored verbatim as the ledger row's message and doubles
//! as the same-day duplicate lookup key, so the format is load-bearing:
//! changing it would resend every standing alert once.

/// Signature for a near-limit alert on one budget.
pub fn budget_alert(budget_id: &str) -> String {
    format!("[BUDGET_ALERT][budget_id={budget_id}]")
}

/// Signature for a deadline reminder on one savings goal.
pub fn goal_reminder(goal_id: &str) -> String {
    format!("[GOAL_REMINDER][goal_id={goal_id}]")
}
