//! Subject and body rendering for alert mail.
//!
//! Amounts are formatted to two decimal places with the `PKR` currency
//! label; the budget subject carries the usage as a whole percentage and
//! the body as one decimal.

use moneypal_common::types::{BudgetUsage, DueGoal};

/// A rendered plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

/// Renders the near-limit alert for a budget. `ratio` is spent/limit.
pub fn budget_alert(usage: &BudgetUsage, ratio: f64) -> RenderedEmail {
    let percent = ratio * 100.0;
    RenderedEmail {
        subject: format!(
            "Budget alert ({}): {:.0}% used",
            usage.username, percent
        ),
        body: format!(
            "Hi {},\n\n\
             You have spent PKR {:.2} out of PKR {:.2} for this month's budget.\n\n\
             Usage: {:.1}%\n\n\
             Please review your expenses.\n\n\
             - MoneyPal",
            usage.username, usage.spent, usage.amount_limit, percent
        ),
    }
}

/// Renders the deadline reminder for a savings goal.
pub fn goal_reminder(goal: &DueGoal, remaining: f64, days_left: i64) -> RenderedEmail {
    RenderedEmail {
        subject: format!("Savings goal reminder: {} (due soon)", goal.goal_name),
        body: format!(
            "Hi {},\n\n\
             Your savings goal '{}' is due on {}.\n\
             Target: PKR {:.2}\n\
             Saved: PKR {:.2}\n\
             Remaining: PKR {:.2}\n\
             Days left: {}\n\n\
             Keep going!\n\
             - MoneyPal",
            goal.username,
            goal.goal_name,
            goal.deadline,
            goal.target_amount,
            goal.current_saved,
            remaining,
            days_left
        ),
    }
}
