//! The budget-alert and goal-reminder passes.
//!
//! Both passes share one shape: aggregate candidates from storage, apply
//! the pure alert policy per entity, consult the notification ledger for a
//! same-day duplicate, and only then send mail and append the ledger row.
//! The ledger write happens strictly after the transport accepted the
//! message, so an unsent alert can never be recorded as sent.

pub mod scheduler;

use moneypal_alert::day::EvaluationDay;
use moneypal_alert::decision::{self, Outcome, SkipReason};
use moneypal_alert::signature;
use moneypal_alert::summary::PassSummary;
use moneypal_common::types::NotificationKind;
use moneypal_notify::{template, MailTransport, NotifyError};
use moneypal_storage::{FinanceStore, StorageError};

/// A pass aborted before finishing. Entities already handled keep their
/// ledger rows; entities after the failure point stay unevaluated until the
/// next firing or manual trigger.
#[derive(Debug, thiserror::Error)]
pub enum PassError {
    #[error("reminder pass aborted: {0}")]
    Storage(#[from] StorageError),
    #[error("reminder pass aborted: {0}")]
    Mail(#[from] NotifyError),
}

/// Scans every budget and emails the owner when spending has reached the
/// near-limit threshold, at most once per budget per calendar day.
pub async fn run_budget_pass(
    store: &FinanceStore,
    mailer: &dyn MailTransport,
    day: &EvaluationDay,
) -> Result<PassSummary, PassError> {
    let budgets = store.list_budget_usage().await?;
    let mut summary = PassSummary::default();

    for usage in &budgets {
        let metrics = match decision::evaluate_budget(usage) {
            Outcome::Send(metrics) => metrics,
            Outcome::Skip(reason) => {
                summary.record_skip(reason);
                continue;
            }
        };

        let sig = signature::budget_alert(&usage.budget_id);
        let already_sent = store
            .has_notification_in_window(
                &usage.user_id,
                NotificationKind::BudgetAlert,
                &sig,
                day.start_utc(),
                day.end_utc(),
            )
            .await?;
        if already_sent {
            summary.record_skip(SkipReason::AlreadySentToday);
            continue;
        }

        let mail = template::budget_alert(usage, metrics.ratio);
        mailer.send(&usage.email, &mail.subject, &mail.body).await?;
        store
            .insert_notification(&usage.user_id, None, &sig, NotificationKind::BudgetAlert)
            .await?;
        summary.record_sent();

        tracing::info!(
            budget_id = %usage.budget_id,
            user = %usage.username,
            percent = format!("{:.1}", metrics.percent_used()),
            "budget alert sent"
        );
    }

    Ok(summary)
}

/// Scans goals whose deadline falls inside the reminder window and emails
/// the owner while the goal is still underfunded, at most once per goal per
/// calendar day.
pub async fn run_goal_pass(
    store: &FinanceStore,
    mailer: &dyn MailTransport,
    day: &EvaluationDay,
) -> Result<PassSummary, PassError> {
    let goals = store
        .list_goals_due_between(day.date(), day.reminder_horizon())
        .await?;
    let mut summary = PassSummary::default();

    for goal in &goals {
        let metrics = match decision::evaluate_goal(goal, day.date()) {
            Outcome::Send(metrics) => metrics,
            Outcome::Skip(reason) => {
                summary.record_skip(reason);
                continue;
            }
        };

        let sig = signature::goal_reminder(&goal.goal_id);
        let already_sent = store
            .has_notification_in_window(
                &goal.user_id,
                NotificationKind::SavingsMilestone,
                &sig,
                day.start_utc(),
                day.end_utc(),
            )
            .await?;
        if already_sent {
            summary.record_skip(SkipReason::AlreadySentToday);
            continue;
        }

        let mail = template::goal_reminder(goal, metrics.remaining, metrics.days_left);
        mailer.send(&goal.email, &mail.subject, &mail.body).await?;
        store
            .insert_notification(
                &goal.user_id,
                Some(&goal.goal_id),
                &sig,
                NotificationKind::SavingsMilestone,
            )
            .await?;
        summary.record_sent();

        tracing::info!(
            goal_id = %goal.goal_id,
            user = %goal.username,
            days_left = metrics.days_left,
            "goal reminder sent"
        );
    }

    Ok(summary)
}
