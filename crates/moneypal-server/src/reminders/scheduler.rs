use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use moneypal_alert::day::EvaluationDay;
use moneypal_notify::MailTransport;
use moneypal_storage::FinanceStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use super::{run_budget_pass, run_goal_pass};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Job {
    BudgetAlerts,
    GoalReminders,
}

impl std::fmt::Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Job::BudgetAlerts => write!(f, "budget_alerts"),
            Job::GoalReminders => write!(f, "goal_reminders"),
        }
    }
}

/// Owns the two daily reminder jobs.
///
/// Each job runs in its own Tokio task: sleep until the next scheduled
/// wall-clock firing, run the pass to completion, then compute the next
/// firing. Because the pass finishes before the next firing is computed, a
/// job can never overlap itself, and any firings missed while the process
/// was down collapse into the single next occurrence.
pub struct ReminderScheduler {
    store: Arc<FinanceStore>,
    mailer: Arc<dyn MailTransport>,
    hour: u32,
    minute: u32,
    tz: Tz,
    running: AtomicBool,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl ReminderScheduler {
    pub fn new(
        store: Arc<FinanceStore>,
        mailer: Arc<dyn MailTransport>,
        hour: u32,
        minute: u32,
        tz: Tz,
    ) -> Self {
        Self {
            store,
            mailer,
            hour,
            minute,
            tz,
            running: AtomicBool::new(false),
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Spawns both jobs. Idempotent: a second call while running is a no-op.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::info!("reminder scheduler already running");
            return;
        }

        let mut handles = self.handles.lock().unwrap();
        for job in [Job::BudgetAlerts, Job::GoalReminders] {
            let store = self.store.clone();
            let mailer = self.mailer.clone();
            let (hour, minute, tz) = (self.hour, self.minute, self.tz);
            handles.push(tokio::spawn(async move {
                job_loop(store, mailer, hour, minute, tz, job).await;
            }));
        }

        tracing::info!(
            hour = self.hour,
            minute = self.minute,
            timezone = %self.tz,
            "reminder scheduler started"
        );
    }

    /// Aborts both jobs. Safe to call when not running.
    pub fn stop(&self) {
        let mut handles = self.handles.lock().unwrap();
        for handle in handles.drain(..) {
            handle.abort();
        }
        if self.running.swap(false, Ordering::SeqCst) {
            tracing::info!("reminder scheduler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

async fn job_loop(
    store: Arc<FinanceStore>,
    mailer: Arc<dyn MailTransport>,
    hour: u32,
    minute: u32,
    tz: Tz,
    job: Job,
) {
    loop {
        let now = Utc::now();
        let next = next_fire_after(now, tz, hour, minute);
        let wait = (next - now).to_std().unwrap_or_default();
        tracing::debug!(job = %job, next = %next, "sleeping until next firing");
        tokio::time::sleep(wait).await;

        let day = EvaluationDay::containing(Utc::now(), tz);
        let result = match job {
            Job::BudgetAlerts => run_budget_pass(&store, mailer.as_ref(), &day).await,
            Job::GoalReminders => run_goal_pass(&store, mailer.as_ref(), &day).await,
        };
        match result {
            Ok(summary) => tracing::info!(
                job = %job,
                evaluated = summary.evaluated,
                sent = summary.sent,
                suppressed = summary.suppressed,
                "scheduled pass finished"
            ),
            Err(e) => tracing::error!(job = %job, error = %e, "scheduled pass failed"),
        }
    }
}

/// The first instant strictly after `now` that local time in `tz` reads
/// `hour:minute`. Days where that local time does not exist (a DST gap)
/// are passed over.
fn next_fire_after(now: DateTime<Utc>, tz: Tz, hour: u32, minute: u32) -> DateTime<Utc> {
    let mut date = now.with_timezone(&tz).date_naive();
    loop {
        let candidate = date
            .and_hms_opt(hour, minute, 0)
            .and_then(|ndt| tz.from_local_datetime(&ndt).earliest())
            .map(|local| local.with_timezone(&Utc));
        if let Some(candidate) = candidate {
            if candidate > now {
                return candidate;
            }
        }
        date = date.succ_opt().expect("date within chrono range");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn karachi() -> Tz {
        "Asia/Karachi".parse().unwrap()
    }

    #[test]
    fn fires_later_the_same_day() {
        // 08:00 Karachi (03:00 UTC); 19:00 Karachi is 14:00 UTC.
        let now = Utc.with_ymd_and_hms(2025, 5, 10, 3, 0, 0).unwrap();
        let next = next_fire_after(now, karachi(), 19, 0);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 5, 10, 14, 0, 0).unwrap());
    }

    #[test]
    fn fires_next_day_once_todays_slot_passed() {
        // 21:00 Karachi (16:00 UTC) is already past 19:00.
        let now = Utc.with_ymd_and_hms(2025, 5, 10, 16, 0, 0).unwrap();
        let next = next_fire_after(now, karachi(), 19, 0);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 5, 11, 14, 0, 0).unwrap());
    }

    #[test]
    fn exact_slot_moves_to_tomorrow() {
        // Strictly-after semantics: firing at the slot schedules the next day,
        // which is what coalesces missed firings into one run.
        let now = Utc.with_ymd_and_hms(2025, 5, 10, 14, 0, 0).unwrap();
        let next = next_fire_after(now, karachi(), 19, 0);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 5, 11, 14, 0, 0).unwrap());
    }

    #[test]
    fn long_downtime_yields_single_next_occurrence() {
        // Five missed days still produce exactly one upcoming firing.
        let now = Utc.with_ymd_and_hms(2025, 5, 15, 3, 0, 0).unwrap();
        let next = next_fire_after(now, karachi(), 19, 0);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 5, 15, 14, 0, 0).unwrap());
    }
}
