use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::REMINDER_WINDOW_DAYS;

/// The calendar day a pass evaluates against, anchored in the schedule's
/// timezone and exposed as a UTC half-open window for ledger lookups.
///
/// "Sent today" means "created within `[start_utc, end_utc)`", which keeps
/// the dedup check well-defined no matter what timezone the host clock or
/// the database server runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationDay {
    date: NaiveDate,
    start_utc: DateTime<Utc>,
    end_utc: DateTime<Utc>,
}

impl EvaluationDay {
    /// Builds the evaluation day containing `now` in `tz`.
    pub fn containing(now: DateTime<Utc>, tz: Tz) -> Self {
        let date = now.with_timezone(&tz).date_naive();
        Self {
            date,
            start_utc: local_midnight_utc(date, tz),
            end_utc: local_midnight_utc(next_day(date), tz),
        }
    }

    /// The local calendar date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Start of the day as a UTC instant (inclusive bound).
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start_utc
    }

    /// Start of the next day as a UTC instant (exclusive bound).
    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end_utc
    }

    /// Last date inside the goal-reminder look-ahead window.
    pub fn reminder_horizon(&self) -> NaiveDate {
        self.date + Duration::days(REMINDER_WINDOW_DAYS)
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// Midnight of `date` in `tz`, as a UTC instant. On the rare day where
/// midnight falls into a DST gap, the earliest valid local time is used.
fn local_midnight_utc(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
    match tz.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => {
            // Skipped local midnight; step forward to the first valid minute.
            let mut probe = midnight;
            loop {
                probe = probe + Duration::minutes(1);
                if let Some(local) = tz.from_local_datetime(&probe).earliest() {
                    return local.with_timezone(&Utc);
                }
            }
        }
    }
}
