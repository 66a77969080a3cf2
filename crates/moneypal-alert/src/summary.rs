use serde::Serialize;

use crate::decision::SkipReason;

/// Tally of one budget-alert or goal-reminder pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct PassSummary {
    /// Candidates the pass looked at.
    pub evaluated: u32,
    /// Mails dispatched and recorded in the ledger.
    pub sent: u32,
    /// Would have fired but an identical alert already went out today.
    pub suppressed: u32,
    /// Below threshold, outside the window, fully funded, or no spending.
    pub skipped: u32,
    /// Rows the policy could not evaluate at all (e.g. limit <= 0).
    pub not_evaluable: u32,
}

impl PassSummary {
    /// Folds one per-entity outcome into the tally. `Send` outcomes are
    /// recorded with [`PassSummary::record_sent`] once dispatch succeeded,
    /// not here.
    pub fn record_skip(&mut self, reason: SkipReason) {
        self.evaluated += 1;
        match reason {
            SkipReason::AlreadySentToday => self.suppressed += 1,
            SkipReason::NotEvaluable => self.not_evaluable += 1,
            SkipReason::NoSpending
            | SkipReason::BelowThreshold
            | SkipReason::FullyFunded
            | SkipReason::DeadlinePassed => self.skipped += 1,
        }
    }

    pub fn record_sent(&mut self) {
        self.evaluated += 1;
        self.sent += 1;
    }
}
