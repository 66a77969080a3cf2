use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Kind tag of a ledger notification.
///
/// # Examples
///
/// ```
/// use moneypal_common::types::NotificationKind;
///
/// let kind: NotificationKind = "budget_alert".parse().unwrap();
/// assert_eq!(kind, NotificationKind::BudgetAlert);
/// assert_eq!(kind.to_string(), "budget_alert");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BudgetAlert,
    SavingsMilestone,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::BudgetAlert => write!(f, "budget_alert"),
            NotificationKind::SavingsMilestone => write!(f, "savings_milestone"),
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "budget_alert" => Ok(NotificationKind::BudgetAlert),
            "savings_milestone" => Ok(NotificationKind::SavingsMilestone),
            _ => Err(format!("unknown notification kind: {s}")),
        }
    }
}

/// Progress of a savings goal, derived from the saved and target amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum GoalProgress {
    Pending,
    InProgress,
    Completed,
}

impl GoalProgress {
    /// Derives the progress state: `Completed` once saved reaches target,
    /// `InProgress` after the first contribution, `Pending` otherwise.
    pub fn from_amounts(current_saved: f64, target_amount: f64) -> Self {
        if current_saved >= target_amount {
            GoalProgress::Completed
        } else if current_saved > 0.0 {
            GoalProgress::InProgress
        } else {
            GoalProgress::Pending
        }
    }
}

/// One budget joined with its owner and the month's aggregated expense sum.
///
/// Produced by the storage layer, consumed read-only by the alert pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetUsage {
    pub budget_id: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
    /// `None` means a whole-month budget across all categories.
    pub category_id: Option<String>,
    pub amount_limit: f64,
    pub month: i32,
    pub year: i32,
    /// Sum of the owner's expense transactions in scope; 0 when none exist.
    pub spent: f64,
}

/// A savings goal whose deadline falls inside the reminder window, joined
/// with its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueGoal {
    pub goal_id: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub goal_name: String,
    pub target_amount: f64,
    pub current_saved: f64,
    pub deadline: NaiveDate,
}

impl DueGoal {
    pub fn progress(&self) -> GoalProgress {
        GoalProgress::from_amounts(self.current_saved, self.target_amount)
    }
}

/// A row of the notification ledger.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NotificationRecord {
    pub id: String,
    pub user_id: String,
    pub goal_id: Option<String>,
    /// The dedup signature of the alert that produced this entry.
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}
