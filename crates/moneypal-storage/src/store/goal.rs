use chrono::NaiveDate;
use moneypal_common::types::DueGoal;
use sea_orm::{DbBackend, FromQueryResult, Statement};

use crate::error::Result;
use crate::store::FinanceStore;

#[derive(Debug, FromQueryResult)]
struct DueGoalRow {
    goal_id: String,
    user_id: String,
    username: String,
    email: String,
    goal_name: String,
    target_amount: f64,
    current_saved: f64,
    deadline: NaiveDate,
}

const DUE_GOALS_SQL: &str = r#"
SELECT
    g.id AS goal_id,
    g.user_id AS user_id,
    u.username AS username,
    u.email AS email,
    g.goal_name AS goal_name,
    g.target_amount AS target_amount,
    g.current_saved AS current_saved,
    g.deadline AS deadline
FROM savings_goals g
JOIN users u ON u.id = g.user_id
WHERE g.notify_enabled = 1
  AND g.deadline IS NOT NULL
  AND g.deadline >= ?
  AND g.deadline <= ?
ORDER BY g.deadline, g.id
"#;

impl FinanceStore {
    /// Lists reminder-enabled goals whose deadline falls in `[from, to]`
    /// (both inclusive), joined with their owner.
    pub async fn list_goals_due_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DueGoal>> {
        let rows = DueGoalRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            DUE_GOALS_SQL,
            [from.into(), to.into()],
        ))
        .all(self.db())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| DueGoal {
                goal_id: r.goal_id,
                user_id: r.user_id,
                username: r.username,
                email: r.email,
                goal_name: r.goal_name,
                target_amount: r.target_amount,
                current_saved: r.current_saved,
                deadline: r.deadline,
            })
            .collect())
    }
}
