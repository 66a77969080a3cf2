use moneypal_common::types::BudgetUsage;
use sea_orm::{DbBackend, FromQueryResult, Statement};

use crate::error::Result;
use crate::store::FinanceStore;

#[derive(Debug, FromQueryResult)]
struct BudgetUsageRow {
    budget_id: String,
    user_id: String,
    username: String,
    email: String,
    category_id: Option<String>,
    amount_limit: f64,
    month: i32,
    year: i32,
    spent: f64,
}

/// One row per budget with the owner and the aggregated expense sum for the
/// budget's (category, month, year) scope. A NULL category means the budget
/// spans all of the owner's categories for that month.
const BUDGET_USAGE_SQL: &str = r#"
SELECT
    b.id AS budget_id,
    b.user_id AS user_id,
    u.username AS username,
    u.email AS email,
    b.category_id AS category_id,
    b.amount_limit AS amount_limit,
    b.month AS month,
    b.year AS year,
    COALESCE((
        SELECT SUM(t.amount)
        FROM transactions t
        WHERE t.user_id = b.user_id
          AND (b.category_id IS NULL OR t.category_id = b.category_id)
          AND t.type = 'expense'
          AND CAST(strftime('%m', t.date) AS INTEGER) = b.month
          AND CAST(strftime('%Y', t.date) AS INTEGER) = b.year
    ), 0.0) AS spent
FROM budgets b
JOIN users u ON u.id = b.user_id
ORDER BY b.year, b.month, b.id
"#;

impl FinanceStore {
    /// Lists every budget with its owner and the month's spent amount.
    pub async fn list_budget_usage(&self) -> Result<Vec<BudgetUsage>> {
        let rows = BudgetUsageRow::find_by_statement(Statement::from_string(
            DbBackend::Sqlite,
            BUDGET_USAGE_SQL,
        ))
        .all(self.db())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| BudgetUsage {
                budget_id: r.budget_id,
                user_id: r.user_id,
                username: r.username,
                email: r.email,
                category_id: r.category_id,
                amount_limit: r.amount_limit,
                month: r.month,
                year: r.year,
                spent: r.spent,
            })
            .collect())
    }
}
