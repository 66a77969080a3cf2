use chrono::{DateTime, Utc};
use moneypal_common::types::{NotificationKind, NotificationRecord};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::notification::{self, Column, Entity};
use crate::error::{Result, StorageError};
use crate::store::FinanceStore;

fn model_to_record(m: notification::Model) -> Result<NotificationRecord> {
    let kind = m
        .kind
        .parse::<NotificationKind>()
        .map_err(|message| StorageError::InvalidColumn {
            column: "type",
            message,
        })?;
    Ok(NotificationRecord {
        id: m.id,
        user_id: m.user_id,
        goal_id: m.goal_id,
        message: m.message,
        kind,
        created_at: m.created_at.with_timezone(&Utc),
    })
}

impl FinanceStore {
    /// True when the user already has a ledger entry of this kind with this
    /// exact message created inside `[start, end)`.
    ///
    /// This is the same-day duplicate check; callers pass the evaluation
    /// day's UTC window.
    pub async fn has_notification_in_window(
        &self,
        user_id: &str,
        kind: NotificationKind,
        message: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool> {
        let hits = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Kind.eq(kind.to_string()))
            .filter(Column::Message.eq(message))
            .filter(Column::CreatedAt.gte(start.fixed_offset()))
            .filter(Column::CreatedAt.lt(end.fixed_offset()))
            .count(self.db())
            .await?;
        Ok(hits > 0)
    }

    /// Appends a ledger entry. Only the dispatcher calls this, and only
    /// after the mail transport accepted the message.
    pub async fn insert_notification(
        &self,
        user_id: &str,
        goal_id: Option<&str>,
        message: &str,
        kind: NotificationKind,
    ) -> Result<NotificationRecord> {
        let now = Utc::now().fixed_offset();
        let am = notification::ActiveModel {
            id: Set(moneypal_common::id::next_id()),
            user_id: Set(user_id.to_owned()),
            goal_id: Set(goal_id.map(str::to_owned)),
            message: Set(message.to_owned()),
            kind: Set(kind.to_string()),
            created_at: Set(now),
        };
        let model = am.insert(self.db()).await?;
        model_to_record(model)
    }

    /// A user's ledger entries, newest first.
    pub async fn list_notifications_for_user(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<NotificationRecord>> {
        let rows = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by(Column::CreatedAt, Order::Desc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.db())
            .await?;
        rows.into_iter().map(model_to_record).collect()
    }

    pub async fn count_notifications_for_user(&self, user_id: &str) -> Result<u64> {
        Ok(Entity::find()
            .filter(Column::UserId.eq(user_id))
            .count(self.db())
            .await?)
    }
}
