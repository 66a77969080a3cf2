use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use moneypal_notify::MailTransport;
use moneypal_storage::FinanceStore;
use std::sync::Arc;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FinanceStore>,
    pub mailer: Arc<dyn MailTransport>,
    pub config: Arc<ServerConfig>,
    /// Timezone the reminder schedule (and dedup calendar day) is anchored in.
    pub tz: Tz,
    pub start_time: DateTime<Utc>,
}
