use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

use crate::error::Result;

pub mod budget;
pub mod goal;
pub mod notification;

/// Unified access layer over the application database.
///
/// All methods are `async fn` on top of SeaORM. `new` connects, enables WAL
/// mode on SQLite, and runs any pending migrations, so a fresh database
/// file is usable immediately.
pub struct FinanceStore {
    db: DatabaseConnection,
}

impl FinanceStore {
    /// Connects and initializes the database.
    ///
    /// `db_url` is a full connection URL supplied by the server config,
    /// e.g. `sqlite://data/moneypal.db?mode=rwc`.
    pub async fn new(db_url: &str) -> Result<Self> {
        let db = Database::connect(db_url).await?;

        // WAL only applies to SQLite
        if db_url.starts_with("sqlite://") {
            db.execute_unprepared("PRAGMA journal_mode=WAL;").await?;
        }

        Migrator::up(&db, None).await?;
        tracing::info!("finance store initialized");

        Ok(Self { db })
    }

    /// Cheap connectivity probe for the health endpoint.
    pub async fn ping(&self) -> Result<()> {
        self.db.execute_unprepared("SELECT 1").await?;
        Ok(())
    }

    /// The underlying connection, for seeding fixtures and admin tooling.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
