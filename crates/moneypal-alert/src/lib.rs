//! Alert policy for budgets and savings goals.
//!
//! Everything in this crate is pure computation: aggregated rows go in,
//! explicit per-entity [`decision::Outcome`] values come out. Storage reads,
//! ledger deduplication, and mail delivery live in the calling pipeline.

pub mod day;
pub mod decision;
pub mod metrics;
pub mod signature;
pub mod summary;


/// Fraction of the budget limit at which a near-limit alert fires.
pub const NEAR_LIMIT_THRESHOLD: f64 = 0.8;

/// How many days ahead of a goal deadline reminders start.
pub const REMINDER_WINDOW_DAYS: i64 = 3;
