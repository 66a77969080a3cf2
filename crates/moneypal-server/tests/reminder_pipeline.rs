//! End-to-end pipeline tests against a throwaway SQLite database and a
//! recording mail transport.

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use moneypal_alert::day::EvaluationDay;
use moneypal_common::types::NotificationKind;
use moneypal_notify::{MailTransport, NotifyError};
use moneypal_server::reminders::{run_budget_pass, run_goal_pass, PassError};
use moneypal_storage::entities::{budget, savings_goal, transaction, user};
use moneypal_storage::FinanceStore;
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;

#[derive(Debug, Clone)]
struct SentMail {
    to: String,
    subject: String,
    body: String,
}

/// Records sends instead of delivering; can simulate a transport outage.
#[derive(Default)]
struct MockMailer {
    sent: Mutex<Vec<SentMail>>,
    failing: AtomicBool,
}

impl MockMailer {
    fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl MailTransport for MockMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> moneypal_notify::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Other("simulated transport outage".into()));
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }

    fn transport_name(&self) -> &str {
        "mock"
    }
}

struct Fixture {
    _dir: TempDir,
    store: FinanceStore,
    mailer: MockMailer,
    day: EvaluationDay,
}

impl Fixture {
    fn today(&self) -> NaiveDate {
        self.day.date()
    }
}

async fn setup() -> Fixture {
    let dir = TempDir::new().unwrap();
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("moneypal.db").display()
    );
    let store = FinanceStore::new(&url).await.unwrap();
    let tz: Tz = "Asia/Karachi".parse().unwrap();
    let day = EvaluationDay::containing(Utc::now(), tz);
    Fixture {
        _dir: dir,
        store,
        mailer: MockMailer::default(),
        day,
    }
}

async fn seed_user(store: &FinanceStore, id: &str, username: &str) {
    let now = Utc::now().fixed_offset();
    user::ActiveModel {
        id: Set(id.to_owned()),
        username: Set(username.to_owned()),
        email: Set(format!("{username}@example.com")),
        password_hash: Set("x".to_owned()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(store.db())
    .await
    .unwrap();
}

async fn seed_budget(store: &FinanceStore, id: &str, user_id: &str, limit: f64, on: NaiveDate) {
    let now = Utc::now().fixed_offset();
    budget::ActiveModel {
        id: Set(id.to_owned()),
        user_id: Set(user_id.to_owned()),
        category_id: Set(None),
        amount_limit: Set(limit),
        month: Set(on.month() as i32),
        year: Set(on.year()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(store.db())
    .await
    .unwrap();
}

async fn seed_expense(store: &FinanceStore, user_id: &str, amount: f64, on: NaiveDate) {
    transaction::ActiveModel {
        id: Set(moneypal_common::id::next_id()),
        user_id: Set(user_id.to_owned()),
        category_id: Set(None),
        amount: Set(amount),
        date: Set(on),
        kind: Set("expense".to_owned()),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(store.db())
    .await
    .unwrap();
}

async fn seed_goal(
    store: &FinanceStore,
    id: &str,
    user_id: &str,
    name: &str,
    target: f64,
    saved: f64,
    deadline: Option<NaiveDate>,
    notify: bool,
) {
    let now = Utc::now().fixed_offset();
    savings_goal::ActiveModel {
        id: Set(id.to_owned()),
        user_id: Set(user_id.to_owned()),
        category_id: Set(None),
        goal_name: Set(name.to_owned()),
        target_amount: Set(target),
        current_saved: Set(saved),
        deadline: Set(deadline),
        notify_enabled: Set(notify),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(store.db())
    .await
    .unwrap();
}

#[tokio::test]
async fn budget_pass_sends_and_records_once() {
    let f = setup().await;
    seed_user(&f.store, "u1", "ayesha").await;
    seed_budget(&f.store, "b1", "u1", 10_000.0, f.today()).await;
    seed_expense(&f.store, "u1", 8_500.0, f.today()).await;

    let summary = run_budget_pass(&f.store, &f.mailer, &f.day).await.unwrap();
    assert_eq!(summary.evaluated, 1);
    assert_eq!(summary.sent, 1);

    let sent = f.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ayesha@example.com");
    assert_eq!(sent[0].subject, "Budget alert (ayesha): 85% used");
    assert!(sent[0].body.contains("PKR 8500.00 out of PKR 10000.00"));

    let ledger = f
        .store
        .list_notifications_for_user("u1", 20, 0)
        .await
        .unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].message, "[BUDGET_ALERT][budget_id=b1]");
    assert_eq!(ledger[0].kind, NotificationKind::BudgetAlert);
    assert_eq!(ledger[0].goal_id, None);
}

#[tokio::test]
async fn budget_pass_is_idempotent_within_a_day() {
    let f = setup().await;
    seed_user(&f.store, "u1", "ayesha").await;
    seed_budget(&f.store, "b1", "u1", 10_000.0, f.today()).await;
    seed_expense(&f.store, "u1", 9_000.0, f.today()).await;

    let first = run_budget_pass(&f.store, &f.mailer, &f.day).await.unwrap();
    assert_eq!(first.sent, 1);

    // Same data, same day: the ledger suppresses the resend.
    let second = run_budget_pass(&f.store, &f.mailer, &f.day).await.unwrap();
    assert_eq!(second.sent, 0);
    assert_eq!(second.suppressed, 1);

    assert_eq!(f.mailer.sent().len(), 1);
    assert_eq!(
        f.store.count_notifications_for_user("u1").await.unwrap(),
        1
    );
}

#[tokio::test]
async fn budget_pass_respects_threshold_and_guards() {
    let f = setup().await;
    seed_user(&f.store, "u1", "ayesha").await;
    seed_user(&f.store, "u2", "bilal").await;
    seed_user(&f.store, "u3", "sana").await;
    // 79.99% used: below the 80% threshold.
    seed_budget(&f.store, "b1", "u1", 10_000.0, f.today()).await;
    seed_expense(&f.store, "u1", 7_999.0, f.today()).await;
    // Unusable limit.
    seed_budget(&f.store, "b2", "u2", 0.0, f.today()).await;
    seed_expense(&f.store, "u2", 500.0, f.today()).await;
    // No spending at all.
    seed_budget(&f.store, "b3", "u3", 5_000.0, f.today()).await;

    let summary = run_budget_pass(&f.store, &f.mailer, &f.day).await.unwrap();
    assert_eq!(summary.evaluated, 3);
    assert_eq!(summary.sent, 0);
    assert_eq!(summary.not_evaluable, 1);
    assert_eq!(summary.skipped, 2);
    assert!(f.mailer.sent().is_empty());
}

#[tokio::test]
async fn goal_pass_reminds_underfunded_goals_in_window() {
    let f = setup().await;
    seed_user(&f.store, "u1", "ayesha").await;
    let deadline = f.today() + Duration::days(2);
    seed_goal(
        &f.store, "g1", "u1", "Umrah fund", 50_000.0, 40_000.0, Some(deadline), true,
    )
    .await;

    let summary = run_goal_pass(&f.store, &f.mailer, &f.day).await.unwrap();
    assert_eq!(summary.sent, 1);

    let sent = f.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ayesha@example.com");
    assert_eq!(sent[0].subject, "Savings goal reminder: Umrah fund (due soon)");
    assert!(sent[0].body.contains("Remaining: PKR 10000.00"));
    assert!(sent[0].body.contains("Days left: 2"));

    let ledger = f
        .store
        .list_notifications_for_user("u1", 20, 0)
        .await
        .unwrap();
    assert_eq!(ledger[0].message, "[GOAL_REMINDER][goal_id=g1]");
    assert_eq!(ledger[0].kind, NotificationKind::SavingsMilestone);
    assert_eq!(ledger[0].goal_id.as_deref(), Some("g1"));

    // Second run the same day sends nothing new.
    let second = run_goal_pass(&f.store, &f.mailer, &f.day).await.unwrap();
    assert_eq!(second.sent, 0);
    assert_eq!(second.suppressed, 1);
    assert_eq!(f.mailer.sent().len(), 1);
}

#[tokio::test]
async fn goal_pass_skips_funded_muted_and_far_goals() {
    let f = setup().await;
    seed_user(&f.store, "u1", "ayesha").await;
    let soon = f.today() + Duration::days(1);
    // Fully funded: listed by the query, skipped by the policy.
    seed_goal(&f.store, "g-done", "u1", "done", 1_000.0, 1_000.0, Some(soon), true).await;
    // Reminders disabled and deadline beyond the window: not even listed.
    seed_goal(&f.store, "g-muted", "u1", "muted", 1_000.0, 0.0, Some(soon), false).await;
    seed_goal(
        &f.store,
        "g-far",
        "u1",
        "far",
        1_000.0,
        0.0,
        Some(f.today() + Duration::days(30)),
        true,
    )
    .await;
    seed_goal(&f.store, "g-open", "u1", "open", 1_000.0, 0.0, None, true).await;

    let summary = run_goal_pass(&f.store, &f.mailer, &f.day).await.unwrap();
    assert_eq!(summary.evaluated, 1);
    assert_eq!(summary.sent, 0);
    assert_eq!(summary.skipped, 1);
    assert!(f.mailer.sent().is_empty());
    assert_eq!(f.store.count_notifications_for_user("u1").await.unwrap(), 0);
}

#[tokio::test]
async fn transport_outage_aborts_pass_without_ledger_rows() {
    let f = setup().await;
    seed_user(&f.store, "u1", "ayesha").await;
    seed_user(&f.store, "u2", "bilal").await;
    seed_budget(&f.store, "b1", "u1", 10_000.0, f.today()).await;
    seed_expense(&f.store, "u1", 9_500.0, f.today()).await;
    seed_budget(&f.store, "b2", "u2", 10_000.0, f.today()).await;
    seed_expense(&f.store, "u2", 9_500.0, f.today()).await;

    f.mailer.set_failing(true);
    let err = run_budget_pass(&f.store, &f.mailer, &f.day)
        .await
        .unwrap_err();
    assert!(matches!(err, PassError::Mail(_)));

    // Nothing went out, so nothing may be recorded as sent.
    assert!(f.mailer.sent().is_empty());
    assert_eq!(f.store.count_notifications_for_user("u1").await.unwrap(), 0);
    assert_eq!(f.store.count_notifications_for_user("u2").await.unwrap(), 0);

    // Transport recovers: the rerun delivers both alerts exactly once.
    f.mailer.set_failing(false);
    let summary = run_budget_pass(&f.store, &f.mailer, &f.day).await.unwrap();
    assert_eq!(summary.sent, 2);
    assert_eq!(f.mailer.sent().len(), 2);
}
