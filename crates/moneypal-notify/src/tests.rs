use chrono::NaiveDate;
use moneypal_common::types::{BudgetUsage, DueGoal};

use crate::smtp::{MailConfig, SmtpMailer};
use crate::template;
use crate::NotifyError;

fn config(username: Option<&str>, password: Option<&str>) -> MailConfig {
    MailConfig {
        smtp_host: "smtp.example.com".into(),
        smtp_port: 465,
        username: username.map(str::to_owned),
        password: password.map(str::to_owned),
        from: "MoneyPal <alerts@moneypal.app>".into(),
    }
}

#[test]
fn mailer_requires_both_credentials() {
    assert!(SmtpMailer::new(&config(Some("user"), Some("pass"))).is_ok());

    for bad in [
        config(None, None),
        config(Some("user"), None),
        config(None, Some("pass")),
    ] {
        match SmtpMailer::new(&bad) {
            Err(NotifyError::InvalidConfig(_)) => {}
            Err(other) => panic!("expected InvalidConfig, got {other:?}"),
            Ok(_) => panic!("expected InvalidConfig, got a mailer"),
        }
    }
}

#[test]
fn mailer_rejects_malformed_from_address() {
    let mut cfg = config(Some("user"), Some("pass"));
    cfg.from = "not an address".into();
    assert!(matches!(
        SmtpMailer::new(&cfg),
        Err(NotifyError::Address(_))
    ));
}

#[test]
fn budget_alert_wording() {
    let usage = BudgetUsage {
        budget_id: "b1".into(),
        user_id: "u1".into(),
        username: "ayesha".into(),
        email: "ayesha@example.com".into(),
        category_id: None,
        amount_limit: 10_000.0,
        month: 5,
        year: 2025,
        spent: 8_500.0,
    };

    let mail = template::budget_alert(&usage, 0.85);
    assert_eq!(mail.subject, "Budget alert (ayesha): 85% used");
    assert!(mail.body.starts_with("Hi ayesha,"));
    assert!(mail.body.contains("PKR 8500.00 out of PKR 10000.00"));
    assert!(mail.body.contains("Usage: 85.0%"));
    assert!(mail.body.ends_with("- MoneyPal"));
}

#[test]
fn budget_alert_rounds_percentages() {
    let usage = BudgetUsage {
        budget_id: "b1".into(),
        user_id: "u1".into(),
        username: "bilal".into(),
        email: "bilal@example.com".into(),
        category_id: Some("fuel".into()),
        amount_limit: 3.0,
        month: 1,
        year: 2025,
        spent: 2.5,
    };

    let mail = template::budget_alert(&usage, 2.5 / 3.0);
    assert_eq!(mail.subject, "Budget alert (bilal): 83% used");
    assert!(mail.body.contains("Usage: 83.3%"));
}

#[test]
fn goal_reminder_wording() {
    let goal = DueGoal {
        goal_id: "g1".into(),
        user_id: "u1".into(),
        username: "ayesha".into(),
        email: "ayesha@example.com".into(),
        goal_name: "Umrah fund".into(),
        target_amount: 50_000.0,
        current_saved: 40_000.0,
        deadline: NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(),
    };

    let mail = template::goal_reminder(&goal, 10_000.0, 2);
    assert_eq!(mail.subject, "Savings goal reminder: Umrah fund (due soon)");
    assert!(mail.body.contains("'Umrah fund' is due on 2025-05-12"));
    assert!(mail.body.contains("Target: PKR 50000.00"));
    assert!(mail.body.contains("Saved: PKR 40000.00"));
    assert!(mail.body.contains("Remaining: PKR 10000.00"));
    assert!(mail.body.contains("Days left: 2"));
}
