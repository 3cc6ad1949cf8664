use chrono::NaiveDate;
use kpidesk::config::Config;
use kpidesk::core::checklist::checklist_from_config;
use kpidesk::core::compliance::{CheckerSettings, ComplianceChecker};
use kpidesk::core::notify::{Notification, Notifier, NotifyError};
use kpidesk::core::store::RecordStore;
use kpidesk::core::upload::UploadLogic;
use kpidesk::db::pool::DbPool;
use kpidesk::db::store::SqliteStore;
use kpidesk::models::cadence::{Cadence, Target};
use kpidesk::models::metric::MetricKind;
use kpidesk::models::record::MetricRecord;
use kpidesk::models::role::Role;
use std::cell::RefCell;
use std::collections::HashMap;

mod common;
use common::memory_db_with_users;

/// Records every message; fails for addresses listed in `reject`.
#[derive(Default)]
struct RecordingNotifier {
    sent: RefCell<Vec<Notification>>,
    reject: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn send(&self, message: &Notification) -> Result<(), NotifyError> {
        if self.reject.contains(&message.to) {
            return Err(NotifyError::Transport("relay refused".into()));
        }
        self.sent.borrow_mut().push(message.clone());
        Ok(())
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn settings() -> CheckerSettings {
    CheckerSettings {
        supervisor: "supervisor".into(),
        cc: vec!["audit@example.com".into()],
        checklist: checklist_from_config(&Config::default()),
    }
}

fn put(store: &SqliteStore, kind: MetricKind, date: NaiveDate) {
    store.upsert_all(&[MetricRecord::new(kind, date, "")]).unwrap();
}

/// Submit empty forms for every uploader role as if on `today`.
fn upload_everything(store: &SqliteStore, today: NaiveDate) {
    let banks = Config::default().banks;
    for role in Role::UPLOADERS {
        let name = format!("{}.clerk", role.code());
        UploadLogic::submit(store, store, &name, today, &banks, &HashMap::new()).unwrap();
    }
}

#[test]
fn wednesday_receivables_gap_is_an_exact_violation_for_monday() {
    let pool = memory_db_with_users();
    let store = SqliteStore::new(&pool.conn);
    let today = d(2024, 3, 6);

    upload_everything(&store, today);
    pool.conn
        .execute("DELETE FROM metric_records WHERE kind = 'account_receivables'", [])
        .unwrap();

    let notifier = RecordingNotifier::default();
    let checker = ComplianceChecker::new(&store, &store, &notifier, settings());
    let violations = checker.find_violations(today).unwrap();

    assert_eq!(violations.len(), 1);
    let v = &violations[0];
    assert_eq!(v.entry.kind, MetricKind::AccountReceivables);
    assert_eq!(v.target, Target::Exact(d(2024, 3, 4)));
    assert_eq!(v.check_type(), "exact");
    assert_eq!(v.period, "for Monday, 04 March 2024");

    // dry run sends nothing
    assert!(notifier.sent.borrow().is_empty());
}

#[test]
fn first_of_month_interest_is_checked_against_today() {
    let pool = memory_db_with_users();
    let store = SqliteStore::new(&pool.conn);
    let today = d(2024, 3, 1);

    put(&store, MetricKind::BankInterest, d(2024, 2, 1));

    let notifier = RecordingNotifier::default();
    let checker = ComplianceChecker::new(&store, &store, &notifier, settings());
    let violations = checker.find_violations(today).unwrap();

    let interest = violations
        .iter()
        .find(|v| v.entry.kind == MetricKind::BankInterest)
        .expect("interest violation");
    assert_eq!(interest.target, Target::Exact(d(2024, 3, 1)));
    assert_eq!(interest.entry.cadence, Cadence::Monthly);
}

#[test]
fn scrap_window_accepts_two_days_ago_but_not_three() {
    let today = d(2024, 3, 6);

    let scrap_flagged = |record_day: NaiveDate| {
        let pool = memory_db_with_users();
        let store = SqliteStore::new(&pool.conn);
        put(&store, MetricKind::ScrapData, record_day);

        let notifier = RecordingNotifier::default();
        let checker = ComplianceChecker::new(&store, &store, &notifier, settings());
        checker
            .find_violations(today)
            .unwrap()
            .into_iter()
            .find(|v| v.entry.kind == MetricKind::ScrapData)
    };

    assert!(scrap_flagged(d(2024, 3, 4)).is_none());

    let v = scrap_flagged(d(2024, 3, 3)).expect("scrap violation");
    assert_eq!(v.target, Target::Since(d(2024, 3, 4)));
    assert_eq!(v.check_type(), "range");
    assert_eq!(v.period, "in the last 3 days");
}

#[test]
fn uploader_without_email_still_alerts_the_supervisor() {
    let pool = memory_db_with_users();
    let store = SqliteStore::new(&pool.conn);
    let today = d(2024, 3, 6);

    upload_everything(&store, today);
    pool.conn
        .execute("DELETE FROM metric_records WHERE kind = 'sales_data'", [])
        .unwrap();
    pool.conn
        .execute("UPDATE users SET email = NULL WHERE role = 'uploader_sales'", [])
        .unwrap();

    let notifier = RecordingNotifier::default();
    let checker = ComplianceChecker::new(&store, &store, &notifier, settings());
    let run = checker.check_compliance(today).unwrap();

    assert_eq!(run.violations.len(), 1);
    let sent = notifier.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "supervisor@example.com");
    assert_eq!(sent[0].subject, "ALERT: Sales KPIs Missing");
    assert!(sent[0].body.contains("User: sales.clerk"));
    assert!(sent[0].body.contains("Expected Date: 2024-03-06"));
    assert_eq!(sent[0].cc, vec!["audit@example.com".to_string()]);
}

#[test]
fn uploader_and_supervisor_both_get_one_message() {
    let pool = memory_db_with_users();
    let store = SqliteStore::new(&pool.conn);
    let today = d(2024, 3, 6);

    upload_everything(&store, today);
    pool.conn
        .execute("DELETE FROM metric_records WHERE kind = 'account_payables'", [])
        .unwrap();

    let notifier = RecordingNotifier::default();
    let checker = ComplianceChecker::new(&store, &store, &notifier, settings());
    let run = checker.check_compliance(today).unwrap();

    let sent = notifier.sent.borrow();
    assert_eq!(run.delivered(), 2);
    assert_eq!(sent[0].to, "payables@example.com");
    assert_eq!(sent[0].subject, "URGENT: Account Payables Overdue");
    assert!(
        sent[0]
            .body
            .contains("You have not uploaded the Account Payables for Monday, 04 March 2024")
    );
    assert_eq!(sent[1].subject, "ALERT: Account Payables Missing");
}

#[test]
fn roles_without_a_user_are_skipped() {
    let pool = DbPool::in_memory().unwrap();
    let store = SqliteStore::new(&pool.conn);
    store
        .insert_user("sales.clerk", Some("sales@example.com"), Role::Sales)
        .unwrap();

    let notifier = RecordingNotifier::default();
    let checker = ComplianceChecker::new(&store, &store, &notifier, settings());
    let run = checker.check_compliance(d(2024, 3, 6)).unwrap();

    // nothing stored at all, yet only the sales entry has someone to blame
    assert_eq!(run.violations.len(), 1);
    assert_eq!(run.violations[0].entry.kind, MetricKind::SalesData);
    // supervisor is not registered either: only the uploader hears about it
    assert_eq!(notifier.sent.borrow().len(), 1);
}

#[test]
fn notifier_failure_does_not_stop_the_loop() {
    let pool = memory_db_with_users();
    let store = SqliteStore::new(&pool.conn);
    let today = d(2024, 3, 6);

    let notifier = RecordingNotifier {
        reject: vec!["balance@example.com".into()],
        ..Default::default()
    };
    let checker = ComplianceChecker::new(&store, &store, &notifier, settings());
    let run = checker.check_compliance(today).unwrap();

    // empty store: every checklist entry is missing
    assert_eq!(run.violations.len(), MetricKind::ALL.len());
    assert_eq!(run.failed().count(), 1);
    assert_eq!(run.delivered(), 2 * MetricKind::ALL.len() - 1);
    assert_eq!(notifier.sent.borrow().len(), run.delivered());
}

#[test]
fn uploading_then_checking_finds_nothing_and_is_repeatable() {
    let pool = memory_db_with_users();
    let store = SqliteStore::new(&pool.conn);

    for today in d(2024, 2, 26).iter_days().take(10) {
        upload_everything(&store, today);

        let notifier = RecordingNotifier::default();
        let checker = ComplianceChecker::new(&store, &store, &notifier, settings());
        assert!(checker.find_violations(today).unwrap().is_empty(), "{today}");
        assert!(checker.check_compliance(today).unwrap().violations.is_empty());
        assert!(notifier.sent.borrow().is_empty());
    }
}

#[test]
fn repeated_runs_report_the_same_violations() {
    let pool = memory_db_with_users();
    let store = SqliteStore::new(&pool.conn);
    let today = d(2024, 3, 6);
    put(&store, MetricKind::SalesData, today);

    let notifier = RecordingNotifier::default();
    let checker = ComplianceChecker::new(&store, &store, &notifier, settings());

    let first = checker.check_compliance(today).unwrap();
    let second = checker.check_compliance(today).unwrap();
    assert_eq!(first.violations, second.violations);
    assert_eq!(first.deliveries.len(), second.deliveries.len());

    // the checker never writes records
    assert_eq!(store.records_between(MetricKind::SalesData, None).unwrap().len(), 1);
}
