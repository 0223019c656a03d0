#![allow(clippy::unwrap_used)]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use rust_decimal_macros::dec;

use super::*;
use crate::models::TransactionType;
use crate::store::{KeyValue, MemoryKv};
use crate::ui::form::FormField;

/// Memory substrate whose writes can be switched off mid-test.
struct FlakyKv {
    inner: MemoryKv,
    fail_writes: Rc<Cell<bool>>,
}

impl KeyValue for FlakyKv {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.fail_writes.get() {
            anyhow::bail!("disk full");
        }
        self.inner.set(key, value)
    }
}

fn setup() -> (App, Store) {
    let mut store = Store::new(MemoryKv::new()).unwrap();
    let mut app = App::new(&Config::default());
    app.dispatch(Action::Load, &mut store).unwrap();
    (app, store)
}

fn flaky_setup() -> (App, Store, Rc<Cell<bool>>) {
    let fail = Rc::new(Cell::new(false));
    let kv = FlakyKv {
        inner: MemoryKv::new(),
        fail_writes: Rc::clone(&fail),
    };
    let mut store = Store::new(kv).unwrap();
    let mut app = App::new(&Config::default());
    app.dispatch(Action::Load, &mut store).unwrap();
    (app, store, fail)
}

fn fill(app: &mut App, description: &str, amount: &str, kind: TransactionType, category: &str) {
    app.form.description = description.into();
    app.form.amount = amount.into();
    app.form.kind = kind;
    app.form.category_index = app.categories.iter().position(|c| c == category).unwrap();
    app.form.date = "2024-01-15".into();
}

fn submit(app: &mut App, store: &mut Store, description: &str, amount: &str, kind: TransactionType, category: &str) {
    fill(app, description, amount, kind, category);
    app.dispatch(Action::Submit, store).unwrap();
}

fn spend<'a>(app: &'a App, category: &str) -> &'a CategorySpend {
    app.budget.iter().find(|b| b.category == category).unwrap()
}

fn last_alert(app: &App) -> (String, AlertKind) {
    let alert = app.notifications.active().last().unwrap();
    (alert.message.clone(), alert.kind)
}

// ── Load ──────────────────────────────────────────────────────

#[test]
fn test_load_empty_ledger() {
    let (app, _store) = setup();
    assert!(app.transactions.is_empty());
    assert_eq!(app.summary.balance, dec!(0));
    assert_eq!(app.budget.len(), 5);
    assert!(app.budget.iter().all(|b| b.percentage == dec!(0)));
}

#[test]
fn test_load_picks_up_existing_records() {
    let mut store = Store::new(MemoryKv::new()).unwrap();
    let txn = Transaction::new(
        "Rent".into(),
        dec!(1200),
        TransactionType::Expense,
        "rent".into(),
        "2024-01-01".into(),
    );
    store.add_transaction(&txn).unwrap();

    let mut app = App::new(&Config::default());
    app.dispatch(Action::Load, &mut store).unwrap();
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.summary.total_expenses, dec!(1200));
    assert!(spend(&app, "rent").is_warning());
}

// ── Submit ────────────────────────────────────────────────────

#[test]
fn test_add_delete_walkthrough() {
    let (mut app, mut store) = setup();

    submit(&mut app, &mut store, "Paycheck", "2000", TransactionType::Income, "salary");
    assert_eq!(app.summary.total_income, dec!(2000));
    assert_eq!(app.summary.balance, dec!(2000));

    submit(&mut app, &mut store, "Groceries", "150", TransactionType::Expense, "food");
    assert_eq!(app.summary.total_expenses, dec!(150));
    assert_eq!(app.summary.balance, dec!(1850));
    let food = spend(&app, "food");
    assert_eq!(food.spent, dec!(150));
    assert_eq!(food.limit, dec!(500));
    assert_eq!(food.percentage, dec!(30));
    assert!(!food.is_warning());

    let paycheck = app.transactions[0].id.clone();
    app.dispatch(Action::Delete(paycheck), &mut store).unwrap();
    assert_eq!(app.summary.total_income, dec!(0));
    assert_eq!(app.summary.balance, dec!(-150));
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(store.get_transactions().unwrap().len(), 1);
    assert_eq!(last_alert(&app), ("Transaction removed".into(), AlertKind::Success));
}

#[test]
fn test_submit_persists_and_resets_form() {
    let (mut app, mut store) = setup();
    app.input_mode = InputMode::Entry;
    app.form.field = FormField::Amount;
    submit(&mut app, &mut store, "Paycheck", "2,000.50", TransactionType::Income, "salary");

    let stored = store.get_transactions().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].amount, dec!(2000.50));
    assert_eq!(stored[0].category, "salary");

    assert!(app.form.description.is_empty());
    assert!(app.form.amount.is_empty());
    assert_eq!(app.form.field, FormField::Description);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(
        last_alert(&app),
        ("Transaction added successfully".into(), AlertKind::Success)
    );
}

#[test]
fn test_submit_selects_new_row() {
    let (mut app, mut store) = setup();
    submit(&mut app, &mut store, "One", "1", TransactionType::Income, "salary");
    submit(&mut app, &mut store, "Two", "2", TransactionType::Income, "salary");
    assert_eq!(app.selected().unwrap().description, "Two");
}

#[test]
fn test_submit_missing_fields_changes_nothing() {
    let (mut app, mut store) = setup();
    app.input_mode = InputMode::Entry;
    fill(&mut app, "", "150", TransactionType::Expense, "food");
    app.dispatch(Action::Submit, &mut store).unwrap();

    assert!(store.get_transactions().unwrap().is_empty());
    assert!(app.transactions.is_empty());
    assert_eq!(app.form.amount, "150");
    assert_eq!(app.input_mode, InputMode::Entry);
    assert_eq!(
        last_alert(&app),
        ("Please fill in all fields".into(), AlertKind::Error)
    );
}

#[test]
fn test_submit_bad_amount_rejected() {
    let (mut app, mut store) = setup();
    fill(&mut app, "Lunch", "12.3.4", TransactionType::Expense, "food");
    app.dispatch(Action::Submit, &mut store).unwrap();
    assert!(store.get_transactions().unwrap().is_empty());
    assert_eq!(last_alert(&app).1, AlertKind::Error);
}

#[test]
fn test_submit_oversized_amounts_keep_ledger_loadable() {
    let (mut app, mut store) = setup();
    for _ in 0..2 {
        fill(&mut app, "Windfall", "50000000000000000000000000000", TransactionType::Income, "salary");
        app.dispatch(Action::Submit, &mut store).unwrap();
        let (message, kind) = last_alert(&app);
        assert_eq!(kind, AlertKind::Error);
        assert!(message.contains("at most"));
    }
    assert!(store.get_transactions().unwrap().is_empty());

    submit(&mut app, &mut store, "Bonus", "1,000,000,000,000", TransactionType::Income, "salary");
    submit(&mut app, &mut store, "Bonus", "1,000,000,000,000", TransactionType::Income, "salary");
    app.dispatch(Action::Load, &mut store).unwrap();
    assert_eq!(app.summary.total_income, dec!(2000000000000));
}

#[test]
fn test_submit_outside_filter_not_listed() {
    let (mut app, mut store) = setup();
    app.dispatch(Action::SetFilter(Filter::Income), &mut store).unwrap();
    submit(&mut app, &mut store, "Groceries", "150", TransactionType::Expense, "food");

    assert!(app.transactions.is_empty());
    assert_eq!(store.get_transactions().unwrap().len(), 1);
    assert_eq!(app.summary.total_expenses, dec!(150));
}

#[test]
fn test_submit_rolls_back_when_store_fails() {
    let (mut app, mut store, fail) = flaky_setup();
    submit(&mut app, &mut store, "Paycheck", "2000", TransactionType::Income, "salary");
    fail.set(true);

    submit(&mut app, &mut store, "Bonus", "500", TransactionType::Income, "salary");
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.transactions[0].description, "Paycheck");
    assert_eq!(app.summary.total_income, dec!(2000));
    assert_eq!(app.form.description, "Bonus");

    let (message, kind) = last_alert(&app);
    assert_eq!(kind, AlertKind::Error);
    assert!(message.contains("disk full"));
}

// ── Delete ────────────────────────────────────────────────────

#[test]
fn test_delete_unknown_id_is_harmless() {
    let (mut app, mut store) = setup();
    submit(&mut app, &mut store, "Paycheck", "2000", TransactionType::Income, "salary");
    app.dispatch(Action::Delete(TransactionId::from("nope")), &mut store)
        .unwrap();
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.summary.balance, dec!(2000));
}

#[test]
fn test_delete_rolls_back_when_store_fails() {
    let (mut app, mut store, fail) = flaky_setup();
    submit(&mut app, &mut store, "A", "1", TransactionType::Income, "salary");
    submit(&mut app, &mut store, "B", "2", TransactionType::Income, "salary");
    submit(&mut app, &mut store, "C", "3", TransactionType::Income, "salary");
    fail.set(true);

    let middle = app.transactions[1].id.clone();
    app.dispatch(Action::Delete(middle), &mut store).unwrap();
    let names: Vec<_> = app.transactions.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
    assert_eq!(store.get_transactions().unwrap().len(), 3);
    assert_eq!(last_alert(&app).1, AlertKind::Error);
}

#[test]
fn test_delete_last_row_clamps_cursor() {
    let (mut app, mut store) = setup();
    submit(&mut app, &mut store, "A", "1", TransactionType::Income, "salary");
    submit(&mut app, &mut store, "B", "2", TransactionType::Income, "salary");
    assert_eq!(app.transaction_index, 1);

    let id = app.selected().unwrap().id.clone();
    app.dispatch(Action::Delete(id), &mut store).unwrap();
    assert_eq!(app.transaction_index, 0);
    assert_eq!(app.selected().unwrap().description, "A");
}

// ── Filter ────────────────────────────────────────────────────

#[test]
fn test_filter_changes_list_not_totals() {
    let (mut app, mut store) = setup();
    submit(&mut app, &mut store, "Paycheck", "2000", TransactionType::Income, "salary");
    submit(&mut app, &mut store, "Groceries", "150", TransactionType::Expense, "food");
    submit(&mut app, &mut store, "Cinema", "20", TransactionType::Expense, "entertainment");

    app.dispatch(Action::SetFilter(Filter::Expense), &mut store).unwrap();
    let names: Vec<_> = app.transactions.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, ["Groceries", "Cinema"]);
    assert_eq!(app.transaction_index, 0);
    assert_eq!(app.summary.balance, dec!(1830));

    app.dispatch(Action::SetFilter(Filter::Income), &mut store).unwrap();
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.transactions[0].description, "Paycheck");

    app.dispatch(Action::SetFilter(Filter::All), &mut store).unwrap();
    assert_eq!(app.transactions.len(), 3);
}

// ── Alerts ────────────────────────────────────────────────────

#[test]
fn test_alerts_stack_and_expire_independently() {
    let (mut app, _store) = setup();
    let first = app.show_alert("first", AlertKind::Success);
    let second = app.show_alert("second", AlertKind::Error);
    assert_ne!(first, second);
    assert_eq!(app.notifications.active().len(), 2);

    app.tick(Instant::now() + Duration::from_secs(10));
    assert!(app.notifications.is_empty());
}

#[test]
fn test_alert_lifetime_comes_from_config() {
    let config = Config {
        alert_seconds: 60,
        ..Config::default()
    };
    let mut app = App::new(&config);
    app.show_alert("hello", AlertKind::Success);
    app.tick(Instant::now() + Duration::from_secs(5));
    assert_eq!(app.notifications.active().len(), 1);
}
