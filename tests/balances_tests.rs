// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::balances;
use pocketledger::models::{CategoryKind, NewTransaction};
use pocketledger::repo::{accounts, categories, transactions};
use pocketledger::{LedgerError, Money, Store, reports};
use tempfile::TempDir;

fn setup() -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let store = Store::open_or_init(dir.path().join("ledger.sqlite")).unwrap();
    (dir, store)
}

fn m(s: &str) -> Money {
    s.parse().unwrap()
}

fn post(store: &Store, account_id: i64, date: &str, amount: &str, category_id: Option<i64>) {
    let new = NewTransaction {
        account_id,
        date: date.into(),
        description: "entry".into(),
        amount: m(amount),
        category_id,
    };
    assert!(transactions::add(store, &new).unwrap().is_done());
}

#[test]
fn checking_month_scenario() {
    let (_dir, store) = setup();
    let checking = accounts::add(&store, "Checking", m("100.00")).unwrap().done().unwrap();
    let groceries = categories::add(&store, "Groceries", CategoryKind::Expense)
        .unwrap()
        .done()
        .unwrap();
    let salary = categories::add(&store, "Salary", CategoryKind::Income)
        .unwrap()
        .done()
        .unwrap();
    post(&store, checking, "2024-01-05", "-25.50", Some(groceries));
    post(&store, checking, "2024-01-31", "1000.00", Some(salary));

    let balance = balances::current_balance(&store, checking).unwrap().unwrap();
    assert_eq!(balance.to_string(), "1074.50");
    assert_eq!(
        balances::spending_for(&store, groceries, "2024-01").unwrap().to_string(),
        "25.50"
    );
    assert_eq!(balances::spending_for(&store, groceries, "2024-02").unwrap(), Money::ZERO);

    let summary = balances::income_expense_summary(&store, "2024-01").unwrap();
    assert_eq!(summary.total_income.to_string(), "1000.00");
    assert_eq!(summary.total_expense.to_string(), "25.50");
    assert_eq!(summary.net().unwrap().to_string(), "974.50");
}

#[test]
fn balance_is_initial_plus_history() {
    let (_dir, store) = setup();
    let empty = accounts::add(&store, "Empty", m("12.34")).unwrap().done().unwrap();
    assert_eq!(
        balances::current_balance(&store, empty).unwrap(),
        Some(m("12.34"))
    );

    let busy = accounts::add(&store, "Busy", m("0.10")).unwrap().done().unwrap();
    let amounts = ["0.10", "0.20", "-0.30", "19.99", "-7.01", "0.01"];
    let mut expected = m("0.10");
    for a in amounts {
        post(&store, busy, "2024-05-01", a, None);
        expected = expected.checked_add(m(a)).unwrap();
    }
    assert_eq!(balances::current_balance(&store, busy).unwrap(), Some(expected.quantize()));
    assert_eq!(expected.to_string(), "13.09");
}

#[test]
fn missing_account_has_no_balance() {
    let (_dir, store) = setup();
    assert_eq!(balances::current_balance(&store, 42).unwrap(), None);
}

#[test]
fn net_balance_sums_every_account() {
    let (_dir, store) = setup();
    assert_eq!(balances::total_net_balance(&store).unwrap(), Money::ZERO);

    let a = accounts::add(&store, "a", m("10")).unwrap().done().unwrap();
    let b = accounts::add(&store, "b", m("-3.33")).unwrap().done().unwrap();
    post(&store, a, "2024-01-01", "-0.67", None);
    post(&store, b, "2024-01-01", "1", None);

    let all = balances::accounts_with_balances(&store).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "a");
    assert_eq!(all[0].current_balance.to_string(), "9.33");
    assert_eq!(all[1].current_balance.to_string(), "-2.33");
    assert_eq!(balances::total_net_balance(&store).unwrap().to_string(), "7.00");
}

#[test]
fn summary_ignores_other_months() {
    let (_dir, store) = setup();
    let acct = accounts::add(&store, "x", Money::ZERO).unwrap().done().unwrap();
    post(&store, acct, "2023-12-31", "-5", None);
    post(&store, acct, "2024-01-01", "-1.25", None);
    post(&store, acct, "2024-02-01", "40", None);

    let jan = balances::income_expense_summary(&store, "2024-01").unwrap();
    assert_eq!(jan.total_income, Money::ZERO);
    assert_eq!(jan.total_expense.to_string(), "1.25");

    let empty = balances::income_expense_summary(&store, "1999-01").unwrap();
    assert_eq!(empty.total_income, Money::ZERO);
    assert_eq!(empty.total_expense, Money::ZERO);
}

const DECIMAL_MAX: &str = "79228162514264337593543950335";

#[test]
fn totals_beyond_decimal_range_are_errors() {
    let (_dir, store) = setup();
    let huge = Money::parse_or_zero(DECIMAL_MAX);
    accounts::add(&store, "Vault A", huge).unwrap();
    accounts::add(&store, "Vault B", huge).unwrap();

    assert!(matches!(
        balances::total_net_balance(&store),
        Err(LedgerError::Overflow(_))
    ));
    assert!(matches!(
        reports::dashboard(&store, "2024-01", 5),
        Err(LedgerError::Overflow(_))
    ));
    // Each account alone is still representable.
    assert_eq!(balances::accounts_with_balances(&store).unwrap().len(), 2);
}

#[test]
fn account_history_overflow_is_an_error() {
    let (_dir, store) = setup();
    let vault = accounts::add(&store, "Vault", Money::parse_or_zero(DECIMAL_MAX))
        .unwrap()
        .done()
        .unwrap();
    post(&store, vault, "2024-01-02", DECIMAL_MAX, None);
    post(&store, vault, "2024-01-03", DECIMAL_MAX, None);

    assert!(matches!(
        balances::current_balance(&store, vault),
        Err(LedgerError::Overflow(_))
    ));
    assert!(matches!(
        balances::accounts_with_balances(&store),
        Err(LedgerError::Overflow(_))
    ));
    assert!(matches!(
        balances::income_expense_summary(&store, "2024-01"),
        Err(LedgerError::Overflow(_))
    ));
}
