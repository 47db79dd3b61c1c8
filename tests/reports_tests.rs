// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::models::{CategoryKind, NewTransaction};
use pocketledger::repo::{accounts, budgets, categories, transactions};
use pocketledger::{Money, Store, reports};
use tempfile::TempDir;

fn m(s: &str) -> Money {
    s.parse().unwrap()
}

struct Ledger {
    _dir: TempDir,
    store: Store,
    account: i64,
    food: i64,
    rent: i64,
    salary: i64,
}

fn setup() -> Ledger {
    let dir = TempDir::new().unwrap();
    let store = Store::open_or_init(dir.path().join("ledger.sqlite")).unwrap();
    let account = accounts::add(&store, "Main", m("500")).unwrap().done().unwrap();
    let food = categories::add(&store, "Food", CategoryKind::Expense).unwrap().done().unwrap();
    let rent = categories::add(&store, "Rent", CategoryKind::Expense).unwrap().done().unwrap();
    let salary = categories::add(&store, "Salary", CategoryKind::Income).unwrap().done().unwrap();
    Ledger {
        _dir: dir,
        store,
        account,
        food,
        rent,
        salary,
    }
}

impl Ledger {
    fn post(&self, date: &str, amount: &str, category_id: Option<i64>) {
        let new = NewTransaction {
            account_id: self.account,
            date: date.into(),
            description: "entry".into(),
            amount: m(amount),
            category_id,
        };
        assert!(transactions::add(&self.store, &new).unwrap().is_done());
    }
}

#[test]
fn spending_by_category_is_largest_first() {
    let l = setup();
    l.post("2024-03-01", "-10", Some(l.food));
    l.post("2024-03-02", "-15.5", Some(l.food));
    l.post("2024-03-03", "-800", Some(l.rent));
    l.post("2024-03-04", "-4", None);
    l.post("2024-03-05", "2000", Some(l.salary));
    l.post("2024-04-01", "-999", Some(l.food));

    let out = reports::spending_by_category(&l.store, "2024-03-01", "2024-03-31").unwrap();
    let got: Vec<(String, String)> = out
        .iter()
        .map(|s| (s.category_name.clone(), s.spent_amount.to_string()))
        .collect();
    assert_eq!(
        got,
        vec![
            ("Rent".to_string(), "800.00".to_string()),
            ("Food".to_string(), "25.50".to_string()),
            ("Uncategorized".to_string(), "4.00".to_string()),
        ]
    );
}

#[test]
fn refunds_in_an_expense_category_are_excluded() {
    let l = setup();
    l.post("2024-03-01", "-10", Some(l.food));
    l.post("2024-03-02", "30", Some(l.food));
    let out = reports::spending_by_category(&l.store, "2024-03-01", "2024-03-31").unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].spent_amount.to_string(), "10.00");
}

#[test]
fn range_bounds_are_inclusive() {
    let l = setup();
    l.post("2024-03-01", "-1", Some(l.food));
    l.post("2024-03-31", "-2", Some(l.food));
    l.post("2024-02-29", "-100", Some(l.food));
    let out = reports::spending_by_category(&l.store, "2024-03-01", "2024-03-31").unwrap();
    assert_eq!(out[0].spent_amount.to_string(), "3.00");
    assert!(reports::spending_by_category(&l.store, "2030-01-01", "2030-12-31").unwrap().is_empty());
}

#[test]
fn null_category_and_seeded_uncategorized_share_a_line() {
    let l = setup();
    let seeded = categories::list(&l.store, Some(CategoryKind::Expense))
        .unwrap()
        .into_iter()
        .find(|c| c.is_protected())
        .unwrap();
    l.post("2024-03-01", "-1", None);
    l.post("2024-03-02", "-2", Some(seeded.id));
    let out = reports::spending_by_category(&l.store, "2024-03-01", "2024-03-31").unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].category_name, "Uncategorized");
    assert_eq!(out[0].spent_amount.to_string(), "3.00");
}

#[test]
fn budget_overview_lists_expense_categories() {
    let l = setup();
    budgets::set(&l.store, l.food, "2024-03", m("100")).unwrap();
    l.post("2024-03-10", "-120.25", Some(l.food));
    l.post("2024-03-11", "-5", Some(l.rent));

    let lines = reports::budget_overview(&l.store, "2024-03").unwrap();
    let names: Vec<&str> = lines.iter().map(|b| b.category_name.as_str()).collect();
    assert_eq!(names, ["Food", "Rent"]);

    assert_eq!(lines[0].budgeted_amount.to_string(), "100.00");
    assert_eq!(lines[0].spent_amount.to_string(), "120.25");
    assert_eq!(lines[0].remaining_amount.to_string(), "-20.25");
    assert_eq!(lines[1].budgeted_amount, Money::ZERO);
    assert_eq!(lines[1].remaining_amount.to_string(), "-5.00");
}

#[test]
fn dashboard_snapshot() {
    let l = setup();
    for day in 1..=5 {
        l.post(&format!("2024-03-0{day}"), "-1", Some(l.food));
    }
    l.post("2024-03-20", "50", Some(l.salary));

    let d = reports::dashboard(&l.store, "2024-03", 3).unwrap();
    assert_eq!(d.account_count, 1);
    assert_eq!(d.total_balance.to_string(), "545.00");
    assert_eq!(d.recent_transactions.len(), 3);
    assert_eq!(d.recent_transactions[0].date, "2024-03-20");
    assert_eq!(d.monthly_flow.to_string(), "45.00");
    assert_eq!(d.current_month, "2024-03");
}
