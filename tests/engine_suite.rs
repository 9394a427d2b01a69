//! Settlement properties checked end to end through the public store + engine
//! surface.

use chrono::NaiveDate;
use split_core::engine::{BalanceEngine, BalanceMode};
use split_core::expense::{ExpenseDraft, ExpenseStore, Participant};
use split_core::money::Money;
use split_core::storage::MemoryStorage;

fn draft(title: &str, total_cents: i64, shares: &[(&str, i64)]) -> ExpenseDraft {
    ExpenseDraft::new(
        title,
        Money::from_cents(total_cents),
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
        shares
            .iter()
            .map(|(name, cents)| Participant {
                name: (*name).into(),
                contribution: Money::from_cents(*cents),
            })
            .collect(),
    )
}

fn cents(balances: &[split_core::engine::BalanceEntry], name: &str) -> i64 {
    balances
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.amount.cents())
        .expect("participant present")
}

#[test]
fn sixty_forty_dinner_settles_plus_minus_ten() {
    let mut store = ExpenseStore::new(Box::new(MemoryStorage::new()));
    store
        .add(draft("dinner", 10000, &[("X", 6000), ("Y", 4000)]))
        .unwrap();
    let balances = BalanceEngine::balances(store.list(), BalanceMode::PerExpense);
    assert_eq!(cents(&balances, "X"), 1000);
    assert_eq!(cents(&balances, "Y"), -1000);
}

#[test]
fn settlement_accumulates_per_expense_not_per_pool() {
    let mut store = ExpenseStore::new(Box::new(MemoryStorage::new()));
    store
        .add(draft("first", 10000, &[("X", 5000), ("Y", 5000)]))
        .unwrap();
    store
        .add(draft("second", 6000, &[("X", 2000), ("Y", 4000)]))
        .unwrap();

    let balances = BalanceEngine::balances(store.list(), BalanceMode::PerExpense);
    assert_eq!(cents(&balances, "X"), -1000);
    assert_eq!(cents(&balances, "Y"), 1000);
}

#[test]
fn money_is_conserved_across_a_long_mixed_history() {
    let mut store = ExpenseStore::new(Box::new(MemoryStorage::new()));
    let histories: &[(&str, i64, &[(&str, i64)])] = &[
        ("a", 10000, &[("X", 10000), ("Y", 0), ("Z", 0)]),
        ("b", 7001, &[("X", 0), ("Y", 7001)]),
        ("c", 333, &[("X", 111), ("Y", 111), ("Z", 111)]),
        ("d", 99999, &[("W", 99999), ("X", 0), ("Y", 0), ("Z", 0)]),
        ("e", 1, &[("Z", 1)]),
    ];
    for (title, total, shares) in histories {
        store.add(draft(title, *total, shares)).unwrap();
    }

    let balances = BalanceEngine::balances(store.list(), BalanceMode::PerExpense);
    let residue: i64 = balances.iter().map(|entry| entry.amount.cents()).sum();
    // Each expense can leave at most participant-count/2 cents of rounding
    // residue; with these rosters that bounds the total well under 10 cents.
    assert!(residue.abs() <= 10, "residue was {residue} cents");
}

#[test]
fn mutations_are_reflected_on_the_next_recompute() {
    let mut store = ExpenseStore::new(Box::new(MemoryStorage::new()));
    let id = store
        .add(draft("dinner", 10000, &[("X", 6000), ("Y", 4000)]))
        .unwrap()
        .id;

    store
        .update(id, draft("dinner", 10000, &[("X", 5000), ("Y", 5000)]))
        .unwrap();
    let balances = BalanceEngine::balances(store.list(), BalanceMode::PerExpense);
    assert_eq!(cents(&balances, "X"), 0);
    assert_eq!(cents(&balances, "Y"), 0);

    store.delete(id).unwrap();
    assert!(BalanceEngine::balances(store.list(), BalanceMode::PerExpense).is_empty());
}

#[test]
fn legacy_pooled_mode_matches_the_historic_computation() {
    let mut store = ExpenseStore::new(Box::new(MemoryStorage::new()));
    store.add(draft("groceries", 9000, &[("X", 9000)])).unwrap();
    store
        .add(draft("taxi", 3000, &[("Y", 1500), ("Z", 1500)]))
        .unwrap();

    // Pool of 120.00 over three people: share 40.00.
    let balances = BalanceEngine::balances(store.list(), BalanceMode::Pooled);
    assert_eq!(cents(&balances, "X"), 5000);
    assert_eq!(cents(&balances, "Y"), -2500);
    assert_eq!(cents(&balances, "Z"), -2500);
}

#[test]
fn summary_and_breakdown_track_the_store_ordering() {
    let mut store = ExpenseStore::new(Box::new(MemoryStorage::new()));
    store
        .add(draft("first", 10000, &[("X", 6000), ("Y", 4000)]))
        .unwrap();
    store
        .add(draft("second", 6000, &[("Y", 6000)]))
        .unwrap();

    let summary = BalanceEngine::summary(store.list());
    assert_eq!(summary.total.cents(), 16000);
    assert_eq!(
        summary.highest_spender,
        Some(("Y".to_string(), Money::from_cents(10000)))
    );
    assert_eq!(summary.average_per_person.cents(), 8000);

    let report = BalanceEngine::breakdown(store.list());
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].title, "first");
    assert_eq!(report[0].equal_share.cents(), 5000);
    assert_eq!(report[1].title, "second");
    assert_eq!(report[1].equal_share.cents(), 6000);
}
