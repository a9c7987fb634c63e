mod common;

use trip_ledger::{
    core::services::ExpenseDraft,
    domain::{Expense, Participant, Trip},
    ledger::{
        budget_status, compute_balances, compute_settlements, settle_from_balances,
        spend_per_category, total_spent, SETTLEMENT_TOLERANCE,
    },
};
use uuid::Uuid;

const EPSILON: f64 = 1e-6;

fn ids(trip: &Trip) -> Vec<Uuid> {
    trip.participants.iter().map(|p| p.id).collect()
}

/// Five travellers with uneven payments and partial sharing.
fn busy_trip() -> Trip {
    let mut session = trip_ledger::core::TripSession::with_participants(
        "Alps",
        ["Ana", "Bea", "Caio", "Dani", "Eli"],
    )
    .unwrap();
    let people = ids(session.trip());
    let plan = [
        ("Chalet", 1000.0, 0, vec![0, 1, 2, 3, 4], "Lodging"),
        ("Groceries", 137.45, 1, vec![0, 1, 2], "Food"),
        ("Ski pass", 312.0, 2, vec![2, 3], "Activities"),
        ("Fuel", 89.99, 3, vec![0, 3, 4], "Transport"),
        ("Fondue", 71.3, 4, vec![1, 4], "food"),
        ("Tolls", 23.0, 0, vec![0, 1, 2, 3, 4], "Transport"),
    ];
    for (title, amount, payer, sharers, category) in plan {
        let shared_by = sharers.into_iter().map(|idx| people[idx]).collect();
        session
            .add_expense(ExpenseDraft::new(title, amount, people[payer], shared_by, category))
            .unwrap();
    }
    session.into_trip()
}

#[test]
fn three_way_split_matches_worked_example() {
    let mut session = common::abc_session();
    let people = ids(session.trip());
    session
        .add_expense(ExpenseDraft::new("Dinner", 90.0, people[0], people.clone(), "Food"))
        .unwrap();
    let trip = session.trip();

    let balances = compute_balances(trip);
    assert!((balances.get(people[0]).unwrap() - 60.0).abs() < EPSILON);
    assert!((balances.get(people[1]).unwrap() + 30.0).abs() < EPSILON);
    assert!((balances.get(people[2]).unwrap() + 30.0).abs() < EPSILON);

    let settlements = compute_settlements(trip);
    assert_eq!(settlements.len(), 2);
    for settlement in &settlements {
        assert_eq!(settlement.to, people[0]);
        assert!((settlement.amount - 30.0).abs() < EPSILON);
    }
    assert_ne!(settlements[0].from, settlements[1].from);
}

#[test]
fn balances_always_sum_to_zero() {
    let trip = busy_trip();
    let balances = compute_balances(&trip);
    assert_eq!(balances.len(), trip.participants.len());
    assert!(balances.total().abs() < EPSILON);
}

#[test]
fn applying_settlements_clears_every_balance() {
    let trip = busy_trip();
    let mut balances = compute_balances(&trip).to_map();
    let settlements = compute_settlements(&trip);

    for settlement in &settlements {
        assert!(settlement.amount > 0.0);
        assert_ne!(settlement.from, settlement.to);
        *balances.get_mut(&settlement.from).unwrap() += settlement.amount;
        *balances.get_mut(&settlement.to).unwrap() -= settlement.amount;
    }
    for amount in balances.values() {
        assert!(amount.abs() < EPSILON, "residual balance {}", amount);
    }
}

#[test]
fn settlement_count_is_bounded_by_party_sizes() {
    let trip = busy_trip();
    let balances = compute_balances(&trip);
    let debtors = balances
        .iter()
        .filter(|entry| entry.amount < -SETTLEMENT_TOLERANCE)
        .count();
    let creditors = balances
        .iter()
        .filter(|entry| entry.amount > SETTLEMENT_TOLERANCE)
        .count();
    let settlements = settle_from_balances(&balances, SETTLEMENT_TOLERANCE);
    assert!(settlements.len() <= debtors + creditors - 1);
}

#[test]
fn settlements_are_deterministic() {
    let trip = busy_trip();
    assert_eq!(compute_settlements(&trip), compute_settlements(&trip));
}

#[test]
fn budget_matching_ignores_case() {
    let mut trip = Trip::new("Snacks");
    let ana = trip.add_participant(Participant::new("Ana"));
    trip.add_expense(Expense::new("Lunch", 30.0, ana, vec![ana], "Food"));
    trip.add_expense(Expense::new("Dinner", 25.0, ana, vec![ana], "food"));
    trip.budgets.insert("Food".into(), 50.0);

    let status = budget_status(&trip);
    let food = status.get("Food").unwrap();
    assert!((food.spent - 55.0).abs() < EPSILON);
    assert!(food.is_over);

    let spend = spend_per_category(&trip);
    assert_eq!(spend.len(), 2);
    assert!((spend["Food"] - 30.0).abs() < EPSILON);
    assert!((spend["food"] - 25.0).abs() < EPSILON);
}

#[test]
fn spending_exactly_the_budget_is_not_over() {
    let mut trip = busy_trip();
    trip.budgets.insert("Activities".into(), 312.0);
    trip.budgets.insert("Museums".into(), 40.0);
    let status = budget_status(&trip);
    assert!(!status["Activities"].is_over);
    assert_eq!(status["Museums"].spent, 0.0);
    assert!(!status["Museums"].is_over);
}

#[test]
fn empty_trip_yields_empty_views() {
    let trip = Trip::new("Nothing yet");
    assert!(compute_balances(&trip).is_empty());
    assert!(compute_settlements(&trip).is_empty());
    assert!(spend_per_category(&trip).is_empty());
    assert!(budget_status(&trip).is_empty());
    assert_eq!(total_spent(&trip), 0.0);
}

#[test]
fn malformed_expenses_degrade_gracefully() {
    let mut trip = Trip::new("Imported");
    let ana = trip.add_participant(Participant::new("Ana"));
    let ghost = Uuid::new_v4();
    trip.expenses.push(Expense::new("Orphan", 40.0, ghost, vec![ana], "Misc"));
    trip.expenses.push(Expense::new("Nobody", 10.0, ana, Vec::new(), "Misc"));

    let balances = compute_balances(&trip);
    assert_eq!(balances.get(ghost), None);
    assert!((balances.get(ana).unwrap() - -30.0).abs() < EPSILON);
    assert!(compute_settlements(&trip).is_empty());
}
