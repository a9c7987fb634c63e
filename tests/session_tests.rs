mod common;

use std::{cell::RefCell, rc::Rc};

use trip_ledger::{
    core::{
        services::{ExpenseDraft, ServiceError, SummaryService},
        TripEvent, TripSession,
    },
    errors::TripError,
    ledger::compute_balances,
};
use uuid::Uuid;

fn people(session: &TripSession) -> Vec<Uuid> {
    session.trip().participants.iter().map(|p| p.id).collect()
}

fn recorder(session: &mut TripSession) -> Rc<RefCell<Vec<TripEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session.subscribe(move |event, _| sink.borrow_mut().push(event.clone()));
    events
}

#[test]
fn removing_a_participant_cascades_to_their_expenses() {
    let mut session = common::abc_session();
    let [a, b, c] = people(&session)[..] else {
        panic!("expected three participants");
    };
    session
        .add_expense(ExpenseDraft::new("Taxi", 30.0, a, vec![a, b], "Transport"))
        .unwrap();
    session
        .add_expense(ExpenseDraft::new("Museum", 20.0, c, vec![a, c], "Culture"))
        .unwrap();
    session
        .add_expense(ExpenseDraft::new("Coffee", 6.0, a, vec![a, c], "Food"))
        .unwrap();

    let removed = session.remove_participant(b).unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].title, "Taxi");

    let trip = session.trip();
    assert_eq!(trip.expenses.len(), 2);
    assert!(trip.expenses.iter().all(|expense| !expense.involves(b)));
    assert!(compute_balances(trip).total().abs() < 1e-9);
}

#[test]
fn observers_see_successful_changes_only() {
    let mut session = common::abc_session();
    let events = recorder(&mut session);
    let [a, b, _] = people(&session)[..] else {
        panic!("expected three participants");
    };

    let rejected = session.add_expense(ExpenseDraft::new("Gift", -5.0, a, vec![b], "Misc"));
    assert!(matches!(rejected, Err(ServiceError::Invalid(_))));
    assert!(events.borrow().is_empty());

    let id = session
        .add_expense(ExpenseDraft::new("Gift", 5.0, a, vec![b], "Misc"))
        .unwrap();
    session.set_budget("Misc", 20.0).unwrap();
    session.remove_expense(id).unwrap();

    assert_eq!(
        *events.borrow(),
        vec![
            TripEvent::ExpenseAdded { expense_id: id },
            TripEvent::BudgetSet {
                category: "Misc".into(),
                amount: 20.0
            },
            TripEvent::ExpenseRemoved { expense_id: id },
        ]
    );
}

#[test]
fn unsubscribed_observers_stop_receiving_events() {
    let mut session = common::abc_session();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = session.subscribe(move |_, _| *sink.borrow_mut() += 1);

    session.add_participant("Dora").unwrap();
    assert!(session.unsubscribe(id));
    assert!(!session.unsubscribe(id));
    session.add_participant("Edu").unwrap();
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn invalid_input_leaves_the_trip_untouched() {
    let mut session = common::abc_session();
    let [a, b, _] = people(&session)[..] else {
        panic!("expected three participants");
    };
    let before = serde_json::to_value(session.trip()).unwrap();

    assert!(session.add_participant("   ").is_err());
    assert!(session
        .add_expense(ExpenseDraft::new("", 10.0, a, vec![b], "Food"))
        .is_err());
    assert!(session
        .add_expense(ExpenseDraft::new("Lunch", 10.0, a, vec![], "Food"))
        .is_err());
    assert!(session
        .add_expense(ExpenseDraft::new("Lunch", 10.0, a, vec![b], " "))
        .is_err());
    assert!(session
        .add_expense(ExpenseDraft::new("Lunch", f64::NAN, a, vec![b], "Food"))
        .is_err());
    assert!(matches!(
        session.add_expense(ExpenseDraft::new("Lunch", 10.0, Uuid::new_v4(), vec![b], "Food")),
        Err(ServiceError::Core(TripError::ParticipantNotFound(_)))
    ));
    assert!(matches!(
        session.update_budget("Food", 10.0),
        Err(ServiceError::Core(TripError::BudgetNotFound(_)))
    ));

    assert_eq!(serde_json::to_value(session.trip()).unwrap(), before);
}

#[test]
fn summary_reports_structured_figures() {
    let mut session = common::abc_session();
    let [a, b, c] = people(&session)[..] else {
        panic!("expected three participants");
    };
    session
        .add_expense(ExpenseDraft::new("Dinner", 90.0, a, vec![a, b, c], "Food"))
        .unwrap();
    session.set_budget("food", 50.0).unwrap();

    let summary = SummaryService::summarize(session.trip());
    assert_eq!(summary.expense_count, 1);
    assert!((summary.total_spent - 90.0).abs() < 1e-9);
    assert_eq!(summary.over_budget_categories, vec!["food".to_string()]);
    assert_eq!(summary.settlements.len(), 2);

    let ana = &summary.participants[0];
    assert_eq!(ana.name, "A");
    assert!((ana.paid - 90.0).abs() < 1e-9);
    assert!((ana.share - 30.0).abs() < 1e-9);
    assert!((ana.balance - 60.0).abs() < 1e-9);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["trip_name"], "Weekend");
}
