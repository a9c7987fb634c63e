//! Owner of the authoritative [`Trip`] for an interactive session.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::core::services::{
    BudgetService, ExpenseDraft, ExpenseService, ParticipantService, ServiceResult,
};
use crate::domain::{Expense, Trip};

/// Describes a mutation that has been applied to the session's trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TripEvent {
    TripRenamed { name: String },
    ParticipantAdded { participant_id: Uuid },
    ParticipantRenamed { participant_id: Uuid },
    ParticipantRemoved {
        participant_id: Uuid,
        removed_expenses: Vec<Uuid>,
    },
    ExpenseAdded { expense_id: Uuid },
    ExpenseRemoved { expense_id: Uuid },
    BudgetSet { category: String, amount: f64 },
    BudgetRenamed { from: String, to: String },
    BudgetRemoved { category: String },
}

/// Handle returned by [`TripSession::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&TripEvent, &Trip)>;

/// Applies validated mutations to a single trip and notifies subscribers
/// after each one that succeeds.
///
/// Every operation either applies completely or leaves the trip untouched.
/// Derived views (balances, settlements, budget status) are never cached
/// here; subscribers recompute them from the trip passed with each event.
pub struct TripSession {
    trip: Trip,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl TripSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_trip(Trip::new(name))
    }

    pub fn from_trip(trip: Trip) -> Self {
        Self {
            trip,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Starts a session for a trip with the given participants, in order.
    pub fn with_participants<I, S>(name: impl Into<String>, participants: I) -> ServiceResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trip = Trip::new(name);
        for participant in participants {
            ParticipantService::add(&mut trip, participant.as_ref())?;
        }
        Ok(Self::from_trip(trip))
    }

    /// Read-only snapshot handed to the ledger engine and renderers.
    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    pub fn into_trip(self) -> Trip {
        self.trip
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&TripEvent, &Trip) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a subscriber; returns `false` when it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn rename_trip(&mut self, name: &str) -> ServiceResult<()> {
        let name = crate::core::services::required_text(name, "Trip name");
        let result = name.map(|name| {
            self.trip.name = name;
            self.trip.touch();
        });
        self.complete("rename_trip", result, |_, trip| TripEvent::TripRenamed {
            name: trip.name.clone(),
        })
    }

    pub fn add_participant(&mut self, name: &str) -> ServiceResult<Uuid> {
        let result = ParticipantService::add(&mut self.trip, name);
        self.complete("add_participant", result, |id, _| {
            TripEvent::ParticipantAdded {
                participant_id: *id,
            }
        })
    }

    pub fn rename_participant(&mut self, id: Uuid, name: &str) -> ServiceResult<()> {
        let result = ParticipantService::rename(&mut self.trip, id, name);
        self.complete("rename_participant", result, |_, _| {
            TripEvent::ParticipantRenamed { participant_id: id }
        })
    }

    /// Removes a participant and every expense they paid for or share,
    /// returning the removed expenses.
    pub fn remove_participant(&mut self, id: Uuid) -> ServiceResult<Vec<Expense>> {
        let result =
            ParticipantService::remove(&mut self.trip, id).map(|(_, expenses)| expenses);
        self.complete("remove_participant", result, |expenses, _| {
            TripEvent::ParticipantRemoved {
                participant_id: id,
                removed_expenses: expenses.iter().map(|expense| expense.id).collect(),
            }
        })
    }

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> ServiceResult<Uuid> {
        let result = ExpenseService::add(&mut self.trip, draft);
        self.complete("add_expense", result, |id, _| TripEvent::ExpenseAdded {
            expense_id: *id,
        })
    }

    pub fn remove_expense(&mut self, id: Uuid) -> ServiceResult<Expense> {
        let result = ExpenseService::remove(&mut self.trip, id);
        self.complete("remove_expense", result, |_, _| TripEvent::ExpenseRemoved {
            expense_id: id,
        })
    }

    /// Creates or replaces the budget for a category.
    pub fn set_budget(&mut self, category: &str, amount: f64) -> ServiceResult<()> {
        let result = BudgetService::set(&mut self.trip, category, amount);
        self.complete("set_budget", result, |(label, _), _| TripEvent::BudgetSet {
            category: label.clone(),
            amount,
        })
        .map(|_| ())
    }

    /// Overwrites an existing budget, returning the previous amount.
    pub fn update_budget(&mut self, category: &str, amount: f64) -> ServiceResult<f64> {
        let result = BudgetService::update(&mut self.trip, category, amount);
        self.complete("update_budget", result, |_, _| TripEvent::BudgetSet {
            category: category.trim().to_string(),
            amount,
        })
    }

    /// Moves a budget to a new label, returning its amount. Renaming a budget
    /// to its own label changes nothing and notifies no one.
    pub fn rename_budget(&mut self, from: &str, to: &str) -> ServiceResult<f64> {
        let (from, to) = (from.trim(), to.trim());
        let result = BudgetService::rename(&mut self.trip, from, to);
        self.complete_if_changed("rename_budget", result, |_, _| {
            (from != to).then(|| TripEvent::BudgetRenamed {
                from: from.to_string(),
                to: to.to_string(),
            })
        })
    }

    /// Deletes a category budget, returning its amount.
    pub fn remove_budget(&mut self, category: &str) -> ServiceResult<f64> {
        let result = BudgetService::remove(&mut self.trip, category);
        self.complete("remove_budget", result, |_, _| TripEvent::BudgetRemoved {
            category: category.trim().to_string(),
        })
    }

    fn complete<T>(
        &mut self,
        operation: &'static str,
        result: ServiceResult<T>,
        event: impl FnOnce(&T, &Trip) -> TripEvent,
    ) -> ServiceResult<T> {
        self.complete_if_changed(operation, result, |value, trip| Some(event(value, trip)))
    }

    /// Logs the outcome and notifies observers when `event` reports a change.
    fn complete_if_changed<T>(
        &mut self,
        operation: &'static str,
        result: ServiceResult<T>,
        event: impl FnOnce(&T, &Trip) -> Option<TripEvent>,
    ) -> ServiceResult<T> {
        let change = match &result {
            Ok(value) => event(value, &self.trip),
            Err(err) => {
                tracing::warn!(operation, trip = %self.trip.id, error = %err, "trip change rejected");
                return result;
            }
        };
        match change {
            Some(event) => {
                tracing::info!(operation, trip = %self.trip.id, ?event, "trip updated");
                for (_, observer) in self.observers.iter_mut() {
                    observer(&event, &self.trip);
                }
            }
            None => tracing::debug!(operation, trip = %self.trip.id, "nothing changed"),
        }
        result
    }
}

impl fmt::Debug for TripSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripSession")
            .field("trip", &self.trip)
            .field("observers", &self.observers.len())
            .finish()
    }
}
