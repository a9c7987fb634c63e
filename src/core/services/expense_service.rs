//! Business logic helpers for recording and removing expenses.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::services::{required_text, ServiceError, ServiceResult};
use crate::domain::{Expense, Trip};
use crate::errors::TripError;

/// Unvalidated expense input as collected from a form or command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: f64,
    pub paid_by: Uuid,
    pub shared_by: Vec<Uuid>,
    pub category: String,
    pub date: Option<DateTime<Utc>>,
}

impl ExpenseDraft {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        paid_by: Uuid,
        shared_by: Vec<Uuid>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            paid_by,
            shared_by,
            category: category.into(),
            date: None,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

/// Validated add/remove helpers for trip expenses. Expenses are never edited
/// in place; an edit is a removal followed by a new expense.
pub struct ExpenseService;

impl ExpenseService {
    /// Validates the draft against the trip and appends the resulting expense.
    ///
    /// The title and category must be non-blank, the amount finite and
    /// positive, and the payer and every sharer current participants.
    /// Repeated sharers are collapsed.
    pub fn add(trip: &mut Trip, draft: ExpenseDraft) -> ServiceResult<Uuid> {
        let expense = Self::validate(trip, draft)?;
        Ok(trip.add_expense(expense))
    }

    /// Removes the expense identified by `id`, returning the removed instance.
    pub fn remove(trip: &mut Trip, id: Uuid) -> ServiceResult<Expense> {
        let index = trip
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(TripError::ExpenseNotFound(id))?;
        let expense = trip.expenses.remove(index);
        trip.touch();
        Ok(expense)
    }

    /// Returns a snapshot of the trip's expenses in insertion order.
    pub fn list(trip: &Trip) -> Vec<&Expense> {
        trip.expenses.iter().collect()
    }

    fn validate(trip: &Trip, draft: ExpenseDraft) -> ServiceResult<Expense> {
        let title = required_text(&draft.title, "Expense title")?;
        let category = required_text(&draft.category, "Category")?;
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "Expense amount must be greater than zero".into(),
            ));
        }
        if !trip.has_participant(draft.paid_by) {
            return Err(TripError::ParticipantNotFound(draft.paid_by).into());
        }

        let mut shared_by: Vec<Uuid> = Vec::with_capacity(draft.shared_by.len());
        for sharer in draft.shared_by {
            if !trip.has_participant(sharer) {
                return Err(TripError::ParticipantNotFound(sharer).into());
            }
            if !shared_by.contains(&sharer) {
                shared_by.push(sharer);
            }
        }
        if shared_by.is_empty() {
            return Err(ServiceError::Invalid(
                "Expense must be shared by at least one participant".into(),
            ));
        }

        let expense = Expense::new(title, draft.amount, draft.paid_by, shared_by, category);
        Ok(match draft.date {
            Some(date) => expense.with_date(date),
            None => expense,
        })
    }
}
