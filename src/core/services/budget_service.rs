use crate::core::services::{required_text, ServiceError, ServiceResult};
use crate::domain::Trip;
use crate::errors::TripError;

/// Maintains the per-category budget ceilings of a trip. Labels are stored
/// trimmed but otherwise as entered; lookups here use the exact label.
pub struct BudgetService;

impl BudgetService {
    /// Creates or replaces the budget for `category`, returning the stored
    /// label and the previous amount, if any.
    pub fn set(trip: &mut Trip, category: &str, amount: f64) -> ServiceResult<(String, Option<f64>)> {
        let category = required_text(category, "Category")?;
        Self::validate_amount(amount)?;
        let previous = trip.budgets.insert(category.clone(), amount);
        trip.touch();
        Ok((category, previous))
    }

    /// Overwrites an existing budget; fails when none is set for `category`.
    pub fn update(trip: &mut Trip, category: &str, amount: f64) -> ServiceResult<f64> {
        Self::validate_amount(amount)?;
        let key = category.trim();
        let slot = trip
            .budgets
            .get_mut(key)
            .ok_or_else(|| TripError::BudgetNotFound(key.to_string()))?;
        let previous = std::mem::replace(slot, amount);
        trip.touch();
        Ok(previous)
    }

    /// Moves a budget to a new label, replacing any budget already stored
    /// under that label.
    pub fn rename(trip: &mut Trip, from: &str, to: &str) -> ServiceResult<f64> {
        let to = required_text(to, "Category")?;
        let from = from.trim();
        let amount = trip
            .budget(from)
            .ok_or_else(|| TripError::BudgetNotFound(from.to_string()))?;
        if from != to {
            trip.budgets.remove(from);
            trip.budgets.insert(to, amount);
            trip.touch();
        }
        Ok(amount)
    }

    /// Deletes the budget for `category`, returning its amount.
    pub fn remove(trip: &mut Trip, category: &str) -> ServiceResult<f64> {
        let key = category.trim();
        let amount = trip
            .budgets
            .remove(key)
            .ok_or_else(|| TripError::BudgetNotFound(key.to_string()))?;
        trip.touch();
        Ok(amount)
    }

    fn validate_amount(amount: f64) -> ServiceResult<()> {
        if amount.is_finite() && amount >= 0.0 {
            Ok(())
        } else {
            Err(ServiceError::Invalid(
                "Budget amount must be zero or greater".into(),
            ))
        }
    }
}
