use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Trip;

/// Spend against one configured category budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryBudgetStatus {
    pub spent: f64,
    pub budget: f64,
    pub is_over: bool,
}

impl CategoryBudgetStatus {
    pub fn new(spent: f64, budget: f64) -> Self {
        Self {
            spent,
            budget,
            is_over: spent > budget,
        }
    }

    /// Budget left before the ceiling; negative once overspent.
    pub fn remaining(&self) -> f64 {
        self.budget - self.spent
    }
}

/// Sums expense amounts per exact category label.
pub fn spend_per_category(trip: &Trip) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for expense in &trip.expenses {
        *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Compares spend with every configured budget. Expenses are matched to a
/// budget label ignoring case, so "Food" spend counts against a "food"
/// budget. Spending exactly the budget is not over.
pub fn budget_status(trip: &Trip) -> BTreeMap<String, CategoryBudgetStatus> {
    trip.budgets
        .iter()
        .map(|(category, budget)| {
            let spent: f64 = trip
                .expenses
                .iter()
                .filter(|expense| expense.matches_category(category))
                .map(|expense| expense.amount)
                .sum();
            (category.clone(), CategoryBudgetStatus::new(spent, *budget))
        })
        .collect()
}

/// Total of every expense amount in the trip.
pub fn total_spent(trip: &Trip) -> f64 {
    trip.expenses.iter().map(|expense| expense.amount).sum()
}
