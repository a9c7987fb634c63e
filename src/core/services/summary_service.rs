use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Trip;
use crate::ledger::{
    budget_status, compute_balances, settle_from_balances, spend_per_category, total_spent,
    CategoryBudgetStatus, SETTLEMENT_TOLERANCE,
};

/// Per-participant figures for reports and insight prompts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantSummary {
    pub participant_id: Uuid,
    pub name: String,
    /// Total of the expenses this participant paid for.
    pub paid: f64,
    /// Total of this participant's shares across expenses.
    pub share: f64,
    pub balance: f64,
}

/// A settlement with participant names resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettlementSummary {
    pub from_id: Uuid,
    pub from_name: String,
    pub to_id: Uuid,
    pub to_name: String,
    pub amount: f64,
}

/// Structured overview of a trip. Carries data only; rendering to text is left
/// to the consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripSummary {
    pub trip_id: Uuid,
    pub trip_name: String,
    pub expense_count: usize,
    pub total_spent: f64,
    pub participants: Vec<ParticipantSummary>,
    pub spend_per_category: BTreeMap<String, f64>,
    pub budgets: BTreeMap<String, CategoryBudgetStatus>,
    pub over_budget_categories: Vec<String>,
    pub settlements: Vec<SettlementSummary>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn summarize(trip: &Trip) -> TripSummary {
        Self::summarize_with_tolerance(trip, SETTLEMENT_TOLERANCE)
    }

    pub fn summarize_with_tolerance(trip: &Trip, tolerance: f64) -> TripSummary {
        let balances = compute_balances(trip);
        let participants = trip
            .participants
            .iter()
            .map(|participant| {
                let paid: f64 = trip
                    .expenses
                    .iter()
                    .filter(|expense| expense.paid_by == participant.id)
                    .map(|expense| expense.amount)
                    .sum();
                let share: f64 = trip
                    .expenses
                    .iter()
                    .filter(|expense| expense.is_shared_by(participant.id))
                    .map(|expense| expense.share())
                    .sum();
                ParticipantSummary {
                    participant_id: participant.id,
                    name: participant.name.clone(),
                    paid,
                    share,
                    balance: balances.get(participant.id).unwrap_or_default(),
                }
            })
            .collect();

        let budgets = budget_status(trip);
        let over_budget_categories = budgets
            .iter()
            .filter(|(_, status)| status.is_over)
            .map(|(category, _)| category.clone())
            .collect();

        let settlements = settle_from_balances(&balances, tolerance)
            .into_iter()
            .map(|settlement| SettlementSummary {
                from_id: settlement.from,
                from_name: Self::name_of(trip, settlement.from),
                to_id: settlement.to,
                to_name: Self::name_of(trip, settlement.to),
                amount: settlement.amount,
            })
            .collect();

        TripSummary {
            trip_id: trip.id,
            trip_name: trip.name.clone(),
            expense_count: trip.expense_count(),
            total_spent: total_spent(trip),
            participants,
            spend_per_category: spend_per_category(trip),
            budgets,
            over_budget_categories,
            settlements,
        }
    }

    fn name_of(trip: &Trip, id: Uuid) -> String {
        trip.participant_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }
}
