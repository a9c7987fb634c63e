use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::{Expense, Participant};

/// Aggregate root for a shared trip: its participants, the expenses they
/// recorded, and per-category budget ceilings.
///
/// Participants are stored once here; expenses refer to them by identifier.
/// Budget labels keep the case they were entered with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub budgets: BTreeMap<String, f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            participants: Vec::new(),
            expenses: Vec::new(),
            budgets: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_participant(&mut self, participant: Participant) -> Uuid {
        let id = participant.id;
        self.participants.push(participant);
        self.touch();
        id
    }

    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        self.touch();
        id
    }

    pub fn participant(&self, id: Uuid) -> Option<&Participant> {
        self.participants.iter().find(|participant| participant.id == id)
    }

    pub fn participant_mut(&mut self, id: Uuid) -> Option<&mut Participant> {
        self.participants
            .iter_mut()
            .find(|participant| participant.id == id)
    }

    /// All participants whose name matches `name`, ignoring case and
    /// surrounding whitespace.
    pub fn participants_named(&self, name: &str) -> Vec<&Participant> {
        let needle = name.trim().to_lowercase();
        self.participants
            .iter()
            .filter(|participant| participant.name.trim().to_lowercase() == needle)
            .collect()
    }

    pub fn has_participant(&self, id: Uuid) -> bool {
        self.participant(id).is_some()
    }

    /// Position of the participant in insertion order.
    pub fn participant_index(&self, id: Uuid) -> Option<usize> {
        self.participants
            .iter()
            .position(|participant| participant.id == id)
    }

    pub fn participant_name(&self, id: Uuid) -> Option<&str> {
        self.participant(id).map(|participant| participant.name.as_str())
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn budget(&self, category: &str) -> Option<f64> {
        self.budgets.get(category).copied()
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Trip {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Trip {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Trip {
    fn display_label(&self) -> String {
        format!(
            "{} ({} participants, {} expenses)",
            self.name,
            self.participants.len(),
            self.expenses.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participants_keep_insertion_order() {
        let mut trip = Trip::new("Lisbon");
        let first = trip.add_participant(Participant::new("Ana"));
        let second = trip.add_participant(Participant::new("Bruno"));
        assert_eq!(trip.participant_index(first), Some(0));
        assert_eq!(trip.participant_index(second), Some(1));
        assert_eq!(trip.participant_name(second), Some("Bruno"));
    }

    #[test]
    fn participants_named_matches_case_insensitively() {
        let mut trip = Trip::new("Porto");
        trip.add_participant(Participant::new("Ana"));
        trip.add_participant(Participant::new("ana "));
        trip.add_participant(Participant::new("Rui"));
        assert_eq!(trip.participants_named("ANA").len(), 2);
        assert!(trip.participants_named("Marta").is_empty());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut trip = Trip::new("Madeira");
        let ana = trip.add_participant(Participant::new("Ana"));
        trip.add_expense(Expense::new("Boat", 80.0, ana, vec![ana], "Tours"));
        trip.budgets.insert("Tours".into(), 100.0);

        let json = serde_json::to_string(&trip).expect("serialize trip");
        let restored: Trip = serde_json::from_str(&json).expect("deserialize trip");
        assert_eq!(restored.expenses, trip.expenses);
        assert_eq!(restored.budget("Tours"), Some(100.0));
    }
}
