use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Trip;

/// Net position of one participant: positive when owed, negative when owing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ParticipantBalance {
    pub participant_id: Uuid,
    pub amount: f64,
}

/// Balances for every current participant, in trip insertion order, with
/// constant-time lookup by participant id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec<ParticipantBalance>", into = "Vec<ParticipantBalance>")]
pub struct Balances {
    entries: Vec<ParticipantBalance>,
    index: HashMap<Uuid, usize>,
}

impl Balances {
    pub fn get(&self, participant_id: Uuid) -> Option<f64> {
        self.index
            .get(&participant_id)
            .map(|&slot| self.entries[slot].amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticipantBalance> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances; zero up to rounding for a consistent trip.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.amount).sum()
    }

    pub fn to_map(&self) -> HashMap<Uuid, f64> {
        self.entries
            .iter()
            .map(|entry| (entry.participant_id, entry.amount))
            .collect()
    }

    fn adjust(&mut self, participant_id: Uuid, delta: f64) -> bool {
        match self.index.get(&participant_id) {
            Some(&slot) => {
                self.entries[slot].amount += delta;
                true
            }
            None => false,
        }
    }
}

impl FromIterator<ParticipantBalance> for Balances {
    fn from_iter<I: IntoIterator<Item = ParticipantBalance>>(iter: I) -> Self {
        let entries: Vec<ParticipantBalance> = iter.into_iter().collect();
        let mut index = HashMap::with_capacity(entries.len());
        for (slot, entry) in entries.iter().enumerate() {
            // A repeated id resolves to its first entry.
            index.entry(entry.participant_id).or_insert(slot);
        }
        Self { entries, index }
    }
}

impl From<Vec<ParticipantBalance>> for Balances {
    fn from(entries: Vec<ParticipantBalance>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<Balances> for Vec<ParticipantBalance> {
    fn from(balances: Balances) -> Self {
        balances.entries
    }
}

/// Computes every participant's net balance.
///
/// Each sharer is debited `amount / sharers` and the payer is credited the
/// full amount. Expenses without sharers debit nobody. Payers and sharers that
/// are no longer trip participants have no entry, so their portion is dropped
/// rather than failing; callers expecting balances to sum to zero must only
/// pass trips whose expenses reference current participants.
pub fn compute_balances(trip: &Trip) -> Balances {
    let mut balances: Balances = trip
        .participants
        .iter()
        .map(|participant| ParticipantBalance {
            participant_id: participant.id,
            amount: 0.0,
        })
        .collect();

    for expense in &trip.expenses {
        let share = expense.share();
        for sharer in &expense.shared_by {
            if !balances.adjust(*sharer, -share) {
                tracing::debug!(expense = %expense.id, participant = %sharer, "sharer not in trip; debit skipped");
            }
        }
        if !balances.adjust(expense.paid_by, expense.amount) {
            tracing::debug!(expense = %expense.id, participant = %expense.paid_by, "payer not in trip; credit skipped");
        }
    }

    balances
}
