//! Business logic helpers for managing trip participants.

use uuid::Uuid;

use crate::core::services::{required_text, ServiceResult};
use crate::domain::{Expense, Participant, Trip};
use crate::errors::TripError;

/// Validated create/rename/remove helpers for participants.
pub struct ParticipantService;

impl ParticipantService {
    /// Appends a participant and returns its generated identifier. Names do
    /// not need to be unique.
    pub fn add(trip: &mut Trip, name: &str) -> ServiceResult<Uuid> {
        let name = required_text(name, "Participant name")?;
        Ok(trip.add_participant(Participant::new(name)))
    }

    pub fn rename(trip: &mut Trip, id: Uuid, name: &str) -> ServiceResult<()> {
        let name = required_text(name, "Participant name")?;
        let participant = trip
            .participant_mut(id)
            .ok_or(TripError::ParticipantNotFound(id))?;
        participant.name = name;
        trip.touch();
        Ok(())
    }

    /// Removes the participant together with every expense they paid for or
    /// share, returning the removed participant and expenses.
    pub fn remove(trip: &mut Trip, id: Uuid) -> ServiceResult<(Participant, Vec<Expense>)> {
        let index = trip
            .participant_index(id)
            .ok_or(TripError::ParticipantNotFound(id))?;
        let participant = trip.participants.remove(index);

        let (removed, kept): (Vec<Expense>, Vec<Expense>) = std::mem::take(&mut trip.expenses)
            .into_iter()
            .partition(|expense| expense.involves(id));
        trip.expenses = kept;
        trip.touch();
        Ok((participant, removed))
    }

    pub fn list(trip: &Trip) -> Vec<&Participant> {
        trip.participants.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ServiceError;

    #[test]
    fn add_rejects_blank_names() {
        let mut trip = Trip::new("Names");
        let err = ParticipantService::add(&mut trip, "  ").expect_err("blank name rejected");
        assert!(matches!(err, ServiceError::Invalid(_)), "unexpected error: {err:?}");
        assert!(trip.participants.is_empty());
    }

    #[test]
    fn rename_fails_for_missing_participant() {
        let mut trip = Trip::new("Names");
        let err = ParticipantService::rename(&mut trip, Uuid::new_v4(), "Kai")
            .expect_err("rename must fail for unknown id");
        assert!(
            matches!(err, ServiceError::Core(TripError::ParticipantNotFound(_))),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn remove_cascades_to_paid_and_shared_expenses() {
        let mut trip = Trip::new("Cascade");
        let ana = ParticipantService::add(&mut trip, "Ana").unwrap();
        let rui = ParticipantService::add(&mut trip, "Rui").unwrap();
        let eva = ParticipantService::add(&mut trip, "Eva").unwrap();
        trip.add_expense(Expense::new("Paid by Ana", 10.0, ana, vec![rui], "Food"));
        trip.add_expense(Expense::new("Shared by Ana", 10.0, rui, vec![ana, rui], "Food"));
        let untouched = trip.add_expense(Expense::new("Rui and Eva", 10.0, eva, vec![rui, eva], "Food"));

        let (removed, expenses) = ParticipantService::remove(&mut trip, ana).unwrap();
        assert_eq!(removed.id, ana);
        assert_eq!(expenses.len(), 2);
        let names: Vec<&str> = ParticipantService::list(&trip)
            .iter()
            .map(|participant| participant.name.as_str())
            .collect();
        assert_eq!(names, ["Rui", "Eva"]);
        assert_eq!(trip.expenses.len(), 1);
        assert_eq!(trip.expenses[0].id, untouched);
    }
}
