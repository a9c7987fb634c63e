//! Entity shapes and identity semantics for trips, participants, and expenses.

pub mod common;
pub mod expense;
pub mod participant;
pub mod trip;

pub use common::{Displayable, Identifiable, NamedEntity};
pub use expense::Expense;
pub use participant::Participant;
pub use trip::Trip;
