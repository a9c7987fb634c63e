//! Mutation façade and the validating services it composes.

pub mod services;
pub mod session;
pub mod utils;

pub use session::{SubscriptionId, TripEvent, TripSession};
