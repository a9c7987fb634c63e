//! Ledger engine: pure derivations over a [`Trip`](crate::domain::Trip)
//! snapshot. Nothing here mutates state or caches results; callers recompute
//! after every change.

pub mod balances;
pub mod budget;
pub mod settlement;

pub use balances::{compute_balances, Balances, ParticipantBalance};
pub use budget::{budget_status, spend_per_category, total_spent, CategoryBudgetStatus};
pub use settlement::{
    compute_settlements, compute_settlements_with_tolerance, settle_from_balances, Settlement,
    SETTLEMENT_TOLERANCE,
};
