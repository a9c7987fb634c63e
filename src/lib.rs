#![doc(test(attr(deny(warnings))))]

//! Trip Ledger tracks shared trip expenses, derives per-participant balances
//! and budget status, and proposes the payments that settle a group's debts.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Trip Ledger tracing initialized.");
    });
}
