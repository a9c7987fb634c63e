use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Trip;
use crate::ledger::balances::{compute_balances, Balances};

/// Residual below which a balance or remaining debt counts as settled.
pub const SETTLEMENT_TOLERANCE: f64 = 1e-9;

/// A proposed payment from a debtor to a creditor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Settlement {
    pub from: Uuid,
    pub to: Uuid,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy)]
struct Position {
    participant_id: Uuid,
    remaining: f64,
}

/// Proposes the payments that settle every balance in the trip, using
/// [`SETTLEMENT_TOLERANCE`].
pub fn compute_settlements(trip: &Trip) -> Vec<Settlement> {
    compute_settlements_with_tolerance(trip, SETTLEMENT_TOLERANCE)
}

pub fn compute_settlements_with_tolerance(trip: &Trip, tolerance: f64) -> Vec<Settlement> {
    settle_from_balances(&compute_balances(trip), tolerance)
}

/// Greedy debt matching over precomputed balances.
///
/// Debtors and creditors are each ordered by descending magnitude; equal
/// magnitudes keep the balances' participant order. The largest remaining
/// debt is paid towards the largest remaining credit until one side is
/// exhausted. Balances within `tolerance` of zero take no part, and a
/// position whose remainder falls within `tolerance` is treated as settled.
/// At most `debtors + creditors - 1` settlements are produced.
pub fn settle_from_balances(balances: &Balances, tolerance: f64) -> Vec<Settlement> {
    let tolerance = if tolerance.is_finite() {
        tolerance.abs()
    } else {
        SETTLEMENT_TOLERANCE
    };

    let mut debtors: Vec<Position> = balances
        .iter()
        .filter(|entry| entry.amount < -tolerance)
        .map(|entry| Position {
            participant_id: entry.participant_id,
            remaining: -entry.amount,
        })
        .collect();
    let mut creditors: Vec<Position> = balances
        .iter()
        .filter(|entry| entry.amount > tolerance)
        .map(|entry| Position {
            participant_id: entry.participant_id,
            remaining: entry.amount,
        })
        .collect();

    // `sort_by` is stable, which keeps ties in participant order.
    debtors.sort_by(|a, b| b.remaining.total_cmp(&a.remaining));
    creditors.sort_by(|a, b| b.remaining.total_cmp(&a.remaining));

    let mut settlements = Vec::with_capacity(debtors.len() + creditors.len());
    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let payment = debtors[i].remaining.min(creditors[j].remaining);
        settlements.push(Settlement {
            from: debtors[i].participant_id,
            to: creditors[j].participant_id,
            amount: payment,
        });

        debtors[i].remaining -= payment;
        creditors[j].remaining -= payment;

        if debtors[i].remaining <= tolerance {
            i += 1;
        }
        if creditors[j].remaining <= tolerance {
            j += 1;
        }
    }

    if i < debtors.len() || j < creditors.len() {
        tracing::debug!(
            unsettled_debtors = debtors.len() - i,
            unsettled_creditors = creditors.len() - j,
            "balances do not net to zero; leaving residue unsettled"
        );
    }

    settlements
}
