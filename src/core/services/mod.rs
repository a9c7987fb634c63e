pub mod budget_service;
pub mod expense_service;
pub mod participant_service;
pub mod summary_service;

pub use budget_service::BudgetService;
pub use expense_service::{ExpenseDraft, ExpenseService};
pub use participant_service::ParticipantService;
pub use summary_service::{ParticipantSummary, SettlementSummary, SummaryService, TripSummary};

use crate::errors::TripError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] TripError),
    #[error("{0}")]
    Invalid(String),
}

/// Parses a user-entered amount. Surrounding whitespace is ignored; text that
/// is not a finite number is rejected.
pub fn parse_amount(raw: &str) -> ServiceResult<f64> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ServiceError::Invalid(format!("`{}` is not a valid amount", raw)))?;
    if !value.is_finite() {
        return Err(ServiceError::Invalid(format!(
            "`{}` is not a valid amount",
            raw
        )));
    }
    Ok(value)
}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn required_text(value: &str, field: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ServiceError::Invalid(format!("{} must not be empty", field)))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_padded_decimals() {
        assert_eq!(parse_amount(" 12.50 ").unwrap(), 12.5);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
    }

    #[test]
    fn parse_amount_rejects_garbage_and_non_finite_values() {
        for raw in ["", "abc", "12,50", "inf", "NaN"] {
            let err = parse_amount(raw).expect_err("amount must be rejected");
            assert!(
                matches!(err, ServiceError::Invalid(ref message) if message.contains("not a valid amount")),
                "unexpected error for `{raw}`: {err:?}"
            );
        }
    }

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("  Food ", "Category").unwrap(), "Food");
        assert!(required_text("   ", "Category").is_err());
    }
}
