use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the domain, session, and configuration layers.
#[derive(Error, Debug)]
pub enum TripError {
    #[error("Participant not found: {0}")]
    ParticipantNotFound(Uuid),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("No budget set for category `{0}`")]
    BudgetNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TripError),
    #[error("Input error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),
}

impl From<std::io::Error> for TripError {
    fn from(err: std::io::Error) -> Self {
        TripError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for TripError {
    fn from(err: serde_json::Error) -> Self {
        TripError::ConfigError(err.to_string())
    }
}
