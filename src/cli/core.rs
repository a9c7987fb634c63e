//! Shell context, dispatch, and error reporting for the CLI.

use std::{cell::RefCell, rc::Rc};

use strsim::levenshtein;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigManager},
    core::{services::ServiceError, TripEvent, TripSession},
    currency::{format_currency_value, CurrencyCode},
    domain::Trip,
    errors::{CliError, TripError},
};

use super::commands::REGISTRY;
use super::output;

const DEFAULT_TRIP_NAME: &str = "Untitled trip";
const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Failure of a single command; reported to the user without ending the shell.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Core(#[from] TripError),
    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

/// State shared by every command handler.
pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    pub last_command: Option<String>,
    pub(crate) session: TripSession,
    pub(crate) config: Config,
    config_manager: Option<ConfigManager>,
    changes: Rc<RefCell<Vec<TripEvent>>>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let (config_manager, config) = match ConfigManager::new() {
            Ok(manager) => {
                let config = manager.load()?;
                (Some(manager), config)
            }
            Err(err) => {
                tracing::warn!(error = %err, "configuration directory unavailable; using defaults");
                (None, Config::default())
            }
        };
        Ok(Self::with_config(mode, config, config_manager))
    }

    pub fn with_config(mode: CliMode, config: Config, config_manager: Option<ConfigManager>) -> Self {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let mut session = TripSession::new(DEFAULT_TRIP_NAME);
        record_changes(&mut session, &changes);
        Self {
            mode,
            running: true,
            last_command: None,
            session,
            config,
            config_manager,
            changes,
        }
    }

    /// Replaces the active session and subscribes to its change events.
    pub(crate) fn install_session(&mut self, mut session: TripSession) {
        record_changes(&mut session, &self.changes);
        self.changes.borrow_mut().clear();
        self.session = session;
    }

    pub fn trip(&self) -> &Trip {
        self.session.trip()
    }

    pub fn prompt(&self) -> String {
        format!("trip[{}]> ", self.trip().name)
    }

    pub(crate) fn dispatch(&mut self, command: &str, raw: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        let Some(definition) = REGISTRY.get(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        let outcome = (definition.handler)(self, args);
        self.flush_changes();
        match outcome {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    /// Reports every change the session announced while the last command ran.
    fn flush_changes(&mut self) {
        let events: Vec<TripEvent> = self.changes.borrow_mut().drain(..).collect();
        if self.config.quiet {
            return;
        }
        for event in events {
            output::success(self.describe_event(&event));
        }
    }

    fn describe_event(&self, event: &TripEvent) -> String {
        let trip = self.trip();
        match event {
            TripEvent::TripRenamed { name } => format!("Trip renamed to `{}`.", name),
            TripEvent::ParticipantAdded { participant_id } => {
                format!("Added participant `{}`.", self.participant_label(*participant_id))
            }
            TripEvent::ParticipantRenamed { participant_id } => {
                format!("Participant renamed to `{}`.", self.participant_label(*participant_id))
            }
            TripEvent::ParticipantRemoved {
                removed_expenses, ..
            } => format!(
                "Removed participant and {} linked expense(s).",
                removed_expenses.len()
            ),
            TripEvent::ExpenseAdded { expense_id } => match trip.expense(*expense_id) {
                Some(expense) => format!(
                    "Recorded `{}` for {}.",
                    expense.title,
                    self.money(expense.amount)
                ),
                None => "Recorded expense.".to_string(),
            },
            TripEvent::ExpenseRemoved { .. } => "Removed expense.".to_string(),
            TripEvent::BudgetSet { category, amount } => {
                format!("Budget for `{}` set to {}.", category, self.money(*amount))
            }
            TripEvent::BudgetRenamed { from, to } => {
                format!("Budget `{}` renamed to `{}`.", from, to)
            }
            TripEvent::BudgetRemoved { category } => format!("Removed budget `{}`.", category),
        }
    }

    pub(crate) fn money(&self, amount: f64) -> String {
        format_currency_value(
            amount,
            &CurrencyCode::new(self.config.currency.as_str()),
            self.config.precision,
        )
    }

    pub(crate) fn participant_label(&self, id: Uuid) -> String {
        self.trip()
            .participant_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    /// Resolves a participant typed by name. Names are matched ignoring case
    /// and must identify exactly one participant.
    pub(crate) fn resolve_participant(&self, name: &str) -> Result<Uuid, CommandError> {
        match self.trip().participants_named(name).as_slice() {
            [participant] => Ok(participant.id),
            [] => Err(CommandError::InvalidArguments(format!(
                "No participant named `{}`.",
                name
            ))),
            _ => Err(CommandError::InvalidArguments(format!(
                "`{}` matches several participants; rename one of them first.",
                name
            ))),
        }
    }

    /// Saves `config`; the caller adopts it only once this succeeds.
    pub(crate) fn persist_config(&self, config: &Config) -> CommandResult {
        match &self.config_manager {
            Some(manager) => manager.save(config).map_err(CommandError::from),
            None => {
                output::warning("Configuration directory unavailable; change kept for this session only.");
                Ok(())
            }
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = REGISTRY
            .names()
            .map(|name| (levenshtein(name, &input.to_lowercase()), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                output::hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)?;
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }
}

fn record_changes(session: &mut TripSession, sink: &Rc<RefCell<Vec<TripEvent>>>) {
    let sink = Rc::clone(sink);
    session.subscribe(move |event, _| sink.borrow_mut().push(event.clone()));
}

/// Splits a subcommand off `args`, failing with the command's usage when absent.
pub(crate) fn split_subcommand<'a>(
    args: &'a [&'a str],
    usage: &str,
) -> Result<(String, &'a [&'a str]), CommandError> {
    match args.split_first() {
        Some((sub, rest)) => Ok((sub.to_lowercase(), rest)),
        None => Err(CommandError::InvalidArguments(format!("Usage: {}", usage))),
    }
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("Usage: {}", usage))
}
