use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::commands::REGISTRY;
use crate::cli::core::{CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::errors::CliError;

const SCRIPT_ENV: &str = "TRIP_LEDGER_CLI_SCRIPT";
const COMMENT_PREFIX: char = '#';

/// Runs the shell, reading commands from a line editor or, when
/// `TRIP_LEDGER_CLI_SCRIPT` is set, from standard input.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    if mode == CliMode::Script {
        colored::control::set_override(false);
    }

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, "starting shell");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(REGISTRY.names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output::info("Type `help` to list commands.");

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if handle_line(context, trimmed) == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                output::hint("Type `exit` to leave the shell.");
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if handle_line(context, &line) == LoopControl::Exit || !context.running {
            break;
        }
    }
    Ok(())
}

/// Tokenizes and dispatches one input line, reporting any failure in place.
fn handle_line(context: &mut ShellContext, line: &str) -> LoopControl {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
        return LoopControl::Continue;
    }

    let tokens = match parse_command_line(trimmed) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return LoopControl::Continue;
        }
    };
    let Some(raw) = tokens.first() else {
        return LoopControl::Continue;
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
    context.last_command = Some(trimmed.to_string());

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            LoopControl::Exit
        }
        Ok(LoopControl::Continue) => LoopControl::Continue,
        Err(err) => {
            tracing::debug!(command = %command, error = %err, "command failed");
            context.report_error(err);
            LoopControl::Continue
        }
    }
}

struct CommandHelper {
    commands: Vec<&'static str>,
}

impl CommandHelper {
    fn new(names: impl Iterator<Item = &'static str>) -> Self {
        let mut commands: Vec<&'static str> = names.collect();
        commands.sort_unstable();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    /// Completes the command word only; arguments are free text.
    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix.len() - prefix.trim_start().len();
        let word = &prefix[start..];
        if word.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }

        let needle = word.to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    shell_words::split(input).map_err(|err| ParseError {
        message: format!("Could not parse input: {}", err),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ParseError> for CommandError {
    fn from(err: ParseError) -> Self {
        CommandError::InvalidArguments(err.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line(r#"expense add "Night train" 120 Ana Transport"#).unwrap();
        assert_eq!(tokens[2], "Night train");
        assert_eq!(tokens.len(), 6);
        assert!(parse_command_line("trip new \"Unclosed").is_err());
    }

    #[test]
    fn comments_and_failures_keep_the_loop_running() {
        colored::control::set_override(false);
        let mut ctx = ShellContext::with_config(CliMode::Script, Config::default(), None);
        assert_eq!(handle_line(&mut ctx, "# setup"), LoopControl::Continue);
        assert_eq!(handle_line(&mut ctx, "participant remove Nobody"), LoopControl::Continue);
        assert_eq!(handle_line(&mut ctx, "EXIT"), LoopControl::Exit);
        assert!(!ctx.running);
    }
}
