use crate::cli::core::{split_subcommand, usage_error, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::TripSession;
use crate::domain::Displayable;
use crate::ledger::total_spent;

use super::CommandDefinition;

const USAGE: &str = "trip new <name> [participant...] | trip rename <name> | trip show";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "trip",
        "Start, rename, or inspect the active trip",
        USAGE,
        handle_trip,
    )]
}

fn handle_trip(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (sub, rest) = split_subcommand(args, USAGE)?;
    match (sub.as_str(), rest) {
        ("new", [name, participants @ ..]) => {
            let session = TripSession::with_participants(*name, participants.iter().copied())?;
            context.install_session(session);
            output::success(format!("Started trip `{}`.", context.trip().display_label()));
            Ok(())
        }
        ("rename", [name]) => {
            context.session.rename_trip(name)?;
            Ok(())
        }
        ("show", []) => {
            show_trip(context);
            Ok(())
        }
        _ => Err(usage_error(USAGE)),
    }
}

fn show_trip(context: &ShellContext) {
    let trip = context.trip();
    output::section(&trip.name);
    let width = 14;
    output::row("Participants", trip.participants.len(), width);
    output::row("Expenses", trip.expenses.len(), width);
    output::row("Total spent", context.money(total_spent(trip)), width);
    output::row("Budgets", trip.budgets.len(), width);
    output::row("Started", trip.created_at.format("%Y-%m-%d %H:%M UTC"), width);
}
