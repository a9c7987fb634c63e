use crate::cli::core::{split_subcommand, usage_error, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::ParticipantService;

use super::CommandDefinition;

const USAGE: &str = "participant add <name>... | participant rename <name> <new-name> | participant remove <name> | participant list";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "participant",
        "Manage the people sharing the trip",
        USAGE,
        handle_participant,
    )]
}

fn handle_participant(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (sub, rest) = split_subcommand(args, USAGE)?;
    match (sub.as_str(), rest) {
        ("add", names) if !names.is_empty() => {
            for name in names {
                context.session.add_participant(name)?;
            }
            Ok(())
        }
        ("rename", [name, new_name]) => {
            let id = context.resolve_participant(name)?;
            context.session.rename_participant(id, new_name)?;
            Ok(())
        }
        ("remove", [name]) => {
            let id = context.resolve_participant(name)?;
            context.session.remove_participant(id)?;
            Ok(())
        }
        ("list", []) => {
            list_participants(context);
            Ok(())
        }
        _ => Err(usage_error(USAGE)),
    }
}

fn list_participants(context: &ShellContext) {
    let participants = ParticipantService::list(context.trip());
    if participants.is_empty() {
        output::info("No participants yet. Add some with `participant add <name>`.");
        return;
    }
    output::section("Participants");
    for (idx, participant) in participants.iter().enumerate() {
        println!("  {:>2}. {}", idx + 1, participant.name);
    }
}
