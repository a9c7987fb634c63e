use crate::cli::core::{split_subcommand, usage_error, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::config::Config;
use crate::utils::build_info;

use super::{CommandDefinition, REGISTRY};

const HELP_USAGE: &str = "help [command]";
const CONFIG_USAGE: &str = "config show | config set <key> <value>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("help", "List commands or describe one", HELP_USAGE, handle_help),
        CommandDefinition::new(
            "config",
            "Show or change display and settlement preferences",
            CONFIG_USAGE,
            handle_config,
        ),
        CommandDefinition::new("version", "Show build information", "version", handle_version),
        CommandDefinition::new("exit", "Leave the shell", "exit", handle_exit),
        CommandDefinition::new("quit", "Leave the shell", "quit", handle_exit),
    ]
}

fn handle_help(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Commands");
            let width = REGISTRY.names().map(str::len).max().unwrap_or_default();
            for definition in REGISTRY.iter() {
                output::row(definition.name, definition.description, width);
            }
            output::hint("Use `help <command>` for usage details.");
            Ok(())
        }
        [name] => {
            let definition = REGISTRY.get(&name.to_lowercase()).ok_or_else(|| {
                CommandError::InvalidArguments(format!("Unknown command `{}`.", name))
            })?;
            output::section(definition.name);
            println!("  {}", definition.description);
            for usage in definition.usage.split(" | ") {
                println!("  usage: {}", usage);
            }
            Ok(())
        }
        _ => Err(usage_error(HELP_USAGE)),
    }
}

fn handle_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (sub, rest) = split_subcommand(args, CONFIG_USAGE)?;
    match (sub.as_str(), rest) {
        ("show", []) => {
            let config = &context.config;
            output::section("Configuration");
            let width = Config::keys().iter().map(|key| key.len()).max().unwrap_or_default();
            output::row("currency", &config.currency, width);
            output::row("precision", config.precision, width);
            output::row("settlement_tolerance", config.settlement_tolerance, width);
            output::row("quiet", if config.quiet { "on" } else { "off" }, width);
            Ok(())
        }
        ("set", [key, value]) => {
            let key = key.to_lowercase();
            let mut updated = context.config.clone();
            updated.set(&key, value)?;
            context.persist_config(&updated)?;
            context.config = updated;
            output::success(format!("Set `{}` to `{}`.", key, value));
            Ok(())
        }
        _ => Err(usage_error(CONFIG_USAGE)),
    }
}

fn handle_version(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error("version"));
    }
    output::info(build_info::current().summary());
    Ok(())
}

fn handle_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.running = false;
    Err(CommandError::ExitRequested)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::cli::core::{CliMode, CommandError, ShellContext};
    use crate::config::{Config, ConfigManager};

    #[test]
    fn config_set_updates_the_session_only_without_a_manager() {
        colored::control::set_override(false);
        let mut ctx = ShellContext::with_config(CliMode::Script, Config::default(), None);
        ctx.process_line("config set currency eur").unwrap();
        ctx.process_line("config set quiet on").unwrap();
        assert_eq!(ctx.config.currency, "EUR");
        assert!(ctx.config.quiet);
        assert!(ctx.process_line("config set colour blue").is_err());
    }

    #[test]
    fn failed_saves_keep_the_previous_config() {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        let manager = ConfigManager::with_base_dir(home.clone()).unwrap();
        fs::remove_dir_all(&home).unwrap();
        fs::write(&home, "not a directory").unwrap();

        let mut ctx = ShellContext::with_config(CliMode::Script, Config::default(), Some(manager));
        let err = ctx.process_line("config set currency eur").unwrap_err();
        assert!(matches!(err, CommandError::Core(_)));
        assert_eq!(ctx.config, Config::default());
    }

    #[test]
    fn help_rejects_unknown_topics() {
        colored::control::set_override(false);
        let mut ctx = ShellContext::with_config(CliMode::Script, Config::default(), None);
        ctx.process_line("help").unwrap();
        ctx.process_line("help budget").unwrap();
        assert!(ctx.process_line("help nope").is_err());
    }
}
