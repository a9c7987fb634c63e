use colored::Colorize;

use crate::cli::core::{split_subcommand, usage_error, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::parse_amount;
use crate::ledger::budget_status;

use super::CommandDefinition;

const USAGE: &str = "budget set <category> <amount> | budget update <category> <amount> | budget rename <category> <new-category> | budget remove <category> | budget list";

const OVER_BUDGET_MARKER: &str = "[over budget]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "budget",
        "Manage per-category spending limits",
        USAGE,
        handle_budget,
    )]
}

fn handle_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (sub, rest) = split_subcommand(args, USAGE)?;
    match (sub.as_str(), rest) {
        ("set", [category, amount]) => {
            let amount = parse_amount(amount)?;
            context.session.set_budget(category, amount)?;
            Ok(())
        }
        ("update", [category, amount]) => {
            let amount = parse_amount(amount)?;
            context.session.update_budget(category, amount)?;
            Ok(())
        }
        ("rename", [from, to]) => {
            context.session.rename_budget(from, to)?;
            Ok(())
        }
        ("remove", [category]) => {
            context.session.remove_budget(category)?;
            Ok(())
        }
        ("list", []) => {
            list_budgets(context);
            Ok(())
        }
        _ => Err(usage_error(USAGE)),
    }
}

fn list_budgets(context: &ShellContext) {
    let statuses = budget_status(context.trip());
    if statuses.is_empty() {
        output::info("No budgets set. Add one with `budget set <category> <amount>`.");
        return;
    }

    output::section("Budgets");
    for (category, status) in &statuses {
        let line = format!(
            "{:<16} {} of {} spent, {} left",
            category,
            context.money(status.spent),
            context.money(status.budget),
            context.money(status.remaining())
        );
        if status.is_over {
            println!("  {} {}", line, OVER_BUDGET_MARKER.bright_red().bold());
        } else {
            println!("  {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use colored::Colorize;

use crate::cli::core::{CliMode, ShellContext};
    use crate::config::Config;

    #[test]
    fn update_requires_an_existing_budget() {
        colored::control::set_override(false);
        let mut ctx = ShellContext::with_config(CliMode::Script, Config::default(), None);
        assert!(ctx.process_line("budget update Food 10").is_err());

        ctx.process_line("budget set Food 50").unwrap();
        ctx.process_line("budget update Food 75").unwrap();
        ctx.process_line("budget rename Food Meals").unwrap();
        assert_eq!(ctx.trip().budget("Meals"), Some(75.0));
        assert_eq!(ctx.trip().budget("Food"), None);

        ctx.process_line("budget remove Meals").unwrap();
        assert!(ctx.trip().budgets.is_empty());
    }
}
