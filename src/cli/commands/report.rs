use crate::cli::core::{usage_error, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::SummaryService;
use crate::ledger::{compute_balances, compute_settlements_with_tolerance};

use super::CommandDefinition;

const BALANCES_USAGE: &str = "balances";
const SETTLE_USAGE: &str = "settle";
const SUMMARY_USAGE: &str = "summary [--json]";
const LABEL_WIDTH: usize = 16;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "balances",
            "Show what each participant is owed (+) or owes (-)",
            BALANCES_USAGE,
            handle_balances,
        ),
        CommandDefinition::new(
            "settle",
            "Suggest the payments that square everyone up",
            SETTLE_USAGE,
            handle_settle,
        ),
        CommandDefinition::new(
            "summary",
            "Overview of spending, budgets, and settlements",
            SUMMARY_USAGE,
            handle_summary,
        ),
    ]
}

fn handle_balances(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error(BALANCES_USAGE));
    }
    let trip = context.trip();
    if trip.participants.is_empty() {
        output::info("No participants yet.");
        return Ok(());
    }

    output::section("Balances");
    for entry in compute_balances(trip).iter() {
        output::row(
            context.participant_label(entry.participant_id),
            context.money(entry.amount),
            LABEL_WIDTH,
        );
    }
    Ok(())
}

fn handle_settle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error(SETTLE_USAGE));
    }
    let settlements =
        compute_settlements_with_tolerance(context.trip(), context.config.settlement_tolerance);
    if settlements.is_empty() {
        output::success("Everyone is settled up.");
        return Ok(());
    }

    output::section("Settlements");
    for settlement in &settlements {
        println!(
            "  {} pays {} {}",
            context.participant_label(settlement.from),
            context.participant_label(settlement.to),
            context.money(settlement.amount)
        );
    }
    Ok(())
}

fn handle_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let as_json = match args {
        [] => false,
        [flag] if *flag == "--json" => true,
        _ => return Err(usage_error(SUMMARY_USAGE)),
    };
    let summary =
        SummaryService::summarize_with_tolerance(context.trip(), context.config.settlement_tolerance);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    output::section(&summary.trip_name);
    output::row("Expenses", summary.expense_count, LABEL_WIDTH);
    output::row("Total spent", context.money(summary.total_spent), LABEL_WIDTH);

    if !summary.participants.is_empty() {
        output::section("Participants");
        for participant in &summary.participants {
            output::row(
                &participant.name,
                format!(
                    "paid {}, share {}, balance {}",
                    context.money(participant.paid),
                    context.money(participant.share),
                    context.money(participant.balance)
                ),
                LABEL_WIDTH,
            );
        }
    }

    if !summary.spend_per_category.is_empty() {
        output::section("Spending by category");
        for (category, spent) in &summary.spend_per_category {
            output::row(category, context.money(*spent), LABEL_WIDTH);
        }
    }

    for category in &summary.over_budget_categories {
        output::warning(format!("`{}` is over budget.", category));
    }

    if summary.settlements.is_empty() {
        output::success("Everyone is settled up.");
    } else {
        output::section("Settlements");
        for settlement in &summary.settlements {
            println!(
                "  {} pays {} {}",
                settlement.from_name,
                settlement.to_name,
                context.money(settlement.amount)
            );
        }
    }
    Ok(())
}
