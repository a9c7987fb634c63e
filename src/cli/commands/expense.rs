use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::cli::core::{split_subcommand, usage_error, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::{parse_amount, ExpenseDraft, ExpenseService};

use super::CommandDefinition;

const USAGE: &str = "expense add <title> <amount> <payer> <category> [all | <sharer>...] [--date YYYY-MM-DD] | expense remove <number> | expense list [category]";
const DATE_FLAG: &str = "--date";
const EVERYONE: &str = "all";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "expense",
        "Record, remove, or list shared expenses",
        USAGE,
        handle_expense,
    )]
}

fn handle_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (sub, rest) = split_subcommand(args, USAGE)?;
    match sub.as_str() {
        "add" => add_expense(context, rest),
        "remove" => match rest {
            [number] => remove_expense(context, number),
            _ => Err(usage_error(USAGE)),
        },
        "list" => match rest {
            [] => {
                list_expenses(context, None);
                Ok(())
            }
            [category] => {
                list_expenses(context, Some(*category));
                Ok(())
            }
            _ => Err(usage_error(USAGE)),
        },
        _ => Err(usage_error(USAGE)),
    }
}

fn add_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, date) = take_date(args)?;
    let [title, amount, payer, category, sharers @ ..] = positional.as_slice() else {
        return Err(usage_error(USAGE));
    };

    let amount = parse_amount(amount)?;
    let paid_by = context.resolve_participant(payer)?;
    let shared_by = resolve_sharers(context, sharers)?;

    let mut draft = ExpenseDraft::new(*title, amount, paid_by, shared_by, *category);
    if let Some(date) = date {
        draft = draft.with_date(date);
    }
    context.session.add_expense(draft)?;
    Ok(())
}

/// No sharers, or the single word `all`, splits the expense across everyone.
fn resolve_sharers(context: &ShellContext, sharers: &[&str]) -> Result<Vec<Uuid>, CommandError> {
    match sharers {
        [] => Ok(everyone(context)),
        [only] if only.eq_ignore_ascii_case(EVERYONE) => Ok(everyone(context)),
        names => names
            .iter()
            .map(|name| context.resolve_participant(name))
            .collect(),
    }
}

fn everyone(context: &ShellContext) -> Vec<Uuid> {
    context.trip().participants.iter().map(|p| p.id).collect()
}

fn take_date<'a>(args: &[&'a str]) -> Result<(Vec<&'a str>, Option<DateTime<Utc>>), CommandError> {
    let mut positional = Vec::with_capacity(args.len());
    let mut date = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if *arg == DATE_FLAG {
            let raw = iter.next().ok_or_else(|| usage_error(USAGE))?;
            date = Some(parse_date(raw)?);
        } else {
            positional.push(*arg);
        }
    }
    Ok((positional, date))
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, CommandError> {
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a date (expected YYYY-MM-DD).", raw))
    })?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CommandError::InvalidArguments(format!("`{}` is out of range.", raw)))?;
    Ok(midnight.and_utc())
}

fn remove_expense(context: &mut ShellContext, number: &str) -> CommandResult {
    let index: usize = number
        .parse()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| CommandError::InvalidArguments(format!("`{}` is not an expense number.", number)))?;
    let id = context
        .trip()
        .expenses
        .get(index - 1)
        .map(|expense| expense.id)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "There is no expense #{}; see `expense list`.",
                index
            ))
        })?;
    context.session.remove_expense(id)?;
    Ok(())
}

fn list_expenses(context: &ShellContext, category: Option<&str>) {
    let rows: Vec<_> = ExpenseService::list(context.trip())
        .into_iter()
        .enumerate()
        .filter(|(_, expense)| category.map_or(true, |label| expense.matches_category(label)))
        .collect();
    if rows.is_empty() {
        output::info("No expenses recorded.");
        return;
    }

    output::section("Expenses");
    for (idx, expense) in rows {
        let sharers: Vec<String> = expense
            .shared_by
            .iter()
            .map(|id| context.participant_label(*id))
            .collect();
        println!(
            "  {:>2}. {}  {}  {}  paid by {}  shared by {}  [{}]",
            idx + 1,
            expense.date.format("%Y-%m-%d"),
            expense.title,
            context.money(expense.amount),
            context.participant_label(expense.paid_by),
            sharers.join(", "),
            expense.category
        );
    }
}
