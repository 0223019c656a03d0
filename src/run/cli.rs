use anyhow::{Context, Result};
use chrono::Local;
use std::io::Write;

use crate::config::Config;
use crate::ledger::{self, Filter, Summary};
use crate::models::category::{self, display_name};
use crate::models::{
    BudgetLimit, TransactionDraft, TransactionId, TransactionType, ValidationError,
    DATE_FORMAT,
};
use crate::store::Store;
use crate::ui::util::{format_amount, progress_bar, truncate};

/// Run one command. `args[0]` is the command name.
pub(crate) fn as_cli(
    args: &[String],
    store: &mut Store,
    config: &Config,
    out: &mut impl Write,
) -> Result<()> {
    let Some(command) = args.first() else {
        print_usage(out)?;
        return Ok(());
    };
    let rest = &args[1..];

    match command.as_str() {
        "add" | "a" => cli_add(rest, store, config, out),
        "list" | "ls" => cli_list(rest, store, config, out),
        "remove" | "rm" => cli_remove(rest, store, out),
        "summary" | "s" => cli_summary(store, config, out),
        "reset" => cli_reset(store, out),
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => print_version(out),
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

/// Commands that never touch the ledger.
pub(crate) fn is_offline(command: &str) -> bool {
    matches!(
        command,
        "--help" | "-h" | "help" | "--version" | "-V" | "version"
    )
}

pub(crate) fn print_version(out: &mut impl Write) -> Result<()> {
    writeln!(out, "pocketbook {}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

pub(crate) fn print_usage(out: &mut impl Write) -> Result<()> {
    let usage = "\
pocketbook - local-only income and expense tracker

Usage: pocketbook [options] [command]

Commands:
  (none)                                   Launch interactive TUI
  add <desc> <amount> <type> <category> [date]
                                           Record a transaction (type: income|expense,
                                           date: YYYY-MM-DD, default today)
  list [all|income|expense]                List transactions
  remove <id>                              Delete a transaction by id
  summary                                  Print balance, totals and budgets
  reset                                    Replace the ledger with an empty one
  --help, -h                               Show this help
  --version, -V                            Show version

Options:
  --config <path>                          Config file (default: platform config dir)
  --db <path>                              Ledger database (default: platform data dir)
  --memory                                 Use a throwaway in-memory ledger
  --log-level <level>                      Log filter for pocketbook.log (default: info)";
    writeln!(out, "{usage}")?;
    Ok(())
}

fn cli_add(args: &[String], store: &mut Store, config: &Config, out: &mut impl Write) -> Result<()> {
    if args.len() < 4 || args.len() > 5 {
        anyhow::bail!(
            "Usage: pocketbook add <description> <amount> <income|expense> <category> [YYYY-MM-DD]"
        );
    }

    let kind = TransactionType::parse(&args[2]).ok_or_else(|| {
        let names: Vec<&str> = TransactionType::all().iter().map(|t| t.as_str()).collect();
        anyhow::anyhow!("Unknown type '{}'. Use {}", args[2], names.join(" or "))
    })?;

    let category = category::position(&config.categories, &args[3])
        .map(|i| config.categories[i].clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown category '{}'. Choose one of: {}",
                args[3],
                config.categories.join(", ")
            )
        })?;

    let date = args
        .get(4)
        .cloned()
        .unwrap_or_else(|| Local::now().date_naive().format(DATE_FORMAT).to_string());

    let draft = TransactionDraft {
        description: args[0].clone(),
        amount: args[1].clone(),
        kind,
        category,
        date,
    };
    let txn = draft
        .validate()
        .map_err(|e: ValidationError| anyhow::anyhow!("Invalid transaction: {e}"))?;
    store
        .add_transaction(&txn)
        .context("Failed to save transaction")?;

    writeln!(
        out,
        "Added {} {} ({}) {}",
        txn.kind,
        format_amount(txn.amount, &config.currency),
        txn.category,
        txn.id
    )?;

    if txn.is_expense() {
        if let Some(limit) = BudgetLimit::find(&config.budget, &txn.category) {
            let transactions = store.get_transactions()?;
            for spend in ledger::budget_tracking(&transactions, std::slice::from_ref(limit))? {
                writeln!(
                    out,
                    "{} budget: {} of {} ({:.0}%){}",
                    display_name(&spend.category),
                    format_amount(spend.spent, &config.currency),
                    format_amount(spend.limit, &config.currency),
                    spend.percentage,
                    if spend.is_warning() { " - over 90%" } else { "" }
                )?;
            }
        }
    }
    Ok(())
}

fn cli_list(args: &[String], store: &Store, config: &Config, out: &mut impl Write) -> Result<()> {
    let filter = match args.first() {
        Some(arg) => Filter::parse(arg)
            .ok_or_else(|| anyhow::anyhow!("Unknown filter '{arg}'. Use all, income or expense"))?,
        None => Filter::All,
    };

    let transactions = ledger::filter_transactions(&store.get_transactions()?, filter);
    if transactions.is_empty() {
        writeln!(out, "No transactions")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<36} {:<10} {:<28} {:<14} {:>14}",
        "ID", "Date", "Description", "Category", "Amount"
    )?;
    writeln!(out, "{}", "─".repeat(106))?;
    for txn in &transactions {
        writeln!(
            out,
            "{:<36} {:<10} {:<28} {:<14} {:>14}",
            txn.id,
            txn.date,
            truncate(&txn.description, 28),
            display_name(&txn.category),
            format_amount(txn.signed_amount(), &config.currency),
        )?;
    }
    Ok(())
}

fn cli_remove(args: &[String], store: &mut Store, out: &mut impl Write) -> Result<()> {
    let [id] = args else {
        anyhow::bail!("Usage: pocketbook remove <id>");
    };

    let removed = store.remove_transaction(&TransactionId::from(id.as_str()))?;
    if removed == 0 {
        writeln!(out, "No transaction with id {id}")?;
    } else {
        writeln!(out, "Removed {id}")?;
    }
    Ok(())
}

fn cli_summary(store: &Store, config: &Config, out: &mut impl Write) -> Result<()> {
    let transactions = store.get_transactions()?;
    let summary = Summary::from_transactions(&transactions)?;
    let budget = ledger::budget_tracking(&transactions, &config.budget)?;
    let currency = &config.currency;

    writeln!(out, "pocketbook")?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Balance:    {}", format_amount(summary.balance, currency))?;
    writeln!(
        out,
        "  Income:     {} ({} txns)",
        format_amount(summary.total_income, currency),
        summary.income_count
    )?;
    writeln!(
        out,
        "  Expenses:   {} ({} txns)",
        format_amount(summary.total_expenses, currency),
        summary.expense_count
    )?;

    if !budget.is_empty() {
        writeln!(out)?;
        writeln!(out, "Budgets:")?;
        for spend in &budget {
            writeln!(
                out,
                "  {:<15} {} {:>3.0}%  {} / {}{}",
                display_name(&spend.category),
                progress_bar(spend.ratio(), 20),
                spend.percentage,
                format_amount(spend.spent, currency),
                format_amount(spend.limit, currency),
                if spend.is_warning() { "  !" } else { "" }
            )?;
        }
    }
    Ok(())
}

fn cli_reset(store: &mut Store, out: &mut impl Write) -> Result<()> {
    store.clear()?;
    writeln!(out, "Ledger reset")?;
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
