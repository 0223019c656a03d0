use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{Action, App, InputMode};
use super::notify::AlertKind;
use crate::ledger::Filter;
use crate::store::Store;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit pocketbook", cmd_quit, r);
    register_command!("quit", "Quit pocketbook", cmd_quit, r);
    register_command!("a", "Open the add-transaction form", cmd_add, r);
    register_command!("add", "Open the add-transaction form", cmd_add, r);
    register_command!(
        "f",
        "Filter the list (e.g. :f expense)",
        cmd_filter,
        r
    );
    register_command!(
        "filter",
        "Filter the list (e.g. :filter income, :filter all)",
        cmd_filter,
        r
    );
    register_command!("delete", "Delete the selected transaction", cmd_delete, r);
    register_command!("reload", "Reload transactions from storage", cmd_reload, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.show_alert(
            format!("Unknown command: :{cmd_name}. Did you mean :{suggestion}?"),
            AlertKind::Error,
        );
    }

    Ok(())
}

/// Registered long names, sorted, for the help overlay.
pub(crate) fn help_entries() -> Vec<(&'static str, &'static str)> {
    let mut entries: Vec<_> = COMMANDS
        .iter()
        .filter(|(name, _)| name.len() > 1)
        .map(|(name, cmd)| (*name, cmd.description))
        .collect();
    entries.sort_by_key(|(name, _)| *name);
    entries
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_add(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.input_mode = InputMode::Entry;
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    match Filter::parse(args) {
        Some(filter) => app.dispatch(Action::SetFilter(filter), store),
        None => {
            app.show_alert(
                format!("Unknown filter '{args}'. Use all, income or expense"),
                AlertKind::Error,
            );
            Ok(())
        }
    }
}

fn cmd_delete(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let Some(id) = app.selected().map(|t| t.id.clone()) else {
        app.show_alert("No transaction selected", AlertKind::Error);
        return Ok(());
    };
    app.dispatch(Action::Delete(id), store)
}

fn cmd_reload(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.dispatch(Action::Load, store)
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}
