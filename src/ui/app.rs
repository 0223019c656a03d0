use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::time::Instant;

use super::form::Form;
use super::notify::{AlertId, AlertKind, Notifications};
use super::util::clamp_cursor;
use crate::config::Config;
use crate::ledger::{self, CategorySpend, Filter, Summary};
use crate::models::{BudgetLimit, Transaction, TransactionId};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Entry,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Entry => write!(f, "ADD"),
        }
    }
}

/// A user intent, decoupled from whichever key or command produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Load,
    Submit,
    Delete(TransactionId),
    SetFilter(Filter),
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) show_help: bool,

    // Settings
    pub(crate) currency: String,
    pub(crate) categories: Vec<String>,
    pub(crate) limits: Vec<BudgetLimit>,

    // Transaction list (filtered view)
    pub(crate) filter: Filter,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Derived views over the full ledger
    pub(crate) summary: Summary,
    pub(crate) budget: Vec<CategorySpend>,

    pub(crate) form: Form,
    pub(crate) notifications: Notifications,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            show_help: false,

            currency: config.currency.clone(),
            categories: config.categories.clone(),
            limits: config.budget.clone(),

            filter: Filter::All,
            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,

            summary: Summary::default(),
            budget: Vec::new(),

            form: Form::new(today()),
            notifications: Notifications::new(config.alert_lifetime()),

            visible_rows: 20,
        }
    }

    /// Entry point for every user action.
    ///
    /// Errors returned here are fatal for the session; recoverable failures
    /// are reported as alerts instead.
    pub(crate) fn dispatch(&mut self, action: Action, store: &mut Store) -> Result<()> {
        match action {
            Action::Load => {
                self.form.set_date(today());
                self.display_transactions(store)
            }
            Action::Submit => self.submit(store),
            Action::Delete(id) => self.delete(&id, store),
            Action::SetFilter(filter) => {
                self.filter = filter;
                self.transaction_index = 0;
                self.transaction_scroll = 0;
                self.display_transactions(store)
            }
        }
    }

    /// Reload everything from the store and rebuild every derived view.
    pub(crate) fn display_transactions(&mut self, store: &Store) -> Result<()> {
        let all = store.get_transactions()?;
        self.transactions = ledger::filter_transactions(&all, self.filter);
        clamp_cursor(
            &mut self.transaction_index,
            &mut self.transaction_scroll,
            self.transactions.len(),
        );
        tracing::debug!(
            filter = %self.filter,
            shown = self.transactions.len(),
            total = all.len(),
            "Displayed transactions"
        );
        self.update_summary(store)?;
        self.update_budget_tracking(store)?;
        Ok(())
    }

    pub(crate) fn update_summary(&mut self, store: &Store) -> Result<()> {
        self.summary = Summary::from_transactions(&store.get_transactions()?)?;
        Ok(())
    }

    pub(crate) fn update_budget_tracking(&mut self, store: &Store) -> Result<()> {
        self.budget = ledger::budget_tracking(&store.get_transactions()?, &self.limits)?;
        Ok(())
    }

    pub(crate) fn clear_form(&mut self) {
        self.form.clear(today());
    }

    pub(crate) fn show_alert(&mut self, message: impl Into<String>, kind: AlertKind) -> AlertId {
        self.notifications.push(message, kind, Instant::now())
    }

    /// Drop alerts whose time is up.
    pub(crate) fn tick(&mut self, now: Instant) {
        self.notifications.expire(now);
    }

    pub(crate) fn selected(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    fn submit(&mut self, store: &mut Store) -> Result<()> {
        let txn = match self.form.draft(&self.categories).validate() {
            Ok(txn) => txn,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected transaction entry");
                self.show_alert(e.to_string(), AlertKind::Error);
                return Ok(());
            }
        };

        // Show the row before the write lands; undo it if the write fails.
        let shown = self.filter.matches(&txn);
        if shown {
            self.transactions.push(txn.clone());
        }

        if let Err(e) = store.add_transaction(&txn) {
            tracing::error!(error = %e, "Failed to save transaction");
            if shown {
                self.transactions.retain(|t| t.id != txn.id);
            }
            self.show_alert(format!("Could not save transaction: {e}"), AlertKind::Error);
            return Ok(());
        }

        if shown {
            self.transaction_index = self.transactions.len() - 1;
        }
        self.update_summary(store)?;
        self.update_budget_tracking(store)?;
        self.clear_form();
        self.input_mode = InputMode::Normal;
        self.show_alert("Transaction added successfully", AlertKind::Success);
        Ok(())
    }

    fn delete(&mut self, id: &TransactionId, store: &mut Store) -> Result<()> {
        let position = self.transactions.iter().position(|t| &t.id == id);
        let removed_row = position.map(|i| self.transactions.remove(i));

        if let Err(e) = store.remove_transaction(id) {
            tracing::error!(error = %e, id = id.as_str(), "Failed to remove transaction");
            if let (Some(i), Some(row)) = (position, removed_row) {
                self.transactions.insert(i, row);
            }
            self.show_alert(format!("Could not remove transaction: {e}"), AlertKind::Error);
            return Ok(());
        }

        clamp_cursor(
            &mut self.transaction_index,
            &mut self.transaction_scroll,
            self.transactions.len(),
        );
        self.update_summary(store)?;
        self.update_budget_tracking(store)?;
        self.show_alert("Transaction removed", AlertKind::Success);
        Ok(())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
