use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::models::category::DEFAULT_CATEGORIES;
use crate::models::BudgetLimit;
use crate::ui::notify::MAX_LIFETIME;

pub(crate) const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Prefix printed before every amount.
    pub(crate) currency: String,
    /// Lifetime of each notification banner.
    pub(crate) alert_seconds: u64,
    /// Category vocabulary offered by the entry form.
    pub(crate) categories: Vec<String>,
    /// Budgeted expense categories, drawn in this order.
    pub(crate) budget: Vec<BudgetLimit>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "$".into(),
            alert_seconds: 3,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            budget: BudgetLimit::defaults(),
        }
    }
}

impl Config {
    /// Load from `path`. A missing file at the default location yields the
    /// defaults; a missing file that was asked for explicitly is an error.
    pub(crate) fn load(path: &Path, explicit: bool) -> Result<Self> {
        if !path.exists() {
            if explicit {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::info!(path = %path.display(), budgets = config.budget.len(), "Loaded config");
        Ok(config)
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.categories.iter().all(|c| c.trim().is_empty()) {
            anyhow::bail!("At least one category is required");
        }
        if self.alert_seconds == 0 || self.alert_seconds > MAX_LIFETIME.as_secs() {
            anyhow::bail!(
                "alert_seconds must be between 1 and {}, got {}",
                MAX_LIFETIME.as_secs(),
                self.alert_seconds
            );
        }

        let mut seen = std::collections::HashSet::new();
        for budget in &self.budget {
            if budget.category.trim().is_empty() {
                anyhow::bail!("Budget entry with an empty category");
            }
            if budget.limit <= Decimal::ZERO {
                anyhow::bail!(
                    "Budget limit for '{}' must be positive, got {}",
                    budget.category,
                    budget.limit
                );
            }
            if !seen.insert(budget.category.to_lowercase()) {
                anyhow::bail!("Duplicate budget for '{}'", budget.category);
            }
        }
        Ok(())
    }

    pub(crate) fn alert_lifetime(&self) -> Duration {
        Duration::from_secs(self.alert_seconds)
    }
}

#[cfg(test)]
mod tests;
