mod cli;
mod tui;

pub(crate) use cli::{as_cli, is_offline, print_usage, print_version};
pub(crate) use tui::as_tui;

use anyhow::Result;
use std::path::PathBuf;

/// Global flags, split from the command words that follow them.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Options {
    pub(crate) config: Option<PathBuf>,
    pub(crate) db: Option<PathBuf>,
    pub(crate) memory: bool,
    pub(crate) log_level: Option<String>,
    pub(crate) command: Vec<String>,
}

impl Options {
    /// Parse `args` without the program name. Flags may appear anywhere
    /// before or after the command.
    pub(crate) fn parse(args: &[String]) -> Result<Self> {
        let mut opts = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" => opts.config = Some(PathBuf::from(flag_value(&mut iter, arg)?)),
                "--db" => opts.db = Some(PathBuf::from(flag_value(&mut iter, arg)?)),
                "--log-level" => opts.log_level = Some(flag_value(&mut iter, arg)?),
                "--memory" => opts.memory = true,
                _ => opts.command.push(arg.clone()),
            }
        }

        if opts.memory && opts.db.is_some() {
            anyhow::bail!("--memory and --db cannot be used together");
        }
        Ok(opts)
    }
}

fn flag_value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<String> {
    iter.next()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("{flag} requires a value"))
}
