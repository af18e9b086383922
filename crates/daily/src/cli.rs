//! Command-line surface.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use time::Date;
use time::macros::format_description;

use crate::app::journal::Journal;
use crate::infra::clock;
use crate::infra::config::Config;

#[derive(Debug, Parser)]
#[command(
    name = "daily",
    author,
    version,
    about = "Generate today's journal entry, carrying forward unfinished TODO items",
    long_about = None
)]
pub struct Cli {
    /// Write to today's dated file instead of printing to stdout
    #[arg(short = 'w', long = "write-file")]
    pub write_file: bool,

    /// Directory containing the daily/<year>/<month>/<day>/daily.md tree
    #[arg(short = 'b', long = "base-dir", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Additional configuration file layered over the user config
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Generate the entry for this day (YYYY-MM-DD) instead of today
    #[arg(short = 'd', long = "date", value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub date: Option<Date>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print a shell completion script and exit
    #[arg(long = "completions", value_name = "SHELL")]
    pub completions: Option<Shell>,
}

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

/// Execute a parsed invocation.
pub fn run(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?.with_base_dir(cli.base_dir);
    let journal = Journal::from_config(&config)?;
    let today = cli.date.unwrap_or_else(clock::today);

    if cli.write_file {
        journal.write(today)?;
    } else {
        println!("{}", journal.compose(today)?);
    }
    Ok(())
}
