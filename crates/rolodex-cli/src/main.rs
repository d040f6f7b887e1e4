mod commands;
mod error;
mod shell;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{backup, completions, BookCommand, Context};
use crate::error::{exit_code_for, report_error};
use rolodex_config as config;
use rolodex_core::time::local_today;
use rolodex_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "rolodex", version, about = "Personal address book with birthday reminders")]
struct Cli {
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Starts the interactive shell when omitted
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(flatten)]
    Book(BookCommand),
    /// Interactive shell
    Shell,
    /// Write a copy of the address book
    Backup(backup::BackupArgs),
    /// Merge contacts from another data file
    Import(backup::ImportArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        data_file,
        config: config_path,
        json,
        verbose: _,
        command,
    } = cli;

    if let Some(Command::Completions(args)) = command {
        print!("{}", completions::render(args)?);
        return Ok(());
    }

    let app_config = config::load(config_path).with_context(|| "load config")?;

    let data_file = paths::resolve_data_file(data_file.or(app_config.data_file))
        .with_context(|| "resolve data file")?;
    debug!(path = %data_file.display(), "data file resolved");

    let mut store = Store::open(&data_file)
        .with_context(|| format!("open address book {}", data_file.display()))?;
    if let Some(days) = app_config.window_days {
        store.book_mut().set_congratulation_days(i64::from(days))?;
    }

    let output = match command {
        None | Some(Command::Shell) => return shell::run_interactive(&mut store),
        Some(Command::Book(command)) => {
            let mutating = command.is_mutating();
            let mut ctx = Context {
                book: store.book_mut(),
                json,
                today: local_today(),
            };
            let output = commands::execute(&mut ctx, command)?;
            if mutating {
                save(&store)?;
            }
            output
        }
        Some(Command::Backup(args)) => backup::backup(&store, json, args)?,
        Some(Command::Import(args)) => {
            let output = backup::import(&mut store, json, args)?;
            save(&store)?;
            output
        }
        Some(Command::Completions(_)) => {
            unreachable!("completions handled before the address book is opened")
        }
    };

    println!("{output}");
    Ok(())
}

fn save(store: &Store) -> Result<()> {
    store.save().with_context(|| match store.path() {
        Some(path) => format!("save address book {}", path.display()),
        None => "save address book".to_string(),
    })?;
    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .try_init();
}
