mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{books, completions, contacts, query, shell, transfer, Context};
use crate::error::{exit_code_for, report_error};
use addrbook_config as config;
use addrbook_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "addrbook", version, about = "addrbook CLI")]
struct Cli {
    #[arg(long, global = true)]
    data_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Book(books::BookCommand),
    #[command(name = "add-contact")]
    AddContact(contacts::AddContactArgs),
    #[command(name = "edit-contact")]
    EditContact(contacts::EditContactArgs),
    #[command(name = "delete-contact")]
    DeleteContact(contacts::DeleteContactArgs),
    List(contacts::ListArgs),
    Search(query::SearchArgs),
    Group(query::GroupArgs),
    Count(query::CountArgs),
    #[command(subcommand)]
    Import(transfer::ImportCommand),
    #[command(subcommand)]
    Export(transfer::ExportCommand),
    /// Interactive menu over every command
    Shell(shell::ShellArgs),
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
        data_path,
        config: config_path,
        json,
        verbose: _,
        command,
    } = cli;

    if let Command::Completions(args) = command {
        return completions::emit(args);
    }

    let app_config = config::load(config_path).with_context(|| "load config")?;
    let data_path = paths::resolve_data_path(data_path.or_else(|| app_config.data_path.clone()))
        .with_context(|| "resolve data path")?;
    debug!(path = %data_path.display(), "data path resolved");

    let mut store = Store::open(&data_path)
        .with_context(|| format!("open address books {}", data_path.display()))?;
    let mut ctx = Context {
        store: &mut store,
        json,
        config: &app_config,
    };

    match command {
        Command::Book(books::BookCommand::Add(args)) => books::add_book(&mut ctx, args),
        Command::Book(books::BookCommand::Ls(args)) => books::list_books(&ctx, args),
        Command::AddContact(args) => contacts::add_contact(&mut ctx, args),
        Command::EditContact(args) => contacts::edit_contact(&mut ctx, args),
        Command::DeleteContact(args) => contacts::delete_contact(&mut ctx, args),
        Command::List(args) => contacts::list_contacts(&ctx, args),
        Command::Search(args) => query::search(&ctx, args),
        Command::Group(args) => query::group(&ctx, args),
        Command::Count(args) => query::count(&ctx, args),
        Command::Import(cmd) => transfer::import(&mut ctx, cmd),
        Command::Export(cmd) => transfer::export(&ctx, cmd),
        Command::Shell(args) => shell::launch(&mut ctx, args),
        Command::Completions(_) => Ok(()),
    }
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
        .with_writer(std::io::stderr)
        .try_init();
}
