mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{backup, calls, completions, home, patients, search, users, Context};
use crate::error::{exit_code_for, report_error};
use callbook_config as config;
use callbook_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "callbook", version, about = "callbook CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
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
    Backup(backup::BackupArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    #[command(name = "add-user")]
    AddUser(users::AddUserArgs),
    #[command(name = "list-users")]
    ListUsers,
    Login(users::LoginArgs),
    Logout,
    Whoami,
    /// Show the home view
    Home,
    #[command(name = "add-patient")]
    AddPatient(patients::AddPatientArgs),
    #[command(name = "edit-patient")]
    EditPatient(patients::EditPatientArgs),
    #[command(name = "delete-patient")]
    DeletePatient(patients::DeletePatientArgs),
    #[command(name = "list-patients")]
    ListPatients,
    /// Show a patient's information and call log
    Show(patients::ShowArgs),
    /// Search patients by name or phone:<digits>
    Search(search::SearchArgs),
    /// Open the call modal, or record an outcome with --outcome
    Call(calls::CallArgs),
    #[command(name = "call-log")]
    CallLog(calls::CallLogArgs),
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
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => run_with_store(db_path, config_path, json, verbose, command),
    }
}

fn run_with_store(
    db_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json: bool,
    verbose: bool,
    command: Command,
) -> Result<()> {
    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) if path.exists() => debug!(path = %path.display(), "config resolved"),
            Ok(path) => debug!(path = %path.display(), "config missing, using defaults"),
            Err(err) => debug!(error = %err, "config unavailable"),
        }
    }

    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");

    let store =
        Store::open(&db_path).with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    let ctx = Context {
        store: &store,
        json,
        config: &app_config,
    };

    match command {
        Command::Backup(args) => backup::backup(&ctx, args),
        Command::AddUser(args) => users::add_user(&ctx, args),
        Command::ListUsers => users::list_users(&ctx),
        Command::Login(args) => users::login(&ctx, args),
        Command::Logout => users::logout(&ctx),
        Command::Whoami => users::whoami(&ctx),
        Command::Home => home::show_home(&ctx),
        Command::AddPatient(args) => patients::add_patient(&ctx, args),
        Command::EditPatient(args) => patients::edit_patient(&ctx, args),
        Command::DeletePatient(args) => patients::delete_patient(&ctx, args),
        Command::ListPatients => patients::list_patients(&ctx),
        Command::Show(args) => patients::show_patient(&ctx, args),
        Command::Search(args) => search::search(&ctx, args),
        Command::Call(args) => calls::call(&ctx, args),
        Command::CallLog(args) => calls::call_log(&ctx, args),
        Command::Completions(_) => {
            unreachable!("completions command handled before store initialization")
        }
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
