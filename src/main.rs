//! Wiring & DI. Entry point: parse CLI, bootstrap adapters, load, run one command, save.
//! No business logic here; commands are delegated to the CLI input port.

use clap::Parser;
use dotenv::dotenv;
use projman::adapters::persistence::JsonStore;
use projman::adapters::ui::cli::Cli;
use projman::adapters::ui::commands::CommandRunner;
use projman::adapters::ui::output::Printer;
use projman::adapters::ui::prompt::{FixedConfirm, InquireConfirm};
use projman::ports::{ConfirmPort, InputPort};
use projman::shared::config::AppConfig;
use projman::usecases::Workspace;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    let cli = Cli::parse();
    let cfg = AppConfig::load().unwrap_or_default();

    let default_filter = if cli.verbose {
        "debug".to_string()
    } else {
        cfg.log_filter_or_default()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(_) => debug!("no .env found (check CWD)"),
    }

    projman::adapters::ui::init_ui();

    let data_path = PathBuf::from(cli.data_dir.clone().unwrap_or_else(|| cfg.data_dir_or_default()));
    let data_dir_abs = data_path
        .canonicalize()
        .unwrap_or_else(|_| data_path.clone());
    info!(path = %data_dir_abs.display(), "data directory");

    // --- Load (a malformed record aborts before anything can be overwritten) ---
    let mut workspace = Workspace::new(Box::new(JsonStore::new(&data_path)));
    let summary = workspace
        .load_all()
        .map_err(|e| anyhow::anyhow!("Error loading data: {}", e))?;
    info!(
        users = summary.users,
        projects = summary.projects,
        tasks = summary.tasks,
        "data loaded"
    );

    // --- Run one command ---
    let confirm: Box<dyn ConfirmPort> = if cli.yes {
        Box::new(FixedConfirm(true))
    } else {
        Box::new(InquireConfirm)
    };
    let mut runner = CommandRunner::new(
        &mut workspace,
        confirm.as_ref(),
        std::io::stdout(),
        cli.command,
    );
    let result = runner.run();
    drop(runner);

    // --- Save after every successful command ---
    let mut printer = Printer::new(std::io::stdout());
    if let Err(e) = result {
        printer.error(&format!("Error: {}", e));
        std::process::exit(1);
    }
    match workspace.save_all() {
        Ok(()) => printer.success("Data saved successfully"),
        Err(e) => {
            printer.error(&format!("Error saving data: {}", e));
            std::process::exit(1);
        }
    }
    Ok(())
}
