#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::fs::File;
use std::io::{self, stdout};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use arrestation::client::HttpReportClient;
use arrestation::config::{Cli, Command, FormArgs, ServeArgs};
use arrestation::server::{self, AppState};
use arrestation::storage::{ProfileStore, default_data_dir};
use arrestation::tui::App;

/// Log file written by the terminal form, inside the data directory.
const LOG_FILE: &str = "arrestation.log";

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let runtime = Runtime::new().context("failed to start async runtime")?;

    match cli.command {
        Command::Serve(args) => run_server(&runtime, args),
        Command::Form(args) => run_form(&runtime, args),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn env_filter() -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("arrestation=info".parse()?)
        .add_directive("tower_http=debug".parse()?))
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn run_server(runtime: &Runtime, args: ServeArgs) -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()?).init();

    tracing::info!("starting report server");
    runtime
        .block_on(server::serve(args.addr, AppState::new()))
        .with_context(|| format!("server on {} failed", args.addr))
}

/// The terminal owns stdout, so the form logs to a file instead.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn init_file_logging(dir: &Path) -> anyhow::Result<()> {
    let file = File::create(dir.join(LOG_FILE))
        .with_context(|| format!("cannot create log file in {}", dir.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();
    Ok(())
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn run_form(runtime: &Runtime, args: FormArgs) -> anyhow::Result<()> {
    let data_dir = match args.data_dir.clone() {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let store = ProfileStore::with_dir(&data_dir)?;
    init_file_logging(&data_dir)?;

    let client = HttpReportClient::new(&args.api_url, args.timeout());
    tracing::info!(endpoint = client.endpoint(), "opening arrest form");
    let mut app = App::new(store, Arc::new(client), runtime.handle().clone())?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = app.run(&mut terminal);

    let restore_result = restore_terminal();
    match result {
        Err(e) => Err(e.into()),
        Ok(()) => restore_result.map_err(Into::into),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
