//! CupNote - Main entry point
//!
//! Parses the command line, installs logging and dispatches to the terminal
//! wizard or one of the headless commands.

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use cupnote::app::App;
use cupnote::cli::{Cli, Commands};
use cupnote::config::AppConfig;
use cupnote::draft::TastingDraft;
use cupnote::selection::SelectionSet;
use cupnote::session::TastingSession;
use cupnote::theme::Theme;
use cupnote::types::{FlavorCategory, WizardStep};

/// Initialize the tracing subscriber.
///
/// Logs go to `--log-file` when given. The terminal UI owns the screen, so an
/// interactive run without a log file discards them.
fn init_logging(cli: &Cli, interactive: bool) -> Result<()> {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if interactive => builder.with_writer(std::io::sink).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let interactive = matches!(cli.command, None | Some(Commands::Run { .. }));
    init_logging(&cli, interactive)?;
    info!("CupNote starting up");
    debug!(?cli, "CLI arguments parsed");

    match cli.command {
        Some(Commands::Run { config, draft }) => run_tui(config.as_deref(), draft)?,
        Some(Commands::Catalog { category, query, config }) => {
            print_catalog(config.as_deref(), category, &query)?
        }
        Some(Commands::Validate { config }) => validate_config(&config),
        Some(Commands::ShowDraft { file, config }) => show_draft(&file, config.as_deref())?,
        None => {
            info!("No command specified, launching tasting wizard");
            run_tui(None, None)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Run the terminal wizard
fn run_tui(config_path: Option<&Path>, draft_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let mut session = TastingSession::from_config(&config)?;

    if let Some(path) = draft_path.as_deref().filter(|path| path.exists()) {
        let restored = TastingDraft::load_from_file(path)
            .and_then(|draft| session.restore(&draft).map_err(anyhow::Error::from));
        if let Err(e) = restored {
            // A stale draft should not keep the wizard from starting
            warn!("Ignoring draft {}: {:#}", path.display(), e);
            eprintln!("⚠ Ignoring draft {}: {:#}", path.display(), e);
        }
    }

    debug!("Initializing terminal for TUI mode");
    enable_raw_mode().context("Failed to enable raw mode")?;
    crossterm::execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .context("Failed to create terminal")
        .and_then(|mut terminal| {
            let mut app = App::new(session, Theme::roast(), draft_path);
            app.run(&mut terminal).map_err(anyhow::Error::from)
        });

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);

    result
}

/// Print the catalog through the same filter the flavor screen uses
fn print_catalog(config_path: Option<&Path>, category: Option<FlavorCategory>, query: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let catalog = Arc::new(config.load_catalog()?);
    let flavors = SelectionSet::new(catalog, config.selection);

    let items = flavors.filter_view(query, category);
    for item in &items {
        println!("{}\t{}", item.label, item.category.label());
    }
    info!(count = items.len(), "Printed catalog");
    Ok(())
}

fn validate_config(path: &Path) {
    info!("Validating configuration file: {:?}", path);
    match AppConfig::load_from_file(path).and_then(|config| config.validate()) {
        Ok(()) => {
            info!("Configuration validation successful");
            println!("✓ Configuration file is valid: {}", path.display());
        }
        Err(e) => {
            error!("Configuration validation failed: {:#}", e);
            eprintln!("✗ Configuration validation failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Print a saved draft the way the result screen summarizes it
fn show_draft(path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let draft = TastingDraft::load_from_file(path)?;
    let mut session = TastingSession::from_config(&config)?;
    session
        .restore(&draft)
        .with_context(|| format!("Draft does not fit this configuration: {}", path.display()))?;

    let step = WizardStep::from_index(draft.step);
    println!("단계: {} ({})", session.progress().step_label(), step.title());
    println!("향미: {}", draft.flavors.join(", "));
    let ratings = session.ratings();
    for axis in ratings.axes() {
        if let Some(value) = ratings.value(axis) {
            println!("  {:<4} {}", axis.label(), ratings.format(axis, value));
        }
    }
    if !draft.note.is_empty() {
        println!("메모: {}", draft.note);
    }
    if draft.saved_at_unix > 0 {
        println!("저장 시각(unix): {}", draft.saved_at_unix);
    }
    Ok(())
}
