//! Engine Template - Main entry point
//!
//! Opens the request form by default; `generate` and `validate` run without
//! a terminal UI.

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use engine_template::cli::{Cli, Commands};
use engine_template::{
    App, AppError, ClientConfig, DirectorySaver, FieldUpdate, FormState, InputKind,
    SubmitStatus, TemplateClient, TemplateRequest,
};

/// Where log output goes
enum LogTarget<'a> {
    /// Interactive form; stderr would draw over the alternate screen
    File(&'a Path),
    Stderr,
}

/// Initialize tracing; `RUST_LOG` overrides the default `info` level
fn init_tracing(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match target {
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let interactive = matches!(cli.command, None | Some(Commands::Form { .. }));
    init_tracing(if interactive {
        LogTarget::File(&cli.log_file)
    } else {
        LogTarget::Stderr
    })?;
    info!("Engine Template starting up");
    debug!("Template service base URL: {}", cli.base_url);

    match cli.command {
        Some(Commands::Validate { config }) => run_validate(&config),
        Some(Commands::Generate {
            config,
            engine_name,
            engine_version,
            author,
            description,
            no_examples,
            framework,
        }) => {
            let mut request = match config {
                Some(path) => TemplateRequest::load_from_file(path)?,
                None => TemplateRequest::default(),
            };
            let updates = [
                engine_name.map(FieldUpdate::EngineName),
                engine_version.map(FieldUpdate::Version),
                author.map(FieldUpdate::Author),
                description.map(FieldUpdate::Description),
                no_examples.then_some(FieldUpdate::IncludeExamples(false)),
            ];
            for update in updates.into_iter().flatten() {
                request.apply(update);
            }
            if let Some(raw) = framework {
                request.apply(FieldUpdate::parse("framework", &raw, InputKind::Select)?);
            }
            run_generate(request, &cli.base_url, cli.output_dir)
        }
        Some(Commands::Form {
            prefill,
            save_request,
        }) => run_form(
            prefill.as_deref(),
            save_request.as_deref(),
            &cli.base_url,
            cli.output_dir,
        ),
        None => {
            info!("No command specified, opening the form");
            run_form(None, None, &cli.base_url, cli.output_dir)
        }
    }
}

/// Check a request file
fn run_validate(path: &Path) -> Result<()> {
    info!("Validating request file: {:?}", path);
    let request = match TemplateRequest::load_from_file(path) {
        Ok(request) => request,
        Err(e) => {
            error!("Failed to load request file: {:#}", e);
            eprintln!("✗ Failed to load request file: {:#}", e);
            std::process::exit(1);
        }
    };

    match request.validate() {
        Ok(()) => {
            println!(
                "✓ Request is valid: {} {} ({})",
                request.engine_name,
                request.version,
                request.framework.label()
            );
            Ok(())
        }
        Err(e) => {
            error!("Request validation failed: {}", e);
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

/// Run one submission without the form
fn run_generate(request: TemplateRequest, base_url: &str, output_dir: PathBuf) -> Result<()> {
    let client = TemplateClient::new(ClientConfig::with_base_url(base_url))?;
    let saver = DirectorySaver::new(output_dir);
    let mut state = FormState::with_request(request);

    if let Err(e) = state.submit(&client, &saver) {
        error!("Generation did not complete: {}", e);
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }

    match state.status() {
        SubmitStatus::Success(msg) => {
            match &state.last_saved {
                Some(path) => println!("✓ {} Saved to {}", msg, path.display()),
                None => println!("✓ {}", msg),
            }
            Ok(())
        }
        SubmitStatus::Error(msg) => {
            eprintln!("✗ {}", msg);
            std::process::exit(1);
        }
        SubmitStatus::Idle | SubmitStatus::Loading => Ok(()),
    }
}

/// Run the interactive form
fn run_form(
    prefill: Option<&Path>,
    save_request: Option<&Path>,
    base_url: &str,
    output_dir: PathBuf,
) -> Result<()> {
    let request = match prefill {
        Some(path) => {
            info!("Prefilling form from {:?}", path);
            TemplateRequest::load_from_file(path)?
        }
        None => TemplateRequest::default(),
    };
    let client = TemplateClient::new(ClientConfig::with_base_url(base_url))?;
    let mut app = App::new(
        FormState::with_request(request),
        Arc::new(client),
        Box::new(DirectorySaver::new(output_dir)),
    );

    debug!("Initializing terminal for form mode");
    enable_raw_mode()
        .map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| AppError::terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| AppError::terminal(format!("Failed to create terminal: {}", e)))
        .and_then(|mut terminal| app.run(&mut terminal));

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    app.finish(result, save_request)?;

    if let Some(path) = save_request {
        println!("✓ Request saved to {}", path.display());
    }
    if let Some(path) = &app.state().last_saved {
        println!("✓ Last archive: {}", path.display());
    }
    info!("Engine Template exiting");
    Ok(())
}
