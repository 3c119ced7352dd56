mod app;
mod config;
mod error;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::{DemoConfig, OptionEntry};

#[derive(Parser, Debug)]
#[command(name = "dropdown-tui")]
#[command(author = "Sean Fournier")]
#[command(version = "0.1.0")]
#[command(about = "Pick one option from a mouse-driven dropdown in the terminal")]
struct Args {
    /// Title shown before anything is chosen
    #[arg(short, long)]
    label: Option<String>,

    /// Option as TITLE=VALUE (repeatable, replaces configured options)
    #[arg(short, long = "option", value_name = "TITLE=VALUE")]
    options: Vec<String>,

    /// Style tokens for the trigger, e.g. "bold fg:yellow"
    #[arg(short, long)]
    style: Option<String>,

    /// Config file to use instead of the default one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs here instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(args.log_file.as_deref())?;

    let config = resolve_config(&args)?;
    let selection = run_tui(config)?;

    // Print the chosen option for scripts
    println!("{}", serde_json::to_string(&selection)?);
    Ok(())
}

fn init_logging(log_file: Option<&std::path::Path>) -> Result<()> {
    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::from_default_env());

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Could not open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
    Ok(())
}

/// Config file (explicit or default) with command line overrides on top
fn resolve_config(args: &Args) -> Result<DemoConfig> {
    let mut config = match &args.config {
        Some(path) => DemoConfig::load_from(path)?,
        None => DemoConfig::load(),
    };

    if let Some(label) = &args.label {
        config.label = label.clone();
    }
    if let Some(style) = &args.style {
        config.style = style.clone();
    }
    if !args.options.is_empty() {
        config.options = args
            .options
            .iter()
            .map(|spec| OptionEntry::parse(spec))
            .collect::<Result<_, _>>()?;
    }

    if config.options.is_empty() {
        tracing::warn!("No options configured, the list will be empty");
    }
    Ok(config)
}

fn run_tui(config: DemoConfig) -> Result<Option<app::Selection>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result.map(|()| app.selection())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
