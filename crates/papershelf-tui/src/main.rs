use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use papershelf_core::config_file::{self, EnvOverrides, Settings};
use papershelf_core::{DataSource, ThemeMode, load_source};

mod action;
mod app;
mod debounce;
mod input;
mod persistence;
mod theme;
mod tui_event;
mod view;

use app::{App, SiteInfo};
use tui_event::LoadEvent;

/// Papershelf: browse a curated catalog of research papers in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Dataset to load: a local JSON file or an http(s) URL
    data: Option<String>,

    /// Color theme: light or dark (default: saved preference, then terminal)
    #[arg(long, value_parser = parse_theme)]
    theme: Option<ThemeMode>,

    /// Directory for log files (default: <cache_dir>/papershelf/logs)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn parse_theme(s: &str) -> Result<ThemeMode, String> {
    ThemeMode::parse(s).ok_or_else(|| format!("unknown theme '{s}', expected light or dark"))
}

/// Daily rolling log file. Stdout belongs to the terminal UI.
fn init_logging(dir: Option<PathBuf>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dir.or_else(|| dirs::cache_dir().map(|d| d.join("papershelf").join("logs")))?;
    std::fs::create_dir_all(&log_dir).ok()?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "papershelf.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(filter);
    tracing_subscriber::registry().with(file_layer).init();
    Some(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = init_logging(args.log_dir.clone());

    // Resolve config from CLI flags > env vars > config file > defaults
    let file_config = config_file::load_config();
    let mut settings = Settings::resolve(&file_config, &EnvOverrides::from_env());
    if let Some(data) = &args.data {
        settings.source = DataSource::parse(data);
    }

    let state_path = persistence::state_path();
    let saved = state_path.as_deref().and_then(persistence::load_theme);
    let colorfgbg = std::env::var("COLORFGBG").ok();
    let mode = persistence::resolve_theme(args.theme, saved, settings.theme, colorfgbg.as_deref());

    tracing::info!(
        source = %settings.source.display(),
        theme = mode.as_str(),
        "starting papershelf"
    );

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let site = SiteInfo {
        title: settings.title.clone(),
        subtitle: settings.subtitle.clone(),
        source: settings.source.display(),
    };
    let mut app = App::new(site, mode, Duration::from_millis(settings.debounce_ms));
    app.state_path = state_path;
    app.clipboard = true;

    // `event_tx` lives until exit so `recv` never reports a closed channel.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<LoadEvent>();
    let cancel = CancellationToken::new();

    // The single load task. No retry.
    let load_tx = event_tx.clone();
    let load_cancel = cancel.clone();
    let source = settings.source.clone();
    tokio::spawn(async move {
        let event = tokio::select! {
            _ = load_cancel.cancelled() => return,
            result = load_source(&source) => match result {
                Ok(set) => LoadEvent::Loaded(set),
                Err(e) => LoadEvent::Failed(e.to_string()),
            },
        };
        let _ = load_tx.send(event);
    });

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    let tick_rate = Duration::from_millis(1000 / u64::from(settings.fps.max(1)));

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                if let Some(load_event) = maybe_event {
                    app.handle_load_event(load_event);
                }
            }
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    let action = input::map_event(&evt, &app.input_mode);
                    app.update(action);
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit || cancel.is_cancelled() {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    drop(event_tx);
    Ok(())
}
