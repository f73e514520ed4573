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

mod action;
mod app;
mod backend;
mod config_file;
mod input;
mod logging;
mod model;
mod theme;
mod tui_event;
mod view;

use app::App;
use model::settings::Settings;

/// smartfill: look up a record and fill a whole form from it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file, layered over the platform and working-directory configs
    #[arg(long)]
    config: Option<PathBuf>,

    /// Record source: http(s) URL, file:// URL or local path
    #[arg(long)]
    source: Option<String>,

    /// Member of the fetched JSON object holding the record array
    #[arg(long)]
    key: Option<String>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,

    /// Log file (default: <cache dir>/smartfill/smartfill.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Resolve settings: config files < env vars < CLI flags.
fn resolve_settings(args: &Args) -> anyhow::Result<Settings> {
    let file_cfg = match &args.config {
        Some(path) => config_file::load_config_with(path)?,
        None => config_file::load_config(),
    };

    let mut settings = Settings::default();
    config_file::apply_to_settings(&file_cfg, &mut settings);

    if let Ok(source) = std::env::var("SMARTFILL_SOURCE") {
        settings.source = Some(source);
    }
    if let Ok(key) = std::env::var("SMARTFILL_KEY") {
        settings.key = Some(key);
    }
    if let Some(ref source) = args.source {
        settings.source = Some(source.clone());
    }
    if let Some(ref key) = args.key {
        settings.key = Some(key.clone());
    }
    if let Some(ref theme) = args.theme {
        settings.theme_name = theme.clone();
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let settings = resolve_settings(&args)?;

    if settings.source_spec().is_none() {
        anyhow::bail!("no record source configured: set `source` and `key` in config or pass --source/--key");
    }
    if settings.bindings.is_empty() {
        anyhow::bail!("no field bindings configured: add [[bindings]] entries to the config");
    }

    let log_path = args
        .log_file
        .clone()
        .or_else(|| settings.log_file.as_ref().map(PathBuf::from))
        .or_else(logging::default_log_path)
        .unwrap_or_else(|| PathBuf::from("smartfill.log"));
    let _log_guard = logging::init(&log_path)?;
    tracing::info!(log = %log_path.display(), "smartfill starting");

    let theme = theme::Theme::by_name(&settings.theme_name);
    let client = smartfill_core::source::build_client(Duration::from_secs(settings.timeout_secs));

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

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<tui_event::BackendCommand>();
    tokio::spawn(backend::run(client, cmd_rx, event_tx));

    let mut app = App::new(settings, theme);
    app.backend_cmd_tx = Some(cmd_tx);
    app.mount();

    // First draw lays out the inputs, then focus lands on the first one.
    terminal.draw(|f| app.view(f))?;
    app.update(action::Action::Refocus);

    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Drain any additional queued backend events
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    app.update(input::map_event(&evt));
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit {
            break;
        }
    }

    app.unmount();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    tracing::info!("smartfill exiting");

    Ok(())
}
