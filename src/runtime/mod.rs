use std::env;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{
    FetchOutcome, PlaybackSession, PreviewFetcher, ThreadScheduler, Tick, open_backend,
};
use crate::catalog::{Catalog, LocalCatalog};

mod audio;
mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();
    logging::init(&settings.logging);
    if let Some(msg) = config_warning {
        log::warn!("{msg}");
    }

    let dir = env::args()
        .nth(1)
        .or_else(|| settings.catalog.root.clone())
        .unwrap_or_else(|| {
            env::current_dir()
                .ok()
                .and_then(|p| p.to_str().map(|s| s.to_string()))
                .unwrap_or_else(|| "Music".to_string())
        });
    log::info!("library: {dir}");

    let catalog = LocalCatalog::new(&dir, settings.catalog.clone());
    let mut app = App::new(settings.game.rules(), settings.ui.suggestion_limit);
    app.show_log = settings.ui.show_log;
    app.set_library_dir(dir);
    app.set_charts(catalog.charts());

    let (tick_tx, tick_rx) = mpsc::channel::<Tick>();
    let (fetch_tx, fetch_rx) = mpsc::channel::<FetchOutcome>();
    let session = PlaybackSession::new(
        open_backend(settings.audio.volume),
        ThreadScheduler::posting(Duration::from_millis(settings.audio.tick_ms), tick_tx),
    );
    let mut link =
        audio::AudioLink::new(session, PreviewFetcher::new(fetch_tx), tick_rx, fetch_rx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut link, &catalog);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
