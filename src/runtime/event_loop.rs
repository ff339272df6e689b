use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Screen};
use crate::catalog::Catalog;
use crate::config;
use crate::ui;

use super::audio::AudioLink;

const IDLE_POLL: Duration = Duration::from_millis(50);

/// Main terminal event loop: handles input, drawing and the audio link.
/// Returns `Ok(())` when the player quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio: &mut AudioLink,
    catalog: &dyn Catalog,
) -> Result<(), Box<dyn std::error::Error>> {
    // Redraw at the tick cadence while a clip plays so the progress bar moves.
    let playing_poll = Duration::from_millis(settings.audio.tick_ms).min(IDLE_POLL);

    loop {
        audio.sync(app);

        terminal.draw(|f| ui::draw(f, app, settings))?;

        let wait = if audio.is_playing() {
            playing_poll
        } else {
            IDLE_POLL
        };
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, audio, catalog) {
                    break;
                }
            }
        }
    }

    audio.stop(app);
    Ok(())
}

/// Dispatch a key press to the current screen. Returns `true` to quit.
pub(super) fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    audio: &mut AudioLink,
    catalog: &dyn Catalog,
) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.screen {
        Screen::Charts => handle_charts_key(key.code, app, catalog),
        Screen::Playlist => handle_playlist_key(key.code, app, audio, catalog),
        Screen::Game => {
            handle_game_key(key.code, ctrl, app, audio);
            false
        }
    }
}

fn handle_charts_key(code: KeyCode, app: &mut App, catalog: &dyn Catalog) -> bool {
    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.next_chart(),
        KeyCode::Char('k') | KeyCode::Up => app.prev_chart(),
        KeyCode::Char('r') => app.set_charts(catalog.charts()),
        KeyCode::Char('L') => app.toggle_log(),
        KeyCode::Enter | KeyCode::Char('l') => {
            if let Some(summary) = app.selected_chart().cloned() {
                let tracks = catalog.playlist_tracks(&summary.id);
                app.open_playlist(summary);
                app.set_tracks(tracks);
            }
        }
        _ => {}
    }
    false
}

fn handle_playlist_key(
    code: KeyCode,
    app: &mut App,
    audio: &mut AudioLink,
    catalog: &dyn Catalog,
) -> bool {
    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.next_track(),
        KeyCode::Char('k') | KeyCode::Up => app.prev_track(),
        KeyCode::Char('L') => app.toggle_log(),
        KeyCode::Enter => audio.preview_selected(app),
        KeyCode::Char('x') => audio.stop(app),
        KeyCode::Char('r') => {
            if let Some(id) = app.playlist.as_ref().map(|pl| pl.summary.id.clone()) {
                audio.stop(app);
                app.set_tracks(catalog.playlist_tracks(&id));
            }
        }
        KeyCode::Char('p') => {
            audio.stop(app);
            if let Err(e) = app.start_game() {
                app.report(&e);
            }
        }
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => {
            audio.stop(app);
            app.back_to_charts();
        }
        _ => {}
    }
    false
}

fn handle_game_key(code: KeyCode, ctrl: bool, app: &mut App, audio: &mut AudioLink) {
    let limit = app.suggestion_limit;
    let alert_open = app.game.as_ref().is_some_and(|g| g.alert().is_some());

    if alert_open {
        match code {
            KeyCode::Char('r') | KeyCode::Enter => {
                audio.stop(app);
                if let Some(game) = app.game.as_mut() {
                    game.retry();
                }
            }
            KeyCode::Char('c') | KeyCode::Esc => {
                audio.stop(app);
                app.close_game();
            }
            _ => {}
        }
        return;
    }

    if ctrl {
        match code {
            KeyCode::Char('b') => {
                if let Some(game) = app.game.as_mut() {
                    game.buy_time();
                }
            }
            KeyCode::Char('p') => audio.toggle_round_clip(app),
            KeyCode::Char('l') => app.toggle_log(),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Tab => audio.toggle_round_clip(app),
        KeyCode::Esc => {
            let searching = app.game.as_ref().is_some_and(|g| !g.search.is_empty());
            if searching {
                if let Some(game) = app.game.as_mut() {
                    game.clear_search();
                }
            } else {
                audio.stop(app);
                app.close_game();
            }
        }
        KeyCode::Enter => {
            if let Some(game) = app.game.as_mut() {
                game.submit_selected(limit);
            }
        }
        KeyCode::Down => {
            if let Some(game) = app.game.as_mut() {
                game.next_suggestion(limit);
            }
        }
        KeyCode::Up => {
            if let Some(game) = app.game.as_mut() {
                game.prev_suggestion(limit);
            }
        }
        KeyCode::Backspace => {
            if let Some(game) = app.game.as_mut() {
                game.pop_search_char();
            }
        }
        KeyCode::Char(c) if !c.is_control() => {
            if let Some(game) = app.game.as_mut() {
                game.push_search_char(c);
            }
        }
        _ => {}
    }
}
