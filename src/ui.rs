//! UI rendering for the terminal user interface.
//!
//! One `draw` entry point; the body depends on the current `Screen`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;
use tui_logger::TuiLoggerWidget;

use crate::app::{App, GameView, Loadable, PlaylistView, Screen};
use crate::audio::SessionState;
use crate::config::Settings;
use crate::game::Guess;

const CHARTS_CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("enter", "open playlist"),
    ("r", "reload"),
    ("L", "log"),
    ("q", "quit"),
];

const PLAYLIST_CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("enter", "preview"),
    ("x", "stop"),
    ("p", "play the game"),
    ("esc", "back"),
    ("L", "log"),
    ("q", "quit"),
];

const GAME_CONTROLS: &[(&str, &str)] = &[
    ("tab", "play/stop clip"),
    ("type", "search"),
    ("up/down", "pick"),
    ("enter", "guess"),
    ("ctrl-b", "skip +2s"),
    ("esc", "clear/close"),
    ("ctrl-l", "log"),
];

const ALERT_CONTROLS: &[(&str, &str)] = &[("r", "retry"), ("c", "close")];

const SEARCH_PLACEHOLDER: &str = "Know it? Search for the title";

fn controls_text(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI into `frame`.
pub fn draw(frame: &mut Frame, app: &App, settings: &Settings) {
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ];
    if app.show_log {
        constraints.push(Constraint::Length(8));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tunequiz ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_status(frame, app, chunks[1]);

    match app.screen {
        Screen::Charts => draw_charts(frame, app, chunks[2]),
        Screen::Playlist => {
            if let Some(pl) = &app.playlist {
                draw_playlist(frame, pl, chunks[2]);
            }
        }
        Screen::Game => {
            if let Some(game) = &app.game {
                draw_game(frame, app, game, settings, chunks[2]);
            }
        }
    }

    if app.show_log {
        let log_widget = TuiLoggerWidget::default()
            .block(Block::default().borders(Borders::ALL).title(" log "))
            .style(Style::default().fg(Color::White));
        frame.render_widget(log_widget, chunks[3]);
    }

    let alert_open = app.game.as_ref().is_some_and(|g| g.alert().is_some());
    let pairs = match app.screen {
        Screen::Charts => CHARTS_CONTROLS,
        Screen::Playlist => PLAYLIST_CONTROLS,
        Screen::Game if alert_open => ALERT_CONTROLS,
        Screen::Game => GAME_CONTROLS,
    };
    let footer = Paragraph::new(controls_text(pairs))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    let footer_area = chunks[chunks.len() - 1];
    frame.render_widget(footer, footer_area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let mut parts: Vec<String> = Vec::new();

    match app.screen {
        Screen::Charts => {}
        Screen::Playlist => {
            if let Some(pl) = &app.playlist {
                parts.push(format!("Playlist: {}", pl.summary.name));
            }
        }
        Screen::Game => {
            if let Some(game) = &app.game {
                parts.push(format!("Turns left: {}", game.round.turns_left()));
                parts.push(format!(
                    "Clip: {}s",
                    game.round.allowed_playback_secs()
                ));
            }
        }
    }

    if let Some(dir) = &app.library_dir {
        parts.push(format!("Dir: {dir}"));
    }

    let mut line = vec![Span::raw(parts.join(" • "))];
    if let Some(msg) = &app.status {
        if !line[0].content.is_empty() {
            line.push(Span::raw(" • "));
        }
        line.push(Span::styled(msg.clone(), Style::default().fg(Color::Red)));
    }

    let status = Paragraph::new(Line::from(line))
        .block(Block::bordered().padding(left_pad()).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

/// Inline text for a list that is not ready yet.
fn pending_text<T>(loadable: &Loadable<T>) -> Option<Paragraph<'static>> {
    match loadable {
        Loadable::Ready(_) => None,
        Loadable::Loading => Some(Paragraph::new("Loading…")),
        Loadable::Failed(msg) => Some(
            Paragraph::new(format!("Could not load: {msg}"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true }),
        ),
    }
}

fn draw_charts(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" charts ");

    let Some(charts) = app.charts.ready() else {
        if let Some(p) = pending_text(&app.charts) {
            frame.render_widget(p.block(block), area);
        }
        return;
    };

    if charts.is_empty() {
        let empty = Paragraph::new("No playlists here. Every subdirectory of the library is one.")
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = charts
        .iter()
        .map(|c| {
            let mut text = c.name.clone();
            if let Some(curator) = &c.curator {
                text.push_str(&format!(" · {curator}"));
            }
            text.push_str(&format!(" ({} tracks)", c.track_count));
            ListItem::new(text)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(app.chart_selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_playlist(frame: &mut Frame, pl: &PlaylistView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", pl.summary.name));

    match pl.tracks.ready() {
        Some(tracks) if !tracks.is_empty() => {
            let items: Vec<ListItem> = tracks
                .iter()
                .map(|t| {
                    let length = format_mmss(t.duration.unwrap_or_default());
                    ListItem::new(format!("{length}  {}", t.display))
                })
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ListState::default();
            state.select(Some(pl.selected));
            frame.render_stateful_widget(list, chunks[0], &mut state);
        }
        Some(_) => {
            frame.render_widget(Paragraph::new("This playlist is empty.").block(block), chunks[0]);
        }
        None => {
            if let Some(p) = pending_text(&pl.tracks) {
                frame.render_widget(p.block(block), chunks[0]);
            }
        }
    }

    let now = match &pl.previewing {
        Some(track) => format!("▶ {}", track.display),
        None => "Nothing playing".to_string(),
    };
    let player = Paragraph::new(now).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" preview ")
            .padding(left_pad()),
    );
    frame.render_widget(player, chunks[1]);
}

fn guess_line(index: usize, entry: Option<&Guess>) -> Line<'static> {
    match entry {
        Some(Guess::Correct(t)) => {
            Line::from(format!("✅ {} - {}", t.title, t.artist)).fg(Color::Green)
        }
        Some(Guess::Incorrect(t)) => {
            Line::from(format!("❎ {} - {}", t.title, t.artist)).fg(Color::Red)
        }
        Some(Guess::Skipped) => Line::from("❎ SKIPPED").fg(Color::DarkGray),
        None => Line::from(format!("{}.", index + 1)).fg(Color::DarkGray),
    }
}

fn draw_game(frame: &mut Frame, app: &App, game: &GameView, settings: &Settings, area: Rect) {
    let max_turns = game.round.rules().max_turns;
    let guess_rows = u16::try_from(max_turns)
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(guess_rows),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let log = game.round.log();
    // Rows past the visible area would never be drawn.
    let shown = max_turns.min(usize::from(chunks[0].height));
    let rows: Vec<Line> = (0..shown).map(|i| guess_line(i, log.get(i))).collect();
    let guesses = Paragraph::new(rows).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" guesses ")
            .padding(left_pad()),
    );
    frame.render_widget(guesses, chunks[0]);

    // The bar spans `progress_secs`; the round only plays up to its budget.
    let scale = Duration::from_secs(settings.game.progress_secs.max(1));
    let ratio = (game.elapsed.as_secs_f64() / scale.as_secs_f64()).clamp(0.0, 1.0);
    let state = match game.playback {
        SessionState::Stopped => "stopped",
        SessionState::Loading => "loading",
        SessionState::Playing => "playing",
    };
    let label = format!(
        "{} / {} ({}s allowed, {state})",
        format_mmss(game.elapsed),
        format_mmss(scale),
        game.round.allowed_playback_secs()
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, chunks[1]);

    let search_block = Block::default()
        .borders(Borders::ALL)
        .title(" search ")
        .padding(left_pad());
    let search = if game.search.is_empty() {
        Paragraph::new(SEARCH_PLACEHOLDER).fg(Color::DarkGray)
    } else {
        Paragraph::new(format!("{}▏", game.search))
    };
    frame.render_widget(search.block(search_block), chunks[2]);

    let suggestions = game.suggestions(app.suggestion_limit);
    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|t| ListItem::new(format!("{} - {}", t.title, t.artist)))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" suggestions "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if !suggestions.is_empty() {
        list_state.select(Some(game.suggestion));
    }
    frame.render_stateful_widget(list, chunks[3], &mut list_state);

    if let Some(verdict) = game.alert() {
        let popup_area = centered_rect_sized(56, 7, area);
        frame.render_widget(Clear, popup_area);
        let text = vec![
            Line::from(verdict.to_string()).bold(),
            Line::from(format!(
                "It was {} - {}",
                game.round.target().title,
                game.round.target().artist
            )),
            Line::from(""),
            Line::from(controls_text(ALERT_CONTROLS)),
        ];
        let popup = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" round over "))
            .wrap(Wrap { trim: true });
        frame.render_widget(popup, popup_area);
    }
}
