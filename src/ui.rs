//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the TUI using `ratatui`. Everything shown is derived
//! from `App` on each frame; nothing here mutates state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, InputMode};
use crate::audio::PlaybackEngine;
use crate::config::{ControlsSettings, UiSettings};
use crate::media::PlaybackState;
use crate::presenter::{self, Row};

const CONTROLS: [(&str, &str); 9] = [
    ("j/k", "up/down"),
    ("h/l", "prev/next song"),
    ("enter", "play selected song"),
    ("space/p", "play/pause"),
    ("gg/G", "top/bottom"),
    ("a", "import"),
    ("d", "delete"),
    ("C", "clear library"),
    ("q", "quit"),
];

/// Render the controls help text, incorporating seek seconds.
fn controls_text(seek_seconds: u64) -> String {
    let mut parts: Vec<String> = CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect();
    parts.insert(2, format!("[H/L] seek -/+{seek_seconds}s"));
    parts.join(" | ")
}

/// The now-playing line: state, title and elapsed/total.
fn status_text<E: PlaybackEngine>(app: &App<E>, ui: &UiSettings) -> String {
    let session = app.session();
    let state = match session.state() {
        PlaybackState::Idle => return "Stopped".to_string(),
        PlaybackState::Paused => "Paused",
        PlaybackState::Playing => "Playing",
    };

    let title = app.now_playing_title().unwrap_or("-");
    let time = format!(
        "{}{}{}",
        presenter::format_time(session.position()),
        ui.time_separator,
        presenter::format_time(session.duration())
    );
    let cursor = if app.follow_playback {
        "CURSOR: Follow"
    } else {
        "CURSOR: Free-roam"
    };
    [state.to_string(), format!("Song: {title} [{time}]"), cursor.to_string()].join(" • ")
}

/// The line under the list: prompt, confirmation or last status message.
fn input_text<E: PlaybackEngine>(app: &App<E>) -> String {
    match app.input {
        InputMode::ImportPrompt => format!("Import path: {}_", app.input_buffer),
        InputMode::ConfirmClear => "Delete every track? [y] yes, any other key cancels".to_string(),
        InputMode::Normal => app.status.clone().unwrap_or_default(),
    }
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<E: PlaybackEngine>(
    frame: &mut Frame,
    app: &App<E>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cassette ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = Paragraph::new(status_text(app, ui_settings))
        .block(padded_block(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Main list
    {
        let rows = presenter::rows(app.cache(), &ui_settings.placeholder_text);
        let playing = app.session().current_index();

        // Center the selected item when possible by creating a visible window.
        let total = rows.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel = app.selected.min(total.saturating_sub(1));
        let (start, end) = if total <= list_height || list_height == 0 {
            (0, total)
        } else {
            let half = list_height / 2;
            let start = sel.saturating_sub(half).min(total - list_height);
            (start, start + list_height)
        };

        let items: Vec<ListItem> = rows[start..end]
            .iter()
            .map(|row| match row {
                Row::Placeholder(text) => ListItem::new(text.as_str()).italic(),
                Row::Track(t) => {
                    let marker = if playing == Some(t.index) { "♪ " } else { "  " };
                    ListItem::new(Line::from(vec![
                        Span::raw(marker),
                        Span::raw(t.title.as_str()),
                        Span::raw("  "),
                        Span::raw(t.detail.as_str()).dim(),
                    ]))
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if !app.cache().is_empty() {
            state.select(Some(sel - start));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let input = Paragraph::new(input_text(app)).block(padded_block(" message "));
    frame.render_widget(input, chunks[3]);

    let footer = Paragraph::new(controls_text(controls_settings.seek_seconds))
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests;
