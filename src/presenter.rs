//! Turning the playlist into display rows.
//!
//! Rows carry exactly the data their actions need: the playlist index to
//! play and the track id to delete, captured when the rows are built.

use crate::playlist::PlaylistCache;
use crate::store::{TrackId, TrackMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Play(usize),
    Delete(TrackId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    pub index: usize,
    pub id: TrackId,
    pub title: String,
    /// `"<type> • <size>"`.
    pub detail: String,
}

impl TrackRow {
    fn new(index: usize, meta: &TrackMeta) -> Self {
        let kind = if meta.mime_type.is_empty() {
            "audio"
        } else {
            meta.mime_type.as_str()
        };
        Self {
            index,
            id: meta.id,
            title: meta.name.clone(),
            detail: format!("{kind} • {}", human_size(meta.size_bytes)),
        }
    }

    pub fn play_action(&self) -> RowAction {
        RowAction::Play(self.index)
    }

    pub fn delete_action(&self) -> RowAction {
        RowAction::Delete(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Shown instead of an empty list.
    Placeholder(String),
    Track(TrackRow),
}

pub fn rows(cache: &PlaylistCache, placeholder: &str) -> Vec<Row> {
    if cache.is_empty() {
        return vec![Row::Placeholder(placeholder.to_string())];
    }
    cache
        .entries()
        .iter()
        .enumerate()
        .map(|(i, meta)| Row::Track(TrackRow::new(i, meta)))
        .collect()
}

/// The row at `index`, or `None` if there is no such track.
pub fn row_at(cache: &PlaylistCache, index: usize) -> Option<TrackRow> {
    cache.at(index).ok().map(|meta| TrackRow::new(index, meta))
}

/// Format a byte count with binary units, e.g. `3.4 MB` or `512 B`.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut n = bytes as f64;
    let mut i = 0;
    while n >= 1024.0 && i < UNITS.len() - 1 {
        n /= 1024.0;
        i += 1;
    }
    if n < 10.0 && i > 0 {
        format!("{n:.1} {}", UNITS[i])
    } else {
        format!("{n:.0} {}", UNITS[i])
    }
}

/// Format seconds as `m:ss`. Negative and non-finite values show `0:00`.
pub fn format_time(seconds: f64) -> String {
    let secs = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", secs / 60, secs % 60)
}
