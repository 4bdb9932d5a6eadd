use std::path::PathBuf;

use serde::Deserialize;

use crate::session::{DEFAULT_ALBUM_LABEL, DEFAULT_ARTIST_LABEL};

use super::load::default_data_dir;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cassette/config.toml` or `~/.config/cassette/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CASSETTE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub import: ImportSettings,
    pub media: MediaSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Location of the track database. Defaults to `tracks.db` in the data dir.
    pub db_path: Option<PathBuf>,
}

impl StorageSettings {
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| default_data_dir().join("tracks.db"))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// File extensions to import (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks while walking directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            extensions: [
                "mp3", "flac", "wav", "ogg", "oga", "opus", "m4a", "mp4", "aac", "webm",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    /// Register with the desktop as an MPRIS media player.
    pub enabled: bool,
    /// Artist shown for every track by the desktop media widget.
    pub artist_label: String,
    /// Album shown for every track by the desktop media widget.
    pub album_label: String,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            artist_label: DEFAULT_ARTIST_LABEL.to_string(),
            album_label: DEFAULT_ALBUM_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Row shown in place of the track list while the library is empty.
    pub placeholder_text: String,
    /// Separator between elapsed and total time in the status box.
    pub time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ your offline music, on tape ~ ".to_string(),
            placeholder_text: "No songs yet. Press `a` to import.".to_string(),
            time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek when pressing `H` / `L`.
    pub seek_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { seek_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive, e.g. `info` or `cassette=debug`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Log file. Defaults to `cassette.log` in the data dir.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LogSettings {
    pub fn resolved_file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| default_data_dir().join("cassette.log"))
    }
}
