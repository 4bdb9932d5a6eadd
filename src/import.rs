//! Turning files on disk into import batches.
//!
//! Paths given on the command line or typed at the import prompt may be
//! single files or directories. Directories are walked and filtered by
//! extension; every selected file is read fully into memory as a
//! [`NewTrack`] right before it is stored.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use walkdir::WalkDir;

use crate::config::ImportSettings;
use crate::error::{Error, Result};
use crate::store::NewTrack;

/// Outcome of one import batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub failed: usize,
}

fn normalized_extensions(settings: &ImportSettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Expand `paths` into the audio files to import, in order. Anything that is
/// not a directory is taken as a file and kept if its extension is allowed,
/// even when it cannot be read; the read failure is then counted by the
/// import. Directories contribute their audio files sorted by name.
pub fn collect_paths(paths: &[PathBuf], settings: &ImportSettings) -> Vec<PathBuf> {
    let exts = normalized_extensions(settings);
    let mut out: Vec<PathBuf> = Vec::new();

    for root in paths {
        if !root.is_dir() {
            if has_extension(root, &exts) {
                out.push(root.clone());
            }
            continue;
        }

        let mut walker = WalkDir::new(root)
            .follow_links(settings.follow_links)
            .sort_by_file_name();

        // Non-recursive = only the root directory.
        let depth_cap = if settings.recursive {
            settings.max_depth
        } else {
            Some(1)
        };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        for entry in walker
            .into_iter()
            .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_file() && has_extension(entry.path(), &exts) {
                out.push(entry.into_path());
            }
        }
    }

    out
}

/// Content type for a file, judged by its extension. Empty when unknown.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match ext.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("wav") => "audio/wav",
        Some("ogg" | "oga") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("m4a" | "mp4") => "audio/mp4",
        Some("aac") => "audio/aac",
        Some("webm") => "audio/webm",
        _ => "",
    }
}

/// Read `path` into a track ready to be stored.
pub fn read_import_file(path: &Path) -> Result<NewTrack> {
    let payload = fs::read(path).map_err(|e| Error::io(path, e))?;

    // Unknown modification times are stored as 0; the value is opaque.
    let last_modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0);

    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(NewTrack {
        name,
        mime_type: mime_for(path).to_string(),
        size_bytes: payload.len() as u64,
        last_modified,
        payload,
    })
}

#[cfg(test)]
mod tests;
