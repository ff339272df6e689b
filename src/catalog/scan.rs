use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::CatalogSettings;

use super::display::display_from_fields;
use super::model::Track;

pub(super) const UNKNOWN_ARTIST: &str = "Unknown Artist";

fn is_audio_file(path: &Path, settings: &CatalogSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

pub(super) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Audio files below `dir`, honoring the hidden/depth/link settings.
pub fn audio_files(dir: &Path, settings: &CatalogSettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);
    if let Some(d) = settings.max_depth {
        walker = walker.max_depth(d);
    }

    walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_audio_file(p, settings))
        .collect()
}

/// Scan a playlist directory into tracks whose preview asset is the file itself.
///
/// Track ids are the file paths relative to `dir`, so they are unique within
/// the playlist.
pub fn scan(dir: &Path, settings: &CatalogSettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = audio_files(dir, settings)
        .into_iter()
        .map(|path| read_track(dir, path, settings))
        .collect();

    sort_by_display(&mut tracks);
    tracks
}

/// Order tracks by display string, ignoring case.
pub(super) fn sort_by_display(tracks: &mut [Track]) {
    tracks.sort_by_cached_key(|t| t.display.to_lowercase());
}

fn read_track(dir: &Path, path: PathBuf, settings: &CatalogSettings) -> Track {
    let id = path
        .strip_prefix(dir)
        .unwrap_or(&path)
        .to_string_lossy()
        .replace('\\', "/");

    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut duration: Option<Duration> = None;

    match lofty::read_from_path(&path) {
        Ok(tagged) => {
            duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title().filter(|v| !v.trim().is_empty()) {
                    title = v.trim().to_string();
                }
                artist = tag
                    .artist()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
                album = tag
                    .album()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
            }
        }
        Err(e) => log::debug!("no tags for {}: {e}", path.display()),
    }

    let artist = artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
    let display = display_from_fields(
        Some(&path),
        &title,
        &artist,
        album.as_deref(),
        &settings.display_fields,
        &settings.display_separator,
    );

    Track {
        id,
        title,
        artist,
        album,
        duration,
        preview: Some(path),
        artwork: None,
        display,
    }
}
