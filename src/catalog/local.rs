use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::CatalogSettings;
use crate::error::{Error, Result};

use super::Catalog;
use super::display::display_from_fields;
use super::manifest::{Manifest, read_manifest};
use super::model::{PlaylistSummary, Track};
use super::scan::{UNKNOWN_ARTIST, audio_files, is_hidden, scan, sort_by_display};

const COVER_FILES: [&str; 3] = ["cover.jpg", "cover.jpeg", "cover.png"];

/// A catalog backed by a library directory: each subdirectory is a playlist.
pub struct LocalCatalog {
    root: PathBuf,
    settings: CatalogSettings,
}

impl LocalCatalog {
    pub fn new(root: impl Into<PathBuf>, settings: CatalogSettings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    fn playlist_dir(&self, id: &str) -> Result<PathBuf> {
        // Ids are plain directory names; anything that could leave the root is unknown.
        let plain = !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\']);
        let dir = self.root.join(id);
        if plain && dir.is_dir() {
            Ok(dir)
        } else {
            Err(Error::NotFound(id.to_string()))
        }
    }

    fn summarize(&self, id: String, dir: &Path) -> Result<PlaylistSummary> {
        let manifest = read_manifest(dir)?.unwrap_or_default();
        let track_count = if manifest.tracks.is_empty() {
            audio_files(dir, &self.settings).len()
        } else {
            manifest.tracks.len()
        };

        Ok(PlaylistSummary {
            name: manifest.name.clone().unwrap_or_else(|| id.clone()),
            id,
            curator: manifest.curator,
            artwork: manifest.artwork.or_else(|| find_cover(dir)),
            track_count,
        })
    }

    fn manifest_tracks(&self, dir: &Path, manifest: Manifest) -> Vec<Track> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut tracks = Vec::with_capacity(manifest.tracks.len());

        for (i, t) in manifest.tracks.into_iter().enumerate() {
            let id = t.id.unwrap_or_else(|| format!("track-{}", i + 1));
            if !seen.insert(id.clone()) {
                log::warn!("{}: duplicate track id {id:?} skipped", dir.display());
                continue;
            }

            let artist = t
                .artist
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
            let display = display_from_fields(
                t.preview.as_deref(),
                &t.title,
                &artist,
                t.album.as_deref(),
                &self.settings.display_fields,
                &self.settings.display_separator,
            );

            tracks.push(Track {
                id,
                title: t.title,
                artist,
                album: t.album,
                duration: t.duration_secs.map(Duration::from_secs),
                preview: t.preview,
                artwork: None,
                display,
            });
        }
        sort_by_display(&mut tracks);
        tracks
    }
}

impl Catalog for LocalCatalog {
    fn charts(&self) -> Result<Vec<PlaylistSummary>> {
        let mut playlists = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_dir() || (!self.settings.include_hidden && is_hidden(&path)) {
                continue;
            }
            let Some(id) = path.file_name().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            match self.summarize(id, &path) {
                Ok(summary) => playlists.push(summary),
                Err(e) => log::warn!("skipping playlist {}: {e}", path.display()),
            }
        }

        playlists.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        log::info!(
            "found {} playlists under {}",
            playlists.len(),
            self.root.display()
        );
        Ok(playlists)
    }

    fn playlist_tracks(&self, id: &str) -> Result<Vec<Track>> {
        let dir = self.playlist_dir(id)?;
        let manifest = read_manifest(&dir)?;
        let artwork = manifest
            .as_ref()
            .and_then(|m| m.artwork.clone())
            .or_else(|| find_cover(&dir));

        let mut tracks = match manifest {
            Some(manifest) if !manifest.tracks.is_empty() => self.manifest_tracks(&dir, manifest),
            _ => scan(&dir, &self.settings),
        };
        for track in &mut tracks {
            track.artwork = artwork.clone();
        }
        log::info!("playlist {id:?}: {} tracks", tracks.len());
        Ok(tracks)
    }
}

fn find_cover(dir: &Path) -> Option<PathBuf> {
    COVER_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}
