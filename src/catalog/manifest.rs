//! Optional `playlist.toml` describing a playlist directory.
//!
//! ```toml
//! name = "Eighties"
//! curator = "Side B"
//! artwork = "cover.png"
//!
//! [[tracks]]
//! id = "take-on-me"
//! title = "Take On Me"
//! artist = "a-ha"
//! preview = "clips/take-on-me.ogg"
//! duration_secs = 225
//! ```
//!
//! Relative paths resolve against the playlist directory. A track without
//! `preview` is listed but has no preview asset.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

pub const MANIFEST_FILE: &str = "playlist.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub name: Option<String>,
    pub curator: Option<String>,
    pub artwork: Option<PathBuf>,
    pub tracks: Vec<ManifestTrack>,
}

#[derive(Debug, Deserialize)]
pub struct ManifestTrack {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub preview: Option<PathBuf>,
    #[serde(default)]
    pub duration_secs: Option<u64>,
}

/// Read `playlist.toml` from `dir`; `Ok(None)` when there is none.
pub fn read_manifest(dir: &Path) -> Result<Option<Manifest>> {
    let path = dir.join(MANIFEST_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io(e)),
    };

    let mut manifest: Manifest = toml::from_str(&text).map_err(|e| Error::Manifest {
        path: path.clone(),
        message: e.message().to_string(),
    })?;

    manifest.artwork = manifest.artwork.map(|p| resolve(dir, p));
    for track in &mut manifest.tracks {
        track.preview = track.preview.take().map(|p| resolve(dir, p));
    }
    Ok(Some(manifest))
}

fn resolve(dir: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() { p } else { dir.join(p) }
}
