use std::path::Path;

use crate::config::TrackDisplayField;

/// Build a display string for a track according to the provided `fields` and separator.
///
/// Composes metadata fields in the configured order and falls back to `title`
/// when no parts were produced. `path` is the preview file, when there is one.
pub fn display_from_fields(
    path: Option<&Path>,
    title: &str,
    artist: &str,
    album: Option<&str>,
    fields: &[TrackDisplayField],
    sep: &str,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        let part = match f {
            TrackDisplayField::Title => Some(title.trim().to_string()),
            TrackDisplayField::Artist => Some(artist.trim().to_string()),
            TrackDisplayField::Album => album.map(|a| a.trim().to_string()),
            TrackDisplayField::Filename => path
                .and_then(|p| p.file_stem())
                .and_then(|s| s.to_str())
                .map(str::to_string),
            TrackDisplayField::Path => path.map(|p| p.display().to_string()),
        };
        if let Some(part) = part.filter(|s| !s.trim().is_empty()) {
            parts.push(part);
        }
    }

    if parts.is_empty() {
        title.to_string()
    } else {
        parts.join(sep)
    }
}
