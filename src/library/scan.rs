use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::LibraryError;

use super::model::{Release, Track};
use super::tags::{EncodingPolicy, read_track};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
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

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Read every audio file under `dir` into a [`Track`].
///
/// Unreadable files and files with incomplete tags are logged and skipped.
/// The result is ordered by (disc number, track number).
pub fn scan(dir: &Path, settings: &LibrarySettings, policy: EncodingPolicy) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the release directory itself.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, settings) {
            continue;
        }
        match read_track(path, policy) {
            Ok(track) => {
                for fixed in &track.repairs {
                    info!("Fixed {}", fixed.repair);
                }
                debug!(path = %path.display(), disc = track.disc_number, track = track.track_number, "read track");
                tracks.push(track);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "skipping file"),
        }
    }

    tracks.sort_by_key(Track::position);
    tracks
}

/// Scan `dir` and group the tracks found into a [`Release`].
pub fn read_release(
    dir: &Path,
    settings: &LibrarySettings,
    policy: EncodingPolicy,
) -> Result<Release, LibraryError> {
    Release::from_tracks(dir, scan(dir, settings, policy))
}
