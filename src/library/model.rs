use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use crate::encoding::Repair;
use crate::error::LibraryError;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// The tag text fields that encoding repair may rewrite.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextField {
    Title,
    Artist,
    Album,
    AlbumArtist,
}

/// A repair applied to one text field of a track while reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRepair {
    pub field: TextField,
    pub repair: Repair,
}

#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub track_number: u32,
    pub total_tracks: Option<u32>,
    pub disc_number: u32,
    pub duration: Duration,
    pub repairs: Vec<FieldRepair>,
}

impl Track {
    /// Track artist, falling back to the album artist.
    pub fn display_artist(&self) -> &str {
        self.artist
            .as_deref()
            .or(self.album_artist.as_deref())
            .unwrap_or(UNKNOWN_ARTIST)
    }

    /// Sort key: (disc number, track number).
    pub fn position(&self) -> (u32, u32) {
        (self.disc_number, self.track_number)
    }
}

/// Tracks sharing one disc number, ordered by track number.
#[derive(Debug, Clone)]
pub struct Medium {
    pub disc_number: u32,
    pub album: Option<String>,
    tracks: Vec<Track>,
}

impl Medium {
    pub fn new(disc_number: u32, album: Option<String>) -> Self {
        Self {
            disc_number,
            album,
            tracks: Vec::new(),
        }
    }

    /// Insert `track` at its position; a track number may only appear once.
    pub fn add_track(&mut self, track: Track) -> Result<(), LibraryError> {
        match self
            .tracks
            .binary_search_by_key(&track.track_number, |t| t.track_number)
        {
            Ok(_) => Err(LibraryError::DuplicateTrack {
                disc: self.disc_number,
                track: track.track_number,
            }),
            Err(index) => {
                self.tracks.insert(index, track);
                Ok(())
            }
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Highest of: last track number, number of tracks, tagged total.
    pub fn effective_total_tracks(&self) -> u32 {
        let highest = self.tracks.last().map_or(0, |t| t.track_number);
        let tagged = self.tracks.iter().filter_map(|t| t.total_tracks).max().unwrap_or(0);
        highest
            .max(tagged)
            .max(u32::try_from(self.tracks.len()).unwrap_or(u32::MAX))
    }

    pub fn total_length(&self) -> Duration {
        self.tracks.iter().map(|t| t.duration).sum()
    }
}

/// A release: name, artist and its media in disc order.
#[derive(Debug, Clone)]
pub struct Release {
    pub album: String,
    pub album_artist: String,
    media: BTreeMap<u32, Medium>,
}

impl Release {
    /// Group `tracks` found in `dir` into media.
    ///
    /// Duplicate positions are logged and skipped. The release name falls back
    /// to the directory name when no track carries an album tag.
    pub fn from_tracks(
        dir: &Path,
        tracks: impl IntoIterator<Item = Track>,
    ) -> Result<Self, LibraryError> {
        let mut tracks: Vec<Track> = tracks.into_iter().collect();
        tracks.sort_by_key(Track::position);

        let Some(first) = tracks.first() else {
            return Err(LibraryError::EmptyRelease(dir.to_path_buf()));
        };

        let album = first
            .album
            .clone()
            .or_else(|| {
                dir.file_name()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_default();
        let album_artist = first
            .album_artist
            .clone()
            .or_else(|| first.artist.clone())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        let mut release = Self {
            album,
            album_artist,
            media: BTreeMap::new(),
        };

        for track in tracks {
            let disc = track.disc_number;
            let medium = release.media.entry(disc).or_insert_with(|| {
                let medium = Medium::new(disc, track.album.clone());
                if medium.album.as_deref().is_some_and(|a| a != release.album) {
                    warn!(
                        medium = disc,
                        album = medium.album.as_deref().unwrap_or_default(),
                        "medium has a differing title"
                    );
                }
                medium
            });
            let path = track.path.clone();
            if let Err(e) = medium.add_track(track) {
                warn!(path = %path.display(), error = %e, "skipping track");
            }
        }

        Ok(release)
    }

    pub fn medium(&self, disc_number: u32) -> Result<&Medium, LibraryError> {
        self.media
            .get(&disc_number)
            .ok_or(LibraryError::MediumNotFound(disc_number))
    }

    pub fn media(&self) -> impl Iterator<Item = &Medium> {
        self.media.values()
    }

    pub fn medium_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.media.keys().copied()
    }

    /// All tracks in (disc number, track number) order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.media.values().flat_map(Medium::tracks)
    }
}
