use std::fmt;
use std::time::Duration;

use super::model::{Medium, Track};
use crate::error::LibraryError;

/// Name of the record side with the 0-based `index`: A, B, C, …
///
/// Sides past `Z` are named by their 1-based number.
pub fn side_name(index: u32) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => (u64::from(index) + 1).to_string(),
    }
}

/// Default side names for a disc: disc 1 → A/B, disc 2 → C/D, …
pub fn default_side_names(disc_number: u32) -> [String; 2] {
    let first = disc_number.saturating_sub(1).saturating_mul(2);
    [side_name(first), side_name(first.saturating_add(1))]
}

/// A track's place on a medium side, displayed as `A1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidePosition {
    pub side: String,
    pub position: u32,
}

impl fmt::Display for SidePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side, self.position)
    }
}

/// The distribution of a medium's tracks over its two sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediumSides {
    pub names: [String; 2],
    pub first_side_tracks: u32,
    pub total_tracks: u32,
}

impl MediumSides {
    /// Put `first_side_tracks` tracks on the first side.
    pub fn new(medium: &Medium, first_side_tracks: u32) -> Result<Self, LibraryError> {
        let total_tracks = medium.effective_total_tracks();
        if first_side_tracks > total_tracks {
            return Err(LibraryError::SideOverflow {
                requested: first_side_tracks,
                available: total_tracks,
            });
        }
        Ok(Self {
            names: default_side_names(medium.disc_number),
            first_side_tracks,
            total_tracks,
        })
    }

    /// First side holds the larger half: 10 tracks → 5 + 5, 9 tracks → 5 + 4.
    pub fn half_split(medium: &Medium) -> Self {
        let total_tracks = medium.effective_total_tracks();
        Self {
            names: default_side_names(medium.disc_number),
            first_side_tracks: total_tracks.div_ceil(2),
            total_tracks,
        }
    }

    /// Choose the split whose side lengths are closest to each other.
    ///
    /// Ties go to the split closest to [`MediumSides::half_split`].
    pub fn by_length(medium: &Medium) -> Self {
        let half = Self::half_split(medium);
        let tracks = medium.tracks();
        let total: Duration = medium.total_length();

        let mut first_side = Duration::ZERO;
        let mut best = (Duration::MAX, u32::MAX, half.first_side_tracks);
        for count in 0..=half.total_tracks {
            first_side += tracks
                .iter()
                .filter(|t| t.track_number == count)
                .map(|t| t.duration)
                .sum::<Duration>();
            let second_side = total.saturating_sub(first_side);
            let diff = first_side.abs_diff(second_side);
            let key = (diff, count.abs_diff(half.first_side_tracks), count);
            if key < best {
                best = key;
            }
        }

        Self {
            first_side_tracks: best.2,
            ..half
        }
    }

    /// Replace the default side names; the two names must differ.
    pub fn with_names(mut self, names: [String; 2]) -> Result<Self, LibraryError> {
        if names[0] == names[1] {
            return Err(LibraryError::SideNamesNotDistinct(names[0].clone()));
        }
        self.names = names;
        Ok(self)
    }

    pub fn second_side_tracks(&self) -> u32 {
        self.total_tracks - self.first_side_tracks
    }

    /// Side and position of the track with `track_number`.
    pub fn position_of(&self, track_number: u32) -> SidePosition {
        if track_number <= self.first_side_tracks {
            SidePosition {
                side: self.names[0].clone(),
                position: track_number,
            }
        } else {
            SidePosition {
                side: self.names[1].clone(),
                position: track_number - self.first_side_tracks,
            }
        }
    }

    /// Index (0 or 1) of the side the track lands on.
    pub fn side_index(&self, track: &Track) -> usize {
        usize::from(track.track_number > self.first_side_tracks)
    }

    /// Tracks of `medium` on the side with `index`.
    pub fn tracks_on_side<'m>(
        &self,
        medium: &'m Medium,
        index: usize,
    ) -> impl Iterator<Item = &'m Track> {
        medium
            .tracks()
            .iter()
            .filter(move |t| self.side_index(t) == index)
    }

    pub fn side_length(&self, medium: &Medium, index: usize) -> Duration {
        self.tracks_on_side(medium, index).map(|t| t.duration).sum()
    }
}
