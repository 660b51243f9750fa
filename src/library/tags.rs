use std::path::Path;
use std::time::Duration;

use lofty::config::WriteOptions;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag};

use super::model::{FieldRepair, TextField, Track};
use crate::encoding::fix_utf8;
use crate::error::LibraryError;

/// Whether mis-decoded tag text is repaired while reading.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EncodingPolicy {
    Keep,
    Repair,
}

impl TextField {
    fn item_key(self) -> ItemKey {
        match self {
            TextField::Title => ItemKey::TrackTitle,
            TextField::Artist => ItemKey::TrackArtist,
            TextField::Album => ItemKey::AlbumTitle,
            TextField::AlbumArtist => ItemKey::AlbumArtist,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn text_field(
    tag: &Tag,
    field: TextField,
    policy: EncodingPolicy,
    repairs: &mut Vec<FieldRepair>,
) -> Option<String> {
    let value = non_empty(tag.get_string(field.item_key()))?;
    if policy == EncodingPolicy::Keep {
        return Some(value);
    }
    match fix_utf8(&value) {
        Some(repair) => {
            let fixed = repair.after.clone();
            repairs.push(FieldRepair { field, repair });
            Some(fixed)
        }
        None => Some(value),
    }
}

/// Read the tags of the file at `path` into a [`Track`].
///
/// The primary tag is preferred, falling back to the first tag found.
pub fn read_track(path: &Path, policy: EncodingPolicy) -> Result<Track, LibraryError> {
    let read_error = |source| LibraryError::ReadTags {
        path: path.to_path_buf(),
        source,
    };
    let tagged = Probe::open(path)
        .map_err(read_error)?
        .read()
        .map_err(read_error)?;
    let duration: Duration = tagged.properties().duration();

    let tag = tagged
        .primary_tag()
        .or_else(|| tagged.first_tag())
        .ok_or_else(|| LibraryError::NoTags(path.to_path_buf()))?;

    let track_number = tag
        .track()
        .filter(|&n| n > 0)
        .ok_or_else(|| LibraryError::MissingTrackNumber(path.to_path_buf()))?;

    let mut repairs = Vec::new();
    let title = text_field(tag, TextField::Title, policy, &mut repairs).unwrap_or_else(|| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string()
    });
    let artist = text_field(tag, TextField::Artist, policy, &mut repairs);
    let album = text_field(tag, TextField::Album, policy, &mut repairs);
    let album_artist = text_field(tag, TextField::AlbumArtist, policy, &mut repairs);

    Ok(Track {
        path: path.to_path_buf(),
        title,
        artist,
        album,
        album_artist,
        track_number,
        total_tracks: tag.track_total(),
        disc_number: tag.disk().filter(|&d| d > 0).unwrap_or(1),
        duration,
        repairs,
    })
}

/// Write the repaired text fields of `track` back into its file.
///
/// Returns `Ok(false)` when the track carries no repairs.
pub fn write_repairs(track: &Track) -> Result<bool, LibraryError> {
    if track.repairs.is_empty() {
        return Ok(false);
    }
    let path = track.path.as_path();
    let read_error = |source| LibraryError::ReadTags {
        path: path.to_path_buf(),
        source,
    };
    let mut tagged = Probe::open(path)
        .map_err(read_error)?
        .read()
        .map_err(read_error)?;

    let primary = tagged.primary_tag_type();
    let tag_type = if tagged.tag(primary).is_some() {
        primary
    } else {
        tagged
            .first_tag()
            .map(Tag::tag_type)
            .ok_or_else(|| LibraryError::NoTags(path.to_path_buf()))?
    };
    let tag = tagged
        .tag_mut(tag_type)
        .ok_or_else(|| LibraryError::NoTags(path.to_path_buf()))?;

    for FieldRepair { field, repair } in &track.repairs {
        tag.insert_text(field.item_key(), repair.after.clone());
    }

    tag.save_to_path(path, WriteOptions::default())
        .map_err(|source| LibraryError::WriteTags {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(true)
}
