//! Tiny tagged PCM WAV files for tests.

use std::path::Path;

use lofty::config::WriteOptions;
use lofty::prelude::*;
use lofty::tag::{ItemKey, Tag, TagType};

const SAMPLE_RATE: u32 = 8000;

/// Write an 8 kHz, 8-bit mono WAV of `seconds` of silence.
pub(crate) fn write_wav(path: &Path, seconds: u32) {
    let samples = SAMPLE_RATE * seconds;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + samples).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes()); // byte rate
    bytes.extend_from_slice(&1u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&8u16.to_le_bytes()); // bits per sample
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&samples.to_le_bytes());
    bytes.resize(bytes.len() + samples as usize, 128);
    std::fs::write(path, bytes).unwrap();
}

fn tag_with(title: &str, artist: &str) -> Tag {
    let mut tag = Tag::new(TagType::Id3v2);
    tag.set_title(title.to_string());
    tag.set_artist(artist.to_string());
    tag.set_album("Album".to_string());
    tag.insert_text(ItemKey::AlbumArtist, "Artist".to_string());
    tag
}

/// One second long, track total 10 when `track` is given.
pub(crate) fn write_tagged_wav(path: &Path, title: &str, artist: &str, track: Option<u32>) {
    write_wav(path, 1);
    let mut tag = tag_with(title, artist);
    if let Some(n) = track {
        tag.set_track(n);
        tag.set_track_total(10);
    }
    tag.save_to_path(path, WriteOptions::default()).unwrap();
}

/// A track by the album artist, without a track total.
pub(crate) fn write_album_track(path: &Path, title: &str, track: u32, seconds: u32) {
    write_wav(path, seconds);
    let mut tag = tag_with(title, "Artist");
    tag.set_track(track);
    tag.save_to_path(path, WriteOptions::default()).unwrap();
}
