//! Error types shared by the library and rename modules.

use std::path::PathBuf;

use lofty::error::LoftyError;
use thiserror::Error;

/// Errors raised while reading or writing tags and building a release.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to read tags from {path}: {source}")]
    ReadTags {
        path: PathBuf,
        #[source]
        source: LoftyError,
    },

    #[error("{0} carries no tags")]
    NoTags(PathBuf),

    #[error("{0} has no track number")]
    MissingTrackNumber(PathBuf),

    #[error("failed to write tags to {path}: {source}")]
    WriteTags {
        path: PathBuf,
        #[source]
        source: LoftyError,
    },

    #[error("track #{track} of medium #{disc} is already in the tracklist")]
    DuplicateTrack { disc: u32, track: u32 },

    #[error("no tagged audio files found in {0}")]
    EmptyRelease(PathBuf),

    #[error("medium #{0} not found")]
    MediumNotFound(u32),

    #[error("both sides are named {0:?}, the names must differ")]
    SideNamesNotDistinct(String),

    #[error("the first side cannot hold {requested} tracks, the medium only has {available}")]
    SideOverflow { requested: u32, available: u32 },
}

/// Errors raised while planning renames.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("source path {0} is not an existing file")]
    NotAFile(PathBuf),

    #[error("{0} is already part of the renaming plan")]
    DuplicateSource(PathBuf),

    #[error("{0} is already the target of another renaming")]
    DuplicateTarget(PathBuf),

    #[error("failed to resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
