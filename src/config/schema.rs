use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/musicbrain/config.toml` or `~/.config/musicbrain/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MUSICBRAIN__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub tracklist: TracklistSettings,
    pub rename: RenameSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories of the release directory.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "flac", "ogg", "opus", "m4a", "wav", "aiff"]
                .into_iter()
                .map(String::from)
                .collect(),
            follow_links: true,
            include_hidden: false,
            recursive: false,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TracklistSettings {
    /// Separator between title and artist in a track line.
    pub separator: String,
}

impl Default for TracklistSettings {
    fn default() -> Self {
        Self {
            separator: " – ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenameSettings {
    /// Always put the track artist into the file name, not only when it
    /// differs from the release artist.
    pub include_artist: bool,
    /// Prefix file names with `d<disc number>`.
    pub include_medium_number: bool,
    /// Stands in for characters that are not allowed in file names.
    pub replacement_character: String,
    /// How to distribute tracks over the two sides when no count is given.
    pub side_split: SideSplit,
}

impl Default for RenameSettings {
    fn default() -> Self {
        Self {
            include_artist: false,
            include_medium_number: false,
            replacement_character: "_".to_string(),
            side_split: SideSplit::Half,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SideSplit {
    #[serde(alias = "half-split", alias = "half_split")]
    Half,
    #[serde(alias = "by-length", alias = "by_length")]
    Length,
}
