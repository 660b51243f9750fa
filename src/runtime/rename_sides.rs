use std::collections::BTreeSet;
use std::error::Error;
use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use crate::config::{Settings, SideSplit};
use crate::library::{self, EncodingPolicy, MediumSides};
use crate::rename::{NamingOptions, RenamingPlan, suggested_file_name};

pub struct RenameRequest {
    pub medium: u32,
    pub first_side_tracks: Option<u32>,
    pub side_names: Option<[String; 2]>,
    pub by_length: bool,
    pub include_artist: bool,
    pub include_medium: bool,
    pub dry_run: bool,
}

/// Rename the files of one medium after their side positions, listing the
/// planned renames on `out`.
pub fn run(
    dir: &Path,
    settings: &Settings,
    request: &RenameRequest,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let release = library::read_release(dir, &settings.library, EncodingPolicy::Keep)?;
    let medium = release.medium(request.medium)?;

    let sides = match request.first_side_tracks {
        Some(count) => MediumSides::new(medium, count)?,
        None if request.by_length || settings.rename.side_split == SideSplit::Length => {
            MediumSides::by_length(medium)
        }
        None => MediumSides::half_split(medium),
    };
    let sides = match &request.side_names {
        Some(names) => sides.with_names(names.clone())?,
        None => sides,
    };
    for index in 0..2 {
        info!(
            "Side {}: {} tracks, {}",
            sides.names[index],
            sides.tracks_on_side(medium, index).count(),
            library::time_display(sides.side_length(medium, index))
        );
    }

    let options = NamingOptions {
        include_artist: request.include_artist || settings.rename.include_artist,
        include_medium_number: request.include_medium || settings.rename.include_medium_number,
        replacement: settings.rename.replacement_character.chars().next().unwrap_or('_'),
        separator: settings.tracklist.separator.clone(),
    };

    let mut plan = RenamingPlan::new();
    for track in medium.tracks() {
        let new_name = suggested_file_name(track, &sides, &release.album_artist, &options);
        if let Err(e) = plan.add(&track.path, &new_name) {
            warn!(path = %track.path.display(), error = %e, "not renaming");
        }
    }

    if plan.is_empty() {
        info!("All tracks already have the desired name");
        return Ok(());
    }
    for (source, target) in plan.iter() {
        writeln!(out, "{}", source.file_name().unwrap_or_default().to_string_lossy())?;
        writeln!(out, "  -> {}", target.file_name().unwrap_or_default().to_string_lossy())?;
    }
    if request.dry_run {
        info!("Dry run: {} file(s) would be renamed", plan.len());
        return Ok(());
    }

    let result = plan.execute(&BTreeSet::new());
    for conflict in &result.conflicts {
        warn!(path = %conflict.display(), "target already exists");
    }
    for (path, e) in &result.errors {
        warn!(path = %path.display(), error = %e, "rename failed");
    }
    if result.is_success() {
        info!("Renaming result: {result}");
    } else {
        warn!("Renaming result: {result}");
    }
    Ok(())
}
