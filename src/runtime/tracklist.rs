use std::error::Error;
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::library::{self, BoxStyle, EncodingPolicy, MediumSides, Release};

/// Print the tracklist of the release in `dir` to `out`, optionally repairing
/// and rewriting mis-decoded tags.
pub fn run(
    dir: &Path,
    settings: &Settings,
    fix_tag_encoding: bool,
    medium: Option<u32>,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let policy = if fix_tag_encoding {
        EncodingPolicy::Repair
    } else {
        EncodingPolicy::Keep
    };
    let release = library::read_release(dir, &settings.library, policy)?;
    let separator = settings.tracklist.separator.as_str();
    debug!(
        album = %release.album,
        media = ?release.medium_numbers().collect::<Vec<_>>(),
        "read release"
    );

    let text = match medium {
        None => library::render_release(&release, separator, MediumSides::half_split),
        Some(number) => {
            let medium = release.medium(number)?;
            let title = library::release_title(&release, separator);
            [
                library::heading(&title, BoxStyle::Double),
                library::heading(&library::medium_title(medium), BoxStyle::Single),
                library::medium_tracklist(medium, &MediumSides::half_split(medium), separator),
            ]
            .join("\n")
        }
    };
    // Tags are saved even when the reader has gone away.
    let printed = writeln!(out, "{text}");

    if fix_tag_encoding {
        let written = save_repairs(&release);
        info!("Saved fixed tags to {written} file(s)");
    }
    printed?;
    Ok(())
}

/// Write back every repaired track, returning how many files were saved.
fn save_repairs(release: &Release) -> usize {
    let mut written = 0usize;
    for track in release.tracks() {
        match library::write_repairs(track) {
            Ok(true) => written += 1,
            Ok(false) => {}
            Err(e) => warn!(path = %track.path.display(), error = %e, "could not save fixed tags"),
        }
    }
    written
}

/// `true` when `e` is a write to a closed pipe, e.g. output piped into `head`.
pub fn is_broken_pipe(e: &(dyn Error + 'static)) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
}
