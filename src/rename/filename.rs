use crate::library::{MediumSides, Track};

const INVALID_FILE_NAME_CHARACTERS: &[char] = &['\\', '/', ':', ';', '*', '?', '"', '<', '>', '|'];

pub fn is_valid_file_name_char(c: char) -> bool {
    !c.is_control() && !INVALID_FILE_NAME_CHARACTERS.contains(&c)
}

/// Replace characters that may not appear in a file name, and a trailing dot.
pub fn sanitize_file_name(name: &str, replacement: char) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| if is_valid_file_name_char(c) { c } else { replacement })
        .collect();
    if sanitized.ends_with('.') {
        sanitized.pop();
        sanitized.push(replacement);
    }
    sanitized
}

/// What goes into a suggested file name besides side position and title.
#[derive(Debug, Clone)]
pub struct NamingOptions {
    pub include_artist: bool,
    pub include_medium_number: bool,
    pub replacement: char,
    pub separator: String,
}

/// Digits needed for the position on the fuller side.
fn position_width(sides: &MediumSides) -> usize {
    let fuller = sides.first_side_tracks.max(sides.second_side_tracks()).max(1);
    fuller.to_string().len()
}

/// `[d<disc>]<side><pos>. [<artist> – ]<title>.<ext>`
///
/// The artist appears when requested or when it differs from `release_artist`.
pub fn suggested_file_name(
    track: &Track,
    sides: &MediumSides,
    release_artist: &str,
    options: &NamingOptions,
) -> String {
    let position = sides.position_of(track.track_number);
    let width = position_width(sides);

    let mut stem = String::new();
    if options.include_medium_number {
        stem.push_str(&format!("d{}", track.disc_number));
    }
    stem.push_str(&format!("{}{:0width$}. ", position.side, position.position));

    let artist = track.display_artist();
    if options.include_artist || artist != release_artist {
        stem.push_str(artist);
        stem.push_str(&options.separator);
    }
    stem.push_str(&track.title);

    let stem = sanitize_file_name(&stem, options.replacement);
    match track.path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}
