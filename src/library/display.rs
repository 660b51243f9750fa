use std::time::Duration;

use super::model::{Medium, Release, Track};
use super::sides::MediumSides;

/// Border style of a heading box.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoxStyle {
    Single,
    Double,
}

impl BoxStyle {
    /// Corners (top-left, top-right, bottom-left, bottom-right), horizontal, vertical.
    fn glyphs(self) -> ([char; 4], char, char) {
        match self {
            BoxStyle::Single => (['┌', '┐', '└', '┘'], '─', '│'),
            BoxStyle::Double => (['╔', '╗', '╚', '╝'], '═', '║'),
        }
    }
}

/// Draw `text` inside a three-line box.
pub fn heading(text: &str, style: BoxStyle) -> String {
    let ([tl, tr, bl, br], h, v) = style.glyphs();
    let rule: String = std::iter::repeat_n(h, text.chars().count() + 2).collect();
    format!("{tl}{rule}{tr}\n{v} {text} {v}\n{bl}{rule}{br}")
}

/// Minutes and seconds, rounded to the nearest second: `3:07`.
pub fn time_display(duration: Duration) -> String {
    let seconds = (duration.as_millis() + 500) / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// `A1. Title – Artist (3:07)`, label right-aligned to `label_width`.
pub fn track_line(track: &Track, sides: &MediumSides, separator: &str, label_width: usize) -> String {
    let label = sides.position_of(track.track_number).to_string();
    format!(
        "{label:>label_width$}. {}{separator}{} ({})",
        track.title,
        track.display_artist(),
        time_display(track.duration)
    )
}

/// The track lines of one medium, without any heading.
pub fn medium_tracklist(medium: &Medium, sides: &MediumSides, separator: &str) -> String {
    let label_width = medium
        .tracks()
        .iter()
        .map(|t| sides.position_of(t.track_number).to_string().chars().count())
        .max()
        .unwrap_or(0);
    medium
        .tracks()
        .iter()
        .map(|t| track_line(t, sides, separator, label_width))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn release_title(release: &Release, separator: &str) -> String {
    format!("{}{separator}{}", release.album_artist, release.album)
}

pub fn medium_title(medium: &Medium) -> String {
    let count = medium.track_count();
    format!(
        "Medium #{} ({} track{}, total length {})",
        medium.disc_number,
        count,
        if count == 1 { "" } else { "s" },
        time_display(medium.total_length())
    )
}

/// Render the whole release: a double box for the release, a single box per
/// medium and one line per track.
///
/// `sides_for` decides how each medium's tracks are distributed over sides.
pub fn render_release<F>(release: &Release, separator: &str, mut sides_for: F) -> String
where
    F: FnMut(&Medium) -> MediumSides,
{
    let mut blocks = vec![heading(&release_title(release, separator), BoxStyle::Double)];
    for medium in release.media() {
        let sides = sides_for(medium);
        blocks.push(heading(&medium_title(medium), BoxStyle::Single));
        blocks.push(medium_tracklist(medium, &sides, separator));
    }
    blocks.join("\n")
}
