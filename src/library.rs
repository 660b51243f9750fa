//! Reading a release from an album directory.
//!
//! Tracks are read with `lofty`, grouped into media by disc number, and
//! rendered as an aligned tracklist with side labels.

mod display;
#[cfg(test)]
pub(crate) mod fixtures;
mod model;
mod scan;
mod sides;
mod tags;

pub use display::{
    BoxStyle, heading, medium_title, medium_tracklist, release_title, render_release, time_display,
};
pub use model::*;
pub use scan::read_release;
pub use sides::MediumSides;
pub use tags::{EncodingPolicy, write_repairs};
