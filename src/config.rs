//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive scanning, tracklist
//! rendering and renaming, and helpers to load them from disk.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
