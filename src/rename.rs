//! Renaming audio files after their medium side positions.

mod filename;
mod plan;

pub use filename::{NamingOptions, is_valid_file_name_char, suggested_file_name};
pub use plan::RenamingPlan;
