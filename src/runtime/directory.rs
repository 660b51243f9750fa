use std::env;
use std::path::{Path, PathBuf};

/// File manager script hosts pass the selection in this variable, one path per line.
pub const SELECTED_PATHS_VAR: &str = "NAUTILUS_SCRIPT_SELECTED_FILE_PATHS";

/// First directory among newline-separated `selected` paths.
pub fn first_selected_directory(selected: &str) -> Option<PathBuf> {
    selected
        .lines()
        .filter(|line| !line.is_empty())
        .map(Path::new)
        .find(|p| p.is_dir())
        .map(Path::to_path_buf)
}

/// The release directory: explicit argument, file manager selection, or the
/// current directory.
pub fn resolve(explicit: Option<PathBuf>) -> std::io::Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = env::var(SELECTED_PATHS_VAR)
        .ok()
        .as_deref()
        .and_then(first_selected_directory)
    {
        return Ok(dir);
    }
    env::current_dir()
}
