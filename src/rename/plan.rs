use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, error};

use crate::error::RenameError;

/// Outcome of [`RenamingPlan::execute`].
#[derive(Debug, Default)]
pub struct RenamingResult {
    pub renamed: Vec<(PathBuf, PathBuf)>,
    pub conflicts: Vec<PathBuf>,
    pub errors: Vec<(PathBuf, io::Error)>,
}

impl RenamingResult {
    pub fn is_success(&self) -> bool {
        self.conflicts.is_empty() && self.errors.is_empty()
    }
}

impl fmt::Display for RenamingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files renamed, {} conflicts, {} errors",
            self.renamed.len(),
            self.conflicts.len(),
            self.errors.len()
        )
    }
}

/// Planned renames of files in place, keyed by canonical source path.
#[derive(Debug, Default)]
pub struct RenamingPlan {
    unchanged: BTreeSet<PathBuf>,
    planned: BTreeMap<PathBuf, PathBuf>,
}

impl RenamingPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan renaming `source` to `target_name` within the same directory.
    pub fn add(&mut self, source: &Path, target_name: &str) -> Result<(), RenameError> {
        if !source.is_file() {
            return Err(RenameError::NotAFile(source.to_path_buf()));
        }
        let source = source.canonicalize().map_err(|e| RenameError::Resolve {
            path: source.to_path_buf(),
            source: e,
        })?;
        let target = source.with_file_name(target_name);

        if self.unchanged.contains(&source) || self.planned.contains_key(&source) {
            return Err(RenameError::DuplicateSource(source));
        }
        if self.unchanged.contains(&target) || self.planned.values().any(|t| t == &target) {
            return Err(RenameError::DuplicateTarget(target));
        }
        if source == target {
            self.unchanged.insert(source);
            return Ok(());
        }
        self.planned.insert(source, target);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.planned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planned.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.planned.iter().map(|(s, t)| (s.as_path(), t.as_path()))
    }

    /// Targets that already exist on disk.
    pub fn conflicts(&self) -> BTreeSet<PathBuf> {
        self.planned
            .values()
            .filter(|t| t.exists())
            .cloned()
            .collect()
    }

    /// Rename all planned files.
    ///
    /// Existing targets that are not listed in `overwrite_allowed` and are not
    /// themselves renamed away abort the whole plan. Targets that are renamed
    /// away are resolved by moving every file through a temporary directory
    /// next to it first.
    pub fn execute(self, overwrite_allowed: &BTreeSet<PathBuf>) -> RenamingResult {
        let mut result = RenamingResult::default();
        let remaining: BTreeSet<PathBuf> = self
            .conflicts()
            .into_iter()
            .filter(|p| !overwrite_allowed.contains(p))
            .collect();

        if remaining.is_empty() {
            for (source, target) in self.planned {
                debug!(from = %source.display(), to = %target.display(), "renaming");
                match std::fs::rename(&source, &target) {
                    Ok(()) => result.renamed.push((source, target)),
                    Err(e) => result.errors.push((source, e)),
                }
            }
            return result;
        }

        let unresolvable: Vec<PathBuf> = remaining
            .into_iter()
            .filter(|p| !self.planned.contains_key(p))
            .collect();
        if !unresolvable.is_empty() {
            result.conflicts = unresolvable;
            return result;
        }

        self.execute_two_pass(result)
    }

    fn execute_two_pass(self, mut result: RenamingResult) -> RenamingResult {
        let mut tempdirs: HashMap<PathBuf, TempDir> = HashMap::new();
        let mut staged: Vec<(PathBuf, PathBuf, PathBuf)> = Vec::new();
        // Sources still sitting at their original path.
        let mut occupied: BTreeSet<PathBuf> = BTreeSet::new();

        for (source, target) in self.planned {
            let (Some(parent), Some(name)) = (source.parent(), source.file_name()) else {
                continue;
            };
            let parent = parent.to_path_buf();
            if !tempdirs.contains_key(&parent) {
                match TempDir::new_in(&parent) {
                    Ok(dir) => {
                        tempdirs.insert(parent.clone(), dir);
                    }
                    Err(e) => {
                        occupied.insert(source.clone());
                        result.errors.push((source, e));
                        continue;
                    }
                }
            }
            let intermediate = tempdirs[&parent].path().join(name);
            debug!(from = %source.display(), to = %intermediate.display(), "staging");
            match std::fs::rename(&source, &intermediate) {
                Ok(()) => staged.push((source, intermediate, target)),
                Err(e) => {
                    occupied.insert(source.clone());
                    result.errors.push((source, e));
                }
            }
        }

        let mut stranded: BTreeSet<PathBuf> = BTreeSet::new();

        // A staged file whose target is still occupied goes back to its
        // source, which in turn blocks every file headed there.
        loop {
            let (blocked, free): (Vec<_>, Vec<_>) = staged
                .into_iter()
                .partition(|(_, _, target)| occupied.contains(target));
            staged = free;
            if blocked.is_empty() {
                break;
            }
            for (source, intermediate, target) in blocked {
                restore(&intermediate, &source, &mut stranded);
                occupied.insert(source);
                result.conflicts.push(target);
            }
        }

        for (source, intermediate, target) in staged {
            debug!(from = %intermediate.display(), to = %target.display(), "renaming");
            match std::fs::rename(&intermediate, &target) {
                Ok(()) => result.renamed.push((source, target)),
                Err(e) => {
                    restore(&intermediate, &source, &mut stranded);
                    result.errors.push((source, e));
                }
            }
        }

        for parent in stranded {
            if let Some(dir) = tempdirs.remove(&parent) {
                let _ = dir.keep();
            }
        }

        result
    }
}

/// Move a staged file back to `source`, remembering its directory if that fails.
fn restore(intermediate: &Path, source: &Path, stranded: &mut BTreeSet<PathBuf>) {
    if let Err(e) = std::fs::rename(intermediate, source) {
        error!(
            path = %intermediate.display(),
            error = %e,
            "could not move file back, leaving it in place"
        );
        if let Some(parent) = source.parent() {
            stranded.insert(parent.to_path_buf());
        }
    }
}
