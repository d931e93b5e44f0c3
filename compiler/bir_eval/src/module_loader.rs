//! Resolving `use "name"` against the standard-library directory.
//!
//! A module is any file in the directory whose stem is `name`, whatever its
//! extension. When several match, the lexicographically first path wins so
//! that resolution does not depend on directory iteration order.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{missing_module, module_load, EvalResult};

/// Find the file for module `name` in `dir`.
pub fn resolve_module(dir: &Path, name: &str) -> EvalResult<PathBuf> {
    let not_found = || missing_module(name, &dir.display().to_string());
    let entries = fs::read_dir(dir).map_err(|_| not_found())?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.file_stem() == Some(OsStr::new(name)))
        .collect();
    candidates.sort();
    candidates.into_iter().next().ok_or_else(not_found)
}

/// Read a resolved module's source.
pub fn read_module(path: &Path, name: &str) -> EvalResult<String> {
    fs::read_to_string(path).map_err(|err| module_load(name, err))
}

/// The path used to recognise a file already being loaded.
pub fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Display name of a loading-stack entry.
pub(crate) fn module_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |stem| stem.to_string_lossy().into_owned())
}
