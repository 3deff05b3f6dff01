//! Executable lookup on the system search path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Resolves program names to executables on disk.
pub trait ExecutableLookup {
    /// Full path of `program` if it resolves to a real executable.
    fn find_full_path(&self, program: &str) -> Option<PathBuf>;

    /// Check whether `program` resolves at all.
    fn exists(&self, program: &str) -> bool {
        self.find_full_path(program).is_some()
    }
}

/// Lookup over a list of directories, `PATH` by default.
#[derive(Debug, Clone)]
pub struct PathLookup {
    dirs: Vec<PathBuf>,
}

impl PathLookup {
    /// Lookup over the directories of the current `PATH`.
    pub fn from_env() -> Self {
        Self::from_path_var(std::env::var_os("PATH").unwrap_or_default())
    }

    /// Lookup over the directories of a `PATH`-style value.
    pub fn from_path_var(path: impl Into<OsString>) -> Self {
        let path = path.into();
        Self { dirs: std::env::split_paths(&path).filter(|d| !d.as_os_str().is_empty()).collect() }
    }
}

impl Default for PathLookup {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ExecutableLookup for PathLookup {
    fn find_full_path(&self, program: &str) -> Option<PathBuf> {
        if program.is_empty() {
            return None;
        }

        // Names with a separator are taken as paths, not searched for.
        if program.contains(std::path::MAIN_SEPARATOR) || program.contains('/') {
            let candidate = PathBuf::from(program);
            return is_executable(&candidate).then_some(candidate);
        }

        self.dirs.iter().map(|dir| dir.join(program)).find(|candidate| is_executable(candidate))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata().map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0).unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
