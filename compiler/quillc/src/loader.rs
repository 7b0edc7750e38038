//! Script loading for the CLI.
//!
//! A script path is tried as given, then relative to the working directory
//! and its `src/`, then against up to six ancestor directories. The first
//! existing file wins.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Ancestors of the working directory that are searched.
pub const MAX_ANCESTORS: usize = 6;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot find script '{}'", .path.display())]
    NotFound {
        path: PathBuf,
        /// Every location that was tried, in order.
        searched: Vec<PathBuf>,
    },
    #[error("'{}' contains invalid UTF-8 data", .path.display())]
    InvalidUtf8 { path: PathBuf },
    #[error("error reading '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A loaded script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Script {
    pub path: PathBuf,
    pub source: String,
}

impl Script {
    /// Path for diagnostics.
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// Locations to try for `path`, in order, without duplicates.
pub fn candidate_paths(path: &Path, cwd: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![path.to_path_buf(), cwd.join(path), cwd.join("src").join(path)];

    if let Some(file_name) = path.file_name() {
        for ancestor in cwd.ancestors().skip(1).take(MAX_ANCESTORS) {
            candidates.push(ancestor.join(path));
            candidates.push(ancestor.join(file_name));
            candidates.push(ancestor.join("src").join(file_name));
        }
    }

    let mut unique = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique
}

/// First existing candidate for `path`.
pub fn resolve(path: &Path, cwd: &Path) -> Result<PathBuf, LoadError> {
    let searched = candidate_paths(path, cwd);
    match searched.iter().find(|candidate| candidate.is_file()) {
        Some(found) => {
            debug!(requested = %path.display(), found = %found.display(), "resolved script");
            Ok(found.clone())
        }
        None => Err(LoadError::NotFound {
            path: path.to_path_buf(),
            searched,
        }),
    }
}

/// Resolve and read `path` relative to `cwd`.
pub fn load_from(path: &Path, cwd: &Path) -> Result<Script, LoadError> {
    let found = resolve(path, cwd)?;
    match std::fs::read_to_string(&found) {
        Ok(source) => Ok(Script {
            path: found,
            source,
        }),
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            Err(LoadError::InvalidUtf8 { path: found })
        }
        Err(source) => Err(LoadError::Io {
            path: found,
            source,
        }),
    }
}

/// Resolve and read `path` relative to the current directory.
pub fn load(path: &str) -> Result<Script, LoadError> {
    let cwd = std::env::current_dir().map_err(|source| LoadError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    load_from(Path::new(path), &cwd)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_candidate_order() {
        let cwd = Path::new("/a/b");
        let candidates = candidate_paths(Path::new("x/main.ql"), cwd);
        assert_eq!(
            &candidates[..6],
            &[
                PathBuf::from("x/main.ql"),
                PathBuf::from("/a/b/x/main.ql"),
                PathBuf::from("/a/b/src/x/main.ql"),
                PathBuf::from("/a/x/main.ql"),
                PathBuf::from("/a/main.ql"),
                PathBuf::from("/a/src/main.ql"),
            ]
        );
    }

    #[test]
    fn test_ancestor_search_is_bounded() {
        let cwd = Path::new("/1/2/3/4/5/6/7/8/9");
        let candidates = candidate_paths(Path::new("s.ql"), cwd);
        assert!(candidates.contains(&PathBuf::from("/1/2/3/s.ql")));
        assert!(!candidates.contains(&PathBuf::from("/1/2/s.ql")));
    }

    #[test]
    fn test_absolute_path_deduplicates() {
        let candidates = candidate_paths(Path::new("/abs/s.ql"), Path::new("/w"));
        assert_eq!(candidates[0], PathBuf::from("/abs/s.ql"));
        let count = candidates
            .iter()
            .filter(|c| c.as_path() == Path::new("/abs/s.ql"))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_load_finds_script_in_src() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/game.ql"), "x = 1").unwrap();

        let script = load_from(Path::new("game.ql"), dir.path()).unwrap();
        assert_eq!(script.source, "x = 1");
        assert_eq!(script.path, dir.path().join("src/game.ql"));
    }

    #[test]
    fn test_load_finds_script_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("top.ql"), "1").unwrap();

        let script = load_from(Path::new("top.ql"), &nested).unwrap();
        assert_eq!(script.path, dir.path().join("top.ql"));
    }

    #[test]
    fn test_missing_script_lists_searched_paths() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from(Path::new("missing-script.ql"), dir.path()).unwrap_err();
        match err {
            LoadError::NotFound { path, searched } => {
                assert_eq!(path, PathBuf::from("missing-script.ql"));
                assert!(searched.contains(&dir.path().join("missing-script.ql")));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.ql"), [0xff, 0xfe, 0x00]).unwrap();
        let err = load_from(Path::new("bad.ql"), dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidUtf8 { .. }), "{err:?}");
    }
}
