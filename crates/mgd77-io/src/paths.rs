//! Locating cruise files and the shared MGD77 data directory.

use std::fs;
use std::path::{Path, PathBuf};

use mgd77_core::{Mgd77Error, Result};
use tracing::{debug, warn};

use crate::format::{Format, FormatSet};

/// Environment variable naming the shared MGD77 directory.
pub const HOME_ENV_VAR: &str = "MGD77_HOME";
/// File in the shared directory listing data directories.
pub const PATHS_FILE: &str = "mgd77_paths.txt";
/// Carter table file in the shared directory.
pub const CARTER_FILE: &str = "carter.d";

/// The shared MGD77 directory.
///
/// Resolution order:
/// 1. `MGD77_HOME` environment variable
/// 2. `share/mgd77` relative to the workspace root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mgd77Home {
    root: PathBuf,
}

impl Mgd77Home {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn from_env() -> Self {
        if let Ok(root) = std::env::var(HOME_ENV_VAR) {
            return Self::new(root);
        }
        Self::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../share/mgd77"))
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn carter_path(&self) -> PathBuf {
        self.root.join(CARTER_FILE)
    }

    #[must_use]
    pub fn paths_file(&self) -> PathBuf {
        self.root.join(PATHS_FILE)
    }

    /// Data directories listed in the paths file, one per line; `#`
    /// comments and blank lines are skipped.
    ///
    /// A missing paths file is not an error: the home directory itself is
    /// the only data directory.
    ///
    /// # Errors
    ///
    /// I/O errors other than the file being absent.
    pub fn data_dirs(&self) -> Result<Vec<PathBuf>> {
        let file = self.paths_file();
        let text = match fs::read_to_string(&file) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %file.display(), "path file for MGD77 files not found; using home directory only");
                return Ok(vec![self.root.clone()]);
            }
            Err(e) => return Err(e.into()),
        };
        Ok(parse_paths(&text))
    }
}

fn parse_paths(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}

fn is_readable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file())
}

/// Turns a cruise identifier into the path of an existing file.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    data_dirs: Vec<PathBuf>,
    allowed: FormatSet,
}

impl PathResolver {
    pub fn new(data_dirs: Vec<PathBuf>) -> Self {
        Self {
            data_dirs,
            allowed: FormatSet::all(),
        }
    }

    /// Resolver over the data directories listed under `home`.
    ///
    /// # Errors
    ///
    /// Propagates [`Mgd77Home::data_dirs`] failures.
    pub fn from_home(home: &Mgd77Home) -> Result<Self> {
        Ok(Self::new(home.data_dirs()?))
    }

    #[must_use]
    pub fn with_allowed(mut self, allowed: FormatSet) -> Self {
        self.allowed = allowed;
        self
    }

    #[must_use]
    pub fn data_dirs(&self) -> &[PathBuf] {
        &self.data_dirs
    }

    /// Candidate paths for `cruise`, in search order.
    ///
    /// A cruise carrying a known suffix is only looked up in that format.
    /// Otherwise every allowed format is tried in priority order. For each
    /// format an absolute path is tried as given; a relative one is tried
    /// in the current directory, then in every data directory.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::FormatDisallowed`] when the suffix names a refused format.
    pub fn candidates(&self, cruise: &str) -> Result<Vec<(PathBuf, Format)>> {
        let given = Path::new(cruise);
        let explicit = Format::of_path(given);
        let formats: Vec<Format> = match explicit {
            Some(f) if !self.allowed.contains(f) => {
                return Err(Mgd77Error::FormatDisallowed { format: f.name() });
            }
            Some(f) => vec![f],
            None => self.allowed.iter().collect(),
        };

        let mut out = Vec::new();
        for format in formats {
            let name = if explicit.is_some() {
                PathBuf::from(cruise)
            } else {
                PathBuf::from(format!("{cruise}.{}", format.suffix()))
            };
            out.push((name.clone(), format));
            if name.is_absolute() {
                continue;
            }
            for dir in &self.data_dirs {
                out.push((dir.join(&name), format));
            }
        }
        Ok(out)
    }

    /// First existing file for `cruise` and its format.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::FileNotFound`] when no candidate exists, or
    /// [`Mgd77Error::FormatDisallowed`] as for [`PathResolver::candidates`].
    pub fn resolve(&self, cruise: &str) -> Result<(PathBuf, Format)> {
        for (path, format) in self.candidates(cruise)? {
            debug!(path = %path.display(), %format, "trying");
            if is_readable(&path) {
                debug!(path = %path.display(), %format, "resolved cruise");
                return Ok((path, format));
            }
        }
        Err(Mgd77Error::FileNotFound {
            path: PathBuf::from(cruise),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths_skips_comments() {
        let dirs = parse_paths("# data\n/a/b\n\n  /c  \n#/d\n");
        assert_eq!(dirs, [PathBuf::from("/a/b"), PathBuf::from("/c")]);
    }

    #[test]
    fn test_candidates_without_suffix() {
        let resolver = PathResolver::new(vec![PathBuf::from("/data")])
            .with_allowed(FormatSet::only(&[Format::M77, Format::Cdf]));
        let c = resolver.candidates("01010047").unwrap();
        assert_eq!(
            c,
            [
                (PathBuf::from("01010047.mgd77"), Format::M77),
                (PathBuf::from("/data/01010047.mgd77"), Format::M77),
                (PathBuf::from("01010047.nc"), Format::Cdf),
                (PathBuf::from("/data/01010047.nc"), Format::Cdf),
            ]
        );
    }

    #[test]
    fn test_candidates_with_suffix() {
        let resolver = PathResolver::new(vec![PathBuf::from("/data")]);
        let c = resolver.candidates("/tmp/x.dat").unwrap();
        assert_eq!(c, [(PathBuf::from("/tmp/x.dat"), Format::Tbl)]);

        let refused = resolver.with_allowed(FormatSet::all().without(Format::Tbl));
        assert!(matches!(
            refused.candidates("x.dat"),
            Err(Mgd77Error::FormatDisallowed { format: "TBL" })
        ));
    }
}
