//! The four on-disk representations of an MGD77 cruise.

use std::fmt;
use std::path::Path;

use mgd77_core::{Mgd77Error, Result};

/// Wire format of a cruise file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Fixed-width 120-character punch-card records.
    #[default]
    M77,
    /// MGD77+ netCDF container.
    Cdf,
    /// Tab-delimited table with the punch-card field order.
    Tbl,
    /// Tab-delimited MGD77T.
    M77t,
}

impl Format {
    /// Every format, in search priority order.
    pub const ALL: [Format; 4] = [Format::M77, Format::Cdf, Format::Tbl, Format::M77t];

    /// File suffix, without the dot.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::M77 => "mgd77",
            Self::Cdf => "nc",
            Self::Tbl => "dat",
            Self::M77t => "m77t",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::M77 => "MGD77",
            Self::Cdf => "MGD77+",
            Self::Tbl => "TBL",
            Self::M77t => "MGD77T",
        }
    }

    /// True for the formats that carry the three quality-code columns.
    #[must_use]
    pub const fn has_quality_codes(self) -> bool {
        matches!(self, Self::M77t)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::M77 => 0,
            Self::Cdf => 1,
            Self::Tbl => 2,
            Self::M77t => 3,
        }
    }

    /// Format whose suffix is exactly `suffix`.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.suffix() == suffix)
    }

    /// Format implied by the extension of `path`, if any.
    #[must_use]
    pub fn of_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_suffix)
    }

    /// Parse a user-facing format selector.
    ///
    /// Accepts the suffixes plus `m77`, `tbl`, `cdf` and `mgd77+`,
    /// case-insensitive.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::UnknownFormat`] for anything else.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "m77" | "mgd77" => Ok(Self::M77),
            "nc" | "cdf" | "mgd77+" => Ok(Self::Cdf),
            "dat" | "tbl" => Ok(Self::Tbl),
            "m77t" | "mgd77t" => Ok(Self::M77t),
            _ => Err(Mgd77Error::UnknownFormat {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Format {
    type Err = Mgd77Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Formats a reader is allowed to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSet {
    allowed: [bool; 4],
}

impl Default for FormatSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FormatSet {
    /// Every format allowed.
    #[must_use]
    pub const fn all() -> Self {
        Self { allowed: [true; 4] }
    }

    /// Only the listed formats allowed.
    #[must_use]
    pub fn only(formats: &[Format]) -> Self {
        let mut set = Self { allowed: [false; 4] };
        for f in formats {
            set.allowed[f.index()] = true;
        }
        set
    }

    /// Same set with `format` refused.
    #[must_use]
    pub const fn without(mut self, format: Format) -> Self {
        self.allowed[format.index()] = false;
        self
    }

    #[must_use]
    pub const fn contains(&self, format: Format) -> bool {
        self.allowed[format.index()]
    }

    /// Allowed formats in search priority order.
    pub fn iter(&self) -> impl Iterator<Item = Format> + '_ {
        Format::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_roundtrip() {
        for f in Format::ALL {
            assert_eq!(Format::from_suffix(f.suffix()), Some(f));
        }
        assert_eq!(Format::of_path(Path::new("/data/01010047.nc")), Some(Format::Cdf));
        assert_eq!(Format::of_path(Path::new("01010047")), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Format::from_name("M77").unwrap(), Format::M77);
        assert_eq!("dat".parse::<Format>().unwrap(), Format::Tbl);
        assert!(matches!(
            Format::from_name("xyz"),
            Err(Mgd77Error::UnknownFormat { .. })
        ));
    }

    #[test]
    fn test_format_set() {
        let set = FormatSet::all().without(Format::M77).without(Format::Tbl);
        assert_eq!(set.iter().collect::<Vec<_>>(), [Format::Cdf, Format::M77t]);
        assert!(FormatSet::only(&[Format::Tbl]).contains(Format::Tbl));
        assert!(!FormatSet::only(&[Format::Tbl]).contains(Format::Cdf));
    }
}
