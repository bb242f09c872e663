//! Verification diagnostics and the per-cruise report.

use std::fmt;

use serde::Serialize;

/// How bad a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// Single-letter code used in diagnostic lines.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Warning => 'W',
            Self::Error => 'E',
        }
    }
}

/// One failed header check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// The fix is known for certain (`Y`) rather than a guess (`?`).
    pub certain: bool,
    pub severity: Severity,
    /// Header record (sequence) number the item lives in.
    pub record: u8,
    /// Check number within that record.
    pub item: u8,
    /// Position within a list-valued item, for ten-degree identifiers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, record: u8, item: u8, message: impl Into<String>) -> Self {
        Self {
            certain: false,
            severity,
            record,
            item,
            entry: None,
            message: message.into(),
        }
    }

    pub fn error(record: u8, item: u8, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, record, item, message)
    }

    pub fn warning(record: u8, item: u8, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, record, item, message)
    }

    #[must_use]
    pub fn certain(mut self) -> Self {
        self.certain = true;
        self
    }

    #[must_use]
    pub fn at_entry(mut self, entry: usize) -> Self {
        self.entry = Some(entry);
        self
    }

    /// Error code without the cruise, e.g. `H11-02`.
    #[must_use]
    pub fn code(&self) -> String {
        match self.entry {
            Some(entry) => format!("H{:02}-{:02}-{entry:02}", self.record, self.item),
            None => format!("H{:02}-{:02}", self.record, self.item),
        }
    }

    /// Full diagnostic line for cruise `ngdc_id`.
    #[must_use]
    pub fn line(&self, ngdc_id: &str) -> String {
        format!(
            "{}-{}-{ngdc_id}-{}: {}",
            if self.certain { 'Y' } else { '?' },
            self.severity.letter(),
            self.code(),
            self.message
        )
    }
}

/// Which diagnostics are kept in the report. Counts always include all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verbosity {
    pub warnings: bool,
    pub errors: bool,
}

impl Default for Verbosity {
    fn default() -> Self {
        Self {
            warnings: true,
            errors: true,
        }
    }
}

impl Verbosity {
    #[must_use]
    pub const fn keeps(self, severity: Severity) -> bool {
        match severity {
            Severity::Warning => self.warnings,
            Severity::Error => self.errors,
        }
    }
}

/// Result of verifying one cruise header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerificationReport {
    pub ngdc_id: String,
    pub warnings: usize,
    pub errors: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl VerificationReport {
    pub fn new(ngdc_id: impl Into<String>) -> Self {
        Self {
            ngdc_id: ngdc_id.into(),
            ..Self::default()
        }
    }

    /// Count `diagnostic` and keep it if `verbosity` allows.
    pub fn push(&mut self, diagnostic: Diagnostic, verbosity: Verbosity) {
        match diagnostic.severity {
            Severity::Warning => self.warnings += 1,
            Severity::Error => self.errors += 1,
        }
        if verbosity.keeps(diagnostic.severity) {
            self.diagnostics.push(diagnostic);
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.warnings + self.errors
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Diagnostic lines followed by a summary line.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for d in &self.diagnostics {
            out.push_str(&d.line(&self.ngdc_id));
            out.push('\n');
        }
        out.push_str(&self.to_string());
        out.push('\n');
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} warnings, {} errors",
            self.ngdc_id, self.warnings, self.errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let d = Diagnostic::error(11, 2, "Invalid Topmost Latitude : (45) [+46]");
        assert_eq!(d.line("01010047"), "?-E-01010047-H11-02: Invalid Topmost Latitude : (45) [+46]");
        let d = Diagnostic::warning(16, 6, "x").certain();
        assert_eq!(d.line("A"), "Y-W-A-H16-06: x");
        let d = Diagnostic::error(16, 3, "y").at_entry(2);
        assert_eq!(d.code(), "H16-03-02");
    }

    #[test]
    fn test_verbosity_filters_but_counts() {
        let mut report = VerificationReport::new("X");
        let quiet = Verbosity {
            warnings: false,
            errors: true,
        };
        report.push(Diagnostic::warning(13, 10, "w"), quiet);
        report.push(Diagnostic::error(1, 3, "e"), quiet);
        assert_eq!((report.warnings, report.errors, report.total()), (1, 1, 2));
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.has_errors());
    }
}
