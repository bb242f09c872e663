//! Verification of MGD77 headers against the records they describe.
//!
//! # Module Organization
//!
//! - [`meta`]: bounding box, cruise dates and ten-degree boxes from the data
//! - [`header`]: the header checks, grouped by header record
//! - [`diagnostic`]: diagnostics, severities and the per-cruise report

pub mod diagnostic;
pub mod header;
pub mod meta;

pub use diagnostic::{Diagnostic, Severity, VerificationReport, Verbosity};
pub use header::HeaderVerifier;
pub use meta::compute_meta;
