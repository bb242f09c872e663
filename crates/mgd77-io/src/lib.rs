//! Readers and writers for the four MGD77 file formats.
//!
//! # Module Organization
//!
//! - [`format`]: the format enumeration and administrator format masks
//! - [`paths`]: `MGD77_HOME`, data directories and cruise resolution
//! - [`m77`]: fixed-width punch-card files
//! - [`m77t`]: tab-delimited MGD77T files
//! - [`tbl`]: tab-delimited MGD77 tables
//! - [`cdf`]: MGD77+ netCDF files
//! - [`prep`]: longitude normalization and column scans before writing MGD77+
//! - [`correct`]: derived-field recomputation and correction tables
//! - [`session`]: one open file and the single format dispatch

pub mod cdf;
pub mod correct;
pub mod format;
pub mod m77;
pub mod m77t;
pub mod paths;
pub mod prep;
pub mod session;
pub mod tbl;

pub use format::{Format, FormatSet};
pub use paths::{Mgd77Home, PathResolver};
pub use session::{ReadOptions, Session, output_path, read_dataset, read_header_as, write_dataset};
