//! Data model for MGD77 and MGD77+ marine geophysical track-line files.
//!
//! # Module Organization
//!
//! - [`fields`]: the 31 canonical punch-card fields and their bit masks
//! - [`params`]: the 73 header items of the 24 header records
//! - [`codec`]: scale/offset encoding to narrow storage types
//! - [`columns`]: per-file catalog of legacy and extended columns
//! - [`header`]: header parameters, derived metadata and catalog
//! - [`record`]: one decoded data record and the legacy record rewrite
//! - [`dataset`]: column-oriented values of a whole file
//! - [`selection`]: column selection strings and record filters
//! - [`time`]: absolute-time helpers

pub mod codec;
pub mod columns;
pub mod dataset;
pub mod error;
pub mod fields;
pub mod header;
pub mod params;
pub mod record;
pub mod selection;
pub mod time;

pub use columns::{Adjust, Catalog, ColumnInfo, ColumnRef, ColumnSet, SetId};
pub use dataset::{ColumnValues, Dataset};
pub use error::{Mgd77Error, Result};
pub use header::{Header, Meta, ParamSet};
pub use params::HeaderParams;
pub use record::DataRecord;
pub use selection::{RecordFilter, Selection};
