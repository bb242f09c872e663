//! Physical models used to recompute and check MGD77 derived fields.
//!
//! # Module Organization
//!
//! - [`igrf`]: International Geomagnetic Reference Field synthesis
//! - [`reffield`]: magnetic reference fields named by header code
//! - [`carter`]: Carter echo-sounding correction tables
//! - [`gravity`]: theoretical gravity formulas
//! - [`corrtable`]: ephemeral correction tables
//! - [`track`]: distance, course and speed along a track

pub mod carter;
pub mod corrtable;
pub mod gravity;
pub mod igrf;
mod igrf_coeffs;
pub mod reffield;
pub mod track;

pub use carter::CarterTable;
pub use corrtable::{Aux, Correction, CorrectionTable, Term, Variable};
pub use gravity::{GravityFormula, theoretical_gravity};
pub use igrf::{FieldComponents, magnetic_anomaly};
pub use reffield::ReferenceField;
pub use track::DistanceUnit;
