//! Backend cross-check for the swath regridder.
//!
//! This crate provides tools to:
//! - Generate synthetic curtain and irregular swaths
//! - Regrid them with the reference and accelerated backends
//! - Verify identical counts and matching means, and report timings

pub mod check;
pub mod config;
pub mod report;

pub use check::{compare, covering_destination, generate_swath, run_check, CheckResults};
pub use config::{CheckRequest, SwathKind, SwathShape};
pub use report::ResultsReport;
