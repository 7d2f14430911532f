//! Decoding of raw radar swath fields for regridding.
//!
//! Raw products store scaled integers with missing and fill markers. This
//! crate turns them into `f32` fields with NaN for invalid samples, builds
//! the along-track time axis and bundles everything into a [`Swath`] that
//! the `swath-regrid` kernel can consume.

pub mod cloud_class;
pub mod encoding;
pub mod error;
pub mod geolocation;
pub mod swath;

pub use cloud_class::{class_field, class_indicator, decode_scenarios, CloudClass};
pub use encoding::FieldEncoding;
pub use error::{FieldError, FieldResult};
pub use geolocation::{
    clamp_surface_elevation, parse_start_time, profile_seconds, profile_times, seconds_since,
    START_TIME_FORMAT,
};
pub use swath::Swath;
