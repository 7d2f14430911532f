//! Geolocation helpers: profile timestamps and surface elevation.

use chrono::{Duration, NaiveDateTime};

use crate::error::{FieldError, FieldResult};

/// Format of granule start times, e.g. `20060720143000`.
pub const START_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Parse a granule start time in [`START_TIME_FORMAT`].
pub fn parse_start_time(value: &str) -> FieldResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), START_TIME_FORMAT)
        .map_err(|e| FieldError::invalid_timestamp(value, e.to_string()))
}

/// Timestamp of each profile from offsets in seconds since `start`.
///
/// Offsets are rounded to the nearest microsecond.
pub fn profile_times(start: NaiveDateTime, offsets_s: &[f64]) -> FieldResult<Vec<NaiveDateTime>> {
    offsets_s
        .iter()
        .map(|&offset| {
            if !offset.is_finite() {
                return Err(FieldError::invalid_timestamp(
                    offset.to_string(),
                    "profile offset is not finite",
                ));
            }
            let micros = (offset * 1_000_000.0).round() as i64;
            start
                .checked_add_signed(Duration::microseconds(micros))
                .ok_or_else(|| {
                    FieldError::invalid_timestamp(offset.to_string(), "profile time out of range")
                })
        })
        .collect()
}

/// Profile offsets as `f32` seconds, for use as the regridding x axis.
pub fn profile_seconds(offsets_s: &[f64]) -> Vec<f32> {
    offsets_s.iter().map(|&s| s as f32).collect()
}

/// Seconds between `start` and each timestamp.
pub fn seconds_since(start: NaiveDateTime, times: &[NaiveDateTime]) -> Vec<f64> {
    times
        .iter()
        .map(|t| {
            let delta = *t - start;
            delta
                .num_microseconds()
                .map(|us| us as f64 / 1_000_000.0)
                .unwrap_or(delta.num_seconds() as f64)
        })
        .collect()
}

/// Replace negative surface elevations (open water) with zero, in place.
///
/// Returns the number of values changed.
pub fn clamp_surface_elevation(elevation: &mut [f32]) -> usize {
    let mut clamped = 0;
    for v in elevation.iter_mut().filter(|v| **v < 0.0) {
        *v = 0.0;
        clamped += 1;
    }
    clamped
}
