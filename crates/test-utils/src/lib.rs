//! Shared test utilities for the swath regridding workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic swath generators
//! - Common test fixtures
//! - Approximate equality macros for grids that contain NaN
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{create_curtain_swath, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// True when both values are missing (NaN), or both are present and no
/// more than `epsilon` apart.
pub fn values_match(left: f64, right: f64, epsilon: f64) -> bool {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => true,
        (false, false) => (left - right).abs() <= epsilon,
        _ => false,
    }
}

/// Compare two grids cell by cell with [`values_match`].
///
/// Returns the index and both values of the first mismatch.
pub fn first_grid_mismatch(left: &[f32], right: &[f32], epsilon: f32) -> Option<(usize, f32, f32)> {
    if left.len() != right.len() {
        return Some((left.len().min(right.len()), f32::NAN, f32::NAN));
    }
    left.iter()
        .zip(right)
        .enumerate()
        .find(|(_, (&a, &b))| !values_match(a as f64, b as f64, epsilon as f64))
        .map(|(idx, (a, b))| (idx, *a, *b))
}

/// Assert that two scalars match under [`values_match`].
///
/// A missing value only matches another missing value.
///
/// ```
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(12.5f32, 12.5001, 1e-3);
/// assert_approx_eq!(f32::NAN, f64::NAN, 0.0);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right) = ($left as f64, $right as f64);
        let epsilon = $epsilon as f64;
        if !$crate::values_match(left, right, epsilon) {
            panic!(
                "values differ by more than {}\n  left: `{:?}`,\n right: `{:?}`",
                epsilon, left, right
            );
        }
    }};
}

/// Macro for approximate equality of two grids, where NaN only matches NaN.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_grid_approx_eq;
///
/// assert_grid_approx_eq!(&[1.0, f32::NAN], &[1.0001, f32::NAN], 0.001);
/// ```
#[macro_export]
macro_rules! assert_grid_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        if let Some((idx, l, r)) = $crate::first_grid_mismatch($left, $right, $epsilon) {
            panic!(
                "assertion failed: grids differ at index {}\n  left: `{:?}`,\n right: `{:?}`",
                idx, l, r
            );
        }
    }};
}
