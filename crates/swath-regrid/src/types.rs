//! Core types for swath regridding.

use serde::{Deserialize, Serialize};

use crate::error::{RegridError, Result};

/// Value written to output cells that received no valid sample.
pub const MISSING: f32 = f32::NAN;

/// Returns true if a value is the missing-data sentinel.
#[inline]
pub fn is_missing(value: f32) -> bool {
    value.is_nan()
}

/// Largest cell count accepted along one destination axis.
///
/// Footprint indices are signed, so every cell index must fit in `i64`.
pub const MAX_CELLS_PER_AXIS: usize = i64::MAX as usize;

/// A borrowed view of swath samples on a curvilinear grid.
///
/// The grid has `width` profiles (rows), each with `height` samples. The
/// first axis is described by one coordinate per profile (`x`), the second
/// by one coordinate per sample (`z`), so the second axis may bend from
/// profile to profile. Profiles shorter than `height` are padded with NaN.
///
/// All arrays are row-major: sample `(i, j)` lives at `i * height + j`.
#[derive(Debug, Clone, Copy)]
pub struct SourceGrid<'a> {
    data: &'a [f32],
    x: &'a [f32],
    z: &'a [f32],
    width: usize,
    height: usize,
}

impl<'a> SourceGrid<'a> {
    /// Create a source grid view, checking that all arrays agree in shape.
    pub fn new(
        data: &'a [f32],
        x: &'a [f32],
        z: &'a [f32],
        width: usize,
        height: usize,
    ) -> Result<Self> {
        // A shape whose size overflows cannot match any slice.
        let samples = width
            .checked_mul(height)
            .ok_or_else(|| RegridError::shape_mismatch("data", usize::MAX, data.len()))?;
        if data.len() != samples {
            return Err(RegridError::shape_mismatch("data", samples, data.len()));
        }
        if x.len() != width {
            return Err(RegridError::shape_mismatch("x", width, x.len()));
        }
        if z.len() != data.len() {
            return Err(RegridError::shape_mismatch("z", data.len(), z.len()));
        }

        Ok(Self {
            data,
            x,
            z,
            width,
            height,
        })
    }

    /// Number of profiles (rows).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of samples per profile (columns).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the grid holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// First-axis coordinates, one per profile.
    pub fn x(&self) -> &'a [f32] {
        self.x
    }

    /// Sample values of profile `i`.
    #[inline]
    pub fn profile(&self, i: usize) -> &'a [f32] {
        &self.data[i * self.height..(i + 1) * self.height]
    }

    /// Second-axis coordinates of profile `i`.
    #[inline]
    pub fn profile_z(&self, i: usize) -> &'a [f32] {
        &self.z[i * self.height..(i + 1) * self.height]
    }

    /// Number of samples that are not the missing sentinel.
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|v| !is_missing(**v)).count()
    }
}

/// A uniform rectangular destination grid.
///
/// Cells along the first axis span `[x_min, x_max)` in `nx` equal steps, cells
/// along the second axis span `[z_min, z_max)` in `nz` equal steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DestinationGrid {
    pub x_min: f64,
    pub x_max: f64,
    pub nx: usize,
    pub z_min: f64,
    pub z_max: f64,
    pub nz: usize,
}

impl DestinationGrid {
    /// Create a destination grid, validating bounds and cell counts.
    pub fn new(x_min: f64, x_max: f64, nx: usize, z_min: f64, z_max: f64, nz: usize) -> Result<Self> {
        let grid = Self {
            x_min,
            x_max,
            nx,
            z_min,
            z_max,
            nz,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Validate the destination grid.
    pub fn validate(&self) -> Result<()> {
        if self.nx == 0 {
            return Err(RegridError::config("nx must be > 0"));
        }
        if self.nz == 0 {
            return Err(RegridError::config("nz must be > 0"));
        }
        if self.nx > MAX_CELLS_PER_AXIS || self.nz > MAX_CELLS_PER_AXIS {
            return Err(RegridError::config(format!(
                "cell counts must not exceed {} per axis",
                MAX_CELLS_PER_AXIS
            )));
        }
        if self.nx.checked_mul(self.nz).is_none() {
            return Err(RegridError::config(format!(
                "grid of {} x {} cells is too large",
                self.nx, self.nz
            )));
        }
        if !self.x_min.is_finite() || !self.x_max.is_finite() {
            return Err(RegridError::config("x bounds must be finite"));
        }
        if !self.z_min.is_finite() || !self.z_max.is_finite() {
            return Err(RegridError::config("z bounds must be finite"));
        }
        if self.x_max <= self.x_min {
            return Err(RegridError::config(format!(
                "x_max ({}) must be greater than x_min ({})",
                self.x_max, self.x_min
            )));
        }
        if self.z_max <= self.z_min {
            return Err(RegridError::config(format!(
                "z_max ({}) must be greater than z_min ({})",
                self.z_max, self.z_min
            )));
        }
        Ok(())
    }

    /// Cell size along the first axis.
    #[inline]
    pub fn x_step(&self) -> f64 {
        (self.x_max - self.x_min) / self.nx as f64
    }

    /// Cell size along the second axis.
    #[inline]
    pub fn z_step(&self) -> f64 {
        (self.z_max - self.z_min) / self.nz as f64
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.nx * self.nz
    }

    /// Center coordinate of first-axis cell `n`.
    pub fn x_center(&self, n: usize) -> f64 {
        self.x_min + (n as f64 + 0.5) * self.x_step()
    }

    /// Center coordinate of second-axis cell `m`.
    pub fn z_center(&self, m: usize) -> f64 {
        self.z_min + (m as f64 + 0.5) * self.z_step()
    }
}

/// Regridded values on a [`DestinationGrid`].
///
/// Values are row-major: cell `(n, m)` lives at `n * nz + m`. Cells that no
/// valid sample reached hold [`MISSING`] and must not be read as zero.
#[derive(Debug, Clone)]
pub struct OutputGrid {
    pub nx: usize,
    pub nz: usize,
    /// Mean of the samples that reached each cell.
    pub values: Vec<f32>,
    /// Number of samples that reached each cell.
    pub counts: Vec<u32>,
}

impl OutputGrid {
    /// Value of cell `(n, m)`.
    #[inline]
    pub fn get(&self, n: usize, m: usize) -> f32 {
        self.values[n * self.nz + m]
    }

    /// Number of samples averaged into cell `(n, m)`.
    #[inline]
    pub fn count(&self, n: usize, m: usize) -> u32 {
        self.counts[n * self.nz + m]
    }

    /// Values of first-axis row `n`.
    pub fn row(&self, n: usize) -> &[f32] {
        &self.values[n * self.nz..(n + 1) * self.nz]
    }

    /// Number of cells holding data.
    pub fn valid_count(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Fraction of cells holding data, in [0, 1].
    pub fn coverage(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.valid_count() as f64 / self.values.len() as f64
    }

    /// Min and max over cells holding data.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.values
            .iter()
            .filter(|v| !is_missing(**v))
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_grid_shape_checks() {
        let data = vec![0.0f32; 6];
        let x = vec![0.0f32; 2];
        let z = vec![0.0f32; 6];

        let grid = SourceGrid::new(&data, &x, &z, 2, 3).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.profile(1).len(), 3);

        let err = SourceGrid::new(&data, &x[..1], &z, 2, 3).unwrap_err();
        assert_eq!(err, RegridError::shape_mismatch("x", 2, 1));

        let err = SourceGrid::new(&data, &x, &z[..5], 2, 3).unwrap_err();
        assert_eq!(err, RegridError::shape_mismatch("z", 6, 5));

        let err = SourceGrid::new(&data[..4], &x, &z[..4], 2, 3).unwrap_err();
        assert!(matches!(err, RegridError::ShapeMismatch { array: "data", .. }));
    }

    #[test]
    fn test_destination_validation() {
        assert!(DestinationGrid::new(0.0, 2.0, 2, 0.0, 2.0, 2).is_ok());
        assert!(DestinationGrid::new(0.0, 2.0, 0, 0.0, 2.0, 2).is_err());
        assert!(DestinationGrid::new(0.0, 2.0, 2, 0.0, 2.0, 0).is_err());
        assert!(DestinationGrid::new(2.0, 2.0, 2, 0.0, 2.0, 2).is_err());
        assert!(DestinationGrid::new(0.0, 2.0, 2, 3.0, 2.0, 2).is_err());
        assert!(DestinationGrid::new(f64::NAN, 2.0, 2, 0.0, 2.0, 2).is_err());
    }

    #[test]
    fn test_overflowing_source_shape_is_shape_error() {
        let err = SourceGrid::new(&[], &[0.0, 1.0], &[], 2, 1 << 63).unwrap_err();
        assert!(matches!(err, RegridError::ShapeMismatch { array: "data", .. }));

        let err = SourceGrid::new(&[], &[], &[], usize::MAX, 2).unwrap_err();
        assert!(matches!(err, RegridError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_oversized_destination_is_config_error() {
        let too_many_cells = DestinationGrid::new(0.0, 1.0, 1 << 63, 0.0, 1.0, 2);
        assert!(matches!(too_many_cells, Err(RegridError::Config(_))));

        let overflowing = DestinationGrid::new(0.0, 1.0, 1 << 40, 0.0, 1.0, 1 << 40);
        assert!(matches!(overflowing, Err(RegridError::Config(_))));

        // Large but representable is accepted.
        assert!(DestinationGrid::new(0.0, 1.0, 1 << 20, 0.0, 1.0, 1 << 20).is_ok());
    }

    #[test]
    fn test_destination_steps() {
        let grid = DestinationGrid::new(-1.0, 3.0, 8, 0.0, 10.0, 5).unwrap();
        assert_eq!(grid.x_step(), 0.5);
        assert_eq!(grid.z_step(), 2.0);
        assert_eq!(grid.cell_count(), 40);
        assert_eq!(grid.x_center(0), -0.75);
        assert_eq!(grid.z_center(4), 9.0);
    }

    #[test]
    fn test_output_grid_accessors() {
        let out = OutputGrid {
            nx: 2,
            nz: 2,
            values: vec![1.0, MISSING, 3.0, 5.0],
            counts: vec![1, 0, 2, 1],
        };
        assert_eq!(out.get(1, 0), 3.0);
        assert_eq!(out.count(1, 0), 2);
        assert_eq!(out.row(1), &[3.0, 5.0]);
        assert_eq!(out.valid_count(), 3);
        assert_eq!(out.coverage(), 0.75);
        assert_eq!(out.value_range(), Some((1.0, 5.0)));
    }
}
