//! Footprint estimation for source samples.
//!
//! Each sample is assigned the stretch of destination cells between the
//! midpoints to its neighbors, independently along each axis. Samples on the
//! edge of the swath get an open-ended bound (`-1` below, the cell count
//! above) so they are not under-weighted. When the midpoint footprint is
//! narrower than one destination cell, it collapses onto the sample's own
//! coordinate so the sample still lands in one cell.
//!
//! Continuous bounds are turned into cell indices with `trunc(v + 0.5)` for
//! the first cell and `trunc(v + 1.5)` for the exclusive end. `trunc` rounds
//! toward zero, so this is round-half-up for non-negative bounds but maps
//! `-1.0` to cell `0` rather than `-1`. The open lower edge therefore always
//! starts at the first cell. This rounding is part of the output contract.

use std::ops::Range;

use crate::types::{DestinationGrid, SourceGrid};

/// Continuous footprint bounds along one axis, in destination cell units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub lower: f64,
    pub upper: f64,
}

impl AxisBounds {
    /// Estimate the footprint of `current` given its neighbors.
    ///
    /// `prev`/`next` are `None` at the edges of the source axis. `origin` and
    /// `step` describe the destination axis, `cells` is its cell count.
    pub fn from_neighbors(
        prev: Option<f32>,
        current: f32,
        next: Option<f32>,
        origin: f64,
        step: f64,
        cells: usize,
    ) -> Self {
        let current = current as f64;
        let to_cells = |coord: f64| (coord - origin) / step;

        let lower = match prev {
            Some(p) => to_cells((p as f64 + current) / 2.0),
            None => -1.0,
        };
        let upper = match next {
            Some(n) => to_cells((n as f64 + current) / 2.0),
            None => cells as f64,
        };

        if upper - lower < 1.0 {
            let own = to_cells(current);
            return Self {
                lower: own,
                upper: own,
            };
        }

        Self { lower, upper }
    }

    /// Estimate the footprint of element `idx` of a coordinate sequence.
    #[inline]
    pub fn along(coords: &[f32], idx: usize, origin: f64, step: f64, cells: usize) -> Self {
        let prev = idx.checked_sub(1).map(|k| coords[k]);
        let next = coords.get(idx + 1).copied();
        Self::from_neighbors(prev, coords[idx], next, origin, step, cells)
    }

    /// Materialize the bounds as a span of destination indices.
    ///
    /// Returns `None` when either bound is not finite (a NaN coordinate), in
    /// which case the sample covers no cell.
    #[inline]
    pub fn span(&self) -> Option<IndexSpan> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return None;
        }
        Some(IndexSpan {
            start: (self.lower + 0.5).trunc() as i64,
            end: (self.upper + 0.5 + 1.0).trunc() as i64,
        })
    }

    /// Destination indices covered on an axis with `cells` cells.
    #[inline]
    pub fn cells(&self, cells: usize) -> Range<usize> {
        match self.span() {
            Some(span) => span.clip(cells),
            None => 0..0,
        }
    }
}

/// Half-open span of destination indices, possibly outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpan {
    pub start: i64,
    pub end: i64,
}

impl IndexSpan {
    /// Intersect with `[0, cells)`.
    #[inline]
    pub fn clip(&self, cells: usize) -> Range<usize> {
        let limit = i64::try_from(cells).unwrap_or(i64::MAX);
        let start = self.start.clamp(0, limit);
        let end = self.end.clamp(start, limit);
        start as usize..end as usize
    }

    /// Number of indices in the span, ignoring grid bounds.
    pub fn len(&self) -> usize {
        (self.end - self.start).max(0) as usize
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Destination rows covered by profile `i`.
#[inline]
pub fn profile_cells(source: &SourceGrid<'_>, dest: &DestinationGrid, i: usize) -> Range<usize> {
    AxisBounds::along(source.x(), i, dest.x_min, dest.x_step(), dest.nx).cells(dest.nx)
}

/// Destination columns covered by sample `j` of a profile's coordinates.
#[inline]
pub fn level_cells(profile_z: &[f32], dest: &DestinationGrid, j: usize) -> Range<usize> {
    AxisBounds::along(profile_z, j, dest.z_min, dest.z_step(), dest.nz).cells(dest.nz)
}
