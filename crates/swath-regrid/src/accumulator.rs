//! Running sum/count accumulation on the destination grid.

use std::ops::Range;

use crate::footprint::{level_cells, profile_cells};
use crate::types::{is_missing, DestinationGrid, SourceGrid};

/// Per-cell running sums and sample counts.
///
/// Sums are kept in `f64` so that the order in which partitions are merged
/// only affects the result at the last bits of the final `f32` mean.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    nx: usize,
    nz: usize,
    sums: Vec<f64>,
    counts: Vec<u32>,
}

impl Accumulator {
    /// Create a zeroed accumulator for an `nx` x `nz` grid.
    pub fn new(nx: usize, nz: usize) -> Self {
        Self {
            nx,
            nz,
            sums: vec![0.0; nx * nz],
            counts: vec![0; nx * nz],
        }
    }

    /// Create a zeroed accumulator sized for `dest`.
    pub fn for_destination(dest: &DestinationGrid) -> Self {
        Self::new(dest.nx, dest.nz)
    }

    /// Add `value` to every cell in `rows` x `cols`.
    ///
    /// Ranges must already be clipped to the grid.
    #[inline]
    pub fn splat(&mut self, rows: Range<usize>, cols: Range<usize>, value: f32) {
        let value = value as f64;
        for n in rows {
            let base = n * self.nz;
            for m in cols.clone() {
                self.sums[base + m] += value;
                self.counts[base + m] += 1;
            }
        }
    }

    /// Splat every valid sample of profile `i`.
    ///
    /// Footprints of missing samples are still estimated, since they bound
    /// their neighbors' footprints, but contribute nothing.
    pub fn add_profile(&mut self, source: &SourceGrid<'_>, dest: &DestinationGrid, i: usize) {
        let rows = profile_cells(source, dest, i);
        if rows.is_empty() {
            return;
        }

        let values = source.profile(i);
        let coords = source.profile_z(i);

        for (j, &value) in values.iter().enumerate() {
            if is_missing(value) {
                continue;
            }
            let cols = level_cells(coords, dest, j);
            self.splat(rows.clone(), cols, value);
        }
    }

    /// Splat every profile in `profiles`.
    pub fn add_profiles(
        &mut self,
        source: &SourceGrid<'_>,
        dest: &DestinationGrid,
        profiles: Range<usize>,
    ) {
        for i in profiles {
            self.add_profile(source, dest, i);
        }
    }

    /// Merge another partition's accumulator into this one.
    pub fn merge(mut self, other: Accumulator) -> Accumulator {
        debug_assert_eq!((self.nx, self.nz), (other.nx, other.nz));
        for (sum, add) in self.sums.iter_mut().zip(&other.sums) {
            *sum += add;
        }
        for (count, add) in self.counts.iter_mut().zip(&other.counts) {
            *count += add;
        }
        self
    }

    /// Grid dimensions `(nx, nz)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.nz)
    }

    /// Running sums, row-major.
    pub fn sums(&self) -> &[f64] {
        &self.sums
    }

    /// Sample counts, row-major.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Total number of splats recorded.
    pub fn total_hits(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    pub(crate) fn into_parts(self) -> (usize, usize, Vec<f64>, Vec<u32>) {
        (self.nx, self.nz, self.sums, self.counts)
    }
}
