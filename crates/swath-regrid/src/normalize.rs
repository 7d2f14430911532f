//! Conversion of accumulated sums into cell means.

use crate::accumulator::Accumulator;
use crate::types::{OutputGrid, MISSING};

/// Turn per-cell sums and counts into means.
///
/// Cells with a zero count become [`MISSING`].
pub fn normalize(acc: Accumulator) -> OutputGrid {
    let (nx, nz, sums, counts) = acc.into_parts();

    let values = sums
        .iter()
        .zip(&counts)
        .map(|(&sum, &count)| {
            if count > 0 {
                (sum / count as f64) as f32
            } else {
                MISSING
            }
        })
        .collect();

    OutputGrid {
        nx,
        nz,
        values,
        counts,
    }
}
