//! Runs both backends on one synthetic swath and compares the results.

use serde::Serialize;
use std::time::{Duration, Instant};
use swath_regrid::{
    regrid, Backend, DestinationGrid, OutputGrid, RegridConfig, SourceGrid,
};
use test_utils::{create_curtain_swath, create_irregular_swath, SyntheticSwath};
use tracing::{debug, info, warn};

use crate::config::{CheckRequest, SwathKind, SwathShape};

/// First cell where the backends disagree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellMismatch {
    pub n: usize,
    pub m: usize,
    pub reference: f32,
    pub accelerated: f32,
    pub reference_count: u32,
    pub accelerated_count: u32,
}

/// Outcome of one cross-check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResults {
    pub name: String,
    pub profiles: usize,
    pub levels: usize,
    pub samples: usize,
    pub valid_samples: usize,
    pub nx: usize,
    pub nz: usize,
    pub valid_cells: usize,
    pub coverage: f64,
    pub value_range: Option<(f32, f32)>,
    pub counts_match: bool,
    pub max_abs_diff: f32,
    pub tolerance: f32,
    pub first_mismatch: Option<CellMismatch>,
    pub accelerated_backend: Backend,
    pub reference_ms: f64,
    pub accelerated_ms: f64,
}

impl CheckResults {
    /// True when counts are identical and every mean is within tolerance.
    pub fn passed(&self) -> bool {
        self.counts_match && self.first_mismatch.is_none()
    }

    /// Reference time over accelerated time.
    pub fn speedup(&self) -> f64 {
        if self.accelerated_ms > 0.0 {
            self.reference_ms / self.accelerated_ms
        } else {
            0.0
        }
    }
}

/// Generate the synthetic swath described by `shape`.
pub fn generate_swath(shape: &SwathShape) -> SyntheticSwath {
    let swath = match shape.kind {
        SwathKind::Curtain => create_curtain_swath(shape.profiles, shape.levels, shape.seed),
        SwathKind::Irregular => create_irregular_swath(shape.profiles, shape.levels, shape.seed),
    };
    swath.with_invalid_every(shape.invalid_every, 0)
}

/// Destination spanning the finite coordinates of `swath`.
pub fn covering_destination(
    swath: &SyntheticSwath,
    nx: usize,
    nz: usize,
) -> anyhow::Result<DestinationGrid> {
    let (x_min, x_max) =
        finite_extent(&swath.x).ok_or_else(|| anyhow::anyhow!("swath has no finite x"))?;
    let (z_min, z_max) =
        finite_extent(&swath.z).ok_or_else(|| anyhow::anyhow!("swath has no finite z"))?;

    Ok(DestinationGrid::new(
        x_min as f64,
        widen(x_min, x_max) as f64,
        nx,
        z_min as f64,
        widen(z_min, z_max) as f64,
        nz,
    )?)
}

fn finite_extent(values: &[f32]) -> Option<(f32, f32)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn widen(min: f32, max: f32) -> f32 {
    if max > min {
        max
    } else {
        min + 1.0
    }
}

/// Run the check described by `request`.
pub fn run_check(request: &CheckRequest) -> anyhow::Result<CheckResults> {
    request.validate()?;

    let swath = generate_swath(&request.swath);
    let dest = match &request.destination {
        Some(dest) => *dest,
        None => covering_destination(&swath, request.cells.0, request.cells.1)?,
    };
    let source = SourceGrid::new(&swath.data, &swath.x, &swath.z, swath.width, swath.height)?;

    info!(
        name = %request.name,
        profiles = swath.width,
        levels = swath.height,
        valid = swath.valid_count(),
        nx = dest.nx,
        nz = dest.nz,
        "Running backend check"
    );

    let reference_config = RegridConfig::reference();
    let accelerated_config = RegridConfig {
        backend: Backend::Accelerated,
        ..request.regrid
    };
    if !Backend::Accelerated.is_available() {
        warn!("Accelerated backend not compiled in; both runs use the reference backend");
    }

    let (reference, reference_time) =
        timed(request.repeats, || regrid(&source, &dest, &reference_config))?;
    let (accelerated, accelerated_time) =
        timed(request.repeats, || regrid(&source, &dest, &accelerated_config))?;

    let comparison = compare(&reference, &accelerated, request.tolerance);
    debug!(
        counts_match = comparison.counts_match,
        max_abs_diff = comparison.max_abs_diff,
        "Compared backends"
    );

    Ok(CheckResults {
        name: request.name.clone(),
        profiles: swath.width,
        levels: swath.height,
        samples: source.len(),
        valid_samples: source.valid_count(),
        nx: dest.nx,
        nz: dest.nz,
        valid_cells: reference.valid_count(),
        coverage: reference.coverage(),
        value_range: reference.value_range(),
        counts_match: comparison.counts_match,
        max_abs_diff: comparison.max_abs_diff,
        tolerance: request.tolerance,
        first_mismatch: comparison.first_mismatch,
        accelerated_backend: accelerated_config.backend,
        reference_ms: as_millis(reference_time),
        accelerated_ms: as_millis(accelerated_time),
    })
}

/// Run `f` `repeats` times, keeping the last output and the fastest time.
fn timed<T, E, F>(repeats: u32, mut f: F) -> Result<(T, Duration), E>
where
    F: FnMut() -> Result<T, E>,
{
    let start = Instant::now();
    let mut output = f()?;
    let mut best = start.elapsed();

    for _ in 1..repeats {
        let start = Instant::now();
        output = f()?;
        best = best.min(start.elapsed());
    }
    Ok((output, best))
}

fn as_millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Cell-by-cell comparison of two outputs on the same destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub counts_match: bool,
    pub max_abs_diff: f32,
    pub first_mismatch: Option<CellMismatch>,
}

/// Compare two outputs. Counts must match exactly and both means must be
/// missing or within `tolerance` of each other.
pub fn compare(reference: &OutputGrid, accelerated: &OutputGrid, tolerance: f32) -> Comparison {
    let nz = reference.nz.max(1);
    let mut counts_match = reference.counts.len() == accelerated.counts.len();
    let mut max_abs_diff = 0.0f32;
    let mut first_mismatch = None;

    let cells = reference.values.iter().zip(&accelerated.values);
    let counts = reference.counts.iter().zip(&accelerated.counts);
    for (idx, ((&r, &a), (&rc, &ac))) in cells.zip(counts).enumerate() {
        let values_agree = match (r.is_nan(), a.is_nan()) {
            (true, true) => true,
            (false, false) => {
                let diff = (r - a).abs();
                max_abs_diff = max_abs_diff.max(diff);
                diff <= tolerance
            }
            _ => false,
        };
        if rc != ac {
            counts_match = false;
        }
        if (!values_agree || rc != ac) && first_mismatch.is_none() {
            first_mismatch = Some(CellMismatch {
                n: idx / nz,
                m: idx % nz,
                reference: r,
                accelerated: a,
                reference_count: rc,
                accelerated_count: ac,
            });
        }
    }

    Comparison {
        counts_match,
        max_abs_diff,
        first_mismatch,
    }
}
