//! Execution backends for the accumulation pass.
//!
//! Two strategies share one contract: every valid sample is splatted into
//! exactly the cells its footprint covers. The reference backend walks the
//! profiles in order on the calling thread. The accelerated backend splits
//! the profiles into contiguous partitions, accumulates each into a private
//! grid on the rayon pool and merges the partial grids by addition, so only
//! the summation order differs.
//!
//! The accelerated backend is compiled in with the `parallel` feature. When
//! it is requested without that feature, selection falls back to the
//! reference backend.

use serde::{Deserialize, Serialize};

use crate::accumulator::Accumulator;
use crate::types::{DestinationGrid, SourceGrid};

/// Backend requested for a regridding call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Sequential single-threaded accumulation.
    Reference,
    /// Partitioned multi-threaded accumulation.
    #[default]
    #[serde(alias = "parallel")]
    Accelerated,
}

impl Backend {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "reference" | "sequential" | "serial" => Self::Reference,
            "accelerated" | "parallel" => Self::Accelerated,
            _ => Self::default(),
        }
    }

    /// Get the backend name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Accelerated => "accelerated",
        }
    }

    /// Check if this backend is compiled into the current build.
    pub fn is_available(&self) -> bool {
        match self {
            Self::Reference => true,
            Self::Accelerated => cfg!(feature = "parallel"),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A strategy for running the fused footprint/accumulation pass.
pub trait Regridder: Send + Sync {
    /// Backend actually used by this strategy.
    fn backend(&self) -> Backend;

    /// Accumulate every valid sample of `source` onto `dest`.
    ///
    /// Inputs are assumed to be validated.
    fn accumulate(&self, source: &SourceGrid<'_>, dest: &DestinationGrid) -> Accumulator;
}

/// Sequential accumulation over all profiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceRegridder;

impl Regridder for ReferenceRegridder {
    fn backend(&self) -> Backend {
        Backend::Reference
    }

    fn accumulate(&self, source: &SourceGrid<'_>, dest: &DestinationGrid) -> Accumulator {
        let mut acc = Accumulator::for_destination(dest);
        acc.add_profiles(source, dest, 0..source.width());
        acc
    }
}

/// Partitioned accumulation on the rayon thread pool.
#[cfg(feature = "parallel")]
#[derive(Debug, Clone, Copy)]
pub struct ParallelRegridder {
    /// Lower bound on profiles per partition. Each partition allocates a
    /// full destination grid, so tiny partitions cost more than they save.
    /// Zero behaves like one.
    pub min_rows_per_task: usize,
}

#[cfg(feature = "parallel")]
impl ParallelRegridder {
    pub fn new(min_rows_per_task: usize) -> Self {
        Self { min_rows_per_task }
    }

    /// Profiles per partition for a swath of `width` profiles.
    pub fn rows_per_task(&self, width: usize) -> usize {
        let threads = rayon::current_num_threads().max(1);
        width.div_ceil(threads).max(self.min_rows_per_task).max(1)
    }
}

#[cfg(feature = "parallel")]
impl Default for ParallelRegridder {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MIN_ROWS_PER_TASK)
    }
}

#[cfg(feature = "parallel")]
impl Regridder for ParallelRegridder {
    fn backend(&self) -> Backend {
        Backend::Accelerated
    }

    fn accumulate(&self, source: &SourceGrid<'_>, dest: &DestinationGrid) -> Accumulator {
        use rayon::prelude::*;

        let width = source.width();
        let chunk = self.rows_per_task(width);
        let starts: Vec<usize> = (0..width).step_by(chunk).collect();

        starts
            .par_iter()
            .map(|&start| {
                let mut acc = Accumulator::for_destination(dest);
                acc.add_profiles(source, dest, start..(start + chunk).min(width));
                acc
            })
            .reduce(|| Accumulator::for_destination(dest), Accumulator::merge)
    }
}

/// Build the strategy for `backend`.
///
/// Requesting [`Backend::Accelerated`] in a build without the `parallel`
/// feature logs a warning and returns the reference strategy.
pub fn select(backend: Backend, min_rows_per_task: usize) -> Box<dyn Regridder> {
    match backend {
        Backend::Reference => Box::new(ReferenceRegridder),
        Backend::Accelerated => accelerated(min_rows_per_task),
    }
}

#[cfg(feature = "parallel")]
fn accelerated(min_rows_per_task: usize) -> Box<dyn Regridder> {
    Box::new(ParallelRegridder::new(min_rows_per_task))
}

#[cfg(not(feature = "parallel"))]
fn accelerated(_min_rows_per_task: usize) -> Box<dyn Regridder> {
    tracing::warn!("accelerated backend not compiled in, using reference backend");
    Box::new(ReferenceRegridder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!(Backend::from_str("reference"), Backend::Reference);
        assert_eq!(Backend::from_str("SERIAL"), Backend::Reference);
        assert_eq!(Backend::from_str("Accelerated"), Backend::Accelerated);
        assert_eq!(Backend::from_str("parallel"), Backend::Accelerated);
        assert_eq!(Backend::from_str("gpu"), Backend::Accelerated);
    }

    #[test]
    fn test_reference_always_available() {
        assert!(Backend::Reference.is_available());
        assert_eq!(select(Backend::Reference, 1).backend(), Backend::Reference);
    }

    #[test]
    fn test_select_accelerated_matches_availability() {
        let selected = select(Backend::Accelerated, 4).backend();
        if Backend::Accelerated.is_available() {
            assert_eq!(selected, Backend::Accelerated);
        } else {
            assert_eq!(selected, Backend::Reference);
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_rows_per_task_respects_minimum() {
        let regridder = ParallelRegridder::new(64);
        assert!(regridder.rows_per_task(10) >= 64);
        assert!(regridder.rows_per_task(0) >= 1);
        assert!(ParallelRegridder::new(0).rows_per_task(0) >= 1);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_empty_swath_accumulates_nothing() {
        let source = SourceGrid::new(&[], &[], &[], 0, 3).unwrap();
        let dest = DestinationGrid::new(0.0, 1.0, 2, 0.0, 1.0, 2).unwrap();
        let acc = ParallelRegridder::default().accumulate(&source, &dest);
        assert_eq!(acc.total_hits(), 0);
        assert_eq!(acc.shape(), (2, 2));
    }
}
