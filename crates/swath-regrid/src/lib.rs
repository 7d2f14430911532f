//! Footprint-averaging regridder for satellite swath data.
//!
//! Converts samples on an irregular, curvilinear grid (one coordinate per
//! profile along the first axis, one coordinate per sample along the second)
//! into means on a uniform rectangular grid.
//!
//! # Architecture
//!
//! ```text
//! SourceGrid + DestinationGrid
//!      │
//!      ▼
//! regrid(source, dest, config)
//!      │
//!      ├─► validate destination and config (fail fast)
//!      │
//!      ├─► Regridder::accumulate          (reference or accelerated)
//!      │         │
//!      │         └─► per sample: footprint ─► splat into sum/count
//!      │
//!      └─► normalize: sum/count, or MISSING where count == 0
//!               │
//!               ▼
//!          OutputGrid
//! ```
//!
//! # Example
//!
//! ```
//! use swath_regrid::{regrid, DestinationGrid, RegridConfig, SourceGrid};
//!
//! let data = [1.0, 2.0, 3.0, 4.0];
//! let x = [0.0, 1.0];
//! let z = [0.0, 1.0, 0.0, 1.0];
//! let source = SourceGrid::new(&data, &x, &z, 2, 2).unwrap();
//! let dest = DestinationGrid::new(0.0, 2.0, 2, 0.0, 2.0, 2).unwrap();
//!
//! let out = regrid(&source, &dest, &RegridConfig::default()).unwrap();
//! assert_eq!(out.values, vec![1.0, 1.5, 2.0, 2.5]);
//! ```

pub mod accumulator;
pub mod backend;
pub mod config;
pub mod error;
pub mod footprint;
pub mod normalize;
pub mod regrid;
pub mod types;

// Re-export commonly used types at crate root
pub use accumulator::Accumulator;
#[cfg(feature = "parallel")]
pub use backend::ParallelRegridder;
pub use backend::{Backend, ReferenceRegridder, Regridder};
pub use config::RegridConfig;
pub use error::{RegridError, Result};
pub use footprint::{AxisBounds, IndexSpan};
pub use normalize::normalize;
pub use regrid::{regrid, regrid_arrays};
pub use types::{is_missing, DestinationGrid, OutputGrid, SourceGrid, MAX_CELLS_PER_AXIS, MISSING};
