//! Regridding entry points.

use tracing::debug;

use crate::config::RegridConfig;
use crate::error::{RegridError, Result};
use crate::normalize::normalize;
use crate::types::{DestinationGrid, OutputGrid, SourceGrid};

/// Regrid swath samples onto a uniform destination grid.
///
/// Every valid sample is averaged into all destination cells its footprint
/// covers. Cells reached by no valid sample hold the missing sentinel.
/// The destination and configuration are validated before any work starts.
pub fn regrid(
    source: &SourceGrid<'_>,
    dest: &DestinationGrid,
    config: &RegridConfig,
) -> Result<OutputGrid> {
    dest.validate()?;
    config.validate().map_err(RegridError::config)?;

    let regridder = config.regridder();

    debug!(
        profiles = source.width(),
        levels = source.height(),
        nx = dest.nx,
        nz = dest.nz,
        backend = %regridder.backend(),
        "Regridding swath"
    );

    let acc = regridder.accumulate(source, dest);
    let output = normalize(acc);

    debug!(
        valid_cells = output.valid_count(),
        total_cells = dest.cell_count(),
        "Regridding complete"
    );

    Ok(output)
}

/// Regrid from flat row-major arrays.
///
/// `data` and `z` hold `width * height` values, `x` holds `width` values.
pub fn regrid_arrays(
    data: &[f32],
    x: &[f32],
    z: &[f32],
    width: usize,
    height: usize,
    dest: &DestinationGrid,
    config: &RegridConfig,
) -> Result<OutputGrid> {
    dest.validate()?;
    let source = SourceGrid::new(data, x, z, width, height)?;
    regrid(&source, dest, config)
}
