//! Integration tests for swath regridding.
//!
//! These tests check the output contract of `regrid` on synthetic swaths from
//! `test-utils`, for both the reference and the accelerated backend.

use swath_regrid::{
    regrid, regrid_arrays, Backend, DestinationGrid, OutputGrid, RegridConfig, RegridError,
    SourceGrid,
};
use test_utils::destination::{DestinationSpec, CURTAIN_60S, TWO_BY_TWO};
use test_utils::{
    assert_approx_eq, assert_grid_approx_eq, create_constant_swath, create_curtain_swath,
    create_irregular_swath, create_uniform_swath, worked_example, SyntheticSwath,
};

fn dest(spec: DestinationSpec) -> DestinationGrid {
    DestinationGrid::new(spec.x_min, spec.x_max, spec.nx, spec.z_min, spec.z_max, spec.nz)
        .expect("valid destination fixture")
}

fn source(swath: &SyntheticSwath) -> SourceGrid<'_> {
    SourceGrid::new(&swath.data, &swath.x, &swath.z, swath.width, swath.height)
        .expect("consistent synthetic swath")
}

fn run(swath: &SyntheticSwath, grid: &DestinationGrid, backend: Backend) -> OutputGrid {
    let config = RegridConfig {
        backend,
        min_rows_per_task: 4,
    };
    regrid(&source(swath), grid, &config).expect("regrid should succeed")
}

const BACKENDS: [Backend; 2] = [Backend::Reference, Backend::Accelerated];

/// Brute-force sums and counts, written directly from the footprint rule.
fn expected_sums(swath: &SyntheticSwath, grid: &DestinationGrid) -> (Vec<f64>, Vec<u32>) {
    let (w, h) = (swath.width, swath.height);
    let (nx, nz) = (grid.nx as i64, grid.nz as i64);
    let xs = grid.x_step();
    let zs = grid.z_step();
    let mut sums = vec![0.0f64; grid.cell_count()];
    let mut counts = vec![0u32; grid.cell_count()];

    for i in 0..w {
        let xi = swath.x[i] as f64;
        let mut n1 = if i > 0 {
            ((swath.x[i - 1] as f64 + xi) / 2.0 - grid.x_min) / xs
        } else {
            -1.0
        };
        let mut n2 = if i + 1 < w {
            ((swath.x[i + 1] as f64 + xi) / 2.0 - grid.x_min) / xs
        } else {
            grid.nx as f64
        };
        if n2 - n1 < 1.0 {
            n1 = (xi - grid.x_min) / xs;
            n2 = n1;
        }

        for j in 0..h {
            let zj = swath.z_at(i, j) as f64;
            let mut m1 = if j > 0 {
                ((swath.z_at(i, j - 1) as f64 + zj) / 2.0 - grid.z_min) / zs
            } else {
                -1.0
            };
            let mut m2 = if j + 1 < h {
                ((swath.z_at(i, j + 1) as f64 + zj) / 2.0 - grid.z_min) / zs
            } else {
                grid.nz as f64
            };
            if m2 - m1 < 1.0 {
                m1 = (zj - grid.z_min) / zs;
                m2 = m1;
            }

            let value = swath.value(i, j);
            for n in ((n1 + 0.5) as i64)..((n2 + 0.5 + 1.0) as i64) {
                for m in ((m1 + 0.5) as i64)..((m2 + 0.5 + 1.0) as i64) {
                    if n < 0 || n >= nx || m < 0 || m >= nz || value.is_nan() {
                        continue;
                    }
                    let idx = (n * nz + m) as usize;
                    sums[idx] += value as f64;
                    counts[idx] += 1;
                }
            }
        }
    }

    (sums, counts)
}

// =============================================================================
// Worked example and shape
// =============================================================================

#[test]
fn test_worked_example() {
    let grid = dest(TWO_BY_TWO);
    for backend in BACKENDS {
        let out = regrid_arrays(
            &worked_example::DATA,
            &worked_example::X,
            &worked_example::Z,
            worked_example::WIDTH,
            worked_example::HEIGHT,
            &grid,
            &RegridConfig {
                backend,
                ..RegridConfig::default()
            },
        )
        .unwrap();

        assert_eq!(out.values, worked_example::EXPECTED.to_vec(), "backend {}", backend);
        assert_eq!(out.counts, vec![1, 2, 2, 4]);
    }
}

#[test]
fn test_output_shape_matches_destination() {
    let swath = create_irregular_swath(23, 17, 5);
    for (nx, nz) in [(1, 1), (3, 40), (64, 2), (50, 50)] {
        let grid = DestinationGrid::new(-2.0, 30.0, nx, -1.0, 20.0, nz).unwrap();
        for backend in BACKENDS {
            let out = run(&swath, &grid, backend);
            assert_eq!(out.nx, nx);
            assert_eq!(out.nz, nz);
            assert_eq!(out.values.len(), nx * nz);
            assert_eq!(out.counts.len(), nx * nz);
        }
    }
}

// =============================================================================
// Cell contract
// =============================================================================

#[test]
fn test_cells_average_exactly_the_covering_samples() {
    let swath = create_irregular_swath(40, 25, 11).with_invalid_every(7, 3);
    let grids = [
        DestinationGrid::new(-3.0, 45.0, 12, -2.0, 27.0, 9).unwrap(),
        DestinationGrid::new(0.0, 40.0, 80, 0.0, 25.0, 60).unwrap(),
        DestinationGrid::new(10.0, 20.0, 33, 5.0, 9.0, 17).unwrap(),
    ];

    for grid in &grids {
        let (sums, counts) = expected_sums(&swath, grid);
        for backend in BACKENDS {
            let out = run(&swath, grid, backend);
            assert_eq!(out.counts, counts, "counts differ for backend {}", backend);

            for (idx, &value) in out.values.iter().enumerate() {
                if counts[idx] == 0 {
                    assert!(value.is_nan(), "cell {} should be missing", idx);
                } else {
                    let mean = sums[idx] / counts[idx] as f64;
                    assert_approx_eq!(value, mean, 1e-4 * mean.abs().max(1.0));
                }
            }
        }
    }
}

#[test]
fn test_all_invalid_input_gives_all_missing_output() {
    let swath = create_curtain_swath(120, 40, 3).all_invalid();
    let grid = dest(CURTAIN_60S);
    for backend in BACKENDS {
        let out = run(&swath, &grid, backend);
        assert!(out.values.iter().all(|v| v.is_nan()));
        assert_eq!(out.valid_count(), 0);
        assert!(out.value_range().is_none());
    }
}

#[test]
fn test_missing_cells_are_not_zero() {
    let swath = create_curtain_swath(375, 50, 9);
    let grid = dest(CURTAIN_60S);
    let out = run(&swath, &grid, Backend::Reference);

    assert!(out.valid_count() > 0);
    assert!(out.valid_count() < grid.cell_count());
    for (value, count) in out.values.iter().zip(&out.counts) {
        assert_eq!(value.is_nan(), *count == 0);
    }
}

// =============================================================================
// Identity regridding
// =============================================================================

#[test]
fn test_identity_reproduces_constant_field() {
    let swath = create_constant_swath(16, 12, 3.25);
    // Cell centers coincide with the sample coordinates.
    let grid = DestinationGrid::new(-0.5, 15.5, 16, -0.5, 11.5, 12).unwrap();
    for backend in BACKENDS {
        let out = run(&swath, &grid, backend);
        assert_eq!(out.values, vec![3.25; 16 * 12]);
    }
}

#[test]
fn test_identity_reproduces_linear_field_within_half_a_cell() {
    // Gradient of 2 per sample along x and 1 per sample along z.
    let swath = create_uniform_swath(20, 10, (0.0, 1.0), (0.0, 1.0), |i, j| {
        2.0 * i as f32 + j as f32
    });
    let grid = DestinationGrid::new(-0.5, 19.5, 20, -0.5, 9.5, 10).unwrap();
    let out = run(&swath, &grid, Backend::Reference);

    // Each footprint reaches the next cell, so a cell averages its own sample
    // with the one before it: at most half a step of gradient on each axis.
    let tolerance = 0.5 * 2.0 + 0.5 * 1.0 + 1e-5;
    for n in 0..20 {
        for m in 0..10 {
            let diff = (out.get(n, m) - swath.value(n, m)).abs();
            assert!(diff <= tolerance, "cell ({}, {}) off by {}", n, m, diff);
        }
    }
    assert_eq!(out.get(0, 0), 0.0);
    assert_eq!(out.get(5, 0), 9.0);
    assert_eq!(out.get(5, 4), 12.5);
}

// =============================================================================
// Coverage
// =============================================================================

#[test]
fn test_refinement_never_reduces_coverage() {
    let swath = create_irregular_swath(40, 30, 21).with_invalid_every(5, 2);
    let base = DestinationSpec {
        x_min: -5.0,
        x_max: 55.0,
        nx: 8,
        z_min: -2.0,
        z_max: 32.0,
        nz: 6,
    };

    for backend in BACKENDS {
        let mut previous = 0;
        for factor in [1, 2, 4, 8] {
            let out = run(&swath, &dest(base.refined(factor)), backend);
            let covered = out.valid_count();
            assert!(
                covered >= previous,
                "coverage dropped from {} to {} at factor {}",
                previous,
                covered,
                factor
            );
            previous = covered;
        }
    }
}

#[test]
fn test_source_coarser_than_destination_splats_many_cells() {
    let swath = create_uniform_swath(3, 3, (0.0, 10.0), (0.0, 10.0), |i, j| (i * 3 + j) as f32);
    let grid = DestinationGrid::new(0.0, 20.0, 20, 0.0, 20.0, 20).unwrap();
    let out = run(&swath, &grid, Backend::Reference);

    assert_eq!(out.valid_count(), 400);
    // Profile 1 spans cells 5..=15 along x, its middle sample 5..=15 along z.
    assert_eq!(out.get(10, 10), 4.0);
}

#[test]
fn test_edge_profile_reaches_grid_through_open_bound() {
    // Both profiles sit left of the grid. The first collapses onto its own
    // coordinate and misses; the last has an open upper bound and covers
    // every row.
    let data = [1.0, 2.0, 10.0, 20.0];
    let x = [-100.0, -99.0];
    let z = [0.5, 1.5, 0.5, 1.5];
    let grid = DestinationGrid::new(0.0, 4.0, 4, 0.0, 2.0, 2).unwrap();

    let out = regrid_arrays(&data, &x, &z, 2, 2, &grid, &RegridConfig::reference()).unwrap();
    for n in 0..4 {
        assert_eq!(out.row(n), &[10.0, 15.0]);
    }
}

#[test]
fn test_descending_coordinates_collapse_interior_samples() {
    let data = [10.0, 20.0, 30.0, 40.0];
    let z = [3.0, 2.0, 1.0, 0.0];
    let grid = DestinationGrid::new(0.0, 1.0, 1, 0.0, 4.0, 4).unwrap();

    let out = regrid_arrays(&data, &[0.5], &z, 1, 4, &grid, &RegridConfig::reference()).unwrap();
    assert_eq!(out.counts, vec![1, 3, 3, 2]);
    assert_eq!(out.get(0, 0), 10.0);
    assert_approx_eq!(out.get(0, 1), 80.0 / 3.0, 1e-5);
    assert_approx_eq!(out.get(0, 2), 70.0 / 3.0, 1e-5);
    assert_eq!(out.get(0, 3), 25.0);
}

// =============================================================================
// Backends
// =============================================================================

#[test]
fn test_backends_agree_on_curtain() {
    let swath = create_curtain_swath(1500, 125, 17);
    let grid = dest(CURTAIN_60S);

    let reference = run(&swath, &grid, Backend::Reference);
    let accelerated = run(&swath, &grid, Backend::Accelerated);

    assert_eq!(reference.counts, accelerated.counts);
    assert_grid_approx_eq!(&reference.values, &accelerated.values, 1e-4);
}

#[test]
fn test_backends_agree_for_any_partition_size() {
    let swath = create_irregular_swath(97, 13, 2).with_invalid_every(11, 0);
    let grid = DestinationGrid::new(-1.0, 100.0, 57, -1.0, 14.0, 19).unwrap();
    let reference = run(&swath, &grid, Backend::Reference);

    for min_rows_per_task in [1, 2, 7, 96, 97, 1000] {
        let config = RegridConfig {
            backend: Backend::Accelerated,
            min_rows_per_task,
        };
        let out = regrid(&source(&swath), &grid, &config).unwrap();
        assert_eq!(out.counts, reference.counts);
        assert_grid_approx_eq!(&out.values, &reference.values, 1e-4);
    }
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_invalid_destination_is_config_error() {
    let swath = create_constant_swath(2, 2, 1.0);
    let bad = [
        DestinationGrid { x_min: 0.0, x_max: 1.0, nx: 0, z_min: 0.0, z_max: 1.0, nz: 1 },
        DestinationGrid { x_min: 0.0, x_max: 1.0, nx: 1, z_min: 0.0, z_max: 1.0, nz: 0 },
        DestinationGrid { x_min: 1.0, x_max: 1.0, nx: 1, z_min: 0.0, z_max: 1.0, nz: 1 },
        DestinationGrid { x_min: 0.0, x_max: 1.0, nx: 1, z_min: 2.0, z_max: 1.0, nz: 1 },
    ];
    for grid in &bad {
        let err = regrid(&source(&swath), grid, &RegridConfig::default()).unwrap_err();
        assert!(matches!(err, RegridError::Config(_)), "unexpected {:?}", err);
    }
}

#[test]
fn test_mismatched_arrays_are_shape_errors() {
    let grid = dest(TWO_BY_TWO);
    let config = RegridConfig::default();

    let err = regrid_arrays(&[1.0; 4], &[0.0; 3], &[0.0; 4], 2, 2, &grid, &config).unwrap_err();
    assert_eq!(err, RegridError::shape_mismatch("x", 2, 3));

    let err = regrid_arrays(&[1.0; 4], &[0.0; 2], &[0.0; 6], 2, 2, &grid, &config).unwrap_err();
    assert_eq!(err, RegridError::shape_mismatch("z", 4, 6));

    let err = regrid_arrays(&[1.0; 5], &[0.0; 2], &[0.0; 5], 2, 2, &grid, &config).unwrap_err();
    assert_eq!(err, RegridError::shape_mismatch("data", 4, 5));
}

#[test]
fn test_huge_dimensions_are_errors_not_panics() {
    let grid = dest(TWO_BY_TWO);
    for config in [RegridConfig::reference(), RegridConfig::accelerated()] {
        let err = regrid_arrays(&[], &[0.0, 1.0], &[], 2, 1 << 63, &grid, &config).unwrap_err();
        assert!(matches!(err, RegridError::ShapeMismatch { array: "data", .. }));

        let huge = DestinationGrid { x_min: 0.0, x_max: 1.0, nx: 1 << 63, z_min: 0.0, z_max: 1.0, nz: 2 };
        let swath = create_constant_swath(2, 2, 1.0);
        let err = regrid(&source(&swath), &huge, &config).unwrap_err();
        assert!(matches!(err, RegridError::Config(_)));
    }
}

#[test]
fn test_destination_from_yaml() {
    let grid: DestinationGrid = serde_yaml::from_str(
        "x_min: 0.0\nx_max: 2.0\nnx: 2\nz_min: 0.0\nz_max: 2.0\nnz: 2\n",
    )
    .unwrap();
    assert_eq!(grid, dest(TWO_BY_TWO));
}
