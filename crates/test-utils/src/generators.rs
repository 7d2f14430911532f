//! Synthetic swath generators.
//!
//! These generators create predictable swaths (profiles of samples with a
//! per-profile coordinate and a per-sample coordinate) that can be used
//! across the test suite and benchmarks.

/// An owned synthetic swath in row-major layout.
///
/// Sample `(i, j)` lives at `i * height + j` in both `data` and `z`.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSwath {
    pub data: Vec<f32>,
    pub x: Vec<f32>,
    pub z: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl SyntheticSwath {
    /// Value of sample `(i, j)`.
    pub fn value(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.height + j]
    }

    /// Second-axis coordinate of sample `(i, j)`.
    pub fn z_at(&self, i: usize, j: usize) -> f32 {
        self.z[i * self.height + j]
    }

    /// Number of samples that are not NaN.
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|v| !v.is_nan()).count()
    }

    /// Mark every `every`-th sample as missing (NaN), starting at `offset`.
    pub fn with_invalid_every(mut self, every: usize, offset: usize) -> Self {
        if every == 0 {
            return self;
        }
        for v in self.data.iter_mut().skip(offset).step_by(every) {
            *v = f32::NAN;
        }
        self
    }

    /// Mark every sample as missing.
    pub fn all_invalid(mut self) -> Self {
        self.data.iter_mut().for_each(|v| *v = f32::NAN);
        self
    }
}

/// Creates a swath on a uniform, non-curvilinear grid.
///
/// Profile `i` sits at `x0 + i * dx`, sample `j` at `z0 + j * dz`, and the
/// value is `value(i, j)`.
///
/// # Example
///
/// ```
/// use test_utils::create_uniform_swath;
///
/// let swath = create_uniform_swath(3, 2, (0.0, 1.0), (10.0, 5.0), |i, j| (i * 10 + j) as f32);
/// assert_eq!(swath.x, vec![0.0, 1.0, 2.0]);
/// assert_eq!(swath.z_at(2, 1), 15.0);
/// assert_eq!(swath.value(2, 1), 21.0);
/// ```
pub fn create_uniform_swath<F>(
    width: usize,
    height: usize,
    (x0, dx): (f32, f32),
    (z0, dz): (f32, f32),
    value: F,
) -> SyntheticSwath
where
    F: Fn(usize, usize) -> f32,
{
    let x = (0..width).map(|i| x0 + i as f32 * dx).collect();
    let mut data = Vec::with_capacity(width * height);
    let mut z = Vec::with_capacity(width * height);
    for i in 0..width {
        for j in 0..height {
            data.push(value(i, j));
            z.push(z0 + j as f32 * dz);
        }
    }

    SyntheticSwath {
        data,
        x,
        z,
        width,
        height,
    }
}

/// Creates a swath with predictable values: `i * 1000 + j`.
pub fn create_test_swath(width: usize, height: usize) -> SyntheticSwath {
    create_uniform_swath(width, height, (0.0, 1.0), (0.0, 1.0), |i, j| {
        (i * 1000 + j) as f32
    })
}

/// Creates a swath filled with a constant value on a uniform grid.
pub fn create_constant_swath(width: usize, height: usize, value: f32) -> SyntheticSwath {
    create_uniform_swath(width, height, (0.0, 1.0), (0.0, 1.0), |_, _| value)
}

/// Along-track spacing between radar profiles, in seconds.
pub const PROFILE_INTERVAL_S: f32 = 0.16;

/// Vertical spacing between radar range bins, in meters.
pub const RANGE_BIN_M: f32 = 240.0;

/// Creates a radar-curtain-like swath over varying terrain.
///
/// Profiles are spaced [`PROFILE_INTERVAL_S`] apart along the first axis
/// (profile time). Heights start at a terrain elevation that varies from
/// profile to profile and increase by [`RANGE_BIN_M`] per sample, so the
/// second axis is curvilinear. Values are reflectivity-like dBZ with a
/// cloud layer whose height drifts along the track; samples outside the
/// cloud are NaN.
///
/// # Arguments
///
/// * `profiles` - Number of profiles
/// * `levels` - Number of range bins per profile
/// * `seed` - Seed for the deterministic noise term
pub fn create_curtain_swath(profiles: usize, levels: usize, seed: u32) -> SyntheticSwath {
    let x = (0..profiles).map(|i| i as f32 * PROFILE_INTERVAL_S).collect();
    let mut data = Vec::with_capacity(profiles * levels);
    let mut z = Vec::with_capacity(profiles * levels);

    for i in 0..profiles {
        let phase = i as f32 / profiles.max(1) as f32 * std::f32::consts::TAU;
        let surface = terrain_elevation(phase);
        let cloud_base = 2000.0 + 1500.0 * (phase * 2.0).sin();
        let cloud_top = cloud_base + 4000.0;

        for j in 0..levels {
            let height = surface + j as f32 * RANGE_BIN_M;
            z.push(height);

            let value = if height >= cloud_base && height <= cloud_top {
                let depth = (height - cloud_base) / (cloud_top - cloud_base);
                let noise = (simple_hash(i as u32, j as u32, seed) % 1000) as f32 / 1000.0;
                -10.0 + 30.0 * (1.0 - (depth - 0.4).abs()) + 2.0 * noise
            } else {
                f32::NAN
            };
            data.push(value);
        }
    }

    SyntheticSwath {
        data,
        x,
        z,
        width: profiles,
        height: levels,
    }
}

/// Creates a swath with a smooth field and deterministic noise everywhere.
///
/// The first axis has slightly irregular spacing and the second axis is
/// terrain-following, so the footprint estimator sees both non-uniform and
/// curvilinear spacing.
pub fn create_irregular_swath(profiles: usize, levels: usize, seed: u32) -> SyntheticSwath {
    let mut x = Vec::with_capacity(profiles);
    let mut pos = 0.0f32;
    for i in 0..profiles {
        x.push(pos);
        let jitter = (simple_hash(i as u32, 0, seed) % 100) as f32 / 100.0;
        pos += 0.75 + 0.5 * jitter;
    }

    let mut data = Vec::with_capacity(profiles * levels);
    let mut z = Vec::with_capacity(profiles * levels);
    for i in 0..profiles {
        let lift = 0.5 * (i as f32 * 0.3).sin();
        for j in 0..levels {
            z.push(lift + j as f32);
            let noise = (simple_hash(i as u32, j as u32, seed) % 1000) as f32 / 1000.0;
            data.push(x[i] * 0.5 + j as f32 + noise);
        }
    }

    SyntheticSwath {
        data,
        x,
        z,
        width: profiles,
        height: levels,
    }
}

/// Surface elevation in meters for a position along the track.
fn terrain_elevation(phase: f32) -> f32 {
    (800.0 * phase.sin() + 300.0 * (phase * 5.0).cos()).max(0.0)
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
