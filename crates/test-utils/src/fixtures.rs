//! Common test fixtures for swath regridding tests.

/// Destination grid specifications for testing.
pub mod destination {
    /// Two by two cells over `[0, 2) x [0, 2)`.
    pub const TWO_BY_TWO: DestinationSpec = DestinationSpec {
        x_min: 0.0,
        x_max: 2.0,
        nx: 2,
        z_min: 0.0,
        z_max: 2.0,
        nz: 2,
    };

    /// A curtain section: 60 s of profiles, 0-12 km altitude.
    pub const CURTAIN_60S: DestinationSpec = DestinationSpec {
        x_min: 0.0,
        x_max: 60.0,
        nx: 300,
        z_min: 0.0,
        z_max: 12_000.0,
        nz: 100,
    };

    /// Destination grid specification for testing.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct DestinationSpec {
        pub x_min: f64,
        pub x_max: f64,
        pub nx: usize,
        pub z_min: f64,
        pub z_max: f64,
        pub nz: usize,
    }

    impl DestinationSpec {
        /// Returns the total number of cells.
        pub fn size(&self) -> usize {
            self.nx * self.nz
        }

        /// Returns the cell sizes `(x_step, z_step)`.
        pub fn resolution(&self) -> (f64, f64) {
            (
                (self.x_max - self.x_min) / self.nx as f64,
                (self.z_max - self.z_min) / self.nz as f64,
            )
        }

        /// Same bounds with cell counts scaled by `factor`.
        pub fn refined(&self, factor: usize) -> Self {
            Self {
                nx: self.nx * factor,
                nz: self.nz * factor,
                ..*self
            }
        }
    }
}

/// The two-profile worked example: `data = [[1, 2], [3, 4]]`.
pub mod worked_example {
    pub const DATA: [f32; 4] = [1.0, 2.0, 3.0, 4.0];
    pub const X: [f32; 2] = [0.0, 1.0];
    pub const Z: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const WIDTH: usize = 2;
    pub const HEIGHT: usize = 2;

    /// Expected output on [`super::destination::TWO_BY_TWO`], row-major.
    pub const EXPECTED: [f32; 4] = [1.0, 1.5, 2.0, 2.5];
}

/// Raw field encodings modeled on radar product attributes.
pub mod encoding {
    /// Reflectivity stored as hundredths of dBZ.
    pub const REFLECTIVITY_FACTOR: f32 = 100.0;
    pub const REFLECTIVITY_OFFSET: f32 = 0.0;
    pub const REFLECTIVITY_MISSING: f32 = -8888.0;
    pub const REFLECTIVITY_FILL: f32 = 15360.0;
    pub const REFLECTIVITY_VALID_RANGE: (f32, f32) = (-4000.0, 5000.0);

    /// Granule start time in the compact `YYYYmmddHHMMSS` form.
    pub const START_TIME: &str = "20060720143000";
}
