//! Common test fixtures for hillslope-analysis tests.
//!
//! This module provides pre-defined test data that represents common
//! scenarios in raster reading and relief-length fitting.

/// Header sidecar texts for testing.
pub mod headers {
    /// A valid 4x3 little-endian header.
    pub const SMALL_LSB: &str = "ncols 4
nrows 3
xllcorner 441000
yllcorner 4120000
cellsize 10
NODATA_value -9999
byteorder LSBFIRST
";

    /// A valid 2x2 header declaring a big-endian payload.
    pub const SMALL_MSB: &str = "ncols 2
nrows 2
xllcorner 0
yllcorner 0
cellsize 1
NODATA_value -9999
byteorder MSBFIRST
";

    /// Header whose cellsize is not a number.
    pub const BAD_CELLSIZE: &str = "ncols 4
nrows 3
xllcorner 441000
yllcorner 4120000
cellsize ten
NODATA_value -9999
byteorder LSBFIRST
";

    /// Header that stops before the byteorder line.
    pub const TRUNCATED: &str = "ncols 4
nrows 3
xllcorner 441000
yllcorner 4120000
cellsize 10
NODATA_value -9999
";

    /// A 3x2 ESRI ASCII grid with one nodata cell.
    pub const ASCII_3X2: &str = "ncols 3
nrows 2
xllcorner 500000
yllcorner 4000000
cellsize 2
NODATA_value -9999
1.5 2.5 -9999
4 5 6
";
}

/// Raster geometries for testing.
pub mod grid {
    /// A 1 m lidar clip, wider than it is tall.
    pub const LIDAR_CLIP: GridSpec = GridSpec {
        ncols: 400,
        nrows: 300,
        xllcorner: 441000.0,
        yllcorner: 4120000.0,
        cellsize: 1.0,
    };

    /// A 10 m DEM, taller than it is wide.
    pub const TALL_DEM: GridSpec = GridSpec {
        ncols: 100,
        nrows: 250,
        xllcorner: 500000.0,
        yllcorner: 4000000.0,
        cellsize: 10.0,
    };

    /// Raster geometry for testing.
    #[derive(Debug, Clone, Copy)]
    pub struct GridSpec {
        pub ncols: usize,
        pub nrows: usize,
        pub xllcorner: f64,
        pub yllcorner: f64,
        pub cellsize: f64,
    }

    impl GridSpec {
        /// Returns the total number of grid cells.
        pub fn size(&self) -> usize {
            self.ncols * self.nrows
        }

        /// Returns the extent as (x_min, y_min, x_max, y_max) in map units.
        pub fn extent(&self) -> (f64, f64, f64, f64) {
            (
                self.xllcorner,
                self.yllcorner,
                self.xllcorner + self.ncols as f64 * self.cellsize,
                self.yllcorner + self.nrows as f64 * self.cellsize,
            )
        }

        /// Header sidecar text for this geometry.
        pub fn hdr_text(&self, nodata: f64) -> String {
            format!(
                "ncols {}\nnrows {}\nxllcorner {}\nyllcorner {}\ncellsize {}\nNODATA_value {}\nbyteorder LSBFIRST\n",
                self.ncols, self.nrows, self.xllcorner, self.yllcorner, self.cellsize, nodata
            )
        }
    }
}

/// Published physical constants for the field sites.
pub mod sites {
    /// Sierra Nevada diffusivity (m^2/yr).
    pub const SIERRA_DIFFUSIVITY: f64 = 0.0086;
    /// Sierra Nevada erosion rate (mm/yr).
    pub const SIERRA_EROSION_RATE: f64 = 0.25;
    /// Rock density (kg/m^3).
    pub const ROCK_DENSITY: f64 = 2400.0;
    /// Soil density (kg/m^3).
    pub const SOIL_DENSITY: f64 = 1400.0;
    /// Starting guess for the critical gradient.
    pub const INITIAL_SC: f64 = 0.8;

    pub const LOCATIONS: [&str; 4] = [
        "Coweeta",
        "Oregon Coast Range",
        "Gabilan Mesa",
        "Sierra Nevada",
    ];
}

/// Small (length, relief) data sets.
pub mod samples {
    /// Three hillslopes with a known fit under the Sierra constants.
    pub const SCENARIO: [(f64, f64); 3] = [(50.0, 40.0), (100.0, 65.0), (150.0, 80.0)];

    /// Critical gradient the scenario converges to.
    pub const SCENARIO_SC: f64 = 0.58598;

    /// Goodness of fit at [`SCENARIO_SC`].
    pub const SCENARIO_R_SQUARED: f64 = 0.73257;
}
