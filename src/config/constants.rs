// Grid Geometry Constants
pub const GRID_RESOLUTION_DEG: f64 = 0.75;           // Angular cell size of the world grid
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// Standard Atmosphere Constants (reference state used for air density at hub height)
pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;
pub const STANDARD_TEMPERATURE_K: f64 = 288.15;
pub const TEMPERATURE_LAPSE_RATE_K_PER_M: f64 = 0.0065;
pub const BAROMETRIC_EXPONENT: f64 = 5.255;
pub const SPECIFIC_GAS_CONSTANT_AIR: f64 = 287.05;   // J/(kg·K)

// Turbine Constants
pub const HUB_HEIGHT_M: f64 = 100.0;
pub const LOWER_WIND_LEVEL_M: f64 = 71.0;            // Reference heights of the wind statistics
pub const UPPER_WIND_LEVEL_M: f64 = 125.0;
pub const CUT_OUT_SPEED_MS: f64 = 25.0;
pub const MAX_POWER_COEFFICIENT: f64 = 0.5;
pub const WEIBULL_SHAPE_EXPONENT: f64 = -1.086;      // Empirical mean/std fit for the shape factor

// Offshore Wind Coastal Derating
// EU report keeps 4 % within 10 km, 10 % within 50 km, 25 % beyond;
// NREL keeps 10 % within 5 Nm, 33 % within 20 Nm, 67 % beyond.
pub const OFFSHORE_FAR_BAND_KM: f64 = 37.04;         // 20 nautical miles
pub const OFFSHORE_NEAR_BAND_KM: f64 = 9.26;         // 5 nautical miles
pub const OFFSHORE_FAR_SHARE: f64 = 0.67;
pub const OFFSHORE_MID_SHARE: f64 = 0.33;
pub const OFFSHORE_NEAR_SHARE: f64 = 0.1;

// Solar Constants
pub const STC_IRRADIANCE_W_PER_SQM: f64 = 1000.0;    // Standard test condition irradiance

// Unit Conversions
pub const SECONDS_PER_YEAR: f64 = 8760.0 * 3600.0;
pub const GIGAJOULE: f64 = 1e9;                      // J
pub const JOULES_PER_EXAJOULE: f64 = 1e18;
pub const WATTS_PER_GIGAWATT: f64 = 1e9;
pub const SQM_PER_SQKM: f64 = 1e6;

// Wide Input Table Shape
pub const WIDE_TABLE_COLUMNS: usize = 46;            // Only the first 46 columns are meaningful

// Landmass Exclusion Policy
// Small and polar landmasses where no grid-scale RES build-out is considered
pub const EXCLUDED_COUNTRIES: &[&str] = &[
    "Antarctica",
    "Greenland",
    "French Southern & Antarctic Lands",
];
pub const EXCLUDED_NAME_PATTERNS: &[&str] = &["Island", "Is."];
