use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One row of the wide input table, as loaded.
///
/// Numeric fields that are blank in the source parse to NaN; whether a
/// NaN disqualifies the cell or simply propagates is decided by the
/// grid builder, not the loader. `dist_coast` is signed: the sign
/// encodes the land/sea side of the coastline in the source data, so
/// the raw value is used for coastal banding and the absolute value
/// for distances.
#[derive(Debug, Clone)]
pub struct RawCellRecord {
    pub country: Option<String>,
    pub lat: f64,
    pub lon: f64,
    /// Elevation [m], negative = water depth
    pub elev: f64,
    /// Distance to coast [km], signed
    pub dist_coast: f64,
    pub wind_mean71: f64,
    pub wind_std71: f64,
    pub wind_mean125: f64,
    pub wind_std125: f64,
    /// Annual-mean global horizontal irradiance [W/m²]
    pub ghi: f64,
    /// Pre-optimized rated wind speed [m/s]
    pub v_r_opti: f64,
    /// Pre-optimized turbine areal density [turbines/m²]
    pub n_opti: f64,
    /// Fractional land-cover share per cover class, resolver input only
    pub covers: HashMap<String, f64>,
}

/// A grid cell after the geometry, suitability and wind-field stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridCell {
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub elev: f64,
    pub dist_coast: f64,
    pub ghi: f64,
    pub v_r_opti: f64,
    pub n_opti: f64,

    /// Total cell area [m²]
    pub area: f64,
    pub wind_sf_onshore: f64,
    pub wind_sf_offshore: f64,
    pub pv_sf: f64,
    pub csp_sf: f64,
    /// Suitable areas [m²]
    pub wind_area_onshore: f64,
    pub wind_area_offshore: f64,
    pub pv_area: f64,
    pub csp_area: f64,

    /// Wind statistics at hub height [m/s]
    pub wind_mean100: f64,
    pub wind_std100: f64,
    /// Weibull shape factor, NaN when the cell has no wind climate
    pub weibull_k: f64,
    /// Weibull scale factor [m/s]
    pub weibull_c: f64,
    /// Air density at hub height [kg/m³]
    pub air_density: f64,
}

/// A grid cell with its per-technology energy balance. Energies are
/// annual and in EJ/yr; embodied-energy intensities in J/GW.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellPotential {
    pub cell: GridCell,

    pub inputs_gw_onshore: f64,
    pub inputs_gw_offshore: f64,

    pub wind_onshore_e: f64,
    pub wind_offshore_e: f64,
    pub wind_e: f64,
    pub wind_onshore_e_in: f64,
    pub wind_offshore_e_in: f64,
    pub wind_e_in: f64,
    pub wind_onshore_eroi: f64,
    pub wind_offshore_eroi: f64,
    pub wind_eroi: f64,

    pub pv_e: f64,
    pub pv_e_in: f64,
    pub pv_eroi: f64,
}

/// Per-country rooftop PV stock, as loaded (areas in km²).
#[derive(Debug, Clone)]
pub struct RooftopAreas {
    pub country: String,
    pub residential_km2: f64,
    pub commercial_km2: f64,
}

/// Country-level rooftop PV balance. Energies in EJ/yr.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RooftopRecord {
    pub country: String,
    pub residential_km2: f64,
    pub commercial_km2: f64,
    /// Mean GHI over the country's grid cells [W/m²]
    pub ghi: f64,

    pub residential_e: f64,
    pub commercial_e: f64,
    pub residential_e_in: f64,
    pub commercial_e_in: f64,
    pub pv_e: f64,
    pub pv_e_in: f64,
    pub pv_eroi: f64,
}
