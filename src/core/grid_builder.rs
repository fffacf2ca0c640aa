use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;

use crate::config::constants::*;
use crate::config::model_config::ModelConfig;
use crate::core::suitability::SuitabilityTables;
use crate::error::ModelError;
use crate::models::cell::{GridCell, RawCellRecord};
use crate::utils::logging::{self, OperationCategory};
use crate::utils::math;

/// Build the world grid: filter out cells where no RES can presumably
/// be installed, then derive geometry, suitability and wind-field
/// parameters for the remaining ones.
///
/// Every derived field depends only on the cell's own attributes plus
/// the configuration, so the derivation runs as an order-preserving
/// parallel map; a rebuild from identical inputs yields an identical
/// table.
pub fn build_grid(
    raw: Vec<RawCellRecord>,
    tables: &SuitabilityTables,
    config: &ModelConfig,
) -> Result<Vec<GridCell>, ModelError> {
    let _timing = logging::start_timing("build_grid", OperationCategory::GridBuild);

    let total = raw.len();
    let admitted: Vec<RawCellRecord> = raw
        .into_iter()
        .filter(|record| admits_cell(record, config))
        .collect();
    info!(
        admitted = admitted.len(),
        discarded = total - admitted.len(),
        "filtered grid cells"
    );

    let progress = ProgressBar::new(admitted.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.set_message("deriving cells");

    let cells: Result<Vec<GridCell>, ModelError> = admitted
        .par_iter()
        .map(|record| {
            let cell = derive_cell(record, tables, config);
            progress.inc(1);
            cell
        })
        .collect();
    progress.finish_and_clear();

    cells
}

/// Exclusion invariants: a cell stays only with a known, non-excluded
/// country, finite geography/meteorology, water no deeper than the
/// wind siting limit, and a pre-supplied rated wind speed.
fn admits_cell(record: &RawCellRecord, config: &ModelConfig) -> bool {
    let country_ok = record
        .country
        .as_deref()
        .map(is_admissible_country)
        .unwrap_or(false);

    country_ok
        && record.elev.is_finite()
        && record.dist_coast.is_finite()
        && record.wind_mean71.is_finite()
        && record.wind_std71.is_finite()
        && record.wind_mean125.is_finite()
        && record.wind_std125.is_finite()
        && record.ghi.is_finite()
        && record.elev >= config.max_water_depth_wind
        && record.v_r_opti.is_finite()
}

/// Country exclusion policy: polar and scattered-island landmasses
/// carry no grid-scale build-out.
pub fn is_admissible_country(country: &str) -> bool {
    if EXCLUDED_COUNTRIES.contains(&country) {
        return false;
    }
    !EXCLUDED_NAME_PATTERNS
        .iter()
        .any(|pattern| country.contains(pattern))
}

fn derive_cell(
    record: &RawCellRecord,
    tables: &SuitabilityTables,
    config: &ModelConfig,
) -> Result<GridCell, ModelError> {
    let area = math::cell_area(record.lat);

    let wind_sf_onshore = tables.wind_onshore.factor(&record.covers)?;
    let mut wind_sf_offshore = tables.wind_offshore.factor(&record.covers)?;
    if record.elev < config.max_water_depth_wind {
        // Should already have been removed by the filter
        wind_sf_offshore = 0.0;
    }
    wind_sf_offshore *= offshore_distance_share(record.dist_coast);

    // Solar plants additionally depend on the mean slope of the cell:
    // PV tolerates up to ~30 % slopes, CSP only ~2 %.
    let pv_sf = tables.pv.factor(&record.covers)? * tables.slope_pv.factor(&record.covers)?;
    let csp_sf = tables.csp.factor(&record.covers)? * tables.slope_csp.factor(&record.covers)?;

    // Wind statistics are only available at 71 m and 125 m; the hub
    // height values are the arithmetic mean of the two levels. This is
    // a linear approximation of the wind profile, kept because the
    // economic constants are calibrated against it.
    let wind_mean100 = (record.wind_mean71 + record.wind_mean125) / 2.0;
    let wind_std100 = (record.wind_std71 + record.wind_std125) / 2.0;
    let (weibull_k, weibull_c) = weibull_params(wind_mean100, wind_std100);

    Ok(GridCell {
        country: record.country.clone().unwrap_or_default(),
        lat: record.lat,
        lon: record.lon,
        elev: record.elev,
        dist_coast: record.dist_coast,
        ghi: record.ghi,
        v_r_opti: record.v_r_opti,
        n_opti: record.n_opti,

        area,
        wind_sf_onshore,
        wind_sf_offshore,
        pv_sf,
        csp_sf,
        wind_area_onshore: area * wind_sf_onshore,
        wind_area_offshore: area * wind_sf_offshore,
        pv_area: area * pv_sf,
        csp_area: area * csp_sf,

        wind_mean100,
        wind_std100,
        weibull_k,
        weibull_c,
        air_density: hub_height_air_density(record.elev),
    })
}

/// Offshore wind keeps only a share of the otherwise suitable area,
/// shrinking toward the coast.
pub fn offshore_distance_share(dist_coast_km: f64) -> f64 {
    if dist_coast_km >= OFFSHORE_FAR_BAND_KM {
        OFFSHORE_FAR_SHARE
    } else if dist_coast_km >= OFFSHORE_NEAR_BAND_KM {
        OFFSHORE_MID_SHARE
    } else {
        OFFSHORE_NEAR_SHARE
    }
}

/// Weibull shape and scale factors from the hub-height mean and
/// standard deviation. Empirical fits, valid for realistic wind
/// climates; a cell without wind (mean = 0) has no defined shape
/// factor and yields NaN, which propagates through the dependent
/// columns instead of aborting the batch.
pub fn weibull_params(mean100: f64, std100: f64) -> (f64, f64) {
    if !(mean100 > 0.0) {
        return (f64::NAN, f64::NAN);
    }
    let k = (std100 / mean100).powf(WEIBULL_SHAPE_EXPONENT);
    let c = mean100 / math::gamma(1.0 + 1.0 / k);
    (k, c)
}

/// Air density at the hub height of a turbine standing at the given
/// elevation (sea-surface for offshore cells).
pub fn hub_height_air_density(elev: f64) -> f64 {
    air_density_at_height(elev.max(0.0) + HUB_HEIGHT_M)
}

/// Barometric air density at height z, at the standard reference
/// temperature (no per-cell temperature correction).
pub fn air_density_at_height(z: f64) -> f64 {
    let pressure = STANDARD_PRESSURE_PA
        * (1.0 - TEMPERATURE_LAPSE_RATE_K_PER_M * z / STANDARD_TEMPERATURE_K)
            .powf(BAROMETRIC_EXPONENT);
    pressure / (SPECIFIC_GAS_CONSTANT_AIR * STANDARD_TEMPERATURE_K)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::suitability::SuitabilityTable;
    use std::collections::HashMap;

    fn test_tables() -> SuitabilityTables {
        let flat = |name: &str, fraction: f64| {
            SuitabilityTable::from_shares(name, vec![("Grassland".to_string(), fraction)])
        };
        SuitabilityTables {
            wind_onshore: flat("wind_onshore", 0.5),
            wind_offshore: flat("wind_offshore", 0.4),
            pv: flat("pv", 0.3),
            csp: flat("csp", 0.2),
            slope_pv: flat("slope_pv", 0.9),
            slope_csp: flat("slope_csp", 0.6),
        }
    }

    fn test_record(country: Option<&str>) -> RawCellRecord {
        let mut covers = HashMap::new();
        covers.insert("Grassland".to_string(), 1.0);
        RawCellRecord {
            country: country.map(str::to_string),
            lat: 48.0,
            lon: 5.25,
            elev: 120.0,
            dist_coast: 250.0,
            wind_mean71: 6.2,
            wind_std71: 2.6,
            wind_mean125: 7.0,
            wind_std125: 3.0,
            ghi: 155.0,
            v_r_opti: 11.0,
            n_opti: 1.2e-6,
            covers,
        }
    }

    #[test]
    fn country_exclusion_policy() {
        assert!(is_admissible_country("Iceland"));
        assert!(is_admissible_country("France"));
        assert!(!is_admissible_country("Baker Island"));
        assert!(!is_admissible_country("Faroe Is."));
        assert!(!is_admissible_country("Antarctica"));
        assert!(!is_admissible_country("Greenland"));

        let config = ModelConfig::default();
        assert!(!admits_cell(&test_record(None), &config));
        assert!(admits_cell(&test_record(Some("Iceland")), &config));
    }

    #[test]
    fn cells_below_the_wind_depth_limit_are_dropped() {
        let config = ModelConfig::default();
        let mut record = test_record(Some("France"));
        record.elev = config.max_water_depth_wind - 1.0;
        assert!(!admits_cell(&record, &config));
        record.elev = config.max_water_depth_wind;
        assert!(admits_cell(&record, &config));
    }

    #[test]
    fn missing_rated_speed_drops_the_cell() {
        let config = ModelConfig::default();
        let mut record = test_record(Some("France"));
        record.v_r_opti = f64::NAN;
        assert!(!admits_cell(&record, &config));
    }

    #[test]
    fn offshore_share_steps_down_toward_the_coast() {
        assert!((offshore_distance_share(100.0) - OFFSHORE_FAR_SHARE).abs() < 1e-12);
        assert!((offshore_distance_share(37.04) - OFFSHORE_FAR_SHARE).abs() < 1e-12);
        assert!((offshore_distance_share(37.03) - OFFSHORE_MID_SHARE).abs() < 1e-12);
        assert!((offshore_distance_share(9.26) - OFFSHORE_MID_SHARE).abs() < 1e-12);
        assert!((offshore_distance_share(9.25) - OFFSHORE_NEAR_SHARE).abs() < 1e-12);

        let mut previous = f64::INFINITY;
        for km in [200.0, 37.04, 20.0, 9.26, 5.0, 0.0] {
            let share = offshore_distance_share(km);
            assert!(share <= previous);
            previous = share;
        }
    }

    #[test]
    fn weibull_factors_positive_for_real_wind_climates() {
        let (k, c) = weibull_params(7.0, 3.0);
        assert!(k > 0.0);
        assert!(c > 0.0);
        // Justus fit: k = (std/mean)^-1.086
        assert!((k - (3.0_f64 / 7.0).powf(-1.086)).abs() < 1e-12);
    }

    #[test]
    fn weibull_shape_is_undefined_without_wind() {
        let (k, c) = weibull_params(0.0, 2.0);
        assert!(k.is_nan());
        assert!(c.is_nan());
    }

    #[test]
    fn air_density_reference_value_and_monotonicity() {
        let at_sea_level = air_density_at_height(0.0);
        assert!((at_sea_level - 101_325.0 / (287.05 * 288.15)).abs() < 1e-12);

        let mut previous = f64::INFINITY;
        for z in [0.0, 100.0, 500.0, 1000.0, 3000.0] {
            let density = air_density_at_height(z);
            assert!(density < previous);
            previous = density;
        }
    }

    #[test]
    fn suitable_areas_stay_within_the_cell() {
        let config = ModelConfig::default();
        let cell = derive_cell(&test_record(Some("France")), &test_tables(), &config).unwrap();
        for suitable in [
            cell.wind_area_onshore,
            cell.wind_area_offshore,
            cell.pv_area,
            cell.csp_area,
        ] {
            assert!(suitable >= 0.0);
            assert!(suitable <= cell.area);
        }
        // Same latitude, different longitude: identical area
        let mut shifted = test_record(Some("France"));
        shifted.lon = -120.0;
        let other = derive_cell(&shifted, &test_tables(), &config).unwrap();
        assert_eq!(cell.area, other.area);
    }
}
