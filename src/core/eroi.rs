// EROI aggregation: per-cell technology energy balances, and the
// country-level rooftop PV pipeline fed by the grid's per-country
// irradiance aggregate.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::info;

use crate::config::constants::{JOULES_PER_EXAJOULE, SQM_PER_SQKM};
use crate::config::model_config::ModelConfig;
use crate::core::{solar_power, wind_power};
use crate::models::cell::{CellPotential, GridCell, RooftopAreas, RooftopRecord};
use crate::models::tech::Technology;
use crate::utils::logging::{self, OperationCategory};

/// Countries whose rooftop-table key does not resolve against the grid
/// join; each falls back to the mean GHI of a neighbouring market.
const GHI_FALLBACKS: &[(&str, &str)] = &[
    ("Singapore", "Malaysia"),
    ("Bahrain", "Qatar"),
    ("Chinese Taipei", "China"),
    ("Hong Kong, China", "China"),
    ("Kosovo", "Montenegro"),
];

/// Countries zeroed outright: no usable irradiance aggregate exists.
const GHI_ZEROED: &[&str] = &["Netherlands Antilles", "Gibraltar"];

/// Extend every grid cell with its wind and utility-PV energy balance.
/// Energies are annual, in EJ/yr; EROI is always output over input,
/// never floored.
pub fn compute_potentials(cells: Vec<GridCell>, config: &ModelConfig) -> Vec<CellPotential> {
    let _timing = logging::start_timing("compute_potentials", OperationCategory::EnergyModel);
    let potentials: Vec<CellPotential> = cells
        .into_par_iter()
        .map(|cell| cell_potential(cell, config))
        .collect();
    info!(cells = potentials.len(), "computed cell energy balances");
    potentials
}

fn cell_potential(cell: GridCell, config: &ModelConfig) -> CellPotential {
    let onshore = Technology::OnshoreWind;
    let offshore = Technology::OffshoreWind;
    let pv = Technology::UtilityPv;

    // Embodied energy intensities [J/GW]
    let inputs_gw_onshore = wind_power::onshore_inputs_per_gw(cell.dist_coast, config);
    let inputs_gw_offshore = wind_power::offshore_inputs_per_gw(cell.elev, cell.dist_coast, config);

    // Annual outputs [EJ/yr]
    let mut wind_onshore_e = wind_power::energy_output(
        cell.v_r_opti,
        cell.n_opti,
        cell.weibull_c,
        cell.weibull_k,
        cell.air_density,
        cell.wind_area_onshore,
        onshore.availability_factor(config),
        config,
    ) / JOULES_PER_EXAJOULE;
    let mut wind_offshore_e = wind_power::energy_output(
        cell.v_r_opti,
        cell.n_opti,
        cell.weibull_c,
        cell.weibull_k,
        cell.air_density,
        cell.wind_area_offshore,
        offshore.availability_factor(config),
        config,
    ) / JOULES_PER_EXAJOULE;
    if config.remove_operational_e {
        wind_onshore_e *= 1.0 - onshore.operational_fraction(config);
        wind_offshore_e *= 1.0 - offshore.operational_fraction(config);
    }
    let wind_e = wind_onshore_e + wind_offshore_e;

    // Annualized inputs [EJ/yr]
    let wind_onshore_e_in = wind_power::energy_input(
        cell.v_r_opti,
        cell.n_opti,
        cell.air_density,
        cell.wind_area_onshore,
        inputs_gw_onshore,
        config,
    ) / JOULES_PER_EXAJOULE
        / onshore.life_time(config);
    let wind_offshore_e_in = wind_power::energy_input(
        cell.v_r_opti,
        cell.n_opti,
        cell.air_density,
        cell.wind_area_offshore,
        inputs_gw_offshore,
        config,
    ) / JOULES_PER_EXAJOULE
        / offshore.life_time(config);
    let wind_e_in = wind_onshore_e_in + wind_offshore_e_in;

    // Utility PV with the packing-adjusted collector area
    let effective_pv_area = cell.pv_area * config.pv_ground_coverage_ratio;
    let mut pv_e =
        solar_power::energy_output(cell.ghi, effective_pv_area, config) / JOULES_PER_EXAJOULE;
    if config.remove_operational_e {
        pv_e *= 1.0 - pv.operational_fraction(config);
    }
    let pv_capacity_gw = solar_power::installed_capacity_gw(effective_pv_area, config);
    let pv_e_in = solar_power::energy_input(pv_capacity_gw, config) / JOULES_PER_EXAJOULE
        / pv.life_time(config);

    CellPotential {
        inputs_gw_onshore,
        inputs_gw_offshore,

        wind_onshore_e,
        wind_offshore_e,
        wind_e,
        wind_onshore_e_in,
        wind_offshore_e_in,
        wind_e_in,
        wind_onshore_eroi: wind_onshore_e / wind_onshore_e_in,
        wind_offshore_eroi: wind_offshore_e / wind_offshore_e_in,
        // Combined over summed energies, not the mean of the ratios
        wind_eroi: wind_e / wind_e_in,

        pv_e,
        pv_e_in,
        pv_eroi: pv_e / pv_e_in,

        cell,
    }
}

/// Mean GHI over each country's grid cells, the aggregate the rooftop
/// pipeline joins against.
pub fn mean_ghi_by_country(cells: &[GridCell]) -> HashMap<String, f64> {
    let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
    for cell in cells {
        let entry = sums.entry(cell.country.clone()).or_insert((0.0, 0));
        entry.0 += cell.ghi;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(country, (sum, count))| (country, sum / count as f64))
        .collect()
}

/// Country-level rooftop PV balance: join the rooftop stock with the
/// grid's mean irradiance, patch the known key mismatches, then run
/// the residential and commercial segments independently through the
/// solar model.
pub fn rooftop_potentials(
    areas: Vec<RooftopAreas>,
    mean_ghi: &HashMap<String, f64>,
    config: &ModelConfig,
) -> Vec<RooftopRecord> {
    let _timing = logging::start_timing("rooftop_potentials", OperationCategory::EnergyModel);

    // First pass: the raw join. Countries absent from the grid
    // aggregate get NaN and either a patch below or NaN propagation.
    let mut joined: Vec<(RooftopAreas, f64)> = areas
        .into_iter()
        .map(|area| {
            let ghi = mean_ghi.get(&area.country).copied().unwrap_or(f64::NAN);
            (area, ghi)
        })
        .collect();

    // The fallback sources are looked up among the joined rows, so a
    // patched country inherits exactly what its neighbour row carries.
    let joined_ghi: HashMap<String, f64> = joined
        .iter()
        .map(|(area, ghi)| (area.country.clone(), *ghi))
        .collect();
    for (area, ghi) in joined.iter_mut() {
        if let Some((_, source)) = GHI_FALLBACKS
            .iter()
            .find(|(target, _)| *target == area.country)
        {
            *ghi = joined_ghi.get(*source).copied().unwrap_or(f64::NAN);
        }
        if GHI_ZEROED.contains(&area.country.as_str()) {
            *ghi = 0.0;
        }
    }

    joined
        .into_iter()
        .map(|(area, ghi)| rooftop_record(area, ghi, config))
        .collect()
}

fn rooftop_record(area: RooftopAreas, ghi: f64, config: &ModelConfig) -> RooftopRecord {
    let residential_m2 = area.residential_km2 * SQM_PER_SQKM * config.sf_residential;
    let commercial_m2 = area.commercial_km2 * SQM_PER_SQKM * config.sf_commercial;

    let mut residential_e =
        solar_power::energy_output(ghi, residential_m2, config) / JOULES_PER_EXAJOULE;
    let mut commercial_e =
        solar_power::energy_output(ghi, commercial_m2, config) / JOULES_PER_EXAJOULE;
    if config.remove_operational_e {
        residential_e *= 1.0 - config.oe_pv;
        commercial_e *= 1.0 - config.oe_pv;
    }

    let residential_gw = solar_power::installed_capacity_gw(residential_m2, config);
    let commercial_gw = solar_power::installed_capacity_gw(commercial_m2, config);
    let residential_e_in = solar_power::energy_input(residential_gw, config)
        / JOULES_PER_EXAJOULE
        / config.pv_life_time;
    let commercial_e_in = solar_power::energy_input(commercial_gw, config)
        / JOULES_PER_EXAJOULE
        / config.pv_life_time;

    let pv_e = residential_e + commercial_e;
    let pv_e_in = residential_e_in + commercial_e_in;

    RooftopRecord {
        country: area.country,
        residential_km2: area.residential_km2,
        commercial_km2: area.commercial_km2,
        ghi,
        residential_e,
        commercial_e,
        residential_e_in,
        commercial_e_in,
        pv_e,
        pv_e_in,
        // The ratio is reported as-is; no floor is applied.
        pv_eroi: pv_e / pv_e_in,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cell() -> GridCell {
        GridCell {
            country: "France".to_string(),
            lat: 48.0,
            lon: 5.25,
            elev: -20.0,
            dist_coast: 40.0,
            ghi: 150.0,
            v_r_opti: 11.0,
            n_opti: 1.2e-6,
            area: 4.0e9,
            wind_sf_onshore: 0.3,
            wind_sf_offshore: 0.1,
            pv_sf: 0.2,
            csp_sf: 0.1,
            wind_area_onshore: 1.2e9,
            wind_area_offshore: 4.0e8,
            pv_area: 8.0e8,
            csp_area: 4.0e8,
            wind_mean100: 7.0,
            wind_std100: 3.0,
            weibull_k: (3.0_f64 / 7.0).powf(-1.086),
            weibull_c: 7.9,
            air_density: 1.22,
        }
    }

    #[test]
    fn combined_wind_eroi_uses_summed_energies() {
        let config = ModelConfig::default();
        let potential = cell_potential(test_cell(), &config);

        let expected = (potential.wind_onshore_e + potential.wind_offshore_e)
            / (potential.wind_onshore_e_in + potential.wind_offshore_e_in);
        assert!((potential.wind_eroi - expected).abs() < 1e-12);

        // With unequal onshore/offshore areas the mean of the two
        // ratios is a different number.
        let mean_of_ratios =
            (potential.wind_onshore_eroi + potential.wind_offshore_eroi) / 2.0;
        assert!((potential.wind_eroi - mean_of_ratios).abs() > 1e-6);
    }

    #[test]
    fn eroi_is_exactly_output_over_input() {
        let config = ModelConfig::default();
        let potential = cell_potential(test_cell(), &config);
        assert!(
            (potential.wind_onshore_eroi
                - potential.wind_onshore_e / potential.wind_onshore_e_in)
                .abs()
                < 1e-12
        );
        assert!((potential.pv_eroi - potential.pv_e / potential.pv_e_in).abs() < 1e-12);
    }

    #[test]
    fn operational_deduction_shrinks_output_not_input() {
        let mut config = ModelConfig::default();
        config.remove_operational_e = false;
        let gross = cell_potential(test_cell(), &config);
        config.remove_operational_e = true;
        let net = cell_potential(test_cell(), &config);

        assert!(
            (net.wind_onshore_e - gross.wind_onshore_e * (1.0 - config.oe_wind_onshore)).abs()
                < 1e-12
        );
        assert!((net.pv_e - gross.pv_e * (1.0 - config.oe_pv)).abs() < 1e-12);
        assert_eq!(net.wind_onshore_e_in, gross.wind_onshore_e_in);
        assert_eq!(net.pv_e_in, gross.pv_e_in);
    }

    #[test]
    fn undefined_wind_climate_propagates_to_wind_columns_only() {
        let config = ModelConfig::default();
        let mut cell = test_cell();
        cell.weibull_k = f64::NAN;
        cell.weibull_c = f64::NAN;
        let potential = cell_potential(cell, &config);
        assert!(potential.wind_onshore_e.is_nan());
        assert!(potential.wind_eroi.is_nan());
        // The solar balance of the cell is untouched.
        assert!(potential.pv_e.is_finite());
        assert!(potential.pv_eroi.is_finite());
    }

    fn rooftop_fixture() -> (Vec<RooftopAreas>, HashMap<String, f64>) {
        let areas = vec![
            RooftopAreas {
                country: "Malaysia".to_string(),
                residential_km2: 900.0,
                commercial_km2: 300.0,
            },
            RooftopAreas {
                country: "Singapore".to_string(),
                residential_km2: 60.0,
                commercial_km2: 40.0,
            },
            RooftopAreas {
                country: "Netherlands Antilles".to_string(),
                residential_km2: 10.0,
                commercial_km2: 5.0,
            },
            RooftopAreas {
                country: "Gibraltar".to_string(),
                residential_km2: 1.0,
                commercial_km2: 0.5,
            },
        ];
        let mut mean_ghi = HashMap::new();
        mean_ghi.insert("Malaysia".to_string(), 190.0);
        (areas, mean_ghi)
    }

    #[test]
    fn rooftop_ghi_overrides() {
        let config = ModelConfig::default();
        let (areas, mean_ghi) = rooftop_fixture();
        let records = rooftop_potentials(areas, &mean_ghi, &config);

        let by_country: HashMap<&str, &RooftopRecord> = records
            .iter()
            .map(|record| (record.country.as_str(), record))
            .collect();

        assert_eq!(by_country["Singapore"].ghi, by_country["Malaysia"].ghi);
        assert_eq!(by_country["Netherlands Antilles"].ghi, 0.0);
        assert_eq!(by_country["Gibraltar"].ghi, 0.0);
    }

    #[test]
    fn rooftop_eroi_has_no_floor() {
        let config = ModelConfig::default();
        let (areas, mean_ghi) = rooftop_fixture();
        let records = rooftop_potentials(areas, &mean_ghi, &config);

        // Zero irradiance means zero output against a real input: the
        // ratio stays at zero instead of being clamped to one.
        let zeroed = records
            .iter()
            .find(|record| record.country == "Gibraltar")
            .unwrap();
        assert!(zeroed.pv_e == 0.0);
        assert!(zeroed.pv_e_in > 0.0);
        assert_eq!(zeroed.pv_eroi, 0.0);
    }

    #[test]
    fn rooftop_segments_sum_into_the_country_balance() {
        let config = ModelConfig::default();
        let (areas, mean_ghi) = rooftop_fixture();
        let records = rooftop_potentials(areas, &mean_ghi, &config);
        let malaysia = records
            .iter()
            .find(|record| record.country == "Malaysia")
            .unwrap();
        assert!(
            (malaysia.pv_e - (malaysia.residential_e + malaysia.commercial_e)).abs() < 1e-12
        );
        assert!(
            (malaysia.pv_e_in - (malaysia.residential_e_in + malaysia.commercial_e_in)).abs()
                < 1e-12
        );
        assert!(malaysia.pv_eroi.is_finite());
    }
}
