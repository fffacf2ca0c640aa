// Solar energy model: a direct irradiance × collector-area product for
// the output, panel areal power density for the installed capacity,
// and the lifecycle-input/lifetime ratio for the embodied input.

use crate::config::constants::*;
use crate::config::model_config::ModelConfig;

/// Expected annual electrical energy of a PV installation [J/yr].
///
/// `effective_area` is the panel area after packing adjustments
/// (ground coverage ratio for utility fields, usable-roof share for
/// rooftop stock). Module efficiency follows from the panel areal
/// power density at standard test conditions.
pub fn energy_output(ghi: f64, effective_area: f64, config: &ModelConfig) -> f64 {
    let module_efficiency = config.pv_panel_watts_per_sqm / STC_IRRADIANCE_W_PER_SQM;
    ghi * effective_area * module_efficiency * config.pv_performance_ratio * SECONDS_PER_YEAR
}

/// Installed capacity of the panel area [GW].
pub fn installed_capacity_gw(effective_area: f64, config: &ModelConfig) -> f64 {
    config.pv_panel_watts_per_sqm * effective_area / WATTS_PER_GIGAWATT
}

/// Lifetime embodied energy of the installation [J]; the caller
/// annualizes over the PV lifetime.
pub fn energy_input(installed_capacity_gw: f64, config: &ModelConfig) -> f64 {
    installed_capacity_gw * config.pv_life_time_inputs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_scales_linearly_with_irradiance_and_area() {
        let config = ModelConfig::default();
        let base = energy_output(150.0, 1.0e6, &config);
        assert!(base > 0.0);
        assert!((energy_output(300.0, 1.0e6, &config) - 2.0 * base).abs() < base * 1e-12);
        assert!((energy_output(150.0, 2.0e6, &config) - 2.0 * base).abs() < base * 1e-12);
    }

    #[test]
    fn capacity_follows_the_panel_power_density() {
        let config = ModelConfig::default();
        let capacity = installed_capacity_gw(1.0e6, &config);
        assert!((capacity - config.pv_panel_watts_per_sqm * 1.0e6 / 1e9).abs() < 1e-12);
    }

    #[test]
    fn annualized_input_uses_the_lifecycle_ratio() {
        let config = ModelConfig::default();
        let capacity = installed_capacity_gw(1.0e6, &config);
        let lifetime_input = energy_input(capacity, &config);
        assert!((lifetime_input - capacity * config.pv_life_time_inputs).abs() < 1e-3);
    }
}
