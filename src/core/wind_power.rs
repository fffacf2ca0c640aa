// Wind energy model: annual output from the Weibull wind-speed
// distribution, and lifecycle energy input per installed capacity with
// distance- and depth-dependent cost scaling.

use crate::config::constants::*;
use crate::config::model_config::ModelConfig;
use crate::utils::math;

/// Installed capacity of a turbine field covering the suitable area
/// [GW].
///
/// Swept-area physics: rated power per turbine is ½·ρ·Cp·(π/4·D²)·v_r³
/// with the configured rotor diameter; the field holds n·area
/// turbines. The same capacity feeds the output and the input model,
/// so the EROI is insensitive to its absolute scale.
pub fn installed_capacity_gw(
    rated_speed: f64,
    turbine_density: f64,
    air_density: f64,
    suitable_area: f64,
    config: &ModelConfig,
) -> f64 {
    let swept_area = std::f64::consts::FRAC_PI_4 * config.rotor_diameter * config.rotor_diameter;
    let rated_power = 0.5
        * air_density
        * MAX_POWER_COEFFICIENT
        * swept_area
        * rated_speed.powi(3);
    turbine_density * suitable_area * rated_power / WATTS_PER_GIGAWATT
}

/// Capacity factor of a turbine with the given rated speed in a
/// Weibull(k, c) wind climate.
///
/// Closed form of the standard power-curve integration: a cubic ramp
/// up to the rated speed, constant output to the cut-out speed.
/// Undefined wind climates (NaN k or c) propagate as NaN.
pub fn capacity_factor(rated_speed: f64, weibull_c: f64, weibull_k: f64) -> f64 {
    let rated_ratio = (rated_speed / weibull_c).powf(weibull_k);
    let cut_out_ratio = (CUT_OUT_SPEED_MS / weibull_c).powf(weibull_k);
    let ramp = (weibull_c / rated_speed).powi(3)
        * math::lower_incomplete_gamma(1.0 + 3.0 / weibull_k, rated_ratio);
    ramp + (-rated_ratio).exp() - (-cut_out_ratio).exp()
}

/// Expected annual electrical energy of the turbine field [J/yr].
pub fn energy_output(
    rated_speed: f64,
    turbine_density: f64,
    weibull_c: f64,
    weibull_k: f64,
    air_density: f64,
    suitable_area: f64,
    avail_factor: f64,
    config: &ModelConfig,
) -> f64 {
    let capacity_gw =
        installed_capacity_gw(rated_speed, turbine_density, air_density, suitable_area, config);
    capacity_gw
        * WATTS_PER_GIGAWATT
        * capacity_factor(rated_speed, weibull_c, weibull_k)
        * avail_factor
        * SECONDS_PER_YEAR
}

/// Lifetime embodied energy of the turbine field [J]: installed
/// capacity times the per-GW embodied energy of the cell. The caller
/// annualizes over the technology lifetime.
pub fn energy_input(
    rated_speed: f64,
    turbine_density: f64,
    air_density: f64,
    suitable_area: f64,
    inputs_per_gw: f64,
    config: &ModelConfig,
) -> f64 {
    installed_capacity_gw(rated_speed, turbine_density, air_density, suitable_area, config)
        * inputs_per_gw
}

/// Embodied energy per installed GW for onshore wind [J/GW]: a fixed
/// base plus O&M and installation transport scaled with the distance
/// to the coast.
pub fn onshore_inputs_per_gw(dist_coast_km: f64, config: &ModelConfig) -> f64 {
    config.fixed_onshore
        + dist_coast_km.abs() * (config.onshore_om_per_km + config.onshore_installation_per_km)
}

/// Embodied energy per installed GW for offshore wind [J/GW].
///
/// Bottom-fixed foundations apply down to the fixed-foundation depth
/// limit, with the foundation package scaled by a depth step factor;
/// deeper cells switch to the floating-foundation base. O&M,
/// installation and cabling scale with the distance to the coast.
pub fn offshore_inputs_per_gw(elev: f64, dist_coast_km: f64, config: &ModelConfig) -> f64 {
    let base = if elev > config.max_fixed_foundation_depth {
        config.fixed_offshore_fixed
            + foundation_scaling_factor(elev) * config.offshore_fixed_foundations
    } else {
        config.fixed_offshore_floating
    };
    base + dist_coast_km.abs()
        * (config.offshore_om_per_km
            + config.offshore_installation_per_km
            + config.offshore_cable_per_km)
}

/// Depth step factor of the bottom-fixed foundation package. One band
/// per cell; beyond the fixed-foundation regime the factor is zero
/// because the floating base applies instead.
pub fn foundation_scaling_factor(elev: f64) -> f64 {
    match elev {
        d if d > -15.0 => 1.0,
        d if d > -20.0 => 1.08,
        d if d > -25.0 => 1.34,
        d if d > -30.0 => 1.57,
        d if d > -35.0 => 1.95,
        d if d > -40.0 => 2.19,
        _ => 0.0,
    }
}
