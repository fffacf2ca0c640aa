use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::constants::GIGAJOULE;
use crate::error::ModelError;

/// All economic and technology constants of the potential model.
///
/// The configuration is an explicit value handed to each component, so
/// the model stays pure and can be re-run with alternate constant sets
/// (sensitivity analysis) without touching global state. Embodied
/// energies are in J/GW installed, per-km terms in J/GW/km, lifetimes
/// in years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Minimum elevation (maximum water depth, negative) for wind siting [m]
    pub max_water_depth_wind: f64,
    /// Depth limit of bottom-fixed offshore foundations [m]
    pub max_fixed_foundation_depth: f64,

    // Wind embodied energy [J/GW]
    pub fixed_onshore: f64,
    pub fixed_offshore_fixed: f64,
    pub fixed_offshore_floating: f64,
    /// Bottom-fixed foundation package, scaled by the depth step factor [J/GW]
    pub offshore_fixed_foundations: f64,

    // Distance-to-coast scaled terms [J/GW/km]
    pub onshore_om_per_km: f64,
    pub onshore_installation_per_km: f64,
    pub offshore_om_per_km: f64,
    pub offshore_installation_per_km: f64,
    pub offshore_cable_per_km: f64,

    pub wind_life_time: f64,
    pub avail_factor_onshore: f64,
    pub avail_factor_offshore: f64,
    /// Rotor diameter of the reference turbine [m]
    pub rotor_diameter: f64,

    pub pv_life_time: f64,
    /// Lifecycle embodied energy of utility/rooftop PV [J/GW]
    pub pv_life_time_inputs: f64,
    /// Panel areal power density at standard test conditions [W/m²]
    pub pv_panel_watts_per_sqm: f64,
    /// Ground coverage ratio of utility PV fields
    pub pv_ground_coverage_ratio: f64,
    pub pv_performance_ratio: f64,

    /// Usable share of the mapped rooftop stock
    pub sf_residential: f64,
    pub sf_commercial: f64,

    // Operational self-consumption fractions
    pub oe_wind_onshore: f64,
    pub oe_wind_offshore: f64,
    pub oe_pv: f64,
    /// Deduct operational energy from outputs before computing EROI
    pub remove_operational_e: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_water_depth_wind: -1000.0,       // Floating foundations down to 1000 m
            max_fixed_foundation_depth: -40.0,

            fixed_onshore: 13_744_075.0 * GIGAJOULE,
            fixed_offshore_fixed: 18_185_974.0 * GIGAJOULE,
            fixed_offshore_floating: 26_670_974.0 * GIGAJOULE,
            offshore_fixed_foundations: 3_865_754.0 * GIGAJOULE,

            onshore_om_per_km: 4_000.0 * GIGAJOULE,
            onshore_installation_per_km: 1_500.0 * GIGAJOULE,
            offshore_om_per_km: 5_000.0 * GIGAJOULE,
            offshore_installation_per_km: 2_000.0 * GIGAJOULE,
            offshore_cable_per_km: 4_050.0 * GIGAJOULE,

            wind_life_time: 20.0,
            avail_factor_onshore: 0.97,
            avail_factor_offshore: 0.95,
            rotor_diameter: 90.0,

            pv_life_time: 25.0,
            pv_life_time_inputs: 14_500_000.0 * GIGAJOULE,
            pv_panel_watts_per_sqm: 175.0,
            pv_ground_coverage_ratio: 0.4,
            pv_performance_ratio: 0.81,

            sf_residential: 0.25,
            sf_commercial: 0.60,

            oe_wind_onshore: 0.01,
            oe_wind_offshore: 0.02,
            oe_pv: 0.01,
            remove_operational_e: true,
        }
    }
}

impl ModelConfig {
    /// Load a configuration from a JSON file. Every field is required;
    /// a missing constant is a fatal configuration error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let file = File::open(path.as_ref())?;
        let config: ModelConfig = serde_json::from_reader(file).map_err(|e| {
            ModelError::Configuration(format!(
                "failed to parse {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject constant sets that cannot describe a physical system.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.wind_life_time <= 0.0 || self.pv_life_time <= 0.0 {
            return Err(ModelError::Configuration(
                "technology lifetimes must be positive".to_string(),
            ));
        }
        if self.rotor_diameter <= 0.0 {
            return Err(ModelError::Configuration(
                "rotor diameter must be positive".to_string(),
            ));
        }
        let fractions = [
            ("avail_factor_onshore", self.avail_factor_onshore),
            ("avail_factor_offshore", self.avail_factor_offshore),
            ("pv_ground_coverage_ratio", self.pv_ground_coverage_ratio),
            ("pv_performance_ratio", self.pv_performance_ratio),
            ("sf_residential", self.sf_residential),
            ("sf_commercial", self.sf_commercial),
            ("oe_wind_onshore", self.oe_wind_onshore),
            ("oe_wind_offshore", self.oe_wind_offshore),
            ("oe_pv", self.oe_pv),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ModelError::Configuration(format!(
                    "{} must lie in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.max_water_depth_wind >= 0.0 {
            return Err(ModelError::Configuration(
                "max_water_depth_wind is a depth and must be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ModelConfig::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_fraction_is_rejected() {
        let mut config = ModelConfig::default();
        config.oe_pv = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ModelError::Configuration(_))
        ));
    }

    #[test]
    fn missing_field_in_file_is_a_configuration_error() {
        let dir = std::env::temp_dir().join("resgrid_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("partial.json");
        std::fs::write(&path, "{\"wind_life_time\": 20.0}").unwrap();
        assert!(matches!(
            ModelConfig::from_file(&path),
            Err(ModelError::Configuration(_))
        ));
    }
}
