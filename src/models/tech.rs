// Technology enum and per-technology configuration lookups

use std::fmt;

use crate::config::model_config::ModelConfig;

/// Grid-scale technologies the model resolves per cell. CSP only gets
/// suitability and area resolution; it carries no energy model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technology {
    OnshoreWind,
    OffshoreWind,
    UtilityPv,
    Csp,
}

impl Technology {
    pub const ALL: [Technology; 4] = [
        Technology::OnshoreWind,
        Technology::OffshoreWind,
        Technology::UtilityPv,
        Technology::Csp,
    ];

    /// Fraction of time the installation is operational.
    pub fn availability_factor(&self, config: &ModelConfig) -> f64 {
        match self {
            Technology::OnshoreWind => config.avail_factor_onshore,
            Technology::OffshoreWind => config.avail_factor_offshore,
            Technology::UtilityPv | Technology::Csp => 1.0,
        }
    }

    /// Share of gross output consumed by the installation itself.
    pub fn operational_fraction(&self, config: &ModelConfig) -> f64 {
        match self {
            Technology::OnshoreWind => config.oe_wind_onshore,
            Technology::OffshoreWind => config.oe_wind_offshore,
            Technology::UtilityPv | Technology::Csp => config.oe_pv,
        }
    }

    /// Operating lifetime [years].
    pub fn life_time(&self, config: &ModelConfig) -> f64 {
        match self {
            Technology::OnshoreWind | Technology::OffshoreWind => config.wind_life_time,
            Technology::UtilityPv | Technology::Csp => config.pv_life_time,
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Technology::OnshoreWind => write!(f, "OnshoreWind"),
            Technology::OffshoreWind => write!(f, "OffshoreWind"),
            Technology::UtilityPv => write!(f, "UtilityPv"),
            Technology::Csp => write!(f, "Csp"),
        }
    }
}
