use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::Writer;
use tracing::info;

use crate::error::ModelError;
use crate::models::cell::{CellPotential, RooftopRecord};
use crate::utils::logging::{self, OperationCategory};

/// Writes the derived tables to timestamped CSV files. Persistence is
/// an outer surface around the in-memory result, not part of the
/// model itself.
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: &Path) -> Result<Self, ModelError> {
        fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    fn timestamped(&self, prefix: &str) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        self.output_dir.join(format!("{}_{}.csv", prefix, stamp))
    }

    pub fn export_cells(&self, potentials: &[CellPotential]) -> Result<PathBuf, ModelError> {
        let _timing = logging::start_timing("export_cells", OperationCategory::Export);
        let path = self.timestamped("cell_potential");
        let mut writer = Writer::from_path(&path)?;

        writer.write_record([
            "Country",
            "Lat",
            "Lon",
            "Elev",
            "DistCoast",
            "GHI",
            "Area",
            "wind_area_onshore",
            "wind_area_offshore",
            "pv_area",
            "csp_area",
            "WindMean100",
            "WindStd100",
            "k",
            "c",
            "air_density",
            "inputs_gw_onshore",
            "inputs_gw_offshore",
            "wind_onshore_e",
            "wind_offshore_e",
            "wind_e",
            "wind_onshore_e_in",
            "wind_offshore_e_in",
            "wind_e_in",
            "wind_onshore_eroi",
            "wind_offshore_eroi",
            "wind_eroi",
            "pv_e",
            "pv_e_in",
            "pv_eroi",
        ])?;

        for p in potentials {
            let c = &p.cell;
            writer.write_record([
                c.country.clone(),
                c.lat.to_string(),
                c.lon.to_string(),
                c.elev.to_string(),
                c.dist_coast.to_string(),
                c.ghi.to_string(),
                c.area.to_string(),
                c.wind_area_onshore.to_string(),
                c.wind_area_offshore.to_string(),
                c.pv_area.to_string(),
                c.csp_area.to_string(),
                c.wind_mean100.to_string(),
                c.wind_std100.to_string(),
                c.weibull_k.to_string(),
                c.weibull_c.to_string(),
                c.air_density.to_string(),
                p.inputs_gw_onshore.to_string(),
                p.inputs_gw_offshore.to_string(),
                p.wind_onshore_e.to_string(),
                p.wind_offshore_e.to_string(),
                p.wind_e.to_string(),
                p.wind_onshore_e_in.to_string(),
                p.wind_offshore_e_in.to_string(),
                p.wind_e_in.to_string(),
                p.wind_onshore_eroi.to_string(),
                p.wind_offshore_eroi.to_string(),
                p.wind_eroi.to_string(),
                p.pv_e.to_string(),
                p.pv_e_in.to_string(),
                p.pv_eroi.to_string(),
            ])?;
        }
        writer.flush()?;
        info!(rows = potentials.len(), path = %path.display(), "exported cell table");
        Ok(path)
    }

    pub fn export_rooftop(&self, records: &[RooftopRecord]) -> Result<PathBuf, ModelError> {
        let _timing = logging::start_timing("export_rooftop", OperationCategory::Export);
        let path = self.timestamped("rooftop_pv");
        let mut writer = Writer::from_path(&path)?;

        writer.write_record([
            "Country",
            "Area PV Residential",
            "Area PV Commercial",
            "GHI",
            "residential_e",
            "commercial_e",
            "residential_e_in",
            "commercial_e_in",
            "pv_e",
            "pv_e_in",
            "pv_eroi",
        ])?;

        for r in records {
            writer.write_record([
                r.country.clone(),
                r.residential_km2.to_string(),
                r.commercial_km2.to_string(),
                r.ghi.to_string(),
                r.residential_e.to_string(),
                r.commercial_e.to_string(),
                r.residential_e_in.to_string(),
                r.commercial_e_in.to_string(),
                r.pv_e.to_string(),
                r.pv_e_in.to_string(),
                r.pv_eroi.to_string(),
            ])?;
        }
        writer.flush()?;
        info!(rows = records.len(), path = %path.display(), "exported rooftop table");
        Ok(path)
    }
}
