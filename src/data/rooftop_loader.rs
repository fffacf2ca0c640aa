use std::path::Path;

use tracing::info;

use crate::data::table_io::{column_index, parse_float, read_column_names, read_tab_rows};
use crate::error::ModelError;
use crate::models::cell::RooftopAreas;
use crate::utils::logging::{self, OperationCategory};

/// Column-mapping file for the rooftop table (comma-delimited).
pub const ROOFTOP_COL_NAMES_FILE: &str = "Col_names_solarRooftop";
/// Per-country rooftop stock table, areas in km².
pub const ROOFTOP_TABLE_FILE: &str = "rooftop_area";

const COUNTRY_COLUMN: &str = "Country";
const RESIDENTIAL_COLUMN: &str = "Area PV Residential";
const COMMERCIAL_COLUMN: &str = "Area PV Commercial";

/// Load the per-country rooftop PV areas from the data directory.
pub fn load_rooftop_areas(data_dir: &Path) -> Result<Vec<RooftopAreas>, ModelError> {
    let _timing = logging::start_timing("load_rooftop_areas", OperationCategory::DataLoad);

    let names = read_column_names(&data_dir.join(ROOFTOP_COL_NAMES_FILE), ',')?;
    let country_idx = column_index(&names, COUNTRY_COLUMN)?;
    let residential_idx = column_index(&names, RESIDENTIAL_COLUMN)?;
    let commercial_idx = column_index(&names, COMMERCIAL_COLUMN)?;

    let rows = read_tab_rows(&data_dir.join(ROOFTOP_TABLE_FILE))?;
    let mut areas = Vec::with_capacity(rows.len());

    for (line, row) in rows.iter().enumerate() {
        let width = row.len();
        if width <= country_idx.max(residential_idx).max(commercial_idx) {
            return Err(ModelError::DataIntegrity(format!(
                "{} row {} has {} fields, fewer than the named columns",
                ROOFTOP_TABLE_FILE,
                line + 1,
                width
            )));
        }
        let country = row[country_idx].trim();
        if country.is_empty() {
            return Err(ModelError::DataIntegrity(format!(
                "{} row {} has no country key",
                ROOFTOP_TABLE_FILE,
                line + 1
            )));
        }
        areas.push(RooftopAreas {
            country: country.to_string(),
            residential_km2: parse_float(&row[residential_idx]),
            commercial_km2: parse_float(&row[commercial_idx]),
        });
    }

    info!(countries = areas.len(), "loaded rooftop area records");
    Ok(areas)
}
