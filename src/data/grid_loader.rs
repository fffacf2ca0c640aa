use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::config::constants::WIDE_TABLE_COLUMNS;
use crate::data::table_io::{column_index, parse_float, read_column_names, read_tab_rows};
use crate::error::ModelError;
use crate::models::cell::RawCellRecord;
use crate::utils::logging::{self, OperationCategory};

/// Name of the column-mapping file for the wide table.
pub const COL_NAMES_FILE: &str = "Col_names";
/// Name of the wide per-cell attribute table.
pub const WIDE_TABLE_FILE: &str = "wind_solar_0_75";

const REQUIRED_COLUMNS: &[&str] = &[
    "Country",
    "Lat",
    "Lon",
    "Elev",
    "DistCoast",
    "WindMean71",
    "WindStd71",
    "WindMean125",
    "WindStd125",
    "GHI",
    "v_r_opti",
    "n_opti",
];

/// Load the raw per-cell records from the data directory.
///
/// The wide table is headerless and tab-delimited; its column names
/// come from the semicolon-delimited `Col_names` file. Only the first
/// 46 columns are meaningful. Every named column that is not one of
/// the fixed geophysical attributes is treated as a land-cover class
/// share and kept for the suitability resolver.
pub fn load_raw_cells(data_dir: &Path) -> Result<Vec<RawCellRecord>, ModelError> {
    let _timing = logging::start_timing("load_raw_cells", OperationCategory::DataLoad);

    let names = read_column_names(&data_dir.join(COL_NAMES_FILE), ';')?;
    if names.len() < WIDE_TABLE_COLUMNS {
        return Err(ModelError::DataIntegrity(format!(
            "{} names {} columns, expected at least {}",
            COL_NAMES_FILE,
            names.len(),
            WIDE_TABLE_COLUMNS
        )));
    }
    let names = &names[..WIDE_TABLE_COLUMNS];

    let mut required = HashMap::new();
    for wanted in REQUIRED_COLUMNS {
        required.insert(*wanted, column_index(names, wanted)?);
    }
    let cover_columns: Vec<(usize, &String)> = names
        .iter()
        .enumerate()
        .filter(|(_, name)| !REQUIRED_COLUMNS.contains(&name.as_str()))
        .collect();

    let rows = read_tab_rows(&data_dir.join(WIDE_TABLE_FILE))?;
    let mut records = Vec::with_capacity(rows.len());

    for (line, row) in rows.iter().enumerate() {
        if row.len() < WIDE_TABLE_COLUMNS {
            return Err(ModelError::DataIntegrity(format!(
                "{} row {} has {} fields, expected at least {}",
                WIDE_TABLE_FILE,
                line + 1,
                row.len(),
                WIDE_TABLE_COLUMNS
            )));
        }

        let field = |name: &str| -> &str { &row[required[name]] };
        let country = {
            let raw = field("Country").trim();
            if raw.is_empty() {
                None
            } else {
                Some(raw.to_string())
            }
        };

        let mut covers = HashMap::with_capacity(cover_columns.len());
        for (index, name) in &cover_columns {
            covers.insert((*name).clone(), parse_float(&row[*index]));
        }

        records.push(RawCellRecord {
            country,
            lat: parse_float(field("Lat")),
            lon: parse_float(field("Lon")),
            elev: parse_float(field("Elev")),
            dist_coast: parse_float(field("DistCoast")),
            wind_mean71: parse_float(field("WindMean71")),
            wind_std71: parse_float(field("WindStd71")),
            wind_mean125: parse_float(field("WindMean125")),
            wind_std125: parse_float(field("WindStd125")),
            ghi: parse_float(field("GHI")),
            v_r_opti: parse_float(field("v_r_opti")),
            n_opti: parse_float(field("n_opti")),
            covers,
        });
    }

    info!(
        cells = records.len(),
        covers = cover_columns.len(),
        "loaded raw grid records"
    );
    Ok(records)
}
