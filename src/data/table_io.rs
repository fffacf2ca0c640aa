// Low-level readers shared by the wide-table, suitability and rooftop
// loaders. The input files are headerless delimited text; column names
// arrive through separate single-row mapping files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::ModelError;

/// Read a single-row column-name mapping file with the given delimiter.
pub fn read_column_names(path: &Path, separator: char) -> Result<Vec<String>, ModelError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader.read_line(&mut line)?;

    let names: Vec<String> = line
        .trim_end_matches(['\r', '\n'])
        .split(separator)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        return Err(ModelError::DataIntegrity(format!(
            "column name file {} is empty",
            path.display()
        )));
    }
    Ok(names)
}

/// Read a headerless tab-delimited table into string rows.
pub fn read_tab_rows(path: &Path) -> Result<Vec<Vec<String>>, ModelError> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(rows)
}

/// Find a required column by name.
pub fn column_index(names: &[String], wanted: &str) -> Result<usize, ModelError> {
    names
        .iter()
        .position(|name| name == wanted)
        .ok_or_else(|| ModelError::DataIntegrity(format!("required column '{}' missing", wanted)))
}

/// Parse a numeric field; blanks and non-numeric markers become NaN so
/// downstream filtering and propagation can decide what to do with
/// them.
pub fn parse_float(field: &str) -> f64 {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_float_maps_blanks_to_nan() {
        assert!(parse_float("").is_nan());
        assert!(parse_float("  ").is_nan());
        assert!(parse_float("n/a").is_nan());
        assert!((parse_float(" 3.5 ") - 3.5).abs() < 1e-12);
        assert!((parse_float("-40") + 40.0).abs() < 1e-12);
    }

    #[test]
    fn column_index_reports_missing_columns() {
        let names = vec!["Lat".to_string(), "Lon".to_string()];
        assert_eq!(column_index(&names, "Lon").unwrap(), 1);
        assert!(matches!(
            column_index(&names, "Elev"),
            Err(ModelError::DataIntegrity(_))
        ));
    }
}
