use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::ModelError;

/// Per-technology suitability factors keyed by land-cover class.
///
/// Each table row pairs a cover class with the share of that class'
/// area usable by the technology. Files are semicolon-delimited
/// `class; fraction` rows under the suitability directory.
#[derive(Debug, Clone)]
pub struct SuitabilityTable {
    name: String,
    shares: Vec<(String, f64)>,
}

impl SuitabilityTable {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = File::open(path)?;
        let mut shares = Vec::new();

        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let (class, fraction) = trimmed.rsplit_once(';').ok_or_else(|| {
                ModelError::DataIntegrity(format!(
                    "suitability table {} line {}: expected 'class; fraction'",
                    name,
                    line_no + 1
                ))
            })?;
            let fraction: f64 = fraction.trim().parse().map_err(|_| {
                ModelError::DataIntegrity(format!(
                    "suitability table {} line {}: bad fraction '{}'",
                    name,
                    line_no + 1,
                    fraction.trim()
                ))
            })?;
            if !(0.0..=1.0).contains(&fraction) {
                return Err(ModelError::DataIntegrity(format!(
                    "suitability table {} line {}: fraction {} outside [0, 1]",
                    name,
                    line_no + 1,
                    fraction
                )));
            }
            shares.push((class.trim().to_string(), fraction));
        }

        Ok(Self { name, shares })
    }

    /// Table built from in-memory shares.
    pub fn from_shares(name: &str, shares: Vec<(String, f64)>) -> Self {
        Self {
            name: name.to_string(),
            shares,
        }
    }

    /// Suitability factor for one cell: the cover-share weighted sum of
    /// the per-class fractions. The table is already in [0, 1] per
    /// class, so no re-clipping happens here. A class the cell data
    /// does not carry is a data-integrity error; defaulting it to
    /// zero would silently change results.
    pub fn factor(&self, covers: &HashMap<String, f64>) -> Result<f64, ModelError> {
        let mut factor = 0.0;
        for (class, fraction) in &self.shares {
            let share = covers.get(class).ok_or_else(|| {
                ModelError::DataIntegrity(format!(
                    "cover class '{}' referenced by suitability table {} is missing from the cell data",
                    class, self.name
                ))
            })?;
            factor += share * fraction;
        }
        Ok(factor)
    }
}

/// The full set of suitability tables the grid builder applies.
#[derive(Debug, Clone)]
pub struct SuitabilityTables {
    pub wind_onshore: SuitabilityTable,
    pub wind_offshore: SuitabilityTable,
    pub pv: SuitabilityTable,
    pub csp: SuitabilityTable,
    pub slope_pv: SuitabilityTable,
    pub slope_csp: SuitabilityTable,
}

impl SuitabilityTables {
    pub fn load_dir(dir: &Path) -> Result<Self, ModelError> {
        Ok(Self {
            wind_onshore: SuitabilityTable::load(&dir.join("wind_onshore"))?,
            wind_offshore: SuitabilityTable::load(&dir.join("wind_offshore"))?,
            pv: SuitabilityTable::load(&dir.join("pv"))?,
            csp: SuitabilityTable::load(&dir.join("csp"))?,
            slope_pv: SuitabilityTable::load(&dir.join("slope_pv"))?,
            slope_csp: SuitabilityTable::load(&dir.join("slope_csp"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covers(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs
            .iter()
            .map(|(name, share)| (name.to_string(), *share))
            .collect()
    }

    #[test]
    fn factor_is_the_cover_weighted_sum() {
        let table = SuitabilityTable::from_shares(
            "wind_onshore",
            vec![
                ("Grassland".to_string(), 0.8),
                ("Forest".to_string(), 0.1),
            ],
        );
        let factor = table
            .factor(&covers(&[("Grassland", 0.5), ("Forest", 0.5)]))
            .unwrap();
        assert!((factor - 0.45).abs() < 1e-12);
    }

    #[test]
    fn missing_cover_class_is_a_data_integrity_error() {
        let table =
            SuitabilityTable::from_shares("pv", vec![("Bare areas".to_string(), 0.9)]);
        let result = table.factor(&covers(&[("Grassland", 1.0)]));
        assert!(matches!(result, Err(ModelError::DataIntegrity(_))));
    }
}
