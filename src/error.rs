use std::fmt;

/// Errors surfaced by the grid pipeline. All of them are fatal: the
/// computation is a one-shot batch transform and the only recovery is
/// re-running with fixed inputs or configuration.
#[derive(Debug)]
pub enum ModelError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// A required input column, field or suitability class is missing.
    /// Substituting a default here would silently corrupt results, so
    /// the pipeline aborts instead.
    DataIntegrity(String),
    /// A required named constant is missing or out of range.
    Configuration(String),
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::Io(err)
    }
}

impl From<csv::Error> for ModelError {
    fn from(err: csv::Error) -> Self {
        ModelError::Csv(err)
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Io(e) => write!(f, "IO error: {}", e),
            ModelError::Csv(e) => write!(f, "CSV error: {}", e),
            ModelError::DataIntegrity(s) => write!(f, "Data integrity error: {}", s),
            ModelError::Configuration(s) => write!(f, "Configuration error: {}", s),
        }
    }
}

impl std::error::Error for ModelError {}
