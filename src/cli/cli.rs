use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, default_value = "data", help = "Directory with the grid input files")]
    data_dir: PathBuf,

    #[arg(
        long,
        default_value = "data/suitability_factors",
        help = "Directory with the per-technology suitability tables"
    )]
    suitability_dir: PathBuf,

    #[arg(short, long, help = "JSON file overriding the built-in model constants")]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = "output", help = "Directory for exported CSV tables")]
    output_dir: PathBuf,

    #[arg(long, default_value_t = false, help = "Skip the CSV export")]
    no_export: bool,

    #[arg(long, default_value_t = false, help = "Skip the country-level rooftop PV pipeline")]
    skip_rooftop: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,
}

// Getter methods for all fields
impl Args {
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub fn suitability_dir(&self) -> &PathBuf {
        &self.suitability_dir
    }

    pub fn config(&self) -> Option<&PathBuf> {
        self.config.as_ref()
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    pub fn no_export(&self) -> bool {
        self.no_export
    }

    pub fn skip_rooftop(&self) -> bool {
        self.skip_rooftop
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }
}
