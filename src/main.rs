use anyhow::Context;
use clap::Parser;

use resgrid::analysis::summary;
use resgrid::cli::cli::Args;
use resgrid::config::model_config::ModelConfig;
use resgrid::core::eroi::{self, compute_potentials, rooftop_potentials};
use resgrid::core::grid_builder::build_grid;
use resgrid::core::suitability::SuitabilityTables;
use resgrid::data::{grid_loader, rooftop_loader};
use resgrid::utils::csv_export::CsvExporter;
use resgrid::utils::logging;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_logging(args.debug_logging(), args.enable_timing());

    println!("resgrid - global wind & solar potential with EROI constraints");

    let config = match args.config() {
        Some(path) => ModelConfig::from_file(path)
            .with_context(|| format!("loading model config from {}", path.display()))?,
        None => {
            let config = ModelConfig::default();
            config.validate()?;
            config
        }
    };

    let tables = SuitabilityTables::load_dir(args.suitability_dir())
        .context("loading suitability tables")?;
    let raw = grid_loader::load_raw_cells(args.data_dir()).context("loading the wide grid table")?;

    let cells = build_grid(raw, &tables, &config).context("building the world grid")?;
    let mean_ghi = eroi::mean_ghi_by_country(&cells);
    let potentials = compute_potentials(cells, &config);

    let rooftop = if args.skip_rooftop() {
        Vec::new()
    } else {
        let areas = rooftop_loader::load_rooftop_areas(args.data_dir())
            .context("loading the rooftop area table")?;
        rooftop_potentials(areas, &mean_ghi, &config)
    };

    if !args.no_export() {
        let exporter = CsvExporter::new(args.output_dir())?;
        let cells_path = exporter.export_cells(&potentials)?;
        println!("Cell table written to {}", cells_path.display());
        if !rooftop.is_empty() {
            let rooftop_path = exporter.export_rooftop(&rooftop)?;
            println!("Rooftop table written to {}", rooftop_path.display());
        }
    }

    let totals = summary::aggregate(&potentials, &rooftop);
    summary::print_summary(&totals);
    logging::print_timing_report();

    Ok(())
}
