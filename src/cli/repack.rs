use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use cipa_ted::encapsulated::EdFormat;
use cipa_ted::ted::{ConversionReport, TedExporter, TedImporter};

use super::config::Config;

/// Import a TED dataset and export it again
pub fn run(
    input_dir: PathBuf,
    output: PathBuf,
    index: Option<String>,
    edformat: Option<EdFormat>,
    config: Option<PathBuf>,
) -> Result<()> {
    if !input_dir.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", input_dir.display());
    }

    let mut config = match config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    // Flags override the config file
    if let Some(index) = index {
        config.import.index_file_name = index;
    }
    if let Some(edformat) = edformat {
        config.export.edformat = edformat;
    }

    info!("Input:  {}", input_dir.display());
    info!("Output: {}", output.display());
    info!("Waveform format: {}", config.export.edformat);

    let outcome = TedImporter::new(config.import)
        .import(&input_dir)
        .with_context(|| format!("Failed to read TED dataset in {}", input_dir.display()))?;
    print_report(&outcome.report);

    let summary = TedExporter::new(config.export)
        .export(&outcome.trial, &output)
        .with_context(|| format!("Failed to write TED dataset {}", output.display()))?;

    print_report(&summary.report);

    info!(
        "Repacked {} experiment(s) into {} waveform file(s)",
        summary.experiments,
        summary.waveform_files.len()
    );
    Ok(())
}

fn print_report(report: &ConversionReport) {
    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }
}
