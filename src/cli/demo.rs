use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use cipa_ted::encapsulated::EdFormat;
use cipa_ted::synthetic::SyntheticTrial;
use cipa_ted::ted::{ExportConfig, TedExporter};

/// Write a synthetic assay as a TED dataset
pub fn run(output: PathBuf, edformat: EdFormat, experiments: usize, traces: u32) -> Result<()> {
    info!("CiPA TED Converter - Synthetic Assay Demo");
    info!("=========================================");

    let params = SyntheticTrial {
        experiments,
        traces_per_experiment: traces,
        ..Default::default()
    };
    info!(
        "Generating {} experiment(s) with {} trace(s) each...",
        params.experiments, params.traces_per_experiment
    );
    let trial = params.build();

    let exporter = TedExporter::new(ExportConfig::with_edformat(edformat));
    let summary = exporter
        .export(&trial, &output)
        .with_context(|| format!("Failed to write TED dataset {}", output.display()))?;

    println!("{}", summary);
    Ok(())
}
