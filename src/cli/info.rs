use anyhow::{Context, Result};
use std::path::PathBuf;

use cipa_ted::model::{ProtocolKind, Trial};
use cipa_ted::ted::{ImportConfig, TedImporter};

#[cfg(feature = "colorized_output")]
use console::style;

/// Display information about a TED dataset
pub fn run(input_dir: PathBuf, index: Option<String>, json: bool) -> Result<()> {
    if !input_dir.is_dir() {
        anyhow::bail!("Directory does not exist: {}", input_dir.display());
    }

    let mut config = ImportConfig::default();
    if let Some(index) = index {
        config.index_file_name = index;
    }
    let index_file = config.index_file_name.clone();

    let outcome = TedImporter::new(config)
        .import(&input_dir)
        .with_context(|| format!("Failed to read TED dataset in {}", input_dir.display()))?;

    if json {
        let text = serde_json::to_string_pretty(&outcome.trial).context("Failed to serialize trial")?;
        println!("{}", text);
        return Ok(());
    }

    print_trial(&input_dir.join(index_file), &outcome.trial);
    println!();

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", outcome.report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", outcome.report);
    }

    Ok(())
}

fn heading(text: &str) -> String {
    #[cfg(feature = "colorized_output")]
    {
        style(text).bold().to_string()
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        text.to_string()
    }
}

fn print_trial(index: &std::path::Path, trial: &Trial) {
    println!("{}", heading("TED Dataset Information"));
    println!("=======================");
    println!("Index: {}", index.display());
    println!("Study: {}", trial.study.study_id);
    if !trial.study.report.title.is_empty() {
        println!("Report: {} (v{})", trial.study.report.title, trial.study.report.version);
    }
    for device in &trial.devices {
        println!(
            "Device: {} {} ({})",
            device.id, device.manufacturer_model_name, device.device_software_name
        );
    }
    println!(
        "Liquid junction potential: {} {}",
        trial.ljp.value, trial.ljp.unit
    );
    println!();

    println!("{}", heading("Protocols:"));
    for protocol in &trial.protocols {
        match &protocol.kind {
            ProtocolKind::Voltage(voltage) => println!(
                "  {:<16} voltage  {} samples, {} {}",
                protocol.id.to_string(),
                voltage.waveform.len(),
                protocol.duration,
                protocol.duration_unit
            ),
            ProtocolKind::Liquid(liquid) => println!(
                "  {:<16} liquid   {} {} {}{}",
                protocol.id.to_string(),
                liquid.liquid.name,
                liquid.concentration,
                liquid.concentration_unit,
                if liquid.is_control { " (control)" } else { "" }
            ),
        }
    }
    println!();

    println!("{}", heading("Experiments:"));
    for experiment in &trial.experiments {
        for results in &experiment.results_sets {
            let valid = results.results.iter().filter(|r| r.valid).count();
            println!(
                "  {:<12} cell {:<12} {:>4} trace(s), {:>4} analysed, {} cursor(s)",
                experiment.id.to_string(),
                results.cell.id.to_string(),
                results.results.len(),
                valid,
                results.cursors.len()
            );
        }
    }
    println!("Total traces: {}", trial.trace_count());
}
