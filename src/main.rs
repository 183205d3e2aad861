//! # CiPA TED Converter
//!
//! A command-line tool for writing and reading CiPA TED datasets.
//!
//! ## Usage
//!
//! ```bash
//! # Write a synthetic assay with zipped waveform files
//! ted-convert demo ted_demo/ted.xlsx --edformat zip
//!
//! # Summarize a dataset
//! ted-convert info ted_demo
//!
//! # Rewrite a dataset with its waveforms in one workbook
//! ted-convert repack ted_demo repacked/ted.xlsx --edformat xlsx
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
