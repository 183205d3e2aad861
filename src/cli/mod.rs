use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use cipa_ted::encapsulated::EdFormat;

mod config;
mod demo;
mod info;
mod repack;

/// ted-convert - CiPA TED dataset converter
#[derive(Parser)]
#[command(name = "ted-convert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Storage layout of the waveform files
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum EdFormatArg {
    /// One CSV file per cell
    #[default]
    Csv,
    /// One zipped CSV file per cell
    Zip,
    /// One sheet per cell in a single workbook
    Xlsx,
}

impl From<EdFormatArg> for EdFormat {
    fn from(arg: EdFormatArg) -> Self {
        match arg {
            EdFormatArg::Csv => EdFormat::Csv,
            EdFormatArg::Zip => EdFormat::Zip,
            EdFormatArg::Xlsx => EdFormat::Xlsx,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a synthetic hERG assay as a TED dataset
    Demo {
        /// Index workbook to create; waveform files are written next to it
        #[arg(value_name = "OUTPUT", default_value = "ted_demo/ted.xlsx")]
        output: PathBuf,

        /// Waveform file format
        #[arg(short = 'f', long, default_value = "csv", value_enum)]
        edformat: EdFormatArg,

        /// Number of experiments
        #[arg(short = 'e', long, default_value = "2")]
        experiments: usize,

        /// Current traces per experiment
        #[arg(short = 't', long, default_value = "12")]
        traces: u32,
    },

    /// Read a TED dataset and write it again, optionally in another waveform format
    Repack {
        /// Directory holding the source dataset
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        /// Index workbook to create
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Index workbook name inside INPUT_DIR
        #[arg(short = 'i', long)]
        index: Option<String>,

        /// Waveform file format of the new dataset
        #[arg(short = 'f', long, value_enum)]
        edformat: Option<EdFormatArg>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Display information about a TED dataset
    Info {
        /// Directory holding the dataset
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        /// Index workbook name inside INPUT_DIR
        #[arg(short = 'i', long)]
        index: Option<String>,

        /// Print the imported trial as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Demo {
            output,
            edformat,
            experiments,
            traces,
        } => demo::run(output, EdFormat::from(edformat), experiments, traces),
        Commands::Repack {
            input_dir,
            output,
            index,
            edformat,
            config,
        } => repack::run(input_dir, output, index, edformat.map(EdFormat::from), config),
        Commands::Info {
            input_dir,
            index,
            json,
        } => info::run(input_dir, index, json),
    }
}
