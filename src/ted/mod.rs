//! # TED Conversion
//!
//! Bidirectional conversion between a [`Trial`](crate::model::Trial) and a
//! TED dataset directory.
//!
//! ## Export
//!
//! [`TabularProjection`] flattens the first results set of every experiment
//! into the index tables. Liquid additions become `[FIRST, LAST]` trace
//! ranges: an addition starts at the first current trace recorded at or after
//! it and ends right before the next addition starts, so the ranges of one
//! experiment partition its traces. [`TedExporter`] writes the waveform files
//! in the configured [`EdFormat`](crate::encapsulated::EdFormat), records
//! their locators in `SRCXFN`, then writes the index workbook.
//!
//! ## Import
//!
//! [`TedImporter`] rebuilds liquids and liquid protocols from the distinct
//! LiquidAdditions rows, one experiment per `(EXPID, CELLID, STIME)`, and one
//! trace result per ResultsWide row whose waveform column is found in the
//! addition's `SRCXFN` files.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cipa_ted::prelude::*;
//!
//! # fn main() -> Result<(), TedError> {
//! let trial = SyntheticTrial::default().build();
//! let summary = TedExporter::new(ExportConfig::with_edformat(EdFormat::Zip))
//!     .export(&trial, "dataset/ted.xlsx")?;
//! println!("{}", summary);
//!
//! let outcome = TedImporter::new(ImportConfig::default()).import("dataset")?;
//! assert_eq!(outcome.trial.experiments.len(), trial.experiments.len());
//! # Ok(())
//! # }
//! ```
//!
//! Recoverable inconsistencies never abort a conversion; they are collected
//! in the [`ConversionReport`] returned with the result.

mod config;
mod export;
mod import;
mod projection;
mod report;
pub mod rows;
mod trace_list;

#[cfg(test)]
mod tests;

pub use config::{ExportConfig, ImportConfig};
pub use export::{to_xlsx, TedExporter};
pub use import::{from_xlsx, ImportOutcome, TedImporter};
pub use projection::TabularProjection;
pub use report::{ConversionReport, ExportSummary};
pub use trace_list::{
    compress_trace_list, expand_trace_list, join_trace_list, parse_trace_list, TraceList,
};
