//! # cipa-ted - CiPA Electrophysiology Data and the TED Format
//!
//! `cipa_ted` holds a typed, in-memory model of a CiPA ion-channel assay and
//! converts it losslessly to and from TED (Tabulated Experimental Data)
//! datasets.
//!
//! ## Key Features
//!
//! - **Typed assay model**: trials, devices, liquids, voltage and liquid
//!   protocols, experiments, cells, traces, cursors and waveforms, all
//!   serializable with serde.
//!
//! - **TED export**: an index workbook (`ted.xlsx`) with six sheets plus one
//!   waveform file per cell, stored as CSV, zipped CSV or sheets of a single
//!   XLSX workbook.
//!
//! - **TED import**: rebuilds liquids, protocols, experiments and traces from
//!   the index and loads waveform columns on demand.
//!
//! - **Recoverable inconsistencies are reported, not fatal**: every
//!   conversion returns a [`ConversionReport`](ted::ConversionReport) listing
//!   what was skipped or guessed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cipa_ted::prelude::*;
//!
//! # fn main() -> Result<(), TedError> {
//! let trial = SyntheticTrial::default().build();
//!
//! // Waveforms as one zipped CSV per cell
//! let summary = to_xlsx(&trial, "out/ted.xlsx", "zip")?;
//! println!("{}", summary);
//!
//! let back = from_xlsx("out", "ted.xlsx")?;
//! assert_eq!(back.trace_count(), trial.trace_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## TED Layout
//!
//! | Sheet | Contents |
//! |-------|----------|
//! | GeneralInformation | Study and device key/value pairs (no header) |
//! | CellProperties | One row per cell property |
//! | LiquidAdditions | One row per liquid applied over a trace range |
//! | CursorsDefinitions | Cursor windows |
//! | IntendedVoltageProtocol | Time column plus the voltage command |
//! | ResultsWide | One row per current trace, one column per cursor |
//!
//! Waveform files hold a `t_<unit>` column followed by one
//! `Trace_#<n>_<KIND>_<unit>` column per trace.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod codec;
pub mod encapsulated;
pub mod error;
pub mod model;
pub mod schema;
pub mod synthetic;
pub mod table;
pub mod ted;
pub mod units;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::encapsulated::{EdFormat, WaveformFrame, WaveformLocator, WaveformStore};
    pub use crate::error::TedError;
    pub use crate::model::{
        Cell, ConcentrationType, Cursor, CursorResult, CursorType, Device, EncapsulatedSource,
        Experiment, Id, LeakMethod, Liquid, LiquidJunctionPotential, LiquidProtocol,
        LjpReportedVoltage, PatchType, Property, PropertyType, Protocol, ProtocolExecution,
        ProtocolKind, ProtocolType, Quantity, ResultType, Results, SequenceType, Study,
        StudyReport, TraceResult, Trial, VoltageProtocol, Waveform,
    };
    pub use crate::schema::{DEFAULT_INDEX_FILE, SUPPORTED_TED_VERSIONS, TED_FORMAT_VERSION};
    pub use crate::synthetic::SyntheticTrial;
    pub use crate::ted::{
        from_xlsx, to_xlsx, ConversionReport, ExportConfig, ExportSummary, ImportConfig,
        ImportOutcome, TabularProjection, TedExporter, TedImporter,
    };
}
