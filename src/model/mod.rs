//! # CiPA Data Model
//!
//! Typed, hierarchical in-memory record of an electrophysiology assay.
//!
//! ## Structure
//!
//! ```text
//! Trial
//! ├── Study ── StudyReport
//! ├── devices: [Device]
//! ├── ljp: LiquidJunctionPotential          (default for every cell)
//! ├── liquids: [Liquid]
//! ├── protocols: [Protocol]                 (Voltage | Liquid)
//! └── experiments: [Experiment]
//!     ├── device ──────────────► Device.id  (foreign key)
//!     ├── protocols: [ProtocolExecution] ─► Protocol.id (foreign key)
//!     └── results_sets: [Results]
//!         ├── cell: Cell ── [Property]
//!         ├── cursors: [Cursor]             (definitions)
//!         └── results: [TraceResult]
//!             ├── waveform: Waveform
//!             └── cursors: [Cursor]         (evaluated)
//! ```
//!
//! Devices and protocols are referenced by [`Id`] rather than owned by the
//! experiments that use them, so a cloned [`Trial`] never aliases data and no
//! per-trace copy of a voltage command is ever made.

mod cursor;
mod device;
mod experiment;
mod id;
mod liquid;
mod property;
mod protocol;
mod results;
mod study;
mod trial;
mod waveform;

#[cfg(test)]
mod tests;

pub use cursor::{Cursor, CursorResult, CursorType};
pub use device::Device;
pub use experiment::{Experiment, ProtocolExecution};
pub use id::Id;
pub use liquid::{Liquid, LiquidJunctionPotential, LjpReportedVoltage};
pub use property::{Property, PropertyType};
pub use protocol::{
    ConcentrationType, LiquidProtocol, Protocol, ProtocolKind, ProtocolType, VoltageProtocol,
};
pub use results::{Cell, LeakMethod, PatchType, ResultType, Results, TraceResult};
pub use study::{Study, StudyReport};
pub use trial::Trial;
pub use waveform::{EncapsulatedSource, Quantity, SequenceType, Waveform};
