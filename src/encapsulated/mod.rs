//! # Encapsulated Waveform Files
//!
//! Waveform samples referenced by a TED index workbook live in external
//! "encapsulated data" files. Three layouts are supported:
//!
//! | [`EdFormat`] | File on disk                 | `SRCXFN` locator              |
//! |--------------|------------------------------|-------------------------------|
//! | `csv`        | `<cell>.csv`                 | `<cell>.csv`                  |
//! | `zip`        | `<cell>.csv.zip`             | `<cell>.csv.zip:<cell>.csv`   |
//! | `xlsx`       | `waveforms.xlsx`, one sheet per cell | `waveforms.xlsx:<cell>` |
//!
//! Every file holds one [`WaveformFrame`]: a time column named
//! `t_<unit>` followed by one column per waveform, named
//! `Trace_#<n>_<KIND>_<unit>` for recorded traces.
//!
//! [`WaveformStore`] reads and writes frames relative to a dataset directory
//! and caches frames that were already loaded.

mod format;
mod frame;
mod locator;
mod store;


pub use format::EdFormat;
pub use frame::{TraceColumn, WaveformFrame};
pub use locator::WaveformLocator;
pub use store::WaveformStore;
