//! # TED Schema
//!
//! Fixed sheet names and column contracts of a TED dataset. The exporter and
//! importer both use these definitions, so they agree on every table.
//!
//! ```text
//! ted.xlsx
//! ├── GeneralInformation        key/value rows, no header
//! ├── CellProperties            EXPID CELLID PARAMCD PARAM VALUE UNIT
//! ├── LiquidAdditions           EXPID CELLID STIME LJP LJPU LIQUID CONC CONCU CONCT
//! │                             FIRST LAST CTLFL SBFL ANL SRCXFN NOTES
//! ├── CursorsDefinitions        CURSOR STIME STIMEU ETIME ETIMEU CURSORT
//! ├── IntendedVoltageProtocol   <label>_<timeunit> <label>_<voltageunit>
//! └── ResultsWide               EXPID CELLID RESTYPE LEAKMTH ELTIME ELTIMEU TRACENUM
//!                               ANLFL SRCXFN LIQUID CONC CONCU CONCT <cursor>...
//! ```

pub mod columns;
mod constants;

pub use constants::*;
