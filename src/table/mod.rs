//! # Sheet Tables
//!
//! A small, format-neutral table model shared by the TED index workbook and
//! the encapsulated waveform files:
//!
//! - [`Sheet`]: a named table with an optional header row
//! - [`TableValue`]: a single cell (empty, number, text or boolean)
//!
//! Sheets are written to and read from spreadsheet workbooks
//! ([`write_workbook`], [`XlsxBook`]) and delimited text ([`write_csv`], [`read_csv`]).

mod delimited;
mod sheet;
mod value;
mod xlsx;


pub use delimited::{read_csv, write_csv};
pub use sheet::Sheet;
pub use value::TableValue;
pub use xlsx::{write_workbook, XlsxBook};
