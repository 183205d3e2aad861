use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::WaveformLocator;
use crate::error::TedError;

/// Storage layout of encapsulated waveform files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdFormat {
    /// One comma-separated file per cell
    #[default]
    Csv,
    /// One deflate-compressed archive per cell holding a single CSV file
    Zip,
    /// One shared workbook with a sheet per cell
    Xlsx,
}

impl EdFormat {
    /// Format name as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            EdFormat::Csv => "csv",
            EdFormat::Zip => "zip",
            EdFormat::Xlsx => "xlsx",
        }
    }

    /// Locator of the waveforms of one cell stored in this format
    pub fn locator_for(&self, cell_name: &str, workbook_name: &str) -> WaveformLocator {
        match self {
            EdFormat::Csv => WaveformLocator::Csv {
                file: format!("{}.csv", cell_name),
            },
            EdFormat::Zip => WaveformLocator::ZippedCsv {
                archive: format!("{}.csv.zip", cell_name),
                inner: format!("{}.csv", cell_name),
            },
            EdFormat::Xlsx => WaveformLocator::XlsxSheet {
                workbook: workbook_name.to_string(),
                sheet: Some(cell_name.to_string()),
            },
        }
    }
}

impl FromStr for EdFormat {
    type Err = TedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Ok(EdFormat::Csv),
            "zip" => Ok(EdFormat::Zip),
            "xlsx" => Ok(EdFormat::Xlsx),
            _ => Err(TedError::encapsulated(
                s,
                "Unsupported file format for encapsulated data",
            )),
        }
    }
}

impl fmt::Display for EdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
