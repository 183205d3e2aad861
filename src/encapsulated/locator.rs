use std::fmt;
use std::str::FromStr;

use crate::error::TedError;

/// Address of one waveform frame, as written in the `SRCXFN` column
///
/// The `:` separator qualifies a container with the entry to read:
/// `cell.csv.zip:cell.csv` or `waveforms.xlsx:cell`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WaveformLocator {
    /// Plain comma-separated file
    Csv {
        /// File name relative to the dataset directory
        file: String,
    },
    /// CSV file inside a zip archive
    ZippedCsv {
        /// Archive name relative to the dataset directory
        archive: String,
        /// Entry name inside the archive
        inner: String,
    },
    /// Worksheet of a workbook
    XlsxSheet {
        /// Workbook name relative to the dataset directory
        workbook: String,
        /// Worksheet name; the first worksheet when `None`
        sheet: Option<String>,
    },
}

impl WaveformLocator {
    /// Parse a locator
    ///
    /// Files must end in `.csv`, `.zip` or `.xlsx` (case-insensitive);
    /// anything else is a [`TedError::ParseFile`].
    pub fn parse(locator: &str) -> Result<Self, TedError> {
        let locator = locator.trim();
        let (file, entry) = match locator.split_once(':') {
            Some((file, entry)) => (file.trim(), Some(entry.trim())),
            None => (locator, None),
        };
        let lower = file.to_lowercase();

        if lower.ends_with(".zip") {
            let inner = match entry {
                Some(inner) if !inner.is_empty() => inner.to_string(),
                _ => file.get(..file.len() - 4).unwrap_or(file).to_string(),
            };
            if !inner.to_lowercase().ends_with(".csv") {
                return Err(TedError::parse_file(
                    locator,
                    "zip archives must hold a .csv waveform file",
                ));
            }
            Ok(WaveformLocator::ZippedCsv {
                archive: file.to_string(),
                inner,
            })
        } else if lower.ends_with(".xlsx") {
            Ok(WaveformLocator::XlsxSheet {
                workbook: file.to_string(),
                sheet: entry.filter(|s| !s.is_empty()).map(str::to_string),
            })
        } else if lower.ends_with(".csv") && entry.is_none() {
            Ok(WaveformLocator::Csv {
                file: file.to_string(),
            })
        } else {
            Err(TedError::parse_file(
                locator,
                "unsupported waveform file extension (expected .csv, .csv.zip or .xlsx)",
            ))
        }
    }

    /// File on disk holding the frame
    pub fn file(&self) -> &str {
        match self {
            WaveformLocator::Csv { file } => file,
            WaveformLocator::ZippedCsv { archive, .. } => archive,
            WaveformLocator::XlsxSheet { workbook, .. } => workbook,
        }
    }
}

impl FromStr for WaveformLocator {
    type Err = TedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for WaveformLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveformLocator::Csv { file } => write!(f, "{}", file),
            WaveformLocator::ZippedCsv { archive, inner } => write!(f, "{}:{}", archive, inner),
            WaveformLocator::XlsxSheet {
                workbook,
                sheet: Some(sheet),
            } => write!(f, "{}:{}", workbook, sheet),
            WaveformLocator::XlsxSheet {
                workbook,
                sheet: None,
            } => write!(f, "{}", workbook),
        }
    }
}
