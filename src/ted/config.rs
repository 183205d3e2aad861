use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::encapsulated::EdFormat;
use crate::schema::{DEFAULT_INDEX_FILE, DEFAULT_WAVEFORM_WORKBOOK};

/// Options of [`TedExporter`](super::TedExporter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Storage layout of the waveform files
    pub edformat: EdFormat,

    /// Workbook name used by [`EdFormat::Xlsx`]
    pub waveform_workbook_name: String,

    /// Write `ANL` as ranges (`1-3;5`) instead of a plain list
    pub compress_trace_ranges: bool,

    /// Directory holding waveform files referenced by
    /// [`EncapsulatedSource`](crate::model::EncapsulatedSource)s of the trial;
    /// the output directory when unset
    pub source_directory: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            edformat: EdFormat::Csv,
            waveform_workbook_name: DEFAULT_WAVEFORM_WORKBOOK.to_string(),
            compress_trace_ranges: false,
            source_directory: None,
        }
    }
}

impl ExportConfig {
    /// Default options with the given waveform format
    pub fn with_edformat(edformat: EdFormat) -> Self {
        Self {
            edformat,
            ..Default::default()
        }
    }
}

/// Options of [`TedImporter`](super::TedImporter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Name of the index workbook inside the dataset directory
    pub index_file_name: String,

    /// Unit assigned to cursor values (TED does not record one)
    pub cursor_unit: String,

    /// Identifier given to the imported intended voltage protocol
    pub voltage_protocol_id: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            index_file_name: DEFAULT_INDEX_FILE.to_string(),
            cursor_unit: "pA".to_string(),
            voltage_protocol_id: "PV-10001".to_string(),
        }
    }
}
