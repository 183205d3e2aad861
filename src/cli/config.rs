//! TOML configuration file support.
//!
//! Export and import options can be kept in a file instead of passed as flags:
//!
//! ```toml
//! # ted.toml
//! [export]
//! edformat = "zip"
//! compress_trace_ranges = true
//!
//! [import]
//! index_file_name = "index.xlsx"
//! cursor_unit = "nA"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use cipa_ted::ted::{ExportConfig, ImportConfig};

/// Root configuration structure for ted.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Options of the exporter.
    #[serde(default)]
    pub export: ExportConfig,

    /// Options of the importer.
    #[serde(default)]
    pub import: ImportConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cipa_ted::encapsulated::EdFormat;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [export]
            edformat = "xlsx"
            waveform_workbook_name = "traces.xlsx"
            compress_trace_ranges = true
            source_directory = "raw"

            [import]
            index_file_name = "index.xlsx"
            cursor_unit = "nA"
            voltage_protocol_id = "PV-1"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.export.edformat, EdFormat::Xlsx);
        assert_eq!(config.export.waveform_workbook_name, "traces.xlsx");
        assert!(config.export.compress_trace_ranges);
        assert_eq!(config.export.source_directory, Some("raw".into()));
        assert_eq!(config.import.index_file_name, "index.xlsx");
        assert_eq!(config.import.cursor_unit, "nA");
        assert_eq!(config.import.voltage_protocol_id, "PV-1");
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [export]
            edformat = "zip"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.export.edformat, EdFormat::Zip);
        assert!(!config.export.compress_trace_ranges);
        assert_eq!(config.import, ImportConfig::default());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn test_unknown_edformat_is_rejected() {
        assert!(Config::from_str("[export]\nedformat = \"parquet\"").is_err());
    }
}
