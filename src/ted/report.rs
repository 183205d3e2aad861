use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "colorized_output")]
use console::style;

/// Recoverable issues found during one export or import
///
/// Every warning is also forwarded to the `log` facade as it is recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    /// Operation the report belongs to (e.g., `export`)
    pub operation: String,

    /// Warnings in the order they were raised
    pub warnings: Vec<String>,
}

impl ConversionReport {
    /// Create an empty report
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            warnings: Vec::new(),
        }
    }

    /// Record a warning
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}: {}", self.operation, message);
        self.warnings.push(message);
    }

    /// True when no warning was recorded
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of warnings
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();
            if self.is_clean() {
                output.push_str(&format!("{} completed without warnings\n", style(&self.operation).bold()));
                return output;
            }
            output.push_str(&format!(
                "{} completed with {} warning(s)\n",
                style(&self.operation).bold(),
                style(self.warning_count()).yellow()
            ));
            for warning in &self.warnings {
                output.push_str(&format!("  [{}] {}\n", style("WARN").yellow().bold(), warning));
            }
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return writeln!(f, "{} completed without warnings", self.operation);
        }
        writeln!(f, "{} completed with {} warning(s)", self.operation, self.warning_count())?;
        for warning in &self.warnings {
            writeln!(f, "  [WARN] {}", warning)?;
        }
        Ok(())
    }
}

/// Outcome of [`TedExporter::export`](super::TedExporter::export)
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Index workbook written
    pub index_file: PathBuf,

    /// Waveform files written, relative to the dataset directory
    pub waveform_files: Vec<String>,

    /// Experiments exported
    pub experiments: usize,

    /// LiquidAdditions rows written
    pub liquid_additions: usize,

    /// ResultsWide rows written
    pub result_rows: usize,

    /// Warnings raised during the export
    pub report: ConversionReport,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TED Export Summary")?;
        writeln!(f, "==================")?;
        writeln!(f, "Index file: {}", self.index_file.display())?;
        writeln!(f, "Experiments: {}", self.experiments)?;
        writeln!(f, "Liquid additions: {}", self.liquid_additions)?;
        writeln!(f, "Current traces: {}", self.result_rows)?;
        writeln!(f, "Waveform files: {}", self.waveform_files.len())?;
        for file in &self.waveform_files {
            writeln!(f, "  {}", file)?;
        }
        write!(f, "{}", self.report)
    }
}
