//! Error type shared by every conversion step

/// Errors raised while converting between a [`Trial`](crate::model::Trial) and a TED dataset
#[derive(Debug, thiserror::Error)]
pub enum TedError {
    /// Malformed or unreadable TED index or waveform file
    #[error("Failed to parse {filename}: {message}")]
    ParseFile {
        /// File (or file:locator) that failed to parse
        filename: String,
        /// Explanation of the error
        message: String,
    },

    /// Unsupported or inconsistent waveform storage request
    #[error("Encapsulated data file error ({identifier}): {message}")]
    EncapsulatedDataFile {
        /// Requested format, file or column
        identifier: String,
        /// Explanation of the error
        message: String,
    },

    /// Trial violating the export preconditions
    #[error("Invalid trial: {0}")]
    InvalidTrial(String),

    /// Foreign key pointing at an entity that does not exist
    #[error("Missing reference: {0}")]
    MissingReference(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Spreadsheet writing error
    #[error("XLSX write error: {0}")]
    XlsxWriteError(#[from] rust_xlsxwriter::XlsxError),

    /// Spreadsheet reading error
    #[error("XLSX read error: {0}")]
    XlsxReadError(#[from] calamine::XlsxError),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TedError {
    /// Build a [`TedError::ParseFile`]
    pub fn parse_file(filename: impl Into<String>, message: impl Into<String>) -> Self {
        TedError::ParseFile {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Build a [`TedError::EncapsulatedDataFile`]
    pub fn encapsulated(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        TedError::EncapsulatedDataFile {
            identifier: identifier.into(),
            message: message.into(),
        }
    }
}
