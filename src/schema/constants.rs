/// TED format versions this crate reads and writes
pub const SUPPORTED_TED_VERSIONS: &[&str] = &["2022.03.rc1", "2022.03"];

/// TED format version stamped on imported trials
pub const TED_FORMAT_VERSION: &str = "2022.03";

/// Default name of the TED index workbook
pub const DEFAULT_INDEX_FILE: &str = "ted.xlsx";

/// Default name of the shared workbook used by the `xlsx` encapsulated format
pub const DEFAULT_WAVEFORM_WORKBOOK: &str = "waveforms.xlsx";

/// Sheet holding study and device key/value pairs
pub const SHEET_GENERAL_INFORMATION: &str = "GeneralInformation";

/// Sheet holding cell properties
pub const SHEET_CELL_PROPERTIES: &str = "CellProperties";

/// Sheet holding liquid additions and their trace ranges
pub const SHEET_LIQUID_ADDITIONS: &str = "LiquidAdditions";

/// Sheet holding cursor definitions
pub const SHEET_CURSORS_DEFINITIONS: &str = "CursorsDefinitions";

/// Sheet holding the intended voltage command
pub const SHEET_INTENDED_VOLTAGE_PROTOCOL: &str = "IntendedVoltageProtocol";

/// Sheet holding one row per current trace
pub const SHEET_RESULTS_WIDE: &str = "ResultsWide";

/// Flag value used by CTLFL, SBFL and ANLFL
pub const FLAG_YES: &str = "Y";

/// Name of the time column written in waveform files
pub const TIME_COLUMN_LABEL: &str = "t";

/// Prefix of trace columns in waveform files
pub const TRACE_COLUMN_PREFIX: &str = "Trace_#";
