//! Column names of the TED index sheets

/// Keys of the GeneralInformation sheet, in order
pub const GENERAL_INFORMATION_KEYS: &[&str] = &[
    STUDYID,
    REPORT_TITLE,
    REPORT_VERSION,
    REPORT_DATE,
    REPORT_DESCRIPTION,
    DEVICE_ID,
    DEVICE_CODE,
    DEVICE_MODEL,
    DEVICE_SOFTWARE,
];

/// Study identifier key
pub const STUDYID: &str = "STUDYID";
/// Report title key
pub const REPORT_TITLE: &str = "REPORT_TITLE";
/// Report version key
pub const REPORT_VERSION: &str = "REPORT_VERSION";
/// Report date key
pub const REPORT_DATE: &str = "REPORT_DATE";
/// Report description key
pub const REPORT_DESCRIPTION: &str = "REPORT_DESCRIPTION";
/// Device identifier key
pub const DEVICE_ID: &str = "DEVICE_ID";
/// Device code key
pub const DEVICE_CODE: &str = "DEVICE_CODE";
/// Device model key
pub const DEVICE_MODEL: &str = "DEVICE_MODEL";
/// Device software key
pub const DEVICE_SOFTWARE: &str = "DEVICE_SOFTWARE";

/// Experiment identifier
pub const EXPID: &str = "EXPID";
/// Cell identifier
pub const CELLID: &str = "CELLID";
/// Property code
pub const PARAMCD: &str = "PARAMCD";
/// Property display name
pub const PARAM: &str = "PARAM";
/// Property value
pub const VALUE: &str = "VALUE";
/// Property unit
pub const UNIT: &str = "UNIT";

/// Experiment start time (LiquidAdditions) or cursor start (CursorsDefinitions)
pub const STIME: &str = "STIME";
/// Liquid junction potential
pub const LJP: &str = "LJP";
/// Liquid junction potential unit
pub const LJPU: &str = "LJPU";
/// Liquid name
pub const LIQUID: &str = "LIQUID";
/// Concentration
pub const CONC: &str = "CONC";
/// Concentration unit
pub const CONCU: &str = "CONCU";
/// Concentration type
pub const CONCT: &str = "CONCT";
/// First trace of a liquid addition
pub const FIRST: &str = "FIRST";
/// Last trace of a liquid addition
pub const LAST: &str = "LAST";
/// Control flag
pub const CTLFL: &str = "CTLFL";
/// Selective blocker flag
pub const SBFL: &str = "SBFL";
/// Traces used for analysis
pub const ANL: &str = "ANL";
/// Source waveform file(s)
pub const SRCXFN: &str = "SRCXFN";
/// Free-text notes
pub const NOTES: &str = "NOTES";

/// Cursor name
pub const CURSOR: &str = "CURSOR";
/// Cursor start time unit
pub const STIMEU: &str = "STIMEU";
/// Cursor end time
pub const ETIME: &str = "ETIME";
/// Cursor end time unit
pub const ETIMEU: &str = "ETIMEU";
/// Cursor type
pub const CURSORT: &str = "CURSORT";

/// Result type
pub const RESTYPE: &str = "RESTYPE";
/// Leak correction method
pub const LEAKMTH: &str = "LEAKMTH";
/// Elapsed time
pub const ELTIME: &str = "ELTIME";
/// Elapsed time unit
pub const ELTIMEU: &str = "ELTIMEU";
/// Trace number
pub const TRACENUM: &str = "TRACENUM";
/// Analysis flag
pub const ANLFL: &str = "ANLFL";

/// CellProperties columns
pub const CELL_PROPERTIES_COLUMNS: &[&str] = &[EXPID, CELLID, PARAMCD, PARAM, VALUE, UNIT];

/// LiquidAdditions columns
pub const LIQUID_ADDITIONS_COLUMNS: &[&str] = &[
    EXPID, CELLID, STIME, LJP, LJPU, LIQUID, CONC, CONCU, CONCT, FIRST, LAST, CTLFL, SBFL, ANL,
    SRCXFN, NOTES,
];

/// CursorsDefinitions columns
pub const CURSORS_DEFINITIONS_COLUMNS: &[&str] = &[CURSOR, STIME, STIMEU, ETIME, ETIMEU, CURSORT];

/// Fixed ResultsWide columns; one column per cursor name follows
pub const RESULTS_WIDE_COLUMNS: &[&str] = &[
    EXPID, CELLID, RESTYPE, LEAKMTH, ELTIME, ELTIMEU, TRACENUM, ANLFL, SRCXFN, LIQUID, CONC,
    CONCU, CONCT,
];
