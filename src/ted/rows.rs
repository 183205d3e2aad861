//! Typed rows of the TED index sheets

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::TedError;
use crate::schema::{columns as col, FLAG_YES, SHEET_GENERAL_INFORMATION};
use crate::table::{Sheet, TableValue};

/// Study and device information (GeneralInformation sheet)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneralInformation {
    /// STUDYID
    pub study_id: String,
    /// REPORT_TITLE
    pub report_title: String,
    /// REPORT_VERSION
    pub report_version: String,
    /// REPORT_DATE
    pub report_date: String,
    /// REPORT_DESCRIPTION
    pub report_description: String,
    /// DEVICE_ID
    pub device_id: String,
    /// DEVICE_CODE
    pub device_code: String,
    /// DEVICE_MODEL
    pub device_model: String,
    /// DEVICE_SOFTWARE
    pub device_software: String,
}

impl GeneralInformation {
    fn values(&self) -> [&str; 9] {
        [
            self.study_id.as_str(),
            self.report_title.as_str(),
            self.report_version.as_str(),
            self.report_date.as_str(),
            self.report_description.as_str(),
            self.device_id.as_str(),
            self.device_code.as_str(),
            self.device_model.as_str(),
            self.device_software.as_str(),
        ]
    }

    /// Headerless key/value sheet
    pub fn to_sheet(&self) -> Sheet {
        let mut sheet = Sheet::headerless(SHEET_GENERAL_INFORMATION);
        for (key, value) in col::GENERAL_INFORMATION_KEYS.iter().zip(self.values()) {
            sheet.push_row(vec![TableValue::from(*key), TableValue::from(value)]);
        }
        sheet
    }

    /// Read key/value rows; missing keys read as empty strings
    pub fn from_sheet(sheet: &Sheet) -> Self {
        let lookup = |key: &str| {
            (0..sheet.row_count())
                .find(|r| sheet.cell(*r, 0).as_text().trim() == key)
                .map(|r| sheet.cell(r, 1).as_text())
                .unwrap_or_default()
        };

        Self {
            study_id: lookup(col::STUDYID),
            report_title: lookup(col::REPORT_TITLE),
            report_version: lookup(col::REPORT_VERSION),
            report_date: lookup(col::REPORT_DATE),
            report_description: lookup(col::REPORT_DESCRIPTION),
            device_id: lookup(col::DEVICE_ID),
            device_code: lookup(col::DEVICE_CODE),
            device_model: lookup(col::DEVICE_MODEL),
            device_software: lookup(col::DEVICE_SOFTWARE),
        }
    }
}

/// One CellProperties row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellPropertyRow {
    /// EXPID
    pub exp_id: String,
    /// CELLID
    pub cell_id: String,
    /// PARAMCD
    pub code: String,
    /// PARAM
    pub name: String,
    /// VALUE
    pub value: String,
    /// UNIT
    pub unit: String,
}

impl CellPropertyRow {
    /// Cells in column order
    pub fn to_row(&self) -> Vec<TableValue> {
        vec![
            TableValue::from(&self.exp_id),
            TableValue::from(&self.cell_id),
            TableValue::from(&self.code),
            TableValue::from(&self.name),
            TableValue::from(&self.value),
            TableValue::from(&self.unit),
        ]
    }

    /// Read row `r` of a CellProperties sheet
    pub fn from_sheet(sheet: &Sheet, r: usize) -> Self {
        Self {
            exp_id: sheet.value(r, col::EXPID).as_text(),
            cell_id: sheet.value(r, col::CELLID).as_text(),
            code: sheet.value(r, col::PARAMCD).as_text(),
            name: sheet.value(r, col::PARAM).as_text(),
            value: sheet.value(r, col::VALUE).as_text(),
            unit: sheet.value(r, col::UNIT).as_text(),
        }
    }
}

/// One LiquidAdditions row: a liquid applied over a range of traces
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidAdditionRow {
    /// EXPID
    pub exp_id: String,
    /// CELLID
    pub cell_id: String,
    /// STIME: start time of the experiment
    pub start_time: String,
    /// LJP
    pub ljp: f64,
    /// LJPU
    pub ljp_unit: String,
    /// LIQUID
    pub liquid: String,
    /// CONC
    pub concentration: f64,
    /// CONCU
    pub concentration_unit: String,
    /// CONCT
    pub concentration_type: String,
    /// FIRST
    pub first: u32,
    /// LAST
    pub last: u32,
    /// CTLFL
    pub control: bool,
    /// SBFL
    pub selective_blocker: bool,
    /// ANL
    pub analysed: String,
    /// SRCXFN
    pub source_files: String,
    /// NOTES
    pub notes: String,
}

impl LiquidAdditionRow {
    /// True when `trace` lies in `[FIRST, LAST]` of this experiment/cell
    pub fn covers(&self, exp_id: &str, cell_id: &str, trace: u32) -> bool {
        self.exp_id == exp_id && self.cell_id == cell_id && self.first <= trace && trace <= self.last
    }

    /// Cells in column order
    pub fn to_row(&self) -> Vec<TableValue> {
        vec![
            TableValue::from(&self.exp_id),
            TableValue::from(&self.cell_id),
            TableValue::from(&self.start_time),
            TableValue::from(self.ljp),
            TableValue::from(&self.ljp_unit),
            TableValue::from(&self.liquid),
            TableValue::from(self.concentration),
            TableValue::from(&self.concentration_unit),
            TableValue::from(&self.concentration_type),
            TableValue::from(self.first),
            TableValue::from(self.last),
            flag(self.control),
            flag(self.selective_blocker),
            TableValue::from(&self.analysed),
            TableValue::from(&self.source_files),
            TableValue::from(&self.notes),
        ]
    }

    /// Read row `r` of a LiquidAdditions sheet
    pub fn from_sheet(sheet: &Sheet, r: usize) -> Result<Self, TedError> {
        Ok(Self {
            exp_id: sheet.value(r, col::EXPID).as_text(),
            cell_id: sheet.value(r, col::CELLID).as_text(),
            start_time: sheet.value(r, col::STIME).as_text(),
            ljp: sheet.value(r, col::LJP).as_f64_or_nan(),
            ljp_unit: sheet.value(r, col::LJPU).as_text(),
            liquid: sheet.value(r, col::LIQUID).as_text(),
            concentration: sheet.value(r, col::CONC).as_f64_or_nan(),
            concentration_unit: sheet.value(r, col::CONCU).as_text(),
            concentration_type: sheet.value(r, col::CONCT).as_text().trim().to_uppercase(),
            first: required_trace(sheet, r, col::FIRST)?,
            last: required_trace(sheet, r, col::LAST)?,
            control: read_flag(sheet.value(r, col::CTLFL)),
            selective_blocker: read_flag(sheet.value(r, col::SBFL)),
            analysed: sheet.value(r, col::ANL).as_text(),
            source_files: sheet.value(r, col::SRCXFN).as_text(),
            notes: sheet.value(r, col::NOTES).as_text(),
        })
    }
}

/// One CursorsDefinitions row
#[derive(Debug, Clone, PartialEq)]
pub struct CursorDefinitionRow {
    /// CURSOR
    pub name: String,
    /// STIME
    pub start: f64,
    /// STIMEU
    pub start_unit: String,
    /// ETIME
    pub end: f64,
    /// ETIMEU
    pub end_unit: String,
    /// CURSORT
    pub cursor_type: String,
}

impl CursorDefinitionRow {
    /// Cells in column order
    pub fn to_row(&self) -> Vec<TableValue> {
        vec![
            TableValue::from(&self.name),
            TableValue::from(self.start),
            TableValue::from(&self.start_unit),
            TableValue::from(self.end),
            TableValue::from(&self.end_unit),
            TableValue::from(&self.cursor_type),
        ]
    }

    /// Read row `r` of a CursorsDefinitions sheet
    pub fn from_sheet(sheet: &Sheet, r: usize) -> Self {
        Self {
            name: sheet.value(r, col::CURSOR).as_text(),
            start: sheet.value(r, col::STIME).as_f64_or_nan(),
            start_unit: sheet.value(r, col::STIMEU).as_text(),
            end: sheet.value(r, col::ETIME).as_f64_or_nan(),
            end_unit: sheet.value(r, col::ETIMEU).as_text(),
            cursor_type: sheet.value(r, col::CURSORT).as_text(),
        }
    }
}

/// One ResultsWide row: fixed columns plus one value per cursor name
#[derive(Debug, Clone, PartialEq)]
pub struct ResultWideRow {
    /// EXPID
    pub exp_id: String,
    /// CELLID
    pub cell_id: String,
    /// RESTYPE
    pub result_type: String,
    /// LEAKMTH
    pub leak_method: String,
    /// ELTIME
    pub elapsed_time: f64,
    /// ELTIMEU
    pub elapsed_time_unit: String,
    /// TRACENUM
    pub trace_number: u32,
    /// ANLFL
    pub analysed: bool,
    /// SRCXFN
    pub source_file: String,
    /// LIQUID
    pub liquid: String,
    /// CONC
    pub concentration: f64,
    /// CONCU
    pub concentration_unit: String,
    /// CONCT
    pub concentration_type: String,
    /// Cursor name to evaluated value
    pub cursors: BTreeMap<String, f64>,
}

impl ResultWideRow {
    /// Cells in column order, followed by one cell per name of `cursor_names`
    pub fn to_row(&self, cursor_names: &[String]) -> Vec<TableValue> {
        let mut row = vec![
            TableValue::from(&self.exp_id),
            TableValue::from(&self.cell_id),
            TableValue::from(&self.result_type),
            TableValue::from(&self.leak_method),
            TableValue::from(self.elapsed_time),
            TableValue::from(&self.elapsed_time_unit),
            TableValue::from(self.trace_number),
            flag(self.analysed),
            TableValue::from(&self.source_file),
            TableValue::from(&self.liquid),
            TableValue::from(self.concentration),
            TableValue::from(&self.concentration_unit),
            TableValue::from(&self.concentration_type),
        ];
        row.extend(
            cursor_names
                .iter()
                .map(|name| self.cursors.get(name).copied().map(TableValue::from).unwrap_or_default()),
        );
        row
    }

    /// Read row `r` of a ResultsWide sheet, taking cursor values from `cursor_columns`
    pub fn from_sheet(sheet: &Sheet, r: usize, cursor_columns: &[String]) -> Result<Self, TedError> {
        let cursors = cursor_columns
            .iter()
            .filter_map(|name| sheet.value(r, name).as_f64().map(|v| (name.clone(), v)))
            .collect();

        Ok(Self {
            exp_id: sheet.value(r, col::EXPID).as_text(),
            cell_id: sheet.value(r, col::CELLID).as_text(),
            result_type: sheet.value(r, col::RESTYPE).as_text(),
            leak_method: sheet.value(r, col::LEAKMTH).as_text(),
            elapsed_time: sheet.value(r, col::ELTIME).as_f64_or_nan(),
            elapsed_time_unit: sheet.value(r, col::ELTIMEU).as_text(),
            trace_number: required_trace(sheet, r, col::TRACENUM)?,
            analysed: read_flag(sheet.value(r, col::ANLFL)),
            source_file: sheet.value(r, col::SRCXFN).as_text(),
            liquid: sheet.value(r, col::LIQUID).as_text(),
            concentration: sheet.value(r, col::CONC).as_f64_or_nan(),
            concentration_unit: sheet.value(r, col::CONCU).as_text(),
            concentration_type: sheet.value(r, col::CONCT).as_text(),
            cursors,
        })
    }

    /// Equal on every column except `SRCXFN`
    pub fn same_content(&self, other: &Self) -> bool {
        let same_f64 = |a: f64, b: f64| a.total_cmp(&b) == Ordering::Equal;
        self.exp_id == other.exp_id
            && self.cell_id == other.cell_id
            && self.result_type == other.result_type
            && self.leak_method == other.leak_method
            && same_f64(self.elapsed_time, other.elapsed_time)
            && self.elapsed_time_unit == other.elapsed_time_unit
            && self.trace_number == other.trace_number
            && self.analysed == other.analysed
            && self.liquid == other.liquid
            && same_f64(self.concentration, other.concentration)
            && self.concentration_unit == other.concentration_unit
            && self.concentration_type == other.concentration_type
            && self.cursors.len() == other.cursors.len()
            && self
                .cursors
                .iter()
                .zip(&other.cursors)
                .all(|((ka, va), (kb, vb))| ka == kb && same_f64(*va, *vb))
    }
}

fn flag(set: bool) -> TableValue {
    if set {
        TableValue::from(FLAG_YES)
    } else {
        TableValue::Empty
    }
}

fn read_flag(value: &TableValue) -> bool {
    match value {
        TableValue::Bool(b) => *b,
        other => other.as_text().trim().eq_ignore_ascii_case(FLAG_YES),
    }
}

fn required_trace(sheet: &Sheet, r: usize, column: &str) -> Result<u32, TedError> {
    let value = sheet.value(r, column);
    value.as_u32().ok_or_else(|| {
        TedError::parse_file(
            sheet.name.as_str(),
            format!(
                "row {}: {} must be a trace number, found '{}'",
                r + 2,
                column,
                value
            ),
        )
    })
}
