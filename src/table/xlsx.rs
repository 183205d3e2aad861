use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use super::{Sheet, TableValue};
use crate::error::TedError;

/// Write sheets to a new workbook, one worksheet per sheet, in order
///
/// NaN numbers and empty values are left as blank cells.
pub fn write_workbook<P: AsRef<Path>>(path: P, sheets: &[Sheet]) -> Result<(), TedError> {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name.as_str())?;

        let mut row_idx: u32 = 0;
        if sheet.has_header() {
            for (col, header) in sheet.headers.iter().enumerate() {
                worksheet.write_string(row_idx, col as u16, header.as_str())?;
            }
            row_idx += 1;
        }

        for row in &sheet.rows {
            for (col, value) in row.iter().enumerate() {
                let col = col as u16;
                match value {
                    TableValue::Empty => {}
                    TableValue::Number(v) if v.is_finite() => {
                        worksheet.write_number(row_idx, col, *v)?;
                    }
                    TableValue::Number(_) => {}
                    TableValue::Text(s) => {
                        worksheet.write_string(row_idx, col, s.as_str())?;
                    }
                    TableValue::Bool(b) => {
                        worksheet.write_boolean(row_idx, col, *b)?;
                    }
                }
            }
            row_idx += 1;
        }
    }

    workbook.save(path.as_ref())?;
    Ok(())
}

/// Open spreadsheet workbook read sheet by sheet
pub struct XlsxBook {
    path: PathBuf,
    workbook: Xlsx<BufReader<File>>,
}

impl XlsxBook {
    /// Open a workbook
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TedError> {
        let path = path.as_ref().to_path_buf();
        let workbook: Xlsx<_> = open_workbook(&path).map_err(|e: calamine::XlsxError| {
            TedError::parse_file(path.display().to_string(), e.to_string())
        })?;
        Ok(Self { path, workbook })
    }

    /// Names of the worksheets in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// True when the workbook contains a worksheet with this name
    pub fn has_sheet(&self, name: &str) -> bool {
        self.workbook.sheet_names().iter().any(|s| s == name)
    }

    /// Read a worksheet; `has_header` takes the first row as column headers
    ///
    /// A missing worksheet is a [`TedError::ParseFile`].
    pub fn read_sheet(&mut self, name: &str, has_header: bool) -> Result<Sheet, TedError> {
        if !self.has_sheet(name) {
            return Err(TedError::parse_file(
                self.path.display().to_string(),
                format!("missing required sheet '{}'", name),
            ));
        }

        let range = self.workbook.worksheet_range(name)?;

        // Ranges start at the first used cell; pad back to A1
        let (row0, col0) = range.start().unwrap_or((0, 0));
        let mut grid: Vec<Vec<TableValue>> = vec![Vec::new(); row0 as usize];
        for row in range.rows() {
            let mut cells = vec![TableValue::Empty; col0 as usize];
            cells.extend(row.iter().map(convert_cell));
            grid.push(cells);
        }

        let mut sheet = Sheet::headerless(name);
        let mut rows = grid.into_iter();
        if has_header {
            if let Some(header_row) = rows.next() {
                sheet.headers = header_row.iter().map(|v| v.as_text().trim().to_string()).collect();
            }
        }
        sheet.rows = rows.collect();
        sheet.normalize_width();

        Ok(sheet)
    }
}

fn convert_cell(data: &Data) -> TableValue {
    match data {
        Data::Int(i) => TableValue::Number(*i as f64),
        Data::Float(f) => TableValue::Number(*f),
        Data::String(s) => TableValue::from(s.as_str()),
        Data::Bool(b) => TableValue::Bool(*b),
        Data::DateTimeIso(s) | Data::DurationIso(s) => TableValue::from(s.as_str()),
        // Date-formatted cells keep their text form, as if typed in
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => TableValue::Text(datetime.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => TableValue::Number(dt.as_f64()),
        },
        _ => TableValue::Empty,
    }
}
