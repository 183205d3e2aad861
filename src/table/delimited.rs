use std::io::{Read, Write};

use super::{Sheet, TableValue};
use crate::error::TedError;

/// Write a sheet as comma-separated text (header row first)
pub fn write_csv<W: Write>(writer: W, sheet: &Sheet) -> Result<(), TedError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    if sheet.has_header() {
        csv_writer.write_record(&sheet.headers)?;
    }
    for row in &sheet.rows {
        csv_writer.write_record(row.iter().map(render_field))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read comma-separated text whose first record is the header row
pub fn read_csv<R: Read>(reader: R, name: &str) -> Result<Sheet, TedError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut sheet = Sheet::new(name, headers);
    for record in csv_reader.records() {
        let record = record?;
        sheet.push_row(record.iter().map(TableValue::parse).collect());
    }
    sheet.normalize_width();

    Ok(sheet)
}

fn render_field(value: &TableValue) -> String {
    match value {
        TableValue::Empty => String::new(),
        // Shortest representation that parses back to the same f64
        TableValue::Number(v) if v.is_finite() => v.to_string(),
        TableValue::Number(_) => String::new(),
        TableValue::Text(s) => s.clone(),
        TableValue::Bool(b) => b.to_string(),
    }
}
