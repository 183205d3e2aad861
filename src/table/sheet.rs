use super::TableValue;

/// Named table with an optional header row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    /// Sheet name (worksheet name in a workbook)
    pub name: String,

    /// Column headers (empty for headerless sheets)
    pub headers: Vec<String>,

    /// Data rows
    pub rows: Vec<Vec<TableValue>>,
}

impl Sheet {
    /// Create an empty sheet with the given headers
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Create an empty sheet from static header names
    pub fn with_columns(name: impl Into<String>, headers: &[&str]) -> Self {
        Self::new(name, headers.iter().map(|h| h.to_string()).collect())
    }

    /// Create an empty headerless sheet
    pub fn headerless(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// True when the sheet has a header row
    pub fn has_header(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<TableValue>) {
        self.rows.push(row);
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the column with exactly this header
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cell of `row` under `header`; missing columns and short rows read as empty
    pub fn value<'a>(&'a self, row: usize, header: &str) -> &'a TableValue {
        const EMPTY: &TableValue = &TableValue::Empty;
        self.column_index(header)
            .and_then(|col| self.rows.get(row).and_then(|r| r.get(col)))
            .unwrap_or(EMPTY)
    }

    /// Cell at `row`, `col`; out-of-range positions read as empty
    pub fn cell(&self, row: usize, col: usize) -> &TableValue {
        const EMPTY: &TableValue = &TableValue::Empty;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(EMPTY)
    }

    /// All values of a column by index
    pub fn column_values(&self, col: usize) -> Vec<TableValue> {
        (0..self.rows.len()).map(|r| self.cell(r, col).clone()).collect()
    }

    /// Drop columns whose header is blank (spreadsheet formula leftovers)
    pub fn drop_unnamed_columns(&mut self) {
        let keep: Vec<bool> = self
            .headers
            .iter()
            .map(|h| !h.trim().is_empty() && !h.starts_with("Unnamed"))
            .collect();
        if keep.iter().all(|k| *k) {
            return;
        }
        self.headers = self
            .headers
            .iter()
            .zip(&keep)
            .filter(|(_, k)| **k)
            .map(|(h, _)| h.clone())
            .collect();
        for row in &mut self.rows {
            *row = row
                .iter()
                .zip(&keep)
                .filter(|(_, k)| **k)
                .map(|(v, _)| v.clone())
                .collect();
        }
    }

    /// Ensure every row has exactly `headers.len()` cells (headed sheets only)
    pub(crate) fn normalize_width(&mut self) {
        let width = self.headers.len();
        if width == 0 {
            return;
        }
        for row in &mut self.rows {
            row.resize(width, TableValue::Empty);
        }
    }
}
