use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::{WaveformFrame, WaveformLocator};
use crate::error::TedError;
use crate::model::{EncapsulatedSource, Waveform};
use crate::table::{read_csv, write_csv, write_workbook, XlsxBook};

/// Reads and writes waveform frames inside a TED dataset directory
///
/// Loaded frames are cached by locator, so the traces of one cell are parsed
/// once no matter how many results reference them.
#[derive(Debug)]
pub struct WaveformStore {
    root: PathBuf,
    cache: HashMap<String, WaveformFrame>,
}

impl WaveformStore {
    /// Create a store rooted at the dataset directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            cache: HashMap::new(),
        }
    }

    /// Dataset directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Save waveforms sharing one time axis to a single locator
    ///
    /// Spreadsheet locators produce a workbook holding only that sheet; use
    /// [`WaveformStore::save_workbook`] to write several sheets at once.
    pub fn save(&self, waveforms: &[&Waveform], locator: &WaveformLocator) -> Result<(), TedError> {
        let frame = WaveformFrame::from_waveforms(waveforms.iter().copied())?;
        match locator {
            WaveformLocator::Csv { file } => self.save_csv(file, &frame),
            WaveformLocator::ZippedCsv { archive, inner } => self.save_zip(archive, inner, &frame),
            WaveformLocator::XlsxSheet { workbook, sheet } => {
                let sheet = sheet.clone().unwrap_or_else(|| "Sheet1".to_string());
                self.save_workbook(workbook, &[(sheet, frame)])
            }
        }
    }

    /// Write a frame as a plain CSV file
    pub fn save_csv(&self, file: &str, frame: &WaveformFrame) -> Result<(), TedError> {
        let path = self.root.join(file);
        log::debug!("Writing waveforms to {}", path.display());

        let writer = BufWriter::new(File::create(&path)?);
        write_csv(writer, &frame.to_sheet(file))
    }

    /// Write a frame as a CSV entry inside a deflate-compressed zip archive
    pub fn save_zip(&self, archive: &str, inner: &str, frame: &WaveformFrame) -> Result<(), TedError> {
        let path = self.root.join(archive);
        log::debug!("Writing waveforms to {}:{}", path.display(), inner);

        let file = File::create(&path)?;
        let mut zip = ZipWriter::new(BufWriter::new(file));
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated);

        zip.start_file(inner, options)?;
        write_csv(&mut zip, &frame.to_sheet(inner))?;
        let mut writer = zip.finish()?;
        writer.flush()?;
        Ok(())
    }

    /// Write frames to one workbook, one sheet per frame
    pub fn save_workbook(
        &self,
        workbook: &str,
        frames: &[(String, WaveformFrame)],
    ) -> Result<(), TedError> {
        let path = self.root.join(workbook);
        log::debug!("Writing {} waveform sheet(s) to {}", frames.len(), path.display());

        let sheets: Vec<_> = frames
            .iter()
            .map(|(name, frame)| frame.to_sheet(name.as_str()))
            .collect();
        write_workbook(&path, &sheets)
    }

    /// Load the frame at a locator, reading it from disk on first use
    pub fn load(&mut self, locator: &WaveformLocator) -> Result<&WaveformFrame, TedError> {
        let key = locator.to_string();
        if !self.cache.contains_key(&key) {
            let frame = self.read_frame(locator)?;
            self.cache.insert(key.clone(), frame);
        }
        self.cache
            .get(&key)
            .ok_or_else(|| TedError::encapsulated(key.as_str(), "frame missing from cache"))
    }

    /// Physical samples of one named column
    pub fn load_column(&mut self, locator: &WaveformLocator, column: &str) -> Result<Vec<f64>, TedError> {
        let frame = self.load(locator)?;
        frame
            .column(column)
            .map(<[f64]>::to_vec)
            .ok_or_else(|| {
                TedError::encapsulated(
                    format!("{}:{}", locator, column),
                    "column not found in waveform file",
                )
            })
    }

    /// Load the digits an [`EncapsulatedSource`] points at
    ///
    /// `header_size` counts the header row, so a value of 1 reads every data
    /// row; `num_rows` limits how many samples are returned.
    pub fn resolve_digits(&mut self, source: &EncapsulatedSource) -> Result<Vec<f64>, TedError> {
        let locator = WaveformLocator::parse(&source.filename)?;
        let frame = self.load(&locator)?;

        let header_value = frame
            .headers()
            .get(source.item_col)
            .map(|h| h.trim().parse::<f64>().unwrap_or(f64::NAN));
        let column = frame.column_at(source.item_col).ok_or_else(|| {
            TedError::encapsulated(
                source.filename.as_str(),
                format!("column {} not found in waveform file", source.item_col),
            )
        })?;

        let rows = header_value
            .filter(|_| source.header_size == 0)
            .into_iter()
            .chain(column.iter().copied())
            .skip(source.header_size.saturating_sub(1));

        Ok(match source.num_rows {
            Some(n) => rows.take(n).collect(),
            None => rows.collect(),
        })
    }

    /// Fill a waveform's digits from its external source, if it has one
    pub fn hydrate(&mut self, waveform: &mut Waveform) -> Result<(), TedError> {
        if let Some(source) = waveform.source.clone() {
            waveform.digits = self.resolve_digits(&source)?;
        }
        Ok(())
    }

    fn read_frame(&self, locator: &WaveformLocator) -> Result<WaveformFrame, TedError> {
        let path = self.root.join(locator.file());
        log::debug!("Reading waveforms from {}", locator);

        let sheet = match locator {
            WaveformLocator::Csv { file } => {
                let reader = BufReader::new(open(&path)?);
                read_csv(reader, file).map_err(|e| TedError::parse_file(file.as_str(), e.to_string()))?
            }
            WaveformLocator::ZippedCsv { archive, inner } => {
                let mut zip = ZipArchive::new(BufReader::new(open(&path)?))
                    .map_err(|e| TedError::parse_file(archive.as_str(), e.to_string()))?;
                let mut entry = zip.by_name(inner).map_err(|_| {
                    TedError::parse_file(
                        archive.as_str(),
                        format!("archive does not contain {}", inner),
                    )
                })?;
                let mut bytes = Vec::new();
                entry.read_to_end(&mut bytes)?;
                read_csv(bytes.as_slice(), inner)
                    .map_err(|e| TedError::parse_file(locator.to_string(), e.to_string()))?
            }
            WaveformLocator::XlsxSheet { sheet, .. } => {
                let mut book = XlsxBook::open(&path)?;
                let name = match sheet {
                    Some(name) => name.clone(),
                    None => book.sheet_names().into_iter().next().ok_or_else(|| {
                        TedError::parse_file(locator.to_string(), "workbook has no sheets")
                    })?,
                };
                book.read_sheet(&name, true)?
            }
        };

        WaveformFrame::from_sheet(&sheet)
    }
}

fn open(path: &Path) -> Result<File, TedError> {
    File::open(path).map_err(|e| TedError::parse_file(path.display().to_string(), e.to_string()))
}
