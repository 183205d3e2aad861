use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::config::ExportConfig;
use super::projection::TabularProjection;
use super::report::{ConversionReport, ExportSummary};
use crate::encapsulated::{EdFormat, WaveformFrame, WaveformLocator, WaveformStore};
use crate::error::TedError;
use crate::model::{TraceResult, Trial, Waveform};
use crate::table::write_workbook;

/// Writes a [`Trial`] as a TED dataset: an index workbook plus waveform files
///
/// The waveform files are written next to the index workbook.
#[derive(Debug, Clone, Default)]
pub struct TedExporter {
    config: ExportConfig,
}

impl TedExporter {
    /// Create an exporter
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Export options
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export a trial; `index_path` is the index workbook to create
    pub fn export<P: AsRef<Path>>(&self, trial: &Trial, index_path: P) -> Result<ExportSummary, TedError> {
        let index_path = index_path.as_ref();
        if trial.devices.is_empty() {
            return Err(TedError::InvalidTrial("trial has no devices".to_string()));
        }

        let directory = match index_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&directory)?;

        let mut report = ConversionReport::new("export");
        let trial = self.hydrate(trial, &directory)?;
        let mut projection =
            TabularProjection::build_with(&trial, &mut report, self.config.compress_trace_ranges)?;

        let waveform_files = self.write_waveforms(&trial, &directory, &mut projection, &mut report)?;

        log::info!("Writing TED index to {}", index_path.display());
        write_workbook(index_path, &projection.to_sheets())?;

        Ok(ExportSummary {
            index_file: index_path.to_path_buf(),
            waveform_files,
            experiments: trial
                .experiments
                .iter()
                .filter(|e| !e.results_sets.is_empty())
                .count(),
            liquid_additions: projection.liquid_additions.len(),
            result_rows: projection.results_wide.len(),
            report,
        })
    }

    fn write_waveforms(
        &self,
        trial: &Trial,
        directory: &Path,
        projection: &mut TabularProjection,
        report: &mut ConversionReport,
    ) -> Result<Vec<String>, TedError> {
        let store = WaveformStore::new(directory);
        let mut files = Vec::new();
        let mut sheets = Vec::new();
        let mut used_names = HashSet::new();

        for experiment in &trial.experiments {
            let Some(results) = experiment.results_sets.first() else {
                continue;
            };
            let exp_id = experiment.id.composite();
            let cell_id = results.cell.id.composite();
            if results.results.is_empty() {
                report.warn(format!(
                    "experiment {} has no traces; no waveform file written",
                    exp_id
                ));
                continue;
            }

            let mut name = cell_id.clone();
            if !used_names.insert(name.clone()) {
                name = format!("{}_{}", exp_id, cell_id);
                report.warn(format!(
                    "cell {} is used by several experiments; waveforms of experiment {} are stored as {}",
                    cell_id, exp_id, name
                ));
                used_names.insert(name.clone());
            }

            let waveforms: Vec<Cow<'_, Waveform>> = results.results.iter().map(labelled_waveform).collect();
            let frame = WaveformFrame::from_waveforms(waveforms.iter().map(|w| w.as_ref()))?;

            let locator = self
                .config
                .edformat
                .locator_for(&name, &self.config.waveform_workbook_name);
            match &locator {
                WaveformLocator::Csv { file } => {
                    store.save_csv(file, &frame)?;
                    files.push(file.clone());
                }
                WaveformLocator::ZippedCsv { archive, inner } => {
                    store.save_zip(archive, inner, &frame)?;
                    files.push(archive.clone());
                }
                WaveformLocator::XlsxSheet { sheet, .. } => {
                    sheets.push((sheet.clone().unwrap_or_else(|| name.clone()), frame));
                }
            }
            projection.set_source_file(&exp_id, &cell_id, &locator.to_string());
        }

        if !sheets.is_empty() {
            store.save_workbook(&self.config.waveform_workbook_name, &sheets)?;
            files.push(self.config.waveform_workbook_name.clone());
        }

        log::info!(
            "Wrote {} waveform file(s) in {} format",
            files.len(),
            self.config.edformat
        );
        Ok(files)
    }

    /// Load the digits of waveforms held in external files
    fn hydrate<'a>(&self, trial: &'a Trial, directory: &Path) -> Result<Cow<'a, Trial>, TedError> {
        let needs_digits = |w: &Waveform| w.is_empty() && w.source.is_some();
        let pending = trial
            .experiments
            .iter()
            .filter_map(|e| e.results_sets.first())
            .flat_map(|rs| rs.results.iter())
            .any(|r| needs_digits(&r.waveform));
        if !pending {
            return Ok(Cow::Borrowed(trial));
        }

        let root = self.config.source_directory.as_deref().unwrap_or(directory);
        let mut store = WaveformStore::new(root);
        let mut owned = trial.clone();
        for results in owned.experiments.iter_mut().filter_map(|e| e.results_sets.first_mut()) {
            for result in &mut results.results {
                if needs_digits(&result.waveform) {
                    store.hydrate(&mut result.waveform)?;
                }
            }
        }
        Ok(Cow::Owned(owned))
    }
}

/// Waveform of a result carrying the trace number and kind used in its column name
fn labelled_waveform(result: &TraceResult) -> Cow<'_, Waveform> {
    let waveform = &result.waveform;
    if waveform.trace_number == Some(result.trace_number) && waveform.result_type == result.result_type {
        Cow::Borrowed(waveform)
    } else {
        let mut labelled = waveform.clone();
        labelled.trace_number = Some(result.trace_number);
        labelled.result_type = result.result_type;
        Cow::Owned(labelled)
    }
}

/// Export a trial with default options and the named waveform format
///
/// `edformat` is one of `csv`, `zip` or `xlsx`; anything else is a
/// [`TedError::EncapsulatedDataFile`].
pub fn to_xlsx<P: AsRef<Path>>(trial: &Trial, index_path: P, edformat: &str) -> Result<ExportSummary, TedError> {
    let edformat: EdFormat = edformat.parse()?;
    TedExporter::new(ExportConfig::with_edformat(edformat)).export(trial, index_path)
}
