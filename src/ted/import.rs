use std::collections::HashSet;
use std::path::Path;

use super::config::ImportConfig;
use super::report::ConversionReport;
use super::rows::{
    CellPropertyRow, CursorDefinitionRow, GeneralInformation, LiquidAdditionRow, ResultWideRow,
};
use super::trace_list::parse_trace_list;
use crate::encapsulated::{WaveformFrame, WaveformLocator, WaveformStore};
use crate::error::TedError;
use crate::model::*;
use crate::schema::{columns as col, *};
use crate::table::{Sheet, XlsxBook};

/// Result of [`TedImporter::import`]
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// Reconstructed trial
    pub trial: Trial,

    /// Warnings raised during the import
    pub report: ConversionReport,
}

/// Reads a TED dataset directory back into a [`Trial`]
#[derive(Debug, Clone, Default)]
pub struct TedImporter {
    config: ImportConfig,
}

/// Liquid protocol identity: one protocol per distinct combination
#[derive(PartialEq)]
struct LiquidKey {
    liquid: String,
    concentration: u64,
    concentration_unit: String,
    concentration_type: String,
    control: bool,
    selective_blocker: bool,
}

impl LiquidKey {
    fn of(row: &LiquidAdditionRow) -> Self {
        Self {
            liquid: row.liquid.clone(),
            concentration: row.concentration.to_bits(),
            concentration_unit: row.concentration_unit.clone(),
            concentration_type: row.concentration_type.clone(),
            control: row.control,
            selective_blocker: row.selective_blocker,
        }
    }
}

impl TedImporter {
    /// Create an importer
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Import options
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import the dataset in `directory`, whose index is `config.index_file_name`
    pub fn import<P: AsRef<Path>>(&self, directory: P) -> Result<ImportOutcome, TedError> {
        let directory = directory.as_ref();
        let index_path = directory.join(&self.config.index_file_name);
        log::info!("Reading TED index {}", index_path.display());

        let mut report = ConversionReport::new("import");
        let mut book = XlsxBook::open(&index_path)?;

        let general = GeneralInformation::from_sheet(&book.read_sheet(SHEET_GENERAL_INFORMATION, false)?);
        let cell_sheet = book.read_sheet(SHEET_CELL_PROPERTIES, true)?;
        let la_sheet = book.read_sheet(SHEET_LIQUID_ADDITIONS, true)?;
        let cd_sheet = book.read_sheet(SHEET_CURSORS_DEFINITIONS, true)?;
        let mut rw_sheet = book.read_sheet(SHEET_RESULTS_WIDE, true)?;
        rw_sheet.drop_unnamed_columns();
        let ivp_sheet = if book.has_sheet(SHEET_INTENDED_VOLTAGE_PROTOCOL) {
            Some(book.read_sheet(SHEET_INTENDED_VOLTAGE_PROTOCOL, true)?)
        } else {
            None
        };

        require_columns(&cell_sheet, &[col::EXPID, col::CELLID, col::PARAMCD])?;
        require_columns(&la_sheet, &[col::EXPID, col::CELLID, col::LIQUID, col::FIRST, col::LAST])?;
        require_columns(&cd_sheet, &[col::CURSOR])?;
        require_columns(&rw_sheet, &[col::EXPID, col::CELLID, col::RESTYPE, col::TRACENUM])?;

        let mut trial = Trial::new(TED_FORMAT_VERSION, "COD dataset imported from TED files");
        trial.study = Study {
            study_id: general.study_id.clone(),
            report: StudyReport::new(
                general.report_title.as_str(),
                general.report_version.as_str(),
                general.report_date.as_str(),
                general.report_description.as_str(),
            ),
        };
        let device = Device::new(
            Id::new(general.device_id.as_str()),
            general.device_code.as_str(),
            general.device_model.as_str(),
            general.device_software.as_str(),
        );
        let device_id = device.id.clone();
        trial.devices.push(device);

        let additions = (0..la_sheet.row_count())
            .map(|r| LiquidAdditionRow::from_sheet(&la_sheet, r))
            .collect::<Result<Vec<_>, _>>()?;
        trial.ljp = junction_potential(&additions, &mut report);
        let analysed: Vec<Vec<u32>> = additions
            .iter()
            .map(|addition| {
                let list = parse_trace_list(&addition.analysed);
                if !list.skipped.is_empty() {
                    report.warn(format!(
                        "experiment {}: ANL of the {} addition has unreadable token(s) {}; they are ignored",
                        addition.exp_id,
                        addition.liquid,
                        list.skipped.join(", ")
                    ));
                }
                list.traces
            })
            .collect();

        let voltage_protocol = self.voltage_protocol(ivp_sheet.as_ref(), &mut report);
        let voltage_id = voltage_protocol.as_ref().map(|p| p.id.clone());
        trial.protocols.extend(voltage_protocol);

        let addition_protocols = liquid_protocols(&additions, &mut trial, &mut report);

        let cursor_definitions: Vec<Cursor> = (0..cd_sheet.row_count())
            .map(|r| CursorDefinitionRow::from_sheet(&cd_sheet, r))
            .map(|row| cursor_from_row(row, &mut report))
            .collect();
        let cursor_columns = cursor_columns(&rw_sheet, &cursor_definitions);

        let rows = (0..rw_sheet.row_count())
            .map(|r| ResultWideRow::from_sheet(&rw_sheet, r, &cursor_columns))
            .collect::<Result<Vec<_>, _>>()?;
        let properties: Vec<CellPropertyRow> = (0..cell_sheet.row_count())
            .map(|r| CellPropertyRow::from_sheet(&cell_sheet, r))
            .collect();

        let mut store = WaveformStore::new(directory);
        let mut experiments_seen: Vec<(&str, &str, &str)> = Vec::new();
        let mut unit_warnings = HashSet::new();

        for addition in &additions {
            let key = (
                addition.exp_id.as_str(),
                addition.cell_id.as_str(),
                addition.start_time.as_str(),
            );
            if experiments_seen.contains(&key) {
                continue;
            }
            experiments_seen.push(key);
            let (exp_id, cell_id, start_time) = key;

            let mut experiment = Experiment::new(Id::new(exp_id), device_id.clone(), start_time);
            experiment.name = exp_id.to_string();

            let exp_rows: Vec<&ResultWideRow> = rows
                .iter()
                .filter(|r| r.exp_id == exp_id && r.cell_id == cell_id)
                .collect();

            let cell_properties = properties
                .iter()
                .filter(|p| p.exp_id == exp_id && p.cell_id == cell_id)
                .map(|p| Property::new(p.code.as_str(), p.name.as_str(), p.value.as_str(), p.unit.as_str()))
                .collect();
            let mut results = Results::new(
                Cell::new(Id::new(cell_id), cell_properties),
                PatchType::Single,
                leak_method(exp_id, &exp_rows, &mut report),
            );
            results.cursors = cursor_definitions.clone();

            for row in exp_rows {
                let n = row.trace_number;
                let covering: Vec<usize> = additions
                    .iter()
                    .enumerate()
                    .filter(|(_, a)| a.covers(exp_id, cell_id, n))
                    .map(|(k, _)| k)
                    .collect();
                let [k] = covering.as_slice() else {
                    report.warn(format!(
                        "experiment {}: trace {} is covered by {} liquid addition(s); trace skipped",
                        exp_id,
                        n,
                        covering.len()
                    ));
                    continue;
                };
                let addition = &additions[*k];

                let Some(result_type) = ResultType::from_ted_str(&row.result_type) else {
                    report.warn(format!(
                        "experiment {}: trace {} has unknown RESTYPE '{}'; trace skipped",
                        exp_id, n, row.result_type
                    ));
                    continue;
                };

                if n == addition.first {
                    experiment.protocols.push(ProtocolExecution::new(
                        addition_protocols[*k].clone(),
                        row.elapsed_time,
                        row.elapsed_time_unit.as_str(),
                    ));
                }
                if let Some(voltage_id) = &voltage_id {
                    experiment.protocols.push(ProtocolExecution::new(
                        voltage_id.clone(),
                        row.elapsed_time,
                        row.elapsed_time_unit.as_str(),
                    ));
                }

                let sources = source_candidates(addition, row);
                let Some(waveform) = find_waveform(
                    &mut store,
                    &sources,
                    n,
                    result_type,
                    &mut unit_warnings,
                    &mut report,
                )?
                else {
                    report.warn(format!(
                        "experiment {}: no {} column for trace {} in {}; trace skipped",
                        exp_id,
                        result_type.signal_kind(),
                        n,
                        sources.join(";")
                    ));
                    continue;
                };

                let valid = analysed[*k].contains(&n);
                let mut result = TraceResult::new(
                    n,
                    valid,
                    result_type,
                    row.elapsed_time,
                    row.elapsed_time_unit.as_str(),
                    waveform,
                );
                result.cursors = cursor_columns
                    .iter()
                    .filter_map(|name| {
                        let value = *row.cursors.get(name)?;
                        let base = cursor_definitions
                            .iter()
                            .find(|c| &c.name == name)
                            .cloned()
                            .unwrap_or_else(|| Cursor::named(name.as_str()));
                        Some(base.evaluated(CursorResult::new(value, self.config.cursor_unit.as_str())))
                    })
                    .collect();
                results.results.push(result);
            }

            experiment.results_sets.push(results);
            trial.experiments.push(experiment);
        }

        log::info!(
            "Imported {} experiment(s) with {} trace(s)",
            trial.experiments.len(),
            trial.trace_count()
        );
        Ok(ImportOutcome { trial, report })
    }

    fn voltage_protocol(&self, sheet: Option<&Sheet>, report: &mut ConversionReport) -> Option<Protocol> {
        let frame = match sheet.filter(|s| s.headers.len() >= 2).map(WaveformFrame::from_sheet) {
            Some(Ok(frame)) => frame,
            _ => {
                report.warn("IntendedVoltageProtocol sheet is missing or empty; no voltage protocol imported");
                return None;
            }
        };

        let time_unit = frame.time_unit();
        let header = frame.headers()[1].as_str();
        let (label, unit) = header.rsplit_once('_').unwrap_or(("voltage", header));
        let time = frame.time();
        let head = time.first().copied().unwrap_or(0.0);
        let step = match time {
            [t0, t1, ..] => t1 - t0,
            _ => 0.0,
        };
        let digits = frame.column_at(1).map(<[f64]>::to_vec).unwrap_or_default();
        let duration = digits.len().saturating_sub(1) as f64 * step;

        let waveform = Waveform {
            head: Quantity::new(head, time_unit.as_str()),
            increment: Quantity::new(step, time_unit.as_str()),
            origin: Quantity::new(0.0, unit),
            scale: Quantity::new(1.0, unit),
            digits,
            result_type: ResultType::Voltage,
            sequence_type: SequenceType::Reconstructed,
            display_name: "Intended voltage command".to_string(),
            trace_number: None,
            signal_name: label.to_string(),
            source: None,
        };

        Some(
            Protocol::voltage(
                Id::new(self.config.voltage_protocol_id.as_str()),
                "Intended voltage command",
                waveform,
            )
            .with_duration(duration, time_unit),
        )
    }
}

fn require_columns(sheet: &Sheet, columns: &[&str]) -> Result<(), TedError> {
    if sheet.row_count() == 0 {
        return Ok(());
    }
    match columns.iter().find(|c| sheet.column_index(c).is_none()) {
        Some(missing) => Err(TedError::parse_file(
            sheet.name.as_str(),
            format!("missing required column {}", missing),
        )),
        None => Ok(()),
    }
}

/// Junction potential of the first addition, used for the whole trial
fn junction_potential(additions: &[LiquidAdditionRow], report: &mut ConversionReport) -> LiquidJunctionPotential {
    let Some(first) = additions.first() else {
        return LiquidJunctionPotential::default();
    };
    if additions
        .iter()
        .any(|a| a.ljp.to_bits() != first.ljp.to_bits() || a.ljp_unit != first.ljp_unit)
    {
        report.warn(format!(
            "LiquidAdditions holds several LJP values; using {} {} for the whole trial",
            first.ljp, first.ljp_unit
        ));
    }
    LiquidJunctionPotential::new(first.ljp, first.ljp_unit.as_str(), LjpReportedVoltage::Vclamp)
}

/// Register liquids and liquid protocols; returns the protocol id of every addition
fn liquid_protocols(
    additions: &[LiquidAdditionRow],
    trial: &mut Trial,
    report: &mut ConversionReport,
) -> Vec<Id> {
    let mut keys: Vec<(LiquidKey, Id)> = Vec::new();
    let mut ids = Vec::with_capacity(additions.len());

    for addition in additions {
        let liquid = match trial.liquids.iter().find(|l| l.name == addition.liquid) {
            Some(liquid) => liquid.clone(),
            None => {
                let liquid = Liquid::new(
                    Id::new(format!("L-{}", trial.liquids.len())),
                    addition.liquid.as_str(),
                );
                trial.liquids.push(liquid.clone());
                liquid
            }
        };

        let key = LiquidKey::of(addition);
        if let Some((_, id)) = keys.iter().find(|(k, _)| *k == key) {
            ids.push(id.clone());
            continue;
        }

        let concentration_type = match ConcentrationType::from_ted_str(&addition.concentration_type) {
            Some(t) => t,
            None => {
                if !addition.concentration_type.is_empty() {
                    report.warn(format!(
                        "unknown concentration type '{}' for {}; using UNKNOWN",
                        addition.concentration_type, addition.liquid
                    ));
                }
                ConcentrationType::Unknown
            }
        };

        let id = Id::new(format!("P-{}_{}", keys.len(), liquid.id.root));
        let name = format!(
            "{} {} {}",
            addition.liquid,
            crate::table::TableValue::from(addition.concentration),
            addition.concentration_unit
        );
        let mut protocol = LiquidProtocol::new(
            liquid,
            addition.concentration,
            addition.concentration_unit.as_str(),
        );
        protocol.concentration_type = concentration_type;
        protocol.is_control = addition.control;
        protocol.is_selective_blocker = addition.selective_blocker;

        trial.protocols.push(Protocol::liquid(id.clone(), name.trim(), protocol));
        keys.push((key, id.clone()));
        ids.push(id);
    }

    ids
}

fn cursor_from_row(row: CursorDefinitionRow, report: &mut ConversionReport) -> Cursor {
    let mut cursor = Cursor::named(row.name);
    cursor.start = row.start;
    cursor.end = row.end;
    cursor.time_unit = row.start_unit;

    if row.cursor_type.trim().is_empty() {
        return cursor;
    }
    match CursorType::from_ted_str(&row.cursor_type) {
        Some(t) => cursor.cursor_type = Some(t),
        None => {
            report.warn(format!(
                "cursor {} has unknown type '{}'; stored as CUSTOM",
                cursor.name, row.cursor_type
            ));
            cursor.cursor_type = Some(CursorType::Custom);
            cursor.custom_type = row.cursor_type;
        }
    }
    cursor
}

/// ResultsWide columns holding cursor values: defined cursors first, then any other extra column
fn cursor_columns(sheet: &Sheet, definitions: &[Cursor]) -> Vec<String> {
    let mut names: Vec<String> = definitions
        .iter()
        .filter(|c| sheet.column_index(&c.name).is_some())
        .map(|c| c.name.clone())
        .collect();

    for header in &sheet.headers {
        let fixed = col::RESULTS_WIDE_COLUMNS.contains(&header.as_str())
            || header == col::CTLFL
            || header == col::SBFL;
        if !fixed && !names.contains(header) {
            names.push(header.clone());
        }
    }
    names
}

fn leak_method(exp_id: &str, rows: &[&ResultWideRow], report: &mut ConversionReport) -> LeakMethod {
    let mut names: Vec<&str> = Vec::new();
    for row in rows {
        let name = row.leak_method.trim();
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }

    let Some(first) = names.first() else {
        report.warn(format!(
            "experiment {}: no leak method found; assuming {}",
            exp_id,
            LeakMethod::None.as_ted_str()
        ));
        return LeakMethod::None;
    };
    if names.len() > 1 {
        report.warn(format!(
            "experiment {}: {} leak methods found but only one is supported; using {} for all results",
            exp_id,
            names.len(),
            first
        ));
    }
    LeakMethod::from_ted_str(first).unwrap_or_else(|| {
        report.warn(format!("experiment {}: unknown leak method '{}'", exp_id, first));
        LeakMethod::Unknown
    })
}

/// Waveform files to search for a trace: the addition's SRCXFN list, then the row's own
fn source_candidates(addition: &LiquidAdditionRow, row: &ResultWideRow) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for source in addition.source_files.split(';').chain(row.source_file.split(';')) {
        let source = source.trim();
        if !source.is_empty() && !sources.iter().any(|s| s == source) {
            sources.push(source.to_string());
        }
    }
    sources
}

fn find_waveform(
    store: &mut WaveformStore,
    sources: &[String],
    trace_number: u32,
    result_type: ResultType,
    unit_warnings: &mut HashSet<String>,
    report: &mut ConversionReport,
) -> Result<Option<Waveform>, TedError> {
    for source in sources {
        let locator = WaveformLocator::parse(source)?;
        let frame = store.load(&locator)?;
        let Some(column) = frame
            .trace_columns(trace_number)
            .into_iter()
            .find(|c| c.result_type == result_type)
        else {
            continue;
        };

        let axis = frame.time_axis();
        if axis.inferred && unit_warnings.insert(source.clone()) {
            report.warn(format!(
                "{}: time unit '{}' is not recognised; values read as {}",
                source,
                frame.time_unit(),
                axis.unit
            ));
        }

        let mut source_ref = EncapsulatedSource::new(locator.to_string());
        source_ref.item_col = column.index;
        source_ref.record_size = frame.headers().len();
        source_ref.num_rows = Some(column.values.len());

        return Ok(Some(Waveform {
            head: Quantity::new(axis.head_ms, "ms"),
            increment: Quantity::new(axis.step_ms, "ms"),
            origin: Quantity::new(0.0, column.unit.as_str()),
            scale: Quantity::new(1.0, column.unit.as_str()),
            digits: column.values.to_vec(),
            result_type,
            sequence_type: SequenceType::Recorded,
            display_name: column.kind.clone(),
            trace_number: Some(trace_number),
            signal_name: column.kind.clone(),
            source: Some(source_ref),
        }));
    }
    Ok(None)
}

/// Import a TED dataset with default options
pub fn from_xlsx<P: AsRef<Path>>(directory: P, index_file: &str) -> Result<Trial, TedError> {
    let config = ImportConfig {
        index_file_name: index_file.to_string(),
        ..Default::default()
    };
    Ok(TedImporter::new(config).import(directory)?.trial)
}
