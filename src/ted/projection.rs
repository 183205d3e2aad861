//! Flattening of a [`Trial`] into the TED index tables

use super::report::ConversionReport;
use super::rows::{
    CellPropertyRow, CursorDefinitionRow, GeneralInformation, LiquidAdditionRow, ResultWideRow,
};
use super::trace_list::{compress_trace_list, join_trace_list};
use crate::encapsulated::WaveformFrame;
use crate::error::TedError;
use crate::model::{Experiment, LiquidProtocol, ResultType, Results, TraceResult, Trial};
use crate::schema::{columns as col, *};
use crate::table::Sheet;
use crate::units::to_milliseconds;

/// The TED index tables of one trial
///
/// Only the first results set of every experiment is projected, and only its
/// current traces appear in ResultsWide and in the liquid addition ranges.
#[derive(Debug, Clone, Default)]
pub struct TabularProjection {
    /// GeneralInformation key/values
    pub general: GeneralInformation,

    /// CellProperties rows
    pub cell_properties: Vec<CellPropertyRow>,

    /// LiquidAdditions rows, sorted by STIME, EXPID, CELLID, FIRST, LAST
    pub liquid_additions: Vec<LiquidAdditionRow>,

    /// CursorsDefinitions rows, one per cursor name
    pub cursor_definitions: Vec<CursorDefinitionRow>,

    /// Cursor columns of ResultsWide, in order of first appearance
    pub cursor_names: Vec<String>,

    /// ResultsWide rows, sorted by EXPID, CELLID, ELTIME, TRACENUM
    pub results_wide: Vec<ResultWideRow>,

    /// IntendedVoltageProtocol sheet (None when the trial has no voltage protocol)
    pub voltage_protocol: Option<Sheet>,
}

impl TabularProjection {
    /// Project a trial, writing `ANL` as a plain `;` list
    pub fn build(trial: &Trial, report: &mut ConversionReport) -> Result<Self, TedError> {
        Self::build_with(trial, report, false)
    }

    /// Project a trial; `compress_trace_ranges` writes `ANL` as ranges
    pub fn build_with(
        trial: &Trial,
        report: &mut ConversionReport,
        compress_trace_ranges: bool,
    ) -> Result<Self, TedError> {
        let device = trial
            .devices
            .first()
            .ok_or_else(|| TedError::InvalidTrial("trial has no devices".to_string()))?;

        let mut projection = TabularProjection {
            general: GeneralInformation {
                study_id: trial.study.study_id.clone(),
                report_title: trial.study.report.title.clone(),
                report_version: trial.study.report.version.clone(),
                report_date: trial.study.report.date.clone(),
                report_description: trial.study.report.text.clone(),
                device_id: device.id.concatenated(),
                device_code: device.code.clone(),
                device_model: device.manufacturer_model_name.clone(),
                device_software: device.device_software_name.clone(),
            },
            ..Default::default()
        };

        for experiment in &trial.experiments {
            projection.add_experiment(trial, experiment, report, compress_trace_ranges)?;
        }

        projection.liquid_additions.sort_by(|a, b| {
            (&a.start_time, &a.exp_id, &a.cell_id, a.first, a.last)
                .cmp(&(&b.start_time, &b.exp_id, &b.cell_id, b.first, b.last))
        });

        projection.results_wide.sort_by(|a, b| {
            a.exp_id
                .cmp(&b.exp_id)
                .then_with(|| a.cell_id.cmp(&b.cell_id))
                .then_with(|| {
                    to_milliseconds(a.elapsed_time, &a.elapsed_time_unit)
                        .total_cmp(&to_milliseconds(b.elapsed_time, &b.elapsed_time_unit))
                })
                .then_with(|| a.trace_number.cmp(&b.trace_number))
        });
        let before = projection.results_wide.len();
        projection.results_wide.dedup_by(|b, a| a.same_content(b));
        if projection.results_wide.len() < before {
            log::debug!(
                "Collapsed {} duplicate ResultsWide row(s)",
                before - projection.results_wide.len()
            );
        }

        if let Some(protocol) = trial.intended_voltage_protocol() {
            if let Some(voltage) = protocol.as_voltage() {
                let frame = WaveformFrame::from_waveforms([&voltage.waveform])?;
                projection.voltage_protocol =
                    Some(frame.to_sheet(SHEET_INTENDED_VOLTAGE_PROTOCOL));
            }
        } else {
            report.warn("trial has no voltage protocol; IntendedVoltageProtocol is left empty");
        }

        Ok(projection)
    }

    fn add_experiment(
        &mut self,
        trial: &Trial,
        experiment: &Experiment,
        report: &mut ConversionReport,
        compress_trace_ranges: bool,
    ) -> Result<(), TedError> {
        let exp_id = experiment.id.composite();
        let Some(results) = experiment.results_sets.first() else {
            report.warn(format!("experiment {} has no results and is skipped", exp_id));
            return Ok(());
        };
        let cell_id = results.cell.id.composite();
        if experiment.results_sets.len() > 1 {
            report.warn(format!(
                "experiment {}: {} results sets found; only the first is exported",
                exp_id,
                experiment.results_sets.len()
            ));
        }
        check_leak_methods(&exp_id, experiment, report);

        for property in &results.cell.properties {
            self.cell_properties.push(CellPropertyRow {
                exp_id: exp_id.clone(),
                cell_id: cell_id.clone(),
                code: property.code.clone(),
                name: property.display_name.clone(),
                value: property.value.clone(),
                unit: property.unit.clone(),
            });
        }

        self.add_cursor_definitions(results, report);

        let traces = current_traces(results);
        let additions = liquid_additions(trial, experiment, &exp_id, &traces, report)?;

        // Index into `additions` of the range holding each trace
        let mut range_of = vec![None; traces.len()];
        let ljp = results.ljp.as_ref().unwrap_or(&trial.ljp);

        for (k, (first_idx, liquid)) in additions.iter().enumerate() {
            let last_idx = additions
                .get(k + 1)
                .map(|(next, _)| next - 1)
                .unwrap_or(traces.len() - 1);
            let in_range = &traces[*first_idx..=last_idx];
            range_of[*first_idx..=last_idx].fill(Some(k));

            let valid: Vec<u32> = in_range
                .iter()
                .filter(|t| t.valid)
                .map(|t| t.trace_number)
                .collect();
            let analysed = if compress_trace_ranges {
                compress_trace_list(&valid)
            } else {
                let mut unique = valid;
                unique.dedup();
                join_trace_list(&unique)
            };

            let mut sources: Vec<&str> = Vec::new();
            for trace in in_range {
                if let Some(source) = &trace.waveform.source {
                    if !source.filename.is_empty() && !sources.contains(&source.filename.as_str()) {
                        sources.push(&source.filename);
                    }
                }
            }

            self.liquid_additions.push(LiquidAdditionRow {
                exp_id: exp_id.clone(),
                cell_id: cell_id.clone(),
                start_time: experiment.start_time.clone(),
                ljp: ljp.value,
                ljp_unit: ljp.unit.clone(),
                liquid: liquid.liquid.name.clone(),
                concentration: liquid.concentration,
                concentration_unit: liquid.concentration_unit.clone(),
                concentration_type: liquid.concentration_type.as_ted_str().to_string(),
                first: traces[*first_idx].trace_number,
                last: traces[last_idx].trace_number,
                control: liquid.is_control,
                selective_blocker: liquid.is_selective_blocker,
                analysed,
                source_files: sources.join(";"),
                notes: String::new(),
            });
        }

        let leak_method = results.leak_method.as_ted_str().to_string();
        for (idx, trace) in traces.iter().enumerate() {
            let liquid = range_of[idx].map(|k| additions[k].1);
            let cursors = trace
                .cursors
                .iter()
                .filter_map(|c| c.result.as_ref().map(|r| (c.name.clone(), r.value)))
                .collect();

            for cursor in &trace.cursors {
                if !self.cursor_names.contains(&cursor.name) {
                    log::debug!("Cursor {} of trace {} has no definition", cursor.name, trace.trace_number);
                    self.cursor_names.push(cursor.name.clone());
                }
            }

            self.results_wide.push(ResultWideRow {
                exp_id: exp_id.clone(),
                cell_id: cell_id.clone(),
                result_type: trace.result_type.as_ted_str(),
                leak_method: leak_method.clone(),
                elapsed_time: trace.elapsed_time,
                elapsed_time_unit: trace.elapsed_time_unit.clone(),
                trace_number: trace.trace_number,
                analysed: trace.valid,
                source_file: trace
                    .waveform
                    .source
                    .as_ref()
                    .map(|s| s.filename.clone())
                    .unwrap_or_default(),
                liquid: liquid.map(|l| l.liquid.name.clone()).unwrap_or_default(),
                concentration: liquid.map(|l| l.concentration).unwrap_or(f64::NAN),
                concentration_unit: liquid
                    .map(|l| l.concentration_unit.clone())
                    .unwrap_or_default(),
                concentration_type: liquid
                    .map(|l| l.concentration_type.as_ted_str().to_string())
                    .unwrap_or_default(),
                cursors,
            });
        }

        Ok(())
    }

    fn add_cursor_definitions(&mut self, results: &Results, report: &mut ConversionReport) {
        for cursor in &results.cursors {
            let row = CursorDefinitionRow {
                name: cursor.name.clone(),
                start: cursor.start,
                start_unit: cursor.time_unit.clone(),
                end: cursor.end,
                end_unit: cursor.time_unit.clone(),
                cursor_type: cursor
                    .cursor_type
                    .map(|t| t.as_ted_str().to_string())
                    .unwrap_or_default(),
            };

            match self.cursor_definitions.iter().find(|d| d.name == row.name) {
                None => {
                    self.cursor_names.push(row.name.clone());
                    self.cursor_definitions.push(row);
                }
                Some(existing) if !same_definition(existing, &row) => report.warn(format!(
                    "cursor {} is defined more than once with different windows; keeping the first definition",
                    row.name
                )),
                Some(_) => {}
            }
        }
    }

    /// Record the waveform file of one experiment/cell in LiquidAdditions and ResultsWide
    pub fn set_source_file(&mut self, exp_id: &str, cell_id: &str, locator: &str) {
        for row in &mut self.liquid_additions {
            if row.exp_id == exp_id && row.cell_id == cell_id {
                row.source_files = locator.to_string();
            }
        }
        for row in &mut self.results_wide {
            if row.exp_id == exp_id && row.cell_id == cell_id {
                row.source_file = locator.to_string();
            }
        }
    }

    /// Lay the projection out as the six index sheets, in workbook order
    pub fn to_sheets(&self) -> Vec<Sheet> {
        let mut cell_properties = Sheet::with_columns(SHEET_CELL_PROPERTIES, col::CELL_PROPERTIES_COLUMNS);
        for row in &self.cell_properties {
            cell_properties.push_row(row.to_row());
        }

        let mut liquid_additions =
            Sheet::with_columns(SHEET_LIQUID_ADDITIONS, col::LIQUID_ADDITIONS_COLUMNS);
        for row in &self.liquid_additions {
            liquid_additions.push_row(row.to_row());
        }

        let mut cursors = Sheet::with_columns(SHEET_CURSORS_DEFINITIONS, col::CURSORS_DEFINITIONS_COLUMNS);
        for row in &self.cursor_definitions {
            cursors.push_row(row.to_row());
        }

        let voltage_protocol = self
            .voltage_protocol
            .clone()
            .unwrap_or_else(|| Sheet::headerless(SHEET_INTENDED_VOLTAGE_PROTOCOL));

        let mut headers: Vec<String> = col::RESULTS_WIDE_COLUMNS.iter().map(|c| c.to_string()).collect();
        headers.extend(self.cursor_names.iter().cloned());
        let mut results_wide = Sheet::new(SHEET_RESULTS_WIDE, headers);
        for row in &self.results_wide {
            results_wide.push_row(row.to_row(&self.cursor_names));
        }

        vec![
            self.general.to_sheet(),
            cell_properties,
            liquid_additions,
            cursors,
            voltage_protocol,
            results_wide,
        ]
    }
}

fn elapsed_ms(trace: &TraceResult) -> f64 {
    to_milliseconds(trace.elapsed_time, &trace.elapsed_time_unit)
}

/// Current traces of a results set in recording order
fn current_traces(results: &Results) -> Vec<&TraceResult> {
    let mut traces: Vec<&TraceResult> = results
        .results
        .iter()
        .filter(|r| r.result_type == ResultType::Current)
        .collect();
    traces.sort_by(|a, b| {
        elapsed_ms(a)
            .total_cmp(&elapsed_ms(b))
            .then_with(|| a.trace_number.cmp(&b.trace_number))
    });
    traces
}

/// Liquid additions of an experiment as (index of the FIRST trace, protocol)
///
/// Each addition starts at the earliest trace recorded at or after it and
/// runs until the trace before the next addition starts. The ranges must
/// partition every current trace: an experiment with traces but no addition,
/// or with traces recorded before its first addition, is an
/// [`TedError::InvalidTrial`].
fn liquid_additions<'a>(
    trial: &'a Trial,
    experiment: &Experiment,
    exp_id: &str,
    traces: &[&TraceResult],
    report: &mut ConversionReport,
) -> Result<Vec<(usize, &'a LiquidProtocol)>, TedError> {
    let mut executed: Vec<(f64, &LiquidProtocol)> = Vec::new();
    for execution in &experiment.protocols {
        let protocol = trial.protocol(&execution.protocol).ok_or_else(|| {
            TedError::MissingReference(format!(
                "experiment {} executes unknown protocol {}",
                exp_id, execution.protocol
            ))
        })?;
        if let Some(liquid) = protocol.as_liquid() {
            executed.push((to_milliseconds(execution.time, &execution.time_unit), liquid));
        }
    }
    executed.sort_by(|a, b| a.0.total_cmp(&b.0));
    executed.dedup_by(|b, a| a.0 == b.0 && a.1 == b.1);

    let mut starts: Vec<(usize, &LiquidProtocol)> = Vec::new();
    for (time_ms, liquid) in executed {
        let Some(first_idx) = traces.iter().position(|t| elapsed_ms(t) >= time_ms) else {
            report.warn(format!(
                "experiment {}: no current trace recorded after the addition of {} at {} ms; addition dropped",
                exp_id, liquid.liquid.name, time_ms
            ));
            continue;
        };
        match starts.last_mut() {
            Some(last) if last.0 == first_idx => {
                report.warn(format!(
                    "experiment {}: addition of {} is followed by {} before any trace was recorded; only the latter is kept",
                    exp_id, last.1.liquid.name, liquid.liquid.name
                ));
                *last = (first_idx, liquid);
            }
            _ => starts.push((first_idx, liquid)),
        }
    }

    match starts.first() {
        None if !traces.is_empty() => {
            return Err(TedError::InvalidTrial(format!(
                "experiment {}: no liquid addition covers its {} current trace(s)",
                exp_id,
                traces.len()
            )))
        }
        Some((first_idx, _)) if *first_idx > 0 => {
            return Err(TedError::InvalidTrial(format!(
                "experiment {}: traces {} to {} were recorded before the first liquid addition",
                exp_id,
                traces[0].trace_number,
                traces[first_idx - 1].trace_number
            )))
        }
        _ => {}
    }

    Ok(starts)
}

fn check_leak_methods(exp_id: &str, experiment: &Experiment, report: &mut ConversionReport) {
    let mut methods = Vec::new();
    for results in &experiment.results_sets {
        if !methods.contains(&results.leak_method) {
            methods.push(results.leak_method);
        }
    }
    if methods.len() > 1 {
        report.warn(format!(
            "experiment {}: {} leak methods found but only one is supported; using {}",
            exp_id,
            methods.len(),
            methods[0].as_ted_str()
        ));
    }
}

fn same_definition(a: &CursorDefinitionRow, b: &CursorDefinitionRow) -> bool {
    let key = |d: &CursorDefinitionRow| {
        (
            d.start.to_bits(),
            d.end.to_bits(),
            d.start_unit.clone(),
            d.end_unit.clone(),
            d.cursor_type.clone(),
        )
    };
    key(a) == key(b)
}
