use super::*;
use crate::encapsulated::{EdFormat, WaveformLocator, WaveformStore};
use crate::error::TedError;
use crate::model::*;
use crate::synthetic::SyntheticTrial;
use tempfile::tempdir;

fn current_trace(n: u32, elapsed_s: f64) -> TraceResult {
    let mut waveform = Waveform::from_physical(
        vec![0.0, -50.0, -150.0, -100.0, 0.0],
        "pA",
        Quantity::new(0.0, "ms"),
        Quantity::new(1.0, "ms"),
        ResultType::Current,
    );
    waveform.trace_number = Some(n);
    TraceResult::new(n, true, ResultType::Current, elapsed_s, "s", waveform)
}

/// One experiment with `traces` traces one second apart and the given additions (protocol, time in s)
fn trial_with(traces: u32, additions: &[(&str, f64)]) -> Trial {
    let mut trial = Trial::new("2022.03", "unit test");
    trial.devices.push(Device::new(Id::new("DEV1"), "QP", "QPatch", "6.0"));
    trial.ljp = LiquidJunctionPotential::new(-8.0, "mV", LjpReportedVoltage::Vclamp);

    let command = Waveform::from_physical(
        vec![-80.0, 20.0, 20.0, -80.0, -80.0],
        "mV",
        Quantity::new(0.0, "ms"),
        Quantity::new(1.0, "ms"),
        ResultType::Voltage,
    );
    trial
        .protocols
        .push(Protocol::voltage(Id::new("PV-1"), "Step", command));

    let control = Liquid::new(Id::new("L-0"), "Control");
    let drug = Liquid::new(Id::new("L-1"), "Dofetilide");
    trial.liquids.extend([control.clone(), drug.clone()]);
    let mut control = LiquidProtocol::new(control, 0.0, "nM");
    control.is_control = true;
    trial.protocols.push(Protocol::liquid(Id::new("P-CTL"), "Control", control));
    trial.protocols.push(Protocol::liquid(
        Id::new("P-DRUG"),
        "Dofetilide 10 nM",
        LiquidProtocol::new(drug, 10.0, "nM"),
    ));

    let mut experiment = Experiment::new(Id::new("E1"), Id::new("DEV1"), "2022-03-01T10:00:00");
    for (protocol, time) in additions {
        experiment
            .protocols
            .push(ProtocolExecution::new(Id::new(*protocol), *time, "s"));
    }

    let cell = Cell::new(
        Id::new("C1"),
        vec![Property::new("Cm", "Membrane capacitance", "12.5", "pF")],
    );
    let mut results = Results::new(cell, PatchType::Single, LeakMethod::SmallPulse);
    let peak = Cursor::new("Peak", 2.0, 3.0, "ms", CursorType::Minimum);
    results.cursors.push(peak.clone());
    for n in 1..=traces {
        let mut trace = current_trace(n, f64::from(n - 1));
        if n == 3 {
            trace.cursors.push(peak.evaluated(CursorResult::new(-150.0, "pA")));
        }
        results.results.push(trace);
    }
    experiment.results_sets.push(results);
    trial.experiments.push(experiment);
    trial
}

#[test]
fn test_single_addition_covers_all_traces() {
    let trial = trial_with(10, &[("P-CTL", 0.0)]);
    let mut report = ConversionReport::new("export");
    let projection = TabularProjection::build(&trial, &mut report).unwrap();

    assert_eq!(projection.liquid_additions.len(), 1);
    let row = &projection.liquid_additions[0];
    assert_eq!((row.first, row.last), (1, 10));
    assert!(row.control);
    assert_eq!(row.analysed, "1;2;3;4;5;6;7;8;9;10");
    assert_eq!(projection.results_wide.len(), 10);
    assert!(report.is_clean(), "{}", report);
}

#[test]
fn test_two_additions_partition_traces() {
    let trial = trial_with(10, &[("P-CTL", 0.0), ("P-DRUG", 5.0)]);
    let mut report = ConversionReport::new("export");
    let projection = TabularProjection::build_with(&trial, &mut report, true).unwrap();

    let ranges: Vec<(u32, u32)> = projection
        .liquid_additions
        .iter()
        .map(|r| (r.first, r.last))
        .collect();
    assert_eq!(ranges, vec![(1, 5), (6, 10)]);
    assert_eq!(projection.liquid_additions[1].analysed, "6-10");
    assert_eq!(projection.liquid_additions[1].liquid, "Dofetilide");

    let trace_7 = projection
        .results_wide
        .iter()
        .find(|r| r.trace_number == 7)
        .unwrap();
    assert_eq!(trace_7.liquid, "Dofetilide");
    assert_eq!(trace_7.concentration, 10.0);
}

#[test]
fn test_cursor_value_lands_in_results_wide() {
    let trial = trial_with(5, &[("P-CTL", 0.0)]);
    let mut report = ConversionReport::new("export");
    let projection = TabularProjection::build(&trial, &mut report).unwrap();

    assert_eq!(projection.cursor_names, vec!["Peak".to_string()]);
    assert_eq!(projection.cursor_definitions[0].cursor_type, "MINIMUM");
    let trace_3 = projection
        .results_wide
        .iter()
        .find(|r| r.trace_number == 3)
        .unwrap();
    assert_eq!(trace_3.cursors.get("Peak"), Some(&-150.0));

    let sheets = projection.to_sheets();
    let results_wide = sheets.last().unwrap();
    assert!(results_wide.column_index("Peak").is_some());
    assert_eq!(results_wide.row_count(), 5);
}

#[test]
fn test_trial_without_devices_is_rejected() {
    let mut trial = trial_with(3, &[("P-CTL", 0.0)]);
    trial.devices.clear();
    let dir = tempdir().unwrap();

    let err = TedExporter::default()
        .export(&trial, dir.path().join("ted.xlsx"))
        .unwrap_err();
    assert!(matches!(err, TedError::InvalidTrial(_)));
}

#[test]
fn test_unknown_protocol_is_a_missing_reference() {
    let trial = trial_with(3, &[("P-NOPE", 0.0)]);
    let mut report = ConversionReport::new("export");
    let err = TabularProjection::build(&trial, &mut report).unwrap_err();
    assert!(matches!(err, TedError::MissingReference(_)));
}

#[test]
fn test_addition_after_last_trace_is_dropped() {
    let trial = trial_with(4, &[("P-CTL", 0.0), ("P-DRUG", 60.0)]);
    let mut report = ConversionReport::new("export");
    let projection = TabularProjection::build(&trial, &mut report).unwrap();

    assert_eq!(projection.liquid_additions.len(), 1);
    assert_eq!(projection.liquid_additions[0].last, 4);
    assert_eq!(report.warning_count(), 1);
}

#[test]
fn test_consecutive_additions_keep_the_latest() {
    let trial = trial_with(4, &[("P-CTL", 0.0), ("P-DRUG", 0.5)]);
    let mut report = ConversionReport::new("export");
    let projection = TabularProjection::build(&trial, &mut report).unwrap();

    assert_eq!(projection.liquid_additions.len(), 2);
    assert_eq!(projection.liquid_additions[0].liquid, "Control");
    assert_eq!((projection.liquid_additions[1].first, projection.liquid_additions[1].last), (2, 4));

    let trial = trial_with(4, &[("P-CTL", 0.0), ("P-DRUG", 0.0)]);
    let mut report = ConversionReport::new("export");
    let projection = TabularProjection::build(&trial, &mut report).unwrap();
    assert_eq!(projection.liquid_additions.len(), 1);
    assert_eq!(projection.liquid_additions[0].liquid, "Dofetilide");
    assert_eq!(report.warning_count(), 1);
}

#[test]
fn test_traces_before_first_addition_are_rejected() {
    let trial = trial_with(6, &[("P-DRUG", 2.0)]);
    let mut report = ConversionReport::new("export");
    let err = TabularProjection::build(&trial, &mut report).unwrap_err();
    assert!(matches!(err, TedError::InvalidTrial(ref msg) if msg.contains("traces 1 to 2")));

    let dir = tempdir().unwrap();
    let index = dir.path().join("ted.xlsx");
    let err = TedExporter::default().export(&trial, &index).unwrap_err();
    assert!(matches!(err, TedError::InvalidTrial(_)));
    assert!(!index.exists());
}

#[test]
fn test_experiment_without_additions_is_rejected() {
    let trial = trial_with(10, &[]);
    let dir = tempdir().unwrap();
    let index = dir.path().join("ted.xlsx");
    let err = TedExporter::default().export(&trial, &index).unwrap_err();
    assert!(matches!(err, TedError::InvalidTrial(ref msg) if msg.contains("10 current trace(s)")));
    assert!(!index.exists());

    // Nothing recorded, nothing to cover
    let empty = trial_with(0, &[]);
    let mut report = ConversionReport::new("export");
    let projection = TabularProjection::build(&empty, &mut report).unwrap();
    assert!(projection.liquid_additions.is_empty());
    assert!(projection.results_wide.is_empty());
}

#[test]
fn test_extra_results_sets_are_reported() {
    let mut trial = trial_with(4, &[("P-CTL", 0.0)]);
    let extra = trial.experiments[0].results_sets[0].clone();
    trial.experiments[0].results_sets.push(extra);

    let mut report = ConversionReport::new("export");
    let projection = TabularProjection::build(&trial, &mut report).unwrap();
    assert_eq!(projection.results_wide.len(), 4);
    assert_eq!(report.warning_count(), 1);
    assert!(report.warnings[0].contains("2 results sets"));
}

#[test]
fn test_invalid_traces_are_left_out_of_anl() {
    let mut trial = trial_with(5, &[("P-CTL", 0.0)]);
    trial.experiments[0].results_sets[0].results[1].valid = false;
    let mut report = ConversionReport::new("export");
    let projection = TabularProjection::build(&trial, &mut report).unwrap();

    assert_eq!(projection.liquid_additions[0].analysed, "1;3;4;5");
    assert!(!projection.results_wide[1].analysed);
}

#[test]
fn test_trace_list_helpers() {
    assert_eq!(expand_trace_list("1-3;5"), vec![1, 2, 3, 5]);
    assert_eq!(expand_trace_list(" 7 ; 2.0 ;"), vec![7, 2]);
    assert_eq!(expand_trace_list("5-3;x;4"), vec![4]);
    assert!(expand_trace_list("").is_empty());

    assert_eq!(join_trace_list(&[3, 1, 2]), "3;1;2");
    assert_eq!(compress_trace_list(&[5, 1, 2, 3, 3, 9, 10]), "1-3;5;9-10");
    assert_eq!(compress_trace_list(&[]), "");
    assert_eq!(compress_trace_list(&[u32::MAX, u32::MAX - 1]), format!("{}-{}", u32::MAX - 1, u32::MAX));
}

#[test]
fn test_bad_edformat_is_rejected() {
    let trial = trial_with(2, &[("P-CTL", 0.0)]);
    let dir = tempdir().unwrap();
    let err = to_xlsx(&trial, dir.path().join("ted.xlsx"), "parquet").unwrap_err();
    assert!(matches!(err, TedError::EncapsulatedDataFile { .. }));
    assert!(!dir.path().join("ted.xlsx").exists());
}

#[test]
fn test_export_import_round_trip() {
    let trial = trial_with(10, &[("P-CTL", 0.0), ("P-DRUG", 5.0)]);
    let dir = tempdir().unwrap();
    let index = dir.path().join("ted.xlsx");

    let summary = TedExporter::new(ExportConfig::with_edformat(EdFormat::Zip))
        .export(&trial, &index)
        .unwrap();
    assert_eq!(summary.waveform_files, vec!["C1.csv.zip".to_string()]);
    assert_eq!(summary.liquid_additions, 2);
    assert_eq!(summary.result_rows, 10);
    assert!(index.exists());

    let outcome = TedImporter::default().import(dir.path()).unwrap();
    let imported = outcome.trial;
    assert_eq!(imported.devices[0].id, Id::new("DEV1"));
    assert_eq!(imported.ljp.value, -8.0);
    assert_eq!(imported.liquids.len(), 2);
    assert_eq!(imported.experiments.len(), 1);

    let experiment = &imported.experiments[0];
    assert_eq!(experiment.id, Id::new("E1"));
    let results = &experiment.results_sets[0];
    assert_eq!(results.cell.id, Id::new("C1"));
    assert_eq!(results.cell.properties[0].value, "12.5");
    assert_eq!(results.leak_method, LeakMethod::SmallPulse);
    assert_eq!(results.results.len(), 10);

    let trace_3 = &results.results[2];
    assert_eq!(trace_3.trace_number, 3);
    assert_eq!(trace_3.cursor_value("Peak"), Some(-150.0));
    assert_eq!(
        trace_3.waveform.physical_values(),
        trial.experiments[0].results_sets[0].results[2].waveform.physical_values()
    );
    assert_eq!(trace_3.waveform.time_values(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);

    let liquid_starts: Vec<f64> = experiment
        .protocols
        .iter()
        .filter(|p| imported.protocol(&p.protocol).and_then(|p| p.as_liquid()).is_some())
        .map(|p| p.time)
        .collect();
    assert_eq!(liquid_starts, vec![0.0, 5.0]);

    let voltage = imported.intended_voltage_protocol().unwrap();
    assert_eq!(voltage.as_voltage().unwrap().waveform.physical_values(), vec![-80.0, 20.0, 20.0, -80.0, -80.0]);
}

#[test]
fn test_export_hydrates_waveforms_from_source_files() {
    let trial = trial_with(3, &[("P-CTL", 0.0)]);
    let source_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();

    let first = TedExporter::new(ExportConfig::with_edformat(EdFormat::Csv));
    first.export(&trial, source_dir.path().join("ted.xlsx")).unwrap();
    let imported = TedImporter::default().import(source_dir.path()).unwrap().trial;

    // Keep only the references to the waveform file
    let mut stripped = imported.clone();
    for result in &mut stripped.experiments[0].results_sets[0].results {
        result.waveform.digits.clear();
    }

    let config = ExportConfig {
        source_directory: Some(source_dir.path().to_path_buf()),
        ..ExportConfig::with_edformat(EdFormat::Xlsx)
    };
    TedExporter::new(config)
        .export(&stripped, out_dir.path().join("ted.xlsx"))
        .unwrap();

    let mut store = WaveformStore::new(out_dir.path());
    let locator = WaveformLocator::parse("waveforms.xlsx:C1").unwrap();
    let column = store.load_column(&locator, "Trace_#2_CURRENT_pA").unwrap();
    assert_eq!(column, vec![0.0, -50.0, -150.0, -100.0, 0.0]);
}

#[test]
fn test_synthetic_trial_exports_cleanly() {
    let trial = SyntheticTrial::default().build();
    let dir = tempdir().unwrap();
    let summary = TedExporter::default()
        .export(&trial, dir.path().join("ted.xlsx"))
        .unwrap();

    assert_eq!(summary.experiments, 2);
    assert_eq!(summary.liquid_additions, 6);
    assert_eq!(summary.result_rows, 24);
    assert!(summary.report.is_clean(), "{}", summary.report);
}

#[test]
fn test_report_display() {
    let mut report = ConversionReport::new("import");
    assert_eq!(report.to_string(), "import completed without warnings\n");
    report.warn("trace 4 skipped");
    assert!(report.to_string().contains("[WARN] trace 4 skipped"));
    assert_eq!(report.warning_count(), 1);
}

#[test]
fn test_unreadable_anl_tokens_are_reported_on_import() {
    use crate::table::{write_workbook, TableValue, XlsxBook};

    let trial = trial_with(5, &[("P-CTL", 0.0)]);
    let dir = tempdir().unwrap();
    let index = dir.path().join("ted.xlsx");
    TedExporter::new(ExportConfig::with_edformat(EdFormat::Csv))
        .export(&trial, &index)
        .unwrap();

    let mut book = XlsxBook::open(&index).unwrap();
    let mut sheets = Vec::new();
    for name in book.sheet_names() {
        let has_header = name != crate::schema::SHEET_GENERAL_INFORMATION;
        sheets.push(book.read_sheet(&name, has_header).unwrap());
    }
    drop(book);
    let additions = sheets
        .iter_mut()
        .find(|s| s.name == crate::schema::SHEET_LIQUID_ADDITIONS)
        .unwrap();
    let anl = additions.column_index("ANL").unwrap();
    additions.rows[0][anl] = TableValue::from("1;x;5-3");
    write_workbook(&index, &sheets).unwrap();

    let outcome = TedImporter::default().import(dir.path()).unwrap();
    let anl_warnings: Vec<&String> = outcome
        .report
        .warnings
        .iter()
        .filter(|w| w.contains("ANL"))
        .collect();
    assert_eq!(anl_warnings.len(), 1);
    assert!(anl_warnings[0].contains("x, 5-3"));

    let results = &outcome.trial.experiments[0].results_sets[0].results;
    assert_eq!(results.len(), 5);
    assert!(results[0].valid);
    assert!(results[1..].iter().all(|r| !r.valid));
}
