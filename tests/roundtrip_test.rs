//! Integration tests for TED export and import
//!
//! These tests write a synthetic trial to disk, read it back and compare the
//! two trials on everything TED records.

use cipa_ted::prelude::*;
use cipa_ted::table::XlsxBook;
use tempfile::tempdir;

fn small_trial() -> Trial {
    SyntheticTrial {
        experiments: 2,
        traces_per_experiment: 9,
        samples_per_trace: 40,
        ..Default::default()
    }
    .build()
}

/// Compare the recorded content of two trials
fn assert_same_recordings(original: &Trial, imported: &Trial) {
    assert_eq!(imported.study, original.study);
    assert_eq!(imported.devices[0].id, original.devices[0].id);
    assert_eq!(imported.devices[0].code, original.devices[0].code);
    assert_eq!(imported.ljp.value, original.ljp.value);
    assert_eq!(imported.experiments.len(), original.experiments.len());

    for (a, b) in original.experiments.iter().zip(&imported.experiments) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.start_time, b.start_time);

        let (ra, rb) = (&a.results_sets[0], &b.results_sets[0]);
        assert_eq!(ra.cell.id, rb.cell.id);
        assert_eq!(ra.cell.properties.len(), rb.cell.properties.len());
        assert_eq!(ra.leak_method, rb.leak_method);
        assert_eq!(ra.results.len(), rb.results.len());

        for (ta, tb) in ra.results.iter().zip(&rb.results) {
            assert_eq!(ta.trace_number, tb.trace_number);
            assert_eq!(ta.valid, tb.valid);
            assert_eq!(ta.elapsed_time, tb.elapsed_time);
            assert_eq!(ta.waveform.len(), tb.waveform.len());
            for (x, y) in ta
                .waveform
                .physical_values()
                .iter()
                .zip(tb.waveform.physical_values())
            {
                assert!((x - y).abs() < 1e-9, "{} != {}", x, y);
            }
            for name in ["Peak", "Baseline"] {
                let (x, y) = (ta.cursor_value(name).unwrap(), tb.cursor_value(name).unwrap());
                assert!((x - y).abs() < 1e-9, "{}: {} != {}", name, x, y);
            }
        }
    }
}

fn round_trip(edformat: EdFormat) -> (Trial, Trial, ExportSummary) {
    let trial = small_trial();
    let dir = tempdir().unwrap();
    let summary = TedExporter::new(ExportConfig::with_edformat(edformat))
        .export(&trial, dir.path().join(DEFAULT_INDEX_FILE))
        .unwrap();
    let imported = TedImporter::default().import(dir.path()).unwrap().trial;
    (trial, imported, summary)
}

#[test]
fn test_csv_round_trip() {
    let (trial, imported, summary) = round_trip(EdFormat::Csv);
    assert_eq!(
        summary.waveform_files,
        vec!["CELL001.csv".to_string(), "CELL002.csv".to_string()]
    );
    assert_same_recordings(&trial, &imported);
}

#[test]
fn test_zip_round_trip() {
    let (trial, imported, summary) = round_trip(EdFormat::Zip);
    assert_eq!(summary.waveform_files[0], "CELL001.csv.zip");
    assert_same_recordings(&trial, &imported);

    let source = imported.experiments[0].results_sets[0].results[0]
        .waveform
        .source
        .as_ref()
        .unwrap();
    assert_eq!(source.filename, "CELL001.csv.zip:CELL001.csv");
}

#[test]
fn test_xlsx_round_trip() {
    let (trial, imported, summary) = round_trip(EdFormat::Xlsx);
    assert_eq!(summary.waveform_files, vec!["waveforms.xlsx".to_string()]);
    assert_same_recordings(&trial, &imported);
}

#[test]
fn test_zip_and_csv_import_identically() {
    let trial = small_trial();
    let csv_dir = tempdir().unwrap();
    let zip_dir = tempdir().unwrap();

    to_xlsx(&trial, csv_dir.path().join("ted.xlsx"), "csv").unwrap();
    to_xlsx(&trial, zip_dir.path().join("ted.xlsx"), "zip").unwrap();

    let from_csv = from_xlsx(csv_dir.path(), "ted.xlsx").unwrap();
    let from_zip = from_xlsx(zip_dir.path(), "ted.xlsx").unwrap();

    assert_eq!(from_csv.liquids, from_zip.liquids);
    assert_eq!(from_csv.protocols, from_zip.protocols);
    for (a, b) in from_csv.experiments.iter().zip(&from_zip.experiments) {
        assert_eq!(a.protocols, b.protocols);
        for (ta, tb) in a.results_sets[0].results.iter().zip(&b.results_sets[0].results) {
            assert_eq!(ta.waveform.digits, tb.waveform.digits);
            assert_eq!(ta.cursors, tb.cursors);
        }
    }
}

#[test]
fn test_liquid_protocols_survive_round_trip() {
    let (trial, imported, _) = round_trip(EdFormat::Csv);

    let names: Vec<&str> = imported.liquids.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Control", "Cisapride"]);

    let liquids: Vec<(f64, bool)> = imported
        .protocols
        .iter()
        .filter_map(|p| p.as_liquid())
        .map(|l| (l.concentration, l.is_control))
        .collect();
    assert_eq!(liquids, vec![(0.0, true), (0.1, false), (1.0, false)]);

    // Additions are recorded at the elapsed time of their first trace
    let liquid_times = |t: &Trial| -> Vec<f64> {
        t.experiments[0]
            .protocols
            .iter()
            .filter(|e| t.protocol(&e.protocol).and_then(|p| p.as_liquid()).is_some())
            .map(|e| e.time)
            .collect()
    };
    assert_eq!(liquid_times(&imported), liquid_times(&trial));
}

#[test]
fn test_voltage_protocol_survives_round_trip() {
    let (trial, imported, _) = round_trip(EdFormat::Csv);

    let original = trial.intended_voltage_protocol().unwrap().as_voltage().unwrap();
    let protocol = imported.intended_voltage_protocol().unwrap();
    assert_eq!(protocol.id, Id::new("PV-10001"));
    let voltage = protocol.as_voltage().unwrap();
    assert_eq!(voltage.waveform.physical_values(), original.waveform.physical_values());
    assert_eq!(voltage.waveform.sequence_type, SequenceType::Reconstructed);
    assert_eq!(voltage.waveform.unit(), "mV");
}

#[test]
fn test_index_workbook_layout() {
    let trial = small_trial();
    let dir = tempdir().unwrap();
    let index = dir.path().join("ted.xlsx");
    TedExporter::default().export(&trial, &index).unwrap();

    let mut book = XlsxBook::open(&index).unwrap();
    assert_eq!(
        book.sheet_names(),
        vec![
            "GeneralInformation",
            "CellProperties",
            "LiquidAdditions",
            "CursorsDefinitions",
            "IntendedVoltageProtocol",
            "ResultsWide",
        ]
    );

    let general = book.read_sheet("GeneralInformation", false).unwrap();
    assert_eq!(general.cell(0, 0).as_text(), "STUDYID");
    assert_eq!(general.cell(0, 1).as_text(), "SYN-HERG-001");

    let results = book.read_sheet("ResultsWide", true).unwrap();
    assert_eq!(results.row_count(), trial.trace_count());
    assert!(results.column_index("Peak").is_some());
    assert!(results.column_index("Baseline").is_some());
    assert_eq!(results.value(0, "SRCXFN").as_text(), "CELL001.csv");

    let voltage = book.read_sheet("IntendedVoltageProtocol", true).unwrap();
    assert_eq!(voltage.headers, vec!["t_ms".to_string(), "voltage_mV".to_string()]);
}

#[test]
fn test_shared_cell_names_get_distinct_files() {
    let mut trial = small_trial();
    let cell = trial.experiments[0].results_sets[0].cell.id.clone();
    trial.experiments[1].results_sets[0].cell.id = cell;

    let dir = tempdir().unwrap();
    let summary = TedExporter::default()
        .export(&trial, dir.path().join("ted.xlsx"))
        .unwrap();
    assert_eq!(
        summary.waveform_files,
        vec!["CELL001.csv".to_string(), "EXP002_CELL001.csv".to_string()]
    );
    assert_eq!(summary.report.warning_count(), 1);

    let imported = TedImporter::default().import(dir.path()).unwrap().trial;
    assert_eq!(imported.trace_count(), trial.trace_count());
}

#[test]
fn test_missing_index_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(TedImporter::default().import(dir.path()).is_err());
}
