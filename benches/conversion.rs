use cipa_ted::encapsulated::EdFormat;
use cipa_ted::synthetic::SyntheticTrial;
use cipa_ted::ted::{ExportConfig, TedExporter, TedImporter};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::TempDir;

/// Benchmark TED export of synthetic trials per waveform format
fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("ted_export");

    for (experiments, traces) in [(2, 20), (8, 40)] {
        let trial = SyntheticTrial {
            experiments,
            traces_per_experiment: traces,
            ..Default::default()
        }
        .build();
        group.throughput(Throughput::Elements((experiments * traces as usize) as u64));

        for edformat in [EdFormat::Csv, EdFormat::Zip, EdFormat::Xlsx] {
            group.bench_with_input(
                BenchmarkId::new(edformat.as_str(), format!("{}exp_{}traces", experiments, traces)),
                &trial,
                |b, trial| {
                    b.iter_batched(
                        || TempDir::new().unwrap(),
                        |temp_dir| {
                            TedExporter::new(ExportConfig::with_edformat(edformat))
                                .export(trial, temp_dir.path().join("ted.xlsx"))
                                .expect("Export failed");
                            drop(temp_dir);
                        },
                        criterion::BatchSize::LargeInput,
                    );
                },
            );
        }
    }

    group.finish();
}

/// Benchmark TED import of a dataset written once up front
fn bench_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("ted_import");

    for edformat in [EdFormat::Csv, EdFormat::Zip] {
        let temp_dir = TempDir::new().unwrap();
        let trial = SyntheticTrial::default().build();
        TedExporter::new(ExportConfig::with_edformat(edformat))
            .export(&trial, temp_dir.path().join("ted.xlsx"))
            .expect("Export failed");

        group.throughput(Throughput::Elements(trial.trace_count() as u64));
        group.bench_function(BenchmarkId::from_parameter(edformat.as_str()), |b| {
            b.iter(|| {
                TedImporter::default()
                    .import(temp_dir.path())
                    .expect("Import failed")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_export, bench_import);
criterion_main!(benches);
