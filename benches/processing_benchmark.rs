use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cwa_forecast::processors::{CoverageChecker, ForecastProcessor, LocationLocator, RecordNormalizer};
use serde_json::{json, Value};

// Feed-shaped document with `location_count` entries buried a few levels deep,
// alternating the list and map encodings of elementValue.
fn create_test_document(location_count: usize) -> Value {
    let locations: Vec<Value> = (0..location_count)
        .map(|i| {
            let min = 10 + (i % 15);
            let max = min + 8;
            let (min_value, max_value) = if i % 2 == 0 {
                (json!([{ "value": min.to_string() }]), json!([{ "value": max.to_string() }]))
            } else {
                (json!({ "value": min.to_string() }), json!({ "value": max.to_string() }))
            };

            json!({
                "locationName": format!("Location {}", i),
                "weatherElement": [
                    { "elementName": "Wx", "time": [{ "parameter": { "parameterName": "多雲" } }] },
                    { "elementName": "MinT", "time": [{ "elementValue": min_value }] },
                    { "elementName": "MaxT", "time": [{ "elementValue": max_value }] },
                    { "elementName": "PoP", "time": [{ "parameter": { "parameterName": "20" } }] }
                ]
            })
        })
        .collect();

    json!({
        "cwaopendata": {
            "identifier": "bench",
            "resources": { "resource": { "data": { "agrWeatherForecasts": {
                "weatherForecasts": { "location": locations }
            } } } }
        }
    })
}

fn benchmark_locate(c: &mut Criterion) {
    let doc = create_test_document(500);
    let locator = LocationLocator::new();

    c.bench_function("locate_location_list", |b| {
        b.iter(|| black_box(locator.locate(black_box(&doc)).map(|l| l.len())))
    });
}

fn benchmark_normalize(c: &mut Criterion) {
    let doc = create_test_document(500);
    let list = LocationLocator::new().locate(&doc).unwrap_or(&[]);
    let normalizer = RecordNormalizer::new();

    c.bench_function("normalize_all", |b| {
        b.iter(|| black_box(normalizer.normalize_all(black_box(list)).len()))
    });
}

fn benchmark_coverage_checker(c: &mut Criterion) {
    let doc = create_test_document(500);
    let list = LocationLocator::new().locate(&doc).unwrap_or(&[]);
    let records = RecordNormalizer::new().normalize_all(list);

    c.bench_function("coverage_checker", |b| {
        b.iter(|| {
            let report = CoverageChecker::new().check_coverage(black_box(&records));
            black_box(report.complete_records)
        })
    });
}

fn benchmark_varying_document_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_document_by_size");

    for &size in &[10, 100, 1000, 5000] {
        let doc = create_test_document(size);
        group.bench_with_input(BenchmarkId::new("locations", size), &doc, |b, doc| {
            let processor = ForecastProcessor::default();
            b.iter(|| {
                let processed = processor.process_document(black_box(doc), None);
                black_box(processed.map(|(records, _)| records.len()).unwrap_or(0))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_locate,
    benchmark_normalize,
    benchmark_coverage_checker,
    benchmark_varying_document_sizes
);
criterion_main!(benches);
