use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use devops_apiserver::domain::PipelineRun;
use devops_apiserver::listing::{
    process, CompareChain, Filter, PipelineRunListHandler, QueryDescriptor,
};

fn seed_runs(count: usize) -> Vec<PipelineRun> {
    let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            // Repeating timestamps force the name tie-break
            PipelineRun::new("bench", format!("run-{:05}", (i * 7919) % count))
                .with_creation_timestamp(t0 + Duration::minutes((i % 97) as i64))
                .with_start_time(t0 + Duration::minutes((i % 89) as i64))
                .with_scm_ref(if i % 3 == 0 { "main" } else { "dev" })
                .with_run_id(i.to_string())
                .with_label("branch", if i % 2 == 0 { "main" } else { "dev" })
        })
        .collect()
}

fn bench_default_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_processor_default");
    let handler = PipelineRunListHandler::new();
    let descriptor = QueryDescriptor::new().with_pagination(Some(50), 0);

    for count in [100, 1_000, 10_000].iter() {
        let runs = seed_runs(*count);
        group.bench_with_input(BenchmarkId::new("first_page", count), &runs, |b, runs| {
            b.iter(|| black_box(process(black_box(runs), &descriptor, &handler).unwrap()))
        });
    }

    group.finish();
}

fn bench_filtered_and_extended(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_processor_extended");
    let runs = seed_runs(10_000);

    let filtered = QueryDescriptor::new()
        .with_filter(Filter::label("branch=main").unwrap())
        .with_pagination(Some(50), 100);
    group.bench_function("label_filter", |b| {
        b.iter(|| black_box(process(&runs, &filtered, &PipelineRunListHandler::new()).unwrap()))
    });

    let extended = PipelineRunListHandler::with_chain(CompareChain::pipeline_run_extended());
    let descriptor = QueryDescriptor::new().with_pagination(Some(50), 0);
    group.bench_function("extended_chain", |b| {
        b.iter(|| black_box(process(&runs, &descriptor, &extended).unwrap()))
    });

    let by_run_id = QueryDescriptor::new().sort_by("runId", false).unwrap();
    group.bench_function("sort_by_run_id", |b| {
        b.iter(|| black_box(process(&runs, &by_run_id, &PipelineRunListHandler::new()).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_default_order, bench_filtered_and_extended);
criterion_main!(benches);
