use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dataset_summary::ingestion::csv::ingest_delimited_from_bytes;
use dataset_summary::profiling::profile_dataset;

fn synthetic_csv(rows: usize) -> Vec<u8> {
    let mut out = String::from("id,group,value,ratio,flag\n");
    for i in 0..rows {
        let group = ["north", "south", "east", "west", "NA"][i % 5];
        let value = if i % 17 == 0 { String::new() } else { (i * 3 % 101).to_string() };
        out.push_str(&format!(
            "{},{},{},{:.3},{}\n",
            i,
            group,
            value,
            i as f64 / 7.0,
            i % 2 == 0
        ));
    }
    out.into_bytes()
}

fn bench_ingest_and_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");
    for rows in [1_000usize, 10_000] {
        let input = synthetic_csv(rows);

        group.bench_with_input(BenchmarkId::new("ingest_csv", rows), &input, |b, input| {
            b.iter(|| ingest_delimited_from_bytes(black_box(input), b',').unwrap())
        });

        let ds = ingest_delimited_from_bytes(&input, b',').unwrap();
        group.bench_with_input(BenchmarkId::new("profile", rows), &ds, |b, ds| {
            b.iter(|| profile_dataset(black_box(ds)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ingest_and_profile);
criterion_main!(benches);
