use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use runlog::import::{normalize_csv, CategoryPolicy, ImportContext};

/// Synthetic Garmin activity list with `rows` data rows.
fn garmin_list(rows: usize) -> String {
    let mut csv = String::from("Activity Type,Date,Title,Distance,Time,Avg HR,Avg Pace\n");
    for i in 0..rows {
        let kind = if i % 10 == 0 { "Street Running" } else { "Running" };
        csv.push_str(&format!(
            "{},2025-{:02}-{:02} 07:00:00,Run {},\"{}.{:02}\",00:{:02}:30,{},5:{:02}\n",
            kind,
            i % 12 + 1,
            i % 28 + 1,
            i,
            5 + i % 40,
            i % 100,
            20 + i % 40,
            130 + i % 40,
            i % 60
        ));
    }
    csv
}

/// Synthetic split export with `laps` one-kilometer laps and a summary row.
fn splits(laps: usize) -> String {
    let mut csv = String::from("Laps,Time,Distance,Avg Pace\n");
    for lap in 1..=laps {
        csv.push_str(&format!("{},5:{:02},1.00,5:{:02}\n", lap, lap % 60, lap % 60));
    }
    csv.push_str("Summary,0:00,0.00,--\n");
    csv
}

fn benchmark_normalize(c: &mut Criterion) {
    let ctx = ImportContext::new(CategoryPolicy::Numeric);
    let list = garmin_list(2000);
    let laps = splits(200);

    let mut group = c.benchmark_group("normalize");

    group.bench_function("garmin_list_2000_rows", |b| {
        b.iter(|| normalize_csv(black_box(&list), &ctx).expect("normalize failed"))
    });

    group.bench_function("splits_200_laps", |b| {
        b.iter(|| normalize_csv(black_box(&laps), &ctx).expect("normalize failed"))
    });

    group.finish();
}

criterion_group!(benches, benchmark_normalize);
criterion_main!(benches);
