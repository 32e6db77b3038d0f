use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{NaiveDate, TimeZone, Utc};
use medstock_core::ItemId;
use medstock_inventory::{
    aggregate, group_alerts, search, Category, ExpiryHorizon, InventoryItem, ItemDraft,
};

/// Deterministic snapshot with a spread of statuses, costs and expiry dates.
fn snapshot(size: usize) -> Vec<InventoryItem> {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..size)
        .map(|i| {
            let category = Category::ALL[i % Category::ALL.len()];
            let mut draft = ItemDraft::new(format!("Item {i}"), category, (i % 40) as i64)
                .with_batch_number(format!("B{i:06}"))
                .with_cost_per_unit((i % 17) as f64 * 0.25);
            if i % 3 == 0 {
                let offset = (i % 120) as i64 - 60;
                let expiry = now.date_naive() + chrono::Duration::days(offset);
                draft = draft.with_expiry_date(expiry.format("%Y-%m-%d").to_string());
            }
            InventoryItem::from_draft(ItemId::new(), draft, now).unwrap()
        })
        .collect()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn bench_dashboard_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard_aggregation");

    for size in [100usize, 1_000, 10_000].iter() {
        let items = snapshot(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| aggregate(black_box(items), today(), ExpiryHorizon::default()).unwrap());
        });
    }

    group.finish();
}

fn bench_alert_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("alert_grouping");

    for size in [100usize, 1_000, 10_000].iter() {
        let items = snapshot(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| {
                let buckets = group_alerts(black_box(items), today(), ExpiryHorizon::default()).unwrap();
                buckets.total()
            });
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let items = snapshot(10_000);
    let mut group = c.benchmark_group("search");

    group.bench_function("batch_number_substring", |b| {
        b.iter(|| search(black_box(&items), black_box("b0099")).len());
    });
    group.bench_function("blank_term", |b| {
        b.iter(|| search(black_box(&items), black_box("   ")).len());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_dashboard_aggregation,
    bench_alert_grouping,
    bench_search
);
criterion_main!(benches);
