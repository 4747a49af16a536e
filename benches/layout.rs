use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wordcloud_rs_renderer::config::{CloudConfig, Config, SpiralKind};
use wordcloud_rs_renderer::input::WordRecord;
use wordcloud_rs_renderer::layout::compute_cloud;
use wordcloud_rs_renderer::render::render_svg;

// Synthetic Zipf-ish word list: a few heavy words, a long light tail.
fn word_list(count: usize) -> Vec<WordRecord> {
    (0..count)
        .map(|i| {
            let mut record = WordRecord::new();
            record.insert(
                "text".to_string(),
                serde_json::json!(format!("word-{:03}", i)),
            );
            record.insert(
                "value".to_string(),
                serde_json::json!(1000.0 / (i + 1) as f64),
            );
            record
        })
        .collect()
}

fn seeded_config(spiral: SpiralKind) -> CloudConfig {
    CloudConfig {
        width: 900.0,
        height: 600.0,
        spiral,
        seed: Some(1234),
        ..CloudConfig::default()
    }
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for count in [25usize, 100, 300] {
        let records = word_list(count);
        for spiral in [SpiralKind::Rectangular, SpiralKind::Archimedean] {
            let config = seeded_config(spiral);
            let name = format!("{spiral:?}_{count}");
            group.bench_with_input(BenchmarkId::from_parameter(name), &records, |b, data| {
                b.iter(|| {
                    let layout = compute_cloud(black_box(data), &config).expect("layout failed");
                    black_box(layout.words.len());
                });
            });
        }
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    for count in [100usize, 300] {
        let records = word_list(count);
        let config = Config {
            cloud: seeded_config(SpiralKind::Rectangular),
            ..Config::default()
        };
        let layout = compute_cloud(&records, &config.cloud).expect("layout failed");
        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &layout,
            |b, data| {
                b.iter(|| {
                    let svg = render_svg(black_box(data), &config);
                    black_box(svg.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    for count in [100usize, 300] {
        let records = word_list(count);
        let config = Config {
            cloud: seeded_config(SpiralKind::Rectangular),
            ..Config::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, data| {
            b.iter(|| {
                let layout = compute_cloud(black_box(data), &config.cloud).expect("layout failed");
                let svg = render_svg(&layout, &config);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_layout, bench_render, bench_end_to_end
);
criterion_main!(benches);
