use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strip_colorscan::{Color, DimensionalityRegistry, Rgb, StripConfig};

fn benchmark_conversion(c: &mut Criterion) {
    c.bench_function("rgb_to_hsl", |b| {
        b.iter(|| Color::from(black_box(Rgb::new(76, 116, 166))).as_hsl())
    });

    c.bench_function("parse_hex", |b| b.iter(|| Color::parse(black_box("#4c74a6"))));
}

fn benchmark_matching(c: &mut Criterion) {
    let calibration = StripConfig::default_hot_tub()
        .build(DimensionalityRegistry::shared())
        .expect("default configuration builds");
    let strip = &calibration.strips[0];
    let scale = strip.scale("total_hardness").expect("hardness scale");
    let observed = Color::rgb(120, 104, 160);

    c.bench_function("match_color", |b| {
        b.iter(|| scale.match_color(black_box(&observed)))
    });

    c.bench_function("strip_read", |b| {
        b.iter(|| strip.read(black_box("ph"), black_box(&observed)))
    });
}

criterion_group!(benches, benchmark_conversion, benchmark_matching);
criterion_main!(benches);
