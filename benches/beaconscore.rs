use beaconscore::image::io::gray_from_rgb;
use beaconscore::search::score_map;
use beaconscore::{
    AnalysisConfig, AnchorTemplates, BoardAnalyzer, ImageView, ObjectKind, Orientation,
    SearchOptions, Template, TemplateLibrary, TemplateRole,
};
use criterion::{criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use std::hint::black_box;

fn make_pattern(width: usize, height: usize, salt: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13 + salt) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn library(arrow: usize) -> TemplateLibrary {
    let canonical = Template::new(
        "arrow",
        TemplateRole::Anchor(Orientation::Canonical),
        make_pattern(arrow, arrow, 0),
        arrow,
        arrow,
    )
    .unwrap();
    let anchors = AnchorTemplates::from_canonical(canonical).unwrap();
    let objects = [
        ("beacon_hq", ObjectKind::BeaconHq),
        ("lighthouse", ObjectKind::Lighthouse),
        ("buoy_blue", ObjectKind::Buoy),
    ]
    .iter()
    .enumerate()
    .map(|(i, &(name, kind))| {
        Template::new(name, TemplateRole::Object(kind), make_pattern(24, 24, 31 * (i + 1)), 24, 24)
            .unwrap()
    })
    .collect();
    TemplateLibrary::new(anchors, objects).unwrap()
}

/// Water board with a 5x4 grid of correctly oriented arrows.
fn make_board(lib: &TemplateLibrary, arrow: usize) -> RgbImage {
    let mut img = RgbImage::from_pixel(640, 520, Rgb([40, 110, 200]));
    let view = lib.anchors().canonical().view();
    for row in 0..4u32 {
        for col in 0..5u32 {
            let (x0, y0) = (60 + col * 110, 50 + row * 110);
            for y in 0..arrow {
                for x in 0..arrow {
                    let v = *view.get(x, y).unwrap();
                    img.put_pixel(x0 + x as u32, y0 + y as u32, Rgb([v, v, v]));
                }
            }
        }
    }
    img
}

fn bench_scan(c: &mut Criterion) {
    let lib = library(32);
    let board = make_board(&lib, 32);
    let gray = gray_from_rgb(&board);
    let view =
        ImageView::from_slice(gray.as_raw(), gray.width() as usize, gray.height() as usize)
            .unwrap();
    let arrow = lib.anchors().canonical();

    c.bench_function("zncc_score_map", |b| {
        b.iter(|| black_box(score_map(view, arrow, SearchOptions::default())));
    });

    if cfg!(feature = "rayon") {
        c.bench_function("zncc_score_map_parallel", |b| {
            b.iter(|| black_box(score_map(view, arrow, SearchOptions { parallel: true })));
        });
    }
}

fn bench_pipeline(c: &mut Criterion) {
    let lib = library(32);
    let board = make_board(&lib, 32);
    let analyzer = BoardAnalyzer::new(&lib, AnalysisConfig::default());

    c.bench_function("analyze_board", |b| {
        b.iter(|| black_box(analyzer.analyze(&board, None)));
    });

    if cfg!(feature = "rayon") {
        let parallel = BoardAnalyzer::new(
            &lib,
            AnalysisConfig {
                parallel: true,
                ..AnalysisConfig::default()
            },
        );
        c.bench_function("analyze_board_parallel", |b| {
            b.iter(|| black_box(parallel.analyze(&board, None)));
        });
    }
}

criterion_group!(benches, bench_scan, bench_pipeline);
criterion_main!(benches);
