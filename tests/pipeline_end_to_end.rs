mod common;

use beaconscore::{AnalysisConfig, BoardAnalyzer, Breakdown, FailureStage, Rank};
use common::{
    grid_point, library, object_patch, plus_board, plus_board_on_land, stamp_template, BUOY_SEED,
    LIGHTHOUSE_SEED,
};
use image::{Rgb, RgbImage};
use std::path::PathBuf;

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("beaconscore-{}-{name}", std::process::id()))
}

#[test]
fn buoy_board_scores_two_points() {
    let lib = library();
    let board = plus_board(lib.anchors(), Some(&object_patch(BUOY_SEED)));
    let analyzer = BoardAnalyzer::new(&lib, AnalysisConfig::default());

    let res = analyzer.analyze(&board, None);
    assert!(res.is_valid, "{:?}", res.errors);
    assert_eq!(res.failed_at, None);
    assert_eq!((res.total_cells, res.scorable_cells), (7, 1));
    assert_eq!(res.correct_count, 7);
    assert_eq!(
        res.breakdown,
        Some(Breakdown {
            buoys: 1,
            lighthouses: 0,
            empty: 0
        })
    );
    assert_eq!(res.score, Some(2));
    assert_eq!(res.rank, Some(Rank::Novices));
    let (name, description) = res.rank_text().unwrap();
    assert_eq!(name, "Novices");
    assert!(description.contains("Keep trying!"));
    assert!(res.annotated_image.is_none());
}

#[test]
fn lighthouse_board_scores_three_points() {
    let lib = library();
    let board = plus_board_on_land(lib.anchors(), Some(&object_patch(LIGHTHOUSE_SEED)));
    let res = BoardAnalyzer::new(&lib, AnalysisConfig::default()).analyze(&board, None);
    assert!(res.is_valid, "{:?}", res.errors);
    assert_eq!(res.breakdown.map(|b| b.lighthouses), Some(1));
    assert_eq!(res.score, Some(3));
}

#[test]
fn empty_surrounded_tile_scores_one_point() {
    let lib = library();
    let board = plus_board(lib.anchors(), None);
    let res = BoardAnalyzer::new(&lib, AnalysisConfig::default()).analyze(&board, None);
    assert!(res.is_valid);
    assert_eq!(res.breakdown.map(|b| b.empty), Some(1));
    assert_eq!(res.score, Some(1));
}

#[test]
fn annotation_is_attached_on_request() {
    let lib = library();
    let board = plus_board(lib.anchors(), Some(&object_patch(BUOY_SEED)));
    let config = AnalysisConfig {
        annotate: true,
        ..AnalysisConfig::default()
    };
    let res = BoardAnalyzer::new(&lib, config).analyze(&board, None);
    let annotated = res.annotated_image.expect("annotated image");
    assert_eq!(annotated.dimensions(), board.dimensions());
    assert_ne!(annotated, board);
}

#[test]
fn misoriented_board_is_rejected_before_scoring() {
    let lib = library();
    let mut board = plus_board(lib.anchors(), Some(&object_patch(BUOY_SEED)));
    let (x, y) = grid_point(0, 3);
    stamp_template(&mut board, &lib.anchors().rotated()[2], x, y);

    let res = BoardAnalyzer::new(&lib, AnalysisConfig::default()).analyze(&board, None);
    assert!(!res.is_valid);
    assert_eq!(res.failed_at, Some(FailureStage::ArrowCheck));
    assert_eq!((res.correct_count, res.incorrect_count), (7, 1));
    assert!(res.rank.is_none());
    assert_eq!(res.score, None);
    assert_eq!(res.breakdown, None);
    assert!(res.annotated_image.is_some());
}

#[test]
fn small_or_dry_photos_stop_early() {
    let lib = library();
    let analyzer = BoardAnalyzer::new(&lib, AnalysisConfig::default());
    let tiny = RgbImage::from_pixel(120, 120, Rgb([40, 110, 200]));
    let res = analyzer.analyze(&tiny, None);
    assert_eq!(res.failed_at, Some(FailureStage::SizeCheck));
    assert_eq!((res.score, res.breakdown), (None, None));
    let dry = RgbImage::from_pixel(260, 260, Rgb([34, 139, 34]));
    assert_eq!(
        analyzer.analyze(&dry, None).failed_at,
        Some(FailureStage::ColorCheck)
    );
}

#[test]
fn analyze_path_decodes_the_file() {
    let lib = library();
    let board = plus_board(lib.anchors(), Some(&object_patch(BUOY_SEED)));
    let path = temp_file("board.png");
    board.save(&path).unwrap();
    let res = BoardAnalyzer::new(&lib, AnalysisConfig::default()).analyze_path(&path);
    std::fs::remove_file(&path).ok();
    assert!(res.is_valid, "{:?}", res.errors);
    assert_eq!(res.score, Some(2));
}

#[test]
fn analyze_with_source_path_checks_arrows_on_the_file() {
    let lib = library();
    let board = plus_board(lib.anchors(), Some(&object_patch(BUOY_SEED)));
    let path = temp_file("source.png");
    board.save(&path).unwrap();
    let analyzer = BoardAnalyzer::new(&lib, AnalysisConfig::default());
    let res = analyzer.analyze(&board, Some(path.as_path()));
    std::fs::remove_file(&path).ok();
    assert!(res.is_valid, "{:?}", res.errors);
    assert_eq!(res.correct_count, 7);
    assert_eq!(res.score, Some(2));
}

#[test]
fn analyze_path_rejects_non_images() {
    let lib = library();
    let path = temp_file("not-an-image.jpg");
    std::fs::write(&path, b"definitely not a jpeg").unwrap();
    let res = BoardAnalyzer::new(&lib, AnalysisConfig::default()).analyze_path(&path);
    std::fs::remove_file(&path).ok();
    assert!(!res.is_valid);
    assert_eq!(res.failed_at, Some(FailureStage::Decode));
    assert_eq!(res.errors, vec!["Error: Not a valid image file"]);
}

#[test]
fn validate_only_does_not_score() {
    let lib = library();
    let board = plus_board(lib.anchors(), Some(&object_patch(BUOY_SEED)));
    let res = BoardAnalyzer::new(&lib, AnalysisConfig::default()).validate(&board, None);
    assert!(res.is_valid);
    assert!(res.rank.is_none());
    assert_eq!(res.score, None);
    assert_eq!(res.correct_count, 7);
}
