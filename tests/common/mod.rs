//! Synthetic boards shared by the integration tests.
//!
//! Arrows and objects are seeded noise patches. Gray arrow pixels (R = G = B)
//! convert to luma exactly, so stamped arrows match their templates with a
//! score of 1 while rotated noise stays uncorrelated.

#![allow(dead_code)]

use beaconscore::image::io::gray_from_rgb;
use beaconscore::{
    AnchorTemplates, ObjectKind, Orientation, Template, TemplateLibrary, TemplateRole,
};
use image::{imageops, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const WATER: Rgb<u8> = Rgb([40, 110, 200]);
pub const SAND: Rgb<u8> = Rgb([200, 180, 120]);
pub const RED: Rgb<u8> = Rgb([220, 30, 30]);

pub const BOARD_WIDTH: u32 = 320;
pub const BOARD_HEIGHT: u32 = 260;
pub const ANCHOR_SIZE: usize = 13;
pub const PATCH_SIZE: u32 = 13;
pub const SPACING: i32 = 60;

/// Seven tiles in (col, row) units with one fully surrounded tile at (1, 1).
pub const PLUS_LAYOUT: [(i32, i32); 7] = [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2), (2, 2), (3, 1)];

/// Arrow corner of the tile at `(col, row)`.
pub fn grid_point(col: i32, row: i32) -> (i32, i32) {
    (SPACING + col * SPACING, SPACING + row * SPACING)
}

/// Cell rectangle `(left, top, right, bottom)` inferred for the tile at
/// `(col, row)`.
pub fn cell_of(col: i32, row: i32) -> (i32, i32, i32, i32) {
    let (x, y) = grid_point(col, row);
    (x - 30, y - 10, x + 30, y + 50)
}

fn noise(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.random::<u8>()).collect()
}

pub fn anchor_templates() -> AnchorTemplates {
    let mut rng = StdRng::seed_from_u64(7);
    let data = noise(&mut rng, ANCHOR_SIZE * ANCHOR_SIZE);
    let canonical = Template::new(
        "arrow",
        TemplateRole::Anchor(Orientation::Canonical),
        data,
        ANCHOR_SIZE,
        ANCHOR_SIZE,
    )
    .unwrap();
    AnchorTemplates::from_canonical(canonical).unwrap()
}

/// Colored object patch: roughly a third red, the rest random gray.
pub fn object_patch(seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    RgbImage::from_fn(PATCH_SIZE, PATCH_SIZE, |_, _| {
        if rng.random_bool(0.35) {
            RED
        } else {
            let v = rng.random::<u8>();
            Rgb([v, v, v])
        }
    })
}

/// Same luma structure as `object_patch(seed)` with the red replaced by gray.
pub fn unpainted_patch(seed: u64) -> RgbImage {
    let patch = object_patch(seed);
    let gray = gray_from_rgb(&patch);
    RgbImage::from_fn(PATCH_SIZE, PATCH_SIZE, |x, y| {
        let v = gray.get_pixel(x, y).0[0];
        Rgb([v, v, v])
    })
}

pub const BUOY_SEED: u64 = 101;
pub const LIGHTHOUSE_SEED: u64 = 202;

fn patch_template(name: &str, kind: ObjectKind, seed: u64) -> Template {
    let gray = gray_from_rgb(&object_patch(seed));
    let (w, h) = gray.dimensions();
    Template::new(name, TemplateRole::Object(kind), gray.into_raw(), w as usize, h as usize)
        .unwrap()
}

fn noise_template(name: &str, kind: ObjectKind, seed: u64) -> Template {
    let mut rng = StdRng::seed_from_u64(seed);
    let side = PATCH_SIZE as usize;
    Template::new(name, TemplateRole::Object(kind), noise(&mut rng, side * side), side, side)
        .unwrap()
}

/// Library with the production template names; only `lighthouse` and
/// `buoy_blue` have a counterpart painted on the test boards.
pub fn library() -> TemplateLibrary {
    let objects = vec![
        noise_template("beacon_hq", ObjectKind::BeaconHq, 11),
        patch_template("lighthouse", ObjectKind::Lighthouse, LIGHTHOUSE_SEED),
        noise_template("buoy_birds", ObjectKind::Buoy, 13),
        noise_template("buoy_birds2", ObjectKind::Buoy, 14),
        patch_template("buoy_blue", ObjectKind::Buoy, BUOY_SEED),
        noise_template("buoy_score", ObjectKind::Buoy, 15),
    ];
    TemplateLibrary::new(anchor_templates(), objects).unwrap()
}

pub fn blank_board() -> RgbImage {
    RgbImage::from_pixel(BOARD_WIDTH, BOARD_HEIGHT, WATER)
}

/// Copies a grayscale template onto `img` with its corner at `(x, y)`.
pub fn stamp_template(img: &mut RgbImage, tpl: &Template, x: i32, y: i32) {
    let view = tpl.view();
    for ty in 0..view.height() {
        for tx in 0..view.width() {
            let v = *view.get(tx, ty).unwrap();
            img.put_pixel(x as u32 + tx as u32, y as u32 + ty as u32, Rgb([v, v, v]));
        }
    }
}

pub fn stamp_patch(img: &mut RgbImage, patch: &RgbImage, x: i32, y: i32) {
    imageops::replace(img, patch, i64::from(x), i64::from(y));
}

pub fn fill_rect(img: &mut RgbImage, (left, top, right, bottom): (i32, i32, i32, i32), color: Rgb<u8>) {
    for y in top.max(0)..bottom.min(img.height() as i32) {
        for x in left.max(0)..right.min(img.width() as i32) {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Board with a correctly oriented arrow on every tile of `tiles`.
pub fn board_with_arrows(anchors: &AnchorTemplates, tiles: &[(i32, i32)]) -> RgbImage {
    let mut img = blank_board();
    for &(col, row) in tiles {
        let (x, y) = grid_point(col, row);
        stamp_template(&mut img, anchors.canonical(), x, y);
    }
    img
}

/// The plus layout with `patch` placed inside the surrounded tile, clear of
/// its arrow.
pub fn plus_board(anchors: &AnchorTemplates, patch: Option<&RgbImage>) -> RgbImage {
    let mut img = board_with_arrows(anchors, &PLUS_LAYOUT);
    if let Some(patch) = patch {
        let (left, top, _, _) = cell_of(1, 1);
        stamp_patch(&mut img, patch, left + 5, top + 35);
    }
    img
}

/// The plus layout with the surrounded tile painted as land.
pub fn plus_board_on_land(anchors: &AnchorTemplates, patch: Option<&RgbImage>) -> RgbImage {
    let mut img = blank_board();
    fill_rect(&mut img, cell_of(1, 1), SAND);
    for &(col, row) in &PLUS_LAYOUT {
        let (x, y) = grid_point(col, row);
        stamp_template(&mut img, anchors.canonical(), x, y);
    }
    if let Some(patch) = patch {
        let (left, top, _, _) = cell_of(1, 1);
        stamp_patch(&mut img, patch, left + 5, top + 35);
    }
    img
}
