//! Visual feedback drawn onto copies of the source image.
//!
//! Labels use a built-in 3x5 block font.

use crate::classify::CellClassification;
use crate::geometry::{Point, Rect};
use crate::template::ObjectKind;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect as DrawRect;

/// Dark red: recognized objects and wrongly oriented arrows.
pub const MARKER_COLOR: Rgb<u8> = Rgb([139, 0, 0]);
/// Muted blue: scorable cells with nothing on them.
pub const EMPTY_COLOR: Rgb<u8> = Rgb([19, 69, 139]);
/// Plain cell outlines.
pub const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: i32 = 5;

/// Draws per-cell outcome boxes and point labels on a copy of `image`.
pub fn annotate(image: &RgbImage, classifications: &[CellClassification]) -> RgbImage {
    let mut out = image.clone();
    for cls in classifications {
        let color = if cls.category.is_some() {
            MARKER_COLOR
        } else {
            EMPTY_COLOR
        };
        draw_thick_rect(&mut out, cls.cell, color, 3);
        let origin = Point::new(cls.cell.left + 10, cls.cell.top + 10);
        draw_label(&mut out, label_for(cls), origin, color, 4);
    }
    out
}

/// Outlines every inferred cell with its index and marks its anchor corner.
pub fn annotate_cells(image: &RgbImage, cells: &[Rect]) -> RgbImage {
    let mut out = image.clone();
    for (idx, cell) in cells.iter().enumerate() {
        draw_thick_rect(&mut out, *cell, OUTLINE_COLOR, 2);
        draw_filled_circle_mut(&mut out, (cell.right, cell.top), 5, Rgb([255, 0, 0]));
        let origin = Point::new(cell.left + 10, cell.top + 10);
        draw_label(&mut out, &idx.to_string(), origin, Rgb([0, 0, 255]), 3);
    }
    out
}

fn label_for(cls: &CellClassification) -> &'static str {
    match cls.category.as_ref().map(|c| c.kind) {
        Some(ObjectKind::Buoy) => "B2",
        Some(ObjectKind::Lighthouse) => "L3",
        Some(ObjectKind::BeaconHq) => "HQ3",
        None => "E1",
    }
}

/// Draws a rectangle outline `thickness` pixels wide, growing inwards.
pub(crate) fn draw_thick_rect(img: &mut RgbImage, rect: Rect, color: Rgb<u8>, thickness: i32) {
    for i in 0..thickness {
        let w = rect.width() - 2 * i;
        let h = rect.height() - 2 * i;
        if w <= 0 || h <= 0 {
            break;
        }
        let r = DrawRect::at(rect.left + i, rect.top + i).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(img, r, color);
    }
}

/// Draws `text` with its top-left corner at `origin`; each font cell is
/// `scale` pixels square. Unknown characters render as `?`.
pub(crate) fn draw_label(img: &mut RgbImage, text: &str, origin: Point, color: Rgb<u8>, scale: i32) {
    let scale = scale.max(1);
    let advance = (GLYPH_WIDTH + 1) * scale;
    for (i, ch) in text.chars().enumerate() {
        let x0 = origin.x + i as i32 * advance;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0b100 >> col) == 0 {
                    continue;
                }
                let cell = DrawRect::at(x0 + col * scale, origin.y + row as i32 * scale)
                    .of_size(scale as u32, scale as u32);
                draw_filled_rect_mut(img, cell, color);
            }
        }
    }
}

fn glyph(ch: char) -> [u8; GLYPH_HEIGHT as usize] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        ' ' => [0; 5],
        _ => [0b111, 0b001, 0b010, 0b000, 0b010],
    }
}
