//! Cell geometry inferred from sparse anchor points.
//!
//! Tiles are laid on a roughly regular grid but photographed by hand, so the
//! spacing is estimated from pairs of anchors that line up horizontally or
//! vertically rather than from the whole point cloud.

use crate::geometry::{Point, Rect};
use crate::trace::trace_event;
use crate::util::math::lower_quartile;

/// Tolerances for spacing estimation and cell placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    /// Pairs whose cross-axis offset is below this count as aligned.
    pub align_tolerance: i32,
    /// Pairs closer than this along the axis are ignored.
    pub min_spacing: i32,
    /// Shift from the anchor match corner to the cell's top-right corner.
    pub anchor_offset: (i32, i32),
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            align_tolerance: 20,
            min_spacing: 50,
            anchor_offset: (30, -10),
        }
    }
}

/// Estimated cell width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSize {
    pub width: i32,
    pub height: i32,
}

/// Estimates the cell size from anchor spacing.
///
/// Horizontal neighbours give width samples, vertical neighbours height
/// samples; each dimension takes the lower quartile of its samples so that
/// long-range pairings do not inflate the estimate. A missing dimension copies
/// the other (square cells). `None` with fewer than two anchors or no aligned
/// pairs.
pub fn estimate_cell_size(anchors: &[Point], cfg: &GridConfig) -> Option<CellSize> {
    if anchors.len() < 2 {
        return None;
    }

    let mut widths = Vec::new();
    let mut heights = Vec::new();
    for (i, a) in anchors.iter().enumerate() {
        for b in &anchors[i + 1..] {
            let dx = (a.x - b.x).abs();
            let dy = (a.y - b.y).abs();
            if dy < cfg.align_tolerance && dx > cfg.min_spacing {
                widths.push(dx);
            }
            if dx < cfg.align_tolerance && dy > cfg.min_spacing {
                heights.push(dy);
            }
        }
    }
    widths.sort_unstable();
    heights.sort_unstable();

    let size = match (lower_quartile(&widths), lower_quartile(&heights)) {
        (Some(width), Some(height)) => CellSize { width, height },
        (Some(width), None) => CellSize {
            width,
            height: width,
        },
        (None, Some(height)) => CellSize {
            width: height,
            height,
        },
        (None, None) => return None,
    };
    trace_event!(
        "cell_size",
        width = size.width,
        height = size.height,
        width_samples = widths.len(),
        height_samples = heights.len()
    );
    Some(size)
}

/// Builds one cell rectangle per anchor.
///
/// The offset anchor is the cell's top-right corner; the cell extends left
/// and down by the cell size. Overlapping cells are kept as they are.
pub fn build_grid(anchors: &[Point], size: CellSize, cfg: &GridConfig) -> Vec<Rect> {
    let (ox, oy) = cfg.anchor_offset;
    anchors
        .iter()
        .map(|a| {
            let corner = a.offset(ox, oy);
            Rect::new(
                corner.x - size.width,
                corner.y,
                corner.x,
                corner.y + size.height,
            )
        })
        .collect()
}
