//! Scorability: a cell counts only when all four sides have a neighbour.
//!
//! Neighbour slots are recomputed from each cell's own geometry on every
//! query, so the answer depends only on the current cell list.

use crate::anchor::{AnchorConfig, AnchorDetector};
use crate::geometry::{Point, Rect};
use crate::grid::{build_grid, estimate_cell_size, CellSize, GridConfig};
use crate::template::AnchorTemplates;
use crate::trace::{trace_detail, trace_event};
use crate::util::BoardResult;
use image::RgbImage;

/// Minimum share of a neighbour slot another cell must cover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdjacencyConfig {
    pub min_overlap: f32,
}

impl Default for AdjacencyConfig {
    fn default() -> Self {
        Self { min_overlap: 0.7 }
    }
}

/// Expected neighbour positions: left, right, top, bottom.
pub fn neighbor_slots(cell: &Rect) -> [Rect; 4] {
    let w = cell.width();
    let h = cell.height();
    [
        cell.translated(-w, 0),
        cell.translated(w, 0),
        cell.translated(0, -h),
        cell.translated(0, h),
    ]
}

/// True when some cell other than `cell` covers more than the configured
/// share of `slot`.
fn slot_occupied(slot: &Rect, cell: &Rect, all_cells: &[Rect], cfg: &AdjacencyConfig) -> bool {
    let slot_area = slot.area();
    if slot_area == 0 {
        return false;
    }
    all_cells
        .iter()
        .filter(|other| *other != cell)
        .any(|other| other.overlap_area(slot) as f32 / slot_area as f32 > cfg.min_overlap)
}

/// True iff all four neighbour slots of `cell` are occupied.
///
/// O(n) per cell; a board is tens of cells.
pub fn is_scorable(cell: &Rect, all_cells: &[Rect], cfg: &AdjacencyConfig) -> bool {
    neighbor_slots(cell)
        .iter()
        .all(|slot| slot_occupied(slot, cell, all_cells, cfg))
}

/// Cells with neighbours on all sides, in input order.
pub fn scorable_cells(cells: &[Rect], cfg: &AdjacencyConfig) -> Vec<Rect> {
    let scorable: Vec<Rect> = cells
        .iter()
        .filter(|cell| {
            let ok = is_scorable(cell, cells, cfg);
            trace_detail!(
                "cell_surrounded",
                left = cell.left,
                top = cell.top,
                surrounded = ok
            );
            ok
        })
        .copied()
        .collect();
    trace_event!(
        "scorable_cells",
        total = cells.len(),
        scorable = scorable.len()
    );
    scorable
}

/// Inferred cells of one board and the subset eligible for scoring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellLayout {
    pub cell_size: Option<CellSize>,
    pub cells: Vec<Rect>,
    pub scorable: Vec<Rect>,
}

impl CellLayout {
    /// Runs size estimation, grid construction and the adjacency rule.
    ///
    /// Without a size estimate the layout is empty.
    pub fn from_anchors(anchors: &[Point], grid: &GridConfig, adjacency: &AdjacencyConfig) -> Self {
        let Some(size) = estimate_cell_size(anchors, grid) else {
            return Self::default();
        };
        let cells = build_grid(anchors, size, grid);
        let scorable = scorable_cells(&cells, adjacency);
        Self {
            cell_size: Some(size),
            cells,
            scorable,
        }
    }

    pub fn total(&self) -> usize {
        self.cells.len()
    }

    pub fn scorable_count(&self) -> usize {
        self.scorable.len()
    }
}

/// Detects correctly oriented anchors on `image` and lays out its cells.
pub fn detect_scorable_cells(
    image: &RgbImage,
    templates: &AnchorTemplates,
    anchors: AnchorConfig,
    grid: &GridConfig,
    adjacency: &AdjacencyConfig,
) -> BoardResult<CellLayout> {
    let set = AnchorDetector::new(templates, anchors).detect_in_rgb(image)?;
    Ok(CellLayout::from_anchors(&set.correct, grid, adjacency))
}
