//! Per-cell object classification.
//!
//! Each object template is matched against the cell; color gates then veto
//! implausible candidates. Buoys float in water, so a buoy needs either a
//! watery cell or a very strong match. Lighthouses and the beacon headquarters
//! stand on land, so too much water rules them out. Both families are painted
//! red, and the matched window must show some of it.

use crate::color::{hue_fraction, hue_fraction_in, MARKER_RED, WATER_BLUE};
use crate::geometry::Rect;
use crate::image::io::{gray_from_rgb, view_from_gray_image};
use crate::search::{best_match, SearchOptions};
use crate::template::{ObjectFamily, ObjectKind, Template, TemplateLibrary, TemplateRole};
use crate::trace::{trace_detail, trace_span};
use crate::util::math::clamp_span;
use crate::util::BoardResult;
use crate::ImageView;
use image::RgbImage;

/// Acceptance thresholds for object candidates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifyConfig {
    /// A candidate must score above this to be reported.
    pub threshold: f32,
    /// Buoys need more water than this in the cell...
    pub buoy_min_water: f32,
    /// ...unless the raw match beats this score.
    pub buoy_override_score: f32,
    /// Lighthouse-family objects need less water than this.
    pub lighthouse_max_water: f32,
    /// Minimum red share inside the matched window.
    pub min_red: f32,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            buoy_min_water: 0.20,
            buoy_override_score: 0.6,
            lighthouse_max_water: 0.50,
            min_red: 0.02,
        }
    }
}

/// Object recognized in a cell: the matching template's name and kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectCategory {
    pub name: String,
    pub kind: ObjectKind,
}

impl ObjectCategory {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Classifier verdict for one cell image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
    /// `None` means the cell is empty.
    pub category: Option<ObjectCategory>,
    /// Confidence of the accepted candidate, 0 when empty.
    pub confidence: f32,
}

/// Classifier verdict tied to the board cell it was computed for.
#[derive(Clone, Debug, PartialEq)]
pub struct CellClassification {
    pub cell: Rect,
    pub category: Option<ObjectCategory>,
    pub confidence: f32,
}

/// Matches the library's object templates against cell images.
#[derive(Clone, Copy, Debug)]
pub struct ObjectClassifier<'a> {
    library: &'a TemplateLibrary,
    config: ClassifyConfig,
    opts: SearchOptions,
}

impl<'a> ObjectClassifier<'a> {
    pub fn new(library: &'a TemplateLibrary, config: ClassifyConfig) -> Self {
        Self {
            library,
            config,
            opts: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, opts: SearchOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Classifies one cell image.
    ///
    /// The best gated candidate above the threshold wins; on equal scores the
    /// template listed first in the library is kept.
    pub fn classify(&self, cell: &RgbImage) -> BoardResult<Classification> {
        let _span = trace_span!("classify_cell", width = cell.width(), height = cell.height())
            .entered();
        let gray = gray_from_rgb(cell);
        let gray_view = view_from_gray_image(&gray)?;
        let water = hue_fraction(cell, &WATER_BLUE);

        let scores = self.gated_scores(cell, gray_view, water);

        let mut best = Classification::default();
        for (tpl, score) in self.library.objects().iter().zip(scores) {
            if score > self.config.threshold && score > best.confidence {
                if let TemplateRole::Object(kind) = tpl.role() {
                    best = Classification {
                        category: Some(ObjectCategory::new(tpl.name(), kind)),
                        confidence: score,
                    };
                }
            }
        }
        trace_detail!(
            "cell_classified",
            water = water,
            confidence = best.confidence,
            recognized = best.category.is_some()
        );
        Ok(best)
    }

    /// Crops and classifies each cell of `image`.
    ///
    /// Cells are clamped to the image; a cell entirely outside it is empty.
    pub fn classify_cells(
        &self,
        image: &RgbImage,
        cells: &[Rect],
    ) -> BoardResult<Vec<CellClassification>> {
        cells
            .iter()
            .map(|&cell| {
                let verdict = match crop_cell(image, cell) {
                    Some(crop) => self.classify(&crop)?,
                    None => Classification::default(),
                };
                Ok(CellClassification {
                    cell,
                    category: verdict.category,
                    confidence: verdict.confidence,
                })
            })
            .collect()
    }

    /// Gated score per library template, in library order.
    fn gated_scores(&self, cell: &RgbImage, gray: ImageView<'_, u8>, water: f32) -> Vec<f32> {
        let templates = self.library.objects();
        #[cfg(feature = "rayon")]
        {
            if self.opts.parallel {
                use rayon::prelude::*;
                return templates
                    .par_iter()
                    .map(|tpl| self.gated_score(cell, gray, water, tpl))
                    .collect();
            }
        }
        templates
            .iter()
            .map(|tpl| self.gated_score(cell, gray, water, tpl))
            .collect()
    }

    fn gated_score(&self, cell: &RgbImage, gray: ImageView<'_, u8>, water: f32, tpl: &Template) -> f32 {
        let TemplateRole::Object(kind) = tpl.role() else {
            return 0.0;
        };
        // Serial scan inside; templates are the unit of parallelism here.
        let Some(hit) = best_match(gray, tpl, SearchOptions::default()) else {
            return 0.0;
        };
        let cfg = &self.config;
        let window = Rect::new(
            hit.point.x,
            hit.point.y,
            hit.point.x + tpl.width() as i32,
            hit.point.y + tpl.height() as i32,
        );

        let accepted = match kind.family() {
            ObjectFamily::Buoy => {
                (water > cfg.buoy_min_water || hit.score > cfg.buoy_override_score)
                    && hue_fraction_in(cell, window, &MARKER_RED) > cfg.min_red
            }
            ObjectFamily::Lighthouse => {
                water < cfg.lighthouse_max_water
                    && hue_fraction_in(cell, window, &MARKER_RED) > cfg.min_red
            }
        };
        trace_detail!(
            "object_candidate",
            template = tpl.name(),
            score = hit.score,
            accepted = accepted
        );
        if accepted {
            hit.score
        } else {
            0.0
        }
    }
}

/// Copies the part of `cell` that lies inside `image`.
pub fn crop_cell(image: &RgbImage, cell: Rect) -> Option<RgbImage> {
    let (x0, x1) = clamp_span(cell.left, cell.right, image.width() as usize)?;
    let (y0, y1) = clamp_span(cell.top, cell.bottom, image.height() as usize)?;
    let crop = image::imageops::crop_imm(
        image,
        x0 as u32,
        y0 as u32,
        (x1 - x0) as u32,
        (y1 - y0) as u32,
    );
    Some(crop.to_image())
}
