//! Arrow anchor detection and the orientation rule.
//!
//! Every tile carries an arrow that must point the canonical way. The
//! canonical template locates correctly placed tiles; the three rotated
//! templates locate tiles laid down the wrong way round.

use crate::annotate::{draw_label, draw_thick_rect, MARKER_COLOR};
use crate::candidate::dedup::{dedup_in_order, exclude_near};
use crate::geometry::{Point, Rect};
use crate::image::io::{gray_from_rgb, load_rgb_image, view_from_gray_image};
use crate::search::{find_matches, raw_hits, SearchOptions};
use crate::template::AnchorTemplates;
use crate::trace::{trace_event, trace_span};
use crate::util::BoardResult;
use crate::ImageView;
use image::{GrayImage, RgbImage};
use std::path::Path;

/// Thresholds for arrow detection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorConfig {
    /// Minimum correlation for any arrow template.
    pub threshold: f32,
    /// Hits closer than this (pixels) to an accepted hit are duplicates.
    pub dedup_radius: f32,
    /// Incorrect hits closer than this to a correct one are discarded.
    pub exclusion_radius: f32,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            threshold: 0.79,
            dedup_radius: 40.0,
            exclusion_radius: 35.0,
        }
    }
}

/// Correctly and incorrectly oriented anchors of one image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrientationSet {
    pub correct: Vec<Point>,
    pub incorrect: Vec<Point>,
}

/// Outcome of the orientation rule.
#[derive(Clone, Debug)]
pub struct OrientationReport {
    pub is_valid: bool,
    pub message: String,
    pub correct_count: usize,
    pub incorrect_count: usize,
    /// Source image with incorrect arrows marked; `None` if it did not decode.
    pub annotated_image: Option<RgbImage>,
}

/// Finds arrow anchors with a fixed template set.
#[derive(Clone, Copy, Debug)]
pub struct AnchorDetector<'a> {
    templates: &'a AnchorTemplates,
    config: AnchorConfig,
    opts: SearchOptions,
}

impl<'a> AnchorDetector<'a> {
    pub fn new(templates: &'a AnchorTemplates, config: AnchorConfig) -> Self {
        Self {
            templates,
            config,
            opts: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, opts: SearchOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Detects and partitions anchors on a grayscale plane.
    pub fn detect_orientations(&self, gray: ImageView<'_, u8>) -> OrientationSet {
        let _span = trace_span!("detect_orientations").entered();
        let cfg = self.config;

        let correct: Vec<Point> = find_matches(
            gray,
            self.templates.canonical(),
            cfg.threshold,
            cfg.dedup_radius,
            self.opts,
        )
        .into_iter()
        .map(|d| d.point)
        .collect();

        // Raw hits of all three rotations are pooled before deduplication.
        let pooled = self
            .templates
            .rotated()
            .iter()
            .flat_map(|tpl| raw_hits(gray, tpl, cfg.threshold, self.opts))
            .map(|d| d.point);
        let incorrect = dedup_in_order(pooled, cfg.dedup_radius, |p| *p);
        let candidates = incorrect.len();
        let incorrect = exclude_near(incorrect, &correct, cfg.exclusion_radius, |p| *p);

        trace_event!(
            "anchors_detected",
            correct = correct.len(),
            incorrect = incorrect.len(),
            excluded = candidates - incorrect.len()
        );
        OrientationSet { correct, incorrect }
    }

    /// Detects anchors on a color raster.
    pub fn detect_in_rgb(&self, image: &RgbImage) -> BoardResult<OrientationSet> {
        let gray: GrayImage = gray_from_rgb(image);
        Ok(self.detect_orientations(view_from_gray_image(&gray)?))
    }

    /// Decodes `path` and detects anchors on it.
    ///
    /// Returns `None` when the file cannot be decoded.
    pub fn detect_orientations_at(&self, path: &Path) -> Option<(OrientationSet, RgbImage)> {
        let image = load_rgb_image(path).ok()?;
        let set = self.detect_in_rgb(&image).ok()?;
        Some((set, image))
    }

    /// Applies the orientation rule to a decoded raster.
    pub fn validate_orientation(&self, image: &RgbImage) -> OrientationReport {
        self.inspect_raster(image).1
    }

    /// Applies the orientation rule to the image stored at `path`.
    pub fn validate_orientation_at(&self, path: &Path) -> OrientationReport {
        self.inspect_path(path).1
    }

    /// Detected anchors together with the report built from them.
    pub(crate) fn inspect_raster(&self, image: &RgbImage) -> (OrientationSet, OrientationReport) {
        match self.detect_in_rgb(image) {
            Ok(set) => {
                let report = orientation_report(image, &set);
                (set, report)
            }
            Err(_) => (OrientationSet::default(), undecodable_report()),
        }
    }

    pub(crate) fn inspect_path(&self, path: &Path) -> (OrientationSet, OrientationReport) {
        match self.detect_orientations_at(path) {
            Some((set, image)) => {
                let report = orientation_report(&image, &set);
                (set, report)
            }
            None => (OrientationSet::default(), undecodable_report()),
        }
    }
}

fn orientation_report(image: &RgbImage, set: &OrientationSet) -> OrientationReport {
    let correct_count = set.correct.len();
    let incorrect_count = set.incorrect.len();
    let is_valid = incorrect_count == 0;
    let message = if is_valid {
        format!("Valid board: All {correct_count} arrows pointing correctly")
    } else {
        format!("Invalid board: {incorrect_count} arrows pointing wrong direction")
    };
    OrientationReport {
        is_valid,
        message,
        correct_count,
        incorrect_count,
        annotated_image: Some(mark_incorrect(image, &set.incorrect)),
    }
}

fn undecodable_report() -> OrientationReport {
    OrientationReport {
        is_valid: false,
        message: "Could not load image".to_owned(),
        correct_count: 0,
        incorrect_count: 0,
        annotated_image: None,
    }
}

/// Side of the box drawn around a wrongly oriented arrow.
const MARK_BOX: i32 = 45;
/// The box starts this far up and left of the match corner.
const MARK_INSET: i32 = 15;

/// Copies `image` and boxes each incorrect anchor with an "X" beside it.
pub fn mark_incorrect(image: &RgbImage, incorrect: &[Point]) -> RgbImage {
    let mut out = image.clone();
    for pt in incorrect {
        let corner = pt.offset(-MARK_INSET, -MARK_INSET);
        let rect = Rect::new(corner.x, corner.y, corner.x + MARK_BOX, corner.y + MARK_BOX);
        draw_thick_rect(&mut out, rect, MARKER_COLOR, 3);
        draw_label(&mut out, "X", corner.offset(MARK_BOX + 5, 0), MARKER_COLOR, 4);
    }
    out
}
