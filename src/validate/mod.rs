//! Fail-fast board validation: size, water color, arrow orientation.

use crate::analysis::AnalysisResult;
use crate::anchor::{AnchorConfig, AnchorDetector, OrientationSet};
use crate::color::{hue_fraction_sampled, WATER_BLUE};
use crate::report::Rejection;
use crate::search::SearchOptions;
use crate::template::AnchorTemplates;
use crate::trace::{trace_event, trace_span};
use image::RgbImage;
use std::path::Path;

/// Limits applied before any template matching runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidationConfig {
    /// Smallest accepted width and height.
    pub min_side: u32,
    /// Largest accepted width and height.
    pub max_side: u32,
    /// Water-blue share the sampled pixels must exceed.
    pub min_blue_fraction: f32,
    /// Every `sample_step`-th pixel is inspected by the color check.
    pub sample_step: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_side: 200,
            max_side: 4000,
            min_blue_fraction: 0.15,
            sample_step: 50,
        }
    }
}

/// Passed validation; carries what later stages reuse.
#[derive(Clone, Debug)]
pub(crate) struct Validated {
    pub orientation: OrientationSet,
}

/// Runs the three validation stages against one image.
#[derive(Clone, Copy, Debug)]
pub struct BoardValidator<'a> {
    anchors: &'a AnchorTemplates,
    config: ValidationConfig,
    anchor_config: AnchorConfig,
    opts: SearchOptions,
}

impl<'a> BoardValidator<'a> {
    pub fn new(
        anchors: &'a AnchorTemplates,
        config: ValidationConfig,
        anchor_config: AnchorConfig,
    ) -> Self {
        Self {
            anchors,
            config,
            anchor_config,
            opts: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, opts: SearchOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Validates `image`. The orientation stage reads `path` when given,
    /// otherwise it works on `image` itself.
    ///
    /// Never fails: every problem ends up in the result as a rejection.
    pub fn validate(&self, image: &RgbImage, path: Option<&Path>) -> AnalysisResult {
        match self.check(image, path) {
            Ok(validated) => AnalysisResult::validated(&validated.orientation),
            Err(rejected) => *rejected,
        }
    }

    pub(crate) fn check(
        &self,
        image: &RgbImage,
        path: Option<&Path>,
    ) -> Result<Validated, Box<AnalysisResult>> {
        let _span = trace_span!("validate", width = image.width(), height = image.height())
            .entered();
        self.check_size(image)
            .and_then(|()| self.check_color(image))
            .map_err(|rejection| Box::new(AnalysisResult::rejected(rejection)))?;
        self.check_orientation(image, path)
    }

    fn check_size(&self, image: &RgbImage) -> Result<(), Rejection> {
        let (w, h) = image.dimensions();
        let cfg = &self.config;
        if w < cfg.min_side || h < cfg.min_side {
            return Err(Rejection::too_small(w, h));
        }
        if w > cfg.max_side || h > cfg.max_side {
            return Err(Rejection::too_large(w, h));
        }
        Ok(())
    }

    fn check_color(&self, image: &RgbImage) -> Result<(), Rejection> {
        let blue = hue_fraction_sampled(image, &WATER_BLUE, self.config.sample_step);
        trace_event!("blue_fraction", fraction = blue);
        if blue > self.config.min_blue_fraction {
            Ok(())
        } else {
            Err(Rejection::Color {
                blue_fraction: blue,
            })
        }
    }

    fn check_orientation(
        &self,
        image: &RgbImage,
        path: Option<&Path>,
    ) -> Result<Validated, Box<AnalysisResult>> {
        let detector = AnchorDetector::new(self.anchors, self.anchor_config).with_options(self.opts);
        let (orientation, report) = match path {
            Some(path) => detector.inspect_path(path),
            None => detector.inspect_raster(image),
        };
        trace_event!(
            "orientation_checked",
            valid = report.is_valid,
            correct = report.correct_count,
            incorrect = report.incorrect_count
        );
        if report.is_valid {
            return Ok(Validated { orientation });
        }
        let rejection = Rejection::Orientation {
            message: report.message,
            correct: report.correct_count,
            incorrect: report.incorrect_count,
        };
        let mut result = AnalysisResult::rejected(rejection);
        result.correct_count = report.correct_count;
        result.incorrect_count = report.incorrect_count;
        result.annotated_image = report.annotated_image;
        Err(Box::new(result))
    }
}
