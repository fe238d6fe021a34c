//! End-to-end board analysis.
//!
//! Validation, cell layout, classification and scoring run in sequence. The
//! first rejection ends the run; its result still carries whatever diagnostic
//! output the failing stage produced.

use crate::adjacency::{AdjacencyConfig, CellLayout};
use crate::anchor::{AnchorConfig, OrientationSet};
use crate::annotate::annotate;
use crate::classify::{ClassifyConfig, ObjectClassifier};
use crate::grid::GridConfig;
use crate::image::io::load_rgb_image;
use crate::report::{FailureStage, Rejection};
use crate::scoring::{Breakdown, Rank, ScoreCard};
use crate::search::SearchOptions;
use crate::template::TemplateLibrary;
use crate::trace::{trace_event, trace_span};
use crate::validate::{BoardValidator, ValidationConfig};
use image::RgbImage;
use std::path::Path;

/// Configuration for a full analysis run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnalysisConfig {
    pub validation: ValidationConfig,
    pub anchors: AnchorConfig,
    pub grid: GridConfig,
    pub adjacency: AdjacencyConfig,
    pub classify: ClassifyConfig,
    /// Attach an annotated copy of the image to valid results.
    pub annotate: bool,
    /// Use rayon for scans and per-template scoring (needs the `rayon` feature).
    pub parallel: bool,
}

impl AnalysisConfig {
    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            parallel: self.parallel,
        }
    }
}

/// Outcome of one analysis run.
///
/// Either `is_valid` is false and `failed_at` names the stage, or the board
/// passed and (after [`BoardAnalyzer::analyze`]) score, rank and breakdown are
/// filled in.
#[derive(Clone, Debug, Default)]
pub struct AnalysisResult {
    pub is_valid: bool,
    /// Player-facing messages; empty when valid.
    pub errors: Vec<String>,
    pub failed_at: Option<FailureStage>,
    /// Typed reason behind `errors`.
    pub rejection: Option<Rejection>,
    /// Set only by [`BoardAnalyzer::analyze`] on a valid board.
    pub score: Option<u32>,
    pub rank: Option<Rank>,
    pub breakdown: Option<Breakdown>,
    pub annotated_image: Option<RgbImage>,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub total_cells: usize,
    pub scorable_cells: usize,
}

impl AnalysisResult {
    pub(crate) fn rejected(rejection: Rejection) -> Self {
        Self {
            is_valid: false,
            errors: vec![rejection.to_string()],
            failed_at: Some(rejection.stage()),
            rejection: Some(rejection),
            ..Self::default()
        }
    }

    pub(crate) fn validated(orientation: &OrientationSet) -> Self {
        Self {
            is_valid: true,
            correct_count: orientation.correct.len(),
            incorrect_count: orientation.incorrect.len(),
            ..Self::default()
        }
    }

    /// Rank name and description, when scored.
    pub fn rank_text(&self) -> Option<(&'static str, &'static str)> {
        self.rank.map(|r| (r.name(), r.description()))
    }
}

/// Runs the scoring pipeline with one template library.
#[derive(Clone, Copy, Debug)]
pub struct BoardAnalyzer<'a> {
    library: &'a TemplateLibrary,
    config: AnalysisConfig,
}

impl<'a> BoardAnalyzer<'a> {
    pub fn new(library: &'a TemplateLibrary, config: AnalysisConfig) -> Self {
        Self { library, config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn validator(&self) -> BoardValidator<'a> {
        BoardValidator::new(
            self.library.anchors(),
            self.config.validation,
            self.config.anchors,
        )
        .with_options(self.config.search_options())
    }

    /// Runs only the validation stages.
    pub fn validate(&self, image: &RgbImage, path: Option<&Path>) -> AnalysisResult {
        self.validator().validate(image, path)
    }

    /// Validates and scores `image`.
    ///
    /// `path`, when given, must point at the same picture; the orientation
    /// check then runs on the decoded file.
    pub fn analyze(&self, image: &RgbImage, path: Option<&Path>) -> AnalysisResult {
        let _span = trace_span!("analyze", width = image.width(), height = image.height())
            .entered();
        let validated = match self.validator().check(image, path) {
            Ok(validated) => validated,
            Err(rejected) => return *rejected,
        };
        let orientation = validated.orientation;
        let cfg = &self.config;

        let layout = CellLayout::from_anchors(&orientation.correct, &cfg.grid, &cfg.adjacency);
        let classifier = ObjectClassifier::new(self.library, cfg.classify)
            .with_options(cfg.search_options());
        let mut result = AnalysisResult::validated(&orientation);
        result.total_cells = layout.total();
        result.scorable_cells = layout.scorable_count();

        let classifications = match classifier.classify_cells(image, &layout.scorable) {
            Ok(classifications) => classifications,
            Err(err) => {
                let mut failed = AnalysisResult::rejected(Rejection::Scoring {
                    reason: err.to_string(),
                });
                failed.correct_count = result.correct_count;
                failed.total_cells = result.total_cells;
                failed.scorable_cells = result.scorable_cells;
                return failed;
            }
        };

        let card = ScoreCard::from_classifications(&classifications);
        trace_event!(
            "board_scored",
            score = card.score,
            buoys = card.breakdown.buoys,
            lighthouses = card.breakdown.lighthouses,
            empty = card.breakdown.empty
        );
        result.score = Some(card.score);
        result.rank = Some(card.rank);
        result.breakdown = Some(card.breakdown);
        if cfg.annotate {
            result.annotated_image = Some(annotate(image, &classifications));
        }
        result
    }

    /// Decodes the file at `path` and analyzes it.
    pub fn analyze_path(&self, path: &Path) -> AnalysisResult {
        match load_rgb_image(path) {
            Ok(image) => self.analyze(&image, None),
            Err(err) => AnalysisResult::rejected(Rejection::Decode {
                reason: err.to_string(),
            }),
        }
    }
}
