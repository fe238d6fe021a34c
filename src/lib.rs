//! Beaconscore scores a photographed Beacon Patrol board.
//!
//! The pipeline validates the photo (size, water color, arrow orientation),
//! infers the tile grid from arrow anchors, classifies every fully surrounded
//! tile by template matching gated with color checks, and turns the tally
//! into a score and rank. Correlation scans can run in parallel via the
//! `rayon` feature; the `tracing` feature emits per-stage spans and events.

pub mod adjacency;
pub mod analysis;
pub mod anchor;
pub mod annotate;
mod candidate;
pub mod classify;
pub mod color;
pub mod geometry;
pub mod grid;
pub mod image;
pub mod kernel;
pub mod report;
pub mod scoring;
pub mod search;
pub mod template;
mod trace;
pub mod util;
pub mod validate;

pub use crate::adjacency::{detect_scorable_cells, AdjacencyConfig, CellLayout};
pub use crate::analysis::{AnalysisConfig, AnalysisResult, BoardAnalyzer};
pub use crate::anchor::{AnchorConfig, AnchorDetector, OrientationReport, OrientationSet};
pub use crate::classify::{
    CellClassification, Classification, ClassifyConfig, ObjectCategory, ObjectClassifier,
};
pub use crate::geometry::{Point, Rect};
pub use crate::grid::{CellSize, GridConfig};
pub use crate::image::{ImageView, OwnedImage};
pub use crate::kernel::{Kernel, ScoreMap};
pub use crate::report::{FailureStage, Rejection};
pub use crate::scoring::{Breakdown, Rank, ScoreCard};
pub use crate::search::{best_match, find_matches, Detection, SearchOptions};
pub use crate::template::{
    AnchorTemplates, ObjectFamily, ObjectKind, Orientation, Template, TemplateLibrary,
    TemplateRole,
};
pub use crate::util::{BoardError, BoardResult};
pub use crate::validate::{BoardValidator, ValidationConfig};
