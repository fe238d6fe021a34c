//! Correlation kernels producing dense score maps.
//!
//! Scores follow the zero-mean normalized cross-correlation definition
//! (`TM_CCOEFF_NORMED`): `sum(t' * I) / sqrt(sum(t'^2) * var(I))` over the
//! window whose top-left corner is `(x, y)`.

use crate::template::TemplatePlan;
use crate::ImageView;

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Windows whose summed squared deviation is at or below this are flat and
/// score 0.
pub(crate) const MIN_WINDOW_VARIANCE: f64 = 1e-6;

/// Dense correlation scores, one per valid top-left placement.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreMap {
    width: usize,
    height: usize,
    scores: Vec<f32>,
}

impl ScoreMap {
    pub(crate) fn new(width: usize, height: usize, scores: Vec<f32>) -> Self {
        debug_assert_eq!(scores.len(), width * height);
        Self {
            width,
            height,
            scores,
        }
    }

    /// Number of placement columns (`image_width - template_width + 1`).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of placement rows (`image_height - template_height + 1`).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the score at placement `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.scores.get(y * self.width + x).copied()
    }

    /// Iterates placements scoring at least `threshold`, in row-major order.
    pub fn hits(&self, threshold: f32) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let width = self.width;
        self.scores
            .iter()
            .enumerate()
            .filter(move |(_, &score)| score >= threshold)
            .map(move |(idx, &score)| (idx % width, idx / width, score))
    }

    /// Returns the highest score and its placement.
    ///
    /// Ties resolve to the first placement in row-major order.
    pub fn max_loc(&self) -> Option<(usize, usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, &score) in self.scores.iter().enumerate() {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((idx, score)),
            }
        }
        best.map(|(idx, score)| (idx % self.width, idx / self.width, score))
    }
}

/// Kernel trait for single-placement scoring and full scans.
pub trait Kernel {
    type Plan;

    /// Computes the score with the template's top-left corner at `(x, y)`.
    ///
    /// Returns `None` when the template does not fit at that placement.
    fn score_at(image: ImageView<'_, u8>, plan: &Self::Plan, x: usize, y: usize)
        -> Option<f32>;

    /// Scores every placement. `None` when the template is larger than the
    /// image.
    fn score_map(image: ImageView<'_, u8>, plan: &Self::Plan) -> Option<ScoreMap>;
}

/// Placement range `(max_x, max_y)` for a template inside an image.
pub(crate) fn placement_range(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
) -> Option<(usize, usize)> {
    let max_x = image.width().checked_sub(plan.width())?;
    let max_y = image.height().checked_sub(plan.height())?;
    Some((max_x, max_y))
}
