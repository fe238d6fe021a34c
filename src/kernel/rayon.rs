//! Rayon-parallel scans (feature-gated).
//!
//! Rows of the score map are computed independently and concatenated in
//! order, so the result is identical to the scalar scan.

use crate::kernel::scalar::ZnccScalar;
use crate::kernel::{placement_range, ScoreMap};
use crate::template::TemplatePlan;
use crate::ImageView;
use rayon::prelude::*;

/// Row-parallel full scan for the ZNCC kernel.
pub fn zncc_score_map_par(image: ImageView<'_, u8>, plan: &TemplatePlan) -> Option<ScoreMap> {
    let (max_x, max_y) = placement_range(image, plan)?;
    let width = max_x + 1;
    let height = max_y + 1;

    let rows: Vec<Vec<f32>> = (0..height)
        .into_par_iter()
        .map(|y| {
            (0..width)
                .map(|x| ZnccScalar::score_unchecked(image, plan, x, y))
                .collect()
        })
        .collect();

    Some(ScoreMap::new(width, height, rows.concat()))
}
