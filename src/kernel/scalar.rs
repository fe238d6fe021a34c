//! Scalar reference kernel.

use crate::kernel::{placement_range, Kernel, ScoreMap, MIN_WINDOW_VARIANCE};
use crate::template::TemplatePlan;
use crate::ImageView;

/// Scalar zero-mean normalized cross-correlation.
pub struct ZnccScalar;

impl ZnccScalar {
    /// Scores one placement; the caller guarantees the template fits.
    ///
    /// Window sums are accumulated as integers so flat windows cancel
    /// exactly.
    pub(crate) fn score_unchecked(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
    ) -> f32 {
        let tpl_width = plan.width();
        let tpl_height = plan.height();
        let t_prime = plan.t_prime();

        let mut dot = 0.0f64;
        let mut sum_i = 0u64;
        let mut sum_i2 = 0u64;
        for ty in 0..tpl_height {
            let Some(img_row) = image.row(y + ty) else {
                return 0.0;
            };
            let window = &img_row[x..x + tpl_width];
            let tpl_row = &t_prime[ty * tpl_width..(ty + 1) * tpl_width];
            for (&value, &t) in window.iter().zip(tpl_row) {
                let v = u64::from(value);
                dot += f64::from(t) * v as f64;
                sum_i += v;
                sum_i2 += v * v;
            }
        }

        let n = (tpl_width * tpl_height) as f64;
        let sum_i = sum_i as f64;
        let var_i = sum_i2 as f64 - sum_i * sum_i / n;
        if var_i <= MIN_WINDOW_VARIANCE {
            return 0.0;
        }

        let score = dot / (plan.var_t() * var_i).sqrt();
        if score.is_finite() {
            score.clamp(-1.0, 1.0) as f32
        } else {
            0.0
        }
    }
}

impl Kernel for ZnccScalar {
    type Plan = TemplatePlan;

    fn score_at(image: ImageView<'_, u8>, plan: &Self::Plan, x: usize, y: usize) -> Option<f32> {
        let (max_x, max_y) = placement_range(image, plan)?;
        if x > max_x || y > max_y {
            return None;
        }
        Some(Self::score_unchecked(image, plan, x, y))
    }

    fn score_map(image: ImageView<'_, u8>, plan: &Self::Plan) -> Option<ScoreMap> {
        let (max_x, max_y) = placement_range(image, plan)?;
        let width = max_x + 1;
        let height = max_y + 1;
        let mut scores = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                scores.push(Self::score_unchecked(image, plan, x, y));
            }
        }
        Some(ScoreMap::new(width, height, scores))
    }
}
