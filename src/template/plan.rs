//! Template plan precomputation for zero-mean normalized correlation.

use crate::image::ImageView;
use crate::util::{BoardError, BoardResult};

/// Precomputed zero-mean buffer and energy for a template.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    t_prime: Vec<f32>,
    var_t: f64,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    ///
    /// Fails with [`BoardError::DegenerateTemplate`] for flat templates, which
    /// cannot be normalized.
    pub fn from_view(tpl: ImageView<'_, u8>) -> BoardResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .ok_or(BoardError::InvalidDimensions { width, height })?;

        let mut pixels = Vec::with_capacity(count);
        for y in 0..height {
            let row = tpl.row(y).ok_or(BoardError::BufferTooSmall {
                needed: (y + 1) * tpl.stride(),
                got: y * tpl.stride(),
            })?;
            pixels.extend(row.iter().map(|&v| f64::from(v)));
        }

        let mean = pixels.iter().sum::<f64>() / count as f64;
        let var_t: f64 = pixels.iter().map(|v| (v - mean) * (v - mean)).sum();
        if var_t <= 1e-8 {
            return Err(BoardError::DegenerateTemplate {
                reason: "zero variance",
            });
        }

        let t_prime = pixels.iter().map(|v| (v - mean) as f32).collect();
        Ok(Self {
            width,
            height,
            t_prime,
            var_t,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the zero-mean template buffer in row-major order.
    pub fn t_prime(&self) -> &[f32] {
        &self.t_prime
    }

    /// Returns the sum of squared zero-mean values.
    pub fn var_t(&self) -> f64 {
        self.var_t
    }
}

#[cfg(test)]
mod tests {
    use super::TemplatePlan;
    use crate::image::ImageView;
    use crate::util::BoardError;

    #[test]
    fn plan_is_zero_mean() {
        let data = [10u8, 20, 30, 40];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        let plan = TemplatePlan::from_view(view).unwrap();
        let sum: f32 = plan.t_prime().iter().sum();
        assert!(sum.abs() < 1e-4);
        assert!((plan.var_t() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn flat_template_is_rejected() {
        let data = [7u8; 9];
        let view = ImageView::from_slice(&data, 3, 3).unwrap();
        assert_eq!(
            TemplatePlan::from_view(view).err(),
            Some(BoardError::DegenerateTemplate {
                reason: "zero variance"
            })
        );
    }
}
