//! Template search over grayscale planes.
//!
//! `find_matches` returns every deduplicated placement above a threshold and
//! `best_match` the single strongest placement. Neither fails: a template that
//! does not fit the image simply produces no detections.

use crate::candidate::dedup::dedup_in_order;
use crate::geometry::Point;
use crate::kernel::scalar::ZnccScalar;
use crate::kernel::{Kernel, ScoreMap};
use crate::template::Template;
use crate::trace::trace_detail;
use crate::ImageView;

/// A template placement that cleared the threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Top-left corner of the matched window.
    pub point: Point,
    /// Correlation score in `[-1, 1]`.
    pub score: f32,
    /// Name of the template that produced the hit.
    pub template: String,
}

/// Scan execution options shared by all searches of one analysis run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Use the row-parallel kernel when the `rayon` feature is enabled.
    pub parallel: bool,
}

/// Computes the full correlation map of `template` over `image`.
pub fn score_map(
    image: ImageView<'_, u8>,
    template: &Template,
    opts: SearchOptions,
) -> Option<ScoreMap> {
    #[cfg(feature = "rayon")]
    {
        if opts.parallel {
            return crate::kernel::rayon::zncc_score_map_par(image, template.plan());
        }
    }
    #[cfg(not(feature = "rayon"))]
    let _ = opts;
    ZnccScalar::score_map(image, template.plan())
}

/// Raw hits of `template` with score `>= threshold`, in scan order.
pub fn raw_hits(
    image: ImageView<'_, u8>,
    template: &Template,
    threshold: f32,
    opts: SearchOptions,
) -> Vec<Detection> {
    let Some(map) = score_map(image, template, opts) else {
        trace_detail!(
            "template_skipped",
            template = template.name(),
            tpl_width = template.width(),
            img_width = image.width()
        );
        return Vec::new();
    };
    map.hits(threshold)
        .map(|(x, y, score)| Detection {
            point: Point::new(x as i32, y as i32),
            score,
            template: template.name().to_owned(),
        })
        .collect()
}

/// Deduplicated detections of `template` above `threshold`.
///
/// Hits closer than `radius` pixels to an already accepted hit are dropped;
/// the earliest hit in scan order is the one kept.
pub fn find_matches(
    image: ImageView<'_, u8>,
    template: &Template,
    threshold: f32,
    radius: f32,
    opts: SearchOptions,
) -> Vec<Detection> {
    let hits = raw_hits(image, template, threshold, opts);
    dedup_in_order(hits, radius, |d| d.point)
}

/// Strongest placement of `template` anywhere in `image`.
pub fn best_match(
    image: ImageView<'_, u8>,
    template: &Template,
    opts: SearchOptions,
) -> Option<Detection> {
    let map = score_map(image, template, opts)?;
    let (x, y, score) = map.max_loc()?;
    Some(Detection {
        point: Point::new(x as i32, y as i32),
        score,
        template: template.name().to_owned(),
    })
}
