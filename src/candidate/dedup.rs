//! Proximity deduplication of detections.

use crate::geometry::Point;

/// Keeps points that are at least `radius` away from every point kept so far.
///
/// Points are visited in the order given (scan order for raw hits), so the
/// first-scanned hit of a cluster wins even when a later hit scores higher.
/// O(n²) in the number of kept points.
pub fn dedup_in_order<T, F>(items: impl IntoIterator<Item = T>, radius: f32, point: F) -> Vec<T>
where
    F: Fn(&T) -> Point,
{
    let mut kept: Vec<T> = Vec::new();
    for item in items {
        let p = point(&item);
        if kept.iter().any(|k| point(k).distance(p) < radius) {
            continue;
        }
        kept.push(item);
    }
    kept
}

/// Drops every candidate lying closer than `radius` to any point in `guards`.
pub fn exclude_near<T, F>(candidates: Vec<T>, guards: &[Point], radius: f32, point: F) -> Vec<T>
where
    F: Fn(&T) -> Point,
{
    candidates
        .into_iter()
        .filter(|c| {
            let p = point(c);
            guards.iter().all(|g| g.distance(p) >= radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{dedup_in_order, exclude_near};
    use crate::geometry::Point;

    #[test]
    fn first_scanned_point_wins() {
        // The second point would score higher in a confidence-ordered NMS, but
        // scan order keeps the first.
        let hits = vec![(Point::new(10, 10), 0.8f32), (Point::new(12, 10), 0.99)];
        let kept = dedup_in_order(hits, 40.0, |h| h.0);
        assert_eq!(kept, vec![(Point::new(10, 10), 0.8)]);
    }

    #[test]
    fn radius_is_exclusive() {
        let pts = vec![Point::new(0, 0), Point::new(40, 0), Point::new(79, 0)];
        let kept = dedup_in_order(pts, 40.0, |p| *p);
        assert_eq!(kept, vec![Point::new(0, 0), Point::new(40, 0)]);
    }

    #[test]
    fn exclusion_drops_only_close_candidates() {
        let guards = [Point::new(100, 100)];
        let candidates = vec![Point::new(120, 110), Point::new(140, 100), Point::new(10, 10)];
        let kept = exclude_near(candidates, &guards, 35.0, |p| *p);
        assert_eq!(kept, vec![Point::new(140, 100), Point::new(10, 10)]);
    }
}
