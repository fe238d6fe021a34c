//! Small numeric helpers shared by the geometry stages.

/// Returns the element at the lower quartile of an ascending slice.
///
/// Uses the index `len / 4` without interpolation.
pub(crate) fn lower_quartile(sorted: &[i32]) -> Option<i32> {
    sorted.get(sorted.len() / 4).copied()
}

/// Euclidean distance between two integer points.
pub(crate) fn euclidean(ax: i32, ay: i32, bx: i32, by: i32) -> f32 {
    let dx = (ax - bx) as f32;
    let dy = (ay - by) as f32;
    (dx * dx + dy * dy).sqrt()
}

/// Clamps a signed span `[start, end)` to `[0, limit)`.
///
/// Returns `None` when nothing of the span remains.
pub(crate) fn clamp_span(start: i32, end: i32, limit: usize) -> Option<(usize, usize)> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let lo = i64::from(start).clamp(0, limit);
    let hi = i64::from(end).clamp(0, limit);
    if lo >= hi {
        return None;
    }
    Some((lo as usize, hi as usize))
}
