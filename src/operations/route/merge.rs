use crate::math::Point2;

/// Removes redundant points from an orthogonal polyline in place.
///
/// A point is dropped when the runs on both sides of it have the same
/// orientation (the three points are collinear, even when the path doubles
/// back) or when it duplicates a neighbour. Each removal re-checks the point
/// before it against the new neighbour, so a second call changes nothing.
/// The first and last points are always kept. Coordinates are compared
/// exactly.
pub fn merge_segments(points: &mut Vec<Point2>) {
    if points.len() < 3 {
        return;
    }
    let mut kept: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points.iter() {
        kept.push(p);
        while let [.., prev, mid, next] = kept.as_slice() {
            if !is_redundant(prev, mid, next) {
                break;
            }
            kept.remove(kept.len() - 2);
        }
    }
    *points = kept;
}

#[allow(clippy::float_cmp)]
fn is_redundant(prev: &Point2, mid: &Point2, next: &Point2) -> bool {
    mid == prev || mid == next || (prev.y == mid.y) == (mid.y == next.y)
}
