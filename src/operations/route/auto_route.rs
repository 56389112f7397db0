use tracing::{debug, trace, warn};

use crate::error::{OperationError, Result};
use crate::geometry::{find_channel, Channel, Rect, Side};
use crate::math::{translated, unit_direction, Axis, Direction, Point2};

use super::RouteConfig;

/// Maximum number of detours taken before the router gives up and returns
/// the path as it stands.
pub const MAX_DETOURS: usize = 20;

/// Pushes the segments of an orthogonal path out of the obstacles they cross.
///
/// # Algorithm
///
/// Walking the path segment by segment:
/// 1. Find the nearest obstacle the segment crosses (the source box is
///    ignored on the first segment, the target box on the last).
/// 2. Look up the free channel beside the struck edge and a candidate detour
///    point in its middle.
/// 3. Pick the side to go around on from the overall route direction and
///    compute how far the path must shift to reach the channel there.
/// 4. Either splice in the detour point and shift the following segment, or
///    just shift the current segment when the detour is unnecessary.
///
/// The first and last points never move: shifting an end segment splits off
/// a short stub first. The walk stops after [`MAX_DETOURS`] detours, so the
/// result may still cross an obstacle in pathological layouts.
#[derive(Debug)]
pub struct AutoRoute<'a> {
    container: Rect,
    boxes: &'a [Rect],
    source: usize,
    target: usize,
    config: RouteConfig,
}

impl<'a> AutoRoute<'a> {
    /// Creates a new router over `boxes`, laid out inside `container`.
    ///
    /// `source` and `target` index the boxes of the linked entities.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if there are at least two boxes
    /// and `source` or `target` is out of range.
    pub fn new(
        container: Rect,
        boxes: &'a [Rect],
        source: usize,
        target: usize,
        config: RouteConfig,
    ) -> Result<Self> {
        if boxes.len() >= 2 && (source >= boxes.len() || target >= boxes.len()) {
            return Err(OperationError::InvalidInput(format!(
                "terminal box index out of range: source = {source}, target = {target}, boxes = {}",
                boxes.len()
            ))
            .into());
        }
        Ok(Self {
            container,
            boxes,
            source,
            target,
            config,
        })
    }

    /// Reroutes `points` in place. Does nothing with fewer than two boxes.
    #[allow(clippy::float_cmp)]
    pub fn execute(&self, points: &mut Vec<Point2>) {
        if self.boxes.len() < 2 || points.len() < 2 {
            return;
        }

        let mut detours = 0;
        let mut i = 0;
        while i + 1 < points.len() {
            if points[i] == points[i + 1] {
                i += 1;
                continue;
            }
            let Some((index, side)) = self.first_intersection(points, i) else {
                i += 1;
                continue;
            };
            if detours == MAX_DETOURS {
                warn!(
                    segment = i,
                    obstacle = index,
                    "detour limit reached, leaving route unresolved"
                );
                return;
            }
            detours += 1;
            debug!(segment = i, obstacle = index, ?side, "segment crosses obstacle");

            let (candidate, d) = self.plan_detour(points, i, index, side);
            match candidate {
                Some(pt) if pt != points[i] => {
                    trace!(x = pt.x, y = pt.y, d, "splicing detour point");
                    points.insert(i + 1, pt);
                    self.move_segment(points, i + 1, d);
                    i += 1;
                }
                _ => self.move_segment(points, i, d),
            }
            i += 1;
        }
    }

    /// Finds the obstacle segment `i` runs into first.
    ///
    /// Among several hits, the box closest to the segment's start wins.
    fn first_intersection(&self, points: &[Point2], i: usize) -> Option<(usize, Side)> {
        let last_segment = points.len() - 2;
        let (a, b) = (&points[i], &points[i + 1]);
        let mut best: Option<(usize, Side, f64)> = None;
        for (j, rect) in self.boxes.iter().enumerate() {
            if (i == 0 && j == self.source) || (i == last_segment && j == self.target) {
                continue;
            }
            let Some(side) = rect.intersect_side(a, b) else {
                continue;
            };
            let distance = rect.distance(a);
            let closer = match best {
                Some((_, _, nearest)) => distance < nearest,
                None => true,
            };
            if closer {
                best = Some((j, side, distance));
            }
        }
        best.map(|(j, side, _)| (j, side))
    }

    /// Returns `true` if any segment of `path` crosses any box.
    fn has_intersection(&self, path: &[Point2]) -> bool {
        path.windows(2).any(|seg| {
            self.boxes
                .iter()
                .any(|rect| rect.intersects_segment(&seg[0], &seg[1]))
        })
    }

    fn channel(&self, index: usize, side: Side) -> Channel {
        find_channel(
            &self.container,
            index,
            self.boxes,
            side,
            self.config.max_channel_width,
        )
    }

    /// Computes the detour around `boxes[index]` for segment `i`, struck on `side`.
    ///
    /// Returns the detour point, if one is needed, and the shift to apply
    /// across the struck axis.
    #[allow(clippy::float_cmp)]
    fn plan_detour(
        &self,
        points: &[Point2],
        i: usize,
        index: usize,
        side: Side,
    ) -> (Option<Point2>, f64) {
        let axis = side.axis();
        let cross = axis.other();
        let obstacle = &self.boxes[index];
        let channel = self.channel(index, side);
        let current = points[i];
        let candidate = axis.with(&current, channel.mid(axis));

        let tendency = route_tendency(points, &candidate, obstacle, cross);
        let around = self.channel(index, Side::facing(cross, tendency < 0.0));

        // Reuse an adjacent run that already lies in the channel.
        let reusable = |a: usize, b: usize| {
            let c = cross.of(&points[a]);
            cross.of(&points[b]) == c && around.contains(cross, c)
        };
        let target = if i > 1 && reusable(i - 2, i - 1) {
            cross.of(&points[i - 1])
        } else if i + 3 < points.len() && reusable(i + 2, i + 3) {
            cross.of(&points[i + 2])
        } else {
            around.mid(cross)
        };
        let d = target - cross.of(&candidate);

        let advances = if side.is_leading() {
            axis.of(&candidate) > axis.of(&current)
        } else {
            axis.of(&candidate) < axis.of(&current)
        };
        if !advances {
            return (None, d);
        }
        if i > 0 {
            let shifted = [
                current,
                cross.shifted(&current, d),
                cross.shifted(&candidate, d),
            ];
            if !self.has_intersection(&shifted) {
                return (None, d);
            }
        }
        (Some(candidate), d)
    }

    /// Shifts segment `i` by `d` across its own direction.
    ///
    /// End segments are first split so the fixed endpoints stay in place;
    /// collinear neighbours are split off with clone points so only the
    /// segment itself moves.
    #[allow(clippy::float_cmp)]
    fn move_segment(&self, points: &mut Vec<Point2>, i: usize, d: f64) {
        let last = points.len() - 1;
        if i == 0 {
            let stub = stub_point(&points[0], &points[1], self.config.min_buffer);
            trace!(x = stub.x, y = stub.y, "splitting start stub");
            points.insert(1, stub);
            self.move_segment(points, 1, d);
            return;
        }
        if i == last - 1 {
            let stub = stub_point(&points[last], &points[last - 1], self.config.min_buffer);
            trace!(x = stub.x, y = stub.y, "splitting end stub");
            points.insert(last, stub);
            self.move_segment(points, i, d);
            return;
        }

        // A horizontal run moves along y, a vertical one along x.
        let axis = if points[i].y == points[i + 1].y {
            Axis::Y
        } else {
            Axis::X
        };
        let mut i = i;
        if axis.of(&points[i - 1]) == axis.of(&points[i]) {
            points.insert(i + 1, points[i]);
            i += 1;
        }
        if i + 2 < points.len() && axis.of(&points[i + 1]) == axis.of(&points[i + 2]) {
            points.insert(i + 1, points[i + 1]);
        }
        *axis.of_mut(&mut points[i]) += d;
        *axis.of_mut(&mut points[i + 1]) += d;
    }
}

/// The point `min(padding, |other - fixed| / 2)` away from `fixed` towards `other`.
fn stub_point(fixed: &Point2, other: &Point2, padding: f64) -> Point2 {
    let len = nalgebra::distance(fixed, other);
    translated(fixed, &unit_direction(fixed, other), padding.min(len / 2.0))
}

/// Decides which way to go around `obstacle` along `axis`.
///
/// Negative means towards decreasing coordinates. Prefers the direction from
/// the detour point to the route's end, then the opposite of the overall
/// route direction, then the side of the obstacle's center the point is on.
#[allow(clippy::float_cmp)]
fn route_tendency(points: &[Point2], candidate: &Point2, obstacle: &Rect, axis: Axis) -> f64 {
    let (first, last) = (&points[0], &points[points.len() - 1]);
    let towards_end = Direction::between(candidate, last).component(axis);
    if towards_end != 0.0 {
        return towards_end;
    }
    let overall = -Direction::between(first, last).component(axis);
    if overall != 0.0 {
        return overall;
    }
    if axis.of(candidate) < axis.of(&obstacle.center()) {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn r(left: f64, top: f64, right: f64, bottom: f64) -> Rect {
        Rect::from_edges(left, top, right, bottom).unwrap()
    }

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn container() -> Rect {
        r(-100.0, -100.0, 240.0, 200.0)
    }

    /// Source box, an obstacle straddling x = 50, target box.
    fn scene() -> Vec<Rect> {
        vec![
            r(-40.0, -20.0, 0.0, 20.0),
            r(40.0, -10.0, 60.0, 60.0),
            r(100.0, 30.0, 140.0, 70.0),
        ]
    }

    fn crosses(path: &[Point2], rect: &Rect) -> bool {
        path.windows(2).any(|w| rect.intersects_segment(&w[0], &w[1]))
    }

    #[test]
    fn new_rejects_out_of_range_terminals() {
        let boxes = scene();
        assert!(AutoRoute::new(container(), &boxes, 0, 3, RouteConfig::default()).is_err());
        assert!(AutoRoute::new(container(), &boxes, 5, 2, RouteConfig::default()).is_err());
        assert!(AutoRoute::new(container(), &boxes[..1], 0, 7, RouteConfig::default()).is_ok());
    }

    #[test]
    fn detours_around_obstacle_and_continues_after_splice() {
        let boxes = scene();
        let router = AutoRoute::new(container(), &boxes, 0, 2, RouteConfig::default()).unwrap();
        let mut path = pts(&[(0.0, 0.0), (50.0, 0.0), (50.0, 50.0), (100.0, 50.0)]);
        router.execute(&mut path);

        assert_eq!(
            path,
            pts(&[
                (0.0, 0.0),
                (20.0, 0.0),
                (20.0, 110.0),
                (80.0, 110.0),
                (80.0, 50.0),
                (100.0, 50.0),
            ])
        );
        for rect in &boxes {
            assert!(!crosses(&path, rect), "path {path:?} crosses {rect:?}");
        }
    }

    #[test]
    fn clear_path_is_untouched() {
        let boxes = vec![r(-40.0, -20.0, 0.0, 20.0), r(100.0, 30.0, 140.0, 70.0)];
        let router = AutoRoute::new(container(), &boxes, 0, 1, RouteConfig::default()).unwrap();
        let original = pts(&[(0.0, 0.0), (50.0, 0.0), (50.0, 50.0), (100.0, 50.0)]);
        let mut path = original.clone();
        router.execute(&mut path);
        assert_eq!(path, original);
    }

    #[test]
    fn fewer_than_two_boxes_is_noop() {
        let boxes = vec![r(40.0, -10.0, 60.0, 60.0)];
        let router = AutoRoute::new(container(), &boxes, 0, 0, RouteConfig::default()).unwrap();
        let original = pts(&[(0.0, 0.0), (100.0, 0.0)]);
        let mut path = original.clone();
        router.execute(&mut path);
        assert_eq!(path, original);
    }

    #[test]
    fn first_intersection_skips_terminal_boxes_and_prefers_nearest() {
        let boxes = vec![
            r(-40.0, -20.0, 10.0, 20.0),
            r(70.0, -10.0, 80.0, 10.0),
            r(30.0, -10.0, 40.0, 10.0),
            r(90.0, -20.0, 130.0, 20.0),
        ];
        let router = AutoRoute::new(container(), &boxes, 0, 3, RouteConfig::default()).unwrap();
        let path = pts(&[(0.0, 0.0), (100.0, 0.0)]);
        assert_eq!(router.first_intersection(&path, 0), Some((2, Side::Left)));
    }

    #[test]
    fn move_segment_splits_stubs_at_min_buffer() {
        let boxes = scene();
        let router = AutoRoute::new(container(), &boxes, 0, 2, RouteConfig::default()).unwrap();
        let mut path = pts(&[(0.0, 0.0), (100.0, 0.0)]);
        router.move_segment(&mut path, 0, 30.0);
        assert_eq!(
            path,
            pts(&[
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 30.0),
                (90.0, 30.0),
                (90.0, 0.0),
                (100.0, 0.0),
            ])
        );
    }

    #[test]
    fn move_segment_stub_is_half_of_short_segment() {
        let boxes = scene();
        let router = AutoRoute::new(container(), &boxes, 0, 2, RouteConfig::default()).unwrap();
        let mut path = pts(&[(0.0, 0.0), (0.0, 12.0)]);
        router.move_segment(&mut path, 0, 5.0);
        assert_eq!(path[0], Point2::new(0.0, 0.0));
        assert_relative_eq!(nalgebra::distance(&path[0], &path[1]), 6.0);
        assert_eq!(path[path.len() - 1], Point2::new(0.0, 12.0));
    }

    #[test]
    fn move_interior_segment_keeps_neighbors_orthogonal() {
        let boxes = scene();
        let router = AutoRoute::new(container(), &boxes, 0, 2, RouteConfig::default()).unwrap();
        let mut path = pts(&[(0.0, 0.0), (50.0, 0.0), (50.0, 50.0), (100.0, 50.0)]);
        router.move_segment(&mut path, 1, 20.0);
        assert_eq!(
            path,
            pts(&[(0.0, 0.0), (70.0, 0.0), (70.0, 50.0), (100.0, 50.0)])
        );
    }

    #[test]
    fn route_tendency_fallbacks() {
        let obstacle = r(40.0, -10.0, 60.0, 60.0);
        // Towards the end.
        let path = pts(&[(0.0, 0.0), (100.0, 50.0)]);
        let t = route_tendency(&path, &Point2::new(20.0, 0.0), &obstacle, Axis::Y);
        assert_relative_eq!(t, 1.0);
        // Candidate level with the end: against the overall direction.
        let path = pts(&[(0.0, 80.0), (100.0, 0.0)]);
        let t = route_tendency(&path, &Point2::new(20.0, 0.0), &obstacle, Axis::Y);
        assert_relative_eq!(t, 1.0);
        // Everything level: the obstacle's center decides.
        let path = pts(&[(0.0, 0.0), (100.0, 0.0)]);
        let t = route_tendency(&path, &Point2::new(20.0, 0.0), &obstacle, Axis::Y);
        assert_relative_eq!(t, -1.0);
    }

    #[test]
    fn terminates_with_overlapping_and_degenerate_boxes() {
        let boxes = vec![
            r(-40.0, -20.0, 0.0, 20.0),
            r(10.0, -50.0, 90.0, 50.0),
            r(20.0, -60.0, 80.0, 60.0),
            r(30.0, -70.0, 70.0, 70.0),
            r(50.0, 0.0, 50.0, 0.0),
            r(45.0, -200.0, 55.0, 200.0),
            r(100.0, -20.0, 140.0, 20.0),
        ];
        let router = AutoRoute::new(container(), &boxes, 0, 6, RouteConfig::default()).unwrap();
        let mut path = pts(&[(0.0, 0.0), (100.0, 0.0)]);
        router.execute(&mut path);
        assert_eq!(path[0], Point2::new(0.0, 0.0));
        assert_eq!(path[path.len() - 1], Point2::new(100.0, 0.0));
        assert!(path.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
}
