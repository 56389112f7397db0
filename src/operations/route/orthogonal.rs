use crate::math::{axis_mask, midpoint, translated, unit_direction, Point2, Vector2};

/// Builds the initial axis-aligned route between two terminals.
///
/// Obstacles are not considered. The route leaves `start` along
/// `start_normal`, arrives at `end` against `end_normal`, and keeps at least
/// `buffer` clearance wherever it has to double back behind a terminal.
///
/// # Algorithm
///
/// The relation between the two normals decides the turn layout:
/// 1. **Perpendicular**: one bend when the route already flows with both
///    normals, otherwise two extra turns pushed out behind the offending end.
/// 2. **Same direction**: one extra turn behind whichever end faces against
///    the flow.
/// 3. **Opposite**: a midpoint turn, bracketed by buffer turns when the
///    terminals face away from each other.
#[derive(Debug, Clone)]
pub struct OrthogonalRoute {
    start: Point2,
    end: Point2,
    start_normal: Vector2,
    end_normal: Vector2,
    buffer: f64,
}

/// Turn coordinates accumulated while alternating between axes.
struct Turns {
    coords: Vec<f64>,
    horizontal: bool,
}

impl Turns {
    fn push(&mut self, coord: f64) {
        self.coords.push(coord);
        self.horizontal = !self.horizontal;
    }

    /// The coordinate of `p` on the axis of the next turn.
    fn on_axis(&self, p: &Point2) -> f64 {
        if self.horizontal {
            p.y
        } else {
            p.x
        }
    }
}

impl OrthogonalRoute {
    /// Creates a new route builder.
    #[must_use]
    pub fn new(
        start: Point2,
        end: Point2,
        start_normal: Vector2,
        end_normal: Vector2,
        buffer: f64,
    ) -> Self {
        Self {
            start,
            end,
            start_normal,
            end_normal,
            buffer,
        }
    }

    /// Returns `true` when the route leaves `start` horizontally.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn exits_horizontally(&self) -> bool {
        self.start_normal.x != 0.0
    }

    /// Computes the turn coordinates of the route.
    ///
    /// The first entry is the start's coordinate across its exit axis, the
    /// last is the end's coordinate on the final axis; every entry in between
    /// alternates between `y` (horizontal runs) and `x` (vertical runs).
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn turns(&self) -> Vec<f64> {
        let direction = unit_direction(&self.start, &self.end);
        let average = midpoint(&self.start, &self.end);
        let start_flow = self.start_normal.dot(&direction);
        let end_flow = self.end_normal.dot(&direction);
        let alignment = self.start_normal.dot(&self.end_normal);

        let horizontal = self.exits_horizontally();
        let mut turns = Turns {
            coords: vec![if horizontal { self.start.y } else { self.start.x }],
            horizontal: !horizontal,
        };

        if alignment == 0.0 {
            if start_flow < 0.0 || end_flow > 0.0 {
                let c = if start_flow < 0.0 {
                    self.start_offset()
                } else {
                    turns.on_axis(&average)
                };
                turns.push(c);
                let c = if end_flow > 0.0 {
                    self.end_offset()
                } else {
                    turns.on_axis(&average)
                };
                turns.push(c);
            }
        } else if alignment > 0.0 {
            let c = if start_flow < 0.0 {
                self.start_offset()
            } else {
                self.end_offset()
            };
            turns.push(c);
        } else {
            if start_flow < 0.0 {
                turns.push(self.start_offset());
            }
            let c = turns.on_axis(&average);
            turns.push(c);
            if end_flow > 0.0 {
                turns.push(self.end_offset());
            }
        }

        let last = turns.on_axis(&self.end);
        turns.push(last);
        turns.coords
    }

    /// Executes the builder, returning the route's points.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        expand_turns(
            &self.start,
            &self.end,
            &self.turns(),
            self.exits_horizontally(),
        )
    }

    fn start_offset(&self) -> f64 {
        buffer_offset(&self.start, &self.start_normal, self.buffer)
    }

    fn end_offset(&self) -> f64 {
        buffer_offset(&self.end, &self.end_normal, self.buffer)
    }
}

/// The coordinate `buffer` away from `p` along `normal`, on the normal's axis.
fn buffer_offset(p: &Point2, normal: &Vector2, buffer: f64) -> f64 {
    axis_mask(normal).dot(&translated(p, normal, buffer).coords)
}

/// Expands alternating turn coordinates into route points.
///
/// `coords` is the output of [`OrthogonalRoute::turns`]; `horizontal` tells
/// whether the first run is horizontal. The result starts at `start` and
/// ends at `end` exactly.
#[must_use]
pub fn expand_turns(start: &Point2, end: &Point2, coords: &[f64], horizontal: bool) -> Vec<Point2> {
    let mut points = Vec::with_capacity(coords.len() + 1);
    points.push(*start);
    let mut horizontal = horizontal;
    for pair in coords.windows(2) {
        horizontal = !horizontal;
        let (prev, current) = (pair[0], pair[1]);
        points.push(if horizontal {
            Point2::new(prev, current)
        } else {
            Point2::new(current, prev)
        });
    }
    points.push(*end);
    points
}
