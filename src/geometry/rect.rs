use crate::error::{GeometryError, Result};
use crate::math::{Axis, Point2};

/// An edge of a [`Rect`].
///
/// The discriminants match the side codes used by diagram editors
/// (`0 = left`, `1 = top`, `2 = right`, `3 = bottom`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left = 0,
    Top = 1,
    Right = 2,
    Bottom = 3,
}

impl Side {
    /// Returns the side code.
    #[must_use]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Returns the axis the side's outward normal lies on.
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::X,
            Self::Top | Self::Bottom => Axis::Y,
        }
    }

    /// Returns `true` for the sides facing decreasing coordinates (`Left`, `Top`).
    #[must_use]
    pub fn is_leading(self) -> bool {
        matches!(self, Self::Left | Self::Top)
    }

    /// Returns the side on `axis`, facing decreasing coordinates when `leading`.
    #[must_use]
    pub fn facing(axis: Axis, leading: bool) -> Self {
        match (axis, leading) {
            (Axis::X, true) => Self::Left,
            (Axis::X, false) => Self::Right,
            (Axis::Y, true) => Self::Top,
            (Axis::Y, false) => Self::Bottom,
        }
    }

    /// Returns the opposite side.
    #[must_use]
    pub fn opposite(self) -> Self {
        Self::facing(self.axis(), !self.is_leading())
    }
}

/// An axis-aligned rectangle: top-left corner plus non-negative extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is not finite or the size is negative.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return Err(GeometryError::NonFinite("rectangle").into());
        }
        if width < 0.0 || height < 0.0 {
            return Err(GeometryError::NegativeExtent { width, height }.into());
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Creates a rectangle from its four edge coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if `right < left` or `bottom < top`.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self> {
        Self::new(left, top, right - left, bottom - top)
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the low edge along `axis` (`left` for X, `top` for Y).
    #[must_use]
    pub fn min(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.left(),
            Axis::Y => self.top(),
        }
    }

    /// Returns the high edge along `axis` (`right` for X, `bottom` for Y).
    #[must_use]
    pub fn max(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.right(),
            Axis::Y => self.bottom(),
        }
    }

    /// Returns the edge coordinate of `side`.
    #[must_use]
    pub fn edge(&self, side: Side) -> f64 {
        if side.is_leading() {
            self.min(side.axis())
        } else {
            self.max(side.axis())
        }
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns the midpoint of the edge on `side`.
    #[must_use]
    pub fn edge_midpoint(&self, side: Side) -> Point2 {
        side.axis().with(&self.center(), self.edge(side))
    }

    /// Euclidean distance from `p` to the rectangle, zero inside or on the border.
    #[must_use]
    pub fn distance(&self, p: &Point2) -> f64 {
        let dx = (self.left() - p.x).max(p.x - self.right()).max(0.0);
        let dy = (self.top() - p.y).max(p.y - self.bottom()).max(0.0);
        dx.hypot(dy)
    }

    /// Tests the segment `a → b` against the open interior of the rectangle.
    ///
    /// Returns the side through which the segment enters. Grazing an edge or
    /// stopping on the border is not an intersection. A segment that starts
    /// inside reports the side facing its origin along its dominant axis.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn intersect_side(&self, a: &Point2, b: &Point2) -> Option<Side> {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }

        // Liang-Barsky clipping; `p < 0` marks the entering boundary.
        let clips = [
            (-dx, a.x - self.left(), Side::Left),
            (dx, self.right() - a.x, Side::Right),
            (-dy, a.y - self.top(), Side::Top),
            (dy, self.bottom() - a.y, Side::Bottom),
        ];
        let mut t_enter = 0.0;
        let mut t_exit = 1.0;
        let mut entered = None;
        for (p, q, side) in clips {
            if p == 0.0 {
                if q <= 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t_enter {
                    t_enter = r;
                    entered = Some(side);
                }
            } else if r < t_exit {
                t_exit = r;
            }
        }
        if t_enter >= t_exit {
            return None;
        }

        entered.or_else(|| {
            Some(if dx.abs() >= dy.abs() {
                Side::facing(Axis::X, dx > 0.0)
            } else {
                Side::facing(Axis::Y, dy > 0.0)
            })
        })
    }

    /// Returns `true` if the segment `a → b` crosses the rectangle's interior.
    #[must_use]
    pub fn intersects_segment(&self, a: &Point2, b: &Point2) -> bool {
        self.intersect_side(a, b).is_some()
    }
}
