use std::str::FromStr;

use crate::error::{ConfigError, LinkrouteError};
use crate::math::{translated, unit_direction, Point2};

/// A distance along a link, as written in a label or marker definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathPosition {
    /// `"25%"`: a percentage of the link's length.
    Percent(f64),
    /// `"20px"`: an absolute distance in pixels.
    Pixels(f64),
    /// A bare number: a fraction of the length when within `[-1, 1]`,
    /// otherwise pixels.
    Value(f64),
}

impl PathPosition {
    /// Resolves the position to a distance from the start of a path of
    /// `length`.
    ///
    /// Negative distances count back from the end; the result is clamped to
    /// `[0, length]`.
    #[must_use]
    pub fn resolve(self, length: f64) -> f64 {
        let distance = match self {
            Self::Percent(p) => p / 100.0 * length,
            Self::Pixels(px) => px,
            Self::Value(v) if (-1.0..=1.0).contains(&v) => v * length,
            Self::Value(v) => v,
        };
        let distance = if distance < 0.0 {
            length + distance
        } else {
            distance
        };
        distance.clamp(0.0, length.max(0.0))
    }
}

impl FromStr for PathPosition {
    type Err = LinkrouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ConfigError::InvalidPosition(s.to_owned());
        let parse = |number: &str| number.trim().parse::<f64>().map_err(|_| invalid());
        let position = if let Some(number) = s.strip_suffix('%') {
            Self::Percent(parse(number)?)
        } else if let Some(number) = s.strip_suffix("px") {
            Self::Pixels(parse(number)?)
        } else {
            Self::Value(parse(s)?)
        };
        Ok(position)
    }
}

/// Placement of a label or marker relative to a link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelGeometry {
    pub position: PathPosition,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl LabelGeometry {
    #[must_use]
    pub fn new(position: PathPosition, offset_x: f64, offset_y: f64) -> Self {
        Self {
            position,
            offset_x,
            offset_y,
        }
    }
}

/// Total length of the polyline through `points`.
#[must_use]
pub fn polyline_length(points: &[Point2]) -> f64 {
    points
        .windows(2)
        .map(|seg| nalgebra::distance(&seg[0], &seg[1]))
        .sum()
}

/// The point `distance` along the polyline through `points`.
///
/// Distances past the end yield the last point; an empty polyline yields
/// `None`.
#[must_use]
pub fn point_along(points: &[Point2], distance: f64) -> Option<Point2> {
    let mut remaining = distance;
    for seg in points.windows(2) {
        let len = nalgebra::distance(&seg[0], &seg[1]);
        if remaining <= len {
            return Some(translated(
                &seg[0],
                &unit_direction(&seg[0], &seg[1]),
                remaining,
            ));
        }
        remaining -= len;
    }
    points.last().copied()
}
