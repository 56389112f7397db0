use super::{Point2, Vector2};

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Returns the perpendicular axis.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Returns the component of `p` along this axis.
    #[must_use]
    pub fn of(self, p: &Point2) -> f64 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }

    /// Returns a mutable reference to the component of `p` along this axis.
    pub fn of_mut(self, p: &mut Point2) -> &mut f64 {
        match self {
            Self::X => &mut p.x,
            Self::Y => &mut p.y,
        }
    }

    /// Returns `p` with its component along this axis replaced by `value`.
    #[must_use]
    pub fn with(self, p: &Point2, value: f64) -> Point2 {
        let mut out = *p;
        *self.of_mut(&mut out) = value;
        out
    }

    /// Returns `p` moved by `d` along this axis.
    #[must_use]
    pub fn shifted(self, p: &Point2, d: f64) -> Point2 {
        self.with(p, self.of(p) + d)
    }
}

/// One of the eight compass directions, in screen coordinates (`N` is `-y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// Returns the (non-normalized) vector of this direction, components in `{-1, 0, 1}`.
    #[must_use]
    pub fn vector(self) -> Vector2 {
        let (x, y) = match self {
            Self::North => (0.0, -1.0),
            Self::South => (0.0, 1.0),
            Self::East => (1.0, 0.0),
            Self::West => (-1.0, 0.0),
            Self::NorthEast => (1.0, -1.0),
            Self::NorthWest => (-1.0, -1.0),
            Self::SouthEast => (1.0, 1.0),
            Self::SouthWest => (-1.0, 1.0),
        };
        Vector2::new(x, y)
    }

    /// Returns the component of [`Self::vector`] along `axis`.
    #[must_use]
    pub fn component(self, axis: Axis) -> f64 {
        let v = self.vector();
        match axis {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::NorthEast => Self::SouthWest,
            Self::NorthWest => Self::SouthEast,
            Self::SouthEast => Self::NorthWest,
            Self::SouthWest => Self::NorthEast,
        }
    }

    /// Classifies `v` by the signs of its components. `None` for the zero vector.
    #[must_use]
    pub fn from_vector(v: &Vector2) -> Option<Self> {
        let sx = sign(v.x);
        let sy = sign(v.y);
        Self::ALL
            .into_iter()
            .find(|d| d.vector() == Vector2::new(sx, sy))
    }

    /// Classifies the direction from `from` to `to`.
    ///
    /// Points sharing an `x` are always vertical: `South` when `to` is below,
    /// `North` otherwise (coincident points included). Points sharing a `y`
    /// are `East` or `West`; everything else is a diagonal.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn between(from: &Point2, to: &Point2) -> Self {
        if from.x == to.x {
            if from.y < to.y {
                Self::South
            } else {
                Self::North
            }
        } else if from.y == to.y {
            if from.x < to.x {
                Self::East
            } else {
                Self::West
            }
        } else if from.x < to.x {
            if from.y < to.y {
                Self::SouthEast
            } else {
                Self::NorthEast
            }
        } else if from.y < to.y {
            Self::SouthWest
        } else {
            Self::NorthWest
        }
    }
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case((0.0, 0.0), (0.0, 10.0), Direction::South)]
    #[case((0.0, 0.0), (0.0, -10.0), Direction::North)]
    #[case((0.0, 0.0), (0.0, 0.0), Direction::North)]
    #[case((0.0, 0.0), (10.0, 0.0), Direction::East)]
    #[case((0.0, 0.0), (-10.0, 0.0), Direction::West)]
    #[case((0.0, 0.0), (10.0, 10.0), Direction::SouthEast)]
    #[case((0.0, 0.0), (10.0, -10.0), Direction::NorthEast)]
    #[case((0.0, 0.0), (-10.0, 10.0), Direction::SouthWest)]
    #[case((0.0, 0.0), (-10.0, -10.0), Direction::NorthWest)]
    fn between_classifies(
        #[case] from: (f64, f64),
        #[case] to: (f64, f64),
        #[case] expected: Direction,
    ) {
        let d = Direction::between(&Point2::new(from.0, from.1), &Point2::new(to.0, to.1));
        assert_eq!(d, expected);
    }

    #[test]
    fn from_vector_round_trips_every_direction() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_vector(&(d.vector() * 3.5)), Some(d));
        }
        assert_eq!(Direction::from_vector(&Vector2::zeros()), None);
    }

    #[test]
    fn opposite_negates_vector() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().vector(), -d.vector());
        }
    }

    #[test]
    fn axis_helpers() {
        let p = Point2::new(1.0, 2.0);
        assert!((Axis::X.of(&p) - 1.0).abs() < f64::EPSILON);
        assert_eq!(Axis::Y.with(&p, 7.0), Point2::new(1.0, 7.0));
        assert_eq!(Axis::X.shifted(&p, 4.0), Point2::new(5.0, 2.0));
        assert_eq!(Axis::X.other(), Axis::Y);
    }
}
