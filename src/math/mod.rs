pub mod direction;

pub use direction::{Axis, Direction};

/// 2D point type. `y` grows downward (screen coordinates).
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Returns the point halfway between `a` and `b`.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    nalgebra::center(a, b)
}

/// Unit vector pointing from `from` towards `to`.
///
/// Coincident points yield the zero vector rather than NaN components.
#[must_use]
pub fn unit_direction(from: &Point2, to: &Point2) -> Vector2 {
    let delta = to - from;
    let len = delta.norm();
    if len > 0.0 {
        delta / len
    } else {
        Vector2::zeros()
    }
}

/// Squares each component of `v`, keeping only the axes `v` actually uses.
///
/// For a cardinal unit normal this is a 0/1 mask selecting its axis.
#[must_use]
pub fn axis_mask(v: &Vector2) -> Vector2 {
    v.component_mul(v)
}

/// Translates `p` by `v * scale`.
#[must_use]
pub fn translated(p: &Point2, v: &Vector2, scale: f64) -> Point2 {
    p + v * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_direction_normalizes() {
        let d = unit_direction(&Point2::new(0.0, 0.0), &Point2::new(3.0, 4.0));
        assert_relative_eq!(d.x, 0.6);
        assert_relative_eq!(d.y, 0.8);
    }

    #[test]
    fn unit_direction_of_coincident_points_is_zero() {
        let p = Point2::new(5.0, 5.0);
        assert_eq!(unit_direction(&p, &p), Vector2::zeros());
    }

    #[test]
    fn axis_mask_selects_normal_axis() {
        assert_eq!(axis_mask(&Vector2::new(-1.0, 0.0)), Vector2::new(1.0, 0.0));
        assert_eq!(axis_mask(&Vector2::new(0.0, 1.0)), Vector2::new(0.0, 1.0));
    }

    #[test]
    fn midpoint_and_translation() {
        let m = midpoint(&Point2::new(0.0, 0.0), &Point2::new(100.0, 50.0));
        assert_eq!(m, Point2::new(50.0, 25.0));
        let t = translated(&m, &Vector2::new(1.0, 0.0), 10.0);
        assert_eq!(t, Point2::new(60.0, 25.0));
    }
}
