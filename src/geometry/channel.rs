use crate::math::Axis;

use super::rect::{Rect, Side};

/// An open rectangular strip adjacent to one edge of an obstacle.
///
/// `horizontal` is `true` for channels found above or below an obstacle: the
/// channel is a horizontal band and a path may slide through it along `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub horizontal: bool,
}

impl Channel {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Returns `(min, max)` of the channel along `axis`.
    #[must_use]
    pub fn span(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.left, self.right),
            Axis::Y => (self.top, self.bottom),
        }
    }

    /// Returns the channel's center coordinate along `axis`.
    #[must_use]
    pub fn mid(&self, axis: Axis) -> f64 {
        let (lo, hi) = self.span(axis);
        (lo + hi) / 2.0
    }

    /// Returns `true` if `value` lies strictly inside the channel along `axis`.
    #[must_use]
    pub fn contains(&self, axis: Axis, value: f64) -> bool {
        let (lo, hi) = self.span(axis);
        value > lo && value < hi
    }
}

/// Finds the free channel next to `side` of `boxes[index]`.
///
/// Along the side's normal the channel runs from the struck edge to the
/// nearest edge of another box lying entirely beyond it, or to the
/// `container` when there is none, never wider than `max_width`. Across it
/// the channel is bounded by the nearest boxes overlapping that span on
/// either side of the edge midpoint, else by the container.
#[must_use]
pub fn find_channel(
    container: &Rect,
    index: usize,
    boxes: &[Rect],
    side: Side,
    max_width: f64,
) -> Channel {
    let Some(struck) = boxes.get(index) else {
        return channel_from_spans(
            side.axis(),
            (container.min(side.axis()), container.max(side.axis())),
            (
                container.min(side.axis().other()),
                container.max(side.axis().other()),
            ),
        );
    };
    let others = || {
        boxes
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != index)
            .map(|(_, b)| b)
    };

    let axis = side.axis();
    let cross = axis.other();
    let edge = struck.edge(side);

    let far = if side.is_leading() {
        let neighbor = others()
            .map(|b| b.max(axis))
            .filter(|&v| v < edge)
            .reduce(f64::max);
        let far = neighbor.unwrap_or_else(|| container.min(axis));
        far.max(edge - max_width).min(edge)
    } else {
        let neighbor = others()
            .map(|b| b.min(axis))
            .filter(|&v| v > edge)
            .reduce(f64::min);
        let far = neighbor.unwrap_or_else(|| container.max(axis));
        far.min(edge + max_width).max(edge)
    };
    let (lo, hi) = if far < edge { (far, edge) } else { (edge, far) };

    let reference = cross.of(&struck.edge_midpoint(side));
    let overlapping = || others().filter(move |b| b.max(axis) > lo && b.min(axis) < hi);
    let cross_lo = overlapping()
        .map(|b| b.max(cross))
        .filter(|&v| v < reference)
        .reduce(f64::max)
        .unwrap_or_else(|| container.min(cross));
    let cross_hi = overlapping()
        .map(|b| b.min(cross))
        .filter(|&v| v > reference)
        .reduce(f64::min)
        .unwrap_or_else(|| container.max(cross));

    channel_from_spans(axis, (lo, hi), (cross_lo, cross_hi))
}

fn channel_from_spans(axis: Axis, along: (f64, f64), across: (f64, f64)) -> Channel {
    match axis {
        Axis::X => Channel {
            left: along.0,
            right: along.1,
            top: across.0,
            bottom: across.1,
            horizontal: false,
        },
        Axis::Y => Channel {
            left: across.0,
            right: across.1,
            top: along.0,
            bottom: along.1,
            horizontal: true,
        },
    }
}
