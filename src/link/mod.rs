mod position;
mod style;

pub use position::{point_along, polyline_length, LabelGeometry, PathPosition};
pub use style::LinkStyle;

use std::cell::OnceCell;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::{ConfigError, LinkrouteError};
use crate::math::{midpoint, Direction, Point2, Vector2};
use crate::operations::route::{merge_segments, AutoRoute, OrthogonalRoute};
use crate::scene::ObstacleSet;

/// The geometric variant of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Straight line between the terminals.
    Direct,
    /// Cubic curve; see [`Link::control_points`].
    Bezier,
    /// Straight line styled as an entity-relation connector.
    EntityRelation,
    /// Orthogonal route, optionally avoiding obstacles.
    Manhattan,
}

impl LinkKind {
    /// Returns the style-sheet selector for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Bezier => "bezier",
            Self::EntityRelation => "entityRelations",
            Self::Manhattan => "manhattan",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkKind {
    type Err = LinkrouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(Self::Direct),
            "bezier" => Ok(Self::Bezier),
            "entityRelations" => Ok(Self::EntityRelation),
            "manhattan" => Ok(Self::Manhattan),
            other => Err(ConfigError::UnknownLinkType(other.to_owned()).into()),
        }
    }
}

/// An anchored end of a link: where it attaches and which way it leaves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Terminal {
    pub point: Point2,
    /// Exit normal, pointing away from the attached entity.
    pub normal: Vector2,
}

impl Terminal {
    #[must_use]
    pub fn new(point: Point2, normal: Vector2) -> Self {
        Self { point, normal }
    }

    /// Creates a terminal leaving in a compass direction.
    #[must_use]
    pub fn facing(point: Point2, direction: Direction) -> Self {
        Self::new(point, direction.vector())
    }
}

/// A decoration drawn at one end of a link, identified by name (e.g. `"arrow"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker {
    pub name: String,
}

impl Marker {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A connector between two terminals.
///
/// A link is a snapshot: terminals, style and obstacles are copied in at
/// construction. When anything moves, build a new link.
#[derive(Debug, Clone)]
pub struct Link {
    kind: LinkKind,
    start: Terminal,
    end: Terminal,
    start_marker: Option<Marker>,
    end_marker: Option<Marker>,
    style: LinkStyle,
    obstacles: Option<ObstacleSet>,
    length: OnceCell<f64>,
}

impl Link {
    /// Creates a link of the given kind.
    ///
    /// `kind` overrides the style's `type` selector, which is rewritten to
    /// match.
    #[must_use]
    pub fn new(kind: LinkKind, start: Terminal, end: Terminal, style: LinkStyle) -> Self {
        Self {
            kind,
            start,
            end,
            start_marker: None,
            end_marker: None,
            style: style.with_kind(kind),
            obstacles: None,
            length: OnceCell::new(),
        }
    }

    /// Creates a link of the kind named by `style.link_type`.
    ///
    /// An unsupported selector is logged and yields `None`.
    #[must_use]
    pub fn from_style(start: Terminal, end: Terminal, style: LinkStyle) -> Option<Self> {
        match style.kind() {
            Ok(kind) => Some(Self::new(kind, start, end, style)),
            Err(err) => {
                warn!(%err, "link route unavailable");
                None
            }
        }
    }

    /// Attaches start and end markers.
    #[must_use]
    pub fn with_markers(mut self, start: Option<Marker>, end: Option<Marker>) -> Self {
        self.start_marker = start;
        self.end_marker = end;
        self
    }

    /// Attaches the obstacles to avoid when the style enables auto-routing.
    #[must_use]
    pub fn with_obstacles(mut self, obstacles: ObstacleSet) -> Self {
        self.obstacles = Some(obstacles);
        self.length = OnceCell::new();
        self
    }

    #[must_use]
    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    #[must_use]
    pub fn start(&self) -> &Terminal {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Terminal {
        &self.end
    }

    #[must_use]
    pub fn start_marker(&self) -> Option<&Marker> {
        self.start_marker.as_ref()
    }

    #[must_use]
    pub fn end_marker(&self) -> Option<&Marker> {
        self.end_marker.as_ref()
    }

    #[must_use]
    pub fn style(&self) -> &LinkStyle {
        &self.style
    }

    /// Computes the points the renderer draws through.
    ///
    /// The first and last points are always the terminal points.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        match self.kind {
            LinkKind::Direct | LinkKind::Bezier | LinkKind::EntityRelation => {
                vec![self.start.point, self.end.point]
            }
            LinkKind::Manhattan => self.manhattan_points(),
        }
    }

    /// Returns the start and end control points of a Bezier link.
    ///
    /// Each control point sits on the midline between the terminals, reached
    /// by following that terminal's exit axis. `None` for other kinds.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn control_points(&self) -> Option<[Point2; 2]> {
        if self.kind != LinkKind::Bezier {
            return None;
        }
        let (s, e) = (self.start.point, self.end.point);
        let mid = midpoint(&s, &e);
        let control = |p: Point2, normal: &Vector2| {
            if normal.x == 0.0 {
                Point2::new(p.x, mid.y)
            } else {
                Point2::new(mid.x, p.y)
            }
        };
        Some([control(s, &self.start.normal), control(e, &self.end.normal)])
    }

    /// Total length of the link's polyline, computed once.
    #[must_use]
    pub fn length(&self) -> f64 {
        *self.length.get_or_init(|| polyline_length(&self.points()))
    }

    /// Anchor point of a label or marker placed along the link.
    #[must_use]
    pub fn relative_position(&self, geometry: &LabelGeometry) -> Point2 {
        let distance = geometry.position.resolve(self.length());
        let anchor = point_along(&self.points(), distance).unwrap_or(self.end.point);
        Point2::new(anchor.x + geometry.offset_x, anchor.y + geometry.offset_y)
    }

    fn manhattan_points(&self) -> Vec<Point2> {
        let mut points = OrthogonalRoute::new(
            self.start.point,
            self.end.point,
            self.start.normal,
            self.end.normal,
            self.style.min_buffer,
        )
        .execute();

        if self.style.auto_route {
            if let Some(obstacles) = &self.obstacles {
                merge_segments(&mut points);
                match AutoRoute::new(
                    obstacles.container,
                    &obstacles.boxes,
                    obstacles.source,
                    obstacles.target,
                    self.style.route_config(),
                ) {
                    Ok(router) => router.execute(&mut points),
                    Err(err) => warn!(%err, "skipping obstacle avoidance"),
                }
            }
        }
        merge_segments(&mut points);
        points
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Link({}, ({}, {}) -> ({}, {}))",
            self.kind, self.start.point.x, self.start.point.y, self.end.point.x, self.end.point.y
        )
    }
}
