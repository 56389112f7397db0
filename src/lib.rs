pub mod error;
pub mod geometry;
pub mod link;
pub mod math;
pub mod operations;
pub mod scene;

pub use error::{LinkrouteError, Result};
pub use link::{Link, LinkKind, LinkStyle, Marker, Terminal};
pub use scene::{ObstacleSet, SceneGraph};
