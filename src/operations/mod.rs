pub mod route;

pub use route::{merge_segments, AutoRoute, OrthogonalRoute, RouteConfig};
