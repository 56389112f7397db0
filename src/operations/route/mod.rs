mod auto_route;
mod merge;
mod orthogonal;

pub use auto_route::{AutoRoute, MAX_DETOURS};
pub use merge::merge_segments;
pub use orthogonal::{expand_turns, OrthogonalRoute};

/// Default minimum stub length at a terminal, in pixels.
pub const DEFAULT_MIN_BUFFER: f64 = 10.0;

/// Default cap on the width of a free channel, in pixels.
pub const DEFAULT_MAX_CHANNEL_WIDTH: f64 = 100.0;

/// Tuning parameters for orthogonal routing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteConfig {
    /// Minimum distance a route travels from a terminal before turning.
    pub min_buffer: f64,
    /// Maximum extent of a channel on its constrained axis.
    pub max_channel_width: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            min_buffer: DEFAULT_MIN_BUFFER,
            max_channel_width: DEFAULT_MAX_CHANNEL_WIDTH,
        }
    }
}
