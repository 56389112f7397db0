//! Routes a Manhattan link around an obstacle and prints the result.
//!
//! ```text
//! cargo run --example route
//! RUST_LOG=linkroute=trace cargo run --example route   # show every detour
//! ```

use linkroute::geometry::Rect;
use linkroute::link::LabelGeometry;
use linkroute::math::{Direction, Point2};
use linkroute::{Link, LinkStyle, Marker, ObstacleSet, Result, Terminal};
use tracing::info;

const STYLE: &str = r##"{
    "type": "manhattan",
    "MIN_BUFFER": 10,
    "autoRoute": true,
    "maxChannelWidth": 100,
    "stroke": "#333"
}"##;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for linkroute.
    // Override with RUST_LOG env var (e.g. RUST_LOG=linkroute=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("route=info".parse().unwrap_or_default())
        .add_directive("linkroute=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let style = LinkStyle::from_json(STYLE)?;
    let obstacles = ObstacleSet::new(
        Rect::from_edges(-100.0, -100.0, 240.0, 200.0)?,
        vec![
            Rect::from_edges(-40.0, -20.0, 0.0, 20.0)?,
            Rect::from_edges(40.0, -10.0, 60.0, 60.0)?,
            Rect::from_edges(100.0, 30.0, 140.0, 70.0)?,
        ],
        0,
        2,
    );

    let start = Terminal::facing(Point2::new(0.0, 0.0), Direction::East);
    let end = Terminal::facing(Point2::new(100.0, 50.0), Direction::West);
    let Some(link) = Link::from_style(start, end, style) else {
        return Ok(());
    };
    let link = link
        .with_markers(None, Some(Marker::new("arrow")))
        .with_obstacles(obstacles);

    info!(%link, "routing");
    for (i, p) in link.points().iter().enumerate() {
        info!(i, x = p.x, y = p.y, "point");
    }

    let label = LabelGeometry::new("50%".parse()?, 0.0, -8.0);
    let anchor = link.relative_position(&label);
    info!(
        length = link.length(),
        x = anchor.x,
        y = anchor.y,
        "label anchor"
    );
    Ok(())
}
