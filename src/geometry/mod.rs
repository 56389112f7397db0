pub mod channel;
pub mod rect;

pub use channel::{find_channel, Channel};
pub use rect::{Rect, Side};
