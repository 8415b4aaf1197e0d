//! Frame loop and focus navigation.

pub mod console;
pub mod focus;

pub use console::{Console, FrameLimiter};
pub use focus::NavigationGroup;
