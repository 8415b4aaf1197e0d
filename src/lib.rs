//! Composable terminal surfaces.
//!
//! # Overview
//! - A [`Surface`] is a rectangular cell buffer with a relative size
//!   ([`SizeSpec`]) and placement ([`Position`]). Compositing a child into a
//!   parent resolves both against the parent and copies every opaque cell.
//! - Widgets implement [`Component`]; focusable ones also implement
//!   [`ActiveElement`]. [`NavigationGroup`] keeps one child active at a time.
//! - [`ScrollModel`] and [`TextLayout`] are the pure engines behind
//!   [`Scrollbar`], [`Text`] and [`InputText`].
//! - [`InputDecoder`] turns raw terminal bytes into [`KeyEvent`]s using a
//!   [`CapabilityTable`].
//! - A [`Console`] runs frames against any [`TerminalBackend`]:
//!   [`ProcessTerminal`] on a Unix tty or [`HeadlessTerminal`] in memory.
//!
//! Everything is single-threaded. Only backend calls can fail.

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod platform;
pub mod render;
pub mod runtime;
pub mod widgets;

pub use crate::config::EnvConfig;
pub use crate::error::{Result, TuiError};

/// Geometry, cells and layout.
pub use crate::core::cell::{Cell, CellStyle, Color, Grid};
pub use crate::core::geometry::{Rect, Vec2};
pub use crate::core::layout::{resolve_origin, resolve_size, Position, SizeSpec};

/// Widget traits and appearance.
pub use crate::core::appearance::{
    ChartAppearance, InputAppearance, Palette, ScrollbarAppearance, Shared, TextAppearance,
};
pub use crate::core::component::{ActiveElement, ActiveState, Component};

/// Scrolling and text engines.
pub use crate::core::scroll::{ScrollConfig, ScrollMode, ScrollModel, ScrollPart, ScrollRender};
pub use crate::core::text::layout::{LayoutPolicy, TextLayout};

/// Keys and input decoding.
pub use crate::core::capabilities::{Capability, CapabilityTable};
pub use crate::core::input::{InputDecoder, Resolution};
pub use crate::core::keys::{apply_letter_case, Key, KeyEvent, Modifiers};

/// Terminal backends and rendering.
pub use crate::core::terminal::TerminalBackend;
pub use crate::platform::{HeadlessTerminal, ProcessTerminal};
pub use crate::render::{DiffRenderer, Surface};

/// Frame loop and widgets.
pub use crate::runtime::{Console, FrameLimiter, NavigationGroup};
pub use crate::widgets::{
    Chart, Group, InputKeys, InputText, Orientation, ScrollKeys, Scrollbar, Text,
};
