//! Terminal backend contract.

use std::time::Duration;

use crate::core::cell::Grid;
use crate::core::geometry::Vec2;
use crate::error::Result;

/// What the console needs from a terminal.
///
/// Implementations decide how a grid reaches the screen (ANSI output, an
/// in-memory buffer). Every fallible call is reported to the caller; nothing
/// here retries.
pub trait TerminalBackend {
    /// Current size in cells as `(columns, rows)`.
    fn size(&mut self) -> Result<Vec2>;

    /// Present a full frame.
    fn write(&mut self, grid: &Grid) -> Result<()>;

    /// Raw input bytes, waiting at most `timeout` for the first one. Empty
    /// when nothing arrived.
    fn read_raw(&mut self, timeout: Duration) -> Result<Vec<u8>>;

    fn hide_cursor(&mut self) -> Result<()>;

    fn set_title(&mut self, title: &str) -> Result<()>;

    /// Whether the terminal was resized since the last call.
    fn take_resize(&mut self) -> bool {
        false
    }
}

impl<T: TerminalBackend + ?Sized> TerminalBackend for Box<T> {
    fn size(&mut self) -> Result<Vec2> {
        (**self).size()
    }

    fn write(&mut self, grid: &Grid) -> Result<()> {
        (**self).write(grid)
    }

    fn read_raw(&mut self, timeout: Duration) -> Result<Vec<u8>> {
        (**self).read_raw(timeout)
    }

    fn hide_cursor(&mut self) -> Result<()> {
        (**self).hide_cursor()
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        (**self).set_title(title)
    }

    fn take_resize(&mut self) -> bool {
        (**self).take_resize()
    }
}
