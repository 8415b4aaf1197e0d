//! Terminal backends.

pub mod headless;
#[cfg(unix)]
pub mod process_terminal;

pub use headless::HeadlessTerminal;
#[cfg(unix)]
pub use process_terminal::ProcessTerminal;

#[cfg(not(unix))]
mod unsupported {
    use std::time::Duration;

    use crate::core::cell::Grid;
    use crate::core::geometry::Vec2;
    use crate::core::terminal::TerminalBackend;
    use crate::error::{Result, TuiError};

    const REASON: &str = "process terminal requires a Unix tty";

    /// Placeholder on platforms without a termios-style terminal. It can be
    /// named in `Console<ProcessTerminal>` but never constructed.
    pub struct ProcessTerminal(());

    impl ProcessTerminal {
        pub fn new() -> Result<Self> {
            Err(TuiError::Unsupported(REASON))
        }
    }

    impl TerminalBackend for ProcessTerminal {
        fn size(&mut self) -> Result<Vec2> {
            Err(TuiError::Unsupported(REASON))
        }

        fn write(&mut self, _grid: &Grid) -> Result<()> {
            Err(TuiError::Unsupported(REASON))
        }

        fn read_raw(&mut self, _timeout: Duration) -> Result<Vec<u8>> {
            Err(TuiError::Unsupported(REASON))
        }

        fn hide_cursor(&mut self) -> Result<()> {
            Err(TuiError::Unsupported(REASON))
        }

        fn set_title(&mut self, _title: &str) -> Result<()> {
            Err(TuiError::Unsupported(REASON))
        }
    }

}

#[cfg(not(unix))]
pub use unsupported::ProcessTerminal;
