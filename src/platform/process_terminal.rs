//! ANSI terminal on the process's stdin/stdout (Unix).
//!
//! Puts the input side into raw mode for its lifetime, renders grids through
//! the [`DiffRenderer`], and learns about window size changes from a
//! `SIGWINCH` flag. No threads are spawned: input is polled by the console.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use libc::{self, c_int};

use crate::core::cell::Grid;
use crate::core::geometry::Vec2;
use crate::core::terminal::TerminalBackend;
use crate::error::{Result, TuiError};
use crate::render::renderer::{title_sequence, DiffRenderer, HIDE_CURSOR, SHOW_CURSOR};

const READ_CHUNK: usize = 4096;

fn wait_writable(fd: c_int) -> io::Result<()> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    };
    loop {
        let result = unsafe { libc::poll(&mut fds, 1, -1) };
        if result < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if result > 0 && (fds.revents & libc::POLLOUT) != 0 {
            return Ok(());
        }
        if result > 0 {
            return Err(io::Error::other(format!(
                "poll(POLLOUT) returned revents=0x{:x}",
                fds.revents
            )));
        }
    }
}

fn write_all_fd_with<FWrite, FWait>(
    fd: c_int,
    bytes: &[u8],
    mut write_once: FWrite,
    mut wait_writable: FWait,
) -> io::Result<()>
where
    FWrite: FnMut(c_int, &[u8]) -> io::Result<usize>,
    FWait: FnMut(c_int) -> io::Result<()>,
{
    let mut written = 0;
    while written < bytes.len() {
        match write_once(fd, &bytes[written..]) {
            Ok(0) => {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "write returned 0"));
            }
            Ok(count) => {
                if count > bytes.len() - written {
                    return Err(io::Error::other("write returned more bytes than requested"));
                }
                written += count;
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => wait_writable(fd)?,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn write_fd(fd: c_int, data: &str) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }
    write_all_fd_with(
        fd,
        data.as_bytes(),
        |fd, buf| {
            let result = unsafe { libc::write(fd, buf.as_ptr() as *const libc::c_void, buf.len()) };
            if result < 0 {
                Err(io::Error::last_os_error())
            } else {
                Ok(result as usize)
            }
        },
        wait_writable,
    )
}

/// Window size as reported. A zero axis is passed through; surfaces collapse it
/// to one cell.
fn read_winsize(fd: c_int) -> io::Result<Vec2> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(Vec2::new(i32::from(size.ws_col), i32::from(size.ws_row)))
}

fn poll_readable(fd: c_int, timeout_ms: i32) -> io::Result<bool> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let result = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    if result < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(false);
        }
        return Err(err);
    }
    Ok(result > 0 && (fds.revents & libc::POLLIN) != 0)
}

fn get_termios(fd: c_int) -> io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

fn set_termios(fd: c_int, termios: &libc::termios) -> io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

pub struct ProcessTerminal {
    stdin_fd: c_int,
    stdout_fd: c_int,
    original_termios: Option<libc::termios>,
    renderer: DiffRenderer,
    resized: Arc<AtomicBool>,
    resize_signal: Option<signal_hook::SigId>,
    cursor_hidden: bool,
}

impl ProcessTerminal {
    /// Take over stdin/stdout.
    pub fn new() -> Result<Self> {
        Self::with_fds(libc::STDIN_FILENO, libc::STDOUT_FILENO)
    }

    /// Take over the given descriptors. Raw mode is applied to `stdin_fd`.
    pub fn with_fds(stdin_fd: c_int, stdout_fd: c_int) -> Result<Self> {
        let mut terminal = Self {
            stdin_fd,
            stdout_fd,
            original_termios: None,
            renderer: DiffRenderer::new(),
            resized: Arc::new(AtomicBool::new(false)),
            resize_signal: None,
            cursor_hidden: false,
        };
        terminal.enable_raw_mode()?;
        let signal = signal_hook::flag::register(libc::SIGWINCH, Arc::clone(&terminal.resized))
            .map_err(|source| TuiError::io("registering SIGWINCH", source))?;
        terminal.resize_signal = Some(signal);
        tracing::debug!(stdin_fd, stdout_fd, "process terminal started");
        Ok(terminal)
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        let original = get_termios(self.stdin_fd)
            .map_err(|source| TuiError::io("reading terminal attributes", source))?;
        let mut raw = original;
        unsafe {
            libc::cfmakeraw(&mut raw);
        }
        set_termios(self.stdin_fd, &raw)
            .map_err(|source| TuiError::io("entering raw mode", source))?;
        self.original_termios = Some(original);
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        if let Some(id) = self.resize_signal.take() {
            signal_hook::low_level::unregister(id);
        }
        if self.cursor_hidden {
            write_fd(self.stdout_fd, SHOW_CURSOR)?;
            self.cursor_hidden = false;
        }
        // Drop pending input so it does not leak to the shell.
        let _ = unsafe { libc::tcflush(self.stdin_fd, libc::TCIFLUSH) };
        if let Some(original) = self.original_termios.take() {
            set_termios(self.stdin_fd, &original)?;
        }
        Ok(())
    }

    /// Repaint everything on the next write.
    pub fn request_full_redraw(&mut self) {
        self.renderer.request_full_redraw_next();
    }
}

impl TerminalBackend for ProcessTerminal {
    fn size(&mut self) -> Result<Vec2> {
        read_winsize(self.stdout_fd).map_err(|source| TuiError::TerminalQuery { source })
    }

    fn write(&mut self, grid: &Grid) -> Result<()> {
        let output = self.renderer.render(grid);
        write_fd(self.stdout_fd, &output).map_err(|source| TuiError::io("writing frame", source))
    }

    fn read_raw(&mut self, timeout: Duration) -> Result<Vec<u8>> {
        let timeout_ms = timeout.as_millis().min(i32::MAX as u128) as i32;
        let readable = poll_readable(self.stdin_fd, timeout_ms)
            .map_err(|source| TuiError::io("polling input", source))?;
        if !readable {
            return Ok(Vec::new());
        }
        let mut buffer = [0u8; READ_CHUNK];
        let read_len =
            unsafe { libc::read(self.stdin_fd, buffer.as_mut_ptr() as *mut _, buffer.len()) };
        if read_len < 0 {
            let err = io::Error::last_os_error();
            if matches!(
                err.kind(),
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
            ) {
                return Ok(Vec::new());
            }
            return Err(TuiError::io("reading input", err));
        }
        Ok(buffer[..read_len as usize].to_vec())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        write_fd(self.stdout_fd, HIDE_CURSOR)
            .map_err(|source| TuiError::io("hiding cursor", source))?;
        self.cursor_hidden = true;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        write_fd(self.stdout_fd, &title_sequence(title))
            .map_err(|source| TuiError::io("setting title", source))
    }

    fn take_resize(&mut self) -> bool {
        let resized = self.resized.swap(false, Ordering::SeqCst);
        if resized {
            tracing::debug!("SIGWINCH received");
            self.renderer.request_full_redraw_next();
        }
        resized
    }
}

impl Drop for ProcessTerminal {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(error = %err, "failed to restore terminal state");
        }
    }
}
