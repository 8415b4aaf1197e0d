//! Frame loop over a [`TerminalBackend`].
//!
//! One frame is: [`Console::poll_input`], update widgets,
//! [`Console::clear`], [`Console::draw`] each top-level component, then
//! [`Console::display`]. Everything runs on the caller's thread.

use std::time::{Duration, Instant};

use crate::config::EnvConfig;
use crate::core::component::Component;
use crate::core::geometry::Vec2;
use crate::core::input::InputDecoder;
use crate::core::keys::KeyEvent;
use crate::core::terminal::TerminalBackend;
use crate::error::Result;
use crate::render::surface::Surface;

/// Paces frames to a maximum rate. A limit of zero disables pacing.
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    frame_time: Option<Duration>,
    last_frame: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_time: Self::frame_time_for(fps),
            last_frame: None,
        }
    }

    /// Limiter paced by the configured frame budget.
    pub fn from_config(config: &EnvConfig) -> Self {
        Self {
            frame_time: config.frame_time(),
            last_frame: None,
        }
    }

    fn frame_time_for(fps: u32) -> Option<Duration> {
        (fps > 0).then(|| Duration::from_secs(1) / fps)
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.frame_time = Self::frame_time_for(fps);
    }

    pub fn frame_time(&self) -> Option<Duration> {
        self.frame_time
    }

    /// Time left in the current frame budget at `now`.
    pub fn remaining(&self, now: Instant) -> Duration {
        match (self.frame_time, self.last_frame) {
            (Some(frame_time), Some(last)) => {
                frame_time.saturating_sub(now.saturating_duration_since(last))
            }
            _ => Duration::ZERO,
        }
    }

    /// Record a frame presented at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last_frame = Some(now);
    }

    /// Sleep out the rest of the frame budget, then start a new frame.
    pub fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.mark(Instant::now());
    }
}

pub struct Console<B: TerminalBackend> {
    backend: B,
    root: Surface,
    decoder: InputDecoder,
    limiter: FrameLimiter,
    resized: bool,
}

impl<B: TerminalBackend> Console<B> {
    /// Take over `backend`: hide its cursor and size the root surface to it.
    pub fn new(mut backend: B, config: &EnvConfig) -> Result<Self> {
        backend.hide_cursor()?;
        let size = backend.size()?;
        tracing::debug!(columns = size.x, rows = size.y, fps = config.fps_limit, "console started");
        Ok(Self {
            backend,
            root: Surface::with_size(size.x, size.y),
            decoder: InputDecoder::from_config(config),
            limiter: FrameLimiter::from_config(config),
            resized: false,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Size of the root surface, which tracks the terminal.
    pub fn size(&self) -> Vec2 {
        self.root.size()
    }

    pub fn root(&self) -> &Surface {
        &self.root
    }

    /// Whether the last [`clear`](Self::clear) picked up a terminal resize.
    pub fn was_resized(&self) -> bool {
        self.resized
    }

    /// Start a frame: follow any terminal resize and make the root
    /// transparent.
    pub fn clear(&mut self) -> Result<()> {
        self.resized = false;
        if self.backend.take_resize() {
            let size = self.backend.size()?;
            self.resized = self.root.resize(size);
            if self.resized {
                tracing::debug!(columns = size.x, rows = size.y, "terminal resized");
            }
        }
        self.root.make_transparent();
        Ok(())
    }

    /// Composite `component` into the root surface.
    pub fn draw(&mut self, component: &mut dyn Component) {
        self.root.insert_surface(component);
    }

    /// Wait for the frame budget, then present the root surface.
    pub fn display(&mut self) -> Result<()> {
        self.limiter.wait();
        tracing::trace!("frame presented");
        self.backend.write(self.root.grid())?;
        self.root.mark_clean();
        Ok(())
    }

    /// Keys decoded from whatever input arrived. Never blocks longer than a
    /// pending escape timeout.
    pub fn poll_input(&mut self) -> Result<Vec<KeyEvent>> {
        let wait = self
            .decoder
            .next_timeout(Instant::now())
            .unwrap_or(Duration::ZERO);
        let bytes = self.backend.read_raw(wait)?;
        let now = Instant::now();
        let mut keys = if bytes.is_empty() {
            Vec::new()
        } else {
            self.decoder.feed(&bytes, now)
        };
        keys.extend(self.decoder.flush_due(now));
        Ok(keys)
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.backend.set_title(title)
    }

    /// Zero removes the limit.
    pub fn set_fps_limit(&mut self, fps: u32) {
        self.limiter.set_fps(fps);
    }

    pub fn decoder(&self) -> &InputDecoder {
        &self.decoder
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{Console, FrameLimiter};
    use crate::config::EnvConfig;
    use crate::core::cell::Cell;
    use crate::core::geometry::Vec2;
    use crate::core::keys::{Key, KeyEvent};
    use crate::core::layout::Position;
    use crate::platform::headless::HeadlessTerminal;
    use crate::render::surface::Surface;

    fn console(columns: i32, rows: i32) -> Console<HeadlessTerminal> {
        let config = EnvConfig {
            fps_limit: 0,
            escape_timeout_ms: 0,
            ..EnvConfig::default()
        };
        Console::new(HeadlessTerminal::new(columns, rows), &config).expect("console")
    }

    #[test]
    fn limiter_reports_remaining_budget() {
        let mut limiter = FrameLimiter::new(10);
        let start = Instant::now();
        assert_eq!(limiter.remaining(start), Duration::ZERO, "no frame yet");
        limiter.mark(start);
        assert_eq!(
            limiter.remaining(start + Duration::from_millis(30)),
            Duration::from_millis(70)
        );
        assert_eq!(limiter.remaining(start + Duration::from_millis(150)), Duration::ZERO);

        limiter.set_fps(0);
        assert_eq!(limiter.frame_time(), None);
        assert_eq!(limiter.remaining(start), Duration::ZERO);
    }

    #[test]
    fn console_paces_frames_from_config() {
        let config = EnvConfig {
            fps_limit: 20,
            ..EnvConfig::default()
        };
        let paced = Console::new(HeadlessTerminal::new(4, 2), &config).expect("console");
        assert_eq!(paced.limiter.frame_time(), Some(Duration::from_millis(50)));

        assert_eq!(console(4, 2).limiter.frame_time(), None);
    }

    #[test]
    fn start_hides_cursor_and_matches_terminal_size() {
        let console = console(8, 3);
        assert!(console.backend().is_cursor_hidden());
        assert_eq!(console.size(), Vec2::new(8, 3));
    }

    #[test]
    fn frame_composites_and_presents() {
        let mut console = console(4, 2);
        let mut badge = Surface::with_size(2, 1).with_position(Position::BOTTOM_RIGHT);
        badge.fill(Cell::new('#'));

        console.clear().expect("clear");
        console.draw(&mut badge);
        console.display().expect("display");
        assert_eq!(console.backend().screen(), vec!["    ", "  ##"]);
    }

    #[test]
    fn resize_is_picked_up_on_clear() {
        let mut console = console(4, 2);
        console.backend_mut().resize(6, 3);
        console.clear().expect("clear");
        assert!(console.was_resized());
        assert_eq!(console.size(), Vec2::new(6, 3));
        console.clear().expect("clear");
        assert!(!console.was_resized());
    }

    #[test]
    fn input_is_decoded_into_keys() {
        let mut console = console(4, 2);
        console.backend_mut().push_input(b"a\x1b[B".to_vec());
        let keys = console.poll_input().expect("poll");
        assert_eq!(keys, vec![KeyEvent::char('a'), KeyEvent::new(Key::Down)]);

        console.backend_mut().push_input(b"\x1b".to_vec());
        let keys = console.poll_input().expect("poll");
        assert_eq!(keys, vec![KeyEvent::new(Key::Escape)], "zero timeout flushes at once");
    }

    #[test]
    fn title_reaches_the_backend() {
        let mut console = console(4, 2);
        console.set_title("demo").expect("title");
        assert_eq!(console.backend().title(), Some("demo"));
    }
}
