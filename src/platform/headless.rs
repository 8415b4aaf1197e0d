//! In-memory terminal.
//!
//! Records every frame and serves scripted input. Used by tests and by the
//! demo when stdout is not a terminal.

use std::collections::VecDeque;
use std::time::Duration;

use crate::core::cell::Grid;
use crate::core::geometry::Vec2;
use crate::core::terminal::TerminalBackend;
use crate::core::text::plain;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct HeadlessTerminal {
    size: Vec2,
    frames: Vec<Grid>,
    input: VecDeque<Vec<u8>>,
    title: Option<String>,
    cursor_hidden: bool,
    resized: bool,
}

impl HeadlessTerminal {
    pub fn new(columns: i32, rows: i32) -> Self {
        Self {
            size: Vec2::new(columns, rows),
            ..Self::default()
        }
    }

    /// Queue bytes returned by one later `read_raw` call.
    pub fn push_input(&mut self, bytes: impl Into<Vec<u8>>) {
        self.input.push_back(bytes.into());
    }

    pub fn resize(&mut self, columns: i32, rows: i32) {
        let size = Vec2::new(columns, rows);
        if size != self.size {
            self.size = size;
            self.resized = true;
        }
    }

    pub fn frames(&self) -> &[Grid] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Grid> {
        self.frames.last()
    }

    /// Rows of the last frame as text, transparent cells shown as spaces.
    pub fn screen(&self) -> Vec<String> {
        self.last_frame()
            .map(|grid| grid.rows().map(plain).collect())
            .unwrap_or_default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }
}

impl TerminalBackend for HeadlessTerminal {
    fn size(&mut self) -> Result<Vec2> {
        Ok(self.size)
    }

    fn write(&mut self, grid: &Grid) -> Result<()> {
        self.frames.push(grid.clone());
        Ok(())
    }

    fn read_raw(&mut self, _timeout: Duration) -> Result<Vec<u8>> {
        Ok(self.input.pop_front().unwrap_or_default())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.cursor_hidden = true;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = Some(title.to_string());
        Ok(())
    }

    fn take_resize(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }
}
