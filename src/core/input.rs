//! Raw input decoding.
//!
//! [`InputDecoder`] turns the byte stream read from the terminal into
//! [`KeyEvent`]s. Bytes that form a strict prefix of a known sequence stay
//! buffered until either more input completes them or the escape timeout
//! elapses, at which point they are emitted as individual keys. This is what
//! tells a bare `Esc` press apart from the first byte of an arrow key.

use std::time::{Duration, Instant};

use crate::config::EnvConfig;
use crate::core::capabilities::CapabilityTable;
use crate::core::keys::{Key, KeyEvent};

const ESC: u8 = 0x1b;
const DEL: u8 = 0x7f;

/// Outcome of matching a buffer against the capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Entry `index` matches the front of the buffer and spans `consumed` bytes.
    Matched { index: usize, consumed: usize },
    /// The whole buffer is a strict prefix of at least one sequence.
    Incomplete,
    NoMatch,
}

pub struct InputDecoder {
    table: CapabilityTable,
    timeout: Duration,
    buffer: Vec<u8>,
    flush_deadline: Option<Instant>,
}

impl InputDecoder {
    pub fn new(table: CapabilityTable, timeout: Duration) -> Self {
        Self {
            table,
            timeout,
            buffer: Vec::new(),
            flush_deadline: None,
        }
    }

    /// Decoder for the configured `TERM` with the configured escape timeout.
    pub fn from_config(config: &EnvConfig) -> Self {
        Self::new(
            CapabilityTable::for_term(config.term.as_deref()),
            config.escape_timeout(),
        )
    }

    pub fn table(&self) -> &CapabilityTable {
        &self.table
    }

    /// Bytes held back waiting for more input.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Match the front of `buffer`, preferring the longest complete sequence.
    ///
    /// The lookahead is bounded by the table: nothing shorter than its shortest
    /// sequence can match, and nothing as long as its longest can still be a prefix.
    pub fn resolve(&self, buffer: &[u8]) -> Resolution {
        if buffer.is_empty() {
            return Resolution::NoMatch;
        }
        if buffer.len() < self.table.shortest() {
            return if self.is_prefix(buffer) {
                Resolution::Incomplete
            } else {
                Resolution::NoMatch
            };
        }

        let mut best: Option<(usize, usize)> = None;
        for (index, entry) in self.table.entries().iter().enumerate() {
            let len = entry.sequence.len();
            if buffer.starts_with(&entry.sequence) && !best.is_some_and(|(_, best)| len <= best) {
                best = Some((index, len));
            }
        }
        if let Some((index, consumed)) = best {
            return Resolution::Matched { index, consumed };
        }

        if self.is_prefix(buffer) {
            return Resolution::Incomplete;
        }
        Resolution::NoMatch
    }

    /// Whether `buffer` is a strict prefix of some sequence.
    fn is_prefix(&self, buffer: &[u8]) -> bool {
        buffer.len() < self.table.longest()
            && self
                .table
                .entries()
                .iter()
                .any(|entry| entry.sequence.len() > buffer.len() && entry.sequence.starts_with(buffer))
    }

    /// Append `bytes` and decode every key that is no longer ambiguous.
    pub fn feed(&mut self, bytes: &[u8], now: Instant) -> Vec<KeyEvent> {
        self.flush_deadline = None;
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while !self.buffer.is_empty() {
            let (event, consumed) = match self.resolve(&self.buffer) {
                Resolution::Matched { index, consumed } => match self.table.get(index) {
                    Some(entry) => (entry.key, consumed),
                    None => break,
                },
                Resolution::Incomplete => break,
                Resolution::NoMatch => match decode_literal(&self.buffer, true) {
                    Some(decoded) => decoded,
                    None => break,
                },
            };
            self.buffer.drain(..consumed);
            events.push(event);
        }

        if !self.buffer.is_empty() {
            self.flush_deadline = Some(now + self.timeout);
        }
        events
    }

    /// Emit buffered bytes as literal keys once the escape timeout has passed.
    pub fn flush_due(&mut self, now: Instant) -> Vec<KeyEvent> {
        if self.buffer.is_empty() {
            self.flush_deadline = None;
            return Vec::new();
        }
        match self.flush_deadline {
            Some(deadline) if now >= deadline => {
                tracing::debug!(
                    pending = self.buffer.len(),
                    "escape timeout elapsed, flushing literal keys"
                );
                self.flush()
            }
            _ => Vec::new(),
        }
    }

    /// Time left before [`flush_due`](Self::flush_due) will emit something.
    pub fn next_timeout(&self, now: Instant) -> Option<Duration> {
        self.flush_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Emit everything buffered immediately. `Esc` is never combined with the
    /// following byte here.
    pub fn flush(&mut self) -> Vec<KeyEvent> {
        self.flush_deadline = None;
        let mut events = Vec::new();
        while !self.buffer.is_empty() {
            let (event, consumed) = match self.resolve(&self.buffer) {
                Resolution::Matched { index, consumed } => match self.table.get(index) {
                    Some(entry) => (entry.key, consumed),
                    None => (KeyEvent::char(char::REPLACEMENT_CHARACTER), 1),
                },
                Resolution::Incomplete | Resolution::NoMatch => decode_literal(&self.buffer, false)
                    .unwrap_or((KeyEvent::char(char::REPLACEMENT_CHARACTER), 1)),
            };
            self.buffer.drain(..consumed);
            events.push(event);
        }
        events
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.flush_deadline = None;
    }
}

fn control_key(byte: u8) -> KeyEvent {
    match byte {
        b'\r' | b'\n' => KeyEvent::new(Key::Enter),
        b'\t' => KeyEvent::new(Key::Tab),
        0x08 | DEL => KeyEvent::new(Key::Backspace),
        ESC => KeyEvent::new(Key::Escape),
        0x00 => KeyEvent::char(' ').ctrl(),
        0x01..=0x1a => KeyEvent::char(char::from(b'a' + byte - 1)).ctrl(),
        _ => KeyEvent::char(char::from(byte + 0x40)).ctrl(),
    }
}

/// Decode the first key of `buffer` without consulting the table. Returns
/// `None` when a UTF-8 scalar is cut short.
fn decode_literal(buffer: &[u8], combine_alt: bool) -> Option<(KeyEvent, usize)> {
    let first = *buffer.first()?;
    if first == ESC {
        if combine_alt {
            match buffer.get(1) {
                Some(&next) if (0x20..0x7f).contains(&next) => {
                    return Some((KeyEvent::char(char::from(next)).alt(), 2));
                }
                Some(&DEL) => return Some((KeyEvent::new(Key::Backspace).alt(), 2)),
                _ => {}
            }
        }
        return Some((KeyEvent::new(Key::Escape), 1));
    }
    if first < 0x20 || first == DEL {
        return Some((control_key(first), 1));
    }
    if first < 0x80 {
        return Some((KeyEvent::char(char::from(first)), 1));
    }

    let width = match first {
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return Some((KeyEvent::char(char::REPLACEMENT_CHARACTER), 1)),
    };
    if buffer.len() < width {
        return None;
    }
    match std::str::from_utf8(&buffer[..width])
        .ok()
        .and_then(|text| text.chars().next())
    {
        Some(ch) => Some((KeyEvent::char(ch), width)),
        None => Some((KeyEvent::char(char::REPLACEMENT_CHARACTER), 1)),
    }
}
