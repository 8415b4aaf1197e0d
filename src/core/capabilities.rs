//! Terminal key-sequence tables.
//!
//! A table maps the byte sequences a terminal emits for special keys to logical
//! [`KeyEvent`]s. Tables are plain values built once at startup and handed to
//! the decoder.

use crate::core::keys::{Key, KeyEvent, Modifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    pub name: String,
    pub sequence: Vec<u8>,
    pub key: KeyEvent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityTable {
    entries: Vec<Capability>,
    longest: usize,
    shortest: usize,
}

const ALT: Modifiers = Modifiers::ALT;
const SHIFT: Modifiers = Modifiers::SHIFT;
const CTRL: Modifiers = Modifiers::CTRL;

type Row = (&'static str, &'static str, Key, Modifiers);

const NONE: Modifiers = Modifiers::empty();

const COMMON: &[Row] = &[
    ("kich1", "\x1b[2~", Key::Insert, NONE),
    ("kdch1", "\x1b[3~", Key::Delete, NONE),
    ("kpp", "\x1b[5~", Key::PageUp, NONE),
    ("knp", "\x1b[6~", Key::PageDown, NONE),
    ("kf6", "\x1b[17~", Key::F(6), NONE),
    ("kf7", "\x1b[18~", Key::F(7), NONE),
    ("kf8", "\x1b[19~", Key::F(8), NONE),
    ("kf9", "\x1b[20~", Key::F(9), NONE),
    ("kf10", "\x1b[21~", Key::F(10), NONE),
    ("kf11", "\x1b[23~", Key::F(11), NONE),
    ("kf12", "\x1b[24~", Key::F(12), NONE),
    ("kcbt", "\x1b[Z", Key::Tab, SHIFT),
];

const CSI_ARROWS: &[Row] = &[
    ("kcuu1", "\x1b[A", Key::Up, NONE),
    ("kcud1", "\x1b[B", Key::Down, NONE),
    ("kcuf1", "\x1b[C", Key::Right, NONE),
    ("kcub1", "\x1b[D", Key::Left, NONE),
];

const XTERM: &[Row] = &[
    ("kcuu1", "\x1bOA", Key::Up, NONE),
    ("kcud1", "\x1bOB", Key::Down, NONE),
    ("kcuf1", "\x1bOC", Key::Right, NONE),
    ("kcub1", "\x1bOD", Key::Left, NONE),
    ("khome", "\x1bOH", Key::Home, NONE),
    ("kend", "\x1bOF", Key::End, NONE),
    ("home", "\x1b[H", Key::Home, NONE),
    ("end", "\x1b[F", Key::End, NONE),
    ("kf1", "\x1bOP", Key::F(1), NONE),
    ("kf2", "\x1bOQ", Key::F(2), NONE),
    ("kf3", "\x1bOR", Key::F(3), NONE),
    ("kf4", "\x1bOS", Key::F(4), NONE),
    ("kf5", "\x1b[15~", Key::F(5), NONE),
    ("kUP", "\x1b[1;2A", Key::Up, SHIFT),
    ("kDN", "\x1b[1;2B", Key::Down, SHIFT),
    ("kRIT", "\x1b[1;2C", Key::Right, SHIFT),
    ("kLFT", "\x1b[1;2D", Key::Left, SHIFT),
    ("kUP3", "\x1b[1;3A", Key::Up, ALT),
    ("kDN3", "\x1b[1;3B", Key::Down, ALT),
    ("kRIT3", "\x1b[1;3C", Key::Right, ALT),
    ("kLFT3", "\x1b[1;3D", Key::Left, ALT),
    ("kHOM3", "\x1b[1;3H", Key::Home, ALT),
    ("kEND3", "\x1b[1;3F", Key::End, ALT),
    ("kPRV3", "\x1b[5;3~", Key::PageUp, ALT),
    ("kNXT3", "\x1b[6;3~", Key::PageDown, ALT),
    ("kDC3", "\x1b[3;3~", Key::Delete, ALT),
    ("kIC3", "\x1b[2;3~", Key::Insert, ALT),
    ("kUP5", "\x1b[1;5A", Key::Up, CTRL),
    ("kDN5", "\x1b[1;5B", Key::Down, CTRL),
    ("kRIT5", "\x1b[1;5C", Key::Right, CTRL),
    ("kLFT5", "\x1b[1;5D", Key::Left, CTRL),
];

const LINUX: &[Row] = &[
    ("khome", "\x1b[1~", Key::Home, NONE),
    ("kend", "\x1b[4~", Key::End, NONE),
    ("kf1", "\x1b[[A", Key::F(1), NONE),
    ("kf2", "\x1b[[B", Key::F(2), NONE),
    ("kf3", "\x1b[[C", Key::F(3), NONE),
    ("kf4", "\x1b[[D", Key::F(4), NONE),
    ("kf5", "\x1b[[E", Key::F(5), NONE),
];

const RXVT: &[Row] = &[
    ("khome", "\x1b[7~", Key::Home, NONE),
    ("kend", "\x1b[8~", Key::End, NONE),
    ("kf1", "\x1b[11~", Key::F(1), NONE),
    ("kf2", "\x1b[12~", Key::F(2), NONE),
    ("kf3", "\x1b[13~", Key::F(3), NONE),
    ("kf4", "\x1b[14~", Key::F(4), NONE),
    ("kf5", "\x1b[15~", Key::F(5), NONE),
    ("kUP", "\x1b[a", Key::Up, SHIFT),
    ("kDN", "\x1b[b", Key::Down, SHIFT),
    ("kRIT", "\x1b[c", Key::Right, SHIFT),
    ("kLFT", "\x1b[d", Key::Left, SHIFT),
    ("kUP3", "\x1b\x1b[A", Key::Up, ALT),
    ("kDN3", "\x1b\x1b[B", Key::Down, ALT),
    ("kRIT3", "\x1b\x1b[C", Key::Right, ALT),
    ("kLFT3", "\x1b\x1b[D", Key::Left, ALT),
    ("kPRV3", "\x1b\x1b[5~", Key::PageUp, ALT),
    ("kNXT3", "\x1b\x1b[6~", Key::PageDown, ALT),
];

fn rows(groups: &[&[Row]]) -> Vec<Capability> {
    groups
        .iter()
        .flat_map(|group| group.iter())
        .map(|(name, sequence, key, modifiers)| Capability {
            name: (*name).to_string(),
            sequence: sequence.as_bytes().to_vec(),
            key: KeyEvent::new(*key).with_modifiers(*modifiers),
        })
        .collect()
}

impl CapabilityTable {
    /// Build a table from `(name, sequence, key)` triples. Empty sequences are
    /// skipped.
    pub fn from_entries<I, N, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, S, KeyEvent)>,
        N: Into<String>,
        S: Into<Vec<u8>>,
    {
        let entries = entries
            .into_iter()
            .map(|(name, sequence, key)| Capability {
                name: name.into(),
                sequence: sequence.into(),
                key,
            })
            .collect();
        Self::from_capabilities(entries)
    }

    fn from_capabilities(mut entries: Vec<Capability>) -> Self {
        entries.retain(|entry| !entry.sequence.is_empty());
        let longest = entries.iter().map(|e| e.sequence.len()).max().unwrap_or(0);
        let shortest = entries.iter().map(|e| e.sequence.len()).min().unwrap_or(0);
        Self {
            entries,
            longest,
            shortest,
        }
    }

    pub fn xterm() -> Self {
        Self::from_capabilities(rows(&[XTERM, CSI_ARROWS, COMMON]))
    }

    pub fn linux() -> Self {
        Self::from_capabilities(rows(&[CSI_ARROWS, LINUX, COMMON]))
    }

    pub fn rxvt() -> Self {
        Self::from_capabilities(rows(&[CSI_ARROWS, RXVT, COMMON]))
    }

    /// Preset for a `TERM` value; unknown or missing terminals get `xterm`.
    pub fn for_term(term: Option<&str>) -> Self {
        match term {
            Some(term) if term.starts_with("linux") => Self::linux(),
            Some(term) if term.contains("rxvt") => Self::rxvt(),
            _ => Self::xterm(),
        }
    }

    pub fn entries(&self) -> &[Capability] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Capability> {
        self.entries.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&Capability> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the longest registered sequence.
    pub fn longest(&self) -> usize {
        self.longest
    }

    /// Length of the shortest registered sequence.
    pub fn shortest(&self) -> usize {
        self.shortest
    }
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self::xterm()
    }
}
