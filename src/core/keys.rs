//! Logical key events.
//!
//! Key ids use the `modifier+key` text form (`ctrl+c`, `shift+tab`, `alt+up`)
//! for both `Display` and [`KeyEvent::parse`].

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    F(u8),
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b001;
        const ALT   = 0b010;
        const CTRL  = 0b100;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    pub const fn char(ch: char) -> Self {
        Self::new(Key::Char(ch))
    }

    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn shift(self) -> Self {
        self.with_modifiers(self.modifiers | Modifiers::SHIFT)
    }

    pub fn alt(self) -> Self {
        self.with_modifiers(self.modifiers | Modifiers::ALT)
    }

    pub fn ctrl(self) -> Self {
        self.with_modifiers(self.modifiers | Modifiers::CTRL)
    }

    /// Printable character with no ctrl/alt modifier.
    pub fn printable(&self) -> Option<char> {
        match self.key {
            Key::Char(ch)
                if !ch.is_control() && !self.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) =>
            {
                Some(ch)
            }
            _ => None,
        }
    }

    /// Parse a key id such as `shift+tab` or `ctrl+c`. Returns `None` for
    /// unknown names.
    pub fn parse(id: &str) -> Option<Self> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        let mut parts: Vec<&str> = id.split('+').collect();
        // "ctrl++" style ids end with an empty segment for the plus key.
        let key_name = if id.ends_with("++") || id == "+" {
            parts.truncate(parts.len().saturating_sub(2));
            "+"
        } else {
            parts.pop()?
        };

        let mut modifiers = Modifiers::empty();
        for part in parts {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "shift" => Modifiers::SHIFT,
                "alt" | "meta" => Modifiers::ALT,
                "ctrl" | "control" => Modifiers::CTRL,
                _ => return None,
            };
        }

        let key = match key_name.to_ascii_lowercase().as_str() {
            "enter" | "return" => Key::Enter,
            "tab" => Key::Tab,
            "backspace" => Key::Backspace,
            "escape" | "esc" => Key::Escape,
            "space" => Key::Char(' '),
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "insert" => Key::Insert,
            "delete" => Key::Delete,
            name => {
                let mut chars = key_name.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Key::Char(ch),
                    _ => {
                        let number = name.strip_prefix('f')?.parse::<u8>().ok()?;
                        if !(1..=12).contains(&number) {
                            return None;
                        }
                        Key::F(number)
                    }
                }
            }
        };
        Some(Self { key, modifiers })
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        KeyEvent::new(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => f.write_str("space"),
            Key::Char(ch) => write!(f, "{ch}"),
            Key::Enter => f.write_str("enter"),
            Key::Tab => f.write_str("tab"),
            Key::Backspace => f.write_str("backspace"),
            Key::Escape => f.write_str("escape"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Home => f.write_str("home"),
            Key::End => f.write_str("end"),
            Key::PageUp => f.write_str("pageUp"),
            Key::PageDown => f.write_str("pageDown"),
            Key::Insert => f.write_str("insert"),
            Key::Delete => f.write_str("delete"),
            Key::F(n) => write!(f, "f{n}"),
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(Modifiers::SHIFT) {
            f.write_str("shift+")?;
        }
        if self.modifiers.contains(Modifiers::CTRL) {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.contains(Modifiers::ALT) {
            f.write_str("alt+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Case of an alphabetic key: upper when exactly one of shift and caps lock
/// is engaged. Non-letters are returned unchanged.
pub fn apply_letter_case(letter: char, shift: bool, caps_lock: bool) -> char {
    if !letter.is_alphabetic() {
        return letter;
    }
    if shift ^ caps_lock {
        single(letter.to_uppercase()).unwrap_or(letter)
    } else {
        single(letter.to_lowercase()).unwrap_or(letter)
    }
}

/// The only item of `chars`, or `None` when a case mapping expands.
fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}
