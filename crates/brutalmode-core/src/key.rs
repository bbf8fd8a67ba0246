// Brutalmode Key Type
// Logical key codes as seen by the editor's command dispatch

use std::fmt;
use std::str::FromStr;

include!(concat!(env!("OUT_DIR"), "/key_codes.rs"));

/// First code used for special (non-byte) keys
const SPECIAL_BASE: i32 = 0x1000;

/// Special key names, indexed by `code - SPECIAL_BASE`
const SPECIAL_NAMES: [&str; 14] = [
    "UP",
    "DOWN",
    "LEFT",
    "RIGHT",
    "PAGE_UP",
    "PAGE_DOWN",
    "HOME",
    "END",
    "S_UP",
    "S_DOWN",
    "S_LEFT",
    "S_RIGHT",
    "S_HOME",
    "S_END",
];

impl Key {
    pub const CTRL_C: Key = Key::ctrl(b'C');
    pub const CTRL_Q: Key = Key::ctrl(b'Q');
    pub const CTRL_V: Key = Key::ctrl(b'V');
    pub const CTRL_X: Key = Key::ctrl(b'X');
    pub const CTRL_Z: Key = Key::ctrl(b'Z');
    pub const ESC: Key = Key(0x1b);

    pub const UP: Key = Key(SPECIAL_BASE);
    pub const DOWN: Key = Key(SPECIAL_BASE + 1);
    pub const LEFT: Key = Key(SPECIAL_BASE + 2);
    pub const RIGHT: Key = Key(SPECIAL_BASE + 3);
    pub const PAGE_UP: Key = Key(SPECIAL_BASE + 4);
    pub const PAGE_DOWN: Key = Key(SPECIAL_BASE + 5);
    pub const HOME: Key = Key(SPECIAL_BASE + 6);
    pub const END: Key = Key(SPECIAL_BASE + 7);
    pub const SHIFT_UP: Key = Key(SPECIAL_BASE + 8);
    pub const SHIFT_DOWN: Key = Key(SPECIAL_BASE + 9);
    pub const SHIFT_LEFT: Key = Key(SPECIAL_BASE + 10);
    pub const SHIFT_RIGHT: Key = Key(SPECIAL_BASE + 11);
    pub const SHIFT_HOME: Key = Key(SPECIAL_BASE + 12);
    pub const SHIFT_END: Key = Key(SPECIAL_BASE + 13);

    /// Control-modified letter (Ctrl+A is 0x01, Ctrl+Z is 0x1a)
    pub const fn ctrl(letter: u8) -> Key {
        Key((letter & 0x1f) as i32)
    }

    /// The byte value if this key is in 0-255
    pub fn byte(self) -> Option<u8> {
        u8::try_from(self.0).ok()
    }

    /// The printable ASCII character (space through tilde) for this key, if any
    pub fn printable(self) -> Option<char> {
        match self.0 {
            0x20..=0x7e => Some(self.0 as u8 as char),
            _ => None,
        }
    }
}

/// Display name for a key code
pub fn key_name(code: i32) -> String {
    if code >= SPECIAL_BASE {
        return SPECIAL_NAMES
            .get((code - SPECIAL_BASE) as usize)
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("UNKNOWN({code:#x})"));
    }

    match code {
        0x1b => "ESC".to_string(),
        0x20 => "SPACE".to_string(),
        0x01..=0x1a => format!("Ctrl+{}", (b'A' + (code as u8) - 1) as char),
        0x21..=0x7e => (code as u8 as char).to_string(),
        _ => format!("UNKNOWN({code:#x})"),
    }
}

/// Look up a key by its display name (inverse of `key_name`)
pub fn key_from_name(name: &str) -> Option<Key> {
    if let Some(index) = SPECIAL_NAMES.iter().position(|n| n.eq_ignore_ascii_case(name)) {
        return Some(Key(SPECIAL_BASE + index as i32));
    }

    if name.eq_ignore_ascii_case("ESC") {
        return Some(Key::ESC);
    }
    if name.eq_ignore_ascii_case("SPACE") {
        return Some(Key::from(' '));
    }

    if let Some(letter) = name
        .strip_prefix("Ctrl+")
        .or_else(|| name.strip_prefix("ctrl+"))
    {
        let mut chars = letter.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                Some(Key::ctrl(c.to_ascii_uppercase() as u8))
            }
            _ => None,
        };
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if ('!'..='~').contains(&c) => Some(Key::from(c)),
        _ => None,
    }
}
