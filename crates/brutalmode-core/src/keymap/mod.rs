// Brutalmode Keymap
// Byte-to-byte remapping table used by the randomized mode

mod generator;
mod groups;

pub use generator::{generate, shuffle_within_groups, KeymapSeed};
pub use groups::{KeyGroupError, KeyGroupId, KeyGroups};

use crate::Key;

/// Total map from byte to byte.
///
/// Built once per process for the randomized mode and read-only afterwards.
/// Generated tables permute keys only within their group and leave every
/// other byte unchanged.
#[derive(Clone, PartialEq, Eq)]
pub struct Keymap {
    table: [u8; 256],
}

impl Default for Keymap {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::fmt::Debug for Keymap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.changed()).finish()
    }
}

impl Keymap {
    /// Map every byte to itself
    pub fn identity() -> Self {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self { table }
    }

    /// Image of a byte
    pub fn get(&self, byte: u8) -> u8 {
        self.table[byte as usize]
    }

    pub(crate) fn set(&mut self, from: u8, to: u8) {
        self.table[from as usize] = to;
    }

    /// Remap a logical key. Keys outside 0-255 pass through.
    pub fn apply(&self, key: Key) -> Key {
        match key.byte() {
            Some(byte) => Key::from(self.get(byte)),
            None => key,
        }
    }

    /// Pairs `(from, to)` for every byte that does not map to itself
    pub fn changed(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.table
            .iter()
            .enumerate()
            .map(|(from, &to)| (from as u8, to))
            .filter(|(from, to)| from != to)
    }

    /// True when every byte maps to itself
    pub fn is_identity(&self) -> bool {
        self.changed().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let keymap = Keymap::identity();
        for byte in 0..=255u8 {
            assert_eq!(keymap.get(byte), byte);
        }
        assert!(keymap.is_identity());
        assert_eq!(keymap, Keymap::default());
    }

    #[test]
    fn test_apply_leaves_special_keys() {
        let mut keymap = Keymap::identity();
        keymap.set(b'h', b'l');
        keymap.set(b'l', b'h');

        assert_eq!(keymap.apply(Key::from('h')), Key::from('l'));
        assert_eq!(keymap.apply(Key::from('l')), Key::from('h'));
        assert_eq!(keymap.apply(Key::UP), Key::UP);
        assert_eq!(keymap.apply(Key(-5)), Key(-5));
        assert_eq!(keymap.changed().count(), 2);
    }
}
