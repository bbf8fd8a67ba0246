// Brutalmode Key Groups
// Closed sets of command keys that may only be permuted among themselves

use indexmap::IndexMap;
use strum_macros::{Display, EnumIter};

/// Semantic category of a command key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum KeyGroupId {
    Motion,
    Edit,
    Visual,
    Search,
    Mark,
    Misc,
}

/// Errors raised while building a group table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyGroupError {
    #[error("Group {0} is already defined")]
    DuplicateGroup(KeyGroupId),

    #[error("Key {key:#04x} is listed in both {first} and {second}")]
    Overlap {
        key: u8,
        first: KeyGroupId,
        second: KeyGroupId,
    },
}

const MOTION_KEYS: &[u8] = b"hjklwbeWBE0^$GgfFtT%";
const EDIT_KEYS: &[u8] = b"iaoOIAcdypPxXsSrRuU~J";
const VISUAL_KEYS: &[u8] = &[b'v', b'V', 0x16];
const SEARCH_KEYS: &[u8] = b"/?nN*#";
const MARK_KEYS: &[u8] = b"m'`";
const MISC_KEYS: &[u8] = b"123456789.,;:-+=<>[]{}";

/// Ordered partition of byte key codes into groups.
///
/// Iteration order is insertion order, which is also the order in which the
/// keymap generator shuffles the groups. A reverse table answers
/// "which group owns this byte" in O(1).
#[derive(Debug, Clone)]
pub struct KeyGroups {
    groups: IndexMap<KeyGroupId, Vec<u8>>,
    owner: [Option<KeyGroupId>; 256],
}

impl Default for KeyGroups {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyGroups {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            groups: IndexMap::new(),
            owner: [None; 256],
        }
    }

    /// The standard editor command groups, in processing order:
    /// Motion, Edit, Visual, Search, Mark, Misc.
    pub fn standard() -> Self {
        let mut table = Self::new();
        for (id, keys) in [
            (KeyGroupId::Motion, MOTION_KEYS),
            (KeyGroupId::Edit, EDIT_KEYS),
            (KeyGroupId::Visual, VISUAL_KEYS),
            (KeyGroupId::Search, SEARCH_KEYS),
            (KeyGroupId::Mark, MARK_KEYS),
            (KeyGroupId::Misc, MISC_KEYS),
        ] {
            // The constant tables above are disjoint (checked in tests).
            for &key in keys {
                table.owner[key as usize] = Some(id);
            }
            table.groups.insert(id, keys.to_vec());
        }
        table
    }

    /// Add a group. Keys repeated inside the group are kept once.
    pub fn insert(
        &mut self,
        id: KeyGroupId,
        keys: impl IntoIterator<Item = u8>,
    ) -> Result<(), KeyGroupError> {
        if self.groups.contains_key(&id) {
            return Err(KeyGroupError::DuplicateGroup(id));
        }

        let mut members = Vec::new();
        for key in keys {
            if members.contains(&key) {
                continue;
            }
            if let Some(first) = self.owner[key as usize] {
                return Err(KeyGroupError::Overlap {
                    key,
                    first,
                    second: id,
                });
            }
            members.push(key);
        }

        for &key in &members {
            self.owner[key as usize] = Some(id);
        }
        self.groups.insert(id, members);
        Ok(())
    }

    /// Group owning a byte key code, if any
    pub fn group_of(&self, key: u8) -> Option<KeyGroupId> {
        self.owner[key as usize]
    }

    /// Members of a group, in their declared order
    pub fn get(&self, id: KeyGroupId) -> Option<&[u8]> {
        self.groups.get(&id).map(Vec::as_slice)
    }

    /// Iterate groups in processing order
    pub fn iter(&self) -> impl Iterator<Item = (KeyGroupId, &[u8])> + '_ {
        self.groups.iter().map(|(id, keys)| (*id, keys.as_slice()))
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the table has no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
