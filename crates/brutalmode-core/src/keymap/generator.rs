use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use super::{KeyGroups, Keymap};

/// Where the keymap shuffle gets its seed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeymapSeed {
    /// Fresh entropy on every activation
    #[default]
    Entropy,
    /// Reproducible layout
    Fixed(u64),
}

impl KeymapSeed {
    /// Concrete seed value for this activation
    pub fn resolve(self) -> u64 {
        match self {
            KeymapSeed::Entropy => rand::random(),
            KeymapSeed::Fixed(seed) => seed,
        }
    }
}

/// Build a keymap that shuffles each group with a generator seeded from `seed`.
pub fn generate(groups: &KeyGroups, seed: u64) -> Keymap {
    let mut rng = StdRng::seed_from_u64(seed);
    let keymap = shuffle_within_groups(groups, &mut rng);
    log::debug!(
        "Generated randomized keymap (seed={}, {} groups, {} keys moved)",
        seed,
        groups.len(),
        keymap.changed().count()
    );
    keymap
}

/// Permute every group uniformly and independently, in table order.
///
/// The random stream a group consumes depends only on its size, so the layout
/// of one group never depends on how another group came out. Bytes outside every
/// group stay identity.
pub fn shuffle_within_groups<R: Rng + ?Sized>(groups: &KeyGroups, rng: &mut R) -> Keymap {
    let mut keymap = Keymap::identity();

    for (id, keys) in groups.iter() {
        let mut shuffled: SmallVec<[u8; 32]> = SmallVec::from_slice(keys);
        fisher_yates(&mut shuffled, rng);

        for (&from, &to) in keys.iter().zip(shuffled.iter()) {
            keymap.set(from, to);
        }
        log::trace!("Shuffled group {} ({} keys)", id, keys.len());
    }

    keymap
}

fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::KeyGroupId;
    use std::collections::BTreeSet;

    #[test]
    fn test_groups_are_closed_under_the_map() {
        let groups = KeyGroups::standard();
        for seed in 0..200u64 {
            let keymap = generate(&groups, seed);
            for (id, keys) in groups.iter() {
                let original: BTreeSet<u8> = keys.iter().copied().collect();
                let images: BTreeSet<u8> = keys.iter().map(|&k| keymap.get(k)).collect();
                assert_eq!(original, images, "group {id} not closed for seed {seed}");
            }
        }
    }

    #[test]
    fn test_ungrouped_bytes_are_identity() {
        let groups = KeyGroups::standard();
        for seed in [0u64, 1, 42, 0xdead_beef, u64::MAX] {
            let keymap = generate(&groups, seed);
            for byte in 0..=255u8 {
                if groups.group_of(byte).is_none() {
                    assert_eq!(keymap.get(byte), byte);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let groups = KeyGroups::standard();
        assert_eq!(generate(&groups, 7), generate(&groups, 7));
    }

    #[test]
    fn test_layouts_vary_across_seeds() {
        let groups = KeyGroups::standard();
        let layouts: BTreeSet<Vec<(u8, u8)>> = (0..20u64)
            .map(|seed| generate(&groups, seed).changed().collect())
            .collect();
        assert!(layouts.len() > 1);
    }

    #[test]
    fn test_degenerate_groups() {
        let mut groups = KeyGroups::new();
        groups.insert(KeyGroupId::Mark, [b'm']).unwrap();
        groups.insert(KeyGroupId::Visual, Vec::new()).unwrap();

        for seed in 0..10u64 {
            let keymap = generate(&groups, seed);
            assert!(keymap.is_identity());
        }
    }

    #[test]
    fn test_group_outcome_independent_of_other_groups() {
        // Search is shuffled after Motion in both tables; with the same seed and
        // the same Motion size, Search must land the same way whatever Motion holds.
        let mut first = KeyGroups::new();
        first.insert(KeyGroupId::Motion, *b"hjkl").unwrap();
        first.insert(KeyGroupId::Search, *b"/?nN*#").unwrap();

        let mut second = KeyGroups::new();
        second.insert(KeyGroupId::Motion, *b"wbeG").unwrap();
        second.insert(KeyGroupId::Search, *b"/?nN*#").unwrap();

        for seed in 0..50u64 {
            let a = generate(&first, seed);
            let b = generate(&second, seed);
            for &key in b"/?nN*#" {
                assert_eq!(a.get(key), b.get(key));
            }
        }
    }

    #[test]
    fn test_entropy_seed_resolves() {
        assert_eq!(KeymapSeed::Fixed(99).resolve(), 99);
        // Entropy must still produce a valid layout
        let keymap = generate(&KeyGroups::standard(), KeymapSeed::Entropy.resolve());
        assert_eq!(keymap.get(b'q'), b'q');
    }
}
