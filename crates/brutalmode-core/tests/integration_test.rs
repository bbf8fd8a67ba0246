// Brutalmode Integration Tests
//
// These tests exercise the public API across modules:
// settings -> ModeState -> input filter / keymap / detectors
//
// Run with: cargo test -p brutalmode-core --test integration_test

mod tests {
    use std::collections::BTreeSet;
    use std::time::Instant;

    use brutalmode_core::keymap::{generate, KeyGroupId, KeyGroups};
    use brutalmode_core::{
        quit_should_be_blocked, remap, should_block, HostFlags, Key, KeyOutcome, Mode, ModeState,
        Settings,
    };
    use strum::IntoEnumIterator;

    fn settings_with_seed(seed: u64) -> Settings {
        let mut settings = Settings::new();
        settings.set_keymap_seed(Some(seed));
        settings
    }

    #[test]
    fn test_keymap_closure_over_many_seeds() {
        let groups = KeyGroups::standard();
        for seed in 1000..1500u64 {
            let keymap = generate(&groups, seed);
            for (_, keys) in groups.iter() {
                let before: BTreeSet<u8> = keys.iter().copied().collect();
                let after: BTreeSet<u8> = keys.iter().map(|&k| keymap.get(k)).collect();
                assert_eq!(before, after);
            }
            for byte in 0..=255u8 {
                if groups.group_of(byte).is_none() {
                    assert_eq!(keymap.get(byte), byte);
                }
            }
        }
    }

    #[test]
    fn test_every_group_eventually_moves() {
        // Over enough seeds each multi-key group gets a non-identity shuffle
        let groups = KeyGroups::standard();
        for id in KeyGroupId::iter() {
            let keys = groups.get(id).unwrap();
            let moved = (0..64u64).any(|seed| {
                let keymap = generate(&groups, seed);
                keys.iter().any(|&k| keymap.get(k) != k)
            });
            assert!(moved, "group {id} never shuffled");
        }
    }

    #[test]
    fn test_remapped_key_stays_in_category() {
        let state = ModeState::new(Mode::Randomized, &settings_with_seed(2024));
        let groups = state.groups();
        for byte in 0..=255u8 {
            let image = state.keymap().get(byte);
            assert_eq!(groups.group_of(byte), groups.group_of(image));
        }
    }

    #[test]
    fn test_remap_identity_for_non_randomized_modes() {
        let keymap = generate(&KeyGroups::standard(), 5);
        for mode in Mode::iter().filter(|m| *m != Mode::Randomized) {
            for code in 0..1024 {
                assert_eq!(remap(mode, &keymap, Key(code)), Key(code));
            }
        }
    }

    #[test]
    fn test_headless_disables_all_blocking() {
        for mode in Mode::iter() {
            for code in 0..0x1100 {
                assert!(!should_block(mode, Key(code), HostFlags::HEADLESS));
            }
            assert!(!quit_should_be_blocked(mode, false, HostFlags::HEADLESS));
            assert!(!quit_should_be_blocked(mode, true, HostFlags::HEADLESS));
        }
    }

    #[test]
    fn test_mode_state_quit_policy() {
        for (mode, blocked) in [
            (Mode::Disabled, false),
            (Mode::Lenient, false),
            (Mode::Strict, false),
            (Mode::Stricter, true),
            (Mode::Randomized, true),
        ] {
            let state = ModeState::new(mode, &settings_with_seed(1));
            assert_eq!(state.quit_should_be_blocked(false, HostFlags::INTERACTIVE), blocked);
            assert_eq!(state.quit_should_be_blocked(true, HostFlags::INTERACTIVE), blocked);
        }
    }

    #[test]
    fn test_randomized_blocks_before_remapping() {
        let mut state = ModeState::new(Mode::Randomized, &settings_with_seed(77));
        let now = Instant::now();
        for key in [Key::LEFT, Key::PAGE_DOWN, Key::SHIFT_HOME] {
            assert_eq!(
                state.process_key(key, now, HostFlags::INTERACTIVE),
                KeyOutcome::Blocked
            );
        }
        // Keys outside every group are untouched
        assert_eq!(
            state.process_key(Key::from('q'), now, HostFlags::INTERACTIVE),
            KeyOutcome::Forward(Key::from('q'))
        );
    }

    #[test]
    fn test_settings_drive_detectors() {
        let toml = r#"
[quit]
ctrl_threshold = 2

[easter_egg]
phrase = "open sesame"
policy = "contains"
"#;
        let settings = Settings::from_toml(toml).unwrap();
        let now = Instant::now();

        let mut state = ModeState::new(Mode::Lenient, &settings);
        assert!(matches!(
            state.process_key(Key::CTRL_C, now, HostFlags::INTERACTIVE),
            KeyOutcome::Forward(_)
        ));
        assert!(matches!(
            state.process_key(Key::CTRL_C, now, HostFlags::INTERACTIVE),
            KeyOutcome::QuitRequested(_)
        ));

        let mut state = ModeState::new(Mode::Lenient, &settings);
        let mut outcome = None;
        for c in "Open, Sesame!".chars() {
            outcome = Some(state.process_key(Key::from(c), now, HostFlags::INTERACTIVE));
            if matches!(outcome, Some(KeyOutcome::QuitRequested(_))) {
                break;
            }
        }
        assert!(matches!(outcome, Some(KeyOutcome::QuitRequested(_))));
        assert_eq!(state.phrase_matcher().target(), "opensesame");
    }
}
