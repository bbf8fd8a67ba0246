// Brutalmode Escape Phrase
// Fuzzy detection of a typed phrase in the most recent keystrokes

use std::collections::VecDeque;

/// Phrase that opens the escape hatch
pub const DEFAULT_PHRASE: &str = "fuck you let me out";

/// Characters kept in the rolling buffer by default
pub const DEFAULT_CAPACITY: usize = 30;

/// Edit distance accepted by the tolerant policy by default
pub const DEFAULT_TOLERANCE: usize = 5;

/// Longest input the edit-distance matrix accepts
pub const MAX_EDIT_LEN: usize = 63;

/// When the normalized buffer counts as containing the phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhrasePolicy {
    /// Exact substring
    Contains,
    /// A trailing run of the buffer within `tolerance` edits of the phrase.
    ///
    /// Runs as short as one letter under the phrase length are compared, so a
    /// prefix of the phrase alone does not match. The tolerance is generous:
    /// near-misses such as "quick, you let me out" are accepted too, and a
    /// match quits unconditionally. Use `Contains` for an exact phrase.
    EditDistance { tolerance: usize },
}

impl Default for PhrasePolicy {
    fn default() -> Self {
        PhrasePolicy::EditDistance {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Keep only ASCII letters, lowercased. Digits, punctuation and spaces are dropped.
pub fn normalize(text: impl IntoIterator<Item = char>) -> String {
    text.into_iter()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Levenshtein distance over a fixed-size matrix.
///
/// Returns `None` when either input is longer than `MAX_EDIT_LEN`.
pub fn levenshtein(a: &[u8], b: &[u8]) -> Option<usize> {
    if a.len() > MAX_EDIT_LEN || b.len() > MAX_EDIT_LEN {
        return None;
    }

    // Distances never exceed MAX_EDIT_LEN, so a byte per cell is enough.
    let mut d = [[0u8; MAX_EDIT_LEN + 1]; MAX_EDIT_LEN + 1];
    for (i, row) in d.iter_mut().enumerate().take(a.len() + 1) {
        row[0] = i as u8;
    }
    for j in 0..=b.len() {
        d[0][j] = j as u8;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = u8::from(a[i - 1] != b[j - 1]);
            d[i][j] = (d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1)
                .min(d[i - 1][j - 1] + cost);
        }
    }

    Some(d[a.len()][b.len()] as usize)
}

/// Rolling log of recently typed printable characters, checked against a phrase.
#[derive(Debug, Clone)]
pub struct EasterEggMatcher {
    buffer: VecDeque<char>,
    capacity: usize,
    /// Phrase as configured, for display
    phrase: String,
    target: String,
    policy: PhrasePolicy,
    recorded: u64,
}

impl Default for EasterEggMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_PHRASE, DEFAULT_CAPACITY, PhrasePolicy::default())
    }
}

impl EasterEggMatcher {
    pub fn new(phrase: &str, capacity: usize, policy: PhrasePolicy) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: VecDeque::with_capacity(capacity + 1),
            capacity,
            phrase: phrase.to_string(),
            target: normalize(phrase.chars()),
            policy,
            recorded: 0,
        }
    }

    /// Append a printable ASCII character (space included); anything else is ignored.
    ///
    /// The oldest character is evicted once the buffer is full.
    pub fn record(&mut self, c: char) {
        if !(' '..='~').contains(&c) {
            return;
        }

        self.buffer.push_back(c);
        if self.buffer.len() > self.capacity {
            self.buffer.pop_front();
        }
        self.recorded += 1;
    }

    /// Check whether the buffer holds the phrase closely enough.
    ///
    /// Read-only: a match stays visible until enough new characters push it out.
    pub fn check(&self) -> bool {
        let normalized = normalize(self.buffer.iter().copied());
        if self.target.is_empty() || normalized.len() < self.target.len() {
            return false;
        }

        if normalized.contains(&self.target) {
            log::debug!("Escape phrase matched exactly");
            return true;
        }

        match self.policy {
            PhrasePolicy::Contains => false,
            PhrasePolicy::EditDistance { tolerance } => {
                let best = self.closest_tail(normalized.as_bytes(), tolerance);
                let matched = best.is_some_and(|distance| distance <= tolerance);
                if matched {
                    log::debug!("Escape phrase matched with distance {:?}", best);
                }
                matched
            }
        }
    }

    /// Smallest distance between the phrase and any trailing run of the
    /// buffer from one letter shorter to `tolerance` letters longer than the phrase.
    fn closest_tail(&self, normalized: &[u8], tolerance: usize) -> Option<usize> {
        let target = self.target.as_bytes();
        let shortest = target.len().saturating_sub(1).max(1);
        let longest = (target.len() + tolerance).min(normalized.len());

        (shortest..=longest)
            .filter_map(|len| levenshtein(&normalized[normalized.len() - len..], target))
            .min()
    }

    /// Buffered characters, oldest first
    pub fn contents(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Phrase as configured
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Normalized phrase being looked for
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Total characters accepted since creation, evicted ones included
    pub fn recorded(&self) -> u64 {
        self.recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(matcher: &mut EasterEggMatcher, text: &str) {
        for c in text.chars() {
            matcher.record(c);
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Fuck You, Let Me OUT!!".chars()), "fuckyouletmeout");
        assert_eq!(normalize("a1 b2-c3".chars()), "abc");
        assert_eq!(normalize("ñé 42".chars()), "");
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein(b"kitten", b"sitting"), Some(3));
        assert_eq!(levenshtein(b"", b"abc"), Some(3));
        assert_eq!(levenshtein(b"abc", b""), Some(3));
        assert_eq!(levenshtein(b"same", b"same"), Some(0));
        assert_eq!(levenshtein(b"flaw", b"lawn"), Some(2));
    }

    #[test]
    fn test_levenshtein_length_guard() {
        let long = [b'a'; MAX_EDIT_LEN + 1];
        let max = [b'a'; MAX_EDIT_LEN];
        assert_eq!(levenshtein(&long, b"a"), None);
        assert_eq!(levenshtein(b"a", &long), None);
        assert_eq!(levenshtein(&max, b""), Some(MAX_EDIT_LEN));
    }

    #[test]
    fn test_phrase_detected() {
        let mut matcher = EasterEggMatcher::default();
        type_text(&mut matcher, "fuck you let me out");
        assert!(matcher.check());
    }

    #[test]
    fn test_phrase_detected_after_other_text() {
        let mut matcher = EasterEggMatcher::default();
        type_text(&mut matcher, "some notes here. FUCK YOU, LET ME OUT");
        assert!(matcher.check());
    }

    #[test]
    fn test_unrelated_text_rejected() {
        let mut matcher = EasterEggMatcher::default();
        type_text(&mut matcher, "abcdefghijklmnopqrst");
        assert!(!matcher.check());

        let mut matcher = EasterEggMatcher::default();
        type_text(&mut matcher, "the quick brown fox jumps");
        assert!(!matcher.check());
    }

    #[test]
    fn test_single_substitution_tolerated() {
        let mut matcher = EasterEggMatcher::default();
        type_text(&mut matcher, "fuck you lot me out");
        assert!(matcher.check());

        let mut matcher = EasterEggMatcher::default();
        type_text(&mut matcher, "fuck you let me oot");
        assert!(matcher.check());
    }

    #[test]
    fn test_substitution_rejected_by_exact_policy() {
        let mut matcher =
            EasterEggMatcher::new(DEFAULT_PHRASE, DEFAULT_CAPACITY, PhrasePolicy::Contains);
        type_text(&mut matcher, "fuck you lot me out");
        assert!(!matcher.check());
        type_text(&mut matcher, " fuck you let me out");
        assert!(matcher.check());
    }

    #[test]
    fn test_short_buffer_never_matches() {
        let mut matcher = EasterEggMatcher::default();
        // 14 letters, one short of the phrase, and within tolerance of it
        type_text(&mut matcher, "fuck you let me ou");
        assert!(!matcher.check());

        let mut matcher = EasterEggMatcher::default();
        type_text(&mut matcher, "fuck you");
        assert!(!matcher.check());
    }

    #[test]
    fn test_unfinished_phrase_after_other_text() {
        let mut matcher = EasterEggMatcher::default();
        type_text(&mut matcher, "hello there fuck you let");
        assert!(!matcher.check());
    }

    #[test]
    fn test_near_miss_accepted_within_tolerance() {
        let mut matcher = EasterEggMatcher::default();
        type_text(&mut matcher, "quick, you let me out");
        assert!(matcher.check());

        let mut matcher =
            EasterEggMatcher::new(DEFAULT_PHRASE, DEFAULT_CAPACITY, PhrasePolicy::Contains);
        type_text(&mut matcher, "quick, you let me out");
        assert!(!matcher.check());
        assert_eq!(matcher.phrase(), DEFAULT_PHRASE);
    }

    #[test]
    fn test_non_printable_ignored() {
        let mut matcher = EasterEggMatcher::default();
        matcher.record('\x1b');
        matcher.record('\n');
        matcher.record('é');
        assert!(matcher.is_empty());
        assert_eq!(matcher.recorded(), 0);
    }

    #[test]
    fn test_capacity_bound_and_recency() {
        let mut matcher = EasterEggMatcher::default();
        let text: String = (0..100).map(|i| (b'a' + (i % 26) as u8) as char).collect();
        for (i, c) in text.chars().enumerate() {
            matcher.record(c);
            assert!(matcher.len() <= DEFAULT_CAPACITY);
            let expected_len = (i + 1).min(DEFAULT_CAPACITY);
            assert_eq!(matcher.contents(), text[i + 1 - expected_len..=i]);
        }
        assert_eq!(matcher.recorded(), 100);
    }

    #[test]
    fn test_check_is_idempotent() {
        let mut matcher = EasterEggMatcher::default();
        type_text(&mut matcher, "fuck you let me out");
        assert!(matcher.check());
        assert!(matcher.check());
        assert_eq!(matcher.contents(), "fuck you let me out");
    }

    #[test]
    fn test_phrase_pushed_out_of_buffer() {
        let mut matcher = EasterEggMatcher::default();
        type_text(&mut matcher, "fuck you let me out");
        type_text(&mut matcher, " and now lots of unrelated words");
        assert!(!matcher.check());
    }
}
