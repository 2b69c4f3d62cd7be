//! Seeded deterministic shuffle for week-1 groupings.
//!
//! The generator is a plain xorshift32 driven by a multiply-by-31 string
//! hash. It exists to make groupings reproducible, NOT to be unpredictable:
//! never use it where an adversary could benefit from guessing the output.

/// Fold the UTF-16 code units of `seed` into a 32-bit accumulator.
///
/// An empty seed hashes to 0.
pub fn seed_hash(seed: &str) -> u32 {
    seed.encode_utf16()
        .fold(0u32, |acc, unit| acc.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

/// xorshift32 stream yielding values in `[0, 1)` at 1/1000 resolution.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: &str) -> Self {
        Self { state: seed_hash(seed) }
    }

    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        s
    }

    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32() % 1000) / 1000.0
    }

    /// Index in `0..=upper`.
    fn index_through(&mut self, upper: usize) -> usize {
        (self.next_f64() * (upper + 1) as f64).floor() as usize
    }
}

/// Fisher-Yates shuffle of a copy of `items`, walking from the last index down to 1.
///
/// Same `items` and `seed` always give the same permutation. A zero hash
/// (empty seed) keeps the generator at zero, which still yields a fixed permutation.
pub fn shuffle<T: Clone>(items: &[T], seed: &str) -> Vec<T> {
    let mut out = items.to_vec();
    let mut rng = SeededRng::new(seed);
    for i in (1..out.len()).rev() {
        let j = rng.index_through(i);
        out.swap(i, j);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seed_hash_matches_multiply_by_31() {
        assert_eq!(seed_hash(""), 0);
        assert_eq!(seed_hash("a"), 97);
        assert_eq!(seed_hash("ab"), 97 * 31 + 98);
        // Long seeds wrap modulo 2^32
        let long = "x".repeat(64);
        let expected = long.bytes().fold(0u64, |acc, b| (acc * 31 + u64::from(b)) % (1u64 << 32));
        assert_eq!(u64::from(seed_hash(&long)), expected);
    }

    #[test]
    fn test_xorshift_known_sequence() {
        let mut rng = SeededRng::from_state(1);
        assert_eq!(rng.next_u32(), 270_369);
        assert_eq!(rng.next_u32(), 67_634_689);
    }

    #[test]
    fn test_zero_state_is_fixed_point() {
        let mut rng = SeededRng::new("");
        assert_eq!(rng.next_u32(), 0);
        assert_eq!(rng.next_f64(), 0.0);
    }

    #[test]
    fn test_empty_seed_rotates_into_front() {
        // Every draw is 0, so each index swaps with position 0.
        assert_eq!(shuffle(&[1, 2, 3, 4], ""), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_empty_and_singleton_unchanged() {
        assert!(shuffle::<u8>(&[], "seed").is_empty());
        assert_eq!(shuffle(&["solo"], "seed"), vec!["solo"]);
    }

    #[test]
    fn test_pinned_permutation() {
        let roster: Vec<u32> = (0..12).collect();
        assert_eq!(shuffle(&roster, "league-alpha"), vec![4, 0, 11, 2, 5, 1, 9, 7, 8, 6, 3, 10]);
    }

    #[test]
    fn test_different_seeds_differ() {
        let roster: Vec<u32> = (0..12).collect();
        assert_ne!(shuffle(&roster, "league-alpha"), shuffle(&roster, "league-bravo"));
    }

    #[test]
    fn test_input_untouched() {
        let roster = vec!["a", "b", "c", "d", "e"];
        let _ = shuffle(&roster, "seed");
        assert_eq!(roster, vec!["a", "b", "c", "d", "e"]);
    }

    proptest! {
        #[test]
        fn prop_shuffle_is_deterministic(items in prop::collection::vec(any::<u16>(), 0..40), seed in ".{0,24}") {
            prop_assert_eq!(shuffle(&items, &seed), shuffle(&items, &seed));
        }

        #[test]
        fn prop_shuffle_is_permutation(items in prop::collection::vec(any::<u16>(), 0..40), seed in ".{0,24}") {
            let mut shuffled = shuffle(&items, &seed);
            let mut sorted = items.clone();
            shuffled.sort_unstable();
            sorted.sort_unstable();
            prop_assert_eq!(shuffled, sorted);
        }
    }
}
