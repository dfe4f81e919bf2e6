use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// How upcoming piece kinds are drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Randomizer {
    /// Each kind is drawn independently and uniformly.
    #[default]
    Uniform,
    /// Kinds are dealt from shuffled bags holding one of each kind.
    SevenBag,
}

/// Seed for deterministic piece generation.
///
/// 128-bit seed for the piece generator's PRNG. The same seed, randomizer and
/// queue length always deal the same sequence of kinds.
///
/// Serializes (and parses) as a 32-character hex string.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceQueue, PieceSeed, Randomizer};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// let mut a = PieceQueue::with_seed(seed, Randomizer::Uniform, 5);
/// let mut b = PieceQueue::with_seed(seed, Randomizer::Uniform, 5);
/// assert_eq!(a.pop_next(), b.pop_next());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl PieceSeed {
    /// Raw seed bytes, for seeding other generators from the same value.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl From<u128> for PieceSeed {
    fn from(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed: expected 32 hex characters, got {input:?}")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self::from(num))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Fixed-length lookahead of upcoming piece kinds.
///
/// Every [`Self::pop_next`] dequeues the front kind and appends a freshly
/// generated one, so the visible queue length never changes.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    randomizer: Randomizer,
    bag: Vec<PieceKind>,
    queue: VecDeque<PieceKind>,
    len: usize,
}

impl PieceQueue {
    /// Creates a queue of `len` kinds dealt from `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    #[must_use]
    pub fn with_seed(seed: PieceSeed, randomizer: Randomizer, len: usize) -> Self {
        assert!(len > 0, "next queue must hold at least one piece");
        let mut this = Self {
            rng: Pcg32::from_seed(seed.0),
            randomizer,
            bag: Vec::with_capacity(PieceKind::LEN),
            queue: VecDeque::with_capacity(len + 1),
            len,
        };
        this.fill();
        this
    }

    fn generate(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Uniform => self.rng.random(),
            Randomizer::SevenBag => {
                if self.bag.is_empty() {
                    self.bag.extend(PieceKind::ALL);
                    self.bag.shuffle(&mut self.rng);
                }
                self.bag.pop().unwrap_or(PieceKind::I)
            }
        }
    }

    fn fill(&mut self) {
        while self.queue.len() < self.len {
            let kind = self.generate();
            self.queue.push_back(kind);
        }
    }

    /// Dequeues the next kind and tops the queue back up.
    pub fn pop_next(&mut self) -> PieceKind {
        let next = self.queue.pop_front().unwrap_or_else(|| self.generate());
        self.fill();
        next
    }

    /// Discards the queued kinds (and any partial bag) and deals a fresh queue.
    ///
    /// The PRNG keeps running, so a refilled queue continues the seeded
    /// sequence rather than repeating it.
    pub fn refill(&mut self) {
        self.queue.clear();
        self.bag.clear();
        self.fill();
    }

    /// Upcoming kinds, front first.
    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> PieceSeed {
        PieceSeed::from(0x1234_5678_9abc_def0_1122_3344_5566_7788)
    }

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = PieceSeed([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
            assert_eq!(seed.to_bytes()[0], 0x01);
        }

        #[test]
        fn test_known_value_all_zeros() {
            let seed = PieceSeed::from(0);
            assert_eq!(seed.to_string(), "0".repeat(32));
            assert_eq!(seed.to_string().parse::<PieceSeed>().unwrap(), seed);
        }

        #[test]
        fn test_parse_uppercase_hex() {
            let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed, PieceSeed::from(0x0123_4567_89ab_cdef_fedc_ba98_7654_3210));
        }

        #[test]
        fn test_error_cases() {
            for input in [
                "",
                "0123456789abcdef0123456789abcde",
                "0123456789abcdef0123456789abcdef0",
                "ghijklmnopqrstuvwxyzghijklmnopqr",
            ] {
                let err = input.parse::<PieceSeed>().unwrap_err();
                assert!(err.to_string().contains("invalid hex"), "{err}");

                let json = format!("\"{input}\"");
                assert!(serde_json::from_str::<PieceSeed>(&json).is_err());
            }
        }
    }

    #[test]
    fn test_queue_length_is_constant() {
        let mut queue = PieceQueue::with_seed(seed(), Randomizer::Uniform, 5);
        for _ in 0..50 {
            assert_eq!(queue.next_pieces().count(), 5);
            queue.pop_next();
        }
        assert_eq!(queue.next_pieces().count(), 5);
    }

    #[test]
    fn test_pop_returns_front_and_shifts() {
        let mut queue = PieceQueue::with_seed(seed(), Randomizer::Uniform, 3);
        let before: Vec<_> = queue.next_pieces().collect();
        let popped = queue.pop_next();
        let after: Vec<_> = queue.next_pieces().collect();
        assert_eq!(popped, before[0]);
        assert_eq!(after[..2], before[1..]);
    }

    #[test]
    fn test_deterministic_piece_generation() {
        for randomizer in [Randomizer::Uniform, Randomizer::SevenBag] {
            let mut queue1 = PieceQueue::with_seed(seed(), randomizer, 5);
            let mut queue2 = PieceQueue::with_seed(seed(), randomizer, 5);
            for _ in 0..20 {
                assert_eq!(queue1.pop_next(), queue2.pop_next());
            }
        }
    }

    #[test]
    fn test_seven_bag_deals_each_kind_once_per_bag() {
        let mut queue = PieceQueue::with_seed(seed(), Randomizer::SevenBag, 1);
        for _ in 0..4 {
            let mut bag: Vec<_> = (0..PieceKind::LEN).map(|_| queue.pop_next()).collect();
            bag.sort_by_key(|k| k.id());
            assert_eq!(bag, PieceKind::ALL);
        }
    }

    #[test]
    fn test_refill_keeps_length() {
        let mut queue = PieceQueue::with_seed(seed(), Randomizer::SevenBag, 4);
        queue.pop_next();
        queue.refill();
        assert_eq!(queue.next_pieces().count(), 4);
    }

    #[test]
    #[should_panic(expected = "next queue must hold at least one piece")]
    fn test_zero_length_rejected() {
        let _ = PieceQueue::with_seed(seed(), Randomizer::Uniform, 0);
    }
}
