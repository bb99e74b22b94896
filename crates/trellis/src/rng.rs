//! Seeded pseudo-random numbers for reproducible pattern randomization.

use std::fmt;

/// A seed for [`Rng`]: either a number or any string (hashed).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Seed {
    Number(u64),
    Text(String),
}

impl Seed {
    /// Parse user input: all-digit strings become numbers, anything else is
    /// hashed as text.
    pub fn parse(input: &str) -> Seed {
        match input.trim().parse::<u64>() {
            Ok(n) => Seed::Number(n),
            Err(_) => Seed::Text(input.to_string()),
        }
    }

    /// The 64-bit state this seed starts from.
    pub fn to_u64(&self) -> u64 {
        match self {
            Seed::Number(n) => *n,
            Seed::Text(text) => fnv1a(text.as_bytes()),
        }
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Seed::Number(n)
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Seed::Text(text.to_string())
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        Seed::Text(text)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Number(n) => write!(f, "{n}"),
            Seed::Text(text) => f.write_str(text),
        }
    }
}

/// 64-bit FNV-1a.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, &b| (hash ^ u64::from(b)).wrapping_mul(PRIME))
}

/// A fast, deterministic pseudo-random number generator.
///
/// Uses a Linear Congruential Generator (LCG) with Knuth's MMIX constants.
/// Not suitable for anything security related.
///
/// # Example
/// ```
/// use trellis::rng::Rng;
///
/// let mut rng = Rng::from_seed("sunday");
/// let cell = rng.next_int(12, 45);
/// assert!((12..=45).contains(&cell));
/// ```
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given numeric state.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    /// Create a new RNG from a number or string seed.
    pub fn from_seed(seed: impl Into<Seed>) -> Self {
        Self::new(seed.into().to_u64())
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// A float in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        // High bits of an LCG are the well-distributed ones.
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// A float in `[min, max)`.
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// An integer in `[min, max]`, both ends inclusive.
    #[inline]
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        let span = (max - min + 1).max(1) as f64;
        min + (self.next_f64() * span) as i64
    }

    /// A random index in `[0, len)`.
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64) as usize
    }

    /// A random element of `items`, or `None` when empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_index(items.len()))
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(0)
    }
}
