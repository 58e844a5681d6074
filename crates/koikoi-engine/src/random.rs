//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for reproducible shuffles and AI decisions.
//! Uses a simple but effective xorshift algorithm.
//!
//! The exact output sequence is part of the peer-to-peer replay
//! contract: both peers shuffle and tie-break from the same seed, so
//! the generator must never change behavior under a dependency bump.
//! That is why it is written out here instead of pulling in `rand`.

/// Labels for derived sub-streams, so the deck shuffle and AI
/// decisions never consume from the same sequence.
pub mod stream {
    pub const SHUFFLE: u64 = 0x01;
    pub const AI: u64 = 0x02;
}

/// Seeded random number generator
///
/// Deterministic: same seed + stream labels = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a caller-supplied 64-bit seed
    pub fn new(seed: u64) -> Self {
        // xorshift state must be non-zero
        let mut state = seed ^ 0x9e3779b97f4a7c15;
        if state == 0 {
            state = 0x2545f4914f6cdd1d;
        }

        // Warm up the generator
        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }

        rng
    }

    /// Derive an independent RNG for a labeled sub-stream
    pub fn for_stream(&self, label: u64) -> Self {
        let mut new_state = self.state;
        new_state ^= label.wrapping_mul(0x9e3779b97f4a7c15);
        if new_state == 0 {
            new_state = 0x2545f4914f6cdd1d;
        }

        let mut rng = Self { state: new_state };
        rng.next_u64(); // Mix
        rng
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate next u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a value 0-99 (for percentage checks)
    pub fn next_percent(&mut self) -> u8 {
        (self.next_u32() % 100) as u8
    }

    /// Generate a value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }
}
