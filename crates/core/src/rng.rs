//! RNG module - uniform random piece selection
//!
//! Each piece is drawn independently and uniformly from the eight catalog shapes.
//! The generator is a small LCG, so a session is fully reproducible from its seed.

use crate::types::PieceKind;

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;

/// Seeded piece generator (32-bit LCG, modulus 2^32)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seed 0 is replaced by 1.
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Value in `[0, max)` taken from the high half of the state
    ///
    /// The low bits of a power-of-two LCG cycle with a tiny period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Uniformly random piece kind
    pub fn next_piece(&mut self) -> PieceKind {
        let index = self.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[index]
    }

    /// Current state; seeding a new generator with it continues the sequence
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
