//! RNG module - injectable piece selection
//!
//! The engine never reaches for a global generator. Anything implementing
//! [`PieceSource`] picks the next catalog index:
//!
//! - [`SimpleRng`]: seeded LCG, uniform draw (default for real games)
//! - [`PieceSequence`]: scripted kinds, cycling (deterministic tests)
//! - any `FnMut(usize) -> usize` closure

use crate::types::PieceKind;

/// Source of catalog indices for spawning.
pub trait PieceSource {
    /// Return an index in `0..len`. Out-of-range values are wrapped by the caller.
    fn next_index(&mut self, len: usize) -> usize;

    /// Draw the next piece kind from the catalog
    fn next_kind(&mut self) -> PieceKind {
        let len = PieceKind::ALL.len();
        PieceKind::ALL[self.next_index(len) % len]
    }
}

impl<F> PieceSource for F
where
    F: FnMut(usize) -> usize,
{
    fn next_index(&mut self, len: usize) -> usize {
        self(len)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max).
    ///
    /// Uses the high bits; the low bits of an LCG with a power-of-two modulus
    /// cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for SimpleRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }
}

/// Scripted piece order, repeated forever.
#[derive(Debug, Clone)]
pub struct PieceSequence {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl PieceSequence {
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "piece sequence needs at least one kind");
        Self { kinds, pos: 0 }
    }

    /// The same kind every time
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceSource for PieceSequence {
    fn next_index(&mut self, _len: usize) -> usize {
        self.next_kind() as usize
    }

    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.pos];
        self.pos = (self.pos + 1) % self.kinds.len();
        kind
    }
}
