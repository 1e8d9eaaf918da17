//! Piece generation: a seeded LCG feeding a shuffled seven-piece bag.
//!
//! The bag holds one of each kind. Draws consume it in order; when the
//! last piece is taken the bag refills and reshuffles. Every kind
//! therefore appears exactly once per seven draws.

use crate::types::PieceKind;

/// Linear congruential generator (Numerical Recipes constants). Small,
/// deterministic, and plenty for shuffling a seven-element bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seed the generator. A zero seed is bumped to avoid the all-zero
    /// fixed point.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform-ish value in `[0, max)`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates shuffle: walk from the last index down to 1, swapping
    /// with a random index at or below.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range(i as u32 + 1) as usize;
            slice.swap(i, j);
        }
    }
}

/// Seven-bag piece source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceBag {
    bag: [PieceKind; 7],
    index: usize,
    rng: SimpleRng,
}

impl PieceBag {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            index: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.index = 0;
    }

    /// Next piece. Refills and reshuffles first when the bag is spent.
    pub fn draw(&mut self) -> PieceKind {
        if self.index >= self.bag.len() {
            self.refill();
        }
        let kind = self.bag[self.index];
        self.index += 1;
        kind
    }

    /// Pieces left in the current bag.
    #[cfg(test)]
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.index..]
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}
