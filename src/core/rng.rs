//! Deterministic random number generation and the deck shuffle seam.
//!
//! The deck shuffle is the only source of randomness in the engine. It goes
//! through the [`Shuffler`] trait so tests can replace it with a fixed order:
//!
//! - [`GameRng`]: seeded ChaCha8, uniform Fisher-Yates shuffle
//! - [`KeepOrder`]: identity, the deck is dealt in load order
//! - [`FixedPermutation`]: an explicit permutation of deck positions
//!
//! ```
//! use concept_domino::core::{GameRng, Shuffler};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.permute((0..28).collect::<Vec<_>>()), b.permute((0..28).collect::<Vec<_>>()));
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Reorders a deck before it is dealt.
///
/// Implementations must return a permutation of `items`: nothing added,
/// nothing dropped.
pub trait Shuffler {
    /// Reorder `items`.
    fn permute<T>(&mut self, items: Vec<T>) -> Vec<T>;
}

/// Deterministic RNG for deck shuffling.
///
/// Uses ChaCha8 for speed while keeping statistically unbiased output.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle a slice in place (uniform Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

impl Shuffler for GameRng {
    fn permute<T>(&mut self, mut items: Vec<T>) -> Vec<T> {
        self.shuffle(&mut items);
        items
    }
}

/// Leaves the deck in load order.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeepOrder;

impl Shuffler for KeepOrder {
    fn permute<T>(&mut self, items: Vec<T>) -> Vec<T> {
        items
    }
}

/// Deals the deck in an explicit order of original positions.
///
/// `order[i]` names the input position that lands at output position `i`.
/// Positions that are out of range or repeated are skipped; inputs never
/// named keep their relative order at the end, so the output is always a
/// permutation of the input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedPermutation {
    order: Vec<usize>,
}

impl FixedPermutation {
    /// Create from a list of input positions.
    #[must_use]
    pub fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    /// Reverse of the input order, for `len` items.
    #[must_use]
    pub fn reversed(len: usize) -> Self {
        Self::new((0..len).rev().collect())
    }
}

impl Shuffler for FixedPermutation {
    fn permute<T>(&mut self, items: Vec<T>) -> Vec<T> {
        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        let mut out = Vec::with_capacity(slots.len());

        for &position in &self.order {
            if let Some(item) = slots.get_mut(position).and_then(Option::take) {
                out.push(item);
            }
        }

        out.extend(slots.into_iter().flatten());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let deck: Vec<u32> = (0..28).collect();
        assert_eq!(rng1.permute(deck.clone()), rng2.permute(deck));
    }

    #[test]
    fn test_different_seeds() {
        let deck: Vec<u32> = (0..28).collect();
        let a = GameRng::new(1).permute(deck.clone());
        let b = GameRng::new(2).permute(deck);

        assert_ne!(a, b);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let original: Vec<u32> = (0..28).collect();

        let mut shuffled = rng.permute(original.clone());
        assert_ne!(shuffled, original);

        shuffled.sort_unstable();
        assert_eq!(shuffled, original);
    }

    #[test]
    fn test_keep_order() {
        assert_eq!(KeepOrder.permute(vec![3, 1, 2]), vec![3, 1, 2]);
    }

    #[test]
    fn test_fixed_permutation() {
        let mut perm = FixedPermutation::new(vec![2, 0, 1]);
        assert_eq!(perm.permute(vec!['a', 'b', 'c']), vec!['c', 'a', 'b']);

        assert_eq!(FixedPermutation::reversed(3).permute(vec![1, 2, 3]), vec![3, 2, 1]);
    }

    #[test]
    fn test_fixed_permutation_tolerates_bad_positions() {
        // 9 is out of range, 0 repeats, 2 is never named
        let mut perm = FixedPermutation::new(vec![1, 9, 0, 0]);
        assert_eq!(perm.permute(vec!['a', 'b', 'c']), vec!['b', 'a', 'c']);
    }
}
