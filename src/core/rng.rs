//! Seeded randomness for dealing and computer players.
//!
//! Every `GameState` owns a `GameRng`; a session owns one more that hands
//! out seeds for seats and deals. With a fixed seed the shuffle, the
//! starting attacker and every rematch deal are reproducible:
//!
//! ```
//! use durak_engine::core::GameRng;
//!
//! let a = GameRng::new(42).shuffled_deck(36);
//! let b = GameRng::new(42).shuffled_deck(36);
//! assert_eq!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::card::{Card, FULL_DECK};

/// ChaCha8 stream plus the seed it started from.
///
/// Cloning copies the stream position, so a cloned game state replays the
/// same future deals as the original.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeded from system entropy, for unseeded games.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a seed for a derived generator (a seat or the next deal).
    pub fn next_seed(&mut self) -> u64 {
        self.inner.gen()
    }

    /// Shuffle the full deck and keep the first `size` cards.
    pub fn shuffled_deck(&mut self, size: usize) -> Vec<Card> {
        let mut cards = FULL_DECK.to_vec();
        self.shuffle(&mut cards);
        cards.truncate(size);
        cards
    }

    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_deck() {
        let a = GameRng::new(42).shuffled_deck(36);
        let b = GameRng::new(42).shuffled_deck(36);
        assert_eq!(a, b);
        assert_ne!(a, FULL_DECK.to_vec());
    }

    #[test]
    fn test_different_seeds_different_decks() {
        let a = GameRng::new(1).shuffled_deck(36);
        let b = GameRng::new(2).shuffled_deck(36);
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_deck_has_distinct_cards() {
        let mut deck = GameRng::new(9).shuffled_deck(12);
        assert_eq!(deck.len(), 12);
        deck.sort_unstable();
        deck.dedup();
        assert_eq!(deck.len(), 12);
    }

    #[test]
    fn test_clone_continues_same_stream() {
        let mut rng = GameRng::new(7);
        rng.next_seed();
        let mut cloned = rng.clone();

        assert_eq!(rng.shuffled_deck(36), cloned.shuffled_deck(36));
        assert_eq!(cloned.seed(), 7);
    }

    #[test]
    fn test_derived_seeds_differ() {
        let mut rng = GameRng::new(3);
        let seeds: Vec<u64> = (0..4).map(|_| rng.next_seed()).collect();
        assert!(seeds.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let hand = &FULL_DECK[..6];

        let chosen = rng.choose(hand).copied();
        assert!(chosen.is_some_and(|card| hand.contains(&card)));

        let empty: [Card; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
