//! Base-pair sequence: generation, resizing, and mutation.
//!
//! A [`Sequence`] is an ordered list of [`BasePair`] records. Transformations
//! are copy-on-write where the consumer needs change detection (`mutate`) and
//! move-through where identity matters (`resize` returns the same allocation
//! when the length is unchanged).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use rand::Rng;

use crate::error::HelixError;
use crate::model::view_state::{MAX_LENGTH, MIN_LENGTH};
use crate::model::Base;

/// How long a mutated pair stays highlighted.
pub const FLASH_WINDOW: Duration = Duration::from_millis(500);

/// Fraction of the sequence targeted by one mutate action.
const MUTATION_DENOMINATOR: usize = 10;

static NEXT_PAIR_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for a base pair, stable across mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairId(u64);

impl PairId {
    fn fresh() -> Self {
        Self(NEXT_PAIR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One rung of the helix: two complementary symbols plus bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasePair {
    /// Stable identity, preserved when the pair is mutated in place.
    pub id: PairId,
    /// Symbol on the left strand.
    pub left: Base,
    /// Symbol on the right strand. Invariant: `left.complement()`.
    pub right: Base,
    /// Set when the pair was last rewritten by a mutate action.
    pub mutated_at: Option<Instant>,
}

impl BasePair {
    /// Random pair with a fresh id. `right` is derived from `left` via the
    /// complement table, never drawn independently.
    pub fn random(rng: &mut impl Rng) -> Self {
        let left = Base::random(rng);
        Self {
            id: PairId::fresh(),
            left,
            right: left.complement(),
            mutated_at: None,
        }
    }

    /// Whether the mutation highlight is active at `now`. One-shot check:
    /// evaluated at layout time, not an animated fade.
    #[must_use]
    pub fn is_flashing(&self, now: Instant) -> bool {
        self.mutated_at
            .is_some_and(|t| now.saturating_duration_since(t) < FLASH_WINDOW)
    }

    /// Number of hydrogen bonds rendered for this pair (3 for G/C on the
    /// left strand, otherwise 2).
    #[must_use]
    pub fn bond_count(&self) -> usize {
        if self.left.triple_bonded() {
            3
        } else {
            2
        }
    }
}

/// Ordered list of base pairs, length bounded to `[6, 60]`.
///
/// Order is significant: it determines each pair's vertical position and
/// cumulative twist angle in the layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sequence {
    pairs: Vec<BasePair>,
}

impl Sequence {
    /// Generate `n` independent random pairs.
    ///
    /// # Errors
    ///
    /// `LengthOutOfRange` if `n` is outside `[6, 60]`.
    pub fn generate(n: usize, rng: &mut impl Rng) -> Result<Self, HelixError> {
        validate_length(n)?;
        Ok(Self {
            pairs: (0..n).map(|_| BasePair::random(rng)).collect(),
        })
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `true` when the sequence holds no pairs (only the placeholder default
    /// state; a generated sequence is never empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pairs, in order.
    #[must_use]
    pub fn pairs(&self) -> &[BasePair] {
        &self.pairs
    }

    /// Resize to `new_len` pairs. Growing appends fresh random pairs;
    /// shrinking truncates. Existing pairs and their ids are preserved in
    /// order — no reshuffle. An equal length returns `self` unchanged, same
    /// allocation and all.
    ///
    /// # Errors
    ///
    /// `LengthOutOfRange` if `new_len` is outside `[6, 60]`.
    pub fn resize(
        mut self,
        new_len: usize,
        rng: &mut impl Rng,
    ) -> Result<Self, HelixError> {
        validate_length(new_len)?;
        let len = self.pairs.len();
        if new_len > len {
            self.pairs
                .extend((len..new_len).map(|_| BasePair::random(rng)));
        } else {
            // Covers the equal case too: Vec::truncate to the current length
            // is a no-op and keeps the allocation.
            self.pairs.truncate(new_len);
        }
        Ok(self)
    }

    /// Randomize roughly 10% of the sequence (at least one pair), stamping
    /// each rewritten pair with `now` for the highlight window.
    ///
    /// Indices are drawn uniformly **with replacement**: duplicates simply
    /// overwrite the same slot, so the number of distinct changed pairs can
    /// fall below the target. The draw count is a target, not a guaranteed
    /// distinct set.
    ///
    /// Copy-on-write: returns a new sequence, `self` is untouched, and ids
    /// at mutated positions are preserved.
    #[must_use]
    pub fn mutate(&self, rng: &mut impl Rng, now: Instant) -> Self {
        let mut pairs = self.pairs.clone();
        if pairs.is_empty() {
            return Self { pairs };
        }
        let draws = (pairs.len() / MUTATION_DENOMINATOR).max(1);
        for _ in 0..draws {
            let idx = rng.random_range(0..pairs.len());
            let id = pairs[idx].id;
            let mut fresh = BasePair::random(rng);
            fresh.id = id;
            fresh.mutated_at = Some(now);
            pairs[idx] = fresh;
        }
        Self { pairs }
    }

    /// Whether any pair's mutation highlight is active at `now`.
    #[must_use]
    pub fn any_flashing(&self, now: Instant) -> bool {
        self.pairs.iter().any(|p| p.is_flashing(now))
    }
}

fn validate_length(n: usize) -> Result<(), HelixError> {
    if (MIN_LENGTH..=MAX_LENGTH).contains(&n) {
        Ok(())
    } else {
        Err(HelixError::LengthOutOfRange(n))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn generate_yields_exactly_n_complementary_pairs() {
        let mut rng = rng();
        for n in [6, 20, 60] {
            let seq = Sequence::generate(n, &mut rng).unwrap();
            assert_eq!(seq.len(), n);
            for pair in seq.pairs() {
                assert_eq!(pair.right, pair.left.complement());
                assert!(pair.mutated_at.is_none());
            }
        }
    }

    #[test]
    fn generate_rejects_out_of_range_lengths() {
        let mut rng = rng();
        assert!(matches!(
            Sequence::generate(5, &mut rng),
            Err(HelixError::LengthOutOfRange(5))
        ));
        assert!(matches!(
            Sequence::generate(61, &mut rng),
            Err(HelixError::LengthOutOfRange(61))
        ));
    }

    #[test]
    fn pair_ids_are_unique() {
        let mut rng = rng();
        let seq = Sequence::generate(60, &mut rng).unwrap();
        let ids: std::collections::HashSet<_> =
            seq.pairs().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 60);
    }

    #[test]
    fn resize_to_same_length_is_identity_without_reallocation() {
        let mut rng = rng();
        let seq = Sequence::generate(20, &mut rng).unwrap();
        let before = seq.clone();
        let ptr = seq.pairs().as_ptr();
        let resized = seq.resize(20, &mut rng).unwrap();
        assert_eq!(resized, before);
        assert_eq!(resized.pairs().as_ptr(), ptr);
    }

    #[test]
    fn resize_grow_preserves_prefix_and_appends_valid_pairs() {
        let mut rng = rng();
        let seq = Sequence::generate(10, &mut rng).unwrap();
        let original = seq.clone();
        let grown = seq.resize(25, &mut rng).unwrap();
        assert_eq!(grown.len(), 25);
        assert_eq!(&grown.pairs()[..10], original.pairs());
        for pair in &grown.pairs()[10..] {
            assert_eq!(pair.right, pair.left.complement());
        }
    }

    #[test]
    fn resize_shrink_is_an_exact_prefix() {
        let mut rng = rng();
        let seq = Sequence::generate(30, &mut rng).unwrap();
        let original = seq.clone();
        let shrunk = seq.resize(8, &mut rng).unwrap();
        assert_eq!(shrunk.pairs(), &original.pairs()[..8]);
    }

    #[test]
    fn resize_rejects_out_of_range_lengths() {
        let mut rng = rng();
        let seq = Sequence::generate(20, &mut rng).unwrap();
        assert!(matches!(
            seq.clone().resize(3, &mut rng),
            Err(HelixError::LengthOutOfRange(3))
        ));
        assert!(matches!(
            seq.resize(100, &mut rng),
            Err(HelixError::LengthOutOfRange(100))
        ));
    }

    #[test]
    fn mutate_preserves_length_ids_and_the_original() {
        let mut rng = rng();
        let seq = Sequence::generate(40, &mut rng).unwrap();
        let snapshot = seq.clone();
        let now = Instant::now();
        let mutated = seq.mutate(&mut rng, now);

        assert_eq!(seq, snapshot, "copy-on-write: original untouched");
        assert_eq!(mutated.len(), seq.len());
        for (old, new) in seq.pairs().iter().zip(mutated.pairs()) {
            assert_eq!(old.id, new.id);
        }

        let changed = seq
            .pairs()
            .iter()
            .zip(mutated.pairs())
            .filter(|(old, new)| old != new)
            .count();
        // Target is len/10 = 4 draws; replacement draws (and a redraw of the
        // same symbol) may land below that, but the timestamp stamp makes at
        // least one pair observably different.
        assert!(changed >= 1);
        assert!(changed <= 4);
        for (old, new) in seq.pairs().iter().zip(mutated.pairs()) {
            if old != new {
                assert_eq!(new.mutated_at, Some(now));
                assert_eq!(new.right, new.left.complement());
            } else {
                assert_eq!(new.mutated_at, old.mutated_at);
            }
        }
    }

    #[test]
    fn mutate_stamps_at_least_one_pair() {
        let mut rng = rng();
        let seq = Sequence::generate(6, &mut rng).unwrap();
        let now = Instant::now();
        let mutated = seq.mutate(&mut rng, now);
        let stamped = mutated
            .pairs()
            .iter()
            .filter(|p| p.mutated_at == Some(now))
            .count();
        assert!(stamped >= 1, "min(1) mutation even for short sequences");
    }

    #[test]
    fn flash_window_boundaries() {
        let mut rng = rng();
        let now = Instant::now();
        let mut pair = BasePair::random(&mut rng);

        pair.mutated_at = now.checked_sub(Duration::from_millis(499));
        assert!(pair.mutated_at.is_some());
        assert!(pair.is_flashing(now), "499ms old: still inside the window");

        pair.mutated_at = now.checked_sub(Duration::from_millis(501));
        assert!(pair.mutated_at.is_some());
        assert!(!pair.is_flashing(now), "501ms old: window has closed");

        pair.mutated_at = None;
        assert!(!pair.is_flashing(now));
    }

    #[test]
    fn any_flashing_tracks_window_expiry() {
        let mut rng = rng();
        let seq = Sequence::generate(10, &mut rng).unwrap();
        let now = Instant::now();
        let mutated = seq.mutate(&mut rng, now);
        assert!(mutated.any_flashing(now));
        let later = now + FLASH_WINDOW;
        assert!(!mutated.any_flashing(later));
        assert!(!seq.any_flashing(now));
    }

    #[test]
    fn bond_count_rule() {
        let mut rng = rng();
        let mut pair = BasePair::random(&mut rng);
        for (left, expected) in
            [(Base::G, 3), (Base::C, 3), (Base::A, 2), (Base::T, 2)]
        {
            pair.left = left;
            pair.right = left.complement();
            assert_eq!(pair.bond_count(), expected);
        }
    }
}
