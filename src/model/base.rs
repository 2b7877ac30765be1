use rand::Rng;

/// One nucleotide symbol of the 4-letter alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    /// Adenine.
    A,
    /// Thymine.
    T,
    /// Cytosine.
    C,
    /// Guanine.
    G,
}

impl Base {
    /// All four symbols, in display order.
    pub const ALL: [Self; 4] = [Self::A, Self::T, Self::C, Self::G];

    /// Watson-Crick complement. Total, symmetric, and involutive:
    /// `b.complement().complement() == b` for every `b`.
    #[must_use]
    pub fn complement(self) -> Self {
        match self {
            Self::A => Self::T,
            Self::T => Self::A,
            Self::C => Self::G,
            Self::G => Self::C,
        }
    }

    /// Whether this symbol forms a triple hydrogen bond with its partner
    /// (G≡C pairs; A=T pairs form two bonds).
    #[must_use]
    pub fn triple_bonded(self) -> bool {
        matches!(self, Self::C | Self::G)
    }

    /// Uniform random symbol.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Single-letter display form.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::A => 'A',
            Self::T => 'T',
            Self::C => 'C',
            Self::G => 'G',
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn complement_is_an_involution() {
        for base in Base::ALL {
            assert_eq!(base.complement().complement(), base);
        }
    }

    #[test]
    fn complement_never_fixes_a_base() {
        for base in Base::ALL {
            assert_ne!(base.complement(), base);
        }
    }

    #[test]
    fn bond_multiplicity_follows_pair_type() {
        assert!(Base::G.triple_bonded());
        assert!(Base::C.triple_bonded());
        assert!(!Base::A.triple_bonded());
        assert!(!Base::T.triple_bonded());
    }

    #[test]
    fn random_covers_the_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let base = Base::random(&mut rng);
            seen[Base::ALL.iter().position(|b| *b == base).unwrap()] = true;
        }
        assert_eq!(seen, [true; 4]);
    }
}
