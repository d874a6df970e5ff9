//! Reproducible random input for building collections.
//!
//! Every benchmark pass constructs its own [`Draws`] from the configured seed,
//! so the dynamic and the erased collection are built from the exact same
//! sequence of species and indices.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::animal::{INDEX_BOUND, Species};

/// One element of a collection, before it is turned into an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Draw {
    /// Which animal to build.
    pub species: Species,
    /// The index the animal speaks at, in `0..INDEX_BOUND`.
    pub index: usize,
}

/// Iterator over `count` seeded draws.
///
/// For each element the generator first flips a fair coin for the species
/// (heads is a dog) and then picks an index uniformly from
/// `0..`[`INDEX_BOUND`].
///
/// # Examples
///
/// ```
/// use vtable_bench::draws::Draws;
///
/// let first: Vec<_> = Draws::new(0, 8).collect();
/// let second: Vec<_> = Draws::new(0, 8).collect();
/// assert_eq!(first, second);
/// ```
#[derive(Debug, Clone)]
pub struct Draws {
    rng: StdRng,
    remaining: usize,
}

impl Draws {
    /// Creates a freshly seeded sequence of `count` draws.
    pub fn new(seed: u64, count: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            remaining: count,
        }
    }
}

impl Iterator for Draws {
    type Item = Draw;

    #[inline]
    fn next(&mut self) -> Option<Draw> {
        self.remaining = self.remaining.checked_sub(1)?;

        let species = if self.rng.r#gen::<bool>() {
            Species::Dog
        } else {
            Species::Cat
        };
        let index = self.rng.gen_range(0..INDEX_BOUND);

        Some(Draw { species, index })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Draws {}

impl core::iter::FusedIterator for Draws {}
