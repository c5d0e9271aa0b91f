//! Random input data for benchmarks and tests
//!
//! String keys are lowercase ASCII words of 5 to 15 letters. Integers are
//! drawn uniformly from `1 ..= 1_000_000`.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Range of generated string lengths
pub const STRING_LENGTHS: RangeInclusive<usize> = 5..=15;

/// Range of generated integers
pub const INTEGER_RANGE: RangeInclusive<u32> = 1..=1_000_000;

/// A generator seeded with `seed`, or from system entropy when `None`.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// `count` random lowercase strings.
///
/// Duplicates are possible, as with any independent draws.
pub fn random_strings<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<String> {
    let lengths = Uniform::from(STRING_LENGTHS);
    let letters = Uniform::from(b'a'..=b'z');
    (0..count)
        .map(|_| {
            let len = lengths.sample(rng);
            (0..len).map(|_| char::from(letters.sample(rng))).collect()
        })
        .collect()
}

/// `count` random integers from [`INTEGER_RANGE`].
pub fn random_integers<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<u32> {
    let values = Uniform::from(INTEGER_RANGE);
    (0..count).map(|_| values.sample(rng)).collect()
}
