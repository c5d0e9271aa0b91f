//! The input-size sweep shared by the benches and the CLI driver
//!
//! Sizes double from a minimum to a maximum, both inclusive:
//! 8, 16, 32, ..., 8192 by default.

/// Smallest input size in the default sweep
pub const DEFAULT_MIN: usize = 8;

/// Largest input size in the default sweep
pub const DEFAULT_MAX: usize = 8 << 10;

/// Doubling sizes from `min` up to and including `max`.
///
/// Yields nothing if `min` is zero or larger than `max`.
pub fn sizes(min: usize, max: usize) -> impl Iterator<Item = usize> {
    let first = (min != 0 && min <= max).then_some(min);
    std::iter::successors(first, move |&size| size.checked_mul(2).filter(|&next| next <= max))
}

/// The default 8 ..= 8192 sweep.
pub fn default_sizes() -> impl Iterator<Item = usize> {
    sizes(DEFAULT_MIN, DEFAULT_MAX)
}
