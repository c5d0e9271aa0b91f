//! Default key hashing for [`Map`](super::Map)
//!
//! Keys are hashed through their own [`Hash`](std::hash::Hash) impl, so each
//! key type decides which bytes describe it. The bytes are folded with the
//! classic rolling `hash * 33 + byte` function. It is cheap, deterministic,
//! and spreads small sequential integers across the low bits the probe mask
//! keeps. It offers no resistance to adversarial keys; supply a keyed
//! [`BuildHasher`] such as [`std::collections::hash_map::RandomState`] when
//! that matters.

use std::hash::{BuildHasher, Hasher};

/// Rolling `hash * 33 + byte` hasher
#[derive(Clone, Copy, Debug, Default)]
pub struct Times33 {
    /// Accumulated hash value
    state: u64,
}

impl Hasher for Times33 {
    #[inline(always)]
    fn finish(&self) -> u64 {
        self.state
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state = (self.state << 5)
                .wrapping_add(self.state)
                .wrapping_add(u64::from(byte));
        }
    }
}

/// [`BuildHasher`] for [`Times33`], the default hasher of
/// [`Map`](super::Map)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct BuildTimes33;

impl BuildHasher for BuildTimes33 {
    type Hasher = Times33;

    #[inline(always)]
    fn build_hasher(&self) -> Times33 {
        Times33::default()
    }
}
