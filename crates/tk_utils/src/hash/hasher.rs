//! Hashers with deterministic output.
//!
//! [`FixedHasher`] is *foldhash* running from a compiled-in seed, so the same
//! key always hashes to the same value in every process. [`NoOpHasher`] skips
//! hashing altogether for keys that already are a well-distributed `u64`.

use core::fmt::Debug;
use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x1A6B_52E0_77D3_4C19);

/// A *foldhash* hasher whose output depends only on the input.
///
/// Created through [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Builds [`FixedHasher`]s from one hard-coded seed.
///
/// Per-process seed randomization buys DoS resistance at the price of
/// run-to-run nondeterminism; this state trades it back, so map iteration
/// artifacts are reproducible across runs and builds.
///
/// # Examples
///
/// ```
/// use core::hash::{Hash, Hasher, BuildHasher};
/// use tk_utils::hash::FixedHashState;
///
/// let mut hasher = FixedHashState.build_hasher();
/// 3.hash(&mut hasher);
///
/// // The same value every run.
/// let result = hasher.finish();
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A pass-through hasher: `write_u64` stores the value as the hash.
///
/// Created through [`NoOpHashState::build_hasher`].
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // Fold bytes in from the back so the low bytes land lowest; this
        // makes a single `write_u32(n)` agree with a single `write_u64(n)`.
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`NoOpHasher`]s, for keys that are already good hash values.
///
/// Meant for `u64`-shaped keys such as the bits of a `TypeId`: the key is
/// taken as the hash verbatim. Multi-call hashing still works through the
/// byte-folding `write` fallback, but that path defeats the point.
///
/// # Examples
///
/// ```
/// use core::hash::{Hash, Hasher, BuildHasher};
/// use tk_utils::hash::NoOpHashState;
///
/// let mut hasher = NoOpHashState.build_hasher();
/// 3.hash(&mut hasher);
///
/// assert_eq!(hasher.finish(), 3_u64);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::hash::{BuildHasher, Hash, Hasher};

    use super::{FixedHashState, NoOpHashState};

    #[test]
    fn fixed_hash_is_stable() {
        let a = FixedHashState.build_hasher();
        let b = FixedHashState.build_hasher();

        let hash = |mut h: super::FixedHasher| {
            "trackkit".hash(&mut h);
            h.finish()
        };

        assert_eq!(hash(a), hash(b));
    }

    #[test]
    fn noop_hash_passes_u64_through() {
        let mut hasher = NoOpHashState.build_hasher();
        hasher.write_u64(42);
        assert_eq!(hasher.finish(), 42);
    }
}
