//! 64-bit mixing and value hashing for the filter layer.

use std::hash::{Hash, Hasher};
use xxhash_rust::xxh3::{xxh3_64, Xxh3};

/// Odd 64-bit golden-ratio constant decorrelating the additions fed to
/// [`mix64`] in [`combine`].
pub const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Avalanche finalizer (splitmix64): every output bit depends
/// non-linearly on every input bit.
#[inline]
pub const fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Folds `hash` into `seed`, double-hashing style: each application with a
/// distinct starting seed yields a pseudo-independent derived hash.
#[inline]
pub fn combine(seed: &mut u64, hash: u64) {
    *seed = mix64(seed.wrapping_add(GOLDEN_GAMMA).wrapping_add(hash));
}

#[inline]
pub fn hash_bytes(key: &[u8]) -> u64 {
    xxh3_64(key)
}

/// Reduces any hashable value to 64 bits. Equal values hash equal, and the
/// result is stable across runs (unseeded xxh3 stream).
pub fn hash_value<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = Xxh3::new();
    value.hash(&mut hasher);
    hasher.finish()
}
