//! Stable hashing of big numbers.
//!
//! Values are hashed through their canonical byte images, so equal values
//! hash alike across runs and platforms. The hash function itself is
//! injected by the caller; [`fnv1a_64`] is the default.

use std::hash::Hasher;

use entities_bignum::{BigFloat, BigInt};
use fnv::FnvHasher;

use crate::bignum_codec::BigIntCodec;
use crate::float_codec::hash_image;

/// A process-wide byte hash
pub type HashFn = fn(&[u8]) -> u64;

/// 64-bit FNV-1a
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(bytes);
    hasher.finish()
}

/// Hashing through a caller-supplied byte hash
pub trait NumericHash {
    /// Feed the canonical image of `self` to `hash`
    fn hash_with(&self, hash: HashFn) -> u64;

    /// Hash with [`fnv1a_64`]
    fn hash_value(&self) -> u64 {
        self.hash_with(fnv1a_64)
    }
}

impl NumericHash for BigInt {
    fn hash_with(&self, hash: HashFn) -> u64 {
        hash(&BigIntCodec::encode(self))
    }
}

/// `+0` and `-0` hash alike; every NaN hashes alike.
impl NumericHash for BigFloat {
    fn hash_with(&self, hash: HashFn) -> u64 {
        hash(&hash_image(self))
    }
}
