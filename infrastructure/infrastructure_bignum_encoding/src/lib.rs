//! Infrastructure Layer: Bignum Encoding
//!
//! Adapters between the big number entities and the outside world.
//!
//! ## Overview
//!
//! - **[`bignum_codec`]** and **[`float_codec`]**: canonical byte images of
//!   [`BigInt`](entities_bignum::BigInt) and [`BigFloat`](entities_bignum::BigFloat)
//! - **[`hashing`]**: stable hashes fed from those images through an injected
//!   byte hash
//! - **[`formatting`]**: `fmt::Write` formatting hooks and UTF-32 text carriers
//!
//! ## See Also
//!
//! - [`entities_bignum`]: the number types themselves

pub mod common;

pub mod bignum_codec;
pub mod float_codec;
pub mod formatting;
pub mod hashing;

pub use bignum_codec::BigIntCodec;
pub use float_codec::BigFloatCodec;

pub use common::DecodeError;

// Byte helpers for in-memory representations
pub use common::{bytes_to_integer, decode_big_integer, encode_big_integer, integer_to_bytes};

pub use formatting::{
    format_float_into, format_into, parse_big_float_utf32, parse_big_int_utf32, to_utf32, NumericText,
};
pub use hashing::{fnv1a_64, HashFn, NumericHash};
