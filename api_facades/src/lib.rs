//! API Facades Layer
//!
//! The surface the surrounding engine imports: literal macros for writing big
//! numbers inline, and a [`prelude`] gathering the types, errors, traits and
//! hooks of the inner layers.
//!
//! ```
//! use api_facades::prelude::*;
//!
//! let n = big!(340_282_366_920_938_463_463_374_607_431_768_211_456);
//! assert_eq!(n, BigInt::from(u128::MAX) + 1);
//!
//! let x = big_float!(1.5e-3);
//! assert_eq!(x.to_string(), "0.0015");
//! ```

pub use entities_bignum::{BigFloat, BigInt};

/// Big integer from an integer literal of any length
///
/// The tokens are read as text, so literals wider than any native integer
/// work. Accepts an optional leading `-` and `_` separators; a malformed
/// literal panics.
#[macro_export]
macro_rules! big {
    ($($lit:tt)+) => {
        $crate::BigInt::from_literal(stringify!($($lit)+))
    };
}

/// Big float from a decimal literal, rounded to working precision
#[macro_export]
macro_rules! big_float {
    ($($lit:tt)+) => {
        $crate::BigFloat::from_literal(stringify!($($lit)+))
    };
}

pub mod prelude {
    pub use crate::{big, big_float};

    pub use entities_bignum::{
        BigFloat, BigInt, DivisionByZero, FloatFormat, FloatStyle, NumericError, ParseError,
        ParseErrorKind, MAX_BITS, MAX_EXP10, MAX_INT_DIGITS, PRECISION,
    };
    pub use infrastructure_bignum_encoding::{
        fnv1a_64, format_float_into, format_into, parse_big_float_utf32, parse_big_int_utf32,
        to_utf32, BigFloatCodec, BigIntCodec, DecodeError, HashFn, NumericHash, NumericText,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_big_literal() {
        assert_eq!(big!(0), BigInt::zero());
        assert_eq!(big!(-42), BigInt::from(-42));
        assert_eq!(big!(1_000_000), BigInt::from(1_000_000));
        assert_eq!(
            big!(123456789012345678901234567890).to_string(),
            "123456789012345678901234567890"
        );
    }

    #[test]
    fn test_big_float_literal() {
        assert_eq!(big_float!(1.5), BigFloat::from(1.5));
        assert_eq!(big_float!(-0.25), BigFloat::from(-0.25));
        assert_eq!(big_float!(1e100), BigFloat::parse("1e100").unwrap());
    }

    #[test]
    #[should_panic(expected = "invalid BigInt literal")]
    fn test_big_rejects_float_literal() {
        let _ = big!(1.5);
    }

    #[test]
    fn test_prelude_hooks() {
        let x = big!(-17);
        let mut out = String::new();
        format_into(&mut out, &x).unwrap();
        assert_eq!(out, "-17");
        assert_eq!(BigIntCodec::decode(&BigIntCodec::encode(&x)), Ok(x.clone()));
        assert_eq!(x.hash_value(), big!(-17).hash_value());
        assert_eq!(x.try_div(&BigInt::zero()), Err(DivisionByZero));
    }
}
