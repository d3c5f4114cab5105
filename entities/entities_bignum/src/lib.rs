//! Entities Layer: Big Numbers
//!
//! Provides arbitrary precision numeric types:
//! - [`BigInt`]: signed integers of unbounded magnitude
//! - [`BigFloat`]: decimal floating point with [`PRECISION`] significant digits
//!
//! Both are plain value types built on a little-endian [`LimbStore`] of
//! 64-bit words. Parsing and formatting live in `text` and `float_text`,
//! conversions to and from native numbers in `convert`.

pub mod big;
mod big_ops;
mod convert;
pub mod error;
pub mod float;
mod float_ops;
mod float_text;
pub mod limbs;
mod text;

pub use big::{BigInt, MAX_BITS};
pub use error::{DivisionByZero, NumericError, ParseError, ParseErrorKind};
pub use float::{BigFloat, MAX_EXP10, MAX_INT_DIGITS, PRECISION};
pub use float_text::{FloatFormat, FloatStyle};
pub use limbs::{Limb, LimbStore, Sign, LIMB_BITS};
