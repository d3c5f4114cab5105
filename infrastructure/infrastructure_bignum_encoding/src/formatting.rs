//! Text hooks: formatting into any `fmt::Write` sink and UTF-32 carriers.
//!
//! UTF-32 text is a plain `[char]` slice; anything outside ASCII is rejected
//! before parsing, and error positions count characters.

use std::fmt;

use entities_bignum::{BigFloat, BigInt, FloatFormat, ParseError, ParseErrorKind};

/// Numbers that render with `Display` and parse from ASCII text
pub trait NumericText: fmt::Display + Sized {
    fn parse_text(text: &str) -> Result<Self, ParseError>;
}

impl NumericText for BigInt {
    fn parse_text(text: &str) -> Result<Self, ParseError> {
        BigInt::parse(text)
    }
}

impl NumericText for BigFloat {
    fn parse_text(text: &str) -> Result<Self, ParseError> {
        BigFloat::parse(text)
    }
}

/// Write the default text of `value` into `sink`
pub fn format_into<W: fmt::Write, T: NumericText>(sink: &mut W, value: &T) -> fmt::Result {
    write!(sink, "{value}")
}

/// Write `value` into `sink` with explicit float options
pub fn format_float_into<W: fmt::Write>(
    sink: &mut W,
    value: &BigFloat,
    format: &FloatFormat,
) -> fmt::Result {
    sink.write_str(&value.format(format))
}

/// Default text of `value` as UTF-32
pub fn to_utf32<T: NumericText>(value: &T) -> Vec<char> {
    value.to_string().chars().collect()
}

fn parse_utf32<T: NumericText>(text: &[char]) -> Result<T, ParseError> {
    if let Some(position) = text.iter().position(|c| !c.is_ascii()) {
        tracing::trace!(position, "rejected non-ASCII numeric text");
        return Err(ParseError::new(ParseErrorKind::NonAscii, position));
    }
    let ascii: String = text.iter().collect();
    T::parse_text(&ascii)
}

pub fn parse_big_int_utf32(text: &[char]) -> Result<BigInt, ParseError> {
    parse_utf32(text)
}

pub fn parse_big_float_utf32(text: &[char]) -> Result<BigFloat, ParseError> {
    parse_utf32(text)
}
