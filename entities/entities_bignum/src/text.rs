//! Integer text: parsing in radix 2..=36 and the `fmt` traits.

use std::fmt;
use std::str::FromStr;

use crate::big::{magnitude_to_radix, radix_chunk, BigInt};
use crate::error::{ParseError, ParseErrorKind};
use crate::limbs::{self, Limb};

/// Split an optional leading sign; returns (negative, rest, offset of rest)
pub(crate) fn split_sign(text: &str) -> (bool, &str, usize) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..], 1),
        Some(b'+') => (false, &text[1..], 1),
        _ => (false, text, 0),
    }
}

/// Accumulate digits in `radix`; `offset` is added to error positions
pub(crate) fn parse_magnitude(digits: &str, radix: u32, offset: usize) -> Result<Vec<Limb>, ParseError> {
    if digits.is_empty() {
        return Err(ParseError::new(ParseErrorKind::MissingDigits, offset));
    }
    let (_, chunk_digits) = radix_chunk(radix);
    let radix_limb = Limb::from(radix);
    let mut magnitude = Vec::new();
    let mut acc: Limb = 0;
    let mut scale: Limb = 1;
    let mut count = 0;
    for (i, c) in digits.char_indices() {
        let digit = c
            .to_digit(radix)
            .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidDigit(c), offset + i))?;
        acc = acc * radix_limb + Limb::from(digit);
        scale *= radix_limb;
        count += 1;
        if count == chunk_digits {
            limbs::mul_small_add(&mut magnitude, scale, acc);
            acc = 0;
            scale = 1;
            count = 0;
        }
    }
    if count > 0 {
        limbs::mul_small_add(&mut magnitude, scale, acc);
    }
    Ok(magnitude)
}

impl BigInt {
    /// Parse decimal text `[+-]?[0-9]+`
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::from_str_radix(text, 10)
    }

    /// Parse text in `radix` (2..=36); letters are accepted in either case
    pub fn from_str_radix(text: &str, radix: u32) -> Result<Self, ParseError> {
        Self::parse_radix(text, radix).inspect_err(|err| {
            tracing::trace!(input = text, radix, error = %err, "rejected integer text");
        })
    }

    fn parse_radix(text: &str, radix: u32) -> Result<Self, ParseError> {
        if !(2..=36).contains(&radix) {
            return Err(ParseError::new(ParseErrorKind::InvalidRadix(radix), 0));
        }
        if text.is_empty() {
            return Err(ParseError::new(ParseErrorKind::Empty, 0));
        }
        let (negative, digits, offset) = split_sign(text);
        let magnitude = parse_magnitude(digits, radix, offset)?;
        Ok(Self::from_magnitude(negative, magnitude))
    }

    /// Build from an integer literal; `_` separators are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the literal is not a decimal integer.
    pub fn from_literal(literal: &str) -> Self {
        let cleaned: String = literal.chars().filter(|&c| c != '_' && !c.is_ascii_whitespace()).collect();
        match Self::parse(&cleaned) {
            Ok(value) => value,
            Err(err) => panic!("invalid BigInt literal {literal:?}: {err}"),
        }
    }
}

impl FromStr for BigInt {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "", &magnitude_to_radix(self.magnitude(), 10))
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0x", &magnitude_to_radix(self.magnitude(), 16))
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = magnitude_to_radix(self.magnitude(), 16).to_ascii_uppercase();
        f.pad_integral(!self.is_negative(), "0x", &digits)
    }
}

impl fmt::Octal for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0o", &magnitude_to_radix(self.magnitude(), 8))
    }
}

impl fmt::Binary for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0b", &magnitude_to_radix(self.magnitude(), 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(text: &str) -> ParseErrorKind {
        BigInt::parse(text).unwrap_err().kind()
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(BigInt::parse("0"), Ok(BigInt::zero()));
        assert_eq!(BigInt::parse("-0"), Ok(BigInt::zero()));
        assert_eq!(BigInt::parse("+42"), Ok(BigInt::from(42)));
        assert_eq!(BigInt::parse("000123"), Ok(BigInt::from(123)));
        let long = "123456789012345678901234567890123456789";
        assert_eq!(BigInt::parse(long).unwrap().to_string(), long);
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(kind(""), ParseErrorKind::Empty);
        assert_eq!(kind("-"), ParseErrorKind::MissingDigits);
        assert_eq!(kind("12a3"), ParseErrorKind::InvalidDigit('a'));
        assert_eq!(BigInt::parse("12a3").unwrap_err().position(), 2);
        assert_eq!(kind(" 1"), ParseErrorKind::InvalidDigit(' '));
        assert_eq!(kind("1_000"), ParseErrorKind::InvalidDigit('_'));
    }

    #[test]
    fn test_parse_radix() {
        assert_eq!(BigInt::from_str_radix("-FF", 16), Ok(BigInt::from(-255)));
        assert_eq!(BigInt::from_str_radix("zz", 36), Ok(BigInt::from(1295)));
        assert_eq!(BigInt::from_str_radix("102", 2).unwrap_err().kind(), ParseErrorKind::InvalidDigit('2'));
        assert_eq!(BigInt::from_str_radix("1", 37).unwrap_err().kind(), ParseErrorKind::InvalidRadix(37));
        let x = BigInt::one().shifted_left(200);
        assert_eq!(BigInt::from_str_radix(&x.to_string_base(7), 7), Ok(x));
    }

    #[test]
    fn test_from_literal() {
        assert_eq!(BigInt::from_literal("1_000_000"), BigInt::from(1_000_000));
        assert_eq!(BigInt::from_literal("-7"), BigInt::from(-7));
    }

    #[test]
    #[should_panic(expected = "invalid BigInt literal")]
    fn test_from_literal_rejects_garbage() {
        BigInt::from_literal("1.5");
    }

    #[test]
    fn test_display_flags() {
        let x = BigInt::from(-255);
        assert_eq!(format!("{x}"), "-255");
        assert_eq!(format!("{x:>6}"), "  -255");
        assert_eq!(format!("{x:06}"), "-00255");
        assert_eq!(format!("{:+}", BigInt::from(7)), "+7");
        assert_eq!(format!("{x:x}"), "-ff");
        assert_eq!(format!("{x:#X}"), "-0xFF");
        assert_eq!(format!("{:#o}", BigInt::from(8)), "0o10");
        assert_eq!(format!("{:b}", BigInt::from(5)), "101");
        assert_eq!(BigInt::zero().to_string(), "0");
    }
}
