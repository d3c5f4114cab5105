//! Decimal text for [`BigFloat`].
//!
//! Accepted input is `[+-]?[0-9]*\.?[0-9]+([eE][+-]?[0-9]+)?` or one of
//! `nan`, `inf`, `infinity` in any case with an optional sign. Exponents too
//! large for an `i64` saturate and then overflow or underflow like any other
//! out-of-range result.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::big::BigInt;
use crate::error::{ParseError, ParseErrorKind};
use crate::float::{round_half_even, round_to_digits, BigFloat, Repr, MAX_INT_DIGITS, PRECISION};
use crate::text::{parse_magnitude, split_sign};

/// Layout used when rendering a [`BigFloat`] as text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FloatStyle {
    /// `digits` significant digits, like `%g`: scientific notation when the
    /// decimal exponent is below -4 or at least `digits`, trailing zeros removed
    #[default]
    General,
    /// `digits` digits after the decimal point
    Fixed,
    /// One leading digit, `digits` digits after the point, then `e` and the
    /// exponent
    Scientific,
}

/// Formatting options consumed by [`BigFloat::format`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FloatFormat {
    pub digits: usize,
    pub style: FloatStyle,
}

impl FloatFormat {
    pub fn new(digits: usize, style: FloatStyle) -> Self {
        Self { digits, style }
    }
}

impl Default for FloatFormat {
    fn default() -> Self {
        Self {
            digits: PRECISION,
            style: FloatStyle::General,
        }
    }
}

fn parse_special(body: &str, negative: bool) -> Option<BigFloat> {
    if body.eq_ignore_ascii_case("nan") {
        Some(BigFloat::nan())
    } else if body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity") {
        Some(BigFloat::infinite(negative))
    } else {
        None
    }
}

fn parse_exponent(text: &str, offset: usize) -> Result<i64, ParseError> {
    let (negative, digits, sign_len) = split_sign(text);
    if digits.is_empty() {
        return Err(ParseError::new(ParseErrorKind::InvalidExponent, offset + sign_len));
    }
    let mut value: i64 = 0;
    for (i, b) in digits.bytes().enumerate() {
        if !b.is_ascii_digit() {
            return Err(ParseError::new(ParseErrorKind::InvalidExponent, offset + sign_len + i));
        }
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    Ok(if negative { -value } else { value })
}

fn parse_float(text: &str) -> Result<BigFloat, ParseError> {
    if text.is_empty() {
        return Err(ParseError::new(ParseErrorKind::Empty, 0));
    }
    let (negative, body, offset) = split_sign(text);
    if let Some(special) = parse_special(body, negative) {
        return Ok(special);
    }

    let bytes = body.as_bytes();
    let mut digits = String::with_capacity(bytes.len());
    let mut seen_point = false;
    let mut fraction_digits: i64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b @ b'0'..=b'9' => {
                digits.push(char::from(b));
                if seen_point {
                    fraction_digits += 1;
                }
            }
            b'.' if seen_point => {
                return Err(ParseError::new(ParseErrorKind::MultipleDecimalPoints, offset + i));
            }
            b'.' => seen_point = true,
            _ => break,
        }
        i += 1;
    }
    if digits.is_empty() || (seen_point && fraction_digits == 0) {
        return Err(ParseError::new(ParseErrorKind::MissingDigits, offset + i));
    }

    let exponent = match bytes.get(i).copied() {
        None => 0,
        Some(b'e' | b'E') => parse_exponent(&body[i + 1..], offset + i + 1)?,
        Some(_) => {
            let c = body[i..].chars().next().unwrap_or('\0');
            return Err(ParseError::new(ParseErrorKind::InvalidDigit(c), offset + i));
        }
    };

    let mantissa = BigInt::from_magnitude(negative, parse_magnitude(&digits, 10, offset)?);
    Ok(BigFloat::from_decimal(
        mantissa,
        exponent.saturating_sub(fraction_digits),
        negative,
    ))
}

/// Digits of `digits × 10^exponent` with the decimal point placed
fn place_point(digits: &str, exponent: i64) -> String {
    if exponent >= 0 {
        return format!("{digits}{}", "0".repeat(exponent as usize));
    }
    let shift = exponent.unsigned_abs() as usize;
    if shift < digits.len() {
        let (int, frac) = digits.split_at(digits.len() - shift);
        format!("{int}.{frac}")
    } else {
        format!("0.{}{digits}", "0".repeat(shift - digits.len()))
    }
}

/// `d[.ddd]e<exp>`, with the fraction padded to `fraction` digits
fn scientific(digits: &str, fraction: usize, exponent: i64) -> String {
    let mut out = String::with_capacity(fraction + 24);
    out.push_str(&digits[..1]);
    if fraction > 0 {
        out.push('.');
        out.push_str(&digits[1..]);
        out.extend(std::iter::repeat('0').take(fraction + 1 - digits.len()));
    }
    out.push('e');
    out.push_str(&exponent.to_string());
    out
}

fn render_general(magnitude: &BigInt, exponent: i64, digits: usize) -> String {
    let (rounded, exponent) = round_to_digits(magnitude, exponent, digits as u64);
    let text = rounded.to_string();
    let adjusted = exponent + text.len() as i64 - 1;
    if adjusted < -4 || adjusted >= digits as i64 {
        scientific(&text, text.len() - 1, adjusted)
    } else {
        place_point(&text, exponent)
    }
}

fn render_fixed(magnitude: &BigInt, exponent: i64, fraction: usize) -> String {
    let target = -(fraction as i64);
    let (rounded, exponent) = if exponent < target {
        (round_half_even(magnitude, (target - exponent) as u64), target)
    } else {
        (magnitude.clone(), exponent)
    };
    // pad with zeros so the value reads digits × 10^-fraction
    let padding = (exponent - target) as usize;
    let mut text = format!("{rounded}{}", "0".repeat(padding));
    if fraction == 0 {
        return text;
    }
    if text.len() <= fraction {
        text = format!("{}{text}", "0".repeat(fraction + 1 - text.len()));
    }
    text.insert(text.len() - fraction, '.');
    text
}

fn render_scientific(magnitude: &BigInt, exponent: i64, fraction: usize) -> String {
    let (rounded, exponent) = round_to_digits(magnitude, exponent, fraction as u64 + 1);
    let text = rounded.to_string();
    scientific(&text, fraction, exponent + text.len() as i64 - 1)
}

fn render_zero(style: FloatStyle, digits: usize) -> String {
    match style {
        FloatStyle::General => "0".to_string(),
        FloatStyle::Fixed => render_fixed(&BigInt::zero(), 0, digits),
        FloatStyle::Scientific => scientific("0", digits, 0),
    }
}

impl BigFloat {
    /// Parse decimal text; see the module docs for the grammar
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse_float(text).inspect_err(|err| {
            tracing::trace!(input = text, error = %err, "rejected float text");
        })
    }

    /// Build from a float literal; `_` separators are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the literal is malformed.
    pub fn from_literal(literal: &str) -> Self {
        let cleaned: String = literal.chars().filter(|&c| c != '_' && !c.is_ascii_whitespace()).collect();
        match Self::parse(&cleaned) {
            Ok(value) => value,
            Err(err) => panic!("invalid BigFloat literal {literal:?}: {err}"),
        }
    }

    /// Sign flag and unsigned text of the value
    fn render(&self, digits: usize, style: FloatStyle) -> (bool, String) {
        let digits = match style {
            FloatStyle::General => digits.clamp(1, PRECISION),
            FloatStyle::Fixed | FloatStyle::Scientific => digits.min(PRECISION),
        };
        match &self.repr {
            Repr::Nan => (false, "nan".to_string()),
            Repr::Infinite { negative } => (*negative, "inf".to_string()),
            Repr::Zero { negative } => (*negative, render_zero(style, digits)),
            Repr::Finite { mantissa, exponent } => {
                let magnitude = mantissa.abs();
                let text = match style {
                    FloatStyle::General => render_general(&magnitude, *exponent, digits),
                    // integer parts too long to write out fall back to scientific
                    FloatStyle::Fixed if self.integer_digits() > MAX_INT_DIGITS => {
                        render_scientific(&magnitude, *exponent, digits)
                    }
                    FloatStyle::Fixed => render_fixed(&magnitude, *exponent, digits),
                    FloatStyle::Scientific => render_scientific(&magnitude, *exponent, digits),
                };
                (mantissa.is_negative(), text)
            }
        }
    }

    /// Render with `digits` and `style`; `digits` is clamped to 1..=100 for
    /// [`FloatStyle::General`] and 0..=100 otherwise
    pub fn to_string_with(&self, digits: usize, style: FloatStyle) -> String {
        let (negative, text) = self.render(digits, style);
        if negative {
            format!("-{text}")
        } else {
            text
        }
    }

    pub fn format(&self, format: &FloatFormat) -> String {
        self.to_string_with(format.digits, format.style)
    }
}

impl FromStr for BigFloat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `nan` and `inf` honor width, fill and alignment but not precision or `0`,
/// as for `f64`
fn pad_special(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let padding = f.width().map_or(0, |width| width.saturating_sub(text.len()));
    let (before, after) = match f.align() {
        Some(fmt::Alignment::Left) => (0, padding),
        Some(fmt::Alignment::Center) => (padding / 2, padding - padding / 2),
        _ => (padding, 0),
    };
    let fill = f.fill();
    for _ in 0..before {
        f.write_char(fill)?;
    }
    f.write_str(text)?;
    for _ in 0..after {
        f.write_char(fill)?;
    }
    Ok(())
}

impl BigFloat {
    /// Pad specials like `f64`, finite values with `pad_integral`
    fn pad_rendered(&self, f: &mut fmt::Formatter<'_>, negative: bool, text: &str) -> fmt::Result {
        match &self.repr {
            Repr::Nan => pad_special(f, text),
            Repr::Infinite { .. } => {
                let sign = if negative {
                    "-"
                } else if f.sign_plus() {
                    "+"
                } else {
                    ""
                };
                pad_special(f, &format!("{sign}{text}"))
            }
            _ => f.pad_integral(!negative, "", text),
        }
    }
}

impl fmt::Display for BigFloat {
    /// General notation at full precision, or fixed notation when a
    /// precision is given (`{:.3}`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (negative, text) = match f.precision() {
            Some(precision) => self.render(precision, FloatStyle::Fixed),
            None => self.render(PRECISION, FloatStyle::General),
        };
        self.pad_rendered(f, negative, &text)
    }
}

impl fmt::LowerExp for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fraction = match (&self.repr, f.precision()) {
            (_, Some(precision)) => precision,
            (Repr::Finite { mantissa, .. }, None) => mantissa.decimal_digits() as usize - 1,
            _ => 0,
        };
        let (negative, text) = self.render(fraction, FloatStyle::Scientific);
        self.pad_rendered(f, negative, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> BigFloat {
        BigFloat::parse(text).unwrap()
    }

    fn kind(text: &str) -> ParseErrorKind {
        BigFloat::parse(text).unwrap_err().kind()
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse("1.5"), BigFloat::from_decimal(BigInt::from(15), -1, false));
        assert_eq!(parse(".25"), BigFloat::from_decimal(BigInt::from(25), -2, false));
        assert_eq!(parse("-12e3"), BigFloat::from(-12000));
        assert_eq!(parse("+1.50E-2"), BigFloat::from_decimal(BigInt::from(15), -3, false));
        assert!(parse("-0.000").is_sign_negative());
        assert!(parse("-0").is_zero());
    }

    #[test]
    fn test_parse_specials() {
        assert!(parse("NaN").is_nan());
        assert!(parse("-nan").is_nan());
        assert_eq!(parse("inf"), BigFloat::infinity());
        assert_eq!(parse("-Infinity"), BigFloat::neg_infinity());
        assert_eq!(parse("+INF"), BigFloat::infinity());
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(kind(""), ParseErrorKind::Empty);
        assert_eq!(kind("-"), ParseErrorKind::MissingDigits);
        assert_eq!(kind("."), ParseErrorKind::MissingDigits);
        assert_eq!(kind("1."), ParseErrorKind::MissingDigits);
        assert_eq!(kind("1.2.3"), ParseErrorKind::MultipleDecimalPoints);
        assert_eq!(BigFloat::parse("1.2.3").unwrap_err().position(), 3);
        assert_eq!(kind("1e"), ParseErrorKind::InvalidExponent);
        assert_eq!(kind("1e+"), ParseErrorKind::InvalidExponent);
        assert_eq!(kind("1e5x"), ParseErrorKind::InvalidExponent);
        assert_eq!(kind("1x"), ParseErrorKind::InvalidDigit('x'));
        assert_eq!(kind("1é"), ParseErrorKind::InvalidDigit('é'));
        assert_eq!(kind("infinit"), ParseErrorKind::MissingDigits);
    }

    #[test]
    fn test_parse_saturates_exponent() {
        assert!(parse("1e99999999999999999999999").is_inf());
        let tiny = parse("-1e-99999999999999999999999");
        assert!(tiny.is_zero() && tiny.is_sign_negative());
        assert!(parse("0e99999999999999999999999").is_zero());
    }

    #[test]
    fn test_parse_rounds_long_input() {
        let text = format!("0.{}4", "3".repeat(PRECISION));
        let expected = format!("0.{}", "3".repeat(PRECISION));
        assert_eq!(parse(&text).to_string(), expected);
    }

    #[test]
    fn test_general_style() {
        assert_eq!(parse("1234.5").to_string(), "1234.5");
        assert_eq!(parse("0.0001").to_string(), "0.0001");
        assert_eq!(parse("0.00001").to_string(), "1e-5");
        assert_eq!(parse("-1.25e-7").to_string(), "-1.25e-7");
        assert_eq!(parse("1e100").to_string(), "1e100");
        assert_eq!(parse("1e99").to_string(), format!("1{}", "0".repeat(99)));
        assert_eq!(parse("123456").to_string_with(3, FloatStyle::General), "1.23e5");
        assert_eq!(parse("2.5").to_string_with(1, FloatStyle::General), "2");
        assert_eq!(parse("99.96").to_string_with(3, FloatStyle::General), "100");
        assert_eq!(BigFloat::neg_zero().to_string(), "-0");
    }

    #[test]
    fn test_fixed_style() {
        assert_eq!(parse("3.14159").to_string_with(2, FloatStyle::Fixed), "3.14");
        assert_eq!(parse("2.5").to_string_with(0, FloatStyle::Fixed), "2");
        assert_eq!(parse("3.5").to_string_with(0, FloatStyle::Fixed), "4");
        assert_eq!(parse("0.0005").to_string_with(3, FloatStyle::Fixed), "0.000");
        assert_eq!(parse("0.0015").to_string_with(3, FloatStyle::Fixed), "0.002");
        assert_eq!(parse("-12").to_string_with(2, FloatStyle::Fixed), "-12.00");
        assert_eq!(parse("1e-300").to_string_with(2, FloatStyle::Fixed), "0.00");
        assert_eq!(BigFloat::zero().to_string_with(1, FloatStyle::Fixed), "0.0");
        assert_eq!(format!("{:.3}", parse("1.23456")), "1.235");
        assert_eq!(format!("{:>8.1}", parse("-1.25")), "    -1.2");
    }

    #[test]
    fn test_scientific_style() {
        assert_eq!(parse("123456").to_string_with(2, FloatStyle::Scientific), "1.23e5");
        assert_eq!(parse("0.00012").to_string_with(3, FloatStyle::Scientific), "1.200e-4");
        assert_eq!(parse("9.99").to_string_with(1, FloatStyle::Scientific), "1.0e1");
        assert_eq!(parse("-5").to_string_with(0, FloatStyle::Scientific), "-5e0");
        assert_eq!(format!("{:e}", parse("1500")), "1.5e3");
        assert_eq!(format!("{:.2e}", parse("1500")), "1.50e3");
        assert_eq!(format!("{:e}", BigFloat::zero()), "0e0");
    }

    #[test]
    fn test_special_values_render_literally() {
        assert_eq!(BigFloat::nan().to_string(), "nan");
        assert_eq!(BigFloat::infinity().to_string_with(5, FloatStyle::Fixed), "inf");
        assert_eq!(BigFloat::neg_infinity().to_string(), "-inf");
    }

    #[test]
    fn test_special_values_ignore_sign_and_zero_flags() {
        assert_eq!(format!("{:+}", BigFloat::nan()), "nan");
        assert_eq!(format!("{:+}", BigFloat::infinity()), "+inf");
        assert_eq!(format!("{:05}", BigFloat::infinity()), "  inf");
        assert_eq!(format!("{:<6}|", BigFloat::neg_infinity()), "-inf  |");
        assert_eq!(format!("{:*^7}", BigFloat::nan()), "**nan**");
        assert_eq!(format!("{:.2}", BigFloat::infinity()), "inf");
        assert_eq!(format!("{:+e}", BigFloat::nan()), "nan");
        assert_eq!(format!("{:+06}", parse("1.5")), "+001.5");
    }

    #[test]
    fn test_fixed_style_falls_back_for_huge_values() {
        let huge = parse("1e1000000000000");
        assert_eq!(huge.to_string_with(2, FloatStyle::Fixed), "1.00e1000000000000");
        assert_eq!(format!("{:.1}", -huge), "-1.0e1000000000000");
        let tiny = parse("-1e-1000000000000");
        assert_eq!(tiny.to_string_with(2, FloatStyle::Fixed), "-0.00");
        assert_eq!(parse("1e200").to_string_with(0, FloatStyle::Fixed).len(), 201);
    }

    #[test]
    fn test_format_options() {
        let x = parse("2.71828");
        assert_eq!(x.format(&FloatFormat::default()), "2.71828");
        assert_eq!(x.format(&FloatFormat::new(3, FloatStyle::Fixed)), "2.718");
        assert_eq!(FloatFormat::default().digits, PRECISION);
    }

    #[test]
    fn test_text_round_trip() {
        let third = BigFloat::one().divide(&BigFloat::from(3));
        let text = third.to_string();
        assert_eq!(text.len(), PRECISION + 2);
        assert_eq!(parse(&text), third);

        let huge = parse("-1.5e1000000");
        assert_eq!(huge.to_string(), "-1.5e1000000");
        assert_eq!(parse(&huge.to_string()), huge);
    }

    #[test]
    fn test_from_literal() {
        assert_eq!(BigFloat::from_literal("1_000.5"), parse("1000.5"));
    }

    #[test]
    #[should_panic(expected = "invalid BigFloat literal")]
    fn test_from_literal_rejects_garbage() {
        BigFloat::from_literal("1.2.3");
    }
}
