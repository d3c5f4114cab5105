//! Integration tests for infrastructure_bignum_encoding crate
//!
//! These tests verify that integer and float images round-trip, that hashing
//! agrees with equality, and that the text hooks interoperate end to end.

use entities_bignum::{BigFloat, BigInt, FloatFormat, FloatStyle, ParseErrorKind};
use infrastructure_bignum_encoding::*;

#[test]
fn test_bignum_codec_encode_decode_zero() {
    let zero = BigInt::zero();
    let encoded = BigIntCodec::encode(&zero);

    assert_eq!(encoded.len(), 10);
    assert_eq!(BigIntCodec::decode(&encoded), Ok(zero));
}

#[test]
fn test_bignum_codec_encode_decode_large_negative() {
    let num: BigInt = "-123456789012345678901234567890123456789012345678901234567890".parse().unwrap();
    let encoded = BigIntCodec::encode(&num);
    let (decoded, bytes_consumed) = decode_big_integer(&encoded).unwrap();

    assert_eq!(decoded, num);
    assert_eq!(bytes_consumed, encoded.len());
}

#[test]
fn test_bignum_codec_matches_reference_limbs() {
    let num = BigInt::from(u64::MAX) * BigInt::from(u64::MAX);
    let reference = malachite::Integer::from(u64::MAX) * malachite::Integer::from(u64::MAX);
    assert_eq!(num.to_string(), reference.to_string());

    let (bytes, negative) = integer_to_bytes(&num);
    assert!(!negative);
    assert_eq!(bytes.len(), 16);
    assert_eq!(bytes_to_integer(&bytes, false), num);
}

#[test]
fn test_concatenated_images() {
    let values = [BigInt::from(1), BigInt::from(-2), BigInt::from(i128::MIN)];
    let mut buf = Vec::new();
    for value in &values {
        encode_big_integer(&mut buf, value);
    }

    let mut offset = 0;
    for value in &values {
        let (decoded, used) = decode_big_integer(&buf[offset..]).unwrap();
        assert_eq!(&decoded, value);
        offset += used;
    }
    assert_eq!(offset, buf.len());
}

#[test]
fn test_float_codec_special_values() {
    for value in [
        BigFloat::nan(),
        BigFloat::infinity(),
        BigFloat::neg_infinity(),
        BigFloat::zero(),
        BigFloat::neg_zero(),
    ] {
        let decoded = BigFloatCodec::decode(&BigFloatCodec::encode(&value)).unwrap();
        assert_eq!(decoded.is_nan(), value.is_nan());
        assert_eq!(decoded.is_sign_negative(), value.is_sign_negative());
        assert_eq!(decoded.total_cmp(&value), std::cmp::Ordering::Equal);
    }
}

#[test]
fn test_float_codec_finite_values() {
    let third = BigFloat::one() / 3;
    let decoded = BigFloatCodec::decode(&BigFloatCodec::encode(&third)).unwrap();
    assert_eq!(decoded, third);

    let mut encoded = BigFloatCodec::encode(&BigFloat::parse("-2.5e-300").unwrap());
    encoded.push(0xff);
    assert_eq!(BigFloatCodec::decode(&encoded), Err(DecodeError::TrailingBytes));
}

#[test]
fn test_hash_agrees_with_equality() {
    let a = BigInt::from(2).pow(200);
    let b: BigInt = a.to_string().parse().unwrap();
    assert_eq!(a.hash_value(), b.hash_value());
    assert_ne!(a.hash_value(), (a.clone() + 1).hash_value());

    let x = BigFloat::parse("0.1").unwrap() * 10;
    assert_eq!(x, BigFloat::one());
    assert_eq!(x.hash_value(), BigFloat::one().hash_value());
    assert_eq!(BigFloat::neg_zero().hash_value(), BigFloat::zero().hash_value());
}

#[test]
fn test_custom_hash_function() {
    fn byte_sum(bytes: &[u8]) -> u64 {
        bytes.iter().map(|&b| u64::from(b)).sum()
    }
    let value = BigInt::from(3);
    assert_eq!(value.hash_with(byte_sum), 0xb1 + 1 + 1 + 3);
    assert_eq!(fnv1a_64(&BigIntCodec::encode(&value)), value.hash_value());
}

#[test]
fn test_text_hooks_end_to_end() {
    let value = BigFloat::parse("-1234.5").unwrap();
    let mut out = String::new();
    format_float_into(&mut out, &value, &FloatFormat::new(3, FloatStyle::Fixed)).unwrap();
    assert_eq!(out, "-1234.500");

    let wide = to_utf32(&value);
    assert_eq!(parse_big_float_utf32(&wide), Ok(value));

    let mut chars = to_utf32(&BigInt::from(77));
    chars.push('€');
    let err = parse_big_int_utf32(&chars).unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::NonAscii);
    assert_eq!(err.position(), 2);
}
