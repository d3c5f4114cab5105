//! Integration tests for entities_bignum crate
//!
//! These tests exercise integers and floats end-to-end through the public API.

use entities_bignum::*;

#[test]
fn test_big_int_arithmetic_integration() {
    let a: BigInt = "123456789012345678901234567890".parse().unwrap();
    let b = BigInt::from(-987654321i64);

    let sum = &a + &b;
    assert_eq!(sum.to_string(), "123456789012345678900246913569");

    let product = &a * &b;
    assert_eq!(product.to_string(), "-121932631124828532112482853211126352690");

    let (q, r) = a.div_rem(&b).unwrap();
    assert_eq!(&q * &b + &r, a);
    assert!(r.is_zero() || r.sign() == a.sign());
}

#[test]
fn test_division_identity_for_mixed_signs() {
    let values = [-1_000_000_007i64, -12, -1, 1, 5, 97, 1_000_000_009];
    for &x in &values {
        for &y in &values {
            let (a, b) = (BigInt::from(x), BigInt::from(y));
            let (q, r) = a.div_rem(&b).unwrap();
            assert_eq!(q, x / y, "{x} / {y}");
            assert_eq!(r, x % y, "{x} % {y}");
        }
    }
}

#[test]
fn test_division_by_zero_leaves_operand_untouched() {
    let x = BigInt::from(42);
    let result = x.try_div(&BigInt::zero());
    assert_eq!(result, Err(DivisionByZero));
    assert_eq!(x, 42);

    let err: NumericError = result.unwrap_err().into();
    assert_eq!(err.to_string(), "division by zero");
}

#[test]
fn test_factorial_and_powers() {
    let factorial: BigInt = (1..=50u32).map(BigInt::from).product();
    assert_eq!(
        factorial.to_string(),
        "30414093201713378043612608166064768844377641568960512000000000000"
    );
    assert_eq!(BigInt::from(2).pow(200) >> 190u32, 1024);
    assert_eq!(factorial.gcd(&BigInt::from(2).pow(100)), BigInt::from(2).pow(47));
}

#[test]
fn test_parse_errors_report_kind_and_position() {
    let err = "12a3".parse::<BigInt>().unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::InvalidDigit('a'));
    assert_eq!(err.position(), 2);
    assert_eq!(err.to_string(), "invalid digit 'a' at position 2");

    assert_eq!("".parse::<BigInt>().unwrap_err().kind(), ParseErrorKind::Empty);
    assert_eq!(
        "1.2.3".parse::<BigFloat>().unwrap_err().kind(),
        ParseErrorKind::MultipleDecimalPoints
    );
}

#[test]
fn test_limb_store_access() {
    let x = BigInt::from(u128::MAX);
    assert_eq!(x.as_limb_store().limbs(), &[u64::MAX, u64::MAX]);
    assert_eq!(x.as_limb_store().sign(), Sign::Positive);

    let store = LimbStore::from_parts(true, vec![5, 0, 0]);
    assert_eq!(store.limbs(), &[5]);
    assert_eq!(BigInt::from_limb_store(store), -5);
    assert_eq!(LIMB_BITS, 64);
}

#[test]
fn test_big_float_precision_cap() {
    let third = BigFloat::from(1) / BigFloat::from(3);
    let text = third.to_string();
    assert_eq!(text, format!("0.{}", "3".repeat(PRECISION)));
    assert_eq!((BigFloat::from(1) / 3).to_string(), text);

    let sum = &third + &third + &third;
    assert_eq!(sum.to_string(), format!("0.{}", "9".repeat(PRECISION)));
}

#[test]
fn test_big_float_ieee_specials() {
    let one = BigFloat::from(1.0);
    let zero = BigFloat::from(0.0);
    assert_eq!(&one / &zero, BigFloat::infinity());
    assert!((&zero / &zero).is_nan());
    assert!(BigFloat::nan() != BigFloat::nan());
    assert!((BigFloat::infinity() - BigFloat::infinity()).is_nan());
    assert!((BigFloat::infinity() * zero).is_nan());
    assert_eq!(BigFloat::nan().total_cmp(&one), std::cmp::Ordering::Greater);
}

#[test]
fn test_big_float_mixed_with_integers() {
    let huge: BigInt = "1".repeat(120).parse().unwrap();
    let rounded = BigFloat::from(&huge);
    assert!(rounded.is_integer());
    assert_eq!(rounded.to_big_int().unwrap().to_string().len(), 120);
    assert!(rounded != huge);
    assert_eq!(rounded.format(&FloatFormat::new(3, FloatStyle::Scientific)), "1.111e119");
}

#[test]
fn test_native_round_trips() {
    for value in [0.0, -0.0, 1.0, -1.5, 1e-300, 123456.789, f64::MAX, f64::MIN_POSITIVE] {
        let big = BigFloat::from(value);
        assert_eq!(big.as_f64().to_bits(), value.to_bits(), "{value}");
        let reparsed: BigFloat = big.to_string().parse().unwrap();
        assert_eq!(reparsed.as_f64().to_bits(), value.to_bits(), "{value}");
    }
    assert_eq!(BigInt::from(i64::MIN).as_i64(), i64::MIN);
    assert_eq!(BigInt::from_f64(-1e19).map(|x| x.to_string()), Some("-10000000000000000000".into()));
}
