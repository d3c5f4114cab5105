//! Operator traits for [`BigFloat`].
//!
//! Mixed comparisons against integers and binary floats are exact; they never
//! round the other operand to working precision first.

use std::cmp::Ordering;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::big::{pow10, BigInt};
use crate::convert::decompose_f64;
use crate::float::{BigFloat, Repr};

macro_rules! impl_binary_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $core:ident) => {
        impl $Op<&BigFloat> for &BigFloat {
            type Output = BigFloat;

            fn $op(self, rhs: &BigFloat) -> BigFloat {
                self.$core(rhs)
            }
        }

        impl $Op<BigFloat> for &BigFloat {
            type Output = BigFloat;

            fn $op(self, rhs: BigFloat) -> BigFloat {
                self.$core(&rhs)
            }
        }

        impl<T: Into<BigFloat>> $Op<T> for BigFloat {
            type Output = BigFloat;

            fn $op(self, rhs: T) -> BigFloat {
                self.$core(&rhs.into())
            }
        }

        impl<T: Into<BigFloat>> $OpAssign<T> for BigFloat {
            fn $op_assign(&mut self, rhs: T) {
                *self = self.$core(&rhs.into());
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, plus);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, minus);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, times);
impl_binary_op!(Div, div, DivAssign, div_assign, divide);

macro_rules! impl_native_op {
    ($Op:ident, $op:ident, $core:ident; $($t:ty),*) => {$(
        impl $Op<$t> for &BigFloat {
            type Output = BigFloat;

            fn $op(self, rhs: $t) -> BigFloat {
                self.$core(&BigFloat::from(rhs))
            }
        }

        impl $Op<BigFloat> for $t {
            type Output = BigFloat;

            fn $op(self, rhs: BigFloat) -> BigFloat {
                BigFloat::from(self).$core(&rhs)
            }
        }

        impl $Op<&BigFloat> for $t {
            type Output = BigFloat;

            fn $op(self, rhs: &BigFloat) -> BigFloat {
                BigFloat::from(self).$core(rhs)
            }
        }
    )*};
}

macro_rules! impl_native_ops {
    ($($t:ty),*) => {
        impl_native_op!(Add, add, plus; $($t),*);
        impl_native_op!(Sub, sub, minus; $($t),*);
        impl_native_op!(Mul, mul, times; $($t),*);
        impl_native_op!(Div, div, divide; $($t),*);
    };
}

impl_native_ops!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Neg for BigFloat {
    type Output = BigFloat;

    fn neg(self) -> BigFloat {
        self.negated()
    }
}

impl Neg for &BigFloat {
    type Output = BigFloat;

    fn neg(self) -> BigFloat {
        self.negated()
    }
}

impl Sum for BigFloat {
    fn sum<I: Iterator<Item = BigFloat>>(iter: I) -> Self {
        iter.fold(BigFloat::zero(), |acc, x| acc.plus(&x))
    }
}

impl<'a> Sum<&'a BigFloat> for BigFloat {
    fn sum<I: Iterator<Item = &'a BigFloat>>(iter: I) -> Self {
        iter.fold(BigFloat::zero(), |acc, x| acc.plus(x))
    }
}

impl Product for BigFloat {
    fn product<I: Iterator<Item = BigFloat>>(iter: I) -> Self {
        iter.fold(BigFloat::one(), |acc, x| acc.times(&x))
    }
}

impl<'a> Product<&'a BigFloat> for BigFloat {
    fn product<I: Iterator<Item = &'a BigFloat>>(iter: I) -> Self {
        iter.fold(BigFloat::one(), |acc, x| acc.times(x))
    }
}

fn by_sign(negative: bool) -> Ordering {
    if negative {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Exact comparison of a float against an integer; `None` for NaN
fn cmp_big_int(value: &BigFloat, other: &BigInt) -> Option<Ordering> {
    match &value.repr {
        Repr::Nan => None,
        Repr::Infinite { negative } => Some(by_sign(*negative)),
        Repr::Zero { .. } => Some(BigInt::zero().cmp(other)),
        Repr::Finite { mantissa, exponent } => {
            // |value| >= 10^adjusted > |other| once adjusted reaches its digit count
            let adjusted = BigFloat::adjusted_exponent(mantissa, *exponent);
            if adjusted >= other.decimal_digits() as i64 {
                return Some(by_sign(mantissa.is_negative()));
            }
            let truncated = value.truncated()?;
            match truncated.cmp(other) {
                Ordering::Equal if value.is_integer() => Some(Ordering::Equal),
                Ordering::Equal => Some(by_sign(mantissa.is_negative())),
                ord => Some(ord),
            }
        }
    }
}

/// Exact comparison of a float against a binary float; `None` for NaN
fn cmp_f64(value: &BigFloat, other: f64) -> Option<Ordering> {
    let (mantissa, exponent) = match &value.repr {
        Repr::Finite { mantissa, exponent } if other.is_finite() && other != 0.0 => {
            (mantissa, *exponent)
        }
        // specials and zeros convert exactly
        _ => return value.partial_cmp(&BigFloat::from(other)),
    };
    let negative = mantissa.is_negative();
    if negative != (other < 0.0) {
        return Some(by_sign(negative));
    }

    // every finite non-zero f64 lies within [1e-325, 1e309)
    let adjusted = BigFloat::adjusted_exponent(mantissa, exponent);
    let magnitude = if adjusted > 309 {
        Ordering::Greater
    } else if adjusted < -325 {
        Ordering::Less
    } else {
        let (_, binary, binary_exponent) = decompose_f64(other);
        let mut lhs = mantissa.abs();
        let mut rhs = BigInt::from(binary);
        if exponent >= 0 {
            lhs = lhs.times(&pow10(exponent as u64));
        } else {
            rhs = rhs.times(&pow10(exponent.unsigned_abs()));
        }
        if binary_exponent >= 0 {
            rhs = rhs.shifted_left(binary_exponent as u64);
        } else {
            lhs = lhs.shifted_left(binary_exponent.unsigned_abs());
        }
        lhs.cmp(&rhs)
    };
    Some(if negative { magnitude.reverse() } else { magnitude })
}

impl PartialEq<BigInt> for BigFloat {
    fn eq(&self, other: &BigInt) -> bool {
        cmp_big_int(self, other) == Some(Ordering::Equal)
    }
}

impl PartialEq<BigFloat> for BigInt {
    fn eq(&self, other: &BigFloat) -> bool {
        cmp_big_int(other, self) == Some(Ordering::Equal)
    }
}

impl PartialOrd<BigInt> for BigFloat {
    fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
        cmp_big_int(self, other)
    }
}

impl PartialOrd<BigFloat> for BigInt {
    fn partial_cmp(&self, other: &BigFloat) -> Option<Ordering> {
        cmp_big_int(other, self).map(Ordering::reverse)
    }
}

fn cmp_int<T: Into<BigInt>>(value: &BigFloat, other: T) -> Option<Ordering> {
    cmp_big_int(value, &other.into())
}

fn cmp_f32(value: &BigFloat, other: f32) -> Option<Ordering> {
    cmp_f64(value, f64::from(other))
}

macro_rules! impl_native_cmp {
    ($cmp:ident; $($t:ty),*) => {$(
        impl PartialEq<$t> for BigFloat {
            fn eq(&self, other: &$t) -> bool {
                $cmp(self, *other) == Some(Ordering::Equal)
            }
        }

        impl PartialEq<BigFloat> for $t {
            fn eq(&self, other: &BigFloat) -> bool {
                $cmp(other, *self) == Some(Ordering::Equal)
            }
        }

        impl PartialOrd<$t> for BigFloat {
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                $cmp(self, *other)
            }
        }

        impl PartialOrd<BigFloat> for $t {
            fn partial_cmp(&self, other: &BigFloat) -> Option<Ordering> {
                $cmp(other, *self).map(Ordering::reverse)
            }
        }
    )*};
}

impl_native_cmp!(cmp_int; i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_native_cmp!(cmp_f32; f32);
impl_native_cmp!(cmp_f64; f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn float(text: &str) -> BigFloat {
        BigFloat::parse(text).unwrap()
    }

    #[test]
    fn test_operator_forms() {
        let a = float("1.5");
        let b = float("0.25");
        assert_eq!(&a + &b, float("1.75"));
        assert_eq!(a.clone() - &b, float("1.25"));
        assert_eq!(&a * b.clone(), float("0.375"));
        assert_eq!(a.clone() / 3, float("0.5"));
        assert_eq!(2 * &a, float("3"));
        assert_eq!(1.0 / b.clone(), float("4"));
        assert_eq!(a.clone() + BigInt::from(10), float("11.5"));
        assert_eq!(-&a, float("-1.5"));
    }

    #[test]
    fn test_assign_operators() {
        let mut x = float("10");
        x += 2.5;
        x -= 0.5f32;
        x *= &float("3");
        x /= 4u8;
        assert_eq!(x, float("9"));
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        assert_eq!(float("1") / 0, BigFloat::infinity());
        assert_eq!(float("-1") / 0, BigFloat::neg_infinity());
        assert!((float("0") / 0.0).is_nan());
    }

    #[test]
    fn test_sum_and_product() {
        let tenths: Vec<BigFloat> = (0..10).map(|_| float("0.1")).collect();
        let total: BigFloat = tenths.iter().sum();
        assert_eq!(total, 1);
        let product: BigFloat = tenths.into_iter().product();
        assert_eq!(product, float("1e-10"));
    }

    #[test]
    fn test_big_int_comparisons() {
        let huge = BigInt::from(10).pow(150);
        let rounded = BigFloat::from(&huge.plus_small(1));
        assert_eq!(rounded, huge);
        assert!(rounded < huge.plus_small(1));
        assert!(float("2.5") > BigInt::from(2));
        assert!(BigInt::from(3) > float("2.5"));
        assert!(float("-2.5") < BigInt::from(-2));
        assert!(float("1e1000") > huge);
        assert!(float("-1e-1000") < BigInt::zero());
        assert!(BigFloat::nan() != BigInt::zero());
    }

    #[test]
    fn test_native_comparisons() {
        assert!(float("0.1") != 0.1);
        assert!(float("0.1") < 0.1);
        assert!(BigFloat::from(0.1) == 0.1);
        assert!(float("2.5") == 2.5f32);
        assert!(3 > float("2.5"));
        assert!(float("-0") == 0);
        assert!(float("1e400") > f64::MAX);
        assert!(float("1e-400") > 0.0);
        assert!(float("1e-400") < 5e-324);
        assert!(BigFloat::neg_infinity() < f64::MIN);
        assert_eq!(BigFloat::nan().partial_cmp(&1.0), None);
    }
}
