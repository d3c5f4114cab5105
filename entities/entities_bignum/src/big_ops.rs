//! Operator traits for [`BigInt`].
//!
//! Every binary operator accepts a `BigInt`, a `&BigInt` or any native
//! integer on either side. `/` and `%` panic on a zero divisor, like the
//! native integer operators; use [`BigInt::div_rem`] to handle it instead.

use std::cmp::Ordering;
use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign,
    Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use crate::big::BigInt;
use crate::limbs::Sign;

fn quotient(x: &BigInt, y: &BigInt) -> BigInt {
    match x.try_div(y) {
        Ok(q) => q,
        Err(err) => panic!("{err}"),
    }
}

fn remainder(x: &BigInt, y: &BigInt) -> BigInt {
    match x.try_rem(y) {
        Ok(r) => r,
        Err(err) => panic!("{err}"),
    }
}

macro_rules! impl_binary_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $core:path) => {
        impl $Op<&BigInt> for &BigInt {
            type Output = BigInt;

            fn $op(self, rhs: &BigInt) -> BigInt {
                $core(self, rhs)
            }
        }

        impl $Op<BigInt> for &BigInt {
            type Output = BigInt;

            fn $op(self, rhs: BigInt) -> BigInt {
                $core(self, &rhs)
            }
        }

        impl<T: Into<BigInt>> $Op<T> for BigInt {
            type Output = BigInt;

            fn $op(self, rhs: T) -> BigInt {
                $core(&self, &rhs.into())
            }
        }

        impl<T: Into<BigInt>> $OpAssign<T> for BigInt {
            fn $op_assign(&mut self, rhs: T) {
                *self = $core(self, &rhs.into());
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, BigInt::plus);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, BigInt::minus);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, BigInt::times);
impl_binary_op!(Div, div, DivAssign, div_assign, quotient);
impl_binary_op!(Rem, rem, RemAssign, rem_assign, remainder);
impl_binary_op!(BitAnd, bitand, BitAndAssign, bitand_assign, BigInt::bit_and);
impl_binary_op!(BitOr, bitor, BitOrAssign, bitor_assign, BigInt::bit_or);
impl_binary_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, BigInt::bit_xor);

/// `&BigInt op native` and `native op BigInt` for one operator
macro_rules! impl_native_op {
    ($Op:ident, $op:ident, $core:path; $($t:ty),*) => {$(
        impl $Op<$t> for &BigInt {
            type Output = BigInt;

            fn $op(self, rhs: $t) -> BigInt {
                $core(self, &BigInt::from(rhs))
            }
        }

        impl $Op<BigInt> for $t {
            type Output = BigInt;

            fn $op(self, rhs: BigInt) -> BigInt {
                $core(&BigInt::from(self), &rhs)
            }
        }

        impl $Op<&BigInt> for $t {
            type Output = BigInt;

            fn $op(self, rhs: &BigInt) -> BigInt {
                $core(&BigInt::from(self), rhs)
            }
        }
    )*};
}

macro_rules! impl_native_ops {
    ($($t:ty),*) => {
        impl_native_op!(Add, add, BigInt::plus; $($t),*);
        impl_native_op!(Sub, sub, BigInt::minus; $($t),*);
        impl_native_op!(Mul, mul, BigInt::times; $($t),*);
        impl_native_op!(Div, div, quotient; $($t),*);
        impl_native_op!(Rem, rem, remainder; $($t),*);
        impl_native_op!(BitAnd, bitand, BigInt::bit_and; $($t),*);
        impl_native_op!(BitOr, bitor, BigInt::bit_or; $($t),*);
        impl_native_op!(BitXor, bitxor, BigInt::bit_xor; $($t),*);
    };
}

impl_native_ops!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_shift_ops {
    ($($t:ty),*) => {$(
        impl Shl<$t> for BigInt {
            type Output = BigInt;

            fn shl(self, shift: $t) -> BigInt {
                self.shifted_left(shift as u64)
            }
        }

        impl Shl<$t> for &BigInt {
            type Output = BigInt;

            fn shl(self, shift: $t) -> BigInt {
                self.shifted_left(shift as u64)
            }
        }

        impl ShlAssign<$t> for BigInt {
            fn shl_assign(&mut self, shift: $t) {
                *self = self.shifted_left(shift as u64);
            }
        }

        impl Shr<$t> for BigInt {
            type Output = BigInt;

            fn shr(self, shift: $t) -> BigInt {
                self.shifted_right(shift as u64)
            }
        }

        impl Shr<$t> for &BigInt {
            type Output = BigInt;

            fn shr(self, shift: $t) -> BigInt {
                self.shifted_right(shift as u64)
            }
        }

        impl ShrAssign<$t> for BigInt {
            fn shr_assign(&mut self, shift: $t) {
                *self = self.shifted_right(shift as u64);
            }
        }
    )*};
}

impl_shift_ops!(u8, u16, u32, u64, usize);

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        let (sign, limbs) = self.into_limb_store().into_parts();
        BigInt::from_magnitude(sign == Sign::Positive, limbs)
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        BigInt::from_magnitude(!self.is_negative(), self.magnitude().to_vec())
    }
}

impl Not for BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        self.bit_not()
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        self.bit_not()
    }
}

impl Sum for BigInt {
    fn sum<I: Iterator<Item = BigInt>>(iter: I) -> Self {
        iter.fold(BigInt::zero(), |acc, x| acc.plus(&x))
    }
}

impl<'a> Sum<&'a BigInt> for BigInt {
    fn sum<I: Iterator<Item = &'a BigInt>>(iter: I) -> Self {
        iter.fold(BigInt::zero(), |acc, x| acc.plus(x))
    }
}

impl Product for BigInt {
    fn product<I: Iterator<Item = BigInt>>(iter: I) -> Self {
        iter.fold(BigInt::one(), |acc, x| acc.times(&x))
    }
}

impl<'a> Product<&'a BigInt> for BigInt {
    fn product<I: Iterator<Item = &'a BigInt>>(iter: I) -> Self {
        iter.fold(BigInt::one(), |acc, x| acc.times(x))
    }
}

macro_rules! impl_native_cmp {
    ($($t:ty),*) => {$(
        impl PartialEq<$t> for BigInt {
            fn eq(&self, other: &$t) -> bool {
                *self == BigInt::from(*other)
            }
        }

        impl PartialEq<BigInt> for $t {
            fn eq(&self, other: &BigInt) -> bool {
                BigInt::from(*self) == *other
            }
        }

        impl PartialOrd<$t> for BigInt {
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                Some(self.cmp(&BigInt::from(*other)))
            }
        }

        impl PartialOrd<BigInt> for $t {
            fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
                Some(BigInt::from(*self).cmp(other))
            }
        }
    )*};
}

impl_native_cmp!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Exact comparison against a binary float; `None` for NaN
pub(crate) fn cmp_f64(value: &BigInt, other: f64) -> Option<Ordering> {
    if other.is_nan() {
        return None;
    }
    if other.is_infinite() {
        return Some(if other > 0.0 { Ordering::Less } else { Ordering::Greater });
    }
    let truncated = BigInt::from_f64(other)?;
    match value.cmp(&truncated) {
        Ordering::Equal => {
            let fraction = other - other.trunc();
            fraction.partial_cmp(&0.0).map(Ordering::reverse)
        }
        ord => Some(ord),
    }
}

macro_rules! impl_float_cmp {
    ($($t:ty),*) => {$(
        impl PartialEq<$t> for BigInt {
            fn eq(&self, other: &$t) -> bool {
                cmp_f64(self, f64::from(*other)) == Some(Ordering::Equal)
            }
        }

        impl PartialEq<BigInt> for $t {
            fn eq(&self, other: &BigInt) -> bool {
                other == self
            }
        }

        impl PartialOrd<$t> for BigInt {
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                cmp_f64(self, f64::from(*other))
            }
        }

        impl PartialOrd<BigInt> for $t {
            fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
                cmp_f64(other, f64::from(*self)).map(Ordering::reverse)
            }
        }
    )*};
}

impl_float_cmp!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_forms() {
        let a = BigInt::from(7);
        let b = BigInt::from(3);
        assert_eq!(&a + &b, 10);
        assert_eq!(&a - b.clone(), 4);
        assert_eq!(a.clone() * &b, 21);
        assert_eq!(a.clone() / 2, 3);
        assert_eq!(-7 % b.clone(), -1);
        assert_eq!(10u8 - &a, 3);
        assert_eq!(&a & 6u32, 6);
        assert_eq!(a.clone() | -8i64, -1);
        assert_eq!(a.clone() ^ a.clone(), 0);
    }

    #[test]
    fn test_assign_operators() {
        let mut x = BigInt::from(10);
        x += 5;
        x -= BigInt::from(3);
        x *= &BigInt::from(4);
        x /= 6u64;
        x %= 5;
        assert_eq!(x, 3);
        x <<= 70u32;
        x >>= 69usize;
        assert_eq!(x, 6);
        x &= 3;
        x |= 8;
        x ^= 1;
        assert_eq!(x, 11);
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_division_operator_panics_on_zero() {
        let _ = BigInt::from(1) / 0;
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_remainder_operator_panics_on_zero() {
        let _ = &BigInt::from(1) % BigInt::zero();
    }

    #[test]
    fn test_unary_operators() {
        let x = BigInt::from(5);
        assert_eq!(-&x, -5);
        assert_eq!(-x.clone(), -5);
        assert_eq!(-BigInt::zero(), 0);
        assert_eq!(-(-x.clone()), x);
        assert_eq!(!x, -6);
    }

    #[test]
    fn test_shift_operators() {
        let x = BigInt::from(-9);
        assert_eq!(&x << 3u8, -72);
        assert_eq!(&x >> 1u16, -5);
        assert_eq!(x >> 200u64, -1);
        assert_eq!(BigInt::from(9) >> 200usize, 0);
    }

    #[test]
    fn test_sum_and_product() {
        let values: Vec<BigInt> = (1..=25).map(BigInt::from).collect();
        let sum: BigInt = values.iter().sum();
        assert_eq!(sum, 325);
        let factorial: BigInt = values.into_iter().product();
        assert_eq!(factorial.to_string(), "15511210043330985984000000");
    }

    #[test]
    fn test_native_comparisons() {
        let x = BigInt::from(-3);
        assert!(x < 0);
        assert!(0u8 > x);
        assert!(x == -3i8);
        assert!(-3i64 == x);
        assert!(BigInt::from(u128::MAX) > u64::MAX);
    }

    #[test]
    fn test_float_comparisons() {
        let x = BigInt::from(2);
        assert!(x < 2.5);
        assert!(x > 1.999f32);
        assert!(x == 2.0);
        assert!(-1.5 < BigInt::from(-1));
        assert!(BigInt::from(-2) < -1.5);
        assert!(x != f64::NAN);
        assert_eq!(x.partial_cmp(&f64::NAN), None);
        assert!(x < f64::INFINITY);
        assert!(BigInt::one().shifted_left(2000) > f64::MAX);
    }
}
