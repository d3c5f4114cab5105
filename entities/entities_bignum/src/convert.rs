//! Conversions between big numbers and native numbers.
//!
//! Narrowing to `f32`/`f64` is correctly rounded (half to even) for both
//! types; integer narrowing with `as_*` wraps like an `as` cast, while the
//! `num_traits::ToPrimitive` impls are range checked.

use num_traits::{FromPrimitive, Num, One, Pow, Signed, ToPrimitive, Zero};

use crate::big::{pow10, BigInt};
use crate::error::ParseError;
use crate::float::{BigFloat, Repr};
use crate::limbs::{self, Limb, LimbStore};

/// Layout of an IEEE-754 binary interchange format
#[derive(Clone, Copy, Debug)]
struct BinaryFormat {
    mantissa_bits: u32,
    exponent_bits: u32,
}

impl BinaryFormat {
    const F32: Self = Self {
        mantissa_bits: f32::MANTISSA_DIGITS - 1,
        exponent_bits: 8,
    };
    const F64: Self = Self {
        mantissa_bits: f64::MANTISSA_DIGITS - 1,
        exponent_bits: 11,
    };

    fn bias(self) -> i64 {
        (1i64 << (self.exponent_bits - 1)) - 1
    }

    fn min_exponent(self) -> i64 {
        1 - self.bias()
    }

    fn infinity_bits(self) -> u64 {
        ((1u64 << self.exponent_bits) - 1) << self.mantissa_bits
    }

    /// Decimal exponents outside this range are certain to overflow or
    /// underflow the format
    fn decimal_range(self) -> (i64, i64) {
        if self.exponent_bits == 8 {
            (-46, 38)
        } else {
            (-324, 308)
        }
    }
}

/// Encode the positive value `q × 2^-scale` into `format`, rounding half to
/// even. `sticky` marks non-zero bits below `q`; callers that set it supply
/// at least two bits more than the format keeps. The sign bit is left clear.
fn round_to_binary(q: &[Limb], scale: i64, sticky: bool, format: BinaryFormat) -> u64 {
    let len = limbs::bit_len(q) as i64;
    let mut exponent = len - 1 - scale;
    let precision = i64::from(format.mantissa_bits) + 1;
    let min_exponent = format.min_exponent();
    let kept_bits = if exponent >= min_exponent {
        precision
    } else {
        precision - (min_exponent - exponent)
    };
    if kept_bits < 0 {
        return 0;
    }

    let drop = len - kept_bits;
    let mut kept = if drop <= 0 {
        limbs::low_u128(&limbs::shl_bits(q, drop.unsigned_abs())) as u64
    } else {
        let drop = drop as u64;
        let kept = limbs::low_u128(&limbs::shr_bits(q, drop)) as u64;
        let half = limbs::bit_test(q, drop - 1);
        let rest = sticky || limbs::low_bits_nonzero(q, drop - 1);
        if half && (rest || kept & 1 == 1) {
            kept + 1
        } else {
            kept
        }
    };

    if exponent < min_exponent {
        // a carry into the hidden bit yields the smallest normal encoding
        return kept;
    }
    if kept == 1u64 << precision {
        kept >>= 1;
        exponent += 1;
    }
    if exponent > format.bias() {
        return format.infinity_bits();
    }
    let mantissa_mask = (1u64 << format.mantissa_bits) - 1;
    (((exponent + format.bias()) as u64) << format.mantissa_bits) | (kept & mantissa_mask)
}

/// Sign, integer mantissa and binary exponent of a finite `f64`
pub(crate) fn decompose_f64(value: f64) -> (bool, u64, i64) {
    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let exponent = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    if exponent == 0 {
        (negative, fraction, -1074)
    } else {
        (negative, fraction | (1u64 << 52), exponent - 1075)
    }
}

fn with_sign_bit(bits: u64, negative: bool, format: BinaryFormat) -> u64 {
    let sign_bit = 1u64 << (format.mantissa_bits + format.exponent_bits);
    if negative {
        bits | sign_bit
    } else {
        bits
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInt {
            fn from(value: $t) -> Self {
                let value = i128::from(value);
                Self::from_limb_store(LimbStore::from_u128(value < 0, value.unsigned_abs()))
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInt {
            fn from(value: $t) -> Self {
                Self::from_limb_store(LimbStore::from_u128(false, u128::from(value)))
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64, i128);
impl_from_unsigned!(u8, u16, u32, u64, u128);

impl From<isize> for BigInt {
    fn from(value: isize) -> Self {
        Self::from(value as i64)
    }
}

impl From<usize> for BigInt {
    fn from(value: usize) -> Self {
        Self::from(value as u64)
    }
}

impl From<&BigInt> for BigInt {
    fn from(value: &BigInt) -> Self {
        value.clone()
    }
}

impl BigInt {
    /// Integer part of `value`, truncated toward zero; `None` for NaN and
    /// infinities
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let (negative, mantissa, exponent) = decompose_f64(value);
        let magnitude = if exponent >= 0 {
            limbs::shl_bits(&[mantissa], exponent as u64)
        } else {
            limbs::shr_bits(&[mantissa], exponent.unsigned_abs())
        };
        Some(Self::from_magnitude(negative, magnitude))
    }

    pub fn from_f32(value: f32) -> Option<Self> {
        Self::from_f64(f64::from(value))
    }

    /// Low 128 bits in two's complement
    fn low_bits(&self) -> u128 {
        let low = limbs::low_u128(self.magnitude());
        if self.is_negative() {
            low.wrapping_neg()
        } else {
            low
        }
    }

    /// Low-order bits as an `i32`, wrapping like an `as` cast
    pub fn as_i32(&self) -> i32 {
        self.low_bits() as i32
    }

    pub fn as_i64(&self) -> i64 {
        self.low_bits() as i64
    }

    pub fn as_u32(&self) -> u32 {
        self.low_bits() as u32
    }

    pub fn as_u64(&self) -> u64 {
        self.low_bits() as u64
    }

    pub fn as_i128(&self) -> i128 {
        self.low_bits() as i128
    }

    pub fn as_u128(&self) -> u128 {
        self.low_bits()
    }

    fn to_binary(&self, format: BinaryFormat) -> u64 {
        if self.is_zero() {
            return 0;
        }
        let bits = round_to_binary(self.magnitude(), 0, false, format);
        with_sign_bit(bits, self.is_negative(), format)
    }

    /// Nearest `f64`, ties to even; overflows to an infinity
    pub fn as_f64(&self) -> f64 {
        f64::from_bits(self.to_binary(BinaryFormat::F64))
    }

    /// Nearest `f32`, ties to even; overflows to an infinity
    pub fn as_f32(&self) -> f32 {
        f32::from_bits(self.to_binary(BinaryFormat::F32) as u32)
    }
}

macro_rules! impl_float_from_int {
    ($($t:ty),*) => {$(
        impl From<$t> for BigFloat {
            fn from(value: $t) -> Self {
                Self::from(BigInt::from(value))
            }
        }
    )*};
}

impl_float_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<BigInt> for BigFloat {
    fn from(value: BigInt) -> Self {
        Self::from_decimal(value, 0, false)
    }
}

impl From<&BigInt> for BigFloat {
    fn from(value: &BigInt) -> Self {
        Self::from_decimal(value.clone(), 0, false)
    }
}

impl From<&BigFloat> for BigFloat {
    fn from(value: &BigFloat) -> Self {
        value.clone()
    }
}

impl From<f64> for BigFloat {
    /// Exact binary value, rounded to working precision
    fn from(value: f64) -> Self {
        if value.is_nan() {
            return Self::nan();
        }
        if value.is_infinite() {
            return Self::infinite(value < 0.0);
        }
        if value == 0.0 {
            return Self::signed_zero(value.is_sign_negative());
        }
        let (negative, mantissa, exponent) = decompose_f64(value);
        let mantissa = BigInt::from(mantissa);
        let (mantissa, exponent) = if exponent >= 0 {
            (mantissa.shifted_left(exponent as u64), 0)
        } else {
            // m × 2^-k == m × 5^k × 10^-k
            (mantissa.times(&BigInt::from(5u8).pow_u64(exponent.unsigned_abs())), exponent)
        };
        let mantissa = if negative { -mantissa } else { mantissa };
        Self::from_decimal(mantissa, exponent, negative)
    }
}

impl From<f32> for BigFloat {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}

impl BigFloat {
    fn to_binary(&self, format: BinaryFormat) -> u64 {
        let (mantissa, exponent) = match &self.repr {
            Repr::Nan => return format.infinity_bits() | (1u64 << (format.mantissa_bits - 1)),
            Repr::Infinite { negative } => {
                return with_sign_bit(format.infinity_bits(), *negative, format)
            }
            Repr::Zero { negative } => return with_sign_bit(0, *negative, format),
            Repr::Finite { mantissa, exponent } => (mantissa, *exponent),
        };
        let negative = mantissa.is_negative();
        let (low, high) = format.decimal_range();
        let adjusted = Self::adjusted_exponent(mantissa, exponent);
        if adjusted > high {
            return with_sign_bit(format.infinity_bits(), negative, format);
        }
        if adjusted < low {
            return with_sign_bit(0, negative, format);
        }

        let (numerator, denominator) = if exponent >= 0 {
            (mantissa.abs().times(&pow10(exponent as u64)), BigInt::one())
        } else {
            (mantissa.abs(), pow10(exponent.unsigned_abs()))
        };
        // scale so the quotient carries at least 66 bits
        let scale = 66 - (numerator.bits() as i64 - denominator.bits() as i64);
        let (numerator, denominator) = if scale >= 0 {
            (numerator.shifted_left(scale as u64), denominator)
        } else {
            (numerator, denominator.shifted_left(scale.unsigned_abs()))
        };
        let (q, r) = numerator.div_rem_magnitude(&denominator);
        let bits = round_to_binary(q.magnitude(), scale, !r.is_zero(), format);
        with_sign_bit(bits, negative, format)
    }

    /// Nearest `f64`, ties to even, including subnormals
    pub fn as_f64(&self) -> f64 {
        f64::from_bits(self.to_binary(BinaryFormat::F64))
    }

    /// Nearest `f32`, ties to even, including subnormals
    pub fn as_f32(&self) -> f32 {
        f32::from_bits(self.to_binary(BinaryFormat::F32) as u32)
    }
}

impl Zero for BigInt {
    fn zero() -> Self {
        BigInt::zero()
    }

    fn is_zero(&self) -> bool {
        BigInt::is_zero(self)
    }
}

impl One for BigInt {
    fn one() -> Self {
        BigInt::one()
    }
}

impl Num for BigInt {
    type FromStrRadixErr = ParseError;

    fn from_str_radix(text: &str, radix: u32) -> Result<Self, ParseError> {
        BigInt::from_str_radix(text, radix)
    }
}

impl Signed for BigInt {
    fn abs(&self) -> Self {
        BigInt::abs(self)
    }

    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other {
            BigInt::zero()
        } else {
            self.minus(other)
        }
    }

    fn signum(&self) -> Self {
        BigInt::from(self.sign())
    }

    fn is_positive(&self) -> bool {
        BigInt::is_positive(self)
    }

    fn is_negative(&self) -> bool {
        BigInt::is_negative(self)
    }
}

impl Pow<u32> for BigInt {
    type Output = BigInt;

    fn pow(self, exponent: u32) -> BigInt {
        BigInt::pow(&self, exponent)
    }
}

impl Pow<u32> for &BigInt {
    type Output = BigInt;

    fn pow(self, exponent: u32) -> BigInt {
        BigInt::pow(self, exponent)
    }
}

impl ToPrimitive for BigInt {
    fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|v| i64::try_from(v).ok())
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|v| u64::try_from(v).ok())
    }

    fn to_i128(&self) -> Option<i128> {
        if self.bits() > 128 {
            return None;
        }
        let magnitude = limbs::low_u128(self.magnitude());
        if self.is_negative() {
            (magnitude <= 1u128 << 127).then(|| (magnitude as i128).wrapping_neg())
        } else {
            i128::try_from(magnitude).ok()
        }
    }

    fn to_u128(&self) -> Option<u128> {
        if self.is_negative() || self.bits() > 128 {
            return None;
        }
        Some(limbs::low_u128(self.magnitude()))
    }

    fn to_f32(&self) -> Option<f32> {
        Some(self.as_f32())
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.as_f64())
    }
}

impl FromPrimitive for BigInt {
    fn from_i64(n: i64) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_i128(n: i128) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_u128(n: u128) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_f64(n: f64) -> Option<Self> {
        BigInt::from_f64(n)
    }
}

impl Zero for BigFloat {
    fn zero() -> Self {
        BigFloat::zero()
    }

    fn is_zero(&self) -> bool {
        BigFloat::is_zero(self)
    }
}

impl One for BigFloat {
    fn one() -> Self {
        BigFloat::one()
    }
}

/// Integer digits past which no native integer can hold the value
const NATIVE_INT_DIGITS: u64 = 39;

impl BigFloat {
    /// Truncated value when it might fit a native integer
    fn native_candidate(&self) -> Option<BigInt> {
        if self.integer_digits() > NATIVE_INT_DIGITS {
            return None;
        }
        self.truncated()
    }
}

impl ToPrimitive for BigFloat {
    fn to_i64(&self) -> Option<i64> {
        self.native_candidate()?.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.native_candidate()?.to_u64()
    }

    fn to_i128(&self) -> Option<i128> {
        self.native_candidate()?.to_i128()
    }

    fn to_u128(&self) -> Option<u128> {
        self.native_candidate()?.to_u128()
    }

    fn to_f32(&self) -> Option<f32> {
        Some(self.as_f32())
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.as_f64())
    }
}

impl FromPrimitive for BigFloat {
    fn from_i64(n: i64) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_f32(n: f32) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_f64(n: f64) -> Option<Self> {
        Some(Self::from(n))
    }
}
