//! Big Float Operations
//!
//! Decimal floating point with a fixed working precision of [`PRECISION`]
//! significant digits. A finite value is `mantissa × 10^exponent` with a
//! [`BigInt`] mantissa; NaN, signed infinities and signed zero are separate
//! states, and arithmetic on them follows IEEE-754.
//!
//! Every result is computed exactly and then rounded to [`PRECISION`]
//! digits with round-half-to-even. Finite values are kept canonical (no
//! trailing decimal zeros in the mantissa), so two finite values are equal
//! exactly when their mantissas and exponents are.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::big::{pow10, BigInt, MAX_BITS};
use crate::limbs;

/// Significant decimal digits kept by every operation
pub const PRECISION: usize = 100;

/// Largest decimal exponent (of the leading digit) a finite value can have.
/// Larger results become infinite, smaller ones (below `-MAX_EXP10`) zero.
pub const MAX_EXP10: i64 = 1 << 60;

/// Most integer digits [`BigFloat::to_big_int`] and fixed notation will
/// materialize; every such integer stays within [`MAX_BITS`] bits.
pub const MAX_INT_DIGITS: u64 = MAX_BITS * 30_103 / 100_000;

/// Orders of magnitude below which an addend cannot affect a rounded sum
const ADD_CUTOFF: i64 = PRECISION as i64 + 2;

#[derive(Clone, Debug)]
pub(crate) enum Repr {
    Nan,
    Infinite { negative: bool },
    Zero { negative: bool },
    /// Non-zero mantissa with at most `PRECISION` digits and no trailing zeros
    Finite { mantissa: BigInt, exponent: i64 },
}

/// Arbitrary precision decimal floating point number.
#[derive(Clone, Debug)]
pub struct BigFloat {
    pub(crate) repr: Repr,
}

impl BigFloat {
    pub fn nan() -> Self {
        Self { repr: Repr::Nan }
    }

    pub fn infinity() -> Self {
        Self::infinite(false)
    }

    pub fn neg_infinity() -> Self {
        Self::infinite(true)
    }

    pub fn zero() -> Self {
        Self::signed_zero(false)
    }

    pub fn neg_zero() -> Self {
        Self::signed_zero(true)
    }

    pub fn one() -> Self {
        Self {
            repr: Repr::Finite {
                mantissa: BigInt::one(),
                exponent: 0,
            },
        }
    }

    pub(crate) fn infinite(negative: bool) -> Self {
        Self {
            repr: Repr::Infinite { negative },
        }
    }

    pub(crate) fn signed_zero(negative: bool) -> Self {
        Self {
            repr: Repr::Zero { negative },
        }
    }

    /// Round `mantissa × 10^exponent` to working precision.
    ///
    /// `zero_negative` picks the sign of the result when the mantissa is 0.
    pub(crate) fn from_decimal(mantissa: BigInt, exponent: i64, zero_negative: bool) -> Self {
        if mantissa.is_zero() {
            return Self::signed_zero(zero_negative);
        }
        let negative = mantissa.is_negative();
        let (magnitude, exponent) = round_to_digits(&mantissa.abs(), exponent, PRECISION as u64);
        let mantissa = if negative { -magnitude } else { magnitude };

        let adjusted = exponent.saturating_add(mantissa.decimal_digits() as i64 - 1);
        if adjusted > MAX_EXP10 {
            tracing::trace!(adjusted, "decimal exponent overflow, saturating to infinity");
            return Self::infinite(negative);
        }
        if adjusted < -MAX_EXP10 {
            tracing::trace!(adjusted, "decimal exponent underflow, flushing to zero");
            return Self::signed_zero(negative);
        }
        Self {
            repr: Repr::Finite { mantissa, exponent },
        }
    }

    /// `mantissa × 10^exponent`, rounded to working precision
    pub fn from_parts(mantissa: BigInt, exponent: i64) -> Self {
        Self::from_decimal(mantissa, exponent, false)
    }

    /// Canonical mantissa and exponent of a finite non-zero value
    pub fn parts(&self) -> Option<(&BigInt, i64)> {
        match &self.repr {
            Repr::Finite { mantissa, exponent } => Some((mantissa, *exponent)),
            _ => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self.repr, Repr::Nan)
    }

    pub fn is_inf(&self) -> bool {
        matches!(self.repr, Repr::Infinite { .. })
    }

    /// True for +0 and -0
    pub fn is_zero(&self) -> bool {
        matches!(self.repr, Repr::Zero { .. })
    }

    pub fn is_finite(&self) -> bool {
        matches!(self.repr, Repr::Zero { .. } | Repr::Finite { .. })
    }

    /// True for zeros and finite values without a fractional part
    pub fn is_integer(&self) -> bool {
        match &self.repr {
            Repr::Zero { .. } => true,
            Repr::Finite { exponent, .. } => *exponent >= 0,
            _ => false,
        }
    }

    /// Whether the sign bit is set (true for -0 and -inf, false for NaN)
    pub fn is_sign_negative(&self) -> bool {
        match &self.repr {
            Repr::Nan => false,
            Repr::Infinite { negative } | Repr::Zero { negative } => *negative,
            Repr::Finite { mantissa, .. } => mantissa.is_negative(),
        }
    }

    /// -1, 0 or 1; zero of either sign and NaN give 0
    pub fn sign(&self) -> i32 {
        match &self.repr {
            Repr::Nan | Repr::Zero { .. } => 0,
            Repr::Infinite { negative } => {
                if *negative {
                    -1
                } else {
                    1
                }
            }
            Repr::Finite { mantissa, .. } => mantissa.sign(),
        }
    }

    pub fn abs(&self) -> Self {
        match &self.repr {
            Repr::Nan => Self::nan(),
            Repr::Infinite { .. } => Self::infinite(false),
            Repr::Zero { .. } => Self::zero(),
            Repr::Finite { mantissa, exponent } => Self {
                repr: Repr::Finite {
                    mantissa: mantissa.abs(),
                    exponent: *exponent,
                },
            },
        }
    }

    /// Flip the sign (NaN stays NaN)
    pub fn negated(&self) -> Self {
        match &self.repr {
            Repr::Nan => Self::nan(),
            Repr::Infinite { negative } => Self::infinite(!negative),
            Repr::Zero { negative } => Self::signed_zero(!negative),
            Repr::Finite { mantissa, exponent } => Self {
                repr: Repr::Finite {
                    mantissa: -mantissa,
                    exponent: *exponent,
                },
            },
        }
    }

    /// Decimal exponent of the leading digit of a finite value
    pub(crate) fn adjusted_exponent(mantissa: &BigInt, exponent: i64) -> i64 {
        exponent + mantissa.decimal_digits() as i64 - 1
    }

    /// x + y, rounded
    pub fn plus(&self, other: &Self) -> Self {
        match (&self.repr, &other.repr) {
            (Repr::Nan, _) | (_, Repr::Nan) => Self::nan(),
            (Repr::Infinite { negative: a }, Repr::Infinite { negative: b }) => {
                if a == b {
                    self.clone()
                } else {
                    Self::nan()
                }
            }
            (Repr::Infinite { .. }, _) => self.clone(),
            (_, Repr::Infinite { .. }) => other.clone(),
            (Repr::Zero { negative: a }, Repr::Zero { negative: b }) => Self::signed_zero(*a && *b),
            (Repr::Zero { .. }, _) => other.clone(),
            (_, Repr::Zero { .. }) => self.clone(),
            (
                Repr::Finite {
                    mantissa: ma,
                    exponent: ea,
                },
                Repr::Finite {
                    mantissa: mb,
                    exponent: eb,
                },
            ) => {
                let adj_a = Self::adjusted_exponent(ma, *ea);
                let adj_b = Self::adjusted_exponent(mb, *eb);
                if adj_a - adj_b > ADD_CUTOFF {
                    return self.clone();
                }
                if adj_b - adj_a > ADD_CUTOFF {
                    return other.clone();
                }
                let exponent = (*ea).min(*eb);
                let a = ma.times(&pow10((ea - exponent) as u64));
                let b = mb.times(&pow10((eb - exponent) as u64));
                Self::from_decimal(a.plus(&b), exponent, false)
            }
        }
    }

    /// x - y, rounded
    pub fn minus(&self, other: &Self) -> Self {
        self.plus(&other.negated())
    }

    /// x * y, rounded
    pub fn times(&self, other: &Self) -> Self {
        let negative = self.is_sign_negative() != other.is_sign_negative();
        match (&self.repr, &other.repr) {
            (Repr::Nan, _) | (_, Repr::Nan) => Self::nan(),
            (Repr::Infinite { .. }, Repr::Zero { .. }) | (Repr::Zero { .. }, Repr::Infinite { .. }) => {
                Self::nan()
            }
            (Repr::Infinite { .. }, _) | (_, Repr::Infinite { .. }) => Self::infinite(negative),
            (Repr::Zero { .. }, _) | (_, Repr::Zero { .. }) => Self::signed_zero(negative),
            (
                Repr::Finite {
                    mantissa: ma,
                    exponent: ea,
                },
                Repr::Finite {
                    mantissa: mb,
                    exponent: eb,
                },
            ) => Self::from_decimal(ma.times(mb), ea.saturating_add(*eb), negative),
        }
    }

    /// x / y, rounded; division by zero gives an infinity or NaN
    pub fn divide(&self, other: &Self) -> Self {
        let negative = self.is_sign_negative() != other.is_sign_negative();
        match (&self.repr, &other.repr) {
            (Repr::Nan, _) | (_, Repr::Nan) => Self::nan(),
            (Repr::Infinite { .. }, Repr::Infinite { .. }) => Self::nan(),
            (Repr::Infinite { .. }, _) => Self::infinite(negative),
            (_, Repr::Infinite { .. }) => Self::signed_zero(negative),
            (Repr::Zero { .. }, Repr::Zero { .. }) => Self::nan(),
            (_, Repr::Zero { .. }) => Self::infinite(negative),
            (Repr::Zero { .. }, _) => Self::signed_zero(negative),
            (
                Repr::Finite {
                    mantissa: ma,
                    exponent: ea,
                },
                Repr::Finite {
                    mantissa: mb,
                    exponent: eb,
                },
            ) => {
                // Scale the dividend so the quotient has at least PRECISION + 1
                // digits, then fold the remainder into a sticky digit.
                let da = ma.decimal_digits() as i64;
                let db = mb.decimal_digits() as i64;
                let scale = (PRECISION as i64 + 1 + db - da).max(0);
                let numerator = ma.abs().times(&pow10(scale as u64));
                let (q, r) = numerator.div_rem_magnitude(&mb.abs());
                let sticky = u64::from(!r.is_zero());
                let q = q.times(&BigInt::from(10u8)).plus_small(sticky);
                let q = if negative { -q } else { q };
                let exponent = ea.saturating_sub(*eb).saturating_sub(scale + 1);
                Self::from_decimal(q, exponent, negative)
            }
        }
    }

    /// Truncate toward zero into an integer.
    ///
    /// `None` for NaN, infinities and values whose integer part has more than
    /// [`MAX_INT_DIGITS`] digits.
    pub fn to_big_int(&self) -> Option<BigInt> {
        if self.integer_digits() > MAX_INT_DIGITS {
            return None;
        }
        self.truncated()
    }

    /// Digits before the decimal point of a finite value; 0 below one
    pub(crate) fn integer_digits(&self) -> u64 {
        match &self.repr {
            Repr::Finite { mantissa, exponent } => {
                let adjusted = Self::adjusted_exponent(mantissa, *exponent);
                u64::try_from(adjusted).map_or(0, |adjusted| adjusted + 1)
            }
            _ => 0,
        }
    }

    /// Truncation without the size bound; callers keep the exponent small
    pub(crate) fn truncated(&self) -> Option<BigInt> {
        match &self.repr {
            Repr::Nan | Repr::Infinite { .. } => None,
            Repr::Zero { .. } => Some(BigInt::zero()),
            Repr::Finite { mantissa, exponent } => {
                if *exponent >= 0 {
                    return Some(mantissa.times(&pow10(*exponent as u64)));
                }
                let shift = exponent.unsigned_abs();
                if shift > mantissa.decimal_digits() {
                    return Some(BigInt::zero());
                }
                let (q, _) = mantissa.div_rem_magnitude(&pow10(shift));
                Some(if mantissa.is_negative() { -q } else { q })
            }
        }
    }

    /// Order of two non-NaN values; both zeros compare equal
    fn cmp_ordered(&self, other: &Self) -> Ordering {
        fn rank(value: &BigFloat) -> u8 {
            match &value.repr {
                Repr::Infinite { negative: true } => 0,
                Repr::Finite { mantissa, .. } if mantissa.is_negative() => 1,
                Repr::Zero { .. } | Repr::Nan => 2,
                Repr::Finite { .. } => 3,
                Repr::Infinite { negative: false } => 4,
            }
        }
        match rank(self).cmp(&rank(other)) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match (&self.repr, &other.repr) {
            (
                Repr::Finite {
                    mantissa: ma,
                    exponent: ea,
                },
                Repr::Finite {
                    mantissa: mb,
                    exponent: eb,
                },
            ) => {
                let magnitude = cmp_finite_magnitude(ma, *ea, mb, *eb);
                if ma.is_negative() {
                    magnitude.reverse()
                } else {
                    magnitude
                }
            }
            _ => Ordering::Equal,
        }
    }

    /// Total order: -inf < negative < zeros < positive < +inf < NaN.
    ///
    /// Unlike `partial_cmp`, NaN is ordered (above everything, equal to
    /// itself); +0 and -0 remain equal.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self.is_nan(), other.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.cmp_ordered(other),
        }
    }
}

/// Compare `|ma| × 10^ea` against `|mb| × 10^eb`
fn cmp_finite_magnitude(ma: &BigInt, ea: i64, mb: &BigInt, eb: i64) -> Ordering {
    let adj_a = BigFloat::adjusted_exponent(ma, ea);
    let adj_b = BigFloat::adjusted_exponent(mb, eb);
    if adj_a != adj_b {
        return adj_a.cmp(&adj_b);
    }
    let exponent = ea.min(eb);
    let a = ma.abs().times(&pow10((ea - exponent) as u64));
    let b = mb.abs().times(&pow10((eb - exponent) as u64));
    a.cmp(&b)
}

/// Round a non-negative `magnitude` to `drop` fewer digits, half to even
pub(crate) fn round_half_even(magnitude: &BigInt, drop: u64) -> BigInt {
    if drop == 0 {
        return magnitude.clone();
    }
    if drop > magnitude.decimal_digits() + 1 {
        return BigInt::zero();
    }
    let divisor = pow10(drop);
    let (q, r) = magnitude.div_rem_magnitude(&divisor);
    match r.shifted_left(1).cmp(&divisor) {
        Ordering::Greater => q.plus_small(1),
        Ordering::Equal if q.is_odd() => q.plus_small(1),
        _ => q,
    }
}

/// Round a non-negative `magnitude × 10^exponent` to at most `digits`
/// significant digits and strip trailing zeros.
pub(crate) fn round_to_digits(magnitude: &BigInt, exponent: i64, digits: u64) -> (BigInt, i64) {
    let len = magnitude.decimal_digits();
    let (rounded, exponent) = if len > digits {
        let drop = len - digits;
        (round_half_even(magnitude, drop), exponent.saturating_add(drop as i64))
    } else {
        (magnitude.clone(), exponent)
    };
    let (stripped, zeros) = strip_trailing_zeros(rounded);
    (stripped, exponent.saturating_add(zeros))
}

/// Remove trailing decimal zeros, returning how many were removed
fn strip_trailing_zeros(magnitude: BigInt) -> (BigInt, i64) {
    const CHUNK: u64 = 10_000_000_000_000_000_000;
    if magnitude.is_zero() {
        return (magnitude, 0);
    }
    let mut mag = magnitude.into_limb_store().into_parts().1;
    let mut zeros = 0;
    for (divisor, count) in [(CHUNK, 19), (10, 1)] {
        loop {
            let (q, r) = limbs::divrem_small(&mag, divisor);
            if r != 0 {
                break;
            }
            mag = q;
            zeros += count;
        }
    }
    (BigInt::from_magnitude(false, mag), zeros)
}

impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        Some(self.cmp_ordered(other))
    }
}

impl Hash for BigFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.repr {
            Repr::Nan => 0u8.hash(state),
            Repr::Infinite { negative } => {
                1u8.hash(state);
                negative.hash(state);
            }
            Repr::Zero { .. } => 2u8.hash(state),
            Repr::Finite { mantissa, exponent } => {
                3u8.hash(state);
                mantissa.hash(state);
                exponent.hash(state);
            }
        }
    }
}
