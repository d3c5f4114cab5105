//! Big Integer Operations
//!
//! Provides arbitrary precision signed integers on top of the limb store.
//!
//! Arithmetic uses the schoolbook algorithms from [`crate::limbs`]: limb-wise
//! addition and subtraction with carry/borrow, O(n·m) multiplication and
//! Knuth's Algorithm D for division. Division truncates toward zero and the
//! remainder takes the sign of the dividend. Bitwise operations behave as if
//! the value were stored in infinitely sign-extended two's complement.

use std::cmp::Ordering;

use crate::error::DivisionByZero;
use crate::limbs::{self, Limb, LimbStore, Sign, LIMB_BITS};

/// Largest power of ten that fits in a limb, and its exponent
const DECIMAL_CHUNK: Limb = 10_000_000_000_000_000_000;
const DECIMAL_CHUNK_DIGITS: usize = 19;

/// Largest bit length produced by [`BigInt::shifted_left`] and [`BigInt::pow`].
///
/// A shift or power whose result would be longer saturates to zero.
pub const MAX_BITS: u64 = 1 << 24;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Arbitrary precision signed integer.
///
/// A plain value type: cloning copies the limbs, nothing is shared.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct BigInt {
    store: LimbStore,
}

impl BigInt {
    /// The value 0
    pub fn zero() -> Self {
        Self::default()
    }

    /// The value 1
    pub fn one() -> Self {
        Self::from_magnitude(false, vec![1])
    }

    pub(crate) fn from_magnitude(negative: bool, limbs: Vec<Limb>) -> Self {
        Self {
            store: LimbStore::from_parts(negative, limbs),
        }
    }

    /// Wrap an existing limb store
    pub fn from_limb_store(store: LimbStore) -> Self {
        Self { store }
    }

    /// Borrow the underlying limb store
    pub fn as_limb_store(&self) -> &LimbStore {
        &self.store
    }

    pub fn into_limb_store(self) -> LimbStore {
        self.store
    }

    pub(crate) fn magnitude(&self) -> &[Limb] {
        self.store.limbs()
    }

    /// -1, 0 or 1
    pub fn sign(&self) -> i32 {
        self.store.sign().as_i32()
    }

    pub fn is_zero(&self) -> bool {
        self.store.is_zero()
    }

    /// True for values greater than zero
    pub fn is_positive(&self) -> bool {
        self.store.sign() == Sign::Positive
    }

    pub fn is_negative(&self) -> bool {
        self.store.is_negative()
    }

    pub fn is_odd(&self) -> bool {
        limbs::bit_test(self.magnitude(), 0)
    }

    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self::from_magnitude(false, self.magnitude().to_vec())
    }

    /// Signed sum of two (sign, magnitude) pairs
    fn combine(a_neg: bool, a: &[Limb], b_neg: bool, b: &[Limb]) -> Self {
        if a.is_empty() {
            return Self::from_magnitude(b_neg, b.to_vec());
        }
        if b.is_empty() {
            return Self::from_magnitude(a_neg, a.to_vec());
        }
        if a_neg == b_neg {
            return Self::from_magnitude(a_neg, limbs::add(a, b));
        }
        match limbs::cmp(a, b) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => Self::from_magnitude(a_neg, limbs::sub(a, b)),
            Ordering::Less => Self::from_magnitude(b_neg, limbs::sub(b, a)),
        }
    }

    /// Add two big numbers: x + y
    pub fn plus(&self, other: &Self) -> Self {
        Self::combine(self.is_negative(), self.magnitude(), other.is_negative(), other.magnitude())
    }

    /// Subtract two big numbers: x - y
    pub fn minus(&self, other: &Self) -> Self {
        Self::combine(self.is_negative(), self.magnitude(), !other.is_negative(), other.magnitude())
    }

    /// Multiply two big numbers: x * y
    pub fn times(&self, other: &Self) -> Self {
        let negative = self.is_negative() != other.is_negative();
        Self::from_magnitude(negative, limbs::mul(self.magnitude(), other.magnitude()))
    }

    /// Multiply and add: x * y + z
    pub fn mul_add(&self, y: &Self, z: &Self) -> Self {
        self.times(y).plus(z)
    }

    /// Add a small unsigned integer: x + y
    pub fn plus_small(&self, y: u64) -> Self {
        Self::combine(self.is_negative(), self.magnitude(), false, &[y])
    }

    /// Truncating division with remainder.
    ///
    /// Returns `(quotient, remainder)` with `self == divisor * quotient +
    /// remainder` and the remainder carrying the sign of `self`.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), DivisionByZero> {
        if divisor.is_zero() {
            tracing::debug!(dividend = %self, "big integer division by zero");
            return Err(DivisionByZero);
        }
        let (q, r) = limbs::divrem(self.magnitude(), divisor.magnitude());
        let q_neg = self.is_negative() != divisor.is_negative();
        Ok((
            Self::from_magnitude(q_neg, q),
            Self::from_magnitude(self.is_negative(), r),
        ))
    }

    /// Magnitude division for divisors known to be non-zero
    pub(crate) fn div_rem_magnitude(&self, divisor: &Self) -> (Self, Self) {
        debug_assert!(!divisor.is_zero());
        let (q, r) = limbs::divrem(self.magnitude(), divisor.magnitude());
        (Self::from_magnitude(false, q), Self::from_magnitude(false, r))
    }

    /// Truncating division: x / y
    pub fn try_div(&self, divisor: &Self) -> Result<Self, DivisionByZero> {
        self.div_rem(divisor).map(|(q, _)| q)
    }

    /// Remainder of truncating division: x % y
    pub fn try_rem(&self, divisor: &Self) -> Result<Self, DivisionByZero> {
        self.div_rem(divisor).map(|(_, r)| r)
    }

    /// `self` raised to `exponent` by repeated squaring; `0^0 == 1`.
    ///
    /// Results longer than [`MAX_BITS`] bits saturate to zero.
    pub fn pow(&self, exponent: u32) -> Self {
        let exponent = u64::from(exponent);
        // |x|^n has at least (bits - 1) * n + 1 bits
        let lower = self.bits().saturating_sub(1).saturating_mul(exponent).saturating_add(1);
        if lower > MAX_BITS {
            tracing::trace!(bits = self.bits(), exponent, "power exceeds bit cap");
            return Self::zero();
        }
        let result = self.pow_u64(exponent);
        if result.bits() > MAX_BITS {
            tracing::trace!(bits = self.bits(), exponent, "power exceeds bit cap");
            return Self::zero();
        }
        result
    }

    pub(crate) fn pow_u64(&self, mut exponent: u64) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result.times(&base);
            }
            exponent >>= 1;
            if exponent > 0 {
                base = base.times(&base);
            }
        }
        result
    }

    /// Greatest common divisor, always non-negative; `gcd(0, 0) == 0`
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.magnitude().to_vec();
        let mut b = other.magnitude().to_vec();
        while !b.is_empty() {
            let (_, r) = limbs::divrem(&a, &b);
            a = b;
            b = r;
        }
        Self::from_magnitude(false, a)
    }

    /// Least common multiple, always non-negative; zero if either side is zero
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let g = self.gcd(other);
        let (q, _) = limbs::divrem(self.magnitude(), g.magnitude());
        Self::from_magnitude(false, limbs::mul(&q, other.magnitude()))
    }

    /// Bit length of the magnitude
    pub fn bits(&self) -> u64 {
        limbs::bit_len(self.magnitude())
    }

    /// Index of the lowest set bit; `None` when the value is 0 or less
    pub fn lsb(&self) -> Option<u64> {
        if !self.is_positive() {
            return None;
        }
        limbs::trailing_zeros(self.magnitude())
    }

    /// Index of the highest set bit; `None` when the value is 0 or less
    pub fn msb(&self) -> Option<u64> {
        if !self.is_positive() {
            return None;
        }
        Some(self.bits() - 1)
    }

    /// Test bit `index` of the magnitude
    pub fn bit_test(&self, index: u64) -> bool {
        limbs::bit_test(self.magnitude(), index)
    }

    /// Set bit `index` of the magnitude, keeping the sign
    pub fn bit_set(&mut self, index: u64) {
        self.store.update_magnitude(|mag| {
            let (limb, mask) = Self::bit_position(index);
            if mag.len() <= limb {
                mag.resize(limb + 1, 0);
            }
            mag[limb] |= mask;
        });
    }

    /// Clear bit `index` of the magnitude, keeping the sign
    pub fn bit_unset(&mut self, index: u64) {
        self.store.update_magnitude(|mag| {
            let (limb, mask) = Self::bit_position(index);
            if let Some(word) = mag.get_mut(limb) {
                *word &= !mask;
            }
        });
    }

    /// Flip bit `index` of the magnitude, keeping the sign
    pub fn bit_flip(&mut self, index: u64) {
        if self.bit_test(index) {
            self.bit_unset(index);
        } else {
            self.bit_set(index);
        }
    }

    fn bit_position(index: u64) -> (usize, Limb) {
        let limb = (index / u64::from(LIMB_BITS)) as usize;
        (limb, 1 << (index % u64::from(LIMB_BITS)))
    }

    /// Limbs of the value in `len`-limb two's complement
    fn twos_complement(&self, len: usize) -> Vec<Limb> {
        let mut out = self.magnitude().to_vec();
        out.resize(len, 0);
        if self.is_negative() {
            negate_twos(&mut out);
        }
        out
    }

    fn from_twos_complement(mut limbs: Vec<Limb>) -> Self {
        let negative = limbs.last().is_some_and(|&top| top >> (LIMB_BITS - 1) == 1);
        if negative {
            negate_twos(&mut limbs);
        }
        Self::from_magnitude(negative, limbs)
    }

    fn bitwise(&self, other: &Self, op: impl Fn(Limb, Limb) -> Limb) -> Self {
        let len = self.magnitude().len().max(other.magnitude().len()) + 1;
        let a = self.twos_complement(len);
        let b = other.twos_complement(len);
        Self::from_twos_complement(a.iter().zip(&b).map(|(&x, &y)| op(x, y)).collect())
    }

    /// Bitwise AND: x & y
    pub fn bit_and(&self, other: &Self) -> Self {
        self.bitwise(other, |x, y| x & y)
    }

    /// Bitwise OR: x | y
    pub fn bit_or(&self, other: &Self) -> Self {
        self.bitwise(other, |x, y| x | y)
    }

    /// Bitwise XOR: x ^ y
    pub fn bit_xor(&self, other: &Self) -> Self {
        self.bitwise(other, |x, y| x ^ y)
    }

    /// Bitwise NOT: !x == -x - 1
    pub fn bit_not(&self) -> Self {
        Self::combine(!self.is_negative(), self.magnitude(), true, &[1])
    }

    /// x * 2^shift, or zero when the result would exceed [`MAX_BITS`] bits
    pub fn shifted_left(&self, shift: u64) -> Self {
        if self.bits().saturating_add(shift) > MAX_BITS {
            tracing::trace!(bits = self.bits(), shift, "left shift exceeds bit cap");
            return Self::zero();
        }
        Self::from_magnitude(self.is_negative(), limbs::shl_bits(self.magnitude(), shift))
    }

    /// floor(x / 2^shift); negative values shift toward -1
    pub fn shifted_right(&self, shift: u64) -> Self {
        let mag = self.magnitude();
        let q = limbs::shr_bits(mag, shift);
        if self.is_negative() && limbs::low_bits_nonzero(mag, shift) {
            Self::combine(true, &q, true, &[1])
        } else {
            Self::from_magnitude(self.is_negative(), q)
        }
    }

    /// Compare two big numbers (signed comparison)
    ///
    /// Returns:
    /// - -1 if self < other
    /// - 0 if self == other
    /// - 1 if self > other
    pub fn comp(&self, other: &Self) -> i32 {
        match self.cmp(other) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Unsigned comparison of two big numbers
    ///
    /// Compares absolute values, ignoring sign
    pub fn ucomp(&self, other: &Self) -> i32 {
        match self.store.compare_magnitude(&other.store) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Number of decimal digits in the magnitude (1 for zero)
    pub(crate) fn decimal_digits(&self) -> u64 {
        let bits = self.bits();
        if bits <= 1 {
            return 1;
        }
        // floor((bits - 1) * log10(2)) + 1 is exact or one short
        let estimate = ((bits - 1) as f64 * std::f64::consts::LOG10_2) as u64 + 1;
        let mag = self.magnitude();
        let lower = pow10(estimate - 1);
        if limbs::cmp(mag, lower.magnitude()) == Ordering::Less {
            return estimate - 1;
        }
        let upper = lower.times(&Self::from(10u8));
        if limbs::cmp(mag, upper.magnitude()) == Ordering::Less {
            estimate
        } else {
            estimate + 1
        }
    }

    /// Convert to string representation in given base
    ///
    /// Base must be between 2 and 36; digits above 9 are lowercase.
    ///
    /// # Panics
    ///
    /// Panics if `base` is outside 2..=36.
    pub fn to_string_base(&self, base: u32) -> String {
        assert!((2..=36).contains(&base), "Base must be between 2 and 36");
        let digits = magnitude_to_radix(self.magnitude(), base);
        if self.is_negative() {
            format!("-{digits}")
        } else {
            digits
        }
    }
}

/// 10^n
pub(crate) fn pow10(n: u64) -> BigInt {
    BigInt::from(10u8).pow_u64(n)
}

/// In-place two's complement negation
fn negate_twos(limbs: &mut [Limb]) {
    let mut carry = true;
    for limb in limbs.iter_mut() {
        let (v, c) = (!*limb).overflowing_add(Limb::from(carry));
        *limb = v;
        carry = c;
    }
}

/// Digits of a magnitude in `radix`, most significant first
pub(crate) fn magnitude_to_radix(mag: &[Limb], radix: u32) -> String {
    if mag.is_empty() {
        return "0".to_string();
    }
    let (chunk, chunk_digits) = if radix == 10 {
        (DECIMAL_CHUNK, DECIMAL_CHUNK_DIGITS)
    } else {
        radix_chunk(radix)
    };

    let mut chunks = Vec::new();
    let mut rest = mag.to_vec();
    while !rest.is_empty() {
        let (q, r) = limbs::divrem_small(&rest, chunk);
        chunks.push(r);
        rest = q;
    }

    let mut out = String::with_capacity(chunks.len() * chunk_digits);
    for (i, &c) in chunks.iter().rev().enumerate() {
        let text = limb_to_radix(c, radix);
        if i > 0 {
            out.extend(std::iter::repeat('0').take(chunk_digits - text.len()));
        }
        out.push_str(&text);
    }
    out
}

/// Largest power of `radix` that fits in a limb, and its exponent
pub(crate) fn radix_chunk(radix: u32) -> (Limb, usize) {
    let radix = Limb::from(radix);
    let mut chunk = radix;
    let mut digits = 1;
    while let Some(next) = chunk.checked_mul(radix) {
        chunk = next;
        digits += 1;
    }
    (chunk, digits)
}

fn limb_to_radix(mut value: Limb, radix: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % Limb::from(radix)) as usize]);
        value /= Limb::from(radix);
    }
    digits.iter().rev().map(|&d| char::from(d)).collect()
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.store.sign().cmp(&other.store.sign()) {
            Ordering::Equal => {}
            ord => return ord,
        }
        let mag = self.store.compare_magnitude(&other.store);
        if self.is_negative() {
            mag.reverse()
        } else {
            mag
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
