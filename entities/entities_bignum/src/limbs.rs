//! Limb Store
//!
//! Magnitude storage for arbitrary precision integers: a little-endian vector
//! of 64-bit limbs plus a tri-state sign.
//!
//! The free functions in this module are the slice kernels the integer and
//! decimal engines are built on. They all take and return *trimmed* limb
//! vectors (no most-significant zero limbs, empty for zero).

use std::cmp::Ordering;

/// One word of a magnitude.
pub type Limb = u64;

type DoubleLimb = u128;

/// Width of a [`Limb`] in bits
pub const LIMB_BITS: u32 = Limb::BITS;

/// Sign of a number, with zero as its own state
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Sign {
    Negative,
    #[default]
    Zero,
    Positive,
}

impl Sign {
    /// -1, 0 or 1
    pub fn as_i32(self) -> i32 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }

    /// Opposite sign (zero stays zero)
    pub fn negate(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }

    /// Sign of a product
    pub fn product(self, other: Self) -> Self {
        match (self, other) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (a, b) if a == b => Sign::Positive,
            _ => Sign::Negative,
        }
    }
}

/// Variable-length magnitude plus sign.
///
/// The store is always normalized: no most-significant zero limbs, and the
/// sign is [`Sign::Zero`] exactly when there are no limbs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct LimbStore {
    limbs: Vec<Limb>,
    sign: Sign,
}

impl LimbStore {
    /// The value zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a sign flag and little-endian limbs.
    ///
    /// The result is normalized; `negative` is ignored for a zero magnitude.
    pub fn from_parts(negative: bool, limbs: Vec<Limb>) -> Self {
        let mut store = Self {
            limbs,
            sign: if negative { Sign::Negative } else { Sign::Positive },
        };
        store.normalize();
        store
    }

    /// Build a store from a sign flag and a 128-bit magnitude
    pub fn from_u128(negative: bool, magnitude: u128) -> Self {
        Self::from_parts(negative, vec![magnitude as Limb, (magnitude >> LIMB_BITS) as Limb])
    }

    /// Strip most-significant zero limbs and fix up the sign
    pub fn normalize(&mut self) {
        trim(&mut self.limbs);
        if self.limbs.is_empty() {
            self.sign = Sign::Zero;
        } else if self.sign == Sign::Zero {
            self.sign = Sign::Positive;
        }
    }

    /// Compare magnitudes, ignoring sign
    pub fn compare_magnitude(&self, other: &Self) -> Ordering {
        cmp(&self.limbs, &other.limbs)
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Little-endian limbs of the magnitude
    pub fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Negative
    }

    pub fn into_parts(self) -> (Sign, Vec<Limb>) {
        (self.sign, self.limbs)
    }

    /// Mutable access to the magnitude; the closure's result is normalized
    /// before the store can be observed again.
    pub(crate) fn update_magnitude(&mut self, f: impl FnOnce(&mut Vec<Limb>)) {
        f(&mut self.limbs);
        self.normalize();
    }
}

/// Remove most-significant zero limbs
pub(crate) fn trim(limbs: &mut Vec<Limb>) {
    while limbs.last() == Some(&0) {
        limbs.pop();
    }
}

/// Length-first, then most-significant-limb-first comparison
pub(crate) fn cmp(a: &[Limb], b: &[Limb]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

pub(crate) fn add(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(long.len() + 1);
    let mut carry = false;
    for (i, &x) in long.iter().enumerate() {
        let y = short.get(i).copied().unwrap_or(0);
        let (s1, c1) = x.overflowing_add(y);
        let (s2, c2) = s1.overflowing_add(Limb::from(carry));
        out.push(s2);
        carry = c1 || c2;
    }
    if carry {
        out.push(1);
    }
    out
}

/// `a - b`, requires `a >= b`
pub(crate) fn sub(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    debug_assert!(cmp(a, b) != Ordering::Less);
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = false;
    for (i, &x) in a.iter().enumerate() {
        let y = b.get(i).copied().unwrap_or(0);
        let (d1, b1) = x.overflowing_sub(y);
        let (d2, b2) = d1.overflowing_sub(Limb::from(borrow));
        out.push(d2);
        borrow = b1 || b2;
    }
    trim(&mut out);
    out
}

/// Schoolbook multiplication
pub(crate) fn mul(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry: DoubleLimb = 0;
        for (j, &y) in b.iter().enumerate() {
            let t = DoubleLimb::from(x) * DoubleLimb::from(y) + DoubleLimb::from(out[i + j]) + carry;
            out[i + j] = t as Limb;
            carry = t >> LIMB_BITS;
        }
        out[i + b.len()] = carry as Limb;
    }
    trim(&mut out);
    out
}

/// `value = value * factor + addend`, in place
pub(crate) fn mul_small_add(value: &mut Vec<Limb>, factor: Limb, addend: Limb) {
    let mut carry = DoubleLimb::from(addend);
    for limb in value.iter_mut() {
        let t = DoubleLimb::from(*limb) * DoubleLimb::from(factor) + carry;
        *limb = t as Limb;
        carry = t >> LIMB_BITS;
    }
    if carry != 0 {
        value.push(carry as Limb);
    }
    trim(value);
}

/// Division by a single non-zero limb
pub(crate) fn divrem_small(a: &[Limb], divisor: Limb) -> (Vec<Limb>, Limb) {
    debug_assert!(divisor != 0);
    let d = DoubleLimb::from(divisor);
    let mut quotient = vec![0; a.len()];
    let mut rem: DoubleLimb = 0;
    for i in (0..a.len()).rev() {
        let cur = (rem << LIMB_BITS) | DoubleLimb::from(a[i]);
        quotient[i] = (cur / d) as Limb;
        rem = cur % d;
    }
    trim(&mut quotient);
    (quotient, rem as Limb)
}

/// Long division (Knuth, TAOCP vol. 2, 4.3.1, Algorithm D).
///
/// `divisor` must be non-zero. Returns `(quotient, remainder)`.
pub(crate) fn divrem(dividend: &[Limb], divisor: &[Limb]) -> (Vec<Limb>, Vec<Limb>) {
    debug_assert!(!divisor.is_empty());
    if cmp(dividend, divisor) == Ordering::Less {
        return (Vec::new(), dividend.to_vec());
    }
    if divisor.len() == 1 {
        let (q, r) = divrem_small(dividend, divisor[0]);
        let mut rem = vec![r];
        trim(&mut rem);
        return (q, rem);
    }

    // D1: normalize so the divisor's top limb has its high bit set
    let shift = divisor[divisor.len() - 1].leading_zeros();
    let v = shl_within_limb(divisor, shift, false);
    let mut u = shl_within_limb(dividend, shift, true);

    let n = v.len();
    let m = u.len() - n;
    let top = DoubleLimb::from(v[n - 1]);
    let second = DoubleLimb::from(v[n - 2]);
    let mut quotient = vec![0; m];

    for j in (0..m).rev() {
        // D3: estimate the quotient digit
        let numerator = (DoubleLimb::from(u[j + n]) << LIMB_BITS) | DoubleLimb::from(u[j + n - 1]);
        let mut qhat = numerator / top;
        let mut rhat = numerator % top;
        while qhat > DoubleLimb::from(Limb::MAX)
            || qhat * second > ((rhat << LIMB_BITS) | DoubleLimb::from(u[j + n - 2]))
        {
            qhat -= 1;
            rhat += top;
            if rhat > DoubleLimb::from(Limb::MAX) {
                break;
            }
        }

        // D4: multiply and subtract
        let mut carry: DoubleLimb = 0;
        let mut borrow = false;
        for i in 0..n {
            let p = qhat * DoubleLimb::from(v[i]) + carry;
            carry = p >> LIMB_BITS;
            let (d1, b1) = u[i + j].overflowing_sub(p as Limb);
            let (d2, b2) = d1.overflowing_sub(Limb::from(borrow));
            u[i + j] = d2;
            borrow = b1 || b2;
        }
        let (d1, b1) = u[j + n].overflowing_sub(carry as Limb);
        let (d2, b2) = d1.overflowing_sub(Limb::from(borrow));
        u[j + n] = d2;

        // D6: add back when the estimate was one too large
        if b1 || b2 {
            qhat -= 1;
            let mut carry = false;
            for i in 0..n {
                let (s1, c1) = u[i + j].overflowing_add(v[i]);
                let (s2, c2) = s1.overflowing_add(Limb::from(carry));
                u[i + j] = s2;
                carry = c1 || c2;
            }
            u[j + n] = u[j + n].wrapping_add(Limb::from(carry));
        }

        quotient[j] = qhat as Limb;
    }

    // D8: unnormalize the remainder
    u.truncate(n);
    let rem = shr_bits(&u, u64::from(shift));
    trim(&mut quotient);
    (quotient, rem)
}

/// Shift left by fewer than `LIMB_BITS` bits, optionally always appending
/// the overflow limb (Algorithm D needs the extra dividend limb even when it
/// is zero).
fn shl_within_limb(a: &[Limb], shift: u32, keep_overflow: bool) -> Vec<Limb> {
    let mut out = Vec::with_capacity(a.len() + 1);
    if shift == 0 {
        out.extend_from_slice(a);
        if keep_overflow {
            out.push(0);
        }
        return out;
    }
    let mut carry = 0;
    for &x in a {
        out.push((x << shift) | carry);
        carry = x >> (LIMB_BITS - shift);
    }
    if keep_overflow || carry != 0 {
        out.push(carry);
    }
    out
}

pub(crate) fn shl_bits(a: &[Limb], n: u64) -> Vec<Limb> {
    if a.is_empty() {
        return Vec::new();
    }
    let whole = (n / u64::from(LIMB_BITS)) as usize;
    let bits = (n % u64::from(LIMB_BITS)) as u32;
    let mut out = vec![0; whole];
    out.extend(shl_within_limb(a, bits, false));
    out
}

pub(crate) fn shr_bits(a: &[Limb], n: u64) -> Vec<Limb> {
    let whole = n / u64::from(LIMB_BITS);
    if whole >= a.len() as u64 {
        return Vec::new();
    }
    let src = &a[whole as usize..];
    let bits = (n % u64::from(LIMB_BITS)) as u32;
    let mut out: Vec<Limb> = if bits == 0 {
        src.to_vec()
    } else {
        (0..src.len())
            .map(|i| {
                let hi = src.get(i + 1).copied().unwrap_or(0);
                (src[i] >> bits) | (hi << (LIMB_BITS - bits))
            })
            .collect()
    };
    trim(&mut out);
    out
}

/// Number of significant bits
pub(crate) fn bit_len(a: &[Limb]) -> u64 {
    match a.last() {
        None => 0,
        Some(&top) => {
            (a.len() as u64 - 1) * u64::from(LIMB_BITS) + u64::from(LIMB_BITS - top.leading_zeros())
        }
    }
}

/// Index of the lowest set bit, `None` for zero
pub(crate) fn trailing_zeros(a: &[Limb]) -> Option<u64> {
    a.iter()
        .position(|&limb| limb != 0)
        .map(|i| i as u64 * u64::from(LIMB_BITS) + u64::from(a[i].trailing_zeros()))
}

pub(crate) fn bit_test(a: &[Limb], index: u64) -> bool {
    let limb = index / u64::from(LIMB_BITS);
    if limb >= a.len() as u64 {
        return false;
    }
    (a[limb as usize] >> (index % u64::from(LIMB_BITS))) & 1 == 1
}

/// Whether any bit strictly below `index` is set
pub(crate) fn low_bits_nonzero(a: &[Limb], index: u64) -> bool {
    trailing_zeros(a).is_some_and(|tz| tz < index)
}

/// The low 128 bits of a magnitude
pub(crate) fn low_u128(a: &[Limb]) -> u128 {
    let lo = a.first().copied().unwrap_or(0);
    let hi = a.get(1).copied().unwrap_or(0);
    (u128::from(hi) << LIMB_BITS) | u128::from(lo)
}
