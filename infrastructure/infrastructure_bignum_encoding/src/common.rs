//! Common Encoding/Decoding Utilities
//!
//! Shared helpers for the canonical byte images of big integers. Both codecs
//! build on these, and the hashing adapter feeds their output to a hash
//! function.
//!
//! ## Integer Image
//!
//! - 1 byte tag ([`BIG_INT_TAG`])
//! - 1 byte sign: `0` zero, `1` positive, `0xff` negative
//! - 8 bytes limb count (little-endian)
//! - limbs, 8 bytes each, least significant first, each little-endian
//!
//! The image is canonical: no most-significant zero limbs, and the sign byte
//! is `0` exactly when the limb count is zero.

use entities_bignum::{BigInt, LimbStore, Sign};
use thiserror::Error;

/// Tag byte of a big integer image
pub const BIG_INT_TAG: u8 = 0xb1;

/// Tag byte of a big float image
pub const BIG_FLOAT_TAG: u8 = 0xbf;

const LIMB_BYTES: usize = 8;

/// Decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("buffer too short")]
    BufferTooShort,
    #[error("unexpected tag byte {0:#04x}")]
    InvalidTag(u8),
    #[error("invalid sign byte {0:#04x}")]
    InvalidSign(u8),
    #[error("invalid class byte {0:#04x}")]
    InvalidClass(u8),
    #[error("value is not in canonical form")]
    NotNormalized,
    #[error("trailing bytes after value")]
    TrailingBytes,
}

/// Cursor over an encoded buffer
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    index: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, index: 0 }
    }

    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.index.checked_add(len).ok_or(DecodeError::BufferTooShort)?;
        let bytes = self.data.get(self.index..end).ok_or(DecodeError::BufferTooShort)?;
        self.index = end;
        Ok(bytes)
    }

    pub(crate) fn byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn u64_le(&mut self) -> Result<u64, DecodeError> {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(bytes))
    }

    pub(crate) fn position(&self) -> usize {
        self.index
    }

    pub(crate) fn finish(&self) -> Result<(), DecodeError> {
        if self.index == self.data.len() {
            Ok(())
        } else {
            Err(DecodeError::TrailingBytes)
        }
    }
}

/// Append the integer image of `value` to `buf`, returning the bytes written
pub fn encode_big_integer(buf: &mut Vec<u8>, value: &BigInt) -> usize {
    let start = buf.len();
    let store = value.as_limb_store();
    buf.push(BIG_INT_TAG);
    buf.push(match store.sign() {
        Sign::Zero => 0,
        Sign::Positive => 1,
        Sign::Negative => 0xff,
    });
    buf.extend_from_slice(&(store.limbs().len() as u64).to_le_bytes());
    for limb in store.limbs() {
        buf.extend_from_slice(&limb.to_le_bytes());
    }
    buf.len() - start
}

/// Read one integer image, validating tag, sign and normalization
pub(crate) fn read_big_integer(reader: &mut Reader<'_>) -> Result<BigInt, DecodeError> {
    let tag = reader.byte()?;
    if tag != BIG_INT_TAG {
        return Err(DecodeError::InvalidTag(tag));
    }
    let sign = match reader.byte()? {
        0 => Sign::Zero,
        1 => Sign::Positive,
        0xff => Sign::Negative,
        other => return Err(DecodeError::InvalidSign(other)),
    };
    let count = usize::try_from(reader.u64_le()?).map_err(|_| DecodeError::BufferTooShort)?;
    let byte_len = count.checked_mul(LIMB_BYTES).ok_or(DecodeError::BufferTooShort)?;
    let bytes = reader.take(byte_len)?;

    let limbs: Vec<u64> = bytes
        .chunks_exact(LIMB_BYTES)
        .map(|chunk| {
            let mut limb = [0u8; LIMB_BYTES];
            limb.copy_from_slice(chunk);
            u64::from_le_bytes(limb)
        })
        .collect();
    if limbs.last() == Some(&0) || (sign == Sign::Zero) != limbs.is_empty() {
        return Err(DecodeError::NotNormalized);
    }
    Ok(BigInt::from_limb_store(LimbStore::from_parts(sign == Sign::Negative, limbs)))
}

/// Decode one integer image from the front of `data`
///
/// # Returns
///
/// * `Ok((integer, bytes_consumed))` - Decoded integer and bytes consumed
/// * `Err(DecodeError)` - Malformed or non-canonical image
pub fn decode_big_integer(data: &[u8]) -> Result<(BigInt, usize), DecodeError> {
    let mut reader = Reader::new(data);
    let value = read_big_integer(&mut reader)?;
    Ok((value, reader.position()))
}

/// Extract the magnitude of an integer as little-endian bytes
///
/// No most-significant zero bytes are kept; zero yields `[0]`.
///
/// # Returns
///
/// * `(bytes, is_negative)` - Byte vector (little-endian) and sign flag
pub fn integer_to_bytes(value: &BigInt) -> (Vec<u8>, bool) {
    let mut bytes: Vec<u8> = value
        .as_limb_store()
        .limbs()
        .iter()
        .flat_map(|limb| limb.to_le_bytes())
        .collect();
    while bytes.len() > 1 && bytes.last() == Some(&0) {
        bytes.pop();
    }
    if bytes.is_empty() {
        bytes.push(0);
    }
    (bytes, value.is_negative())
}

/// Rebuild an integer from little-endian magnitude bytes and a sign flag
pub fn bytes_to_integer(bytes: &[u8], is_negative: bool) -> BigInt {
    let limbs = bytes
        .chunks(LIMB_BYTES)
        .map(|chunk| {
            let mut limb = [0u8; LIMB_BYTES];
            limb[..chunk.len()].copy_from_slice(chunk);
            u64::from_le_bytes(limb)
        })
        .collect();
    BigInt::from_limb_store(LimbStore::from_parts(is_negative, limbs))
}
