//! Bignum Codec Module
//!
//! Encodes a [`BigInt`] as its canonical integer image (see [`crate::common`])
//! and decodes it back, rejecting anything that is not exactly one canonical
//! image.

use entities_bignum::BigInt;

use crate::common::{encode_big_integer, read_big_integer, DecodeError, Reader};

/// Bignum codec
pub struct BigIntCodec;

impl BigIntCodec {
    /// Encode an integer to its canonical image
    pub fn encode(value: &BigInt) -> Vec<u8> {
        let mut buf = Vec::with_capacity(10 + 8 * value.as_limb_store().limbs().len());
        encode_big_integer(&mut buf, value);
        buf
    }

    /// Decode an integer from a buffer holding exactly one image
    pub fn decode(data: &[u8]) -> Result<BigInt, DecodeError> {
        let mut reader = Reader::new(data);
        let decoded = read_big_integer(&mut reader).and_then(|value| {
            reader.finish()?;
            Ok(value)
        });
        decoded.inspect_err(|err| {
            tracing::debug!(len = data.len(), error = %err, "rejected big integer image");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_values() {
        for text in ["0", "1", "-1", "18446744073709551616", "-340282366920938463463374607431768211457"] {
            let value: BigInt = text.parse().unwrap();
            assert_eq!(BigIntCodec::decode(&BigIntCodec::encode(&value)), Ok(value));
        }
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut data = BigIntCodec::encode(&BigInt::from(9));
        data.push(0);
        assert_eq!(BigIntCodec::decode(&data), Err(DecodeError::TrailingBytes));
    }

    #[test]
    fn test_decode_with_empty_slice() {
        assert_eq!(BigIntCodec::decode(b""), Err(DecodeError::BufferTooShort));
    }

    #[test]
    fn test_decode_huge_limb_count() {
        let mut data = vec![crate::common::BIG_INT_TAG, 1];
        data.extend_from_slice(&u64::MAX.to_le_bytes());
        assert_eq!(BigIntCodec::decode(&data), Err(DecodeError::BufferTooShort));
    }

    #[test]
    fn test_decode_error_display() {
        assert_eq!(DecodeError::InvalidTag(0x6e).to_string(), "unexpected tag byte 0x6e");
        assert_eq!(DecodeError::TrailingBytes.to_string(), "trailing bytes after value");
    }
}
