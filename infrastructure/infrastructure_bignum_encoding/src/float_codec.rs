//! Big Float Codec Module
//!
//! ## Image
//!
//! - 1 byte tag ([`BIG_FLOAT_TAG`])
//! - 1 byte class: `0` finite, `1` zero, `2` infinite, `3` NaN
//! - 1 byte sign: `0` or `1`; always `0` for NaN
//! - 8 bytes exponent (little-endian `i64`), `0` unless finite
//! - for finite values, the integer image of the mantissa
//!
//! Finite values must be canonical: decoding rebuilds the value and rejects
//! mantissas that are not already rounded and stripped of trailing zeros.

use entities_bignum::BigFloat;

use crate::common::{encode_big_integer, read_big_integer, DecodeError, Reader, BIG_FLOAT_TAG};

const CLASS_FINITE: u8 = 0;
const CLASS_ZERO: u8 = 1;
const CLASS_INFINITE: u8 = 2;
const CLASS_NAN: u8 = 3;

/// Big float codec
pub struct BigFloatCodec;

impl BigFloatCodec {
    /// Append the image of `value` to `buf`, returning the bytes written
    pub fn encode_into(buf: &mut Vec<u8>, value: &BigFloat) -> usize {
        let start = buf.len();
        let class = if value.is_nan() {
            CLASS_NAN
        } else if value.is_inf() {
            CLASS_INFINITE
        } else if value.is_zero() {
            CLASS_ZERO
        } else {
            CLASS_FINITE
        };
        buf.push(BIG_FLOAT_TAG);
        buf.push(class);
        buf.push(u8::from(value.is_sign_negative()));
        match value.parts() {
            Some((mantissa, exponent)) => {
                buf.extend_from_slice(&exponent.to_le_bytes());
                encode_big_integer(buf, mantissa);
            }
            None => buf.extend_from_slice(&0i64.to_le_bytes()),
        }
        buf.len() - start
    }

    pub fn encode(value: &BigFloat) -> Vec<u8> {
        let mut buf = Vec::new();
        Self::encode_into(&mut buf, value);
        buf
    }

    /// Decode a float from a buffer holding exactly one image
    pub fn decode(data: &[u8]) -> Result<BigFloat, DecodeError> {
        let mut reader = Reader::new(data);
        let decoded = read_float(&mut reader).and_then(|value| {
            reader.finish()?;
            Ok(value)
        });
        decoded.inspect_err(|err| {
            tracing::debug!(len = data.len(), error = %err, "rejected big float image");
        })
    }
}

fn read_float(reader: &mut Reader<'_>) -> Result<BigFloat, DecodeError> {
    let tag = reader.byte()?;
    if tag != BIG_FLOAT_TAG {
        return Err(DecodeError::InvalidTag(tag));
    }
    let class = reader.byte()?;
    let negative = match reader.byte()? {
        0 => false,
        1 => true,
        other => return Err(DecodeError::InvalidSign(other)),
    };
    let exponent = reader.u64_le()? as i64;
    if class != CLASS_FINITE && exponent != 0 {
        return Err(DecodeError::NotNormalized);
    }

    match class {
        CLASS_NAN if negative => Err(DecodeError::InvalidSign(1)),
        CLASS_NAN => Ok(BigFloat::nan()),
        CLASS_INFINITE if negative => Ok(BigFloat::neg_infinity()),
        CLASS_INFINITE => Ok(BigFloat::infinity()),
        CLASS_ZERO if negative => Ok(BigFloat::neg_zero()),
        CLASS_ZERO => Ok(BigFloat::zero()),
        CLASS_FINITE => {
            let mantissa = read_big_integer(reader)?;
            if mantissa.is_zero() || mantissa.is_negative() != negative {
                return Err(DecodeError::NotNormalized);
            }
            let value = BigFloat::from_parts(mantissa.clone(), exponent);
            if value.parts() != Some((&mantissa, exponent)) {
                return Err(DecodeError::NotNormalized);
            }
            Ok(value)
        }
        other => Err(DecodeError::InvalidClass(other)),
    }
}

/// Image used for hashing: both zeros share the `+0` image
pub(crate) fn hash_image(value: &BigFloat) -> Vec<u8> {
    if value.is_zero() {
        BigFloatCodec::encode(&BigFloat::zero())
    } else {
        BigFloatCodec::encode(value)
    }
}
