//! Variable-length integer encoding (ULEB128)
//!
//! Every numeric field wider than one byte on the bus uses ULEB128: 7 value
//! bits per byte, least-significant group first, high bit set on every byte
//! except the last.
//!
//! Two decode forms exist because the protocol uses varints two ways. The
//! fixed 2-byte address fields and the timestamp body arrive pre-sliced, so
//! [`decode_exact`] consumes the whole span and ignores continuation bits.
//! Trigger thresholds sit in the middle of a byte stream, so [`decode`]
//! walks the continuation bits to find where the value ends.

use crate::error::{PacketError, Result};

const VALUE_MASK: u8 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

/// Maximum bytes a u64 varint can occupy (10 groups of 7 bits).
pub const MAX_VARINT_SIZE: usize = 10;

/// Encode a value as a minimal ULEB128 byte sequence.
///
/// Always emits at least one byte; zero encodes as `[0x00]`.
pub fn encode(value: u64) -> Vec<u8> {
    let mut value = value;
    let mut buf = Vec::with_capacity(MAX_VARINT_SIZE);

    loop {
        let group = (value as u8) & VALUE_MASK;
        value >>= 7;
        if value == 0 {
            buf.push(group);
            return buf;
        }
        buf.push(group | CONTINUE_BIT);
    }
}

/// Decode a pre-sliced span as one varint, consuming every byte.
///
/// Continuation bits are masked off but never inspected: the caller already
/// knows the field width. An empty span decodes to 0.
pub fn decode_exact(bytes: &[u8]) -> u64 {
    let mut value = 0u64;
    for (i, &b) in bytes.iter().enumerate() {
        let shift = 7 * i;
        // Groups past bit 63 cannot land in a u64; skip them instead of
        // overflowing the shift.
        if shift < 64 {
            value |= u64::from(b & VALUE_MASK) << shift;
        }
    }
    value
}

/// Decode one varint from the front of a stream.
///
/// Returns `(value, bytes_consumed)`. Running out of input mid-value is
/// [`PacketError::Truncated`]; a value wider than 64 bits is
/// [`PacketError::UnsupportedEncoding`].
pub fn decode(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;
    let mut shift = 0;
    let mut pos = 0;

    loop {
        if pos >= bytes.len() {
            return Err(PacketError::truncated(1, 0));
        }
        if shift >= 64 {
            return Err(PacketError::unsupported("varint exceeds 64 bits"));
        }

        let b = bytes[pos];
        pos += 1;

        // The tenth group sits at bit 63 and may only carry that one bit;
        // anything above it cannot land in a u64.
        if shift == 63 && b & 0x7E != 0 {
            return Err(PacketError::unsupported("varint exceeds 64 bits"));
        }
        value |= u64::from(b & VALUE_MASK) << shift;

        if b & CONTINUE_BIT == 0 {
            return Ok((value, pos));
        }
        shift += 7;
    }
}
