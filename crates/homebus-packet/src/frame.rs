//! The outermost wire unit.
//!
//! ## Frame Format
//!
//! | Field    | Size (bytes) | Description                          |
//! |----------|--------------|--------------------------------------|
//! | length   | 1            | Byte count of the payload section.   |
//! | payload  | `length`     | See [`Payload`].                     |
//! | checksum | 1            | CRC-8 over the payload bytes.        |

use serde::Serialize;

use crate::checksum;
use crate::error::{PacketError, Result};
use crate::payload::Payload;

/// Smallest decodable frame: length byte, 7-byte payload header, CRC byte.
pub const MIN_FRAME_SIZE: usize = 9;

/// Largest frame the one-byte length field can express.
pub const MAX_FRAME_SIZE: usize = u8::MAX as usize + 2;

/// A complete HomeBus frame.
///
/// `length` and `checksum` record what was observed on the wire (or what
/// [`Frame::from_payload`] computed); [`Frame::encode`] always recomputes
/// both from the freshly serialized payload, so a decode-mutate-encode
/// cycle stays internally consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Byte count of the payload section.
    pub length: u8,
    /// The addressed payload.
    pub payload: Payload,
    /// CRC-8 over the payload section.
    pub checksum: u8,
}

impl Frame {
    /// Build a frame around a payload, computing length and checksum.
    pub fn from_payload(payload: Payload) -> Result<Frame> {
        let bytes = payload.encode()?;
        let length = checked_payload_len(bytes.len())?;
        Ok(Frame {
            length,
            payload,
            checksum: checksum::compute(&bytes),
        })
    }

    /// Decode a frame from raw bytes.
    pub fn decode(data: &[u8]) -> Result<Frame> {
        if data.len() < MIN_FRAME_SIZE {
            return Err(PacketError::truncated(MIN_FRAME_SIZE, data.len()));
        }

        let length = data[0];
        let carried = data[data.len() - 1];
        let payload_bytes = &data[1..data.len() - 1];

        if usize::from(length) != payload_bytes.len() {
            return Err(PacketError::LengthMismatch {
                declared: usize::from(length),
                actual: payload_bytes.len(),
            });
        }

        let computed = checksum::compute(payload_bytes);
        if computed != carried {
            return Err(PacketError::ChecksumMismatch { computed, carried });
        }

        Ok(Frame {
            length,
            payload: Payload::decode(payload_bytes)?,
            checksum: carried,
        })
    }

    /// Encode the frame to raw bytes.
    ///
    /// The length and checksum are recomputed from the serialized payload,
    /// never copied from `self`.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let payload_bytes = self.payload.encode()?;
        let length = checked_payload_len(payload_bytes.len())?;

        let mut buf = Vec::with_capacity(payload_bytes.len() + 2);
        buf.push(length);
        buf.extend_from_slice(&payload_bytes);
        buf.push(checksum::compute(&payload_bytes));
        Ok(buf)
    }
}

fn checked_payload_len(len: usize) -> Result<u8> {
    u8::try_from(len).map_err(|_| PacketError::TooLarge {
        size: len,
        max: u8::MAX as usize,
    })
}
