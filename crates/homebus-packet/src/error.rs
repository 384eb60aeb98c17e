//! Error types for homebus-packet.

use thiserror::Error;

/// Errors that can occur while decoding or encoding frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    /// Fewer bytes available than a field declares needing.
    #[error("truncated input: need {needed} more byte(s), have {available}")]
    Truncated {
        /// Bytes the current field still requires.
        needed: usize,
        /// Bytes actually remaining.
        available: usize,
    },

    /// A declared length does not match the actual byte count.
    #[error("length mismatch: declared {declared} byte(s), actual {actual}")]
    LengthMismatch {
        /// Length the input declares.
        declared: usize,
        /// Length actually present.
        actual: usize,
    },

    /// Computed checksum disagrees with the trailing checksum byte.
    #[error("checksum mismatch: computed 0x{computed:02X}, frame carries 0x{carried:02X}")]
    ChecksumMismatch {
        /// Checksum computed over the payload bytes.
        computed: u8,
        /// Checksum byte carried by the frame.
        carried: u8,
    },

    /// A bus address whose minimal varint encoding exceeds the 2-byte field.
    #[error("address 0x{0:X} does not fit the 2-byte address field")]
    AddressOverflow(u64),

    /// Malformed field encoding (invalid UTF-8 in a name, oversized varint).
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Encoded section too large for its length field.
    #[error("payload too large: {size} bytes (max {max})")]
    TooLarge {
        /// Actual size.
        size: usize,
        /// Maximum the length field can express.
        max: usize,
    },
}

impl PacketError {
    /// Create a truncated-input error.
    pub fn truncated(needed: usize, available: usize) -> Self {
        PacketError::Truncated { needed, available }
    }

    /// Create an unsupported-encoding error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        PacketError::UnsupportedEncoding(message.into())
    }
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PacketError>;
