//! HomeBus device-bus frame codec
//!
//! This crate encodes and decodes frames of the HomeBus smart-home device
//! bus: a compact binary protocol where every frame is a length-prefixed,
//! CRC-8-terminated payload addressing two bus participants and carrying a
//! command body whose layout depends on the sender's device type and the
//! command code.
//!
//! # Frame Format
//!
//! ```text
//! +----------+--------------------------+----------+
//! | len (u8) | payload (len bytes)      | crc8     |
//! +----------+--------------------------+----------+
//!            | src(2) dst(2) serial(1)  |
//!            | dev_type(1) cmd(1) body  |
//!            +--------------------------+
//! ```
//!
//! Multi-byte numbers (bus addresses, timestamps, trigger thresholds) use
//! ULEB128 varints; the two address fields are varints squeezed into a
//! fixed 2-byte slot. The checksum is CRC-8 with polynomial 0x1D over the
//! payload section.
//!
//! # Example
//!
//! ```rust
//! use homebus_packet::{CommandBody, Frame};
//!
//! let raw = [
//!     0x0D, 0xB3, 0x06, 0xFF, 0x7F, 0x01, 0x06, 0x06,
//!     0x88, 0xD0, 0xAB, 0xFA, 0x93, 0x31, 0x8A,
//! ];
//!
//! let frame = Frame::decode(&raw)?;
//! assert_eq!(frame.payload.src, 819);
//! assert!(matches!(frame.payload.body, CommandBody::Timestamp { .. }));
//! assert_eq!(frame.encode()?, raw.to_vec());
//! # Ok::<(), homebus_packet::PacketError>(())
//! ```
//!
//! The codec is stateless and purely computational: every decode and encode
//! is a bounded transformation over an in-memory byte span, so concurrent
//! use needs no synchronization.

#![warn(missing_docs)]

mod body;
pub mod checksum;
mod constants;
mod error;
mod frame;
mod payload;
mod reader;
pub mod varint;

pub use body::{CommandBody, Trigger};
pub use checksum::{Crc8, CRC8_POLY};
pub use constants::*;
pub use error::{PacketError, Result};
pub use frame::{Frame, MAX_FRAME_SIZE, MIN_FRAME_SIZE};
pub use payload::{DeviceType, Payload};
pub use reader::ByteReader;
