//! The addressed payload envelope.
//!
//! ## Payload Format
//!
//! | Field    | Size (bytes) | Description                                  |
//! |----------|--------------|----------------------------------------------|
//! | src      | 2            | Sender bus address (varint in a fixed field). |
//! | dst      | 2            | Receiver bus address.                         |
//! | serial   | 1            | Sender's message serial number.               |
//! | dev_type | 1            | Device type code of the sender.               |
//! | command  | 1            | Command code.                                 |
//! | body     | rest         | Command body, interpreted per (type, command).|

use serde::Serialize;

use crate::body::CommandBody;
use crate::constants::*;
use crate::error::{PacketError, Result};
use crate::reader::ByteReader;
use crate::varint;

/// Device type codes on the bus.
///
/// Codes without a known meaning are preserved in [`DeviceType::Other`] so
/// a payload always re-encodes to its original byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceType {
    /// Smart hub.
    SmartHub,
    /// Environment sensor.
    EnvSensor,
    /// Switch.
    Switch,
    /// Lamp.
    Lamp,
    /// Socket.
    Socket,
    /// Clock.
    Clock,
    /// Unrecognized device type code.
    Other(u8),
}

impl From<u8> for DeviceType {
    fn from(code: u8) -> Self {
        match code {
            DEV_TYPE_SMART_HUB => DeviceType::SmartHub,
            DEV_TYPE_ENV_SENSOR => DeviceType::EnvSensor,
            DEV_TYPE_SWITCH => DeviceType::Switch,
            DEV_TYPE_LAMP => DeviceType::Lamp,
            DEV_TYPE_SOCKET => DeviceType::Socket,
            DEV_TYPE_CLOCK => DeviceType::Clock,
            other => DeviceType::Other(other),
        }
    }
}

impl From<DeviceType> for u8 {
    fn from(dev_type: DeviceType) -> Self {
        match dev_type {
            DeviceType::SmartHub => DEV_TYPE_SMART_HUB,
            DeviceType::EnvSensor => DEV_TYPE_ENV_SENSOR,
            DeviceType::Switch => DEV_TYPE_SWITCH,
            DeviceType::Lamp => DEV_TYPE_LAMP,
            DeviceType::Socket => DEV_TYPE_SOCKET,
            DeviceType::Clock => DEV_TYPE_CLOCK,
            DeviceType::Other(code) => code,
        }
    }
}

/// The addressed envelope inside a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    /// Sender bus address.
    pub src: u16,
    /// Receiver bus address.
    pub dst: u16,
    /// Sender's message serial number.
    pub serial: u8,
    /// Device type of the sender.
    pub device_type: DeviceType,
    /// Command code.
    pub command: u8,
    /// The command body.
    pub body: CommandBody,
}

impl Payload {
    /// Decode a payload from its byte span.
    pub fn decode(data: &[u8]) -> Result<Payload> {
        if data.len() < PAYLOAD_HEADER_SIZE {
            return Err(PacketError::truncated(PAYLOAD_HEADER_SIZE, data.len()));
        }

        let mut r = ByteReader::new(data);
        let src = varint::decode_exact(r.read_bytes(ADDR_FIELD_SIZE)?) as u16;
        let dst = varint::decode_exact(r.read_bytes(ADDR_FIELD_SIZE)?) as u16;
        let serial = r.read_u8()?;
        let device_type = DeviceType::from(r.read_u8()?);
        let command = r.read_u8()?;
        let body = CommandBody::decode(device_type, command, r.read_rest())?;

        Ok(Payload {
            src,
            dst,
            serial,
            device_type,
            command,
            body,
        })
    }

    /// Encode the payload to bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let body = self.body.encode()?;
        let mut buf = Vec::with_capacity(PAYLOAD_HEADER_SIZE + body.len());
        buf.extend_from_slice(&encode_address(self.src)?);
        buf.extend_from_slice(&encode_address(self.dst)?);
        buf.push(self.serial);
        buf.push(u8::from(self.device_type));
        buf.push(self.command);
        buf.extend_from_slice(&body);
        Ok(buf)
    }
}

/// Encode a bus address into the fixed 2-byte field.
///
/// The minimal varint encoding is zero-padded up to the field width; the
/// fixed-span decoder on the receiving side masks continuation bits, so the
/// padding is transparent. Values needing more than two varint groups do
/// not fit.
fn encode_address(value: u16) -> Result<[u8; ADDR_FIELD_SIZE]> {
    if value > MAX_ADDRESS {
        return Err(PacketError::AddressOverflow(u64::from(value)));
    }
    let encoded = varint::encode(u64::from(value));
    let mut field = [0u8; ADDR_FIELD_SIZE];
    field[..encoded.len()].copy_from_slice(&encoded);
    Ok(field)
}
