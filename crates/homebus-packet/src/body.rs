//! Command bodies.
//!
//! The trailing bytes of a payload are interpreted per `(device type,
//! command)`. Each variant decodes its whole span and serializes back to
//! exactly the bytes it came from; pairs with no defined layout land in
//! [`CommandBody::Unknown`], which carries the raw bytes untouched so the
//! frame's length and checksum survive a re-encode.

use serde::Serialize;

use crate::constants::CMD_TICK;
use crate::error::{PacketError, Result};
use crate::payload::DeviceType;
use crate::reader::ByteReader;
use crate::varint;

/// One alarm rule in an environment sensor's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trigger {
    /// Comparison operator code.
    pub op: u8,
    /// Threshold the sensor reading is compared against.
    pub value: u64,
    /// Name of the device to notify when the rule fires.
    pub name: String,
}

/// The `(device type, command)`-dependent part of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CommandBody {
    /// A device announcing its human-readable name.
    DeviceName {
        /// The device name.
        name: String,
    },

    /// An environment sensor reporting its hardware and alarm rules.
    EnvSensorConfig {
        /// Bitmask of the physical sensors present.
        sensor_mask: u8,
        /// Alarm rules, in wire order.
        triggers: Vec<Trigger>,
    },

    /// A switch reporting the devices it controls.
    SwitchConfig {
        /// Names of the linked devices, in wire order.
        linked: Vec<String>,
    },

    /// A lamp or socket on/off command or status.
    BinaryState {
        /// Whether the device is (to be) on.
        is_on: bool,
    },

    /// A clock synchronization timestamp.
    Timestamp {
        /// The timestamp value.
        value: u64,
    },

    /// A `(device type, command)` pair with no known layout.
    Unknown {
        /// The body bytes, verbatim.
        raw: Vec<u8>,
    },
}

impl CommandBody {
    /// Decode the body span of a payload.
    pub fn decode(device_type: DeviceType, command: u8, data: &[u8]) -> Result<CommandBody> {
        match (device_type, command) {
            // Command 6 is the clock tick for every device type.
            (_, CMD_TICK) => Ok(CommandBody::Timestamp {
                value: varint::decode_exact(data),
            }),
            (DeviceType::SmartHub, _) => {
                let mut r = ByteReader::new(data);
                let name = r.read_string()?;
                require_consumed(&r, data.len())?;
                Ok(CommandBody::DeviceName { name })
            }
            (DeviceType::EnvSensor, _) => {
                let mut r = ByteReader::new(data);
                let sensor_mask = r.read_u8()?;
                let mut triggers = Vec::new();
                while !r.is_empty() {
                    triggers.push(Trigger {
                        op: r.read_u8()?,
                        value: r.read_varint()?,
                        name: r.read_string()?,
                    });
                }
                Ok(CommandBody::EnvSensorConfig {
                    sensor_mask,
                    triggers,
                })
            }
            (DeviceType::Switch, _) => {
                let mut r = ByteReader::new(data);
                let count = r.read_u8()? as usize;
                let mut linked = Vec::with_capacity(count);
                for _ in 0..count {
                    linked.push(r.read_string()?);
                }
                require_consumed(&r, data.len())?;
                Ok(CommandBody::SwitchConfig { linked })
            }
            (DeviceType::Lamp | DeviceType::Socket, _) => {
                if data.is_empty() {
                    return Err(PacketError::truncated(1, 0));
                }
                if data.len() > 1 {
                    return Err(PacketError::LengthMismatch {
                        declared: 1,
                        actual: data.len(),
                    });
                }
                Ok(CommandBody::BinaryState {
                    is_on: data[0] != 0,
                })
            }
            (DeviceType::Clock | DeviceType::Other(_), _) => Ok(CommandBody::Unknown {
                raw: data.to_vec(),
            }),
        }
    }

    /// Encode the body to bytes, the exact inverse of [`CommandBody::decode`].
    pub fn encode(&self) -> Result<Vec<u8>> {
        match self {
            CommandBody::DeviceName { name } => {
                let mut buf = Vec::with_capacity(1 + name.len());
                push_string(&mut buf, name)?;
                Ok(buf)
            }
            CommandBody::EnvSensorConfig {
                sensor_mask,
                triggers,
            } => {
                let mut buf = vec![*sensor_mask];
                for trigger in triggers {
                    buf.push(trigger.op);
                    buf.extend_from_slice(&varint::encode(trigger.value));
                    push_string(&mut buf, &trigger.name)?;
                }
                Ok(buf)
            }
            CommandBody::SwitchConfig { linked } => {
                let count = checked_len(linked.len())?;
                let mut buf = vec![count];
                for name in linked {
                    push_string(&mut buf, name)?;
                }
                Ok(buf)
            }
            CommandBody::BinaryState { is_on } => Ok(vec![u8::from(*is_on)]),
            CommandBody::Timestamp { value } => Ok(varint::encode(*value)),
            CommandBody::Unknown { raw } => Ok(raw.clone()),
        }
    }
}

/// Append a length-prefixed UTF-8 string.
fn push_string(buf: &mut Vec<u8>, s: &str) -> Result<()> {
    let len = checked_len(s.len())?;
    buf.push(len);
    buf.extend_from_slice(s.as_bytes());
    Ok(())
}

/// A one-byte length prefix caps strings and lists at 255 entries.
fn checked_len(len: usize) -> Result<u8> {
    u8::try_from(len).map_err(|_| PacketError::TooLarge {
        size: len,
        max: u8::MAX as usize,
    })
}

/// Trailing bytes after a fully-parsed body would be dropped by a
/// re-encode, breaking the frame's byte-exactness.
fn require_consumed(r: &ByteReader<'_>, span_len: usize) -> Result<()> {
    if r.is_empty() {
        Ok(())
    } else {
        Err(PacketError::LengthMismatch {
            declared: span_len - r.remaining(),
            actual: span_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_any_device_type() {
        let data = [0x88, 0xD0, 0xAB, 0xFA, 0x93, 0x31];
        for dev_type in [DeviceType::Clock, DeviceType::Lamp, DeviceType::Other(42)] {
            let body = CommandBody::decode(dev_type, CMD_TICK, &data).unwrap();
            let CommandBody::Timestamp { value } = body else {
                panic!("expected Timestamp body");
            };
            assert_eq!(value, 1_688_984_021_000);
            assert_eq!(
                CommandBody::Timestamp { value }.encode().unwrap(),
                data.to_vec()
            );
        }
    }

    #[test]
    fn test_device_name_roundtrip() {
        let data = [0x04, b'H', b'U', b'B', b'1'];
        let body = CommandBody::decode(DeviceType::SmartHub, 1, &data).unwrap();
        assert_eq!(
            body,
            CommandBody::DeviceName {
                name: "HUB1".to_string()
            }
        );
        assert_eq!(body.encode().unwrap(), data.to_vec());
    }

    #[test]
    fn test_device_name_truncated() {
        let result = CommandBody::decode(DeviceType::SmartHub, 1, &[0x08, b'H', b'U']);
        assert_eq!(result, Err(PacketError::truncated(8, 2)));
    }

    #[test]
    fn test_device_name_trailing_bytes() {
        let result = CommandBody::decode(DeviceType::SmartHub, 1, &[0x01, b'H', 0xFF]);
        assert_eq!(
            result,
            Err(PacketError::LengthMismatch {
                declared: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_env_sensor_roundtrip() {
        // mask, then two triggers: (op, varint threshold, name).
        let data = [
            0x0F, // mask: all four sensors
            0x0C, 0xE0, 0x01, 0x04, b'L', b'a', b'm', b'p', // op 12, 224, "Lamp"
            0x03, 0x64, 0x02, b'A', b'C', // op 3, 100, "AC"
        ];
        let body = CommandBody::decode(DeviceType::EnvSensor, 2, &data).unwrap();
        assert_eq!(
            body,
            CommandBody::EnvSensorConfig {
                sensor_mask: 0x0F,
                triggers: vec![
                    Trigger {
                        op: 0x0C,
                        value: 224,
                        name: "Lamp".to_string()
                    },
                    Trigger {
                        op: 0x03,
                        value: 100,
                        name: "AC".to_string()
                    },
                ],
            }
        );
        assert_eq!(body.encode().unwrap(), data.to_vec());
    }

    #[test]
    fn test_env_sensor_mask_only() {
        let body = CommandBody::decode(DeviceType::EnvSensor, 2, &[0x05]).unwrap();
        assert_eq!(
            body,
            CommandBody::EnvSensorConfig {
                sensor_mask: 0x05,
                triggers: vec![],
            }
        );
    }

    #[test]
    fn test_env_sensor_truncated_trigger() {
        // Mask, op, threshold, then a name declaring more bytes than remain.
        let result = CommandBody::decode(DeviceType::EnvSensor, 2, &[0x01, 0x0C, 0x10, 0x05, b'x']);
        assert_eq!(result, Err(PacketError::truncated(5, 1)));
    }

    #[test]
    fn test_switch_roundtrip() {
        let data = [0x02, 0x04, b'L', b'M', b'P', b'1', 0x02, b'S', b'K'];
        let body = CommandBody::decode(DeviceType::Switch, 2, &data).unwrap();
        assert_eq!(
            body,
            CommandBody::SwitchConfig {
                linked: vec!["LMP1".to_string(), "SK".to_string()],
            }
        );
        assert_eq!(body.encode().unwrap(), data.to_vec());
    }

    #[test]
    fn test_switch_trailing_bytes() {
        let result = CommandBody::decode(DeviceType::Switch, 2, &[0x01, 0x01, b'a', 0x00]);
        assert_eq!(
            result,
            Err(PacketError::LengthMismatch {
                declared: 3,
                actual: 4
            })
        );
    }

    #[test]
    fn test_binary_state() {
        for dev_type in [DeviceType::Lamp, DeviceType::Socket] {
            let body = CommandBody::decode(dev_type, 3, &[0x01]).unwrap();
            assert_eq!(body, CommandBody::BinaryState { is_on: true });
            assert_eq!(body.encode().unwrap(), vec![0x01]);

            let body = CommandBody::decode(dev_type, 3, &[0x00]).unwrap();
            assert_eq!(body, CommandBody::BinaryState { is_on: false });
        }
    }

    #[test]
    fn test_binary_state_bad_width() {
        assert_eq!(
            CommandBody::decode(DeviceType::Lamp, 3, &[]),
            Err(PacketError::truncated(1, 0))
        );
        assert_eq!(
            CommandBody::decode(DeviceType::Socket, 3, &[0x01, 0x01]),
            Err(PacketError::LengthMismatch {
                declared: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_unknown_verbatim() {
        let data = [0xDE, 0xAD, 0xBE, 0xEF];
        // Clock with a non-tick command has no defined layout.
        let body = CommandBody::decode(DeviceType::Clock, 1, &data).unwrap();
        assert_eq!(
            body,
            CommandBody::Unknown {
                raw: data.to_vec()
            }
        );
        assert_eq!(body.encode().unwrap(), data.to_vec());

        let body = CommandBody::decode(DeviceType::Other(200), 9, &data).unwrap();
        assert_eq!(body.encode().unwrap(), data.to_vec());
    }

    #[test]
    fn test_oversized_name_rejected_on_encode() {
        let body = CommandBody::DeviceName {
            name: "x".repeat(300),
        };
        assert_eq!(
            body.encode(),
            Err(PacketError::TooLarge {
                size: 300,
                max: 255
            })
        );
    }
}
