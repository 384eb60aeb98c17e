//! Protocol constants
//!
//! These constants define the device-type codes and command codes used on
//! the HomeBus device bus.

// ============================================================================
// Device Type Codes
// ============================================================================

/// Smart hub (bus coordinator).
pub const DEV_TYPE_SMART_HUB: u8 = 1;
/// Environment sensor (temperature, humidity, light, air quality).
pub const DEV_TYPE_ENV_SENSOR: u8 = 2;
/// Switch controlling other devices.
pub const DEV_TYPE_SWITCH: u8 = 3;
/// Lamp.
pub const DEV_TYPE_LAMP: u8 = 4;
/// Socket.
pub const DEV_TYPE_SOCKET: u8 = 5;
/// Clock (time source).
pub const DEV_TYPE_CLOCK: u8 = 6;

// ============================================================================
// Command Codes
// ============================================================================

/// Clock synchronization tick. Reserved across all device types: a payload
/// with this command always carries a timestamp body.
pub const CMD_TICK: u8 = 6;

// ============================================================================
// Field Sizes
// ============================================================================

/// Width of the `src`/`dst` bus address fields in raw bytes.
pub const ADDR_FIELD_SIZE: usize = 2;

/// Fixed payload header: src(2) + dst(2) + serial(1) + dev_type(1) + cmd(1).
pub const PAYLOAD_HEADER_SIZE: usize = 7;

/// Largest bus address that fits the 2-byte field (two 7-bit varint groups).
pub const MAX_ADDRESS: u16 = 0x3FFF;
