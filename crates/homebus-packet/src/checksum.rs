//! Frame checksum (CRC-8)
//!
//! Every frame carries a single CRC-8 byte over its payload section. The
//! bus uses polynomial 0x1D with a zero initial value, no reflection, and
//! no final XOR; those parameters live on [`Crc8`] so a variant bus profile
//! can swap them without touching the frame layer.

/// CRC-8 polynomial used on the bus.
pub const CRC8_POLY: u8 = 0x1D;

/// A CRC-8 parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc8 {
    /// Generator polynomial.
    pub poly: u8,
    /// Initial register value.
    pub init: u8,
}

impl Default for Crc8 {
    fn default() -> Self {
        Crc8 {
            poly: CRC8_POLY,
            init: 0x00,
        }
    }
}

impl Crc8 {
    /// Compute the checksum of `data` with this parameter set.
    pub fn compute(&self, data: &[u8]) -> u8 {
        let mut crc = self.init;
        for &b in data {
            crc ^= b;
            for _ in 0..8 {
                if crc & 0x80 != 0 {
                    crc = (crc << 1) ^ self.poly;
                } else {
                    crc <<= 1;
                }
            }
        }
        crc
    }
}

/// Compute the bus checksum of `data` with the standard parameters.
pub fn compute(data: &[u8]) -> u8 {
    Crc8::default().compute(data)
}

/// Check `data` against an expected checksum byte.
pub fn validate(data: &[u8], expected: u8) -> bool {
    compute(data) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_payload() {
        // Payload section of the documented clock-tick frame.
        let payload = [
            0xB3, 0x06, 0xFF, 0x7F, 0x01, 0x06, 0x06, 0x88, 0xD0, 0xAB, 0xFA, 0x93, 0x31,
        ];
        assert_eq!(compute(&payload), 0x8A);
        assert!(validate(&payload, 0x8A));
        assert!(!validate(&payload, 0x8B));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(compute(&[]), 0x00);
    }

    #[test]
    fn test_single_byte_perturbation_changes_crc() {
        let payload = [0xB3, 0x06, 0xFF, 0x7F, 0x01, 0x06, 0x06];
        let base = compute(&payload);
        for i in 0..payload.len() {
            let mut mutated = payload;
            mutated[i] ^= 0x01;
            assert_ne!(compute(&mutated), base, "byte {i} flip went undetected");
        }
    }

    #[test]
    fn test_custom_parameters() {
        let alt = Crc8 {
            poly: 0x07,
            init: 0x00,
        };
        // CRC-8/SMBUS check value for "123456789".
        assert_eq!(alt.compute(b"123456789"), 0xF4);
    }
}
