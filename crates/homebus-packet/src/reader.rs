//! Cursor over a byte span.
//!
//! Decoding walks many variable-width fields; `ByteReader` keeps the
//! position and remaining count in one place and turns every out-of-range
//! read into [`PacketError::Truncated`] instead of an index panic.

use crate::error::{PacketError, Result};
use crate::varint;

/// A forward-only cursor over a borrowed byte span.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader over `data`, positioned at the start.
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether the span is fully consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Read exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(PacketError::truncated(n, self.remaining()));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Consume and return everything left in the span.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = &self.data[self.pos..];
        self.pos = self.data.len();
        rest
    }

    /// Read one streaming varint.
    pub fn read_varint(&mut self) -> Result<u64> {
        let (value, consumed) = varint::decode(&self.data[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    /// Read a length-prefixed UTF-8 string: one length byte, then that many
    /// bytes of text.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u8()? as usize;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| PacketError::unsupported("invalid UTF-8 in name field"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_reads() {
        let mut r = ByteReader::new(&[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(r.read_u8().unwrap(), 0x01);
        assert_eq!(r.read_bytes(2).unwrap(), &[0x02, 0x03]);
        assert_eq!(r.remaining(), 1);
        assert_eq!(r.read_rest(), &[0x04]);
        assert!(r.is_empty());
    }

    #[test]
    fn test_truncated_read() {
        let mut r = ByteReader::new(&[0x01]);
        assert_eq!(r.read_bytes(3), Err(PacketError::truncated(3, 1)));
        // A failed read consumes nothing.
        assert_eq!(r.read_u8().unwrap(), 0x01);
    }

    #[test]
    fn test_read_varint() {
        let mut r = ByteReader::new(&[0xB3, 0x06, 0xFF]);
        assert_eq!(r.read_varint().unwrap(), 819);
        assert_eq!(r.remaining(), 1);
    }

    #[test]
    fn test_read_string() {
        let mut r = ByteReader::new(&[0x05, b'L', b'a', b'm', b'p', b'1', 0xAA]);
        assert_eq!(r.read_string().unwrap(), "Lamp1");
        assert_eq!(r.remaining(), 1);
    }

    #[test]
    fn test_read_string_truncated() {
        let mut r = ByteReader::new(&[0x05, b'L', b'a']);
        assert_eq!(r.read_string(), Err(PacketError::truncated(5, 2)));
    }

    #[test]
    fn test_read_string_invalid_utf8() {
        let mut r = ByteReader::new(&[0x02, 0xFF, 0xFE]);
        assert!(matches!(
            r.read_string(),
            Err(PacketError::UnsupportedEncoding(_))
        ));
    }
}
