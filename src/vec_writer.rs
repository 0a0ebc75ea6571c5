//! Vec<u8> writer extension for no_std serialization.
//!
//! Provides little-endian field writers and RIFF chunk framing without
//! requiring std::io::Write.

use alloc::vec::Vec;

use crate::container::FourCc;

/// Extension trait for writing to Vec<u8> without std::io.
pub(crate) trait VecWriter {
    /// Append a slice to the buffer.
    fn write_all(&mut self, data: &[u8]);

    /// Write a u16 in little-endian.
    fn write_u16_le(&mut self, v: u16);

    /// Write a u32 in little-endian.
    fn write_u32_le(&mut self, v: u32);

    /// Write one RIFF chunk: fourcc, LE payload length, payload, and a zero
    /// pad byte when the payload length is odd.
    ///
    /// The caller guarantees the payload length fits in a u32.
    fn write_chunk(&mut self, fourcc: FourCc, payload: &[u8]);
}

impl VecWriter for Vec<u8> {
    #[inline]
    fn write_all(&mut self, data: &[u8]) {
        self.extend_from_slice(data);
    }

    #[inline]
    fn write_u16_le(&mut self, v: u16) {
        self.extend_from_slice(&v.to_le_bytes());
    }

    #[inline]
    fn write_u32_le(&mut self, v: u32) {
        self.extend_from_slice(&v.to_le_bytes());
    }

    fn write_chunk(&mut self, fourcc: FourCc, payload: &[u8]) {
        self.write_all(fourcc.as_bytes());
        self.write_u32_le(payload.len() as u32);
        self.write_all(payload);
        if payload.len() % 2 == 1 {
            self.push(0);
        }
    }
}

/// On-disk size of a chunk holding `payload_len` bytes: header, payload and pad.
#[inline]
pub(crate) const fn chunk_size(payload_len: usize) -> usize {
    8 + payload_len + (payload_len & 1)
}
