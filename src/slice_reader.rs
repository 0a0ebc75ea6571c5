//! A no_std compatible slice reader with position tracking.
//!
//! [`SliceReader`] wraps a byte slice and reads the fixed-width little- and
//! big-endian fields found in RIFF chunk headers and the Exif payload shim.
//! Reads past the end return `None` and leave the position untouched, so each
//! caller maps an overrun onto the error kind that fits its context.

use byteorder_lite::{BigEndian, ByteOrder, LittleEndian};
use core::fmt;

use crate::container::FourCc;

/// A reader that wraps a byte slice and tracks the current position.
#[derive(Clone)]
pub(crate) struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    /// Create a reader positioned at `pos`. Positions past the end are clamped.
    #[inline]
    pub fn at(data: &'a [u8], pos: usize) -> Self {
        Self {
            data,
            pos: pos.min(data.len()),
        }
    }

    /// Create a reader positioned at the start of `data`.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self::at(data, 0)
    }

    /// Current position in the slice.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes remaining from the current position.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Take `n` bytes and advance past them.
    #[inline]
    pub fn take_slice(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    /// Advance by up to `n` bytes, stopping at the end of the slice.
    #[inline]
    pub fn skip_saturating(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }

    /// Read a four-character code.
    #[inline]
    pub fn read_fourcc(&mut self) -> Option<FourCc> {
        let bytes = self.take_slice(4)?;
        Some(FourCc([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a u16 in little-endian byte order.
    #[inline]
    pub fn read_u16_le(&mut self) -> Option<u16> {
        self.take_slice(2).map(LittleEndian::read_u16)
    }

    /// Read a u32 in little-endian byte order.
    #[inline]
    pub fn read_u32_le(&mut self) -> Option<u32> {
        self.take_slice(4).map(LittleEndian::read_u32)
    }

    /// Read a u32 in big-endian byte order.
    #[inline]
    pub fn read_u32_be(&mut self) -> Option<u32> {
        self.take_slice(4).map(BigEndian::read_u32)
    }
}

impl fmt::Debug for SliceReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceReader")
            .field("len", &self.data.len())
            .field("pos", &self.pos)
            .finish()
    }
}
