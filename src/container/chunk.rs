//! RIFF chunk and FourCC types.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;

/// A four-character RIFF chunk identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    /// Outer RIFF signature.
    pub const RIFF: Self = Self(*b"RIFF");
    /// RIFF form type for WebP.
    pub const WEBP: Self = Self(*b"WEBP");
    /// Lossy bitstream.
    pub const VP8: Self = Self(*b"VP8 ");
    /// Lossless bitstream.
    pub const VP8L: Self = Self(*b"VP8L");
    /// Extended-format header (canvas size and feature flags).
    pub const VP8X: Self = Self(*b"VP8X");
    /// Animation parameters.
    pub const ANIM: Self = Self(*b"ANIM");
    /// Animation frame.
    pub const ANMF: Self = Self(*b"ANMF");
    /// Alpha plane for lossy images.
    pub const ALPH: Self = Self(*b"ALPH");
    /// EXIF metadata; the canonical home of sticker metadata.
    pub const EXIF: Self = Self(*b"EXIF");
    /// ICC color profile. Older sticker tools stored metadata here.
    pub const ICCP: Self = Self(*b"ICCP");
    /// XMP metadata.
    pub const XMP: Self = Self(*b"XMP ");

    /// Raw identifier bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for FourCc {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCc(\"{self}\")")
    }
}

/// A single chunk of a RIFF/WebP container.
///
/// Only the identifier and payload are stored. The size field and pad byte
/// are derived when serializing, so a chunk can never carry a stale length.
/// Parsed chunks borrow their payload from the input buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Chunk identifier.
    pub fourcc: FourCc,
    /// Payload bytes, excluding the 8-byte header and any pad byte.
    pub payload: Cow<'a, [u8]>,
}

impl<'a> Chunk<'a> {
    /// Create a chunk borrowing its payload.
    pub fn borrowed(fourcc: FourCc, payload: &'a [u8]) -> Self {
        Self {
            fourcc,
            payload: Cow::Borrowed(payload),
        }
    }

    /// Create a chunk owning its payload.
    pub fn owned(fourcc: FourCc, payload: Vec<u8>) -> Self {
        Self {
            fourcc,
            payload: Cow::Owned(payload),
        }
    }

    /// Payload length as stored in the chunk header.
    #[inline]
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    /// Number of zero pad bytes following the payload (0 or 1).
    #[inline]
    pub fn padding(&self) -> usize {
        self.payload.len() & 1
    }

    /// Bytes this chunk occupies in a serialized container.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        crate::vec_writer::chunk_size(self.payload.len())
    }

    /// Detach the payload from the source buffer.
    pub fn into_owned(self) -> Chunk<'static> {
        Chunk {
            fourcc: self.fourcc,
            payload: Cow::Owned(self.payload.into_owned()),
        }
    }
}

impl fmt::Debug for Chunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("fourcc", &self.fourcc)
            .field("size", &self.size())
            .finish()
    }
}
