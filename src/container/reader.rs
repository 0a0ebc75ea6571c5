//! Zero-copy WebP container reader.
//!
//! Splits a WebP file into its top-level chunks. Payloads borrow from the
//! input buffer; nothing inside a chunk is interpreted here.
//!
//! # Example
//!
//! ```rust
//! use zensticker::container::{self, FourCc};
//!
//! let data = b"RIFF\x0e\x00\x00\x00WEBPVP8L\x02\x00\x00\x00\x2f\x00";
//! let chunks = container::parse(data)?;
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].fourcc, FourCc::VP8L);
//! # Ok::<(), zensticker::StickerError>(())
//! ```

use alloc::format;
use alloc::vec::Vec;

use super::{Chunk, FourCc, WebPContainer};
use crate::error::{Result, StickerError};
use crate::limits::Limits;
use crate::slice_reader::SliceReader;

/// FourCC + size.
pub(crate) const CHUNK_HEADER_LEN: usize = 8;

/// Parse a WebP container into its chunks, in file order.
///
/// Uses [`Limits::default()`]. See [`WebPContainer::parse_with_limits`].
pub fn parse(data: &[u8]) -> Result<Vec<Chunk<'_>>> {
    WebPContainer::parse(data).map(WebPContainer::into_chunks)
}

impl<'a> WebPContainer<'a> {
    /// Parse a WebP container with default limits.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        Self::parse_with_limits(data, &Limits::default())
    }

    /// Parse a WebP container.
    ///
    /// The RIFF size field is advisory: chunks are read until the buffer is
    /// exhausted, whatever the producer declared. A missing pad byte after the
    /// final chunk is tolerated.
    ///
    /// # Errors
    ///
    /// - [`StickerError::Format`] if the buffer is shorter than 12 bytes or the
    ///   `RIFF`/`WEBP` signatures are missing.
    /// - [`StickerError::TruncatedChunk`] if a chunk extends past the buffer.
    /// - [`StickerError::LimitExceeded`] if `limits` are violated.
    pub fn parse_with_limits(data: &'a [u8], limits: &Limits) -> Result<Self> {
        let mut r = SliceReader::new(data);
        let header = (r.read_fourcc(), r.read_u32_le(), r.read_fourcc());
        let (Some(riff), Some(declared_size), Some(form)) = header else {
            return Err(StickerError::Format(format!(
                "File too small: {} bytes",
                data.len()
            )));
        };
        if riff != FourCc::RIFF {
            return Err(StickerError::Format("Missing RIFF signature".into()));
        }
        if form != FourCc::WEBP {
            return Err(StickerError::Format("Missing WEBP signature".into()));
        }
        limits.check_input_size(data.len())?;

        let mut chunks = Vec::new();
        while r.remaining() > 0 {
            let offset = r.position();
            let (Some(fourcc), Some(size)) = (r.read_fourcc(), r.read_u32_le()) else {
                return Err(truncated_header(data, offset));
            };
            let payload = r.take_slice(size as usize).ok_or(StickerError::TruncatedChunk {
                fourcc,
                offset,
                declared: size,
                available: r.remaining(),
            })?;
            r.skip_saturating(size as usize & 1);

            chunks.push(Chunk::borrowed(fourcc, payload));
            limits.check_chunk_count(chunks.len())?;
        }

        let actual = (data.len() - CHUNK_HEADER_LEN) as u64;
        if u64::from(declared_size) != actual {
            tracing::debug!(
                declared = declared_size,
                actual,
                "RIFF size field disagrees with buffer length"
            );
        }
        tracing::debug!(chunks = chunks.len(), bytes = data.len(), "Parsed WebP container");

        Ok(Self {
            declared_size,
            chunks,
        })
    }
}

/// Error for 1..8 trailing bytes: too short to hold a chunk header.
fn truncated_header(data: &[u8], offset: usize) -> StickerError {
    let tail = &data[offset..];
    let mut id = [0u8; 4];
    let n = tail.len().min(4);
    id[..n].copy_from_slice(&tail[..n]);
    StickerError::TruncatedChunk {
        fourcc: FourCc(id),
        offset,
        declared: 0,
        available: tail.len(),
    }
}
