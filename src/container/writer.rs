//! WebP container writer.
//!
//! Reassembles a chunk sequence into a RIFF/WebP file and applies the
//! placement rules for the sticker metadata chunk.
//!
//! # Example
//!
//! ```rust
//! use zensticker::container::{self, Chunk, FourCc};
//!
//! let chunks = [Chunk::borrowed(FourCc::VP8L, &[0x2f, 0, 0, 0, 0])];
//! let webp = container::serialize(&chunks)?;
//! assert_eq!(&webp[0..4], b"RIFF");
//! assert_eq!(container::parse(&webp)?, chunks);
//! # Ok::<(), zensticker::StickerError>(())
//! ```

use alloc::format;
use alloc::vec::Vec;

use super::reader::CHUNK_HEADER_LEN;
use super::{Chunk, FourCc, VP8X_EXIF_FLAG, WebPContainer};
use crate::error::{Result, StickerError};
use crate::vec_writer::VecWriter;

/// Serialize chunks into a complete WebP file.
///
/// The RIFF size field is recomputed as `4 + Σ(8 + size + pad)`, and every
/// odd-sized payload is followed by one zero pad byte.
///
/// # Errors
///
/// [`StickerError::LimitExceeded`] if the container would not fit the 32-bit
/// RIFF size field.
pub fn serialize(chunks: &[Chunk<'_>]) -> Result<Vec<u8>> {
    let body = chunks
        .iter()
        .try_fold(4usize, |acc, c| acc.checked_add(c.encoded_len()));
    let riff_size = body
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            StickerError::LimitExceeded(format!(
                "{} chunks exceed the 4 GiB RIFF size limit",
                chunks.len()
            ))
        })?;

    let mut out = Vec::with_capacity(riff_size as usize + CHUNK_HEADER_LEN);
    out.write_all(FourCc::RIFF.as_bytes());
    out.write_u32_le(riff_size);
    out.write_all(FourCc::WEBP.as_bytes());
    for chunk in chunks {
        out.write_chunk(chunk.fourcc, &chunk.payload);
    }

    tracing::debug!(chunks = chunks.len(), riff_size, "Serialized WebP container");
    Ok(out)
}

impl WebPContainer<'_> {
    /// Serialize this container. See [`serialize`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serialize(&self.chunks)
    }

    /// Replace the metadata chunk.
    ///
    /// Every existing `EXIF` chunk is removed, then a single new one is placed
    /// directly after `VP8X` when present, or appended last otherwise. The
    /// relative order of all other chunks is unchanged, and the VP8X EXIF flag
    /// is set.
    pub fn set_metadata(&mut self, payload: Vec<u8>) {
        self.chunks.retain(|c| c.fourcc != FourCc::EXIF);
        let at = self
            .chunks
            .iter()
            .position(|c| c.fourcc == FourCc::VP8X)
            .map_or(self.chunks.len(), |i| i + 1);
        self.chunks.insert(at, Chunk::owned(FourCc::EXIF, payload));
        self.set_vp8x_flag(VP8X_EXIF_FLAG, true);
    }

    /// Remove every `EXIF` chunk and clear the VP8X EXIF flag.
    ///
    /// Returns the number of chunks removed.
    pub fn remove_metadata(&mut self) -> usize {
        let before = self.chunks.len();
        self.chunks.retain(|c| c.fourcc != FourCc::EXIF);
        self.set_vp8x_flag(VP8X_EXIF_FLAG, false);
        before - self.chunks.len()
    }

    fn set_vp8x_flag(&mut self, flag: u8, on: bool) {
        let Some(vp8x) = self.chunks.iter_mut().find(|c| c.fourcc == FourCc::VP8X) else {
            return;
        };
        let current = match vp8x.payload.first() {
            Some(&flags) => flags,
            None => return,
        };
        let updated = if on { current | flag } else { current & !flag };
        if updated != current {
            vp8x.payload.to_mut()[0] = updated;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn vp8x(flags: u8) -> Chunk<'static> {
        Chunk::owned(FourCc::VP8X, vec![flags, 0, 0, 0, 0, 0, 0, 0, 0, 0])
    }

    #[test]
    fn size_field_matches_invariant() {
        let chunks = [
            Chunk::borrowed(FourCc::VP8, &[1, 2, 3]),
            Chunk::borrowed(FourCc::EXIF, &[4, 5]),
        ];
        let out = serialize(&chunks).unwrap();
        // 4 + (8 + 3 + 1) + (8 + 2)
        assert_eq!(&out[4..8], &26u32.to_le_bytes());
        assert_eq!(out.len(), 8 + 26);
        assert_eq!(out[12 + 8 + 3], 0, "odd payload must be zero padded");
    }

    #[test]
    fn empty_sequence_is_bare_header() {
        let out = serialize(&[]).unwrap();
        assert_eq!(out, b"RIFF\x04\x00\x00\x00WEBP");
    }

    #[test]
    fn metadata_follows_vp8x() {
        let mut container = WebPContainer::from_chunks(vec![
            vp8x(0),
            Chunk::borrowed(FourCc::ICCP, b"icc"),
            Chunk::borrowed(FourCc::VP8L, b"px"),
        ]);
        container.set_metadata(b"meta".to_vec());

        let order: Vec<_> = container.chunks().iter().map(|c| c.fourcc).collect();
        assert_eq!(
            order,
            [FourCc::VP8X, FourCc::EXIF, FourCc::ICCP, FourCc::VP8L]
        );
        assert_eq!(container.chunks()[0].payload[0], VP8X_EXIF_FLAG);
    }

    #[test]
    fn metadata_appended_without_vp8x() {
        let mut container =
            WebPContainer::from_chunks(vec![Chunk::borrowed(FourCc::VP8, b"frame!")]);
        container.set_metadata(b"meta".to_vec());
        assert_eq!(container.chunks()[1].fourcc, FourCc::EXIF);
    }

    #[test]
    fn replacing_metadata_leaves_one_chunk() {
        let mut container = WebPContainer::from_chunks(vec![
            Chunk::borrowed(FourCc::VP8L, b"px"),
            Chunk::borrowed(FourCc::EXIF, b"old1"),
            Chunk::borrowed(FourCc::XMP, b"xmp"),
            Chunk::borrowed(FourCc::EXIF, b"old2"),
        ]);
        container.set_metadata(b"new".to_vec());

        assert_eq!(container.count(FourCc::EXIF), 1);
        assert_eq!(&container.find(FourCc::EXIF).unwrap().payload[..], b"new");
        let order: Vec<_> = container.chunks().iter().map(|c| c.fourcc).collect();
        assert_eq!(order, [FourCc::VP8L, FourCc::XMP, FourCc::EXIF]);
    }

    #[test]
    fn remove_metadata_clears_flag() {
        let mut container = WebPContainer::from_chunks(vec![
            vp8x(VP8X_EXIF_FLAG | 0x10),
            Chunk::borrowed(FourCc::EXIF, b"meta"),
            Chunk::borrowed(FourCc::VP8L, b"px"),
        ]);
        assert_eq!(container.remove_metadata(), 1);
        assert_eq!(container.remove_metadata(), 0);
        assert_eq!(container.chunks().len(), 2);
        assert_eq!(container.chunks()[0].payload[0], 0x10);
    }

    #[test]
    fn empty_vp8x_is_left_alone() {
        let mut container = WebPContainer::from_chunks(vec![Chunk::borrowed(FourCc::VP8X, &[])]);
        container.set_metadata(vec![1]);
        assert!(container.chunks()[0].payload.is_empty());
        assert_eq!(container.chunks()[1].fourcc, FourCc::EXIF);
    }
}
