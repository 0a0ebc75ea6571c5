//! Embed, extract, and strip sticker metadata in WebP data.
//!
//! These functions operate on already-encoded WebP bytes and never decode
//! pixels. Each call parses the RIFF container once and, when writing,
//! reassembles it into a new buffer; the input is never modified.
//!
//! # Example
//!
//! ```rust
//! use zensticker::{StickerMetadata, sticker};
//!
//! # let webp: &[u8] = b"RIFF\x0e\x00\x00\x00WEBPVP8L\x02\x00\x00\x00\x2f\x00";
//! let meta = StickerMetadata::builder()
//!     .pack("Cats")
//!     .author("me")
//!     .category(["😺"])
//!     .build(|| "cats-v1".into());
//!
//! let tagged = sticker::embed(webp, &meta)?;
//! assert_eq!(sticker::extract(&tagged)?, meta);
//!
//! let stripped = sticker::strip(&tagged)?;
//! assert!(sticker::extract_optional(&stripped)?.is_none());
//! # Ok::<(), zensticker::StickerError>(())
//! ```

use alloc::vec::Vec;

use crate::codec;
use crate::container::{FourCc, WebPContainer};
use crate::error::{Result, StickerError};
use crate::limits::Limits;
use crate::record::StickerMetadata;

/// Chunks scanned for metadata, in order of recognition. `ICCP` is only read
/// for files written by tools that misused the color-profile chunk.
const METADATA_CHUNKS: [FourCc; 2] = [FourCc::EXIF, FourCc::ICCP];

/// Reusable metadata reader/writer carrying parse limits.
///
/// The free functions in this module use `StickerCodec::new()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StickerCodec {
    limits: Limits,
}

impl StickerCodec {
    /// Create a codec with [`Limits::default()`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the parse and decode limits.
    #[must_use]
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Embed `meta` into `webp`, replacing any existing sticker metadata.
    ///
    /// The new `EXIF` chunk is placed right after `VP8X` if present, otherwise
    /// at the end of the file.
    pub fn embed(&self, webp: &[u8], meta: &StickerMetadata) -> Result<Vec<u8>> {
        let mut container = WebPContainer::parse_with_limits(webp, &self.limits)?;
        let payload = codec::encode(meta)?;
        tracing::debug!(
            payload_len = payload.len(),
            pack = %meta.pack,
            "Embedding sticker metadata"
        );
        container.set_metadata(payload);
        container.to_bytes()
    }

    /// Extract sticker metadata from `webp`.
    ///
    /// Chunks are scanned in file order. The first `EXIF` chunk is decoded and
    /// its result returned. An `ICCP` chunk is only used when its payload
    /// decodes as sticker metadata; a genuine color profile is skipped.
    ///
    /// # Errors
    ///
    /// [`StickerError::NotFound`] if the file has no `EXIF` chunk and no
    /// `ICCP` chunk carrying sticker metadata, plus any parse error or any
    /// decode error from the `EXIF` payload.
    pub fn extract(&self, webp: &[u8]) -> Result<StickerMetadata> {
        let container = WebPContainer::parse_with_limits(webp, &self.limits)?;
        for chunk in container.chunks_of(&METADATA_CHUNKS) {
            let decoded = codec::decode_with_limits(&chunk.payload, &self.limits);
            if chunk.fourcc == FourCc::EXIF {
                return decoded;
            }
            match decoded {
                Ok(meta) => {
                    tracing::warn!("Reading sticker metadata from legacy ICCP chunk");
                    return Ok(meta);
                }
                Err(StickerError::Decode(reason)) => {
                    tracing::debug!(%reason, "ICCP chunk is not sticker metadata, skipping");
                }
                Err(e) => return Err(e),
            }
        }
        Err(StickerError::NotFound)
    }

    /// Like [`extract`](Self::extract), but a file without metadata yields
    /// `Ok(None)` instead of an error.
    pub fn extract_optional(&self, webp: &[u8]) -> Result<Option<StickerMetadata>> {
        match self.extract(webp) {
            Ok(meta) => Ok(Some(meta)),
            Err(StickerError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Remove all sticker metadata (`EXIF` chunks) from `webp`.
    pub fn strip(&self, webp: &[u8]) -> Result<Vec<u8>> {
        let mut container = WebPContainer::parse_with_limits(webp, &self.limits)?;
        let removed = container.remove_metadata();
        tracing::debug!(removed, "Stripped sticker metadata");
        container.to_bytes()
    }
}

/// Embed sticker metadata into WebP data.
///
/// Uses [`Limits::default()`]; inputs above 100 MiB or 10 000 chunks fail with
/// [`StickerError::LimitExceeded`]. Use a [`StickerCodec`] to change that.
pub fn embed(webp: &[u8], meta: &StickerMetadata) -> Result<Vec<u8>> {
    StickerCodec::new().embed(webp, meta)
}

/// Extract sticker metadata from WebP data.
///
/// Uses [`Limits::default()`], like [`embed`].
pub fn extract(webp: &[u8]) -> Result<StickerMetadata> {
    StickerCodec::new().extract(webp)
}

/// Extract sticker metadata from WebP data, if present.
pub fn extract_optional(webp: &[u8]) -> Result<Option<StickerMetadata>> {
    StickerCodec::new().extract_optional(webp)
}

/// Remove sticker metadata from WebP data.
pub fn strip(webp: &[u8]) -> Result<Vec<u8>> {
    StickerCodec::new().strip(webp)
}
