//! Error types for container parsing and sticker metadata handling.

use alloc::string::String;
use thiserror::Error;

use crate::container::FourCc;

/// Errors that can occur while embedding or extracting sticker metadata.
///
/// Every variant is a recoverable value. The caller decides whether to retry,
/// fall back to default metadata, or surface the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StickerError {
    /// The buffer does not start with a valid `RIFF....WEBP` header.
    #[error("Invalid WebP format: {0}")]
    Format(String),

    /// A chunk's declared size runs past the end of the buffer.
    #[error(
        "Truncated {fourcc} chunk at offset {offset}: declares {declared} bytes, {available} available"
    )]
    TruncatedChunk {
        /// FourCC of the offending chunk (lossy ASCII if the header itself is cut short).
        fourcc: FourCc,
        /// Byte offset of the chunk header within the buffer.
        offset: usize,
        /// Payload size declared by the chunk header.
        declared: u32,
        /// Bytes actually remaining after the chunk header.
        available: usize,
    },

    /// A metadata payload was found but its header or JSON body is malformed.
    #[error("Invalid sticker metadata: {0}")]
    Decode(String),

    /// A metadata record could not be serialized.
    #[error("Failed to encode sticker metadata: {0}")]
    Encode(String),

    /// No `EXIF` (or legacy `ICCP`) chunk carrying sticker metadata exists.
    #[error("No sticker metadata found in WebP container")]
    NotFound,

    /// A configured [`Limits`](crate::Limits) bound, or the 32-bit RIFF size, was exceeded.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, StickerError>;
