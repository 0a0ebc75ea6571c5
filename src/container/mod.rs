//! RIFF/WebP container reading and writing.
//!
//! This module provides two capabilities:
//!
//! - **Read** ([`parse`], [`WebPContainer::parse`]): split a WebP file into
//!   its ordered top-level chunks without touching bitstream data.
//! - **Write** ([`serialize`], [`WebPContainer::to_bytes`]): reassemble a
//!   chunk sequence into a valid container, recomputing every size field.
//!
//! [`WebPContainer`] also implements the metadata placement policy used when
//! sticker metadata is embedded or stripped.

mod chunk;
mod reader;
mod writer;

use alloc::vec::Vec;

pub use chunk::{Chunk, FourCc};
pub use reader::parse;
pub use writer::serialize;

/// VP8X flag bit announcing an EXIF chunk.
pub(crate) const VP8X_EXIF_FLAG: u8 = 1 << 3;

/// A parsed WebP container: the ordered top-level chunks plus the RIFF size
/// the producer declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebPContainer<'a> {
    declared_size: u32,
    chunks: Vec<Chunk<'a>>,
}

impl<'a> WebPContainer<'a> {
    /// Build a container from chunks. The declared size is computed on write.
    pub fn from_chunks(chunks: Vec<Chunk<'a>>) -> Self {
        Self {
            declared_size: 0,
            chunks,
        }
    }

    /// RIFF size field as read from the input. Advisory only; zero for
    /// containers built with [`from_chunks`](Self::from_chunks).
    pub fn declared_size(&self) -> u32 {
        self.declared_size
    }

    /// Chunks in file order.
    pub fn chunks(&self) -> &[Chunk<'a>] {
        &self.chunks
    }

    /// Consume the container, returning its chunks in file order.
    pub fn into_chunks(self) -> Vec<Chunk<'a>> {
        self.chunks
    }

    /// First chunk with the given identifier.
    pub fn find(&self, fourcc: FourCc) -> Option<&Chunk<'a>> {
        self.chunks.iter().find(|c| c.fourcc == fourcc)
    }

    /// Chunks whose identifier is any of `fourccs`, in file order.
    pub fn chunks_of<'s>(
        &'s self,
        fourccs: &'s [FourCc],
    ) -> impl Iterator<Item = &'s Chunk<'a>> {
        self.chunks.iter().filter(|c| fourccs.contains(&c.fourcc))
    }

    /// Number of chunks with the given identifier.
    pub fn count(&self, fourcc: FourCc) -> usize {
        self.chunks.iter().filter(|c| c.fourcc == fourcc).count()
    }
}
