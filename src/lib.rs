//! Sticker metadata for WebP images
//!
//! Chat applications identify a sticker's pack, publisher and emoji
//! categories from a small JSON document stored in the WebP file's `EXIF`
//! chunk. This crate embeds that document into already-encoded WebP data and
//! reads it back, without decoding or touching pixel data.
//!
//! # Features
//!
//! - `std` (default): Enable standard library support in dependencies.
//!
//! # no_std Support
//!
//! Everything works in `no_std` environments (requires `alloc`):
//! ```toml
//! [dependencies]
//! zensticker = { version = "...", default-features = false }
//! ```
//!
//! All functions take `&[u8]` slices directly - no Read/Seek traits required.
//!
//! # Embedding
//!
//! Build a record with [`StickerMetadata::builder`], then embed it:
//!
//! ```rust
//! use zensticker::StickerMetadata;
//!
//! # let webp: &[u8] = b"RIFF\x0e\x00\x00\x00WEBPVP8L\x02\x00\x00\x00\x2f\x00";
//! let meta = StickerMetadata::builder()
//!     .pack("Reactions")
//!     .author("someone")
//!     .category(["😂", "😹"])
//!     .quality(80)
//!     .build(|| "reactions-2024".into());
//!
//! let sticker = zensticker::embed(webp, &meta)?;
//! # Ok::<(), zensticker::StickerError>(())
//! ```
//!
//! # Extracting
//!
//! ```rust,no_run
//! let sticker: &[u8] = &[]; // your WebP data
//! match zensticker::extract_optional(sticker)? {
//!     Some(meta) => println!("{} by {}", meta.pack, meta.author),
//!     None => println!("no sticker metadata"),
//! }
//! # Ok::<(), zensticker::StickerError>(())
//! ```
//!
//! Use [`StickerCodec`] to apply custom [`Limits`], and the [`container`] and
//! [`codec`] modules for chunk-level or payload-level access.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

pub mod codec;
pub mod container;
mod error;
mod limits;
mod record;
/// Embed, extract and strip sticker metadata.
pub mod sticker;

// Byte-level helpers shared by the container and codec
mod slice_reader;
mod vec_writer;

pub use container::{Chunk, FourCc, WebPContainer};
pub use error::{Result, StickerError};
pub use limits::Limits;
pub use record::{DEFAULT_QUALITY, MAX_QUALITY, StickerMetadata, StickerMetadataBuilder};
pub use sticker::{StickerCodec, embed, extract, extract_optional, strip};
