//! Sticker metadata record and its builder.
//!
//! [`StickerMetadata`] is the value embedded into and extracted from a
//! sticker. Construct it with [`StickerMetadata::builder`], which applies the
//! crate's default table exactly once when the record is finalized.
//!
//! # Example
//!
//! ```rust
//! use zensticker::StickerMetadata;
//!
//! let meta = StickerMetadata::builder()
//!     .pack("Cats")
//!     .author("me")
//!     .category(["😂", "😹"])
//!     .build(|| "generated-id".into());
//!
//! assert_eq!(meta.id, "generated-id");
//! assert_eq!(meta.quality, zensticker::DEFAULT_QUALITY);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

/// Quality stored when none is given.
pub const DEFAULT_QUALITY: u8 = 30;

/// Highest accepted quality; larger values are clamped.
pub const MAX_QUALITY: u8 = 100;

/// Metadata attached to a single sticker.
///
/// `category` holds emoji in display order. It is not a set: order is kept
/// and duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerMetadata {
    /// Sticker pack name (`sticker-pack-name` on the wire).
    pub pack: String,
    /// Pack publisher (`sticker-pack-publisher`).
    pub author: String,
    /// Pack identifier (`sticker-pack-id`).
    pub id: String,
    /// Emoji categories (`emojis`).
    pub category: Vec<String>,
    /// Encoding quality hint, 0–100 (`sticker-quality`).
    pub quality: u8,
    /// Background color (`sticker-background`), omitted when `None`.
    pub background: Option<String>,
}

impl StickerMetadata {
    /// Start building a record.
    #[must_use]
    pub fn builder() -> StickerMetadataBuilder {
        StickerMetadataBuilder::default()
    }
}

/// Builder for [`StickerMetadata`].
///
/// Unset fields are filled from one default table in [`build`](Self::build):
///
/// | field | default |
/// |-------|---------|
/// | pack, author | `""` |
/// | id | result of the caller's generator |
/// | category | empty |
/// | quality | [`DEFAULT_QUALITY`], clamped to [`MAX_QUALITY`] |
/// | background | `None` (an empty string also means `None`) |
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct StickerMetadataBuilder {
    pack: Option<String>,
    author: Option<String>,
    id: Option<String>,
    category: Option<Vec<String>>,
    quality: Option<u32>,
    background: Option<String>,
}

impl StickerMetadataBuilder {
    /// Set the pack name.
    pub fn pack(mut self, pack: impl Into<String>) -> Self {
        self.pack = Some(pack.into());
        self
    }

    /// Set the pack publisher.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the pack identifier. An empty id is treated as unset.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the emoji categories, in display order.
    pub fn category<I, S>(mut self, category: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category = Some(category.into_iter().map(Into::into).collect());
        self
    }

    /// Set the quality hint. Values above [`MAX_QUALITY`] are clamped.
    pub fn quality(mut self, quality: u32) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Set the background color.
    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Finalize the record, calling `default_id` only if no usable id was set.
    pub fn build(self, default_id: impl FnOnce() -> String) -> StickerMetadata {
        StickerMetadata {
            pack: self.pack.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            id: self.id.filter(|id| !id.is_empty()).unwrap_or_else(default_id),
            category: self.category.unwrap_or_default(),
            quality: clamp_quality(self.quality.map_or(u64::from(DEFAULT_QUALITY), u64::from)),
            background: self.background.filter(|bg| !bg.is_empty()),
        }
    }
}

pub(crate) fn clamp_quality(quality: u64) -> u8 {
    quality.min(u64::from(MAX_QUALITY)) as u8
}
