//! Configurable limits for container parsing and metadata decoding.
//!
//! These limits protect against malformed or hostile inputs that could cause
//! excessive memory usage while a sticker is being re-muxed.

use alloc::format;

use crate::error::{Result, StickerError};

/// Configuration for parse and decode limits.
///
/// All limits are optional; `None` means unlimited.
///
/// # Example
///
/// ```rust
/// use zensticker::Limits;
///
/// // Start with defaults and customize
/// let limits = Limits::default()
///     .max_input_size(8 * 1024 * 1024)
///     .max_metadata_size(64 * 1024);
///
/// // Or start with no limits for trusted inputs
/// let unlimited = Limits::none();
/// # let _ = (limits, unlimited);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Limits {
    /// Maximum container size in bytes.
    pub max_input_size: Option<u64>,

    /// Maximum number of top-level chunks.
    pub max_chunk_count: Option<u64>,

    /// Maximum size of the JSON text inside a metadata payload.
    pub max_metadata_size: Option<u64>,
}

impl Default for Limits {
    /// Default limits suitable for server-side use.
    ///
    /// - Max input size: 100 MB
    /// - Max chunks: 10,000
    /// - Max metadata JSON: 1 MB
    fn default() -> Self {
        Self {
            max_input_size: Some(100 * 1024 * 1024),
            max_chunk_count: Some(10_000),
            max_metadata_size: Some(1024 * 1024),
        }
    }
}

impl Limits {
    /// Create limits with no restrictions.
    ///
    /// **Warning**: Only use this for trusted inputs!
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_input_size: None,
            max_chunk_count: None,
            max_metadata_size: None,
        }
    }

    /// Set maximum container size in bytes.
    #[must_use]
    pub fn max_input_size(mut self, bytes: u64) -> Self {
        self.max_input_size = Some(bytes);
        self
    }

    /// Set maximum chunk count.
    #[must_use]
    pub fn max_chunk_count(mut self, count: u64) -> Self {
        self.max_chunk_count = Some(count);
        self
    }

    /// Set maximum metadata JSON size in bytes.
    #[must_use]
    pub fn max_metadata_size(mut self, bytes: u64) -> Self {
        self.max_metadata_size = Some(bytes);
        self
    }

    /// Check if the container size is within limits.
    pub fn check_input_size(&self, size: usize) -> Result<()> {
        if let Some(max) = self.max_input_size {
            if size as u64 > max {
                return Err(StickerError::LimitExceeded(format!(
                    "input size {size} bytes exceeds limit {max} bytes"
                )));
            }
        }
        Ok(())
    }

    /// Check if the number of chunks parsed so far is within limits.
    pub fn check_chunk_count(&self, count: usize) -> Result<()> {
        if let Some(max) = self.max_chunk_count {
            if count as u64 > max {
                return Err(StickerError::LimitExceeded(format!(
                    "chunk count {count} exceeds limit {max}"
                )));
            }
        }
        Ok(())
    }

    /// Check if a metadata JSON body is within limits.
    pub fn check_metadata_size(&self, size: usize) -> Result<()> {
        if let Some(max) = self.max_metadata_size {
            if size as u64 > max {
                return Err(StickerError::LimitExceeded(format!(
                    "metadata size {size} bytes exceeds limit {max} bytes"
                )));
            }
        }
        Ok(())
    }
}
