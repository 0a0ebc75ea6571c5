//! Sticker metadata payload codec.
//!
//! Converts a [`StickerMetadata`] record to and from the bytes stored inside
//! the `EXIF` chunk.
//!
//! # Wire format
//!
//! Encoding always produces the canonical form: a 22-byte Exif shim followed
//! by compact JSON.
//!
//! ```text
//! offset  size  field
//!      0     6  "Exif\0\0"
//!      6     2  byte order "II" (0x4949)
//!      8     2  TIFF marker 0x002A
//!     10     4  IFD offset, always 8
//!     14     4  JSON length (u32)
//!     18     4  zero
//!     22     n  UTF-8 JSON
//! ```
//!
//! Decoding also accepts the layouts older sticker tools produced:
//!
//! - the canonical shim behind a JPEG APP1 marker (`FF E1` + length);
//! - a big-endian (`"MM"`) shim;
//! - a bare TIFF IFD (`II*\0` or `MM\0*`) whose single entry points at the JSON;
//! - raw JSON with no header at all.
//!
//! In every case the JSON text is trimmed to the span from the first `{` to
//! the last `}`, so trailing garbage is ignored.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StickerError};
use crate::limits::Limits;
use crate::record::{DEFAULT_QUALITY, StickerMetadata, clamp_quality};
use crate::slice_reader::SliceReader;
use crate::vec_writer::VecWriter;

/// Leading magic of the canonical payload.
pub const EXIF_MAGIC: &[u8; 6] = b"Exif\0\0";

/// Length of the canonical header preceding the JSON text.
pub const HEADER_LEN: usize = 22;

const JSON_LENGTH_OFFSET: usize = 14;
const BYTE_ORDER_LE: u16 = 0x4949;
const BYTE_ORDER_BE: u16 = 0x4D4D;
const TIFF_MARKER: u16 = 0x002A;
const IFD_OFFSET: u32 = 8;
const APP1_MARKER: [u8; 2] = [0xFF, 0xE1];

/// Canonical JSON layout. Field order here is the key order on the wire.
#[derive(Serialize)]
struct WireRecord<'a> {
    #[serde(rename = "sticker-pack-name")]
    pack: &'a str,
    #[serde(rename = "sticker-pack-publisher")]
    author: &'a str,
    #[serde(rename = "sticker-pack-id")]
    id: &'a str,
    #[serde(rename = "emojis")]
    category: &'a [String],
    #[serde(rename = "sticker-quality")]
    quality: u8,
    #[serde(rename = "sticker-background", skip_serializing_if = "Option::is_none")]
    background: Option<&'a str>,
}

/// Everything a historical payload might contain. Wire names take precedence
/// over the internal names some producers merged into the object.
#[derive(Deserialize, Default)]
#[serde(default)]
struct LenientRecord {
    #[serde(rename = "sticker-pack-name")]
    wire_pack: Option<String>,
    #[serde(rename = "sticker-pack-publisher")]
    wire_author: Option<String>,
    #[serde(rename = "sticker-pack-id")]
    wire_id: Option<String>,
    #[serde(rename = "emojis")]
    wire_category: Option<Vec<String>>,
    #[serde(rename = "sticker-quality")]
    wire_quality: Option<LenientQuality>,
    #[serde(rename = "sticker-background")]
    wire_background: Option<String>,
    pack: Option<String>,
    author: Option<String>,
    id: Option<String>,
    category: Option<Vec<String>>,
    quality: Option<LenientQuality>,
    background: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientQuality {
    Int(u64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl LenientQuality {
    fn resolve(self) -> Option<u8> {
        match self {
            Self::Int(q) => Some(clamp_quality(q)),
            Self::Float(q) => float_quality(q),
            Self::Text(s) => s.trim().parse::<f64>().ok().and_then(float_quality),
            Self::Other(_) => None,
        }
    }
}

fn float_quality(q: f64) -> Option<u8> {
    q.is_finite().then(|| clamp_quality(q.max(0.0) as u64))
}

impl LenientRecord {
    fn into_record(self) -> StickerMetadata {
        StickerMetadata {
            pack: self.wire_pack.or(self.pack).unwrap_or_default(),
            author: self.wire_author.or(self.author).unwrap_or_default(),
            id: self.wire_id.or(self.id).unwrap_or_default(),
            category: self.wire_category.or(self.category).unwrap_or_default(),
            quality: self
                .wire_quality
                .and_then(LenientQuality::resolve)
                .or_else(|| self.quality.and_then(LenientQuality::resolve))
                .unwrap_or(DEFAULT_QUALITY),
            background: self
                .wire_background
                .or(self.background)
                .filter(|bg| !bg.is_empty()),
        }
    }
}

/// Encode a record into the canonical payload.
///
/// Output is byte-for-byte reproducible for equal records and carries no
/// padding of its own.
pub fn encode(meta: &StickerMetadata) -> Result<Vec<u8>> {
    let wire = WireRecord {
        pack: &meta.pack,
        author: &meta.author,
        id: &meta.id,
        category: &meta.category,
        quality: meta.quality,
        background: meta.background.as_deref(),
    };
    let json = serde_json::to_vec(&wire).map_err(|e| StickerError::Encode(e.to_string()))?;
    let json_len = u32::try_from(json.len()).map_err(|_| {
        StickerError::LimitExceeded(format!("metadata JSON of {} bytes", json.len()))
    })?;

    let mut out = Vec::with_capacity(HEADER_LEN + json.len());
    out.write_all(EXIF_MAGIC);
    out.write_u16_le(BYTE_ORDER_LE);
    out.write_u16_le(TIFF_MARKER);
    out.write_u32_le(IFD_OFFSET);
    out.write_u32_le(json_len);
    out.write_u32_le(0);
    out.write_all(&json);
    Ok(out)
}

/// Decode a metadata payload with default limits.
pub fn decode(payload: &[u8]) -> Result<StickerMetadata> {
    decode_with_limits(payload, &Limits::default())
}

/// Decode a metadata payload in any recognized layout.
///
/// Fields missing from the JSON take their defaults: empty strings, no
/// categories, [`DEFAULT_QUALITY`], no background.
///
/// # Errors
///
/// - [`StickerError::Decode`] if a header is malformed, no `{…}` span exists,
///   or the span is not a valid JSON object of the expected shape.
/// - [`StickerError::LimitExceeded`] if the JSON exceeds
///   [`Limits::max_metadata_size`].
pub fn decode_with_limits(payload: &[u8], limits: &Limits) -> Result<StickerMetadata> {
    let text = json_text(payload)?;
    let json = json_span(text)
        .ok_or_else(|| StickerError::Decode("no JSON object in metadata payload".into()))?;
    limits.check_metadata_size(json.len())?;

    let lenient: LenientRecord =
        serde_json::from_slice(json).map_err(|e| StickerError::Decode(e.to_string()))?;
    Ok(lenient.into_record())
}

/// Locate the JSON text inside a payload, stripping whichever header it has.
///
/// Only a payload starting with [`EXIF_MAGIC`] must carry a valid header.
/// The other layouts fall back to the whole payload when their header does
/// not line up, so the `{…}` trim still gets a chance.
fn json_text(payload: &[u8]) -> Result<&[u8]> {
    if payload.starts_with(EXIF_MAGIC) {
        return exif_json(payload);
    }

    // APP1 marker, then a 2-byte segment length.
    let app1_body = payload
        .strip_prefix(&APP1_MARKER)
        .and_then(|rest| rest.get(2..))
        .filter(|rest| rest.starts_with(EXIF_MAGIC));
    let headed = if let Some(body) = app1_body {
        tracing::debug!("Skipping APP1 marker before Exif header");
        exif_json(body).ok()
    } else if payload.starts_with(b"II*\0") || payload.starts_with(b"MM\0*") {
        tracing::debug!("Decoding bare TIFF metadata payload");
        tiff_json(payload)
    } else {
        None
    };

    Ok(headed.unwrap_or_else(|| {
        tracing::debug!("No usable Exif header, decoding payload as raw JSON");
        payload
    }))
}

fn exif_json(body: &[u8]) -> Result<&[u8]> {
    if body.len() < HEADER_LEN {
        return Err(StickerError::Decode(format!(
            "Exif header truncated: {} of {HEADER_LEN} bytes",
            body.len()
        )));
    }
    let mut r = SliceReader::at(body, EXIF_MAGIC.len());
    let big_endian = r.read_u16_le() == Some(BYTE_ORDER_BE);
    let mut r = SliceReader::at(body, JSON_LENGTH_OFFSET);
    let len = if big_endian { r.read_u32_be() } else { r.read_u32_le() };
    let len = len.ok_or_else(|| StickerError::Decode("Exif header truncated".into()))?;
    slice_json(body, HEADER_LEN, len)
}

/// Single-entry IFD: entry count at 8, then tag/type at 10, count at 14 and
/// value offset at 18, both relative to the TIFF header.
fn tiff_json(body: &[u8]) -> Option<&[u8]> {
    let big_endian = body.starts_with(b"MM");
    let mut r = SliceReader::at(body, JSON_LENGTH_OFFSET);
    let (len, offset) = if big_endian {
        (r.read_u32_be()?, r.read_u32_be()?)
    } else {
        (r.read_u32_le()?, r.read_u32_le()?)
    };
    slice_json(body, offset as usize, len).ok()
}

fn slice_json(body: &[u8], start: usize, len: u32) -> Result<&[u8]> {
    start
        .checked_add(len as usize)
        .and_then(|end| body.get(start..end))
        .ok_or_else(|| {
            StickerError::Decode(format!(
                "declared JSON length {len} at offset {start} exceeds payload of {} bytes",
                body.len()
            ))
        })
}

/// The bytes from the first `{` through the last `}`.
fn json_span(text: &[u8]) -> Option<&[u8]> {
    let start = text.iter().position(|&b| b == b'{')?;
    let end = text.iter().rposition(|&b| b == b'}')?;
    (start < end).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> StickerMetadata {
        StickerMetadata {
            pack: "test".into(),
            author: "test".into(),
            id: "test".into(),
            category: vec!["😂".into(), "😹".into()],
            quality: 100,
            background: None,
        }
    }

    #[test]
    fn canonical_header_layout() {
        let payload = encode(&sample()).unwrap();
        assert_eq!(&payload[0..6], b"Exif\0\0");
        assert_eq!(&payload[6..8], b"II");
        assert_eq!(&payload[8..10], &[0x2A, 0x00]);
        assert_eq!(&payload[10..14], &8u32.to_le_bytes());
        let len = u32::from_le_bytes(payload[14..18].try_into().unwrap()) as usize;
        assert_eq!(&payload[18..22], &[0; 4]);
        assert_eq!(payload.len(), HEADER_LEN + len);
    }

    #[test]
    fn json_key_order_is_fixed() {
        let mut meta = sample();
        meta.background = Some("red".into());
        let payload = encode(&meta).unwrap();
        let json = core::str::from_utf8(&payload[HEADER_LEN..]).unwrap();
        assert_eq!(
            json,
            r#"{"sticker-pack-name":"test","sticker-pack-publisher":"test","sticker-pack-id":"test","emojis":["😂","😹"],"sticker-quality":100,"sticker-background":"red"}"#
        );
    }

    #[test]
    fn absent_background_omits_key() {
        let payload = encode(&sample()).unwrap();
        let json = core::str::from_utf8(&payload[HEADER_LEN..]).unwrap();
        assert!(!json.contains("sticker-background"));
    }

    #[test]
    fn encode_is_reproducible() {
        assert_eq!(encode(&sample()).unwrap(), encode(&sample()).unwrap());
    }

    #[test]
    fn decode_inverts_encode() {
        let meta = sample();
        assert_eq!(decode(&encode(&meta).unwrap()).unwrap(), meta);

        let mut with_bg = sample();
        with_bg.background = Some("#00000000".into());
        assert_eq!(decode(&encode(&with_bg).unwrap()).unwrap(), with_bg);
    }

    #[test]
    fn legacy_raw_json() {
        let payload = br#"  {"sticker-pack-name":"raw","emojis":["a","b"]}"#;
        let meta = decode(payload).unwrap();
        assert_eq!(meta.pack, "raw");
        assert_eq!(meta.author, "");
        assert_eq!(meta.id, "");
        assert_eq!(meta.category, ["a", "b"]);
        assert_eq!(meta.quality, DEFAULT_QUALITY);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        let mut payload = encode(&sample()).unwrap();
        // Declared length covers the garbage too, as some producers did.
        payload.extend_from_slice(b"\0\0\xff");
        let len = (payload.len() - HEADER_LEN) as u32;
        payload[14..18].copy_from_slice(&len.to_le_bytes());
        assert_eq!(decode(&payload).unwrap(), sample());

        let raw = b"{\"sticker-pack-id\":\"x\"}\x00\x01garbage";
        assert_eq!(decode(raw).unwrap().id, "x");
    }

    #[test]
    fn app1_prefixed_header() {
        let canonical = encode(&sample()).unwrap();
        let mut payload = APP1_MARKER.to_vec();
        payload.extend_from_slice(&((2 + canonical.len()) as u16).to_be_bytes());
        payload.extend_from_slice(&canonical);
        assert_eq!(decode(&payload).unwrap(), sample());
    }

    #[test]
    fn big_endian_header() {
        let json = br#"{"sticker-pack-id":"be"}"#;
        let mut payload = EXIF_MAGIC.to_vec();
        payload.extend_from_slice(b"MM\x00\x2A\x00\x00\x00\x08");
        payload.extend_from_slice(&(json.len() as u32).to_be_bytes());
        payload.extend_from_slice(&[0; 4]);
        payload.extend_from_slice(json);
        assert_eq!(decode(&payload).unwrap().id, "be");
    }

    #[test]
    fn bare_tiff_ifd() {
        let json = br#"{"sticker-pack-name":"tiff","sticker-quality":50}"#;
        let mut payload = b"II*\x00\x08\x00\x00\x00\x01\x00\x41\x57\x07\x00".to_vec();
        payload.extend_from_slice(&(json.len() as u32).to_le_bytes());
        payload.extend_from_slice(&22u32.to_le_bytes());
        payload.extend_from_slice(json);
        let meta = decode(&payload).unwrap();
        assert_eq!(meta.pack, "tiff");
        assert_eq!(meta.quality, 50);
    }

    #[test]
    fn inconsistent_tiff_header_falls_back_to_raw_json() {
        let json = br#"{"sticker-pack-id":"x"}"#;
        let mut payload = b"II*\x00\x08\x00\x00\x00\x01\x00\x41\x57\x07\x00".to_vec();
        payload.extend_from_slice(&0x00FF_FFFFu32.to_le_bytes());
        payload.extend_from_slice(&22u32.to_le_bytes());
        payload.extend_from_slice(json);
        assert_eq!(decode(&payload).unwrap().id, "x");

        // Too short to hold the IFD entry at all.
        assert_eq!(decode(b"MM\0*{\"sticker-pack-id\":\"y\"}").unwrap().id, "y");
    }

    #[test]
    fn inconsistent_app1_header_falls_back_to_raw_json() {
        let mut payload = APP1_MARKER.to_vec();
        payload.extend_from_slice(&[0, 0]);
        payload.extend_from_slice(EXIF_MAGIC);
        payload.extend_from_slice(b"II\x2A\x00\x08\x00\x00\x00\xff\xff\x00\x00\x00\x00\x00\x00");
        payload.extend_from_slice(br#"{"sticker-pack-id":"app1"}"#);
        assert_eq!(decode(&payload).unwrap().id, "app1");
    }

    #[test]
    fn internal_key_names_are_fallbacks() {
        let payload = br#"{"pack":"p","author":"a","id":"i","category":["x"],"quality":"30","sticker-pack-name":"wins"}"#;
        let meta = decode(payload).unwrap();
        assert_eq!(meta.pack, "wins");
        assert_eq!(meta.author, "a");
        assert_eq!(meta.id, "i");
        assert_eq!(meta.category, ["x"]);
        assert_eq!(meta.quality, 30);
    }

    #[test]
    fn lenient_quality_and_nulls() {
        let meta = decode(br#"{"sticker-pack-id":null,"sticker-quality":"75"}"#).unwrap();
        assert_eq!(meta.id, "");
        assert_eq!(meta.quality, 75);

        assert_eq!(decode(br#"{"sticker-quality":512}"#).unwrap().quality, 100);
        assert_eq!(decode(br#"{"sticker-quality":-4}"#).unwrap().quality, 0);
        assert_eq!(decode(br#"{"sticker-quality":12.9}"#).unwrap().quality, 12);
        assert_eq!(
            decode(br#"{"sticker-quality":true}"#).unwrap().quality,
            DEFAULT_QUALITY
        );
    }

    #[test]
    fn empty_background_decodes_as_none() {
        let meta = decode(br#"{"sticker-background":""}"#).unwrap();
        assert_eq!(meta.background, None);
    }

    #[test]
    fn no_object_is_decode_error() {
        assert!(matches!(decode(b"no json here"), Err(StickerError::Decode(_))));
        assert!(matches!(decode(b"} backwards {"), Err(StickerError::Decode(_))));
        assert!(matches!(decode(b""), Err(StickerError::Decode(_))));
    }

    #[test]
    fn invalid_json_is_decode_error() {
        assert!(matches!(decode(b"{not json}"), Err(StickerError::Decode(_))));
        assert!(matches!(
            decode(br#"{"emojis":"not a list"}"#),
            Err(StickerError::Decode(_))
        ));
    }

    #[test]
    fn malformed_header_is_decode_error() {
        assert!(matches!(decode(b"Exif\0\0II*\0"), Err(StickerError::Decode(_))));

        let mut payload = encode(&sample()).unwrap();
        payload[14..18].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(decode(&payload), Err(StickerError::Decode(_))));
    }

    #[test]
    fn metadata_limit_applies_to_json() {
        let payload = encode(&sample()).unwrap();
        let limits = Limits::none().max_metadata_size(16);
        assert!(matches!(
            decode_with_limits(&payload, &limits),
            Err(StickerError::LimitExceeded(_))
        ));
    }
}
