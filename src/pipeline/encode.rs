//! JPEG encoding: finished RGB canvas → byte buffer.
//!
//! The pipelines emit JPEG regardless of the original format: rendered
//! pages and composited groups are photographic-scale rasters where JPEG's
//! small, visually-lossless quality loss buys a large, predictable payload
//! reduction — the thing that keeps attachments inside a vision API's
//! request budget. Callers must normalise to opaque RGB first
//! ([`crate::pipeline::normalize`]); JPEG has no alpha channel.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use tracing::debug;

use crate::error::ConvertError;

/// Encode an opaque RGB canvas as JPEG at `quality` (1–100).
pub fn encode_jpeg(img: &RgbImage, quality: u8, name: &str) -> Result<Vec<u8>, ConvertError> {
    let mut buf = Vec::new();
    let mut cursor = Cursor::new(&mut buf);
    let encoder = JpegEncoder::new_with_quality(&mut cursor, quality);

    img.write_with_encoder(encoder)
        .map_err(|e| ConvertError::JpegEncodeFailed {
            name: name.to_string(),
            detail: e.to_string(),
        })?;

    debug!(
        "Encoded {}x{} canvas → {} JPEG bytes (q={})",
        img.width(),
        img.height(),
        buf.len(),
        quality
    );

    Ok(buf)
}
