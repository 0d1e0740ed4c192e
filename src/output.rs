//! Output types: encoded payloads, per-document results, batch results.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use crate::error::ConvertError;

/// One JPEG-encoded output image plus its human-readable caption.
///
/// The unit of output of both pipelines. Ownership of the bytes transfers
/// to the caller; the payload is immutable once produced and ready for
/// direct binary submission or base64 transport to a vision API.
#[derive(Debug, Clone, Serialize)]
pub struct EncodedPayload {
    /// Caption for the attachment, e.g. `"report.pdf - Pages 5-8"` or the
    /// original filename for a standalone image.
    pub caption: String,

    /// JPEG bytes. Skipped in serialised manifests; use
    /// [`EncodedPayload::to_base64`] when the wire format needs the data
    /// inline.
    #[serde(skip_serializing)]
    pub bytes: Vec<u8>,

    /// Pixel width of the encoded image.
    pub width: u32,

    /// Pixel height of the encoded image.
    pub height: u32,

    /// 1-based inclusive page range this payload covers, when the source
    /// was a paginated document. `None` for standalone images.
    pub page_range: Option<(usize, usize)>,
}

impl EncodedPayload {
    /// Encoded JPEG size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the payload holds no bytes (never produced by the
    /// pipeline; present for completeness).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Base64 rendition of the JPEG bytes, for APIs that take data URIs or
    /// inline base64 attachments.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Timing and size statistics for one converted input.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConvertStats {
    /// Pages in the source document (1 for a standalone image).
    pub total_pages: usize,
    /// Payloads produced (page groups, or 1 for a standalone image).
    pub payload_count: usize,
    /// Sum of all payload byte lengths.
    pub total_payload_bytes: usize,
    /// Wall-clock rasterisation time.
    pub render_duration_ms: u64,
    /// Wall-clock composite + normalise + JPEG encode time.
    pub encode_duration_ms: u64,
}

/// The full result of converting one input: an ordered payload sequence
/// plus stats.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutput {
    /// The input's display name (filename), reused in captions.
    pub name: String,
    /// Payloads in page order; every page of the source appears in exactly
    /// one payload.
    pub payloads: Vec<EncodedPayload>,
    pub stats: ConvertStats,
}

/// Outcome of one input within a batch.
///
/// A batch never fails as a whole: each input carries its own
/// success-or-error so one corrupt document cannot take down its siblings.
#[derive(Debug)]
pub struct BatchItem {
    /// The input's display name.
    pub name: String,
    pub outcome: Result<DocumentOutput, ConvertError>,
}

/// Results for a whole batch, in input order.
#[derive(Debug, Default)]
pub struct BatchOutput {
    pub items: Vec<BatchItem>,
}

impl BatchOutput {
    /// Count of inputs that converted successfully.
    pub fn success_count(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_ok()).count()
    }

    /// Count of inputs that failed.
    pub fn failure_count(&self) -> usize {
        self.items.len() - self.success_count()
    }

    /// All payloads from successful inputs, flattened in input order.
    pub fn payloads(&self) -> impl Iterator<Item = &EncodedPayload> {
        self.items
            .iter()
            .filter_map(|i| i.outcome.as_ref().ok())
            .flat_map(|d| d.payloads.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(caption: &str, bytes: &[u8]) -> EncodedPayload {
        EncodedPayload {
            caption: caption.to_string(),
            bytes: bytes.to_vec(),
            width: 2,
            height: 2,
            page_range: None,
        }
    }

    #[test]
    fn base64_round_trip() {
        let p = payload("img.png", &[0xff, 0xd8, 0xff, 0xe0]);
        let decoded = STANDARD.decode(p.to_base64()).expect("valid base64");
        assert_eq!(decoded, p.bytes);
    }

    #[test]
    fn manifest_serialisation_skips_bytes() {
        let p = payload("doc.pdf - Page 1", b"jpegdata");
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("doc.pdf - Page 1"));
        assert!(!json.contains("jpegdata"));
        assert!(!json.contains("bytes"));
    }

    #[test]
    fn batch_counts_and_flattening() {
        let ok = DocumentOutput {
            name: "a.pdf".into(),
            payloads: vec![payload("a.pdf - Page 1", b"x"), payload("a.pdf - Page 2", b"y")],
            stats: ConvertStats::default(),
        };
        let batch = BatchOutput {
            items: vec![
                BatchItem {
                    name: "a.pdf".into(),
                    outcome: Ok(ok),
                },
                BatchItem {
                    name: "b.pdf".into(),
                    outcome: Err(ConvertError::EmptyDocument { name: "b.pdf".into() }),
                },
            ],
        };
        assert_eq!(batch.success_count(), 1);
        assert_eq!(batch.failure_count(), 1);
        assert_eq!(batch.payloads().count(), 2);
    }
}
