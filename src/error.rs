//! Error types for the pagepack library.
//!
//! One error type, one failure domain: [`ConvertError`] describes why a
//! single input (one PDF or one image) could not be converted. A corrupt
//! page aborts the whole document it belongs to — partial documents are
//! never emitted — but it never aborts the rest of a batch; batch entry
//! points return a `Result` per input so callers can report each failure
//! with its item name and continue with the survivors.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pagepack library.
///
/// Each variant carries enough context (item name, page number, reason) for
/// a caller to decide whether to retry the input at a lower quality tier.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input bytes match neither a PDF nor a supported image format.
    #[error("Unsupported input '{name}': not a PDF or a PNG/JPEG/GIF/WebP image (first bytes: {magic:02x?})")]
    UnsupportedFormat { name: String, magic: [u8; 4] },

    // ── Document errors ───────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("Document '{name}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptDocument { name: String, detail: String },

    /// PDF requires a password but none was provided.
    #[error("Document '{name}' is encrypted and requires a password.")]
    PasswordRequired { name: String },

    /// A password was provided but it is wrong.
    #[error("Wrong password for document '{name}'")]
    WrongPassword { name: String },

    /// The document opened cleanly but contains no pages.
    #[error("Document '{name}' has no pages")]
    EmptyDocument { name: String },

    /// A page could not be rasterised. Aborts the whole document: no
    /// partial payload sequence is emitted for it.
    #[error("Document '{name}': rasterisation failed for page {page}: {detail}")]
    PageRenderFailed {
        name: String,
        /// 1-indexed page number.
        page: usize,
        detail: String,
    },

    /// A composite canvas would exceed the configured pixel budget.
    ///
    /// Extreme zoom × extreme pages-per-group can demand gigapixel
    /// allocations; the limit turns that into a document-level error
    /// instead of an OOM kill. Retry with a lower quality tier.
    #[error("Document '{name}': composite canvas {width}x{height} exceeds the {limit}-pixel budget\nRetry with a lower quality tier.")]
    CanvasTooLarge {
        name: String,
        width: u64,
        height: u64,
        limit: u64,
    },

    // ── Image errors ──────────────────────────────────────────────────────
    /// Standalone image bytes could not be decoded.
    #[error("Image '{name}' could not be decoded: {detail}")]
    ImageDecodeFailed { name: String, detail: String },

    /// JPEG encoding of a finished canvas failed.
    #[error("JPEG encoding failed for '{name}': {detail}")]
    JpegEncodeFailed { name: String, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder or boundary validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
PDFium is normally downloaded automatically on first run.\n\
If the auto-download failed, you can:\n\
  • Check your internet connection and try again.\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_render_failed_display() {
        let e = ConvertError::PageRenderFailed {
            name: "report.pdf".into(),
            page: 3,
            detail: "bad content stream".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("report.pdf"), "got: {msg}");
        assert!(msg.contains("page 3"), "got: {msg}");
    }

    #[test]
    fn canvas_too_large_display() {
        let e = ConvertError::CanvasTooLarge {
            name: "atlas.pdf".into(),
            width: 20_000,
            height: 180_000,
            limit: 100_000_000,
        };
        let msg = e.to_string();
        assert!(msg.contains("20000x180000"));
        assert!(msg.contains("lower quality tier"));
    }

    #[test]
    fn unsupported_format_display() {
        let e = ConvertError::UnsupportedFormat {
            name: "blob.bin".into(),
            magic: [0xde, 0xad, 0xbe, 0xef],
        };
        assert!(e.to_string().contains("blob.bin"));
    }

    #[test]
    fn invalid_config_display() {
        let e = ConvertError::InvalidConfig("JPEG quality must be 1–100".into());
        assert!(e.to_string().contains("Invalid configuration"));
    }
}
