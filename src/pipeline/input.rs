//! Input classification: decide whether raw bytes are a PDF or an image.
//!
//! Callers hand the pipeline a blob and a display name; nothing about the
//! name is trusted. Classification is by magic bytes only, so a `.png`
//! that is really a PDF still goes down the document pipeline and a
//! misnamed screenshot still decodes. Unrecognised bytes fail here, before
//! any pdfium or decoder work, with the first bytes included for
//! diagnosis.

use std::path::Path;

use crate::error::ConvertError;

/// What kind of input a blob was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A paginated PDF document.
    Pdf,
    /// A standalone raster image (PNG, JPEG, GIF or WebP).
    Image,
}

/// Classify `bytes`, or fail with [`ConvertError::UnsupportedFormat`].
pub fn classify(name: &str, bytes: &[u8]) -> Result<InputKind, ConvertError> {
    detect_kind(bytes).ok_or_else(|| {
        let mut magic = [0u8; 4];
        let n = bytes.len().min(4);
        magic[..n].copy_from_slice(&bytes[..n]);
        ConvertError::UnsupportedFormat {
            name: name.to_string(),
            magic,
        }
    })
}

/// Magic-byte sniffing. Returns `None` for unrecognised content.
pub fn detect_kind(bytes: &[u8]) -> Option<InputKind> {
    if bytes.starts_with(b"%PDF") {
        return Some(InputKind::Pdf);
    }
    if bytes.starts_with(&[0x89, b'P', b'N', b'G'])
        || bytes.starts_with(&[0xff, 0xd8, 0xff])
        || bytes.starts_with(b"GIF87a")
        || bytes.starts_with(b"GIF89a")
    {
        return Some(InputKind::Image);
    }
    // WebP: RIFF container with a WEBP fourcc at offset 8.
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some(InputKind::Image);
    }
    None
}

/// Read a local file into memory, mapping I/O failures onto the error
/// taxonomy (missing file vs permission vs everything else).
pub fn read_file(path: &Path) -> Result<Vec<u8>, ConvertError> {
    if !path.exists() {
        return Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => ConvertError::PermissionDenied {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::NotFound => ConvertError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ConvertError::Internal(format!("Failed to read '{}': {e}", path.display())),
    })
}

/// Display name for a path: the file name, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
