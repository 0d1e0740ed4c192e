//! PDF rasterisation: render single pages to `DynamicImage` via pdfium.
//!
//! ## Why a uniform zoom scalar?
//!
//! PDF pages have an intrinsic size in points (1/72 inch). A single zoom
//! factor scales both axes, so aspect ratio is preserved by construction —
//! there is no independent x/y scaling anywhere in the pipeline. At zoom
//! 1.0 a US-Letter page renders at 612 × 792 px.
//!
//! ## Blocking by design
//!
//! pdfium is a C++ library with thread-local state; it is not safe to call
//! from async contexts. Everything here is synchronous — the public entry
//! points in [`crate::convert`] move whole-document runs onto
//! `tokio::task::spawn_blocking`.

use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::debug;

use crate::error::ConvertError;

/// Open a PDF from in-memory bytes, mapping pdfium failures onto the error
/// taxonomy (password vs corruption).
///
/// The returned document borrows `pdfium` and is released by `Drop` on
/// every exit path, including mid-document aborts.
pub fn open_document<'a>(
    pdfium: &'a Pdfium,
    bytes: &'a [u8],
    name: &str,
    password: Option<&str>,
) -> Result<PdfDocument<'a>, ConvertError> {
    pdfium
        .load_pdf_from_byte_slice(bytes, password)
        .map_err(|e| {
            let err_str = format!("{e:?}");
            if err_str.contains("Password") || err_str.contains("password") {
                if password.is_some() {
                    ConvertError::WrongPassword {
                        name: name.to_string(),
                    }
                } else {
                    ConvertError::PasswordRequired {
                        name: name.to_string(),
                    }
                }
            } else {
                ConvertError::CorruptDocument {
                    name: name.to_string(),
                    detail: err_str,
                }
            }
        })
}

/// Rasterise one page at `zoom`.
///
/// `page_num` is the 1-indexed page number, used only for error context.
/// Output dimensions are the page's point size scaled by `zoom` on both
/// axes, rounded to the nearest pixel (minimum 1 × 1).
pub fn render_page(
    page: &PdfPage<'_>,
    zoom: f32,
    name: &str,
    page_num: usize,
) -> Result<DynamicImage, ConvertError> {
    let width_px = (page.width().value * zoom).round().max(1.0) as i32;
    let height_px = (page.height().value * zoom).round().max(1.0) as i32;

    let render_config = PdfRenderConfig::new()
        .set_target_width(width_px)
        .set_target_height(height_px);

    let bitmap =
        page.render_with_config(&render_config)
            .map_err(|e| ConvertError::PageRenderFailed {
                name: name.to_string(),
                page: page_num,
                detail: format!("{e:?}"),
            })?;

    let image = bitmap.as_image();
    debug!(
        "Rendered page {} of '{}' at zoom {} → {}x{} px",
        page_num,
        name,
        zoom,
        image.width(),
        image.height()
    );

    Ok(image)
}
