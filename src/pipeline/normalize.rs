//! Colour normalisation: force any decoded raster into opaque 3-channel RGB.
//!
//! JPEG has no alpha channel. Encoding an RGBA buffer without flattening
//! does not fail loudly — it silently produces black or garbage regions
//! where the transparency was. Normalisation is therefore a mandatory
//! pre-encode step for both pipelines, not an optional filter: anything
//! with an alpha channel (RGBA, luminance-alpha, palette transparency —
//! decoders expand the latter to RGBA) is composited over an opaque white
//! canvas using the alpha value as the blend mask; everything else is a
//! plain channel conversion.

use image::{DynamicImage, Rgb, RgbImage};

/// Opaque white, the background every transparent region flattens onto.
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Normalise `img` to opaque RGB, same dimensions.
///
/// Idempotent: an already-opaque RGB image is returned unchanged,
/// pixel for pixel.
pub fn flatten_to_rgb(img: DynamicImage) -> RgbImage {
    match img {
        // Already canonical: hand the buffer back untouched.
        DynamicImage::ImageRgb8(rgb) => rgb,
        img if img.color().has_alpha() => blend_over_white(&img.into_rgba8()),
        // No transparency involved: plain conversion is enough.
        img => img.to_rgb8(),
    }
}

/// Composite an RGBA buffer over an opaque white canvas.
///
/// Per channel: `out = (src·α + 255·(255−α)) / 255`, rounded. A fully
/// opaque pixel keeps its colour exactly; a fully transparent one becomes
/// pure white.
fn blend_over_white(rgba: &image::RgbaImage) -> RgbImage {
    let mut out = RgbImage::new(rgba.width(), rgba.height());

    for (src, dst) in rgba.pixels().zip(out.pixels_mut()) {
        let a = src.0[3] as u32;
        let inv = 255 - a;
        dst.0 = [
            ((src.0[0] as u32 * a + 255 * inv + 127) / 255) as u8,
            ((src.0[1] as u32 * a + 255 * inv + 127) / 255) as u8,
            ((src.0[2] as u32 * a + 255 * inv + 127) / 255) as u8,
        ];
    }

    out
}
