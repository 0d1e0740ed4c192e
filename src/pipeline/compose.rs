//! Composite building: stack a group's rendered pages into one canvas.
//!
//! Layout is deterministic: canvas width is the widest page, canvas height
//! the sum of page heights, background opaque white, pages pasted
//! top-to-bottom in input order with narrower pages centred horizontally
//! (floor division). Pages keep their rendered size — the composite never
//! rescales.

use image::{DynamicImage, Rgba, RgbaImage};

/// Canvas dimensions a group of images will stack into:
/// `(max width, Σ heights)`.
///
/// Returned as `u64` so callers can compare the area against a pixel
/// budget before any allocation happens.
pub fn stacked_dimensions(images: &[DynamicImage]) -> (u64, u64) {
    let width = images.iter().map(|i| i.width() as u64).max().unwrap_or(0);
    let height = images.iter().map(|i| i.height() as u64).sum();
    (width, height)
}

/// Stack `images` vertically onto an opaque white canvas.
///
/// A single-image group degenerates to an identity copy of that image on
/// its own canvas.
///
/// # Panics
/// `images` must be non-empty. Group partitioning never produces empty
/// groups, so an empty slice here is a caller contract violation.
pub fn stack_vertically(images: &[DynamicImage]) -> DynamicImage {
    assert!(!images.is_empty(), "cannot composite an empty page group");

    let (width, height) = stacked_dimensions(images);
    // Callers enforce the pixel budget before allocating; these casts only
    // hold below u32::MAX per axis.
    debug_assert!(width <= u64::from(u32::MAX), "canvas width exceeds u32");
    debug_assert!(height <= u64::from(u32::MAX), "canvas height exceeds u32");
    let mut canvas = RgbaImage::from_pixel(width as u32, height as u32, Rgba([255, 255, 255, 255]));

    let mut y_offset: i64 = 0;
    for img in images {
        let x_offset = ((width - img.width() as u64) / 2) as i64;
        image::imageops::overlay(&mut canvas, img, x_offset, y_offset);
        y_offset += img.height() as i64;
    }

    DynamicImage::ImageRgba8(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    #[test]
    fn canvas_is_max_width_by_summed_height() {
        let images = vec![
            solid(100, 40, [0, 0, 0, 255]),
            solid(60, 25, [0, 0, 0, 255]),
            solid(80, 35, [0, 0, 0, 255]),
        ];
        let composite = stack_vertically(&images);
        assert_eq!(composite.dimensions(), (100, 100));
    }

    #[test]
    fn pages_are_stacked_in_order_at_running_offsets() {
        let images = vec![
            solid(10, 4, [10, 0, 0, 255]),
            solid(10, 6, [0, 20, 0, 255]),
        ];
        let composite = stack_vertically(&images).to_rgb8();

        assert_eq!(composite.get_pixel(5, 0).0, [10, 0, 0]);
        assert_eq!(composite.get_pixel(5, 3).0, [10, 0, 0]);
        assert_eq!(composite.get_pixel(5, 4).0, [0, 20, 0]);
        assert_eq!(composite.get_pixel(5, 9).0, [0, 20, 0]);
    }

    #[test]
    fn narrower_pages_are_centred_with_floor_division() {
        // 7-wide page on a 10-wide canvas: x offset = (10 - 7) / 2 = 1.
        let images = vec![
            solid(10, 2, [1, 1, 1, 255]),
            solid(7, 2, [9, 9, 9, 255]),
        ];
        let composite = stack_vertically(&images).to_rgb8();

        assert_eq!(composite.get_pixel(0, 3).0, [255, 255, 255]);
        assert_eq!(composite.get_pixel(1, 3).0, [9, 9, 9]);
        assert_eq!(composite.get_pixel(7, 3).0, [9, 9, 9]);
        assert_eq!(composite.get_pixel(8, 3).0, [255, 255, 255]);
        assert_eq!(composite.get_pixel(9, 3).0, [255, 255, 255]);
    }

    #[test]
    fn single_image_is_an_identity_copy() {
        let img = solid(12, 8, [3, 5, 7, 255]);
        let composite = stack_vertically(std::slice::from_ref(&img));
        assert_eq!(composite.dimensions(), (12, 8));
        assert_eq!(composite.to_rgb8(), img.to_rgb8());
    }

    #[test]
    fn background_margins_are_white() {
        let images = vec![
            solid(20, 2, [0, 0, 0, 255]),
            solid(4, 2, [0, 0, 0, 255]),
        ];
        let composite = stack_vertically(&images).to_rgb8();
        // Margins beside the narrow page.
        for x in 0..8 {
            assert_eq!(composite.get_pixel(x, 2).0, [255, 255, 255]);
        }
    }

    #[test]
    fn dimensions_helper_matches_composite() {
        let images = vec![
            solid(33, 17, [0, 0, 0, 255]),
            solid(21, 19, [0, 0, 0, 255]),
        ];
        let (w, h) = stacked_dimensions(&images);
        let composite = stack_vertically(&images);
        assert_eq!((w as u32, h as u32), composite.dimensions());
    }

    #[test]
    #[should_panic(expected = "empty page group")]
    fn empty_group_is_a_contract_violation() {
        stack_vertically(&[]);
    }
}
