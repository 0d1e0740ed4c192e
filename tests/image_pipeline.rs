//! Integration tests for the image pipeline and batch behaviour.
//!
//! These tests build synthetic inputs in memory (and on disk via tempfile)
//! so they run everywhere, with no pdfium and no fixture downloads.

use image::{Rgba, RgbaImage};
use pagepack::{
    convert_batch, convert_batch_stream, convert_image_sync, convert_input, convert_path,
    plan_input, ConvertConfig, ConvertError, QualityLevel,
};
use std::io::Cursor;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("in-memory PNG encode");
    buf
}

fn checkerboard(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if (x / 4 + y / 4) % 2 == 0 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
}

/// Assert the payload is a decodable, alpha-free JPEG.
fn assert_valid_jpeg(bytes: &[u8], context: &str) {
    assert!(
        bytes.starts_with(&[0xff, 0xd8, 0xff]),
        "[{context}] missing JPEG SOI marker"
    );
    let decoded = image::load_from_memory(bytes)
        .unwrap_or_else(|e| panic!("[{context}] payload must decode: {e}"));
    assert!(
        !decoded.color().has_alpha(),
        "[{context}] JPEG payload must not carry alpha"
    );
}

// ── Quality tiers ────────────────────────────────────────────────────────────

#[test]
fn max_tier_preserves_native_dimensions() {
    let config = ConvertConfig::builder()
        .image_quality(QualityLevel::VeryHigh)
        .build()
        .unwrap();

    let payload = convert_image_sync(&png_bytes(&checkerboard(321, 123)), "board.png", &config)
        .expect("conversion should succeed");

    assert_eq!((payload.width, payload.height), (321, 123));
    assert_valid_jpeg(&payload.bytes, "max-tier");
}

#[test]
fn every_lower_tier_shrinks_the_image() {
    let src = png_bytes(&checkerboard(200, 100));

    let mut last_area = u64::MAX;
    for level in [
        QualityLevel::High,
        QualityLevel::Medium,
        QualityLevel::Low,
        QualityLevel::VeryLow,
    ] {
        let config = ConvertConfig::builder()
            .image_quality(level)
            .build()
            .unwrap();
        let payload = convert_image_sync(&src, "board.png", &config).unwrap();

        let area = payload.width as u64 * payload.height as u64;
        assert!(
            area < last_area,
            "{level:?} should produce a smaller image than the tier above"
        );
        assert!(payload.width >= 1 && payload.height >= 1);
        last_area = area;
    }
}

#[test]
fn tiny_images_never_collapse_to_zero() {
    let config = ConvertConfig::builder()
        .image_quality(QualityLevel::VeryLow) // zoom 0.2
        .build()
        .unwrap();

    // 2×2 at 0.2 zoom would round to 0 without the floor.
    let payload =
        convert_image_sync(&png_bytes(&checkerboard(2, 2)), "dot.png", &config).unwrap();
    assert_eq!((payload.width, payload.height), (1, 1));
}

// ── Captions and payload shape ───────────────────────────────────────────────

#[test]
fn image_payload_is_captioned_with_the_filename() {
    let config = ConvertConfig::default();
    let payload = convert_image_sync(
        &png_bytes(&checkerboard(32, 32)),
        "holiday photo.png",
        &config,
    )
    .unwrap();

    assert_eq!(payload.caption, "holiday photo.png");
    assert_eq!(payload.page_range, None);
    assert_valid_jpeg(&payload.bytes, "caption");
}

#[tokio::test]
async fn dispatch_wraps_an_image_as_a_single_payload_document() {
    let config = ConvertConfig::default();
    let output = convert_input(png_bytes(&checkerboard(32, 32)), "scan.png", &config)
        .await
        .expect("dispatch should route to the image pipeline");

    assert_eq!(output.name, "scan.png");
    assert_eq!(output.payloads.len(), 1);
    assert_eq!(output.stats.total_pages, 1);
    assert_eq!(output.stats.payload_count, 1);
    assert_eq!(
        output.stats.total_payload_bytes,
        output.payloads[0].len()
    );
}

// ── Format sniffing ──────────────────────────────────────────────────────────

#[tokio::test]
async fn classification_ignores_the_file_extension() {
    let config = ConvertConfig::default();

    // PNG bytes behind a .pdf name still go down the image pipeline.
    let output = convert_input(png_bytes(&checkerboard(16, 16)), "mislabeled.pdf", &config)
        .await
        .expect("content sniffing should win over the extension");
    assert_eq!(output.payloads[0].page_range, None);
}

#[tokio::test]
async fn unsupported_bytes_are_rejected_with_the_magic_prefix() {
    let config = ConvertConfig::default();
    let err = convert_input(b"BM__not_really_a_bmp".to_vec(), "legacy.bmp", &config)
        .await
        .expect_err("BMP is not a supported input");

    match err {
        ConvertError::UnsupportedFormat { name, magic } => {
            assert_eq!(name, "legacy.bmp");
            assert_eq!(&magic, b"BM__");
        }
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

// ── Planning ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn plan_treats_a_standalone_image_as_one_payload() {
    let config = ConvertConfig::default();

    // Planning classifies by content, so an image never reaches the PDF
    // opener; it is one payload with nothing to partition.
    let plan = plan_input(png_bytes(&checkerboard(16, 16)), "photo.png", &config)
        .await
        .expect("image inputs are plannable");

    assert_eq!(plan.name, "photo.png");
    assert_eq!(plan.total_pages, 1);
    assert_eq!(plan.pages_per_group, 1);
    assert_eq!(plan.group_count, 1);
}

#[tokio::test]
async fn plan_rejects_unrecognised_bytes() {
    let config = ConvertConfig::default();
    let err = plan_input(b"BM__not_really_a_bmp".to_vec(), "legacy.bmp", &config)
        .await
        .expect_err("unknown formats are not plannable");
    assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
}

// ── Filesystem entry point ───────────────────────────────────────────────────

#[tokio::test]
async fn convert_path_uses_the_filename_as_display_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("receipt.png");
    std::fs::write(&path, png_bytes(&checkerboard(24, 24))).unwrap();

    let config = ConvertConfig::default();
    let output = convert_path(&path, &config).await.expect("file converts");

    assert_eq!(output.name, "receipt.png");
    assert_eq!(output.payloads[0].caption, "receipt.png");
}

#[tokio::test]
async fn missing_file_maps_to_file_not_found() {
    let config = ConvertConfig::default();
    let err = convert_path("/definitely/not/a/real/file.png", &config)
        .await
        .expect_err("nonexistent path must fail");
    assert!(matches!(err, ConvertError::FileNotFound { .. }));
}

// ── Batch isolation ──────────────────────────────────────────────────────────

#[tokio::test]
async fn one_bad_input_does_not_poison_the_batch() {
    let good = png_bytes(&checkerboard(16, 16));
    let config = ConvertConfig::default();

    let batch = convert_batch(
        vec![
            ("a.png".to_string(), good.clone()),
            ("corrupt.png".to_string(), {
                // Valid PNG magic, truncated body: fails at decode, not sniff.
                let mut b = good.clone();
                b.truncate(12);
                b
            }),
            ("c.png".to_string(), good),
        ],
        &config,
    )
    .await;

    assert_eq!(batch.items.len(), 3);
    assert_eq!(batch.success_count(), 2);
    assert_eq!(batch.failure_count(), 1);

    // Order is preserved; the middle item carries the decode error.
    assert_eq!(batch.items[1].name, "corrupt.png");
    assert!(matches!(
        batch.items[1].outcome,
        Err(ConvertError::ImageDecodeFailed { .. })
    ));

    // Flattened payload view only exposes the successes.
    assert_eq!(batch.payloads().count(), 2);
}

#[tokio::test]
async fn stream_and_collected_batch_agree() {
    use futures::StreamExt;

    let inputs = vec![
        ("one.png".to_string(), png_bytes(&checkerboard(8, 8))),
        ("junk".to_string(), b"????????".to_vec()),
    ];
    let config = ConvertConfig::default();

    let collected = convert_batch(inputs.clone(), &config).await;
    let streamed: Vec<_> = convert_batch_stream(inputs, &config).collect().await;

    assert_eq!(collected.items.len(), streamed.len());
    for (c, s) in collected.items.iter().zip(&streamed) {
        assert_eq!(c.name, s.name);
        assert_eq!(c.outcome.is_ok(), s.outcome.is_ok());
    }
}
