//! Conversion entry points: whole documents, standalone images, batches.
//!
//! ## Blocking core, async shell
//!
//! The pipeline itself is synchronous and single-threaded: one document is
//! processed to completion before the next begins, and each group's
//! rasterise → composite → normalise → encode sequence is an atomic unit
//! of work. The `async` entry points only move that blocking run onto
//! `tokio::task::spawn_blocking` so an embedding application's hot path is
//! never stalled by CPU-bound rendering; `*_sync` variants call the same
//! core directly.
//!
//! ## Failure semantics
//!
//! One bad page fails its whole document — partially converted documents
//! are never returned. One bad document never fails a batch: batch entry
//! points carry a `Result` per input.

use std::path::Path;
use std::time::Instant;

use image::imageops::FilterType;
use image::DynamicImage;
use pdfium_render::prelude::Pdfium;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ConvertConfig;
use crate::error::ConvertError;
use crate::output::{BatchItem, BatchOutput, ConvertStats, DocumentOutput, EncodedPayload};
use crate::pipeline::{compose, encode, group, input, normalize, render};
use crate::policy::{render_params, QualityLevel, RenderParams};

/// How a document would be partitioned, without rendering anything.
///
/// Useful for showing the user how many attachments a quality selection
/// will produce before committing to a long rasterisation run.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentPlan {
    pub name: String,
    pub total_pages: usize,
    /// Zoom factor the current config would render at.
    pub zoom: f32,
    pub pages_per_group: usize,
    /// Number of payloads the conversion would produce.
    pub group_count: usize,
}

// ── Async entry points ───────────────────────────────────────────────────

/// Convert a PDF document into a sequence of JPEG payloads.
///
/// Runs the blocking pipeline on `spawn_blocking`. `name` is the display
/// name used in captions and error messages (typically the filename).
pub async fn convert_document(
    bytes: Vec<u8>,
    name: impl Into<String>,
    config: &ConvertConfig,
) -> Result<DocumentOutput, ConvertError> {
    let name = name.into();
    let config = config.clone();
    tokio::task::spawn_blocking(move || convert_document_sync(&bytes, &name, &config))
        .await
        .map_err(|e| ConvertError::Internal(format!("Conversion task panicked: {e}")))?
}

/// Convert a standalone raster image into a single JPEG payload.
pub async fn convert_image(
    bytes: Vec<u8>,
    name: impl Into<String>,
    config: &ConvertConfig,
) -> Result<EncodedPayload, ConvertError> {
    let name = name.into();
    let config = config.clone();
    tokio::task::spawn_blocking(move || convert_image_sync(&bytes, &name, &config))
        .await
        .map_err(|e| ConvertError::Internal(format!("Conversion task panicked: {e}")))?
}

/// Convert a blob of unknown kind, classifying it by magic bytes first.
///
/// PDFs go down the document pipeline; PNG/JPEG/GIF/WebP down the image
/// pipeline (wrapped in a single-payload [`DocumentOutput`] for a uniform
/// return type). Unrecognised bytes fail with
/// [`ConvertError::UnsupportedFormat`] before any pipeline work.
pub async fn convert_input(
    bytes: Vec<u8>,
    name: impl Into<String>,
    config: &ConvertConfig,
) -> Result<DocumentOutput, ConvertError> {
    let name = name.into();
    let config = config.clone();
    tokio::task::spawn_blocking(move || convert_input_sync(&bytes, &name, &config))
        .await
        .map_err(|e| ConvertError::Internal(format!("Conversion task panicked: {e}")))?
}

/// Convert a local file, using its filename as the display name.
pub async fn convert_path(
    path: impl AsRef<Path>,
    config: &ConvertConfig,
) -> Result<DocumentOutput, ConvertError> {
    let path = path.as_ref();
    let bytes = input::read_file(path)?;
    let name = input::display_name(path);
    convert_input(bytes, name, config).await
}

/// Convert a batch of named blobs, one input at a time, in order.
///
/// Never fails as a whole: each input's success or error is recorded in
/// its [`BatchItem`] and processing continues with the next input.
pub async fn convert_batch(
    inputs: Vec<(String, Vec<u8>)>,
    config: &ConvertConfig,
) -> BatchOutput {
    let mut items = Vec::with_capacity(inputs.len());
    for (name, bytes) in inputs {
        let outcome = convert_input(bytes, name.clone(), config).await;
        items.push(BatchItem { name, outcome });
    }
    BatchOutput { items }
}

/// Open a document and report how it would be partitioned, without
/// rendering any pages.
pub async fn plan_document(
    bytes: Vec<u8>,
    name: impl Into<String>,
    config: &ConvertConfig,
) -> Result<DocumentPlan, ConvertError> {
    let name = name.into();
    let config = config.clone();
    tokio::task::spawn_blocking(move || plan_document_sync(&bytes, &name, &config))
        .await
        .map_err(|e| ConvertError::Internal(format!("Plan task panicked: {e}")))?
}

/// Plan any input without rendering, classifying it by magic bytes first.
///
/// PDFs report their partitioning; a standalone image is a single payload
/// by definition. Unrecognised bytes fail with
/// [`ConvertError::UnsupportedFormat`] instead of a misleading
/// corrupt-document error.
pub async fn plan_input(
    bytes: Vec<u8>,
    name: impl Into<String>,
    config: &ConvertConfig,
) -> Result<DocumentPlan, ConvertError> {
    let name = name.into();
    let config = config.clone();
    tokio::task::spawn_blocking(move || plan_input_sync(&bytes, &name, &config))
        .await
        .map_err(|e| ConvertError::Internal(format!("Plan task panicked: {e}")))?
}

// ── Blocking core ────────────────────────────────────────────────────────

/// Blocking equivalent of [`convert_input`].
pub fn convert_input_sync(
    bytes: &[u8],
    name: &str,
    config: &ConvertConfig,
) -> Result<DocumentOutput, ConvertError> {
    match input::classify(name, bytes)? {
        input::InputKind::Pdf => convert_document_sync(bytes, name, config),
        input::InputKind::Image => {
            let encode_start = Instant::now();
            let payload = convert_image_sync(bytes, name, config)?;
            let stats = ConvertStats {
                total_pages: 1,
                payload_count: 1,
                total_payload_bytes: payload.len(),
                render_duration_ms: 0,
                encode_duration_ms: encode_start.elapsed().as_millis() as u64,
            };
            Ok(DocumentOutput {
                name: name.to_string(),
                payloads: vec![payload],
                stats,
            })
        }
    }
}

/// Blocking equivalent of [`convert_document`].
///
/// The pdfium document handle lives only inside this function; `Drop`
/// releases it on every exit path, success and abort alike.
pub fn convert_document_sync(
    bytes: &[u8],
    name: &str,
    config: &ConvertConfig,
) -> Result<DocumentOutput, ConvertError> {
    let pdfium = bind_pdfium().map_err(|e| notify_error(config, name, e))?;
    let document = render::open_document(&pdfium, bytes, name, config.password.as_deref())
        .map_err(|e| notify_error(config, name, e))?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    if total_pages == 0 {
        return Err(notify_error(
            config,
            name,
            ConvertError::EmptyDocument {
                name: name.to_string(),
            },
        ));
    }

    let params = render_params(
        &config.zoom_policy,
        &config.grouping_policy,
        config.image_quality,
        config.pdf_quality,
    );

    assemble_document(name, total_pages, params, config, |idx| {
        let page = pages
            .get(idx as u16)
            .map_err(|e| ConvertError::PageRenderFailed {
                name: name.to_string(),
                page: idx + 1,
                detail: format!("{e:?}"),
            })?;
        render::render_page(&page, params.zoom, name, idx + 1)
    })
}

/// Run the group loop over an already-opened document.
///
/// `render_page` rasterises one 0-indexed page. The first page failure
/// aborts the whole document: payloads built for earlier groups are
/// discarded with it, and `on_document_error` fires exactly once.
fn assemble_document<F>(
    name: &str,
    total_pages: usize,
    params: RenderParams,
    config: &ConvertConfig,
    render_page: F,
) -> Result<DocumentOutput, ConvertError>
where
    F: FnMut(usize) -> Result<DynamicImage, ConvertError>,
{
    let result = assemble_groups(name, total_pages, params, config, render_page);

    if let Err(ref e) = result {
        if let Some(ref cb) = config.progress_callback {
            cb.on_document_error(name, &e.to_string());
        }
    }

    result
}

fn assemble_groups<F>(
    name: &str,
    total_pages: usize,
    params: RenderParams,
    config: &ConvertConfig,
    mut render_page: F,
) -> Result<DocumentOutput, ConvertError>
where
    F: FnMut(usize) -> Result<DynamicImage, ConvertError>,
{
    let groups = group::partition(total_pages, params.pages_per_group);
    info!(
        "Converting '{}': {} pages at zoom {} → {} payload(s)",
        name,
        total_pages,
        params.zoom,
        groups.len()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_document_start(name, total_pages, groups.len());
    }

    let mut payloads = Vec::with_capacity(groups.len());
    let mut render_duration_ms = 0u64;
    let mut encode_duration_ms = 0u64;

    for (group_idx, g) in groups.iter().enumerate() {
        if let Some(ref cb) = config.progress_callback {
            cb.on_group_start(group_idx, groups.len());
        }

        // Rasterise every page of the group. Any page failure aborts the
        // whole document here; payloads built so far are discarded.
        let render_start = Instant::now();
        let mut page_images = Vec::with_capacity(g.len());
        for idx in g.pages() {
            page_images.push(render_page(idx)?);
        }
        render_duration_ms += render_start.elapsed().as_millis() as u64;

        // Check the canvas budget before the composite allocation.
        let (width, height) = compose::stacked_dimensions(&page_images);
        if canvas_exceeds_budget(width, height, config.max_canvas_pixels) {
            return Err(ConvertError::CanvasTooLarge {
                name: name.to_string(),
                width,
                height,
                limit: config.max_canvas_pixels,
            });
        }

        let encode_start = Instant::now();
        let composite = compose::stack_vertically(&page_images);
        drop(page_images);
        let canvas = normalize::flatten_to_rgb(composite);
        let jpeg = encode::encode_jpeg(&canvas, config.jpeg_quality, name)?;
        encode_duration_ms += encode_start.elapsed().as_millis() as u64;

        debug!(
            "Group {}/{} of '{}': pages {:?} → {} JPEG bytes",
            group_idx + 1,
            groups.len(),
            name,
            g.page_range_1based(),
            jpeg.len()
        );

        if let Some(ref cb) = config.progress_callback {
            cb.on_group_complete(group_idx, groups.len(), jpeg.len());
        }

        payloads.push(EncodedPayload {
            caption: g.caption(name),
            width: canvas.width(),
            height: canvas.height(),
            page_range: Some(g.page_range_1based()),
            bytes: jpeg,
        });
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_document_complete(name, groups.len());
    }

    let stats = ConvertStats {
        total_pages,
        payload_count: payloads.len(),
        total_payload_bytes: payloads.iter().map(|p| p.len()).sum(),
        render_duration_ms,
        encode_duration_ms,
    };

    info!(
        "Converted '{}': {} payload(s), {} bytes total",
        name,
        stats.payload_count,
        stats.total_payload_bytes
    );

    Ok(DocumentOutput {
        name: name.to_string(),
        payloads,
        stats,
    })
}

/// Blocking equivalent of [`convert_image`].
///
/// Decode → normalise → optional uniform resize → JPEG. At the maximum
/// tier the resize is skipped entirely and the image is encoded at its
/// native dimensions.
pub fn convert_image_sync(
    bytes: &[u8],
    name: &str,
    config: &ConvertConfig,
) -> Result<EncodedPayload, ConvertError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| ConvertError::ImageDecodeFailed {
            name: name.to_string(),
            detail: e.to_string(),
        })?;

    let canvas = normalize::flatten_to_rgb(decoded);

    let canvas = if config.image_quality == QualityLevel::VeryHigh {
        canvas
    } else {
        let zoom = config.zoom_policy.zoom_for(config.image_quality);
        let width = (canvas.width() as f32 * zoom).round().max(1.0) as u32;
        let height = (canvas.height() as f32 * zoom).round().max(1.0) as u32;
        debug!(
            "Resizing '{}' {}x{} → {}x{} (zoom {})",
            name,
            canvas.width(),
            canvas.height(),
            width,
            height,
            zoom
        );
        image::imageops::resize(&canvas, width, height, FilterType::Lanczos3)
    };

    let jpeg = encode::encode_jpeg(&canvas, config.jpeg_quality, name)?;

    Ok(EncodedPayload {
        caption: name.to_string(),
        width: canvas.width(),
        height: canvas.height(),
        page_range: None,
        bytes: jpeg,
    })
}

/// Blocking equivalent of [`plan_document`].
pub fn plan_document_sync(
    bytes: &[u8],
    name: &str,
    config: &ConvertConfig,
) -> Result<DocumentPlan, ConvertError> {
    let pdfium = bind_pdfium()?;
    let document = render::open_document(&pdfium, bytes, name, config.password.as_deref())?;
    let total_pages = document.pages().len() as usize;
    if total_pages == 0 {
        return Err(ConvertError::EmptyDocument {
            name: name.to_string(),
        });
    }

    let params = render_params(
        &config.zoom_policy,
        &config.grouping_policy,
        config.image_quality,
        config.pdf_quality,
    );

    Ok(DocumentPlan {
        name: name.to_string(),
        total_pages,
        zoom: params.zoom,
        pages_per_group: params.pages_per_group,
        group_count: total_pages.div_ceil(params.pages_per_group),
    })
}

/// Blocking equivalent of [`plan_input`].
pub fn plan_input_sync(
    bytes: &[u8],
    name: &str,
    config: &ConvertConfig,
) -> Result<DocumentPlan, ConvertError> {
    match input::classify(name, bytes)? {
        input::InputKind::Pdf => plan_document_sync(bytes, name, config),
        input::InputKind::Image => Ok(DocumentPlan {
            name: name.to_string(),
            total_pages: 1,
            zoom: config.zoom_policy.zoom_for(config.image_quality),
            pages_per_group: 1,
            group_count: 1,
        }),
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Bind to the pdfium library, downloading it on first use.
fn bind_pdfium() -> Result<Pdfium, ConvertError> {
    pdfium_fetch::bind_pdfium_silent()
        .map_err(|e| ConvertError::PdfiumBindingFailed(e.to_string()))
}

/// Fire `on_document_error` for failures that happen before the group loop
/// (binding, opening, empty document); the loop reports its own.
fn notify_error(config: &ConvertConfig, name: &str, err: ConvertError) -> ConvertError {
    if let Some(ref cb) = config.progress_callback {
        cb.on_document_error(name, &err.to_string());
    }
    err
}

/// Overflow-safe canvas budget check: a product that does not fit in u64
/// is over any budget by definition.
fn canvas_exceeds_budget(width: u64, height: u64, limit: u64) -> bool {
    width.checked_mul(height).map_or(true, |area| area > limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ConvertProgressCallback;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img.clone())
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn solid_page(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])))
    }

    #[derive(Default)]
    struct EventCounter {
        group_completes: AtomicUsize,
        document_completes: AtomicUsize,
        errors: AtomicUsize,
    }

    impl ConvertProgressCallback for EventCounter {
        fn on_group_complete(&self, _group_idx: usize, _group_count: usize, _bytes: usize) {
            self.group_completes.fetch_add(1, Ordering::SeqCst);
        }
        fn on_document_complete(&self, _name: &str, _group_count: usize) {
            self.document_completes.fetch_add(1, Ordering::SeqCst);
        }
        fn on_document_error(&self, _name: &str, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn params_for(config: &ConvertConfig) -> RenderParams {
        render_params(
            &config.zoom_policy,
            &config.grouping_policy,
            config.image_quality,
            config.pdf_quality,
        )
    }

    #[test]
    fn image_pipeline_flattens_transparency_to_white() {
        let src = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
        let config = ConvertConfig::builder()
            .image_quality(QualityLevel::VeryHigh)
            .build()
            .unwrap();

        let payload = convert_image_sync(&png_bytes(&src), "ghost.png", &config).unwrap();
        let decoded = image::load_from_memory(&payload.bytes).unwrap();
        assert!(!decoded.color().has_alpha());

        let rgb = decoded.to_rgb8();
        for p in rgb.pixels() {
            // Codec rounding allowance.
            assert!(p.0.iter().all(|&c| c >= 250), "expected white, got {:?}", p.0);
        }
    }

    #[test]
    fn very_high_tier_skips_resampling() {
        let src = RgbaImage::from_pixel(37, 23, Rgba([10, 20, 30, 255]));
        let config = ConvertConfig::builder()
            .image_quality(QualityLevel::VeryHigh)
            .build()
            .unwrap();

        let payload = convert_image_sync(&png_bytes(&src), "photo.png", &config).unwrap();
        assert_eq!((payload.width, payload.height), (37, 23));
        assert_eq!(payload.caption, "photo.png");
        assert_eq!(payload.page_range, None);
    }

    #[test]
    fn lower_tiers_scale_both_dimensions_uniformly() {
        let src = RgbaImage::from_pixel(100, 60, Rgba([10, 20, 30, 255]));
        let config = ConvertConfig::builder()
            .image_quality(QualityLevel::Low) // standard zoom 0.3
            .build()
            .unwrap();

        let payload = convert_image_sync(&png_bytes(&src), "photo.png", &config).unwrap();
        assert_eq!((payload.width, payload.height), (30, 18));
    }

    #[test]
    fn garbage_image_bytes_fail_decode() {
        let config = ConvertConfig::default();
        // PNG magic followed by garbage: classified as an image, fails decode.
        let mut bytes = vec![0x89, b'P', b'N', b'G'];
        bytes.extend_from_slice(&[0u8; 16]);
        let err = convert_input_sync(&bytes, "broken.png", &config).unwrap_err();
        assert!(matches!(err, ConvertError::ImageDecodeFailed { .. }));
    }

    #[test]
    fn unknown_bytes_fail_before_any_pipeline() {
        let config = ConvertConfig::default();
        let err = convert_input_sync(b"not a document", "mystery", &config).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
    }

    // ── Group assembly (injected renderer, no pdfium needed) ─────────────

    #[test]
    fn page_failure_aborts_the_document_and_discards_earlier_groups() {
        let counter = Arc::new(EventCounter::default());
        let config = ConvertConfig::builder()
            .pdf_quality(QualityLevel::Medium) // 4 pages per group
            .progress_callback(Arc::clone(&counter) as Arc<dyn ConvertProgressCallback>)
            .build()
            .unwrap();

        // Pages 1-5 render fine; page 6 (second group) has a broken
        // content stream.
        let err = assemble_document("flaky.pdf", 6, params_for(&config), &config, |idx| {
            if idx == 5 {
                Err(ConvertError::PageRenderFailed {
                    name: "flaky.pdf".into(),
                    page: idx + 1,
                    detail: "bad content stream".into(),
                })
            } else {
                Ok(solid_page(8, 8))
            }
        })
        .unwrap_err();

        match err {
            ConvertError::PageRenderFailed { page, .. } => assert_eq!(page, 6),
            other => panic!("expected PageRenderFailed, got {other:?}"),
        }

        // The first group was fully encoded, then thrown away with the
        // abort: the document yields zero payloads and one error event.
        assert_eq!(counter.group_completes.load(Ordering::SeqCst), 1);
        assert_eq!(counter.document_completes.load(Ordering::SeqCst), 0);
        assert_eq!(counter.errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn assembled_groups_carry_captions_ranges_and_stacked_dimensions() {
        let config = ConvertConfig::builder()
            .pdf_quality(QualityLevel::Medium) // 4 pages per group
            .build()
            .unwrap();

        let output = assemble_document("doc.pdf", 5, params_for(&config), &config, |_idx| {
            Ok(solid_page(8, 8))
        })
        .unwrap();

        assert_eq!(output.payloads.len(), 2);
        assert_eq!(output.payloads[0].caption, "doc.pdf - Pages 1-4");
        assert_eq!(output.payloads[0].page_range, Some((1, 4)));
        // Four 8x8 pages stacked vertically.
        assert_eq!(
            (output.payloads[0].width, output.payloads[0].height),
            (8, 32)
        );
        assert_eq!(output.payloads[1].caption, "doc.pdf - Page 5");
        assert_eq!(output.payloads[1].page_range, Some((5, 5)));
        assert_eq!(output.stats.total_pages, 5);
        assert_eq!(output.stats.payload_count, 2);
    }

    #[test]
    fn oversized_composite_aborts_before_allocation() {
        let counter = Arc::new(EventCounter::default());
        let config = ConvertConfig::builder()
            .pdf_quality(QualityLevel::Medium)
            .max_canvas_pixels(1_000)
            .progress_callback(Arc::clone(&counter) as Arc<dyn ConvertProgressCallback>)
            .build()
            .unwrap();

        // Four 50x50 pages stack into 50x200 = 10_000 px > 1_000.
        let err = assemble_document("big.pdf", 4, params_for(&config), &config, |_idx| {
            Ok(solid_page(50, 50))
        })
        .unwrap_err();

        match err {
            ConvertError::CanvasTooLarge { width, height, limit, .. } => {
                assert_eq!((width, height, limit), (50, 200, 1_000));
            }
            other => panic!("expected CanvasTooLarge, got {other:?}"),
        }
        assert_eq!(counter.errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn canvas_budget_check_is_overflow_safe() {
        assert!(!canvas_exceeds_budget(100, 100, 10_000));
        assert!(canvas_exceeds_budget(101, 100, 10_000));
        // Width × height overflows u64: over any budget, never wraps.
        assert!(canvas_exceeds_budget(u64::MAX, 2, u64::MAX));
    }

    // ── Planning ─────────────────────────────────────────────────────────

    #[test]
    fn planning_an_image_reports_a_single_payload() {
        let config = ConvertConfig::builder()
            .image_quality(QualityLevel::Low)
            .build()
            .unwrap();

        let src = RgbaImage::from_pixel(16, 16, Rgba([1, 2, 3, 255]));
        let plan = plan_input_sync(&png_bytes(&src), "photo.png", &config).unwrap();

        assert_eq!(plan.total_pages, 1);
        assert_eq!(plan.group_count, 1);
        assert_eq!(plan.pages_per_group, 1);
        assert_eq!(plan.zoom, 0.3);
    }

    #[test]
    fn planning_unknown_bytes_fails_classification() {
        let config = ConvertConfig::default();
        let err = plan_input_sync(b"not a document", "mystery", &config).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
    }

    // ── Async entry points ───────────────────────────────────────────────

    #[tokio::test]
    async fn async_image_entry_point_round_trips() {
        let src = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let config = ConvertConfig::builder()
            .image_quality(QualityLevel::VeryHigh)
            .build()
            .unwrap();

        let output = convert_input(png_bytes(&src), "red.png", &config)
            .await
            .unwrap();
        assert_eq!(output.payloads.len(), 1);
        assert_eq!(output.stats.total_pages, 1);
        assert_eq!(output.payloads[0].caption, "red.png");
    }

    #[tokio::test]
    async fn batch_isolates_failures_per_input() {
        let good = png_bytes(&RgbaImage::from_pixel(6, 6, Rgba([1, 2, 3, 255])));
        let config = ConvertConfig::default();

        let batch = convert_batch(
            vec![
                ("bad.bin".to_string(), b"garbage".to_vec()),
                ("good.png".to_string(), good),
            ],
            &config,
        )
        .await;

        assert_eq!(batch.items.len(), 2);
        assert!(batch.items[0].outcome.is_err());
        assert!(batch.items[1].outcome.is_ok());
        assert_eq!(batch.success_count(), 1);
        assert_eq!(batch.failure_count(), 1);
    }
}
