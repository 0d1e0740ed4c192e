//! # pagepack
//!
//! Convert PDF documents and raster images into caption-labelled JPEG
//! payloads sized for vision-model APIs.
//!
//! ## Why this crate?
//!
//! Vision APIs bill by pixel count and cap both attachment size and
//! attachment count per request. Naively rasterising a 60-page PDF at full
//! resolution blows all three budgets at once. This crate trades fidelity
//! for cost along two *independent* axes: a zoom tier that shrinks pixels,
//! and a grouping tier that stacks several pages into one composite
//! attachment. Each payload carries a human-readable caption
//! (`"report.pdf - Pages 5-8"`) so the model can cite page numbers in its
//! answers.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF / image bytes
//!  │
//!  ├─ 1. Classify   magic-byte sniff: PDF vs PNG/JPEG/GIF/WebP
//!  ├─ 2. Partition  pages into fixed-size groups (remainder kept)
//!  ├─ 3. Render     rasterise each page via pdfium at the tier's zoom
//!  ├─ 4. Compose    stack the group onto one white canvas, centred
//!  ├─ 5. Normalise  flatten alpha over white → opaque RGB
//!  └─ 6. Encode     JPEG (q=95) + caption + 1-based page range
//! ```
//!
//! Standalone images skip steps 2–4: decode → normalise → uniform
//! Lanczos resize at the zoom tier (skipped entirely at the top tier)
//! → JPEG, captioned with the filename.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagepack::{convert_path, ConvertConfig, QualityLevel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConvertConfig::builder()
//!         .image_quality(QualityLevel::High)   // zoom 0.7
//!         .pdf_quality(QualityLevel::Medium)   // 4 pages per payload
//!         .build()?;
//!
//!     let output = convert_path("report.pdf", &config).await?;
//!     for payload in &output.payloads {
//!         println!("{}: {} bytes", payload.caption, payload.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Quality Tiers
//!
//! | Tier | Level      | Zoom (standard) | Pages per payload |
//! |------|------------|-----------------|-------------------|
//! | 5    | `VeryHigh` | 1.0             | 1                 |
//! | 4    | `High`     | 0.7             | 2                 |
//! | 3    | `Medium`   | 0.45            | 4                 |
//! | 2    | `Low`      | 0.3             | 6                 |
//! | 1    | `VeryLow`  | 0.2             | 8                 |
//!
//! The zoom column follows `image_quality`, the pages column follows
//! `pdf_quality`; mixing tiers is the intended usage (sharp pages, many
//! per attachment — or the reverse).
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pagepack` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pagepack = { version = "0.2", default-features = false }
//! ```
//!
//! ## PDFium
//!
//! PDF rendering needs the pdfium shared library. On first use it is
//! downloaded and cached automatically (see the `pdfium-fetch` crate);
//! set `PDFIUM_LIB_PATH` to use a pre-installed copy instead. Image-only
//! workloads never touch pdfium.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod policy;
pub mod progress;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConvertConfig, ConvertConfigBuilder};
pub use convert::{
    convert_batch, convert_document, convert_document_sync, convert_image, convert_image_sync,
    convert_input, convert_input_sync, convert_path, plan_document, plan_document_sync,
    plan_input, plan_input_sync, DocumentPlan,
};
pub use error::ConvertError;
pub use output::{BatchItem, BatchOutput, ConvertStats, DocumentOutput, EncodedPayload};
pub use policy::{GroupingPolicy, QualityLevel, RenderParams, ZoomPolicy};
pub use progress::{ConvertProgressCallback, NoopProgressCallback, ProgressCallback};
pub use stream::{convert_batch_stream, BatchStream};
