//! Configuration types for document-to-payload conversion.
//!
//! All conversion behaviour is controlled through [`ConvertConfig`], built
//! via its [`ConvertConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across threads and to diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A ten-field constructor is unreadable and breaks on every new field.
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use std::fmt;
use std::sync::Arc;

use crate::error::ConvertError;
use crate::policy::{GroupingPolicy, QualityLevel, ZoomPolicy};
use crate::progress::ConvertProgressCallback;

/// Configuration for one conversion run.
///
/// Built via [`ConvertConfig::builder()`] or [`ConvertConfig::default()`].
///
/// # Example
/// ```rust
/// use pagepack::{ConvertConfig, QualityLevel};
///
/// let config = ConvertConfig::builder()
///     .image_quality(QualityLevel::High)
///     .pdf_quality(QualityLevel::Medium)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConvertConfig {
    /// Quality tier driving the zoom lookup (page rasterisation and
    /// standalone-image resizing). Default: [`QualityLevel::Medium`].
    pub image_quality: QualityLevel,

    /// Quality tier driving the pages-per-group lookup for PDFs.
    /// Independent from `image_quality` by design. Default:
    /// [`QualityLevel::Medium`].
    pub pdf_quality: QualityLevel,

    /// Zoom table. Default: [`ZoomPolicy::STANDARD`].
    pub zoom_policy: ZoomPolicy,

    /// Pages-per-group table. Default: [`GroupingPolicy::STANDARD`].
    pub grouping_policy: GroupingPolicy,

    /// JPEG quality factor, 1–100. Default: 95.
    ///
    /// The pipelines are all-JPEG by design: a fixed high-90s factor is
    /// visually lossless on rendered text while keeping payloads well under
    /// vision-API attachment budgets. Lowering it rarely helps — drop the
    /// quality tier instead, which shrinks pixel counts too.
    pub jpeg_quality: u8,

    /// Upper bound on composite canvas area in pixels. Default: 100 000 000.
    ///
    /// A safety cap independent of the quality tables. Eight A0 pages at
    /// 1.0× zoom stack into a canvas no allocator should be asked for; the
    /// cap turns that into [`ConvertError::CanvasTooLarge`] before any
    /// allocation happens.
    pub max_canvas_pixels: u64,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Optional per-group progress events. Default: none.
    pub progress_callback: Option<Arc<dyn ConvertProgressCallback>>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            image_quality: QualityLevel::Medium,
            pdf_quality: QualityLevel::Medium,
            zoom_policy: ZoomPolicy::STANDARD,
            grouping_policy: GroupingPolicy::STANDARD,
            jpeg_quality: 95,
            max_canvas_pixels: 100_000_000,
            password: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConvertConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertConfig")
            .field("image_quality", &self.image_quality)
            .field("pdf_quality", &self.pdf_quality)
            .field("zoom_policy", &self.zoom_policy)
            .field("grouping_policy", &self.grouping_policy)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("max_canvas_pixels", &self.max_canvas_pixels)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ConvertConfig {
    /// Create a new builder for `ConvertConfig`.
    pub fn builder() -> ConvertConfigBuilder {
        ConvertConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConvertConfig`].
#[derive(Debug)]
pub struct ConvertConfigBuilder {
    config: ConvertConfig,
}

impl ConvertConfigBuilder {
    pub fn image_quality(mut self, level: QualityLevel) -> Self {
        self.config.image_quality = level;
        self
    }

    pub fn pdf_quality(mut self, level: QualityLevel) -> Self {
        self.config.pdf_quality = level;
        self
    }

    /// Set both quality selectors from integer tiers 1–5.
    ///
    /// Validation happens in [`build`](Self::build) via
    /// [`QualityLevel::from_tier`]; out-of-range tiers surface as
    /// [`ConvertError::InvalidConfig`] before any pipeline work begins.
    pub fn tiers(self, image_tier: u8, pdf_tier: u8) -> Result<Self, ConvertError> {
        let image = QualityLevel::from_tier(image_tier)?;
        let pdf = QualityLevel::from_tier(pdf_tier)?;
        Ok(self.image_quality(image).pdf_quality(pdf))
    }

    pub fn zoom_policy(mut self, policy: ZoomPolicy) -> Self {
        self.config.zoom_policy = policy;
        self
    }

    pub fn grouping_policy(mut self, policy: GroupingPolicy) -> Self {
        self.config.grouping_policy = policy;
        self
    }

    pub fn jpeg_quality(mut self, q: u8) -> Self {
        self.config.jpeg_quality = q.clamp(1, 100);
        self
    }

    pub fn max_canvas_pixels(mut self, px: u64) -> Self {
        self.config.max_canvas_pixels = px.max(1);
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn progress_callback(mut self, cb: Arc<dyn ConvertProgressCallback>) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConvertConfig, ConvertError> {
        let c = &self.config;
        if c.jpeg_quality == 0 || c.jpeg_quality > 100 {
            return Err(ConvertError::InvalidConfig(format!(
                "JPEG quality must be 1–100, got {}",
                c.jpeg_quality
            )));
        }
        if c.max_canvas_pixels == 0 {
            return Err(ConvertError::InvalidConfig(
                "Canvas pixel budget must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
