//! Quality tiers and the policy tables that map them to render parameters.
//!
//! A [`QualityLevel`] is the user-facing fidelity/cost knob. Two independent
//! policy tables turn it into concrete numbers:
//!
//! * [`ZoomPolicy`] — the uniform scale factor applied when rasterising a
//!   PDF page or resizing a standalone image.
//! * [`GroupingPolicy`] — how many PDF pages are stacked into one output
//!   image.
//!
//! The two are deliberately separate: a caller can render pages at full
//! resolution while still packing eight of them into one attachment, or the
//! other way round. Both lookups are total — every level has an entry, so
//! they can never fail at runtime.

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// User-facing fidelity/cost tier.
///
/// Higher tiers trade larger payloads for more legible output: more pixels
/// per page and fewer pages squeezed into each attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl QualityLevel {
    /// All levels, lowest to highest.
    pub const ALL: [QualityLevel; 5] = [
        QualityLevel::VeryLow,
        QualityLevel::Low,
        QualityLevel::Medium,
        QualityLevel::High,
        QualityLevel::VeryHigh,
    ];

    /// Build a level from an integer tier 1–5 (1 = very low, 5 = very high).
    ///
    /// Some front-ends expose the tier as a numeric slider; the range is
    /// validated here, at the boundary, so an out-of-range tier never
    /// reaches the pipeline.
    pub fn from_tier(tier: u8) -> Result<Self, ConvertError> {
        match tier {
            1 => Ok(QualityLevel::VeryLow),
            2 => Ok(QualityLevel::Low),
            3 => Ok(QualityLevel::Medium),
            4 => Ok(QualityLevel::High),
            5 => Ok(QualityLevel::VeryHigh),
            other => Err(ConvertError::InvalidConfig(format!(
                "Quality tier must be 1–5, got {other}"
            ))),
        }
    }

    /// The integer tier (1–5) for this level.
    pub fn tier(self) -> u8 {
        match self {
            QualityLevel::VeryLow => 1,
            QualityLevel::Low => 2,
            QualityLevel::Medium => 3,
            QualityLevel::High => 4,
            QualityLevel::VeryHigh => 5,
        }
    }

    /// Table index, ordered VeryLow → VeryHigh.
    fn index(self) -> usize {
        self.tier() as usize - 1
    }
}

/// Derived render parameters for one (zoom policy, grouping policy, level)
/// combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderParams {
    /// Uniform linear scale applied to both page dimensions. Always > 0.
    pub zoom: f32,
    /// Pages stacked into each output image. Always ≥ 1.
    pub pages_per_group: usize,
}

/// Zoom-factor table keyed by [`QualityLevel`].
///
/// Named tables exist because deployments disagree on the curve: the
/// standard table keeps High at 0.7× while the compact table drops it to
/// 0.5× for tighter payload budgets. Both are monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomPolicy {
    /// Zoom per level, indexed VeryLow → VeryHigh.
    table: [f32; 5],
}

impl ZoomPolicy {
    /// Default curve: 0.2 / 0.3 / 0.45 / 0.7 / 1.0.
    pub const STANDARD: ZoomPolicy = ZoomPolicy {
        table: [0.2, 0.3, 0.45, 0.7, 1.0],
    };

    /// Aggressive curve for tight attachment budgets:
    /// 1/6 / 0.25 / 0.33 / 0.5 / 1.0.
    pub const COMPACT: ZoomPolicy = ZoomPolicy {
        table: [1.0 / 6.0, 0.25, 0.33, 0.5, 1.0],
    };

    /// Build a custom table (indexed VeryLow → VeryHigh).
    ///
    /// Entries must be positive and non-decreasing.
    pub fn custom(table: [f32; 5]) -> Result<Self, ConvertError> {
        if table.iter().any(|&z| z <= 0.0 || !z.is_finite()) {
            return Err(ConvertError::InvalidConfig(
                "Zoom factors must be positive and finite".into(),
            ));
        }
        if table.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConvertError::InvalidConfig(
                "Zoom factors must not decrease with quality".into(),
            ));
        }
        Ok(ZoomPolicy { table })
    }

    /// Zoom factor for `level`. Total: defined for every level.
    pub fn zoom_for(&self, level: QualityLevel) -> f32 {
        self.table[level.index()]
    }
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        ZoomPolicy::STANDARD
    }
}

/// Pages-per-output-image table keyed by [`QualityLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingPolicy {
    /// Pages per group, indexed VeryLow → VeryHigh.
    table: [usize; 5],
}

impl GroupingPolicy {
    /// Default curve: 8 / 6 / 4 / 2 / 1 pages per output image.
    pub const STANDARD: GroupingPolicy = GroupingPolicy {
        table: [8, 6, 4, 2, 1],
    };

    /// Build a custom table (indexed VeryLow → VeryHigh).
    ///
    /// Entries must be ≥ 1 and non-increasing with quality.
    pub fn custom(table: [usize; 5]) -> Result<Self, ConvertError> {
        if table.contains(&0) {
            return Err(ConvertError::InvalidConfig(
                "Pages per group must be at least 1".into(),
            ));
        }
        if table.windows(2).any(|w| w[0] < w[1]) {
            return Err(ConvertError::InvalidConfig(
                "Pages per group must not increase with quality".into(),
            ));
        }
        Ok(GroupingPolicy { table })
    }

    /// Pages per group for `level`. Total: defined for every level.
    pub fn pages_per_group(&self, level: QualityLevel) -> usize {
        self.table[level.index()]
    }
}

impl Default for GroupingPolicy {
    fn default() -> Self {
        GroupingPolicy::STANDARD
    }
}

/// Resolve the concrete render parameters for a pair of quality selectors.
///
/// `image_level` drives the zoom lookup, `pdf_level` the page grouping —
/// the two selectors are independent by design.
pub fn render_params(
    zoom_policy: &ZoomPolicy,
    grouping_policy: &GroupingPolicy,
    image_level: QualityLevel,
    pdf_level: QualityLevel,
) -> RenderParams {
    RenderParams {
        zoom: zoom_policy.zoom_for(image_level),
        pages_per_group: grouping_policy.pages_per_group(pdf_level),
    }
}
