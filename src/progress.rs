//! Progress-callback trait for per-group conversion events.
//!
//! Inject an [`Arc<dyn ConvertProgressCallback>`] via
//! [`crate::config::ConvertConfigBuilder::progress_callback`] to receive
//! events as the pipeline works through a document's page groups.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a channel, a WebSocket, or a terminal progress bar
//! without the library knowing anything about how the host application
//! communicates. The trait is `Send + Sync` because the blocking pipeline
//! runs on a `spawn_blocking` thread while the callback may live on the
//! caller's side.

use std::sync::Arc;

/// Called by the conversion pipeline as it processes each page group.
///
/// Rasterise → composite → normalise → encode is an atomic unit of work per
/// group, so group boundaries are the only progress granularity offered.
/// All methods have default no-op implementations; override what you need.
pub trait ConvertProgressCallback: Send + Sync {
    /// Called once per input after the document is opened, before any
    /// rendering.
    ///
    /// # Arguments
    /// * `name`        — the input's display name
    /// * `total_pages` — pages in the document
    /// * `group_count` — payloads that will be produced
    fn on_document_start(&self, name: &str, total_pages: usize, group_count: usize) {
        let _ = (name, total_pages, group_count);
    }

    /// Called before a group's first page is rasterised.
    ///
    /// `group_idx` is 0-indexed.
    fn on_group_start(&self, group_idx: usize, group_count: usize) {
        let _ = (group_idx, group_count);
    }

    /// Called when a group's payload has been encoded.
    ///
    /// `payload_bytes` is the JPEG size, useful for running totals against
    /// an attachment budget.
    fn on_group_complete(&self, group_idx: usize, group_count: usize, payload_bytes: usize) {
        let _ = (group_idx, group_count, payload_bytes);
    }

    /// Called once when every group of the input has been encoded.
    fn on_document_complete(&self, name: &str, group_count: usize) {
        let _ = (name, group_count);
    }

    /// Called once when the input is abandoned (any page failure aborts the
    /// whole document).
    fn on_document_error(&self, name: &str, error: &str) {
        let _ = (name, error);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConvertProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConvertConfig`].
pub type ProgressCallback = Arc<dyn ConvertProgressCallback>;
