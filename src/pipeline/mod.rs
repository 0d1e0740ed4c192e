//! Pipeline stages for document-to-payload conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch rendering backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ group ──▶ render ──▶ compose ──▶ normalize ──▶ encode
//! (sniff)   (pages    (pdfium)   (vertical    (flatten      (JPEG 95)
//!            per       per page   stack on     alpha onto
//!            payload)             white)       white)
//! ```
//!
//! 1. [`input`]     — classify raw bytes as PDF or standalone image
//! 2. [`group`]     — partition page indices into contiguous groups
//! 3. [`render`]    — rasterise one page at a uniform zoom; CPU-bound,
//!    callers wrap the whole document run in `spawn_blocking`
//! 4. [`compose`]   — stack a group's pages into one canvas
//! 5. [`normalize`] — force opaque 3-channel RGB before any JPEG encode
//! 6. [`encode`]    — JPEG-encode the finished canvas

pub mod compose;
pub mod encode;
pub mod group;
pub mod input;
pub mod normalize;
pub mod render;
