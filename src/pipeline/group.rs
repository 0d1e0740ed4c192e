//! Page grouping: partition a document's pages into contiguous runs.
//!
//! A group is the unit of output — every group becomes exactly one payload.
//! The partition is exhaustive: every page index lands in exactly one
//! group, in original order, and the final group keeps whatever remainder
//! is left rather than dropping it.

/// A contiguous, ordered run of 0-indexed page indices `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGroup {
    pub start: usize,
    /// Exclusive end index.
    pub end: usize,
}

impl PageGroup {
    /// Number of pages in the group. Always ≥ 1 for partition output.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Iterate the 0-indexed pages of this group.
    pub fn pages(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// 1-based inclusive page range, the form used in captions.
    pub fn page_range_1based(&self) -> (usize, usize) {
        (self.start + 1, self.end)
    }

    /// Caption for this group's payload: singular `"<name> - Page N"` for a
    /// one-page group, `"<name> - Pages A-B"` otherwise (1-based inclusive).
    pub fn caption(&self, document_name: &str) -> String {
        if self.len() == 1 {
            format!("{} - Page {}", document_name, self.start + 1)
        } else {
            format!("{} - Pages {}-{}", document_name, self.start + 1, self.end)
        }
    }
}

/// Partition `[0, total_pages)` into groups of `pages_per_group`.
///
/// Produces `ceil(total_pages / pages_per_group)` groups; only the last may
/// be shorter. Remainder pages are always emitted, never dropped.
///
/// # Panics
/// `pages_per_group` must be ≥ 1 — a zero value is a caller contract
/// violation, validated when the grouping policy is built.
pub fn partition(total_pages: usize, pages_per_group: usize) -> Vec<PageGroup> {
    assert!(pages_per_group >= 1, "pages_per_group must be >= 1");

    let group_count = total_pages.div_ceil(pages_per_group);
    (0..group_count)
        .map(|k| PageGroup {
            start: k * pages_per_group,
            end: ((k + 1) * pages_per_group).min(total_pages),
        })
        .collect()
}
