// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible index ranges over a wrap grid.

use core::ops::RangeInclusive;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::GridGeometry;

/// Inclusive range of item indices intersecting the viewport.
///
/// An empty grid has no range at all; see [`compute_visible_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    /// First visible index (inclusive).
    pub first: usize,
    /// Last visible index (inclusive). Always `>= first`.
    pub last: usize,
}

impl VisibleRange {
    /// Creates a range over `first..=last`.
    #[must_use]
    pub fn new(first: usize, last: usize) -> Self {
        debug_assert!(
            last >= first,
            "VisibleRange must not be inverted: first={first}, last={last}"
        );
        Self { first, last }
    }

    /// Number of indices covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// A range always covers at least one index.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `index` lies inside the range.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.first && index <= self.last
    }

    /// Iterator over the covered indices.
    #[must_use]
    pub const fn indices(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }

    /// Widens the range by `rows` whole rows before and after, clamped to `0..item_count`.
    #[must_use]
    pub fn with_overscan(self, rows: usize, items_per_row: usize, item_count: usize) -> Self {
        if item_count == 0 {
            return self;
        }
        let pad = rows.saturating_mul(items_per_row);
        let first = self.first.saturating_sub(pad);
        let last = self.last.saturating_add(pad).min(item_count - 1);
        Self::new(first, last.max(first))
    }
}

/// Computes which items of a grid intersect a viewport scrolled to `vertical_offset`.
///
/// With `h` the cell height and `n` the items per row:
///
/// - `first = floor(vertical_offset / h) * n`
/// - `last = max(ceil((vertical_offset + viewport_height) / h) * n - 1, 0)`
///
/// Both ends are then clamped into `0..item_count`, keeping `last >= first`.
/// Returns `None` when there are no items.
#[must_use]
pub fn compute_visible_range(
    geometry: &GridGeometry,
    vertical_offset: f64,
    viewport_height: f64,
    item_count: usize,
) -> Option<VisibleRange> {
    if item_count == 0 {
        return None;
    }
    let cell_height = geometry.cell_size().height;
    let per_row = geometry.items_per_row();

    let first_row = float_to_index((vertical_offset / cell_height).floor());
    let end_row = float_to_index(((vertical_offset + viewport_height) / cell_height).ceil());

    let first = first_row.saturating_mul(per_row);
    let last = end_row.saturating_mul(per_row).saturating_sub(1);

    let max_index = item_count - 1;
    let last_row_start = max_index - max_index % per_row;
    let first = first.min(last_row_start);
    let last = last.min(max_index).max(first);

    Some(VisibleRange::new(first, last))
}

/// Converts a non-negative float into an index, mapping NaN and negatives to zero.
fn float_to_index(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Value is positive; float-to-int casts saturate at usize::MAX"
    )]
    let index = value as usize;
    index
}

#[cfg(test)]
mod tests {
    use super::{VisibleRange, compute_visible_range};
    use crate::GridGeometry;
    use kurbo::Size;

    fn grid() -> GridGeometry {
        // 3 columns of 100×50 cells.
        GridGeometry::new(Size::new(100.0, 50.0), 300.0)
    }

    #[test]
    fn empty_grid_has_no_range() {
        assert_eq!(compute_visible_range(&grid(), 0.0, 200.0, 0), None);
    }

    #[test]
    fn range_at_top_covers_whole_rows() {
        // Viewport 120 tall covers rows 0..=2 (ceil(120 / 50) = 3 rows).
        let range = compute_visible_range(&grid(), 0.0, 120.0, 100).unwrap();
        assert_eq!(range, VisibleRange::new(0, 8));
        assert_eq!(range.len(), 9);
    }

    #[test]
    fn range_follows_scroll_offset() {
        // Offset 75 starts in row 1; 75 + 100 = 175 ends inside row 3.
        let range = compute_visible_range(&grid(), 75.0, 100.0, 100).unwrap();
        assert_eq!(range.first, 3);
        assert_eq!(range.last, 11);
    }

    #[test]
    fn range_is_clamped_to_item_count() {
        // 7 items: rows hold 0..=2, 3..=5, 6.
        let range = compute_visible_range(&grid(), 0.0, 1000.0, 7).unwrap();
        assert_eq!(range, VisibleRange::new(0, 6));

        // Offset past the content still yields the last row.
        let range = compute_visible_range(&grid(), 500.0, 0.0, 7).unwrap();
        assert_eq!(range, VisibleRange::new(6, 6));
    }

    #[test]
    fn zero_height_viewport_keeps_last_at_or_after_first() {
        let range = compute_visible_range(&grid(), 0.0, 0.0, 10).unwrap();
        assert_eq!(range, VisibleRange::new(0, 0));
        let range = compute_visible_range(&grid(), 50.0, 0.0, 10).unwrap();
        assert_eq!(range, VisibleRange::new(3, 3));
    }

    #[test]
    fn overscan_adds_whole_rows_and_clamps() {
        let range = VisibleRange::new(3, 5).with_overscan(1, 3, 8);
        assert_eq!(range, VisibleRange::new(0, 7));
        let range = VisibleRange::new(6, 8).with_overscan(2, 3, 100);
        assert_eq!(range, VisibleRange::new(0, 14));
        assert!(range.contains(14));
        assert!(!range.contains(15));
        assert_eq!(range.indices().count(), 15);
    }
}
