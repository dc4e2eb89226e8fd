// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-cell grid geometry: items per row, row/column mapping, extent, and slots.
//!
//! A wrap grid lays a flat sequence of items `0..len` into rows of
//! `items_per_row` cells, all of the same [`Size`]. Rows grow downwards; the
//! number of cells in a row is derived from the viewport width and never drops
//! below one.

use core::num::NonZeroUsize;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Size};

/// Returns how many cells of `cell_width` fit across `viewport_width`.
///
/// The result is `max(1, floor(viewport_width / cell_width))`. Degenerate
/// inputs (zero or negative widths, NaN, infinities) collapse to a single cell
/// per row so that row arithmetic never divides by zero.
#[must_use]
pub fn items_per_row(viewport_width: f64, cell_width: f64) -> NonZeroUsize {
    let ratio = (viewport_width / cell_width).floor();
    if !ratio.is_finite() || ratio < 1.0 {
        return NonZeroUsize::MIN;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Ratio is finite and >= 1; float-to-int casts saturate"
    )]
    let count = ratio as usize;
    NonZeroUsize::new(count).unwrap_or(NonZeroUsize::MIN)
}

/// Geometry of a wrap grid for one layout pass.
///
/// Row numbers returned by [`GridGeometry::row_of`] are 1-based; everything
/// else is 0-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    cell_size: Size,
    items_per_row: NonZeroUsize,
}

impl GridGeometry {
    /// Creates the geometry for cells of `cell_size` laid out across `viewport_width`.
    #[must_use]
    pub fn new(cell_size: Size, viewport_width: f64) -> Self {
        Self {
            cell_size,
            items_per_row: items_per_row(viewport_width, cell_size.width),
        }
    }

    /// Returns the uniform cell size.
    #[must_use]
    pub const fn cell_size(&self) -> Size {
        self.cell_size
    }

    /// Returns the number of cells in each row.
    #[must_use]
    pub const fn items_per_row(&self) -> usize {
        self.items_per_row.get()
    }

    /// Returns the 1-based row containing `index`.
    ///
    /// This is `ceil((index + 1) / items_per_row)`.
    #[must_use]
    pub const fn row_of(&self, index: usize) -> usize {
        (index + 1).div_ceil(self.items_per_row.get())
    }

    /// Returns the zero-based column of `index` within its row.
    #[must_use]
    pub const fn column_of(&self, index: usize) -> usize {
        index % self.items_per_row.get()
    }

    /// Returns the number of rows needed for `item_count` items.
    #[must_use]
    pub const fn row_count(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.items_per_row.get())
    }

    /// Returns the top edge of the row containing `index`.
    #[must_use]
    pub fn row_top(&self, index: usize) -> f64 {
        to_f64(self.row_of(index) - 1) * self.cell_size.height
    }

    /// Returns the total content size for `item_count` items.
    ///
    /// The width is passed through unchanged; the grid never scrolls horizontally.
    #[must_use]
    pub fn extent(&self, available_width: f64, item_count: usize) -> Size {
        Size::new(
            available_width,
            to_f64(self.row_count(item_count)) * self.cell_size.height,
        )
    }

    /// Returns the slot rectangle for the item at `index`.
    #[must_use]
    pub fn slot_rect(&self, index: usize) -> Rect {
        let origin = Point::new(
            to_f64(self.column_of(index)) * self.cell_size.width,
            self.row_top(index),
        );
        Rect::from_origin_size(origin, self.cell_size)
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "Item counts stay far below 2^52 in practice"
)]
pub(crate) const fn to_f64(value: usize) -> f64 {
    value as f64
}

#[cfg(test)]
mod tests {
    use super::{GridGeometry, items_per_row};
    use kurbo::{Rect, Size};

    #[test]
    fn items_per_row_floors_and_never_hits_zero() {
        assert_eq!(items_per_row(350.0, 100.0).get(), 3);
        assert_eq!(items_per_row(300.0, 100.0).get(), 3);
        assert_eq!(items_per_row(99.0, 100.0).get(), 1);
        assert_eq!(items_per_row(0.0, 100.0).get(), 1);
        assert_eq!(items_per_row(f64::INFINITY, 100.0).get(), 1);
        assert_eq!(items_per_row(300.0, 0.0).get(), 1);
        assert_eq!(items_per_row(f64::NAN, 100.0).get(), 1);
    }

    #[test]
    fn rows_and_columns() {
        let grid = GridGeometry::new(Size::new(100.0, 50.0), 300.0);
        assert_eq!(grid.items_per_row(), 3);
        assert_eq!(grid.row_of(0), 1);
        assert_eq!(grid.row_of(2), 1);
        assert_eq!(grid.row_of(3), 2);
        assert_eq!(grid.row_of(4), 2);
        assert_eq!(grid.column_of(4), 1);
        assert_eq!(grid.row_count(0), 0);
        assert_eq!(grid.row_count(7), 3);
    }

    #[test]
    fn extent_rounds_partial_rows_up() {
        let grid = GridGeometry::new(Size::new(100.0, 50.0), 320.0);
        assert_eq!(grid.extent(320.0, 0), Size::new(320.0, 0.0));
        assert_eq!(grid.extent(320.0, 9), Size::new(320.0, 150.0));
        assert_eq!(grid.extent(320.0, 10), Size::new(320.0, 200.0));
    }

    #[test]
    fn slot_rect_places_item_in_row_and_column() {
        let grid = GridGeometry::new(Size::new(100.0, 50.0), 300.0);
        // Column 4 % 3 = 1, row ceil(5 / 3) = 2.
        assert_eq!(grid.slot_rect(4), Rect::new(100.0, 50.0, 200.0, 100.0));
        assert_eq!(grid.slot_rect(0), Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(grid.row_top(8), 100.0);
    }
}
