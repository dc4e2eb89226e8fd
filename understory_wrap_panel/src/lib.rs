// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_wrap_panel --heading-base-level=0

//! Understory Wrap Panel: a virtualizing grid of fixed-size cells.
//!
//! This crate lays a flat sequence of items `0..len` out in rows of uniform
//! cells, wraps to a new row when the viewport width is used up, scrolls
//! vertically, and keeps visual containers realized only for the rows near
//! the viewport. It is renderer-agnostic and does not know about any
//! particular widget system.
//!
//! The core concepts are:
//!
//! - [`GridGeometry`]: items per row, row/column mapping, content extent, and
//!   per-item slot rectangles for one cell size and viewport width.
//! - [`compute_visible_range`]: which item indices a viewport scrolled to a
//!   given offset intersects, as a [`VisibleRange`].
//! - [`ScrollState`]: cached extent, viewport, and offset, with clamping and
//!   change notification.
//! - [`WrapPanel`]: a controller that owns a [`ScrollState`] and the realized
//!   children, and implements measure, arrange, and the scroll contract
//!   (line, wheel, offset, make-visible). Page scrolling and horizontal
//!   scrolling are reported as [`ScrollError::Unsupported`].
//!
//! Host frameworks plug in through two narrow capabilities:
//!
//! - [`ContainerGenerator`]: creates, binds, recycles and destroys containers.
//!   The panel only requests realization and hands evicted containers back.
//! - [`ScrollInvalidationSink`]: told when scroll metrics went stale so scroll
//!   bars can re-query them. `()` is a sink that ignores everything.
//!
//! Realized containers implement [`LayoutChild`] so the panel can measure them
//! at the cell size and assign their slots.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_wrap_panel::{GridGeometry, compute_visible_range};
//!
//! // 100×50 cells across a 320 wide viewport: three per row.
//! let grid = GridGeometry::new(Size::new(100.0, 50.0), 320.0);
//! assert_eq!(grid.items_per_row(), 3);
//!
//! // 100 items need 34 rows.
//! assert_eq!(grid.extent(320.0, 100), Size::new(320.0, 1700.0));
//!
//! // Scrolled to 500 with a 100 tall viewport, rows 10 and 11 are visible.
//! let range = compute_visible_range(&grid, 500.0, 100.0, 100).unwrap();
//! assert_eq!((range.first, range.last), (30, 35));
//! ```
//!
//! ## Driving a panel
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_wrap_panel::{
//!     ContainerGenerator, GeneratorDirection, Generated, LayoutChild, WrapPanel,
//!     WrapPanelConfig,
//! };
//!
//! #[derive(Debug, PartialEq)]
//! struct Cell {
//!     item: usize,
//!     slot: Option<Rect>,
//! }
//!
//! impl LayoutChild for Cell {
//!     fn measure(&mut self, _available: Size) {}
//!     fn arrange(&mut self, slot: Rect) {
//!         self.slot = Some(slot);
//!     }
//! }
//!
//! /// Creates a fresh container for every request.
//! struct Cells {
//!     len: usize,
//!     next: usize,
//! }
//!
//! impl ContainerGenerator for Cells {
//!     type Child = Cell;
//!     type Position = usize;
//!
//!     fn position_from_index(&self, index: usize) -> usize {
//!         index
//!     }
//!     fn start_at(&mut self, position: usize, _direction: GeneratorDirection) {
//!         self.next = position;
//!     }
//!     fn generate_next(&mut self) -> Option<Generated<Cell>> {
//!         (self.next < self.len).then(|| {
//!             self.next += 1;
//!             Generated {
//!                 child: Cell { item: self.next - 1, slot: None },
//!                 newly_realized: true,
//!             }
//!         })
//!     }
//!     fn prepare_container(&mut self, _child: &mut Cell) {}
//!     fn stop(&mut self) {}
//!     fn release(&mut self, _index: usize, _child: Cell) {}
//! }
//!
//! let mut cells = Cells { len: 1000, next: 0 };
//! let mut panel = WrapPanel::new(WrapPanelConfig::new(Size::new(100.0, 50.0)));
//! let viewport = Size::new(300.0, 200.0);
//!
//! panel.measure(viewport, 1000, &mut cells, &mut ());
//! panel.arrange(viewport, 1000, &mut ());
//! // Four visible rows plus one overscan row, not all 1000 items.
//! assert_eq!(panel.children().len(), 15);
//!
//! panel.line_down();
//! assert_eq!(panel.vertical_offset(), 500.0);
//! assert!(panel.page_down().is_err());
//! ```
//!
//! All sizes and offsets are in a caller-chosen coordinate space (typically
//! logical pixels). Cell sizes are expected to be finite and positive.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `tracing`: emits `tracing` spans for measure and arrange, and events when
//!   the extent or viewport changes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod geometry;
mod host;
mod panel;
mod range;
mod scroll;

pub use geometry::{GridGeometry, items_per_row};
pub use host::{
    ContainerGenerator, GeneratorDirection, Generated, LayoutChild, RealizationSession,
    ScrollInvalidationSink,
};
pub use panel::{
    DEFAULT_OVERSCAN_ROWS, DEFAULT_SCROLL_UNIT_LENGTH, RealizedChild, WrapPanel, WrapPanelConfig,
};
pub use range::{VisibleRange, compute_visible_range};
pub use scroll::{ScrollError, ScrollOperation, ScrollState};
