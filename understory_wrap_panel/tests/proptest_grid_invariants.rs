// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the wrap grid.
//!
//! These hold for any item count, positive cell size, and viewport:
//!
//! 1. Items per row is never zero.
//! 2. Extent height is `ceil(items / per_row) * cell_height`, identical in measure and arrange.
//! 3. Visible ranges are ordered and stay inside `0..item_count`.
//! 4. Stored offsets stay inside `0..=max(0, extent - viewport)`.
//! 5. Repeating a pass with unchanged inputs never notifies the scroll owner.

use kurbo::{Rect, Size};
use proptest::prelude::*;
use understory_wrap_panel::{
    ContainerGenerator, GeneratorDirection, Generated, GridGeometry, LayoutChild,
    ScrollInvalidationSink, WrapPanel, WrapPanelConfig, compute_visible_range, items_per_row,
};

// ── Fake host ───────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
struct Slot(usize);

impl LayoutChild for Slot {
    fn measure(&mut self, _available: Size) {}
    fn arrange(&mut self, _slot: Rect) {}
}

#[derive(Debug, Default)]
struct Host {
    len: usize,
    next: usize,
    live: Vec<bool>,
}

impl Host {
    fn new(len: usize) -> Self {
        Self {
            len,
            next: 0,
            live: vec![false; len],
        }
    }
}

impl ContainerGenerator for Host {
    type Child = Slot;
    type Position = usize;

    fn position_from_index(&self, index: usize) -> usize {
        index
    }

    fn start_at(&mut self, position: usize, _direction: GeneratorDirection) {
        self.next = position;
    }

    fn generate_next(&mut self) -> Option<Generated<Slot>> {
        if self.next >= self.len {
            return None;
        }
        let index = self.next;
        self.next += 1;
        let newly_realized = !self.live[index];
        self.live[index] = true;
        Some(Generated {
            child: Slot(index),
            newly_realized,
        })
    }

    fn prepare_container(&mut self, _child: &mut Slot) {}

    fn stop(&mut self) {}

    fn release(&mut self, index: usize, _child: Slot) {
        self.live[index] = false;
    }
}

#[derive(Debug, Default)]
struct Owner(usize);

impl ScrollInvalidationSink for Owner {
    fn invalidate_scroll_info(&mut self) {
        self.0 += 1;
    }
}

// ── Strategies ──────────────────────────────────────────────────────────

fn cell_size() -> impl Strategy<Value = Size> {
    (1.0f64..=400.0, 1.0f64..=400.0).prop_map(|(w, h)| Size::new(w, h))
}

fn viewport() -> impl Strategy<Value = Size> {
    (0.0f64..=4000.0, 0.0f64..=4000.0).prop_map(|(w, h)| Size::new(w, h))
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn items_per_row_is_never_zero(width in 0.0f64..=1e6, cell in 1e-3f64..=1e4) {
        prop_assert!(items_per_row(width, cell).get() >= 1);
    }

    #[test]
    fn extent_matches_row_count_and_is_pass_independent(
        cell in cell_size(),
        size in viewport(),
        items in 0usize..5000,
    ) {
        let grid = GridGeometry::new(cell, size.width);
        let rows = items.div_ceil(grid.items_per_row());
        prop_assert_eq!(grid.extent(size.width, items).height, rows as f64 * cell.height);

        let mut panel = WrapPanel::new(WrapPanelConfig::new(cell));
        let mut host = Host::new(items);
        let measured = panel.measure(size, items, &mut host, &mut ());
        panel.arrange(size, items, &mut ());
        prop_assert_eq!(measured, panel.extent());
        prop_assert_eq!(measured.height, rows as f64 * cell.height);
    }

    #[test]
    fn visible_range_is_ordered_and_in_bounds(
        cell in cell_size(),
        size in viewport(),
        items in 1usize..5000,
        fraction in 0.0f64..=1.0,
    ) {
        let grid = GridGeometry::new(cell, size.width);
        let extent = grid.extent(size.width, items);
        let offset = (extent.height - size.height).max(0.0) * fraction;

        let range = compute_visible_range(&grid, offset, size.height, items).unwrap();
        prop_assert!(range.last >= range.first);
        prop_assert!(range.last < items);
    }

    #[test]
    fn offsets_stay_clamped(
        cell in cell_size(),
        size in viewport(),
        items in 0usize..2000,
        requests in prop::collection::vec(-1e5f64..1e5, 1..8),
    ) {
        let mut panel = WrapPanel::new(WrapPanelConfig::new(cell));
        let mut host = Host::new(items);
        panel.measure(size, items, &mut host, &mut ());
        let max = (panel.extent_height() - panel.viewport_height()).max(0.0);

        for request in requests {
            panel.set_vertical_offset(request);
            prop_assert!(panel.vertical_offset() >= 0.0);
            prop_assert!(panel.vertical_offset() <= max);
            panel.measure(size, items, &mut host, &mut ());
            let realized = panel.children().len();
            prop_assert!(realized <= items);
        }
    }

    #[test]
    fn unchanged_passes_do_not_notify(
        cell in cell_size(),
        size in viewport(),
        items in 0usize..2000,
    ) {
        let mut panel = WrapPanel::new(WrapPanelConfig::new(cell));
        let mut host = Host::new(items);
        let mut owner = Owner::default();
        panel.measure(size, items, &mut host, &mut owner);
        panel.arrange(size, items, &mut owner);
        let after_first = owner.0;
        prop_assert!(after_first <= 2);

        panel.measure(size, items, &mut host, &mut owner);
        panel.arrange(size, items, &mut owner);
        prop_assert_eq!(owner.0, after_first);
    }
}
