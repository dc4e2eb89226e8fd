// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`WrapPanel`] controller: measure, arrange, and the scroll contract.

use alloc::vec::Vec;

use kurbo::{Affine, Rect, Size};

use crate::{
    ContainerGenerator, GeneratorDirection, GridGeometry, LayoutChild, RealizationSession,
    ScrollError, ScrollInvalidationSink, ScrollOperation, ScrollState, VisibleRange,
    compute_visible_range,
};

/// Default distance moved by one line or wheel step, in logical units.
pub const DEFAULT_SCROLL_UNIT_LENGTH: f64 = 500.0;

/// Default number of whole rows realized beyond each edge of the viewport.
pub const DEFAULT_OVERSCAN_ROWS: usize = 1;

/// Host-settable configuration of a [`WrapPanel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapPanelConfig {
    /// Size of every cell. Both dimensions are expected to be finite and positive.
    pub cell_size: Size,
    /// Distance moved by [`WrapPanel::line_up`], [`WrapPanel::line_down`] and the wheel.
    pub scroll_unit_length: f64,
    /// Whole rows realized above and below the visible range.
    pub overscan_rows: usize,
}

impl WrapPanelConfig {
    /// Creates a configuration for `cell_size` with default scrolling and overscan.
    #[must_use]
    pub const fn new(cell_size: Size) -> Self {
        Self {
            cell_size,
            scroll_unit_length: DEFAULT_SCROLL_UNIT_LENGTH,
            overscan_rows: DEFAULT_OVERSCAN_ROWS,
        }
    }
}

/// A container the panel currently keeps realized.
#[derive(Debug, Clone, PartialEq)]
pub struct RealizedChild<C> {
    /// Item index the container is bound to.
    pub index: usize,
    /// The host's container handle.
    pub child: C,
    /// Slot assigned by the most recent arrange pass.
    pub slot: Option<Rect>,
}

/// A virtualizing wrap panel over fixed-size cells.
///
/// The panel lays items `0..item_count` out left to right in rows of
/// [`items_per_row`](Self::items_per_row) cells and scrolls vertically. Only
/// items near the viewport have realized containers; everything else is
/// handed back to the host's [`ContainerGenerator`].
///
/// Hosts drive the panel in the usual two passes:
///
/// 1. [`measure`](Self::measure) with the available size. This realizes and
///    evicts containers and returns the desired size (the extent).
/// 2. [`arrange`](Self::arrange) with the final size. This assigns each
///    realized container its slot.
///
/// Scrolling does not move children. Instead hosts apply
/// [`render_transform`](Self::render_transform) to the panel's content and
/// run another measure pass whenever [`needs_measure`](Self::needs_measure)
/// is set.
#[derive(Debug)]
pub struct WrapPanel<C> {
    config: WrapPanelConfig,
    scroll: ScrollState,
    children: Vec<RealizedChild<C>>,
    needs_measure: bool,
    can_vertically_scroll: bool,
    can_horizontally_scroll: bool,
}

impl<C> WrapPanel<C> {
    /// Creates an empty panel.
    #[must_use]
    pub fn new(config: WrapPanelConfig) -> Self {
        debug_assert_valid_cell(config.cell_size);
        Self {
            config,
            scroll: ScrollState::new(),
            children: Vec::new(),
            needs_measure: true,
            can_vertically_scroll: true,
            can_horizontally_scroll: false,
        }
    }

    /// Returns the current configuration.
    #[must_use]
    pub const fn config(&self) -> &WrapPanelConfig {
        &self.config
    }

    /// Returns the cell size.
    #[must_use]
    pub const fn cell_size(&self) -> Size {
        self.config.cell_size
    }

    /// Sets the cell size. Takes effect on the next measure pass.
    pub fn set_cell_size(&mut self, cell_size: Size) {
        debug_assert_valid_cell(cell_size);
        if cell_size != self.config.cell_size {
            self.config.cell_size = cell_size;
            self.needs_measure = true;
        }
    }

    /// Returns the distance moved by one line or wheel step.
    #[must_use]
    pub const fn scroll_unit_length(&self) -> f64 {
        self.config.scroll_unit_length
    }

    /// Sets the distance moved by one line or wheel step.
    pub fn set_scroll_unit_length(&mut self, length: f64) {
        self.config.scroll_unit_length = length;
    }

    /// Sets how many whole rows are realized beyond each edge of the viewport.
    pub fn set_overscan_rows(&mut self, rows: usize) {
        if rows != self.config.overscan_rows {
            self.config.overscan_rows = rows;
            self.needs_measure = true;
        }
    }

    /// Whether the host allows vertical scrolling.
    #[must_use]
    pub const fn can_vertically_scroll(&self) -> bool {
        self.can_vertically_scroll
    }

    /// Records whether the host allows vertical scrolling.
    pub fn set_can_vertically_scroll(&mut self, value: bool) {
        self.can_vertically_scroll = value;
    }

    /// Whether the host allows horizontal scrolling.
    #[must_use]
    pub const fn can_horizontally_scroll(&self) -> bool {
        self.can_horizontally_scroll
    }

    /// Records whether the host allows horizontal scrolling.
    ///
    /// The panel itself never scrolls horizontally.
    pub fn set_can_horizontally_scroll(&mut self, value: bool) {
        self.can_horizontally_scroll = value;
    }

    /// Returns the cached scroll metrics.
    #[must_use]
    pub const fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    /// Total content size from the most recent pass.
    #[must_use]
    pub const fn extent(&self) -> Size {
        self.scroll.extent()
    }

    /// Width of the content.
    #[must_use]
    pub const fn extent_width(&self) -> f64 {
        self.scroll.extent().width
    }

    /// Height of the content.
    #[must_use]
    pub const fn extent_height(&self) -> f64 {
        self.scroll.extent().height
    }

    /// Visible size from the most recent pass.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.scroll.viewport()
    }

    /// Width of the viewport.
    #[must_use]
    pub const fn viewport_width(&self) -> f64 {
        self.scroll.viewport().width
    }

    /// Height of the viewport.
    #[must_use]
    pub const fn viewport_height(&self) -> f64 {
        self.scroll.viewport().height
    }

    /// Horizontal scroll offset. Always `0`.
    #[must_use]
    pub const fn horizontal_offset(&self) -> f64 {
        self.scroll.offset().x
    }

    /// Vertical scroll offset.
    #[must_use]
    pub const fn vertical_offset(&self) -> f64 {
        self.scroll.offset().y
    }

    /// Grid geometry for the cached viewport width.
    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.config.cell_size, self.scroll.viewport().width)
    }

    /// Number of cells per row for the cached viewport width. Never zero.
    #[must_use]
    pub fn items_per_row(&self) -> usize {
        self.geometry().items_per_row()
    }

    /// Items intersecting the cached viewport, without overscan.
    #[must_use]
    pub fn visible_range(&self, item_count: usize) -> Option<VisibleRange> {
        compute_visible_range(
            &self.geometry(),
            self.scroll.offset().y,
            self.scroll.viewport().height,
            item_count,
        )
    }

    /// Realized containers, ordered by item index.
    #[must_use]
    pub fn children(&self) -> &[RealizedChild<C>] {
        &self.children
    }

    /// Translation hosts apply to the panel's content to reflect the scroll offset.
    #[must_use]
    pub fn render_transform(&self) -> Affine {
        Affine::translate((0.0, -self.scroll.offset().y))
    }

    /// Returns `true` if the host should run a measure pass.
    #[must_use]
    pub const fn needs_measure(&self) -> bool {
        self.needs_measure
    }

    /// Requests a measure pass, for example after the item collection changed.
    pub fn invalidate_measure(&mut self) {
        self.needs_measure = true;
    }

    /// Measure pass.
    ///
    /// Recomputes extent and viewport from `available` and `item_count`,
    /// realizes containers for the visible rows (plus overscan), releases the
    /// rest, and measures every realized container at exactly the cell size.
    /// Returns the extent as the desired size.
    pub fn measure<G, O>(
        &mut self,
        available: Size,
        item_count: usize,
        generator: &mut G,
        owner: &mut O,
    ) -> Size
    where
        C: LayoutChild,
        G: ContainerGenerator<Child = C>,
        O: ScrollInvalidationSink + ?Sized,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "wrap_panel_measure",
            width = available.width,
            height = available.height,
            items = item_count
        )
        .entered();

        let geometry = GridGeometry::new(self.config.cell_size, available.width);
        let extent = self.update_metrics(&geometry, available, item_count, owner);

        let range = compute_visible_range(
            &geometry,
            self.scroll.offset().y,
            available.height,
            item_count,
        )
        .map(|range| {
            range.with_overscan(
                self.config.overscan_rows,
                geometry.items_per_row(),
                item_count,
            )
        });

        self.evict_outside(range, generator);
        if let Some(range) = range {
            self.realize(range, generator);
        }

        let cell = self.config.cell_size;
        for realized in &mut self.children {
            realized.child.measure(cell);
        }

        self.needs_measure = false;
        extent
    }

    /// Arrange pass.
    ///
    /// Recomputes extent and viewport from `final_size` and assigns each
    /// realized container the slot of its item index. Returns `final_size`.
    pub fn arrange<O>(&mut self, final_size: Size, item_count: usize, owner: &mut O) -> Size
    where
        C: LayoutChild,
        O: ScrollInvalidationSink + ?Sized,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "wrap_panel_arrange",
            width = final_size.width,
            height = final_size.height,
            items = item_count
        )
        .entered();

        let geometry = GridGeometry::new(self.config.cell_size, final_size.width);
        self.update_metrics(&geometry, final_size, item_count, owner);

        for realized in &mut self.children {
            let slot = geometry.slot_rect(realized.index);
            realized.slot = Some(slot);
            realized.child.arrange(slot);
        }
        final_size
    }

    /// Hands every realized container back to `generator`.
    ///
    /// Use this when the item collection is replaced wholesale; indices held
    /// by the panel would otherwise refer to the old items.
    pub fn release_all<G>(&mut self, generator: &mut G)
    where
        G: ContainerGenerator<Child = C>,
    {
        for realized in self.children.drain(..) {
            generator.release(realized.index, realized.child);
        }
        self.needs_measure = true;
    }

    /// Scrolls up by one scroll unit.
    pub fn line_up(&mut self) {
        self.set_vertical_offset(self.vertical_offset() - self.config.scroll_unit_length);
    }

    /// Scrolls down by one scroll unit.
    pub fn line_down(&mut self) {
        self.set_vertical_offset(self.vertical_offset() + self.config.scroll_unit_length);
    }

    /// Horizontal scrolling is not supported.
    pub fn line_left(&mut self) -> Result<(), ScrollError> {
        self.scroll_horizontally(self.config.scroll_unit_length, ScrollOperation::LineLeft)
    }

    /// Horizontal scrolling is not supported.
    pub fn line_right(&mut self) -> Result<(), ScrollError> {
        self.scroll_horizontally(-self.config.scroll_unit_length, ScrollOperation::LineRight)
    }

    /// Scrolls up by one scroll unit and always notifies `owner`.
    pub fn wheel_up<O>(&mut self, owner: &mut O)
    where
        O: ScrollInvalidationSink + ?Sized,
    {
        self.line_up();
        owner.invalidate_scroll_info();
    }

    /// Scrolls down by one scroll unit and always notifies `owner`.
    pub fn wheel_down<O>(&mut self, owner: &mut O)
    where
        O: ScrollInvalidationSink + ?Sized,
    {
        self.line_down();
        owner.invalidate_scroll_info();
    }

    /// Horizontal scrolling is not supported.
    pub fn wheel_left(&mut self) -> Result<(), ScrollError> {
        self.scroll_horizontally(self.config.scroll_unit_length, ScrollOperation::WheelLeft)
    }

    /// Horizontal scrolling is not supported.
    pub fn wheel_right(&mut self) -> Result<(), ScrollError> {
        self.scroll_horizontally(-self.config.scroll_unit_length, ScrollOperation::WheelRight)
    }

    /// Page scrolling is not supported.
    pub fn page_up(&mut self) -> Result<(), ScrollError> {
        Err(ScrollError::Unsupported(ScrollOperation::PageUp))
    }

    /// Page scrolling is not supported.
    pub fn page_down(&mut self) -> Result<(), ScrollError> {
        Err(ScrollError::Unsupported(ScrollOperation::PageDown))
    }

    /// Page scrolling is not supported.
    pub fn page_left(&mut self) -> Result<(), ScrollError> {
        Err(ScrollError::Unsupported(ScrollOperation::PageLeft))
    }

    /// Page scrolling is not supported.
    pub fn page_right(&mut self) -> Result<(), ScrollError> {
        Err(ScrollError::Unsupported(ScrollOperation::PageRight))
    }

    /// Horizontal scrolling is not supported; the offset stays at `0`.
    pub fn set_horizontal_offset(&mut self, _offset: f64) -> Result<(), ScrollError> {
        Err(ScrollError::Unsupported(ScrollOperation::SetHorizontalOffset))
    }

    /// Sets the vertical offset, clamped to `0..=extent_height - viewport_height`.
    ///
    /// The new offset is reflected in [`render_transform`](Self::render_transform)
    /// immediately. A measure pass is requested so rows scrolled into view get
    /// containers.
    pub fn set_vertical_offset(&mut self, offset: f64) {
        self.scroll.set_vertical_offset(offset);
        self.needs_measure = true;
    }

    /// Scrolls `child` into view if its row starts outside the viewport.
    ///
    /// When the top edge of the child's row lies above the current offset or
    /// below the bottom of the viewport, the row's top edge becomes the new
    /// offset. Children the panel has not realized are ignored. Returns
    /// `rectangle` unchanged.
    pub fn make_visible(&mut self, child: &C, rectangle: Rect) -> Rect
    where
        C: PartialEq,
    {
        let Some(index) = self
            .children
            .iter()
            .find(|realized| realized.child == *child)
            .map(|realized| realized.index)
        else {
            return rectangle;
        };

        let row_top = self.geometry().row_top(index);
        let offset = self.vertical_offset();
        if offset > row_top || offset + self.viewport_height() < row_top {
            self.set_vertical_offset(row_top);
        }
        rectangle
    }

    fn scroll_horizontally(
        &mut self,
        delta: f64,
        operation: ScrollOperation,
    ) -> Result<(), ScrollError> {
        self.set_horizontal_offset(self.horizontal_offset() + delta)
            .map_err(|_| ScrollError::Unsupported(operation))
    }

    fn update_metrics<O>(
        &mut self,
        geometry: &GridGeometry,
        size: Size,
        item_count: usize,
        owner: &mut O,
    ) -> Size
    where
        O: ScrollInvalidationSink + ?Sized,
    {
        let extent = geometry.extent(size.width, item_count);
        self.scroll.update_extent(extent, owner);
        self.scroll.update_viewport(size, owner);
        // Shrinking content or a taller viewport can leave the old offset past the end.
        let offset = self.scroll.offset().y;
        if self.scroll.set_vertical_offset(offset) != offset {
            self.needs_measure = true;
        }
        extent
    }

    fn evict_outside<G>(&mut self, range: Option<VisibleRange>, generator: &mut G)
    where
        G: ContainerGenerator<Child = C>,
    {
        #[cfg(feature = "tracing")]
        let before = self.children.len();
        let children = core::mem::take(&mut self.children);
        for realized in children {
            if range.is_some_and(|range| range.contains(realized.index)) {
                self.children.push(realized);
            } else {
                generator.release(realized.index, realized.child);
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(evicted = before - self.children.len(), "released containers");
    }

    fn realize<G>(&mut self, range: VisibleRange, generator: &mut G)
    where
        G: ContainerGenerator<Child = C>,
    {
        let mut replaced = Vec::new();
        #[cfg(feature = "tracing")]
        let mut realized_count = 0_usize;
        {
            let position = generator.position_from_index(range.first);
            let mut session =
                RealizationSession::start(generator, position, GeneratorDirection::Forward);
            for index in range.indices() {
                let Some(generated) = session.realize_next() else {
                    break;
                };
                let mut child = generated.child;
                if generated.newly_realized {
                    session.prepare(&mut child);
                    #[cfg(feature = "tracing")]
                    {
                        realized_count += 1;
                    }
                }
                match self
                    .children
                    .binary_search_by_key(&index, |realized| realized.index)
                {
                    Ok(pos) if generated.newly_realized => {
                        // The generator rebuilt a container we still hold.
                        let old = core::mem::replace(&mut self.children[pos].child, child);
                        self.children[pos].slot = None;
                        replaced.push((index, old));
                    }
                    Ok(_) => {}
                    Err(pos) => self.children.insert(
                        pos,
                        RealizedChild {
                            index,
                            child,
                            slot: None,
                        },
                    ),
                }
            }
        }
        for (index, old) in replaced {
            generator.release(index, old);
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            first = range.first,
            last = range.last,
            realized = realized_count,
            "realized containers"
        );
    }
}

fn debug_assert_valid_cell(cell_size: Size) {
    debug_assert!(
        cell_size.width > 0.0
            && cell_size.height > 0.0
            && cell_size.width.is_finite()
            && cell_size.height.is_finite(),
        "WrapPanel cell size must be finite and positive; got {cell_size:?}"
    );
}
