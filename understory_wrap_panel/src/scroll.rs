// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cached scroll metrics and the errors surfaced by unsupported scroll entry points.

use core::fmt;

use kurbo::{Size, Vec2};

use crate::ScrollInvalidationSink;

/// Scroll entry points that a wrap panel does not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollOperation {
    /// Scroll one unit to the left.
    LineLeft,
    /// Scroll one unit to the right.
    LineRight,
    /// Mouse wheel tilted left.
    WheelLeft,
    /// Mouse wheel tilted right.
    WheelRight,
    /// Scroll one page up.
    PageUp,
    /// Scroll one page down.
    PageDown,
    /// Scroll one page to the left.
    PageLeft,
    /// Scroll one page to the right.
    PageRight,
    /// Set the horizontal offset directly.
    SetHorizontalOffset,
}

impl fmt::Display for ScrollOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LineLeft => "line left",
            Self::LineRight => "line right",
            Self::WheelLeft => "wheel left",
            Self::WheelRight => "wheel right",
            Self::PageUp => "page up",
            Self::PageDown => "page down",
            Self::PageLeft => "page left",
            Self::PageRight => "page right",
            Self::SetHorizontalOffset => "set horizontal offset",
        };
        f.write_str(name)
    }
}

/// Errors returned by scroll operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScrollError {
    /// The operation is not implemented by this layout. Scroll state is left untouched.
    #[error("{0} is not implemented")]
    Unsupported(ScrollOperation),
}

/// Extent, viewport, and offset of one panel, as last seen by its scroll owner.
///
/// Horizontal offset is always zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    extent: Size,
    viewport: Size,
    offset: Vec2,
}

impl ScrollState {
    /// Creates an empty state with everything at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            extent: Size::ZERO,
            viewport: Size::ZERO,
            offset: Vec2::ZERO,
        }
    }

    /// Total content size.
    #[must_use]
    pub const fn extent(&self) -> Size {
        self.extent
    }

    /// Visible window size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Stores `extent`, notifying `owner` once if it differs from the cached value.
    ///
    /// Returns `true` if the value changed.
    pub fn update_extent<O>(&mut self, extent: Size, owner: &mut O) -> bool
    where
        O: ScrollInvalidationSink + ?Sized,
    {
        if extent == self.extent {
            return false;
        }
        self.extent = extent;
        #[cfg(feature = "tracing")]
        tracing::debug!(width = extent.width, height = extent.height, "extent changed");
        owner.invalidate_scroll_info();
        true
    }

    /// Stores `viewport`, notifying `owner` once if it differs from the cached value.
    ///
    /// Returns `true` if the value changed.
    pub fn update_viewport<O>(&mut self, viewport: Size, owner: &mut O) -> bool
    where
        O: ScrollInvalidationSink + ?Sized,
    {
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "viewport changed"
        );
        owner.invalidate_scroll_info();
        true
    }

    /// Largest vertical offset that keeps the viewport inside the extent.
    #[must_use]
    pub fn max_vertical_offset(&self) -> f64 {
        (self.extent.height - self.viewport.height).max(0.0)
    }

    /// Clamps `value` into `0..=max_vertical_offset()`. NaN maps to `0`.
    #[must_use]
    pub fn clamp_vertical(&self, value: f64) -> f64 {
        // `f64::max` discards NaN in favour of the other operand.
        value.max(0.0).min(self.max_vertical_offset())
    }

    /// Clamps and stores a new vertical offset, returning the stored value.
    pub fn set_vertical_offset(&mut self, value: f64) -> f64 {
        self.offset.y = self.clamp_vertical(value);
        self.offset.y
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{ScrollError, ScrollOperation, ScrollState};
    use crate::ScrollInvalidationSink;
    use kurbo::Size;

    #[derive(Default)]
    struct Counter(usize);

    impl ScrollInvalidationSink for Counter {
        fn invalidate_scroll_info(&mut self) {
            self.0 += 1;
        }
    }

    fn state(extent_height: f64, viewport_height: f64) -> ScrollState {
        let mut state = ScrollState::new();
        state.update_extent(Size::new(300.0, extent_height), &mut ());
        state.update_viewport(Size::new(300.0, viewport_height), &mut ());
        state
    }

    #[test]
    fn vertical_offset_is_clamped_into_scrollable_range() {
        let mut state = state(1000.0, 300.0);
        assert_eq!(state.set_vertical_offset(5000.0), 700.0);
        assert_eq!(state.set_vertical_offset(-50.0), 0.0);
        assert_eq!(state.set_vertical_offset(250.0), 250.0);
        assert_eq!(state.set_vertical_offset(f64::NAN), 0.0);
    }

    #[test]
    fn content_smaller_than_viewport_pins_offset_at_zero() {
        let mut state = state(200.0, 300.0);
        assert_eq!(state.max_vertical_offset(), 0.0);
        assert_eq!(state.set_vertical_offset(120.0), 0.0);
    }

    #[test]
    fn updates_notify_only_on_change() {
        let mut owner = Counter::default();
        let mut state = ScrollState::new();

        assert!(state.update_extent(Size::new(100.0, 400.0), &mut owner));
        assert_eq!(owner.0, 1);
        assert!(!state.update_extent(Size::new(100.0, 400.0), &mut owner));
        assert_eq!(owner.0, 1);

        assert!(state.update_viewport(Size::new(100.0, 200.0), &mut owner));
        assert!(!state.update_viewport(Size::new(100.0, 200.0), &mut owner));
        assert_eq!(owner.0, 2);
    }

    #[test]
    fn unsupported_error_names_the_operation() {
        let err = ScrollError::Unsupported(ScrollOperation::PageDown);
        assert_eq!(err.to_string(), "page down is not implemented");
    }
}
