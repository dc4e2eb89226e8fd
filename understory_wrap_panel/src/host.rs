// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities the host UI framework provides to a [`WrapPanel`](crate::WrapPanel).
//!
//! The panel never creates or destroys containers itself. It asks a
//! [`ContainerGenerator`] for containers bound to item indices, hands
//! containers it no longer needs back through [`ContainerGenerator::release`],
//! and tells a [`ScrollInvalidationSink`] when scroll metrics went stale.

use kurbo::{Rect, Size};

/// Direction in which a generator walks items during realization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorDirection {
    /// Towards higher item indices.
    Forward,
    /// Towards lower item indices.
    Backward,
}

/// A container produced by [`ContainerGenerator::generate_next`].
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<C> {
    /// The container bound to the next item.
    pub child: C,
    /// `true` if the container was created (or recycled) for this call and
    /// still needs [`ContainerGenerator::prepare_container`].
    pub newly_realized: bool,
}

/// Host service that creates, recycles and binds item containers.
///
/// The generator is the sole authority over container lifetime. A panel
/// drives it in sessions: [`start_at`](Self::start_at), a run of
/// [`generate_next`](Self::generate_next) calls, then [`stop`](Self::stop).
/// [`RealizationSession`] wraps that sequence so `stop` always runs.
pub trait ContainerGenerator {
    /// Handle to a realized container.
    type Child;
    /// Opaque cursor into the generator's item sequence.
    type Position: Copy;

    /// Maps an item index to a cursor for [`start_at`](Self::start_at).
    fn position_from_index(&self, index: usize) -> Self::Position;

    /// Begins a realization session at `position`, walking in `direction`.
    fn start_at(&mut self, position: Self::Position, direction: GeneratorDirection);

    /// Produces the container for the next item, or `None` past the end of the items.
    fn generate_next(&mut self) -> Option<Generated<Self::Child>>;

    /// Binds item data into a freshly realized container.
    fn prepare_container(&mut self, child: &mut Self::Child);

    /// Ends the current realization session.
    fn stop(&mut self);

    /// Returns the container for item `index`; the generator may destroy or recycle it.
    fn release(&mut self, index: usize, child: Self::Child);
}

/// Scoped realization session over a [`ContainerGenerator`].
///
/// Dropping the session ends it.
#[derive(Debug)]
pub struct RealizationSession<'a, G: ContainerGenerator> {
    generator: &'a mut G,
}

impl<'a, G: ContainerGenerator> RealizationSession<'a, G> {
    /// Starts a session at `position`.
    pub fn start(
        generator: &'a mut G,
        position: G::Position,
        direction: GeneratorDirection,
    ) -> Self {
        generator.start_at(position, direction);
        Self { generator }
    }

    /// Realizes the next container in the session's direction.
    pub fn realize_next(&mut self) -> Option<Generated<G::Child>> {
        self.generator.generate_next()
    }

    /// Binds data into a container realized by this session.
    pub fn prepare(&mut self, child: &mut G::Child) {
        self.generator.prepare_container(child);
    }
}

impl<G: ContainerGenerator> Drop for RealizationSession<'_, G> {
    fn drop(&mut self) {
        self.generator.stop();
    }
}

/// Receiver for "cached scroll metrics are stale" notifications.
///
/// Hosts typically forward this to their scroll viewer so scroll bars
/// re-query extent, viewport and offset.
pub trait ScrollInvalidationSink {
    /// Extent, viewport or offset changed and should be re-queried.
    fn invalidate_scroll_info(&mut self);
}

/// No scroll owner attached.
impl ScrollInvalidationSink for () {
    fn invalidate_scroll_info(&mut self) {}
}

impl<T: ScrollInvalidationSink + ?Sized> ScrollInvalidationSink for &mut T {
    fn invalidate_scroll_info(&mut self) {
        (**self).invalidate_scroll_info();
    }
}

/// A realized container that the panel can size and position.
pub trait LayoutChild {
    /// Measures the container against the fixed cell size.
    fn measure(&mut self, available: Size);

    /// Assigns the container its final slot in panel coordinates.
    fn arrange(&mut self, slot: Rect);
}
