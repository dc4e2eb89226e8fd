// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A string gallery laid out by `understory_wrap_panel`.
//!
//! This example shows how a host framework plugs into a `WrapPanel`:
//! - a container generator that binds strings to tiles and recycles evicted tiles,
//! - a scroll owner that counts invalidations (a real host would refresh its scroll bars),
//! - the measure/arrange loop re-run whenever the panel asks for it.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_wrap_panel_demos --example wrap_panel_gallery`

use kurbo::{Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_wrap_panel::{
    ContainerGenerator, GeneratorDirection, Generated, LayoutChild, ScrollInvalidationSink,
    WrapPanel, WrapPanelConfig,
};

/// A visual container showing one string.
#[derive(Clone, Debug, Default)]
struct Tile {
    item: Option<usize>,
    label: String,
    slot: Option<Rect>,
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item
    }
}

impl LayoutChild for Tile {
    fn measure(&mut self, _available: Size) {}

    fn arrange(&mut self, slot: Rect) {
        self.slot = Some(slot);
    }
}

/// Binds strings to tiles, keeping released tiles around for reuse.
#[derive(Debug)]
struct Gallery {
    items: Vec<String>,
    realized: Vec<bool>,
    pool: Vec<Tile>,
    cursor: usize,
    created: usize,
}

impl Gallery {
    fn new(items: Vec<String>) -> Self {
        let realized = vec![false; items.len()];
        Self {
            items,
            realized,
            pool: Vec::new(),
            cursor: 0,
            created: 0,
        }
    }
}

impl ContainerGenerator for Gallery {
    type Child = Tile;
    type Position = usize;

    fn position_from_index(&self, index: usize) -> usize {
        index
    }

    fn start_at(&mut self, position: usize, direction: GeneratorDirection) {
        debug_assert_eq!(direction, GeneratorDirection::Forward, "gallery only walks forward");
        self.cursor = position;
    }

    fn generate_next(&mut self) -> Option<Generated<Tile>> {
        let index = self.cursor;
        if index >= self.items.len() {
            return None;
        }
        self.cursor += 1;
        if self.realized[index] {
            return Some(Generated {
                child: Tile {
                    item: Some(index),
                    ..Tile::default()
                },
                newly_realized: false,
            });
        }
        self.realized[index] = true;
        let mut tile = self.pool.pop().unwrap_or_else(|| {
            self.created += 1;
            Tile::default()
        });
        tile.item = Some(index);
        Some(Generated {
            child: tile,
            newly_realized: true,
        })
    }

    fn prepare_container(&mut self, child: &mut Tile) {
        if let Some(item) = child.item {
            child.label.clone_from(&self.items[item]);
        }
    }

    fn stop(&mut self) {}

    fn release(&mut self, index: usize, mut child: Tile) {
        self.realized[index] = false;
        child.item = None;
        child.slot = None;
        child.label.clear();
        self.pool.push(child);
    }
}

/// Stands in for a scroll viewer.
#[derive(Debug, Default)]
struct ScrollBars {
    refreshes: usize,
}

impl ScrollInvalidationSink for ScrollBars {
    fn invalidate_scroll_info(&mut self) {
        self.refreshes += 1;
    }
}

fn layout(panel: &mut WrapPanel<Tile>, gallery: &mut Gallery, bars: &mut ScrollBars, size: Size) {
    let count = gallery.items.len();
    panel.measure(size, count, gallery, bars);
    panel.arrange(size, count, bars);
}

fn print_visible(panel: &WrapPanel<Tile>) {
    let offset = panel.vertical_offset();
    for realized in panel.children() {
        let Some(slot) = realized.slot else { continue };
        let on_screen = slot.y1 > offset && slot.y0 < offset + panel.viewport_height();
        if on_screen {
            println!(
                "  #{:<4} {:<10} at ({:>5}, {:>6})",
                realized.index,
                realized.child.label,
                slot.x0,
                slot.y0 - offset
            );
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut items: Vec<String> = ["eden", "dva", "tri"].map(String::from).to_vec();
    items.extend((items.len()..500).map(|i| format!("item {i}")));

    let mut gallery = Gallery::new(items);
    let mut bars = ScrollBars::default();
    let mut config = WrapPanelConfig::new(Size::new(120.0, 40.0));
    config.scroll_unit_length = 200.0;
    let mut panel = WrapPanel::new(config);
    let viewport = Size::new(400.0, 120.0);

    layout(&mut panel, &mut gallery, &mut bars, viewport);
    println!(
        "extent {:?}, {} per row, {} realized of {}",
        panel.extent(),
        panel.items_per_row(),
        panel.children().len(),
        gallery.items.len()
    );
    print_visible(&panel);

    for _ in 0..3 {
        panel.wheel_down(&mut bars);
        if panel.needs_measure() {
            layout(&mut panel, &mut gallery, &mut bars, viewport);
        }
        println!("scrolled to {}", panel.vertical_offset());
        print_visible(&panel);
    }

    if let Err(err) = panel.page_down() {
        tracing::warn!(%err, "page scrolling requested");
    }

    // The first realized tile sits in the overscan row above the viewport; scroll up to its row.
    let first = Tile {
        item: panel.children().first().map(|realized| realized.index),
        ..Tile::default()
    };
    panel.make_visible(&first, Rect::ZERO);
    layout(&mut panel, &mut gallery, &mut bars, viewport);
    println!("make_visible moved to {}", panel.vertical_offset());

    println!(
        "{} tiles created, {} pooled, {} scroll bar refreshes",
        gallery.created,
        gallery.pool.len(),
        bars.refreshes
    );
}
