//! Outside-click detection
//!
//! [`PointerHub`] is the screen-wide registry of pointer listeners. An open
//! picker holds a [`PointerSubscription`]; dropping the subscription removes
//! the listener, so a closed or dropped picker never leaves a handler behind.
//!
//! The hub is single-threaded (`Rc`), matching the UI event loop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

/// Rectangular screen area in cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the cell at (`x`, `y`) lies inside this region
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let right = u32::from(self.x) + u32::from(self.width);
        let bottom = u32::from(self.y) + u32::from(self.height);
        x >= self.x && u32::from(x) < right && y >= self.y && u32::from(y) < bottom
    }
}

/// Identifier of a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug)]
struct Listener {
    id: ListenerId,
    /// Areas that count as "inside" (trigger and overlay)
    regions: Vec<Region>,
}

#[derive(Debug, Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<Listener>,
}

/// Registry of outside-click listeners
#[derive(Debug, Clone, Default)]
pub struct PointerHub {
    inner: Rc<RefCell<HubInner>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays registered until the subscription drops
    pub fn subscribe(&self) -> PointerSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push(Listener {
            id,
            regions: Vec::new(),
        });
        trace!(listener = id.0, active = inner.listeners.len(), "pointer listener registered");

        PointerSubscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live listeners
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Listeners for which a press at (`x`, `y`) is outside all their regions
    pub fn dispatch(&self, x: u16, y: u16) -> Vec<ListenerId> {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|listener| !listener.regions.iter().any(|r| r.contains(x, y)))
            .map(|listener| listener.id)
            .collect()
    }
}

/// Live registration in a [`PointerHub`]; unregisters on drop
#[derive(Debug)]
pub struct PointerSubscription {
    id: ListenerId,
    hub: Weak<RefCell<HubInner>>,
}

impl PointerSubscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Replace the inside regions (called on every render)
    pub fn set_regions(&self, regions: impl IntoIterator<Item = Region>) {
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        let mut inner = hub.borrow_mut();
        if let Some(listener) = inner.listeners.iter_mut().find(|l| l.id == self.id) {
            listener.regions = regions.into_iter().collect();
        }
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            let mut inner = hub.borrow_mut();
            inner.listeners.retain(|l| l.id != self.id);
            trace!(listener = self.id.0, active = inner.listeners.len(), "pointer listener removed");
        }
    }
}
