//! Pointer event subscriptions.
//!
//! Handlers are registered with [`PointerEvents::subscribe`] and stay alive for as
//! long as the returned [`Subscription`] does. Dropping the subscription removes
//! the handler, so a view that is swapped out cannot keep receiving events.
//! Everything here runs on the render thread; events from another thread must be
//! forwarded to it before dispatch.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::geometry::Point2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Moved,
    Dragged,
}

type Handler = Rc<RefCell<dyn FnMut(Point2)>>;

struct Entry {
    id: u64,
    kind: PointerEventKind,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Registry of pointer handlers. Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct PointerEvents {
    registry: Rc<RefCell<Registry>>,
}

impl PointerEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, kind: PointerEventKind, handler: impl FnMut(Point2) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(Entry {
            id,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Calls every handler registered for `kind`, in subscription order.
    ///
    /// Handlers may subscribe or unsubscribe while running. A handler added during
    /// a dispatch first runs on the next one; a handler removed during a dispatch
    /// is skipped if it has not run yet.
    pub fn dispatch(&self, kind: PointerEventKind, position: Point2) {
        let matching: Vec<(u64, Handler)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| (e.id, Rc::clone(&e.handler)))
            .collect();

        for (id, handler) in matching {
            if !self.is_subscribed(id) {
                continue;
            }
            // A handler that dispatches again does not re-enter itself.
            if let Ok(mut handler) = handler.try_borrow_mut() {
                (&mut *handler)(position);
            }
        }
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.registry.borrow().entries.iter().any(|e| e.id == id)
    }

    pub fn handler_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

/// Handle for one registered handler. Unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes the handler"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().entries.retain(|e| e.id != self.id);
        }
    }
}
