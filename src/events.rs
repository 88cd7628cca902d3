//! Listener registry with explicit subscription handles.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<E> = Rc<RefCell<Box<dyn FnMut(&E)>>>;

struct Registry<E> {
    next_id: u64,
    listeners: Vec<(u64, Listener<E>)>,
}

/// Single-threaded publisher. Dispatch works on a snapshot of the listener
/// list, so callbacks may subscribe or unsubscribe while an event is being
/// delivered. A callback that is already running is not re-entered.
pub struct EventHub<E> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E: 'static> EventHub<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, callback: impl FnMut(&E) + 'static) -> Subscription {
        let id = {
            let mut reg = self.registry.borrow_mut();
            reg.next_id += 1;
            let id = reg.next_id;
            let boxed: Box<dyn FnMut(&E)> = Box::new(callback);
            reg.listeners.push((id, Rc::new(RefCell::new(boxed))));
            id
        };

        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(reg) = weak.upgrade() {
                    reg.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    /// Delivers `event` to every live listener; returns how many ran.
    pub fn emit(&self, event: &E) -> usize {
        let snapshot: Vec<(u64, Listener<E>)> = self.registry.borrow().listeners.clone();
        let mut delivered = 0;
        for (id, listener) in snapshot {
            let live = self
                .registry
                .borrow()
                .listeners
                .iter()
                .any(|(lid, _)| *lid == id);
            if !live {
                continue;
            }
            if let Ok(mut callback) = listener.try_borrow_mut() {
                let f: &mut dyn FnMut(&E) = &mut **callback;
                f(event);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl<E: 'static> Default for EventHub<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventHub<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.registry.borrow().listeners.len())
            .finish()
    }
}

/// Keeps a listener registered until dropped or [`Subscription::unsubscribe`]d.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
