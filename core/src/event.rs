//! Minimal observer registry shared by storage backends and stores.
//!
//! Everything here is single-threaded: listeners run synchronously on the
//! caller's thread, in subscription order.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<E> = Rc<dyn Fn(&E)>;

struct Registry<E: ?Sized> {
    next_id: u64,
    listeners: Vec<(u64, Listener<E>)>,
}

/// An ordered list of listeners for events of type `E`.
///
/// Cloning yields another handle to the same list.
pub struct EventHub<E: ?Sized> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E: ?Sized> Clone for EventHub<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

/// A non-owning handle to an [`EventHub`].
pub struct WeakEventHub<E: ?Sized> {
    registry: Weak<RefCell<Registry<E>>>,
}

impl<E: ?Sized> WeakEventHub<E> {
    /// `None` once every `EventHub` handle has been dropped.
    pub fn upgrade(&self) -> Option<EventHub<E>> {
        self.registry.upgrade().map(|registry| EventHub { registry })
    }
}

impl<E: ?Sized + 'static> Default for EventHub<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized + 'static> EventHub<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&E) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Rc::new(listener)));
            id
        };

        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
        Subscription::from_cancel(move || {
            if let Some(registry) = weak.upgrade() {
                registry
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    /// Calls every listener registered at the time of the call.
    ///
    /// Listeners may subscribe or unsubscribe while being notified; such
    /// changes take effect from the next `emit`.
    pub fn emit(&self, event: &E) {
        let listeners: Vec<Listener<E>> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(event);
        }
    }

    pub fn downgrade(&self) -> WeakEventHub<E> {
        WeakEventHub {
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by `subscribe`. Dropping it does NOT unsubscribe.
#[derive(Default)]
pub struct Subscription {
    cancels: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl Subscription {
    fn from_cancel(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancels: RefCell::new(vec![Box::new(cancel)]),
        }
    }

    /// A subscription with nothing to cancel.
    pub fn noop() -> Self {
        Self::default()
    }

    /// Combines two handles; unsubscribing the result cancels both.
    pub fn join(self, other: Subscription) -> Subscription {
        let mut cancels = self.cancels.into_inner();
        cancels.extend(other.cancels.into_inner());
        Self {
            cancels: RefCell::new(cancels),
        }
    }

    /// Deregisters the listener(s). Calling it again is a no-op.
    pub fn unsubscribe(&self) {
        let cancels = std::mem::take(&mut *self.cancels.borrow_mut());
        for cancel in cancels {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("pending", &self.cancels.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
