use super::error::BackendError;
use super::{Backend, StorageEvent};
use crate::event::{EventHub, Subscription, WeakEventHub};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

struct Shared {
    entries: HashMap<String, String>,
    /// Weak so that a context whose handles are all dropped goes away along
    /// with its listeners.
    contexts: Vec<(u64, WeakEventHub<StorageEvent>)>,
    next_context: u64,
    quota: Option<usize>,
}

impl Shared {
    fn used_bytes_with(&self, key: &str, value: &str) -> usize {
        let others: usize = self
            .entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        others + key.len() + value.len()
    }
}

/// In-memory storage shared between any number of contexts.
///
/// Each context behaves like one open tab over the same origin storage:
/// writes are immediately visible to every context, and every context other
/// than the writer receives a native [`StorageEvent`].
#[derive(Clone)]
pub struct MemoryBackend {
    shared: Rc<RefCell<Shared>>,
    context: u64,
    hub: EventHub<StorageEvent>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::with_shared(Shared {
            entries: HashMap::new(),
            contexts: Vec::new(),
            next_context: 0,
            quota: None,
        })
    }

    /// Storage that rejects writes once keys and values exceed `bytes` in total.
    pub fn with_quota(bytes: usize) -> Self {
        Self::with_shared(Shared {
            entries: HashMap::new(),
            contexts: Vec::new(),
            next_context: 0,
            quota: Some(bytes),
        })
    }

    fn with_shared(shared: Shared) -> Self {
        let shared = Rc::new(RefCell::new(shared));
        Self::attach(&shared)
    }

    fn attach(shared: &Rc<RefCell<Shared>>) -> Self {
        let hub = EventHub::new();
        let context = {
            let mut guard = shared.borrow_mut();
            let context = guard.next_context;
            guard.next_context += 1;
            guard.contexts.push((context, hub.downgrade()));
            context
        };

        Self {
            shared: Rc::clone(shared),
            context,
            hub,
        }
    }

    /// Opens another context over the same storage.
    pub fn open_context(&self) -> Self {
        Self::attach(&self.shared)
    }

    fn notify_others(&self, key: &str) {
        let hubs: Vec<EventHub<StorageEvent>> = {
            let mut shared = self.shared.borrow_mut();
            shared.contexts.retain(|(_, hub)| hub.upgrade().is_some());
            shared
                .contexts
                .iter()
                .filter(|(context, _)| *context != self.context)
                .filter_map(|(_, hub)| hub.upgrade())
                .collect()
        };

        let event = StorageEvent {
            key: key.to_string(),
        };
        for hub in hubs {
            hub.emit(&event);
        }
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.shared.borrow().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        {
            let mut shared = self.shared.borrow_mut();
            if let Some(quota) = shared.quota {
                let needed = shared.used_bytes_with(key, value);
                if needed > quota {
                    return Err(BackendError::QuotaExceeded { needed, quota });
                }
            }
            shared.entries.insert(key.to_string(), value.to_string());
        }
        self.notify_others(key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        let removed = self.shared.borrow_mut().entries.remove(key).is_some();
        if removed {
            self.notify_others(key);
        }
        Ok(())
    }

    fn subscribe(&self, listener: Box<dyn Fn(&StorageEvent)>) -> Subscription {
        self.hub.subscribe(listener)
    }
}
