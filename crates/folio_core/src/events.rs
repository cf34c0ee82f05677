//! Listener registry
//!
//! Listeners are stored in a slotmap and addressed by the `ListenerId` returned
//! from `add`. Removal takes that id, so a listener can only be removed by the
//! party that registered it, and removing it twice is a harmless no-op.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a registered listener
    pub struct ListenerId;
}

type Callback<T> = Box<dyn FnMut(&T)>;

/// A set of listeners notified with a `&T` payload
pub struct Listeners<T> {
    callbacks: SlotMap<ListenerId, Callback<T>>,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            callbacks: SlotMap::with_key(),
        }
    }

    /// Register a listener and return its handle
    pub fn add<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&T) + 'static,
    {
        self.callbacks.insert(Box::new(callback))
    }

    /// Remove a listener. Returns false if the handle was already removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.callbacks.remove(id).is_some()
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.callbacks.contains_key(id)
    }

    /// Notify every listener
    pub fn emit(&mut self, payload: &T) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(payload);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn clear(&mut self) {
        self.callbacks.clear();
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}
