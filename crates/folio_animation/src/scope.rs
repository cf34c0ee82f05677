//! Animation scopes
//!
//! A section registers several triggers and timelines when it mounts. It
//! collects their handles in one `AnimationScope`, and unmounting the section
//! drops the scope, which unregisters everything it holds.

use crate::trigger::{TimelineHandle, TriggerHandle};

/// Owns the disposal handles of one component
#[derive(Default)]
pub struct AnimationScope {
    name: String,
    triggers: Vec<TriggerHandle>,
    timelines: Vec<TimelineHandle>,
}

impl AnimationScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            triggers: Vec::new(),
            timelines: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_trigger(&mut self, handle: TriggerHandle) {
        self.triggers.push(handle);
    }

    pub fn add_timeline(&mut self, handle: TimelineHandle) {
        self.timelines.push(handle);
    }

    pub fn triggers(&self) -> &[TriggerHandle] {
        &self.triggers
    }

    pub fn timelines(&self) -> &[TimelineHandle] {
        &self.timelines
    }

    pub fn len(&self) -> usize {
        self.triggers.len() + self.timelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unregister everything now. The scope can be reused afterwards.
    pub fn revert(&mut self) {
        if !self.is_empty() {
            tracing::debug!(
                "AnimationScope {:?}: reverting {} triggers, {} timelines",
                self.name,
                self.triggers.len(),
                self.timelines.len()
            );
        }
        self.triggers.clear();
        self.timelines.clear();
    }
}

impl Drop for AnimationScope {
    fn drop(&mut self) {
        self.revert();
    }
}
