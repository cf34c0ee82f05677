//! Frame scheduler
//!
//! A single per-process scheduler replaces the shared global ticker. The host
//! calls [`FrameScheduler::frame`] once per display refresh with a monotonic
//! timestamp; every registered tick callback then runs in phase order:
//!
//! 1. [`FramePhase::Scroll`]: the smoothed-scroll engine advances its offset
//! 2. [`FramePhase::Animate`]: triggers and timelines advance
//! 3. [`FramePhase::Commit`]: rendered property values are written out
//!
//! so no trigger ever sees an offset from the previous frame mixed with the
//! current frame's layout. Within a phase, callbacks run in registration
//! order.
//!
//! Components receive a [`SchedulerHandle`] (a weak reference) and remove
//! their callbacks when they are dropped or destroyed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a registered tick callback
    pub struct TickCallbackId;
}

/// Ordering bucket for tick callbacks within one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FramePhase {
    Scroll,
    Animate,
    Commit,
}

/// Timing information passed to tick callbacks
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Host timestamp of this frame in milliseconds
    pub timestamp_ms: f64,
    /// Time since the previous frame (0 on the first frame after `start`)
    pub delta_ms: f32,
    /// Frames run since the scheduler was created
    pub frame: u64,
}

/// Clamp for oversized gaps between frames (e.g. a backgrounded tab)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LagSmoothing {
    /// Gaps longer than this are treated as lag
    pub threshold_ms: f32,
    /// Delta reported instead of a lagging gap
    pub adjusted_ms: f32,
}

impl Default for LagSmoothing {
    fn default() -> Self {
        Self {
            threshold_ms: 500.0,
            adjusted_ms: 33.0,
        }
    }
}

/// Callback invoked once per frame
pub type TickCallback = Box<dyn FnMut(&FrameTime)>;

struct CallbackEntry {
    phase: FramePhase,
    order: u64,
    /// Taken out while the callback runs so it can re-enter the scheduler
    callback: Option<TickCallback>,
}

struct SchedulerInner {
    callbacks: SlotMap<TickCallbackId, CallbackEntry>,
    running: bool,
    last_timestamp: Option<f64>,
    frame: u64,
    next_order: u64,
    lag_smoothing: Option<LagSmoothing>,
}

impl SchedulerInner {
    fn insert(&mut self, phase: FramePhase, callback: TickCallback) -> TickCallbackId {
        let order = self.next_order;
        self.next_order += 1;
        self.callbacks.insert(CallbackEntry {
            phase,
            order,
            callback: Some(callback),
        })
    }
}

/// The per-frame clock shared by the scroll engine and the trigger coordinator
pub struct FrameScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl FrameScheduler {
    /// Create a stopped scheduler. Lag smoothing is off, so large frame gaps
    /// are reported as they are.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                callbacks: SlotMap::with_key(),
                running: false,
                last_timestamp: None,
                frame: 0,
                next_order: 0,
                lag_smoothing: None,
            })),
        }
    }

    /// Begin accepting frames
    pub fn start(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.running {
            inner.running = true;
            inner.last_timestamp = None;
            tracing::debug!("FrameScheduler: started");
        }
    }

    /// Stop accepting frames. The next `start` does not see the gap.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.running {
            inner.running = false;
            inner.last_timestamp = None;
            tracing::debug!("FrameScheduler: stopped after {} frames", inner.frame);
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    pub fn set_lag_smoothing(&self, lag_smoothing: Option<LagSmoothing>) {
        self.inner.borrow_mut().lag_smoothing = lag_smoothing;
    }

    pub fn lag_smoothing(&self) -> Option<LagSmoothing> {
        self.inner.borrow().lag_smoothing
    }

    pub fn frame_count(&self) -> u64 {
        self.inner.borrow().frame
    }

    pub fn callback_count(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    /// Get a weak handle for components that register callbacks
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn add_tick_callback<F>(&self, phase: FramePhase, callback: F) -> TickCallbackId
    where
        F: FnMut(&FrameTime) + 'static,
    {
        self.inner.borrow_mut().insert(phase, Box::new(callback))
    }

    pub fn remove_tick_callback(&self, id: TickCallbackId) -> bool {
        self.inner.borrow_mut().callbacks.remove(id).is_some()
    }

    /// Run one frame at `timestamp_ms`.
    ///
    /// Returns false without running anything while the scheduler is stopped.
    /// Timestamps that go backwards are treated as a zero-length frame.
    pub fn frame(&self, timestamp_ms: f64) -> bool {
        let (time, order) = {
            let mut inner = self.inner.borrow_mut();
            if !inner.running {
                return false;
            }

            let mut delta_ms = match inner.last_timestamp {
                Some(last) => (timestamp_ms - last).max(0.0) as f32,
                None => 0.0,
            };
            if let Some(lag) = inner.lag_smoothing {
                if delta_ms > lag.threshold_ms {
                    tracing::trace!(
                        "FrameScheduler: lag of {:.1}ms smoothed to {:.1}ms",
                        delta_ms,
                        lag.adjusted_ms
                    );
                    delta_ms = lag.adjusted_ms;
                }
            }

            inner.last_timestamp = Some(timestamp_ms);
            inner.frame += 1;

            let mut order: Vec<(FramePhase, u64, TickCallbackId)> = inner
                .callbacks
                .iter()
                .map(|(id, entry)| (entry.phase, entry.order, id))
                .collect();
            order.sort_unstable_by_key(|&(phase, seq, _)| (phase, seq));

            let time = FrameTime {
                timestamp_ms,
                delta_ms,
                frame: inner.frame,
            };
            (time, order)
        };

        for (_, _, id) in order {
            let callback = {
                let mut inner = self.inner.borrow_mut();
                inner
                    .callbacks
                    .get_mut(id)
                    .and_then(|entry| entry.callback.take())
            };
            let Some(mut callback) = callback else {
                continue;
            };

            callback(&time);

            // The callback may have removed itself
            if let Some(entry) = self.inner.borrow_mut().callbacks.get_mut(id) {
                entry.callback = Some(callback);
            }
        }

        true
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the frame scheduler
///
/// Holding a handle does not keep the scheduler alive; every operation on a
/// dead handle is a no-op.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl SchedulerHandle {
    /// A handle that never upgrades (for components built without a scheduler)
    pub fn detached() -> Self {
        Self { inner: Weak::new() }
    }

    pub fn add_tick_callback<F>(&self, phase: FramePhase, callback: F) -> Option<TickCallbackId>
    where
        F: FnMut(&FrameTime) + 'static,
    {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow_mut().insert(phase, Box::new(callback)))
    }

    pub fn remove_tick_callback(&self, id: TickCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            // Removal during a frame is fine: the running callback was taken out
            // of its entry and is dropped instead of restored.
            if let Ok(mut inner) = inner.try_borrow_mut() {
                inner.callbacks.remove(id);
            }
        }
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
