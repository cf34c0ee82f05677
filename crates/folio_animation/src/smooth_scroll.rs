//! Smoothed-scroll engine
//!
//! Input moves a raw offset immediately; the virtual offset follows it once
//! per frame:
//!
//! ```text
//! virtual += (raw - virtual) * easing(clamp(elapsed / duration, 0, 1))
//! ```
//!
//! The factor is strictly inside `(0, 1]`, so the virtual offset approaches
//! the raw offset without overshooting. Once it is within `SETTLE_EPSILON` it
//! snaps, which bounds the number of ticks convergence takes. Listeners hear
//! about a new offset only when it moved by more than `CHANGE_EPSILON`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use folio_core::{ListenerId, Listeners, Size};

use crate::easing::Easing;
use crate::scheduler::{FramePhase, FrameScheduler, SchedulerHandle, TickCallbackId};

/// Movement below this (px) does not notify listeners
pub const CHANGE_EPSILON: f32 = 0.001;

/// Distance (px) at which the virtual offset snaps onto the raw offset
pub const SETTLE_EPSILON: f32 = 0.1;

/// Engine configuration
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothScrollConfig {
    /// Smoothing time constant in milliseconds
    pub duration_ms: f32,
    pub easing: Easing,
    /// Smooth wheel input (only above `touch_breakpoint_px`)
    pub smooth_wheel: bool,
    /// Smooth touch input
    pub smooth_touch: bool,
    pub wheel_multiplier: f32,
    /// Viewports this wide or narrower follow input natively
    pub touch_breakpoint_px: f32,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1200.0,
            easing: Easing::SmoothScroll,
            smooth_wheel: true,
            smooth_touch: false,
            wheel_multiplier: 1.0,
            touch_breakpoint_px: 768.0,
        }
    }
}

/// Source of a scroll request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Wheel,
    Touch,
    /// Anchor navigation and other scripted scrolls
    Programmatic,
}

/// Current scroll positions
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Target offset driven directly by input
    pub raw_offset: f32,
    /// Smoothed offset the page is rendered at
    pub virtual_offset: f32,
    /// Movement of the virtual offset in the last tick (px per frame)
    pub velocity: f32,
}

/// Payload of a scroll change notification
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEvent {
    pub offset: f32,
    pub velocity: f32,
    /// Fraction of the scrollable range, 0 when nothing can scroll
    pub progress: f32,
    pub limit: f32,
}

struct EngineState {
    config: SmoothScrollConfig,
    scroll: ScrollState,
    viewport: Size,
    document_height: f32,
    last_input: InputKind,
    destroyed: bool,
}

impl EngineState {
    fn limit(&self) -> f32 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    fn progress(&self) -> f32 {
        let limit = self.limit();
        if self.viewport.height <= 0.0 || limit <= 0.0 {
            0.0
        } else {
            (self.scroll.virtual_offset / limit).clamp(0.0, 1.0)
        }
    }

    fn smoothing(&self) -> bool {
        if self.config.duration_ms <= 0.0 {
            return false;
        }
        match self.last_input {
            InputKind::Wheel => {
                self.config.smooth_wheel && self.viewport.width > self.config.touch_breakpoint_px
            }
            InputKind::Touch => self.config.smooth_touch,
            InputKind::Programmatic => true,
        }
    }

    fn event(&self) -> ScrollEvent {
        ScrollEvent {
            offset: self.scroll.virtual_offset,
            velocity: self.scroll.velocity,
            progress: self.progress(),
            limit: self.limit(),
        }
    }

    /// Advance the virtual offset; returns an event when it moved
    fn advance(&mut self, elapsed_ms: f32) -> Option<ScrollEvent> {
        if self.destroyed {
            return None;
        }

        let limit = self.limit();
        self.scroll.raw_offset = self.scroll.raw_offset.clamp(0.0, limit);
        let raw = self.scroll.raw_offset;
        let previous = self.scroll.virtual_offset;

        let mut next = if self.smoothing() {
            let t = (elapsed_ms.max(0.0) / self.config.duration_ms).clamp(0.0, 1.0);
            let factor = self.config.easing.apply(t).clamp(0.0, 1.0);
            previous + (raw - previous) * factor
        } else {
            raw
        };
        if (raw - next).abs() < SETTLE_EPSILON {
            next = raw;
        }
        next = next.clamp(0.0, limit);

        let delta = next - previous;
        self.scroll.virtual_offset = next;

        if delta.abs() > CHANGE_EPSILON {
            self.scroll.velocity = delta;
            Some(self.event())
        } else {
            self.scroll.velocity = 0.0;
            None
        }
    }
}

/// Listener set that tolerates removal from inside a notification
#[derive(Default)]
struct ScrollListeners {
    listeners: RefCell<Listeners<ScrollEvent>>,
    deferred_removals: RefCell<Vec<ListenerId>>,
    /// Events raised by a listener during an emission, delivered after it
    queued: RefCell<VecDeque<ScrollEvent>>,
}

impl ScrollListeners {
    fn emit(&self, event: &ScrollEvent) {
        let Ok(mut listeners) = self.listeners.try_borrow_mut() else {
            tracing::trace!("SmoothScroll: nested scroll event queued at {:.1}", event.offset);
            self.queued.borrow_mut().push_back(*event);
            return;
        };
        listeners.emit(event);
        loop {
            let next = self.queued.borrow_mut().pop_front();
            match next {
                Some(event) => listeners.emit(&event),
                None => break,
            }
        }
        drop(listeners);

        let removals: Vec<ListenerId> = self.deferred_removals.borrow_mut().drain(..).collect();
        if !removals.is_empty() {
            let mut listeners = self.listeners.borrow_mut();
            for id in removals {
                listeners.remove(id);
            }
        }
    }

    fn remove(&self, id: ListenerId) -> bool {
        match self.listeners.try_borrow_mut() {
            Ok(mut listeners) => listeners.remove(id),
            Err(_) => {
                self.deferred_removals.borrow_mut().push(id);
                true
            }
        }
    }
}

/// Weak reference to an engine's listener set, used to unsubscribe later
#[derive(Clone)]
pub struct ScrollListenerHandle {
    listeners: Weak<ScrollListeners>,
}

impl ScrollListenerHandle {
    pub fn off(&self, id: ListenerId) -> bool {
        self.listeners
            .upgrade()
            .map(|listeners| listeners.remove(id))
            .unwrap_or(false)
    }
}

fn tick_engine(state: &RefCell<EngineState>, listeners: &ScrollListeners, elapsed_ms: f32) -> f32 {
    let (offset, event) = {
        let mut state = state.borrow_mut();
        let event = state.advance(elapsed_ms);
        (state.scroll.virtual_offset, event)
    };
    if let Some(event) = event {
        listeners.emit(&event);
    }
    offset
}

/// The smoothed-scroll engine
///
/// Registers a [`FramePhase::Scroll`] callback on construction and removes it
/// in [`SmoothScroll::destroy`] (also run on drop).
pub struct SmoothScroll {
    state: Rc<RefCell<EngineState>>,
    listeners: Rc<ScrollListeners>,
    scheduler: SchedulerHandle,
    tick_id: Option<TickCallbackId>,
}

impl SmoothScroll {
    pub fn new(scheduler: &FrameScheduler, config: SmoothScrollConfig) -> Self {
        let state = Rc::new(RefCell::new(EngineState {
            config,
            scroll: ScrollState::default(),
            viewport: Size::ZERO,
            document_height: 0.0,
            last_input: InputKind::Wheel,
            destroyed: false,
        }));
        let listeners = Rc::new(ScrollListeners::default());

        let tick_id = {
            let state = Rc::clone(&state);
            let listeners = Rc::clone(&listeners);
            scheduler.add_tick_callback(FramePhase::Scroll, move |time| {
                tick_engine(&state, &listeners, time.delta_ms);
            })
        };

        tracing::debug!("SmoothScroll: created");

        Self {
            state,
            listeners,
            scheduler: scheduler.handle(),
            tick_id: Some(tick_id),
        }
    }

    /// Update viewport and document size (on mount and on every resize).
    /// Listeners are notified when the new limit pulls the offset back.
    pub fn set_dimensions(&self, viewport: Size, document_height: f32) {
        let event = {
            let mut state = self.state.borrow_mut();
            state.viewport = viewport;
            state.document_height = document_height.max(0.0);
            let limit = state.limit();
            let previous = state.scroll.virtual_offset;
            state.scroll.raw_offset = state.scroll.raw_offset.clamp(0.0, limit);
            state.scroll.virtual_offset = previous.clamp(0.0, limit);
            (!state.destroyed && (state.scroll.virtual_offset - previous).abs() > CHANGE_EPSILON)
                .then(|| state.event())
        };
        if let Some(event) = event {
            self.listeners.emit(&event);
        }
    }

    /// Apply wheel or touch input
    pub fn scroll_by(&self, delta: f32, kind: InputKind) {
        let mut state = self.state.borrow_mut();
        if state.destroyed {
            return;
        }
        let delta = match kind {
            InputKind::Wheel => delta * state.config.wheel_multiplier,
            InputKind::Touch | InputKind::Programmatic => delta,
        };
        let limit = state.limit();
        state.last_input = kind;
        state.scroll.raw_offset = (state.scroll.raw_offset + delta).clamp(0.0, limit);
    }

    /// Scroll to `target`. With `immediate` the virtual offset jumps there
    /// and listeners are notified right away.
    pub fn scroll_to(&self, target: f32, immediate: bool) {
        let event = {
            let mut state = self.state.borrow_mut();
            if state.destroyed {
                return;
            }
            let limit = state.limit();
            let target = if target.is_finite() { target } else { 0.0 };
            state.last_input = InputKind::Programmatic;
            state.scroll.raw_offset = target.clamp(0.0, limit);

            if immediate {
                let previous = state.scroll.virtual_offset;
                state.scroll.virtual_offset = state.scroll.raw_offset;
                state.scroll.velocity = 0.0;
                ((state.scroll.virtual_offset - previous).abs() > CHANGE_EPSILON)
                    .then(|| state.event())
            } else {
                None
            }
        };
        if let Some(event) = event {
            self.listeners.emit(&event);
        }
    }

    /// Advance by `elapsed_ms` and return the new virtual offset
    pub fn tick(&self, elapsed_ms: f32) -> f32 {
        tick_engine(&self.state, &self.listeners, elapsed_ms)
    }

    /// Current virtual offset
    pub fn offset(&self) -> f32 {
        self.state.borrow().scroll.virtual_offset
    }

    pub fn raw_offset(&self) -> f32 {
        self.state.borrow().scroll.raw_offset
    }

    pub fn state(&self) -> ScrollState {
        self.state.borrow().scroll
    }

    pub fn limit(&self) -> f32 {
        self.state.borrow().limit()
    }

    /// Fraction of the scrollable range; 0 for an empty viewport or document
    pub fn progress(&self) -> f32 {
        self.state.borrow().progress()
    }

    /// Whether the last input is being smoothed
    pub fn is_smoothing(&self) -> bool {
        self.state.borrow().smoothing()
    }

    pub fn is_settled(&self) -> bool {
        let state = self.state.borrow();
        state.scroll.raw_offset == state.scroll.virtual_offset
    }

    pub fn config(&self) -> SmoothScrollConfig {
        self.state.borrow().config.clone()
    }

    pub fn on_scroll<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(&ScrollEvent) + 'static,
    {
        self.listeners.listeners.borrow_mut().add(listener)
    }

    pub fn off(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_handle(&self) -> ScrollListenerHandle {
        ScrollListenerHandle {
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Stop ticking and drop every listener. Idempotent.
    pub fn destroy(&mut self) {
        if let Some(id) = self.tick_id.take() {
            self.scheduler.remove_tick_callback(id);
        }
        if let Ok(mut listeners) = self.listeners.listeners.try_borrow_mut() {
            listeners.clear();
        }
        if let Ok(mut state) = self.state.try_borrow_mut() {
            if !state.destroyed {
                state.destroyed = true;
                tracing::debug!("SmoothScroll: destroyed");
            }
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }
}

impl Drop for SmoothScroll {
    fn drop(&mut self) {
        self.destroy();
    }
}
