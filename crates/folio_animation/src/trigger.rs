//! Scroll triggers
//!
//! A trigger binds a scroll range, expressed relative to a target element and
//! the viewport, to a timeline. On every scroll update the coordinator
//! recomputes each trigger's progress from the current offset and the
//! target's current bounds:
//!
//! ```text
//! progress = clamp((offset - start_px) / (end_px - start_px), 0, 1)
//! ```
//!
//! Scrubbed triggers drive their timeline's position directly (or ease
//! towards it over a lag); other triggers play their timeline once progress
//! leaves 0. Nothing is cached between updates, so a resize only needs
//! [`ScrollTriggerCoordinator::refresh`].
//!
//! # Example
//!
//! ```rust
//! use folio_animation::{Scrub, ScrollTrigger, TriggerAnchor};
//! use folio_core::ElementId;
//!
//! let trigger = ScrollTrigger::new(ElementId::default())
//!     .start("top 80%".parse::<TriggerAnchor>().unwrap())
//!     .scrub(Scrub::Smoothed(1.0))
//!     .once(true);
//! assert!(trigger.end.is_none());
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use folio_core::{ElementId, LayoutProvider, ListenerId, Listeners, PropertySink, Rect, Size};

use crate::error::{AnimationError, Result};
use crate::scheduler::{FramePhase, FrameScheduler, SchedulerHandle, TickCallbackId};
use crate::smooth_scroll::{ScrollListenerHandle, SmoothScroll};
use crate::timeline::Timeline;

new_key_type! {
    /// Handle to a registered trigger
    pub struct TriggerId;
    /// Handle to a free-running timeline owned by the coordinator
    pub struct TimelineId;
}

/// Scrub timelines stop easing once this close to their target progress
const SCRUB_EPSILON: f32 = 1e-4;

// =============================================================================
// ANCHORS
// =============================================================================

/// A position along an element or the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    /// Percentage of the length from the top
    Percent(f32),
    /// Pixels from the top
    Pixels(f32),
}

impl Edge {
    /// Distance from the top of something `length` pixels tall
    pub fn resolve(self, length: f32) -> f32 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => length * 0.5,
            Edge::Bottom => length,
            Edge::Percent(percent) => length * percent / 100.0,
            Edge::Pixels(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = AnimationError;

    fn from_str(token: &str) -> Result<Self> {
        let invalid = || AnimationError::InvalidAnchor(token.to_string());
        match token {
            "top" => Ok(Edge::Top),
            "center" => Ok(Edge::Center),
            "bottom" => Ok(Edge::Bottom),
            _ => {
                if let Some(percent) = token.strip_suffix('%') {
                    percent.parse().map(Edge::Percent).map_err(|_| invalid())
                } else {
                    parse_pixels(token).map(Edge::Pixels).ok_or_else(invalid)
                }
            }
        }
    }
}

fn parse_pixels(token: &str) -> Option<f32> {
    let number = token.strip_suffix("px").unwrap_or(token);
    number.parse::<f32>().ok().filter(|px| px.is_finite())
}

/// Where a trigger range starts or ends
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerAnchor {
    /// When `element` on the target meets `viewport` on the screen,
    /// e.g. `"top 80%"`: the target's top reaches 80% down the viewport
    Relative { element: Edge, viewport: Edge },
    /// A fixed scroll offset in pixels
    Absolute(f32),
}

impl TriggerAnchor {
    pub fn relative(element: Edge, viewport: Edge) -> Self {
        TriggerAnchor::Relative { element, viewport }
    }

    /// Scroll offset at which this anchor is reached
    pub fn resolve(&self, bounds: Rect, viewport: Size) -> f32 {
        match *self {
            TriggerAnchor::Relative { element, viewport: edge } => {
                bounds.top() + element.resolve(bounds.height()) - edge.resolve(viewport.height)
            }
            TriggerAnchor::Absolute(px) => px,
        }
    }
}

impl FromStr for TriggerAnchor {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: SmallVec<[&str; 2]> = s.split_whitespace().collect();
        match tokens.as_slice() {
            [single] => parse_pixels(single)
                .map(TriggerAnchor::Absolute)
                .ok_or_else(|| AnimationError::InvalidAnchor(s.to_string())),
            [element, viewport] => Ok(TriggerAnchor::Relative {
                element: element.parse()?,
                viewport: viewport.parse()?,
            }),
            _ => Err(AnimationError::InvalidAnchor(s.to_string())),
        }
    }
}

// =============================================================================
// TRIGGER
// =============================================================================

/// How a trigger's progress reaches its timeline
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Scrub {
    /// Play the timeline once progress leaves 0
    #[default]
    Off,
    /// Timeline position equals progress
    Immediate,
    /// Timeline position eases towards progress over roughly this many seconds
    Smoothed(f32),
}

/// A declared scroll trigger
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTrigger {
    pub target: ElementId,
    pub start: TriggerAnchor,
    /// `None` makes this a point trigger: progress jumps from 0 to 1 at `start`
    pub end: Option<TriggerAnchor>,
    pub scrub: Scrub,
    /// Enter a terminal state after completing once
    pub once: bool,
}

impl ScrollTrigger {
    /// A point trigger that fires when the target's top enters the viewport
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            start: TriggerAnchor::relative(Edge::Top, Edge::Bottom),
            end: None,
            scrub: Scrub::Off,
            once: false,
        }
    }

    pub fn start(mut self, anchor: TriggerAnchor) -> Self {
        self.start = anchor;
        self
    }

    pub fn end(mut self, anchor: TriggerAnchor) -> Self {
        self.end = Some(anchor);
        self
    }

    pub fn scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = scrub;
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Resolve `(start_px, end_px)` against the current layout
    pub fn range(&self, layout: &dyn LayoutProvider) -> Result<(f32, Option<f32>)> {
        let viewport = layout.viewport();
        if !(viewport.height.is_finite() && viewport.height > 0.0) {
            return Err(AnimationError::EmptyViewport);
        }
        let bounds = layout
            .bounds(self.target)
            .ok_or(AnimationError::Unmounted(self.target.to_raw()))?;

        let start = self.start.resolve(bounds, viewport);
        let end = self.end.map(|end| end.resolve(bounds, viewport));
        if !start.is_finite() || end.is_some_and(|end| !end.is_finite()) {
            return Err(AnimationError::InvalidRange {
                start,
                end: end.unwrap_or(start),
            });
        }
        Ok((start, end))
    }

    /// Progress at a scroll offset. A range that does not extend past its
    /// start behaves like a point trigger.
    pub fn progress_at(&self, offset: f32, layout: &dyn LayoutProvider) -> Result<f32> {
        let (start, end) = self.range(layout)?;
        Ok(match end {
            Some(end) if end > start => ((offset - start) / (end - start)).clamp(0.0, 1.0),
            _ => {
                if offset >= start {
                    1.0
                } else {
                    0.0
                }
            }
        })
    }
}

/// Lifecycle of a registered trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerState {
    /// Progress is 0
    Idle,
    /// Progress is above 0
    Active,
    /// A `once` trigger that finished; never evaluated again
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEventKind {
    /// Progress left 0 going forward
    Enter,
    /// Progress reached 1 going forward
    Leave,
    /// Progress dropped below 1 going back
    EnterBack,
    /// Progress returned to 0
    LeaveBack,
    /// A `once` trigger reached its terminal state
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerEvent {
    pub id: TriggerId,
    pub target: ElementId,
    pub kind: TriggerEventKind,
    pub progress: f32,
}

// =============================================================================
// COORDINATOR
// =============================================================================

struct TriggerEntry {
    trigger: ScrollTrigger,
    timeline: Timeline,
    progress: f32,
    scrub_target: f32,
    state: TriggerState,
    /// Set while geometry cannot be resolved, so the warning is logged once
    failing: bool,
}

impl TriggerEntry {
    fn is_settled(&self) -> bool {
        let caught_up = match self.trigger.scrub {
            Scrub::Smoothed(_) => (self.timeline.progress() - self.scrub_target).abs() <= SCRUB_EPSILON,
            Scrub::Off | Scrub::Immediate => true,
        };
        caught_up && !self.timeline.is_playing() && !self.timeline.has_pending()
    }

    fn update(
        &mut self,
        id: TriggerId,
        offset: f32,
        layout: &dyn LayoutProvider,
        events: &mut Vec<TriggerEvent>,
    ) {
        let progress = match self.trigger.progress_at(offset, layout) {
            Ok(progress) => {
                self.failing = false;
                progress
            }
            Err(err) => {
                if !self.failing {
                    tracing::warn!("ScrollTrigger {:?}: skipped, {}", id, err);
                    self.failing = true;
                }
                self.progress = 0.0;
                return;
            }
        };

        let previous = self.progress;
        self.progress = progress;
        let target = self.trigger.target;
        let mut emit = |kind| {
            events.push(TriggerEvent {
                id,
                target,
                kind,
                progress,
            })
        };

        let entered = previous <= 0.0 && progress > 0.0;
        if entered {
            emit(TriggerEventKind::Enter);
        }
        if previous < 1.0 && progress >= 1.0 {
            emit(TriggerEventKind::Leave);
        }
        if previous >= 1.0 && progress < 1.0 {
            emit(TriggerEventKind::EnterBack);
        }
        if previous > 0.0 && progress <= 0.0 {
            emit(TriggerEventKind::LeaveBack);
        }

        self.state = if progress > 0.0 {
            TriggerState::Active
        } else {
            TriggerState::Idle
        };

        let completed = match self.trigger.scrub {
            Scrub::Immediate => {
                self.timeline.seek(progress);
                self.scrub_target = progress;
                progress >= 1.0
            }
            Scrub::Smoothed(_) => {
                self.scrub_target = progress;
                progress >= 1.0
            }
            Scrub::Off => {
                if entered {
                    tracing::debug!("ScrollTrigger {:?}: play", id);
                    self.timeline.play();
                }
                entered
            }
        };

        if self.trigger.once && completed {
            self.state = TriggerState::Completed;
            emit(TriggerEventKind::Complete);
        }
    }

    fn advance(&mut self, dt_ms: f32) {
        match self.trigger.scrub {
            Scrub::Smoothed(lag) => {
                let current = self.timeline.progress();
                let target = self.scrub_target;
                if (target - current).abs() > SCRUB_EPSILON {
                    let alpha = if lag <= 0.0 {
                        1.0
                    } else {
                        1.0 - (-3.0 * (dt_ms / 1000.0) / lag).exp()
                    };
                    let mut next = current + (target - current) * alpha;
                    if (target - next).abs() <= SCRUB_EPSILON {
                        next = target;
                    }
                    self.timeline.seek(next);
                }
            }
            Scrub::Off => {
                if self.timeline.is_playing() {
                    self.timeline.tick(dt_ms);
                }
            }
            Scrub::Immediate => {}
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Removal {
    Trigger(TriggerId),
    Timeline(TimelineId),
}

struct CoordinatorInner {
    triggers: SlotMap<TriggerId, TriggerEntry>,
    timelines: SlotMap<TimelineId, Timeline>,
    last_offset: f32,
}

struct Shared {
    inner: RefCell<CoordinatorInner>,
    /// Removals requested while `inner` was borrowed
    deferred: RefCell<Vec<Removal>>,
    /// Every live trigger and timeline, readable while `inner` is borrowed
    live: RefCell<FxHashSet<Removal>>,
    listeners: RefCell<Listeners<TriggerEvent>>,
}

impl Shared {
    fn apply_deferred(&self, inner: &mut CoordinatorInner) {
        let removals: Vec<Removal> = self.deferred.borrow_mut().drain(..).collect();
        for removal in removals {
            match removal {
                Removal::Trigger(id) => {
                    inner.triggers.remove(id);
                }
                Removal::Timeline(id) => {
                    inner.timelines.remove(id);
                }
            }
        }
    }

    /// Returns whether `removal` named a live entry
    fn remove(&self, removal: Removal) -> bool {
        if !self.live.borrow_mut().remove(&removal) {
            return false;
        }
        match self.inner.try_borrow_mut() {
            Ok(mut inner) => match removal {
                Removal::Trigger(id) => inner.triggers.remove(id).is_some(),
                Removal::Timeline(id) => inner.timelines.remove(id).is_some(),
            },
            Err(_) => {
                self.deferred.borrow_mut().push(removal);
                true
            }
        }
    }

    fn on_scroll_changed(&self, offset: f32, layout: &dyn LayoutProvider) -> Vec<TriggerEvent> {
        let mut events = Vec::new();
        {
            let mut inner = self.inner.borrow_mut();
            self.apply_deferred(&mut inner);
            inner.last_offset = offset;
            for (id, entry) in inner.triggers.iter_mut() {
                if entry.state == TriggerState::Completed {
                    continue;
                }
                entry.update(id, offset, layout, &mut events);
            }
        }

        if !events.is_empty() {
            if let Ok(mut listeners) = self.listeners.try_borrow_mut() {
                for event in &events {
                    listeners.emit(event);
                }
            }
        }
        events
    }

    fn advance(&self, dt_ms: f32) {
        let mut inner = self.inner.borrow_mut();
        self.apply_deferred(&mut inner);

        for (_, entry) in inner.triggers.iter_mut() {
            entry.advance(dt_ms);
        }
        for (_, timeline) in inner.timelines.iter_mut() {
            if timeline.is_playing() {
                timeline.tick(dt_ms);
            }
        }

        let mut live = self.live.borrow_mut();
        inner.triggers.retain(|id, entry| {
            let done = entry.state == TriggerState::Completed && entry.is_settled();
            if done {
                live.remove(&Removal::Trigger(id));
                tracing::debug!("ScrollTrigger {:?}: completed and removed", id);
            }
            !done
        });
    }

    fn commit(&self, sink: &mut dyn PropertySink) {
        let mut inner = self.inner.borrow_mut();
        self.apply_deferred(&mut inner);

        for (_, entry) in inner.triggers.iter_mut() {
            entry.timeline.flush(sink);
        }
        for (_, timeline) in inner.timelines.iter_mut() {
            timeline.flush(sink);
        }
    }
}

/// Anything that can both answer layout queries and receive property writes
pub trait Surface: LayoutProvider + PropertySink {}

impl<T: LayoutProvider + PropertySink> Surface for T {}

struct Attachment {
    scheduler: SchedulerHandle,
    ticks: SmallVec<[TickCallbackId; 2]>,
    engine: ScrollListenerHandle,
    listener: ListenerId,
}

/// Owns every registered trigger and free-running timeline
pub struct ScrollTriggerCoordinator {
    shared: Rc<Shared>,
    attachment: Option<Attachment>,
}

impl ScrollTriggerCoordinator {
    pub fn new() -> Self {
        Self {
            shared: Rc::new(Shared {
                inner: RefCell::new(CoordinatorInner {
                    triggers: SlotMap::with_key(),
                    timelines: SlotMap::with_key(),
                    last_offset: 0.0,
                }),
                deferred: RefCell::new(Vec::new()),
                live: RefCell::new(FxHashSet::default()),
                listeners: RefCell::new(Listeners::new()),
            }),
            attachment: None,
        }
    }

    /// Drive this coordinator from `engine` and `scheduler`.
    ///
    /// Scroll changes recompute triggers against `surface`; the Animate phase
    /// advances timelines and the Commit phase writes rendered values to
    /// `surface`. Replaces any previous attachment.
    pub fn attach<S>(&mut self, scheduler: &FrameScheduler, engine: &SmoothScroll, surface: Rc<RefCell<S>>)
    where
        S: Surface + 'static,
    {
        self.detach();

        let listener = {
            let shared = Rc::downgrade(&self.shared);
            let surface = Rc::clone(&surface);
            engine.on_scroll(move |event| {
                let Some(shared) = shared.upgrade() else {
                    return;
                };
                match surface.try_borrow() {
                    Ok(surface) => {
                        shared.on_scroll_changed(event.offset, &*surface);
                    }
                    Err(_) => tracing::warn!("ScrollTriggerCoordinator: surface busy, update skipped"),
                }
            })
        };

        let animate = {
            let shared: Weak<Shared> = Rc::downgrade(&self.shared);
            scheduler.add_tick_callback(FramePhase::Animate, move |time| {
                if let Some(shared) = shared.upgrade() {
                    shared.advance(time.delta_ms);
                }
            })
        };

        let commit = {
            let shared: Weak<Shared> = Rc::downgrade(&self.shared);
            scheduler.add_tick_callback(FramePhase::Commit, move |_| {
                if let (Some(shared), Ok(mut surface)) = (shared.upgrade(), surface.try_borrow_mut()) {
                    shared.commit(&mut *surface);
                }
            })
        };

        let mut ticks = SmallVec::new();
        ticks.push(animate);
        ticks.push(commit);
        self.attachment = Some(Attachment {
            scheduler: scheduler.handle(),
            ticks,
            engine: engine.listener_handle(),
            listener,
        });
        tracing::debug!("ScrollTriggerCoordinator: attached");
    }

    /// Stop reacting to the scroll engine and the scheduler
    pub fn detach(&mut self) {
        if let Some(attachment) = self.attachment.take() {
            for id in attachment.ticks {
                attachment.scheduler.remove_tick_callback(id);
            }
            attachment.engine.off(attachment.listener);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a trigger with the timeline it drives
    pub fn register(&self, trigger: ScrollTrigger, timeline: Timeline) -> TriggerId {
        let target = trigger.target;
        let id = self.shared.inner.borrow_mut().triggers.insert(TriggerEntry {
            trigger,
            timeline,
            progress: 0.0,
            scrub_target: 0.0,
            state: TriggerState::Idle,
            failing: false,
        });
        self.shared.live.borrow_mut().insert(Removal::Trigger(id));
        tracing::debug!(
            "ScrollTrigger {:?}: registered for element {}",
            id,
            target.to_raw()
        );
        id
    }

    /// Register a trigger and get a handle that unregisters it on drop
    pub fn register_scoped(&self, trigger: ScrollTrigger, timeline: Timeline) -> TriggerHandle {
        TriggerHandle {
            id: self.register(trigger, timeline),
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Remove a trigger. No property writes happen for it afterwards.
    pub fn unregister(&self, id: TriggerId) -> bool {
        let removed = self.shared.remove(Removal::Trigger(id));
        if removed {
            tracing::debug!("ScrollTrigger {:?}: unregistered", id);
        }
        removed
    }

    /// Own a free-running timeline (intro sequences, hover tweens)
    pub fn add_timeline(&self, timeline: Timeline) -> TimelineId {
        let id = self.shared.inner.borrow_mut().timelines.insert(timeline);
        self.shared.live.borrow_mut().insert(Removal::Timeline(id));
        id
    }

    pub fn add_timeline_scoped(&self, timeline: Timeline) -> TimelineHandle {
        TimelineHandle {
            id: self.add_timeline(timeline),
            shared: Rc::downgrade(&self.shared),
        }
    }

    pub fn remove_timeline(&self, id: TimelineId) -> bool {
        self.shared.remove(Removal::Timeline(id))
    }

    // =========================================================================
    // Frame work
    // =========================================================================

    /// Recompute every live trigger for `offset`. Geometry failures are
    /// logged and the trigger is treated as progress 0.
    pub fn on_scroll_changed(&self, offset: f32, layout: &dyn LayoutProvider) -> Vec<TriggerEvent> {
        self.shared.on_scroll_changed(offset, layout)
    }

    /// Recompute against new layout at the last known offset
    pub fn refresh(&self, layout: &dyn LayoutProvider) -> Vec<TriggerEvent> {
        let offset = self.last_offset();
        self.shared.on_scroll_changed(offset, layout)
    }

    /// Advance playing and scrub-smoothed timelines by `dt_ms`
    pub fn advance(&self, dt_ms: f32) {
        self.shared.advance(dt_ms);
    }

    /// Write every rendered value to `sink`
    pub fn commit(&self, sink: &mut dyn PropertySink) {
        self.shared.commit(sink);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn on_event<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(&TriggerEvent) + 'static,
    {
        self.shared.listeners.borrow_mut().add(listener)
    }

    pub fn off_event(&self, id: ListenerId) -> bool {
        self.shared.listeners.borrow_mut().remove(id)
    }

    pub fn last_offset(&self) -> f32 {
        self.shared.inner.borrow().last_offset
    }

    pub fn progress(&self, id: TriggerId) -> Option<f32> {
        self.shared.inner.borrow().triggers.get(id).map(|e| e.progress)
    }

    pub fn state(&self, id: TriggerId) -> Option<TriggerState> {
        self.shared.inner.borrow().triggers.get(id).map(|e| e.state)
    }

    pub fn is_registered(&self, id: TriggerId) -> bool {
        self.shared.inner.borrow().triggers.contains_key(id)
    }

    pub fn trigger_count(&self) -> usize {
        self.shared.inner.borrow().triggers.len()
    }

    pub fn timeline_count(&self) -> usize {
        self.shared.inner.borrow().timelines.len()
    }

    /// Ids and targets of every live trigger
    pub fn triggers(&self) -> Vec<(TriggerId, ElementId)> {
        self.shared
            .inner
            .borrow()
            .triggers
            .iter()
            .map(|(id, entry)| (id, entry.trigger.target))
            .collect()
    }

    pub fn with_trigger_timeline<R>(&self, id: TriggerId, f: impl FnOnce(&mut Timeline) -> R) -> Option<R> {
        self.shared
            .inner
            .borrow_mut()
            .triggers
            .get_mut(id)
            .map(|entry| f(&mut entry.timeline))
    }

    pub fn with_timeline<R>(&self, id: TimelineId, f: impl FnOnce(&mut Timeline) -> R) -> Option<R> {
        self.shared.inner.borrow_mut().timelines.get_mut(id).map(f)
    }
}

impl Default for ScrollTriggerCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScrollTriggerCoordinator {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Unregisters its trigger when dropped
pub struct TriggerHandle {
    id: TriggerId,
    shared: Weak<Shared>,
}

impl TriggerHandle {
    pub fn id(&self) -> TriggerId {
        self.id
    }

    /// Unregister now
    pub fn dispose(self) {}
}

impl Drop for TriggerHandle {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.remove(Removal::Trigger(self.id));
        }
    }
}

/// Removes its timeline when dropped
pub struct TimelineHandle {
    id: TimelineId,
    shared: Weak<Shared>,
}

impl TimelineHandle {
    pub fn id(&self) -> TimelineId {
        self.id
    }

    /// Run `f` against the timeline, if the coordinator is still alive
    pub fn with<R>(&self, f: impl FnOnce(&mut Timeline) -> R) -> Option<R> {
        let shared = self.shared.upgrade()?;
        let mut inner = shared.inner.try_borrow_mut().ok()?;
        inner.timelines.get_mut(self.id).map(f)
    }

    pub fn play(&self) {
        self.with(|timeline| timeline.play());
    }

    pub fn is_playing(&self) -> bool {
        self.with(|timeline| timeline.is_playing()).unwrap_or(false)
    }
}

impl Drop for TimelineHandle {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.remove(Removal::Timeline(self.id));
        }
    }
}
