//! Timeline interpolation
//!
//! A timeline is an ordered list of steps. Each step animates a set of
//! properties on one or more targets over a window of the timeline. Steps are
//! declared in seconds and placed relative to the previous step; `build()`
//! normalises every window into a fraction of the total length so a timeline
//! can be driven either by scroll progress (`seek`) or by time (`tick`).
//!
//! # Example
//!
//! ```rust
//! use folio_animation::{Easing, StepPosition, Timeline, TimelineStep};
//! use folio_core::{ElementId, PropertyValues};
//!
//! let card = ElementId::default();
//! let mut timeline = Timeline::builder()
//!     .defaults(0.8, Easing::Power2Out)
//!     .step(TimelineStep::from([card], PropertyValues::new().opacity(0.0).y(60.0)))
//!     .build();
//!
//! timeline.seek(1.0);
//! assert_eq!(timeline.value(card, folio_core::Property::Y), Some(0.0));
//! ```

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use folio_core::{ElementId, Property, PropertySink, PropertyValues, Style};

use crate::easing::Easing;
use crate::values::Interpolate;

const WINDOW_EPSILON: f32 = 1e-6;

/// Where a step starts, in seconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepPosition {
    /// Offset from the end of the previous step; negative values overlap it
    After(f32),
    /// Offset from the start of the previous step
    WithPrevious(f32),
    /// Absolute time from the start of the timeline
    At(f32),
}

impl Default for StepPosition {
    fn default() -> Self {
        StepPosition::After(0.0)
    }
}

/// Per-target start offsets for a step applied to several targets
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Stagger {
    #[default]
    None,
    /// Target `i` starts `i * each` seconds late
    Each(f32),
    /// `amount` seconds spread over the group: target `i` starts `i * amount / n` late
    Amount(f32),
}

impl Stagger {
    /// Offset in seconds for target `index` of `count`
    pub fn offset(&self, index: usize, count: usize) -> f32 {
        match *self {
            Stagger::None => 0.0,
            Stagger::Each(each) => index as f32 * each,
            Stagger::Amount(amount) if count > 0 => index as f32 * (amount / count as f32),
            Stagger::Amount(_) => 0.0,
        }
    }
}

#[derive(Clone, Debug)]
enum StepValues {
    /// Animate from these values to the element's resting values
    From(PropertyValues),
    /// Animate from the element's current values to these
    To(PropertyValues),
    FromTo(PropertyValues, PropertyValues),
}

/// One declared step of a timeline
#[derive(Clone, Debug)]
pub struct TimelineStep {
    targets: SmallVec<[ElementId; 4]>,
    values: StepValues,
    duration: Option<f32>,
    easing: Option<Easing>,
    position: StepPosition,
    stagger: Stagger,
}

impl TimelineStep {
    fn with_values(targets: impl IntoIterator<Item = ElementId>, values: StepValues) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            values,
            duration: None,
            easing: None,
            position: StepPosition::default(),
            stagger: Stagger::None,
        }
    }

    /// Animate from `values` to the targets' resting values.
    ///
    /// The start values are applied as soon as the timeline is built, so an
    /// element hidden by a `from` step stays hidden until its window begins.
    pub fn from(targets: impl IntoIterator<Item = ElementId>, values: PropertyValues) -> Self {
        Self::with_values(targets, StepValues::From(values))
    }

    /// Animate from the targets' current values to `values`
    pub fn to(targets: impl IntoIterator<Item = ElementId>, values: PropertyValues) -> Self {
        Self::with_values(targets, StepValues::To(values))
    }

    pub fn from_to(
        targets: impl IntoIterator<Item = ElementId>,
        from: PropertyValues,
        to: PropertyValues,
    ) -> Self {
        Self::with_values(targets, StepValues::FromTo(from, to))
    }

    /// Duration in seconds (defaults to the timeline default)
    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = Some(seconds.max(0.0));
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn position(mut self, position: StepPosition) -> Self {
        self.position = position;
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }
}

/// A resolved (target, property) interpolation over a normalised window
#[derive(Clone, Debug)]
struct Track {
    target: ElementId,
    property: Property,
    from: f32,
    to: f32,
    /// Window start as a fraction of the timeline
    start: f32,
    /// Window length as a fraction of the timeline
    length: f32,
    easing: Easing,
}

impl Track {
    fn local_progress(&self, progress: f32) -> f32 {
        if self.length <= WINDOW_EPSILON {
            if progress + WINDOW_EPSILON >= self.start {
                1.0
            } else {
                0.0
            }
        } else {
            ((progress - self.start) / self.length).clamp(0.0, 1.0)
        }
    }

    fn value_at(&self, progress: f32) -> f32 {
        let eased = self.easing.apply(self.local_progress(progress));
        Interpolate::lerp(&self.from, &self.to, eased)
    }

    fn intersects(&self, lo: f32, hi: f32) -> bool {
        self.start <= hi + WINDOW_EPSILON && self.start + self.length >= lo - WINDOW_EPSILON
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Builder for a [`Timeline`]
#[derive(Clone, Debug)]
pub struct TimelineBuilder {
    steps: Vec<TimelineStep>,
    default_duration: f32,
    default_easing: Easing,
    delay: f32,
    current: FxHashMap<(ElementId, Property), f32>,
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            default_duration: 0.5,
            default_easing: Easing::Power1Out,
            delay: 0.0,
            current: FxHashMap::default(),
        }
    }
}

impl TimelineBuilder {
    /// Default duration (seconds) and easing for steps that don't set their own
    pub fn defaults(mut self, duration: f32, easing: Easing) -> Self {
        self.default_duration = duration.max(0.0);
        self.default_easing = easing;
        self
    }

    /// Delay in seconds before time-based playback starts
    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    /// Seed the values a `to` step starts from for `target`
    pub fn current(mut self, target: ElementId, style: Style) -> Self {
        for property in Property::ALL {
            self.current.insert((target, property), style.get(property));
        }
        self
    }

    pub fn step(mut self, step: TimelineStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> Timeline {
        let TimelineBuilder {
            steps,
            default_duration,
            default_easing,
            delay,
            mut current,
        } = self;

        let mut tracks: Vec<Track> = Vec::new();
        let mut values: FxHashMap<(ElementId, Property), f32> = FxHashMap::default();
        let mut pending: FxHashMap<(ElementId, Property), f32> = FxHashMap::default();

        let mut prev_start = 0.0f32;
        let mut prev_end = 0.0f32;
        let mut total = 0.0f32;

        for step in &steps {
            let duration = step.duration.unwrap_or(default_duration);
            let easing = step.easing.unwrap_or(default_easing);
            let start = match step.position {
                StepPosition::After(offset) => prev_end + offset,
                StepPosition::WithPrevious(offset) => prev_start + offset,
                StepPosition::At(at) => at,
            }
            .max(0.0);

            let count = step.targets.len();
            let mut step_end = start + duration;

            for (index, &target) in step.targets.iter().enumerate() {
                let target_start = start + step.stagger.offset(index, count);
                step_end = step_end.max(target_start + duration);

                let mut resting = |property: Property| {
                    *current
                        .entry((target, property))
                        .or_insert_with(|| property.initial_value())
                };

                let mut pairs: SmallVec<[(Property, f32, f32, bool); 4]> = SmallVec::new();
                match &step.values {
                    StepValues::From(from) => {
                        for (property, value) in from.iter() {
                            pairs.push((property, value, resting(property), true));
                        }
                    }
                    StepValues::To(to) => {
                        for (property, value) in to.iter() {
                            pairs.push((property, resting(property), value, false));
                        }
                    }
                    StepValues::FromTo(from, to) => {
                        for property in Property::ALL {
                            let (a, b) = (from.get(property), to.get(property));
                            if a.is_none() && b.is_none() {
                                continue;
                            }
                            let rest = resting(property);
                            pairs.push((property, a.unwrap_or(rest), b.unwrap_or(rest), true));
                        }
                    }
                }

                for (property, from, to, render_now) in pairs {
                    let key = (target, property);
                    if render_now && !values.contains_key(&key) {
                        values.insert(key, from);
                        pending.insert(key, from);
                    }
                    current.insert(key, to);
                    tracks.push(Track {
                        target,
                        property,
                        from,
                        to,
                        start: target_start,
                        length: duration,
                        easing,
                    });
                }
            }

            prev_start = start;
            prev_end = step_end;
            total = total.max(step_end);
        }

        // Normalise windows into fractions of the whole timeline
        for track in &mut tracks {
            if total > 0.0 {
                track.start /= total;
                track.length /= total;
            } else {
                track.start = 0.0;
                track.length = 0.0;
            }
        }

        tracing::trace!(
            "Timeline: built {} steps, {} tracks, {:.3}s",
            steps.len(),
            tracks.len(),
            total
        );

        Timeline {
            tracks,
            duration: total,
            delay,
            values,
            pending,
            progress: 0.0,
            rendered: false,
            state: PlayState::Idle,
            elapsed_ms: 0.0,
            delay_remaining_ms: delay * 1000.0,
        }
    }
}

// =============================================================================
// TIMELINE
// =============================================================================

/// Time-based playback state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    /// Never played (may still be driven by `seek`)
    Idle,
    /// Waiting out the initial delay
    Delayed,
    Playing,
    Paused,
    Finished,
}

/// A built timeline
#[derive(Clone, Debug)]
pub struct Timeline {
    tracks: Vec<Track>,
    /// Total length in seconds
    duration: f32,
    delay: f32,
    values: FxHashMap<(ElementId, Property), f32>,
    /// Values rendered since the last flush
    pending: FxHashMap<(ElementId, Property), f32>,
    progress: f32,
    rendered: bool,
    state: PlayState,
    elapsed_ms: f32,
    delay_remaining_ms: f32,
}

impl Timeline {
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::default()
    }

    /// Total length in seconds, excluding the delay
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    /// True while playing or waiting out the delay
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlayState::Playing | PlayState::Delayed)
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlayState::Finished
    }

    /// Every distinct element this timeline writes to
    pub fn targets(&self) -> SmallVec<[ElementId; 8]> {
        let mut targets: SmallVec<[ElementId; 8]> = SmallVec::new();
        for track in &self.tracks {
            if !targets.contains(&track.target) {
                targets.push(track.target);
            }
        }
        targets
    }

    /// Last rendered value of a property, if any step covers it
    pub fn value(&self, target: ElementId, property: Property) -> Option<f32> {
        self.values.get(&(target, property)).copied()
    }

    /// Whether there are rendered values not yet flushed
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Move the playhead to `progress` (clamped to `[0, 1]`) and render.
    ///
    /// Every track whose window intersects the span the playhead crossed is
    /// rendered, so fast scrolling never skips a step's end state. Where
    /// several tracks drive the same property, the latest declared track that
    /// has started wins; if none has started, the earliest one renders its
    /// start value. Properties of untouched tracks keep their value.
    pub fn seek(&mut self, progress: f32) {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let previous = if self.rendered { self.progress } else { 0.0 };
        let (lo, hi) = if previous <= progress {
            (previous, progress)
        } else {
            (progress, previous)
        };

        let mut winners: FxHashMap<(ElementId, Property), usize> = FxHashMap::default();
        for (index, track) in self.tracks.iter().enumerate() {
            if !track.intersects(lo, hi) {
                continue;
            }
            let key = (track.target, track.property);
            match winners.get(&key).copied() {
                None => {
                    winners.insert(key, index);
                }
                Some(existing) => {
                    let current = &self.tracks[existing];
                    let started = track.start <= progress + WINDOW_EPSILON;
                    let current_started = current.start <= progress + WINDOW_EPSILON;
                    let replace = match (started, current_started) {
                        (true, _) => true,
                        (false, true) => false,
                        (false, false) => track.start < current.start,
                    };
                    if replace {
                        winners.insert(key, index);
                    }
                }
            }
        }

        for (key, index) in winners {
            let value = self.tracks[index].value_at(progress);
            if self.values.get(&key) != Some(&value) {
                self.values.insert(key, value);
                self.pending.insert(key, value);
            }
        }

        self.progress = progress;
        self.rendered = true;
    }

    /// Write values rendered since the last flush to `sink`
    pub fn flush(&mut self, sink: &mut dyn PropertySink) {
        for ((target, property), value) in self.pending.drain() {
            sink.write(target, property, value);
        }
    }

    /// Drop unflushed values without writing them
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    // =========================================================================
    // Time-based playback
    // =========================================================================

    /// Start or resume time-based playback from the current position
    pub fn play(&mut self) {
        match self.state {
            PlayState::Idle => {
                self.elapsed_ms = self.progress * self.duration * 1000.0;
                self.state = if self.delay_remaining_ms > 0.0 {
                    PlayState::Delayed
                } else {
                    PlayState::Playing
                };
                if !self.rendered {
                    self.seek(self.progress);
                }
                if self.duration <= 0.0 && self.state == PlayState::Playing {
                    self.seek(1.0);
                    self.state = PlayState::Finished;
                }
            }
            PlayState::Paused => {
                self.state = if self.delay_remaining_ms > 0.0 {
                    PlayState::Delayed
                } else {
                    PlayState::Playing
                };
            }
            PlayState::Delayed | PlayState::Playing | PlayState::Finished => {}
        }
    }

    pub fn pause(&mut self) {
        if self.is_playing() {
            self.state = PlayState::Paused;
        }
    }

    /// Rewind to the start (delay included) and play
    pub fn restart(&mut self) {
        self.state = PlayState::Idle;
        self.delay_remaining_ms = self.delay * 1000.0;
        self.seek(0.0);
        self.play();
    }

    /// Advance playback by `dt_ms`. Returns true while still active.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let mut dt_ms = dt_ms.max(0.0);

        if self.state == PlayState::Delayed {
            self.delay_remaining_ms -= dt_ms;
            if self.delay_remaining_ms > 0.0 {
                return true;
            }
            dt_ms = -self.delay_remaining_ms;
            self.delay_remaining_ms = 0.0;
            self.state = PlayState::Playing;
        }

        if self.state != PlayState::Playing {
            return false;
        }

        self.elapsed_ms += dt_ms;
        let total_ms = self.duration * 1000.0;
        let progress = if total_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / total_ms).min(1.0)
        };
        self.seek(progress);

        if progress >= 1.0 {
            self.state = PlayState::Finished;
            false
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::RecordingSink;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<ElementId> {
        let mut map: SlotMap<ElementId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    fn overlapping(a: ElementId, b: ElementId) -> Timeline {
        Timeline::builder()
            .defaults(0.5, Easing::Linear)
            .step(
                TimelineStep::from_to(
                    [a],
                    PropertyValues::new().opacity(0.0),
                    PropertyValues::new().opacity(1.0),
                )
                .duration(0.5)
                .position(StepPosition::At(0.0)),
            )
            .step(
                TimelineStep::from_to(
                    [b],
                    PropertyValues::new().y(100.0),
                    PropertyValues::new().y(0.0),
                )
                .duration(0.7)
                .position(StepPosition::After(-0.2)),
            )
            .build()
    }

    #[test]
    fn test_overlapping_steps_are_independent() {
        let e = ids(2);
        let mut timeline = overlapping(e[0], e[1]);
        assert!((timeline.duration() - 1.0).abs() < 1e-6);

        timeline.seek(0.4);

        let opacity = timeline.value(e[0], Property::Opacity).unwrap();
        assert!((opacity - 0.8).abs() < 1e-5);

        // local progress (0.4 - 0.3) / 0.7
        let y = timeline.value(e[1], Property::Y).unwrap();
        let local = 0.1 / 0.7;
        assert!((y - (100.0 - 100.0 * local)).abs() < 1e-3);
        assert!((local - 0.143).abs() < 1e-3);
    }

    #[test]
    fn test_from_values_render_at_build() {
        let e = ids(1);
        let mut timeline = Timeline::builder()
            .step(TimelineStep::from([e[0]], PropertyValues::new().opacity(0.0).y(80.0)))
            .build();

        assert_eq!(timeline.value(e[0], Property::Opacity), Some(0.0));
        let mut sink = RecordingSink::new();
        timeline.flush(&mut sink);
        assert_eq!(sink.last(e[0], Property::Y), Some(80.0));

        timeline.seek(1.0);
        assert_eq!(timeline.value(e[0], Property::Opacity), Some(1.0));
        assert_eq!(timeline.value(e[0], Property::Y), Some(0.0));
    }

    #[test]
    fn test_untouched_properties_keep_values() {
        let e = ids(2);
        let mut timeline = overlapping(e[0], e[1]);

        timeline.seek(0.5);
        assert_eq!(timeline.value(e[0], Property::Opacity), Some(1.0));

        // Moving within B's window leaves A's finished value alone
        timeline.seek(0.9);
        assert_eq!(timeline.value(e[0], Property::Opacity), Some(1.0));
    }

    #[test]
    fn test_seek_backwards_restores_earlier_step() {
        let e = ids(1);
        let mut timeline = Timeline::builder()
            .defaults(1.0, Easing::Linear)
            .step(TimelineStep::to([e[0]], PropertyValues::new().opacity(0.0)))
            .step(TimelineStep::to([e[0]], PropertyValues::new().opacity(1.0)))
            .build();

        timeline.seek(0.9);
        assert!((timeline.value(e[0], Property::Opacity).unwrap() - 0.8).abs() < 1e-5);

        timeline.seek(0.25);
        assert!((timeline.value(e[0], Property::Opacity).unwrap() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_fast_seek_does_not_skip_end_state() {
        let e = ids(1);
        let mut timeline = Timeline::builder()
            .defaults(1.0, Easing::Linear)
            .step(TimelineStep::from([e[0]], PropertyValues::new().opacity(0.0)))
            .step(TimelineStep::to([e[0]], PropertyValues::new().x(40.0)))
            .build();

        timeline.seek(0.2);
        timeline.seek(0.9);
        assert_eq!(timeline.value(e[0], Property::Opacity), Some(1.0));
    }

    #[test]
    fn test_stagger_amount_offsets_targets() {
        let e = ids(4);
        let timeline = Timeline::builder()
            .defaults(1.0, Easing::Linear)
            .step(
                TimelineStep::from(e.clone(), PropertyValues::new().opacity(0.0))
                    .stagger(Stagger::Amount(0.4)),
            )
            .build();

        // Last target starts 3 * 0.4 / 4 = 0.3s late
        assert!((timeline.duration() - 1.3).abs() < 1e-5);

        let mut timeline = timeline;
        timeline.seek(0.3 / 1.3);
        assert!((timeline.value(e[0], Property::Opacity).unwrap() - 0.3).abs() < 1e-4);
        assert!((timeline.value(e[1], Property::Opacity).unwrap() - 0.2).abs() < 1e-4);
        assert!(timeline.value(e[3], Property::Opacity).unwrap().abs() < 1e-4);
    }

    #[test]
    fn test_stagger_each() {
        assert_eq!(Stagger::Each(0.05).offset(3, 10), 0.15);
        assert_eq!(Stagger::Amount(0.1).offset(1, 2), 0.05);
        assert_eq!(Stagger::None.offset(5, 6), 0.0);
    }

    #[test]
    fn test_with_previous_position() {
        let e = ids(2);
        let mut timeline = Timeline::builder()
            .defaults(0.8, Easing::Linear)
            .step(TimelineStep::from([e[0]], PropertyValues::new().y(80.0)))
            .step(
                TimelineStep::from([e[1]], PropertyValues::new().x(100.0))
                    .position(StepPosition::WithPrevious(0.1)),
            )
            .build();

        assert!((timeline.duration() - 0.9).abs() < 1e-6);
        timeline.seek(0.1 / 0.9);
        assert_eq!(timeline.value(e[1], Property::X), Some(100.0));
    }

    #[test]
    fn test_time_playback_with_delay() {
        let e = ids(1);
        let mut timeline = Timeline::builder()
            .defaults(1.0, Easing::Linear)
            .delay(0.5)
            .step(TimelineStep::from([e[0]], PropertyValues::new().opacity(0.0)))
            .build();

        timeline.play();
        assert_eq!(timeline.state(), PlayState::Delayed);

        assert!(timeline.tick(400.0));
        assert_eq!(timeline.value(e[0], Property::Opacity), Some(0.0));

        // 100ms finishes the delay, 400ms of playback remain
        assert!(timeline.tick(500.0));
        assert!((timeline.value(e[0], Property::Opacity).unwrap() - 0.4).abs() < 1e-4);

        assert!(!timeline.tick(1000.0));
        assert!(timeline.is_finished());
        assert_eq!(timeline.value(e[0], Property::Opacity), Some(1.0));
    }

    #[test]
    fn test_pause_and_resume() {
        let e = ids(1);
        let mut timeline = Timeline::builder()
            .defaults(1.0, Easing::Linear)
            .step(TimelineStep::to([e[0]], PropertyValues::new().x(10.0)))
            .build();

        timeline.play();
        timeline.tick(250.0);
        timeline.pause();
        assert!(!timeline.tick(500.0));
        assert!((timeline.progress() - 0.25).abs() < 1e-5);

        timeline.play();
        timeline.tick(250.0);
        assert!((timeline.progress() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_zero_length_timeline_finishes_on_play() {
        let e = ids(1);
        let mut timeline = Timeline::builder()
            .step(TimelineStep::to([e[0]], PropertyValues::new().scale(2.0)).duration(0.0))
            .build();

        timeline.play();
        assert!(timeline.is_finished());
        assert_eq!(timeline.value(e[0], Property::Scale), Some(2.0));
    }

    #[test]
    fn test_to_step_starts_from_seeded_style() {
        let e = ids(1);
        let current = Style {
            scale: 1.05,
            ..Style::default()
        };
        let mut timeline = Timeline::builder()
            .defaults(1.0, Easing::Linear)
            .current(e[0], current)
            .step(TimelineStep::to([e[0]], PropertyValues::new().scale(1.0)))
            .build();

        timeline.seek(0.0);
        assert!((timeline.value(e[0], Property::Scale).unwrap() - 1.05).abs() < 1e-6);
    }
}
