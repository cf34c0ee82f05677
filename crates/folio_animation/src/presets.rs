//! Common animation presets
//!
//! Building blocks shared by the page sections: entrance steps that start
//! hidden and settle at the element's resting values, and hover tweens that
//! start from wherever the element currently is.

use folio_core::{ElementId, PropertyValues, Style};

use crate::easing::Easing;
use crate::timeline::{Stagger, Timeline, TimelineStep};

/// Fade in while rising `distance` pixels
pub fn fade_up(targets: impl IntoIterator<Item = ElementId>, distance: f32) -> TimelineStep {
    TimelineStep::from(targets, PropertyValues::new().opacity(0.0).y(distance))
}

/// Fade in while sliding in from `distance` pixels to the right
pub fn slide_in_x(targets: impl IntoIterator<Item = ElementId>, distance: f32) -> TimelineStep {
    TimelineStep::from(targets, PropertyValues::new().opacity(0.0).x(distance))
}

/// Reveal a group one after another, `each` seconds apart
pub fn reveal(
    targets: impl IntoIterator<Item = ElementId>,
    hidden: PropertyValues,
    each: f32,
) -> TimelineStep {
    TimelineStep::from(targets, hidden).stagger(Stagger::Each(each))
}

/// A single-step timeline tweening `target` from `current` to `to`
pub fn tween_to(
    target: ElementId,
    current: Style,
    to: PropertyValues,
    duration: f32,
    easing: Easing,
) -> Timeline {
    Timeline::builder()
        .defaults(duration, easing)
        .current(target, current)
        .step(TimelineStep::to([target], to))
        .build()
}

/// Target values and timing of a hover/press interaction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverSpec {
    pub scale: f32,
    pub rotate: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl HoverSpec {
    pub const fn new(scale: f32, rotate: f32, duration: f32, easing: Easing) -> Self {
        Self {
            scale,
            rotate,
            duration,
            easing,
        }
    }

    /// Resting state reached with this spec's timing
    pub const fn rest(duration: f32, easing: Easing) -> Self {
        Self::new(1.0, 0.0, duration, easing)
    }

    pub fn values(&self) -> PropertyValues {
        PropertyValues::new().scale(self.scale).rotate(self.rotate)
    }

    pub fn timeline(&self, target: ElementId, current: Style) -> Timeline {
        tween_to(target, current, self.values(), self.duration, self.easing)
    }
}
