//! Folio Animation
//!
//! The scroll-synchronised animation runtime.
//!
//! # Features
//!
//! - **Frame Scheduler**: one explicit per-frame clock with ordered phases
//! - **Smoothed Scroll**: a virtual offset that eases towards the input offset
//! - **Scroll Triggers**: element-relative scroll ranges driving timelines
//! - **Timelines**: overlapping, staggered property steps driven by progress or time
//! - **Scopes**: disposal owners that unregister a component's animations
//! - **Presets**: entrance steps and hover tweens

pub mod easing;
pub mod error;
pub mod presets;
pub mod scheduler;
pub mod scope;
pub mod smooth_scroll;
pub mod timeline;
pub mod trigger;
pub mod values;

pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use presets::HoverSpec;
pub use scheduler::{
    FramePhase, FrameScheduler, FrameTime, LagSmoothing, SchedulerHandle, TickCallback,
    TickCallbackId,
};
pub use scope::AnimationScope;
pub use smooth_scroll::{
    InputKind, ScrollEvent, ScrollListenerHandle, ScrollState, SmoothScroll, SmoothScrollConfig,
    CHANGE_EPSILON, SETTLE_EPSILON,
};
pub use timeline::{PlayState, Stagger, StepPosition, Timeline, TimelineBuilder, TimelineStep};
pub use trigger::{
    Edge, Scrub, ScrollTrigger, ScrollTriggerCoordinator, Surface, TimelineHandle, TimelineId,
    TriggerAnchor, TriggerEvent, TriggerEventKind, TriggerHandle, TriggerId, TriggerState,
};
pub use values::Interpolate;
