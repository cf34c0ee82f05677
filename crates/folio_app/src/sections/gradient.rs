//! Scroll-scrubbed gradient text
//!
//! A paragraph split into per-character elements whose opacity rises from
//! 0.2 to 1 one character after another as the paragraph scrolls through the
//! lower half of the viewport.

use folio_animation::{AnimationScope, Easing, Scrub, ScrollTrigger, Stagger, Timeline, TimelineStep};
use folio_core::{ElementId, PropertyValues};

use super::{anchor, MountContext};
use crate::error::Result;
use crate::page::NodeSpec;

/// Opacity of a character before it is revealed
pub const DIM_OPACITY: f32 = 0.2;

/// A mounted gradient paragraph
#[derive(Clone, Debug)]
pub struct GradientText {
    pub block: ElementId,
    pub glyphs: Vec<ElementId>,
}

impl GradientText {
    /// Build `text` under `parent` and register its scrubbed reveal in `scope`
    pub fn mount(
        ctx: &mut MountContext<'_>,
        parent: ElementId,
        spec: NodeSpec,
        text: &str,
        scope: &mut AnimationScope,
    ) -> Result<Self> {
        let (block, glyphs) = ctx.page.add_text(parent, spec, text);

        let trigger = ScrollTrigger::new(block)
            .start(anchor("top 90%")?)
            .end(anchor("bottom 50%")?)
            .scrub(Scrub::Smoothed(1.0));
        let timeline = Timeline::builder()
            .step(
                TimelineStep::from_to(
                    glyphs.iter().copied(),
                    PropertyValues::new().opacity(DIM_OPACITY),
                    PropertyValues::new().opacity(1.0),
                )
                .duration(1.0)
                .ease(Easing::Linear)
                .stagger(Stagger::Each(0.05)),
            )
            .build();
        scope.add_trigger(ctx.coordinator.register_scoped(trigger, timeline));

        Ok(Self { block, glyphs })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
