//! Skills grid

use folio_animation::presets::fade_up;
use folio_animation::{
    AnimationScope, Easing, HoverSpec, Scrub, ScrollTrigger, ScrollTriggerCoordinator, Stagger, Timeline,
    TimelineStep,
};
use folio_core::{ElementId, PropertyValues};

use super::{anchor, HoverTweens, MountContext, PointerEvent, Section, HEADING_HEIGHT, SECTION_PADDING};
use crate::content::{NavLink, SKILLS, SKILLS_HEADING};
use crate::error::Result;
use crate::page::{NodeSpec, Page};

pub const TILE_HEIGHT: f32 = 110.0;

const TILE_HOVER: HoverSpec = HoverSpec::new(1.1, 2.0, 0.4, Easing::Power2Out);
const TILE_REST: HoverSpec = HoverSpec::rest(0.4, Easing::Power2InOut);

pub struct SkillsSection {
    root: ElementId,
    heading: ElementId,
    grid: ElementId,
    tiles: Vec<ElementId>,
    hover: HoverTweens,
    scope: AnimationScope,
}

impl SkillsSection {
    pub fn mount(ctx: &mut MountContext<'_>) -> Result<Self> {
        let page = &mut *ctx.page;
        let parent = page.root();
        let root = page.create_node(
            parent,
            NodeSpec::column()
                .max_width(1000.0)
                .padding(SECTION_PADDING)
                .gap(40.0)
                .label("skill")
                .anchor(NavLink::Skill.anchor()),
        );
        let heading = page.create_leaf(root, NodeSpec::fixed(HEADING_HEIGHT).label("skill.heading"), SKILLS_HEADING);
        let grid = page.create_node(root, NodeSpec::grid().gap(24.0).label("skill.grid"));
        let tiles: Vec<ElementId> = SKILLS
            .iter()
            .map(|skill| {
                page.create_leaf(
                    grid,
                    NodeSpec::fixed(TILE_HEIGHT).label(format!("skill.{}", skill.name)),
                    skill.name,
                )
            })
            .collect();

        let mut scope = AnimationScope::new("skill");

        let heading_trigger = ScrollTrigger::new(root).start(anchor("top 80%")?);
        let heading_timeline = Timeline::builder()
            .defaults(1.3, Easing::Power3Out)
            .step(fade_up([heading], 80.0))
            .build();
        scope.add_trigger(ctx.coordinator.register_scoped(heading_trigger, heading_timeline));

        let tiles_trigger = ScrollTrigger::new(root)
            .start(anchor("top 70%")?)
            .end(anchor("bottom 50%")?)
            .scrub(Scrub::Smoothed(1.0))
            .once(true);
        let tiles_timeline = Timeline::builder()
            .step(
                TimelineStep::from(
                    tiles.iter().copied(),
                    PropertyValues::new().y(30.0).scale(0.6).opacity(0.0),
                )
                .stagger(Stagger::Each(0.15)),
            )
            .build();
        scope.add_trigger(ctx.coordinator.register_scoped(tiles_trigger, tiles_timeline));

        Ok(Self {
            root,
            heading,
            grid,
            tiles,
            hover: HoverTweens::default(),
            scope,
        })
    }

    pub fn heading(&self) -> ElementId {
        self.heading
    }

    pub fn grid(&self) -> ElementId {
        self.grid
    }

    pub fn tiles(&self) -> &[ElementId] {
        &self.tiles
    }

    pub fn is_hover_animating(&self, tile: ElementId) -> bool {
        self.hover.is_animating(tile)
    }
}

impl Section for SkillsSection {
    fn name(&self) -> &'static str {
        "skill"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn scope(&self) -> &AnimationScope {
        &self.scope
    }

    fn scope_mut(&mut self) -> &mut AnimationScope {
        &mut self.scope
    }

    fn on_pointer(
        &mut self,
        target: ElementId,
        event: PointerEvent,
        page: &Page,
        coordinator: &ScrollTriggerCoordinator,
    ) -> bool {
        if !self.tiles.contains(&target) {
            return false;
        }
        match event {
            PointerEvent::Enter => self.hover.start(target, TILE_HOVER, page, coordinator),
            PointerEvent::Leave => self.hover.start(target, TILE_REST, page, coordinator),
            PointerEvent::Press | PointerEvent::Release => {}
        }
        true
    }

    fn clear_interactions(&mut self) {
        self.hover.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{LayoutProvider, Size};
    use folio_theme::ColorScheme;

    fn mount(page: &mut Page, coordinator: &ScrollTriggerCoordinator) -> SkillsSection {
        SkillsSection::mount(&mut MountContext {
            page,
            coordinator,
            scheme: ColorScheme::Light,
        })
        .unwrap()
    }

    #[test]
    fn test_tiles_hidden_until_scrubbed() {
        let mut page = Page::new(Size::new(1280.0, 800.0));
        let coordinator = ScrollTriggerCoordinator::new();
        let skills = mount(&mut page, &coordinator);
        page.compute_layout();

        assert_eq!(skills.tiles().len(), 9);
        assert_eq!(coordinator.trigger_count(), 2);

        coordinator.commit(&mut page);
        let tile = page.style(skills.tiles()[0]).unwrap();
        assert_eq!((tile.opacity, tile.scale, tile.y), (0.0, 0.6, 30.0));
    }

    #[test]
    fn test_tile_scrub_spans_section_bounds() {
        let mut page = Page::new(Size::new(1280.0, 800.0));
        let coordinator = ScrollTriggerCoordinator::new();
        let skills = mount(&mut page, &coordinator);
        page.compute_layout();

        for (_, target) in coordinator.triggers() {
            assert_eq!(target, skills.root());
        }

        // top 70% .. bottom 50% of the section root
        let bounds = page.bounds(skills.root()).unwrap();
        let start = bounds.top() - 0.7 * 800.0;
        let end = bounds.bottom() - 0.5 * 800.0;
        let tiles = skills.scope().triggers()[1].id();
        for offset in [start, (start + end) / 2.0, end] {
            coordinator.on_scroll_changed(offset, &page);
            let expected = (offset - start) / (end - start);
            let progress = coordinator.progress(tiles).unwrap();
            assert!((progress - expected).abs() < 1e-4, "{} != {}", progress, expected);
        }
    }

    #[test]
    fn test_hover_scales_from_current_value() {
        let mut page = Page::new(Size::new(1280.0, 800.0));
        let coordinator = ScrollTriggerCoordinator::new();
        let mut skills = mount(&mut page, &coordinator);
        page.compute_layout();
        drop(std::mem::take(skills.scope_mut()));

        let tile = skills.tiles()[4];
        assert!(skills.on_pointer(tile, PointerEvent::Enter, &page, &coordinator));
        assert!(skills.is_hover_animating(tile));
        for _ in 0..40 {
            coordinator.advance(16.0);
        }
        coordinator.commit(&mut page);
        let hovered = page.style(tile).unwrap();
        assert!((hovered.scale - 1.1).abs() < 1e-4);
        assert!((hovered.rotate - 2.0).abs() < 1e-4);

        // leaving halfway through starts from the partially restored value
        skills.on_pointer(tile, PointerEvent::Leave, &page, &coordinator);
        coordinator.advance(200.0);
        coordinator.commit(&mut page);
        let leaving = page.style(tile).unwrap();
        assert!(leaving.scale > 1.0 && leaving.scale < 1.1);
        assert_eq!(coordinator.timeline_count(), 1);

        assert!(!skills.on_pointer(skills.heading(), PointerEvent::Enter, &page, &coordinator));
    }
}
