//! Hero section and its intro sequence

use folio_animation::presets::{fade_up, slide_in_x};
use folio_animation::{AnimationScope, Easing, Stagger, StepPosition, Timeline};
use folio_core::ElementId;

use super::{MountContext, Section};
use crate::content::{NavLink, HERO_ACTIONS, HERO_HEADING, HERO_IMAGE, HERO_TAGLINE};
use crate::page::{Extent, NodeSpec, MD_BREAKPOINT};

pub struct HeroSection {
    root: ElementId,
    content: ElementId,
    image: ElementId,
    actions: [(ElementId, NavLink); 2],
    scope: AnimationScope,
}

impl HeroSection {
    pub fn mount(ctx: &mut MountContext<'_>) -> Self {
        let page = &mut *ctx.page;
        let parent = page.root();
        let root = page.create_node(
            parent,
            NodeSpec::row(MD_BREAKPOINT)
                .extent(Extent::MinViewport {
                    narrow: 0.9,
                    wide: 1.0,
                })
                .max_width(1200.0)
                .padding(24.0)
                .gap(40.0)
                .label("home")
                .anchor(NavLink::Home.anchor()),
        );

        let content = page.create_node(root, NodeSpec::column().gap(20.0).label("hero.content"));
        page.create_leaf(content, NodeSpec::fixed(56.0).label("hero.heading"), HERO_HEADING);
        page.create_leaf(content, NodeSpec::fixed(84.0).label("hero.tagline"), HERO_TAGLINE);
        let row = page.create_node(content, NodeSpec::row(0.0).gap(16.0));
        let actions = HERO_ACTIONS.map(|(label, link)| {
            let id = page.create_leaf(row, NodeSpec::fixed(48.0).label(format!("hero.{}", link.anchor())), label);
            (id, link)
        });
        let image = page.create_leaf(root, NodeSpec::fixed(360.0).label("hero.image"), HERO_IMAGE);

        let intro = Timeline::builder()
            .delay(0.4)
            .defaults(0.8, Easing::Power2Out)
            .step(fade_up([content], 80.0))
            .step(slide_in_x([image], 100.0).position(StepPosition::WithPrevious(0.1)))
            .step(fade_up(actions.map(|(id, _)| id), 40.0).stagger(Stagger::Amount(0.1)))
            .build();

        let mut scope = AnimationScope::new("hero");
        let handle = ctx.coordinator.add_timeline_scoped(intro);
        handle.play();
        scope.add_timeline(handle);

        Self {
            root,
            content,
            image,
            actions,
            scope,
        }
    }

    pub fn content(&self) -> ElementId {
        self.content
    }

    pub fn image(&self) -> ElementId {
        self.image
    }

    pub fn actions(&self) -> [ElementId; 2] {
        self.actions.map(|(id, _)| id)
    }

    /// Whether the intro sequence is still running
    pub fn is_intro_playing(&self) -> bool {
        self.scope.timelines().iter().any(|h| h.is_playing())
    }
}

impl Section for HeroSection {
    fn name(&self) -> &'static str {
        "home"
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

    fn on_click(&mut self, target: ElementId) -> Option<NavLink> {
        self.actions.iter().find(|(id, _)| *id == target).map(|(_, link)| *link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;
    use folio_animation::ScrollTriggerCoordinator;
    use folio_core::Size;
    use folio_theme::ColorScheme;

    #[test]
    fn test_intro_sequence() {
        let mut page = Page::new(Size::new(1280.0, 800.0));
        let coordinator = ScrollTriggerCoordinator::new();
        let hero = HeroSection::mount(&mut MountContext {
            page: &mut page,
            coordinator: &coordinator,
            scheme: ColorScheme::Light,
        });
        page.compute_layout();
        assert!(hero.is_intro_playing());

        // hidden before the delay elapses
        coordinator.advance(100.0);
        coordinator.commit(&mut page);
        let content = page.style(hero.content()).unwrap();
        assert_eq!(content.opacity, 0.0);
        assert_eq!(content.y, 80.0);
        assert_eq!(page.style(hero.image()).unwrap().x, 100.0);

        for _ in 0..200 {
            coordinator.advance(16.0);
        }
        coordinator.commit(&mut page);
        assert!(!hero.is_intro_playing());
        for id in [hero.content(), hero.image()].into_iter().chain(hero.actions()) {
            let style = page.style(id).unwrap();
            assert!((style.opacity - 1.0).abs() < 1e-4);
            assert!(style.x.abs() < 1e-3 && style.y.abs() < 1e-3);
        }
    }

    #[test]
    fn test_actions_navigate() {
        let mut page = Page::new(Size::new(1280.0, 800.0));
        let coordinator = ScrollTriggerCoordinator::new();
        let mut hero = HeroSection::mount(&mut MountContext {
            page: &mut page,
            coordinator: &coordinator,
            scheme: ColorScheme::Light,
        });
        let [work, contact] = hero.actions();
        assert_eq!(hero.on_click(work), Some(NavLink::Project));
        assert_eq!(hero.on_click(contact), Some(NavLink::Contact));
        assert_eq!(hero.on_click(hero.image()), None);
        assert_eq!(page.content(work), Some("View My Work"));
    }
}
