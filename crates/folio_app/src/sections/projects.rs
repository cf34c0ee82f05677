//! Project cards

use folio_animation::{AnimationScope, Easing, Scrub, ScrollTrigger, Timeline, TimelineStep};
use folio_core::{ElementId, PropertyValues};
use folio_theme::ColorScheme;

use super::{
    anchor, GradientText, MountContext, Section, BODY_CHAR_WIDTH, BODY_LINE_HEIGHT, HEADING_HEIGHT,
    SECTION_PADDING,
};
use crate::content::{NavLink, Project, PROJECTS, PROJECTS_HEADING};
use crate::error::Result;
use crate::page::{NodeSpec, Page, MD_BREAKPOINT};

/// Elements of one mounted project card
#[derive(Clone, Debug)]
pub struct ProjectCard {
    pub project: &'static Project,
    pub card: ElementId,
    pub image: ElementId,
    pub description: GradientText,
}

pub struct ProjectsSection {
    root: ElementId,
    cards: Vec<ProjectCard>,
    scope: AnimationScope,
}

impl ProjectsSection {
    pub fn mount(ctx: &mut MountContext<'_>) -> Result<Self> {
        let parent = ctx.page.root();
        let root = ctx.page.create_node(
            parent,
            NodeSpec::column()
                .max_width(800.0)
                .padding(SECTION_PADDING)
                .gap(48.0)
                .label("project")
                .anchor(NavLink::Project.anchor()),
        );
        ctx.page.create_leaf(
            root,
            NodeSpec::fixed(HEADING_HEIGHT).label("project.heading"),
            PROJECTS_HEADING,
        );

        let mut scope = AnimationScope::new("project");
        let mut cards = Vec::with_capacity(PROJECTS.len());
        for (index, project) in PROJECTS.iter().enumerate() {
            let card = ctx.page.create_node(
                root,
                NodeSpec::row(MD_BREAKPOINT).gap(24.0).label(format!("project.{}", index)),
            );
            let image = ctx.page.create_leaf(card, NodeSpec::fixed(220.0), project.image_for(ctx.scheme));
            let body = ctx.page.create_node(card, NodeSpec::column().gap(12.0));
            ctx.page.create_leaf(body, NodeSpec::fixed(36.0), project.title);
            let description = GradientText::mount(
                ctx,
                body,
                NodeSpec::text(BODY_CHAR_WIDTH, BODY_LINE_HEIGHT),
                project.description,
                &mut scope,
            )?;
            let links = ctx.page.create_node(body, NodeSpec::row(0.0).gap(16.0));
            if let Some(live) = project.live {
                ctx.page.create_leaf(links, NodeSpec::fixed(40.0), live);
            }
            ctx.page.create_leaf(links, NodeSpec::fixed(40.0), project.github);

            let trigger = ScrollTrigger::new(card)
                .start(anchor("top 80%")?)
                .scrub(Scrub::Smoothed(1.0))
                .once(true);
            let timeline = Timeline::builder()
                .step(
                    TimelineStep::from([card], PropertyValues::new().opacity(0.0).y(60.0))
                        .ease(Easing::Power2Out),
                )
                .build();
            scope.add_trigger(ctx.coordinator.register_scoped(trigger, timeline));

            cards.push(ProjectCard {
                project,
                card,
                image,
                description,
            });
        }

        Ok(Self { root, cards, scope })
    }

    pub fn cards(&self) -> &[ProjectCard] {
        &self.cards
    }
}

impl Section for ProjectsSection {
    fn name(&self) -> &'static str {
        "project"
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

    fn on_theme(&mut self, scheme: ColorScheme, page: &mut Page) {
        for card in &self.cards {
            page.set_content(card.image, card.project.image_for(scheme));
        }
    }
}
