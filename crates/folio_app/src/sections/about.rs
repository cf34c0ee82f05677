//! About section: scroll-revealed paragraphs and the CV link

use folio_animation::AnimationScope;
use folio_core::ElementId;

use super::{GradientText, MountContext, Section, BODY_CHAR_WIDTH, BODY_LINE_HEIGHT, HEADING_HEIGHT, SECTION_PADDING};
use crate::content::{
    NavLink, ABOUT_EDUCATION, ABOUT_EDUCATION_HEADING, ABOUT_HEADING, ABOUT_INTRO, CV_FILE, CV_LABEL,
};
use crate::error::Result;
use crate::page::NodeSpec;

pub struct AboutSection {
    root: ElementId,
    paragraphs: Vec<GradientText>,
    cv_link: ElementId,
    scope: AnimationScope,
}

impl AboutSection {
    pub fn mount(ctx: &mut MountContext<'_>) -> Result<Self> {
        let parent = ctx.page.root();
        let root = ctx.page.create_node(
            parent,
            NodeSpec::column()
                .max_width(800.0)
                .padding(SECTION_PADDING)
                .gap(24.0)
                .label("about")
                .anchor(NavLink::About.anchor()),
        );
        ctx.page
            .create_leaf(root, NodeSpec::fixed(HEADING_HEIGHT).label("about.heading"), ABOUT_HEADING);

        let mut scope = AnimationScope::new("about");
        let body = NodeSpec::text(BODY_CHAR_WIDTH, BODY_LINE_HEIGHT);
        let paragraphs = vec![
            GradientText::mount(ctx, root, body.clone().label("about.intro"), ABOUT_INTRO, &mut scope)?,
            GradientText::mount(
                ctx,
                root,
                NodeSpec::text(12.0, 36.0).label("about.education.heading"),
                ABOUT_EDUCATION_HEADING,
                &mut scope,
            )?,
            GradientText::mount(ctx, root, body.label("about.education"), ABOUT_EDUCATION, &mut scope)?,
        ];

        let cv_link = ctx.page.create_leaf(
            root,
            NodeSpec::fixed(48.0).label("about.cv"),
            format!("{} ({})", CV_LABEL, CV_FILE),
        );

        Ok(Self {
            root,
            paragraphs,
            cv_link,
            scope,
        })
    }

    pub fn paragraphs(&self) -> &[GradientText] {
        &self.paragraphs
    }

    pub fn cv_link(&self) -> ElementId {
        self.cv_link
    }
}

impl Section for AboutSection {
    fn name(&self) -> &'static str {
        "about"
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
}
