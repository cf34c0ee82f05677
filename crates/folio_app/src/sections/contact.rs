//! Contact section: form layout, entrance animations and button/icon feedback

use folio_animation::presets::fade_up;
use folio_animation::{AnimationScope, Easing, HoverSpec, ScrollTrigger, ScrollTriggerCoordinator, Timeline};
use folio_core::ElementId;

use super::{anchor, HoverTweens, MountContext, PointerEvent, Section, HEADING_HEIGHT, SECTION_PADDING};
use crate::contact::ContactForm;
use crate::content::{NavLink, CONTACT_HEADING, SEND_LABEL, SOCIAL_LINKS};
use crate::error::Result;
use crate::page::{NodeSpec, Page};

const BUTTON_HOVER: HoverSpec = HoverSpec::new(1.05, 0.0, 0.3, Easing::Power1Out);
const BUTTON_REST: HoverSpec = HoverSpec::rest(0.3, Easing::Power1Out);
const BUTTON_PRESS: HoverSpec = HoverSpec::new(0.97, 0.0, 0.15, Easing::Power1Out);
const BUTTON_RELEASE: HoverSpec = HoverSpec::new(1.05, 0.0, 0.15, Easing::Power1Out);

const ICON_HOVER: HoverSpec = HoverSpec::new(1.15, 5.0, 0.3, Easing::Power1Out);
const ICON_REST: HoverSpec = HoverSpec::rest(0.3, Easing::Power1Out);
const ICON_PRESS: HoverSpec = HoverSpec::new(0.9, 5.0, 0.1, Easing::Power1Out);
const ICON_RELEASE: HoverSpec = HoverSpec::new(1.15, 5.0, 0.2, Easing::Power1Out);

pub struct ContactSection {
    root: ElementId,
    heading: ElementId,
    form: ElementId,
    submit: ElementId,
    status_line: ElementId,
    socials: ElementId,
    icons: Vec<ElementId>,
    hover: HoverTweens,
    scope: AnimationScope,
}

impl ContactSection {
    pub fn mount(ctx: &mut MountContext<'_>) -> Result<Self> {
        let page = &mut *ctx.page;
        let parent = page.root();
        let root = page.create_node(
            parent,
            NodeSpec::column()
                .max_width(700.0)
                .padding(SECTION_PADDING)
                .gap(32.0)
                .label("contact")
                .anchor(NavLink::Contact.anchor()),
        );
        let heading = page.create_leaf(root, NodeSpec::fixed(HEADING_HEIGHT).label("contact.heading"), CONTACT_HEADING);

        let form = page.create_node(root, NodeSpec::column().gap(16.0).label("contact.form"));
        page.create_leaf(form, NodeSpec::fixed(48.0).label("contact.from_name"), "");
        page.create_leaf(form, NodeSpec::fixed(48.0).label("contact.from_email"), "");
        page.create_leaf(form, NodeSpec::fixed(140.0).label("contact.message"), "");
        let submit = page.create_leaf(form, NodeSpec::fixed(52.0).label("contact.submit"), SEND_LABEL);
        let status_line = page.create_leaf(form, NodeSpec::fixed(24.0).label("contact.status"), "");

        let socials = page.create_node(root, NodeSpec::row(0.0).gap(24.0).label("contact.socials"));
        let icons = SOCIAL_LINKS
            .iter()
            .map(|link| {
                page.create_leaf(
                    socials,
                    NodeSpec::fixed(56.0).label(format!("contact.{}", link.name.to_lowercase())),
                    link.url,
                )
            })
            .collect();

        let mut scope = AnimationScope::new("contact");
        let reveals = [(root, heading, "top 85%"), (form, form, "top 95%"), (socials, socials, "top 95%")];
        for (trigger_on, target, start) in reveals {
            let trigger = ScrollTrigger::new(trigger_on).start(anchor(start)?);
            let timeline = Timeline::builder()
                .defaults(0.6, Easing::Power2Out)
                .step(fade_up([target], 40.0))
                .build();
            scope.add_trigger(ctx.coordinator.register_scoped(trigger, timeline));
        }

        Ok(Self {
            root,
            heading,
            form,
            submit,
            status_line,
            socials,
            icons,
            hover: HoverTweens::default(),
            scope,
        })
    }

    pub fn heading(&self) -> ElementId {
        self.heading
    }

    pub fn form(&self) -> ElementId {
        self.form
    }

    pub fn submit_button(&self) -> ElementId {
        self.submit
    }

    pub fn socials(&self) -> ElementId {
        self.socials
    }

    pub fn icons(&self) -> &[ElementId] {
        &self.icons
    }

    /// Mirror the form state into the button label and the status line
    pub fn render_form(&self, form: &ContactForm, page: &mut Page) {
        page.set_content(self.submit, form.button_label());
        page.set_content(self.status_line, form.notice().unwrap_or_default());
    }
}

impl Section for ContactSection {
    fn name(&self) -> &'static str {
        "contact"
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
        let spec = if target == self.submit {
            match event {
                PointerEvent::Enter => BUTTON_HOVER,
                PointerEvent::Leave => BUTTON_REST,
                PointerEvent::Press => BUTTON_PRESS,
                PointerEvent::Release => BUTTON_RELEASE,
            }
        } else if self.icons.contains(&target) {
            match event {
                PointerEvent::Enter => ICON_HOVER,
                PointerEvent::Leave => ICON_REST,
                PointerEvent::Press => ICON_PRESS,
                PointerEvent::Release => ICON_RELEASE,
            }
        } else {
            return false;
        };
        self.hover.start(target, spec, page, coordinator);
        true
    }

    fn on_form_status(&mut self, form: &ContactForm, page: &mut Page) {
        self.render_form(form, page);
    }

    fn clear_interactions(&mut self) {
        self.hover.clear();
    }
}
