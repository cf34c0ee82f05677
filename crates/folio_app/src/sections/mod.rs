//! Page sections
//!
//! Each section builds its elements into the [`Page`] when it mounts and
//! registers its scroll triggers and timelines with the coordinator. The
//! registrations are collected in the section's [`AnimationScope`], so
//! unmounting reverts every animation before the elements are removed.

mod about;
mod contact;
mod gradient;
mod hero;
mod navbar;
mod projects;
mod skills;

pub use about::AboutSection;
pub use contact::ContactSection;
pub use gradient::GradientText;
pub use hero::HeroSection;
pub use navbar::{Navbar, NAVBAR_HEIGHT};
pub use projects::ProjectsSection;
pub use skills::SkillsSection;

use rustc_hash::FxHashMap;

use folio_animation::{AnimationScope, HoverSpec, ScrollTriggerCoordinator, TimelineHandle, TriggerAnchor};
use folio_core::ElementId;
use folio_theme::ColorScheme;

use crate::contact::ContactForm;
use crate::content::NavLink;
use crate::error::Result;
use crate::page::Page;

// Shared metrics, in pixels
pub(crate) const SECTION_PADDING: f32 = 80.0;
pub(crate) const HEADING_HEIGHT: f32 = 64.0;
pub(crate) const BODY_CHAR_WIDTH: f32 = 9.0;
pub(crate) const BODY_LINE_HEIGHT: f32 = 28.0;

/// What a section needs while it mounts
pub struct MountContext<'a> {
    pub page: &'a mut Page,
    pub coordinator: &'a ScrollTriggerCoordinator,
    pub scheme: ColorScheme,
}

/// Pointer interaction on an element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Press,
    Release,
}

/// A mounted part of the page
pub trait Section {
    fn name(&self) -> &'static str;

    /// Outermost element of the section
    fn root(&self) -> ElementId;

    fn scope(&self) -> &AnimationScope;

    fn scope_mut(&mut self) -> &mut AnimationScope;

    /// Handle pointer input on one of this section's elements.
    /// Returns whether the section owns `target`.
    fn on_pointer(
        &mut self,
        _target: ElementId,
        _event: PointerEvent,
        _page: &Page,
        _coordinator: &ScrollTriggerCoordinator,
    ) -> bool {
        false
    }

    /// Handle a click; returns the in-page destination if it navigates
    fn on_click(&mut self, _target: ElementId) -> Option<NavLink> {
        None
    }

    fn on_theme(&mut self, _scheme: ColorScheme, _page: &mut Page) {}

    /// Reflect a contact form state change
    fn on_form_status(&mut self, _form: &ContactForm, _page: &mut Page) {}

    /// Drop in-flight interaction tweens
    fn clear_interactions(&mut self) {}

    /// Unregister every animation, then remove the section's elements
    fn unmount(&mut self, page: &mut Page) {
        self.scope_mut().revert();
        self.clear_interactions();
        page.remove_subtree(self.root());
        tracing::debug!("section {}: unmounted", self.name());
    }
}

pub(crate) fn anchor(value: &str) -> Result<TriggerAnchor> {
    Ok(value.parse()?)
}

/// Hover and press tweens, at most one per element
#[derive(Default)]
pub struct HoverTweens {
    active: FxHashMap<ElementId, TimelineHandle>,
}

impl HoverTweens {
    /// Tween `target` from wherever it is now towards `spec`, replacing any
    /// tween already running on it
    pub fn start(
        &mut self,
        target: ElementId,
        spec: HoverSpec,
        page: &Page,
        coordinator: &ScrollTriggerCoordinator,
    ) {
        let current = page.style(target).unwrap_or_default();
        let handle = coordinator.add_timeline_scoped(spec.timeline(target, current));
        handle.play();
        self.active.insert(target, handle);
    }

    pub fn is_animating(&self, target: ElementId) -> bool {
        self.active.get(&target).is_some_and(|h| h.is_playing())
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
