//! The portfolio application
//!
//! `PortfolioApp` owns one frame scheduler, the smoothed-scroll engine, the
//! trigger coordinator and the page. The host feeds it input and calls
//! [`PortfolioApp::frame`] once per display refresh; within a frame the
//! engine moves first, triggers and timelines advance next and property
//! values are committed to the page last.

use indexmap::IndexMap;
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use folio_animation::{FrameScheduler, InputKind, ScrollState, ScrollTriggerCoordinator, SmoothScroll};
use folio_core::{ElementId, KeyValueStore, LayoutProvider, Size, Style};
use folio_theme::{ColorScheme, ThemeState};

use crate::config::FolioConfig;
use crate::contact::{ContactForm, EmailJsRelay, EmailRelay};
use crate::content::NavLink;
use crate::error::{AppError, Result};
use crate::page::Page;
use crate::sections::{
    AboutSection, ContactSection, HeroSection, MountContext, Navbar, PointerEvent, ProjectsSection, Section,
    SkillsSection,
};

/// Progress of one registered trigger, for diagnostics
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerReport {
    /// Label of the nearest labelled element at or above the trigger target
    pub label: String,
    pub progress: f32,
}

pub struct PortfolioApp {
    // Sections go first so their scopes unregister before the coordinator drops
    sections: IndexMap<&'static str, Box<dyn Section>>,
    navbar: Navbar,
    coordinator: ScrollTriggerCoordinator,
    engine: SmoothScroll,
    scheduler: FrameScheduler,
    page: Rc<RefCell<Page>>,
    theme: ThemeState,
    contact_form: ContactForm,
    relay: Option<Arc<dyn EmailRelay>>,
    config: FolioConfig,
    last_frame_ms: Option<f64>,
}

impl PortfolioApp {
    /// Mount every section and start the frame loop
    pub fn new(config: FolioConfig, store: Box<dyn KeyValueStore>, viewport: Size) -> Result<Self> {
        let scheduler = FrameScheduler::new();
        scheduler.set_lag_smoothing(config.scroll.lag_smoothing());
        let engine = SmoothScroll::new(&scheduler, config.scroll.to_engine_config()?);
        let coordinator = ScrollTriggerCoordinator::new();
        let theme = ThemeState::load(store);
        let page = Rc::new(RefCell::new(Page::new(viewport)));

        let (navbar, sections) = {
            let mut guard = page.borrow_mut();
            let mut ctx = MountContext {
                page: &mut *guard,
                coordinator: &coordinator,
                scheme: theme.scheme(),
            };
            let navbar = Navbar::mount(&mut ctx);
            let mounted: [Box<dyn Section>; 5] = [
                Box::new(HeroSection::mount(&mut ctx)),
                Box::new(AboutSection::mount(&mut ctx)?),
                Box::new(SkillsSection::mount(&mut ctx)?),
                Box::new(ProjectsSection::mount(&mut ctx)?),
                Box::new(ContactSection::mount(&mut ctx)?),
            ];
            guard.compute_layout();

            let sections: IndexMap<&'static str, Box<dyn Section>> =
                mounted.into_iter().map(|section| (section.name(), section)).collect();
            (navbar, sections)
        };

        let contact_form = ContactForm::new(config.contact.dismiss_after_ms);
        let mut app = Self {
            sections,
            navbar,
            coordinator,
            engine,
            scheduler,
            page,
            theme,
            contact_form,
            relay: None,
            config,
            last_frame_ms: None,
        };
        app.sync_dimensions();
        app.coordinator.attach(&app.scheduler, &app.engine, Rc::clone(&app.page));
        app.refresh_triggers();
        app.render_form();
        app.scheduler.start();

        tracing::info!(
            "portfolio mounted: {} sections, {} triggers, document {:.0}px, theme {}",
            app.sections.len(),
            app.coordinator.trigger_count(),
            app.page.borrow().document_height(),
            app.theme.scheme()
        );
        Ok(app)
    }

    // =========================================================================
    // Frame loop and input
    // =========================================================================

    /// Run one frame. Returns false once the loop has been shut down.
    pub fn frame(&mut self, timestamp_ms: f64) -> bool {
        let ran = self.scheduler.frame(timestamp_ms);
        let dt_ms = self
            .last_frame_ms
            .map_or(0.0, |last| (timestamp_ms - last).max(0.0) as f32);
        self.last_frame_ms = Some(timestamp_ms);

        if self.contact_form.poll(dt_ms) {
            self.render_form();
        }
        ran
    }

    pub fn wheel(&self, delta: f32) {
        self.engine.scroll_by(delta, InputKind::Wheel);
    }

    pub fn touch(&self, delta: f32) {
        self.engine.scroll_by(delta, InputKind::Touch);
    }

    pub fn scroll_to(&self, offset: f32, immediate: bool) {
        self.engine.scroll_to(offset, immediate);
    }

    /// Smoothly scroll to a section and close the mobile menu.
    /// Returns the target offset.
    pub fn navigate(&mut self, link: NavLink) -> Result<f32> {
        self.navbar.close_menu();
        let top = self
            .page
            .borrow()
            .anchor_top(link.anchor())
            .ok_or_else(|| AppError::UnknownSection(link.anchor().to_string()))?;
        tracing::debug!("navigate to #{} at {:.0}px", link.anchor(), top);
        self.engine.scroll_to(top, false);
        Ok(top)
    }

    /// Click on an element; follows in-page links
    pub fn click(&mut self, target: ElementId) -> Result<Option<NavLink>> {
        let link = self
            .navbar
            .on_click(target)
            .or_else(|| self.sections.values_mut().find_map(|s| s.on_click(target)));
        if let Some(link) = link {
            self.navigate(link)?;
        }
        Ok(link)
    }

    /// Route pointer input to the section owning `target`
    pub fn pointer(&mut self, target: ElementId, event: PointerEvent) -> bool {
        let page = self.page.borrow();
        let coordinator = &self.coordinator;
        self.sections
            .values_mut()
            .any(|section| section.on_pointer(target, event, &page, coordinator))
    }

    /// Re-layout for a new viewport and recompute every trigger
    pub fn resize(&mut self, viewport: Size) {
        self.page.borrow_mut().resize(viewport);
        self.sync_dimensions();
        self.refresh_triggers();
        tracing::debug!("resized to {}x{}", viewport.width, viewport.height);
    }

    // =========================================================================
    // Theme
    // =========================================================================

    /// Flip the color scheme. Sections follow the new scheme even when it
    /// could not be persisted.
    pub fn toggle_theme(&mut self) -> Result<ColorScheme> {
        let persisted = self.theme.toggle();
        let scheme = self.theme.scheme();
        {
            let mut page = self.page.borrow_mut();
            for section in self.sections.values_mut() {
                section.on_theme(scheme, &mut page);
            }
        }
        persisted?;
        Ok(scheme)
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    /// Class applied to the document root, if any
    pub fn root_class(&self) -> Option<&'static str> {
        self.theme.root_class()
    }

    // =========================================================================
    // Contact form
    // =========================================================================

    pub fn contact_form(&self) -> &ContactForm {
        &self.contact_form
    }

    pub fn contact_form_mut(&mut self) -> &mut ContactForm {
        &mut self.contact_form
    }

    /// Use `relay` for contact submissions instead of the configured service
    pub fn set_relay(&mut self, relay: Arc<dyn EmailRelay>) {
        self.relay = Some(relay);
    }

    /// Submit the contact form. The outcome is picked up by later frames.
    pub fn submit_contact(&mut self) -> Result<()> {
        let relay = self.relay()?;
        self.contact_form.submit(relay)?;
        self.render_form();
        Ok(())
    }

    /// Wait for an in-flight submission and apply its outcome
    pub async fn settle_contact(&mut self) {
        self.contact_form.settle().await;
        self.render_form();
    }

    fn relay(&mut self) -> Result<Arc<dyn EmailRelay>> {
        if let Some(relay) = &self.relay {
            return Ok(Arc::clone(relay));
        }
        let relay: Arc<dyn EmailRelay> = Arc::new(EmailJsRelay::new(&self.config.contact)?);
        self.relay = Some(Arc::clone(&relay));
        Ok(relay)
    }

    fn render_form(&mut self) {
        let mut page = self.page.borrow_mut();
        for section in self.sections.values_mut() {
            section.on_form_status(&self.contact_form, &mut page);
        }
    }

    // =========================================================================
    // Sections
    // =========================================================================

    /// Unmount a section: its animations are unregistered, then its elements
    /// are removed and the page re-laid out
    pub fn unmount(&mut self, name: &str) -> Result<()> {
        let mut section = self
            .sections
            .shift_remove(name)
            .ok_or_else(|| AppError::UnknownSection(name.to_string()))?;
        {
            let mut page = self.page.borrow_mut();
            section.unmount(&mut page);
            page.compute_layout();
        }
        self.sync_dimensions();
        self.refresh_triggers();
        Ok(())
    }

    /// Stop the frame loop and release every animation
    pub fn shutdown(&mut self) {
        let mut page = self.page.borrow_mut();
        for (_, mut section) in self.sections.drain(..) {
            section.unmount(&mut page);
        }
        self.navbar.unmount(&mut page);
        drop(page);

        self.coordinator.detach();
        self.engine.destroy();
        self.scheduler.stop();
        tracing::info!("portfolio shut down");
    }

    pub fn section(&self, name: &str) -> Option<&dyn Section> {
        self.sections.get(name).map(|s| s.as_ref())
    }

    pub fn section_names(&self) -> Vec<&'static str> {
        self.sections.keys().copied().collect()
    }

    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    pub fn navbar_mut(&mut self) -> &mut Navbar {
        &mut self.navbar
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn page(&self) -> Ref<'_, Page> {
        self.page.borrow()
    }

    pub fn coordinator(&self) -> &ScrollTriggerCoordinator {
        &self.coordinator
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn find(&self, label: &str) -> Option<ElementId> {
        self.page.borrow().find(label)
    }

    pub fn style(&self, id: ElementId) -> Option<Style> {
        self.page.borrow().style(id)
    }

    /// Current virtual (smoothed) offset
    pub fn scroll_offset(&self) -> f32 {
        self.engine.offset()
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.engine.state()
    }

    /// Fraction of the scrollable range covered
    pub fn scroll_progress(&self) -> f32 {
        self.engine.progress()
    }

    pub fn is_scroll_settled(&self) -> bool {
        self.engine.is_settled()
    }

    /// Progress of every live trigger, in registration order
    pub fn trigger_reports(&self) -> Vec<TriggerReport> {
        let page = self.page.borrow();
        self.coordinator
            .triggers()
            .into_iter()
            .filter_map(|(id, target)| {
                let progress = self.coordinator.progress(id)?;
                Some(TriggerReport {
                    label: nearest_label(&page, target),
                    progress,
                })
            })
            .collect()
    }

    fn sync_dimensions(&self) {
        let (viewport, document_height) = {
            let page = self.page.borrow();
            (page.viewport(), page.document_height())
        };
        self.engine.set_dimensions(viewport, document_height);
    }

    fn refresh_triggers(&self) {
        let page = self.page.borrow();
        let events = self.coordinator.on_scroll_changed(self.engine.offset(), &*page);
        if !events.is_empty() {
            tracing::debug!("refresh: {} trigger events", events.len());
        }
    }
}

fn nearest_label(page: &Page, mut id: ElementId) -> String {
    loop {
        if let Some(label) = page.label(id) {
            return label.to_string();
        }
        match page.parent(id) {
            Some(parent) => id = parent,
            None => return format!("element {}", id.to_raw()),
        }
    }
}
