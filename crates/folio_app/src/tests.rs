//! Frame-loop tests for the assembled portfolio

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use folio_animation::LagSmoothing;
use folio_core::{CoreError, FileStore, KeyValueStore, LayoutProvider, MemoryStore, Size};
use folio_theme::{ColorScheme, THEME_KEY};

use crate::content::{SENDING_LABEL, SEND_FAILED, SEND_LABEL, SENT_NOTICE};
use crate::{
    AppError, ContactMessage, EmailRelay, FolioConfig, FormStatus, NavLink, PointerEvent, PortfolioApp, Result,
};

const FRAME_MS: f64 = 16.0;

fn desktop() -> Size {
    Size::new(1280.0, 800.0)
}

fn phone() -> Size {
    Size::new(600.0, 800.0)
}

fn app_with(config: FolioConfig, store: Box<dyn KeyValueStore>, viewport: Size) -> PortfolioApp {
    PortfolioApp::new(config, store, viewport).unwrap()
}

fn app() -> PortfolioApp {
    app_with(FolioConfig::default(), Box::new(MemoryStore::new()), desktop())
}

/// Drives an app with a steady 16ms clock
struct Clock {
    now: f64,
}

impl Clock {
    fn new() -> Self {
        Self { now: 0.0 }
    }

    fn run(&mut self, app: &mut PortfolioApp, frames: usize) {
        for _ in 0..frames {
            self.now += FRAME_MS;
            app.frame(self.now);
        }
    }

    fn run_until_settled(&mut self, app: &mut PortfolioApp) {
        for _ in 0..2000 {
            self.now += FRAME_MS;
            app.frame(self.now);
            if app.is_scroll_settled() {
                return;
            }
        }
        panic!("scroll did not settle");
    }
}

fn report_progress(app: &PortfolioApp, label: &str) -> Option<f32> {
    app.trigger_reports()
        .into_iter()
        .find(|report| report.label == label)
        .map(|report| report.progress)
}

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> folio_core::Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> folio_core::Result<()> {
        Err(CoreError::Store("read-only".to_string()))
    }

    fn remove(&self, _key: &str) -> folio_core::Result<()> {
        Err(CoreError::Store("read-only".to_string()))
    }
}

#[derive(Default)]
struct MockRelay {
    sent: Mutex<Vec<ContactMessage>>,
    fail: bool,
}

#[async_trait]
impl EmailRelay for MockRelay {
    async fn send(&self, message: &ContactMessage) -> Result<()> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail {
            Err(AppError::RelayStatus {
                status: 500,
                body: "relay down".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn valid_message() -> ContactMessage {
    ContactMessage::new("Ada", "ada@example.com", "Hello there")
}

// =============================================================================
// Mounting
// =============================================================================

#[test]
fn test_mount_all_sections() {
    let app = app();
    assert_eq!(app.section_names(), ["home", "about", "skill", "project", "contact"]);
    // about 3, skills 2, projects 2 per card, contact 3
    assert_eq!(app.coordinator().trigger_count(), 16);
    assert_eq!(app.trigger_reports().len(), 16);
    assert!(app.coordinator().is_attached());

    let page = app.page();
    assert!(page.document_height() > page.viewport().height);
    for link in NavLink::ALL {
        assert!(page.anchor_top(link.anchor()).is_some(), "missing #{}", link.anchor());
    }
}

#[test]
fn test_sections_stack_in_order() {
    let app = app();
    let page = app.page();
    let tops: Vec<f32> = NavLink::ALL
        .iter()
        .map(|link| page.anchor_top(link.anchor()).unwrap())
        .collect();
    assert!(tops.windows(2).all(|pair| pair[0] < pair[1]));
    // The navbar sits above the hero
    assert!(tops[0] >= crate::sections::NAVBAR_HEIGHT);
}

#[test]
fn test_hero_intro_plays_on_mount() {
    let mut app = app();
    let mut clock = Clock::new();
    clock.run(&mut app, 250);

    let content = app.style(app.find("hero.content").unwrap()).unwrap();
    assert!((content.opacity - 1.0).abs() < 1e-3);
    assert!(content.y.abs() < 1e-2);
    let image = app.style(app.find("hero.image").unwrap()).unwrap();
    assert!(image.x.abs() < 1e-2);
}

// =============================================================================
// Scrolling
// =============================================================================

#[test]
fn test_wheel_is_smoothed_on_desktop() {
    let mut app = app();
    let mut clock = Clock::new();
    clock.run(&mut app, 1);

    app.wheel(600.0);
    assert_eq!(app.scroll_state().raw_offset, 600.0);
    clock.run(&mut app, 1);
    let first = app.scroll_offset();
    assert!(first > 0.0 && first < 600.0);

    clock.run(&mut app, 1);
    assert!(app.scroll_offset() > first);

    clock.run_until_settled(&mut app);
    assert_eq!(app.scroll_offset(), 600.0);
    assert!(app.scroll_progress() > 0.0 && app.scroll_progress() < 1.0);
}

#[test]
fn test_wheel_follows_natively_on_phone() {
    let mut app = app_with(FolioConfig::default(), Box::new(MemoryStore::new()), phone());
    let mut clock = Clock::new();
    clock.run(&mut app, 1);

    app.wheel(300.0);
    clock.run(&mut app, 1);
    assert_eq!(app.scroll_offset(), 300.0);
}

#[test]
fn test_scroll_clamps_to_document() {
    let mut app = app();
    let mut clock = Clock::new();
    app.wheel(1.0e7);
    clock.run_until_settled(&mut app);

    let limit = app.page().scroll_limit();
    assert_eq!(app.scroll_offset(), limit);
    assert!((app.scroll_progress() - 1.0).abs() < 1e-6);

    app.wheel(-1.0e7);
    clock.run_until_settled(&mut app);
    assert_eq!(app.scroll_offset(), 0.0);
}

#[test]
fn test_scroll_reveals_text_and_sections() {
    let mut app = app();
    let mut clock = Clock::new();
    clock.run(&mut app, 1);
    assert_eq!(report_progress(&app, "skill"), Some(0.0));

    app.navigate(NavLink::About).unwrap();
    clock.run_until_settled(&mut app);
    // Let the scrubbed text catch up
    clock.run(&mut app, 120);

    assert!(report_progress(&app, "about.intro").unwrap() > 0.0);
    let intro = app.find("about.intro").unwrap();
    let first_glyph = app.page().children(intro)[0];
    let style = app.style(first_glyph).unwrap();
    assert!((style.opacity - 1.0).abs() < 1e-3);

    app.navigate(NavLink::Skill).unwrap();
    clock.run_until_settled(&mut app);
    clock.run(&mut app, 120);
    assert_eq!(report_progress(&app, "skill"), Some(1.0));
    let heading = app.style(app.find("skill.heading").unwrap()).unwrap();
    assert!((heading.opacity - 1.0).abs() < 1e-3);
}

#[test]
fn test_once_triggers_retire_after_completing() {
    let mut app = app();
    let mut clock = Clock::new();
    let before = app.coordinator().trigger_count();

    app.wheel(1.0e7);
    clock.run_until_settled(&mut app);
    clock.run(&mut app, 200);

    // Four project cards plus the skill tiles only ever play once
    assert_eq!(app.coordinator().trigger_count(), before - 5);
    let card = app.style(app.find("project.0").unwrap()).unwrap();
    assert!((card.opacity - 1.0).abs() < 1e-3);
    assert!(card.y.abs() < 1e-2);

    // Scrolling back up leaves the retired animations at their end state
    app.scroll_to(0.0, true);
    clock.run(&mut app, 10);
    let card = app.style(app.find("project.0").unwrap()).unwrap();
    assert!((card.opacity - 1.0).abs() < 1e-3);
}

#[test]
fn test_lag_smoothing_caps_long_frames() {
    let mut plain = app();
    let mut config = FolioConfig::default();
    config.scroll.lag_smoothing = true;
    let mut smoothed = app_with(config, Box::new(MemoryStore::new()), desktop());
    assert_eq!(smoothed.scheduler().lag_smoothing(), Some(LagSmoothing::default()));
    assert_eq!(plain.scheduler().lag_smoothing(), None);

    for app in [&mut plain, &mut smoothed] {
        app.frame(0.0);
        app.wheel(600.0);
        // A five second stall
        app.frame(5000.0);
    }

    assert!((plain.scroll_offset() - 600.0).abs() < 0.5);
    assert!(smoothed.scroll_offset() < 590.0);
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn test_navigate_closes_menu_and_scrolls() {
    let mut app = app();
    let mut clock = Clock::new();
    app.navbar_mut().toggle_menu();
    assert!(app.navbar().is_menu_open());

    let top = app.navigate(NavLink::Skill).unwrap();
    assert!(!app.navbar().is_menu_open());
    assert_eq!(Some(top), app.page().anchor_top("skill"));

    // Navigation is smoothed even for a single frame
    clock.run(&mut app, 2);
    assert!(app.scroll_offset() < top);

    clock.run_until_settled(&mut app);
    let expected = top.min(app.page().scroll_limit());
    assert!((app.scroll_offset() - expected).abs() < 0.5);
}

#[test]
fn test_click_follows_in_page_links() {
    let mut app = app();
    let contact_button = app.find("hero.contact").unwrap();
    assert_eq!(app.click(contact_button).unwrap(), Some(NavLink::Contact));
    let limit = app.page().scroll_limit();
    let top = app.page().anchor_top("contact").unwrap();
    assert_eq!(app.scroll_state().raw_offset, top.min(limit));

    let logo = app.navbar().logo();
    assert_eq!(app.click(logo).unwrap(), Some(NavLink::Home));

    let heading = app.find("about.heading").unwrap();
    assert_eq!(app.click(heading).unwrap(), None);
}

#[test]
fn test_menu_button_toggles() {
    let mut app = app();
    let button = app.navbar().menu_button();
    assert_eq!(app.click(button).unwrap(), None);
    assert!(app.navbar().is_menu_open());
    assert_eq!(app.click(button).unwrap(), None);
    assert!(!app.navbar().is_menu_open());
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_resize_reflows_skill_grid() {
    let mut app = app();
    let tile_x = |app: &PortfolioApp, name: &str| {
        let id = app.find(&format!("skill.{}", name)).unwrap();
        app.page().bounds(id).unwrap().x()
    };

    // Five columns: the fourth tile shares the first row
    assert_ne!(tile_x(&app, "HTML"), tile_x(&app, "React"));

    app.resize(phone());
    // Three columns: the fourth tile starts the second row
    assert_eq!(tile_x(&app, "HTML"), tile_x(&app, "React"));

    let mut clock = Clock::new();
    clock.run(&mut app, 1);
    app.wheel(250.0);
    clock.run(&mut app, 1);
    assert_eq!(app.scroll_offset(), 250.0);
}

#[test]
fn test_resize_clamps_offset() {
    let mut app = app();
    let mut clock = Clock::new();
    app.scroll_to(1.0e7, true);
    clock.run(&mut app, 1);
    let limit = app.page().scroll_limit();
    assert_eq!(app.scroll_offset(), limit);

    app.resize(Size::new(1280.0, 4000.0));
    assert!(app.scroll_offset() <= app.page().scroll_limit());
}

#[test]
fn test_shrinking_resize_moves_triggers_to_clamped_offset() {
    let mut app = app_with(FolioConfig::default(), Box::new(MemoryStore::new()), phone());
    let mut clock = Clock::new();
    app.scroll_to(1.0e7, true);
    clock.run(&mut app, 1);
    let tall_limit = app.page().scroll_limit();

    app.resize(desktop());
    let limit = app.page().scroll_limit();
    assert!(limit < tall_limit);
    assert_eq!(app.scroll_offset(), limit);
    assert_eq!(app.coordinator().last_offset(), app.scroll_offset());

    clock.run(&mut app, 5);
    assert_eq!(app.coordinator().last_offset(), app.scroll_offset());
}

// =============================================================================
// Theme
// =============================================================================

#[test]
fn test_stored_theme_is_restored() {
    let store = MemoryStore::with_values([(THEME_KEY, "dark")]);
    let app = app_with(FolioConfig::default(), Box::new(store), desktop());
    assert_eq!(app.theme().scheme(), ColorScheme::Dark);
    assert_eq!(app.root_class(), Some("dark"));

    let card = app.find("project.0").unwrap();
    let image = app.page().children(card)[0];
    assert_eq!(app.page().content(image), Some("chatsGptDark.png"));
}

#[test]
fn test_toggle_theme_persists_and_swaps_images() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    let mut app = app_with(
        FolioConfig::default(),
        Box::new(FileStore::open(&path).unwrap()),
        desktop(),
    );
    assert_eq!(app.root_class(), None);

    let card = app.find("project.0").unwrap();
    let image = app.page().children(card)[0];
    assert_eq!(app.page().content(image), Some("chatsGptLight.png"));

    assert_eq!(app.toggle_theme().unwrap(), ColorScheme::Dark);
    assert_eq!(app.page().content(image), Some("chatsGptDark.png"));
    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

    assert_eq!(app.toggle_theme().unwrap(), ColorScheme::Light);
    assert_eq!(app.page().content(image), Some("chatsGptLight.png"));
    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("light"));
}

#[test]
fn test_toggle_theme_survives_store_failure() {
    let mut app = app_with(FolioConfig::default(), Box::new(FailingStore), desktop());
    let err = app.toggle_theme().unwrap_err();
    assert!(matches!(err, AppError::Core(CoreError::Store(_))));

    assert_eq!(app.theme().scheme(), ColorScheme::Dark);
    let card = app.find("project.0").unwrap();
    let image = app.page().children(card)[0];
    assert_eq!(app.page().content(image), Some("chatsGptDark.png"));
}

// =============================================================================
// Pointer feedback
// =============================================================================

#[test]
fn test_icon_hover_tweens() {
    let mut app = app();
    let mut clock = Clock::new();
    let icon = app.find("contact.github").unwrap();

    assert!(app.pointer(icon, PointerEvent::Enter));
    clock.run(&mut app, 40);
    let style = app.style(icon).unwrap();
    assert!((style.scale - 1.15).abs() < 1e-4);
    assert!((style.rotate - 5.0).abs() < 1e-3);

    assert!(app.pointer(icon, PointerEvent::Leave));
    clock.run(&mut app, 40);
    let style = app.style(icon).unwrap();
    assert!((style.scale - 1.0).abs() < 1e-4);
    assert!(style.rotate.abs() < 1e-3);
}

#[test]
fn test_pointer_ignores_static_elements() {
    let mut app = app();
    let heading = app.find("about.heading").unwrap();
    assert!(!app.pointer(heading, PointerEvent::Enter));
}

// =============================================================================
// Contact form
// =============================================================================

#[tokio::test]
async fn test_contact_submission_succeeds_and_dismisses() {
    let mut app = app();
    let relay = Arc::new(MockRelay::default());
    app.set_relay(relay.clone());
    let submit = app.find("contact.submit").unwrap();
    let status_line = app.find("contact.status").unwrap();

    app.contact_form_mut().fill(valid_message());
    app.submit_contact().unwrap();
    assert_eq!(app.page().content(submit), Some(SENDING_LABEL));
    assert!(matches!(app.submit_contact(), Err(AppError::Busy)));

    app.settle_contact().await;
    assert!(matches!(app.contact_form().status(), FormStatus::Sent { .. }));
    assert_eq!(app.page().content(submit), Some(SEND_LABEL));
    assert_eq!(app.page().content(status_line), Some(SENT_NOTICE));
    assert_eq!(relay.sent.lock().unwrap().as_slice(), [valid_message()]);
    assert_eq!(app.contact_form().message(), &ContactMessage::default());

    // 300 frames of 16ms outlast the 4s confirmation
    let mut clock = Clock::new();
    clock.run(&mut app, 300);
    assert_eq!(app.contact_form().status(), &FormStatus::Idle);
    assert_eq!(app.page().content(status_line), Some(""));
}

#[tokio::test]
async fn test_contact_failure_keeps_message() {
    let mut app = app();
    let relay = Arc::new(MockRelay {
        fail: true,
        ..MockRelay::default()
    });
    app.set_relay(relay.clone());
    let status_line = app.find("contact.status").unwrap();

    app.contact_form_mut().fill(valid_message());
    app.submit_contact().unwrap();
    app.settle_contact().await;

    assert_eq!(
        app.contact_form().status(),
        &FormStatus::Failed(SEND_FAILED.to_string())
    );
    assert_eq!(app.page().content(status_line), Some(SEND_FAILED));
    assert_eq!(app.contact_form().message(), &valid_message());
    assert_eq!(relay.sent.lock().unwrap().len(), 1);

    // No automatic retry
    let mut clock = Clock::new();
    clock.run(&mut app, 100);
    assert_eq!(relay.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_contact_is_rejected_locally() {
    let mut app = app();
    let relay = Arc::new(MockRelay::default());
    app.set_relay(relay.clone());

    app.contact_form_mut().fill(ContactMessage::new("Ada", "not-an-address", "Hi"));
    let err = app.submit_contact().unwrap_err();
    assert!(matches!(err, AppError::Validation { field: "from_email", .. }));
    assert_eq!(app.contact_form().status(), &FormStatus::Idle);
    assert!(relay.sent.lock().unwrap().is_empty());
}

#[test]
fn test_contact_without_credentials() {
    let mut app = app();
    app.contact_form_mut().fill(valid_message());
    let err = app.submit_contact().unwrap_err();
    assert!(matches!(err, AppError::MissingCredential(_)));
    assert_eq!(app.contact_form().status(), &FormStatus::Idle);
}

// =============================================================================
// Teardown
// =============================================================================

#[test]
fn test_unmount_section() {
    let mut app = app();
    let before = app.coordinator().trigger_count();
    let grid = app.find("skill.grid").unwrap();

    app.unmount("skill").unwrap();
    assert_eq!(app.coordinator().trigger_count(), before - 2);
    assert!(app.find("skill").is_none());
    assert!(!app.page().contains(grid));
    assert!(!app.section_names().contains(&"skill"));
    assert!(matches!(app.navigate(NavLink::Skill), Err(AppError::UnknownSection(_))));
    assert!(matches!(app.unmount("skill"), Err(AppError::UnknownSection(_))));

    // The rest of the page keeps animating
    let mut clock = Clock::new();
    app.navigate(NavLink::Project).unwrap();
    clock.run_until_settled(&mut app);
    assert!(app.scroll_offset() > 0.0);
}

#[test]
fn test_shutdown_releases_everything() {
    let mut app = app();
    app.shutdown();

    assert_eq!(app.coordinator().trigger_count(), 0);
    assert_eq!(app.coordinator().timeline_count(), 0);
    assert!(!app.coordinator().is_attached());
    assert!(app.section_names().is_empty());
    assert_eq!(app.page().len(), 1);
    assert!(!app.frame(16.0));
}
