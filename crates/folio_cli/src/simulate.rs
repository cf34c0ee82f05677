//! Headless scroll simulation
//!
//! Mounts the portfolio against an in-memory preference store, feeds it
//! scripted wheel input on a fixed frame clock and prints where every
//! scroll trigger stands after each frame.

use anyhow::Result;
use folio_app::{FolioConfig, NavLink, PortfolioApp, TriggerReport};
use folio_core::{LayoutProvider, MemoryStore, Size};

/// What to feed the app and for how long
#[derive(Clone, Debug)]
pub struct Script {
    pub viewport: Size,
    pub frames: u32,
    pub fps: f64,
    /// Wheel delta applied every `every` frames
    pub wheel: f32,
    pub every: u32,
    /// Section to jump to on the first frame instead of wheeling
    pub goto: Option<NavLink>,
    /// Print settled triggers too, not only those mid-range
    pub all: bool,
}

impl Script {
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.fps
    }

    /// Wheel delta to apply before `frame`, if any
    pub fn wheel_at(&self, frame: u32) -> Option<f32> {
        if self.goto.is_some() || self.every == 0 || self.wheel == 0.0 {
            return None;
        }
        (frame % self.every == 0).then_some(self.wheel)
    }
}

pub fn run(config: FolioConfig, script: &Script) -> Result<()> {
    let mut app = PortfolioApp::new(config, Box::new(MemoryStore::new()), script.viewport)?;
    let limit = app.page().scroll_limit();
    println!(
        "Simulating {} frames at {:.0} fps, viewport {}x{}, scroll limit {:.0}px",
        script.frames, script.fps, script.viewport.width, script.viewport.height, limit
    );

    if let Some(link) = script.goto {
        let target = app.navigate(link)?;
        println!("Navigating to #{} at {:.0}px", link.anchor(), target);
    }

    let frame_ms = script.frame_ms();
    for frame in 0..script.frames {
        if let Some(delta) = script.wheel_at(frame) {
            app.wheel(delta);
        }
        let now = f64::from(frame) * frame_ms;
        app.frame(now);

        let reports = app.trigger_reports();
        println!(
            "frame {:>4}  {:>7.0}ms  offset {:>8.1}  {}",
            frame,
            now,
            app.scroll_offset(),
            format_reports(&reports, script.all)
        );
    }

    println!();
    println!("Final offset {:.1}px ({:.0}%)", app.scroll_offset(), app.scroll_progress() * 100.0);
    println!("Live triggers: {}", app.coordinator().trigger_count());
    for report in app.trigger_reports() {
        println!("  {:<24} {:.3}", report.label, report.progress);
    }

    app.shutdown();
    Ok(())
}

/// `label=progress` pairs, mid-range only unless `all`
fn format_reports(reports: &[TriggerReport], all: bool) -> String {
    reports
        .iter()
        .filter(|r| all || (r.progress > 0.0 && r.progress < 1.0))
        .map(|r| format!("{}={:.2}", r.label, r.progress))
        .collect::<Vec<_>>()
        .join(" ")
}
