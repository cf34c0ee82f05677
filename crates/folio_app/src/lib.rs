//! Folio App
//!
//! The portfolio page built on the Folio runtime: static content, a block
//! layout model for the page, the section components with their scroll
//! animations, the contact form and its email relay, and the
//! [`PortfolioApp`] that runs them from a single frame loop.
//!
//! # Example
//!
//! ```rust
//! use folio_app::{FolioConfig, NavLink, PortfolioApp};
//! use folio_core::{MemoryStore, Size};
//!
//! let mut app = PortfolioApp::new(
//!     FolioConfig::default(),
//!     Box::new(MemoryStore::new()),
//!     Size::new(1280.0, 800.0),
//! )
//! .unwrap();
//!
//! let target = app.navigate(NavLink::Skill).unwrap();
//! let mut now = 0.0;
//! while !app.is_scroll_settled() {
//!     now += 16.0;
//!     app.frame(now);
//! }
//! assert!((app.scroll_offset() - target).abs() < 0.5);
//! ```

pub mod app;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod page;
pub mod sections;

#[cfg(test)]
mod tests;

pub use app::{PortfolioApp, TriggerReport};
pub use config::FolioConfig;
pub use contact::{ContactForm, ContactMessage, EmailJsRelay, EmailRelay, FormField, FormStatus};
pub use content::NavLink;
pub use error::{AppError, Result};
pub use page::{Page, MD_BREAKPOINT, SM_BREAKPOINT};
pub use sections::{PointerEvent, Section};
