//! Folio Core
//!
//! Foundational types shared by the Folio scroll and animation runtime:
//!
//! - **Geometry**: `Point`, `Size` and `Rect` in document pixels
//! - **Elements**: stable `ElementId` keys for everything a section mounts
//! - **Property model**: animatable properties and the `PropertySink` they are written to
//! - **Layout**: the `LayoutProvider` seam that reports element bounds on demand
//! - **Listeners**: handle-based listener registry (removal always matches registration)
//! - **Stores**: the durable key-value store used for preferences
//!
//! # Example
//!
//! ```rust
//! use folio_core::{Listeners, Property, Style};
//!
//! let mut style = Style::default();
//! style.set(Property::Opacity, 0.5);
//! assert_eq!(style.get(Property::Opacity), 0.5);
//!
//! let mut listeners: Listeners<f32> = Listeners::new();
//! let id = listeners.add(|offset| assert!(*offset >= 0.0));
//! listeners.emit(&12.0);
//! assert!(listeners.remove(id));
//! ```

pub mod element;
pub mod error;
pub mod events;
pub mod geometry;
pub mod layout;
pub mod store;
pub mod style;

pub use element::ElementId;
pub use error::{CoreError, Result};
pub use events::{ListenerId, Listeners};
pub use geometry::{Point, Rect, Size};
pub use layout::LayoutProvider;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use style::{Property, PropertySink, PropertyValues, RecordingSink, Style};
