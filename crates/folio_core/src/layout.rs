//! Layout provider seam
//!
//! The rendering surface owns layout. The animation runtime asks it for the
//! viewport and element bounds every time it recomputes trigger ranges and
//! never caches the answers across frames, so resizes and content changes are
//! picked up on the next update.

use crate::element::ElementId;
use crate::geometry::{Rect, Size};

/// Geometry queries answered by the rendering surface
pub trait LayoutProvider {
    /// Current viewport size in pixels
    fn viewport(&self) -> Size;

    /// Bounds of a mounted element in document pixels, `None` once unmounted
    fn bounds(&self, id: ElementId) -> Option<Rect>;

    /// Total document height in pixels
    fn document_height(&self) -> f32;

    /// Maximum scroll offset for the current document and viewport
    fn scroll_limit(&self) -> f32 {
        (self.document_height() - self.viewport().height).max(0.0)
    }
}
