//! Element identifiers
//!
//! Every node a section mounts on the page gets an `ElementId` from the page's
//! slotmap. Ids are generational: an id held after its element was removed
//! never resolves to a newer element that reused the slot.

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a mounted page element
    pub struct ElementId;
}

impl ElementId {
    /// Convert to raw u64 (for logging and debug output)
    pub fn to_raw(self) -> u64 {
        self.0.as_ffi()
    }
}
