//! Page layout model
//!
//! A small block-layout tree standing in for the rendering surface. Sections
//! create nodes under the root, `compute_layout` assigns every node a
//! document-space rectangle, and the page answers the animation runtime's
//! geometry queries (`LayoutProvider`) and receives its property writes
//! (`PropertySink`).
//!
//! Layout is deliberately simple: columns stack, rows split their width
//! evenly (collapsing to a column on narrow viewports), grids pick a column
//! count from the viewport width and text nodes wrap one element per
//! character.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

use folio_core::{ElementId, LayoutProvider, Property, PropertySink, Rect, Size, Style};

/// Small screens (`sm`)
pub const SM_BREAKPOINT: f32 = 640.0;
/// Tablets and up (`md`)
pub const MD_BREAKPOINT: f32 = 768.0;

/// Vertical sizing of a node
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Extent {
    /// Height of the content plus padding
    Auto,
    /// Fixed height in pixels
    Fixed(f32),
    /// At least a fraction of the viewport height; `narrow` applies below `md`
    MinViewport { narrow: f32, wide: f32 },
}

/// How a node arranges its children
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Flow {
    Column,
    /// Side by side, stacking as a column when the viewport is narrower than `collapse_below`
    Row { collapse_below: f32 },
    /// 3, 4 or 5 equal columns depending on the viewport width
    Grid,
    /// Children are glyphs laid out in wrapped lines
    Text { char_width: f32, line_height: f32 },
}

/// Declarative description of a node
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSpec {
    pub label: Option<String>,
    /// Fragment id, for in-page navigation
    pub anchor: Option<&'static str>,
    pub extent: Extent,
    pub flow: Flow,
    pub padding: f32,
    pub gap: f32,
    /// Content width cap; narrower content is centred
    pub max_width: Option<f32>,
}

impl Default for NodeSpec {
    fn default() -> Self {
        Self {
            label: None,
            anchor: None,
            extent: Extent::Auto,
            flow: Flow::Column,
            padding: 0.0,
            gap: 0.0,
            max_width: None,
        }
    }
}

impl NodeSpec {
    pub fn column() -> Self {
        Self::default()
    }

    pub fn row(collapse_below: f32) -> Self {
        Self {
            flow: Flow::Row { collapse_below },
            ..Self::default()
        }
    }

    pub fn grid() -> Self {
        Self {
            flow: Flow::Grid,
            ..Self::default()
        }
    }

    pub fn text(char_width: f32, line_height: f32) -> Self {
        Self {
            flow: Flow::Text {
                char_width,
                line_height,
            },
            ..Self::default()
        }
    }

    /// A leaf of fixed height
    pub fn fixed(height: f32) -> Self {
        Self {
            extent: Extent::Fixed(height),
            ..Self::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn anchor(mut self, anchor: &'static str) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn extent(mut self, extent: Extent) -> Self {
        self.extent = extent;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }
}

struct Node {
    spec: NodeSpec,
    parent: Option<ElementId>,
    children: SmallVec<[ElementId; 4]>,
    content: Option<String>,
    style: Style,
    bounds: Rect,
}

/// The mounted document
pub struct Page {
    nodes: SlotMap<ElementId, Node>,
    root: ElementId,
    viewport: Size,
    labels: FxHashMap<String, ElementId>,
    anchors: FxHashMap<&'static str, ElementId>,
    dirty: bool,
}

impl Page {
    pub fn new(viewport: Size) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            spec: NodeSpec::column().label("root"),
            parent: None,
            children: SmallVec::new(),
            content: None,
            style: Style::default(),
            bounds: Rect::ZERO,
        });
        let mut labels = FxHashMap::default();
        labels.insert("root".to_string(), root);

        Self {
            nodes,
            root,
            viewport,
            labels,
            anchors: FxHashMap::default(),
            dirty: true,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Number of columns a grid uses at `width`
    pub fn grid_columns(width: f32) -> usize {
        if width < SM_BREAKPOINT {
            3
        } else if width < MD_BREAKPOINT {
            4
        } else {
            5
        }
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Create a node as the last child of `parent`. A missing parent leaves the
    /// node detached.
    pub fn create_node(&mut self, parent: ElementId, spec: NodeSpec) -> ElementId {
        let label = spec.label.clone();
        let anchor = spec.anchor;
        let attached = self.nodes.contains_key(parent);
        let id = self.nodes.insert(Node {
            spec,
            parent: attached.then_some(parent),
            children: SmallVec::new(),
            content: None,
            style: Style::default(),
            bounds: Rect::ZERO,
        });

        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(id);
        } else {
            tracing::warn!("Page: parent of {:?} is not mounted", id);
        }
        if let Some(label) = label {
            self.labels.insert(label, id);
        }
        if let Some(anchor) = anchor {
            self.anchors.insert(anchor, id);
        }
        self.dirty = true;
        id
    }

    /// Create a leaf carrying `content` (a label, an image source, a link)
    pub fn create_leaf(
        &mut self,
        parent: ElementId,
        spec: NodeSpec,
        content: impl Into<String>,
    ) -> ElementId {
        let id = self.create_node(parent, spec);
        self.set_content(id, content);
        id
    }

    /// Create a text block with one element per character. Returns the block
    /// and its glyphs in reading order.
    pub fn add_text(
        &mut self,
        parent: ElementId,
        spec: NodeSpec,
        text: &str,
    ) -> (ElementId, Vec<ElementId>) {
        let block = self.create_node(parent, spec);
        self.set_content(block, text);
        let glyphs = text
            .chars()
            .map(|ch| self.create_leaf(block, NodeSpec::default(), ch.to_string()))
            .collect();
        (block, glyphs)
    }

    /// Remove a node and all its descendants
    pub fn remove_subtree(&mut self, id: ElementId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|child| *child != id);
        }
        self.remove_recursive(id);
        self.dirty = true;
    }

    fn remove_recursive(&mut self, id: ElementId) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        if let Some(label) = &node.spec.label {
            if self.labels.get(label) == Some(&id) {
                self.labels.remove(label);
            }
        }
        if let Some(anchor) = node.spec.anchor {
            if self.anchors.get(anchor) == Some(&id) {
                self.anchors.remove(anchor);
            }
        }
        for child in node.children {
            self.remove_recursive(child);
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Look up a node by label
    pub fn find(&self, label: &str) -> Option<ElementId> {
        self.labels.get(label).copied()
    }

    pub fn label(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.spec.label.as_deref())
    }

    /// Document offset of the top of the node with fragment id `anchor`
    pub fn anchor_top(&self, anchor: &str) -> Option<f32> {
        let id = self.anchors.get(anchor.trim_start_matches('#'))?;
        self.nodes.get(*id).map(|n| n.bounds.top())
    }

    pub fn set_content(&mut self, id: ElementId, content: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.content = Some(content.into());
        }
    }

    pub fn content(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.content.as_deref())
    }

    /// Current rendered property values of a node
    pub fn style(&self, id: ElementId) -> Option<Style> {
        self.nodes.get(id).map(|n| n.style)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the tree changed since the last layout pass
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // =========================================================================
    // Layout
    // =========================================================================

    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.compute_layout();
    }

    /// Assign bounds to every node reachable from the root
    pub fn compute_layout(&mut self) {
        let width = self.viewport.width.max(0.0);
        self.layout_node(self.root, 0.0, 0.0, width);
        self.dirty = false;
    }

    /// Lay out `id` at (`x`, `y`) within `width`; returns the node's height
    fn layout_node(&mut self, id: ElementId, x: f32, y: f32, width: f32) -> f32 {
        let Some(node) = self.nodes.get(id) else {
            return 0.0;
        };
        let spec = node.spec.clone();
        let children = node.children.clone();

        let outer_width = spec.max_width.map_or(width, |max| width.min(max));
        let outer_x = x + (width - outer_width) / 2.0;
        let inner_x = outer_x + spec.padding;
        let inner_y = y + spec.padding;
        let inner_width = (outer_width - spec.padding * 2.0).max(0.0);

        let content_height = match spec.flow {
            Flow::Column => self.layout_column(&children, inner_x, inner_y, inner_width, spec.gap),
            Flow::Row { collapse_below } if self.viewport.width < collapse_below => {
                self.layout_column(&children, inner_x, inner_y, inner_width, spec.gap)
            }
            Flow::Row { .. } => self.layout_row(&children, inner_x, inner_y, inner_width, spec.gap),
            Flow::Grid => self.layout_grid(&children, inner_x, inner_y, inner_width, spec.gap),
            Flow::Text {
                char_width,
                line_height,
            } => self.layout_text(&children, inner_x, inner_y, inner_width, char_width, line_height),
        };

        let natural = content_height + spec.padding * 2.0;
        let height = match spec.extent {
            Extent::Auto => natural,
            Extent::Fixed(h) => h,
            Extent::MinViewport { narrow, wide } => {
                let fraction = if self.viewport.width < MD_BREAKPOINT {
                    narrow
                } else {
                    wide
                };
                natural.max(self.viewport.height * fraction)
            }
        };

        if let Some(node) = self.nodes.get_mut(id) {
            node.bounds = Rect::new(outer_x, y, outer_width, height);
        }
        height
    }

    fn layout_column(&mut self, children: &[ElementId], x: f32, y: f32, width: f32, gap: f32) -> f32 {
        let mut cursor = y;
        for (i, &child) in children.iter().enumerate() {
            if i > 0 {
                cursor += gap;
            }
            cursor += self.layout_node(child, x, cursor, width);
        }
        cursor - y
    }

    fn layout_row(&mut self, children: &[ElementId], x: f32, y: f32, width: f32, gap: f32) -> f32 {
        if children.is_empty() {
            return 0.0;
        }
        let count = children.len() as f32;
        let cell = ((width - gap * (count - 1.0)) / count).max(0.0);
        children
            .iter()
            .enumerate()
            .map(|(i, &child)| self.layout_node(child, x + i as f32 * (cell + gap), y, cell))
            .fold(0.0, f32::max)
    }

    fn layout_grid(&mut self, children: &[ElementId], x: f32, y: f32, width: f32, gap: f32) -> f32 {
        let columns = Self::grid_columns(self.viewport.width);
        let cell = ((width - gap * (columns as f32 - 1.0)) / columns as f32).max(0.0);
        let mut cursor = y;
        for (row, chunk) in children.chunks(columns).enumerate() {
            if row > 0 {
                cursor += gap;
            }
            let row_height = chunk
                .iter()
                .enumerate()
                .map(|(col, &child)| self.layout_node(child, x + col as f32 * (cell + gap), cursor, cell))
                .fold(0.0, f32::max);
            cursor += row_height;
        }
        cursor - y
    }

    fn layout_text(
        &mut self,
        glyphs: &[ElementId],
        x: f32,
        y: f32,
        width: f32,
        char_width: f32,
        line_height: f32,
    ) -> f32 {
        if glyphs.is_empty() {
            return 0.0;
        }
        let per_line = ((width / char_width).floor() as usize).max(1);
        for (i, &glyph) in glyphs.iter().enumerate() {
            let col = (i % per_line) as f32;
            let line = (i / per_line) as f32;
            if let Some(node) = self.nodes.get_mut(glyph) {
                node.bounds = Rect::new(x + col * char_width, y + line * line_height, char_width, line_height);
            }
        }
        glyphs.len().div_ceil(per_line) as f32 * line_height
    }
}

impl LayoutProvider for Page {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.nodes.get(id).map(|n| n.bounds)
    }

    fn document_height(&self) -> f32 {
        self.nodes.get(self.root).map_or(0.0, |n| n.bounds.height())
    }
}

impl PropertySink for Page {
    fn write(&mut self, id: ElementId, property: Property, value: f32) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.style.set(property, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> Size {
        Size::new(1280.0, 800.0)
    }

    #[test]
    fn test_column_stacking() {
        let mut page = Page::new(desktop());
        let root = page.root();
        let a = page.create_node(root, NodeSpec::fixed(100.0));
        let b = page.create_node(root, NodeSpec::fixed(50.0));
        page.compute_layout();

        assert_eq!(page.bounds(a).unwrap(), Rect::new(0.0, 0.0, 1280.0, 100.0));
        assert_eq!(page.bounds(b).unwrap().top(), 100.0);
        assert_eq!(page.document_height(), 150.0);
        assert_eq!(page.scroll_limit(), 0.0);
    }

    #[test]
    fn test_max_width_centres_content() {
        let mut page = Page::new(desktop());
        let root = page.root();
        let section = page.create_node(root, NodeSpec::column().max_width(800.0).padding(20.0));
        let child = page.create_node(section, NodeSpec::fixed(10.0));
        page.compute_layout();

        let bounds = page.bounds(section).unwrap();
        assert_eq!(bounds.x(), 240.0);
        assert_eq!(bounds.height(), 50.0);
        assert_eq!(page.bounds(child).unwrap(), Rect::new(260.0, 20.0, 760.0, 10.0));
    }

    #[test]
    fn test_grid_columns_follow_viewport() {
        assert_eq!(Page::grid_columns(500.0), 3);
        assert_eq!(Page::grid_columns(700.0), 4);
        assert_eq!(Page::grid_columns(1024.0), 5);

        let mut page = Page::new(Size::new(600.0, 800.0));
        let root = page.root();
        let grid = page.create_node(root, NodeSpec::grid());
        let tiles: Vec<_> = (0..9).map(|_| page.create_node(grid, NodeSpec::fixed(100.0))).collect();
        page.compute_layout();
        assert_eq!(page.bounds(grid).unwrap().height(), 300.0);
        assert_eq!(page.bounds(tiles[3]).unwrap().top(), 100.0);

        page.resize(Size::new(1024.0, 800.0));
        assert_eq!(page.bounds(grid).unwrap().height(), 200.0);
        assert_eq!(page.bounds(tiles[5]).unwrap().top(), 100.0);
    }

    #[test]
    fn test_row_collapses_on_narrow_viewport() {
        let mut page = Page::new(desktop());
        let root = page.root();
        let row = page.create_node(root, NodeSpec::row(MD_BREAKPOINT));
        let left = page.create_node(row, NodeSpec::fixed(200.0));
        let right = page.create_node(row, NodeSpec::fixed(300.0));
        page.compute_layout();

        assert_eq!(page.bounds(row).unwrap().height(), 300.0);
        assert_eq!(page.bounds(right).unwrap().x(), 640.0);
        assert_eq!(page.bounds(left).unwrap().top(), page.bounds(right).unwrap().top());

        page.resize(Size::new(400.0, 800.0));
        assert_eq!(page.bounds(row).unwrap().height(), 500.0);
        assert_eq!(page.bounds(right).unwrap().top(), 200.0);
    }

    #[test]
    fn test_text_wraps_per_character() {
        let mut page = Page::new(Size::new(100.0, 800.0));
        let root = page.root();
        let (block, glyphs) = page.add_text(root, NodeSpec::text(10.0, 20.0), "hello world!");
        page.compute_layout();

        assert_eq!(glyphs.len(), 12);
        assert_eq!(page.content(block), Some("hello world!"));
        assert_eq!(page.content(glyphs[1]), Some("e"));
        assert_eq!(page.bounds(block).unwrap().height(), 40.0);
        assert_eq!(page.bounds(glyphs[10]).unwrap(), Rect::new(0.0, 20.0, 10.0, 20.0));
    }

    #[test]
    fn test_min_viewport_extent() {
        let mut page = Page::new(desktop());
        let root = page.root();
        let hero = page.create_node(
            root,
            NodeSpec::column().extent(Extent::MinViewport {
                narrow: 0.9,
                wide: 1.0,
            }),
        );
        page.compute_layout();
        assert_eq!(page.bounds(hero).unwrap().height(), 800.0);

        page.resize(Size::new(400.0, 800.0));
        assert_eq!(page.bounds(hero).unwrap().height(), 720.0);
    }

    #[test]
    fn test_remove_subtree() {
        let mut page = Page::new(desktop());
        let root = page.root();
        let section = page.create_node(root, NodeSpec::fixed(100.0).label("about").anchor("about"));
        let child = page.create_node(section, NodeSpec::fixed(10.0));
        page.compute_layout();
        assert_eq!(page.find("about"), Some(section));
        assert_eq!(page.anchor_top("#about"), Some(0.0));

        page.remove_subtree(section);
        assert!(page.is_dirty());
        assert_eq!(page.bounds(section), None);
        assert_eq!(page.bounds(child), None);
        assert_eq!(page.find("about"), None);
        assert_eq!(page.anchor_top("about"), None);
        assert!(page.children(root).is_empty());
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn test_property_writes() {
        let mut page = Page::new(desktop());
        let root = page.root();
        let id = page.create_node(root, NodeSpec::fixed(10.0));
        page.write(id, Property::Opacity, 0.25);
        assert_eq!(page.style(id).unwrap().opacity, 0.25);

        page.remove_subtree(id);
        page.write(id, Property::Opacity, 1.0);
        assert_eq!(page.style(id), None);
    }
}
