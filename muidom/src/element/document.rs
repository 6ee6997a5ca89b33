use std::collections::HashMap;

use super::{ElementId, ElementKind, Node};
use crate::error::HostError;
use crate::layout::Rect;
use crate::scroll::{ScrollHost, ScrollPosition, SCROLL_LOCK_CLASS};

/// Element tree plus the window state that owns it (viewport and scroll).
#[derive(Debug)]
pub struct Document {
    nodes: HashMap<ElementId, Node>,
    body: ElementId,
    next_id: u64,
    viewport: (i32, i32),
    scroll: ScrollPosition,
}

impl Document {
    /// Create an empty document with a body covering the viewport.
    pub fn new(width: i32, height: i32) -> Self {
        let body = ElementId(0);
        let mut node = Node::new(ElementKind::Body);
        node.rect = Rect::from_size(width, height);

        let mut nodes = HashMap::new();
        nodes.insert(body, node);

        Self {
            nodes,
            body,
            next_id: 1,
            viewport: (width, height),
            scroll: ScrollPosition::default(),
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Append a new element of the given kind to `parent`.
    pub fn create(&mut self, kind: ElementKind, parent: ElementId) -> Result<ElementId, HostError> {
        if !self.nodes.contains_key(&parent) {
            return Err(HostError::UnknownElement(parent));
        }

        let id = ElementId(self.next_id);
        self.next_id += 1;

        let mut node = Node::new(kind);
        node.parent = Some(parent);
        self.nodes.insert(id, node);
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }

        log::trace!("[document] created {} ({:?}) under {}", id, kind, parent);
        Ok(id)
    }

    /// Remove an element and its subtree. Returns every removed id.
    /// Removing the body or an unknown element removes nothing.
    pub fn remove(&mut self, id: ElementId) -> Vec<ElementId> {
        if id == self.body || !self.nodes.contains_key(&id) {
            return Vec::new();
        }

        if let Some(parent) = self.nodes.get(&id).and_then(|n| n.parent) {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|c| *c != id);
            }
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
                removed.push(current);
            }
        }
        removed
    }

    pub fn get(&self, id: ElementId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn node(&self, id: ElementId) -> Result<&Node, HostError> {
        self.nodes.get(&id).ok_or(HostError::UnknownElement(id))
    }

    pub fn node_mut(&mut self, id: ElementId) -> Result<&mut Node, HostError> {
        self.nodes.get_mut(&id).ok_or(HostError::UnknownElement(id))
    }

    pub fn is_attached(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Whether `node` is `ancestor` or lies in its subtree.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    /// Path from the body down to `id`, inclusive. Empty for unknown ids.
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            let Some(node) = self.nodes.get(&cur) else {
                return Vec::new();
            };
            path.push(cur);
            current = node.parent;
        }
        path.reverse();
        path
    }

    /// Focusable elements with a non-negative tab index, in tree order.
    pub fn tab_order(&self) -> Vec<ElementId> {
        let mut result = Vec::new();
        self.collect_tab_order(self.body, &mut result);
        result
    }

    fn collect_tab_order(&self, id: ElementId, result: &mut Vec<ElementId>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if node.is_focusable() && node.effective_tab_index().is_some_and(|t| t >= 0) {
            result.push(id);
        }
        for child in &node.children {
            self.collect_tab_order(*child, result);
        }
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.classes.remove(class);
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.has_class(class))
    }

    pub fn tab_index(&self, id: ElementId) -> Option<i32> {
        self.nodes.get(&id).and_then(|n| n.effective_tab_index())
    }

    pub fn set_tab_index(&mut self, id: ElementId, tab_index: Option<i32>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.tab_index = tab_index;
        }
    }

    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.rect = rect;
        }
    }

    /// Element rectangle relative to the viewport.
    pub fn bounding_client_rect(&self, id: ElementId) -> Option<Rect> {
        let node = self.nodes.get(&id)?;
        Some(node.rect.translate(-self.scroll.left, -self.scroll.top))
    }

    // =========================================================================
    // Window
    // =========================================================================

    pub fn viewport(&self) -> (i32, i32) {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: i32, height: i32) {
        self.viewport = (width, height);
        let body = self.body;
        if let Some(node) = self.nodes.get_mut(&body) {
            node.rect.width = node.rect.width.max(width);
            node.rect.height = node.rect.height.max(height);
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.has_class(self.body, SCROLL_LOCK_CLASS)
    }

    /// User-initiated scroll. Refused while the body is scroll-locked.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) -> bool {
        if self.is_scroll_locked() {
            log::trace!("[document] scroll refused, body is locked");
            return false;
        }
        let target = ScrollPosition::new(self.scroll.left + dx, self.scroll.top + dy);
        let before = self.scroll;
        self.scroll_to(target);
        self.scroll != before
    }

    /// Largest scroll offsets the page allows.
    fn max_scroll(&self) -> ScrollPosition {
        let body = self.nodes.get(&self.body).map(|n| n.rect).unwrap_or_default();
        ScrollPosition::new(
            (body.width - self.viewport.0).max(0),
            (body.height - self.viewport.1).max(0),
        )
    }
}

impl ScrollHost for Document {
    fn scroll_position(&self) -> ScrollPosition {
        self.scroll
    }

    fn scroll_to(&mut self, position: ScrollPosition) {
        let max = self.max_scroll();
        self.scroll = ScrollPosition::new(
            position.left.clamp(0, max.left),
            position.top.clamp(0, max.top),
        );
    }

    fn add_body_class(&mut self, class: &str) {
        let body = self.body;
        self.add_class(body, class);
    }

    fn remove_body_class(&mut self, class: &str) {
        let body = self.body;
        self.remove_class(body, class);
    }
}
