use std::collections::BTreeSet;
use std::fmt;

use crate::layout::Rect;

/// Opaque handle to an element in a [`Document`](super::Document).
///
/// Handles are never reused within a document, so a stale handle simply
/// stops resolving once its element is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Body,
    Div,
    /// Native selection control
    Select,
    Label,
    Text,
}

impl ElementKind {
    /// Whether the element takes part in tab order without an explicit index.
    pub fn natively_focusable(&self) -> bool {
        matches!(self, ElementKind::Select)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: ElementKind,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,

    // Geometry (page space)
    pub rect: Rect,
    pub clips_children: bool,
    pub scroll_top: i32,
    /// Height of the content inside a clipping element
    pub scroll_height: i32,

    // Interaction
    pub tab_index: Option<i32>,
    pub disabled: bool,

    // Content
    pub classes: BTreeSet<String>,
    pub text: String,
    pub value: String,
    pub attributes: Vec<(String, String)>,
}

impl Node {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            rect: Rect::default(),
            clips_children: false,
            scroll_top: 0,
            scroll_height: 0,
            tab_index: None,
            disabled: false,
            classes: BTreeSet::new(),
            text: String::new(),
            value: String::new(),
            attributes: Vec::new(),
        }
    }

    /// Effective tab index: the explicit one, else 0 for natively focusable
    /// kinds.
    pub fn effective_tab_index(&self) -> Option<i32> {
        self.tab_index
            .or_else(|| self.kind.natively_focusable().then_some(0))
    }

    /// Whether `focus()` may land on this element.
    pub fn is_focusable(&self) -> bool {
        !self.disabled && self.effective_tab_index().is_some()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }
}
