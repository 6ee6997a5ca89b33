use crate::element::{Document, ElementId};

/// Tracks which element is currently focused.
///
/// This only records the active element; [`Host`](crate::Host) is what
/// dispatches the matching focus and blur events.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<ElementId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    pub fn is_focused(&self, id: ElementId) -> bool {
        self.focused == Some(id)
    }

    /// Set the focused element. Returns the previously focused element if
    /// focus changed.
    pub fn focus(&mut self, id: ElementId) -> Option<Option<ElementId>> {
        if self.focused == Some(id) {
            return None;
        }
        Some(self.focused.replace(id))
    }

    /// Clear focus.
    /// Returns the element that lost focus, if any.
    pub fn blur(&mut self) -> Option<ElementId> {
        self.focused.take()
    }

    /// Drop focus if the focused element is no longer in the document.
    pub fn prune(&mut self, document: &Document) {
        if self.focused.is_some_and(|id| !document.is_attached(id)) {
            self.focused = None;
        }
    }

    /// The element after the focused one in tab order, wrapping around.
    pub fn next_in(&self, document: &Document) -> Option<ElementId> {
        let order = document.tab_order();
        if order.is_empty() {
            return None;
        }

        let next = match self.focused.and_then(|f| order.iter().position(|id| *id == f)) {
            Some(i) => order[(i + 1) % order.len()],
            None => order[0],
        };
        (Some(next) != self.focused).then_some(next)
    }

    /// The element before the focused one in tab order, wrapping around.
    pub fn prev_in(&self, document: &Document) -> Option<ElementId> {
        let order = document.tab_order();
        if order.is_empty() {
            return None;
        }

        let prev = match self.focused.and_then(|f| order.iter().position(|id| *id == f)) {
            Some(0) | None => order[order.len() - 1],
            Some(i) => order[i - 1],
        };
        (Some(prev) != self.focused).then_some(prev)
    }
}
