use crate::element::{Document, ElementId};

/// Find the deepest element containing the page point.
///
/// Later children sit on top of earlier ones. Children are searched even
/// when they overflow a non-clipping parent (absolutely positioned
/// overlays), but a clipping parent only passes hits inside its own rect.
pub fn hit_test(document: &Document, x: i32, y: i32) -> Option<ElementId> {
    hit_test_element(document, document.body(), x, y)
}

fn hit_test_element(document: &Document, id: ElementId, x: i32, y: i32) -> Option<ElementId> {
    let node = document.get(id)?;
    let inside = node.rect.contains(x, y);

    if inside || !node.clips_children {
        // Children are laid out unscrolled; shift the point into their space.
        let child_y = y + node.scroll_top;
        // Check children in reverse order (last rendered = on top)
        for child in node.children.iter().rev() {
            if let Some(hit) = hit_test_element(document, *child, x, child_y) {
                return Some(hit);
            }
        }
    }

    inside.then_some(id)
}

/// Find the deepest focusable element containing the page point.
pub fn hit_test_focusable(document: &Document, x: i32, y: i32) -> Option<ElementId> {
    let mut current = hit_test(document, x, y);
    while let Some(id) = current {
        let node = document.get(id)?;
        if node.is_focusable() {
            return Some(id);
        }
        current = node.parent;
    }
    None
}
