//! Element tree for an open menu.

use muidom::{ElementId, ElementKind, Host, HostError, Rect};

use crate::layers::overlay::{MenuGeometry, MenuLayout};
use crate::widgets::option::SelectOption;

pub const MENU_CLASS: &str = "mui-select__menu";
pub const SELECTED_CLASS: &str = "mui--is-selected";

/// Elements owned by a mounted menu.
#[derive(Debug, Clone)]
pub struct MenuElements {
    pub root: ElementId,
    pub rows: Vec<ElementId>,
}

/// Create the menu container under `parent`, positioned relative to
/// `anchor` (page space), with one row per option.
pub fn build(
    host: &Host,
    parent: ElementId,
    anchor: Rect,
    options: &[SelectOption],
    layout: &MenuLayout,
    geometry: &MenuGeometry,
    current: usize,
) -> Result<MenuElements, HostError> {
    let root = host.create_element(ElementKind::Div, parent)?;
    let menu_rect = Rect::new(anchor.x, anchor.y + layout.top, anchor.width, layout.height);

    {
        let mut document = host.document_mut();
        let node = document.node_mut(root)?;
        node.classes.insert(MENU_CLASS.to_string());
        node.rect = menu_rect;
        node.clips_children = true;
        node.scroll_height = geometry.natural_height(options.len());
        node.scroll_top = layout.scroll_offset;
    }

    let mut rows = Vec::with_capacity(options.len());
    for (i, option) in options.iter().enumerate() {
        let row = host.create_element(ElementKind::Div, root)?;
        let mut document = host.document_mut();
        let node = document.node_mut(row)?;
        node.text = option.label.clone();
        node.rect = Rect::new(
            menu_rect.x,
            menu_rect.y + geometry.row_top(i),
            menu_rect.width,
            geometry.option_height,
        );
        if i == current {
            node.classes.insert(SELECTED_CLASS.to_string());
        }
        rows.push(row);
    }

    Ok(MenuElements { root, rows })
}

/// Move the highlight class from `previous` to `current`.
pub fn highlight(host: &Host, elements: &MenuElements, previous: usize, current: usize) {
    let mut document = host.document_mut();
    if let Some(row) = elements.rows.get(previous) {
        document.remove_class(*row, SELECTED_CLASS);
    }
    if let Some(row) = elements.rows.get(current) {
        document.add_class(*row, SELECTED_CLASS);
    }
}

/// Adjust the menu's scroll so row `index` is fully visible.
pub fn scroll_into_view(host: &Host, elements: &MenuElements, geometry: &MenuGeometry, index: usize) {
    let mut document = host.document_mut();
    let Some(node) = document.get_mut(elements.root) else {
        return;
    };

    let row_top = geometry.row_top(index);
    let row_bottom = row_top + geometry.option_height;
    let max_scroll = (node.scroll_height - node.rect.height).max(0);

    let mut scroll = node.scroll_top;
    if row_top < scroll {
        scroll = row_top;
    } else if row_bottom > scroll + node.rect.height {
        scroll = row_bottom - node.rect.height;
    }
    node.scroll_top = scroll.clamp(0, max_scroll);
}
