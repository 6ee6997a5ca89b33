//! Element tree for a select control.

use muidom::{ElementId, ElementKind, Host, HostError, Rect};

use super::props::SelectProps;
use crate::layers::overlay::MenuGeometry;
use crate::widgets::option::{selected_index, SelectOption};

pub const SELECT_CLASS: &str = "mui-select";

/// Elements owned by a select control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectElements {
    /// Focusable outer surface; also the menu's anchor and parent.
    pub wrapper: ElementId,
    /// Native selection element.
    pub inner: ElementId,
    pub label: Option<ElementId>,
}

/// Create the wrapper, native element and label under `parent`.
///
/// The native element sits `wrapper_padding` below the wrapper's top edge,
/// with the label in that gap.
pub fn build(
    host: &Host,
    parent: ElementId,
    rect: Rect,
    props: &SelectProps,
    geometry: &MenuGeometry,
) -> Result<SelectElements, HostError> {
    let wrapper = host.create_element(ElementKind::Div, parent)?;
    let inner = host.create_element(ElementKind::Select, wrapper)?;
    let label = match &props.label {
        Some(_) => Some(host.create_element(ElementKind::Label, wrapper)?),
        None => None,
    };

    let mut document = host.document_mut();

    let node = document.node_mut(wrapper)?;
    node.classes.insert(SELECT_CLASS.to_string());
    if let Some(class_name) = &props.class_name {
        node.classes.insert(class_name.clone());
    }
    node.rect = rect;
    node.tab_index = Some(-1);

    let node = document.node_mut(inner)?;
    node.rect = Rect::new(
        rect.x,
        rect.y + geometry.wrapper_padding,
        rect.width,
        geometry.input_height,
    );
    node.disabled = props.disabled;
    if let Some(name) = &props.name {
        node.set_attribute("name", name.clone());
    }
    for (flag, set) in [
        ("multiple", props.multiple),
        ("readonly", props.read_only),
        ("required", props.required),
    ] {
        if set {
            node.set_attribute(flag, "");
        }
    }

    if let (Some(label), Some(text)) = (label, &props.label) {
        let node = document.node_mut(label)?;
        node.text = text.clone();
        node.rect = Rect::new(rect.x, rect.y, rect.width, geometry.wrapper_padding);
    }

    Ok(SelectElements {
        wrapper,
        inner,
        label,
    })
}

/// Reflect the current value on the native element.
pub fn show_value(host: &Host, inner: ElementId, options: &[SelectOption], value: Option<&str>) {
    let mut document = host.document_mut();
    let Some(node) = document.get_mut(inner) else {
        return;
    };
    match options.get(selected_index(options, value)) {
        Some(option) => {
            node.value = option.value.clone();
            node.text = option.label.clone();
        }
        None => {
            node.value.clear();
            node.text.clear();
        }
    }
}
