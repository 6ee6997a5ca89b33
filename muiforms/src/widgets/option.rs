//! Options shown by a select control.

use serde::{Deserialize, Serialize};

/// One entry in a select control.
///
/// Order matters: it is the navigation order, and the first option is
/// the fallback selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value reported through change callbacks.
    pub value: String,
    /// Text displayed for this option.
    pub label: String,
    /// Initial selection flag, used when the control has no value.
    #[serde(default)]
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }

    /// Mark the option as initially selected.
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

// (value, label) tuples
impl<S1, S2> From<(S1, S2)> for SelectOption
where
    S1: Into<String>,
    S2: Into<String>,
{
    fn from((value, label): (S1, S2)) -> Self {
        Self::new(value, label)
    }
}

/// Index of the selected option.
///
/// An option is selected when it equals `value`, or, with no value, when it
/// carries the `selected` flag. Options are scanned from last to first and
/// the last match found wins, so with several matches the earliest one is
/// reported. Falls back to 0.
pub fn selected_index(options: &[SelectOption], value: Option<&str>) -> usize {
    let mut position = 0;
    for (i, option) in options.iter().enumerate().rev() {
        let is_selected = match value {
            Some(v) => option.value == v,
            None => option.selected,
        };
        if is_selected {
            position = i;
        }
    }
    position
}

/// Copy of `options` with `selected` flags reflecting `value`.
pub fn resolve_selection(options: &[SelectOption], value: Option<&str>) -> Vec<SelectOption> {
    options
        .iter()
        .map(|option| SelectOption {
            selected: match value {
                Some(v) => option.value == v,
                None => option.selected,
            },
            ..option.clone()
        })
        .collect()
}
