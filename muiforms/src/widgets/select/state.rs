//! Mutable state of a select control.

use std::rc::Rc;

use crate::error::FormsError;
use crate::widgets::menu::OverlayMenu;

/// Which of the control's two surfaces holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOwner {
    /// The wrapper, which takes focus while the control is "active".
    Outer,
    /// The native element inside it.
    Inner,
}

/// State owned by one select control.
///
/// `menu` is the single source of truth for open/closed: the control is
/// open exactly when a menu is mounted.
#[derive(Debug, Default)]
pub struct SelectState {
    /// Committed value; `None` means "whatever the options default to".
    pub value: Option<String>,
    pub menu: Option<Rc<OverlayMenu>>,
    pub focus_owner: Option<FocusOwner>,
    /// Tab index of the inner element saved while the wrapper has focus.
    pub saved_tab_index: Option<Option<i32>>,
    /// Configuration error raised from inside an event handler.
    pub last_error: Option<FormsError>,
    pub mounted: bool,
}

impl SelectState {
    pub fn new(value: Option<String>) -> Self {
        Self {
            value,
            mounted: true,
            ..Default::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.menu.is_some()
    }
}
