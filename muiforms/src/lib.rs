//! Form controls for a [`muidom`] host.
//!
//! The centrepiece is [`Select`]: a select field that replaces the host's
//! native option list with an overlay menu positioned so the selected
//! option sits over the field, with keyboard navigation, scroll locking
//! and outside-click dismissal.

pub mod config;
pub mod error;
pub mod layers;
pub mod widgets;

pub use config::{ErrorPolicy, FormsConfig};
pub use error::{report, FormsError, Severity};
pub use layers::overlay::{compute_layout, MenuGeometry, MenuLayout};
pub use widgets::{
    resolve_selection, selected_index, FocusOwner, MenuAction, MenuSignals, MenuState, OverlayMenu,
    Select, SelectElements, SelectOption, SelectProps, SELECT_CLASS,
};
