pub mod menu;
pub mod option;
pub mod select;

pub use menu::{MenuAction, MenuSignals, MenuState, OverlayMenu};
pub use option::{resolve_selection, selected_index, SelectOption};
pub use select::{FocusOwner, Select, SelectElements, SelectProps, SELECT_CLASS};
