pub mod element;
pub mod error;
pub mod event;
pub mod focus;
pub mod hit;
pub mod host;
pub mod layout;
pub mod registry;
pub mod scroll;

pub use element::{Document, ElementId, ElementKind, Node};
pub use error::HostError;
pub use event::{DomEvent, Event, EventType, Key, Modifiers, MouseButton, Target};
pub use focus::FocusState;
pub use hit::{hit_test, hit_test_focusable};
pub use host::{Host, HostConfig};
pub use layout::Rect;
pub use registry::{EventRegistry, Listener};
pub use scroll::{ScrollHost, ScrollLock, ScrollPosition, SCROLL_LOCK_CLASS};
