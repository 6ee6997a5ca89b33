use crate::element::ElementId;

/// Events delivered through the host's dispatch path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press, targeted at the focused element (or the body)
    Key { key: Key, modifiers: Modifiers },
    /// Pointer button pressed
    MouseDown { button: MouseButton, x: i32, y: i32 },
    /// Pointer button clicked (pressed and released over the same element)
    Click { button: MouseButton, x: i32, y: i32 },
    /// Element gained focus
    Focus,
    /// Element lost focus
    Blur,
    /// Value of a native select changed through the host's own UI
    Change { value: String },
    /// Viewport resized
    Resize { width: i32, height: i32 },
    /// Wheel scroll
    Scroll { delta_x: i32, delta_y: i32 },
}

impl Event {
    pub fn event_type(&self) -> EventType {
        match self {
            Event::Key { .. } => EventType::KeyDown,
            Event::MouseDown { .. } => EventType::MouseDown,
            Event::Click { .. } => EventType::Click,
            Event::Focus => EventType::Focus,
            Event::Blur => EventType::Blur,
            Event::Change { .. } => EventType::Change,
            Event::Resize { .. } => EventType::Resize,
            Event::Scroll { .. } => EventType::Scroll,
        }
    }

    /// Whether the event continues up the ancestor chain after the target.
    pub fn bubbles(&self) -> bool {
        !matches!(self, Event::Resize { .. })
    }
}

/// Payload-free event discriminant, used as the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    KeyDown,
    MouseDown,
    Click,
    Focus,
    Blur,
    Change,
    Resize,
    Scroll,
}

/// Something a listener can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Window,
    Document,
    Element(ElementId),
}

impl From<ElementId> for Target {
    fn from(id: ElementId) -> Self {
        Target::Element(id)
    }
}

/// An event in flight, as seen by a listener.
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event: Event,
    target: Target,
    current_target: Target,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    pub fn new(event: Event, target: Target) -> Self {
        Self {
            event,
            target,
            current_target: target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn event_type(&self) -> EventType {
        self.event.event_type()
    }

    /// The node the event was dispatched at.
    pub fn target(&self) -> Target {
        self.target
    }

    /// The node whose listeners are currently running.
    pub fn current_target(&self) -> Target {
        self.current_target
    }

    pub(crate) fn set_current_target(&mut self, target: Target) {
        self.current_target = target;
    }

    /// The target element, if the event was dispatched at one.
    pub fn target_element(&self) -> Option<ElementId> {
        match self.target {
            Target::Element(id) => Some(id),
            _ => None,
        }
    }

    /// Suppress the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop the event from reaching further nodes in the dispatch path.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn key(&self) -> Option<Key> {
        match self.event {
            Event::Key { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn button(&self) -> Option<MouseButton> {
        match self.event {
            Event::MouseDown { button, .. } | Event::Click { button, .. } => Some(button),
            _ => None,
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

impl Key {
    pub const SPACE: Key = Key::Char(' ');
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// The button that activates controls.
    pub fn is_primary(&self) -> bool {
        *self == MouseButton::Left
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'), // Placeholder for unsupported keys
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
