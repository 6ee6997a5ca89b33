//! Select control: a native-looking field that opens an overlay menu.
//!
//! The control is two focusable surfaces. The wrapper takes focus when
//! the user tabs or clicks onto the control and turns Space/Up/Down into
//! "open the menu"; the native element inside it receives pointer input
//! and gets focus back when the menu closes.

pub mod events;
pub mod props;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use muidom::{ElementId, EventType, Host, HostError, Listener, Rect, Target};

use crate::config::FormsConfig;
use crate::error::{report, FormsError, Severity};
use crate::widgets::menu::{MenuSignals, OverlayMenu};
use crate::widgets::option::{resolve_selection, selected_index, SelectOption};

pub use props::{ChangeHandler, SelectProps};
pub use render::{SelectElements, SELECT_CLASS};
pub use state::{FocusOwner, SelectState};

/// Listener handles, kept so each can be removed by identity.
struct SelectHandlers {
    /// Bound to window resize and document click while open.
    dismiss: Listener,
    /// Bound to document keydown while the wrapper has focus.
    keydown: Listener,
    outer_focus: Listener,
    outer_blur: Listener,
    inner_focus: Listener,
    inner_mouse_down: Listener,
    inner_click: Listener,
    inner_change: Listener,
}

struct SelectShared {
    options: Vec<SelectOption>,
    read_only: bool,
    use_default: bool,
    config: FormsConfig,
    on_change: Option<ChangeHandler>,
    elements: SelectElements,
    handlers: SelectHandlers,
    state: RefCell<SelectState>,
}

/// Handle to a mounted select control. Clones refer to the same control.
#[derive(Clone)]
pub struct Select {
    shared: Rc<SelectShared>,
}

impl Select {
    /// Mount a select control under `parent`, occupying `rect`.
    ///
    /// A controlled value without `on_change` is reported as a warning.
    pub fn mount(
        host: &Host,
        parent: ElementId,
        rect: Rect,
        props: SelectProps,
    ) -> Result<Select, FormsError> {
        let config = props.config;
        let elements = render::build(host, parent, rect, &props, &config.geometry)?;

        if props.is_frozen() {
            report(
                config.error_policy,
                Severity::Warning,
                FormsError::ControlledWithoutOnChange {
                    control: elements.wrapper,
                },
            )?;
        }

        let initial = props.value.clone().or_else(|| props.default_value.clone());
        render::show_value(host, elements.inner, &props.options, initial.as_deref());

        let shared = Rc::new_cyclic(|weak: &Weak<SelectShared>| SelectShared {
            options: props.options,
            read_only: props.read_only,
            use_default: props.use_default,
            config,
            on_change: props.on_change,
            elements,
            handlers: SelectHandlers::new(weak),
            state: RefCell::new(SelectState::new(initial)),
        });

        let select = Select { shared };
        select.attach(host);

        log::debug!(
            "[select] mounted {} with {} options",
            elements.wrapper,
            select.shared.options.len()
        );

        if props.auto_focus {
            host.focus(elements.wrapper)?;
        }

        Ok(select)
    }

    fn attach(&self, host: &Host) {
        let SelectElements { wrapper, inner, .. } = self.shared.elements;
        let h = &self.shared.handlers;

        host.subscribe(Target::Element(wrapper), EventType::Focus, h.outer_focus.clone(), false);
        host.subscribe(Target::Element(wrapper), EventType::Blur, h.outer_blur.clone(), false);
        host.subscribe(Target::Element(inner), EventType::Focus, h.inner_focus.clone(), false);
        host.subscribe(Target::Element(inner), EventType::MouseDown, h.inner_mouse_down.clone(), false);
        host.subscribe(Target::Element(inner), EventType::Click, h.inner_click.clone(), false);
        host.subscribe(Target::Element(inner), EventType::Change, h.inner_change.clone(), false);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn elements(&self) -> SelectElements {
        self.shared.elements
    }

    pub fn wrapper(&self) -> ElementId {
        self.shared.elements.wrapper
    }

    pub fn inner(&self) -> ElementId {
        self.shared.elements.inner
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.shared.options
    }

    pub fn is_open(&self) -> bool {
        self.shared.state.borrow().is_open()
    }

    /// The mounted menu, while open.
    pub fn menu(&self) -> Option<Rc<OverlayMenu>> {
        self.shared.state.borrow().menu.clone()
    }

    /// Highlighted option index while open.
    pub fn menu_index(&self) -> Option<usize> {
        self.menu().map(|menu| menu.current_index())
    }

    /// Index of the selected option.
    pub fn selected_index(&self) -> usize {
        let state = self.shared.state.borrow();
        selected_index(&self.shared.options, state.value.as_deref())
    }

    /// Effective value: the committed one, else the default option's.
    pub fn value(&self) -> Option<String> {
        if let Some(value) = self.shared.state.borrow().value.clone() {
            return Some(value);
        }
        self.shared
            .options
            .get(self.selected_index())
            .map(|option| option.value.clone())
    }

    pub fn selected_label(&self) -> Option<String> {
        self.shared
            .options
            .get(self.selected_index())
            .map(|option| option.label.clone())
    }

    /// False once [`Select::unmount`] has run.
    pub fn is_mounted(&self) -> bool {
        self.shared.state.borrow().mounted
    }

    pub fn focus_owner(&self) -> Option<FocusOwner> {
        self.shared.state.borrow().focus_owner
    }

    pub fn is_disabled(&self, host: &Host) -> bool {
        host.document()
            .get(self.shared.elements.inner)
            .is_none_or(|node| node.disabled)
    }

    /// Take the configuration error raised by the last event-driven open.
    pub fn take_error(&self) -> Option<FormsError> {
        self.shared.state.borrow_mut().last_error.take()
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Replace the value from outside (controlled update).
    pub fn set_value(&self, host: &Host, value: Option<String>) {
        render::show_value(host, self.shared.elements.inner, &self.shared.options, value.as_deref());
        self.shared.state.borrow_mut().value = value;
    }

    pub fn set_disabled(&self, host: &Host, disabled: bool) {
        if let Some(node) = host.document_mut().get_mut(self.shared.elements.inner) {
            node.disabled = disabled;
        }
    }

    // =========================================================================
    // Open / close
    // =========================================================================

    /// Show the option menu.
    ///
    /// Does nothing when already open, when the control uses the native
    /// UI, or when it is disabled. Having no options is a configuration
    /// error, surfaced according to the control's error policy.
    pub fn open(&self, host: &Host) -> Result<(), FormsError> {
        let shared = &self.shared;
        let SelectElements { wrapper, .. } = shared.elements;

        if self.is_open() || shared.use_default {
            return Ok(());
        }
        if self.is_disabled(host) {
            log::debug!("[select] {} is disabled, not opening", wrapper);
            return Ok(());
        }
        if shared.options.is_empty() {
            return report(
                shared.config.error_policy,
                Severity::Error,
                FormsError::NoOptions { control: wrapper },
            );
        }
        if !host.document().is_attached(wrapper) {
            return Err(HostError::UnknownElement(wrapper).into());
        }

        host.acquire_scroll_lock();
        host.subscribe(Target::Window, EventType::Resize, shared.handlers.dismiss.clone(), false);
        host.subscribe(Target::Document, EventType::Click, shared.handlers.dismiss.clone(), false);

        let options = {
            let state = shared.state.borrow();
            resolve_selection(&shared.options, state.value.as_deref())
        };
        let mounted = OverlayMenu::mount(
            host,
            wrapper,
            wrapper,
            options,
            shared.config.geometry,
            self.menu_signals(),
        );

        match mounted {
            Ok(menu) => {
                shared.state.borrow_mut().menu = Some(menu);
                log::debug!("[select] {} opened", wrapper);
                Ok(())
            }
            Err(err) => {
                self.detach_dismiss(host);
                host.release_scroll_lock();
                Err(err.into())
            }
        }
    }

    /// Hide the option menu and hand focus back to the native element.
    /// Does nothing when closed.
    pub fn close(&self, host: &Host) {
        let menu = self.shared.state.borrow_mut().menu.take();
        let Some(menu) = menu else {
            return;
        };

        self.detach_dismiss(host);
        host.release_scroll_lock();
        menu.unmount(host);
        log::debug!("[select] {} closed", self.shared.elements.wrapper);

        if let Err(err) = host.focus(self.shared.elements.inner) {
            log::debug!("[select] focus not restored after close: {}", err);
        }
    }

    fn detach_dismiss(&self, host: &Host) {
        let dismiss = &self.shared.handlers.dismiss;
        host.unsubscribe(Target::Window, EventType::Resize, Some(dismiss), false);
        host.unsubscribe(Target::Document, EventType::Click, Some(dismiss), false);
    }

    fn menu_signals(&self) -> MenuSignals {
        let on_change = {
            let weak = Rc::downgrade(&self.shared);
            Rc::new(move |host: &Host, value: &str| {
                if let Some(shared) = weak.upgrade() {
                    Select { shared }.on_menu_change(host, value);
                }
            })
        };
        let on_close = {
            let weak = Rc::downgrade(&self.shared);
            Rc::new(move |host: &Host| {
                if let Some(shared) = weak.upgrade() {
                    Select { shared }.close(host);
                }
            })
        };
        MenuSignals {
            on_change,
            on_close,
        }
    }

    /// A different option was committed from the menu.
    fn on_menu_change(&self, host: &Host, value: &str) {
        self.set_value(host, Some(value.to_string()));

        if self.shared.read_only {
            log::debug!("[select] read-only, not reporting {}", value);
            return;
        }
        self.notify_change(value);
    }

    fn notify_change(&self, value: &str) {
        if let Some(on_change) = self.shared.on_change.clone() {
            on_change(value);
        }
    }

    /// Close if open, then remove the control's elements and listeners.
    pub fn unmount(&self, host: &Host) {
        self.close(host);
        let keydown = &self.shared.handlers.keydown;
        host.unsubscribe(Target::Document, EventType::KeyDown, Some(keydown), false);
        host.remove_element(self.shared.elements.wrapper);
        self.shared.state.borrow_mut().mounted = false;
    }
}

impl std::fmt::Debug for Select {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Select")
            .field("elements", &self.shared.elements)
            .field("state", &self.shared.state)
            .finish()
    }
}
