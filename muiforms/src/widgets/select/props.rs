//! Construction options for a select control.

use std::fmt;
use std::rc::Rc;

use crate::config::FormsConfig;
use crate::widgets::option::SelectOption;

/// Callback invoked with the newly committed value.
pub type ChangeHandler = Rc<dyn Fn(&str)>;

/// Select configuration.
///
/// # Example
///
/// ```ignore
/// let props = SelectProps::new([("us", "United States"), ("de", "Germany")])
///     .label("Country")
///     .value("us")
///     .on_change(|value| log::info!("picked {value}"));
/// ```
#[derive(Clone)]
pub struct SelectProps {
    pub options: Vec<SelectOption>,
    /// Controlled value. Needs `on_change` unless `read_only`.
    pub value: Option<String>,
    /// Initial value when uncontrolled.
    pub default_value: Option<String>,
    pub disabled: bool,
    /// Passed through to the native element.
    pub multiple: bool,
    /// Commits update the display but never reach `on_change`.
    pub read_only: bool,
    /// Passed through to the native element, not enforced here.
    pub required: bool,
    /// Focus the control as soon as it is mounted.
    pub auto_focus: bool,
    /// Leave selection to the host's native control; no overlay menu.
    pub use_default: bool,
    pub name: Option<String>,
    pub label: Option<String>,
    pub class_name: Option<String>,
    pub on_change: Option<ChangeHandler>,
    pub config: FormsConfig,
}

impl SelectProps {
    pub fn new<I, O>(options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<SelectOption>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            value: None,
            default_value: None,
            disabled: false,
            multiple: false,
            read_only: false,
            required: false,
            auto_focus: false,
            use_default: false,
            name: None,
            label: None,
            class_name: None,
            on_change: None,
            config: FormsConfig::default(),
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn auto_focus(mut self) -> Self {
        self.auto_focus = true;
        self
    }

    pub fn use_default(mut self) -> Self {
        self.use_default = true;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn on_change(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }

    pub fn config(mut self, config: FormsConfig) -> Self {
        self.config = config;
        self
    }

    /// A value was supplied that nothing will ever update.
    pub(crate) fn is_frozen(&self) -> bool {
        !self.read_only && self.value.is_some() && self.on_change.is_none()
    }
}

impl fmt::Debug for SelectProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectProps")
            .field("options", &self.options)
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("disabled", &self.disabled)
            .field("multiple", &self.multiple)
            .field("read_only", &self.read_only)
            .field("required", &self.required)
            .field("auto_focus", &self.auto_focus)
            .field("use_default", &self.use_default)
            .field("name", &self.name)
            .field("label", &self.label)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
