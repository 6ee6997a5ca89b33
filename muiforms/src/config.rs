//! Widget configuration.

use crate::layers::overlay::MenuGeometry;

/// How configuration errors are surfaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Return the error to the caller.
    #[default]
    Strict,

    /// Log the error and carry on as if the operation had been refused.
    Permissive,
}

/// Settings shared by the form widgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormsConfig {
    /// Behavior when a widget is misconfigured.
    pub error_policy: ErrorPolicy,

    /// Metrics used to position option menus.
    pub geometry: MenuGeometry,
}

impl FormsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log configuration errors instead of returning them.
    pub fn permissive(mut self) -> Self {
        self.error_policy = ErrorPolicy::Permissive;
        self
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn geometry(mut self, geometry: MenuGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}
