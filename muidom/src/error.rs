use thiserror::Error;

use crate::element::ElementId;

/// Errors raised by host document operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("element {0} is not attached to the document")]
    UnknownElement(ElementId),

    #[error("element {0} cannot receive focus")]
    NotFocusable(ElementId),
}
