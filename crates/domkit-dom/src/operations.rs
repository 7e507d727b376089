//! DOM Operation Errors
//!
//! Errors raised by host primitives. The extension layer never invents its
//! own variants for these; it lets them propagate to the caller.

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting ancestor)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Invalid node type
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Name contains characters the host rejects
    #[error("Invalid character in name {0:?}")]
    InvalidCharacter(String),
    /// Malformed selector
    #[error("Syntax error in selector {selector:?}: {message}")]
    Syntax { selector: String, message: String },
    /// API missing on this platform
    #[error("Not supported: {0}")]
    NotSupported(String),
    /// Object used in the wrong state (e.g., dispatching an uninitialized event)
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl DomError {
    pub(crate) fn syntax(selector: &str, message: impl Into<String>) -> Self {
        Self::Syntax {
            selector: selector.to_string(),
            message: message.into(),
        }
    }
}
