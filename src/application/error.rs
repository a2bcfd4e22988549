// Error kinds for loading and rendering
use thiserror::Error;

/// Failure of a resource fetch. Propagated to the controller, reported once.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request for {path} failed with status {status}")]
    Fetch { path: String, status: u16 },

    #[error("could not parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("transport error for {path}: {message}")]
    Transport { path: String, message: String },

    #[error("load cancelled")]
    Cancelled,
}

impl LoadError {
    pub fn status(&self) -> Option<u16> {
        match self {
            LoadError::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A UI element the dashboard expected is not present. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("element `{0}` not found")]
pub struct MissingElement(pub String);

impl MissingElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Swallow a missing element at the point of use, leaving a trace behind.
pub fn skip_missing<T>(result: Result<T, MissingElement>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(missing) => {
            tracing::debug!(element = %missing.0, "skipping update of missing element");
            None
        }
    }
}
