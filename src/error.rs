use thiserror::Error;

/// Top-level error for every operation the engine exposes.
///
/// All variants are terminal for the triggering operation: nothing retries,
/// nothing partially commits, and the active definition is never left in a
/// half-applied state.
#[derive(Error, Debug)]
pub enum FormEngineError {
    /// Raw text is not well-formed JSON at all.
    #[error("invalid format: {0}")]
    Parse(#[from] serde_json::Error),

    /// Structurally well-formed input that violates a definition invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The generative service failed at the transport level, or returned
    /// content that could not be parsed as JSON.
    #[error("generation service error: {message}")]
    Service { message: String },

    /// A generation request is already in flight; the trigger is rejected
    /// synchronously and nothing is queued.
    #[error("a generation request is already in flight")]
    Busy,
}

impl FormEngineError {
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }
}

/// A single invariant violation found while validating a candidate tree.
///
/// Carries a stable machine code (see [`crate::validation::codes`]), a human
/// message naming the offending node where known, and the node's path in the
/// candidate (`items[0].items[2]` style).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ValidationError {
    pub code: String,
    pub message: String,
    pub path: Option<String>,
}

impl ValidationError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Whether this violation is the depth bound tripping, as opposed to a
    /// shape or uniqueness violation.
    pub fn is_depth_exceeded(&self) -> bool {
        self.code == crate::validation::codes::DEPTH_EXCEEDED
    }
}

pub type Result<T> = std::result::Result<T, FormEngineError>;
