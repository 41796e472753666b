//! Error types for inline tokenizing and tree rendering.
//!
//! Every failure is local and synchronous: nothing here is retried, and a
//! single error aborts compilation of the document that raised it.

use std::fmt;

/// Error kinds for categorizing failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An inline delimiter was opened but never closed.
    UnterminatedDelimiter,
    /// A node violated its rendering invariant.
    Structural,
    /// A fragment kind label outside the closed set.
    UnknownFragmentKind,
}

/// The rendering invariant a node failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// Leaf node without a value.
    MissingValue,
    /// Parent node without a tag.
    MissingTag,
    /// Parent node with an empty child list.
    NoChildren {
        /// Tag of the offending node.
        tag: String,
    },
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralError::MissingValue => write!(f, "leaf node has no value"),
            StructuralError::MissingTag => write!(f, "parent node has no tag"),
            StructuralError::NoChildren { tag } => {
                write!(f, "parent node <{}> has no children", tag)
            }
        }
    }
}

/// A failure raised while tokenizing, compiling or rendering a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The span contains an odd number of delimiter runs.
    #[error("invalid markdown: unterminated delimiter `{delimiter}`")]
    UnterminatedDelimiter {
        /// The delimiter that has no closing partner.
        delimiter: &'static str,
    },

    /// A node cannot be rendered.
    #[error("structural error: {0}")]
    Structural(StructuralError),

    /// A fragment kind label that is not one of the six known kinds.
    #[error("unknown fragment kind: {0}")]
    UnknownFragmentKind(String),
}

impl Error {
    /// Create an error for an unterminated delimiter.
    pub fn unterminated(delimiter: &'static str) -> Self {
        Error::UnterminatedDelimiter { delimiter }
    }

    /// Get the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnterminatedDelimiter { .. } => ErrorKind::UnterminatedDelimiter,
            Error::Structural(_) => ErrorKind::Structural,
            Error::UnknownFragmentKind(_) => ErrorKind::UnknownFragmentKind,
        }
    }
}

impl From<StructuralError> for Error {
    fn from(err: StructuralError) -> Self {
        Error::Structural(err)
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
