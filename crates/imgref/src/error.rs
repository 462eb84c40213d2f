//! Error types returned when a reference cannot be parsed or normalized.

use thiserror::Error;

use crate::grammar::SyntaxError;

/// Result alias for reference operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while turning a string into a normalized reference.
///
/// Parsing is deterministic; none of these are transient and retrying
/// with the same input yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input is not grammatically a reference.
    #[error("{input:?} is not a valid repository/tag: {source}")]
    Syntax {
        /// The string handed to the grammar.
        input: String,
        /// What the grammar rejected.
        #[source]
        source: SyntaxError,
    },
    /// The input is well formed but breaks a naming rule, such as an
    /// upper-case repository path or a bare 64 character hex ID.
    #[error("invalid reference format: {0}")]
    InvalidFormat(String),
}

impl Error {
    pub(crate) fn syntax(input: impl Into<String>, source: SyntaxError) -> Self {
        Self::Syntax {
            input: input.into(),
            source,
        }
    }

    /// Returns true if the grammar rejected the input.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }

    /// Returns true if the input parsed but failed a naming rule.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidFormat(_))
    }
}
