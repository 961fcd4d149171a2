//! Error types for the Newick parser.
//!
//! This module provides [ParsingError] and [FormatErrorKind] for representing
//! and reporting malformed Newick input as well as I/O failures while reading
//! tree files.

use crate::parser::tokenizer::TokenClass;
use thiserror::Error;

// =#========================================================================#=
// FORMAT ERROR KIND
// =#========================================================================$=
/// Reasons why a Newick string was rejected.
///
/// The first four are raised by the structural pre-check, the others by the
/// transition automaton. A non-finite branch length is always an error;
/// non-numeric text after `:` only where it cannot fall back to a new
/// vertex, i.e. outside of any clade.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum FormatErrorKind {
    #[error("empty input")]
    EmptyInput,
    #[error("tree must start with '(' and contain a single top-level clade")]
    MisplacedOpening,
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("',' outside of any clade")]
    TopLevelComma,
    #[error("{to} may not follow {from}")]
    IllegalTransition { from: TokenClass, to: TokenClass },
    #[error("expected ';' at end of tree")]
    MissingTerminator,
    #[error("branch length {0:?} is not a finite number")]
    InvalidBranchLength(String),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Error raised while parsing Newick strings or reading tree files.
///
/// A [Format](ParsingError::Format) error carries the original,
/// not yet normalized, input line for diagnostics.
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Invalid newick string - {kind} at token {position}\n  Input: {input}")]
    Format {
        kind: FormatErrorKind,
        position: usize,
        input: String,
    },
    #[error("IO error - {0}")]
    Io(#[from] std::io::Error),
}

impl ParsingError {
    /// Creates a format error for the given (original) input.
    pub fn format(kind: FormatErrorKind, position: usize, input: &str) -> Self {
        Self::Format {
            kind,
            position,
            input: input.to_string(),
        }
    }

    /// Returns the kind of format error, or `None` for I/O errors.
    pub fn format_kind(&self) -> Option<&FormatErrorKind> {
        match self {
            Self::Format { kind, .. } => Some(kind),
            Self::Io(_) => None,
        }
    }

    /// Returns the offending input line, or `None` for I/O errors.
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::Format { input, .. } => Some(input),
            Self::Io(_) => None,
        }
    }

    /// Returns whether this is a format error (malformed Newick).
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_contains_input_and_reason() {
        let err = ParsingError::format(
            FormatErrorKind::IllegalTransition {
                from: TokenClass::Open,
                to: TokenClass::Comma,
            },
            1,
            "(,A:1);",
        );
        let msg = err.to_string();
        assert!(msg.contains("',' may not follow '('"));
        assert!(msg.contains("(,A:1);"));
        assert!(msg.contains("token 1"));
    }

    #[test]
    fn test_io_error_has_no_input() {
        let err = ParsingError::from(std::io::Error::other("disk on fire"));
        assert!(!err.is_format_error());
        assert!(err.input().is_none());
        assert!(err.format_kind().is_none());
    }
}
