//! # Term Parser Error Type
//!
//! This module defines [`TermParserError`], the error surface shared by the
//! term compiler ([`parse`](crate::parse), [`parse_mfa`](crate::parse_mfa))
//! and the formatter ([`format`](crate::format())).
//!
//! Every syntax variant carries the byte offset into the input at which the
//! problem was found.  Coercion failures raised while substituting directive
//! arguments convert from [`erl_terms::TermError`] via `#[from]`, so `?`
//! propagates them without explicit mapping.

use erl_terms::TermError;
use thiserror::Error;

/// Represents all possible errors that can occur while compiling or
/// formatting term text.
///
/// # Examples
/// ```rust
/// # use erl_terms_parser::{parse, TermParserError};
/// let err = parse("{1, 2").unwrap_err();
/// assert!(matches!(err, TermParserError::UnexpectedEnd { pos: 5, .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TermParserError {
    /// A character that cannot start or continue the current construct.
    #[error("unexpected {found:?} at {pos}, expected {expected}")]
    Unexpected {
        pos: usize,
        found: char,
        expected: &'static str,
    },

    /// The input ended in the middle of a construct.
    #[error("unexpected end of input at {pos}, expected {expected}")]
    UnexpectedEnd { pos: usize, expected: &'static str },

    /// A string, quoted atom or binary was not closed.
    #[error("unterminated {what} starting at {pos}")]
    Unterminated { pos: usize, what: &'static str },

    /// A variable annotation named an unknown type.
    #[error("unsupported variable type {name:?} at {pos}")]
    UnsupportedVariableType { pos: usize, name: String },

    /// A binary element or character literal outside `0..=255`.
    #[error("byte value {value} out of range at {pos}")]
    ByteOutOfRange { pos: usize, value: i64 },

    /// A numeric literal that does not fit its type.
    #[error("invalid number {text:?} at {pos}")]
    InvalidNumber { pos: usize, text: String },

    /// A directive found no argument left to consume.
    #[error("missing argument for directive ~{directive} at {pos}")]
    MissingArgument { pos: usize, directive: char },

    /// Arguments were left over after the whole input was consumed.
    #[error("{count} unused argument(s) after {pos}")]
    ExtraArguments { pos: usize, count: usize },

    /// A `~` followed by an unsupported directive character.
    #[error("unknown directive ~{directive} at {pos}")]
    UnknownDirective { pos: usize, directive: char },

    /// A directive argument of a kind the directive cannot use.
    #[error("invalid argument {arg} for directive ~{directive} at {pos}")]
    InvalidArgument {
        pos: usize,
        directive: char,
        arg: String,
    },

    /// Tuples, lists and maps nested deeper than the parser allows.
    #[error("nesting deeper than {limit} at {pos}")]
    TooDeep { pos: usize, limit: usize },

    /// A coercion failed while substituting a directive argument.
    #[error(transparent)]
    Term(#[from] TermError),
}

impl TermParserError {
    /// Returns the byte offset the error refers to, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Unexpected { pos, .. }
            | Self::UnexpectedEnd { pos, .. }
            | Self::Unterminated { pos, .. }
            | Self::UnsupportedVariableType { pos, .. }
            | Self::ByteOutOfRange { pos, .. }
            | Self::InvalidNumber { pos, .. }
            | Self::MissingArgument { pos, .. }
            | Self::ExtraArguments { pos, .. }
            | Self::UnknownDirective { pos, .. }
            | Self::InvalidArgument { pos, .. }
            | Self::TooDeep { pos, .. } => Some(*pos),
            Self::Term(_) => None,
        }
    }
}

/// Return early with a [`TermParserError`] variant.
///
/// # Example
/// ```rust, ignore
/// bail!(Unexpected { pos, found, expected: "term" });
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident { $($field:tt)* }) => {
        return Err($crate::TermParserError::$variant { $($field)* })
    };
}
