//! Defines [`TermError`], the unified error type for term operations.
//!
//! Coercion accessors report an incompatible kind, an out-of-range value or
//! an unparsable payload through this type.

use crate::Kind;
use thiserror::Error;

/// Represents all possible errors that can occur when reading a term's
/// value as a host type.
///
/// These are programmer errors: the caller asked for a conversion that the
/// term's kind or value does not support.  Nothing is truncated or coerced
/// silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    /// The term's kind cannot be read as the requested target type.
    #[error("incompatible type: cannot read {kind} as {target}")]
    IncompatibleType { kind: Kind, target: &'static str },

    /// The value does not fit into the requested target type.
    #[error("value {value} is out of range for {target}")]
    OutOfRange { value: i128, target: &'static str },

    /// The payload has the right kind but cannot be interpreted as the target.
    #[error("invalid {target} value: {reason}")]
    InvalidValue {
        target: &'static str,
        reason: std::string::String,
    },
}

impl TermError {
    #[inline]
    pub(crate) fn incompatible(kind: Kind, target: &'static str) -> Self {
        Self::IncompatibleType { kind, target }
    }
}
