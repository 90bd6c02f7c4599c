//! Crate-level error type.
//!
//! Every fallible operation returns [`MagiaResult`] rather than panicking on
//! malformed input. Panics are reserved for precondition violations the
//! caller controls (e.g. calling unsigned `sub` with `x < y`).

use std::fmt;

/// The distinct error kinds a [`crate::SignedInt`], [`crate::Accumulator`] or
/// [`crate::Barrett`] operation can signal.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum MagiaError {
    /// A `/` or `mod` was attempted with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// An `*_exact` conversion, `isqrt` of a negative value, `pow` with a
    /// negative exponent, or `factorial` of a negative argument.
    #[error("value out of range for target type")]
    OutOfRange,

    /// `factorial(n)` whose estimated result size exceeds what the
    /// implementation is willing to allocate for.
    #[error("operation would overflow its allocation budget")]
    Overflow,

    /// Text input was empty, malformed, or had a misplaced separator.
    #[error("could not parse {input:?} as an integer: {reason}")]
    ParseError { input: String, reason: String },

    /// A negative bit index/width/shift, an out-of-range byte slice bound,
    /// or `Barrett::new(m)` with `m <= 1`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `Barrett::remainder(x)` called outside `[0, m^2)`.
    #[error("Barrett::remainder precondition violated: {0}")]
    BarrettPreconditionViolated(String),
}

impl MagiaError {
    pub(crate) fn parse(input: impl fmt::Display, reason: impl Into<String>) -> Self {
        MagiaError::ParseError {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        MagiaError::InvalidArgument(reason.into())
    }
}

/// Result alias used throughout the crate's public API.
pub type MagiaResult<T> = Result<T, MagiaError>;
