use thiserror::Error;

use crate::location::Location;

/// The four failure classes a view can detect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required key or index is absent.
    MissingKey,
    /// A value is present but not of the requested JSON kind.
    TypeMismatch,
    /// A number lies outside the target width, or a write position lies
    /// outside the sequence or beyond the length it can grow to.
    Range,
    /// A string failed the strict RFC 3339 parse.
    MalformedTimestamp,
}

/// A failure detected by a view accessor.
///
/// Every `ViewError` is delivered through [`Context::report`] exactly once;
/// accessors never return it.
///
/// [`Context::report`]: crate::Context::report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewError {
    #[error("no {expected} {at:#}")]
    MissingKey { at: Location, expected: &'static str },
    #[error("{at} is not {expected}: '{found}'")]
    TypeMismatch {
        at: Location,
        expected: &'static str,
        found: String,
    },
    #[error("{at} out of {expected} range: {value}")]
    OutOfRange {
        at: Location,
        expected: &'static str,
        value: f64,
    },
    #[error("array index {index} out of range [0; {len})")]
    IndexOutOfBounds { index: isize, len: usize },
    #[error("array cannot grow to index {index}")]
    GrowthOverflow { index: usize },
    #[error("{at} is not an RFC 3339 timestamp: '{text}'")]
    MalformedTimestamp {
        at: Location,
        text: String,
        #[source]
        source: time::error::Parse,
    },
}

impl ViewError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingKey { .. } => ErrorKind::MissingKey,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::OutOfRange { .. }
            | Self::IndexOutOfBounds { .. }
            | Self::GrowthOverflow { .. } => ErrorKind::Range,
            Self::MalformedTimestamp { .. } => ErrorKind::MalformedTimestamp,
        }
    }

    /// Where the failing accessor looked.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::MissingKey { at, .. }
            | Self::TypeMismatch { at, .. }
            | Self::OutOfRange { at, .. }
            | Self::MalformedTimestamp { at, .. } => at.clone(),
            Self::IndexOutOfBounds { index, .. } => Location::Index(*index),
            Self::GrowthOverflow { index } => {
                Location::Index(isize::try_from(*index).unwrap_or(isize::MAX))
            }
        }
    }
}
