use std::fmt;

/// Where an accessor looked when it detected a failure.
///
/// Object views report the member key and the context's root attach
/// operations report [`Location::Root`]. Array views report the element's
/// position, with a negative index counted from the end; an index outside
/// the sequence is reported as the caller passed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Root,
    Key(String),
    Index(isize),
}

/// Renders the subject of an error message: `object member 'foo'`,
/// `array element 3` or `root value`. The alternate form (`{:#}`) reads
/// `array element at 3`, for messages about absent elements.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root value"),
            Self::Key(k) => write!(f, "object member '{k}'"),
            Self::Index(i) if f.alternate() => write!(f, "array element at {i}"),
            Self::Index(i) => write!(f, "array element {i}"),
        }
    }
}

impl From<&str> for Location {
    fn from(s: &str) -> Self {
        Self::Key(s.to_owned())
    }
}
