//! Typed views over untyped JSON values.
//!
//! A decoded JSON document is a tree of [`Value`]s. [`ObjectView`] and
//! [`ArrayView`] wrap one container of that tree and read or write its
//! members through typed accessors, so callers never match on `Value`
//! themselves:
//!
//! - `get(key, default)` returns `default` when the key is absent,
//! - `require(key)` treats absence as a failure,
//! - `get_or_create_obj`/`get_or_create_arr` store an empty container on
//!   absence,
//! - `obj`/`arr` return an absent view on absence.
//!
//! Failures (missing keys, kind mismatches, out-of-range numbers, malformed
//! timestamps) never come back as `Result`s. They are routed once through the
//! [`Context`] every view of a traversal borrows, and the accessor returns a
//! fallback. A context without a handler treats every failure as fatal.
//!
//! ```rust
//! use jsonview::{Context, Value};
//!
//! let ctx = Context::new();
//! let mut doc = Value::Object([("foo".to_string(), Value::from(4711))].into());
//! let mut root = ctx.object(&mut doc);
//! root.get_or_create_obj("baz").put("quux", true);
//! assert_eq!(root.require::<i32>("foo"), 4711);
//! assert_eq!(doc.to_string(), r#"{"baz":{"quux":true},"foo":4711}"#);
//! ```

mod array;
mod context;
mod error;
mod location;
mod object;
mod options;
mod scalar;
#[cfg(feature = "serde")]
mod serde_impls;
mod slot;
mod value;

#[cfg(test)]
mod tests;

pub use array::ArrayView;
pub use context::Context;
pub use error::{ErrorKind, ViewError};
pub use location::Location;
pub use object::ObjectView;
pub use options::{ContextOptions, F32Range};
pub use scalar::{Narrow, Scalar, f32_range, int64_range, int_range, uint32_range};
pub use value::{Array, Map, Value};
