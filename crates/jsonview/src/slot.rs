use tracing::trace;

use crate::{Array, ArrayView, Context, Map, ObjectView, Value};

/// The backing store of a view.
///
/// A view either has no container (`Absent`), shares one that lives inside a
/// parent document (`Borrowed`), or owns the one its first write created
/// (`Owned`).
#[derive(Debug)]
pub(crate) enum Slot<'a, T> {
    Absent,
    Borrowed(&'a mut T),
    Owned(T),
}

impl<T: Default> Slot<'_, T> {
    pub(crate) fn is_absent(&self) -> bool {
        matches!(self, Slot::Absent)
    }

    pub(crate) fn get(&self) -> Option<&T> {
        match self {
            Slot::Absent => None,
            Slot::Borrowed(t) => Some(&**t),
            Slot::Owned(t) => Some(t),
        }
    }

    pub(crate) fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Absent => None,
            Slot::Borrowed(t) => Some(&mut **t),
            Slot::Owned(t) => Some(t),
        }
    }

    /// Returns the container, creating an owned empty one if there is none.
    pub(crate) fn materialize(&mut self) -> &mut T {
        if self.is_absent() {
            trace!("materializing backing container");
            *self = Slot::Owned(T::default());
        }
        match self {
            Slot::Borrowed(t) => &mut **t,
            Slot::Owned(t) => t,
            Slot::Absent => unreachable!("slot was materialized above"),
        }
    }
}

/// The two JSON kinds a view can wrap.
pub(crate) trait Container: Default + Sized + 'static {
    /// Name used in diagnostics.
    const NAME: &'static str;

    type View<'a>
    where
        Self: 'a;

    /// Narrows `value` to this container, handing it back on a kind mismatch.
    fn narrow_mut(value: &mut Value) -> Result<&mut Self, &mut Value>;

    fn into_value(self) -> Value;

    fn view<'a>(ctx: &'a Context, slot: Slot<'a, Self>) -> Self::View<'a>;
}

impl Container for Map {
    const NAME: &'static str = "JSON-object";

    type View<'a> = ObjectView<'a>;

    fn narrow_mut(value: &mut Value) -> Result<&mut Self, &mut Value> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(other),
        }
    }

    fn into_value(self) -> Value {
        Value::Object(self)
    }

    fn view<'a>(ctx: &'a Context, slot: Slot<'a, Self>) -> ObjectView<'a> {
        ObjectView::new(ctx, slot)
    }
}

impl Container for Array {
    const NAME: &'static str = "JSON-array";

    type View<'a> = ArrayView<'a>;

    fn narrow_mut(value: &mut Value) -> Result<&mut Self, &mut Value> {
        match value {
            Value::Array(seq) => Ok(seq),
            other => Err(other),
        }
    }

    fn into_value(self) -> Value {
        Value::Array(self)
    }

    fn view<'a>(ctx: &'a Context, slot: Slot<'a, Self>) -> ArrayView<'a> {
        ArrayView::new(ctx, slot)
    }
}

/// How a view narrows a child container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Access {
    /// Absence yields an absent view silently.
    Get,
    /// Absence reports a missing key.
    Require,
    /// Absence stores a new empty container.
    GetOrCreate,
}
