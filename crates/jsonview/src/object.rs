use std::collections::btree_map::Entry;

use time::OffsetDateTime;

use crate::{
    Array, ArrayView, Context, Map, Value, ViewError,
    location::Location,
    scalar::{self, Scalar},
    slot::{Access, Container, Slot},
};

/// Typed access to the members of a JSON object.
///
/// Keys are anything that is `AsRef<str>`, so enums with a stable string form
/// (for example via `strum::AsRefStr`) serve as keys directly.
///
/// An absent view (no backing mapping) answers every read as "key absent";
/// its first [`put`](Self::put) creates a mapping the view then owns.
///
/// # Examples
///
/// ```rust
/// use jsonview::Context;
///
/// let ctx = Context::new();
/// let mut bar = ctx.new_object();
/// bar.put("foo", 4711);
/// bar.get_or_create_obj("baz").put("quux", true);
/// assert_eq!(bar.into_value().to_string(), r#"{"baz":{"quux":true},"foo":4711}"#);
/// ```
#[derive(Debug)]
pub struct ObjectView<'a> {
    map: Slot<'a, Map>,
    ctx: &'a Context,
}

impl<'a> ObjectView<'a> {
    pub(crate) fn new(ctx: &'a Context, map: Slot<'a, Map>) -> Self {
        Self { map, ctx }
    }

    /// Returns `true` if the view has no backing mapping.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.map.is_absent()
    }

    #[must_use]
    pub fn context(&self) -> &'a Context {
        self.ctx
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        self.map.get()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.get().map_or(0, Map::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.member(key.as_ref()).is_some()
    }

    /// Consumes the view, returning its mapping as a [`Value`].
    ///
    /// Owned mappings move out; a mapping borrowed from a parent document is
    /// cloned. An absent view yields [`Value::Null`].
    #[must_use]
    pub fn into_value(self) -> Value {
        match self.map {
            Slot::Absent => Value::Null,
            Slot::Borrowed(map) => Value::Object(map.clone()),
            Slot::Owned(map) => Value::Object(map),
        }
    }

    fn member(&self, key: &str) -> Option<&Value> {
        self.map.get()?.get(key)
    }

    // --------------------------------------------------------------------------------------------
    // Scalars
    // --------------------------------------------------------------------------------------------

    /// Reads `key` as `T`, or returns `default` if the key is absent.
    ///
    /// A value of the wrong kind is reported and yields `default`; a number
    /// outside `T`'s range is reported and yields `T`'s zero value.
    pub fn get<T: Scalar>(&self, key: impl AsRef<str>, default: T) -> T {
        let key = key.as_ref();
        scalar::optional(self.ctx, || key.into(), self.member(key), default)
    }

    /// Reads `key` as `T`, reporting absence as a missing key.
    ///
    /// Every failure yields `T`'s zero value.
    pub fn require<T: Scalar>(&self, key: impl AsRef<str>) -> T {
        let key = key.as_ref();
        scalar::required(self.ctx, || key.into(), self.member(key))
    }

    /// Reads an RFC 3339 timestamp. An absent key or an empty string yields
    /// `default`.
    pub fn time(&self, key: impl AsRef<str>, default: OffsetDateTime) -> OffsetDateTime {
        self.get(key, default)
    }

    pub fn require_time(&self, key: impl AsRef<str>) -> OffsetDateTime {
        self.require(key)
    }

    // --------------------------------------------------------------------------------------------
    // Containers
    // --------------------------------------------------------------------------------------------

    /// The object stored at `key`; absent if there is none.
    pub fn obj(&mut self, key: impl AsRef<str>) -> ObjectView<'_> {
        self.child::<Map>(key.as_ref(), Access::Get)
    }

    pub fn require_obj(&mut self, key: impl AsRef<str>) -> ObjectView<'_> {
        self.child::<Map>(key.as_ref(), Access::Require)
    }

    /// The object stored at `key`, storing a new empty one if the key is
    /// absent. A value of another kind is reported and left in place.
    pub fn get_or_create_obj(&mut self, key: impl AsRef<str>) -> ObjectView<'_> {
        self.child::<Map>(key.as_ref(), Access::GetOrCreate)
    }

    pub fn arr(&mut self, key: impl AsRef<str>) -> ArrayView<'_> {
        self.child::<Array>(key.as_ref(), Access::Get)
    }

    pub fn require_arr(&mut self, key: impl AsRef<str>) -> ArrayView<'_> {
        self.child::<Array>(key.as_ref(), Access::Require)
    }

    pub fn get_or_create_arr(&mut self, key: impl AsRef<str>) -> ArrayView<'_> {
        self.child::<Array>(key.as_ref(), Access::GetOrCreate)
    }

    fn child<C: Container>(&mut self, key: &str, access: Access) -> C::View<'_> {
        let ctx = self.ctx;
        let value = if access == Access::GetOrCreate {
            match self.map.materialize().entry(key.to_owned()) {
                Entry::Occupied(occupied) => occupied.into_mut(),
                Entry::Vacant(vacant) => vacant.insert(C::default().into_value()),
            }
        } else {
            match self.map.get_mut().and_then(|map| map.get_mut(key)) {
                Some(value) => value,
                None => {
                    if access == Access::Require {
                        ctx.report(ViewError::MissingKey {
                            at: key.into(),
                            expected: C::NAME,
                        });
                    }
                    return C::view(ctx, Slot::Absent);
                }
            }
        };
        match C::narrow_mut(value) {
            Ok(container) => C::view(ctx, Slot::Borrowed(container)),
            Err(other) => {
                ctx.report(ViewError::TypeMismatch {
                    at: Location::from(key),
                    expected: C::NAME,
                    found: other.to_string(),
                });
                C::view(ctx, Slot::Absent)
            }
        }
    }

    // --------------------------------------------------------------------------------------------
    // Mutation
    // --------------------------------------------------------------------------------------------

    /// Overwrites the existing member `key`.
    ///
    /// Writing a key that does not exist is reported as a missing key and
    /// leaves the object unchanged; use [`put`](Self::put) to insert.
    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<Value>) -> &mut Self {
        let key = key.as_ref();
        match self.map.get_mut().and_then(|map| map.get_mut(key)) {
            Some(slot) => *slot = value.into(),
            None => self.ctx.report(ViewError::MissingKey {
                at: key.into(),
                expected: "existing",
            }),
        }
        self
    }

    /// Inserts or overwrites `key`, creating the backing mapping if the view
    /// is absent.
    pub fn put(&mut self, key: impl AsRef<str>, value: impl Into<Value>) -> &mut Self {
        self.map
            .materialize()
            .insert(key.as_ref().to_owned(), value.into());
        self
    }
}
