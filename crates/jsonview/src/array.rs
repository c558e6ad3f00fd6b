use time::OffsetDateTime;
use tracing::trace;

use crate::{
    Array, Context, Map, ObjectView, Value, ViewError,
    location::Location,
    scalar::{self, Scalar},
    slot::{Access, Container, Slot},
};

/// Typed, bounds-checked access to the elements of a JSON array.
///
/// Read and navigation accessors take an `isize` index; a negative index
/// counts from the end, so `-1` is the last element. An index outside the
/// current bounds, or an in-bounds `null`, reads as absent.
///
/// [`put`](Self::put) grows the sequence, filling any gap with `null`.
///
/// # Examples
///
/// ```rust
/// use jsonview::{Context, Value};
///
/// let ctx = Context::new();
/// let mut arr = ctx.new_array();
/// arr.put(3, "x");
/// assert_eq!(arr.len(), 4);
/// assert_eq!(arr.get(-1, String::new()), "x");
/// assert_eq!(arr.as_slice()[0], Value::Null);
/// ```
#[derive(Debug)]
pub struct ArrayView<'a> {
    seq: Slot<'a, Array>,
    ctx: &'a Context,
}

/// Maps a possibly negative index onto `0..len`.
fn normalize(len: usize, idx: isize) -> Option<usize> {
    let pos = if idx < 0 {
        len.checked_sub(idx.unsigned_abs())?
    } else {
        idx.unsigned_abs()
    };
    (pos < len).then_some(pos)
}

impl<'a> ArrayView<'a> {
    pub(crate) fn new(ctx: &'a Context, seq: Slot<'a, Array>) -> Self {
        Self { seq, ctx }
    }

    /// Returns `true` if the view has no backing sequence.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.seq.is_absent()
    }

    #[must_use]
    pub fn context(&self) -> &'a Context {
        self.ctx
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seq.get().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        match self.seq.get() {
            Some(seq) => seq,
            None => &[],
        }
    }

    /// Consumes the view, returning its sequence as a [`Value`].
    ///
    /// Owned sequences move out; a sequence borrowed from a parent document is
    /// cloned. An absent view yields [`Value::Null`].
    #[must_use]
    pub fn into_value(self) -> Value {
        match self.seq {
            Slot::Absent => Value::Null,
            Slot::Borrowed(seq) => Value::Array(seq.clone()),
            Slot::Owned(seq) => Value::Array(seq),
        }
    }

    /// Where `idx` points: the element's position when it is in bounds,
    /// otherwise the index as given.
    fn location(&self, idx: isize) -> Location {
        let pos = normalize(self.len(), idx).and_then(|pos| isize::try_from(pos).ok());
        Location::Index(pos.unwrap_or(idx))
    }

    /// The element at `idx` unless it is out of bounds or `null`.
    fn element(&self, idx: isize) -> Option<&Value> {
        let seq = self.seq.get()?;
        let value = &seq[normalize(seq.len(), idx)?];
        (!value.is_null()).then_some(value)
    }

    // --------------------------------------------------------------------------------------------
    // Scalars
    // --------------------------------------------------------------------------------------------

    /// Reads element `idx` as `T`, or returns `default` if it is absent.
    pub fn get<T: Scalar>(&self, idx: isize, default: T) -> T {
        scalar::optional(self.ctx, || self.location(idx), self.element(idx), default)
    }

    pub fn require<T: Scalar>(&self, idx: isize) -> T {
        scalar::required(self.ctx, || self.location(idx), self.element(idx))
    }

    pub fn time(&self, idx: isize, default: OffsetDateTime) -> OffsetDateTime {
        self.get(idx, default)
    }

    pub fn require_time(&self, idx: isize) -> OffsetDateTime {
        self.require(idx)
    }

    // --------------------------------------------------------------------------------------------
    // Containers
    // --------------------------------------------------------------------------------------------

    pub fn obj(&mut self, idx: isize) -> ObjectView<'_> {
        self.child::<Map>(idx, Access::Get)
    }

    pub fn require_obj(&mut self, idx: isize) -> ObjectView<'_> {
        self.child::<Map>(idx, Access::Require)
    }

    /// The object at `idx`. An out-of-bounds or `null` element is replaced by
    /// a new empty object, growing the sequence as needed.
    pub fn get_or_create_obj(&mut self, idx: isize) -> ObjectView<'_> {
        self.child::<Map>(idx, Access::GetOrCreate)
    }

    pub fn arr(&mut self, idx: isize) -> ArrayView<'_> {
        self.child::<Array>(idx, Access::Get)
    }

    pub fn require_arr(&mut self, idx: isize) -> ArrayView<'_> {
        self.child::<Array>(idx, Access::Require)
    }

    pub fn get_or_create_arr(&mut self, idx: isize) -> ArrayView<'_> {
        self.child::<Array>(idx, Access::GetOrCreate)
    }

    fn child<C: Container>(&mut self, idx: isize, access: Access) -> C::View<'_> {
        let ctx = self.ctx;
        let at = self.location(idx);
        let value = if access == Access::GetOrCreate {
            let seq = self.seq.materialize();
            let len = seq.len();
            // Past the end is a growth position; before the start is not.
            let pos = match normalize(len, idx) {
                Some(pos) => pos,
                None if idx >= 0 => idx.unsigned_abs(),
                None => {
                    ctx.report(ViewError::IndexOutOfBounds { index: idx, len });
                    return C::view(ctx, Slot::Absent);
                }
            };
            if pos >= len || seq[pos].is_null() {
                if let Err(err) = grow(seq, pos) {
                    ctx.report(err);
                    return C::view(ctx, Slot::Absent);
                }
                seq[pos] = C::default().into_value();
            }
            &mut seq[pos]
        } else {
            let found = self.seq.get_mut().and_then(|seq| {
                let pos = normalize(seq.len(), idx)?;
                Some(&mut seq[pos]).filter(|value| !value.is_null())
            });
            match found {
                Some(value) => value,
                None => {
                    if access == Access::Require {
                        ctx.report(ViewError::MissingKey {
                            at,
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
                    at,
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

    /// Overwrites the element at `idx` without growing the sequence.
    ///
    /// An index outside the current bounds (after counting a negative index
    /// from the end) is reported as a range error and leaves the sequence
    /// unchanged.
    pub fn set(&mut self, idx: isize, value: impl Into<Value>) -> &mut Self {
        let len = self.len();
        match self.seq.get_mut().zip(normalize(len, idx)) {
            Some((seq, pos)) => seq[pos] = value.into(),
            None => self
                .ctx
                .report(ViewError::IndexOutOfBounds { index: idx, len }),
        }
        self
    }

    /// Writes the element at `idx`, growing the sequence to `idx + 1`
    /// elements if needed. Elements between the old end and `idx` become
    /// `null`.
    ///
    /// A length the sequence cannot be grown to is reported as a range error.
    pub fn put(&mut self, idx: usize, value: impl Into<Value>) -> &mut Self {
        let seq = self.seq.materialize();
        match grow(seq, idx) {
            Ok(()) => seq[idx] = value.into(),
            Err(err) => self.ctx.report(err),
        }
        self
    }

    /// Appends an element, creating the backing sequence if the view is absent.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        self.seq.materialize().push(value.into());
        self
    }
}

/// Pads `seq` with nulls until `pos` is in bounds.
fn grow(seq: &mut Array, pos: usize) -> Result<(), ViewError> {
    if pos < seq.len() {
        return Ok(());
    }
    let Some(len) = pos.checked_add(1) else {
        return Err(ViewError::GrowthOverflow { index: pos });
    };
    if len > seq.capacity() {
        trace!(from = seq.len(), to = len, "reallocating array");
        seq.try_reserve(len - seq.len())
            .map_err(|_| ViewError::GrowthOverflow { index: pos })?;
    } else {
        trace!(from = seq.len(), to = len, "extending array within capacity");
    }
    seq.resize(len, Value::Null);
    Ok(())
}
