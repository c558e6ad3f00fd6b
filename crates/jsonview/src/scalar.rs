//! Scalar narrowing shared by both views.
//!
//! A JSON number is an `f64`; the integer accessors check that it lies in the
//! closed interval of their width before narrowing (fractions truncate toward
//! zero). Magnitudes beyond 2^53 have already lost precision when the document
//! was decoded, so e.g. `9223372036854775807` arrives as 2^63 and passes the
//! `i64` check, saturating on narrowing. That is a property of JSON numbers,
//! not something the predicates try to correct.

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    Context, ContextOptions, F32Range, Value, ViewError,
    location::Location,
};

/// Returns `true` if `x` fits the 32-bit signed range the `int` accessors use.
#[must_use]
pub fn int_range(x: f64) -> bool {
    (-2_147_483_648.0..=2_147_483_647.0).contains(&x)
}

#[must_use]
pub fn uint32_range(x: f64) -> bool {
    (0.0..=4_294_967_295.0).contains(&x)
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn int64_range(x: f64) -> bool {
    (i64::MIN as f64..=i64::MAX as f64).contains(&x)
}

#[must_use]
pub fn f32_range(x: f64) -> bool {
    (-f64::from(f32::MAX)..=f64::from(f32::MAX)).contains(&x)
}

/// Why a present value could not be narrowed.
#[derive(Debug, Clone, PartialEq)]
pub enum Narrow {
    /// The value is not of the JSON kind the target type is read from.
    WrongKind,
    /// The value is a number outside the target width.
    OutOfRange(f64),
    /// The value is a string that is not a valid RFC 3339 date-time.
    Malformed(time::error::Parse),
}

/// A Rust type a JSON scalar can be read as.
///
/// Implemented for `bool`, `f64`, `f32`, `i32`, `u32`, `i64`, `String` and
/// [`OffsetDateTime`].
pub trait Scalar: Sized {
    /// Name used in diagnostics, e.g. `int` in "out of int range".
    const NAME: &'static str;

    /// The fallback of the required forms, and of range or parse failures.
    fn zero() -> Self;

    /// Narrows a present, non-null value.
    ///
    /// # Errors
    ///
    /// Returns why the value does not narrow to `Self`.
    fn narrow(value: &Value, options: &ContextOptions) -> Result<Self, Narrow>;

    /// Whether an optional read treats `value` as absent.
    fn is_blank(_value: &Value) -> bool {
        false
    }
}

impl Scalar for bool {
    const NAME: &'static str = "boolean";

    fn zero() -> Self {
        false
    }

    fn narrow(value: &Value, _: &ContextOptions) -> Result<Self, Narrow> {
        match value {
            Value::Boolean(b) => Ok(*b),
            _ => Err(Narrow::WrongKind),
        }
    }
}

impl Scalar for f64 {
    const NAME: &'static str = "float64";

    fn zero() -> Self {
        0.0
    }

    fn narrow(value: &Value, _: &ContextOptions) -> Result<Self, Narrow> {
        match value {
            Value::Number(n) => Ok(*n),
            _ => Err(Narrow::WrongKind),
        }
    }
}

impl Scalar for f32 {
    const NAME: &'static str = "float32";

    fn zero() -> Self {
        0.0
    }

    #[allow(clippy::cast_possible_truncation)]
    fn narrow(value: &Value, options: &ContextOptions) -> Result<Self, Narrow> {
        let Value::Number(n) = value else {
            return Err(Narrow::WrongKind);
        };
        match options.f32_range {
            F32Range::Finite if !f32_range(*n) => Err(Narrow::OutOfRange(*n)),
            _ => Ok(*n as f32),
        }
    }
}

macro_rules! impl_ranged_scalar {
    ($($t:ty => $name:literal, $range:ident;)*) => {
        $(
            impl Scalar for $t {
                const NAME: &'static str = $name;

                fn zero() -> Self {
                    0
                }

                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                fn narrow(value: &Value, _: &ContextOptions) -> Result<Self, Narrow> {
                    match value {
                        Value::Number(n) if $range(*n) => Ok(*n as $t),
                        Value::Number(n) => Err(Narrow::OutOfRange(*n)),
                        _ => Err(Narrow::WrongKind),
                    }
                }
            }
        )*
    };
}

impl_ranged_scalar! {
    i32 => "int", int_range;
    u32 => "uint32", uint32_range;
    i64 => "int64", int64_range;
}

impl Scalar for String {
    const NAME: &'static str = "string";

    fn zero() -> Self {
        String::new()
    }

    fn narrow(value: &Value, _: &ContextOptions) -> Result<Self, Narrow> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(Narrow::WrongKind),
        }
    }
}

/// Timestamps are strings in the RFC 3339 profile, parsed strictly. An empty
/// string reads as absent in the optional forms.
impl Scalar for OffsetDateTime {
    const NAME: &'static str = "timestamp";

    fn zero() -> Self {
        OffsetDateTime::UNIX_EPOCH
    }

    fn narrow(value: &Value, _: &ContextOptions) -> Result<Self, Narrow> {
        match value {
            Value::String(s) => OffsetDateTime::parse(s, &Rfc3339).map_err(Narrow::Malformed),
            _ => Err(Narrow::WrongKind),
        }
    }

    fn is_blank(value: &Value) -> bool {
        matches!(value, Value::String(s) if s.is_empty())
    }
}

impl Narrow {
    fn into_error(self, at: Location, expected: &'static str, found: &Value) -> ViewError {
        match self {
            Self::WrongKind => ViewError::TypeMismatch {
                at,
                expected,
                found: found.to_string(),
            },
            Self::OutOfRange(value) => ViewError::OutOfRange {
                at,
                expected,
                value,
            },
            Self::Malformed(source) => ViewError::MalformedTimestamp {
                at,
                text: match found {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
                source,
            },
        }
    }
}

/// Optional read: absence yields `default` silently, a wrong kind reports and
/// yields `default`, a range or parse failure reports and yields the zero value.
pub(crate) fn optional<T: Scalar>(
    ctx: &Context,
    at: impl FnOnce() -> Location,
    found: Option<&Value>,
    default: T,
) -> T {
    let Some(value) = found else {
        return default;
    };
    if T::is_blank(value) {
        return default;
    }
    match T::narrow(value, ctx.options()) {
        Ok(v) => v,
        Err(Narrow::WrongKind) => {
            ctx.report(Narrow::WrongKind.into_error(at(), T::NAME, value));
            default
        }
        Err(e) => {
            ctx.report(e.into_error(at(), T::NAME, value));
            T::zero()
        }
    }
}

/// Required read: every failure reports once and yields the zero value.
pub(crate) fn required<T: Scalar>(
    ctx: &Context,
    at: impl FnOnce() -> Location,
    found: Option<&Value>,
) -> T {
    let Some(value) = found else {
        ctx.report(ViewError::MissingKey {
            at: at(),
            expected: T::NAME,
        });
        return T::zero();
    };
    T::narrow(value, ctx.options()).unwrap_or_else(|e| {
        ctx.report(e.into_error(at(), T::NAME, value));
        T::zero()
    })
}
