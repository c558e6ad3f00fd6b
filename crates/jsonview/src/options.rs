/// How `f32` accessors treat numbers beyond single-precision range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum F32Range {
    /// Numbers whose magnitude exceeds [`f32::MAX`] report a range error.
    #[default]
    Finite,
    /// Every number narrows; out-of-range magnitudes become infinite.
    Unchecked,
}

/// Configuration for a [`Context`](crate::Context).
///
/// # Examples
///
/// ```rust
/// use jsonview::{Context, ContextOptions, F32Range};
///
/// let ctx = Context::with_options(ContextOptions {
///     f32_range: F32Range::Unchecked,
/// });
/// ```
///
/// # Default
///
/// Every numeric narrowing is range checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextOptions {
    /// Range policy for `f32` accessors.
    ///
    /// Integer accessors always check the closed interval of their width.
    /// Single precision is configurable because a JSON number that overflows
    /// `f32` still has a well-defined (infinite) narrowing.
    ///
    /// # Default
    ///
    /// [`F32Range::Finite`]
    pub f32_range: F32Range,
}
