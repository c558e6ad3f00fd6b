use std::fmt;

use tracing::{debug, error};

use crate::{
    Array, ArrayView, ContextOptions, Map, ObjectView, Value, ViewError,
    location::Location,
    slot::{Container, Slot},
};

type Handler = Box<dyn Fn(ViewError)>;

/// The failure policy of one document traversal.
///
/// Every view borrows the context it was created from, and every child view
/// borrows the same one, so a single handler sees all failures of a
/// traversal.
///
/// With a handler, each detected failure is passed to it once and the
/// accessor returns its fallback. Without one, the failure aborts the current
/// operation by panicking with the error message.
///
/// # Examples
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use jsonview::{Context, ErrorKind, Value};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let ctx = Context::with_handler(move |err| sink.borrow_mut().push(err.kind()));
///
/// let mut doc = Value::Object([("foo".to_string(), Value::from(4711))].into());
/// let root = ctx.object(&mut doc);
/// assert_eq!(root.require::<i32>("foo"), 4711);
/// assert!(!root.require::<bool>("bar"));
/// assert_eq!(*seen.borrow(), [ErrorKind::MissingKey]);
/// ```
#[derive(Default)]
pub struct Context {
    handler: Option<Handler>,
    options: ContextOptions,
}

impl Context {
    /// A context without a handler: every failure is fatal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_handler(handler: impl Fn(ViewError) + 'static) -> Self {
        Self {
            handler: Some(Box::new(handler)),
            options: ContextOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(options: ContextOptions) -> Self {
        Self {
            handler: None,
            options,
        }
    }

    /// Replaces the handler, keeping the options.
    #[must_use]
    pub fn on_error(mut self, handler: impl Fn(ViewError) + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// Returns `true` if failures abort instead of reaching a handler.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.handler.is_none()
    }

    /// Routes one failure through the policy.
    ///
    /// # Panics
    ///
    /// Panics with the error message when no handler is configured.
    pub fn report(&self, err: ViewError) {
        match &self.handler {
            Some(handler) => {
                debug!(kind = ?err.kind(), "{err}");
                handler(err);
            }
            None => {
                error!(kind = ?err.kind(), "{err}");
                panic!("{err}");
            }
        }
    }

    /// Attaches an object view to a decoded document root.
    ///
    /// A root that is not an object reports a type mismatch and yields an
    /// absent view.
    pub fn object<'a>(&'a self, root: &'a mut Value) -> ObjectView<'a> {
        self.attach::<Map>(root)
    }

    /// Attaches an array view to a decoded document root.
    pub fn array<'a>(&'a self, root: &'a mut Value) -> ArrayView<'a> {
        self.attach::<Array>(root)
    }

    /// An absent object view that owns the mapping its first `put` creates.
    #[must_use]
    pub fn new_object(&self) -> ObjectView<'_> {
        ObjectView::new(self, Slot::Absent)
    }

    #[must_use]
    pub fn new_array(&self) -> ArrayView<'_> {
        ArrayView::new(self, Slot::Absent)
    }

    fn attach<'a, C: Container>(&'a self, root: &'a mut Value) -> C::View<'a> {
        match C::narrow_mut(root) {
            Ok(container) => C::view(self, Slot::Borrowed(container)),
            Err(other) => {
                self.report(ViewError::TypeMismatch {
                    at: Location::Root,
                    expected: C::NAME,
                    found: other.to_string(),
                });
                C::view(self, Slot::Absent)
            }
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("fatal", &self.is_fatal())
            .field("options", &self.options)
            .finish()
    }
}
