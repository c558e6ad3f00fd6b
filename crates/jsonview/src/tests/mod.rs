use std::{cell::RefCell, rc::Rc};

use crate::{Context, ErrorKind, ViewError};

mod arbitrary;

/// Errors a collecting handler has seen, in report order.
#[derive(Clone, Default)]
pub(crate) struct Reports(Rc<RefCell<Vec<ViewError>>>);

impl Reports {
    pub(crate) fn kinds(&self) -> Vec<ErrorKind> {
        self.0.borrow().iter().map(ViewError::kind).collect()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.0.borrow().iter().map(ToString::to_string).collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// A context whose handler records every report instead of aborting.
pub(crate) fn collecting() -> (Context, Reports) {
    let reports = Reports::default();
    let sink = Rc::clone(&reports.0);
    let ctx = Context::with_handler(move |err| sink.borrow_mut().push(err));
    (ctx, reports)
}

pub(crate) fn obj(members: &[(&str, crate::Value)]) -> crate::Value {
    crate::Value::Object(
        members
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect(),
    )
}
