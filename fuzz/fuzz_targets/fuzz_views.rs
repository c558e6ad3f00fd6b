#![no_main]
use std::{cell::Cell, rc::Rc};

use arbitrary::Arbitrary;
use jsonview::{ArrayView, Context, ObjectView, Value};
use libfuzzer_sys::fuzz_target;
use time::OffsetDateTime;

/// One of four member names, so operations collide often.
#[derive(Arbitrary, Debug, Clone, Copy)]
struct Key(u8);

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        ["a", "b", "c", "d"][usize::from(self.0 % 4)]
    }
}

#[derive(Arbitrary, Debug, Clone)]
enum Lit {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    EmptyObject,
    EmptyArray,
}

impl From<Lit> for Value {
    fn from(lit: Lit) -> Self {
        match lit {
            Lit::Null => Value::Null,
            Lit::Bool(b) => b.into(),
            // Non-finite numbers have no JSON encoding.
            Lit::Num(n) if n.is_finite() => n.into(),
            Lit::Num(_) => Value::Null,
            Lit::Str(s) => s.into(),
            Lit::EmptyObject => jsonview::Map::new().into(),
            Lit::EmptyArray => jsonview::Array::new().into(),
        }
    }
}

#[derive(Arbitrary, Debug, Clone, Copy)]
enum Kind {
    Bool,
    F64,
    F32,
    Int,
    U32,
    I64,
    Str,
    Time,
}

#[derive(Arbitrary, Debug)]
enum Op {
    Get(Key, Kind),
    Require(Key, Kind),
    Set(Key, Lit),
    Put(Key, Lit),
    InObject(Key, bool, Box<Op>),
    InArray(Key, ArrOp),
}

#[derive(Arbitrary, Debug)]
enum ArrOp {
    Get(i8, Kind),
    Require(i8, Kind),
    Set(i8, Lit),
    Put(u8, Lit),
    CreateObject(i8, Key, Lit),
}

fn read_object(view: &ObjectView<'_>, key: Key, kind: Kind, required: bool) {
    macro_rules! read {
        ($t:ty, $dflt:expr) => {{
            let _ = if required {
                view.require::<$t>(key)
            } else {
                view.get::<$t>(key, $dflt)
            };
        }};
    }
    match kind {
        Kind::Bool => read!(bool, false),
        Kind::F64 => read!(f64, 0.0),
        Kind::F32 => read!(f32, 0.0),
        Kind::Int => read!(i32, 0),
        Kind::U32 => read!(u32, 0),
        Kind::I64 => read!(i64, 0),
        Kind::Str => read!(String, String::new()),
        Kind::Time => read!(OffsetDateTime, OffsetDateTime::UNIX_EPOCH),
    }
}

fn read_array(view: &ArrayView<'_>, idx: i8, kind: Kind, required: bool) {
    let idx = isize::from(idx);
    macro_rules! read {
        ($t:ty, $dflt:expr) => {{
            let _ = if required {
                view.require::<$t>(idx)
            } else {
                view.get::<$t>(idx, $dflt)
            };
        }};
    }
    match kind {
        Kind::Bool => read!(bool, false),
        Kind::F64 => read!(f64, 0.0),
        Kind::F32 => read!(f32, 0.0),
        Kind::Int => read!(i32, 0),
        Kind::U32 => read!(u32, 0),
        Kind::I64 => read!(i64, 0),
        Kind::Str => read!(String, String::new()),
        Kind::Time => read!(OffsetDateTime, OffsetDateTime::UNIX_EPOCH),
    }
}

fn apply(view: &mut ObjectView<'_>, op: Op) {
    match op {
        Op::Get(key, kind) => read_object(view, key, kind, false),
        Op::Require(key, kind) => read_object(view, key, kind, true),
        Op::Set(key, lit) => {
            view.set(key, lit);
        }
        Op::Put(key, lit) => {
            view.put(key, lit);
        }
        Op::InObject(key, create, op) => {
            let mut child = if create {
                view.get_or_create_obj(key)
            } else {
                view.obj(key)
            };
            apply(&mut child, *op);
        }
        Op::InArray(key, op) => {
            let mut arr = view.get_or_create_arr(key);
            match op {
                ArrOp::Get(idx, kind) => read_array(&arr, idx, kind, false),
                ArrOp::Require(idx, kind) => read_array(&arr, idx, kind, true),
                ArrOp::Set(idx, lit) => {
                    arr.set(isize::from(idx), lit);
                }
                ArrOp::Put(idx, lit) => {
                    arr.put(usize::from(idx), lit);
                }
                ArrOp::CreateObject(idx, key, lit) => {
                    arr.get_or_create_obj(isize::from(idx)).put(key, lit);
                }
            }
        }
    }
}

fuzz_target!(|input: (String, Vec<Op>)| {
    let (text, ops) = input;
    let Ok(mut doc) = serde_json::from_str::<Value>(&text) else {
        return;
    };

    let reports = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&reports);
    let ctx = Context::with_handler(move |_| counter.set(counter.get() + 1));

    let mut root = ctx.object(&mut doc);
    for op in ops {
        apply(&mut root, op);
    }

    // Whatever the views did, the document still round-trips through the codec.
    let encoded = serde_json::to_string(&doc).expect("finite document encodes");
    let decoded: Value = serde_json::from_str(&encoded).expect("encoded document decodes");
    assert_eq!(decoded, doc);
});
