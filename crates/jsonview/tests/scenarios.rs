#![allow(missing_docs)]

mod common;

use jsonview::{Context, ErrorKind};
use strum::{AsRefStr, Display};
use time::macros::datetime;

use common::{ORIGINAL, collecting, decode, encode};

#[derive(AsRefStr, Display, Clone, Copy)]
#[strum(serialize_all = "snake_case")]
enum Key {
    Foo,
    Bar,
    Baz,
    Quux,
}

#[test]
fn put_builds_nested_document() {
    let (ctx, seen) = collecting();
    let mut bar = ctx.new_object();
    bar.put(Key::Foo, 4711);
    bar.get_or_create_obj(Key::Baz).put(Key::Quux, true);

    assert!(seen.borrow().is_empty());
    assert_eq!(encode(&bar.into_value()), r#"{"baz":{"quux":true},"foo":4711}"#);
}

#[test]
fn put_into_decoded_document() {
    let ctx = Context::new();
    let mut doc = decode(r#"{"foo": 4711}"#);
    ctx.object(&mut doc)
        .put("baz", jsonview::Map::new())
        .obj("baz")
        .put("quux", true);

    assert_eq!(encode(&doc), r#"{"baz":{"quux":true},"foo":4711}"#);
}

#[test]
fn set_on_missing_key_leaves_document_unchanged() {
    let (ctx, seen) = collecting();
    let mut doc = decode(r#"{"foo": 4711}"#);
    let mut bar = ctx.object(&mut doc);

    bar.set(Key::Foo, "baz");
    bar.set(Key::Baz, "should fail");
    assert!(!bar.require::<bool>(Key::Baz));

    let messages: Vec<_> = seen.borrow().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        ["no existing object member 'baz'", "no boolean object member 'baz'"]
    );
    assert_eq!(encode(&doc), r#"{"foo":"baz"}"#);
}

#[test]
fn string_keys_and_enum_keys_agree() {
    let (ctx, seen) = collecting();
    let mut doc = decode(r#"{"bar": "x"}"#);
    let bar = ctx.object(&mut doc);

    assert_eq!(bar.get(Key::Bar, String::new()), bar.get("bar", String::new()));
    assert_eq!(bar.get(Key::Bar.to_string(), String::new()), "x");
    assert!(seen.borrow().is_empty());
}

#[test]
fn traverse_decoded_document() {
    let (ctx, seen) = collecting();
    let mut doc = decode(ORIGINAL);
    let mut root = ctx.object(&mut doc);

    {
        let mut request = root.require_obj("request");
        assert_eq!(request.require::<String>("filename"), "example.rs");
        assert_eq!(request.require::<u32>("retries"), 3);
        assert_eq!(
            request.require_time("issued"),
            datetime!(2025-03-14 09:26:53 UTC)
        );

        let mut options = request.require_obj("options");
        assert_eq!(options.get::<i32>("opt_level", 0), 0);
        let features = options.require_arr("features");
        assert_eq!(features.get(-1, String::new()), "tokio");
    }

    let mut matrix = root.require_arr("matrix");
    assert_eq!(matrix.require_arr(1).require::<i64>(0), 3);
    assert_eq!(matrix.arr(-2).get(-1, 0), 2);

    let mut mixed = root.require_arr("mixed");
    assert_eq!(mixed.obj(1).get("k", String::new()), "v");
    assert!(mixed.obj(2).is_absent());
    assert_eq!(mixed.get::<i32>(4, 9), 0);

    let kinds: Vec<_> = seen.borrow().iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, [ErrorKind::TypeMismatch, ErrorKind::Range]);
}

#[test]
fn writes_through_views_reach_the_encoded_document() {
    let ctx = Context::new();
    let mut doc = decode(ORIGINAL);
    let mut root = ctx.object(&mut doc);

    root.require_obj("request")
        .require_obj("options")
        .require_arr("features")
        .put(3, "rt");
    root.get_or_create_arr("log").get_or_create_obj(0).put("n", 1.5);

    let features = root
        .require_obj("request")
        .require_obj("options")
        .require_arr("features")
        .into_value();
    assert_eq!(encode(&features), r#"["serde","tokio",null,"rt"]"#);
    assert_eq!(encode(&root.require_arr("log").into_value()), r#"[{"n":1.5}]"#);
}

#[test]
#[should_panic(expected = "object member 'request' is not JSON-array")]
fn fatal_context_aborts_on_first_failure() {
    let ctx = Context::new();
    let mut doc = decode(ORIGINAL);
    let mut root = ctx.object(&mut doc);
    let _ = root.arr("request");
}
