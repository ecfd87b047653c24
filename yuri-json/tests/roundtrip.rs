use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use yuri::Reflect;
use yuri_json::{
    JsonError, Value, field_to_string, from_str, from_str_into, from_str_value,
    set_field_from_str, to_string, to_writer,
};
use yuri_testhelpers::test;

#[derive(Reflect, Debug, Default, PartialEq, Clone, Copy)]
#[repr(u8)]
enum Status {
    #[default]
    Idle = 0,
    Busy = 3,
}

#[derive(Reflect, Debug, Default, PartialEq)]
#[repr(C)]
struct Entity {
    id: u64,
    name: String,
}

#[derive(Reflect, Debug, Default, PartialEq)]
#[repr(C)]
struct Task {
    #[reflect(base)]
    entity: Entity,
    status: Status,
    priority: Option<Box<i16>>,
    tags: Vec<String>,
    owners: BTreeMap<String, u32>,
    window: (f32, f32),
    note: Option<String>,
    shared: Rc<String>,
    done: bool,
}

fn sample() -> Task {
    Task {
        entity: Entity {
            id: 7,
            name: "build".into(),
        },
        status: Status::Busy,
        priority: Some(Box::new(-2)),
        tags: vec!["a".into(), "b".into()],
        owners: [("ann".to_owned(), 1), ("bo".to_owned(), 2)].into(),
        window: (0.5, 1.0),
        note: None,
        shared: Rc::new("s".into()),
        done: true,
    }
}

const SAMPLE_JSON: &str = concat!(
    r#"{"id":7,"name":"build","status":3,"priority":-2,"tags":["a","b"],"#,
    r#""owners":[{"first":"ann","second":1},{"first":"bo","second":2}],"#,
    r#""window":{"first":0.5,"second":1.0},"note":null,"shared":"s","done":true}"#
);

#[test]
fn encodes_bases_first_then_declaration_order() {
    assert_eq!(to_string(&sample())?, SAMPLE_JSON);
}

#[test]
fn decodes_what_it_encodes() {
    let task: Task = from_str(SAMPLE_JSON)?;
    assert_eq!(task, sample());
    assert_eq!(from_str::<Task>(&to_string(&task)?).map_err(JsonError::into_owned)?, task);
}

#[test]
fn whitespace_between_tokens() {
    let input = r#"
        {
            "id" : 7 ,
            "tags" : [ "x" , "y" ] ,
            "window" : { "first" : 1 , "second" : 2e0 }
        }
    "#;
    let task: Task = from_str(input)?;
    assert_eq!(task.entity.id, 7);
    assert_eq!(task.tags, ["x", "y"]);
    assert_eq!(task.window, (1.0, 2.0));
}

#[derive(Reflect, Debug, Default, PartialEq)]
struct Empty {}

#[test]
fn empty_containers() {
    assert_eq!(to_string(&Empty {})?, "{}");
    assert_eq!(to_string(&Vec::<u8>::new())?, "[]");
    assert_eq!(from_str::<Empty>(" { } ")?, Empty {});
    assert!(from_str::<Vec<u8>>("[]")?.is_empty());

    let plain = Task::default();
    let encoded = to_string(&plain)?;
    assert!(encoded.contains(r#""tags":[],"owners":[]"#), "{encoded}");
    assert_eq!(from_str::<Task>(&encoded).map_err(JsonError::into_owned)?, plain);
}

#[test]
fn null_round_trip() {
    let mut task = sample();
    task.priority = None;
    let encoded = to_string(&task)?;
    assert!(encoded.contains(r#""priority":null"#), "{encoded}");
    assert_eq!(from_str::<Task>(&encoded).map_err(JsonError::into_owned)?.priority, None);

    let mut existing = sample();
    from_str_into(r#"{"priority":null,"note":"hi"}"#, &mut existing)?;
    assert_eq!(existing.priority, None);
    assert_eq!(existing.note.as_deref(), Some("hi"));
}

#[derive(Reflect, Debug, Default, PartialEq)]
struct Known {
    #[reflect(rename = "knownField")]
    known_field: i32,
    other: i32,
}

#[test]
fn unknown_fields_are_skipped() {
    let known: Known = from_str(r#"{"knownField":1,"bogus":{"a":[1,2]},"other":2}"#)?;
    assert_eq!(
        known,
        Known {
            known_field: 1,
            other: 2
        }
    );

    let known: Known =
        from_str(r#"{"x":[],"y":{},"z":"s","w":true,"v":null,"other":5,"u":-1.5e3}"#)?;
    assert_eq!(known.other, 5);
}

#[derive(Reflect, Debug, PartialEq)]
struct Scenario {
    i: i32,
    d: f64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self { i: 2, d: 0.0 }
    }
}

#[test]
fn integers_and_floats_by_destination() {
    let s: Scenario = from_str(r#"{"i":20,"d":4}"#)?;
    assert_eq!(s, Scenario { i: 20, d: 4.0 });
    assert_eq!(to_string(&s)?, r#"{"i":20,"d":4.0}"#);
    assert_eq!(from_str::<Scenario>(&to_string(&s)?).map_err(JsonError::into_owned)?, s);

    // missing fields keep their defaults
    let s: Scenario = from_str(r#"{"d":1.25}"#)?;
    assert_eq!(s, Scenario { i: 2, d: 1.25 });
}

#[test]
fn decoding_replaces_container_contents() {
    let mut task = sample();
    from_str_into(r#"{"tags":["only"],"owners":[{"first":"cy","second":9}]}"#, &mut task)?;
    assert_eq!(task.tags, ["only"]);
    assert_eq!(task.owners, BTreeMap::from([("cy".to_owned(), 9)]));
    assert_eq!(task.entity.name, "build");
}

#[test]
fn top_level_scalars_and_pairs() {
    assert_eq!(from_str::<(String, u8)>(r#"{"first":"a","second":1}"#)?, ("a".to_owned(), 1));
    assert_eq!(from_str::<char>(r#""é""#)?, 'é');
    assert_eq!(from_str::<i64>(" -42 ")?, -42);
    assert!(!from_str::<bool>("false")?);
    assert_eq!(to_string(&'q')?, r#""q""#);
    assert_eq!(to_string(&Some(Status::Busy))?, "3");
}

#[test]
fn writes_to_a_writer() {
    let mut out = Vec::new();
    to_writer(&Entity { id: 1, name: "n".into() }, &mut out)?;
    assert_eq!(out, br#"{"id":1,"name":"n"}"#);
}

#[test]
fn single_fields_as_text() {
    let mut task = sample();
    assert_eq!(field_to_string(&task, "tags")?, r#"["a","b"]"#);
    assert_eq!(field_to_string(&task, "id")?, "7");

    set_field_from_str(&mut task, "status", "0")?;
    set_field_from_str(&mut task, "name", r#""renamed""#)?;
    assert_eq!(task.status, Status::Idle);
    assert_eq!(task.entity.name, "renamed");
}

#[test]
fn untyped_values() {
    let value = from_str_value(r#"{"a":[1,{"b":null}],"c":"d"}"#)?;
    let a = value.get("a").and_then(Value::as_list).unwrap();
    assert_eq!(a[0], Value::Number(1.0));
    assert!(a[1].get("b").is_some_and(Value::is_null));
    assert_eq!(value.get("c").and_then(Value::as_str), Some("d"));

    assert_eq!(from_str_value("[]")?, Value::List(vec![]));
    assert_eq!(from_str_value("{}")?, Value::Map(vec![]));
}

#[derive(Reflect, Debug, Default, PartialEq)]
struct Limits {
    low: f64,
    high: f32,
}

#[test]
fn non_finite_floats() {
    let limits = Limits {
        low: f64::NEG_INFINITY,
        high: f32::INFINITY,
    };
    let encoded = to_string(&limits)?;
    assert_eq!(encoded, r#"{"low":-inf,"high":inf}"#);
    assert_eq!(
        from_str::<Limits>(&encoded).map_err(JsonError::into_owned)?,
        limits
    );

    let nan: Limits = from_str(r#"{"low":NaN,"high":+Infinity}"#)?;
    assert!(nan.low.is_nan());
    assert_eq!(nan.high, f32::INFINITY);
    assert_eq!(from_str::<Option<f64>>("NaN")?.map(f64::is_nan), Some(true));
    assert_eq!(from_str::<Option<f64>>("null")?, None);
}

#[derive(Reflect, Debug, Default, PartialEq)]
struct Shared {
    local: Option<Rc<String>>,
    remote: Option<Arc<Vec<u8>>>,
}

#[test]
fn shared_pointers_may_be_null() {
    let empty = Shared::default();
    let encoded = to_string(&empty)?;
    assert_eq!(encoded, r#"{"local":null,"remote":null}"#);
    assert_eq!(
        from_str::<Shared>(&encoded).map_err(JsonError::into_owned)?,
        empty
    );

    let full = Shared {
        local: Some(Rc::new("here".into())),
        remote: Some(Arc::new(vec![1, 2])),
    };
    let encoded = to_string(&full)?;
    assert_eq!(encoded, r#"{"local":"here","remote":[1,2]}"#);
    assert_eq!(
        from_str::<Shared>(&encoded).map_err(JsonError::into_owned)?,
        full
    );

    // null over an existing value clears it
    let mut target = full;
    from_str_into(r#"{"local":null}"#, &mut target)?;
    assert_eq!(target.local, None);
    assert_eq!(target.remote.as_deref(), Some(&vec![1, 2]));
}
