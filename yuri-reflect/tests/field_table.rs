use core::mem::{offset_of, size_of};

use yuri::{Peek, Reflect, ReflectError, SchemaError, field_table_of, identity_of};
use yuri_testhelpers::test;

#[derive(Reflect, Default, Debug, PartialEq)]
#[repr(C)]
struct Position {
    x: f64,
    y: f64,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[repr(C)]
struct Label {
    text: String,
    visible: bool,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[repr(C)]
struct Marker {
    #[reflect(base)]
    position: Position,
    #[reflect(base)]
    label: Label,
    id: u32,
}

#[derive(Reflect, Default)]
#[repr(C)]
struct Pin {
    #[reflect(base)]
    marker: Marker,
    #[reflect(rename = "pinColor")]
    color: u32,
    #[reflect(skip)]
    #[allow(dead_code)]
    cache: Vec<u8>,
}

#[test]
fn plain_table_follows_declaration_order() {
    let table = field_table_of::<Position>()?;
    let names: Vec<_> = table.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["x", "y"]);
    assert_eq!(table.offset_of("x"), Some(offset_of!(Position, x)));
    assert_eq!(table.offset_of("y"), Some(offset_of!(Position, y)));
    assert_eq!(table.type_of("y"), Some(identity_of::<f64>()));
    assert_eq!(table.type_at(offset_of!(Position, y)), Some(identity_of::<f64>()));
    assert!(table.get("z").is_none());
}

#[test]
fn bases_are_merged_at_cumulative_offsets() {
    let table = field_table_of::<Marker>()?;
    let names: Vec<_> = table.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["x", "y", "text", "visible", "id"]);

    let s1 = size_of::<Position>();
    let s2 = size_of::<Label>();

    assert_eq!(table.offset_of("x"), Some(0));
    assert_eq!(table.offset_of("text"), Some(s1 + offset_of!(Label, text)));
    assert_eq!(table.offset_of("visible"), Some(s1 + offset_of!(Label, visible)));
    assert!(table.offset_of("text").is_some_and(|o| o >= s1));
    assert!(table.offset_of("id").is_some_and(|o| o >= s1 + s2));
    assert_eq!(table.offset_of("id"), Some(offset_of!(Marker, id)));
}

#[test]
fn nested_bases_flatten() {
    let table = field_table_of::<Pin>()?;
    let names: Vec<_> = table.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["x", "y", "text", "visible", "id", "pinColor"]);
    assert!(!table.contains("color"));
    assert!(!table.contains("cache"));
    assert_eq!(
        table.offset_of("id"),
        Some(offset_of!(Pin, marker) + offset_of!(Marker, id))
    );

    // merged offsets address the real memory
    let mut pin = Pin::default();
    pin.marker.label.text = "here".to_owned();
    pin.marker.id = 7;
    let peek = Peek::new(&pin).into_composite()?;
    assert_eq!(peek.field("text")?.get::<String>()?, "here");
    assert_eq!(*peek.field("id")?.get::<u32>()?, 7);
}

#[test]
fn tables_are_built_once() {
    let first = field_table_of::<Marker>()?;
    let second = field_table_of::<Marker>()?;
    assert!(core::ptr::eq(first, second));
}

#[derive(Reflect, Default)]
#[repr(C)]
struct Contended {
    #[reflect(base)]
    label: Label,
    hits: u64,
}

#[test]
fn racing_first_uses_share_one_table() {
    const THREADS: usize = 8;
    let barrier = std::sync::Barrier::new(THREADS);
    let tables = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    field_table_of::<Contended>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("table thread panicked"))
            .collect::<Result<Vec<_>, _>>()
    })?;

    let published = field_table_of::<Contended>()?;
    assert_eq!(published.len(), 3);
    for table in tables {
        assert!(core::ptr::eq(table, published));
    }
}

#[test]
fn empty_composite_has_an_empty_table() {
    #[derive(Reflect, Default)]
    struct Nothing {}

    let table = field_table_of::<Nothing>()?;
    assert!(table.is_empty());
}

#[test]
fn duplicate_names_across_bases_are_rejected() {
    #[derive(Reflect, Default)]
    #[repr(C)]
    struct Named {
        name: String,
    }

    #[derive(Reflect, Default)]
    #[repr(C)]
    struct Shadowing {
        #[reflect(base)]
        named: Named,
        name: String,
    }

    let err = field_table_of::<Shadowing>().unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateField { name: "name", .. }));

    let value = Shadowing::default();
    let err = Peek::new(&value).into_composite().unwrap_err();
    assert!(matches!(err, ReflectError::Schema(SchemaError::DuplicateField { .. })));
}

#[test]
fn tables_only_exist_for_composites() {
    let err = field_table_of::<Vec<u8>>().unwrap_err();
    assert!(matches!(err, SchemaError::NotAComposite { .. }));
}
