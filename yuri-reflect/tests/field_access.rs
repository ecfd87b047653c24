use yuri::{FieldAccess, Reflect, ReflectError};
use yuri_testhelpers::test;

#[derive(Reflect, Default, Debug, PartialEq)]
#[repr(C)]
struct Base {
    id: u64,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[repr(C)]
struct Record {
    #[reflect(base)]
    base: Base,
    str: f64,
    name: String,
    tags: Vec<String>,
}

#[test]
fn get_and_set_by_name() {
    let mut record = Record::default();
    record.set_field("name", "first".to_owned())?;
    record.set_field("id", 12u64)?;
    record.get_field_mut::<Vec<String>>("tags")?.push("a".into());

    assert_eq!(record.get_field::<String>("name")?, "first");
    assert_eq!(*record.get_field::<u64>("id")?, 12);
    assert_eq!(record.base.id, 12);
    assert_eq!(record.tags, ["a"]);
}

#[test]
fn wrong_type_is_a_bad_field_access() {
    let record = Record {
        str: 1.5,
        ..Default::default()
    };

    let err = record.get_field::<String>("str").unwrap_err();
    match err {
        ReflectError::BadFieldAccess {
            name,
            field_shape,
            requested,
            ..
        } => {
            assert_eq!(name, "str");
            assert!(field_shape.is_type::<f64>());
            assert!(requested.ends_with("String"));
        }
        other => panic!("expected BadFieldAccess, got {other:?}"),
    }

    // no coercion between numeric types either
    assert!(matches!(
        record.get_field::<f32>("str"),
        Err(ReflectError::BadFieldAccess { .. })
    ));
}

#[test]
fn missing_names_are_unknown_fields() {
    let mut record = Record::default();
    let err = record.set_field("nope", 1u8).unwrap_err();
    assert_eq!(
        err,
        ReflectError::UnknownField {
            shape: Record::SHAPE,
            name: "nope".to_owned(),
        }
    );
    assert!(!record.has_field("nope"));
    assert!(record.has_field("id"));
}

#[test]
fn access_by_offset() {
    let record = Record {
        base: Base { id: 5 },
        ..Default::default()
    };
    let offset = core::mem::offset_of!(Record, str);

    assert_eq!(*record.field_by_offset::<u64>(0)?, 5);
    assert_eq!(*record.field_by_offset::<f64>(offset)?, 0.0);
    assert!(matches!(
        record.field_by_offset::<u64>(offset),
        Err(ReflectError::BadOffsetAccess { .. })
    ));
    assert!(matches!(
        record.field_by_offset::<u8>(offset + 1),
        Err(ReflectError::UnknownOffset { .. })
    ));
}

#[test]
fn field_type_checks() {
    let record = Record::default();
    assert!(record.field_is::<f64>("str")?);
    assert!(!record.field_is::<String>("str")?);
    assert!(record.field_is::<String>("missing").is_err());
}

#[test]
fn non_composites_are_rejected() {
    let list = vec![1u8];
    assert!(matches!(
        list.get_field::<u8>("len"),
        Err(ReflectError::WasNotA { expected: "composite", .. })
    ));
    assert!(!list.has_field("len"));
}
