use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use yuri_core::{
    Def, PointerKind, PtrConst, PtrMut, Reflect, ScalarKind, TypeIdentity, build_with,
    default_of, identity_of,
};

#[test]
fn identities_are_stable_and_distinct() {
    yuri_testhelpers::setup();

    assert_eq!(identity_of::<u32>(), identity_of::<u32>());
    assert_eq!(identity_of::<Vec<String>>(), <Vec<String> as Reflect>::SHAPE.id);
    assert_ne!(identity_of::<u32>(), identity_of::<i32>());
    assert_ne!(identity_of::<Vec<u8>>(), identity_of::<Vec<i8>>());

    // types without a shape still get an identity
    struct NotReflectable;
    assert_eq!(
        TypeIdentity::of::<NotReflectable>(),
        TypeIdentity::of::<NotReflectable>()
    );
}

#[test]
fn type_names_include_parameters() {
    yuri_testhelpers::setup();

    assert_eq!(<u8 as Reflect>::SHAPE.to_string(), "u8");
    assert_eq!(<Vec<String> as Reflect>::SHAPE.to_string(), "Vec<String>");
    assert_eq!(
        <Option<Box<i32>> as Reflect>::SHAPE.to_string(),
        "Option<Box<i32>>"
    );
    assert_eq!(
        <HashMap<String, Vec<f64>> as Reflect>::SHAPE.to_string(),
        "HashMap<String, Vec<f64>>"
    );
    assert_eq!(<(u8, String) as Reflect>::SHAPE.to_string(), "(u8, String)");
}

#[test]
fn scalar_kinds() {
    yuri_testhelpers::setup();

    let kind = |def: Def| match def {
        Def::Scalar(sd) => sd.kind,
        other => panic!("expected scalar, got {}", other.kind_name()),
    };
    assert_eq!(kind(<String as Reflect>::SHAPE.def), ScalarKind::String);
    assert_eq!(kind(<bool as Reflect>::SHAPE.def), ScalarKind::Bool);
    assert_eq!(kind(<i32 as Reflect>::SHAPE.def), ScalarKind::I32);
    assert_eq!(kind(<f64 as Reflect>::SHAPE.def), ScalarKind::F64);
}

#[test]
fn containers_report_their_category() {
    yuri_testhelpers::setup();

    assert!(matches!(<Option<u8> as Reflect>::SHAPE.def, Def::Nullable(_)));
    assert!(matches!(<Vec<u8> as Reflect>::SHAPE.def, Def::List(_)));
    assert!(matches!(<VecDeque<u8> as Reflect>::SHAPE.def, Def::List(_)));
    assert!(matches!(<HashSet<u8> as Reflect>::SHAPE.def, Def::List(_)));
    assert!(matches!(<BTreeMap<u8, u8> as Reflect>::SHAPE.def, Def::Map(_)));
    assert!(matches!(<(u8, u8) as Reflect>::SHAPE.def, Def::Pair(_)));

    for (shape, expected) in [
        (<Box<u8> as Reflect>::SHAPE, PointerKind::Box),
        (<Rc<u8> as Reflect>::SHAPE, PointerKind::Rc),
        (<Arc<u8> as Reflect>::SHAPE, PointerKind::Arc),
    ] {
        match shape.def {
            Def::Pointer(pd) => {
                assert_eq!(pd.kind, expected);
                assert_eq!(pd.t(), <u8 as Reflect>::SHAPE);
            }
            other => panic!("expected pointer, got {}", other.kind_name()),
        }
    }
}

#[test]
fn defaults_through_the_vtable() {
    yuri_testhelpers::setup();

    assert_eq!(default_of::<i64>(), Some(0));
    assert_eq!(default_of::<String>().as_deref(), Some(""));
    assert_eq!(default_of::<Option<String>>(), Some(None));
    assert_eq!(default_of::<Box<u16>>().map(|b| *b), Some(0));
    assert_eq!(default_of::<(u8, bool)>(), Some((0, false)));
    assert!(<Vec<u8> as Reflect>::SHAPE.has_default());
}

#[test]
fn list_vtable_pushes_and_iterates() -> eyre::Result<()> {
    yuri_testhelpers::setup();

    let Def::List(ld) = <Vec<u32> as Reflect>::SHAPE.def else {
        panic!("Vec should be a list");
    };

    let mut list = vec![1u32, 2];
    unsafe {
        (ld.vtable.push_with)(PtrMut::new(&raw mut list), &mut |item| {
            *item.as_mut::<u32>() = 3;
            true
        })?;
        let aborted = (ld.vtable.push_with)(PtrMut::new(&raw mut list), &mut |_| false);
        assert!(aborted.is_err());
    }
    assert_eq!(list, vec![1, 2, 3]);

    let seen: Vec<u32> = unsafe {
        (ld.vtable.iter)(PtrConst::new(&raw const list))
            .map(|item| *item.get::<u32>())
            .collect()
    };
    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(unsafe { (ld.vtable.len)(PtrConst::new(&raw const list)) }, 3);

    Ok(())
}

#[test]
fn pair_offsets_point_at_elements() {
    yuri_testhelpers::setup();

    let Def::Pair(pd) = <(u8, u64) as Reflect>::SHAPE.def else {
        panic!("tuple should be a pair");
    };
    let pair = (7u8, 99u64);
    let base = PtrConst::new(&raw const pair);
    unsafe {
        assert_eq!(*base.field(pd.first_offset).get::<u8>(), 7);
        assert_eq!(*base.field(pd.second_offset).get::<u64>(), 99);
    }
}

#[test]
fn build_with_fills_a_default() {
    yuri_testhelpers::setup();

    let built = build_with::<String>(&mut |s| {
        unsafe { s.as_mut::<String>().push_str("filled") };
        true
    });
    assert_eq!(built.as_deref(), Ok("filled"));
}
