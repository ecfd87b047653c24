use std::collections::BTreeMap;
use std::rc::Rc;

use yuri::{Peek, PointerKind, Poke, Reflect, ReflectError};
use yuri_testhelpers::test;

#[derive(Reflect, Default, Debug, Clone, Copy, PartialEq)]
#[repr(i16)]
enum Level {
    #[default]
    Low = -1,
    High = 10,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct Sensor {
    name: String,
    level: Level,
    readings: Vec<i32>,
    limits: BTreeMap<String, f32>,
    calibration: Option<Box<(u8, u8)>>,
    shared: Rc<String>,
}

#[test]
fn peek_walks_every_kind() {
    let sensor = Sensor {
        name: "thermo".into(),
        level: Level::High,
        readings: vec![3, 4],
        limits: BTreeMap::from([("max".to_owned(), 9.5)]),
        calibration: Some(Box::new((1, 2))),
        shared: Rc::new("s".into()),
    };

    let composite = Peek::new(&sensor).into_composite()?;
    assert_eq!(composite.field_count(), 6);

    let level = composite.field("level")?.into_enum()?;
    assert_eq!(level.discriminant(), 10);
    assert_eq!(level.variant().map(|v| v.name), Some("High"));

    let readings: Vec<i32> = composite
        .field("readings")?
        .into_list()?
        .iter()
        .map(|item| item.get::<i32>().copied())
        .collect::<Result<_, _>>()?;
    assert_eq!(readings, [3, 4]);

    let limits = composite.field("limits")?.into_map()?;
    assert_eq!(limits.len(), 1);
    for (k, v) in limits.iter() {
        assert_eq!(k.get::<String>()?, "max");
        assert_eq!(*v.get::<f32>()?, 9.5);
    }

    let calibration = composite.field("calibration")?.into_nullable()?;
    let boxed = calibration.value().ok_or_else(|| eyre::eyre!("expected Some"))?;
    let pointer = boxed.into_pointer()?;
    assert_eq!(pointer.kind(), PointerKind::Box);
    let pair = pointer.inner().into_pair()?;
    assert_eq!(*pair.first().get::<u8>()?, 1);
    assert_eq!(*pair.second().get::<u8>()?, 2);

    let shared = composite.field("shared")?.into_pointer()?;
    assert_eq!(shared.kind(), PointerKind::Rc);
    assert_eq!(shared.inner().get::<String>()?, "s");
}

#[test]
fn peek_rejects_the_wrong_category() {
    let n = 5u32;
    let err = Peek::new(&n).into_list().unwrap_err();
    assert!(matches!(err, ReflectError::WasNotA { expected: "list", .. }));
    assert!(Peek::new(&n).get::<i32>().is_err());
}

#[test]
fn poke_fills_every_kind() {
    let mut sensor = Sensor::default();
    {
        let mut composite = Poke::new(&mut sensor).into_composite()?;
        composite.field("name")?.set("thermo".to_owned())?;
        composite.field("level")?.into_enum()?.set_discriminant(10)?;

        let mut readings = composite.field("readings")?.into_list()?;
        for n in [7, 8] {
            readings.push_with(|mut item| item.set::<i32>(n))?;
        }

        composite
            .field("limits")?
            .into_map()?
            .insert_with(|mut k, mut v| -> Result<(), ReflectError> {
                k.set("min".to_owned())?;
                v.set(0.5f32)
            })?;

        composite
            .field("calibration")?
            .into_nullable()?
            .fill_some(|boxed| -> Result<(), ReflectError> {
                boxed.into_pointer()?.fill(|pair| -> Result<(), ReflectError> {
                    let mut pair = pair.into_pair()?;
                    pair.first().set(4u8)?;
                    pair.second().set(5u8)
                })
            })?;

        composite
            .field("shared")?
            .into_pointer()?
            .fill(|mut s| s.set("fresh".to_owned()))?;
    }

    assert_eq!(sensor.name, "thermo");
    assert_eq!(sensor.level, Level::High);
    assert_eq!(sensor.readings, [7, 8]);
    assert_eq!(sensor.limits, BTreeMap::from([("min".to_owned(), 0.5)]));
    assert_eq!(sensor.calibration.as_deref(), Some(&(4, 5)));
    assert_eq!(*sensor.shared, "fresh");
}

#[test]
fn failed_fills_leave_containers_alone() {
    let mut readings = vec![1i32];
    let mut list = Poke::new(&mut readings).into_list()?;
    let err = list
        .push_with(|mut item| item.set::<u8>(1))
        .unwrap_err();
    assert!(matches!(err, ReflectError::WrongShape { .. }));
    assert_eq!(readings, [1]);

    let mut maybe: Option<String> = Some("kept".into());
    let err = Poke::new(&mut maybe)
        .into_nullable()?
        .fill_some(|mut s| s.set(3u64))
        .unwrap_err();
    assert!(matches!(err, ReflectError::WrongShape { .. }));
    assert_eq!(maybe.as_deref(), Some("kept"));

    Poke::new(&mut maybe).into_nullable()?.set_none();
    assert_eq!(maybe, None);
}

#[test]
fn unknown_discriminants_are_rejected() {
    let mut level = Level::Low;
    let err = Poke::new(&mut level)
        .into_enum()?
        .set_discriminant(3)
        .unwrap_err();
    assert!(matches!(err, ReflectError::NoSuchVariant { discriminant: 3, .. }));
    assert_eq!(level, Level::Low);
}

#[test]
fn clear_empties_lists_and_maps() {
    let mut readings = vec![1i32, 2];
    Poke::new(&mut readings).into_list()?.clear();
    assert!(readings.is_empty());

    let mut limits = BTreeMap::from([(1u8, 1u8)]);
    Poke::new(&mut limits).into_map()?.clear();
    assert!(limits.is_empty());
}

#[test]
fn fields_by_offset_and_reborrowed_pokes() {
    let mut sensor = Sensor {
        name: "a".into(),
        ..Default::default()
    };
    let level_at = core::mem::offset_of!(Sensor, level);

    let peek = Peek::new(&sensor).into_composite()?;
    assert_eq!(peek.field_at_offset(level_at)?.into_enum()?.discriminant(), -1);
    assert!(matches!(
        peek.field_at_offset(level_at + 1),
        Err(ReflectError::UnknownOffset { offset, .. }) if offset == level_at + 1
    ));

    let mut poke = Poke::new(&mut sensor);
    assert_eq!(poke.as_peek().get::<Sensor>()?.name, "a");
    {
        let mut composite = poke.reborrow().into_composite()?;
        composite.field_at_offset(level_at)?.set(Level::High)?;
        composite.field("name")?.set(String::from("b"))?;
        assert!(composite.field_at_offset(level_at + 1).is_err());
    }
    let level = poke.as_peek().into_composite()?.field("level")?.into_enum()?;
    assert_eq!(level.discriminant(), 10);

    assert_eq!(sensor.level, Level::High);
    assert_eq!(sensor.name, "b");
}
