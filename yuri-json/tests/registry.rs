use std::collections::BTreeMap;

use yuri::{Peek, Poke, Reflect};
use yuri_json::{
    DecodeError, DecodeErrorKind, Decoder, EncodeError, JsonSerializer, Serializer, Span,
    auto_register, decode_by_identity, encode_by_identity, from_str, is_registered, register,
    register_codec, to_display_string, to_string,
};
use yuri_testhelpers::test;

#[derive(Reflect, Debug, Default, PartialEq)]
struct NeverRegistered {
    x: u32,
}

#[test]
fn lookups_never_register() {
    let mut value = NeverRegistered::default();
    let mut de = Decoder::new(r#"{"x":1}"#);
    let err = decode_by_identity(&mut de, Poke::new(&mut value)).unwrap_err();
    assert_eq!(
        err.kind,
        DecodeErrorKind::UnregisteredType {
            shape: NeverRegistered::SHAPE
        }
    );
    assert_eq!(err.span, Some(Span::new(0, 0)));

    let mut ser = JsonSerializer::new(Vec::new());
    let err = encode_by_identity(&mut ser, Peek::new(&value)).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::UnregisteredType { shape } if shape == NeverRegistered::SHAPE
    ));
}

#[derive(Reflect, Debug, Default, PartialEq)]
struct Leaf {
    weight: f32,
}

#[derive(Reflect, Debug, Default, PartialEq)]
struct Tree {
    leaves: Vec<Leaf>,
    index: BTreeMap<u16, Option<Box<Leaf>>>,
}

#[test]
fn registration_reaches_every_nested_type() {
    register::<Tree>()?;
    for shape in [
        Tree::SHAPE,
        <Vec<Leaf> as Reflect>::SHAPE,
        Leaf::SHAPE,
        <f32 as Reflect>::SHAPE,
        <BTreeMap<u16, Option<Box<Leaf>>> as Reflect>::SHAPE,
        <u16 as Reflect>::SHAPE,
        <Option<Box<Leaf>> as Reflect>::SHAPE,
        <Box<Leaf> as Reflect>::SHAPE,
    ] {
        assert!(is_registered(shape), "{shape} should be registered");
    }

    // registering again is harmless
    register::<Tree>()?;
}

#[derive(Reflect, Debug, Default, PartialEq)]
struct Crowded {
    names: Vec<String>,
    scores: BTreeMap<String, Option<Box<Leaf>>>,
}

#[test]
fn concurrent_registration() {
    const THREADS: usize = 8;
    let barrier = std::sync::Barrier::new(THREADS);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    register::<Crowded>()?;
                    let encoded = to_string(&Crowded {
                        names: vec![i.to_string()],
                        ..Default::default()
                    })?;
                    Ok::<_, yuri_testhelpers::eyre::Report>(encoded)
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let encoded = handle.join().expect("registering thread panicked")?;
            assert_eq!(encoded, format!(r#"{{"names":["{i}"],"scores":[]}}"#));
        }
        Ok::<_, yuri_testhelpers::eyre::Report>(())
    })?;

    for shape in [
        Crowded::SHAPE,
        <Vec<String> as Reflect>::SHAPE,
        <BTreeMap<String, Option<Box<Leaf>>> as Reflect>::SHAPE,
    ] {
        assert!(is_registered(shape), "{shape} should be registered");
    }
}

#[derive(Reflect, Debug, Default, PartialEq)]
struct Node {
    value: i32,
    next: Option<Box<Node>>,
}

#[test]
fn self_referential_types() {
    let list = Node {
        value: 1,
        next: Some(Box::new(Node {
            value: 2,
            next: None,
        })),
    };
    let encoded = to_string(&list)?;
    assert_eq!(encoded, r#"{"value":1,"next":{"value":2,"next":null}}"#);
    assert_eq!(from_str::<Node>(r#"{"value":1,"next":{"value":2,"next":null}}"#)?, list);
}

#[derive(Reflect, Debug, Default, PartialEq, Clone, Copy)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

#[derive(Reflect, Debug, Default, PartialEq)]
struct Palette {
    name: String,
    colors: Vec<Rgb>,
}

fn encode_rgb(ser: &mut dyn Serializer, value: Peek<'_>) -> Result<(), EncodeError> {
    let Rgb { r, g, b } = *value.get::<Rgb>()?;
    ser.serialize_str(&format!("#{r:02x}{g:02x}{b:02x}"))
}

fn decode_rgb(de: &mut Decoder<'_>, mut value: Poke<'_>) -> Result<(), DecodeError> {
    de.skip_whitespace();
    let start = de.pos();
    let text = de.parse_str()?;
    let channel = |i: usize| {
        text.get(i..i + 2)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
    };
    match (text.strip_prefix('#'), channel(1), channel(3), channel(5)) {
        (Some(rest), Some(r), Some(g), Some(b)) if rest.len() == 6 => {
            Ok(value.set(Rgb { r, g, b })?)
        }
        _ => Err(DecodeError::new(
            DecodeErrorKind::InvalidLiteral { wanted: "#rrggbb" },
            Span::new(start, de.pos() - start),
        )),
    }
}

#[test]
fn custom_codecs_replace_the_default() {
    register_codec::<Rgb>(encode_rgb, decode_rgb);

    let palette = Palette {
        name: "warm".into(),
        colors: vec![Rgb { r: 255, g: 128, b: 0 }, Rgb { r: 1, g: 2, b: 3 }],
    };
    let encoded = to_string(&palette)?;
    assert_eq!(encoded, r##"{"name":"warm","colors":["#ff8000","#010203"]}"##);
    assert_eq!(
        from_str::<Palette>(r##"{"name":"warm","colors":["#ff8000","#010203"]}"##)?,
        palette
    );
    assert_eq!(
        to_display_string(&palette)?,
        r##"{name="warm",colors=["#ff8000","#010203"]}"##
    );

    let err = from_str::<Palette>(r#"{"colors":["red"]}"#).unwrap_err();
    assert_eq!(
        err.kind(),
        &DecodeErrorKind::InvalidLiteral { wanted: "#rrggbb" }
    );
    assert_eq!(err.error.path_string(), ".colors[0]");
}

#[derive(Reflect, Debug, Default, PartialEq)]
#[reflect(auto_register)]
struct Announced {
    level: i8,
    label: Option<String>,
}

#[test]
fn auto_registered_types() {
    assert!(auto_register()? >= 1);
    assert!(is_registered(Announced::SHAPE));
    assert!(is_registered(<Option<String> as Reflect>::SHAPE));
}
