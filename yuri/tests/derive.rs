use yuri::{Def, EnumRepr, Reflect, default_of, field_table_of};
use yuri_testhelpers::test;

#[derive(Reflect, Default)]
#[repr(C)]
struct Header {
    version: u16,
    flags: u8,
}

#[derive(Reflect, Default)]
#[repr(C)]
struct Trailer {
    checksum: u32,
}

#[derive(Reflect, Default)]
#[repr(C)]
struct Packet {
    #[reflect(base)]
    header: Header,
    #[reflect(base)]
    trailer: Trailer,
    #[reflect(rename = "payloadLen")]
    payload_len: u64,
    #[reflect(skip)]
    scratch: Vec<u8>,
    body: String,
}

#[test]
fn composite_definition() {
    let Def::Composite(cd) = Packet::SHAPE.def else {
        panic!("Packet should be a composite");
    };
    assert_eq!(cd.bases.len(), 2);
    assert_eq!(cd.bases[0].shape(), Header::SHAPE);
    assert_eq!(cd.bases[0].offset, core::mem::offset_of!(Packet, header));
    assert_eq!(cd.bases[1].offset, core::mem::offset_of!(Packet, trailer));

    let names: Vec<_> = cd.fields.iter().map(|f| f.name).collect();
    assert_eq!(names, ["payloadLen", "body"]);
    assert_eq!(cd.fields[1].shape(), <String as Reflect>::SHAPE);
    assert_eq!(cd.fields[1].offset, core::mem::offset_of!(Packet, body));
}

#[test]
fn bases_are_flattened_with_real_offsets() {
    let table = field_table_of::<Packet>()?;
    let names: Vec<_> = table.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["version", "flags", "checksum", "payloadLen", "body"]);

    let header = core::mem::offset_of!(Packet, header);
    let trailer = core::mem::offset_of!(Packet, trailer);
    assert_eq!(table.offset_of("version"), Some(header + core::mem::offset_of!(Header, version)));
    assert_eq!(table.offset_of("flags"), Some(header + core::mem::offset_of!(Header, flags)));
    assert_eq!(table.offset_of("checksum"), Some(trailer));
    assert!(trailer >= size_of::<Header>());
    assert!(table.offset_of("payloadLen").unwrap() >= size_of::<Header>() + size_of::<Trailer>());
    assert!(!table.contains("scratch"));
    assert!(!table.contains("payload_len"));
}

#[derive(Reflect, Debug, Default, PartialEq)]
#[repr(u16)]
enum Channel {
    #[default]
    Control = 1,
    Data = 0x200,
    Audit,
}

#[test]
fn enum_definition() {
    let Def::Enum(ed) = Channel::SHAPE.def else {
        panic!("Channel should be an enum");
    };
    assert_eq!(ed.repr, EnumRepr::U16);
    let variants: Vec<_> = ed.variants.iter().map(|v| (v.name, v.discriminant)).collect();
    assert_eq!(variants, [("Control", 1), ("Data", 0x200), ("Audit", 0x201)]);
    assert_eq!(default_of::<Channel>(), Some(Channel::Control));
}

#[derive(Reflect, Debug, Default, PartialEq)]
#[reflect(default)]
struct Tagged<T> {
    tag: String,
    value: T,
}

#[derive(Reflect)]
struct Wrapper<T> {
    inner: T,
}

#[test]
fn generic_types() {
    assert_eq!(<Tagged<u8> as Reflect>::SHAPE.to_string(), "Tagged<u8>");
    assert_eq!(
        <Tagged<Vec<bool>> as Reflect>::SHAPE.to_string(),
        "Tagged<Vec<bool>>"
    );
    assert_ne!(<Tagged<u8> as Reflect>::SHAPE.id, <Tagged<i8> as Reflect>::SHAPE.id);

    // defaults are only known for generic types that ask for them
    assert_eq!(
        default_of::<Tagged<u8>>(),
        Some(Tagged {
            tag: String::new(),
            value: 0
        })
    );
    assert!(!<Wrapper<u8> as Reflect>::SHAPE.has_default());
}

#[derive(Reflect, Default)]
struct Coordinates(f32, f32);

#[test]
fn tuple_structs_use_positions() {
    let table = field_table_of::<Coordinates>()?;
    let names: Vec<_> = table.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["0", "1"]);
}
