use std::io;

use log::{debug, trace};
use yuri_core::{Def, Reflect, ScalarKind};
use yuri_reflect::Peek;

use crate::{EncodeError, EncodeFn, encode_by_identity, register_shape};

mod json;
pub use json::*;

mod display;
pub use display::*;

/// Receives a value as a stream of scalars and container boundaries.
///
/// Encoders drive a serializer without knowing the output format: the
/// JSON serializer and the display serializer share every codec.
pub trait Serializer {
    /// Serialize a boolean
    fn serialize_bool(&mut self, value: bool) -> Result<(), EncodeError>;

    /// Serialize an unsigned integer of any width
    fn serialize_u64(&mut self, value: u64) -> Result<(), EncodeError>;

    /// Serialize a signed integer of any width
    fn serialize_i64(&mut self, value: i64) -> Result<(), EncodeError>;

    /// Serialize an `f32`
    fn serialize_f32(&mut self, value: f32) -> Result<(), EncodeError>;

    /// Serialize an `f64`
    fn serialize_f64(&mut self, value: f64) -> Result<(), EncodeError>;

    /// Serialize a character
    fn serialize_char(&mut self, value: char) -> Result<(), EncodeError>;

    /// Serialize a string
    fn serialize_str(&mut self, value: &str) -> Result<(), EncodeError>;

    /// Serialize an empty nullable
    fn serialize_null(&mut self) -> Result<(), EncodeError>;

    /// Begin an object with `len` fields
    fn start_object(&mut self, len: usize) -> Result<(), EncodeError>;

    /// Name the next field of the current object
    fn serialize_field_name(&mut self, name: &str) -> Result<(), EncodeError>;

    /// End the current object
    fn end_object(&mut self) -> Result<(), EncodeError>;

    /// Begin an array with `len` elements
    fn start_array(&mut self, len: usize) -> Result<(), EncodeError>;

    /// End the current array
    fn end_array(&mut self) -> Result<(), EncodeError>;

    /// Begin a pair; its first element follows
    fn start_pair(&mut self) -> Result<(), EncodeError> {
        self.start_object(2)?;
        self.serialize_field_name("first")
    }

    /// Separate the first element of a pair from the second
    fn pair_second(&mut self) -> Result<(), EncodeError> {
        self.serialize_field_name("second")
    }

    /// End the current pair
    fn end_pair(&mut self) -> Result<(), EncodeError> {
        self.end_object()
    }

    /// Announce that the next value is reached through an owning pointer
    fn start_pointer(&mut self) -> Result<(), EncodeError> {
        Ok(())
    }
}

pub(crate) fn encoder_for(def: Def) -> EncodeFn {
    match def {
        Def::Scalar(_) => encode_scalar,
        Def::Nullable(_) => encode_nullable,
        Def::Pointer(_) => encode_pointer,
        Def::Enum(_) => encode_enum,
        Def::Composite(_) => encode_composite,
        Def::List(_) => encode_list,
        Def::Map(_) => encode_map,
        Def::Pair(_) => encode_pair,
        _ => encode_unsupported,
    }
}

fn encode_scalar(ser: &mut dyn Serializer, value: Peek<'_>) -> Result<(), EncodeError> {
    let shape = value.shape();
    match value.scalar_kind() {
        Some(ScalarKind::String) => ser.serialize_str(value.get::<String>()?),
        Some(ScalarKind::Bool) => ser.serialize_bool(*value.get::<bool>()?),
        Some(ScalarKind::Char) => ser.serialize_char(*value.get::<char>()?),
        Some(ScalarKind::U8) => ser.serialize_u64((*value.get::<u8>()?).into()),
        Some(ScalarKind::U16) => ser.serialize_u64((*value.get::<u16>()?).into()),
        Some(ScalarKind::U32) => ser.serialize_u64((*value.get::<u32>()?).into()),
        Some(ScalarKind::U64) => ser.serialize_u64(*value.get::<u64>()?),
        Some(ScalarKind::Usize) => ser.serialize_u64(*value.get::<usize>()? as u64),
        Some(ScalarKind::I8) => ser.serialize_i64((*value.get::<i8>()?).into()),
        Some(ScalarKind::I16) => ser.serialize_i64((*value.get::<i16>()?).into()),
        Some(ScalarKind::I32) => ser.serialize_i64((*value.get::<i32>()?).into()),
        Some(ScalarKind::I64) => ser.serialize_i64(*value.get::<i64>()?),
        Some(ScalarKind::Isize) => ser.serialize_i64(*value.get::<isize>()? as i64),
        Some(ScalarKind::F32) => ser.serialize_f32(*value.get::<f32>()?),
        Some(ScalarKind::F64) => ser.serialize_f64(*value.get::<f64>()?),
        _ => Err(EncodeError::Unsupported { shape }),
    }
}

fn encode_nullable(ser: &mut dyn Serializer, value: Peek<'_>) -> Result<(), EncodeError> {
    match value.into_nullable()?.value() {
        Some(inner) => encode_by_identity(ser, inner),
        None => ser.serialize_null(),
    }
}

fn encode_pointer(ser: &mut dyn Serializer, value: Peek<'_>) -> Result<(), EncodeError> {
    let pointer = value.into_pointer()?;
    ser.start_pointer()?;
    encode_by_identity(ser, pointer.inner())
}

fn encode_enum(ser: &mut dyn Serializer, value: Peek<'_>) -> Result<(), EncodeError> {
    ser.serialize_i64(value.into_enum()?.discriminant())
}

fn encode_composite(ser: &mut dyn Serializer, value: Peek<'_>) -> Result<(), EncodeError> {
    let composite = value.into_composite()?;
    ser.start_object(composite.field_count())?;
    for (info, field) in composite.fields() {
        trace!("Encoding field {} of {}", info.name, value.shape());
        ser.serialize_field_name(info.name)?;
        encode_by_identity(ser, field)?;
    }
    ser.end_object()
}

fn encode_list(ser: &mut dyn Serializer, value: Peek<'_>) -> Result<(), EncodeError> {
    let list = value.into_list()?;
    ser.start_array(list.len())?;
    for item in list.iter() {
        encode_by_identity(ser, item)?;
    }
    ser.end_array()
}

fn encode_map(ser: &mut dyn Serializer, value: Peek<'_>) -> Result<(), EncodeError> {
    let map = value.into_map()?;
    ser.start_array(map.len())?;
    for (key, value) in map.iter() {
        encode_pair_parts(ser, key, value)?;
    }
    ser.end_array()
}

fn encode_pair(ser: &mut dyn Serializer, value: Peek<'_>) -> Result<(), EncodeError> {
    let pair = value.into_pair()?;
    encode_pair_parts(ser, pair.first(), pair.second())
}

fn encode_pair_parts(
    ser: &mut dyn Serializer,
    first: Peek<'_>,
    second: Peek<'_>,
) -> Result<(), EncodeError> {
    ser.start_pair()?;
    encode_by_identity(ser, first)?;
    ser.pair_second()?;
    encode_by_identity(ser, second)?;
    ser.end_pair()
}

fn encode_unsupported(_ser: &mut dyn Serializer, value: Peek<'_>) -> Result<(), EncodeError> {
    Err(EncodeError::Unsupported {
        shape: value.shape(),
    })
}

/// Serializes a value to a JSON string.
pub fn to_string<T: Reflect>(value: &T) -> Result<String, EncodeError> {
    peek_to_string(Peek::new(value))
}

/// Serializes a `Peek` to a JSON string.
pub fn peek_to_string(peek: Peek<'_>) -> Result<String, EncodeError> {
    let mut out = Vec::new();
    peek_to_writer(peek, &mut out)?;
    String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Serializes a value to JSON and writes it to the given writer.
pub fn to_writer<T: Reflect, W: io::Write>(value: &T, writer: W) -> Result<(), EncodeError> {
    peek_to_writer(Peek::new(value), writer)
}

/// Serializes a `Peek` to JSON and writes it to the given writer.
pub fn peek_to_writer<W: io::Write>(peek: Peek<'_>, writer: W) -> Result<(), EncodeError> {
    debug!("Encoding {} as JSON", peek.shape());
    register_shape(peek.shape())?;
    let mut serializer = JsonSerializer::new(writer);
    encode_by_identity(&mut serializer, peek)?;
    serializer.flush()
}

/// Renders a value in the human-readable display form:
/// `{name=value,...}`, with owning pointers prefixed by `&` and pairs
/// written as `<first:second>`.
pub fn to_display_string<T: Reflect>(value: &T) -> Result<String, EncodeError> {
    let peek = Peek::new(value);
    debug!("Encoding {} for display", peek.shape());
    register_shape(peek.shape())?;
    let mut serializer = DisplaySerializer::new();
    encode_by_identity(&mut serializer, peek)?;
    Ok(serializer.into_string())
}

/// Serializes one field of a composite to a JSON string
pub fn field_to_string<T: Reflect>(value: &T, name: &str) -> Result<String, EncodeError> {
    let field = Peek::new(value).into_composite()?.field(name)?;
    peek_to_string(field)
}
