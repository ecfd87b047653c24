use core::str::FromStr;

use log::{debug, trace};
use yuri_core::{Def, Reflect, ScalarKind, default_of};
use yuri_reflect::{Poke, ReflectError};

use crate::{
    DecodeError, DecodeErrorKind, DecodeFn, JsonError, PathSegment, Span, decode_by_identity,
    register_shape,
};

mod decoder;
pub use decoder::*;

mod value;
pub use value::*;

/// Deserializes a value of type `T` from its JSON form.
///
/// Decoding starts from `T`'s default value, so fields missing from the
/// input keep their defaults and unknown keys are skipped.
pub fn from_str<T: Reflect>(input: &str) -> Result<T, JsonError<'_>> {
    let Some(mut value) = default_of::<T>() else {
        let error = ReflectError::NoDefault { shape: T::SHAPE };
        return Err(JsonError::new(input, error.into()));
    };
    from_str_into(input, &mut value)?;
    Ok(value)
}

/// Deserializes JSON into an existing value. On failure the value may have
/// been partly overwritten.
pub fn from_str_into<'input, T: Reflect>(
    input: &'input str,
    target: &mut T,
) -> Result<(), JsonError<'input>> {
    debug!("Decoding {} from {} bytes", T::SHAPE, input.len());
    decode_whole(input, Poke::new(target)).map_err(|e| JsonError::new(input, e))
}

/// Reads JSON without a destination type
pub fn from_str_value(input: &str) -> Result<Value, JsonError<'_>> {
    let mut de = Decoder::new(input);
    de.parse_value()
        .and_then(|value| de.finish().map(|()| value))
        .map_err(|e| JsonError::new(input, e))
}

/// Deserializes JSON into one field of a composite
pub fn set_field_from_str<'input, T: Reflect>(
    target: &mut T,
    name: &str,
    input: &'input str,
) -> Result<(), JsonError<'input>> {
    debug!("Decoding field {name} of {} from {} bytes", T::SHAPE, input.len());
    decode_field(target, name, input).map_err(|e| JsonError::new(input, e))
}

fn decode_field<T: Reflect>(target: &mut T, name: &str, input: &str) -> Result<(), DecodeError> {
    let mut composite = Poke::new(target).into_composite()?;
    let field = composite.field(name)?;
    decode_whole(input, field)
}

fn decode_whole(input: &str, value: Poke<'_>) -> Result<(), DecodeError> {
    register_shape(value.shape())?;
    let mut de = Decoder::new(input);
    decode_by_identity(&mut de, value)?;
    de.finish()
}

pub(crate) fn decoder_for(def: Def) -> DecodeFn {
    match def {
        Def::Scalar(_) => decode_scalar,
        Def::Nullable(_) => decode_nullable,
        Def::Pointer(_) => decode_pointer,
        Def::Enum(_) => decode_enum,
        Def::Composite(_) => decode_composite,
        Def::List(_) => decode_list,
        Def::Map(_) => decode_map,
        Def::Pair(_) => decode_pair,
        _ => decode_unsupported,
    }
}

fn number<T: FromStr + 'static>(
    de: &mut Decoder<'_>,
    mut value: Poke<'_>,
) -> Result<(), DecodeError> {
    let n = de.parse_number::<T>(value.shape())?;
    Ok(value.set(n)?)
}

fn decode_scalar(de: &mut Decoder<'_>, mut value: Poke<'_>) -> Result<(), DecodeError> {
    match value.scalar_kind() {
        Some(ScalarKind::String) => {
            let s = de.parse_str()?;
            value.set(s.to_owned())?;
        }
        Some(ScalarKind::Bool) => value.set(de.parse_bool()?)?,
        Some(ScalarKind::Char) => {
            let s = de.parse_str()?;
            let mut chars = s.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                let span = Span::new(de.pos() - s.len() - 2, s.len() + 2);
                let kind = DecodeErrorKind::InvalidChar { text: s.to_owned() };
                return Err(DecodeError::new(kind, span));
            };
            value.set(c)?;
        }
        Some(ScalarKind::U8) => number::<u8>(de, value)?,
        Some(ScalarKind::U16) => number::<u16>(de, value)?,
        Some(ScalarKind::U32) => number::<u32>(de, value)?,
        Some(ScalarKind::U64) => number::<u64>(de, value)?,
        Some(ScalarKind::Usize) => number::<usize>(de, value)?,
        Some(ScalarKind::I8) => number::<i8>(de, value)?,
        Some(ScalarKind::I16) => number::<i16>(de, value)?,
        Some(ScalarKind::I32) => number::<i32>(de, value)?,
        Some(ScalarKind::I64) => number::<i64>(de, value)?,
        Some(ScalarKind::Isize) => number::<isize>(de, value)?,
        Some(ScalarKind::F32) => number::<f32>(de, value)?,
        Some(ScalarKind::F64) => number::<f64>(de, value)?,
        _ => return decode_unsupported(de, value),
    }
    Ok(())
}

fn decode_nullable(de: &mut Decoder<'_>, value: Poke<'_>) -> Result<(), DecodeError> {
    let mut nullable = value.into_nullable()?;
    if de.null_next("a value or null")? {
        de.eat_literal("null")?;
        nullable.set_none();
        return Ok(());
    }
    nullable.fill_some(|inner| decode_by_identity(de, inner))
}

fn decode_pointer(de: &mut Decoder<'_>, value: Poke<'_>) -> Result<(), DecodeError> {
    value
        .into_pointer()?
        .fill(|inner| decode_by_identity(de, inner))
}

fn decode_enum(de: &mut Decoder<'_>, value: Poke<'_>) -> Result<(), DecodeError> {
    let start = de.pos();
    let discriminant = de.parse_number::<i64>(value.shape())?;
    value
        .into_enum()?
        .set_discriminant(discriminant)
        .map_err(|e| DecodeError::from(e).or_span(Span::new(start, de.pos() - start)))
}

fn decode_composite(de: &mut Decoder<'_>, value: Poke<'_>) -> Result<(), DecodeError> {
    let mut composite = value.into_composite()?;
    let table = composite.table();
    de.open(b'{', "'{'")?;
    if de.eat_close(b'}') {
        return Ok(());
    }
    loop {
        let key = de.parse_str()?;
        de.expect(b':', "':'")?;
        match table.get(key) {
            Some(info) => {
                trace!("field {} of {}", info.name, table.shape());
                let field = composite.field(info.name)?;
                decode_by_identity(de, field)
                    .map_err(|e| e.within(PathSegment::Field(info.name)))?;
            }
            None => {
                trace!("skipping unknown field {key:?} of {}", table.shape());
                de.skip_value()
                    .map_err(|e| e.within(PathSegment::UnknownField(key.to_owned())))?;
            }
        }
        if !de.eat(b',') {
            break;
        }
    }
    de.close(b'}', "',' or '}'")
}

fn decode_list(de: &mut Decoder<'_>, value: Poke<'_>) -> Result<(), DecodeError> {
    let mut list = value.into_list()?;
    de.open(b'[', "'['")?;
    list.clear();
    if de.eat_close(b']') {
        return Ok(());
    }
    let mut index = 0;
    loop {
        list.push_with(|item| decode_by_identity(de, item))
            .map_err(|e| e.within(PathSegment::Index(index)))?;
        index += 1;
        if !de.eat(b',') {
            break;
        }
    }
    de.close(b']', "',' or ']'")
}

fn decode_map(de: &mut Decoder<'_>, value: Poke<'_>) -> Result<(), DecodeError> {
    let mut map = value.into_map()?;
    de.open(b'[', "'['")?;
    map.clear();
    if de.eat_close(b']') {
        return Ok(());
    }
    let mut index = 0;
    loop {
        map.insert_with(|key, value| decode_pair_parts(de, key, value))
            .map_err(|e| e.within(PathSegment::Index(index)))?;
        index += 1;
        if !de.eat(b',') {
            break;
        }
    }
    de.close(b']', "',' or ']'")
}

fn decode_pair(de: &mut Decoder<'_>, value: Poke<'_>) -> Result<(), DecodeError> {
    let mut pair = value.into_pair()?;
    let (first, second) = pair.halves();
    decode_pair_parts(de, first, second)
}

fn decode_pair_parts(
    de: &mut Decoder<'_>,
    first: Poke<'_>,
    second: Poke<'_>,
) -> Result<(), DecodeError> {
    de.open(b'{', "'{'")?;
    pair_key(de, "first")?;
    decode_by_identity(de, first).map_err(|e| e.within(PathSegment::Field("first")))?;
    de.expect(b',', "','")?;
    pair_key(de, "second")?;
    decode_by_identity(de, second).map_err(|e| e.within(PathSegment::Field("second")))?;
    de.close(b'}', "'}'")
}

fn pair_key(de: &mut Decoder<'_>, wanted: &'static str) -> Result<(), DecodeError> {
    de.skip_whitespace();
    let start = de.pos();
    let got = de.parse_str()?;
    if got != wanted {
        let kind = DecodeErrorKind::UnexpectedKey {
            wanted,
            got: got.to_owned(),
        };
        return Err(DecodeError::new(kind, Span::new(start, de.pos() - start)));
    }
    de.expect(b':', "':'")
}

fn decode_unsupported(de: &mut Decoder<'_>, value: Poke<'_>) -> Result<(), DecodeError> {
    Err(de.error(
        DecodeErrorKind::Unsupported {
            shape: value.shape(),
        },
        0,
    ))
}
