//! The codec registry: one encode/decode pair per type identity.
//!
//! Entries are created on first use by the entry points, eagerly with
//! [`register`], or replaced with [`register_codec`]. Lookups never build
//! anything; a type without an entry is an [`UnregisteredType`] error.
//!
//! [`UnregisteredType`]: crate::DecodeErrorKind::UnregisteredType

use core::fmt;
use std::collections::{HashMap, HashSet};
use std::sync::{LazyLock, PoisonError, RwLock};

use log::{debug, trace};
use yuri_core::{Def, Reflect, Shape, TypeIdentity, registrations};
use yuri_reflect::{Peek, Poke, SchemaError, field_table};

use crate::deserialize::decoder_for;
use crate::serialize::encoder_for;
use crate::{DecodeError, DecodeErrorKind, Decoder, EncodeError, Serializer, Span};

/// Writes a value to a serializer
pub type EncodeFn = for<'mem> fn(&mut dyn Serializer, Peek<'mem>) -> Result<(), EncodeError>;

/// Reads a value from a decoder into memory that already holds a valid value
pub type DecodeFn =
    for<'input, 'mem> fn(&mut Decoder<'input>, Poke<'mem>) -> Result<(), DecodeError>;

/// How one type is encoded and decoded
#[derive(Clone, Copy)]
pub struct Codec {
    /// Writes a value
    pub encode: EncodeFn,
    /// Reads a value
    pub decode: DecodeFn,
}

impl Codec {
    /// The built-in codec for a shape, chosen from its definition
    pub fn for_shape(shape: &'static Shape) -> Self {
        Self {
            encode: encoder_for(shape.def),
            decode: decoder_for(shape.def),
        }
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec").finish_non_exhaustive()
    }
}

static CODECS: LazyLock<RwLock<HashMap<TypeIdentity, Codec>>> = LazyLock::new(Default::default);

/// Returns the codec registered for an identity
pub fn lookup(id: TypeIdentity) -> Option<Codec> {
    CODECS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
        .copied()
}

/// Whether a codec is registered for `shape`
pub fn is_registered(shape: &'static Shape) -> bool {
    lookup(shape.id).is_some()
}

/// Registers the built-in codec for `T` and every type reachable from it
/// through fields, elements and pointees.
#[inline]
pub fn register<T: Reflect>() -> Result<(), SchemaError> {
    register_shape(T::SHAPE)
}

/// Registers the built-in codec for `shape` and every type reachable from it.
///
/// Types that already have an entry are left alone, custom codecs included,
/// and the walk does not descend into them. Nothing is published unless
/// every reachable composite has a valid field table.
pub fn register_shape(shape: &'static Shape) -> Result<(), SchemaError> {
    if is_registered(shape) {
        return Ok(());
    }

    let mut pending = vec![shape];
    let mut visited = HashSet::new();
    let mut found = Vec::new();
    while let Some(shape) = pending.pop() {
        if !visited.insert(shape.id) || is_registered(shape) {
            continue;
        }
        trace!("Found {shape} ({})", shape.def.kind_name());
        found.push(shape);
        push_children(shape, &mut pending)?;
    }

    let mut codecs = CODECS.write().unwrap_or_else(PoisonError::into_inner);
    for shape in &found {
        codecs
            .entry(shape.id)
            .or_insert_with(|| Codec::for_shape(shape));
    }
    debug!("Registered {} codec(s) reachable from {shape}", found.len());
    Ok(())
}

fn push_children(
    shape: &'static Shape,
    pending: &mut Vec<&'static Shape>,
) -> Result<(), SchemaError> {
    match shape.def {
        Def::Nullable(nd) => pending.push(nd.t()),
        Def::Pointer(pd) => pending.push(pd.t()),
        Def::List(ld) => pending.push(ld.t()),
        Def::Map(md) => pending.extend([md.k(), md.v()]),
        Def::Pair(pd) => pending.extend([pd.first(), pd.second()]),
        Def::Composite(_) => {
            pending.extend(field_table(shape)?.fields().iter().map(|info| info.shape));
        }
        _ => {}
    }
    Ok(())
}

/// Installs a codec for `T`, replacing whatever was registered before.
/// Types reachable from `T` are not registered.
pub fn register_codec<T: Reflect>(encode: EncodeFn, decode: DecodeFn) {
    debug!("Installing custom codec for {}", T::SHAPE);
    CODECS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(T::SHAPE.id, Codec { encode, decode });
}

/// Registers every type derived with `#[reflect(auto_register)]`, returning
/// how many were submitted.
pub fn auto_register() -> Result<usize, SchemaError> {
    let mut count = 0;
    for shape in registrations() {
        register_shape(shape)?;
        count += 1;
    }
    debug!("Auto-registered {count} type(s)");
    Ok(count)
}

/// Encodes `value` with the codec registered for its type
pub fn encode_by_identity(ser: &mut dyn Serializer, value: Peek<'_>) -> Result<(), EncodeError> {
    let shape = value.shape();
    let codec = lookup(shape.id).ok_or(EncodeError::UnregisteredType { shape })?;
    (codec.encode)(ser, value)
}

/// Decodes into `value` with the codec registered for its type. Errors that
/// don't carry a location get the range this value was being read from.
pub fn decode_by_identity(de: &mut Decoder<'_>, value: Poke<'_>) -> Result<(), DecodeError> {
    let shape = value.shape();
    let start = de.pos();
    let Some(codec) = lookup(shape.id) else {
        return Err(DecodeError::new(
            DecodeErrorKind::UnregisteredType { shape },
            Span::new(start, 0),
        ));
    };
    trace!("Decoding {shape} at byte {start}");
    (codec.decode)(de, value).map_err(|e| {
        let len = de.pos().saturating_sub(start);
        e.or_span(Span::new(start, len))
    })
}
