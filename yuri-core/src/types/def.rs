use crate::{PtrConst, PtrMut, Shape};

use super::FillError;

/// Returns the shape of a child type. Kept behind a function pointer so
/// that recursive types (`Node { next: Option<Box<Node>> }`) don't form
/// cycles between constants.
pub type ShapeFn = fn() -> &'static Shape;

/// The structural category of a type. Decided once, when the shape is
/// built, and never re-detected while encoding or decoding.
///
/// Variants are listed in the order codecs match them.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub enum Def {
    /// Strings, booleans, characters and numbers
    Scalar(ScalarDef),

    /// `Option<T>`: `null` when empty
    Nullable(NullableDef),

    /// `Box<T>`, `Rc<T>`, `Arc<T>`: transparent owning pointers
    Pointer(PointerDef),

    /// Field-less enums, encoded as their discriminant
    Enum(EnumDef),

    /// Structs with named fields and optional bases
    Composite(CompositeDef),

    /// `Vec<T>` and friends
    List(ListDef),

    /// `HashMap<K, V>`, `BTreeMap<K, V>`: a list of key/value pairs
    Map(MapDef),

    /// `(A, B)`
    Pair(PairDef),
}

impl Def {
    /// A short name for the category, for diagnostics
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Def::Scalar(_) => "scalar",
            Def::Nullable(_) => "nullable",
            Def::Pointer(_) => "pointer",
            Def::Enum(_) => "enum",
            Def::Composite(_) => "composite",
            Def::List(_) => "list",
            Def::Map(_) => "map",
            Def::Pair(_) => "pair",
        }
    }
}

/// Definition for scalar types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScalarDef {
    /// Which scalar this is
    pub kind: ScalarKind,
}

/// Every scalar type the codecs know how to read and write
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ScalarKind {
    /// `String`
    String,
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    Usize,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Isize,
    /// `f32`
    F32,
    /// `f64`
    F64,
}

/// Definition for `Option<T>`
#[derive(Clone, Copy, Debug)]
pub struct NullableDef {
    /// Shape of the inner type
    pub t: ShapeFn,
    /// Type-erased operations
    pub vtable: &'static NullableVTable,
}

impl NullableDef {
    /// Shape of the inner type
    #[inline]
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Replaces the value behind `this` with a new, default-constructed inner
/// value once `fill` has written into it. Leaves `this` untouched on error.
///
/// # Safety
///
/// `this` must point to an initialized value of the shape this vtable belongs to.
pub type ReplaceWithFn = for<'mem> unsafe fn(
    this: PtrMut<'mem>,
    fill: &mut dyn FnMut(PtrMut<'_>) -> bool,
) -> Result<(), FillError>;

/// Type-erased operations on `Option<T>`
#[derive(Clone, Copy, Debug)]
pub struct NullableVTable {
    /// Returns a pointer to the inner value, if there is one
    pub get_value: for<'mem> unsafe fn(this: PtrConst<'mem>) -> Option<PtrConst<'mem>>,
    /// Empties the option, dropping any inner value
    pub set_none: for<'mem> unsafe fn(this: PtrMut<'mem>),
    /// Sets the option to `Some` of a freshly filled value
    pub replace_with: ReplaceWithFn,
}

/// Which kind of owning pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// `Box<T>`, single owner
    Box,
    /// `Rc<T>`, shared owner
    Rc,
    /// `Arc<T>`, shared owner, thread-safe
    Arc,
}

/// Definition for owning pointers
#[derive(Clone, Copy, Debug)]
pub struct PointerDef {
    /// Shape of the pointee
    pub t: ShapeFn,
    /// Kind of pointer
    pub kind: PointerKind,
    /// Type-erased operations
    pub vtable: &'static PointerVTable,
}

impl PointerDef {
    /// Shape of the pointee
    #[inline]
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Type-erased operations on owning pointers
#[derive(Clone, Copy, Debug)]
pub struct PointerVTable {
    /// Borrows the pointee
    pub borrow_inner: for<'mem> unsafe fn(this: PtrConst<'mem>) -> PtrConst<'mem>,
    /// Points `this` at a new allocation holding a freshly filled value
    pub replace_with: ReplaceWithFn,
}

/// Integer representation of a field-less enum
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum EnumRepr {
    U8,
    U16,
    U32,
    U64,
    Usize,
    I8,
    I16,
    I32,
    I64,
    Isize,
}

/// A named enum variant and its discriminant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Variant {
    /// Variant name
    pub name: &'static str,
    /// Discriminant value
    pub discriminant: i64,
}

/// Definition for field-less enums
#[derive(Clone, Copy, Debug)]
pub struct EnumDef {
    /// Integer representation
    pub repr: EnumRepr,
    /// All variants, in declaration order
    pub variants: &'static [Variant],
}

impl EnumDef {
    /// Looks up a variant by discriminant
    pub fn variant(&self, discriminant: i64) -> Option<&'static Variant> {
        self.variants.iter().find(|v| v.discriminant == discriminant)
    }
}

/// A directly-declared field of a composite
#[derive(Clone, Copy, Debug)]
pub struct Field {
    /// Name the field is encoded under
    pub name: &'static str,
    /// Shape of the field's type
    pub shape: ShapeFn,
    /// Byte offset from the start of the composite
    pub offset: usize,
}

impl Field {
    /// Describes a field
    pub const fn new(name: &'static str, shape: ShapeFn, offset: usize) -> Self {
        Self {
            name,
            shape,
            offset,
        }
    }

    /// Shape of the field's type
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }
}

/// A base a composite is built on: another composite embedded at `offset`
/// whose fields are merged into the derived composite's field table.
#[derive(Clone, Copy, Debug)]
pub struct Base {
    /// Shape of the base composite
    pub shape: ShapeFn,
    /// Where the base was actually laid out within the derived composite
    pub offset: usize,
}

impl Base {
    /// Describes a base
    pub const fn new(shape: ShapeFn, offset: usize) -> Self {
        Self { shape, offset }
    }

    /// Shape of the base composite
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }
}

/// Definition for composites
#[derive(Clone, Copy, Debug)]
pub struct CompositeDef {
    /// Bases, in declaration order
    pub bases: &'static [Base],
    /// Fields declared on the composite itself, in declaration order
    pub fields: &'static [Field],
}

/// Definition for list-like containers
#[derive(Clone, Copy, Debug)]
pub struct ListDef {
    /// Shape of the element type
    pub t: ShapeFn,
    /// Type-erased operations
    pub vtable: &'static ListVTable,
}

impl ListDef {
    /// Shape of the element type
    #[inline]
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Type-erased operations on list-like containers
#[derive(Clone, Copy, Debug)]
pub struct ListVTable {
    /// Number of elements
    pub len: for<'mem> unsafe fn(this: PtrConst<'mem>) -> usize,
    /// Iterates over the elements in container order
    pub iter: for<'mem> unsafe fn(
        this: PtrConst<'mem>,
    ) -> Box<dyn Iterator<Item = PtrConst<'mem>> + 'mem>,
    /// Removes every element
    pub clear: for<'mem> unsafe fn(this: PtrMut<'mem>),
    /// Appends (or inserts, for sets) a freshly filled element
    pub push_with: ReplaceWithFn,
}

/// Definition for maps
#[derive(Clone, Copy, Debug)]
pub struct MapDef {
    /// Shape of the key type
    pub k: ShapeFn,
    /// Shape of the value type
    pub v: ShapeFn,
    /// Type-erased operations
    pub vtable: &'static MapVTable,
}

impl MapDef {
    /// Shape of the key type
    #[inline]
    pub fn k(&self) -> &'static Shape {
        (self.k)()
    }

    /// Shape of the value type
    #[inline]
    pub fn v(&self) -> &'static Shape {
        (self.v)()
    }
}

/// Type-erased operations on maps
#[derive(Clone, Copy, Debug)]
pub struct MapVTable {
    /// Number of entries
    pub len: for<'mem> unsafe fn(this: PtrConst<'mem>) -> usize,
    /// Iterates over `(key, value)` entries in map order
    pub iter: for<'mem> unsafe fn(
        this: PtrConst<'mem>,
    ) -> Box<dyn Iterator<Item = (PtrConst<'mem>, PtrConst<'mem>)> + 'mem>,
    /// Removes every entry
    pub clear: for<'mem> unsafe fn(this: PtrMut<'mem>),
    /// Inserts a freshly filled entry, replacing any entry with an equal key
    pub insert_with: for<'mem> unsafe fn(
        this: PtrMut<'mem>,
        fill: &mut dyn FnMut(PtrMut<'_>, PtrMut<'_>) -> bool,
    ) -> Result<(), FillError>,
}

/// Definition for pairs
#[derive(Clone, Copy, Debug)]
pub struct PairDef {
    /// Shape of the first element
    pub first: ShapeFn,
    /// Shape of the second element
    pub second: ShapeFn,
    /// Byte offset of the first element
    pub first_offset: usize,
    /// Byte offset of the second element
    pub second_offset: usize,
}

impl PairDef {
    /// Shape of the first element
    #[inline]
    pub fn first(&self) -> &'static Shape {
        (self.first)()
    }

    /// Shape of the second element
    #[inline]
    pub fn second(&self) -> &'static Shape {
        (self.second)()
    }
}
