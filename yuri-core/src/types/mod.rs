//! Everything a codec needs to know about a type at runtime: its [`Shape`].

use core::alloc::Layout;
use core::fmt;
use core::mem::MaybeUninit;

use crate::{PtrMut, PtrUninit, Reflect, TypeIdentity};

mod def;
pub use def::*;

/// Schema for reflection of a type
#[derive(Clone, Copy)]
pub struct Shape {
    /// Unique type identifier
    pub id: TypeIdentity,

    /// Size and alignment of the type
    pub layout: Layout,

    /// Short type name without generic parameters, e.g. `Vec`
    pub type_identifier: &'static str,

    /// Operations every shape supports
    pub vtable: &'static ValueVTable,

    /// How the value is structured, which decides how it is encoded
    pub def: Def,
}

impl Shape {
    /// Starts building a shape for a sized type
    pub const fn builder_for_sized<T: 'static>() -> ShapeBuilder {
        ShapeBuilder {
            id: TypeIdentity::of::<T>(),
            layout: Layout::new::<T>(),
            type_identifier: None,
            vtable: None,
            def: None,
        }
    }

    /// Check if this shape is of the given type
    #[inline]
    pub fn is_type<T: 'static>(&self) -> bool {
        self.id == TypeIdentity::of::<T>()
    }

    /// Writes the full type name, generic parameters included
    #[inline]
    pub fn write_type_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.vtable.type_name)(f)
    }

    /// Returns true if values of this shape can be default-constructed
    #[inline]
    pub fn has_default(&self) -> bool {
        self.vtable.has_default
    }

    /// Returns the composite definition, if this is a composite
    #[inline]
    pub fn composite(&self) -> Option<CompositeDef> {
        match self.def {
            Def::Composite(def) => Some(def),
            _ => None,
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Shape {}

impl core::hash::Hash for Shape {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_type_name(f)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("type", &format_args!("{self}"))
            .field("size", &self.layout.size())
            .field("align", &self.layout.align())
            .field("def", &self.def.kind_name())
            .finish()
    }
}

/// Builder for [`Shape`]
pub struct ShapeBuilder {
    id: TypeIdentity,
    layout: Layout,
    type_identifier: Option<&'static str>,
    vtable: Option<&'static ValueVTable>,
    def: Option<Def>,
}

impl ShapeBuilder {
    /// Sets the short type name
    pub const fn type_identifier(mut self, type_identifier: &'static str) -> Self {
        self.type_identifier = Some(type_identifier);
        self
    }

    /// Sets the value vtable
    pub const fn vtable(mut self, vtable: &'static ValueVTable) -> Self {
        self.vtable = Some(vtable);
        self
    }

    /// Sets the structural definition
    pub const fn def(mut self, def: Def) -> Self {
        self.def = Some(def);
        self
    }

    /// Builds the shape
    pub const fn build(self) -> Shape {
        let Some(type_identifier) = self.type_identifier else {
            panic!("type_identifier is required");
        };
        let Some(vtable) = self.vtable else {
            panic!("vtable is required");
        };
        let Some(def) = self.def else {
            panic!("def is required");
        };
        Shape {
            id: self.id,
            layout: self.layout,
            type_identifier,
            vtable,
            def,
        }
    }
}

/// Writes the full type name of a shape
pub type TypeNameFn = fn(f: &mut fmt::Formatter<'_>) -> fmt::Result;

/// Writes a default value into uninitialized memory. Returns `None`, and
/// leaves the memory untouched, when the type has no default.
///
/// # Safety
///
/// `target` must be valid for writes of the shape's type and properly aligned.
pub type DefaultInPlaceFn = for<'mem> unsafe fn(target: PtrUninit<'mem>) -> Option<PtrMut<'mem>>;

/// Operations common to every shape
#[derive(Clone, Copy, Debug)]
pub struct ValueVTable {
    /// Writes the full type name
    pub type_name: TypeNameFn,

    /// Whether `default_in_place` produces a value
    pub has_default: bool,

    /// Default-constructs a value in place
    pub default_in_place: DefaultInPlaceFn,
}

impl ValueVTable {
    /// Starts building a vtable
    pub const fn builder() -> ValueVTableBuilder {
        ValueVTableBuilder {
            type_name: None,
            default_in_place: None,
        }
    }
}

/// Builder for [`ValueVTable`]
pub struct ValueVTableBuilder {
    type_name: Option<TypeNameFn>,
    default_in_place: Option<(bool, DefaultInPlaceFn)>,
}

impl ValueVTableBuilder {
    /// Sets the type name function
    pub const fn type_name(mut self, type_name: TypeNameFn) -> Self {
        self.type_name = Some(type_name);
        self
    }

    /// Sets the default-constructor
    pub const fn default_in_place(mut self, has_default: bool, f: DefaultInPlaceFn) -> Self {
        self.default_in_place = Some((has_default, f));
        self
    }

    /// Builds the vtable. Types without a default constructor get one that
    /// always returns `None`.
    pub const fn build(self) -> ValueVTable {
        let Some(type_name) = self.type_name else {
            panic!("type_name is required");
        };
        let (has_default, default_in_place) = match self.default_in_place {
            Some(pair) => pair,
            None => (false, no_default as DefaultInPlaceFn),
        };
        ValueVTable {
            type_name,
            has_default,
            default_in_place,
        }
    }
}

unsafe fn no_default(_target: PtrUninit<'_>) -> Option<PtrMut<'_>> {
    None
}

/// Builds a default `T` through its shape, or `None` if it has no default.
pub fn default_of<T: Reflect>() -> Option<T> {
    let mut slot = MaybeUninit::<T>::uninit();
    unsafe {
        (T::SHAPE.vtable.default_in_place)(PtrUninit::from_maybe_uninit(&mut slot))?;
        Some(slot.assume_init())
    }
}

/// Callback that finishes initializing a freshly defaulted value.
/// Returning `false` abandons the value.
pub type FillFn<'f> = &'f mut dyn FnMut(PtrMut<'_>) -> bool;

/// Default-constructs a `T`, lets `fill` write into it, and returns it.
pub fn build_with<T: Reflect>(fill: FillFn<'_>) -> Result<T, FillError> {
    let mut value = default_of::<T>().ok_or(FillError::NoDefault { shape: T::SHAPE })?;
    if fill(PtrMut::new(&raw mut value)) {
        Ok(value)
    } else {
        Err(FillError::Aborted)
    }
}

/// Why a container could not accept a new value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillError {
    /// The element type cannot be default-constructed, so there is nothing to fill
    NoDefault {
        /// Shape of the element type
        shape: &'static Shape,
    },
    /// The fill callback returned `false`
    Aborted,
}

impl fmt::Display for FillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillError::NoDefault { shape } => write!(f, "{shape} has no default value"),
            FillError::Aborted => write!(f, "value construction aborted"),
        }
    }
}

impl core::error::Error for FillError {}
