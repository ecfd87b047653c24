use core::fmt;

use yuri_core::{Def, PtrMut, Reflect, ScalarKind, Shape, TypeIdentity};

use super::{PokeComposite, PokeEnum, PokeList, PokeMap, PokeNullable, PokePair, PokePointer};
use crate::{Peek, ReflectError, field_table};

/// Lets you write into a value through its shape
pub struct Poke<'mem> {
    pub(crate) data: PtrMut<'mem>,
    pub(crate) shape: &'static Shape,
}

impl<'mem> Poke<'mem> {
    /// Creates a poke for a value of type `T`
    pub fn new<T: Reflect>(t: &'mem mut T) -> Self {
        Self {
            data: PtrMut::new(t as *mut T),
            shape: T::SHAPE,
        }
    }

    /// Creates a poke without checking the type.
    ///
    /// # Safety
    ///
    /// `data` must point to an initialized value of the type `shape`
    /// describes, and nothing else may access it while the poke is alive.
    pub unsafe fn unchecked_new(data: PtrMut<'mem>, shape: &'static Shape) -> Self {
        Self { data, shape }
    }

    /// Returns the shape
    #[inline(always)]
    pub const fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Returns the scalar kind, if this is a scalar
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self.shape.def {
            Def::Scalar(sd) => Some(sd.kind),
            _ => None,
        }
    }

    /// Reborrows this poke for a shorter lifetime
    pub fn reborrow(&mut self) -> Poke<'_> {
        Poke {
            data: self.data,
            shape: self.shape,
        }
    }

    /// Reads the current value
    pub fn as_peek(&self) -> Peek<'_> {
        unsafe { Peek::unchecked_new(self.data.as_const(), self.shape) }
    }

    /// Replaces the value with `value`, dropping the old one
    pub fn set<T: 'static>(&mut self, value: T) -> Result<(), ReflectError> {
        self.get_mut::<T>().map(|slot| *slot = value)
    }

    /// Mutably borrows the value as a `T`, if that is what it is
    pub fn get_mut<T: 'static>(&mut self) -> Result<&mut T, ReflectError> {
        if self.shape.id == TypeIdentity::of::<T>() {
            Ok(unsafe { self.data.as_mut::<T>() })
        } else {
            Err(ReflectError::WrongShape {
                expected: core::any::type_name::<T>(),
                actual: self.shape,
            })
        }
    }

    /// Tries to identify this value as a composite, building its field
    /// table if needed
    pub fn into_composite(self) -> Result<PokeComposite<'mem>, ReflectError> {
        if !matches!(self.shape.def, Def::Composite(_)) {
            return Err(self.was_not_a("composite"));
        }
        let table = field_table(self.shape)?;
        Ok(PokeComposite { value: self, table })
    }

    /// Tries to identify this value as a list
    pub fn into_list(self) -> Result<PokeList<'mem>, ReflectError> {
        match self.shape.def {
            Def::List(def) => Ok(PokeList { value: self, def }),
            _ => Err(self.was_not_a("list")),
        }
    }

    /// Tries to identify this value as a map
    pub fn into_map(self) -> Result<PokeMap<'mem>, ReflectError> {
        match self.shape.def {
            Def::Map(def) => Ok(PokeMap { value: self, def }),
            _ => Err(self.was_not_a("map")),
        }
    }

    /// Tries to identify this value as a nullable
    pub fn into_nullable(self) -> Result<PokeNullable<'mem>, ReflectError> {
        match self.shape.def {
            Def::Nullable(def) => Ok(PokeNullable { value: self, def }),
            _ => Err(self.was_not_a("nullable")),
        }
    }

    /// Tries to identify this value as an owning pointer
    pub fn into_pointer(self) -> Result<PokePointer<'mem>, ReflectError> {
        match self.shape.def {
            Def::Pointer(def) => Ok(PokePointer { value: self, def }),
            _ => Err(self.was_not_a("pointer")),
        }
    }

    /// Tries to identify this value as a pair
    pub fn into_pair(self) -> Result<PokePair<'mem>, ReflectError> {
        match self.shape.def {
            Def::Pair(def) => Ok(PokePair { value: self, def }),
            _ => Err(self.was_not_a("pair")),
        }
    }

    /// Tries to identify this value as an enum
    pub fn into_enum(self) -> Result<PokeEnum<'mem>, ReflectError> {
        match self.shape.def {
            Def::Enum(def) => Ok(PokeEnum { value: self, def }),
            _ => Err(self.was_not_a("enum")),
        }
    }

    fn was_not_a(&self, expected: &'static str) -> ReflectError {
        ReflectError::WasNotA {
            expected,
            actual: self.shape,
        }
    }
}

impl fmt::Debug for Poke<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Poke<{}>@{:p}", self.shape, self.data.as_byte_ptr())
    }
}
