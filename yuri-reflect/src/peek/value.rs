use core::fmt;

use yuri_core::{Def, PtrConst, Reflect, ScalarKind, Shape, TypeIdentity};

use super::{PeekComposite, PeekEnum, PeekList, PeekMap, PeekNullable, PeekPair, PeekPointer};
use crate::{ReflectError, field_table};

/// Lets you read from a value through its shape
#[derive(Clone, Copy)]
pub struct Peek<'mem> {
    pub(crate) data: PtrConst<'mem>,
    pub(crate) shape: &'static Shape,
}

impl<'mem> Peek<'mem> {
    /// Creates a peek for a value of type `T`
    pub fn new<T: Reflect>(t: &'mem T) -> Self {
        Self {
            data: PtrConst::new(t as *const T),
            shape: T::SHAPE,
        }
    }

    /// Creates a peek without checking the type.
    ///
    /// # Safety
    ///
    /// `data` must point to an initialized value of the type `shape` describes.
    pub unsafe fn unchecked_new(data: PtrConst<'mem>, shape: &'static Shape) -> Self {
        Self { data, shape }
    }

    /// Shape the view was created with
    #[inline(always)]
    pub const fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Type-erased address of the value
    #[inline(always)]
    pub const fn data(&self) -> PtrConst<'mem> {
        self.data
    }

    /// Returns the scalar kind, if this is a scalar
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self.shape.def {
            Def::Scalar(sd) => Some(sd.kind),
            _ => None,
        }
    }

    /// Borrows the value as a `T`, if that is what it is
    pub fn get<T: 'static>(&self) -> Result<&'mem T, ReflectError> {
        if self.shape.id == TypeIdentity::of::<T>() {
            Ok(unsafe { self.data.get::<T>() })
        } else {
            Err(ReflectError::WrongShape {
                expected: core::any::type_name::<T>(),
                actual: self.shape,
            })
        }
    }

    /// Tries to identify this value as a composite, building its field
    /// table if needed
    pub fn into_composite(self) -> Result<PeekComposite<'mem>, ReflectError> {
        if !matches!(self.shape.def, Def::Composite(_)) {
            return Err(self.was_not_a("composite"));
        }
        let table = field_table(self.shape)?;
        Ok(PeekComposite { value: self, table })
    }

    /// List view, if the shape is a list
    pub fn into_list(self) -> Result<PeekList<'mem>, ReflectError> {
        match self.shape.def {
            Def::List(def) => Ok(PeekList { value: self, def }),
            _ => Err(self.was_not_a("list")),
        }
    }

    /// Map view, if the shape is a map
    pub fn into_map(self) -> Result<PeekMap<'mem>, ReflectError> {
        match self.shape.def {
            Def::Map(def) => Ok(PeekMap { value: self, def }),
            _ => Err(self.was_not_a("map")),
        }
    }

    /// Tries to identify this value as a nullable
    pub fn into_nullable(self) -> Result<PeekNullable<'mem>, ReflectError> {
        match self.shape.def {
            Def::Nullable(def) => Ok(PeekNullable { value: self, def }),
            _ => Err(self.was_not_a("nullable")),
        }
    }

    /// Tries to identify this value as an owning pointer
    pub fn into_pointer(self) -> Result<PeekPointer<'mem>, ReflectError> {
        match self.shape.def {
            Def::Pointer(def) => Ok(PeekPointer { value: self, def }),
            _ => Err(self.was_not_a("pointer")),
        }
    }

    /// Tries to identify this value as a pair
    pub fn into_pair(self) -> Result<PeekPair<'mem>, ReflectError> {
        match self.shape.def {
            Def::Pair(def) => Ok(PeekPair { value: self, def }),
            _ => Err(self.was_not_a("pair")),
        }
    }

    /// Enum view, if the shape is a fieldless enum
    pub fn into_enum(self) -> Result<PeekEnum<'mem>, ReflectError> {
        match self.shape.def {
            Def::Enum(def) => Ok(PeekEnum { value: self, def }),
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

impl fmt::Debug for Peek<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Peek<{}>@{:p}", self.shape, self.data.as_byte_ptr())
    }
}
