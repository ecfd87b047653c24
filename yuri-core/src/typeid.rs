//! Type identity tokens
//!
//! [`core::any::TypeId::of`] is not a `const fn`, but a pointer to it is a
//! perfectly good constant. [`TypeIdentity`] stores that pointer and resolves
//! it on comparison, so shapes can carry their identity in const context.

use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

/// A process-wide token identifying one Rust type.
///
/// Two identities are equal if and only if they were created for the same
/// type. Rust has no `const`/`volatile` qualifiers on types, so a type and
/// the place it is read through (`&T`, `&mut T`) always share one identity.
#[derive(Clone, Copy)]
pub struct TypeIdentity {
    type_id_fn: fn() -> TypeId,
}

impl TypeIdentity {
    /// The identity of `T`
    #[inline]
    pub const fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id_fn: TypeId::of::<T>,
        }
    }

    /// The underlying [`TypeId`]
    #[inline]
    pub fn get(self) -> TypeId {
        (self.type_id_fn)()
    }
}

/// Returns the identity of `T`. Works for any `'static` type, reflectable or not.
#[inline]
pub const fn identity_of<T: ?Sized + 'static>() -> TypeIdentity {
    TypeIdentity::of::<T>()
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get().hash(state);
    }
}

impl PartialEq<TypeId> for TypeIdentity {
    fn eq(&self, other: &TypeId) -> bool {
        self.get() == *other
    }
}

impl fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.get())
    }
}
