use core::any::type_name;

use yuri_core::{PtrConst, PtrMut, Reflect, TypeIdentity};

use crate::{FieldInfo, ReflectError, field_table};

/// Get and set fields of a composite by name or offset, with the requested
/// type checked against the field table at runtime.
///
/// Implemented for every [`Reflect`] type; calling it on anything other
/// than a composite yields [`ReflectError::WasNotA`].
///
/// ```
/// use yuri::{FieldAccess, Reflect};
///
/// #[derive(Reflect, Default)]
/// struct Config {
///     retries: u32,
///     name: String,
/// }
///
/// let mut config = Config::default();
/// config.set_field("retries", 3u32).unwrap();
/// assert_eq!(*config.get_field::<u32>("retries").unwrap(), 3);
/// assert!(config.get_field::<String>("retries").is_err());
/// ```
pub trait FieldAccess: Reflect + Sized {
    /// Borrows the named field as a `T`
    fn get_field<T: 'static>(&self, name: &str) -> Result<&T, ReflectError> {
        let info = lookup_named::<Self, T>(name)?;
        Ok(unsafe { PtrConst::new(self as *const Self).field(info.offset).get::<T>() })
    }

    /// Mutably borrows the named field as a `T`
    fn get_field_mut<T: 'static>(&mut self, name: &str) -> Result<&mut T, ReflectError> {
        let info = lookup_named::<Self, T>(name)?;
        Ok(unsafe { PtrMut::new(self as *mut Self).field(info.offset).as_mut::<T>() })
    }

    /// Replaces the named field with `value`
    fn set_field<T: 'static>(&mut self, name: &str, value: T) -> Result<(), ReflectError> {
        *self.get_field_mut::<T>(name)? = value;
        Ok(())
    }

    /// Borrows the field starting at `offset` as a `T`
    fn field_by_offset<T: 'static>(&self, offset: usize) -> Result<&T, ReflectError> {
        let shape = Self::SHAPE;
        let table = table_of::<Self>()?;
        let info = table
            .at_offset(offset)
            .ok_or(ReflectError::UnknownOffset { shape, offset })?;
        if info.ty != TypeIdentity::of::<T>() {
            return Err(ReflectError::BadOffsetAccess {
                shape,
                offset,
                field_shape: info.shape,
                requested: type_name::<T>(),
            });
        }
        Ok(unsafe { PtrConst::new(self as *const Self).field(offset).get::<T>() })
    }

    /// Returns true if the composite has a field with this name
    fn has_field(&self, name: &str) -> bool {
        table_of::<Self>().is_ok_and(|table| table.contains(name))
    }

    /// Returns true if the named field holds a `T`
    fn field_is<T: 'static>(&self, name: &str) -> Result<bool, ReflectError> {
        let info = lookup::<Self>(name)?;
        Ok(info.ty == TypeIdentity::of::<T>())
    }
}

impl<S: Reflect> FieldAccess for S {}

fn table_of<S: Reflect>() -> Result<&'static crate::FieldTable, ReflectError> {
    if S::SHAPE.composite().is_none() {
        return Err(ReflectError::WasNotA {
            expected: "composite",
            actual: S::SHAPE,
        });
    }
    Ok(field_table(S::SHAPE)?)
}

fn lookup<S: Reflect>(name: &str) -> Result<&'static FieldInfo, ReflectError> {
    table_of::<S>()?
        .get(name)
        .ok_or_else(|| ReflectError::UnknownField {
            shape: S::SHAPE,
            name: name.to_owned(),
        })
}

fn lookup_named<S: Reflect, T: 'static>(name: &str) -> Result<&'static FieldInfo, ReflectError> {
    let info = lookup::<S>(name)?;
    if info.ty != TypeIdentity::of::<T>() {
        return Err(ReflectError::BadFieldAccess {
            shape: S::SHAPE,
            name: info.name,
            field_shape: info.shape,
            requested: type_name::<T>(),
        });
    }
    Ok(info)
}
