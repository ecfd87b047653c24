use yuri_core::{EnumDef, EnumRepr};

use crate::{Poke, ReflectError};

/// Lets you change which variant a field-less enum holds
#[derive(Debug)]
pub struct PokeEnum<'mem> {
    pub(crate) value: Poke<'mem>,
    pub(crate) def: EnumDef,
}

impl PokeEnum<'_> {
    /// Returns the enum definition
    #[inline(always)]
    pub fn def(&self) -> EnumDef {
        self.def
    }

    /// Switches to the variant with this discriminant. Discriminants no
    /// variant declares are rejected, leaving the value untouched.
    pub fn set_discriminant(&mut self, discriminant: i64) -> Result<(), ReflectError> {
        if self.def.variant(discriminant).is_none() {
            return Err(ReflectError::NoSuchVariant {
                shape: self.value.shape,
                discriminant,
            });
        }

        // the check above guarantees the value fits the repr
        let data = self.value.data;
        unsafe {
            match self.def.repr {
                EnumRepr::U8 => *data.as_mut::<u8>() = discriminant as u8,
                EnumRepr::U16 => *data.as_mut::<u16>() = discriminant as u16,
                EnumRepr::U32 => *data.as_mut::<u32>() = discriminant as u32,
                EnumRepr::U64 => *data.as_mut::<u64>() = discriminant as u64,
                EnumRepr::Usize => *data.as_mut::<usize>() = discriminant as usize,
                EnumRepr::I8 => *data.as_mut::<i8>() = discriminant as i8,
                EnumRepr::I16 => *data.as_mut::<i16>() = discriminant as i16,
                EnumRepr::I32 => *data.as_mut::<i32>() = discriminant as i32,
                EnumRepr::I64 => *data.as_mut::<i64>() = discriminant,
                EnumRepr::Isize => *data.as_mut::<isize>() = discriminant as isize,
            }
        }
        Ok(())
    }
}
