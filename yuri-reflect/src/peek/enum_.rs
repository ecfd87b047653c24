use yuri_core::{EnumDef, EnumRepr, PtrConst, Variant};

use crate::Peek;

/// Lets you read the discriminant of a field-less enum
#[derive(Clone, Copy, Debug)]
pub struct PeekEnum<'mem> {
    pub(crate) value: Peek<'mem>,
    pub(crate) def: EnumDef,
}

impl PeekEnum<'_> {
    /// Variants and discriminant width
    #[inline(always)]
    pub fn def(&self) -> EnumDef {
        self.def
    }

    /// Reads the discriminant, widened to `i64`
    pub fn discriminant(&self) -> i64 {
        unsafe { read_discriminant(self.value.data, self.def.repr) }
    }

    /// The variant currently held
    pub fn variant(&self) -> Option<&'static Variant> {
        self.def.variant(self.discriminant())
    }
}

/// Reads an integer discriminant of the given representation.
///
/// # Safety
///
/// `data` must point to an enum with that representation.
unsafe fn read_discriminant(data: PtrConst<'_>, repr: EnumRepr) -> i64 {
    unsafe {
        match repr {
            EnumRepr::U8 => data.read::<u8>() as i64,
            EnumRepr::U16 => data.read::<u16>() as i64,
            EnumRepr::U32 => data.read::<u32>() as i64,
            EnumRepr::U64 => data.read::<u64>() as i64,
            EnumRepr::Usize => data.read::<usize>() as i64,
            EnumRepr::I8 => data.read::<i8>() as i64,
            EnumRepr::I16 => data.read::<i16>() as i64,
            EnumRepr::I32 => data.read::<i32>() as i64,
            EnumRepr::I64 => data.read::<i64>(),
            EnumRepr::Isize => data.read::<isize>() as i64,
        }
    }
}
