use yuri_core::NullableDef;

use crate::Peek;

/// Lets you read from an `Option`
#[derive(Clone, Copy, Debug)]
pub struct PeekNullable<'mem> {
    pub(crate) value: Peek<'mem>,
    pub(crate) def: NullableDef,
}

impl<'mem> PeekNullable<'mem> {
    /// Returns the nullable definition
    #[inline(always)]
    pub fn def(&self) -> NullableDef {
        self.def
    }

    /// Returns whether the option is None
    #[inline]
    pub fn is_none(&self) -> bool {
        self.value().is_none()
    }

    /// Returns the inner value, if there is one
    pub fn value(&self) -> Option<Peek<'mem>> {
        unsafe {
            (self.def.vtable.get_value)(self.value.data)
                .map(|inner| Peek::unchecked_new(inner, self.def.t()))
        }
    }
}
