use yuri_core::ListDef;

use super::fill_one;
use crate::{Poke, ReflectError};

/// Lets you clear and grow a list
#[derive(Debug)]
pub struct PokeList<'mem> {
    pub(crate) value: Poke<'mem>,
    pub(crate) def: ListDef,
}

impl PokeList<'_> {
    /// Returns the list definition
    #[inline(always)]
    pub fn def(&self) -> ListDef {
        self.def
    }

    /// Removes every element
    pub fn clear(&mut self) {
        unsafe { (self.def.vtable.clear)(self.value.data) }
    }

    /// Appends a default element after `f` has written into it. Nothing is
    /// appended if `f` fails.
    pub fn push_with<E: From<ReflectError>>(
        &mut self,
        f: impl FnOnce(Poke<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        let data = self.value.data;
        let push = self.def.vtable.push_with;
        fill_one(
            self.value.shape,
            self.def.t(),
            |erased| unsafe { push(data, erased) },
            f,
        )
    }
}
