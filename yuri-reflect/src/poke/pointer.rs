use yuri_core::{PointerDef, PointerKind};

use super::fill_one;
use crate::{Poke, ReflectError};

/// Lets you point an owning pointer at a new value
#[derive(Debug)]
pub struct PokePointer<'mem> {
    pub(crate) value: Poke<'mem>,
    pub(crate) def: PointerDef,
}

impl PokePointer<'_> {
    /// Which kind of pointer this is
    #[inline(always)]
    pub fn kind(&self) -> PointerKind {
        self.def.kind
    }

    /// Allocates a default pointee, lets `f` write into it, then points at
    /// it. Other owners of a shared pointer keep the old value.
    pub fn fill<E: From<ReflectError>>(
        &mut self,
        f: impl FnOnce(Poke<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        let data = self.value.data;
        let replace = self.def.vtable.replace_with;
        fill_one(
            self.value.shape,
            self.def.t(),
            |erased| unsafe { replace(data, erased) },
            f,
        )
    }
}
