use yuri_core::NullableDef;

use super::fill_one;
use crate::{Poke, ReflectError};

/// Lets you empty or fill an `Option`
#[derive(Debug)]
pub struct PokeNullable<'mem> {
    pub(crate) value: Poke<'mem>,
    pub(crate) def: NullableDef,
}

impl PokeNullable<'_> {
    /// Sets the option to `None`
    pub fn set_none(&mut self) {
        unsafe { (self.def.vtable.set_none)(self.value.data) }
    }

    /// Sets the option to `Some` of a default value `f` has written into.
    /// The option is left as it was if `f` fails.
    pub fn fill_some<E: From<ReflectError>>(
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
