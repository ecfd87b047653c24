use yuri_core::MapDef;

use super::fill_two;
use crate::{Poke, ReflectError};

/// Lets you clear and fill a map
#[derive(Debug)]
pub struct PokeMap<'mem> {
    pub(crate) value: Poke<'mem>,
    pub(crate) def: MapDef,
}

impl PokeMap<'_> {
    /// Returns the map definition
    #[inline(always)]
    pub fn def(&self) -> MapDef {
        self.def
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        unsafe { (self.def.vtable.clear)(self.value.data) }
    }

    /// Inserts an entry once `f` has written the default key and value.
    /// An existing entry with an equal key is replaced.
    pub fn insert_with<E: From<ReflectError>>(
        &mut self,
        f: impl FnOnce(Poke<'_>, Poke<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        let data = self.value.data;
        let insert = self.def.vtable.insert_with;
        fill_two(
            self.value.shape,
            (self.def.k(), self.def.v()),
            |erased| unsafe { insert(data, erased) },
            f,
        )
    }
}
