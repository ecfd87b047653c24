use yuri_core::MapDef;

use crate::Peek;

/// Lets you read from a map (implements read-only [`yuri_core::MapVTable`] proxies)
#[derive(Clone, Copy, Debug)]
pub struct PeekMap<'mem> {
    pub(crate) value: Peek<'mem>,
    pub(crate) def: MapDef,
}

impl<'mem> PeekMap<'mem> {
    /// Returns the map definition
    #[inline(always)]
    pub fn def(&self) -> MapDef {
        self.def
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        unsafe { (self.def.vtable.len)(self.value.data) }
    }

    /// Returns true if the map is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over `(key, value)` entries in map order
    pub fn iter(&self) -> impl Iterator<Item = (Peek<'mem>, Peek<'mem>)> + 'mem {
        let (k, v) = (self.def.k(), self.def.v());
        unsafe { (self.def.vtable.iter)(self.value.data) }.map(move |(key, value)| unsafe {
            (Peek::unchecked_new(key, k), Peek::unchecked_new(value, v))
        })
    }
}
