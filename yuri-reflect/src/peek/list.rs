use core::fmt;

use yuri_core::ListDef;

use crate::Peek;

/// Read access to a sequence: `Vec`, `VecDeque` or a set
#[derive(Clone, Copy)]
pub struct PeekList<'mem> {
    pub(crate) value: Peek<'mem>,
    pub(crate) def: ListDef,
}

impl fmt::Debug for PeekList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeekList").finish_non_exhaustive()
    }
}

impl<'mem> PeekList<'mem> {
    /// Element type and vtable
    #[inline]
    pub fn def(&self) -> ListDef {
        self.def
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        unsafe { (self.def.vtable.len)(self.value.data) }
    }

    /// `true` for an empty container
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element views, in the container's own iteration order
    pub fn iter(&self) -> impl Iterator<Item = Peek<'mem>> + 'mem {
        let elem = self.def.t();
        unsafe { (self.def.vtable.iter)(self.value.data) }
            .map(move |item| unsafe { Peek::unchecked_new(item, elem) })
    }
}
