use yuri_core::{PointerDef, PointerKind};

use crate::Peek;

/// Lets you read through an owning pointer
#[derive(Clone, Copy, Debug)]
pub struct PeekPointer<'mem> {
    pub(crate) value: Peek<'mem>,
    pub(crate) def: PointerDef,
}

impl<'mem> PeekPointer<'mem> {
    /// Which kind of pointer this is
    #[inline(always)]
    pub fn kind(&self) -> PointerKind {
        self.def.kind
    }

    /// Borrows the pointee
    pub fn inner(&self) -> Peek<'mem> {
        unsafe {
            Peek::unchecked_new(
                (self.def.vtable.borrow_inner)(self.value.data),
                self.def.t(),
            )
        }
    }
}
