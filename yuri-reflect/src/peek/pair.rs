use yuri_core::PairDef;

use crate::Peek;

/// Lets you read both halves of a pair
#[derive(Clone, Copy, Debug)]
pub struct PeekPair<'mem> {
    pub(crate) value: Peek<'mem>,
    pub(crate) def: PairDef,
}

impl<'mem> PeekPair<'mem> {
    /// The first element
    pub fn first(&self) -> Peek<'mem> {
        unsafe {
            Peek::unchecked_new(self.value.data.field(self.def.first_offset), self.def.first())
        }
    }

    /// The second element
    pub fn second(&self) -> Peek<'mem> {
        unsafe {
            Peek::unchecked_new(
                self.value.data.field(self.def.second_offset),
                self.def.second(),
            )
        }
    }
}
