use yuri_core::PairDef;

use crate::Poke;

/// Lets you write either half of a pair
#[derive(Debug)]
pub struct PokePair<'mem> {
    pub(crate) value: Poke<'mem>,
    pub(crate) def: PairDef,
}

impl PokePair<'_> {
    /// Borrows the first element for writing
    pub fn first(&mut self) -> Poke<'_> {
        unsafe {
            Poke::unchecked_new(self.value.data.field(self.def.first_offset), self.def.first())
        }
    }

    /// Borrows the second element for writing
    pub fn second(&mut self) -> Poke<'_> {
        unsafe {
            Poke::unchecked_new(
                self.value.data.field(self.def.second_offset),
                self.def.second(),
            )
        }
    }

    /// Borrows both elements for writing at once
    pub fn halves(&mut self) -> (Poke<'_>, Poke<'_>) {
        let data = self.value.data;
        unsafe {
            (
                Poke::unchecked_new(data.field(self.def.first_offset), self.def.first()),
                Poke::unchecked_new(data.field(self.def.second_offset), self.def.second()),
            )
        }
    }
}
