use crate::{FieldInfo, FieldTable, Poke, ReflectError};

/// Lets you write into the fields of a composite, bases included
#[derive(Debug)]
pub struct PokeComposite<'mem> {
    pub(crate) value: Poke<'mem>,
    pub(crate) table: &'static FieldTable,
}

impl PokeComposite<'_> {
    /// The merged field table
    #[inline(always)]
    pub fn table(&self) -> &'static FieldTable {
        self.table
    }

    /// Borrows the field with the given name for writing
    pub fn field(&mut self, name: &str) -> Result<Poke<'_>, ReflectError> {
        let table = self.table;
        let info = table.get(name).ok_or_else(|| ReflectError::UnknownField {
            shape: self.value.shape,
            name: name.to_owned(),
        })?;
        Ok(self.at(info))
    }

    /// Borrows the sized field starting at `offset` for writing
    pub fn field_at_offset(&mut self, offset: usize) -> Result<Poke<'_>, ReflectError> {
        let table = self.table;
        let info = table.at_offset(offset).ok_or(ReflectError::UnknownOffset {
            shape: self.value.shape,
            offset,
        })?;
        Ok(self.at(info))
    }

    fn at(&mut self, info: &FieldInfo) -> Poke<'_> {
        unsafe { Poke::unchecked_new(self.value.data.field(info.offset), info.shape) }
    }
}
