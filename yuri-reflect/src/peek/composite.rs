use core::fmt;

use crate::{FieldInfo, FieldTable, Peek, ReflectError};

/// Lets you read the fields of a composite, bases included
#[derive(Clone, Copy)]
pub struct PeekComposite<'mem> {
    pub(crate) value: Peek<'mem>,
    pub(crate) table: &'static FieldTable,
}

impl fmt::Debug for PeekComposite<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeekComposite")
            .field("shape", &self.value.shape)
            .field("fields", &self.table.len())
            .finish_non_exhaustive()
    }
}

impl<'mem> PeekComposite<'mem> {
    /// The merged field table
    #[inline(always)]
    pub fn table(&self) -> &'static FieldTable {
        self.table
    }

    /// Number of fields, bases included
    #[inline(always)]
    pub fn field_count(&self) -> usize {
        self.table.len()
    }

    /// Gets the value of the field with the given name
    pub fn field(&self, name: &str) -> Result<Peek<'mem>, ReflectError> {
        let info = self
            .table
            .get(name)
            .ok_or_else(|| ReflectError::UnknownField {
                shape: self.value.shape,
                name: name.to_owned(),
            })?;
        Ok(self.at(info))
    }

    /// Gets the value of the sized field starting at `offset`
    pub fn field_at_offset(&self, offset: usize) -> Result<Peek<'mem>, ReflectError> {
        let info = self
            .table
            .at_offset(offset)
            .ok_or(ReflectError::UnknownOffset {
                shape: self.value.shape,
                offset,
            })?;
        Ok(self.at(info))
    }

    /// Iterates over all fields in table order, with their values
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldInfo, Peek<'mem>)> + '_ {
        self.table.fields().iter().map(|info| (info, self.at(info)))
    }

    fn at(&self, info: &FieldInfo) -> Peek<'mem> {
        unsafe { Peek::unchecked_new(self.value.data.field(info.offset), info.shape) }
    }
}
