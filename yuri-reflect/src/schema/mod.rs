//! Field tables: the flattened schema of a composite.

use std::collections::HashMap;

use yuri_core::{Shape, TypeIdentity};

use crate::SchemaError;

mod merge;

mod registry;
pub use registry::*;

/// One entry of a [`FieldTable`]
#[derive(Clone, Copy, Debug)]
pub struct FieldInfo {
    /// Name the field is encoded and looked up under
    pub name: &'static str,
    /// Identity of the field's type
    pub ty: TypeIdentity,
    /// Byte offset from the start of the composite the table belongs to
    pub offset: usize,
    /// Shape of the field's type
    pub shape: &'static Shape,
}

/// The ordered fields of a composite, bases first, plus lookup indexes.
///
/// The ordered list is the only source of truth; the name and offset
/// indexes hold positions into it.
#[derive(Debug)]
pub struct FieldTable {
    shape: &'static Shape,
    fields: Vec<FieldInfo>,
    by_name: HashMap<&'static str, usize>,
    by_offset: HashMap<usize, usize>,
}

impl FieldTable {
    /// The composite this table describes
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// All fields, in declaration order, with base fields first
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Number of fields
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the composite has no fields
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldInfo> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Returns true if a field with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Offset of the named field
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.get(name).map(|info| info.offset)
    }

    /// Type identity of the named field
    pub fn type_of(&self, name: &str) -> Option<TypeIdentity> {
        self.get(name).map(|info| info.ty)
    }

    /// Looks up the sized field starting at `offset`
    pub fn at_offset(&self, offset: usize) -> Option<&FieldInfo> {
        self.by_offset.get(&offset).map(|&i| &self.fields[i])
    }

    /// Type identity of the sized field starting at `offset`
    pub fn type_at(&self, offset: usize) -> Option<TypeIdentity> {
        self.at_offset(offset).map(|info| info.ty)
    }
}

/// Accumulates fields while checking the table's invariants. Nothing is
/// visible to readers until [`FieldTableBuilder::build`].
struct FieldTableBuilder {
    table: FieldTable,
}

impl FieldTableBuilder {
    fn new(shape: &'static Shape) -> Self {
        Self {
            table: FieldTable {
                shape,
                fields: Vec::new(),
                by_name: HashMap::new(),
                by_offset: HashMap::new(),
            },
        }
    }

    fn push(&mut self, info: FieldInfo) -> Result<(), SchemaError> {
        let table = &mut self.table;
        let index = table.fields.len();

        if table.by_name.contains_key(info.name) {
            return Err(SchemaError::DuplicateField {
                shape: table.shape,
                name: info.name,
            });
        }

        // zero-sized fields share offsets with their neighbours and are only
        // reachable by name
        if info.shape.layout.size() != 0 {
            if let Some(&other) = table.by_offset.get(&info.offset) {
                return Err(SchemaError::OverlappingField {
                    shape: table.shape,
                    offset: info.offset,
                    first: table.fields[other].name,
                    second: info.name,
                });
            }
            table.by_offset.insert(info.offset, index);
        }

        table.by_name.insert(info.name, index);
        table.fields.push(info);
        Ok(())
    }

    fn build(self) -> FieldTable {
        self.table
    }
}
