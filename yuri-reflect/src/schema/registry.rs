use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use log::debug;
use yuri_core::{Reflect, Shape, TypeIdentity};

use super::merge::build_table;
use crate::{FieldTable, SchemaError};

static TABLES: LazyLock<RwLock<HashMap<TypeIdentity, &'static FieldTable>>> =
    LazyLock::new(Default::default);

/// Returns the field table of a composite, building and publishing it on
/// first use. Tables live for the rest of the process.
///
/// Building happens outside the lock; if two threads race on the same type,
/// the first table published wins and both get it.
pub fn field_table(shape: &'static Shape) -> Result<&'static FieldTable, SchemaError> {
    if let Some(table) = TABLES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&shape.id)
    {
        return Ok(table);
    }

    let table: &'static FieldTable = Box::leak(Box::new(build_table(shape)?));
    debug!("Built field table for {shape} ({} fields)", table.len());

    let mut tables = TABLES.write().unwrap_or_else(PoisonError::into_inner);
    Ok(*tables.entry(shape.id).or_insert(table))
}

/// Returns the field table of `T`
#[inline]
pub fn field_table_of<T: Reflect>() -> Result<&'static FieldTable, SchemaError> {
    field_table(T::SHAPE)
}
