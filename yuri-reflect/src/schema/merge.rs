use log::trace;
use yuri_core::Shape;

use super::{FieldInfo, FieldTableBuilder, field_table};
use crate::{FieldTable, SchemaError};

/// Builds the table for a composite: each base's own (already merged) table
/// shifted by the cumulative size of the bases before it, then the
/// composite's directly declared fields.
pub(super) fn build_table(shape: &'static Shape) -> Result<FieldTable, SchemaError> {
    let def = shape
        .composite()
        .ok_or(SchemaError::NotAComposite { shape })?;
    let mut builder = FieldTableBuilder::new(shape);

    let mut shift = 0usize;
    for base in def.bases {
        let base_shape = base.shape();
        let base_table = field_table(base_shape)?;

        shift = shift.next_multiple_of(base_shape.layout.align());
        if shift != base.offset {
            return Err(SchemaError::BaseLayoutMismatch {
                shape,
                base: base_shape,
                expected: shift,
                actual: base.offset,
            });
        }

        trace!(
            "Merging {} fields of base {base_shape} into {shape} at +{shift}",
            base_table.len()
        );
        for info in base_table.fields() {
            builder.push(FieldInfo {
                offset: info.offset + shift,
                ..*info
            })?;
        }
        shift += base_shape.layout.size();
    }

    for field in def.fields {
        let field_shape = field.shape();
        builder.push(FieldInfo {
            name: field.name,
            ty: field_shape.id,
            offset: field.offset,
            shape: field_shape,
        })?;
    }

    Ok(builder.build())
}
