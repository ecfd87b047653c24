use core::mem::offset_of;

use crate::{Def, PairDef, Reflect, Shape, ValueVTable, default_of};

unsafe impl<A: Reflect, B: Reflect> Reflect for (A, B) {
    const SHAPE: &'static Shape = &const {
        Shape::builder_for_sized::<Self>()
            .type_identifier("(⋯)")
            .vtable(&const {
                ValueVTable::builder()
                    .type_name(|f| {
                        write!(f, "(")?;
                        A::SHAPE.write_type_name(f)?;
                        write!(f, ", ")?;
                        B::SHAPE.write_type_name(f)?;
                        write!(f, ")")
                    })
                    .default_in_place(
                        A::SHAPE.vtable.has_default && B::SHAPE.vtable.has_default,
                        |target| unsafe {
                            let first = default_of::<A>()?;
                            let second = default_of::<B>()?;
                            Some(target.put((first, second)))
                        },
                    )
                    .build()
            })
            .def(Def::Pair(PairDef {
                first: || A::SHAPE,
                second: || B::SHAPE,
                first_offset: offset_of!((A, B), 0),
                second_offset: offset_of!((A, B), 1),
            }))
            .build()
    };
}
