use std::rc::Rc;
use std::sync::Arc;

use crate::{
    Def, PointerDef, PointerKind, PointerVTable, PtrConst, Reflect, Shape, ValueVTable,
    build_with, default_of,
};

macro_rules! impl_reflect_for_pointer {
    ($ptr:ident, $name:literal) => {
        unsafe impl<T: Reflect> Reflect for $ptr<T> {
            const SHAPE: &'static Shape = &const {
                Shape::builder_for_sized::<Self>()
                    .type_identifier($name)
                    .vtable(&const {
                        ValueVTable::builder()
                            .type_name(|f| {
                                write!(f, concat!($name, "<"))?;
                                T::SHAPE.write_type_name(f)?;
                                write!(f, ">")
                            })
                            .default_in_place(T::SHAPE.vtable.has_default, |target| unsafe {
                                let inner = default_of::<T>()?;
                                Some(target.put($ptr::new(inner)))
                            })
                            .build()
                    })
                    .def(Def::Pointer(PointerDef {
                        t: || T::SHAPE,
                        kind: PointerKind::$ptr,
                        vtable: &const {
                            PointerVTable {
                                borrow_inner: |this| unsafe {
                                    PtrConst::new(&**this.get::<$ptr<T>>() as *const T)
                                },
                                replace_with: |this, fill| unsafe {
                                    let value = build_with::<T>(fill)?;
                                    *this.as_mut::<$ptr<T>>() = $ptr::new(value);
                                    Ok(())
                                },
                            }
                        },
                    }))
                    .build()
            };
        }
    };
}

impl_reflect_for_pointer!(Box, "Box");
impl_reflect_for_pointer!(Rc, "Rc");
impl_reflect_for_pointer!(Arc, "Arc");
