use crate::{
    Def, NullableDef, NullableVTable, PtrConst, Reflect, Shape, ValueVTable, build_with,
};

unsafe impl<T: Reflect> Reflect for Option<T> {
    const SHAPE: &'static Shape = &const {
        Shape::builder_for_sized::<Self>()
            .type_identifier("Option")
            .vtable(&const {
                ValueVTable::builder()
                    .type_name(|f| {
                        write!(f, "Option<")?;
                        T::SHAPE.write_type_name(f)?;
                        write!(f, ">")
                    })
                    .default_in_place(true, |target| unsafe { Some(target.put(None::<T>)) })
                    .build()
            })
            .def(Def::Nullable(NullableDef {
                t: || T::SHAPE,
                vtable: &const {
                    NullableVTable {
                        get_value: |this| unsafe {
                            this.get::<Option<T>>().as_ref().map(|value| PtrConst::new(value))
                        },
                        set_none: |this| unsafe {
                            *this.as_mut::<Option<T>>() = None;
                        },
                        replace_with: |this, fill| unsafe {
                            let value = build_with::<T>(fill)?;
                            *this.as_mut::<Option<T>>() = Some(value);
                            Ok(())
                        },
                    }
                },
            }))
            .build()
    };
}
