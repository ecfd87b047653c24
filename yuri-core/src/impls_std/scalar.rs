use crate::{Def, Reflect, ScalarDef, ScalarKind, Shape, value_vtable};

macro_rules! impl_reflect_for_scalar {
    ($type:ty, $kind:ident, $name:literal) => {
        unsafe impl Reflect for $type {
            const SHAPE: &'static Shape = &const {
                Shape::builder_for_sized::<Self>()
                    .type_identifier($name)
                    .vtable(&value_vtable!($type, |f| f.write_str($name)))
                    .def(Def::Scalar(ScalarDef {
                        kind: ScalarKind::$kind,
                    }))
                    .build()
            };
        }
    };
}

impl_reflect_for_scalar!(String, String, "String");
impl_reflect_for_scalar!(bool, Bool, "bool");
impl_reflect_for_scalar!(char, Char, "char");
impl_reflect_for_scalar!(u8, U8, "u8");
impl_reflect_for_scalar!(u16, U16, "u16");
impl_reflect_for_scalar!(u32, U32, "u32");
impl_reflect_for_scalar!(u64, U64, "u64");
impl_reflect_for_scalar!(usize, Usize, "usize");
impl_reflect_for_scalar!(i8, I8, "i8");
impl_reflect_for_scalar!(i16, I16, "i16");
impl_reflect_for_scalar!(i32, I32, "i32");
impl_reflect_for_scalar!(i64, I64, "i64");
impl_reflect_for_scalar!(isize, Isize, "isize");
impl_reflect_for_scalar!(f32, F32, "f32");
impl_reflect_for_scalar!(f64, F64, "f64");
