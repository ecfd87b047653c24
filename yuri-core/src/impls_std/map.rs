use std::collections::{BTreeMap, HashMap};

use crate::{
    Def, FillError, MapDef, MapVTable, PtrConst, PtrMut, Reflect, Shape, ValueVTable, default_of,
};

macro_rules! impl_reflect_for_map {
    ($map:ident, $name:literal $(, $bound:path)*) => {
        unsafe impl<K: Reflect $(+ $bound)*, V: Reflect> Reflect for $map<K, V> {
            const SHAPE: &'static Shape = &const {
                Shape::builder_for_sized::<Self>()
                    .type_identifier($name)
                    .vtable(&const {
                        ValueVTable::builder()
                            .type_name(|f| {
                                write!(f, concat!($name, "<"))?;
                                K::SHAPE.write_type_name(f)?;
                                write!(f, ", ")?;
                                V::SHAPE.write_type_name(f)?;
                                write!(f, ">")
                            })
                            .default_in_place(true, |target| unsafe {
                                Some(target.put($map::<K, V>::new()))
                            })
                            .build()
                    })
                    .def(Def::Map(MapDef {
                        k: || K::SHAPE,
                        v: || V::SHAPE,
                        vtable: &const {
                            MapVTable {
                                len: |this| unsafe { this.get::<$map<K, V>>().len() },
                                iter: |this| unsafe {
                                    let map = this.get::<$map<K, V>>();
                                    Box::new(
                                        map.iter()
                                            .map(|(k, v)| (PtrConst::new(k), PtrConst::new(v))),
                                    )
                                },
                                clear: |this| unsafe { this.as_mut::<$map<K, V>>().clear() },
                                insert_with: |this, fill| unsafe {
                                    let mut key = default_of::<K>()
                                        .ok_or(FillError::NoDefault { shape: K::SHAPE })?;
                                    let mut value = default_of::<V>()
                                        .ok_or(FillError::NoDefault { shape: V::SHAPE })?;
                                    let filled = fill(
                                        PtrMut::new(&raw mut key),
                                        PtrMut::new(&raw mut value),
                                    );
                                    if !filled {
                                        return Err(FillError::Aborted);
                                    }
                                    this.as_mut::<$map<K, V>>().insert(key, value);
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

impl_reflect_for_map!(HashMap, "HashMap", Eq, core::hash::Hash);
impl_reflect_for_map!(BTreeMap, "BTreeMap", Ord);
