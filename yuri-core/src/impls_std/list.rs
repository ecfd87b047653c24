use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::{Def, ListDef, ListVTable, PtrConst, Reflect, Shape, ValueVTable, build_with};

macro_rules! impl_reflect_for_list {
    ($list:ident, $name:literal, $push:ident $(, $bound:path)*) => {
        unsafe impl<T: Reflect $(+ $bound)*> Reflect for $list<T> {
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
                            .default_in_place(true, |target| unsafe {
                                Some(target.put($list::<T>::new()))
                            })
                            .build()
                    })
                    .def(Def::List(ListDef {
                        t: || T::SHAPE,
                        vtable: &const {
                            ListVTable {
                                len: |this| unsafe { this.get::<$list<T>>().len() },
                                iter: |this| unsafe {
                                    let list = this.get::<$list<T>>();
                                    Box::new(list.iter().map(|item| PtrConst::new(item)))
                                },
                                clear: |this| unsafe { this.as_mut::<$list<T>>().clear() },
                                push_with: |this, fill| unsafe {
                                    let item = build_with::<T>(fill)?;
                                    this.as_mut::<$list<T>>().$push(item);
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

impl_reflect_for_list!(Vec, "Vec", push);
impl_reflect_for_list!(VecDeque, "VecDeque", push_back);
impl_reflect_for_list!(HashSet, "HashSet", insert, Eq, core::hash::Hash);
impl_reflect_for_list!(BTreeSet, "BTreeSet", insert, Ord);
