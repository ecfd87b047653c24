/// Creates a [`ValueVTable`](crate::ValueVTable) for a concrete type.
///
/// Default construction is detected with [`spez`](crate::spez), so this only
/// gives correct results for concrete types: in a generic context the type is
/// always considered to have no default. Generic types either build their
/// vtable by hand or use `#[reflect(default)]` on the derive.
///
/// ```
/// use yuri_core::value_vtable;
///
/// let vtable = value_vtable!(String, |f| f.write_str("String"));
/// assert!(vtable.has_default);
/// ```
#[macro_export]
macro_rules! value_vtable {
    ($type_name:ty, $type_name_fn:expr) => {
        const {
            $crate::ValueVTable::builder()
                .type_name($type_name_fn)
                .default_in_place(
                    $crate::spez::impls!($type_name: core::default::Default),
                    |target| unsafe {
                        use $crate::spez::*;
                        (&&Spez::<$type_name>::new()).spez_default_in_place(target)
                    },
                )
                .build()
        }
    };
}
