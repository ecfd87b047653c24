//! Auto(de)ref specialization helpers.
//!
//! Lets generated code ask "does this concrete type implement `Default`?"
//! without adding a `Default` bound. Only works on concrete types: in a
//! generic context the fallback impl is always picked.
//!
//! ```ignore
//! use yuri_core::spez::*;
//! let f = unsafe { (&&Spez::<String>::new()).spez_default_in_place(target) };
//! ```

use core::marker::PhantomData;

pub use impls::impls;

use crate::{PtrMut, PtrUninit};

/// Wraps a type for specialization-style dispatch
pub struct Spez<T>(PhantomData<T>);

impl<T> Spez<T> {
    /// Creates the wrapper
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Spez<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Picked when the wrapped type implements `Default`
pub trait SpezDefaultInPlaceYes {
    /// Writes the default value into `target`
    ///
    /// # Safety
    ///
    /// `target` must be valid for writes of the wrapped type and properly aligned.
    unsafe fn spez_default_in_place<'mem>(&self, target: PtrUninit<'mem>) -> Option<PtrMut<'mem>>;
}

impl<T: Default> SpezDefaultInPlaceYes for &Spez<T> {
    unsafe fn spez_default_in_place<'mem>(&self, target: PtrUninit<'mem>) -> Option<PtrMut<'mem>> {
        Some(unsafe { target.put(T::default()) })
    }
}

/// Fallback for types without `Default`
pub trait SpezDefaultInPlaceNo {
    /// Always `None`
    ///
    /// # Safety
    ///
    /// Never touches `target`.
    unsafe fn spez_default_in_place<'mem>(&self, target: PtrUninit<'mem>) -> Option<PtrMut<'mem>>;
}

impl<T> SpezDefaultInPlaceNo for Spez<T> {
    unsafe fn spez_default_in_place<'mem>(
        &self,
        _target: PtrUninit<'mem>,
    ) -> Option<PtrMut<'mem>> {
        None
    }
}
