//! Allows writing into values through their shapes.
//!
//! Every write goes into memory that already holds a valid value: fields
//! are replaced, and containers grow through fill callbacks that receive a
//! default-constructed element to write into.

use yuri_core::{FillError, PtrMut, Shape};

use crate::ReflectError;

mod value;
pub use value::*;

mod composite;
pub use composite::*;

mod enum_;
pub use enum_::*;

mod list;
pub use list::*;

mod map;
pub use map::*;

mod nullable;
pub use nullable::*;

mod pointer;
pub use pointer::*;

mod pair;
pub use pair::*;

/// Drives a type-erased fill with a typed callback, carrying the callback's
/// own error back out when it is what stopped the fill.
pub(crate) fn fill_one<E: From<ReflectError>>(
    container: &'static Shape,
    elem: &'static Shape,
    erased: impl FnOnce(&mut dyn FnMut(PtrMut<'_>) -> bool) -> Result<(), FillError>,
    f: impl FnOnce(Poke<'_>) -> Result<(), E>,
) -> Result<(), E> {
    let mut f = Some(f);
    let mut failure = None;
    let res = erased(&mut |ptr: PtrMut<'_>| {
        let Some(f) = f.take() else {
            return false;
        };
        match f(unsafe { Poke::unchecked_new(ptr, elem) }) {
            Ok(()) => true,
            Err(e) => {
                failure = Some(e);
                false
            }
        }
    });
    finish(container, res, failure)
}

/// Same as [`fill_one`], for map entries
pub(crate) fn fill_two<E: From<ReflectError>>(
    container: &'static Shape,
    (k, v): (&'static Shape, &'static Shape),
    erased: impl FnOnce(&mut dyn FnMut(PtrMut<'_>, PtrMut<'_>) -> bool) -> Result<(), FillError>,
    f: impl FnOnce(Poke<'_>, Poke<'_>) -> Result<(), E>,
) -> Result<(), E> {
    let mut f = Some(f);
    let mut failure = None;
    let res = erased(&mut |key: PtrMut<'_>, value: PtrMut<'_>| {
        let Some(f) = f.take() else {
            return false;
        };
        match f(unsafe { Poke::unchecked_new(key, k) }, unsafe {
            Poke::unchecked_new(value, v)
        }) {
            Ok(()) => true,
            Err(e) => {
                failure = Some(e);
                false
            }
        }
    });
    finish(container, res, failure)
}

fn finish<E: From<ReflectError>>(
    container: &'static Shape,
    res: Result<(), FillError>,
    failure: Option<E>,
) -> Result<(), E> {
    match (res, failure) {
        (Ok(()), _) => Ok(()),
        (Err(_), Some(e)) => Err(e),
        (Err(error), None) => Err(ReflectError::from_fill(container, error).into()),
    }
}
