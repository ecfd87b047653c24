#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
//! Core types and traits for yuri: the [`Reflect`] trait, the [`Shape`] a
//! reflectable type carries, type identities and type-erased pointers.
//!
//! Most users want the `yuri` facade crate and `#[derive(Reflect)]` instead
//! of depending on this crate directly.

mod macros;

// Opaque pointer utilities
mod ptr;
pub use ptr::*;

// Specialization utilities
pub mod spez;

// Const type identity
mod typeid;
pub use typeid::*;

// Shapes and definitions
mod types;
pub use types::*;

// Implementations for std types
mod impls_std;

// Startup registration
mod registration;
pub use registration::*;

/// Gives a type a [`Shape`]: its identity, layout, and structural
/// definition, which is everything the codecs need to walk a value of that
/// type without knowing it statically.
///
/// # Safety
///
/// The shape must describe the type exactly: field offsets, element types
/// and vtable functions are trusted by every reader and writer. Use
/// `#[derive(Reflect)]` rather than implementing this by hand.
pub unsafe trait Reflect: 'static {
    /// The shape of this type
    const SHAPE: &'static Shape;
}

/// Returns the shape of `T`
#[inline]
pub const fn shape_of<T: Reflect>() -> &'static Shape {
    T::SHAPE
}
