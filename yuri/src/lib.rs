#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
//! Reflection for plain Rust structs: derive [`Reflect`] once and get a
//! runtime-visible schema (field names, type identities, byte offsets) that
//! generic codecs and dynamic accessors can walk.
//!
//! ```rust
//! use yuri::Reflect;
//!
//! #[derive(Reflect, Default)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let composite = Point::SHAPE.composite().unwrap();
//! assert_eq!(composite.fields.len(), 2);
//! ```

pub use yuri_core::*;

/// Derive the [`Reflect`] trait for structs and field-less enums.
///
/// Structs become composites: each named (or tuple) field is recorded with
/// its name, shape and byte offset, in declaration order.
///
/// # Container attributes
///
/// - `#[reflect(default)]`: construct values through `Default`. Concrete
///   types get this automatically when they implement `Default`; generic
///   types need the attribute to be decodable.
/// - `#[reflect(auto_register)]`: submit the type for startup registration
///   (non-generic types only).
///
/// # Field attributes
///
/// - `#[reflect(base)]`: the field is a base. Its own fields are merged into
///   this type's field table instead of appearing as a nested object. Base
///   fields must come first, and the struct must be `#[repr(C)]`.
/// - `#[reflect(rename = "name")]`: encode the field under another name.
/// - `#[reflect(skip)]`: leave the field out of the schema.
///
/// ```rust
/// use yuri::Reflect;
///
/// #[derive(Reflect, Default)]
/// #[repr(C)]
/// struct Named {
///     name: String,
/// }
///
/// #[derive(Reflect, Default)]
/// #[repr(C)]
/// struct Employee {
///     #[reflect(base)]
///     named: Named,
///     #[reflect(rename = "employeeId")]
///     id: u32,
/// }
/// ```
///
/// # Enums
///
/// Field-less enums with an integer `#[repr]` are encoded as their
/// discriminant.
///
/// ```rust
/// use yuri::Reflect;
///
/// #[derive(Reflect, Default, Clone, Copy, PartialEq, Debug)]
/// #[repr(u8)]
/// enum Color {
///     #[default]
///     Red = 1,
///     Green = 2,
/// }
/// ```
pub use yuri_derive::Reflect;

#[cfg(feature = "reflect")]
pub use yuri_reflect::*;
