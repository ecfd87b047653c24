#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
//! Runtime schemas and dynamic access for types that implement
//! [`Reflect`](yuri_core::Reflect).
//!
//! - [`FieldTable`]: the flattened, ordered list of a composite's fields,
//!   with the fields of its bases merged in at their real offsets.
//! - [`Peek`] / [`Poke`]: read from and write to a value through its shape.
//! - [`FieldAccess`]: get and set fields by name or offset, type-checked at
//!   runtime.

mod error;
pub use error::*;

mod schema;
pub use schema::*;

mod peek;
pub use peek::*;

mod poke;
pub use poke::*;

mod access;
pub use access::*;
