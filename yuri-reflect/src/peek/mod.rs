//! Read-only views over reflected values, one per [`Def`](yuri_core::Def)
//! category.

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
