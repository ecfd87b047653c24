#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
//! A JSON-like codec for types that implement [`Reflect`](yuri_core::Reflect).
//!
//! Every type is encoded and decoded by the [`Codec`] registered for its
//! identity. Entry points register the type they are given, along with
//! everything reachable from it, on first use.
//!
//! ```
//! use yuri::Reflect;
//!
//! #[derive(Reflect, Debug, Default, PartialEq)]
//! struct Sample {
//!     #[reflect(rename = "i")]
//!     count: i32,
//!     d: f64,
//! }
//!
//! let sample: Sample = yuri_json::from_str(r#"{"i":20,"d":4,"extra":[1,2]}"#).unwrap();
//! assert_eq!(sample, Sample { count: 20, d: 4.0 });
//! assert_eq!(yuri_json::to_string(&sample).unwrap(), r#"{"i":20,"d":4.0}"#);
//! ```
//!
//! The format differs from JSON in a few ways:
//!
//! - strings are written as they are, without escaping, and a backslash
//!   when reading only keeps the next byte from closing the string
//! - pairs are `{"first":..,"second":..}` and maps are lists of pairs
//! - unknown object keys are skipped when decoding
//! - field-less enums are their integer discriminant

extern crate alloc;

mod error;
pub use error::*;

mod registry;
pub use registry::*;

mod serialize;
pub use serialize::*;

mod deserialize;
pub use deserialize::*;
