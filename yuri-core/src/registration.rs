//! Startup registration for `#[reflect(auto_register)]` types.
//!
//! The derive submits one [`Registration`] per annotated type through
//! [`inventory`]; registries walk them on first use. Platforms without
//! `inventory` support simply see no registrations.

use crate::{Shape, ShapeFn};

#[doc(hidden)]
pub use inventory;

/// A shape submitted for startup registration
pub struct Registration {
    shape: ShapeFn,
}

impl Registration {
    /// Wraps a shape getter
    pub const fn new(shape: ShapeFn) -> Self {
        Self { shape }
    }

    /// The submitted shape
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }
}

inventory::collect!(Registration);

/// Every shape submitted with `#[reflect(auto_register)]`, in no particular order
pub fn registrations() -> impl Iterator<Item = &'static Shape> {
    inventory::iter::<Registration>
        .into_iter()
        .map(Registration::shape)
}
