use core::fmt;

use owo_colors::OwoColorize;
use yuri_core::{FillError, Shape};

/// Why a field table could not be built for a composite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// Two fields, possibly from different bases, share a name
    DuplicateField {
        /// The composite whose table was being built
        shape: &'static Shape,
        /// The name declared twice
        name: &'static str,
    },

    /// Two sized fields claim the same offset
    OverlappingField {
        /// The composite whose table was being built
        shape: &'static Shape,
        /// The shared offset
        offset: usize,
        /// The field registered first
        first: &'static str,
        /// The field that collided with it
        second: &'static str,
    },

    /// A base is not laid out where the cumulative size of the preceding
    /// bases puts it, usually because the composite is not `#[repr(C)]`
    BaseLayoutMismatch {
        /// The derived composite
        shape: &'static Shape,
        /// The misplaced base
        base: &'static Shape,
        /// Offset computed from the preceding bases
        expected: usize,
        /// Offset the base actually has
        actual: usize,
    },

    /// A field table was requested for something that is not a composite
    NotAComposite {
        /// The offending shape
        shape: &'static Shape,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::DuplicateField { shape, name } => write!(
                f,
                "Field '{}' is declared more than once in {}",
                name.yellow(),
                shape.blue()
            ),
            SchemaError::OverlappingField {
                shape,
                offset,
                first,
                second,
            } => write!(
                f,
                "Fields '{}' and '{}' of {} both sit at offset {}",
                first.yellow(),
                second.yellow(),
                shape.blue(),
                offset
            ),
            SchemaError::BaseLayoutMismatch {
                shape,
                base,
                expected,
                actual,
            } => write!(
                f,
                "Base {} of {} is at offset {}, expected {} (is the struct #[repr(C)]?)",
                base.green(),
                shape.blue(),
                actual.red(),
                expected
            ),
            SchemaError::NotAComposite { shape } => {
                write!(f, "{} is a {}, not a composite", shape.red(), shape.def.kind_name())
            }
        }
    }
}

impl core::error::Error for SchemaError {}

/// Errors that can occur when reflecting on values
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReflectError {
    /// No field with this name exists in the composite's table
    UnknownField {
        /// The composite
        shape: &'static Shape,
        /// Name that was asked for
        name: String,
    },

    /// The field exists but holds a different type than the one requested
    BadFieldAccess {
        /// The composite
        shape: &'static Shape,
        /// The field
        name: &'static str,
        /// Shape of what the field actually holds
        field_shape: &'static Shape,
        /// Name of the requested type
        requested: &'static str,
    },

    /// No field starts at this offset
    UnknownOffset {
        /// The composite
        shape: &'static Shape,
        /// Offset that was asked for
        offset: usize,
    },

    /// A field starts at this offset but holds a different type than the one requested
    BadOffsetAccess {
        /// The composite
        shape: &'static Shape,
        /// The offset
        offset: usize,
        /// Shape of what the field actually holds
        field_shape: &'static Shape,
        /// Name of the requested type
        requested: &'static str,
    },

    /// An operation expected a value of another category (a list, a composite)
    WasNotA {
        /// The expected category
        expected: &'static str,
        /// What we got instead
        actual: &'static Shape,
    },

    /// A value was read or written as the wrong type
    WrongShape {
        /// Name of the requested type
        expected: &'static str,
        /// The actual shape of the value
        actual: &'static Shape,
    },

    /// A value had to be default-constructed, but its type has no default
    NoDefault {
        /// The type without a default
        shape: &'static Shape,
    },

    /// A fill callback gave up without saying why
    FillAborted {
        /// The container being filled
        shape: &'static Shape,
    },

    /// An enum was set to a discriminant none of its variants have
    NoSuchVariant {
        /// The enum
        shape: &'static Shape,
        /// The rejected discriminant
        discriminant: i64,
    },

    /// The composite's field table could not be built
    Schema(SchemaError),
}

impl ReflectError {
    /// Translates a container fill failure for the container `shape`
    pub fn from_fill(shape: &'static Shape, error: FillError) -> Self {
        match error {
            FillError::NoDefault { shape } => ReflectError::NoDefault { shape },
            FillError::Aborted => ReflectError::FillAborted { shape },
        }
    }
}

impl From<SchemaError> for ReflectError {
    fn from(error: SchemaError) -> Self {
        ReflectError::Schema(error)
    }
}

impl fmt::Display for ReflectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflectError::UnknownField { shape, name } => {
                write!(f, "{} has no field named '{}'", shape.blue(), name.red())
            }
            ReflectError::BadFieldAccess {
                shape,
                name,
                field_shape,
                requested,
            } => write!(
                f,
                "Field '{}::{}' holds {}, but was accessed as {}",
                shape.blue(),
                name.yellow(),
                field_shape.green(),
                requested.red()
            ),
            ReflectError::UnknownOffset { shape, offset } => {
                write!(f, "{} has no field at offset {}", shape.blue(), offset.red())
            }
            ReflectError::BadOffsetAccess {
                shape,
                offset,
                field_shape,
                requested,
            } => write!(
                f,
                "Field at offset {} of {} holds {}, but was accessed as {}",
                offset,
                shape.blue(),
                field_shape.green(),
                requested.red()
            ),
            ReflectError::WasNotA { expected, actual } => write!(
                f,
                "Wrong shape: expected a {}, but got {}",
                expected.green(),
                actual.red()
            ),
            ReflectError::WrongShape { expected, actual } => write!(
                f,
                "Wrong shape: expected {}, but got {}",
                expected.green(),
                actual.red()
            ),
            ReflectError::NoDefault { shape } => {
                write!(f, "{} has no default value", shape.red())
            }
            ReflectError::FillAborted { shape } => {
                write!(f, "Filling a value of {} was aborted", shape.blue())
            }
            ReflectError::NoSuchVariant {
                shape,
                discriminant,
            } => {
                write!(
                    f,
                    "No variant of {} has discriminant {}",
                    shape.blue(),
                    discriminant.red()
                )?;
                if let yuri_core::Def::Enum(def) = shape.def {
                    write!(f, ". Known variants:")?;
                    for v in def.variants {
                        write!(f, " {}={}", v.name.cyan(), v.discriminant)?;
                    }
                }
                Ok(())
            }
            ReflectError::Schema(error) => write!(f, "{error}"),
        }
    }
}

impl core::error::Error for ReflectError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ReflectError::Schema(error) => Some(error),
            _ => None,
        }
    }
}
