//! Object model error types

use crate::name::PropertyName;
use crate::slot::SlotError;
use crate::value::ValueType;
use thiserror::Error;

/// Errors raised by property access, construction, merge and replication.
///
/// Every error is local to the operation that produced it. Construction,
/// merge and replication either succeed or produce no object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObjectError {
    /// Name absent from own stores and the whole prototype chain
    #[error("property `{0}` not found")]
    PropertyNotFound(PropertyName),

    /// Read of a mutable slot that was never assigned
    #[error("property `{0}` was read before it was assigned")]
    UnassignedAccess(PropertyName),

    /// Write to a frozen property
    #[error("property `{0}` is immutable")]
    ImmutableProperty(PropertyName),

    /// Write to a name that is only visible through a prototype
    #[error("property `{0}` belongs to a prototype and is read-only here")]
    PrototypePropertyReadOnly(PropertyName),

    /// Write to a mutable store under a name it does not declare
    #[error("unknown property `{0}`")]
    UnknownProperty(PropertyName),

    /// Value type is not assignable to the declared element type
    #[error("type mismatch for `{name}`: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Property being written
        name: PropertyName,
        /// Declared element type
        expected: ValueType,
        /// Runtime type of the rejected value
        actual: ValueType,
    },

    /// The same name appears in more than one storage tier
    #[error("property `{0}` is defined more than once")]
    DuplicateProperty(PropertyName),

    /// The same object appears twice in a prototype list
    #[error("prototype at position {index} is listed more than once")]
    DuplicatePrototype {
        /// Position of the repeated occurrence
        index: usize,
    },

    /// Replication override for a name the template does not declare
    #[error("template has no frozen or mutable property `{0}`")]
    UnknownTemplateArgument(PropertyName),

    /// Deletion of a frozen or mutable property
    #[error("property `{0}` is not dynamic and cannot be deleted")]
    NotDeletable(PropertyName),
}

impl ObjectError {
    /// Create a property-not-found error
    pub fn not_found(name: impl Into<PropertyName>) -> Self {
        Self::PropertyNotFound(name.into())
    }

    /// Create an immutable-property error
    pub fn immutable(name: impl Into<PropertyName>) -> Self {
        Self::ImmutableProperty(name.into())
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        name: impl Into<PropertyName>,
        expected: ValueType,
        actual: ValueType,
    ) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Attach a property name to an anonymous slot failure
    pub fn from_slot(name: impl Into<PropertyName>, err: SlotError) -> Self {
        match err {
            SlotError::Unassigned => Self::UnassignedAccess(name.into()),
            SlotError::TypeMismatch { expected, actual } => {
                Self::type_mismatch(name, expected, actual)
            }
        }
    }

    /// Name of the property involved, if the error carries one
    pub fn property(&self) -> Option<&PropertyName> {
        match self {
            Self::PropertyNotFound(name)
            | Self::UnassignedAccess(name)
            | Self::ImmutableProperty(name)
            | Self::PrototypePropertyReadOnly(name)
            | Self::UnknownProperty(name)
            | Self::DuplicateProperty(name)
            | Self::UnknownTemplateArgument(name)
            | Self::NotDeletable(name)
            | Self::TypeMismatch { name, .. } => Some(name),
            Self::DuplicatePrototype { .. } => None,
        }
    }
}

/// Result type for object model operations
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;
