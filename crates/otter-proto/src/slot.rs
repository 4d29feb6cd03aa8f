//! Typed reference cells backing the mutable tier.
//!
//! A `Slot` holds zero or one value of a fixed element type. "Unassigned" is
//! its own state and is not the same as holding `Value::Null`.
//!
//! Slots use `RefCell` for interior mutability and are confined to one
//! thread. Hosts that share objects across threads must synchronize
//! externally.

use crate::value::{Value, ValueType};
use std::cell::RefCell;
use std::fmt;
use thiserror::Error;

/// Failure of a slot operation, before a property name is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotError {
    /// Read of a slot that was never assigned
    #[error("slot is unassigned")]
    Unassigned,
    /// Written value is not assignable to the element type
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        /// Element type of the slot
        expected: ValueType,
        /// Type of the rejected value
        actual: ValueType,
    },
}

/// A typed, possibly unassigned, in-place writable cell
pub struct Slot {
    element: ValueType,
    value: RefCell<Option<Value>>,
}

impl Slot {
    /// Create an unassigned slot
    pub fn new(element: ValueType) -> Self {
        Self {
            element,
            value: RefCell::new(None),
        }
    }

    /// Create an assigned slot typed to the value's own type
    pub fn assigned(value: Value) -> Self {
        Self {
            element: value.value_type(),
            value: RefCell::new(Some(value)),
        }
    }

    /// Create an assigned slot with an explicit element type
    pub fn with_value(element: ValueType, value: Value) -> Result<Self, SlotError> {
        let value = coerce(element, value)?;
        Ok(Self {
            element,
            value: RefCell::new(Some(value)),
        })
    }

    /// Declared element type
    pub fn element_type(&self) -> ValueType {
        self.element
    }

    /// Check whether the slot holds a value
    pub fn is_assigned(&self) -> bool {
        self.value.borrow().is_some()
    }

    /// Read the value
    pub fn get(&self) -> Result<Value, SlotError> {
        self.peek().ok_or(SlotError::Unassigned)
    }

    /// Read the value without failing on an unassigned slot
    pub fn peek(&self) -> Option<Value> {
        self.value.borrow().clone()
    }

    /// Overwrite the value in place
    pub fn set(&self, value: Value) -> Result<(), SlotError> {
        let value = coerce(self.element, value)?;
        let previous = self.value.borrow_mut().replace(value);
        // Drop outside the borrow so a dropped object cannot observe it.
        drop(previous);
        Ok(())
    }

    /// Create an independent slot with the same type and state.
    ///
    /// The value is cloned, so object handles inside it still alias.
    pub fn copy(&self) -> Slot {
        Slot {
            element: self.element,
            value: RefCell::new(self.peek()),
        }
    }
}

fn coerce(element: ValueType, value: Value) -> Result<Value, SlotError> {
    element
        .coerce(value)
        .map_err(|actual| SlotError::TypeMismatch {
            expected: element,
            actual,
        })
}

impl Clone for Slot {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element && *self.value.borrow() == *other.value.borrow()
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.try_borrow() {
            Ok(value) => f
                .debug_struct("Slot")
                .field("element", &self.element)
                .field("value", &*value)
                .finish(),
            Err(_) => f
                .debug_struct("Slot")
                .field("element", &self.element)
                .field("value", &"<borrowed>")
                .finish(),
        }
    }
}
