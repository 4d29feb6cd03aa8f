//! Property storage tiers
//!
//! - [`FrozenStore`]: (name, value) pairs fixed at construction
//! - [`MutableStore`]: (name, slot) pairs; names and element types are fixed,
//!   values are written in place
//! - [`DynamicStore`]: open insertion-ordered map with a uniform element type
//!
//! All three keep insertion order and answer the same lookup contract through
//! [`PropertyStore`].

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;
use tracing::trace;

use crate::error::{ObjectError, ObjectResult};
use crate::name::PropertyName;
use crate::slot::Slot;
use crate::value::{Value, ValueType};

/// Insertion-ordered map with the Fx hasher
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Insertion-ordered set with the Fx hasher
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Lookup contract shared by the storage tiers
pub trait PropertyStore {
    /// Own names in insertion order
    fn names(&self) -> Vec<PropertyName>;

    /// Read a property
    fn get(&self, name: &str) -> ObjectResult<Value>;

    /// Check whether the store declares `name`
    fn contains(&self, name: &str) -> bool;

    /// Number of names
    fn len(&self) -> usize;

    /// Check for an empty store
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn collect_unique<V>(
    entries: impl IntoIterator<Item = (PropertyName, V)>,
) -> ObjectResult<FxIndexMap<PropertyName, V>> {
    let mut map = FxIndexMap::default();
    for (name, value) in entries {
        if map.contains_key(&name) {
            return Err(ObjectError::DuplicateProperty(name));
        }
        map.insert(name, value);
    }
    Ok(map)
}

// ============================================================================
// Frozen
// ============================================================================

/// Properties fixed at construction
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrozenStore {
    entries: FxIndexMap<PropertyName, Value>,
}

impl FrozenStore {
    /// Create a frozen store; repeated names fail with `DuplicateProperty`
    pub fn from_entries(
        entries: impl IntoIterator<Item = (PropertyName, Value)>,
    ) -> ObjectResult<Self> {
        Ok(Self {
            entries: collect_unique(entries)?,
        })
    }

    /// Borrow a value without cloning
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Frozen properties can never be written
    pub fn set(&self, name: &str, _value: Value) -> ObjectResult<()> {
        Err(ObjectError::immutable(name))
    }

    /// Iterate over (name, value) pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyName, &Value)> {
        self.entries.iter()
    }

    /// (name, runtime type) pairs in order
    pub fn types(&self) -> impl Iterator<Item = (&PropertyName, ValueType)> {
        self.entries.iter().map(|(name, value)| (name, value.value_type()))
    }
}

impl PropertyStore for FrozenStore {
    fn names(&self) -> Vec<PropertyName> {
        self.entries.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> ObjectResult<Value> {
        self.lookup(name)
            .cloned()
            .ok_or_else(|| ObjectError::not_found(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// ============================================================================
// Mutable
// ============================================================================

/// Typed slots whose values change in place
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutableStore {
    slots: FxIndexMap<PropertyName, Slot>,
}

impl MutableStore {
    /// Create a mutable store that takes ownership of the given slots
    pub fn from_slots(slots: impl IntoIterator<Item = (PropertyName, Slot)>) -> ObjectResult<Self> {
        Ok(Self {
            slots: collect_unique(slots)?,
        })
    }

    /// Borrow the slot behind a name
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    /// Write into an existing slot
    pub fn set(&self, name: &str, value: Value) -> ObjectResult<()> {
        let slot = self
            .slots
            .get(name)
            .ok_or_else(|| ObjectError::UnknownProperty(name.into()))?;
        slot.set(value)
            .map_err(|err| ObjectError::from_slot(name, err))
    }

    /// Iterate over (name, slot) pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyName, &Slot)> {
        self.slots.iter()
    }

    /// (name, element type) pairs in order
    pub fn types(&self) -> impl Iterator<Item = (&PropertyName, ValueType)> {
        self.slots.iter().map(|(name, slot)| (name, slot.element_type()))
    }
}

impl PropertyStore for MutableStore {
    fn names(&self) -> Vec<PropertyName> {
        self.slots.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> ObjectResult<Value> {
        let slot = self.slot(name).ok_or_else(|| ObjectError::not_found(name))?;
        slot.get().map_err(|err| ObjectError::from_slot(name, err))
    }

    fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}

// ============================================================================
// Dynamic
// ============================================================================

/// Open property bag with a uniform element type
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DynamicStore {
    element: ValueType,
    entries: FxIndexMap<PropertyName, Value>,
}

impl DynamicStore {
    /// Create an empty store
    pub fn new(element: ValueType) -> Self {
        Self {
            element,
            entries: FxIndexMap::default(),
        }
    }

    /// Create a store from initial entries, checking each against `element`.
    ///
    /// A repeated name keeps its first position and takes the last value.
    pub fn from_entries(
        element: ValueType,
        entries: impl IntoIterator<Item = (PropertyName, Value)>,
    ) -> ObjectResult<Self> {
        let mut store = Self::new(element);
        for (name, value) in entries {
            store.insert(name, value)?;
        }
        Ok(store)
    }

    /// Element type every value must be assignable to
    pub fn element_type(&self) -> ValueType {
        self.element
    }

    /// Borrow a value without cloning
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Insert or overwrite; new names go to the end of iteration order
    pub fn set(&mut self, name: &str, value: Value) -> ObjectResult<()> {
        if let Some(existing) = self.entries.get_mut(name) {
            *existing = self
                .element
                .coerce(value)
                .map_err(|actual| ObjectError::type_mismatch(name, self.element, actual))?;
            return Ok(());
        }
        self.insert(PropertyName::from(name), value)
    }

    fn insert(&mut self, name: PropertyName, value: Value) -> ObjectResult<()> {
        let value = self
            .element
            .coerce(value)
            .map_err(|actual| ObjectError::type_mismatch(&name, self.element, actual))?;
        trace!(property = %name, "dynamic insert");
        self.entries.insert(name, value);
        Ok(())
    }

    /// Remove a property, keeping the order of the rest
    pub fn delete(&mut self, name: &str) -> Option<Value> {
        self.entries.shift_remove(name)
    }

    /// Iterate over (name, value) pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyName, &Value)> {
        self.entries.iter()
    }

    /// Combine two stores, right over left.
    ///
    /// Left entries keep their positions; right-only names are appended. The
    /// element type is kept when both sides agree and widened to `Any`
    /// otherwise.
    pub fn merged(left: &DynamicStore, right: &DynamicStore) -> DynamicStore {
        let mut entries = left.entries.clone();
        for (name, value) in &right.entries {
            entries.insert(name.clone(), value.clone());
        }
        DynamicStore {
            element: left.element.unify(right.element),
            entries,
        }
    }
}

impl PropertyStore for DynamicStore {
    fn names(&self) -> Vec<PropertyName> {
        self.entries.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> ObjectResult<Value> {
        self.lookup(name)
            .cloned()
            .ok_or_else(|| ObjectError::not_found(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
