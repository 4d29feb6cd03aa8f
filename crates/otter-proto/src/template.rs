//! Template replication.
//!
//! Any object can act as a template: [`Object::replicate`] produces a new
//! object with the same own names, tiers and types, taking the template's
//! current values unless overridden. The replica shares the template's shape
//! and signature handles and its prototype list, so no validation is needed.

use std::cell::Cell;

use tracing::debug;

use crate::error::{ObjectError, ObjectResult};
use crate::name::PropertyName;
use crate::object::Object;
use crate::slot::Slot;
use crate::store::{FrozenStore, FxIndexMap, MutableStore, PropertyStore};
use crate::value::Value;

impl Object {
    /// Create a new object with this object's schema.
    ///
    /// Overrides may only name frozen or mutable properties. A frozen
    /// override must have exactly the frozen value's type; a mutable override
    /// must be assignable to the slot's element type. Everything else is
    /// copied from the template's current state, unassigned slots included.
    /// Dynamic entries are copied as a snapshot.
    pub fn replicate<I, K>(&self, overrides: I) -> ObjectResult<Object>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<PropertyName>,
    {
        let mut overrides: FxIndexMap<PropertyName, Value> = overrides
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();

        let inner = self.inner();
        if let Some(unknown) = overrides
            .keys()
            .find(|name| !inner.frozen.contains(name.as_str()) && !inner.mutable.contains(name.as_str()))
        {
            return Err(ObjectError::UnknownTemplateArgument(unknown.clone()));
        }

        let frozen = inner
            .frozen
            .iter()
            .map(|(name, current)| match overrides.swap_remove(name.as_str()) {
                Some(value) if value.value_type() != current.value_type() => Err(
                    ObjectError::type_mismatch(name, current.value_type(), value.value_type()),
                ),
                Some(value) => Ok((name.clone(), value)),
                None => Ok((name.clone(), current.clone())),
            })
            .collect::<ObjectResult<Vec<_>>>()?;

        let slots = inner
            .mutable
            .iter()
            .map(|(name, current)| match overrides.swap_remove(name.as_str()) {
                Some(value) => {
                    let slot = Slot::new(current.element_type());
                    slot.set(value)
                        .map_err(|err| ObjectError::from_slot(name, err))?;
                    Ok((name.clone(), slot))
                }
                None => Ok((name.clone(), current.copy())),
            })
            .collect::<ObjectResult<Vec<_>>>()?;

        let replica = Object::from_parts(
            inner.shape.clone(),
            inner.signature.clone(),
            FrozenStore::from_entries(frozen)?,
            MutableStore::from_slots(slots)?,
            self.dynamic(),
            inner.prototypes.clone(),
        );
        debug!(tag = %self.tag(), fields = self.shape().field_count(), "object replicated");
        Ok(replica)
    }
}

/// A reusable replicator bound to one schema object
pub struct Template {
    schema: Object,
    instances: Cell<u64>,
}

impl Template {
    /// Use `schema` as the template
    pub fn new(schema: Object) -> Self {
        Self {
            schema,
            instances: Cell::new(0),
        }
    }

    /// The schema object
    pub fn schema(&self) -> &Object {
        &self.schema
    }

    /// Number of objects created so far
    pub fn instances(&self) -> u64 {
        self.instances.get()
    }

    /// Create a replica of the schema with the given overrides
    pub fn instantiate<I, K>(&self, overrides: I) -> ObjectResult<Object>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<PropertyName>,
    {
        let replica = self.schema.replicate(overrides)?;
        self.instances.set(self.instances.get() + 1);
        debug!(tag = %self.schema.tag(), instances = self.instances.get(), "template instantiated");
        Ok(replica)
    }

    /// Create a replica with no overrides
    pub fn instantiate_default(&self) -> ObjectResult<Object> {
        self.instantiate(std::iter::empty::<(PropertyName, Value)>())
    }
}
