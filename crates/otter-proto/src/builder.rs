//! Builder for fresh objects.
//!
//! Collects frozen, mutable and dynamic properties plus prototypes, then
//! validates everything once in [`ObjectBuilder::build`].
//!
//! ## Usage
//!
//! ```
//! use otter_proto::{ObjectBuilder, ValueType};
//!
//! let base = ObjectBuilder::new().frozen("kind", "animal").build()?;
//! let dog = ObjectBuilder::new()
//!     .tag("Dog")
//!     .prototype(&base)
//!     .frozen("legs", 4)
//!     .mutable("name", "Rex")
//!     .mutable_unassigned("owner", ValueType::Str)
//!     .dynamic()
//!     .build()?;
//! # Ok::<(), otter_proto::ObjectError>(())
//! ```

use crate::config::ModelConfig;
use crate::error::{ObjectError, ObjectResult};
use crate::name::PropertyName;
use crate::object::Object;
use crate::prototype::Prototypes;
use crate::shape::TypeTag;
use crate::slot::Slot;
use crate::store::{DynamicStore, FrozenStore, MutableStore};
use crate::value::{Value, ValueType};

/// A mutable property waiting for `build()`
enum DeferredSlot {
    /// Slot typed to the value's own type
    Value(Value),
    /// Slot with an explicit element type, possibly unassigned
    Typed {
        element: ValueType,
        value: Option<Value>,
    },
    /// Caller's slot, already copied
    Cell(Slot),
}

/// Requested dynamic store
struct DeferredDynamic {
    element: Option<ValueType>,
    entries: Vec<(PropertyName, Value)>,
}

/// Builder for [`Object`]
pub struct ObjectBuilder {
    config: ModelConfig,
    tag: Option<TypeTag>,
    frozen: Vec<(PropertyName, Value)>,
    mutable: Vec<(PropertyName, DeferredSlot)>,
    dynamic: Option<DeferredDynamic>,
    prototypes: Vec<Object>,
}

impl Default for ObjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectBuilder {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        Self::with_config(ModelConfig::default())
    }

    /// Create a builder with explicit construction defaults
    pub fn with_config(config: ModelConfig) -> Self {
        Self {
            config,
            tag: None,
            frozen: Vec::new(),
            mutable: Vec::new(),
            dynamic: None,
            prototypes: Vec::new(),
        }
    }

    /// Set the type tag
    pub fn tag(mut self, tag: impl Into<TypeTag>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Add a frozen property
    pub fn frozen(mut self, name: impl Into<PropertyName>, value: impl Into<Value>) -> Self {
        self.frozen.push((name.into(), value.into()));
        self
    }

    /// Add a mutable property typed to the value's own type
    pub fn mutable(mut self, name: impl Into<PropertyName>, value: impl Into<Value>) -> Self {
        self.mutable
            .push((name.into(), DeferredSlot::Value(value.into())));
        self
    }

    /// Add a mutable property with an explicit element type
    pub fn mutable_typed(
        mut self,
        name: impl Into<PropertyName>,
        element: ValueType,
        value: impl Into<Value>,
    ) -> Self {
        self.mutable.push((
            name.into(),
            DeferredSlot::Typed {
                element,
                value: Some(value.into()),
            },
        ));
        self
    }

    /// Add a mutable property that starts unassigned
    pub fn mutable_unassigned(mut self, name: impl Into<PropertyName>, element: ValueType) -> Self {
        self.mutable.push((
            name.into(),
            DeferredSlot::Typed {
                element,
                value: None,
            },
        ));
        self
    }

    /// Add a mutable property from an existing slot.
    ///
    /// The slot is copied; the object never aliases the caller's slot.
    pub fn mutable_cell(mut self, name: impl Into<PropertyName>, slot: &Slot) -> Self {
        self.mutable
            .push((name.into(), DeferredSlot::Cell(slot.copy())));
        self
    }

    /// Request a dynamic store with the configured element type
    pub fn dynamic(mut self) -> Self {
        self.dynamic.get_or_insert_with(|| DeferredDynamic {
            element: None,
            entries: Vec::new(),
        });
        self
    }

    /// Request a dynamic store with an explicit element type
    pub fn dynamic_typed(mut self, element: ValueType) -> Self {
        self.dynamic
            .get_or_insert_with(|| DeferredDynamic {
                element: None,
                entries: Vec::new(),
            })
            .element = Some(element);
        self
    }

    /// Add an initial dynamic property (requests a dynamic store)
    pub fn dynamic_entry(mut self, name: impl Into<PropertyName>, value: impl Into<Value>) -> Self {
        self = self.dynamic();
        if let Some(dynamic) = self.dynamic.as_mut() {
            dynamic.entries.push((name.into(), value.into()));
        }
        self
    }

    /// Append a prototype (later prototypes take priority)
    pub fn prototype(mut self, proto: &Object) -> Self {
        self.prototypes.push(proto.clone());
        self
    }

    /// Append several prototypes in priority order, lowest first
    pub fn prototypes<'a>(mut self, protos: impl IntoIterator<Item = &'a Object>) -> Self {
        self.prototypes.extend(protos.into_iter().cloned());
        self
    }

    /// Validate and create the object
    pub fn build(self) -> ObjectResult<Object> {
        let frozen = FrozenStore::from_entries(self.frozen)?;

        let slots = self
            .mutable
            .into_iter()
            .map(|(name, deferred)| -> ObjectResult<(PropertyName, Slot)> {
                let slot = match deferred {
                    DeferredSlot::Value(value) => Slot::assigned(value),
                    DeferredSlot::Typed {
                        element,
                        value: Some(value),
                    } => Slot::with_value(element, value)
                        .map_err(|err| ObjectError::from_slot(&name, err))?,
                    DeferredSlot::Typed {
                        element,
                        value: None,
                    } => Slot::new(element),
                    DeferredSlot::Cell(slot) => slot,
                };
                Ok((name, slot))
            })
            .collect::<ObjectResult<Vec<_>>>()?;
        let mutable = MutableStore::from_slots(slots)?;

        let dynamic = match self.dynamic {
            Some(deferred) => Some(DynamicStore::from_entries(
                deferred.element.unwrap_or(self.config.dynamic_element),
                deferred.entries,
            )?),
            None if self.config.dynamic_by_default => {
                Some(DynamicStore::new(self.config.dynamic_element))
            }
            None => None,
        };

        let tag = self.tag.unwrap_or_else(|| self.config.tag());
        let prototypes: Prototypes = self.prototypes.into_iter().collect();

        Object::assemble(tag, frozen, mutable, dynamic, prototypes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Tier;

    #[test]
    fn test_build_all_tiers() {
        let obj = ObjectBuilder::new()
            .tag("Point")
            .frozen("x", 1)
            .mutable("y", 2.5)
            .dynamic_entry("label", "p")
            .build()
            .unwrap();

        assert_eq!(obj.tag().as_str(), "Point");
        assert_eq!(obj.tier_of("x"), Some(Tier::Frozen));
        assert_eq!(obj.tier_of("y"), Some(Tier::Mutable));
        assert_eq!(obj.tier_of("label"), Some(Tier::Dynamic));
        assert_eq!(obj.mutable().slot("y").unwrap().element_type(), ValueType::Float);
    }

    #[test]
    fn test_frozen_and_mutable_collision() {
        let err = ObjectBuilder::new()
            .frozen("a", 1)
            .mutable("a", 2)
            .build()
            .unwrap_err();
        assert_eq!(err, ObjectError::DuplicateProperty("a".into()));
    }

    #[test]
    fn test_duplicate_prototype() {
        let parent = ObjectBuilder::new().build().unwrap();
        let err = ObjectBuilder::new()
            .prototype(&parent)
            .prototype(&parent)
            .build()
            .unwrap_err();
        assert_eq!(err, ObjectError::DuplicatePrototype { index: 1 });
    }

    #[test]
    fn test_mutable_typed_checks_initial_value() {
        let err = ObjectBuilder::new()
            .mutable_typed("n", ValueType::Int, "x")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ObjectError::type_mismatch("n", ValueType::Int, ValueType::Str)
        );

        let obj = ObjectBuilder::new()
            .mutable_typed("any", ValueType::Any, 1)
            .build()
            .unwrap();
        obj.set("any", "now a string").unwrap();
        assert_eq!(obj.get("any"), Ok(Value::str("now a string")));
    }

    #[test]
    fn test_mutable_cell_is_copied() {
        let cell = Slot::assigned(Value::Int(1));
        let obj = ObjectBuilder::new().mutable_cell("c", &cell).build().unwrap();

        obj.set("c", 2).unwrap();
        assert_eq!(cell.get(), Ok(Value::Int(1)));

        cell.set(Value::Int(3)).unwrap();
        assert_eq!(obj.get("c"), Ok(Value::Int(2)));
    }

    #[test]
    fn test_config_defaults() {
        let config = ModelConfig {
            default_tag: "Record".to_string(),
            dynamic_by_default: true,
            dynamic_element: ValueType::Int,
        };
        let obj = ObjectBuilder::with_config(config).build().unwrap();

        assert_eq!(obj.tag().as_str(), "Record");
        assert!(obj.has_dynamic());
        obj.set("n", 1).unwrap();
        assert_eq!(
            obj.set("s", "x"),
            Err(ObjectError::type_mismatch("s", ValueType::Int, ValueType::Str))
        );
    }

    #[test]
    fn test_dynamic_typed_entries_checked() {
        let err = ObjectBuilder::new()
            .dynamic_typed(ValueType::Bool)
            .dynamic_entry("flag", 1)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ObjectError::type_mismatch("flag", ValueType::Bool, ValueType::Int)
        );
    }
}
