//! Capability descriptors.
//!
//! An [`Interface`] is a named set of required (name, type) pairs. An object
//! implements it when its signature declares every required name with a type
//! the requirement accepts. Objects are compared structurally, never by tag.

use crate::name::PropertyName;
use crate::object::Object;
use crate::shape::Signature;
use crate::value::ValueType;

/// Named set of required properties
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interface {
    name: String,
    required: Signature,
}

impl Interface {
    /// Create an interface with no requirements
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: Signature::default(),
        }
    }

    /// Interface described by an object's signature, named after its tag
    pub fn of(obj: &Object) -> Self {
        Self {
            name: obj.tag().to_string(),
            required: obj.signature().clone(),
        }
    }

    /// Add a requirement
    pub fn require(mut self, name: impl Into<PropertyName>, ty: ValueType) -> Self {
        let name = name.into();
        self.required = Signature::from_layers(self.required.iter().chain([(&name, ty)]));
        self
    }

    /// Interface name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Required (name, type) pairs
    pub fn requirements(&self) -> &Signature {
        &self.required
    }

    /// Check an object against this interface
    pub fn is_satisfied_by(&self, obj: &Object) -> bool {
        obj.signature().is_superset_of(&self.required)
    }
}

impl Object {
    /// Check whether this object provides every property of `interface`
    pub fn implements(&self, interface: &Interface) -> bool {
        interface.is_satisfied_by(self)
    }

    /// Check whether this object can stand in for `other`
    pub fn conforms_to(&self, other: &Object) -> bool {
        self.signature().is_superset_of(other.signature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ObjectBuilder;

    #[test]
    fn test_interface_requirements() {
        let named = Interface::new("Named")
            .require("name", ValueType::Str)
            .require("id", ValueType::Any);
        assert_eq!(named.requirements().len(), 2);

        let user = ObjectBuilder::new()
            .frozen("id", 7)
            .mutable("name", "ada")
            .build()
            .unwrap();
        let anonymous = ObjectBuilder::new().frozen("id", 8).build().unwrap();

        assert!(user.implements(&named));
        assert!(!anonymous.implements(&named));
    }

    #[test]
    fn test_inherited_names_count() {
        let base = ObjectBuilder::new().frozen("name", "base").build().unwrap();
        let child = ObjectBuilder::new()
            .prototype(&base)
            .frozen("id", 1)
            .build()
            .unwrap();

        assert!(child.conforms_to(&base));
        assert!(!base.conforms_to(&child));
        assert_eq!(Interface::of(&child).name(), "Object");
    }

    #[test]
    fn test_dynamic_names_do_not_count() {
        let iface = Interface::new("HasX").require("x", ValueType::Int);
        let obj = ObjectBuilder::new().dynamic_entry("x", 1).build().unwrap();
        assert!(!obj.implements(&iface));
    }
}
