//! Shapes and signatures.
//!
//! A [`Shape`] describes an object's own layout: its type tag, which names
//! live in which tier and with which types. Replicas of a template share the
//! template's shape handle, so a shape is built once per layout rather than
//! once per instance.
//!
//! A [`Signature`] is the effective name → type mapping an object guarantees,
//! inherited names included. Signatures are sorted vectors compared
//! structurally; they back interface checks.

use std::fmt;
use std::sync::Arc;

use crate::name::PropertyName;
use crate::object::Tier;
use crate::value::ValueType;

/// Name of an object's kind
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(Arc<str>);

impl TypeTag {
    /// Create a tag
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Tag name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TypeTag {
    fn default() -> Self {
        Self::new("Object")
    }
}

impl From<&str> for TypeTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TypeTag {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.0)
    }
}

/// Own layout of an object
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    tag: TypeTag,
    frozen: Vec<(PropertyName, ValueType)>,
    mutable: Vec<(PropertyName, ValueType)>,
    dynamic: Option<ValueType>,
}

impl Shape {
    /// Create a shape from its parts
    pub fn new(
        tag: TypeTag,
        frozen: Vec<(PropertyName, ValueType)>,
        mutable: Vec<(PropertyName, ValueType)>,
        dynamic: Option<ValueType>,
    ) -> Self {
        Self {
            tag,
            frozen,
            mutable,
            dynamic,
        }
    }

    /// Type tag
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// Frozen (name, type) pairs in order
    pub fn frozen_fields(&self) -> &[(PropertyName, ValueType)] {
        &self.frozen
    }

    /// Mutable (name, element type) pairs in order
    pub fn mutable_fields(&self) -> &[(PropertyName, ValueType)] {
        &self.mutable
    }

    /// Element type of the dynamic store, if the object has one
    pub fn dynamic_element(&self) -> Option<ValueType> {
        self.dynamic
    }

    /// Tier and declared type of a fixed (frozen or mutable) name
    pub fn field(&self, name: &str) -> Option<(Tier, ValueType)> {
        let find = |fields: &[(PropertyName, ValueType)]| {
            fields.iter().find(|(n, _)| n.as_str() == name).map(|(_, ty)| *ty)
        };
        find(&self.frozen)
            .map(|ty| (Tier::Frozen, ty))
            .or_else(|| find(&self.mutable).map(|ty| (Tier::Mutable, ty)))
    }

    /// Number of fixed names
    pub fn field_count(&self) -> usize {
        self.frozen.len() + self.mutable.len()
    }
}

/// Effective name → type mapping, sorted by name
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    entries: Vec<(PropertyName, ValueType)>,
}

impl Signature {
    /// Build from sources ordered lowest priority first.
    ///
    /// A later entry for the same name replaces an earlier one.
    pub fn from_layers<'a, I>(layers: I) -> Self
    where
        I: IntoIterator<Item = (&'a PropertyName, ValueType)>,
    {
        let mut entries: Vec<(PropertyName, ValueType)> = Vec::new();
        for (name, ty) in layers {
            match entries.binary_search_by(|(n, _)| n.cmp(name)) {
                Ok(pos) => entries[pos].1 = ty,
                Err(pos) => entries.insert(pos, (name.clone(), ty)),
            }
        }
        Self { entries }
    }

    /// Declared type of a name
    pub fn get(&self, name: &str) -> Option<ValueType> {
        self.entries
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .ok()
            .map(|pos| self.entries[pos].1)
    }

    /// Check whether the signature declares a name
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over (name, type) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyName, ValueType)> {
        self.entries.iter().map(|(name, ty)| (name, *ty))
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check for an empty signature
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether every requirement in `other` is met by `self`.
    ///
    /// A requirement `(name, ty)` is met when `self` declares `name` with a
    /// type that `ty` accepts.
    pub fn is_superset_of(&self, other: &Signature) -> bool {
        other.iter().all(|(name, required)| {
            self.get(name.as_str())
                .is_some_and(|actual| required.is_assignable_from(actual))
        })
    }
}
