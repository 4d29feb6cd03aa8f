//! Objects with tiered storage and prototype inheritance.
//!
//! An object bundles a frozen store, a mutable store, an optional dynamic
//! store and an ordered list of prototypes. Names are looked up in the own
//! tiers first, then in the prototypes from the last listed to the first.
//!
//! `Object` is a reference-counted handle: cloning it aliases the same
//! object, and prototypes are always held this way. Writes to a parent are
//! visible through every child that does not shadow the name.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::{ObjectError, ObjectResult};
use crate::hygiene;
use crate::name::PropertyName;
use crate::prototype::Prototypes;
use crate::shape::{Shape, Signature, TypeTag};
use crate::slot::Slot;
use crate::store::{DynamicStore, FrozenStore, FxIndexMap, FxIndexSet, MutableStore, PropertyStore};
use crate::value::Value;

/// Storage tier of an own property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Fixed after construction
    Frozen,
    /// Typed slot, written in place
    Mutable,
    /// Open property bag
    Dynamic,
}

pub(crate) struct ObjectInner {
    pub(crate) shape: Rc<Shape>,
    pub(crate) signature: Rc<Signature>,
    pub(crate) frozen: FrozenStore,
    pub(crate) mutable: MutableStore,
    pub(crate) dynamic: Option<RefCell<DynamicStore>>,
    pub(crate) prototypes: Prototypes,
}

/// Shared handle to an object
#[derive(Clone)]
pub struct Object(Rc<ObjectInner>);

impl Object {
    /// Validate the parts and assemble a new object
    pub(crate) fn assemble(
        tag: TypeTag,
        frozen: FrozenStore,
        mutable: MutableStore,
        dynamic: Option<DynamicStore>,
        prototypes: Prototypes,
    ) -> ObjectResult<Self> {
        let (shape, signature) =
            hygiene::validate(tag, &frozen, &mutable, dynamic.as_ref(), &prototypes)?;
        debug!(
            tag = %shape.tag(),
            frozen = frozen.len(),
            mutable = mutable.len(),
            dynamic = dynamic.as_ref().map(|d| d.len()),
            prototypes = prototypes.len(),
            "object constructed"
        );
        Ok(Self::from_parts(
            Rc::new(shape),
            Rc::new(signature),
            frozen,
            mutable,
            dynamic,
            prototypes,
        ))
    }

    /// Build from parts whose shape is already known to be valid
    pub(crate) fn from_parts(
        shape: Rc<Shape>,
        signature: Rc<Signature>,
        frozen: FrozenStore,
        mutable: MutableStore,
        dynamic: Option<DynamicStore>,
        prototypes: Prototypes,
    ) -> Self {
        Self(Rc::new(ObjectInner {
            shape,
            signature,
            frozen,
            mutable,
            dynamic: dynamic.map(RefCell::new),
            prototypes,
        }))
    }

    pub(crate) fn inner(&self) -> &ObjectInner {
        &self.0
    }

    /// Check whether two handles refer to the same object
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Type tag
    pub fn tag(&self) -> &TypeTag {
        self.0.shape.tag()
    }

    /// Own layout
    pub fn shape(&self) -> &Rc<Shape> {
        &self.0.shape
    }

    /// Effective signature, inherited names included
    pub fn signature(&self) -> &Signature {
        &self.0.signature
    }

    /// Prototype list
    pub fn prototypes(&self) -> &Prototypes {
        &self.0.prototypes
    }

    /// Frozen tier
    pub fn frozen(&self) -> &FrozenStore {
        &self.0.frozen
    }

    /// Mutable tier
    pub fn mutable(&self) -> &MutableStore {
        &self.0.mutable
    }

    /// Check whether the object has a dynamic store
    pub fn has_dynamic(&self) -> bool {
        self.0.dynamic.is_some()
    }

    /// Snapshot of the dynamic store
    pub fn dynamic(&self) -> Option<DynamicStore> {
        self.0.dynamic.as_ref().map(|d| d.borrow().clone())
    }

    fn dynamic_contains(&self, name: &str) -> bool {
        self.0
            .dynamic
            .as_ref()
            .is_some_and(|d| d.borrow().contains(name))
    }

    /// Tier of an own property
    pub fn tier_of(&self, name: &str) -> Option<Tier> {
        if self.0.frozen.contains(name) {
            Some(Tier::Frozen)
        } else if self.0.mutable.contains(name) {
            Some(Tier::Mutable)
        } else if self.dynamic_contains(name) {
            Some(Tier::Dynamic)
        } else {
            None
        }
    }

    /// Check if object has own property
    pub fn has_own(&self, name: &str) -> bool {
        self.tier_of(name).is_some()
    }

    /// Check if object has property (including prototype chain)
    pub fn has(&self, name: &str) -> bool {
        self.has_own(name) || self.0.prototypes.any_has(name)
    }

    /// Resolve a read without turning a miss into an error
    pub(crate) fn lookup(&self, name: &str) -> Option<ObjectResult<Value>> {
        if let Some(value) = self.0.frozen.lookup(name) {
            return Some(Ok(value.clone()));
        }
        if let Some(slot) = self.0.mutable.slot(name) {
            return Some(slot.get().map_err(|err| ObjectError::from_slot(name, err)));
        }
        if let Some(dynamic) = &self.0.dynamic {
            if let Some(value) = dynamic.borrow().lookup(name) {
                return Some(Ok(value.clone()));
            }
        }
        self.0.prototypes.resolve(name)
    }

    /// Read a property, own tiers first, then prototypes last to first
    pub fn get(&self, name: &str) -> ObjectResult<Value> {
        self.lookup(name)
            .unwrap_or_else(|| Err(ObjectError::not_found(name)))
    }

    /// Read a property, falling back to `default` when it is not visible
    pub fn get_or(&self, name: &str, default: Value) -> ObjectResult<Value> {
        self.lookup(name).unwrap_or(Ok(default))
    }

    /// Write a property.
    ///
    /// Frozen names are rejected, mutable names are written in place. A name
    /// inherited from a prototype cannot be written through the child. Any
    /// other name goes to the dynamic store, if there is one.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> ObjectResult<()> {
        let value = value.into();
        if self.0.frozen.contains(name) {
            return self.0.frozen.set(name, value);
        }
        if self.0.mutable.contains(name) {
            return self.0.mutable.set(name, value);
        }
        if !self.dynamic_contains(name) && self.0.prototypes.any_has(name) {
            return Err(ObjectError::PrototypePropertyReadOnly(name.into()));
        }
        match &self.0.dynamic {
            Some(dynamic) => dynamic.borrow_mut().set(name, value),
            None => Err(ObjectError::not_found(name)),
        }
    }

    /// Remove a dynamic property and return its value
    pub fn delete(&self, name: &str) -> ObjectResult<Value> {
        if self.0.frozen.contains(name) || self.0.mutable.contains(name) {
            return Err(ObjectError::NotDeletable(name.into()));
        }
        let removed = self
            .0
            .dynamic
            .as_ref()
            .and_then(|dynamic| dynamic.borrow_mut().delete(name));
        removed.ok_or_else(|| ObjectError::not_found(name))
    }

    /// Own names: frozen, then mutable, then dynamic
    pub fn own_names(&self) -> Vec<PropertyName> {
        let mut names = self.0.frozen.names();
        names.extend(self.0.mutable.names());
        if let Some(dynamic) = &self.0.dynamic {
            names.extend(dynamic.borrow().names());
        }
        names
    }

    /// Every visible name: own names, then inherited ones not yet listed.
    ///
    /// Prototypes are visited in lookup order (last listed first).
    pub fn visible_names(&self) -> Vec<PropertyName> {
        let mut names: FxIndexSet<PropertyName> = self.own_names().into_iter().collect();
        for proto in self.0.prototypes.iter().rev() {
            names.extend(proto.visible_names());
        }
        names.into_iter().collect()
    }

    /// Check whether both objects have the same type: equal shapes and
    /// prototypes of the same type, pairwise.
    pub fn same_type(&self, other: &Object) -> bool {
        let shapes_match =
            Rc::ptr_eq(&self.0.shape, &other.0.shape) || self.0.shape == other.0.shape;
        shapes_match
            && self.0.prototypes.len() == other.0.prototypes.len()
            && self
                .0
                .prototypes
                .iter()
                .zip(other.0.prototypes.iter())
                .all(|(a, b)| a.same_type(b))
    }

    /// Merge `right` over `self`; see [`merge`]
    pub fn merged_with(&self, right: &Object) -> ObjectResult<Object> {
        merge(self, right)
    }
}

/// A fixed (non-dynamic) property carried through a merge
enum Field {
    Frozen(Value),
    Mutable(Slot),
}

fn collect_fields(obj: &Object, fields: &mut FxIndexMap<PropertyName, Field>) {
    for (name, value) in obj.0.frozen.iter() {
        fields.insert(name.clone(), Field::Frozen(value.clone()));
    }
    for (name, slot) in obj.0.mutable.iter() {
        fields.insert(name.clone(), Field::Mutable(slot.copy()));
    }
}

/// Combine two objects into a new one, right-biased.
///
/// - fixed names come from whichever side supplies the final value, and keep
///   that side's tier; slots are copied, never shared
/// - dynamic entries are merged right over left
/// - prototypes are `left ++ right` with repeats dropped (first one kept)
/// - the type tag is taken from `right`
///
/// The result is validated again, so tiers that collide only after merging
/// are reported as `DuplicateProperty`.
pub fn merge(left: &Object, right: &Object) -> ObjectResult<Object> {
    let mut fields: FxIndexMap<PropertyName, Field> = FxIndexMap::default();
    collect_fields(left, &mut fields);
    collect_fields(right, &mut fields);

    let mut frozen = Vec::new();
    let mut mutable = Vec::new();
    for (name, field) in fields {
        match field {
            Field::Frozen(value) => frozen.push((name, value)),
            Field::Mutable(slot) => mutable.push((name, slot)),
        }
    }

    let dynamic = match (left.dynamic(), right.dynamic()) {
        (Some(l), Some(r)) => Some(DynamicStore::merged(&l, &r)),
        (l, r) => r.or(l),
    };

    let prototypes = left.0.prototypes.concat(&right.0.prototypes).dedup();

    debug!(left = %left.tag(), right = %right.tag(), "merging objects");
    Object::assemble(
        right.tag().clone(),
        FrozenStore::from_entries(frozen)?,
        MutableStore::from_slots(mutable)?,
        dynamic,
        prototypes,
    )
}

/// Objects compare by identity
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("tag", self.tag())
            .field("frozen", &self.0.frozen.len())
            .field("mutable", &self.0.mutable.len())
            .field("dynamic", &self.0.dynamic.as_ref().map(|d| d.borrow().len()))
            .field("prototypes", &self.0.prototypes.len())
            .finish()
    }
}
