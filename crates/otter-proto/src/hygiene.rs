//! Construction-time validation.
//!
//! Every freshly built or merged object passes through [`validate`] exactly
//! once. It enforces:
//!
//! 1. frozen, mutable and dynamic names are pairwise disjoint
//! 2. no object is listed twice (by identity) among the prototypes
//!
//! and derives the object's [`Shape`] and effective [`Signature`].
//! Replication skips this step: a replica reuses its template's shape, which
//! was validated when the template was built.

use rustc_hash::FxHashSet;

use crate::error::{ObjectError, ObjectResult};
use crate::prototype::Prototypes;
use crate::shape::{Shape, Signature, TypeTag};
use crate::store::{DynamicStore, FrozenStore, MutableStore};

/// Reject names that live in more than one tier
pub fn check_tiers(
    frozen: &FrozenStore,
    mutable: &MutableStore,
    dynamic: Option<&DynamicStore>,
) -> ObjectResult<()> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let frozen_names = frozen.iter().map(|(name, _)| name);
    let mutable_names = mutable.iter().map(|(name, _)| name);
    let dynamic_names = dynamic.into_iter().flat_map(|d| d.iter().map(|(name, _)| name));

    for name in frozen_names.chain(mutable_names).chain(dynamic_names) {
        if !seen.insert(name.as_str()) {
            return Err(ObjectError::DuplicateProperty(name.clone()));
        }
    }
    Ok(())
}

/// Reject a prototype list that names the same object twice
pub fn check_prototypes(prototypes: &Prototypes) -> ObjectResult<()> {
    match prototypes.first_duplicate() {
        Some(index) => Err(ObjectError::DuplicatePrototype { index }),
        None => Ok(()),
    }
}

/// Effective signature: prototypes in list order, then frozen, then mutable.
///
/// Dynamic names are never part of a signature since they may be deleted.
pub fn signature(prototypes: &Prototypes, frozen: &FrozenStore, mutable: &MutableStore) -> Signature {
    let inherited = prototypes.iter().flat_map(|p| p.signature().iter());
    Signature::from_layers(inherited.chain(frozen.types()).chain(mutable.types()))
}

/// Own layout of an object
pub fn shape(
    tag: TypeTag,
    frozen: &FrozenStore,
    mutable: &MutableStore,
    dynamic: Option<&DynamicStore>,
) -> Shape {
    Shape::new(
        tag,
        frozen.types().map(|(name, ty)| (name.clone(), ty)).collect(),
        mutable.types().map(|(name, ty)| (name.clone(), ty)).collect(),
        dynamic.map(DynamicStore::element_type),
    )
}

/// Run every check and derive the shape and signature
pub fn validate(
    tag: TypeTag,
    frozen: &FrozenStore,
    mutable: &MutableStore,
    dynamic: Option<&DynamicStore>,
    prototypes: &Prototypes,
) -> ObjectResult<(Shape, Signature)> {
    check_tiers(frozen, mutable, dynamic)?;
    check_prototypes(prototypes)?;
    Ok((
        shape(tag, frozen, mutable, dynamic),
        signature(prototypes, frozen, mutable),
    ))
}
