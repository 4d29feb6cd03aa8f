//! Prototype lists
//!
//! An object's prototypes are an ordered list of shared handles. Lookups walk
//! the list from the last entry to the first, so later prototypes take
//! priority, the same way later arguments win in a merge.

use smallvec::SmallVec;
use std::slice;
use tracing::trace;

use crate::error::ObjectResult;
use crate::object::Object;
use crate::value::Value;

/// Ordered list of prototype handles
#[derive(Clone, Debug, Default)]
pub struct Prototypes {
    list: SmallVec<[Object; 2]>,
}

impl Prototypes {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of prototypes
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check for no prototypes
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterate in declaration order (lowest priority first)
    pub fn iter(&self) -> slice::Iter<'_, Object> {
        self.list.iter()
    }

    /// Position of the first entry that repeats an earlier one
    pub fn first_duplicate(&self) -> Option<usize> {
        (1..self.list.len()).find(|&i| self.list[..i].iter().any(|p| p.ptr_eq(&self.list[i])))
    }

    /// Remove repeats, keeping each object's first position
    pub fn dedup(self) -> Self {
        let mut list: SmallVec<[Object; 2]> = SmallVec::with_capacity(self.list.len());
        for proto in self.list {
            if !list.iter().any(|p| p.ptr_eq(&proto)) {
                list.push(proto);
            }
        }
        Self { list }
    }

    /// Concatenate two lists without removing repeats
    pub fn concat(&self, other: &Prototypes) -> Self {
        self.iter().chain(other.iter()).cloned().collect()
    }

    /// Read `name` from the highest-priority prototype that can see it.
    ///
    /// `None` means no prototype answers for the name. An unassigned slot in
    /// the answering prototype is still an answer.
    pub fn resolve(&self, name: &str) -> Option<ObjectResult<Value>> {
        self.list.iter().rev().find_map(|proto| {
            let hit = proto.lookup(name);
            if hit.is_some() {
                trace!(property = name, prototype = %proto.tag(), "resolved through prototype");
            }
            hit
        })
    }

    /// Check whether any prototype can see `name`
    pub fn any_has(&self, name: &str) -> bool {
        self.list.iter().any(|p| p.has(name))
    }
}

impl FromIterator<Object> for Prototypes {
    fn from_iter<I: IntoIterator<Item = Object>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Prototypes {
    type Item = &'a Object;
    type IntoIter = slice::Iter<'a, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lists are equal when they hold the same objects in the same order
impl PartialEq for Prototypes {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a.ptr_eq(b))
    }
}
