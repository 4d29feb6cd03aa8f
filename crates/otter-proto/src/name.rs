//! Property names

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Name of a property.
///
/// Cheap to clone. Hashes and orders exactly like the underlying `str`, so
/// maps keyed by `PropertyName` can be queried with a plain `&str`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyName(Arc<str>);

impl PropertyName {
    /// Create a property name
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Borrow the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PropertyName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PropertyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PropertyName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PropertyName {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&PropertyName> for PropertyName {
    fn from(name: &PropertyName) -> Self {
        name.clone()
    }
}

impl PartialEq<str> for PropertyName {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for PropertyName {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}
