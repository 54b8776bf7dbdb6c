//! Node identifiers backed by a global string interner.
//!
//! Diagram graphs refer to nodes by string ids and every edge repeats two of
//! them. [`Id`] interns each distinct string once so ids are `Copy`, hash as
//! a single integer, and compare in constant time.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// Access goes through a `Mutex`, so ids may be created and resolved from
/// several layout runs at once.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Interned node identifier.
///
/// # Examples
///
/// ```
/// use trellis_core::identifier::Id;
///
/// let a = Id::new("node1");
/// let b: Id = "node1".into();
///
/// assert_eq!(a, b);
/// assert_eq!(a, "node1");
/// assert_eq!(a.to_string(), "node1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates the placeholder id given to the node at `index` when the
    /// input omitted one.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_core::identifier::Id;
    ///
    /// assert_eq!(Id::from_index(3), "node3");
    /// ```
    pub fn from_index(index: usize) -> Self {
        Self::new(&format!("node{index}"))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_interner(|interner| {
            let value = interner
                .resolve(self.0)
                .expect("Symbol should exist in interner");
            f.write_str(value)
        })
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                == other
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("alpha");
        let id2 = Id::new("alpha");
        let id3 = Id::new("beta");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "alpha");
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Id::from_index(0), "node0");
        assert_eq!(Id::from_index(0), Id::new("node0"));
        assert_ne!(Id::from_index(0), Id::from_index(1));
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Id::new("key1"), 1);
        map.insert(Id::new("key2"), 2);

        assert_eq!(map.get(&Id::new("key1")), Some(&1));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id = Id::new("serde_node");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"serde_node\"");

        let back: Id = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
