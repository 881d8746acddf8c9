use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Immutable, reference-counted string.
///
/// Person ids, titles and tooltips are cloned into many render commands and
/// position-table keys on every layout; cloning this is a refcount bump.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SharedStr(Arc<str>);

impl SharedStr {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SharedStr {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for SharedStr {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl std::ops::Deref for SharedStr {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SharedStr {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for SharedStr {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SharedStr {
    #[inline]
    fn from(s: &str) -> Self {
        SharedStr(Arc::from(s))
    }
}

impl From<String> for SharedStr {
    #[inline]
    fn from(s: String) -> Self {
        SharedStr(Arc::from(s))
    }
}

impl From<&String> for SharedStr {
    #[inline]
    fn from(s: &String) -> Self {
        SharedStr(Arc::from(s.as_str()))
    }
}

impl fmt::Display for SharedStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Hand-rolled to avoid serde's `rc` feature.
impl Serialize for SharedStr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SharedStr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Owned, so escaped strings and reader-based deserializers work too.
        let s = String::deserialize(deserializer)?;
        Ok(SharedStr::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_compare_equal() {
        let a = SharedStr::from("einstein");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a, "einstein");
    }

    #[test]
    fn deserializes_escaped_strings() {
        let s: SharedStr =
            serde_json::from_str(r#""Marie \"Sklodowska\" Curie""#).unwrap_or_else(|_| "".into());
        assert_eq!(s, r#"Marie "Sklodowska" Curie"#);
    }

    #[test]
    fn orders_lexically() {
        assert!(SharedStr::from("bohr") < SharedStr::from("curie"));
    }
}
