//! Tag mappings and per-item overlay scopes

use std::collections::BTreeMap;

/// Substituted for tags that have no value
pub const UNDEFINED_VALUE: &str = "<value not defined>";

/// Read access to resolved tag values
pub trait TagLookup {
    /// Value of a tag, if defined
    fn lookup(&self, name: &str) -> Option<&str>;

    /// Value of a tag, or the undefined marker
    fn resolve(&self, name: &str) -> &str {
        self.lookup(name).unwrap_or(UNDEFINED_VALUE)
    }
}

/// A mapping from tag name to value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    values: BTreeMap<String, String>,
}

impl Tags {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a tag, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate tags in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy every tag of `other` into this mapping, `other` winning on conflicts
    pub fn merge(&mut self, other: Tags) {
        self.values.extend(other.values);
    }
}

impl TagLookup for Tags {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for (k, v) in iter {
            tags.insert(k, v);
        }
        tags
    }
}

/// An immutable base mapping with a private overlay
///
/// Lookups consult the overlay first. Each item of an images table gets a
/// fresh scope, so values never carry over from one item to the next.
#[derive(Debug)]
pub struct TagScope<'a> {
    base: &'a Tags,
    overlay: Tags,
}

impl<'a> TagScope<'a> {
    pub fn new(base: &'a Tags) -> Self {
        Self {
            base,
            overlay: Tags::new(),
        }
    }

    /// Set a tag in the overlay
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.overlay.insert(name, value);
    }
}

impl TagLookup for TagScope<'_> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.overlay.get(name).or_else(|| self.base.get(name))
    }
}
