// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Resolved job attributes, in the order they are sent.

use serde::{Deserialize, Serialize};

/// Attribute names the resolver itself may emit.
pub mod keys {
    pub const COPIES: &str = "copies";
    pub const MEDIA: &str = "media";
    pub const PRINT_SCALING: &str = "print-scaling";
    pub const ORIENTATION_REQUESTED: &str = "orientation-requested";
    pub const TRIM_MODE: &str = "TrimMode";
    pub const BLANK_SPACE: &str = "BlankSpace";
    pub const FEED_WHERE: &str = "FeedWhere";
    pub const FEED_DIST: &str = "FeedDist";
}

/// Ordered list of job attributes. Keys are case-sensitive and may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    entries: Vec<(String, String)>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// First value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value recorded for `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl std::fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, (key, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let mut attrs = AttributeSet::new();
        attrs.push(keys::COPIES, "2");
        attrs.push(keys::MEDIA, "Custom.48x30mm");
        attrs.push(keys::COPIES, "3");

        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.get(keys::COPIES), Some("2"));
        assert_eq!(attrs.get_all(keys::COPIES).collect::<Vec<_>>(), vec!["2", "3"]);
        assert_eq!(attrs.to_string(), "copies=2\nmedia=Custom.48x30mm\ncopies=3");
    }

    #[test]
    fn keys_are_case_sensitive() {
        let mut attrs = AttributeSet::new();
        attrs.push(keys::FEED_WHERE, "AfterJob");
        assert!(attrs.contains_key("FeedWhere"));
        assert!(!attrs.contains_key("feedwhere"));
    }
}
