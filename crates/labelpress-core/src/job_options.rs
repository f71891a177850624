// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job options — the `key=value` list configured for the queue.
//
// Text form is one option per line or comma-separated (or both). Each
// segment splits on its first `=`. A malformed segment rejects the whole list
// so that a typo can never silently drop an option from a physical print.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LabelpressError, Result};

/// Options every label job starts from when nothing else is configured.
pub const LABEL_DEFAULT_OPTIONS: &[(&str, &str)] = &[
    ("print-scaling", "none"),
    ("TrimMode", "Strong"),
    ("BlankSpace", "False"),
    ("orientation-requested", "none"),
];

/// Ordered, possibly repeating, list of job options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOptions {
    entries: Vec<(String, String)>,
}

impl JobOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock option list for the label queue.
    pub fn label_defaults() -> Self {
        LABEL_DEFAULT_OPTIONS.iter().copied().collect()
    }

    /// Parse newline- and/or comma-separated `key=value` text.
    ///
    /// Whitespace around keys and values is trimmed and empty segments are
    /// skipped. A segment without `=` or with an empty key fails with
    /// [`LabelpressError::InvalidConfiguration`].
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();

        for (index, line) in text.lines().enumerate() {
            for segment in line.split(',') {
                let segment = segment.trim();
                if segment.is_empty() {
                    continue;
                }

                let (key, value) = segment.split_once('=').ok_or_else(|| {
                    LabelpressError::InvalidConfiguration(format!(
                        "job option '{segment}' on line {} is missing '='",
                        index + 1
                    ))
                })?;

                let key = key.trim();
                if key.is_empty() {
                    return Err(LabelpressError::InvalidConfiguration(format!(
                        "job option '{segment}' on line {} has an empty key",
                        index + 1
                    )));
                }

                entries.push((key.to_owned(), value.trim().to_owned()));
            }
        }

        Ok(Self { entries })
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// First value configured for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
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

impl FromStr for JobOptions {
    type Err = LabelpressError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for JobOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// One `key=value` per line, the same form [`JobOptions::parse`] reads.
impl std::fmt::Display for JobOptions {
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
    fn parses_lines_and_commas_in_order() {
        let options =
            JobOptions::parse("print-scaling=none\nTrimMode=Strong, BlankSpace=False").unwrap();
        let pairs: Vec<_> = options.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("print-scaling", "none"),
                ("TrimMode", "Strong"),
                ("BlankSpace", "False"),
            ]
        );
    }

    #[test]
    fn splits_on_first_equals_only() {
        let options = JobOptions::parse("job-name=a=b").unwrap();
        assert_eq!(options.get("job-name"), Some("a=b"));
    }

    #[test]
    fn empty_value_is_allowed() {
        let options = JobOptions::parse("media=").unwrap();
        assert_eq!(options.get("media"), Some(""));
    }

    #[test]
    fn blank_lines_and_trailing_commas_are_skipped() {
        let options = JobOptions::parse("\n  copies=2,\n\n").unwrap();
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn duplicate_keys_are_kept_in_order() {
        let options = JobOptions::parse("copies=1\ncopies=2").unwrap();
        let values: Vec<_> = options.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec!["1", "2"]);
        assert_eq!(options.get("copies"), Some("1"));
    }

    #[test]
    fn segment_without_equals_is_rejected() {
        let err = JobOptions::parse("print-scaling=none\nfit-to-page").unwrap_err();
        assert!(matches!(err, LabelpressError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = JobOptions::parse("copies=1, =landscape").unwrap_err();
        assert!(matches!(err, LabelpressError::InvalidConfiguration(_)));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let text = "print-scaling=none, TrimMode=Strong\norientation-requested=none\ncopies=2\ncopies=3";
        let options = JobOptions::parse(text).unwrap();
        let reparsed = JobOptions::parse(&options.to_string()).unwrap();
        assert_eq!(reparsed, options);
    }

    #[test]
    fn label_defaults_match_queue_conventions() {
        let defaults = JobOptions::label_defaults();
        assert_eq!(defaults.get("TrimMode"), Some("Strong"));
        assert_eq!(defaults.get("orientation-requested"), Some("none"));
        assert_eq!(defaults.len(), 4);
    }
}
