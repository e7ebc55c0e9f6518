// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use std::ffi::OsStr;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// How many subdirectory levels a traversal may descend below its base directory
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DepthLimit {
    #[default]
    Unbounded,
    Levels(usize),
}

impl DepthLimit {
    /// The limit that applies one level further down, or `None` when no descent is allowed
    pub fn descend(self) -> Option<Self> {
        match self {
            DepthLimit::Unbounded => Some(DepthLimit::Unbounded),
            DepthLimit::Levels(0) => None,
            DepthLimit::Levels(levels) => Some(DepthLimit::Levels(levels - 1)),
        }
    }
}

// Any negative value stands for "no limit", the way the command line takes it
impl From<i64> for DepthLimit {
    fn from(value: i64) -> Self {
        match usize::try_from(value) {
            Ok(levels) => DepthLimit::Levels(levels),
            Err(_) => DepthLimit::Unbounded,
        }
    }
}

impl From<usize> for DepthLimit {
    fn from(value: usize) -> Self {
        DepthLimit::Levels(value)
    }
}

impl Display for DepthLimit {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DepthLimit::Unbounded => formatter.write_str("unbounded"),
            DepthLimit::Levels(levels) => write!(formatter, "{} level(s)", levels),
        }
    }
}

/// Ordered glob patterns; a single pattern becomes a one-element list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternList(Vec<String>);

impl PatternList {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PatternList {
    fn from(value: &str) -> Self {
        PatternList(vec![value.to_string()])
    }
}

impl From<String> for PatternList {
    fn from(value: String) -> Self {
        PatternList(vec![value])
    }
}

impl From<Vec<String>> for PatternList {
    fn from(value: Vec<String>) -> Self {
        PatternList(value)
    }
}

impl From<Vec<&str>> for PatternList {
    fn from(value: Vec<&str>) -> Self {
        Self::from(value.as_slice())
    }
}

impl From<&[&str]> for PatternList {
    fn from(value: &[&str]) -> Self {
        PatternList(value.iter().map(|pattern| pattern.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PatternList {
    fn from(value: [&str; N]) -> Self {
        Self::from(value.as_slice())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkerConfig {
    pub base_dir: PathBuf,
    pub patterns: PatternList,
    pub max_depth: DepthLimit,
}

impl WalkerConfig {
    pub fn new(base_dir: impl Into<PathBuf>, patterns: impl Into<PatternList>) -> Self {
        Self {
            base_dir: base_dir.into(),
            patterns: patterns.into(),
            max_depth: DepthLimit::default(),
        }
    }

    pub fn with_max_depth(self, max_depth: impl Into<DepthLimit>) -> Self {
        Self {
            max_depth: max_depth.into(),
            ..self
        }
    }
}

/// A file produced by a traversal, along with where it was found
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,

    /// Set when the file was found inside a directory whose own name matched the pattern
    pub matched_dir: Option<PathBuf>,
}

impl WalkEntry {
    pub fn file(path: PathBuf) -> Self {
        Self {
            path,
            matched_dir: None,
        }
    }

    pub fn nested(matched_dir: PathBuf, path: PathBuf) -> Self {
        Self {
            path,
            matched_dir: Some(matched_dir),
        }
    }

    pub fn file_name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use crate::core::models::{DepthLimit, PatternList, WalkEntry, WalkerConfig};
    use assertor::{BooleanAssertion, EqualityAssertion};
    use std::ffi::OsStr;
    use std::path::PathBuf;

    #[test]
    fn should_treat_negative_depth_as_unbounded() {
        assertor::assert_that!(DepthLimit::from(-1_i64)).is_equal_to(DepthLimit::Unbounded);
        assertor::assert_that!(DepthLimit::from(-42_i64)).is_equal_to(DepthLimit::Unbounded);
        assertor::assert_that!(DepthLimit::from(3_i64)).is_equal_to(DepthLimit::Levels(3));
    }

    #[test]
    fn should_stop_descending_when_levels_are_exhausted() {
        let limit = DepthLimit::Levels(1);

        let one_down = limit.descend();
        let two_down = one_down.and_then(DepthLimit::descend);

        assertor::assert_that!(one_down).is_equal_to(Some(DepthLimit::Levels(0)));
        assertor::assert_that!(two_down).is_equal_to(None);
        assertor::assert_that!(DepthLimit::Unbounded.descend()).is_equal_to(Some(DepthLimit::Unbounded));
    }

    #[test]
    fn should_normalize_single_pattern_into_list() {
        let single = PatternList::from("*.log");
        let many = PatternList::from(["*.log", "*.txt"]);

        assertor::assert_that!(single.iter().collect::<Vec<_>>()).is_equal_to(vec!["*.log"]);
        assertor::assert_that!(many.iter().collect::<Vec<_>>()).is_equal_to(vec!["*.log", "*.txt"]);
        assertor::assert_that!(single.len()).is_equal_to(1);
        assertor::assert_that!(PatternList::default().is_empty()).is_true();
    }

    #[test]
    fn should_default_to_unbounded_depth() {
        let config = WalkerConfig::new("logs", "*.log");

        assertor::assert_that!(config.max_depth).is_equal_to(DepthLimit::Unbounded);
        assertor::assert_that!(config.with_max_depth(2_usize).max_depth).is_equal_to(DepthLimit::Levels(2));
    }

    #[test]
    fn should_expose_file_name_of_entry() {
        let entry = WalkEntry::nested(PathBuf::from("logs/archive"), PathBuf::from("logs/archive/app.log"));

        assertor::assert_that!(entry.file_name()).is_equal_to(Some(OsStr::new("app.log")));
        assertor::assert_that!(entry.matched_dir).is_equal_to(Some(PathBuf::from("logs/archive")));
    }
}
