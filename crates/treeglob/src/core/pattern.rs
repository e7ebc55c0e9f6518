// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use anyhow::Context;
use globset::{GlobBuilder, GlobMatcher};
use itertools::Itertools;
use std::ffi::OsStr;
use std::fs;
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};

const MAGIC_CHARACTERS: [char; 3] = ['*', '?', '['];

#[derive(Clone, Debug)]
enum Segment {
    Literal(String),
    Wildcard { matcher: GlobMatcher, include_hidden: bool },
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if !raw.contains(MAGIC_CHARACTERS) {
            return Segment::Literal(raw.to_string());
        }

        let escaped = escape_braces(raw);
        match GlobBuilder::new(&escaped)
            .literal_separator(true)
            .backslash_escape(false)
            .build()
        {
            Ok(glob) => Segment::Wildcard {
                matcher: glob.compile_matcher(),
                include_hidden: raw.starts_with('.'),
            },
            Err(cause) => {
                log::debug!("Treating '{}' as a literal name : {}", raw, cause);
                Segment::Literal(raw.to_string())
            },
        }
    }

    fn resolve(&self, dir: &Path, directories_only: bool) -> anyhow::Result<Vec<PathBuf>> {
        match self {
            Segment::Literal(name) => {
                let candidate = dir.join(name);
                let found = if directories_only {
                    candidate.is_dir()
                } else {
                    fs::symlink_metadata(&candidate).is_ok()
                };

                Ok(if found { vec![candidate] } else { vec![] })
            },
            Segment::Wildcard {
                matcher,
                include_hidden,
            } => {
                let listing = fs::read_dir(dir).with_context(|| format!("cannot list directory : {}", dir.display()))?;

                let mut matches = Vec::new();
                for entry in listing {
                    let entry = entry.with_context(|| format!("cannot read entry within : {}", dir.display()))?;
                    let name = entry.file_name();

                    if !include_hidden && is_hidden(&name) {
                        continue;
                    }

                    if !matcher.is_match(Path::new(&name)) {
                        continue;
                    }

                    let path = dir.join(&name);
                    if directories_only && !path.is_dir() {
                        continue;
                    }

                    matches.push(path);
                }

                Ok(matches)
            },
        }
    }
}

// Braces carry no meaning in shell globs, so they become single-character classes for globset
fn escape_braces(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    let mut in_class = false;
    let mut has_member = false;
    let mut negated = false;

    for character in raw.chars() {
        if in_class {
            escaped.push(character);
            match character {
                ']' if has_member => in_class = false,
                '!' | '^' if !has_member && !negated => negated = true,
                _ => has_member = true,
            }
            continue;
        }

        match character {
            '[' => {
                in_class = true;
                has_member = false;
                negated = false;
                escaped.push(character);
            },
            '{' => escaped.push_str("[{]"),
            '}' => escaped.push_str("[}]"),
            _ => escaped.push(character),
        }
    }

    escaped
}

fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

/// A shell-style glob pattern, resolved relative to a directory.
///
/// The pattern is split into `/`-separated segments, each one matched against a single
/// path component. Braces and backslashes are ordinary characters. Segments without `*`,
/// `?` or `[` name an entry literally, and so do segments that fail to compile as globs:
/// `[a.log` matches only an entry named exactly `[a.log`.
#[derive(Clone, Debug)]
pub struct FilePattern {
    raw: String,
    segments: Vec<Segment>,
    anchored: bool,
    directories_only: bool,
}

impl FilePattern {
    pub fn new(raw: &str) -> Self {
        let segments = raw
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(Segment::parse)
            .collect_vec();

        Self {
            raw: raw.to_string(),
            segments,
            anchored: raw.starts_with('/'),
            directories_only: raw.len() > 1 && raw.ends_with('/'),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Every path matching this pattern below `dir`, in the directory listing order
    pub fn expand(&self, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let Some((last, parents)) = self.segments.split_last() else {
            return Ok(vec![]);
        };

        let origin = if self.anchored {
            PathBuf::from(MAIN_SEPARATOR_STR)
        } else {
            dir.to_path_buf()
        };

        let mut candidates = vec![origin];
        for segment in parents {
            candidates = candidates
                .iter()
                .map(|candidate| segment.resolve(candidate, true))
                .flatten_ok()
                .collect::<anyhow::Result<Vec<_>>>()?;
        }

        candidates
            .iter()
            .map(|candidate| last.resolve(candidate, self.directories_only))
            .flatten_ok()
            .collect()
    }
}
