// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::core::models::{DepthLimit, WalkEntry, WalkerConfig};
use crate::core::pattern::FilePattern;
use anyhow::Context;
use itertools::Itertools;
use std::fmt::{Debug, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::slice;
use std::vec;

pub type DirCallback = Box<dyn FnMut(&Path) -> anyhow::Result<()>>;

#[derive(Default)]
struct DirCallbacks {
    on_enter: Option<DirCallback>,
    on_exit: Option<DirCallback>,
}

impl DirCallbacks {
    fn enter(&mut self, dir: &Path) -> anyhow::Result<()> {
        log::trace!("Entering {}", dir.display());
        self.on_enter.as_mut().map_or(Ok(()), |callback| callback(dir))
    }

    fn exit(&mut self, dir: &Path) -> anyhow::Result<()> {
        log::trace!("Leaving {}", dir.display());
        self.on_exit.as_mut().map_or(Ok(()), |callback| callback(dir))
    }
}

/// Enumerates files below a base directory that match a list of glob patterns.
///
/// For every pattern, in order, the walker first descends into each subdirectory (bounded by
/// the configured depth) and only then matches the pattern against the directory it is in.
/// Directories whose own name matches the pattern get one extra look inside, where only
/// regular files are kept. Enter/exit callbacks bracket everything produced within a
/// directory.
pub struct DirectoryWalker {
    config: WalkerConfig,
    patterns: Vec<FilePattern>,
    callbacks: DirCallbacks,
}

impl DirectoryWalker {
    pub fn new(config: WalkerConfig) -> Self {
        let patterns = config.patterns.iter().map(FilePattern::new).collect_vec();

        Self {
            config,
            patterns,
            callbacks: DirCallbacks::default(),
        }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Replaces the callback invoked right before descending into a directory
    pub fn on_enter_dir<F>(&mut self, callback: F)
    where
        F: FnMut(&Path) -> anyhow::Result<()> + 'static,
    {
        self.callbacks.on_enter = Some(Box::new(callback));
    }

    /// Replaces the callback invoked right after finishing with a directory
    pub fn on_exit_dir<F>(&mut self, callback: F)
    where
        F: FnMut(&Path) -> anyhow::Result<()> + 'static,
    {
        self.callbacks.on_exit = Some(Box::new(callback));
    }

    /// Starts a fresh traversal. Nothing touches the filesystem until the iterator is polled.
    pub fn walk(&mut self) -> Walk<'_> {
        Walk {
            base_dir: &self.config.base_dir,
            max_depth: self.config.max_depth,
            patterns: self.patterns.iter(),
            current: None,
            callbacks: &mut self.callbacks,
            frames: Vec::new(),
            finished: false,
        }
    }
}

impl Debug for DirectoryWalker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryWalker")
            .field("config", &self.config)
            .field("on_enter_dir", &self.callbacks.on_enter.as_ref().map(|_| "..."))
            .field("on_exit_dir", &self.callbacks.on_exit.as_ref().map(|_| "..."))
            .finish()
    }
}

impl<'w> IntoIterator for &'w mut DirectoryWalker {
    type Item = anyhow::Result<WalkEntry>;
    type IntoIter = Walk<'w>;

    fn into_iter(self) -> Self::IntoIter {
        self.walk()
    }
}

enum Stage {
    Pending(DepthLimit),
    Descending {
        children: fs::ReadDir,
        child_depth: DepthLimit,
    },
    Matching(vec::IntoIter<PathBuf>),
    NestedPending,
    Nested(vec::IntoIter<PathBuf>),
}

// One directory being worked on. Bracketed frames owe an exit callback once done.
struct Frame {
    dir: PathBuf,
    bracketed: bool,
    stage: Stage,
}

enum Step {
    Yield(WalkEntry),
    Enter(Frame),
    Done,
}

impl Frame {
    fn root(dir: PathBuf, depth_left: DepthLimit) -> Self {
        Self {
            dir,
            bracketed: false,
            stage: Stage::Pending(depth_left),
        }
    }

    fn subdirectory(dir: PathBuf, depth_left: DepthLimit) -> Self {
        Self {
            dir,
            bracketed: true,
            stage: Stage::Pending(depth_left),
        }
    }

    fn matched_directory(dir: PathBuf) -> Self {
        Self {
            dir,
            bracketed: true,
            stage: Stage::NestedPending,
        }
    }

    fn step(&mut self, pattern: &FilePattern) -> anyhow::Result<Step> {
        loop {
            match &mut self.stage {
                Stage::Pending(depth_left) => {
                    self.stage = match depth_left.descend() {
                        Some(child_depth) => Stage::Descending {
                            children: fs::read_dir(&self.dir)
                                .with_context(|| format!("cannot list directory : {}", self.dir.display()))?,
                            child_depth,
                        },
                        None => Stage::Matching(pattern.expand(&self.dir)?.into_iter()),
                    };
                },
                Stage::Descending { children, child_depth } => match children.next() {
                    Some(entry) => {
                        let entry =
                            entry.with_context(|| format!("cannot read entry within : {}", self.dir.display()))?;
                        let path = entry.path();
                        if path.is_dir() {
                            return Ok(Step::Enter(Frame::subdirectory(path, *child_depth)));
                        }
                    },
                    None => self.stage = Stage::Matching(pattern.expand(&self.dir)?.into_iter()),
                },
                Stage::Matching(matches) => {
                    return Ok(match matches.next() {
                        Some(path) if path.is_dir() => Step::Enter(Frame::matched_directory(path)),
                        Some(path) => Step::Yield(WalkEntry::file(path)),
                        None => Step::Done,
                    });
                },
                Stage::NestedPending => self.stage = Stage::Nested(pattern.expand(&self.dir)?.into_iter()),
                Stage::Nested(matches) => match matches.next() {
                    Some(path) if path.is_file() => return Ok(Step::Yield(WalkEntry::nested(self.dir.clone(), path))),
                    Some(_) => continue,
                    None => return Ok(Step::Done),
                },
            }
        }
    }
}

/// A lazy traversal over a [`DirectoryWalker`].
///
/// The first error ends the traversal; directories still open at that point are left
/// without their exit callback.
pub struct Walk<'w> {
    base_dir: &'w Path,
    max_depth: DepthLimit,
    patterns: slice::Iter<'w, FilePattern>,
    current: Option<&'w FilePattern>,
    callbacks: &'w mut DirCallbacks,
    frames: Vec<Frame>,
    finished: bool,
}

impl Walk<'_> {
    fn advance(&mut self) -> anyhow::Result<Option<WalkEntry>> {
        loop {
            let (Some(pattern), Some(frame)) = (self.current, self.frames.last_mut()) else {
                let Some(pattern) = self.patterns.next() else {
                    return Ok(None);
                };

                log::debug!(
                    "Walking {} for '{}' ({})",
                    self.base_dir.display(),
                    pattern.as_str(),
                    self.max_depth
                );
                self.current = Some(pattern);
                self.frames.push(Frame::root(self.base_dir.to_path_buf(), self.max_depth));
                continue;
            };

            match frame.step(pattern)? {
                Step::Yield(entry) => return Ok(Some(entry)),
                Step::Enter(frame) => {
                    self.callbacks.enter(&frame.dir)?;
                    self.frames.push(frame);
                },
                Step::Done => {
                    if let Some(done) = self.frames.pop()
                        && done.bracketed
                    {
                        self.callbacks.exit(&done.dir)?;
                    }
                },
            }
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = anyhow::Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.advance() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.finished = true;
                None
            },
            Err(cause) => {
                self.finished = true;
                Some(Err(cause))
            },
        }
    }
}
