// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

//! Walks a directory tree and yields the files matching a list of glob patterns, calling
//! back whenever a subdirectory is entered or left.

pub mod core;
pub mod walker;

pub use crate::core::models::{DepthLimit, PatternList, WalkEntry, WalkerConfig};
pub use crate::core::pattern::FilePattern;
pub use crate::walker::{DirCallback, DirectoryWalker, Walk};
