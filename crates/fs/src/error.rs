// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while snapshotting a path.
///
/// A missing path is not an error; it snapshots as absent. These cover the
/// fatal cases: a symlink loop, or an existing path that cannot be read.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A symlink chain revisited a path it had already traversed.
    #[error("cyclic symlinks detected: {}", join_chain(chain))]
    CyclicSymlink {
        /// The visited paths, ending with the repeated one.
        chain: Vec<PathBuf>,
    },

    /// Stat or read failed on a path that exists.
    #[error("failed to inspect `{}`: {source}", path.display())]
    Io {
        /// The path that could not be inspected.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
}

fn join_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
