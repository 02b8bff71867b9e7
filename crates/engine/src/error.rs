// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task-level error taxonomy.
//!
//! Everything here aborts the invocation before a result can be assembled.
//! A launched program exiting non-zero is NOT an error: it comes back as an
//! `ExecutionResult` with `failed` set, so captured output still reaches
//! the caller.

use errand_core::ValidationError;
use errand_fs::SnapshotError;
use thiserror::Error;

use crate::exec::ExecError;

/// Fatal conditions for one invocation.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Malformed or contradictory input; nothing was attempted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested working directory is unusable; aborted before spawn.
    #[error("Unable to change directory before execution: {message}")]
    Chdir {
        /// Description of why the directory was rejected.
        message: String,
    },

    /// Snapshotting a watched path failed (cycle or I/O); no partial diff
    /// set is produced.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// The program could not be launched at all.
    #[error(transparent)]
    Exec(#[from] ExecError),
}

impl TaskError {
    /// Return code carried in the rendered failure document.
    ///
    /// Validation failures report 256; a failed launch reports the OS
    /// errno when one exists. Other fatal conditions carry no code.
    pub fn rc(&self) -> Option<i32> {
        match self {
            Self::Validation(_) => Some(256),
            Self::Exec(ExecError::Spawn { source, .. }) => source.raw_os_error(),
            Self::Exec(ExecError::Stdin { .. }) => None,
            Self::Chdir { .. } | Self::Snapshot(_) => None,
        }
    }
}
