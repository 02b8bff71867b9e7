// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! errand-fs: file snapshots and before/after diffing
//!
//! A snapshot is a structured, comparable description of one path: the stat
//! chain (longer than one entry only for symlinks), and a content
//! descriptor. Two snapshots of the same logical path diff into at most one
//! change record.

pub mod diff;
pub mod error;
pub mod snapshot;
pub mod stat;

pub use diff::{diff, DiffRecord, DiffSide};
pub use error::SnapshotError;
pub use snapshot::{snapshot, ContentDescriptor, FileSnapshot, PresenceState};
pub use stat::{FileTypeTag, StatEntry};
