// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot/diff round trips and the symlink cycle contract.

use std::os::unix::fs::symlink;
use std::path::Path;

use crate::prelude::*;
use errand_fs::{diff, snapshot, FileSnapshot, SnapshotError};

/// An absent path diffed against itself yields nothing.
#[tokio::test]
async fn absent_round_trip() {
    let project = Project::empty();
    let snap = snapshot(Path::new("missing"), project.path()).await.unwrap();
    assert!(snap.is_absent());
    assert_eq!(diff("missing", &snap, &snap), None);
}

/// Re-snapshotting an untouched path yields no diff.
#[tokio::test]
async fn unchanged_round_trip() {
    let project = Project::empty();
    project.file("steady.txt", "contents\n");

    let first = snapshot(Path::new("steady.txt"), project.path()).await.unwrap();
    let second = snapshot(Path::new("steady.txt"), project.path()).await.unwrap();
    assert_eq!(diff("steady.txt", &first, &second), None);
}

/// A two-link cycle fails fast instead of looping or truncating.
#[tokio::test]
async fn symlink_cycle_is_fatal() {
    let project = Project::empty();
    let a = project.path().join("a");
    let b = project.path().join("b");
    symlink(&b, &a).unwrap();
    symlink(&a, &b).unwrap();

    let err = snapshot(&a, project.path()).await.unwrap_err();
    assert!(matches!(err, SnapshotError::CyclicSymlink { .. }));
}

/// Appearing between snapshots collapses the diff to state and path.
#[tokio::test]
async fn presence_change_collapses() {
    let project = Project::empty();
    let before = snapshot(Path::new("new.txt"), project.path()).await.unwrap();
    assert_eq!(before, FileSnapshot::Absent);

    project.file("new.txt", "now present\n");
    let after = snapshot(Path::new("new.txt"), project.path()).await.unwrap();

    let record = diff("new.txt", &before, &after).unwrap();
    assert_eq!(record.before.stat, None);
    assert_eq!(record.before.content, None);
    assert_eq!(record.after.stat, None);
    assert_eq!(record.after.content, None);
    assert_eq!(record.before.path, "new.txt");
}
