// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change detection over watched paths.

use crate::prelude::*;

/// A command that appends to the watched file produces exactly one diff.
#[tokio::test]
async fn append_detected() {
    let project = Project::empty();
    let watched = project.file("f", "a line\n");

    let mut spec = TaskSpec::raw(format!("echo another >> {watched}"));
    spec.use_shell = true;
    spec.watch = vec![watched.clone()];
    let result = run_ok(&spec).await;

    assert!(result.changed);
    assert_eq!(result.rc, Some(0));
    assert_eq!(result.diff.len(), 1);
    assert_eq!(result.diff[0].path, watched);
    assert_ne!(result.diff[0].before.content, result.diff[0].after.content);
}

/// Watched paths override the changed-by-default assumption.
#[tokio::test]
async fn no_change_means_unchanged() {
    let project = Project::empty();
    let watched = project.file("f", "a line\n");

    let mut spec = TaskSpec::command(["true"]);
    spec.watch = vec![watched];
    let result = run_ok(&spec).await;

    assert!(!result.changed);
    assert!(result.diff.is_empty());
}

/// Only the paths that changed show up in the diff set.
#[tokio::test]
async fn untouched_paths_stay_out_of_the_diff() {
    let project = Project::empty();
    let stable = project.file("stable", "same\n");
    let target = project.file("target", "old\n");

    let mut spec = TaskSpec::raw(format!("echo new > {target}"));
    spec.use_shell = true;
    spec.watch = vec![stable, target.clone()];
    let result = run_ok(&spec).await;

    assert!(result.changed);
    assert_eq!(result.diff.len(), 1);
    assert_eq!(result.diff[0].path, target);
}

/// Deleting a watched file collapses the record to a presence change.
#[tokio::test]
async fn deletion_collapses() {
    let project = Project::empty();
    let watched = project.file("doomed", "short lived\n");

    let mut spec = TaskSpec::command(["rm".to_string(), watched.clone()]);
    spec.watch = vec![watched];
    let result = run_ok(&spec).await;

    assert!(result.changed);
    let record = &result.diff[0];
    assert_eq!(record.before.stat, None);
    assert_eq!(record.after.stat, None);
}
