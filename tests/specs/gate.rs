// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Idempotency guards: `creates` and `removes`.

use crate::prelude::*;

/// An existing `creates` match skips execution entirely.
#[tokio::test]
async fn creates_match_skips() {
    let project = Project::empty();
    let marker = project.file("exists_marker", "");

    let mut spec = TaskSpec::command(["touch".to_string(), project.loc("victim")]);
    spec.creates = Some(marker.clone());
    let result = run_ok(&spec).await;

    assert!(!result.changed);
    assert!(!result.failed);
    assert_eq!(result.rc, Some(0));
    assert!(result.msg.contains(&marker));
    assert!(!project.exists("victim"));
    assert!(result.diff.is_empty());
}

/// `removes` with zero matches skips with the complementary message.
#[tokio::test]
async fn removes_no_match_skips() {
    let project = Project::empty();
    let mut spec = TaskSpec::command(["echo".to_string(), "cleanup".into()]);
    spec.removes = Some(project.loc("absent-*"));
    let result = run_ok(&spec).await;

    assert!(!result.changed);
    assert_eq!(result.rc, Some(0));
    assert!(result.msg.contains("does not exist"));
}

/// Running the same guarded command twice: the second run is a no-op.
#[tokio::test]
async fn second_run_is_idempotent() {
    let project = Project::empty();
    let marker = project.loc("database");

    let mut spec = TaskSpec::command(["touch".to_string(), marker.clone()]);
    spec.creates = Some(marker);

    let first = run_ok(&spec).await;
    assert!(first.changed);
    assert_eq!(first.rc, Some(0));

    let second = run_ok(&spec).await;
    assert!(!second.changed);
    assert!(second.msg.contains("exists"));
}

/// Glob patterns count as matches, not just literal paths.
#[tokio::test]
async fn creates_accepts_globs() {
    let project = Project::empty();
    project.file("build-output.log", "");

    let mut spec = TaskSpec::command(["echo".to_string(), "rebuild".into()]);
    spec.creates = Some(project.loc("build-*.log"));
    let result = run_ok(&spec).await;
    assert!(!result.changed);
}
