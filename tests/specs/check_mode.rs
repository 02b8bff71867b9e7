// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Check mode: report intent without launching anything.

use crate::prelude::*;

/// No guards configured: nothing was checked, so the task just skips.
#[tokio::test]
async fn no_guards_skips() {
    let project = Project::empty();
    let mut spec = TaskSpec::command(["touch".to_string(), project.loc("victim")]);
    spec.check_mode = true;
    let result = run_ok(&spec).await;

    assert!(result.skipped);
    assert!(!result.changed);
    assert_eq!(result.rc, Some(0));
    assert!(!project.exists("victim"), "check mode must not spawn");
}

/// A satisfied guard reports the would-skip reason.
#[tokio::test]
async fn satisfied_guard_reports_would_skip() {
    let project = Project::empty();
    let marker = project.file("marker", "");

    let mut spec = TaskSpec::command(["touch".to_string(), project.loc("victim")]);
    spec.check_mode = true;
    spec.creates = Some(marker);
    let result = run_ok(&spec).await;

    assert!(!result.changed);
    assert!(result.msg.starts_with("Would not run command"));
    assert!(!project.exists("victim"));
}

/// An unsatisfied guard reports that the command would have changed things.
#[tokio::test]
async fn unsatisfied_guard_reports_would_change() {
    let project = Project::empty();
    let mut spec = TaskSpec::command(["touch".to_string(), project.loc("victim")]);
    spec.check_mode = true;
    spec.creates = Some(project.loc("victim"));
    let result = run_ok(&spec).await;

    assert!(result.changed);
    assert!(!result.skipped);
    assert_eq!(result.msg, "Command would have run if not in check mode");
    assert!(!project.exists("victim"));
}
