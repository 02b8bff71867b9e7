// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation happens before any side effect.

use crate::prelude::*;
use errand_core::ValidationError;
use errand_engine::TaskError;

/// Neither command form: rejected with nothing attempted.
#[tokio::test]
async fn neither_form() {
    let err = run(&TaskSpec::default()).await.unwrap_err();
    assert!(matches!(
        err,
        TaskError::Validation(ValidationError::NoCommand)
    ));
    assert_eq!(err.rc(), Some(256));
}

/// Both command forms: rejected, and guard side effects never evaluated.
#[tokio::test]
async fn both_forms() {
    let project = Project::empty();
    let mut spec = TaskSpec::raw(format!("touch {}", project.loc("victim")));
    spec.argv = Some(vec!["touch".into(), project.loc("victim")]);
    let err = run(&spec).await.unwrap_err();

    assert!(matches!(
        err,
        TaskError::Validation(ValidationError::BothForms)
    ));
    assert!(!project.exists("victim"));
}

/// A free-form command with broken quoting never reaches the executor.
#[tokio::test]
async fn unsplittable_free_form() {
    let err = run(&TaskSpec::raw("echo 'unterminated")).await.unwrap_err();
    assert!(matches!(
        err,
        TaskError::Validation(ValidationError::Split(_))
    ));
}
