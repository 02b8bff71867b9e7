// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The orchestrator: validate, gate, snapshot, execute, diff, assemble.
//!
//! One invocation walks a fixed pipeline: validation, idempotency gating,
//! optional before-snapshots, execution (or simulation in check mode),
//! optional after-snapshots with diffing, then result assembly. There are
//! no feedback loops and no state shared between invocations.

use std::path::{Path, PathBuf};

use errand_core::{format_delta, format_timestamp, TaskSpec};
use errand_fs::{diff, snapshot, FileSnapshot};

use crate::error::TaskError;
use crate::exec;
use crate::gate;
use crate::result::ExecutionResult;

/// Execute one task and assemble its result.
///
/// Fatal conditions (validation, unusable working directory, snapshot
/// failures, unlaunchable program) come back as [`TaskError`]. A launched
/// program exiting non-zero is a successful invocation with a failed
/// result.
pub async fn run(spec: &TaskSpec) -> Result<ExecutionResult, TaskError> {
    // Validating
    let form = spec.resolve_form()?;
    if let Some(executable) = &spec.executable {
        if !spec.use_shell {
            tracing::warn!(
                executable = %executable.display(),
                "`executable` is only supported together with `use_shell`; not using it"
            );
        }
    }
    let chdir = match &spec.chdir {
        Some(dir) => Some(validated_chdir(dir)?),
        None => None,
    };

    let mut result = ExecutionResult::new(form.clone());

    // Gating
    let skip = gate::evaluate(
        spec.creates.as_deref(),
        spec.removes.as_deref(),
        chdir.as_deref(),
        spec.check_mode,
    )?;
    if let Some(skip) = skip {
        result.rc = Some(0);
        result.msg = skip.msg;
        result.stdout = skip.stdout_note;
        return Ok(result.finalize());
    }

    // Execution is assumed to mutate the system until diffing proves
    // otherwise.
    result.changed = true;

    // Snapshotting-Before
    let watch_base = if spec.watch.is_empty() {
        None
    } else {
        Some(watch_base(chdir.as_deref())?)
    };
    let mut before: Vec<FileSnapshot> = Vec::with_capacity(spec.watch.len());
    if let Some(base) = &watch_base {
        for path in &spec.watch {
            before.push(snapshot(Path::new(path), base).await?);
        }
    }

    // Executing-or-Simulating
    if spec.check_mode {
        result.rc = Some(0);
        result.msg = "Command would have run if not in check mode".to_string();
        if spec.creates.is_none() && spec.removes.is_none() {
            // Nothing was actually checked, so there is nothing to claim.
            result.skipped = true;
            result.changed = false;
        }
    } else {
        let launch = exec::build_launch(&form, spec);
        let stdin = exec::stdin_payload(spec);
        let output = exec::execute(&launch, chdir.as_deref(), stdin).await?;
        result.rc = Some(output.rc);
        result.stdout = decode(&output.stdout, spec.strip_trailing_newlines);
        result.stderr = decode(&output.stderr, spec.strip_trailing_newlines);
        result.start = Some(format_timestamp(&output.start));
        result.end = Some(format_timestamp(&output.end));
        result.delta = Some(format_delta(output.end - output.start));
    }

    // Snapshotting-After / Diffing
    if let Some(base) = &watch_base {
        result.changed = false;
        for (path, before) in spec.watch.iter().zip(before) {
            let after = snapshot(Path::new(path), base).await?;
            if let Some(record) = diff(path, &before, &after) {
                result.diff.push(record);
                result.changed = true;
            }
        }
    }

    Ok(result.finalize())
}

/// Check the requested working directory before anything is spawned.
fn validated_chdir(dir: &Path) -> Result<PathBuf, TaskError> {
    let meta = std::fs::metadata(dir).map_err(|e| TaskError::Chdir {
        message: format!("{}: {e}", dir.display()),
    })?;
    if meta.is_dir() {
        Ok(dir.to_path_buf())
    } else {
        Err(TaskError::Chdir {
            message: format!("{} is not a directory", dir.display()),
        })
    }
}

/// Base directory for resolving relative watched paths.
fn watch_base(chdir: Option<&Path>) -> Result<PathBuf, TaskError> {
    match chdir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir().map_err(|e| TaskError::Chdir {
            message: format!("working directory unavailable: {e}"),
        }),
    }
}

/// Decode captured output, stripping trailing newline noise when asked.
fn decode(bytes: &[u8], strip: bool) -> String {
    let text = String::from_utf8_lossy(bytes);
    if strip {
        text.trim_end_matches(['\r', '\n']).to_string()
    } else {
        text.into_owned()
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
